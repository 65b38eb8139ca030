//! Simulated positioning device used by the CLI.
//! Produces fixes that drift a few meters around a configured home point.

use crate::geo::{Fix, FixError, FixRequest, LocationProvider, PermissionStatus};
use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use std::time::Duration;

// Roughly one meter expressed in degrees of latitude.
const METER_DEG: f64 = 1.0 / 111_320.0;

pub struct SimulatedDevice {
    base_latitude: f64,
    base_longitude: f64,
    /// Artificial acquisition delay per fix.
    acquisition_delay: Duration,
}

impl SimulatedDevice {
    pub fn new(base_latitude: f64, base_longitude: f64) -> Self {
        Self {
            base_latitude,
            base_longitude,
            acquisition_delay: Duration::from_millis(120),
        }
    }

    pub fn with_acquisition_delay(mut self, delay: Duration) -> Self {
        self.acquisition_delay = delay;
        self
    }
}

#[async_trait]
impl LocationProvider for SimulatedDevice {
    async fn request_permission(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    async fn current_fix(&self, request: &FixRequest) -> Result<Fix, FixError> {
        tokio::time::sleep(self.acquisition_delay).await;

        let (drift_meters, accuracy_range) = if request.high_accuracy {
            (8.0, 4.0..12.0)
        } else {
            (40.0, 15.0..60.0)
        };

        let mut rng = rand::thread_rng();
        let dlat = rng.gen_range(-drift_meters..drift_meters) * METER_DEG;
        let dlon = rng.gen_range(-drift_meters..drift_meters) * METER_DEG;

        Ok(Fix {
            latitude: self.base_latitude + dlat,
            longitude: self.base_longitude + dlon,
            accuracy: rng.gen_range(accuracy_range),
            measured_at: Utc::now(),
        })
    }
}
