//! Check-in flow: location fix, face-verification stub, attendance
//! record. The camera is an external capability; the client only needs a
//! proof object back, so the stub stands in for the device camera.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::geo::{FixRequest, LocationProvider, PermissionStatus};
use crate::models::attendance::{AttendanceRecord, AttendanceStatus};
use crate::store::Store;
use crate::store::log::stlog;
use crate::store::queries::insert_attendance;
use crate::ui::messages::{info, success};
use chrono::{DateTime, Local, Utc};
use std::time::Duration;

/// Proof that a selfie was captured and passed the liveness hint.
#[derive(Debug, Clone)]
pub struct SelfieProof {
    pub captured_at: DateTime<Utc>,
    pub liveness_passed: bool,
}

/// Device camera capability, as consumed by the check-in flow.
pub trait CameraCapture {
    fn capture_selfie(&self) -> AppResult<SelfieProof>;
}

/// Stub camera: always produces a live selfie. Stands in for the device
/// capability the mobile shell would provide.
pub struct StubCamera;

impl CameraCapture for StubCamera {
    fn capture_selfie(&self) -> AppResult<SelfieProof> {
        Ok(SelfieProof {
            captured_at: Utc::now(),
            liveness_passed: true,
        })
    }
}

pub struct CheckInLogic;

impl CheckInLogic {
    /// Run the full check-in: permission, single-shot fix, face
    /// verification (unless skipped), then record today's attendance.
    pub async fn perform(
        provider: &dyn LocationProvider,
        camera: &dyn CameraCapture,
        store: &Store,
        cfg: &Config,
        skip_verification: bool,
    ) -> AppResult<AttendanceRecord> {
        if provider.request_permission().await == PermissionStatus::Denied {
            return Err(AppError::PermissionDenied);
        }

        let timeout = Duration::from_secs(cfg.checkin_fix_timeout_secs);
        let request = FixRequest {
            high_accuracy: cfg.high_accuracy,
            timeout,
        };
        // Unlike the tracking ticks, check-in needs the fix: no fix, no
        // attendance mark.
        let fix = match tokio::time::timeout(timeout, provider.current_fix(&request)).await {
            Ok(result) => result?,
            Err(_) => return Err(AppError::Fix(crate::geo::FixError::Timeout)),
        };
        info(format!(
            "Location fixed at {:.4}, {:.4} (±{:.0} m): {}",
            fix.latitude, fix.longitude, fix.accuracy, cfg.office_address
        ));

        let method = if skip_verification {
            "manual"
        } else {
            let proof = camera.capture_selfie()?;
            if !proof.liveness_passed {
                return Err(AppError::VerificationFailed(
                    "liveness check did not pass".to_string(),
                ));
            }
            success("Photo captured!");
            "face"
        };

        let now = Local::now();
        let record = AttendanceRecord {
            id: 0,
            date: now.date_naive(),
            check_in: now.time(),
            check_out: None,
            hours_worked: None,
            status: AttendanceStatus::Active,
            method: method.to_string(),
        };
        let id = insert_attendance(&store.conn, &record)?;
        stlog(
            &store.conn,
            "checkin",
            &record.date_str(),
            "attendance recorded",
        )?;
        success("Attendance marked successfully!");

        Ok(AttendanceRecord { id, ..record })
    }
}
