use crate::core::tracking::TrackingConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_worker_name")]
    pub worker_name: String,
    #[serde(default = "default_worker_phone")]
    pub worker_phone: String,
    /// Office location the simulated device drifts around.
    #[serde(default = "default_office_address")]
    pub office_address: String,
    #[serde(default = "default_office_latitude")]
    pub office_latitude: f64,
    #[serde(default = "default_office_longitude")]
    pub office_longitude: f64,

    /// Seconds between scheduled location captures.
    #[serde(default = "default_capture_interval")]
    pub capture_interval_secs: u64,
    /// Seconds between elapsed-time refreshes.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
    /// Hard ceiling on a tracked work day, in hours.
    #[serde(default = "default_max_hours")]
    pub max_tracking_hours: f64,
    /// Timeout for each recurring position fix, in seconds.
    #[serde(default = "default_fix_timeout")]
    pub fix_timeout_secs: u64,
    /// Timeout for the single-shot check-in fix, in seconds.
    #[serde(default = "default_checkin_fix_timeout")]
    pub checkin_fix_timeout_secs: u64,
    #[serde(default = "default_high_accuracy")]
    pub high_accuracy: bool,
}

fn default_worker_name() -> String {
    "John Doe".to_string()
}
fn default_worker_phone() -> String {
    "+1 555 0100".to_string()
}
fn default_office_address() -> String {
    "123 Office Street, NYC".to_string()
}
fn default_office_latitude() -> f64 {
    40.7128
}
fn default_office_longitude() -> f64 {
    -74.0060
}
fn default_capture_interval() -> u64 {
    3600
}
fn default_refresh_interval() -> u64 {
    60
}
fn default_max_hours() -> f64 {
    9.0
}
fn default_fix_timeout() -> u64 {
    15
}
fn default_checkin_fix_timeout() -> u64 {
    10
}
fn default_high_accuracy() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            worker_name: default_worker_name(),
            worker_phone: default_worker_phone(),
            office_address: default_office_address(),
            office_latitude: default_office_latitude(),
            office_longitude: default_office_longitude(),
            capture_interval_secs: default_capture_interval(),
            refresh_interval_secs: default_refresh_interval(),
            max_tracking_hours: default_max_hours(),
            fix_timeout_secs: default_fix_timeout(),
            checkin_fix_timeout_secs: default_checkin_fix_timeout(),
            high_accuracy: default_high_accuracy(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("shifttrack")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".shifttrack")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("shifttrack.conf")
    }

    /// Load configuration from an explicit path, or from the standard
    /// location; missing files fall back to defaults.
    pub fn load_or_default(path: Option<&str>) -> Self {
        let path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::config_file(),
        };

        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
                Err(_) => Config::default(),
            }
        } else {
            Config::default()
        }
    }

    /// Initialize the configuration file (used by `init`).
    pub fn init_all(path: Option<&str>) -> io::Result<PathBuf> {
        let file = match path {
            Some(p) => PathBuf::from(p),
            None => Self::config_file(),
        };

        if let Some(dir) = file.parent() {
            fs::create_dir_all(dir)?;
        }

        let config = Config::default();
        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&file, yaml)?;

        Ok(file)
    }

    /// Bridge into the session manager's own settings.
    pub fn tracking(&self) -> TrackingConfig {
        TrackingConfig {
            capture_interval: Duration::from_secs(self.capture_interval_secs),
            refresh_interval: Duration::from_secs(self.refresh_interval_secs),
            max_hours: self.max_tracking_hours,
            fix_timeout: Duration::from_secs(self.fix_timeout_secs),
            high_accuracy: self.high_accuracy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_product_constants() {
        let cfg = Config::default();
        assert_eq!(cfg.capture_interval_secs, 3600);
        assert_eq!(cfg.refresh_interval_secs, 60);
        assert_eq!(cfg.max_tracking_hours, 9.0);
    }

    #[test]
    fn roundtrips_through_yaml() {
        let cfg = Config::default();
        let yaml = serde_yaml::to_string(&cfg).unwrap();
        let back: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back.worker_name, cfg.worker_name);
        assert_eq!(back.fix_timeout_secs, cfg.fix_timeout_secs);
    }
}
