use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttendanceStatus {
    Complete, // C
    Active,   // A
    Absent,   // X
}

impl AttendanceStatus {
    pub fn code(&self) -> &'static str {
        match self {
            AttendanceStatus::Complete => "C",
            AttendanceStatus::Active => "A",
            AttendanceStatus::Absent => "X",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "C" => Some(AttendanceStatus::Complete),
            "A" => Some(AttendanceStatus::Active),
            "X" => Some(AttendanceStatus::Absent),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AttendanceStatus::Complete => "Complete",
            AttendanceStatus::Active => "Active",
            AttendanceStatus::Absent => "Absent",
        }
    }
}

/// One day's check-in summary, as shown by the history view.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub date: NaiveDate,
    pub check_in: NaiveTime,
    pub check_out: Option<NaiveTime>,
    /// Net worked hours, once the day is complete.
    pub hours_worked: Option<f64>,
    pub status: AttendanceStatus,
    /// How the check-in was verified ("face" or "manual").
    pub method: String,
}

impl AttendanceRecord {
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn check_in_str(&self) -> String {
        self.check_in.format("%H:%M").to_string()
    }

    pub fn check_out_str(&self) -> String {
        match self.check_out {
            Some(t) => t.format("%H:%M").to_string(),
            None => "--:--".to_string(),
        }
    }
}
