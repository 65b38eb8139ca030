//! History view: attendance records rendered as a table with a summary
//! footer. Records come from the in-memory store (demo seed plus anything
//! recorded in this process).

use crate::errors::{AppError, AppResult};
use crate::models::attendance::{AttendanceRecord, AttendanceStatus};
use crate::store::Store;
use crate::store::queries::{load_attendance, load_attendance_for_dates};
use crate::utils::date;
use crate::utils::table::{Column, Table};
use crate::utils::time::hours_to_readable;
use chrono::NaiveDate;

pub struct HistoryLogic;

impl HistoryLogic {
    pub fn list(store: &Store, period: &Option<String>) -> AppResult<()> {
        let records = match resolve_period(period)? {
            Some(dates) => load_attendance_for_dates(&store.conn, &dates)?,
            None => load_attendance(&store.conn)?,
        };

        if records.is_empty() {
            println!(
                "No attendance records for {}",
                period.as_deref().unwrap_or("the selected period")
            );
            return Ok(());
        }

        print_table(&records);
        print_summary(&records);
        Ok(())
    }
}

/// `None` means no filtering (the `all` keyword); otherwise the dates the
/// period expands to. Defaults to the current month.
fn resolve_period(period: &Option<String>) -> AppResult<Option<Vec<NaiveDate>>> {
    if let Some(p) = period {
        if p == "all" {
            return Ok(None);
        }

        if p.contains(':') {
            let parts: Vec<&str> = p.split(':').collect();
            if parts.len() == 2 {
                let dates =
                    date::generate_range(parts[0], parts[1]).map_err(AppError::InvalidPeriod)?;
                return Ok(Some(dates));
            }
            return Err(AppError::InvalidPeriod(p.clone()));
        }

        let dates = date::generate_from_period(p).map_err(AppError::InvalidPeriod)?;
        return Ok(Some(dates));
    }

    let dates = date::current_month_dates().map_err(AppError::InvalidPeriod)?;
    Ok(Some(dates))
}

fn print_table(records: &[AttendanceRecord]) {
    let mut table = Table::new(vec![
        Column::new("Date", 10),
        Column::new("In", 5),
        Column::new("Out", 5),
        Column::new("Hours", 7),
        Column::new("Status", 8),
        Column::new("Method", 6),
    ]);

    for record in records {
        let hours = match record.hours_worked {
            Some(h) => hours_to_readable(h),
            None => "--".to_string(),
        };
        table.add_row(vec![
            record.date_str(),
            record.check_in_str(),
            record.check_out_str(),
            hours,
            record.status.label().to_string(),
            record.method.clone(),
        ]);
    }

    println!("{}", table.render());
}

fn print_summary(records: &[AttendanceRecord]) {
    let present = records
        .iter()
        .filter(|r| r.status != AttendanceStatus::Absent)
        .count();
    let total_hours: f64 = records.iter().filter_map(|r| r.hours_worked).sum();

    println!(
        "{} day(s), {} present, {} worked",
        records.len(),
        present,
        hours_to_readable(total_hours)
    );
}
