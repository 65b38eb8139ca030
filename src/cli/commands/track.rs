use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::tracking::{Notices, TrackingConfig, TrackingManager, UpdateSink};
use crate::errors::{AppError, AppResult};
use crate::export::{ExportFormat, ExportLogic};
use crate::geo::{LocationProvider, SimulatedDevice};
use crate::models::session::{TrackingSnapshot, TrackingStatus};
use crate::store::log::stlog;
use crate::store::{Store, StoreSink};
use crate::ui::messages::{TerminalNotices, header, status_badge};
use crate::utils::table::{Column, Table};
use crate::utils::time::{clock_str_secs, hours_to_readable};
use ansi_term::Colour;
use chrono::Local;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

struct RunPlan<'a> {
    for_secs: Option<u64>,
    pause_after_secs: Option<u64>,
    resume_after_secs: Option<u64>,
    verbose: bool,
    save_updates: Option<&'a str>,
    format: ExportFormat,
}

/// Run a tracking session in the foreground against the simulated device.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Track {
        for_secs,
        interval_secs,
        refresh_secs,
        max_hours,
        pause_after_secs,
        resume_after_secs,
        verbose,
        save_updates,
        format,
    } = cmd
    {
        let mut tracking = cfg.tracking();
        if let Some(secs) = interval_secs {
            tracking.capture_interval = Duration::from_secs(*secs);
        }
        if let Some(secs) = refresh_secs {
            tracking.refresh_interval = Duration::from_secs(*secs);
        }
        if let Some(hours) = max_hours {
            tracking.max_hours = *hours;
        }

        let plan = RunPlan {
            for_secs: *for_secs,
            pause_after_secs: *pause_after_secs,
            resume_after_secs: *resume_after_secs,
            verbose: *verbose,
            save_updates: save_updates.as_deref(),
            format: ExportFormat::parse(format)?,
        };

        let rt = tokio::runtime::Runtime::new()?;
        let result: AppResult<()> = rt.block_on(run_session(cfg, tracking, plan));
        result?;
    }
    Ok(())
}

async fn run_session(cfg: &Config, tracking: TrackingConfig, plan: RunPlan<'_>) -> AppResult<()> {
    let store = Arc::new(Mutex::new(Store::open()?));
    let provider: Arc<dyn LocationProvider> = Arc::new(SimulatedDevice::new(
        cfg.office_latitude,
        cfg.office_longitude,
    ));
    let notices: Arc<dyn Notices> = Arc::new(TerminalNotices);
    let sink: Arc<dyn UpdateSink> = Arc::new(StoreSink::new(Arc::clone(&store)));

    let refresh_interval = tracking.refresh_interval;
    let manager = TrackingManager::with_sink(provider, notices, sink, tracking);

    log_op(&store, "track", "session", "tracking session starting")?;
    manager.start().await?;
    print_status(&manager, cfg)?;

    // Demo pause/resume offsets, then the bounded run window.
    let mut consumed = 0u64;
    if let Some(pause_at) = plan.pause_after_secs {
        sleep(Duration::from_secs(pause_at)).await;
        consumed += pause_at;
        manager.pause()?;
        log_op(&store, "track", "session", "tracking paused")?;

        if let Some(resume_after) = plan.resume_after_secs {
            sleep(Duration::from_secs(resume_after)).await;
            consumed += resume_after;
            manager.resume().await?;
            log_op(&store, "track", "session", "tracking resumed")?;
            print_status(&manager, cfg)?;
        }
    }

    match plan.for_secs {
        Some(total) => {
            let remaining = total.saturating_sub(consumed);
            sleep(Duration::from_secs(remaining)).await;
        }
        None => {
            // Run until the ceiling stops the session.
            loop {
                sleep(refresh_interval).await;
                if manager.status()? == TrackingStatus::Stopped {
                    break;
                }
            }
        }
    }

    if manager.status()? != TrackingStatus::Stopped {
        manager.stop()?;
    }
    log_op(&store, "track", "session", "tracking session ended")?;

    let snapshot = manager.snapshot()?;
    print_summary(&snapshot);

    if let Some(file) = plan.save_updates {
        ExportLogic::export_updates(&snapshot.updates, &plan.format, file, true)?;
    }
    if plan.verbose {
        print_ops_log(&store)?;
    }
    Ok(())
}

fn print_status(manager: &TrackingManager, cfg: &Config) -> AppResult<()> {
    let snap = manager.snapshot()?;
    println!("\n{}  {}", status_badge(snap.status), cfg.office_address);
    if let Some(started) = snap.started_at {
        println!("Started at  : {}", clock_str_secs(started));
    }
    if let Some(next) = snap.next_scheduled_at {
        println!("Next update : {}", clock_str_secs(next));
    }
    println!("Hours today : {}\n", hours_to_readable(snap.elapsed_hours));
    Ok(())
}

fn print_summary(snapshot: &TrackingSnapshot) {
    header("Session summary");

    let mut table = Table::new(vec![
        Column::new("Captured", 8),
        Column::new("Latitude", 10),
        Column::new("Longitude", 10),
        Column::new("±m", 4),
    ]);
    for update in &snapshot.updates {
        table.add_row(vec![
            clock_str_secs(update.captured_at.with_timezone(&Local)),
            format!("{:.5}", update.latitude),
            format!("{:.5}", update.longitude),
            format!("{:.0}", update.accuracy),
        ]);
    }
    println!("{}", table.render());

    println!(
        "{} update(s) captured, {} elapsed, status {}",
        snapshot.updates.len(),
        hours_to_readable(snapshot.elapsed_hours),
        snapshot.status
    );
}

fn log_op(store: &Arc<Mutex<Store>>, operation: &str, target: &str, message: &str) -> AppResult<()> {
    let store = store
        .lock()
        .map_err(|_| AppError::Other("store lock poisoned".to_string()))?;
    stlog(&store.conn, operation, target, message)
}

fn color_for_operation(op: &str) -> Colour {
    match op {
        "track" => Colour::Green,
        "checkin" => Colour::Blue,
        "login" => Colour::Yellow,
        _ => Colour::White,
    }
}

fn print_ops_log(store: &Arc<Mutex<Store>>) -> AppResult<()> {
    let store = store
        .lock()
        .map_err(|_| AppError::Other("store lock poisoned".to_string()))?;
    let entries = crate::store::log::load_log(&store.conn)?;

    println!("\nInternal log:");
    for entry in entries {
        println!(
            "  {} {} ({}): {}",
            entry.date,
            color_for_operation(&entry.operation).paint(entry.operation.as_str()),
            entry.target,
            entry.message
        );
    }

    let archived = crate::store::queries::count_updates(&store.conn)?;
    println!("  {} update(s) archived in the session store", archived);
    Ok(())
}
