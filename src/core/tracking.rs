//! Tracking session manager.
//!
//! Runs the bounded work-day session: an immediate position fix on start,
//! a recurring capture on a fixed cadence, a lower-frequency elapsed-time
//! refresh, and a hard ceiling after which the session stops itself.
//!
//! One manager owns one session; a new check-in builds a new manager.
//! Every public command and timer callback serializes on the same
//! mutex-guarded state. The position fix is the only suspension point and
//! runs outside the lock; a fix that resolves after the session has left
//! Active is discarded so it cannot resurrect a finished log.

use crate::core::schedule;
use crate::errors::{AppError, AppResult};
use crate::geo::{Fix, FixError, FixRequest, LocationProvider, PermissionStatus};
use crate::models::session::{TrackingSnapshot, TrackingStatus};
use crate::models::update::LocationUpdate;
use chrono::{DateTime, Local, Utc};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Human-facing notice channel: toasts in a mobile shell, styled lines in
/// the terminal. Fire-and-forget; a notice that fails to display is not a
/// manager error.
pub trait Notices: Send + Sync {
    fn info(&self, message: &str);
    fn success(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
}

/// Extension seam for a future backend submission point. Invoked for
/// every appended update, whether or not anything is listening.
pub trait UpdateSink: Send + Sync {
    fn update_captured(&self, update: &LocationUpdate);
}

/// Default sink: nobody listening yet.
pub struct NullSink;

impl UpdateSink for NullSink {
    fn update_captured(&self, _update: &LocationUpdate) {}
}

#[derive(Debug, Clone)]
pub struct TrackingConfig {
    /// Nominal interval between scheduled captures.
    pub capture_interval: Duration,
    /// Interval of the elapsed-time refresh timer.
    pub refresh_interval: Duration,
    /// Ceiling on a tracked day, in hours.
    pub max_hours: f64,
    /// Upper bound on each fix request.
    pub fix_timeout: Duration,
    pub high_accuracy: bool,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            capture_interval: Duration::from_secs(3600),
            refresh_interval: Duration::from_secs(60),
            max_hours: 9.0,
            fix_timeout: Duration::from_secs(15),
            high_accuracy: true,
        }
    }
}

struct SessionState {
    status: TrackingStatus,
    /// Monotonic start instant, for elapsed/ceiling arithmetic.
    started_at: Option<Instant>,
    /// Wall-clock start, for display.
    started_at_wall: Option<DateTime<Local>>,
    elapsed_hours: f64,
    /// When the next capture is due. Some iff status is Active.
    next_due: Option<Instant>,
    next_scheduled_at: Option<DateTime<Local>>,
    updates: Vec<LocationUpdate>,
    capture_task: Option<JoinHandle<()>>,
    refresh_task: Option<JoinHandle<()>>,
}

impl SessionState {
    fn new() -> Self {
        Self {
            status: TrackingStatus::Idle,
            started_at: None,
            started_at_wall: None,
            elapsed_hours: 0.0,
            next_due: None,
            next_scheduled_at: None,
            updates: Vec::new(),
            capture_task: None,
            refresh_task: None,
        }
    }
}

struct Shared {
    state: Mutex<SessionState>,
    provider: Arc<dyn LocationProvider>,
    notices: Arc<dyn Notices>,
    sink: Arc<dyn UpdateSink>,
    config: TrackingConfig,
}

pub struct TrackingManager {
    shared: Arc<Shared>,
}

impl TrackingManager {
    pub fn new(
        provider: Arc<dyn LocationProvider>,
        notices: Arc<dyn Notices>,
        config: TrackingConfig,
    ) -> Self {
        Self::with_sink(provider, notices, Arc::new(NullSink), config)
    }

    pub fn with_sink(
        provider: Arc<dyn LocationProvider>,
        notices: Arc<dyn Notices>,
        sink: Arc<dyn UpdateSink>,
        config: TrackingConfig,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(SessionState::new()),
                provider,
                notices,
                sink,
                config,
            }),
        }
    }

    /// Begin the session: permission, immediate fix, then both timers.
    ///
    /// On permission denial the session stays Idle, nothing is armed, and
    /// the caller may invoke `start` again. A failed immediate fix is
    /// reported but does not abort the start.
    pub async fn start(&self) -> AppResult<()> {
        self.expect_status(TrackingStatus::Idle, "start")?;

        match self.shared.provider.request_permission().await {
            PermissionStatus::Granted => {}
            PermissionStatus::Denied => {
                self.shared
                    .notices
                    .error("Location permission required for tracking");
                return Err(AppError::PermissionDenied);
            }
        }

        let first = request_fix(&self.shared).await;
        let warning = {
            let mut state = self.lock()?;
            if state.status != TrackingStatus::Idle {
                return Err(AppError::InvalidTransition {
                    command: "start",
                    status: state.status,
                });
            }

            let warning = append_or_report(&mut state, self.shared.sink.as_ref(), first);

            let now = Instant::now();
            state.status = TrackingStatus::Active;
            state.started_at = Some(now);
            state.started_at_wall = Some(Local::now());
            state.elapsed_hours = 0.0;
            state.next_due = Some(now + self.shared.config.capture_interval);
            state.next_scheduled_at = Some(wall_after(self.shared.config.capture_interval));
            state.capture_task = Some(spawn_capture_loop(&self.shared));
            state.refresh_task = Some(spawn_refresh_loop(&self.shared));
            warning
        };

        if let Some(message) = warning {
            self.shared.notices.warning(&message);
        }
        self.shared.notices.success("Location tracking started");
        Ok(())
    }

    /// Suspend scheduling. The log and elapsed time are left untouched.
    pub fn pause(&self) -> AppResult<()> {
        let (capture, refresh) = {
            let mut state = self.lock()?;
            if state.status != TrackingStatus::Active {
                return Err(AppError::InvalidTransition {
                    command: "pause",
                    status: state.status,
                });
            }
            state.status = TrackingStatus::Paused;
            state.next_due = None;
            state.next_scheduled_at = None;
            (state.capture_task.take(), state.refresh_task.take())
        };

        abort_timers(capture, refresh);
        self.shared.notices.info("Tracking paused");
        Ok(())
    }

    /// Re-arm scheduling with an immediate fix. The cadence rebases from
    /// the resume time; the pre-pause phase is not preserved.
    pub async fn resume(&self) -> AppResult<()> {
        self.expect_status(TrackingStatus::Paused, "resume")?;

        let fix = request_fix(&self.shared).await;
        let warning = {
            let mut state = self.lock()?;
            if state.status != TrackingStatus::Paused {
                return Err(AppError::InvalidTransition {
                    command: "resume",
                    status: state.status,
                });
            }

            let warning = append_or_report(&mut state, self.shared.sink.as_ref(), fix);

            let now = Instant::now();
            state.status = TrackingStatus::Active;
            state.next_due = Some(now + self.shared.config.capture_interval);
            state.next_scheduled_at = Some(wall_after(self.shared.config.capture_interval));
            state.capture_task = Some(spawn_capture_loop(&self.shared));
            state.refresh_task = Some(spawn_refresh_loop(&self.shared));
            warning
        };

        if let Some(message) = warning {
            self.shared.notices.warning(&message);
        }
        self.shared.notices.success("Tracking resumed");
        Ok(())
    }

    /// Finalize the session. Idempotent once Stopped: repeated calls are
    /// no-ops and emit no further notices.
    pub fn stop(&self) -> AppResult<()> {
        let timers = {
            let mut state = self.lock()?;
            match state.status {
                TrackingStatus::Stopped => None,
                TrackingStatus::Idle => {
                    return Err(AppError::InvalidTransition {
                        command: "stop",
                        status: TrackingStatus::Idle,
                    });
                }
                TrackingStatus::Active | TrackingStatus::Paused => {
                    Some(transition_stop(&mut state))
                }
            }
        };

        if let Some((capture, refresh)) = timers {
            abort_timers(capture, refresh);
            self.shared.notices.success("Location tracking stopped");
        }
        Ok(())
    }

    /// Read-only view for the presentation layer.
    pub fn snapshot(&self) -> AppResult<TrackingSnapshot> {
        let state = self.lock()?;
        Ok(TrackingSnapshot {
            status: state.status,
            started_at: state.started_at_wall,
            elapsed_hours: state.elapsed_hours,
            next_scheduled_at: state.next_scheduled_at,
            updates: state.updates.clone(),
        })
    }

    pub fn status(&self) -> AppResult<TrackingStatus> {
        Ok(self.lock()?.status)
    }

    fn expect_status(&self, expected: TrackingStatus, command: &'static str) -> AppResult<()> {
        let state = self.lock()?;
        if state.status != expected {
            return Err(AppError::InvalidTransition {
                command,
                status: state.status,
            });
        }
        Ok(())
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, SessionState>> {
        self.shared
            .state
            .lock()
            .map_err(|_| AppError::Other("tracking state lock poisoned".to_string()))
    }
}

/// Owners must never leak a timer past the session: dropping the manager
/// cancels whatever is still armed.
impl Drop for TrackingManager {
    fn drop(&mut self) {
        if let Ok(mut state) = self.shared.state.lock() {
            abort_timers(state.capture_task.take(), state.refresh_task.take());
        }
    }
}

/// Stop transition shared by the command and both expiry paths. Returns
/// the timer handles for the caller to abort outside the lock.
fn transition_stop(state: &mut SessionState) -> (Option<JoinHandle<()>>, Option<JoinHandle<()>>) {
    state.status = TrackingStatus::Stopped;
    state.next_due = None;
    state.next_scheduled_at = None;
    (state.capture_task.take(), state.refresh_task.take())
}

// Abort is idempotent and safe on finished or never-polled tasks.
fn abort_timers(capture: Option<JoinHandle<()>>, refresh: Option<JoinHandle<()>>) {
    if let Some(task) = capture {
        task.abort();
    }
    if let Some(task) = refresh {
        task.abort();
    }
}

async fn request_fix(shared: &Arc<Shared>) -> Result<Fix, FixError> {
    let request = FixRequest {
        high_accuracy: shared.config.high_accuracy,
        timeout: shared.config.fix_timeout,
    };
    match tokio::time::timeout(shared.config.fix_timeout, shared.provider.current_fix(&request))
        .await
    {
        Ok(result) => result,
        Err(_) => Err(FixError::Timeout),
    }
}

/// Append a successful fix to the log (notifying the sink), or hand back
/// the warning text for a failed one. Caller already holds the lock.
fn append_or_report(
    state: &mut SessionState,
    sink: &dyn UpdateSink,
    result: Result<Fix, FixError>,
) -> Option<String> {
    match result {
        Ok(fix) => {
            let update = LocationUpdate::from_fix(&fix, Utc::now());
            sink.update_captured(&update);
            state.updates.push(update);
            None
        }
        Err(err) => Some(format!("Failed to send location update: {err}")),
    }
}

/// One completed capture attempt: append-or-report, then rebase the
/// schedule from now. A fix arriving after the session left Active is
/// dropped here, never appended.
fn apply_capture(shared: &Arc<Shared>, result: Result<Fix, FixError>) {
    let warning = {
        let Ok(mut state) = shared.state.lock() else {
            return;
        };
        if state.status != TrackingStatus::Active {
            return;
        }

        let warning = append_or_report(&mut state, shared.sink.as_ref(), result);

        let now = Instant::now();
        state.next_due = Some(now + shared.config.capture_interval);
        state.next_scheduled_at = Some(wall_after(shared.config.capture_interval));
        if let Some(started) = state.started_at {
            state.elapsed_hours = schedule::elapsed_hours(started, now, shared.config.max_hours);
        }
        warning
    };

    if let Some(message) = warning {
        shared.notices.warning(&message);
    }
}

/// Ceiling crossing detected by either timer. Guarded on Active so the
/// two paths cannot both fire.
fn auto_stop(shared: &Arc<Shared>) {
    let max_hours = shared.config.max_hours;
    let timers = {
        let Ok(mut state) = shared.state.lock() else {
            return;
        };
        if state.status != TrackingStatus::Active {
            return;
        }
        state.elapsed_hours = max_hours;
        transition_stop(&mut state)
    };

    let (capture, refresh) = timers;
    abort_timers(capture, refresh);
    shared.notices.info(&format!(
        "Tracking automatically stopped after {max_hours:.0} hours"
    ));
}

fn spawn_capture_loop(shared: &Arc<Shared>) -> JoinHandle<()> {
    let shared = Arc::clone(shared);
    tokio::spawn(async move {
        loop {
            let due = {
                let Ok(state) = shared.state.lock() else {
                    break;
                };
                match (state.status, state.next_due) {
                    (TrackingStatus::Active, Some(due)) => due,
                    _ => break,
                }
            };
            tokio::time::sleep_until(due).await;

            // Ceiling check comes before any fix request.
            let expired = {
                let Ok(state) = shared.state.lock() else {
                    break;
                };
                if state.status != TrackingStatus::Active {
                    break;
                }
                match state.started_at {
                    Some(started) => {
                        schedule::ceiling_reached(started, Instant::now(), shared.config.max_hours)
                    }
                    None => false,
                }
            };
            if expired {
                auto_stop(&shared);
                break;
            }

            let result = request_fix(&shared).await;
            apply_capture(&shared, result);
        }
    })
}

fn spawn_refresh_loop(shared: &Arc<Shared>) -> JoinHandle<()> {
    let shared = Arc::clone(shared);
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(shared.config.refresh_interval).await;

            let expired = {
                let Ok(mut state) = shared.state.lock() else {
                    break;
                };
                if state.status != TrackingStatus::Active {
                    break;
                }
                let Some(started) = state.started_at else {
                    break;
                };

                let now = Instant::now();
                if schedule::ceiling_reached(started, now, shared.config.max_hours) {
                    // Safety net: expiry is detected here even when the
                    // capture timer has a longer period.
                    true
                } else {
                    state.elapsed_hours =
                        schedule::elapsed_hours(started, now, shared.config.max_hours);
                    false
                }
            };
            if expired {
                auto_stop(&shared);
                break;
            }
        }
    })
}

fn wall_after(delay: Duration) -> DateTime<Local> {
    Local::now() + chrono::Duration::from_std(delay).unwrap_or_else(|_| chrono::Duration::zero())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::{advance, sleep};

    struct TestProvider {
        permission: PermissionStatus,
        delay: Duration,
        fail: bool,
        calls: Arc<AtomicUsize>,
    }

    impl TestProvider {
        fn granted() -> Self {
            Self {
                permission: PermissionStatus::Granted,
                delay: Duration::ZERO,
                fail: false,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn denied() -> Self {
            Self {
                permission: PermissionStatus::Denied,
                ..Self::granted()
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::granted()
            }
        }

        fn slow(delay: Duration) -> Self {
            Self {
                delay,
                ..Self::granted()
            }
        }
    }

    #[async_trait]
    impl LocationProvider for TestProvider {
        async fn request_permission(&self) -> PermissionStatus {
            self.permission
        }

        async fn current_fix(&self, _request: &FixRequest) -> Result<Fix, FixError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                sleep(self.delay).await;
            }
            if self.fail {
                Err(FixError::Unavailable("no signal".to_string()))
            } else {
                Ok(sample_fix())
            }
        }
    }

    fn sample_fix() -> Fix {
        Fix {
            latitude: 40.7128,
            longitude: -74.0060,
            accuracy: 8.0,
            measured_at: Utc::now(),
        }
    }

    #[derive(Default)]
    struct RecordingNotices {
        lines: Mutex<Vec<String>>,
    }

    impl RecordingNotices {
        fn count_containing(&self, needle: &str) -> usize {
            self.lines
                .lock()
                .unwrap()
                .iter()
                .filter(|line| line.contains(needle))
                .count()
        }
    }

    impl Notices for RecordingNotices {
        fn info(&self, message: &str) {
            self.lines.lock().unwrap().push(format!("info: {message}"));
        }
        fn success(&self, message: &str) {
            self.lines
                .lock()
                .unwrap()
                .push(format!("success: {message}"));
        }
        fn warning(&self, message: &str) {
            self.lines
                .lock()
                .unwrap()
                .push(format!("warning: {message}"));
        }
        fn error(&self, message: &str) {
            self.lines.lock().unwrap().push(format!("error: {message}"));
        }
    }

    #[derive(Default)]
    struct CountingSink {
        seen: AtomicUsize,
    }

    impl UpdateSink for CountingSink {
        fn update_captured(&self, _update: &LocationUpdate) {
            self.seen.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn hourly_config() -> TrackingConfig {
        TrackingConfig::default()
    }

    fn manager_with(provider: TestProvider) -> (TrackingManager, Arc<RecordingNotices>) {
        let notices = Arc::new(RecordingNotices::default());
        let manager = TrackingManager::new(
            Arc::new(provider),
            Arc::clone(&notices) as Arc<dyn Notices>,
            hourly_config(),
        );
        (manager, notices)
    }

    fn secs_from_start(manager: &TrackingManager, due: Instant) -> u64 {
        let state = manager.shared.state.lock().unwrap();
        due.duration_since(state.started_at.unwrap()).as_secs()
    }

    fn current_due(manager: &TrackingManager) -> Instant {
        manager.shared.state.lock().unwrap().next_due.unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn immediate_fix_then_hourly_cadence() {
        let (manager, _notices) = manager_with(TestProvider::granted());
        manager.start().await.unwrap();

        let snap = manager.snapshot().unwrap();
        assert_eq!(snap.status, TrackingStatus::Active);
        assert_eq!(snap.updates.len(), 1);
        assert_eq!(secs_from_start(&manager, current_due(&manager)), 3600);

        sleep(Duration::from_secs(3605)).await;

        let snap = manager.snapshot().unwrap();
        assert_eq!(snap.updates.len(), 2);
        // rebased from the tick, one interval out
        let next = secs_from_start(&manager, current_due(&manager));
        assert!((7200..7210).contains(&next), "next due at {next}s");
    }

    #[tokio::test(start_paused = true)]
    async fn resume_rebases_schedule_from_resume_time() {
        let (manager, _notices) = manager_with(TestProvider::granted());
        manager.start().await.unwrap();

        sleep(Duration::from_secs(1800)).await;
        manager.pause().unwrap();
        let snap = manager.snapshot().unwrap();
        assert_eq!(snap.status, TrackingStatus::Paused);
        assert!(snap.next_scheduled_at.is_none());

        // long pause: the old phase must not be preserved
        sleep(Duration::from_secs(5400)).await;
        manager.resume().await.unwrap();

        let snap = manager.snapshot().unwrap();
        assert_eq!(snap.status, TrackingStatus::Active);
        assert_eq!(snap.updates.len(), 2); // start fix + resume fix

        let next = secs_from_start(&manager, current_due(&manager));
        assert!((10800..10810).contains(&next), "next due at {next}s");

        sleep(Duration::from_secs(3605)).await;
        assert_eq!(manager.snapshot().unwrap().updates.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn auto_stops_at_ceiling_instead_of_capturing() {
        let (manager, notices) = manager_with(TestProvider::granted());
        manager.start().await.unwrap();

        sleep(Duration::from_secs(9 * 3600 + 120)).await;

        let snap = manager.snapshot().unwrap();
        assert_eq!(snap.status, TrackingStatus::Stopped);
        // start fix + ticks at hours 1..=8; the ninth tick stops instead
        assert_eq!(snap.updates.len(), 9);
        assert_eq!(snap.elapsed_hours, 9.0);
        assert!(snap.next_scheduled_at.is_none());
        assert_eq!(notices.count_containing("automatically stopped"), 1);

        // nothing fires after the ceiling
        sleep(Duration::from_secs(2 * 3600)).await;
        assert_eq!(manager.snapshot().unwrap().updates.len(), 9);

        let state = manager.shared.state.lock().unwrap();
        assert!(state.capture_task.is_none());
        assert!(state.refresh_task.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_timer_detects_expiry_without_capture_tick() {
        // Capture cadence longer than the ceiling: only the refresh timer
        // can notice the crossing.
        let notices = Arc::new(RecordingNotices::default());
        let config = TrackingConfig {
            capture_interval: Duration::from_secs(24 * 3600),
            ..TrackingConfig::default()
        };
        let manager = TrackingManager::new(
            Arc::new(TestProvider::granted()),
            Arc::clone(&notices) as Arc<dyn Notices>,
            config,
        );
        manager.start().await.unwrap();

        sleep(Duration::from_secs(9 * 3600 + 120)).await;

        let snap = manager.snapshot().unwrap();
        assert_eq!(snap.status, TrackingStatus::Stopped);
        assert_eq!(snap.updates.len(), 1);
        assert_eq!(snap.elapsed_hours, 9.0);
        assert_eq!(notices.count_containing("automatically stopped"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn denied_permission_leaves_session_idle() {
        let (manager, notices) = manager_with(TestProvider::denied());

        let err = manager.start().await.unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied));

        let snap = manager.snapshot().unwrap();
        assert_eq!(snap.status, TrackingStatus::Idle);
        assert!(snap.updates.is_empty());
        assert!(snap.next_scheduled_at.is_none());
        assert_eq!(notices.count_containing("permission"), 1);

        let state = manager.shared.state.lock().unwrap();
        assert!(state.capture_task.is_none());
        assert!(state.refresh_task.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn failed_fixes_keep_session_active_and_log_unchanged() {
        let provider = TestProvider::failing();
        let calls = Arc::clone(&provider.calls);
        let (manager, notices) = manager_with(provider);

        manager.start().await.unwrap();
        let snap = manager.snapshot().unwrap();
        assert_eq!(snap.status, TrackingStatus::Active);
        assert!(snap.updates.is_empty());

        sleep(Duration::from_secs(2 * 3600 + 120)).await;

        let snap = manager.snapshot().unwrap();
        assert_eq!(snap.status, TrackingStatus::Active);
        assert!(snap.updates.is_empty());
        assert!(snap.next_scheduled_at.is_some());
        assert!(calls.load(Ordering::SeqCst) >= 3);
        assert!(notices.count_containing("Failed to send location update") >= 3);
    }

    #[tokio::test(start_paused = true)]
    async fn schedule_presence_tracks_active_status() {
        let (manager, _notices) = manager_with(TestProvider::granted());

        assert!(manager.snapshot().unwrap().next_scheduled_at.is_none());

        manager.start().await.unwrap();
        assert!(manager.snapshot().unwrap().next_scheduled_at.is_some());

        manager.pause().unwrap();
        assert!(manager.snapshot().unwrap().next_scheduled_at.is_none());

        manager.resume().await.unwrap();
        assert!(manager.snapshot().unwrap().next_scheduled_at.is_some());

        manager.stop().unwrap();
        assert!(manager.snapshot().unwrap().next_scheduled_at.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_is_idempotent_with_single_notice() {
        let (manager, notices) = manager_with(TestProvider::granted());
        manager.start().await.unwrap();

        manager.stop().unwrap();
        manager.stop().unwrap();

        let snap = manager.snapshot().unwrap();
        assert_eq!(snap.status, TrackingStatus::Stopped);
        assert_eq!(notices.count_containing("tracking stopped"), 1);

        let state = manager.shared.state.lock().unwrap();
        assert!(state.capture_task.is_none());
        assert!(state.refresh_task.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_works_from_paused() {
        let (manager, _notices) = manager_with(TestProvider::granted());
        manager.start().await.unwrap();
        manager.pause().unwrap();
        manager.stop().unwrap();
        assert_eq!(manager.status().unwrap(), TrackingStatus::Stopped);
    }

    #[tokio::test(start_paused = true)]
    async fn late_fix_after_pause_is_discarded() {
        let (manager, _notices) = manager_with(TestProvider::granted());
        manager.start().await.unwrap();
        manager.pause().unwrap();

        // A fix attempt resolving after pause must not be appended.
        apply_capture(&manager.shared, Ok(sample_fix()));

        let snap = manager.snapshot().unwrap();
        assert_eq!(snap.updates.len(), 1);
        assert_eq!(snap.status, TrackingStatus::Paused);
        assert!(snap.next_scheduled_at.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn pause_during_inflight_fix_leaves_log_unchanged() {
        // Slow enough to straddle the pause, fast enough to beat the
        // 15 s fix timeout.
        let (manager, _notices) = manager_with(TestProvider::slow(Duration::from_secs(10)));

        // The immediate fix is slow too, but completes during start.
        manager.start().await.unwrap();
        assert_eq!(manager.snapshot().unwrap().updates.len(), 1);

        // Wake just after the hourly tick begins its slow fix, then pause
        // while the request is still outstanding.
        sleep(Duration::from_secs(3605)).await;
        manager.pause().unwrap();

        sleep(Duration::from_secs(1200)).await;

        let snap = manager.snapshot().unwrap();
        assert_eq!(snap.updates.len(), 1);
        assert_eq!(snap.status, TrackingStatus::Paused);
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_transitions_are_rejected_without_side_effects() {
        let (manager, _notices) = manager_with(TestProvider::granted());

        assert!(matches!(
            manager.pause(),
            Err(AppError::InvalidTransition {
                command: "pause",
                ..
            })
        ));
        assert!(matches!(
            manager.resume().await,
            Err(AppError::InvalidTransition {
                command: "resume",
                ..
            })
        ));
        assert!(matches!(
            manager.stop(),
            Err(AppError::InvalidTransition { command: "stop", .. })
        ));

        manager.start().await.unwrap();
        assert!(matches!(
            manager.start().await,
            Err(AppError::InvalidTransition {
                command: "start",
                ..
            })
        ));

        manager.stop().unwrap();
        assert!(matches!(
            manager.resume().await,
            Err(AppError::InvalidTransition {
                command: "resume",
                ..
            })
        ));
        assert_eq!(manager.snapshot().unwrap().updates.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn elapsed_hours_refreshes_on_the_minute_timer() {
        let (manager, _notices) = manager_with(TestProvider::granted());
        manager.start().await.unwrap();

        sleep(Duration::from_secs(30 * 60 + 5)).await;
        let elapsed = manager.snapshot().unwrap().elapsed_hours;
        assert!((0.49..0.52).contains(&elapsed), "elapsed {elapsed}");

        manager.pause().unwrap();
        let frozen = manager.snapshot().unwrap().elapsed_hours;
        sleep(Duration::from_secs(3600)).await;
        assert_eq!(manager.snapshot().unwrap().elapsed_hours, frozen);
    }

    #[tokio::test(start_paused = true)]
    async fn sink_sees_every_appended_update() {
        let sink = Arc::new(CountingSink::default());
        let manager = TrackingManager::with_sink(
            Arc::new(TestProvider::granted()),
            Arc::new(RecordingNotices::default()) as Arc<dyn Notices>,
            Arc::clone(&sink) as Arc<dyn UpdateSink>,
            hourly_config(),
        );

        manager.start().await.unwrap();
        sleep(Duration::from_secs(2 * 3600 + 120)).await;

        let appended = manager.snapshot().unwrap().updates.len();
        assert_eq!(appended, 3);
        assert_eq!(sink.seen.load(Ordering::SeqCst), appended);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_manager_cancels_timers() {
        let (manager, _notices) = manager_with(TestProvider::granted());
        manager.start().await.unwrap();

        let shared = Arc::clone(&manager.shared);
        drop(manager);

        // give the aborted tasks a chance to unwind, then make sure no
        // ghost capture ever lands
        advance(Duration::from_secs(3 * 3600)).await;
        let state = shared.state.lock().unwrap();
        assert_eq!(state.updates.len(), 1);
    }
}
