//! Interval poller for payment completion.
//!
//! One spawned task owns the fetch interval and the timeout deadline. Both
//! live in the same `select!` loop, so every way out of the loop (success,
//! timeout, cancel, handle dropped) stops both.
//!
//! | Event | Effect |
//! |-------|--------|
//! | tick | fetch status, unless a fetch is in flight |
//! | `PAYMENT_COMPLETED` | `on_success`, state `Succeeded`, task ends |
//! | fetch error | `on_error`, state `Errored`, polling continues |
//! | deadline | `on_timeout`, state `TimedOut`, in-flight fetch abandoned |
//! | `change_order` | new order, fresh deadline, immediate fetch |
//! | `cancel` / drop | state `Cancelled`, task ends |

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::domain::foundation::OrderId;
use crate::domain::order::PaymentStatusPollingResponse;
use crate::domain::polling::{PollState, PollingConfig};
use crate::ports::{ApiError, PaymentApi};

/// Callbacks of one poll session.
///
/// Called from the poll task. Nothing is called after a terminal state.
pub trait PollObserver: Send + Sync + 'static {
    /// Every successfully fetched status, before completion is checked.
    fn on_status(&self, _status: &PaymentStatusPollingResponse) {}

    /// Payment completed. Called at most once.
    fn on_success(&self, status: &PaymentStatusPollingResponse);

    /// Deadline passed without completion. Called at most once.
    fn on_timeout(&self);

    fn on_error(&self, _error: &ApiError) {}
}

/// What the poll session has seen so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PollSnapshot {
    pub state: PollState,
    pub order_id: Option<String>,
    /// Most recent status; later fetches overwrite earlier ones.
    pub latest: Option<PaymentStatusPollingResponse>,
    pub last_error: Option<ApiError>,
    pub fetches: u32,
}

enum Command {
    ChangeOrder(Option<OrderId>),
    Cancel,
}

type FetchFuture =
    Pin<Box<dyn Future<Output = Result<PaymentStatusPollingResponse, ApiError>> + Send>>;

/// Starts poll sessions against a [`PaymentApi`].
#[derive(Clone)]
pub struct PaymentStatusPoller {
    api: Arc<dyn PaymentApi>,
    config: PollingConfig,
}

impl PaymentStatusPoller {
    pub fn new(api: Arc<dyn PaymentApi>, config: PollingConfig) -> Self {
        Self { api, config }
    }

    pub fn config(&self) -> &PollingConfig {
        &self.config
    }

    /// Starts polling `order_id`.
    ///
    /// When polling is disabled no task is spawned and the handle stays
    /// `Idle`. An empty id spawns an idle session that waits for
    /// [`PollHandle::change_order`].
    pub fn start(&self, order_id: &str, observer: Arc<dyn PollObserver>) -> PollHandle {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(PollSnapshot::default());

        if !self.config.enabled {
            tracing::debug!(order_id, "Payment polling disabled");
            return PollHandle {
                commands: command_tx,
                snapshot: state_rx,
                task: None,
            };
        }

        let task = PollTask {
            api: self.api.clone(),
            observer,
            config: self.config,
            state_tx,
            commands: command_rx,
        };
        let initial = OrderId::new(order_id).ok();
        let task = tokio::spawn(task.run(initial));

        PollHandle {
            commands: command_tx,
            snapshot: state_rx,
            task: Some(task),
        }
    }
}

/// Owner of a poll session. Dropping it cancels the session.
pub struct PollHandle {
    commands: mpsc::UnboundedSender<Command>,
    snapshot: watch::Receiver<PollSnapshot>,
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    /// Switches to another order and restarts the timeout window.
    ///
    /// An empty id pauses the session until the next non-empty id.
    pub fn change_order(&self, order_id: &str) {
        // A closed channel means the session already ended.
        let _ = self
            .commands
            .send(Command::ChangeOrder(OrderId::new(order_id).ok()));
    }

    pub fn cancel(&self) {
        let _ = self.commands.send(Command::Cancel);
    }

    pub fn state(&self) -> PollState {
        self.snapshot.borrow().state
    }

    pub fn latest(&self) -> Option<PaymentStatusPollingResponse> {
        self.snapshot.borrow().latest.clone()
    }

    pub fn snapshot(&self) -> PollSnapshot {
        self.snapshot.borrow().clone()
    }

    /// True while the poll task is alive.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Waits for a terminal state. Returns the current state at once when
    /// the session can no longer change (disabled or already ended).
    pub async fn finished(&mut self) -> PollState {
        let terminal = self
            .snapshot
            .wait_for(|s| s.state.is_terminal())
            .await
            .map(|s| s.state);
        match terminal {
            Ok(state) => state,
            Err(_) => self.snapshot.borrow().state,
        }
    }
}

struct PollTask {
    api: Arc<dyn PaymentApi>,
    observer: Arc<dyn PollObserver>,
    config: PollingConfig,
    state_tx: watch::Sender<PollSnapshot>,
    commands: mpsc::UnboundedReceiver<Command>,
}

impl PollTask {
    async fn run(mut self, initial: Option<OrderId>) {
        let mut order_id = initial;
        let mut in_flight: Option<FetchFuture> = None;
        let mut ticker = new_ticker(&self.config);
        let deadline = time::sleep_until(Instant::now() + self.config.timeout);
        tokio::pin!(deadline);

        self.enter(order_id.as_ref());

        loop {
            tokio::select! {
                biased;

                command = self.commands.recv() => match command {
                    Some(Command::ChangeOrder(next)) => {
                        in_flight = None;
                        order_id = next;
                        ticker = new_ticker(&self.config);
                        deadline.as_mut().reset(Instant::now() + self.config.timeout);
                        self.enter(order_id.as_ref());
                    }
                    Some(Command::Cancel) | None => {
                        tracing::debug!("Payment polling cancelled");
                        self.set_state(PollState::Cancelled);
                        return;
                    }
                },

                _ = &mut deadline, if order_id.is_some() => {
                    tracing::warn!(
                        order_id = ?order_id.as_ref().map(OrderId::as_str),
                        timeout_ms = self.config.timeout.as_millis() as u64,
                        "Payment polling timed out"
                    );
                    self.observer.on_timeout();
                    self.set_state(PollState::TimedOut);
                    return;
                }

                result = await_fetch(&mut in_flight), if in_flight.is_some() => {
                    in_flight = None;
                    if self.handle_result(result) {
                        return;
                    }
                }

                _ = ticker.tick(), if in_flight.is_none() && order_id.is_some() => {
                    if let Some(id) = order_id.clone() {
                        let api = self.api.clone();
                        in_flight = Some(Box::pin(async move { api.get_payment_status(&id).await }));
                        self.state_tx.send_modify(|s| s.fetches += 1);
                    }
                }
            }
        }
    }

    /// Returns true when the session reached a terminal state.
    fn handle_result(&self, result: Result<PaymentStatusPollingResponse, ApiError>) -> bool {
        match result {
            Ok(status) => {
                self.observer.on_status(&status);
                let completed = status.is_completed();
                if completed {
                    tracing::info!(order_id = %status.order_id, "Payment completed");
                    self.observer.on_success(&status);
                }
                self.state_tx.send_modify(|s| {
                    s.latest = Some(status);
                    s.state = if completed {
                        PollState::Succeeded
                    } else {
                        PollState::Polling
                    };
                });
                completed
            }
            Err(error) => {
                tracing::debug!(error = %error, "Payment status fetch failed");
                self.observer.on_error(&error);
                self.state_tx.send_modify(|s| {
                    s.last_error = Some(error);
                    s.state = PollState::Errored;
                });
                false
            }
        }
    }

    fn enter(&self, order_id: Option<&OrderId>) {
        let state = match order_id {
            Some(id) => {
                tracing::debug!(order_id = %id, "Payment polling started");
                PollState::Polling
            }
            None => PollState::Idle,
        };
        self.state_tx.send_modify(|s| {
            s.state = state;
            s.order_id = order_id.map(|id| id.to_string());
        });
    }

    fn set_state(&self, state: PollState) {
        self.state_tx.send_modify(|s| s.state = state);
    }
}

fn new_ticker(config: &PollingConfig) -> time::Interval {
    let mut ticker = time::interval(config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

async fn await_fetch(
    in_flight: &mut Option<FetchFuture>,
) -> Result<PaymentStatusPollingResponse, ApiError> {
    match in_flight {
        Some(fetch) => fetch.await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{server_error, status, ScriptedPaymentApi};
    use std::sync::Mutex;
    use std::time::Duration;

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Status(String),
        Success,
        Timeout,
        Error,
    }

    #[derive(Default)]
    struct RecordingObserver {
        events: Mutex<Vec<Event>>,
    }

    impl RecordingObserver {
        fn events(&self) -> Vec<Event> {
            self.events.lock().unwrap().clone()
        }

        fn count(&self, event: &Event) -> usize {
            self.events().iter().filter(|e| *e == event).count()
        }
    }

    impl PollObserver for RecordingObserver {
        fn on_status(&self, status: &PaymentStatusPollingResponse) {
            self.events
                .lock()
                .unwrap()
                .push(Event::Status(status.status.to_string()));
        }

        fn on_success(&self, _status: &PaymentStatusPollingResponse) {
            self.events.lock().unwrap().push(Event::Success);
        }

        fn on_timeout(&self) {
            self.events.lock().unwrap().push(Event::Timeout);
        }

        fn on_error(&self, _error: &ApiError) {
            self.events.lock().unwrap().push(Event::Error);
        }
    }

    fn config(interval_ms: u64, timeout_ms: u64) -> PollingConfig {
        PollingConfig {
            enabled: true,
            interval: Duration::from_millis(interval_ms),
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    fn start(
        api: Arc<ScriptedPaymentApi>,
        config: PollingConfig,
        order_id: &str,
    ) -> (PollHandle, Arc<RecordingObserver>) {
        let observer = Arc::new(RecordingObserver::default());
        let handle = PaymentStatusPoller::new(api, config).start(order_id, observer.clone());
        (handle, observer)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Completion and Timeout
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test(start_paused = true)]
    async fn completes_once_after_pending_responses() {
        let api = Arc::new(ScriptedPaymentApi::new(vec![
            Ok(status("o1", "PENDING")),
            Ok(status("o1", "PENDING")),
            Ok(status("o1", "PENDING")),
            Ok(status("o1", "PAYMENT_COMPLETED")),
        ]));
        let started = Instant::now();
        let (mut handle, observer) = start(api.clone(), config(3_000, 300_000), "o1");

        assert_eq!(handle.finished().await, PollState::Succeeded);
        assert!(started.elapsed() <= Duration::from_millis(9_000));
        assert_eq!(api.status_calls(), 4);
        assert_eq!(observer.count(&Event::Success), 1);

        // Both timers are gone.
        time::sleep(Duration::from_secs(600)).await;
        assert_eq!(api.status_calls(), 4);
        assert_eq!(observer.count(&Event::Timeout), 0);
        assert!(handle.latest().unwrap().is_completed());
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_at_deadline_not_before() {
        let api = Arc::new(ScriptedPaymentApi::always("PENDING"));
        let started = Instant::now();
        let (mut handle, observer) = start(api.clone(), config(3_000, 300_000), "o1");

        time::sleep(Duration::from_millis(299_000)).await;
        assert_eq!(observer.count(&Event::Timeout), 0);
        assert_eq!(handle.state(), PollState::Polling);

        assert_eq!(handle.finished().await, PollState::TimedOut);
        assert!(started.elapsed() >= Duration::from_millis(300_000));
        assert_eq!(observer.count(&Event::Timeout), 1);
        assert_eq!(observer.count(&Event::Success), 0);

        let calls = api.status_calls();
        time::sleep(Duration::from_secs(60)).await;
        assert_eq!(api.status_calls(), calls);
    }

    #[tokio::test(start_paused = true)]
    async fn first_fetch_is_immediate() {
        let api = Arc::new(ScriptedPaymentApi::always("PENDING"));
        let (handle, _observer) = start(api.clone(), config(3_000, 300_000), "o1");

        time::sleep(Duration::from_millis(10)).await;
        assert_eq!(api.status_calls(), 1);
        assert_eq!(handle.snapshot().fetches, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_fetch_is_abandoned_at_deadline() {
        let api = Arc::new(
            ScriptedPaymentApi::always("PAYMENT_COMPLETED").with_latency(Duration::from_secs(20)),
        );
        let (mut handle, observer) = start(api, config(3_000, 10_000), "o1");

        assert_eq!(handle.finished().await, PollState::TimedOut);
        time::sleep(Duration::from_secs(30)).await;
        assert_eq!(observer.events(), vec![Event::Timeout]);
        assert!(handle.latest().is_none());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Errors
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test(start_paused = true)]
    async fn fetch_error_keeps_polling() {
        let api = Arc::new(ScriptedPaymentApi::new(vec![
            Err(server_error()),
            Ok(status("o1", "PENDING")),
            Ok(status("o1", "PAYMENT_COMPLETED")),
        ]));
        let (mut handle, observer) = start(api, config(1_000, 60_000), "o1");

        assert_eq!(handle.finished().await, PollState::Succeeded);
        assert_eq!(
            observer.events(),
            vec![
                Event::Error,
                Event::Status("PENDING".to_string()),
                Event::Status("PAYMENT_COMPLETED".to_string()),
                Event::Success,
            ]
        );
        assert_eq!(handle.snapshot().last_error, Some(server_error()));
    }

    #[tokio::test(start_paused = true)]
    async fn errored_state_is_visible_between_fetches() {
        let api = Arc::new(ScriptedPaymentApi::new(vec![
            Err(server_error()),
            Ok(status("o1", "PENDING")),
        ]));
        let (handle, _observer) = start(api, config(1_000, 60_000), "o1");

        time::sleep(Duration::from_millis(500)).await;
        assert_eq!(handle.state(), PollState::Errored);

        time::sleep(Duration::from_millis(1_000)).await;
        assert_eq!(handle.state(), PollState::Polling);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Lifecycle
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test(start_paused = true)]
    async fn disabled_poller_never_fetches() {
        let api = Arc::new(ScriptedPaymentApi::always("PAYMENT_COMPLETED"));
        let mut cfg = config(1_000, 5_000);
        cfg.enabled = false;
        let (mut handle, observer) = start(api.clone(), cfg, "o1");

        time::sleep(Duration::from_secs(30)).await;
        assert_eq!(api.status_calls(), 0);
        assert!(!handle.is_running());
        assert_eq!(handle.finished().await, PollState::Idle);
        assert!(observer.events().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn empty_order_id_waits_for_change_order() {
        let api = Arc::new(ScriptedPaymentApi::always("PAYMENT_COMPLETED"));
        let (mut handle, observer) = start(api.clone(), config(1_000, 5_000), "");

        time::sleep(Duration::from_secs(30)).await;
        assert_eq!(handle.state(), PollState::Idle);
        assert_eq!(api.status_calls(), 0);
        assert_eq!(observer.count(&Event::Timeout), 0);

        handle.change_order("o2");
        assert_eq!(handle.finished().await, PollState::Succeeded);
        assert_eq!(api.requested_orders(), vec!["o2".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn change_order_restarts_timeout_window() {
        let api = Arc::new(ScriptedPaymentApi::always("PENDING"));
        let started = Instant::now();
        let (mut handle, observer) = start(api.clone(), config(3_000, 10_000), "o1");

        time::sleep(Duration::from_millis(7_000)).await;
        handle.change_order("o2");

        assert_eq!(handle.finished().await, PollState::TimedOut);
        assert!(started.elapsed() >= Duration::from_millis(17_000));
        assert_eq!(observer.count(&Event::Timeout), 1);
        assert_eq!(handle.snapshot().order_id.as_deref(), Some("o2"));
        assert_eq!(api.requested_orders().last().map(String::as_str), Some("o2"));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_both_timers() {
        let api = Arc::new(ScriptedPaymentApi::always("PENDING"));
        let (mut handle, observer) = start(api.clone(), config(1_000, 5_000), "o1");

        time::sleep(Duration::from_millis(2_500)).await;
        handle.cancel();
        assert_eq!(handle.finished().await, PollState::Cancelled);

        let calls = api.status_calls();
        time::sleep(Duration::from_secs(30)).await;
        assert_eq!(api.status_calls(), calls);
        assert_eq!(observer.count(&Event::Timeout), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_handle_ends_session() {
        let api = Arc::new(ScriptedPaymentApi::always("PENDING"));
        let (handle, observer) = start(api.clone(), config(1_000, 5_000), "o1");

        time::sleep(Duration::from_millis(1_500)).await;
        drop(handle);
        time::sleep(Duration::from_millis(10)).await;

        let calls = api.status_calls();
        time::sleep(Duration::from_secs(30)).await;
        assert_eq!(api.status_calls(), calls);
        assert_eq!(observer.count(&Event::Timeout), 0);
    }
}
