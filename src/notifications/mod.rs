//! # Notification Bridge
//!
//! Turns real-time events from the restaurant ("your order changed", "your table is
//! free again") into customer-facing [`Alert`]s. The transport is injected as an
//! [`EventSource`] and the host owns the bridge's lifetime: [`NotificationBridge::spawn`]
//! starts it, [`NotificationBridge::disconnect`] (or dropping it) stops it.
//!
//! The bridge runs in its own task and never touches the cart or checkout actors.

mod events;
mod source;

pub use events::*;
pub use source::*;

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// How hard the bridge tries to stay connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    /// Consecutive failed reconnects tolerated before giving up.
    pub max_attempts: u32,
    /// Pause before every reconnect.
    pub delay: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay: Duration::from_millis(1000),
        }
    }
}

pub struct NotificationBridge {
    connected: watch::Receiver<bool>,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl NotificationBridge {
    /// Connects to `source` for `session` and forwards alerts to `alerts`.
    ///
    /// A successful connection resets the attempt count. Once the attempts are used up
    /// the bridge stops quietly; alerts simply stop arriving.
    pub fn spawn(
        source: Arc<dyn EventSource>,
        session: SessionKey,
        policy: ReconnectPolicy,
        alerts: mpsc::Sender<Alert>,
    ) -> Self {
        let (connected_tx, connected) = watch::channel(false);
        let (shutdown, shutdown_rx) = oneshot::channel();
        let handle = tokio::spawn(run(source, session, policy, alerts, connected_tx, shutdown_rx));
        Self {
            connected,
            shutdown,
            handle,
        }
    }

    pub fn is_connected(&self) -> bool {
        *self.connected.borrow()
    }

    /// A receiver that observes every connect and disconnect.
    pub fn connection(&self) -> watch::Receiver<bool> {
        self.connected.clone()
    }

    /// Whether the bridge has stopped (disconnected or out of reconnect attempts).
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Closes the connection and waits for the bridge task to end.
    pub async fn disconnect(self) {
        let _ = self.shutdown.send(());
        if let Err(e) = self.handle.await {
            warn!(error = %e, "Notification bridge task failed");
        }
    }
}

enum Session {
    Closed,
    Shutdown,
}

async fn run(
    source: Arc<dyn EventSource>,
    session: SessionKey,
    policy: ReconnectPolicy,
    alerts: mpsc::Sender<Alert>,
    connected: watch::Sender<bool>,
    mut shutdown: oneshot::Receiver<()>,
) {
    let mut failures = 0u32;

    loop {
        let attempt = tokio::select! {
            _ = &mut shutdown => break,
            attempt = source.connect(&session) => attempt,
        };

        match attempt {
            Ok(events) => {
                failures = 0;
                connected.send_replace(true);
                info!(%session, "Realtime channel connected");
                let outcome = forward(events, &alerts, &mut shutdown).await;
                connected.send_replace(false);
                match outcome {
                    Session::Shutdown => break,
                    Session::Closed => warn!(%session, "Realtime channel disconnected"),
                }
            }
            Err(e) => {
                failures += 1;
                warn!(%session, error = %e, failures, "Realtime connection failed");
                if failures > policy.max_attempts {
                    info!(%session, "Giving up on realtime notifications");
                    break;
                }
            }
        }

        tokio::select! {
            _ = &mut shutdown => break,
            _ = tokio::time::sleep(policy.delay) => {}
        }
    }

    connected.send_replace(false);
    debug!(%session, "Notification bridge stopped");
}

async fn forward(
    mut events: mpsc::Receiver<RawEvent>,
    alerts: &mpsc::Sender<Alert>,
    shutdown: &mut oneshot::Receiver<()>,
) -> Session {
    loop {
        let raw = tokio::select! {
            _ = &mut *shutdown => return Session::Shutdown,
            raw = events.recv() => raw,
        };
        let Some(raw) = raw else {
            return Session::Closed;
        };
        let Some(event) = RealtimeEvent::parse(&raw) else {
            debug!(name = %raw.name, "Ignoring event");
            continue;
        };
        if alerts.send(Alert::from(event)).await.is_err() {
            // Nobody is listening any more.
            return Session::Shutdown;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ShopId;
    use serde_json::json;

    fn session() -> SessionKey {
        SessionKey::new(ShopId(1), None)
    }

    async fn wait_for(rx: &mut watch::Receiver<bool>, wanted: bool) {
        while *rx.borrow_and_update() != wanted {
            rx.changed().await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_events_become_alerts() {
        let source = Arc::new(ChannelEventSource::new());
        let events = source.push_connection();
        let (alerts_tx, mut alerts) = mpsc::channel(8);

        let bridge = NotificationBridge::spawn(source.clone(), session(), ReconnectPolicy::default(), alerts_tx);
        wait_for(&mut bridge.connection(), true).await;
        assert!(bridge.is_connected());

        events
            .send(RawEvent::new(ORDER_UPDATED, json!({"message": "Your food is ready"})))
            .await
            .unwrap();
        events.send(RawEvent::new("typing", json!({}))).await.unwrap();
        events.send(RawEvent::new(DESK_FREED, json!({}))).await.unwrap();

        let first = alerts.recv().await.unwrap();
        assert_eq!(first.kind, AlertKind::OrderUpdate);
        assert_eq!(first.message, "Your food is ready");

        let second = alerts.recv().await.unwrap();
        assert_eq!(second.kind, AlertKind::Farewell);

        bridge.disconnect().await;
        assert_eq!(source.connect_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_attempts() {
        let source = Arc::new(ChannelEventSource::new());
        let (alerts_tx, _alerts) = mpsc::channel(8);
        let policy = ReconnectPolicy {
            max_attempts: 3,
            delay: Duration::from_secs(1),
        };

        let bridge = NotificationBridge::spawn(source.clone(), session(), policy, alerts_tx);
        tokio::time::sleep(Duration::from_secs(30)).await;

        assert!(bridge.is_finished());
        assert!(!bridge.is_connected());
        // The first attempt plus three reconnects.
        assert_eq!(source.connect_count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_connection_resets_attempts() {
        let source = Arc::new(ChannelEventSource::new());
        source.push_failure("boom");
        source.push_failure("boom");
        let events = source.push_connection();
        let (alerts_tx, _alerts) = mpsc::channel(8);
        let policy = ReconnectPolicy {
            max_attempts: 2,
            delay: Duration::from_secs(1),
        };

        let bridge = NotificationBridge::spawn(source.clone(), session(), policy, alerts_tx);
        let mut connection = bridge.connection();
        wait_for(&mut connection, true).await;
        assert_eq!(source.connect_count(), 3);

        // Server drops the connection; two more failures are tolerated again.
        drop(events);
        wait_for(&mut connection, false).await;
        tokio::time::sleep(Duration::from_secs(30)).await;

        assert!(bridge.is_finished());
        assert_eq!(source.connect_count(), 6);
    }

    #[tokio::test]
    async fn test_disconnect_while_connected() {
        let source = Arc::new(ChannelEventSource::new());
        let _events = source.push_connection();
        let (alerts_tx, _alerts) = mpsc::channel(8);

        let bridge = NotificationBridge::spawn(source, session(), ReconnectPolicy::default(), alerts_tx);
        let mut connection = bridge.connection();
        wait_for(&mut connection, true).await;

        bridge.disconnect().await;
        assert!(!*connection.borrow());
    }
}
