use crate::model::{DeskNumber, ShopId};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use thiserror::Error;
use tokio::sync::mpsc;

use super::RawEvent;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("connection refused: {0}")]
    Refused(String),
}

/// Which customer session a connection is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionKey {
    pub shop_id: ShopId,
    pub desk: Option<DeskNumber>,
}

impl SessionKey {
    pub fn new(shop_id: ShopId, desk: Option<DeskNumber>) -> Self {
        Self { shop_id, desk }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shop_{}", self.shop_id.0)?;
        if let Some(desk) = self.desk {
            write!(f, "/desk_{desk}")?;
        }
        Ok(())
    }
}

/// A real-time transport. Each successful `connect` yields one connection's events;
/// the receiver ending means the connection dropped.
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn connect(&self, session: &SessionKey) -> Result<mpsc::Receiver<RawEvent>, TransportError>;
}

/// In-process source driven by a script of connection outcomes.
///
/// Each `connect` consumes the next scripted outcome; with the script exhausted it
/// refuses. Used by tests and by hosts that relay events from elsewhere.
#[derive(Default)]
pub struct ChannelEventSource {
    script: Mutex<VecDeque<Result<mpsc::Receiver<RawEvent>, TransportError>>>,
    connects: AtomicUsize,
}

impl ChannelEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful connection and returns the sender that feeds it.
    pub fn push_connection(&self) -> mpsc::Sender<RawEvent> {
        let (tx, rx) = mpsc::channel(16);
        self.script().push_back(Ok(rx));
        tx
    }

    pub fn push_failure(&self, reason: impl Into<String>) {
        self.script()
            .push_back(Err(TransportError::Refused(reason.into())));
    }

    /// Number of connection attempts seen so far.
    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    fn script(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<mpsc::Receiver<RawEvent>, TransportError>>> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl EventSource for ChannelEventSource {
    async fn connect(&self, _session: &SessionKey) -> Result<mpsc::Receiver<RawEvent>, TransportError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        self.script()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Refused("no scripted connection".into())))
    }
}
