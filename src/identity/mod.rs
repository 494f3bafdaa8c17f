//! # Identity Memo
//!
//! Remembers who the customer is after their first successful order so that later
//! dine-in and takeaway orders can be placed without asking again. The record lives
//! in a [`SessionStore`] under the key [`CUSTOMER_KEY`] and survives restarts when the
//! store is file-backed. It is only removed by an explicit logout.

mod store;

pub use store::*;

use crate::model::CustomerIdentity;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Key under which the identity is stored.
pub const CUSTOMER_KEY: &str = "customer";

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("session storage failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("session data is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Shared handle to the remembered identity.
#[derive(Clone)]
pub struct IdentityMemo {
    store: Arc<dyn SessionStore>,
}

impl IdentityMemo {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// A memo that forgets everything when the process exits.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::default()))
    }

    /// The remembered identity, if any. A record that no longer parses is treated
    /// as absent.
    pub async fn get(&self) -> Result<Option<CustomerIdentity>, IdentityError> {
        let Some(value) = self.store.get(CUSTOMER_KEY).await? else {
            return Ok(None);
        };
        match serde_json::from_value::<CustomerIdentity>(value) {
            Ok(identity) => Ok(Some(identity)),
            Err(e) => {
                warn!(error = %e, "Ignoring malformed stored identity");
                Ok(None)
            }
        }
    }

    pub async fn set(&self, identity: &CustomerIdentity) -> Result<(), IdentityError> {
        debug!(?identity, "Remembering customer");
        self.store
            .set(CUSTOMER_KEY, serde_json::to_value(identity)?)
            .await
    }

    /// Logout.
    pub async fn clear(&self) -> Result<(), IdentityError> {
        info!("Forgetting customer");
        self.store.remove(CUSTOMER_KEY).await
    }
}

impl std::fmt::Debug for IdentityMemo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityMemo").finish_non_exhaustive()
    }
}

impl CustomerIdentity {
    /// Parses the cookie mirror of the stored identity (URL-encoded JSON).
    pub fn from_cookie(value: &str) -> Option<Self> {
        let decoded = percent_decode(value)?;
        serde_json::from_str(&decoded).ok()
    }
}

fn percent_decode(value: &str) -> Option<String> {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hex = value.get(i + 1..i + 3)?;
                out.push(u8::from_str_radix(hex, 16).ok()?);
                i += 3;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8(out).ok()
}
