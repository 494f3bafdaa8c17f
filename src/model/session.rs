//! Session context: which desk the customer is sitting at, if any.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::num::NonZeroU32;
use tracing::debug;

/// A positive desk (table) number, scanned from the QR code at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeskNumber(NonZeroU32);

impl DeskNumber {
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Reads the desk from a query string such as `?desk=12`.
    ///
    /// `desk` wins over the older `table` parameter. Non-numeric or zero values are
    /// treated as absent.
    pub fn from_query(query: &str) -> Option<Self> {
        let query = query.trim_start_matches('?');
        let lookup = |wanted: &str| {
            query
                .split('&')
                .filter_map(|pair| pair.split_once('='))
                .find(|(key, _)| *key == wanted)
                .and_then(|(_, value)| value.trim().parse::<u32>().ok())
                .and_then(Self::new)
        };
        let desk = lookup("desk").or_else(|| lookup("table"));
        debug!(query, ?desk, "Desk from query");
        desk
    }
}

impl Display for DeskNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desk_from_query() {
        assert_eq!(DeskNumber::from_query("?desk=12").map(DeskNumber::get), Some(12));
        assert_eq!(DeskNumber::from_query("table=3&lang=ar").map(DeskNumber::get), Some(3));
        assert_eq!(DeskNumber::from_query("table=3&desk=5").map(DeskNumber::get), Some(5));
        assert_eq!(DeskNumber::from_query("desk=0"), None);
        assert_eq!(DeskNumber::from_query("desk=abc"), None);
        assert_eq!(DeskNumber::from_query(""), None);
    }
}
