//! Remote collaborators: the order service and the catalog service.
//!
//! Both are consumed through traits ([`OrderGateway`], [`CatalogSource`]) so the
//! checkout actor and the CLI can run against in-process fakes in tests.

mod catalog;
mod orders;

pub use catalog::*;
pub use orders::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("order service rejected the request with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("unexpected response from order service: {0}")]
    UnexpectedResponse(String),
}

/// Joins a base URL and a path without doubling or dropping the slash.
fn endpoint(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::endpoint;

    #[test]
    fn test_endpoint_join() {
        assert_eq!(endpoint("http://h/api/", "/orders"), "http://h/api/orders");
        assert_eq!(endpoint("http://h/api", "shops/1"), "http://h/api/shops/1");
    }
}
