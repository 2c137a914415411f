//! Skips wiremock tests in sandboxes that forbid binding localhost.
//!
//! Set `PAPER_EXTRACTOR_REQUIRE_SOCKET_TESTS=1` in CI to turn a skip into a failure.

use std::net::TcpListener;

use wiremock::MockServer;

const STRICT_ENV: &str = "PAPER_EXTRACTOR_REQUIRE_SOCKET_TESTS";

fn strict_mode() -> bool {
    std::env::var(STRICT_ENV).is_ok_and(|value| {
        let value = value.trim();
        value == "1" || value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("yes")
    })
}

/// Starts a mock server, or returns `None` when no local port can be bound.
///
/// # Panics
///
/// Panics instead of skipping when strict mode is enabled.
pub async fn start_mock_server_or_skip() -> Option<MockServer> {
    match TcpListener::bind(("127.0.0.1", 0)) {
        Ok(probe) => {
            drop(probe);
            Some(MockServer::start().await)
        }
        Err(error) => {
            assert!(
                !strict_mode(),
                "cannot bind a localhost port ({error}) and {STRICT_ENV} is set"
            );
            eprintln!("skipping mock-server test: cannot bind a localhost port ({error})");
            None
        }
    }
}
