//! Shared reqwest client construction.

use std::time::Duration;

use reqwest::Client;

use crate::user_agent;

/// Builds the HTTP client used for feed and PDF requests.
///
/// `read_timeout` bounds the whole request including the body.
pub(crate) fn build_http_client(
    connect_timeout: Duration,
    read_timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(connect_timeout)
        .timeout(read_timeout)
        .gzip(true)
        .user_agent(user_agent::default_user_agent())
        .build()
}
