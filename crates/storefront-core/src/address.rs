//! Service instance address, reported in responses for diagnostics.

/// Builds the address string a service reports in its responses, in the form
/// `{service}@{host}:{port}`. The host comes from the `HOSTNAME` environment
/// variable when set (e.g., inside a container), falling back to `localhost`.
#[must_use]
pub fn service_address(service: &str, port: u16) -> String {
    let host = std::env::var("HOSTNAME").unwrap_or_else(|_| "localhost".to_owned());
    format!("{service}@{host}:{port}")
}
