use thiserror::Error;

/// Everything that can go wrong between asking the provider for a location
/// and turning its answers into readings and summaries.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Missing credential or settings that cannot be used.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The provider answered with a non-success status.
    #[error("provider returned status {status}: {message}")]
    Provider { status: u16, message: String },

    /// The provider answered, but not with the shape we expect.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("cannot summarize an empty set of readings")]
    EmptyInput,

    /// The request never produced a response (DNS, connect, timeout...).
    #[error("request to provider failed: {0}")]
    Transport(reqwest::Error),
}

impl From<reqwest::Error> for MonitorError {
    /// The request URL carries the API key, so it never makes it into the
    /// error.
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.without_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_mentions_status_and_message() {
        let err = MonitorError::Provider {
            status: 404,
            message: "city not found".into(),
        };

        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("city not found"));
    }

    #[test]
    fn configuration_error_keeps_detail() {
        let err = MonitorError::Configuration("OPENWEATHER_API_KEY is not set".into());
        assert!(err.to_string().contains("OPENWEATHER_API_KEY"));
    }
}
