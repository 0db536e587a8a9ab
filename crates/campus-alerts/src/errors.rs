use campus_core::CoreError;

/// Why a live quote was not used for a target.
#[derive(Debug, thiserror::Error)]
pub enum FeedFallback {
    /// No feed credential configured, or the mock sentinel.
    #[error("live feed disabled")]
    Disabled,
    /// The outbound call failed (transport, timeout, HTTP status, decode).
    #[error("feed request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The response decoded but carried no usable quote.
    #[error("feed response had no usable quote")]
    MissingQuote,
}

/// Errors from alert delivery.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// SNS publish failure.
    #[error("SNS error: {0}")]
    Sns(#[from] aws_sdk_sns::Error),
}

/// Faults that abort a check cycle.
#[derive(Debug, thiserror::Error)]
pub enum CheckerError {
    /// Error from DynamoDB operations.
    #[error("checker core error: {0}")]
    Core(#[from] CoreError),
    /// Error from alert delivery.
    #[error("checker notify error: {0}")]
    Notify(#[from] NotifyError),
}
