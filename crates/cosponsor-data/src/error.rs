use thiserror::Error;

/// Everything that can go wrong between requesting `/api/network-data`
/// and holding a dataset. All variants are fatal to initialization and
/// are shown in the error panel; nothing here is retried.
#[derive(Debug, Error)]
pub enum DataError {
    /// The endpoint answered 404: the store holds no dump yet.
    #[error("no data available")]
    NoData,

    /// The endpoint answered 5xx.
    #[error("server error (HTTP {status})")]
    Server { status: u16 },

    /// Transport-level failure or an unexpected status.
    #[error("request failed: {message}")]
    Fetch { message: String },

    /// The body parsed but required sections are missing.
    #[error("response is missing required sections: {0}")]
    Shape(String),

    /// The body is not valid JSON or a field has the wrong type.
    #[error("failed to parse network data: {0}")]
    Parse(#[from] serde_json::Error),
}

impl DataError {
    /// Short heading for the error panel.
    pub fn headline(&self) -> &'static str {
        match self {
            DataError::NoData => "No data available",
            DataError::Server { .. } => "Server error",
            DataError::Fetch { .. } => "Could not reach the data service",
            DataError::Shape(_) => "Unexpected response shape",
            DataError::Parse(_) => "Could not parse the response",
        }
    }

    /// Raw diagnostic line shown under the headline.
    pub fn detail(&self) -> String {
        self.to_string()
    }
}
