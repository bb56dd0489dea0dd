use snafu::Snafu;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("Unknown task type: {0}")]
    TaskType(String),
    #[error("Unknown form field: {0}")]
    Field(String),
    #[error("Unsupported {field}: {value}")]
    Choice { field: &'static str, value: String },
    #[error("Invalid timestamp `{0}`, expected HH:MM:SS")]
    Timestamp(String),
    #[error("Trim duration must be greater than zero")]
    EmptyDuration,
    #[error("Invalid size `{0}`, expected WIDTHxHEIGHT")]
    Dimensions(String),
    #[error("Thumbnail interval must be at least 1 second")]
    Interval,
    #[error("Invalid number: {0}")]
    Number(#[from] std::num::ParseIntError),
    #[error("Browse a directory first")]
    NoDirectory,
    #[error("No task #{0} in the list")]
    UnknownTask(i64),
    #[error("Task #{0} has not finished")]
    NotFinished(i64),
}

#[derive(Snafu, Debug)]
#[snafu(visibility(pub))]
pub enum Client {
    #[snafu(display("Request to {url} failed: {source}"))]
    Http { url: String, source: reqwest::Error },
    /// Error reported by the server, `message` is its `{error}` text.
    #[snafu(display("{message}"))]
    Server { status: u16, message: String },
    #[snafu(display("Invalid response from {url}: {source}"))]
    Decode {
        url: String,
        source: serde_json::Error,
    },
    #[snafu(display("Push channel error: {source}"))]
    Push {
        source: tokio_tungstenite::tungstenite::Error,
    },
    #[snafu(display("Cannot start player `{player}`: {source}"))]
    Player {
        player: String,
        source: std::io::Error,
    },
    #[snafu(display("{source}"))]
    Input { source: InvalidInput },
}

impl From<InvalidInput> for Client {
    fn from(error: InvalidInput) -> Self {
        Client::Input { source: error }
    }
}
