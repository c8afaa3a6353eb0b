use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error! Status: {status}")]
    Request { status: u16 },

    #[error("Timeout error: {0}")]
    Timeout(#[source] rquest::Error),

    #[error("Connection error: {0}")]
    Connection(#[source] rquest::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] rquest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Malformed response envelope: missing {0}")]
    MalformedEnvelope(&'static str),

    #[error("Site {site_id} is a directory site, not a table")]
    DirectorySite { site_id: String },

    #[error("Unexpected reference type: {0}")]
    UnexpectedReferenceType(String),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Unknown element: {0}")]
    UnknownElement(String),
}

impl Error {
    /// Sorts a transport failure into timeout, connection or generic HTTP error.
    pub fn from_transport(err: rquest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout(err)
        } else if err.is_connect() {
            Error::Connection(err)
        } else {
            Error::Http(err)
        }
    }
}
