use thiserror::Error;

/// Main error type for imgbox
#[derive(Error, Debug)]
pub enum ImgboxError {
    /// Bad or missing input, reported as-is to the user
    #[error("{0}")]
    Input(String),

    /// The image host could not be reached or refused the request
    #[error("{0}")]
    Connection(String),

    /// The image host answered with something we don't understand
    #[error("Unexpected response from image host: {0}")]
    Protocol(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ImgboxError {
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

impl From<reqwest::Error> for ImgboxError {
    fn from(err: reqwest::Error) -> Self {
        let message = message_with_causes(&err);
        if err.is_decode() {
            Self::Protocol(message)
        } else {
            Self::Connection(message)
        }
    }
}

/// `outer: cause: root cause`
fn message_with_causes(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_message = cause.to_string();
        // Some errors already repeat their cause in their own message
        if !message.ends_with(&cause_message) {
            message.push_str(": ");
            message.push_str(&cause_message);
        }
        source = cause.source();
    }
    message
}
