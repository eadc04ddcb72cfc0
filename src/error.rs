use crate::v1::SignatureMethod;

/// Errors raised while normalizing or signing a request.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed URL `{url}`: {reason}")]
    MalformedUrl { url: String, reason: String },

    #[error("signature method {0} is not supported")]
    UnsupportedSignatureMethod(SignatureMethod),

    #[error("unknown signature method `{0}`")]
    UnknownSignatureMethod(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("signing key rejected: {0}")]
    InvalidSigningKey(String),
}

pub type Result<T> = std::result::Result<T, Error>;
