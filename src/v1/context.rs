use super::values::{SignatureMethod, OAUTH_VALUE_VERSION};
use crate::encoder;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

fn default_version() -> String {
    OAUTH_VALUE_VERSION.to_string()
}

/// Credentials and protocol settings for one consumer/token pair.
///
/// Loadable from any serde format; `token`, `token_secret` and `realm`
/// default to empty, `signature_method` to `HMAC-SHA1` and `version`
/// to `"1.0"`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningContext {
    consumer_key: String,
    consumer_secret: String,
    #[serde(default)]
    token: String,
    #[serde(default)]
    token_secret: String,
    #[serde(default)]
    realm: String,
    #[serde(default)]
    signature_method: SignatureMethod,
    #[serde(default = "default_version")]
    version: String,
}

impl SigningContext {
    pub fn builder(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
    ) -> SigningContextBuilder {
        SigningContextBuilder {
            context: SigningContext {
                consumer_key: consumer_key.into(),
                consumer_secret: consumer_secret.into(),
                token: String::new(),
                token_secret: String::new(),
                realm: String::new(),
                signature_method: SignatureMethod::default(),
                version: default_version(),
            },
        }
    }

    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn realm(&self) -> &str {
        &self.realm
    }

    pub fn signature_method(&self) -> SignatureMethod {
        self.signature_method
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// `encode(consumer_secret) & encode(token_secret)`, the HMAC key and
    /// the PLAINTEXT signature.
    pub(crate) fn signing_key(&self) -> String {
        format!(
            "{}&{}",
            encoder::encode(&self.consumer_secret),
            encoder::encode(&self.token_secret)
        )
    }
}

impl fmt::Debug for SigningContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningContext")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("token", &self.token)
            .field("token_secret", &"<redacted>")
            .field("realm", &self.realm)
            .field("signature_method", &self.signature_method)
            .field("version", &self.version)
            .finish()
    }
}

/// Builds a [`SigningContext`]; every setter consumes and returns the builder.
#[derive(Clone, Debug)]
pub struct SigningContextBuilder {
    context: SigningContext,
}

impl SigningContextBuilder {
    pub fn token(mut self, token: impl Into<String>, token_secret: impl Into<String>) -> Self {
        self.context.token = token.into();
        self.context.token_secret = token_secret.into();
        self
    }

    pub fn realm(mut self, realm: impl Into<String>) -> Self {
        self.context.realm = realm.into();
        self
    }

    pub fn signature_method(mut self, signature_method: SignatureMethod) -> Self {
        self.context.signature_method = signature_method;
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.context.version = version.into();
        self
    }

    pub fn build(self) -> SigningContext {
        self.context
    }
}

/// Per-request nonce and timestamp.
///
/// An unset timestamp is filled with the current Unix time when a signing
/// operation starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stamp {
    nonce: String,
    timestamp: Option<i64>,
}

impl Stamp {
    /// Fresh random nonce, timestamp taken at signing time.
    pub fn new() -> Self {
        Stamp {
            nonce: encoder::generate_nonce(),
            timestamp: None,
        }
    }

    pub fn with(nonce: impl Into<String>, timestamp: i64) -> Self {
        Stamp {
            nonce: nonce.into(),
            timestamp: Some(timestamp),
        }
    }

    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    pub fn timestamp(&self) -> Option<i64> {
        self.timestamp
    }

    /// Returns a copy whose timestamp is fixed, using the clock if unset.
    pub fn resolved(&self) -> Stamp {
        Stamp {
            nonce: self.nonce.clone(),
            timestamp: Some(self.timestamp.unwrap_or_else(|| Utc::now().timestamp())),
        }
    }
}

impl Default for Stamp {
    fn default() -> Self {
        Stamp::new()
    }
}
