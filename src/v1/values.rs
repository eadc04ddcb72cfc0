use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const OAUTH_VALUE_VERSION: &str = "1.0";

pub const OAUTH_VALUE_SIGMETHOD_HMACSHA1: &str = "HMAC-SHA1";
pub const OAUTH_VALUE_SIGMETHOD_HMACSHA256: &str = "HMAC-SHA256";
pub const OAUTH_VALUE_SIGMETHOD_HMACSHA512: &str = "HMAC-SHA512";
pub const OAUTH_VALUE_SIGMETHOD_HMACMD5: &str = "HMAC-MD5";
pub const OAUTH_VALUE_SIGMETHOD_RSASHA1: &str = "RSA-SHA1";
pub const OAUTH_VALUE_SIGMETHOD_PLAINTEXT: &str = "PLAINTEXT";

pub const OAUTH_PARAM_KEY_CONSUMER_KEY: &str = "oauth_consumer_key";
pub const OAUTH_PARAM_KEY_NONCE: &str = "oauth_nonce";
pub const OAUTH_PARAM_KEY_SIGNATURE: &str = "oauth_signature";
pub const OAUTH_PARAM_KEY_SIGNATURE_METHOD: &str = "oauth_signature_method";
pub const OAUTH_PARAM_KEY_TIMESTAMP: &str = "oauth_timestamp";
pub const OAUTH_PARAM_KEY_TOKEN: &str = "oauth_token";
pub const OAUTH_PARAM_KEY_VERSION: &str = "oauth_version";
pub const OAUTH_PARAM_KEY_REALM: &str = "realm";

/// Signature method announced in `oauth_signature_method`.
///
/// Only `HmacSha1`, `HmacSha256` and `PlainText` can actually sign; the
/// others are accepted as configuration but fail at signing time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureMethod {
    #[serde(rename = "HMAC-SHA1")]
    HmacSha1,
    #[serde(rename = "HMAC-SHA256")]
    HmacSha256,
    #[serde(rename = "HMAC-SHA512")]
    HmacSha512,
    #[serde(rename = "HMAC-MD5")]
    HmacMd5,
    #[serde(rename = "RSA-SHA1")]
    RsaSha1,
    #[serde(rename = "PLAINTEXT")]
    PlainText,
}

impl SignatureMethod {
    pub const ALL: [SignatureMethod; 6] = [
        SignatureMethod::HmacSha1,
        SignatureMethod::HmacSha256,
        SignatureMethod::HmacSha512,
        SignatureMethod::HmacMd5,
        SignatureMethod::RsaSha1,
        SignatureMethod::PlainText,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SignatureMethod::HmacSha1 => OAUTH_VALUE_SIGMETHOD_HMACSHA1,
            SignatureMethod::HmacSha256 => OAUTH_VALUE_SIGMETHOD_HMACSHA256,
            SignatureMethod::HmacSha512 => OAUTH_VALUE_SIGMETHOD_HMACSHA512,
            SignatureMethod::HmacMd5 => OAUTH_VALUE_SIGMETHOD_HMACMD5,
            SignatureMethod::RsaSha1 => OAUTH_VALUE_SIGMETHOD_RSASHA1,
            SignatureMethod::PlainText => OAUTH_VALUE_SIGMETHOD_PLAINTEXT,
        }
    }
}

impl Default for SignatureMethod {
    fn default() -> Self {
        SignatureMethod::HmacSha1
    }
}

impl From<SignatureMethod> for &'static str {
    fn from(method: SignatureMethod) -> Self {
        method.as_str()
    }
}

impl fmt::Display for SignatureMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SignatureMethod::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownSignatureMethod(s.to_string()))
    }
}
