use super::context::{SigningContext, Stamp};
use super::values::*;
use crate::encoder::{encode, normalize_url};
use crate::error::{Error, Result};
use crate::parameters::{OAuthParameter, ParamValue, ParameterSet};
use crate::util;
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha1::Sha1;
use sha2::Sha256;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use tracing::{debug, trace};

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;

/// Intermediate values of one signing operation, for logging and tests.
/// Not part of the protocol.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SignatureDebug {
    pub normalized_params: ParameterSet,
    pub base_string: String,
    /// Signature before percent-encoding.
    pub signature: String,
}

/// A computed signature, percent-encoded for the header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedResult {
    pub signature: String,
    pub debug: SignatureDebug,
}

/// Encoded parameters in header order: realm, sorted parameters, signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedParams {
    pub params: Vec<(String, ParamValue)>,
    pub debug: SignatureDebug,
}

/// A rendered `Authorization` header value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationHeader {
    value: String,
    debug: SignatureDebug,
}

impl AuthorizationHeader {
    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn debug(&self) -> &SignatureDebug {
        &self.debug
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl fmt::Display for AuthorizationHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// OAuth 1.0a request signer.
///
/// Holds only immutable credentials; nonce and timestamp arrive with each
/// call as a [`Stamp`], so one signer can be shared across threads.
#[derive(Clone, Debug)]
pub struct Signer {
    context: SigningContext,
}

impl Signer {
    pub fn new(context: SigningContext) -> Self {
        Signer { context }
    }

    pub fn context(&self) -> &SigningContext {
        &self.context
    }

    /// Merges the six protocol parameters with the caller's parameters.
    ///
    /// A caller key equal to a protocol key replaces the protocol value.
    /// Everything is encoded and ordered by encoded key.
    pub fn compute_normalized_params<K: AsRef<str>>(
        &self,
        stamp: &Stamp,
        query_params: &[(K, OAuthParameter<'_>)],
    ) -> Result<ParameterSet> {
        let stamp = stamp.resolved();
        let timestamp = stamp.timestamp().unwrap_or_default().to_string();
        let basic_params = [
            (OAUTH_PARAM_KEY_CONSUMER_KEY, self.context.consumer_key()),
            (OAUTH_PARAM_KEY_NONCE, stamp.nonce()),
            (
                OAUTH_PARAM_KEY_SIGNATURE_METHOD,
                self.context.signature_method().as_str(),
            ),
            (OAUTH_PARAM_KEY_TIMESTAMP, timestamp.as_str()),
            (OAUTH_PARAM_KEY_TOKEN, self.context.token()),
            (OAUTH_PARAM_KEY_VERSION, self.context.version()),
        ];
        let mut params = basic_params
            .iter()
            .map(|(k, v)| (encode(k), ParamValue::Single(encode(v))))
            .collect::<BTreeMap<String, ParamValue>>();
        for (k, v) in ParameterSet::encode(query_params)?.into_entries() {
            params.insert(k, v);
        }
        Ok(params.into())
    }

    /// Builds the signature base string of RFC 5849 section 3.4.1.
    pub fn compute_sbs(
        &self,
        http_method: &str,
        url: &str,
        normalized_params: &ParameterSet,
    ) -> Result<String> {
        let normalized_url = normalize_url(url)?;
        Ok(format!(
            "{}&{}&{}",
            encode(&http_method.to_ascii_uppercase()),
            encode(&normalized_url),
            encode(&normalized_params.to_query_string())
        ))
    }

    /// Signs already normalized parameters with the configured method.
    ///
    /// `HMAC-SHA512`, `HMAC-MD5` and `RSA-SHA1` have no implementation and
    /// fail with [`Error::UnsupportedSignatureMethod`] instead of producing
    /// an empty signature.
    pub fn sign(
        &self,
        http_method: &str,
        url: &str,
        params: &ParameterSet,
    ) -> Result<SignedResult> {
        let method = self.context.signature_method();
        debug!(http_method, url, signature_method = %method, "signing request");
        let base_string = self.compute_sbs(http_method, url, params)?;
        trace!(base_string = %base_string, "signature base string");

        let sign_key = self.context.signing_key();
        let signature = match method {
            SignatureMethod::HmacSha1 => generate_signature_hmacsha1(&sign_key, &base_string)?,
            SignatureMethod::HmacSha256 => {
                generate_signature_hmacsha256(&sign_key, &base_string)?
            }
            SignatureMethod::PlainText => sign_key,
            SignatureMethod::HmacSha512 | SignatureMethod::HmacMd5 | SignatureMethod::RsaSha1 => {
                return Err(Error::UnsupportedSignatureMethod(method))
            }
        };

        Ok(SignedResult {
            signature: encode(&signature),
            debug: SignatureDebug {
                normalized_params: params.clone(),
                base_string,
                signature,
            },
        })
    }

    /// Normalizes, signs, and lays the parameters out in header order:
    /// `realm` first, the sorted parameters, then `oauth_signature` last.
    pub fn build_signed_params<K: AsRef<str>>(
        &self,
        http_method: &str,
        url: &str,
        stamp: &Stamp,
        query_params: &[(K, OAuthParameter<'_>)],
    ) -> Result<SignedParams> {
        let stamp = stamp.resolved();
        let normalized = self.compute_normalized_params(&stamp, query_params)?;
        let signed = self.sign(http_method, url, &normalized)?;

        let mut params = Vec::with_capacity(normalized.len() + 2);
        params.push((
            encode(OAUTH_PARAM_KEY_REALM),
            ParamValue::Single(encode(self.context.realm())),
        ));
        params.extend(normalized.into_entries());
        params.push((
            encode(OAUTH_PARAM_KEY_SIGNATURE),
            ParamValue::Single(signed.signature),
        ));
        Ok(SignedParams {
            params,
            debug: signed.debug,
        })
    }

    /// Renders `prefix` followed by comma-separated `key="value"` pairs.
    ///
    /// Keys the caller supplied in `query_params` are signed but left out of
    /// the header; they travel in the request itself.
    pub fn render_authorization_header<K: AsRef<str>>(
        &self,
        http_method: &str,
        url: &str,
        stamp: &Stamp,
        query_params: &[(K, OAuthParameter<'_>)],
        prefix: &str,
    ) -> Result<AuthorizationHeader> {
        let signed = self.build_signed_params(http_method, url, stamp, query_params)?;
        let caller_keys = query_params
            .iter()
            .map(|(k, _)| encode(k.as_ref()))
            .collect::<HashSet<String>>();

        let pairs = signed
            .params
            .iter()
            .filter(|(k, _)| !caller_keys.contains(k))
            .flat_map(|(k, v)| {
                v.as_slice()
                    .iter()
                    .map(move |value| format!("{}=\"{}\"", k, value))
            })
            .collect::<Vec<String>>()
            .join(",");
        Ok(AuthorizationHeader {
            value: format!("{}{}", prefix, pairs),
            debug: signed.debug,
        })
    }

    /// Like [`Signer::render_authorization_header`], taking the parameters
    /// from the query string of `url`.
    pub fn render_authorization_header_for_url(
        &self,
        http_method: &str,
        url: &str,
        stamp: &Stamp,
        prefix: &str,
    ) -> Result<AuthorizationHeader> {
        let (endpoint, queries) = util::url_to_endpoint_and_queries(url)?;
        let query_params = queries
            .into_iter()
            .map(|(k, v)| (k, OAuthParameter::from(v)))
            .collect::<Vec<(String, OAuthParameter<'_>)>>();
        self.render_authorization_header(http_method, &endpoint, stamp, &query_params, prefix)
    }
}

fn generate_signature_hmacsha1(sign_key: &str, base_string: &str) -> Result<String> {
    let mut mac = HmacSha1::new_varkey(sign_key.as_bytes())
        .map_err(|e| Error::InvalidSigningKey(format!("{:?}", e)))?;
    mac.input(base_string.as_bytes());
    let hash = mac.result().code();
    Ok(base64::encode(&hash))
}

fn generate_signature_hmacsha256(sign_key: &str, base_string: &str) -> Result<String> {
    let mut mac = HmacSha256::new_varkey(sign_key.as_bytes())
        .map_err(|e| Error::InvalidSigningKey(format!("{:?}", e)))?;
    mac.input(base_string.as_bytes());
    let hash = mac.result().code();
    Ok(base64::encode(&hash))
}
