//! Percent-encoding and normalization primitives for OAuth 1.0a (RFC 5849).

use crate::error::{Error, Result};
use crate::parameters::{OAuthParameter, ParamValue, ParameterSet};
use percent_encoding::{percent_encode, utf8_percent_encode, AsciiSet};
use rand::distributions::Alphanumeric;
use rand::Rng;
use url::Url;

// https://tools.ietf.org/html/rfc5849#section-3.6
// * ALPHA, DIGIT, '-', '.', '_', '~' MUST NOT be encoded.
// * All other characters MUST be encoded.
// * The two hexadecimal characters used to represent encoded
//   characters MUST be uppercase.
const TARGETS_FOR_PARAMS: &AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const NONCE_LEN: usize = 20;

/// Percent-encodes a string, leaving only unreserved characters literal.
pub fn encode(input: &str) -> String {
    utf8_percent_encode(input, TARGETS_FOR_PARAMS).to_string()
}

/// Percent-encodes raw bytes; they need not be valid UTF-8.
pub fn encode_bytes(input: &[u8]) -> String {
    percent_encode(input, TARGETS_FOR_PARAMS).to_string()
}

/// Encodes a single scalar parameter value.
///
/// Lists are rejected with [`Error::InvalidInput`].
pub fn encode_scalar(value: &OAuthParameter<'_>) -> Result<String> {
    match value {
        OAuthParameter::StringValue(s) => Ok(encode(s)),
        OAuthParameter::IntValue(n) => Ok(encode(&n.to_string())),
        OAuthParameter::FloatValue(n) => Ok(encode(&n.to_string())),
        OAuthParameter::ByteValue(b) => Ok(encode_bytes(b)),
        OAuthParameter::ListValue(_) => Err(Error::InvalidInput(
            "a list cannot be encoded where a single value is expected".into(),
        )),
    }
}

/// Encodes a parameter value, element-wise for lists.
pub fn encode_value(value: &OAuthParameter<'_>) -> Result<ParamValue> {
    match value {
        OAuthParameter::ListValue(items) => items
            .iter()
            .map(encode_scalar)
            .collect::<Result<Vec<String>>>()
            .map(ParamValue::Multi),
        scalar => encode_scalar(scalar).map(ParamValue::Single),
    }
}

/// Builds the normalized parameter string of RFC 5849 section 3.4.1.3.2.
///
/// Keys and values are encoded, ordered by key (then by value for
/// repeated keys) and joined as `key=value` pairs with `&`.
pub fn build_query_string<K: AsRef<str>>(params: &[(K, OAuthParameter<'_>)]) -> Result<String> {
    Ok(ParameterSet::encode(params)?.to_query_string())
}

/// Normalizes a request URL into the base string URI of RFC 5849 section 3.4.1.2.
///
/// Scheme and host are lowercased, ports 80 and 443 are dropped, and the
/// query and fragment are discarded.
pub fn normalize_url(url: &str) -> Result<String> {
    let malformed = |reason: String| Error::MalformedUrl {
        url: url.to_string(),
        reason,
    };
    let parsed = Url::parse(url).map_err(|e| malformed(e.to_string()))?;
    let host = parsed
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| malformed("missing host".into()))?;

    let scheme = parsed.scheme().to_ascii_lowercase();
    let host = host.to_ascii_lowercase();
    // `port()` is already `None` when the port is the scheme default.
    let port = match parsed.port() {
        Some(p) if p != 80 && p != 443 => format!(":{}", p),
        _ => String::new(),
    };
    Ok(format!("{}://{}{}{}", scheme, host, port, parsed.path()))
}

/// Generates a 20-character alphanumeric nonce from the thread-local CSPRNG.
pub fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use percent_encoding::percent_decode_str;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_encode_unreserved() {
        assert_eq!(encode("abcXYZ019"), "abcXYZ019");
        assert_eq!(encode("-._~"), "-._~");
    }

    #[test]
    fn test_encode_reserved() {
        assert_eq!(encode(" "), "%20");
        assert_eq!(encode("+"), "%2B");
        assert_eq!(encode("&=/:*"), "%26%3D%2F%3A%2A");
        assert_eq!(encode("%7E"), "%257E");
        assert_eq!(encode("パ"), "%E3%83%91");
        assert_eq!(
            encode("Hello Ladies + Gentlemen, a signed OAuth request!"),
            "Hello%20Ladies%20%2B%20Gentlemen%2C%20a%20signed%20OAuth%20request%21"
        );
    }

    #[test]
    fn test_encode_bytes() {
        assert_eq!(encode_bytes(&[0x00, 0xff, b'a']), "%00%FFa");
    }

    #[test]
    fn test_encode_is_stable_through_decode() {
        let samples = [
            "",
            "plain",
            "with space",
            "q?x=1&y=2#frag",
            "~!@#$%^&*()_+`-={}|[]\\:\";'<>,./",
        ];
        for s in samples.iter() {
            let encoded = encode(s);
            let decoded = percent_decode_str(&encoded).decode_utf8().unwrap();
            assert_eq!(encode(&decoded), encoded);
        }
    }

    #[test]
    fn test_encode_value_shapes() {
        assert_eq!(
            encode_value(&OAuthParameter::from("a b")).unwrap(),
            ParamValue::Single("a%20b".into())
        );
        assert_eq!(
            encode_value(&OAuthParameter::from(vec!["a b", "c"])).unwrap(),
            ParamValue::Multi(vec!["a%20b".into(), "c".into()])
        );
        assert!(encode_scalar(&OAuthParameter::list(vec!["x"])).is_err());
    }

    #[test]
    fn test_build_query_string() {
        let query = build_query_string(&[
            ("b", OAuthParameter::from("2")),
            ("a", OAuthParameter::from("x y")),
            ("c", OAuthParameter::from(vec!["b", "a"])),
        ])
        .unwrap();
        assert_eq!(query, "a=x%20y&b=2&c=a&c=b");
        assert_eq!(build_query_string::<&str>(&[]).unwrap(), "");
    }

    #[test]
    fn test_build_query_string_key_order_is_bytewise() {
        let query = build_query_string(&[
            ("a", OAuthParameter::from("1")),
            ("B", OAuthParameter::from("1")),
            ("a_", OAuthParameter::from("1")),
            ("a-", OAuthParameter::from("1")),
        ])
        .unwrap();
        let keys: Vec<&str> = query
            .split('&')
            .map(|pair| pair.split('=').next().unwrap())
            .collect();
        assert_eq!(keys, vec!["B", "a", "a-", "a_"]);
        assert!(keys.windows(2).all(|w| w[0].as_bytes() <= w[1].as_bytes()));
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(
            normalize_url("HTTP://Example.com:80/path").unwrap(),
            "http://example.com/path"
        );
        assert_eq!(
            normalize_url("https://Example.com:443/x").unwrap(),
            "https://example.com/x"
        );
        assert_eq!(
            normalize_url("https://example.com:8443/x").unwrap(),
            "https://example.com:8443/x"
        );
        assert_eq!(
            normalize_url("http://example.com:443/x").unwrap(),
            "http://example.com/x"
        );
        assert_eq!(
            normalize_url("https://api.example.com/a/b?c=d#e").unwrap(),
            "https://api.example.com/a/b"
        );
    }

    #[test]
    fn test_normalize_url_rejects_relative_and_hostless() {
        for url in ["example.com/path", "/relative", "mailto:user@example.com"].iter() {
            match normalize_url(url) {
                Err(Error::MalformedUrl { url: u, .. }) => assert_eq!(u, *url),
                other => panic!("expected MalformedUrl for {}, got {:?}", url, other),
            }
        }
    }

    #[test]
    fn test_generate_nonce() {
        let nonce1 = generate_nonce();
        let nonce2 = generate_nonce();
        assert_eq!(nonce1.len(), 20);
        assert!(nonce1.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(nonce1, nonce2);
    }
}
