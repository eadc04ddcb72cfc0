use crate::error::{Error, Result};

/// Splits a request URL into the URL without its query and the decoded query pairs.
///
/// Pairs are decoded as `application/x-www-form-urlencoded`, so `+` becomes a space.
pub fn url_to_endpoint_and_queries(url: &str) -> Result<(String, Vec<(String, String)>)> {
    let mut parsed = url::Url::parse(url).map_err(|e| Error::MalformedUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    let queries: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(k, _)| !k.is_empty())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    parsed.set_query(None);
    parsed.set_fragment(None);
    Ok((parsed.as_str().to_string(), queries))
}
