use crate::encoder;
use crate::error::Result;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// A request parameter as supplied by the caller, before encoding.
#[derive(Clone, Debug, PartialEq)]
pub enum OAuthParameter<'a> {
    StringValue(Cow<'a, str>),
    IntValue(i64),
    FloatValue(f64),
    ByteValue(Cow<'a, [u8]>),
    /// Several values sharing one key, e.g. `?id=1&id=2`.
    ListValue(Vec<OAuthParameter<'a>>),
}

impl<'a> From<&'a str> for OAuthParameter<'a> {
    fn from(s: &'a str) -> Self {
        OAuthParameter::StringValue(s.into())
    }
}

impl From<String> for OAuthParameter<'_> {
    fn from(s: String) -> Self {
        OAuthParameter::StringValue(s.into())
    }
}

impl<'a> From<Cow<'a, str>> for OAuthParameter<'a> {
    fn from(s: Cow<'a, str>) -> Self {
        OAuthParameter::StringValue(s)
    }
}

impl From<i64> for OAuthParameter<'_> {
    fn from(n: i64) -> Self {
        OAuthParameter::IntValue(n)
    }
}

impl From<f64> for OAuthParameter<'_> {
    fn from(n: f64) -> Self {
        OAuthParameter::FloatValue(n)
    }
}

impl<'a> From<&'a [u8]> for OAuthParameter<'a> {
    fn from(v: &'a [u8]) -> Self {
        OAuthParameter::ByteValue(v.into())
    }
}

impl From<Vec<u8>> for OAuthParameter<'_> {
    fn from(v: Vec<u8>) -> Self {
        OAuthParameter::ByteValue(v.into())
    }
}

impl<'a> From<Vec<&'a str>> for OAuthParameter<'a> {
    fn from(v: Vec<&'a str>) -> Self {
        OAuthParameter::list(v)
    }
}

impl From<Vec<String>> for OAuthParameter<'_> {
    fn from(v: Vec<String>) -> Self {
        OAuthParameter::list(v)
    }
}

impl<'a> OAuthParameter<'a> {
    pub fn list<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OAuthParameter<'a>>,
    {
        OAuthParameter::ListValue(values.into_iter().map(Into::into).collect())
    }
}

/// An encoded parameter value. A key holding several values keeps them all.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Single(String),
    Multi(Vec<String>),
}

impl ParamValue {
    pub fn as_slice(&self) -> &[String] {
        match self {
            ParamValue::Single(v) => std::slice::from_ref(v),
            ParamValue::Multi(v) => v,
        }
    }

    /// Values in the order they are emitted: byte-wise ascending.
    pub fn sorted(&self) -> Vec<&str> {
        let mut values: Vec<&str> = self.as_slice().iter().map(String::as_str).collect();
        values.sort_unstable();
        values
    }

    pub(crate) fn append(self, other: ParamValue) -> ParamValue {
        let mut values = match self {
            ParamValue::Single(v) => vec![v],
            ParamValue::Multi(v) => v,
        };
        values.extend(other.as_slice().iter().cloned());
        ParamValue::Multi(values)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Single(s.to_string())
    }
}

/// Encoded parameters, unique by key and ordered byte-wise by encoded key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParameterSet {
    entries: Vec<(String, ParamValue)>,
}

impl ParameterSet {
    /// Encodes caller parameters. Repeated keys collect into one multi-valued entry.
    pub fn encode<K: AsRef<str>>(params: &[(K, OAuthParameter<'_>)]) -> Result<Self> {
        let mut grouped: BTreeMap<String, ParamValue> = BTreeMap::new();
        for (key, value) in params {
            let key = encoder::encode(key.as_ref());
            let value = encoder::encode_value(value)?;
            let merged = match grouped.remove(&key) {
                Some(existing) => existing.append(value),
                None => value,
            };
            grouped.insert(key, merged);
        }
        Ok(grouped.into())
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .binary_search_by(|(k, _)| k.as_str().cmp(key))
            .ok()
            .map(|i| &self.entries[i].1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (String, ParamValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<(String, ParamValue)> {
        self.entries
    }

    /// Joins the entries as `key=value` pairs with `&`, one pair per value.
    /// Keys and values are emitted as stored; nothing is encoded again.
    pub fn to_query_string(&self) -> String {
        self.entries
            .iter()
            .flat_map(|(k, v)| {
                v.sorted()
                    .into_iter()
                    .map(move |value| format!("{}={}", k, value))
            })
            .collect::<Vec<String>>()
            .join("&")
    }
}

impl From<BTreeMap<String, ParamValue>> for ParameterSet {
    fn from(map: BTreeMap<String, ParamValue>) -> Self {
        // BTreeMap<String, _> iterates in byte-wise key order.
        ParameterSet {
            entries: map.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ParameterSet {
    type Item = &'a (String, ParamValue);
    type IntoIter = std::slice::Iter<'a, (String, ParamValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for ParameterSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
