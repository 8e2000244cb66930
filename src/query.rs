//! Query component as an ordered list of key/value pairs.

use std::fmt;

use crate::constants::DEFAULT_QUERY_DELIMITER;
use crate::grammar::QUERY;
use crate::percent::encode_into;

/// One query item.
///
/// Either side may be absent, but never both. Pairs order by key, then value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryParam {
    key: Option<String>,
    value: Option<String>,
}

impl QueryParam {
    /// Returns the key.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Returns the value.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    fn new(key: String, value: String) -> Option<Self> {
        let key = (!key.is_empty()).then_some(key);
        let value = (!value.is_empty()).then_some(value);
        (key.is_some() || value.is_some()).then_some(Self { key, value })
    }
}

impl fmt::Display for QueryParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.key, &self.value) {
            (Some(k), Some(v)) => write!(f, "{k}={v}"),
            (Some(k), None) => f.write_str(k),
            (None, Some(v)) => write!(f, "={v}"),
            (None, None) => Ok(()),
        }
    }
}

/// Query pairs in insertion order, with the delimiter used to split and
/// join them.
///
/// Duplicate keys are kept.
///
/// # Examples
///
/// ```
/// use uri_idn::Query;
///
/// let query = Query::parse("one[two]=four&flag&=x", '&');
/// assert_eq!(query.len(), 3);
/// assert_eq!(query.get("one%5Btwo%5D"), Some("four"));
/// assert_eq!(query.to_string(), "one%5Btwo%5D=four&flag&=x");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
    params: Vec<QueryParam>,
    delimiter: char,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            params: Vec::new(),
            delimiter: DEFAULT_QUERY_DELIMITER,
        }
    }
}

impl Query {
    /// Creates an empty query with the default delimiter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits a raw query (without the leading `?`) on `delimiter`.
    ///
    /// Each item is split on its first `=`. Empty keys and values become
    /// absent; items with neither are dropped. Characters not allowed in a
    /// query are percent-encoded and existing triplets normalized.
    #[must_use]
    pub fn parse(raw: &str, delimiter: char) -> Self {
        let params = raw
            .split(delimiter)
            .filter_map(|item| {
                let (key, value) = item.split_once('=').unwrap_or((item, ""));
                QueryParam::new(encode_part(key, &[]), encode_part(value, &[]))
            })
            .collect();
        Self { params, delimiter }
    }

    /// Returns the pairs in order.
    #[must_use]
    pub fn params(&self) -> &[QueryParam] {
        &self.params
    }

    /// Returns the delimiter.
    #[must_use]
    pub const fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Returns true if there are no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns the number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns the value of the first pair with the given (encoded) key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.key() == Some(key))
            .and_then(QueryParam::value)
    }

    /// Returns an iterator over the pairs.
    pub fn iter(&self) -> impl Iterator<Item = &QueryParam> {
        self.params.iter()
    }

    /// Appends a pair, encoding the delimiter (and `=` in the key).
    pub(crate) fn push(&mut self, key: &str, value: &str) {
        let delimiter = self.delimiter;
        let param = QueryParam::new(
            encode_part(key, &[delimiter, '=']),
            encode_part(value, &[delimiter]),
        );
        self.params.extend(param);
    }

    /// Sorts pairs by key, then value; equal pairs keep their order.
    pub(crate) fn sort(&mut self) {
        self.params.sort();
    }

    /// Joins the pairs with the current delimiter and splits them again on
    /// `delimiter`.
    pub(crate) fn set_delimiter(&mut self, delimiter: char) {
        if delimiter != self.delimiter {
            *self = Self::parse(&self.to_string(), delimiter);
        }
    }
}

fn encode_part(text: &str, reserved: &[char]) -> String {
    let mut out = String::with_capacity(text.len());
    encode_into(&mut out, text, QUERY, reserved);
    out
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", self.delimiter)?;
            }
            write!(f, "{param}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Query {
    type Item = &'a QueryParam;
    type IntoIter = std::slice::Iter<'a, QueryParam>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}
