//! Internationalized hostnames.
//!
//! Converts between Unicode hostnames and their ASCII-compatible encoding
//! (`xn--` labels), one label at a time.

use unicode_normalization::UnicodeNormalization;

use crate::constants::{ACE_PREFIX, LABEL_SEPARATORS};
use crate::error::PunycodeError;
use crate::punycode;

/// Lowercases and NFKC-normalizes a label.
fn map_label(label: &str) -> String {
    label.nfkc().flat_map(char::to_lowercase).collect()
}

/// Converts a hostname to its ASCII form, reporting Punycode failures.
///
/// A pure-ASCII hostname is returned unchanged. Otherwise the hostname is
/// split on [`LABEL_SEPARATORS`], every label is lowercased and
/// NFKC-normalized (and split again where that produced a `.`), and each
/// label that is still non-ASCII is replaced by [`ACE_PREFIX`] followed by
/// its Punycode encoding.
///
/// Mapping may produce ASCII characters that are not allowed in a host,
/// such as `/` from a fullwidth solidus; callers that need a valid URI host
/// must check the result.
///
/// # Errors
///
/// Returns [`PunycodeError`] if a label cannot be encoded.
///
/// # Examples
///
/// ```
/// use uri_idn::idn::try_to_ascii;
///
/// assert_eq!(try_to_ascii("www.äöü.com").unwrap(), "www.xn--4ca0bs.com");
/// assert_eq!(try_to_ascii("Example.COM").unwrap(), "Example.COM");
/// ```
pub fn try_to_ascii(hostname: &str) -> Result<String, PunycodeError> {
    if hostname.is_ascii() {
        return Ok(hostname.to_string());
    }

    // Mapping can turn compatibility full stops (U+FE52) into '.'.
    let mapped: Vec<String> = hostname.split(LABEL_SEPARATORS).map(map_label).collect();
    let labels = mapped
        .iter()
        .flat_map(|label| label.split('.'))
        .map(|label| {
            if label.is_ascii() {
                Ok(label.to_string())
            } else {
                punycode::encode(label).map(|encoded| format!("{ACE_PREFIX}{encoded}"))
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(labels.join("."))
}

/// Converts a hostname to its ASCII form.
///
/// Same as [`try_to_ascii`], returning the input unchanged if a label
/// cannot be encoded.
///
/// # Examples
///
/// ```
/// use uri_idn::idn::to_ascii;
///
/// assert_eq!(to_ascii("www.詹姆斯.com"), "www.xn--8ws00zhy3a.com");
/// ```
#[must_use]
pub fn to_ascii(hostname: &str) -> String {
    try_to_ascii(hostname).unwrap_or_else(|_| hostname.to_string())
}

/// Converts a hostname to its Unicode form.
///
/// Labels starting with `xn--` (in any ASCII case) are Punycode-decoded;
/// others are kept as they are. If any label fails to decode the original
/// input is returned.
///
/// # Examples
///
/// ```
/// use uri_idn::idn::to_unicode;
///
/// assert_eq!(to_unicode("www.xn--4ca0bs.com"), "www.äöü.com");
/// assert_eq!(to_unicode("xn--bad!.com"), "xn--bad!.com");
/// ```
#[must_use]
pub fn to_unicode(hostname: &str) -> String {
    let labels: Result<Vec<String>, PunycodeError> = hostname
        .split('.')
        .map(|label| match strip_ace_prefix(label) {
            Some(encoded) => punycode::decode(encoded),
            None => Ok(label.to_string()),
        })
        .collect();

    labels.map_or_else(|_| hostname.to_string(), |labels| labels.join("."))
}

fn strip_ace_prefix(label: &str) -> Option<&str> {
    let prefix = label.get(..ACE_PREFIX.len())?;
    prefix
        .eq_ignore_ascii_case(ACE_PREFIX)
        .then(|| &label[ACE_PREFIX.len()..])
}
