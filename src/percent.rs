//! Percent-encoding normalization.
//!
//! Percent-encoded octets of unreserved characters are decoded, all other
//! octets keep their encoding with uppercase hex digits (RFC 3986 §6.2.2).

use crate::error::PercentError;
use crate::grammar::{Table, UNRESERVED};

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

const fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        _ => None,
    }
}

/// Decodes two hex digits into an octet.
///
/// # Errors
///
/// Returns [`PercentError`] unless the input is exactly two hex digits.
///
/// # Examples
///
/// ```
/// use uri_idn::percent::decode_octet;
///
/// assert_eq!(decode_octet("7E").unwrap(), b'~');
/// assert_eq!(decode_octet("7e").unwrap(), b'~');
/// assert!(decode_octet("7").is_err());
/// assert!(decode_octet("7G").is_err());
/// ```
pub fn decode_octet(hex: &str) -> Result<u8, PercentError> {
    let mut value = 0;
    for (position, c) in hex.char_indices() {
        if position >= 2 {
            return Err(PercentError::InvalidHexDigit { found: c, position });
        }
        let digit = u8::try_from(c)
            .ok()
            .and_then(hex_value)
            .ok_or(PercentError::InvalidHexDigit { found: c, position })?;
        value = value * 16 + digit;
    }
    if hex.len() < 2 {
        return Err(PercentError::Truncated { position: 0 });
    }
    Ok(value)
}

/// Decodes the triplet whose `%` sits at `idx`.
fn triplet_at(text: &str, idx: usize) -> Result<u8, PercentError> {
    let mut value = 0;
    for offset in 1..=2 {
        let position = idx + offset;
        let Some(c) = text.get(position..).and_then(|rest| rest.chars().next()) else {
            return Err(PercentError::Truncated { position: idx });
        };
        let digit = u8::try_from(c)
            .ok()
            .and_then(hex_value)
            .ok_or(PercentError::InvalidHexDigit { found: c, position })?;
        value = value * 16 + digit;
    }
    Ok(value)
}

fn push_encoded(out: &mut String, octet: u8) {
    out.push('%');
    out.push(char::from(HEX_UPPER[usize::from(octet >> 4)]));
    out.push(char::from(HEX_UPPER[usize::from(octet & 0x0F)]));
}

fn push_octet(out: &mut String, octet: u8, case_sensitive: bool) {
    if UNRESERVED.allows(octet) {
        let c = char::from(octet);
        out.push(if case_sensitive { c } else { c.to_ascii_lowercase() });
    } else {
        push_encoded(out, octet);
    }
}

/// Normalizes every percent-encoded octet of `text`.
///
/// Octets of unreserved characters are replaced by the character itself,
/// others are re-emitted with uppercase hex digits. Without `case_sensitive`
/// the remaining characters are lowercased as well (used for hosts).
///
/// Normalizing an already normalized string returns it unchanged.
///
/// # Errors
///
/// Returns [`PercentError`] on an incomplete or non-hex triplet.
///
/// # Examples
///
/// ```
/// use uri_idn::percent::normalize;
///
/// assert_eq!(normalize("%7euser%2f", true).unwrap(), "~user%2F");
/// assert_eq!(normalize("WWW.%44bp.com", false).unwrap(), "www.dbp.com");
/// assert!(normalize("50%", true).is_err());
/// ```
pub fn normalize(text: &str, case_sensitive: bool) -> Result<String, PercentError> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices();
    while let Some((idx, c)) = chars.next() {
        if c == '%' {
            push_octet(&mut out, triplet_at(text, idx)?, case_sensitive);
            chars.nth(1);
        } else if case_sensitive {
            out.push(c);
        } else {
            out.extend(c.to_lowercase());
        }
    }
    Ok(out)
}

/// Percent-encodes every character of `text` outside `allowed` (as UTF-8
/// octets) and normalizes existing triplets.
///
/// A `%` that does not start a valid triplet is encoded as `%25`.
///
/// # Examples
///
/// ```
/// use uri_idn::grammar::QUERY;
/// use uri_idn::percent::encode;
///
/// assert_eq!(encode("one[two]=ä", QUERY), "one%5Btwo%5D=%C3%A4");
/// assert_eq!(encode("100%", QUERY), "100%25");
/// assert_eq!(encode("%7e%2f", QUERY), "~%2F");
/// ```
#[must_use]
pub fn encode(text: &str, allowed: Table) -> String {
    let mut out = String::with_capacity(text.len());
    encode_into(&mut out, text, allowed, &[]);
    out
}

/// Like [`encode`], additionally encoding the characters in `reserved`.
pub(crate) fn encode_into(out: &mut String, text: &str, allowed: Table, reserved: &[char]) {
    let mut chars = text.char_indices();
    while let Some((idx, c)) = chars.next() {
        if c == '%' {
            if let Ok(octet) = triplet_at(text, idx) {
                push_octet(out, octet, true);
                chars.nth(1);
            } else {
                push_encoded(out, b'%');
            }
        } else if allowed.allows_char(c) && !reserved.contains(&c) {
            out.push(c);
        } else {
            let mut buf = [0; 4];
            for octet in c.encode_utf8(&mut buf).bytes() {
                push_encoded(out, octet);
            }
        }
    }
}

/// Normalizes triplets strictly and encodes characters outside `allowed`.
///
/// # Errors
///
/// Returns [`PercentError`] on an incomplete or non-hex triplet.
pub(crate) fn normalize_strict(text: &str, allowed: Table) -> Result<String, PercentError> {
    let normalized = normalize(text, true)?;
    Ok(encode(&normalized, allowed))
}
