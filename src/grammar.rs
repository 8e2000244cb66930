//! Character classes and component predicates from RFC 3986.
//!
//! # Grammar Reference
//!
//! ```abnf
//! unreserved  = ALPHA / DIGIT / "-" / "." / "_" / "~"
//! sub-delims  = "!" / "$" / "&" / "'" / "(" / ")" / "*" / "+" / "," / ";" / "="
//! pchar       = unreserved / pct-encoded / sub-delims / ":" / "@"
//! scheme      = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
//! userinfo    = *( unreserved / pct-encoded / sub-delims / ":" )
//! reg-name    = *( unreserved / pct-encoded / sub-delims )
//! IP-literal  = "[" ( IPv6address / IPvFuture ) "]"
//! IPvFuture   = "v" 1*HEXDIG "." 1*( unreserved / sub-delims / ":" )
//! ```
//!
//! Registered names additionally accept non-ASCII characters, which are
//! later converted by the IDN processor.
//!
//! The tables are built at compile time and are read-only.

use std::net::Ipv6Addr;

/// A set of ASCII characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Table(u128);

impl Table {
    /// Creates a table allowing exactly the given ASCII bytes.
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a constant) if any byte is not ASCII.
    #[must_use]
    pub const fn new(mut bytes: &[u8]) -> Self {
        let mut table = 0u128;
        while let [cur, rem @ ..] = bytes {
            assert!(cur.is_ascii(), "tables only hold ASCII bytes");
            table |= 1u128 << *cur;
            bytes = rem;
        }
        Self(table)
    }

    /// Returns a table allowing everything allowed by `self` or `other`.
    #[must_use]
    pub const fn or(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns true if the byte is in the table.
    #[must_use]
    pub const fn allows(self, byte: u8) -> bool {
        byte.is_ascii() && self.0 & (1u128 << byte) != 0
    }

    /// Returns true if the character is in the table.
    #[must_use]
    pub const fn allows_char(self, c: char) -> bool {
        c.is_ascii() && self.allows(c as u8)
    }
}

/// `ALPHA`
pub const ALPHA: Table = Table::new(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz");
/// `DIGIT`
pub const DIGIT: Table = Table::new(b"0123456789");
/// `HEXDIG`
pub const HEXDIG: Table = DIGIT.or(Table::new(b"ABCDEFabcdef"));
/// `unreserved`
pub const UNRESERVED: Table = ALPHA.or(DIGIT).or(Table::new(b"-._~"));
/// `sub-delims`
pub const SUB_DELIMS: Table = Table::new(b"!$&'()*+,;=");
/// Characters after the first one of a scheme.
pub const SCHEME: Table = ALPHA.or(DIGIT).or(Table::new(b"+-."));
/// Unencoded characters of `userinfo`.
pub const USERINFO: Table = UNRESERVED.or(SUB_DELIMS).or(Table::new(b":"));
/// Unencoded characters of `reg-name`.
pub const REG_NAME: Table = UNRESERVED.or(SUB_DELIMS);
/// Unencoded characters of `pchar`.
pub const PCHAR: Table = UNRESERVED.or(SUB_DELIMS).or(Table::new(b":@"));
/// Unencoded characters of a path.
pub const PATH: Table = PCHAR.or(Table::new(b"/"));
/// Unencoded characters of a query.
pub const QUERY: Table = PCHAR.or(Table::new(b"/?"));
/// Unencoded characters of a fragment.
pub const FRAGMENT: Table = QUERY;
/// Characters inside the brackets of an IPv6 literal.
pub const IPV6: Table = HEXDIG.or(Table::new(b":."));
/// Characters after the dot of an `IPvFuture` literal.
pub const IPV_FUTURE: Table = UNRESERVED.or(SUB_DELIMS).or(Table::new(b":"));

/// Returns true if a valid `pct-encoded` triplet starts at `idx`.
pub(crate) fn is_pct_encoded_at(bytes: &[u8], idx: usize) -> bool {
    bytes.get(idx) == Some(&b'%')
        && bytes.get(idx + 1).is_some_and(|b| HEXDIG.allows(*b))
        && bytes.get(idx + 2).is_some_and(|b| HEXDIG.allows(*b))
}

/// Checks that every character is in `table` or part of a percent-encoded
/// triplet; non-ASCII characters pass when `allow_non_ascii` is set.
fn matches_encoded(input: &str, table: Table, allow_non_ascii: bool) -> bool {
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'%' {
            if !is_pct_encoded_at(bytes, i) {
                return false;
            }
            i += 3;
        } else if table.allows(b) || (allow_non_ascii && !b.is_ascii()) {
            i += 1;
        } else {
            return false;
        }
    }
    true
}

/// Returns true if the input is a valid scheme.
///
/// # Examples
///
/// ```
/// use uri_idn::grammar::is_valid_scheme;
///
/// assert!(is_valid_scheme("t.a+b-c"));
/// assert!(!is_valid_scheme("1http"));
/// assert!(!is_valid_scheme("+http"));
/// ```
#[must_use]
pub fn is_valid_scheme(input: &str) -> bool {
    match input.as_bytes() {
        [first, rest @ ..] => ALPHA.allows(*first) && rest.iter().all(|b| SCHEME.allows(*b)),
        [] => false,
    }
}

/// Returns true if the input is valid user information.
#[must_use]
pub fn is_valid_user_info(input: &str) -> bool {
    matches_encoded(input, USERINFO, false)
}

/// Returns true if the input is a valid registered name.
///
/// The empty string is a valid (empty) registered name.
#[must_use]
pub fn is_valid_named_host(input: &str) -> bool {
    matches_encoded(input, REG_NAME, true)
}

/// Returns true if the input is a bracketed IPv6 literal such as `[::1]`.
#[must_use]
pub fn is_valid_ipv6_literal(input: &str) -> bool {
    let Some(inner) = input.strip_prefix('[').and_then(|s| s.strip_suffix(']')) else {
        return false;
    };
    !inner.is_empty()
        && inner.bytes().all(|b| IPV6.allows(b))
        && inner.parse::<Ipv6Addr>().is_ok()
}

/// Returns true if the input is a bracketed `IPvFuture` literal such as `[v1.fe80::a+en1]`.
#[must_use]
pub fn is_valid_ipvfuture_literal(input: &str) -> bool {
    let Some(inner) = input.strip_prefix('[').and_then(|s| s.strip_suffix(']')) else {
        return false;
    };
    let Some(rest) = inner.strip_prefix(['v', 'V']) else {
        return false;
    };
    let Some((version, address)) = rest.split_once('.') else {
        return false;
    };
    !version.is_empty()
        && version.bytes().all(|b| HEXDIG.allows(b))
        && !address.is_empty()
        && address.bytes().all(|b| IPV_FUTURE.allows(b))
}

/// Returns true if the input is a valid host of any kind (or empty).
#[must_use]
pub fn is_valid_host(input: &str) -> bool {
    is_valid_named_host(input) || is_valid_ipv6_literal(input) || is_valid_ipvfuture_literal(input)
}

/// Returns true if `c` can separate query pairs.
///
/// The delimiter must be a query character other than `=`, so the joined
/// query reads back as the same query.
#[must_use]
pub fn is_valid_query_delimiter(c: char) -> bool {
    c != '=' && QUERY.allows_char(c)
}

/// Returns true if the input is a decimal port number in `1..=65535`.
#[must_use]
pub fn is_valid_port(input: &str) -> bool {
    !input.is_empty()
        && input.bytes().all(|b| b.is_ascii_digit())
        && input.parse::<u16>().is_ok_and(|port| port >= crate::constants::MIN_PORT)
}
