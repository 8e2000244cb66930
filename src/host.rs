//! Host component of an authority.
//!
//! # Grammar Reference
//!
//! ```abnf
//! host        = IP-literal / reg-name
//! IP-literal  = "[" ( IPv6address / IPvFuture ) "]"
//! reg-name    = *( unreserved / pct-encoded / sub-delims )
//! ```
//!
//! Registered names (including dotted IPv4 addresses, which match the
//! `reg-name` rule) are lowercased, percent-normalized and converted to
//! their ASCII form. IP literals are kept verbatim.

use std::fmt;

use crate::error::{SyntaxError, SyntaxErrorKind};
use crate::grammar::{is_valid_ipv6_literal, is_valid_ipvfuture_literal, is_valid_named_host};
use crate::{idn, percent};

/// A non-empty, normalized host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Host {
    /// A registered name in ASCII form (e.g. `www.xn--4ca0bs.com`)
    RegName(String),
    /// A bracketed IPv6 literal (e.g. `[::1]`)
    Ipv6(String),
    /// A bracketed `IPvFuture` literal (e.g. `[v1.fe80::a+en1]`)
    IpvFuture(String),
}

impl Host {
    /// Parses and normalizes a host.
    ///
    /// Returns `Ok(None)` for the empty host.
    ///
    /// # Errors
    ///
    /// Returns `SyntaxError` if:
    /// - A bracketed host is neither an IPv6 nor an `IPvFuture` literal
    /// - A registered name contains a disallowed character
    /// - A percent-encoded octet is malformed
    /// - An internationalized name cannot be converted to ASCII
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_idn::Host;
    ///
    /// let host = Host::parse("WWW.%44bp.com").unwrap().unwrap();
    /// assert_eq!(host.as_str(), "www.dbp.com");
    ///
    /// let host = Host::parse("[::FFFF:1]").unwrap().unwrap();
    /// assert_eq!(host, Host::Ipv6("[::FFFF:1]".to_string()));
    ///
    /// assert!(Host::parse("").unwrap().is_none());
    /// ```
    pub fn parse(input: &str) -> Result<Option<Self>, SyntaxError> {
        if input.is_empty() {
            return Ok(None);
        }

        if input.starts_with('[') {
            return Self::parse_ip_literal(input).map(Some);
        }

        let normalized = percent::normalize(input, false).map_err(|e| {
            SyntaxError::new(input, SyntaxErrorKind::InvalidPercentEncoding(e))
        })?;
        if !is_valid_named_host(input) {
            return Err(SyntaxError::new(
                input,
                SyntaxErrorKind::InvalidHost {
                    reason: "registered name contains a disallowed character",
                },
            ));
        }

        let ascii = idn::try_to_ascii(&normalized)
            .map_err(|e| SyntaxError::new(input, SyntaxErrorKind::InvalidHostname(e)))?;
        if ascii == normalized {
            return Ok(Some(Self::RegName(ascii)));
        }

        // Compatibility mapping may have produced '%' or other delimiters.
        let mapped = percent::normalize(&ascii, false).map_err(|e| {
            SyntaxError::new(input, SyntaxErrorKind::InvalidPercentEncoding(e))
        })?;
        if !is_valid_named_host(&mapped) {
            return Err(SyntaxError::new(
                input,
                SyntaxErrorKind::InvalidHost {
                    reason: "hostname maps to a disallowed character",
                },
            ));
        }
        Ok(Some(Self::RegName(mapped)))
    }

    fn parse_ip_literal(input: &str) -> Result<Self, SyntaxError> {
        if is_valid_ipv6_literal(input) {
            Ok(Self::Ipv6(input.to_string()))
        } else if is_valid_ipvfuture_literal(input) {
            Ok(Self::IpvFuture(input.to_string()))
        } else {
            Err(SyntaxError::new(
                input,
                SyntaxErrorKind::InvalidHost {
                    reason: "malformed IP literal",
                },
            ))
        }
    }

    /// Returns the host as it appears in a URI.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::RegName(s) | Self::Ipv6(s) | Self::IpvFuture(s) => s,
        }
    }

    /// Returns true for IPv6 and `IPvFuture` literals.
    #[must_use]
    pub const fn is_ip_literal(&self) -> bool {
        matches!(self, Self::Ipv6(_) | Self::IpvFuture(_))
    }

    /// Returns the host with `xn--` labels decoded to Unicode.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_idn::Host;
    ///
    /// let host = Host::parse("www.äöü.com").unwrap().unwrap();
    /// assert_eq!(host.as_str(), "www.xn--4ca0bs.com");
    /// assert_eq!(host.to_unicode(), "www.äöü.com");
    /// ```
    #[must_use]
    pub fn to_unicode(&self) -> String {
        match self {
            Self::RegName(name) => idn::to_unicode(name),
            Self::Ipv6(s) | Self::IpvFuture(s) => s.clone(),
        }
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Host {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Host {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Host {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s)
            .map_err(serde::de::Error::custom)?
            .ok_or_else(|| serde::de::Error::custom("host cannot be empty"))
    }
}
