//! Authority component: user information, host and port.
//!
//! # Grammar Reference
//!
//! ```abnf
//! authority = [ userinfo "@" ] host [ ":" port ]
//! userinfo  = username [ ":" userpass ]
//! port      = *DIGIT
//! ```
//!
//! `userinfo` may hold at most one `:`. An empty port is the same as no
//! port.

use std::fmt;

use crate::constants::default_port;
use crate::error::{SyntaxError, SyntaxErrorKind};
use crate::grammar::{is_valid_port, is_valid_user_info};
use crate::host::Host;
use crate::percent;

/// A parsed authority.
///
/// All parts are optional; an authority with no parts is empty and is not
/// serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Authority {
    username: Option<String>,
    userpass: Option<String>,
    host: Option<Host>,
    port: Option<u16>,
}

impl Authority {
    /// Parses an authority (the text between `//` and the path).
    ///
    /// # Errors
    ///
    /// Returns `SyntaxError` if:
    /// - `@` is present but the user information is empty
    /// - The user information has more than one `:` or a disallowed character
    /// - The host is invalid (see [`Host::parse`])
    /// - The port is not a number in `1..=65535`
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_idn::Authority;
    ///
    /// let authority = Authority::parse("user:pass@Example.com:8080").unwrap();
    /// assert_eq!(authority.username(), Some("user"));
    /// assert_eq!(authority.userpass(), Some("pass"));
    /// assert_eq!(authority.host().unwrap().as_str(), "example.com");
    /// assert_eq!(authority.port(), Some(8080));
    ///
    /// assert!(Authority::parse("@example.com").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, SyntaxError> {
        let (user_info, host_port) = match input.rfind('@') {
            Some(at) => (Some(&input[..at]), &input[at + 1..]),
            None => (None, input),
        };

        let (username, userpass) = match user_info {
            Some(user_info) => parse_user_info(user_info)?,
            None => (None, None),
        };

        let (host, port) = split_host_port(host_port)?;

        Ok(Self {
            username,
            userpass,
            host: Host::parse(host)?,
            port: parse_port(port)?,
        })
    }

    /// Returns the user name.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Returns the password.
    #[must_use]
    pub fn userpass(&self) -> Option<&str> {
        self.userpass.as_deref()
    }

    /// Returns the host.
    #[must_use]
    pub const fn host(&self) -> Option<&Host> {
        self.host.as_ref()
    }

    /// Returns the port.
    #[must_use]
    pub const fn port(&self) -> Option<u16> {
        self.port
    }

    /// Returns `username[:userpass]`, or `None` when both are absent.
    #[must_use]
    pub fn user_info(&self) -> Option<String> {
        match (&self.username, &self.userpass) {
            (None, None) => None,
            (user, pass) => {
                let mut out = user.clone().unwrap_or_default();
                if let Some(pass) = pass {
                    out.push(':');
                    out.push_str(pass);
                }
                Some(out)
            }
        }
    }

    /// Returns true if no part is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.userpass.is_none()
            && self.host.is_none()
            && self.port.is_none()
    }

    pub(crate) fn set_user_info(&mut self, username: Option<String>, userpass: Option<String>) {
        self.username = username;
        self.userpass = userpass;
    }

    pub(crate) fn set_host(&mut self, host: Option<Host>) {
        self.host = host;
    }

    pub(crate) fn set_port(&mut self, port: Option<u16>) {
        self.port = port;
    }

    /// Serializes the authority, omitting the port when it is the default
    /// port of `scheme`.
    pub(crate) fn serialize(&self, scheme: Option<&str>) -> String {
        let mut out = String::new();
        if let Some(user_info) = self.user_info() {
            out.push_str(&user_info);
            out.push('@');
        }
        if let Some(host) = &self.host {
            out.push_str(host.as_str());
        }
        if let Some(port) = self.port {
            if scheme.and_then(default_port) != Some(port) {
                out.push(':');
                out.push_str(&port.to_string());
            }
        }
        out
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize(None))
    }
}

/// Splits `host[:port]`, honoring brackets around IP literals.
fn split_host_port(input: &str) -> Result<(&str, &str), SyntaxError> {
    if input.starts_with('[') {
        let Some(close) = input.find(']') else {
            return Err(SyntaxError::new(
                input,
                SyntaxErrorKind::InvalidHost {
                    reason: "missing closing bracket for IP literal",
                },
            ));
        };
        let rest = &input[close + 1..];
        return match rest.strip_prefix(':') {
            Some(port) => Ok((&input[..=close], port)),
            None if rest.is_empty() => Ok((input, "")),
            None => Err(SyntaxError::new(
                input,
                SyntaxErrorKind::InvalidPort {
                    reason: "expected ':' after IP literal",
                },
            )),
        };
    }

    Ok(input.rsplit_once(':').unwrap_or((input, "")))
}

/// Splits and validates `username[:userpass]` found before an `@`.
fn parse_user_info(input: &str) -> Result<(Option<String>, Option<String>), SyntaxError> {
    let (username, userpass) = match input.split_once(':') {
        Some((user, pass)) => (user, Some(pass)),
        None => (input, None),
    };

    if userpass.is_some_and(|pass| pass.contains(':')) {
        return Err(SyntaxError::new(
            input,
            SyntaxErrorKind::InvalidUserInfo {
                reason: "more than one ':'",
            },
        ));
    }

    let username = normalize_user_part(username)?;
    let userpass = userpass.map(normalize_user_part).transpose()?.flatten();

    if username.is_none() && userpass.is_none() {
        return Err(SyntaxError::new(
            input,
            SyntaxErrorKind::InvalidUserInfo {
                reason: "empty user information before '@'",
            },
        ));
    }

    Ok((username, userpass))
}

/// Validates and percent-normalizes one user information part.
///
/// Empty parts become `None`. A `:` is rejected since it would be read back
/// as the username/password separator.
pub(crate) fn normalize_user_part(input: &str) -> Result<Option<String>, SyntaxError> {
    if input.is_empty() {
        return Ok(None);
    }
    if input.contains(':') {
        return Err(SyntaxError::new(
            input,
            SyntaxErrorKind::InvalidUserInfo {
                reason: "':' must be percent-encoded",
            },
        ));
    }
    if !is_valid_user_info(input) {
        let kind = match percent::normalize(input, true) {
            Err(e) => SyntaxErrorKind::InvalidPercentEncoding(e),
            Ok(_) => SyntaxErrorKind::InvalidUserInfo {
                reason: "disallowed character",
            },
        };
        return Err(SyntaxError::new(input, kind));
    }
    percent::normalize(input, true)
        .map(Some)
        .map_err(|e| SyntaxError::new(input, SyntaxErrorKind::InvalidPercentEncoding(e)))
}

/// Parses a port; the empty port is `None`.
pub(crate) fn parse_port(input: &str) -> Result<Option<u16>, SyntaxError> {
    if input.is_empty() {
        return Ok(None);
    }
    if is_valid_port(input) {
        return input.parse().map(Some).map_err(|_| port_error(input, "out of range"));
    }

    let reason = if !input.bytes().all(|b| b.is_ascii_digit()) {
        "must be decimal digits"
    } else if input.bytes().all(|b| b == b'0') {
        "must be at least 1"
    } else {
        "must not exceed 65535"
    };
    Err(port_error(input, reason))
}

fn port_error(input: &str, reason: &'static str) -> SyntaxError {
    SyntaxError::new(input, SyntaxErrorKind::InvalidPort { reason })
}
