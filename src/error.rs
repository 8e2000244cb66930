//! Error types for URI parsing, percent-decoding and Punycode transcoding.

use std::fmt;

/// Error returned when a URI, or one of its components, violates the grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// The offending input (the whole URI or the rejected component)
    pub input: String,
    /// The specific error that occurred
    pub kind: SyntaxErrorKind,
}

impl SyntaxError {
    pub(crate) fn new(input: impl Into<String>, kind: SyntaxErrorKind) -> Self {
        Self {
            input: input.into(),
            kind,
        }
    }
}

/// Specific syntax error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// A character that can never appear in a URI
    UnexpectedChar {
        /// The unexpected character
        char: char,
        /// Position in the input
        position: usize,
    },
    /// Scheme does not match `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
    InvalidScheme,
    /// User information is malformed
    InvalidUserInfo {
        /// Reason for invalidity
        reason: &'static str,
    },
    /// Host is malformed
    InvalidHost {
        /// Reason for invalidity
        reason: &'static str,
    },
    /// Port is not a number in `1..=65535`
    InvalidPort {
        /// Reason for invalidity
        reason: &'static str,
    },
    /// A percent-encoded octet is malformed
    InvalidPercentEncoding(PercentError),
    /// An internationalized hostname could not be converted to ASCII
    InvalidHostname(PunycodeError),
    /// Missing required component
    MissingComponent {
        /// Name of the missing component
        component: &'static str,
    },
    /// Authority present but no scheme
    AuthorityWithoutScheme,
    /// Password present but no user name
    UserpassWithoutUsername,
    /// Path starts with `//` but there is no authority to disambiguate it
    AmbiguousPath,
    /// Query delimiter is `=` or not a query character
    InvalidQueryDelimiter {
        /// The rejected delimiter
        delimiter: char,
    },
    /// Reference resolution needs a base with a scheme
    RelativeBase,
    /// Request targets are only meaningful for HTTP URIs
    NotHttp {
        /// The scheme that was found
        scheme: String,
    },
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid URI '{}': {}", self.input, self.kind)
    }
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedChar { char, position } => {
                write!(f, "unexpected character {char:?} at position {position}")
            }
            Self::InvalidScheme => write!(
                f,
                "scheme must start with a letter followed by letters, digits, '+', '-' or '.'"
            ),
            Self::InvalidUserInfo { reason } => write!(f, "invalid user info: {reason}"),
            Self::InvalidHost { reason } => write!(f, "invalid host: {reason}"),
            Self::InvalidPort { reason } => write!(f, "invalid port: {reason}"),
            Self::InvalidPercentEncoding(e) => write!(f, "invalid percent encoding: {e}"),
            Self::InvalidHostname(e) => write!(f, "cannot convert hostname to ASCII: {e}"),
            Self::MissingComponent { component } => {
                write!(f, "missing required component: {component}")
            }
            Self::AuthorityWithoutScheme => write!(f, "authority given but no scheme"),
            Self::UserpassWithoutUsername => write!(f, "password given but no user name"),
            Self::AmbiguousPath => {
                write!(f, "path must not start with '//' when there is no authority")
            }
            Self::InvalidQueryDelimiter { delimiter } => {
                write!(f, "{delimiter:?} cannot delimit query pairs")
            }
            Self::RelativeBase => write!(f, "base URI for resolution must have a scheme"),
            Self::NotHttp { scheme } => {
                write!(f, "cannot set a request target on a '{scheme}' URI")
            }
        }
    }
}

impl std::error::Error for SyntaxError {}

/// Errors for malformed percent-encoded octets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PercentError {
    /// `%` is not followed by two characters
    Truncated {
        /// Position of the `%`
        position: usize,
    },
    /// `%` is followed by something other than two hex digits
    InvalidHexDigit {
        /// The offending character
        found: char,
        /// Position of the offending character
        position: usize,
    },
}

impl fmt::Display for PercentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated { position } => {
                write!(f, "incomplete percent-encoded octet at position {position}")
            }
            Self::InvalidHexDigit { found, position } => {
                write!(f, "expected hex digit, found {found:?} at position {position}")
            }
        }
    }
}

impl std::error::Error for PercentError {}

/// Errors for Punycode encoding and decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PunycodeError {
    /// Arithmetic exceeded the 32-bit signed integer range
    Overflow,
    /// Input is not valid Punycode
    MalformedInput {
        /// Reason for invalidity
        reason: &'static str,
    },
    /// Label exceeds the maximum length
    LengthExceeded {
        /// Maximum allowed length
        max: usize,
        /// Actual length
        actual: usize,
    },
    /// Encoder produced a non-ASCII character
    InvalidOutput {
        /// The offending character
        char: char,
    },
}

impl fmt::Display for PunycodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overflow => write!(f, "input needs a wider integer range (overflow)"),
            Self::MalformedInput { reason } => write!(f, "malformed input: {reason}"),
            Self::LengthExceeded { max, actual } => {
                write!(f, "label length {actual} exceeds maximum {max}")
            }
            Self::InvalidOutput { char } => {
                write!(f, "encoder produced non-ASCII character {char:?}")
            }
        }
    }
}

impl std::error::Error for PunycodeError {}
