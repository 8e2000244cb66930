//! Constants for URI and IDN processing.

/// Query delimiter used until [`Uri::with_query_delimiter`](crate::Uri::with_query_delimiter)
/// selects another one.
pub const DEFAULT_QUERY_DELIMITER: char = '&';

/// Prefix marking an ASCII-compatible encoded (ACE) label.
pub const ACE_PREFIX: &str = "xn--";

/// Characters that separate labels of an internationalized hostname.
///
/// Besides the full stop these are the ideographic full stop (U+3002),
/// the fullwidth full stop (U+FF0E) and the halfwidth ideographic full
/// stop (U+FF61).
pub const LABEL_SEPARATORS: [char; 4] = ['.', '\u{3002}', '\u{FF0E}', '\u{FF61}'];

/// Maximum number of code points in a label handed to the Punycode codec.
pub const MAX_LABEL_LENGTH: usize = 256;

/// Maximum length of a Punycode (ACE) label.
pub const MAX_ACE_LENGTH: usize = 256;

/// Smallest valid port number.
pub const MIN_PORT: u16 = 1;

/// Well-known ports, omitted from a serialized authority when they match
/// the URI's scheme. Sorted by scheme.
pub const DEFAULT_PORTS: &[(&str, u16)] = &[
    ("acap", 674),
    ("dict", 2628),
    ("ftp", 21),
    ("go", 1096),
    ("gopher", 70),
    ("http", 80),
    ("https", 443),
    ("icap", 1344),
    ("ldap", 389),
    ("mupdate", 3905),
    ("nntp", 119),
    ("nntps", 563),
    ("prospero", 1525),
    ("rsync", 873),
    ("rtsp", 554),
    ("snmp", 161),
    ("telnet", 23),
    ("vemmi", 575),
    ("wais", 210),
    ("ws", 80),
    ("wss", 443),
];

/// Returns the well-known port of a (lowercase) scheme.
///
/// # Examples
///
/// ```
/// use uri_idn::default_port;
///
/// assert_eq!(default_port("https"), Some(443));
/// assert_eq!(default_port("gopher"), Some(70));
/// assert_eq!(default_port("mailto"), None);
/// ```
#[must_use]
pub fn default_port(scheme: &str) -> Option<u16> {
    DEFAULT_PORTS
        .binary_search_by(|(name, _)| (*name).cmp(scheme))
        .ok()
        .map(|idx| DEFAULT_PORTS[idx].1)
}
