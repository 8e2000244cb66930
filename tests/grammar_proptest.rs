//! Property-based tests validating the parser against the ABNF grammar.
//!
//! These tests generate random grammar-conformant inputs and check that the
//! parser accepts them and that normalization is stable.

use proptest::prelude::*;

use uri_idn::path::remove_dot_segments;
use uri_idn::{Uri, default_port, idn, percent, punycode};

/// Strategies for generating valid grammar-conformant inputs.
mod strategies {
    use super::*;

    /// Valid alphanumeric characters for DNS labels
    const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

    /// Lowercase, NFKC-stable non-ASCII letters
    const UNICODE_LETTERS: &[char] = &[
        'ä', 'ö', 'ü', 'ß', 'é', 'ñ', 'ø', 'å', '詹', '姆', '斯', '点', '心', 'и', 'д', 'ж',
    ];

    /// Schemes with a default port
    const KNOWN_SCHEMES: &[&str] = &["ftp", "http", "https", "ldap", "ws", "wss", "gopher"];

    /// Generate a valid scheme in any letter case
    pub fn scheme() -> impl Strategy<Value = String> {
        "[a-zA-Z][a-zA-Z0-9+.-]{0,8}"
    }

    /// Generate an ASCII DNS label (1-12 chars)
    pub fn dns_label() -> impl Strategy<Value = String> {
        prop::collection::vec(prop::sample::select(ALPHANUMERIC.to_vec()), 1..=12)
            .prop_map(|chars| chars.into_iter().map(char::from).collect())
    }

    /// Generate a label mixing ASCII and non-ASCII letters
    pub fn unicode_label() -> impl Strategy<Value = String> {
        let c = prop_oneof![
            prop::sample::select(ALPHANUMERIC.to_vec()).prop_map(char::from),
            prop::sample::select(UNICODE_LETTERS.to_vec()),
        ];
        prop::collection::vec(c, 1..=12).prop_map(|chars| chars.into_iter().collect())
    }

    /// Generate a domain name of 1-4 labels
    pub fn domain() -> impl Strategy<Value = String> {
        prop::collection::vec(dns_label(), 1..=4).prop_map(|labels| labels.join("."))
    }

    /// Generate an internationalized hostname
    pub fn unicode_domain() -> impl Strategy<Value = String> {
        prop::collection::vec(unicode_label(), 1..=3).prop_map(|labels| labels.join("."))
    }

    /// Generate a bracketed IPv6 address (full form)
    pub fn ipv6() -> impl Strategy<Value = String> {
        prop::collection::vec(0u16..=0xffff, 8).prop_map(|groups| {
            let text = groups
                .iter()
                .map(|g| format!("{g:x}"))
                .collect::<Vec<_>>()
                .join(":");
            format!("[{text}]")
        })
    }

    /// Generate a host of any kind
    pub fn host() -> impl Strategy<Value = String> {
        prop_oneof![
            6 => domain(),
            3 => unicode_domain(),
            1 => ipv6(),
        ]
    }

    /// Generate `host[:port]`
    pub fn authority() -> impl Strategy<Value = String> {
        (
            prop::option::of("[a-z0-9]{1,6}"),
            host(),
            prop::option::of(1u16..=65535),
        )
            .prop_map(|(user, host, port)| {
                let mut out = String::new();
                if let Some(user) = user {
                    out.push_str(&user);
                    out.push('@');
                }
                out.push_str(&host);
                if let Some(port) = port {
                    out.push_str(&format!(":{port}"));
                }
                out
            })
    }

    /// Generate a path segment, dot segments included
    pub fn segment() -> impl Strategy<Value = String> {
        prop_oneof![
            6 => "[a-zA-Z0-9._~!$&'()*+,;=:@-]{0,8}",
            1 => Just(".".to_string()),
            1 => Just("..".to_string()),
            1 => "%[0-9a-fA-F]{2}",
        ]
    }

    /// Generate an absolute path
    pub fn path() -> impl Strategy<Value = String> {
        prop::collection::vec(segment(), 0..=6).prop_map(|segments| {
            segments.iter().fold(String::new(), |mut acc, s| {
                acc.push('/');
                acc.push_str(s);
                acc
            })
        })
    }

    /// Generate a query string of `key=value` pairs
    pub fn query() -> impl Strategy<Value = String> {
        prop::collection::vec(("[a-z]{1,5}", "[a-zA-Z0-9]{0,5}"), 1..=4).prop_map(|pairs| {
            pairs
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("&")
        })
    }

    /// Generate a valid absolute URI with authority
    pub fn absolute_uri() -> impl Strategy<Value = String> {
        (
            scheme(),
            authority(),
            path(),
            prop::option::of(query()),
            prop::option::of("[a-z0-9/?]{1,8}"),
        )
            .prop_map(|(scheme, authority, path, query, fragment)| {
                let mut uri = format!("{scheme}://{authority}{path}");
                if let Some(q) = query {
                    uri.push('?');
                    uri.push_str(&q);
                }
                if let Some(f) = fragment {
                    uri.push('#');
                    uri.push_str(&f);
                }
                uri
            })
    }

    /// Generate a scheme with a default port
    pub fn known_scheme() -> impl Strategy<Value = &'static str> {
        prop::sample::select(KNOWN_SCHEMES.to_vec())
    }
}

mod path_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        #[test]
        fn remove_dot_segments_is_idempotent(p in "[a-z./]{0,30}") {
            let once = remove_dot_segments(&p);
            prop_assert_eq!(remove_dot_segments(&once), once);
        }

        #[test]
        fn remove_dot_segments_leaves_no_dot_segments(p in strategies::path()) {
            let normalized = remove_dot_segments(&p);
            prop_assert!(
                !normalized.split('/').any(|s| s == "." || s == ".."),
                "dot segment left in {}", normalized
            );
        }
    }
}

mod percent_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        #[test]
        fn normalize_is_idempotent(
            s in "(%[0-9a-fA-F]{2}|[a-zA-Z0-9._~!$&'()*+,;=:@/-]){0,20}",
            case_sensitive in any::<bool>(),
        ) {
            let once = percent::normalize(&s, case_sensitive).unwrap();
            prop_assert_eq!(percent::normalize(&once, case_sensitive).unwrap(), once);
        }
    }
}

mod punycode_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        #[test]
        fn decode_inverts_encode(chars in prop::collection::vec(any::<char>(), 0..24)) {
            let label: String = chars.into_iter().collect();
            let encoded = punycode::encode(&label).unwrap();
            prop_assert!(encoded.is_ascii());
            prop_assert_eq!(punycode::decode(&encoded).unwrap(), label);
        }

        #[test]
        fn decode_never_panics(s in "[a-zA-Z0-9-]{0,40}") {
            let _ = punycode::decode(&s);
        }
    }
}

mod idn_tests {
    use super::strategies::*;
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn to_unicode_inverts_to_ascii(hostname in unicode_domain()) {
            let ascii = idn::to_ascii(&hostname);
            prop_assert!(ascii.is_ascii());
            prop_assert_eq!(idn::to_unicode(&ascii), hostname);
        }
    }
}

mod full_uri_tests {
    use super::strategies::*;
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn valid_uris_parse(uri in absolute_uri()) {
            let result = Uri::parse(&uri);
            prop_assert!(result.is_ok(), "Failed to parse URI: {}", uri);
        }

        #[test]
        fn roundtrip_parse_serialize(uri in absolute_uri()) {
            let parsed = Uri::parse(&uri).unwrap();
            let serialized = parsed.to_ascii().unwrap();
            prop_assert!(serialized.is_ascii());

            let reparsed = Uri::parse(&serialized).unwrap();
            prop_assert_eq!(parsed.scheme(), reparsed.scheme());
            prop_assert_eq!(parsed.host(), reparsed.host());
            prop_assert_eq!(parsed.path(), reparsed.path());
            prop_assert_eq!(parsed.query(), reparsed.query());
            prop_assert_eq!(parsed.fragment(), reparsed.fragment());
            prop_assert_eq!(reparsed.to_ascii().unwrap(), serialized);
        }

        #[test]
        fn default_port_is_omitted(
            scheme in known_scheme(),
            host in domain(),
            path in "(/[a-z]{0,5}){0,3}",
        ) {
            let port = default_port(scheme).unwrap();
            let uri = Uri::parse(&format!("{scheme}://{host}:{port}{path}")).unwrap();
            let serialized = uri.to_ascii().unwrap();
            prop_assert!(!serialized.contains(&format!(":{port}")), "{}", serialized);
            prop_assert_eq!(uri.inferred_port(), Some(port));
        }

        #[test]
        fn join_produces_normalized_absolute_uri(
            base in absolute_uri(),
            reference in "(\\.\\./|\\./|[a-z]{1,3}/){0,5}[a-z]{0,3}",
        ) {
            let base = Uri::parse(&base).unwrap();
            let joined = base.join_str(&reference).unwrap();
            prop_assert!(joined.is_absolute());
            prop_assert_eq!(remove_dot_segments(joined.path()), joined.path());
        }
    }
}
