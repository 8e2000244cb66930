//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use uri_idn::prelude::*;
//!
//! let uri = Uri::parse("http://example.com/a").unwrap();
//! assert_eq!(uri.host().map(Host::as_str), Some("example.com"));
//! ```
//!
//! Builder state markers (`Relative`, `Absolute`) are left out.

pub use crate::{
    // Core types
    Authority, Host, Query, QueryParam, Uri,
    // Builder
    UriBuilder,
    // Errors
    PercentError, PunycodeError, SyntaxError, SyntaxErrorKind,
    // Constants
    ACE_PREFIX, DEFAULT_QUERY_DELIMITER, default_port,
};
