//! Typestate builder for constructing [`Uri`] instances.
//!
//! The builder tracks with a phantom type whether a scheme has been set.
//! Authority components can only be added once it has, so an authority
//! without a scheme cannot be built.

use std::marker::PhantomData;

use crate::error::SyntaxError;
use crate::uri::Uri;

/// Marker: no scheme set, the result is a relative reference.
#[derive(Debug, Clone, Copy, Default)]
pub struct Relative;

/// Marker: scheme set, authority components may be added.
#[derive(Debug, Clone, Copy, Default)]
pub struct Absolute;

/// A typestate builder for constructing [`Uri`] instances.
///
/// Every setter validates and normalizes its component the same way the
/// corresponding [`Uri`] mutator does. [`build`](Self::build) runs the
/// consistency checks of [`Uri::to_ascii`].
///
/// # Type State
///
/// - [`Relative`]: initial state; path, query and fragment may be set
/// - [`Absolute`]: scheme set; host, port, user information and authority
///   may be set as well
///
/// # Examples
///
/// ```
/// use uri_idn::UriBuilder;
///
/// let uri = UriBuilder::new()
///     .scheme("https")?
///     .host("www.äöü.com")?
///     .port(8443)?
///     .path("/a/../b")?
///     .param("q", "1")
///     .fragment("top")
///     .build()?;
///
/// assert_eq!(uri.to_string(), "https://www.xn--4ca0bs.com:8443/b?q=1#top");
/// # Ok::<(), uri_idn::SyntaxError>(())
/// ```
///
/// # Compile-Time Safety
///
/// ```compile_fail
/// use uri_idn::UriBuilder;
///
/// // Error: host() requires a scheme first
/// let builder = UriBuilder::new().host("example.com");
/// ```
#[derive(Debug, Clone)]
pub struct UriBuilder<State = Relative> {
    uri: Uri,
    _state: PhantomData<State>,
}

impl UriBuilder<Relative> {
    /// Creates a new builder for an empty relative reference.
    #[must_use]
    pub fn new() -> Self {
        Self {
            uri: Uri::new(),
            _state: PhantomData,
        }
    }

    /// Sets the scheme and advances to the [`Absolute`] state.
    ///
    /// # Errors
    ///
    /// Returns `SyntaxError` if the scheme is invalid.
    pub fn scheme(self, scheme: &str) -> Result<UriBuilder<Absolute>, SyntaxError> {
        Ok(UriBuilder {
            uri: self.uri.with_scheme(scheme)?,
            _state: PhantomData,
        })
    }
}

impl Default for UriBuilder<Relative> {
    fn default() -> Self {
        Self::new()
    }
}

impl UriBuilder<Absolute> {
    /// Sets the host.
    ///
    /// # Errors
    ///
    /// Returns `SyntaxError` if the host is invalid.
    pub fn host(mut self, host: &str) -> Result<Self, SyntaxError> {
        self.uri = self.uri.with_host(host)?;
        Ok(self)
    }

    /// Sets the port.
    ///
    /// # Errors
    ///
    /// Returns `SyntaxError` if the port is 0.
    pub fn port(mut self, port: u16) -> Result<Self, SyntaxError> {
        self.uri = self.uri.with_port(port)?;
        Ok(self)
    }

    /// Sets user name and password.
    ///
    /// # Errors
    ///
    /// Returns `SyntaxError` if either part is invalid.
    pub fn user_info(
        mut self,
        username: Option<&str>,
        userpass: Option<&str>,
    ) -> Result<Self, SyntaxError> {
        self.uri = self.uri.with_user_info(username, userpass)?;
        Ok(self)
    }

    /// Sets user information, host and port from an authority string.
    ///
    /// # Errors
    ///
    /// Returns `SyntaxError` if the authority is invalid.
    pub fn authority(mut self, authority: &str) -> Result<Self, SyntaxError> {
        self.uri = self.uri.with_authority(authority)?;
        Ok(self)
    }
}

/// Methods available in every state.
impl<State> UriBuilder<State> {
    /// Sets the path.
    ///
    /// # Errors
    ///
    /// Returns `SyntaxError` if the path contains a malformed
    /// percent-encoded octet.
    pub fn path(mut self, path: &str) -> Result<Self, SyntaxError> {
        self.uri = self.uri.with_path(path)?;
        Ok(self)
    }

    /// Replaces the query string.
    #[must_use]
    pub fn query(mut self, query: &str) -> Self {
        self.uri = self.uri.with_query(query);
        self
    }

    /// Appends a query pair.
    #[must_use]
    pub fn param(mut self, key: &str, value: &str) -> Self {
        self.uri = self.uri.add_param(key, value);
        self
    }

    /// Changes the query delimiter.
    ///
    /// # Errors
    ///
    /// Returns `SyntaxError` if the delimiter cannot separate query pairs.
    pub fn query_delimiter(mut self, delimiter: char) -> Result<Self, SyntaxError> {
        self.uri = self.uri.with_query_delimiter(delimiter)?;
        Ok(self)
    }

    /// Sets the fragment.
    #[must_use]
    pub fn fragment(mut self, fragment: &str) -> Self {
        self.uri = self.uri.with_fragment(fragment);
        self
    }

    /// Builds the URI.
    ///
    /// # Errors
    ///
    /// Returns `SyntaxError` if the components are inconsistent (see
    /// [`Uri::to_ascii`]).
    pub fn build(self) -> Result<Uri, SyntaxError> {
        self.uri.to_ascii()?;
        Ok(self.uri)
    }
}
