//! Reference resolution (RFC 3986 §5.2.2).

use crate::error::{SyntaxError, SyntaxErrorKind};
use crate::path::{merge_paths, remove_dot_segments};
use crate::uri::Uri;

impl Uri {
    /// Resolves `reference` against this URI as base.
    ///
    /// The fragment always comes from the reference. Query pairs are taken
    /// over together with the delimiter of the URI that supplies them.
    ///
    /// # Errors
    ///
    /// Returns `SyntaxError` with [`SyntaxErrorKind::RelativeBase`] if this
    /// URI has no scheme.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_idn::Uri;
    ///
    /// let base = Uri::parse("http://a/b/c/d;p?q").unwrap();
    /// let reference = Uri::parse("../g").unwrap();
    /// assert_eq!(base.join(&reference).unwrap().to_string(), "http://a/b/g");
    /// ```
    pub fn join(&self, reference: &Self) -> Result<Self, SyntaxError> {
        if self.scheme.is_none() {
            return Err(SyntaxError::new(self.to_string(), SyntaxErrorKind::RelativeBase));
        }

        if reference.scheme.is_some() {
            return Ok(reference.clone());
        }

        let mut target = Self {
            scheme: self.scheme.clone(),
            fragment: reference.fragment.clone(),
            ..Self::default()
        };

        if reference.has_authority() {
            target.authority = reference.authority.clone();
            target.path.clone_from(&reference.path);
            target.query = reference.query.clone();
            return Ok(target);
        }

        target.authority = self.authority.clone();
        if reference.path.is_empty() {
            target.path.clone_from(&self.path);
            target.query = if reference.query.is_empty() {
                self.query.clone()
            } else {
                reference.query.clone()
            };
        } else {
            let path = if reference.path.starts_with('/') {
                reference.path.clone()
            } else {
                merge_paths(&self.path, self.has_authority(), &reference.path)
            };
            target.path = remove_dot_segments(&path);
            target.query = reference.query.clone();
        }

        Ok(target)
    }

    /// Parses `reference` and resolves it against this URI.
    ///
    /// # Errors
    ///
    /// Returns `SyntaxError` if the reference does not parse or this URI has
    /// no scheme.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_idn::Uri;
    ///
    /// let base = Uri::parse("http://a/b/c/d;p?q").unwrap();
    /// assert_eq!(base.join_str("?y").unwrap().to_string(), "http://a/b/c/d;p?y");
    /// assert_eq!(base.join_str("..").unwrap().to_string(), "http://a/b/");
    /// ```
    pub fn join_str(&self, reference: &str) -> Result<Self, SyntaxError> {
        self.join(&Self::parse(reference)?)
    }
}
