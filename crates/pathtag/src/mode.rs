// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Mode tags carried in a URI fragment, e.g. `#mode=dap4,bytes`.

use std::borrow::Cow;

use crate::error::{Error, ErrorKind, Result};
use crate::fragment::FragmentStore;
use crate::segments::split;

/// Selects the fragment parameter holding a mode list and how that list is delimited.
///
/// The default query reads the `mode` parameter and splits it on commas, which is
/// what [`has_mode_tag`] and [`mode_list`] use.
///
/// # Examples
///
/// ```
/// use pathtag::{Fragment, ModeQuery};
///
/// let query = ModeQuery::builder().key("features").delimiter('|').build().unwrap();
/// let fragment = Fragment::parse("features=zarr|s3");
/// assert!(query.contains(&fragment, "S3"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModeQuery {
    key: Cow<'static, str>,
    delimiter: char,
}

impl ModeQuery {
    /// The fragment parameter read by the default query.
    pub const DEFAULT_KEY: &'static str = "mode";

    /// The list delimiter used by the default query.
    pub const DEFAULT_DELIMITER: char = ',';

    /// Starts building a query from the defaults.
    #[must_use]
    pub fn builder() -> ModeQueryBuilder {
        ModeQueryBuilder {
            key: Cow::Borrowed(Self::DEFAULT_KEY),
            delimiter: Self::DEFAULT_DELIMITER,
        }
    }

    /// The fragment parameter this query reads.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The delimiter separating modes in the parameter value.
    #[must_use]
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Returns the modes listed in `store`, in order.
    ///
    /// An absent or empty parameter yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::MalformedInput`] if the list contains an empty mode, and
    /// [`ErrorKind::OutOfMemory`] if the list cannot be allocated.
    pub fn mode_list(&self, store: &impl FragmentStore) -> Result<Vec<String>> {
        split_modes(store.lookup(&self.key), self.delimiter)
    }

    /// Returns `true` if `store` lists `tag` as a mode, ignoring ASCII case.
    ///
    /// Mode checks are advisory: an absent parameter and a malformed list both
    /// answer `false`.
    #[must_use]
    pub fn contains(&self, store: &impl FragmentStore, tag: &str) -> bool {
        let value = store.lookup(&self.key);
        match split_modes(value, self.delimiter) {
            Ok(modes) => modes.iter().any(|mode| mode.eq_ignore_ascii_case(tag)),
            Err(err) => {
                self.log_malformed(value.unwrap_or_default(), &err);
                false
            }
        }
    }

    #[cfg_attr(
        not(any(feature = "logs", test)),
        expect(unused_variables, clippy::unused_self, reason = "unused when logs feature not used")
    )]
    #[cfg_attr(test, mutants::skip)] // Logging only.
    fn log_malformed(&self, value: &str, err: &Error) {
        #[cfg(any(feature = "logs", test))]
        tracing::event!(
            name: "pathtag.mode.malformed",
            tracing::Level::DEBUG,
            mode.key = %self.key,
            mode.value = value,
            error = %err,
            "mode list is malformed, treating tag as absent"
        );
    }
}

impl Default for ModeQuery {
    fn default() -> Self {
        Self {
            key: Cow::Borrowed(Self::DEFAULT_KEY),
            delimiter: Self::DEFAULT_DELIMITER,
        }
    }
}

/// Builder for [`ModeQuery`].
#[derive(Debug, Clone)]
#[must_use]
pub struct ModeQueryBuilder {
    key: Cow<'static, str>,
    delimiter: char,
}

impl ModeQueryBuilder {
    /// Sets the fragment parameter to read.
    pub fn key(mut self, key: impl Into<Cow<'static, str>>) -> Self {
        self.key = key.into();
        self
    }

    /// Sets the delimiter separating modes.
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Finishes the query.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidInput`] if the key is empty.
    pub fn build(self) -> Result<ModeQuery> {
        if self.key.is_empty() {
            return Err(Error::caused_by(ErrorKind::InvalidInput, "mode key must not be empty"));
        }

        Ok(ModeQuery {
            key: self.key,
            delimiter: self.delimiter,
        })
    }
}

fn split_modes(mode: Option<&str>, delimiter: char) -> Result<Vec<String>> {
    match mode {
        None => Ok(Vec::new()),
        Some(mode) => split(mode, delimiter),
    }
}

/// Splits a comma-separated mode string into its modes.
///
/// `None` and `""` both yield an empty list.
///
/// # Examples
///
/// ```
/// use pathtag::mode_list;
///
/// assert_eq!(mode_list(Some("dap4,bytes")).unwrap(), ["dap4", "bytes"]);
/// assert!(mode_list(None).unwrap().is_empty());
/// ```
///
/// # Errors
///
/// Returns [`ErrorKind::MalformedInput`] if the list contains an empty mode, and
/// [`ErrorKind::OutOfMemory`] if the list cannot be allocated.
pub fn mode_list(mode: Option<&str>) -> Result<Vec<String>> {
    split_modes(mode, ModeQuery::DEFAULT_DELIMITER)
}

/// Returns `true` if the `mode` parameter of `store` lists `tag`, ignoring ASCII case.
///
/// An absent `mode` parameter or a malformed list answers `false`.
///
/// # Examples
///
/// ```
/// use pathtag::{Fragment, has_mode_tag};
///
/// let fragment = Fragment::parse("mode=dap4,bytes");
/// assert!(has_mode_tag(&fragment, "DAP4"));
/// assert!(!has_mode_tag(&fragment, "xml"));
/// ```
#[must_use]
pub fn has_mode_tag(store: &impl FragmentStore, tag: &str) -> bool {
    ModeQuery::default().contains(store, tag)
}
