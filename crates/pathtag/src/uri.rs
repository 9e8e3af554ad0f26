// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::{self, Display};
use std::str::FromStr;

use url::Url;

use crate::error::{Error, Result, try_string};
use crate::fragment::{Fragment, FragmentStore};
use crate::mode::has_mode_tag;

/// A parsed URI together with the parameters of its fragment.
///
/// URI syntax is handled by [`url::Url`]; this type only adds fragment lookup so
/// that the URI can be handed to the mode queries directly.
///
/// # Examples
///
/// ```
/// use pathtag::{FragmentStore, FragmentUri};
///
/// let uri = FragmentUri::parse("https://data.example.com/sst.nc#mode=dap4&log").unwrap();
/// assert_eq!(uri.lookup("mode"), Some("dap4"));
/// assert_eq!(uri.url().host_str(), Some("data.example.com"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FragmentUri {
    url: Url,
    fragment: Fragment,
}

impl FragmentUri {
    /// Parses `path` as an absolute URI.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::UriParse`](crate::ErrorKind::UriParse) if `path` is not
    /// an absolute URI.
    pub fn parse(path: &str) -> Result<Self> {
        Ok(Url::parse(path)?.into())
    }

    /// The parsed URI.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The fragment parameters; empty when the URI has no fragment.
    #[must_use]
    pub fn fragment(&self) -> &Fragment {
        &self.fragment
    }

    /// Returns `true` if the `mode` fragment parameter lists `tag`, ignoring ASCII case.
    #[must_use]
    pub fn has_mode_tag(&self, tag: &str) -> bool {
        has_mode_tag(self, tag)
    }
}

impl From<Url> for FragmentUri {
    fn from(url: Url) -> Self {
        let fragment = url.fragment().map(Fragment::parse).unwrap_or_default();
        Self { url, fragment }
    }
}

impl FromStr for FragmentUri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for FragmentUri {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl Display for FragmentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.url, f)
    }
}

impl FragmentStore for FragmentUri {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.fragment.get(key)
    }
}

/// Returns `true` if `path` parses as a URI whose `mode` fragment parameter lists
/// `tag`, ignoring ASCII case.
///
/// A path that is not a URI answers `false`.
///
/// # Examples
///
/// ```
/// use pathtag::has_path_mode_tag;
///
/// assert!(has_path_mode_tag("file:///tmp/a.zarr#mode=nczarr,file", "NCZARR"));
/// assert!(!has_path_mode_tag("/tmp/a.zarr", "nczarr"));
/// ```
#[must_use]
pub fn has_path_mode_tag(path: &str, tag: &str) -> bool {
    match FragmentUri::parse(path) {
        Ok(uri) => uri.has_mode_tag(tag),
        Err(err) => {
            log_invalid_uri(path, &err);
            false
        }
    }
}

#[cfg_attr(
    not(any(feature = "logs", test)),
    expect(unused_variables, reason = "unused when logs feature not used")
)]
#[cfg_attr(test, mutants::skip)] // Logging only.
fn log_invalid_uri(path: &str, err: &Error) {
    #[cfg(any(feature = "logs", test))]
    tracing::event!(
        name: "pathtag.uri.invalid",
        tracing::Level::DEBUG,
        uri.path = path,
        error = %err,
        "path is not a URI, treating mode tag as absent"
    );
}

/// Returns the base name of a URI's path without its extension.
///
/// The name is whatever follows the last `/` of the path. A leading dot does not
/// start an extension, so `/.hidden` yields `.hidden`. If the path has no `/` at
/// all, as in `mailto:someone`, the whole input is used instead. The result is not
/// percent-decoded.
///
/// # Examples
///
/// ```
/// use pathtag::url_basename;
///
/// assert_eq!(url_basename("https://host/data/sst.day.nc").unwrap(), "sst.day");
/// assert!(url_basename("data/sst.nc").is_err());
/// ```
///
/// # Errors
///
/// Returns [`ErrorKind::UriParse`](crate::ErrorKind::UriParse) if `path` is not an
/// absolute URI.
pub fn url_basename(path: &str) -> Result<String> {
    let url = Url::parse(path)?;
    let url_path = url.path();
    let name = url_path.rfind('/').map_or(path, |slash| &url_path[slash + 1..]);
    let stem = match name.rfind('.') {
        Some(dot) if dot > 0 => &name[..dot],
        _ => name,
    };

    let mut basename = try_string(stem.len())?;
    basename.push_str(stem);
    Ok(basename)
}
