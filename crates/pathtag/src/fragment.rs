// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

/// Characters that must be percent-encoded when a fragment is rendered back to text.
const FRAGMENT_RESERVED: &AsciiSet = &CONTROLS.add(b' ').add(b'#').add(b'%').add(b'&').add(b'=');

/// Read-only key/value lookup over the parameters of a URI fragment.
///
/// Keys are matched exactly. Implementations never need to be mutable; the mode
/// queries in this crate only ever call [`lookup`](FragmentStore::lookup).
pub trait FragmentStore {
    /// Returns the value stored under `key`, or `None` if the key is absent.
    fn lookup(&self, key: &str) -> Option<&str>;
}

impl<T> FragmentStore for &T
where
    T: FragmentStore + ?Sized,
{
    fn lookup(&self, key: &str) -> Option<&str> {
        (**self).lookup(key)
    }
}

impl<S: BuildHasher> FragmentStore for HashMap<String, String, S> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl FragmentStore for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

/// The parameters of a URI fragment such as `#mode=dap4,bytes&log`.
///
/// Parameters keep their original order. A parameter without `=` has an empty
/// value. When a key repeats, lookups see the first occurrence.
///
/// # Examples
///
/// ```
/// use pathtag::{Fragment, FragmentStore};
///
/// let fragment = Fragment::parse("#mode=dap4,bytes&log");
/// assert_eq!(fragment.lookup("mode"), Some("dap4,bytes"));
/// assert_eq!(fragment.lookup("log"), Some(""));
/// assert_eq!(fragment.lookup("show"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Fragment {
    params: Vec<(String, String)>,
}

impl Fragment {
    /// Parses the raw text of a fragment, with or without its leading `#`.
    ///
    /// Parameters are separated by `&` and split into key and value at the first
    /// `=`. Keys and values are percent-decoded; invalid UTF-8 is replaced lossily.
    /// Empty parameters are ignored.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('#').unwrap_or(raw);
        raw.split('&')
            .filter(|param| !param.is_empty())
            .map(|param| param.split_once('=').unwrap_or((param, "")))
            .map(|(key, value)| (decode(key), decode(value)))
            .collect()
    }

    /// Returns the value of the first parameter named `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Iterates over the parameters in their original order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` if the fragment has no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

fn decode(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().into_owned()
}

impl FragmentStore for Fragment {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key)
    }
}

impl<K, V> FromIterator<(K, V)> for Fragment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl From<&str> for Fragment {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

/// Renders the parameters as `key=value&key` without the leading `#`.
impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}", utf8_percent_encode(key, FRAGMENT_RESERVED))?;
            if !value.is_empty() {
                write!(f, "={}", utf8_percent_encode(value, FRAGMENT_RESERVED))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static_assertions::assert_impl_all!(Fragment: Send, Sync, FragmentStore);

    #[test]
    fn parse_with_and_without_hash() {
        assert_eq!(Fragment::parse("#mode=dap4"), Fragment::parse("mode=dap4"));
    }

    #[test]
    fn parse_empty() {
        assert!(Fragment::parse("").is_empty());
        assert!(Fragment::parse("#").is_empty());
        assert!(Fragment::parse("&&").is_empty());
    }

    #[test]
    fn parse_key_without_value() {
        let fragment = Fragment::parse("log&mode=zarr");
        assert_eq!(fragment.len(), 2);
        assert_eq!(fragment.get("log"), Some(""));
        assert_eq!(fragment.get("mode"), Some("zarr"));
    }

    #[test]
    fn value_splits_at_first_equals() {
        let fragment = Fragment::parse("expr=a=b");
        assert_eq!(fragment.get("expr"), Some("a=b"));
    }

    #[test]
    fn first_duplicate_wins() {
        let fragment = Fragment::parse("mode=a&mode=b");
        assert_eq!(fragment.get("mode"), Some("a"));
    }

    #[test]
    fn lookup_is_exact() {
        let fragment = Fragment::parse("mode=a");
        assert_eq!(fragment.lookup("MODE"), None);
    }

    #[test]
    fn percent_decoding() {
        let fragment = Fragment::parse("mode=dap4%2Cbytes&na%20me=x%ZZ");
        assert_eq!(fragment.get("mode"), Some("dap4,bytes"));
        assert_eq!(fragment.get("na me"), Some("x%ZZ"));
    }

    #[test]
    fn iteration_preserves_order() {
        let fragment = Fragment::parse("b=2&a=1&c");
        let keys: Vec<_> = fragment.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[test]
    fn display_reencodes_reserved() {
        let fragment: Fragment = [("mode", "a&b"), ("log", "")].into_iter().collect();
        assert_eq!(fragment.to_string(), "mode=a%26b&log");
        assert_eq!(Fragment::parse(&fragment.to_string()), fragment);
    }

    #[test]
    fn maps_are_fragment_stores() {
        let mut hash = HashMap::new();
        hash.insert("mode".to_string(), "dap4".to_string());
        assert_eq!(hash.lookup("mode"), Some("dap4"));

        let tree: BTreeMap<String, String> = BTreeMap::new();
        assert_eq!(tree.lookup("mode"), None);
    }

    #[test]
    fn references_are_fragment_stores() {
        let fragment = Fragment::parse("mode=dap4");
        let by_ref: &dyn FragmentStore = &fragment;
        assert_eq!(by_ref.lookup("mode"), Some("dap4"));
        assert!(crate::has_mode_tag(&by_ref, "DAP4"));
    }
}
