// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Delimited path segments, reserved-character escaping and URI fragment mode tags.
//!
//! This crate is a set of small, pure string transforms used when turning user-supplied
//! paths into something a dataset driver can act on:
//!
//! - [`split`] and [`join`] convert between a delimited string and an ordered list of
//!   non-empty segments, with [`join`] producing a canonical absolute path.
//! - [`backslash_escape`] / [`backslash_unescape`], [`entity_escape`] and
//!   [`shell_unescape`] escape and unescape reserved characters.
//! - [`has_mode_tag`] and [`mode_list`] read the comma-separated `mode` parameter of a
//!   URI fragment, as in `https://host/data.nc#mode=dap4,bytes`.
//!
//! # Segments
//!
//! ```rust
//! use pathtag::{join, split};
//!
//! let segments = split("/group/subgroup/var", '/').unwrap();
//! assert_eq!(segments, ["group", "subgroup", "var"]);
//! assert_eq!(join(&segments).unwrap(), "/group/subgroup/var");
//!
//! // Empty segments are an error, not silently dropped.
//! assert!(split("a,,b", ',').is_err());
//! ```
//!
//! # Mode Tags
//!
//! Mode lookups work against anything implementing [`FragmentStore`]. With the
//! default `url` feature, a raw path can be checked directly:
//!
//! ```rust
//! use pathtag::{Fragment, has_mode_tag, has_path_mode_tag};
//!
//! let fragment = Fragment::parse("mode=dap4,bytes");
//! assert!(has_mode_tag(&fragment, "DAP4"));
//!
//! assert!(has_path_mode_tag("https://host/data.nc#mode=dap4,bytes", "bytes"));
//! assert!(!has_path_mode_tag("not a uri", "bytes"));
//! ```
//!
//! Mode checks never fail: a missing parameter, a malformed list or an unparsable
//! path all answer `false`. Use [`mode_list`] or [`ModeQuery::mode_list`] to see the
//! underlying error.
//!
//! # Features
//!
//! - `url` (default): [`FragmentUri`], [`has_path_mode_tag`] and [`url_basename`],
//!   backed by the [`url`](https://docs.rs/url) crate.
//! - `logs`: emits `tracing` debug events when a mode query degrades to `false`.

mod error;
pub mod escape;
mod fragment;
mod mode;
mod segments;
#[cfg(feature = "url")]
mod uri;

pub use error::{Error, ErrorKind, Result};
#[doc(inline)]
pub use escape::{backslash_escape, backslash_unescape, entity_escape, shell_unescape};
pub use fragment::{Fragment, FragmentStore};
pub use mode::{ModeQuery, ModeQueryBuilder, has_mode_tag, mode_list};
pub use segments::{join, split};
#[cfg(feature = "url")]
pub use uri::{FragmentUri, has_path_mode_tag, url_basename};
