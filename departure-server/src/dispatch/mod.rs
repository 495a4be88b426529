//! Hierarchical path dispatch.
//!
//! A [`Handler`] is a tree keyed by path segment. Each entry is either a
//! leaf function or a nested handler, and resolution walks the tree one
//! segment at a time until it reaches a leaf. A path like
//! `1.0/StationLibrary/findNearby` is therefore served by registering a
//! `1.0` child, a `StationLibrary` child beneath it, and a `findNearby`
//! function on the innermost node.

mod error;
mod handler;

pub use error::DispatchError;
pub use handler::{Handler, HandlerFn, Input, WILDCARD};
