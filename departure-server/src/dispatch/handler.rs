//! The handler tree.

use std::collections::HashMap;
use std::fmt;

use tracing::trace;

use super::error::DispatchError;

/// Segment name matched when no literal entry exists.
pub const WILDCARD: &str = "*";

/// Flat key/value input accompanying a request path.
pub type Input = HashMap<String, String>;

/// A leaf function.
///
/// Receives the remaining path, starting with the segment that selected it,
/// and the request input.
pub type HandlerFn<T, E> = Box<dyn Fn(&[String], &Input) -> Result<T, E> + Send + Sync>;

enum Entry<T, E> {
    Leaf(HandlerFn<T, E>),
    SubTree(Handler<T, E>),
}

/// A node of the dispatch tree.
///
/// Nodes are mutated only while the tree is being built. Resolution takes
/// `&self`, so a finished tree can be shared between threads behind an
/// `Arc` without locking.
///
/// # Examples
///
/// ```
/// use departure_server::dispatch::{DispatchError, Handler, Input};
///
/// let mut root: Handler<String> = Handler::new();
/// root.register_child("1.0")
///     .register_function("echo", |path, _| Ok(path.join("/")));
///
/// let path = vec!["1.0".to_string(), "echo".to_string(), "x".to_string()];
/// assert_eq!(root.resolve(&path, &Input::new()), Ok("echo/x".to_string()));
/// assert_eq!(root.resolve(&[], &Input::new()), Err(DispatchError::EmptyPath));
/// ```
pub struct Handler<T, E = DispatchError> {
    name: Option<String>,
    entries: HashMap<String, Entry<T, E>>,
}

impl<T, E> Handler<T, E> {
    /// Create an unnamed root node.
    pub fn new() -> Self {
        Self {
            name: None,
            entries: HashMap::new(),
        }
    }

    fn named(name: String) -> Self {
        Self {
            name: Some(name),
            entries: HashMap::new(),
        }
    }

    /// The segment this node was registered under; `None` for the root.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Bind `function` under `name`, replacing whatever was there.
    pub fn register_function<F>(&mut self, name: impl Into<String>, function: F) -> &mut Self
    where
        F: Fn(&[String], &Input) -> Result<T, E> + Send + Sync + 'static,
    {
        self.entries
            .insert(name.into(), Entry::Leaf(Box::new(function)));
        self
    }

    /// The child registered under `name`, created if absent.
    ///
    /// Registering the same name twice returns the same child, so setup code
    /// can add functions to a namespace from several places. A function
    /// previously registered under `name` is replaced by the new child.
    pub fn register_child(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        if !matches!(self.entries.get(&name), Some(Entry::SubTree(_))) {
            self.entries
                .insert(name.clone(), Entry::SubTree(Handler::named(name.clone())));
        }

        match self.entries.get_mut(&name) {
            Some(Entry::SubTree(child)) => child,
            _ => unreachable!("a subtree was just registered under {name:?}"),
        }
    }

    /// The child registered under `name`, if any.
    pub fn child(&self, name: &str) -> Option<&Self> {
        match self.entries.get(name) {
            Some(Entry::SubTree(child)) => Some(child),
            _ => None,
        }
    }

    /// Whether anything is registered under exactly `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }
}

impl<T, E> Handler<T, E>
where
    E: From<DispatchError>,
{
    /// Resolve `segments` to a leaf and call it with `input`.
    ///
    /// The first segment is looked up literally, then as [`WILDCARD`]. A
    /// leaf is called with all of `segments`; a child resolves the segments
    /// after the first.
    pub fn resolve(&self, segments: &[String], input: &Input) -> Result<T, E> {
        let Some((head, rest)) = segments.split_first() else {
            return Err(DispatchError::EmptyPath.into());
        };

        let entry = self
            .entries
            .get(head)
            .or_else(|| self.entries.get(WILDCARD))
            .ok_or_else(|| DispatchError::UnknownSegment(head.clone()))?;

        trace!(node = self.name().unwrap_or("/"), segment = %head, "resolving");

        match entry {
            Entry::Leaf(function) => function(segments, input),
            Entry::SubTree(child) => child.resolve(rest, input),
        }
    }
}

impl<T, E> Default for Handler<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> fmt::Debug for Handler<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut leaves: Vec<_> = Vec::new();
        let mut children: Vec<_> = Vec::new();
        for (name, entry) in &self.entries {
            match entry {
                Entry::Leaf(_) => leaves.push(name),
                Entry::SubTree(child) => children.push(child),
            }
        }
        leaves.sort();
        children.sort_by_key(|child| child.name.clone());

        f.debug_struct("Handler")
            .field("name", &self.name)
            .field("functions", &leaves)
            .field("children", &children)
            .finish()
    }
}
