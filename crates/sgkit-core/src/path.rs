//! # Manifest Paths
//!
//! Position addressing inside the manifest value tree. A path is the sequence
//! of mapping keys and list indices leading from the document root to a node,
//! kept as data so validators can build it incrementally and reports can
//! render it uniformly (`dataSources > 0 > source`, or `/` for the root).

use std::fmt;

/// One step into the manifest tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A mapping key.
    Key(String),
    /// A list index.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, "{key}"),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// A location in the manifest tree, from the root down.
///
/// Paths are built by value: [`key`](Self::key) and [`index`](Self::index)
/// return extended copies, so a validator can hold the path to the node it
/// is visiting and hand extensions to child visits without bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ManifestPath(Vec<PathSegment>);

impl ManifestPath {
    /// The document root (empty path).
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a path from a segment sequence.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Extend with a mapping key.
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Key(key.into()));
        Self(segments)
    }

    /// Extend with a list index.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    /// The segments from the root down.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Whether this is the document root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

/// Report rendering: segments joined with `" > "`, the root as `"/"`.
impl fmt::Display for ManifestPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "/");
        }
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " > ")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}
