//! Nested listing produced by hierarchy providers.
//!
//! This is the intermediate representation between whatever discovers files
//! (a disk walk, an editor's resource database, a test fixture) and the
//! arena-backed `FileTree` that passes operate on.

/// Marker naming the root of every hierarchy.
pub const ROOT_MARKER: &str = "res://";

/// A file or directory in a provider listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    File {
        name: Box<str>,
        declared_type: Option<Box<str>>,
    },
    Directory {
        name: Box<str>,
        children: Vec<Listing>,
    },
}

impl Listing {
    /// Creates a file entry. An empty declared type is treated as unknown.
    pub fn file(name: impl Into<Box<str>>, declared_type: Option<&str>) -> Self {
        Self::File {
            name: name.into(),
            declared_type: declared_type.filter(|t| !t.is_empty()).map(Into::into),
        }
    }

    pub fn dir(name: impl Into<Box<str>>, children: impl IntoIterator<Item = Listing>) -> Self {
        Self::Directory {
            name: name.into(),
            children: children.into_iter().collect(),
        }
    }

    /// Creates the root directory (named [`ROOT_MARKER`]).
    pub fn root(children: impl IntoIterator<Item = Listing>) -> Self {
        Self::dir(ROOT_MARKER, children)
    }

    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } | Self::Directory { name, .. } => name,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Directory { .. })
    }

    /// Returns the children of a directory (empty for files).
    pub fn children(&self) -> &[Listing] {
        match self {
            Self::File { .. } => &[],
            Self::Directory { children, .. } => children,
        }
    }

    /// Sorts children by name at every level.
    pub fn sort_by_name(&mut self) {
        if let Self::Directory { children, .. } = self {
            children.sort_unstable_by(|a, b| a.name().cmp(b.name()));
            for child in children {
                child.sort_by_name();
            }
        }
    }

    /// Counts entries below (and including) this one.
    pub fn entry_count(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(Listing::entry_count)
            .sum::<usize>()
    }
}
