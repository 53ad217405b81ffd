use relative_path::{RelativePath, RelativePathBuf};
use std::path::Path;

/* 📖 # Why use RelativePathBuf for FilePath?

The only files the service reads (its optional `roster.toml`) live next to where it
was started. Wrapping RelativePathBuf keeps every PAL path relative to the PAL's
base directory, so a RealPal rooted at the working directory and a MockPal with
an in-memory file table agree on what a path means.
*/

/// Type-safe wrapper for file paths relative to the PAL base directory.
///
/// ```
/// use roster_base::FilePath;
///
/// let config = FilePath::from("roster.toml");
/// assert_eq!(config.to_string(), "roster.toml");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilePath(RelativePathBuf);

impl FilePath {
    /// Returns the underlying RelativePath.
    pub fn as_relative(&self) -> &RelativePath {
        &self.0
    }

    /// Converts to a regular Path for joining onto a base directory.
    pub fn as_path(&self) -> &Path {
        Path::new(self.as_relative().as_str())
    }
}

impl From<&str> for FilePath {
    fn from(s: &str) -> Self {
        Self(RelativePathBuf::from(s))
    }
}

impl From<String> for FilePath {
    fn from(s: String) -> Self {
        Self(RelativePathBuf::from(s))
    }
}

impl std::fmt::Display for FilePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
