use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Serialization format of a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Format {
    Json,
    #[default]
    Yaml,
}

impl Format {
    /// Pick a format from a file extension. Anything that is not `.json` is
    /// read as YAML, which also accepts plain JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Yaml,
        }
    }
}

/// Where a specification comes from.
pub enum Source {
    /// An already-parsed value.
    Value(serde_json::Value),
    /// A file on disk.
    Path(PathBuf),
    /// Document text.
    Str { text: String, format: Format },
    /// Any byte stream.
    Reader {
        reader: Box<dyn Read>,
        format: Format,
    },
}

impl Source {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    pub fn yaml(text: impl Into<String>) -> Self {
        Self::Str {
            text: text.into(),
            format: Format::Yaml,
        }
    }

    pub fn json(text: impl Into<String>) -> Self {
        Self::Str {
            text: text.into(),
            format: Format::Json,
        }
    }

    pub fn reader(reader: impl Read + 'static, format: Format) -> Self {
        Self::Reader {
            reader: Box::new(reader),
            format,
        }
    }
}

impl From<serde_json::Value> for Source {
    fn from(value: serde_json::Value) -> Self {
        Self::Value(value)
    }
}

impl From<&Path> for Source {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Value(_) => write!(f, "Source::Value"),
            Source::Path(path) => write!(f, "Source::Path({})", path.display()),
            Source::Str { format, .. } => write!(f, "Source::Str({format:?})"),
            Source::Reader { format, .. } => write!(f, "Source::Reader({format:?})"),
        }
    }
}
