use std::{
    borrow::Cow,
    collections::VecDeque,
    fmt::{self, Display},
};

use from_variants::FromVariants;

/// Trait for prepending location information to errors and diagnostics.
pub trait ErrorAt: Sized {
    /// Add a new path segment to the front of the value's path.
    fn at<P: Into<PathSegment>>(self, segment: P) -> Self;
}

impl<T, E: ErrorAt> ErrorAt for Result<T, E> {
    fn at<P: Into<PathSegment>>(self, segment: P) -> Self {
        self.map_err(|e| e.at(segment))
    }
}

/// An error that stops decoding or encoding of a single unit of work.
///
/// Validation and comparison problems are never reported through this type; see
/// [`Outcome`](crate::Outcome) for those.
#[derive(Debug, Clone)]
pub struct Error {
    kind: ErrorKind,
    path: Path,
}

impl Error {
    fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            path: Path::default(),
        }
    }

    pub fn custom(message: impl Display) -> Self {
        Self::new(ErrorKind::Custom(message.to_string()))
    }

    /// The input is not a structured document, or it has no `type` discriminant.
    pub fn malformed_envelope(message: impl Display) -> Self {
        Self::new(ErrorKind::MalformedEnvelope(message.to_string()))
    }

    /// No decoder is registered for the discriminant and the generic fallback is disabled.
    pub fn unknown_type(object_type: impl Display) -> Self {
        Self::new(ErrorKind::UnknownType(object_type.to_string()))
    }

    /// An in-memory record could not be serialized.
    pub fn encode(message: impl Display) -> Self {
        Self::new(ErrorKind::Encode(message.to_string()))
    }

    /// A value was rejected by a setter.
    pub fn validation(message: impl Display) -> Self {
        Self::new(ErrorKind::Validation(message.to_string()))
    }

    pub fn at(mut self, segment: impl Into<PathSegment>) -> Self {
        self.path.push_front(segment);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_malformed_envelope(&self) -> bool {
        matches!(self.kind, ErrorKind::MalformedEnvelope(_))
    }

    pub fn is_unknown_type(&self) -> bool {
        matches!(self.kind, ErrorKind::UnknownType(_))
    }

    pub fn is_encode(&self) -> bool {
        matches!(self.kind, ErrorKind::Encode(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self.kind, ErrorKind::Validation(_))
    }
}

impl ErrorAt for Error {
    fn at<P: Into<PathSegment>>(self, segment: P) -> Self {
        self.at(segment)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.path, self.kind)
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::new(ErrorKind::Json(err.to_string()))
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, thiserror::Error)]
enum ErrorKind {
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),
    #[error("no decoder registered for type '{0}'")]
    UnknownType(String),
    #[error("JSON error: {0}")]
    Json(String),
    #[error("encode failure: {0}")]
    Encode(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Custom(String),
}

/// The location of a field within a document, such as `objects[2].kill_chain_phases[0]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path {
    segments: VecDeque<PathSegment>,
}

impl Path {
    pub fn push_front(&mut self, segment: impl Into<PathSegment>) {
        self.segments.push_front(segment.into());
    }

    /// Returns the path extended by one trailing segment.
    pub fn child(mut self, segment: impl Into<PathSegment>) -> Self {
        self.segments.push_back(segment.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (idx, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(_) if idx == 0 => write!(f, "{segment}")?,
                _ => write!(f, "{segment:#}")?,
            }
        }

        Ok(())
    }
}

impl From<PathSegment> for Path {
    fn from(segment: PathSegment) -> Self {
        Path {
            segments: vec![segment].into(),
        }
    }
}

impl From<&'static str> for Path {
    fn from(key: &'static str) -> Self {
        PathSegment::from(key).into()
    }
}

impl From<String> for Path {
    fn from(key: String) -> Self {
        PathSegment::from(key).into()
    }
}

impl From<usize> for Path {
    fn from(index: usize) -> Self {
        PathSegment::from(index).into()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, FromVariants)]
pub enum PathSegment {
    Key(Cow<'static, str>),
    Number(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            match self {
                PathSegment::Key(key) => write!(f, ".{}", key),
                PathSegment::Number(index) => write!(f, "[{}]", index),
            }
        } else {
            match self {
                PathSegment::Key(key) => write!(f, "{}", key),
                PathSegment::Number(index) => write!(f, "{}", index),
            }
        }
    }
}

impl From<&'static str> for PathSegment {
    fn from(value: &'static str) -> Self {
        PathSegment::Key(Cow::Borrowed(value))
    }
}

impl From<String> for PathSegment {
    fn from(value: String) -> Self {
        PathSegment::Key(Cow::Owned(value))
    }
}
