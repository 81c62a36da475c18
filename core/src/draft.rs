use serde::Deserialize;
use serde::Serialize;

/// Metadata for a user-supplied source file.
///
/// Only metadata: the composer never reads file contents. The front end is
/// responsible for resolving a dropped/browsed file into this shape.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub size_bytes: u64,
    /// Declared MIME type, e.g. `audio/mpeg`.
    pub mime_type: String,
}

/// The user's in-progress single source input, before generation.
///
/// Exactly one branch is populated at any time; selecting one source clears
/// the other. Modeling this as a tagged union (rather than two nullable
/// fields) makes the "both set" state unrepresentable.
#[non_exhaustive]
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputDraft {
    #[default]
    Empty,
    /// An uploaded (validated) audio file.
    File(SourceFile),
    /// Pasted transcript text. May be empty or whitespace-only; readiness
    /// treats such content the same as `Empty`.
    Text { content: String },
}

impl InputDraft {
    pub fn is_empty(&self) -> bool {
        matches!(self, InputDraft::Empty)
    }

    pub fn file(&self) -> Option<&SourceFile> {
        match self {
            InputDraft::File(file) => Some(file),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            InputDraft::Text { content } => Some(content),
            _ => None,
        }
    }
}
