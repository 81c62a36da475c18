//! Derived readiness predicate gating the generate action.

use crate::draft::InputDraft;
use crate::selection::SelectionMap;

/// True when the draft has usable input (a selected file, or text whose
/// trimmed content is non-empty) AND at least one platform is selected.
///
/// Pure and cheap; callers recompute it after every relevant mutation rather
/// than caching it.
pub fn is_ready(draft: &InputDraft, selections: &SelectionMap) -> bool {
    let has_input = match draft {
        InputDraft::Empty => false,
        InputDraft::File(_) => true,
        InputDraft::Text { content } => !content.trim().is_empty(),
    };
    has_input && !selections.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::SourceFile;

    fn file_draft() -> InputDraft {
        InputDraft::File(SourceFile {
            name: "a.mp3".to_string(),
            size_bytes: 1024,
            mime_type: "audio/mpeg".to_string(),
        })
    }

    fn one_selection() -> SelectionMap {
        SelectionMap::from([("linkedin".to_string(), 2)])
    }

    #[test]
    fn not_ready_without_selection_regardless_of_draft() {
        let empty = SelectionMap::new();
        assert!(!is_ready(&InputDraft::Empty, &empty));
        assert!(!is_ready(&file_draft(), &empty));
        assert!(!is_ready(
            &InputDraft::Text {
                content: "transcript".to_string()
            },
            &empty
        ));
    }

    #[test]
    fn not_ready_without_input_regardless_of_selection() {
        let selections = one_selection();
        assert!(!is_ready(&InputDraft::Empty, &selections));
        assert!(!is_ready(
            &InputDraft::Text {
                content: "   ".to_string()
            },
            &selections
        ));
        assert!(!is_ready(
            &InputDraft::Text {
                content: String::new()
            },
            &selections
        ));
    }

    #[test]
    fn ready_with_file_and_selection() {
        assert!(is_ready(&file_draft(), &one_selection()));
    }

    #[test]
    fn ready_with_nonblank_text_and_selection() {
        assert!(is_ready(
            &InputDraft::Text {
                content: "  transcript  ".to_string()
            },
            &one_selection()
        ));
    }
}
