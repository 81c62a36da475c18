//! The source-input state machine.
//!
//! [`SourceInput`] owns the mutually exclusive "file vs text" draft, the
//! active input surface, the drag-highlight flag, and the inline error. It is
//! mutated only by explicit operations; the front end maps raw terminal
//! events to these semantic signals, so the transitions here never depend on
//! the event-dispatch mechanism.
//!
//! Failure semantics: a rejected file stores an error and leaves any existing
//! draft untouched. An invalid new file must never silently wipe a previously
//! valid one.

use serde::Deserialize;
use serde::Serialize;

use crate::draft::InputDraft;
use crate::draft::SourceFile;
use crate::upload::UploadConstraints;
use crate::upload::UploadError;
use crate::upload::validate_upload;

/// Which input surface is shown. Independent from the draft's content:
/// switching surfaces clears the *other* surface's stored value but performs
/// no validation.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    #[default]
    Upload,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInput {
    mode: InputMode,
    draft: InputDraft,
    drag_active: bool,
    error: Option<UploadError>,
    constraints: UploadConstraints,
}

impl SourceInput {
    pub fn new(constraints: UploadConstraints) -> Self {
        Self {
            mode: InputMode::Upload,
            draft: InputDraft::Empty,
            drag_active: false,
            error: None,
            constraints,
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn draft(&self) -> &InputDraft {
        &self.draft
    }

    pub fn drag_active(&self) -> bool {
        self.drag_active
    }

    pub fn error(&self) -> Option<&UploadError> {
        self.error.as_ref()
    }

    pub fn constraints(&self) -> &UploadConstraints {
        &self.constraints
    }

    /// Offer a candidate file. On success the draft becomes
    /// [`InputDraft::File`] and any pasted text is discarded; on failure the
    /// error is stored and the existing draft is left as-is.
    pub fn select_file(&mut self, file: SourceFile) -> Result<(), UploadError> {
        self.error = None;

        if let Err(err) = validate_upload(&file, &self.constraints) {
            self.error = Some(err.clone());
            return Err(err);
        }

        self.draft = InputDraft::File(file);
        Ok(())
    }

    /// Replace the draft with pasted transcript text, discarding any selected
    /// file. Text is not validated; whitespace-only content simply never
    /// becomes ready.
    pub fn enter_text(&mut self, content: String) {
        self.draft = InputDraft::Text { content };
        self.error = None;
    }

    pub fn clear_input(&mut self) {
        self.draft = InputDraft::Empty;
        self.error = None;
    }

    /// Change the active surface. Clears the other surface's stored value
    /// (mirroring the draft's mutual exclusivity) and the error, even without
    /// an explicit `clear_input`.
    pub fn switch_mode(&mut self, mode: InputMode) {
        self.mode = mode;
        self.error = None;
        match mode {
            InputMode::Upload => {
                if matches!(self.draft, InputDraft::Text { .. }) {
                    self.draft = InputDraft::Empty;
                }
            }
            InputMode::Text => {
                if matches!(self.draft, InputDraft::File(_)) {
                    self.draft = InputDraft::Empty;
                }
            }
        }
    }

    /// Drag highlight on. Presentational state only; the draft is untouched.
    pub fn drag_enter(&mut self) {
        self.drag_active = true;
    }

    /// Drag highlight off without a drop (pointer left the zone).
    pub fn drag_leave(&mut self) {
        self.drag_active = false;
    }

    /// A payload was dropped on the upload zone: the highlight turns off and
    /// the file goes through the same validation path as a browsed file.
    pub fn drop_file(&mut self, file: SourceFile) -> Result<(), UploadError> {
        self.drag_active = false;
        self.select_file(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn audio_file(name: &str, size_bytes: u64) -> SourceFile {
        SourceFile {
            name: name.to_string(),
            size_bytes,
            mime_type: "audio/mpeg".to_string(),
        }
    }

    fn input() -> SourceInput {
        SourceInput::new(UploadConstraints::default())
    }

    #[test]
    fn valid_file_replaces_text() {
        let mut input = input();
        input.switch_mode(InputMode::Text);
        input.enter_text("transcript".to_string());

        input.switch_mode(InputMode::Upload);
        input
            .select_file(audio_file("a.mp3", 1024))
            .expect("valid file");
        assert_eq!(input.draft().file().map(|f| f.name.as_str()), Some("a.mp3"));
        assert_eq!(input.draft().text(), None);
    }

    #[test]
    fn text_replaces_file() {
        let mut input = input();
        input
            .select_file(audio_file("a.mp3", 1024))
            .expect("valid file");

        input.enter_text("pasted".to_string());
        assert_eq!(input.draft().text(), Some("pasted"));
        assert_eq!(input.draft().file(), None);
    }

    #[test]
    fn rejected_file_keeps_previous_draft() {
        let mut input = input();
        input
            .select_file(audio_file("keep.mp3", 1024))
            .expect("valid file");

        let oversized = audio_file("big.mp3", 200 * 1024 * 1024);
        let err = input.select_file(oversized).expect_err("should reject");
        assert_eq!(err, UploadError::TooLarge { limit_mb: 100 });
        assert_eq!(input.error(), Some(&err));
        assert_eq!(
            input.draft().file().map(|f| f.name.as_str()),
            Some("keep.mp3")
        );
    }

    #[test]
    fn next_attempt_clears_the_error() {
        let mut input = input();
        let _ = input.select_file(SourceFile {
            name: "doc.pdf".to_string(),
            size_bytes: 10,
            mime_type: "application/pdf".to_string(),
        });
        assert!(input.error().is_some());

        input
            .select_file(audio_file("a.mp3", 1024))
            .expect("valid file");
        assert_eq!(input.error(), None);
    }

    #[test]
    fn entering_text_clears_the_error() {
        let mut input = input();
        let _ = input.select_file(SourceFile {
            name: "doc.pdf".to_string(),
            size_bytes: 10,
            mime_type: "application/pdf".to_string(),
        });
        input.enter_text("hello".to_string());
        assert_eq!(input.error(), None);
    }

    #[test]
    fn switching_to_upload_discards_text_but_not_file() {
        let mut input = input();
        input.switch_mode(InputMode::Text);
        input.enter_text("transcript".to_string());
        input.switch_mode(InputMode::Upload);
        assert!(input.draft().is_empty());

        input
            .select_file(audio_file("a.mp3", 1024))
            .expect("valid file");
        input.switch_mode(InputMode::Upload);
        assert!(input.draft().file().is_some());
    }

    #[test]
    fn switching_to_text_discards_file() {
        let mut input = input();
        input
            .select_file(audio_file("a.mp3", 1024))
            .expect("valid file");
        input.switch_mode(InputMode::Text);
        assert!(input.draft().is_empty());
        assert_eq!(input.mode(), InputMode::Text);
    }

    #[test]
    fn clear_input_resets_draft_and_error() {
        let mut input = input();
        input
            .select_file(audio_file("a.mp3", 1024))
            .expect("valid file");
        input.clear_input();
        assert!(input.draft().is_empty());
        assert_eq!(input.error(), None);
    }

    #[test]
    fn drag_signals_drive_the_highlight_flag() {
        let mut input = input();
        assert!(!input.drag_active());
        input.drag_enter();
        assert!(input.drag_active());
        input.drag_leave();
        assert!(!input.drag_active());
    }

    #[test]
    fn drop_turns_highlight_off_for_both_outcomes() {
        let mut input = input();

        input.drag_enter();
        input
            .drop_file(audio_file("a.mp3", 1024))
            .expect("valid drop");
        assert!(!input.drag_active());

        input.drag_enter();
        let _ = input.drop_file(audio_file("big.mp3", 200 * 1024 * 1024));
        assert!(!input.drag_active());
        // The rejected drop leaves the previously dropped file in place.
        assert_eq!(input.draft().file().map(|f| f.name.as_str()), Some("a.mp3"));
    }

    #[test]
    fn oversized_drop_scenario_mentions_limit() {
        let mut input = SourceInput::new(UploadConstraints::with_max_mb(100));
        let err = input
            .drop_file(audio_file("show.mp3", 120 * 1024 * 1024))
            .expect_err("should reject 120MB drop");
        assert!(err.to_string().contains("100MB"));
        assert!(input.draft().is_empty());
    }
}
