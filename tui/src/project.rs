//! The project screen: source pane + platform picker + generate gate.
//!
//! Owns the two core controllers ([`SourceInput`], [`ContentPicker`]) and the
//! view-only state around them (pane focus, picker cursor, transcript edit
//! buffer). Raw key and paste events are translated here into the semantic
//! operations on the controllers; generate is permitted only while the
//! readiness predicate holds.

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use ratatui::buffer::Buffer;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;
use recast_core::ContentPicker;
use recast_core::InputDraft;
use recast_core::InputMode;
use recast_core::PlatformCatalog;
use recast_core::SourceInput;
use recast_core::UploadConstraints;
use recast_core::readiness;

use crate::dropped_path::dropped_source_file;
use crate::dual_input::render_dual_input;
use crate::footer::FooterProps;
use crate::footer::footer_height;
use crate::footer::render_footer;
use crate::platform_picker::picker_height;
use crate::platform_picker::render_platform_picker;
use crate::text_buffer::TextBuffer;

/// Everything needed to kick off generation, captured at the moment the user
/// confirms. Selections are in catalog order so downstream output is stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub draft: InputDraft,
    pub selections: Vec<(String, u32)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PaneFocus {
    Source,
    Platforms,
}

#[derive(Debug)]
pub struct ProjectScreen {
    source: SourceInput,
    picker: ContentPicker,
    transcript: TextBuffer,
    cursor: usize,
    focus: PaneFocus,
}

impl ProjectScreen {
    pub fn new(constraints: UploadConstraints, catalog: PlatformCatalog) -> Self {
        Self {
            source: SourceInput::new(constraints),
            picker: ContentPicker::new(catalog),
            transcript: TextBuffer::new(),
            cursor: 0,
            focus: PaneFocus::Source,
        }
    }

    pub fn source(&self) -> &SourceInput {
        &self.source
    }

    pub fn picker(&self) -> &ContentPicker {
        &self.picker
    }

    pub fn is_ready(&self) -> bool {
        readiness::is_ready(self.source.draft(), self.picker.selections())
    }

    /// Start a fresh project: empty draft, no selections, upload surface.
    pub fn reset(&mut self) {
        self.source = SourceInput::new(*self.source.constraints());
        self.picker.clear();
        self.transcript.clear();
        self.cursor = 0;
        self.focus = PaneFocus::Source;
    }

    /// Returns a request when the user confirmed generation and the screen
    /// was ready; `None` for every other key.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<GenerateRequest> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('t') => {
                    self.toggle_mode();
                    return None;
                }
                KeyCode::Char('n') => {
                    self.reset();
                    return None;
                }
                KeyCode::Char('g') => {
                    return self.generate_request();
                }
                _ => return None,
            }
        }

        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    PaneFocus::Source => PaneFocus::Platforms,
                    PaneFocus::Platforms => PaneFocus::Source,
                };
                None
            }
            _ => {
                match self.focus {
                    PaneFocus::Source => self.handle_source_key(key),
                    PaneFocus::Platforms => self.handle_picker_key(key),
                }
                None
            }
        }
    }

    /// Bracketed paste. Text mode appends to the transcript; Upload mode
    /// treats a paste that resolves to an existing file as a drop onto the
    /// upload zone and ignores anything else.
    pub fn handle_paste(&mut self, pasted: &str) {
        match self.source.mode() {
            InputMode::Text => {
                self.transcript.insert_str(pasted);
                self.sync_transcript();
            }
            InputMode::Upload => {
                if let Some(file) = dropped_source_file(pasted) {
                    // Validation failure lands in the inline error banner.
                    let _ = self.source.drop_file(file);
                } else {
                    tracing::debug!("ignoring paste that is not a file path in upload mode");
                }
            }
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, user_email: Option<&str>) {
        let footer_props = FooterProps {
            ready: self.is_ready(),
            signed_in: user_email.is_some(),
        };
        let [header, source, platforms, _, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(9),
            Constraint::Length(picker_height(&self.picker)),
            Constraint::Fill(1),
            Constraint::Length(footer_height(footer_props)),
        ])
        .areas(area);

        let mut header_line = Line::from(vec![" recast ".bold().reversed()]);
        if let Some(email) = user_email {
            header_line.push_span(format!("  {email}").dim());
        }
        Paragraph::new(header_line).render(header, buf);

        render_dual_input(source, buf, &self.source, self.focus == PaneFocus::Source);
        render_platform_picker(
            platforms,
            buf,
            &self.picker,
            self.cursor,
            self.focus == PaneFocus::Platforms,
        );
        render_footer(footer, buf, footer_props);
    }

    fn toggle_mode(&mut self) {
        // The transcript buffer shadows the text draft; both surfaces start
        // clean after a switch.
        self.transcript.clear();
        match self.source.mode() {
            InputMode::Upload => self.source.switch_mode(InputMode::Text),
            InputMode::Text => self.source.switch_mode(InputMode::Upload),
        }
    }

    fn generate_request(&self) -> Option<GenerateRequest> {
        if !self.is_ready() {
            return None;
        }
        let selections = self
            .picker
            .catalog()
            .iter()
            .filter_map(|option| {
                self.picker
                    .quantity(&option.id)
                    .map(|quantity| (option.id.clone(), quantity))
            })
            .collect();
        Some(GenerateRequest {
            draft: self.source.draft().clone(),
            selections,
        })
    }

    fn handle_source_key(&mut self, key: KeyEvent) {
        match self.source.mode() {
            InputMode::Upload => {
                if matches!(key.code, KeyCode::Backspace | KeyCode::Delete) {
                    self.source.clear_input();
                }
            }
            InputMode::Text => {
                match key.code {
                    KeyCode::Char(c) => self.transcript.insert_char(c),
                    KeyCode::Enter => self.transcript.insert_char('\n'),
                    KeyCode::Backspace => self.transcript.backspace(),
                    _ => return,
                }
                self.sync_transcript();
            }
        }
    }

    fn handle_picker_key(&mut self, key: KeyEvent) {
        let len = self.picker.catalog().len();
        if len == 0 {
            return;
        }
        let cursor_id = self
            .picker
            .catalog()
            .iter()
            .nth(self.cursor)
            .map(|option| option.id.clone());

        match key.code {
            KeyCode::Up => self.cursor = (self.cursor + len - 1) % len,
            KeyCode::Down => self.cursor = (self.cursor + 1) % len,
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(id) = cursor_id {
                    let enabled = !self.picker.is_selected(&id);
                    self.picker.toggle(&id, enabled);
                }
            }
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => {
                if let Some(id) = cursor_id
                    && let Some(quantity) = self.picker.quantity(&id)
                {
                    self.picker.set_quantity(&id, i64::from(quantity) + 1);
                }
            }
            KeyCode::Char('-') | KeyCode::Left => {
                if let Some(id) = cursor_id
                    && let Some(quantity) = self.picker.quantity(&id)
                {
                    self.picker.set_quantity(&id, i64::from(quantity) - 1);
                }
            }
            KeyCode::Char(c @ '1'..='9') => {
                if let Some(id) = cursor_id {
                    let requested = i64::from(c as u8 - b'0');
                    self.picker.set_quantity(&id, requested);
                }
            }
            _ => {}
        }
    }

    fn sync_transcript(&mut self) {
        self.source.enter_text(self.transcript.text().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn screen() -> ProjectScreen {
        ProjectScreen::new(UploadConstraints::default(), PlatformCatalog::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_str(screen: &mut ProjectScreen, s: &str) {
        for c in s.chars() {
            let _ = screen.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn typing_transcript_updates_the_draft() {
        let mut screen = screen();
        let _ = screen.handle_key(ctrl('t'));
        type_str(&mut screen, "hello");
        assert_eq!(screen.source().draft().text(), Some("hello"));

        let _ = screen.handle_key(key(KeyCode::Backspace));
        assert_eq!(screen.source().draft().text(), Some("hell"));
    }

    #[test]
    fn picker_keys_toggle_and_adjust_quantity() {
        let mut screen = screen();
        let _ = screen.handle_key(key(KeyCode::Tab));
        let _ = screen.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(screen.picker().quantity("linkedin"), Some(2));

        let _ = screen.handle_key(key(KeyCode::Char('+')));
        assert_eq!(screen.picker().quantity("linkedin"), Some(3));

        // Digits jump straight to a count, clamped to the platform bound.
        let _ = screen.handle_key(key(KeyCode::Char('9')));
        assert_eq!(screen.picker().quantity("linkedin"), Some(5));

        let _ = screen.handle_key(key(KeyCode::Char(' ')));
        assert!(!screen.picker().is_selected("linkedin"));
    }

    #[test]
    fn quantity_keys_without_selection_are_ignored() {
        let mut screen = screen();
        let _ = screen.handle_key(key(KeyCode::Tab));
        let _ = screen.handle_key(key(KeyCode::Char('+')));
        let _ = screen.handle_key(key(KeyCode::Char('4')));
        assert!(!screen.picker().is_selected("linkedin"));
    }

    #[test]
    fn cursor_wraps_over_the_catalog() {
        let mut screen = screen();
        let _ = screen.handle_key(key(KeyCode::Tab));
        let _ = screen.handle_key(key(KeyCode::Down));
        let _ = screen.handle_key(key(KeyCode::Char(' ')));
        assert!(screen.picker().is_selected("twitter"));

        let _ = screen.handle_key(key(KeyCode::Down));
        let _ = screen.handle_key(key(KeyCode::Char(' ')));
        assert!(screen.picker().is_selected("linkedin"));
    }

    #[test]
    fn generate_requires_readiness() {
        let mut screen = screen();
        assert_eq!(screen.handle_key(ctrl('g')), None);

        let _ = screen.handle_key(ctrl('t'));
        type_str(&mut screen, "a transcript");
        assert_eq!(screen.handle_key(ctrl('g')), None);

        let _ = screen.handle_key(key(KeyCode::Tab));
        let _ = screen.handle_key(key(KeyCode::Char(' ')));
        let request = screen.handle_key(ctrl('g')).expect("ready to generate");
        assert_eq!(request.draft.text(), Some("a transcript"));
        assert_eq!(request.selections, vec![("linkedin".to_string(), 2)]);
    }

    #[test]
    fn whitespace_transcript_is_not_ready() {
        let mut screen = screen();
        let _ = screen.handle_key(ctrl('t'));
        type_str(&mut screen, "   ");
        let _ = screen.handle_key(key(KeyCode::Tab));
        let _ = screen.handle_key(key(KeyCode::Char(' ')));
        assert!(!screen.is_ready());
        assert_eq!(screen.handle_key(ctrl('g')), None);
    }

    #[test]
    fn selections_follow_catalog_order() {
        let mut screen = screen();
        let _ = screen.handle_key(ctrl('t'));
        type_str(&mut screen, "t");
        let _ = screen.handle_key(key(KeyCode::Tab));
        // Select twitter first, then linkedin.
        let _ = screen.handle_key(key(KeyCode::Down));
        let _ = screen.handle_key(key(KeyCode::Char(' ')));
        let _ = screen.handle_key(key(KeyCode::Up));
        let _ = screen.handle_key(key(KeyCode::Char(' ')));

        let request = screen.handle_key(ctrl('g')).expect("ready");
        assert_eq!(
            request.selections,
            vec![("linkedin".to_string(), 2), ("twitter".to_string(), 3)]
        );
    }

    #[test]
    fn switching_modes_clears_the_other_surface() {
        let mut screen = screen();
        let _ = screen.handle_key(ctrl('t'));
        type_str(&mut screen, "draft text");
        let _ = screen.handle_key(ctrl('t'));
        assert!(screen.source().draft().is_empty());

        // Back to text: the transcript buffer starts clean too.
        let _ = screen.handle_key(ctrl('t'));
        type_str(&mut screen, "x");
        assert_eq!(screen.source().draft().text(), Some("x"));
    }

    #[test]
    fn paste_of_a_file_path_in_upload_mode_is_a_drop() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("episode.mp3");
        std::fs::write(&path, vec![0u8; 4096]).expect("write file");

        let mut screen = screen();
        screen.handle_paste(&path.to_string_lossy());
        let file = screen.source().draft().file().expect("file draft");
        assert_eq!(file.name, "episode.mp3");
        assert!(!screen.source().drag_active());
    }

    #[test]
    fn paste_of_plain_text_in_upload_mode_is_ignored() {
        let mut screen = screen();
        screen.handle_paste("just some words, not a path");
        assert!(screen.source().draft().is_empty());
    }

    #[test]
    fn backspace_removes_the_selected_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("episode.mp3");
        std::fs::write(&path, vec![0u8; 4096]).expect("write file");

        let mut screen = screen();
        screen.handle_paste(&path.to_string_lossy());
        assert!(screen.source().draft().file().is_some());

        let _ = screen.handle_key(key(KeyCode::Backspace));
        assert!(screen.source().draft().is_empty());
    }

    #[test]
    fn reset_returns_to_a_fresh_project() {
        let mut screen = screen();
        let _ = screen.handle_key(ctrl('t'));
        type_str(&mut screen, "text");
        let _ = screen.handle_key(key(KeyCode::Tab));
        let _ = screen.handle_key(key(KeyCode::Char(' ')));
        assert!(screen.is_ready());

        let _ = screen.handle_key(ctrl('n'));
        assert!(screen.source().draft().is_empty());
        assert!(screen.picker().selections().is_empty());
        assert_eq!(screen.source().mode(), InputMode::Upload);
        assert!(!screen.is_ready());
    }

    #[test]
    fn render_smoke_test() {
        let mut terminal = ratatui::Terminal::new(ratatui::backend::TestBackend::new(80, 20))
            .expect("terminal");
        let screen = screen();
        terminal
            .draw(|f| screen.render(f.area(), f.buffer_mut(), Some("user@example.com")))
            .expect("draw");
        let out = format!("{:?}", terminal.backend().buffer());
        assert!(out.contains("Upload your audio file"));
        assert!(out.contains("LinkedIn"));
        assert!(out.contains("user@example.com"));
    }
}
