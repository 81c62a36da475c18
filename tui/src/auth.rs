//! Sign-in and sign-up screens.
//!
//! Each form owns its field buffers, a focus index, the in-flight flag for
//! the provider call, and the last error string. Client-side validation runs
//! on submit; only the first violation is surfaced, in the same order the
//! fields appear on screen. Provider errors are rendered verbatim.

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;
use recast_core::SignInRequest;
use recast_core::SignUpRequest;
use recast_core::check_password_strength;
use recast_core::is_valid_email;

use crate::text_buffer::TextBuffer;

#[derive(Debug, Default)]
pub struct SignInForm {
    email: TextBuffer,
    password: TextBuffer,
    focus: usize,
    pub loading: bool,
    pub error: Option<String>,
}

impl SignInForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the email field (e.g. from a remembered address) and move focus
    /// straight to the password.
    pub fn prefill_email(&mut self, email: &str) {
        self.email.clear();
        self.email.insert_str(email);
        self.focus = 1;
    }

    /// Returns a request when Enter was pressed and the form validates.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<SignInRequest> {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % 2;
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + 1) % 2;
                None
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Char(c) => {
                self.error = None;
                self.active_field().insert_char(c);
                None
            }
            KeyCode::Backspace => {
                self.error = None;
                self.active_field().backspace();
                None
            }
            _ => None,
        }
    }

    pub fn handle_paste(&mut self, pasted: &str) {
        self.error = None;
        self.active_field().insert_str(pasted);
    }

    fn submit(&mut self) -> Option<SignInRequest> {
        if !is_valid_email(self.email.text()) {
            self.error = Some("Please enter a valid email address".to_string());
            return None;
        }
        if self.password.is_empty() {
            self.error = Some("Password is required".to_string());
            return None;
        }
        self.error = None;
        Some(SignInRequest {
            email: self.email.text().to_string(),
            password: self.password.text().to_string(),
        })
    }

    fn active_field(&mut self) -> &mut TextBuffer {
        match self.focus {
            0 => &mut self.email,
            _ => &mut self.password,
        }
    }
}

#[derive(Debug, Default)]
pub struct SignUpForm {
    first_name: TextBuffer,
    last_name: TextBuffer,
    email: TextBuffer,
    password: TextBuffer,
    confirm_password: TextBuffer,
    focus: usize,
    pub loading: bool,
    pub error: Option<String>,
}

impl SignUpForm {
    const FIELDS: usize = 5;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<SignUpRequest> {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % Self::FIELDS;
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + Self::FIELDS - 1) % Self::FIELDS;
                None
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Char(c) => {
                self.error = None;
                self.active_field().insert_char(c);
                None
            }
            KeyCode::Backspace => {
                self.error = None;
                self.active_field().backspace();
                None
            }
            _ => None,
        }
    }

    pub fn handle_paste(&mut self, pasted: &str) {
        self.error = None;
        self.active_field().insert_str(pasted);
    }

    /// First violation wins, checked in field order: names, email, password
    /// strength, confirmation match.
    fn submit(&mut self) -> Option<SignUpRequest> {
        if self.first_name.text().trim().is_empty() {
            self.error = Some("First name is required".to_string());
            return None;
        }
        if self.last_name.text().trim().is_empty() {
            self.error = Some("Last name is required".to_string());
            return None;
        }
        if !is_valid_email(self.email.text()) {
            self.error = Some("Please enter a valid email address".to_string());
            return None;
        }
        let strength = check_password_strength(self.password.text());
        if let Some(first) = strength.errors.first() {
            self.error = Some(first.clone());
            return None;
        }
        if self.password.text() != self.confirm_password.text() {
            self.error = Some("Passwords do not match".to_string());
            return None;
        }
        self.error = None;
        Some(SignUpRequest {
            email: self.email.text().to_string(),
            password: self.password.text().to_string(),
            first_name: self.first_name.text().trim().to_string(),
            last_name: self.last_name.text().trim().to_string(),
        })
    }

    fn active_field(&mut self) -> &mut TextBuffer {
        match self.focus {
            0 => &mut self.first_name,
            1 => &mut self.last_name,
            2 => &mut self.email,
            3 => &mut self.password,
            _ => &mut self.confirm_password,
        }
    }
}

pub fn render_sign_in(area: Rect, buf: &mut Buffer, form: &SignInForm) {
    let mut lines = vec![
        Line::from(""),
        Line::from(" Sign in to recast ".bold().reversed()),
        Line::from(""),
        field_line("Email", form.email.text(), false, form.focus == 0),
        field_line("Password", form.password.text(), true, form.focus == 1),
    ];
    push_status(&mut lines, form.loading, "Signing in...", form.error.as_deref());
    lines.push(Line::from(""));
    lines.push(Line::from(
        "enter sign in · tab next field · ctrl+u create account · ctrl+c quit".dim(),
    ));
    Paragraph::new(lines).render(area, buf);
}

pub fn render_sign_up(area: Rect, buf: &mut Buffer, form: &SignUpForm) {
    let mut lines = vec![
        Line::from(""),
        Line::from(" Create your recast account ".bold().reversed()),
        Line::from(""),
        field_line("First name", form.first_name.text(), false, form.focus == 0),
        field_line("Last name", form.last_name.text(), false, form.focus == 1),
        field_line("Email", form.email.text(), false, form.focus == 2),
        field_line("Password", form.password.text(), true, form.focus == 3),
        field_line(
            "Confirm password",
            form.confirm_password.text(),
            true,
            form.focus == 4,
        ),
    ];
    push_status(
        &mut lines,
        form.loading,
        "Creating account...",
        form.error.as_deref(),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(
        "enter create account · tab next field · ctrl+u back to sign in · ctrl+c quit".dim(),
    ));
    Paragraph::new(lines).render(area, buf);
}

fn field_line(label: &str, value: &str, masked: bool, focused: bool) -> Line<'static> {
    let pointer: Span<'static> = if focused { " › ".cyan() } else { "   ".into() };
    let shown = if masked {
        "•".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    let value_span: Span<'static> = if focused {
        format!("{shown}▏").into()
    } else if shown.is_empty() {
        "—".dim()
    } else {
        shown.into()
    };
    Line::from(vec![pointer, format!("{label:<17}").dim(), value_span])
}

fn push_status(lines: &mut Vec<Line<'static>>, loading: bool, busy_text: &str, error: Option<&str>) {
    lines.push(Line::from(""));
    if loading {
        lines.push(Line::from(busy_text.to_string().dim()));
    } else if let Some(error) = error {
        lines.push(Line::from(error.to_string().red()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(mut press: impl FnMut(KeyEvent), s: &str) {
        for c in s.chars() {
            press(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn sign_in_rejects_invalid_email() {
        let mut form = SignInForm::new();
        type_str(|k| drop(form.handle_key(k)), "not-an-email");
        assert_eq!(form.handle_key(key(KeyCode::Enter)), None);
        assert_eq!(
            form.error.as_deref(),
            Some("Please enter a valid email address")
        );

        // Typing again clears the error.
        let _ = form.handle_key(key(KeyCode::Backspace));
        assert_eq!(form.error, None);
    }

    #[test]
    fn sign_in_builds_a_request() {
        let mut form = SignInForm::new();
        type_str(|k| drop(form.handle_key(k)), "user@example.com");
        let _ = form.handle_key(key(KeyCode::Tab));
        type_str(|k| drop(form.handle_key(k)), "hunter22");
        let request = form.handle_key(key(KeyCode::Enter)).expect("valid form");
        assert_eq!(request.email, "user@example.com");
        assert_eq!(request.password, "hunter22");
    }

    #[test]
    fn prefilled_email_moves_focus_to_password() {
        let mut form = SignInForm::new();
        form.prefill_email("user@example.com");
        type_str(|k| drop(form.handle_key(k)), "hunter22");
        let request = form.handle_key(key(KeyCode::Enter)).expect("valid form");
        assert_eq!(request.email, "user@example.com");
        assert_eq!(request.password, "hunter22");
    }

    fn filled_sign_up(password: &str, confirm: &str) -> SignUpForm {
        let mut form = SignUpForm::new();
        type_str(|k| drop(form.handle_key(k)), "Ada");
        let _ = form.handle_key(key(KeyCode::Tab));
        type_str(|k| drop(form.handle_key(k)), "Lovelace");
        let _ = form.handle_key(key(KeyCode::Tab));
        type_str(|k| drop(form.handle_key(k)), "ada@example.com");
        let _ = form.handle_key(key(KeyCode::Tab));
        type_str(|k| drop(form.handle_key(k)), password);
        let _ = form.handle_key(key(KeyCode::Tab));
        type_str(|k| drop(form.handle_key(k)), confirm);
        form
    }

    #[test]
    fn sign_up_validates_in_field_order() {
        let mut form = SignUpForm::new();
        assert_eq!(form.handle_key(key(KeyCode::Enter)), None);
        assert_eq!(form.error.as_deref(), Some("First name is required"));

        type_str(|k| drop(form.handle_key(k)), "Ada");
        assert_eq!(form.handle_key(key(KeyCode::Enter)), None);
        assert_eq!(form.error.as_deref(), Some("Last name is required"));
    }

    #[test]
    fn sign_up_surfaces_first_password_violation() {
        let mut form = filled_sign_up("abc", "abc");
        assert_eq!(form.handle_key(key(KeyCode::Enter)), None);
        assert_eq!(
            form.error.as_deref(),
            Some("Password must be at least 8 characters long")
        );
    }

    #[test]
    fn sign_up_requires_matching_passwords() {
        let mut form = filled_sign_up("Abcdefg1", "Abcdefg2");
        assert_eq!(form.handle_key(key(KeyCode::Enter)), None);
        assert_eq!(form.error.as_deref(), Some("Passwords do not match"));
    }

    #[test]
    fn sign_up_builds_a_request() {
        let mut form = filled_sign_up("Abcdefg1", "Abcdefg1");
        let request = form.handle_key(key(KeyCode::Enter)).expect("valid form");
        assert_eq!(request.email, "ada@example.com");
        assert_eq!(request.first_name, "Ada");
        assert_eq!(request.last_name, "Lovelace");
        assert_eq!(request.password, "Abcdefg1");
    }

    #[test]
    fn password_field_is_masked_in_render() {
        let form = filled_sign_up("Abcdefg1", "Abcdefg1");
        let mut terminal = ratatui::Terminal::new(ratatui::backend::TestBackend::new(70, 14))
            .expect("terminal");
        terminal
            .draw(|f| render_sign_up(f.area(), f.buffer_mut(), &form))
            .expect("draw");
        let out = format!("{:?}", terminal.backend().buffer());
        assert!(out.contains("ada@example.com"));
        assert!(!out.contains("Abcdefg1"));
        assert!(out.contains("••••••••"));
    }
}
