//! Top-level app: screen routing, session lifecycle, event loop.
//!
//! The app is generic over the [`SessionProvider`] so tests drive it with an
//! in-memory stub. Running without a provider skips the auth screens entirely
//! and lands on the project screen (local mode).

use crossterm::event::EventStream;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use ratatui::Frame;
use recast_core::PlatformCatalog;
use recast_core::Session;
use recast_core::SessionProvider;
use recast_core::SignInRequest;
use recast_core::SignUpRequest;
use recast_core::UploadConstraints;
use tokio_stream::StreamExt;

use crate::app_event::AppEvent;
use crate::auth::SignInForm;
use crate::auth::SignUpForm;
use crate::auth::render_sign_in;
use crate::auth::render_sign_up;
use crate::project::GenerateRequest;
use crate::project::ProjectScreen;
use crate::tui::RecastTui;

/// Why the app loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppOutcome {
    /// The user confirmed generation; the caller takes over from here.
    Generate(GenerateRequest),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    SignIn,
    SignUp,
    Project,
}

/// A validated form submission waiting on the provider. Staged by
/// `handle_event` and resolved by the loop one frame later, so the form's
/// loading state is on screen while the call is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingSubmit {
    SignIn(SignInRequest),
    SignUp(SignUpRequest),
}

pub struct App<P> {
    provider: Option<P>,
    screen: Screen,
    sign_in: SignInForm,
    sign_up: SignUpForm,
    project: ProjectScreen,
    session: Option<Session>,
    pending_submit: Option<PendingSubmit>,
}

impl<P: SessionProvider> App<P> {
    pub fn new(
        provider: Option<P>,
        constraints: UploadConstraints,
        catalog: PlatformCatalog,
    ) -> Self {
        let screen = if provider.is_some() {
            Screen::SignIn
        } else {
            Screen::Project
        };
        Self {
            provider,
            screen,
            sign_in: SignInForm::new(),
            sign_up: SignUpForm::new(),
            project: ProjectScreen::new(constraints, catalog),
            session: None,
            pending_submit: None,
        }
    }

    /// Restore an existing session before showing the auth screens. A
    /// provider failure here is not fatal; the user can still sign in.
    pub async fn resume_session(&mut self) {
        let result = match &self.provider {
            Some(provider) => provider.get_session().await,
            None => return,
        };
        match result {
            Ok(Some(session)) => {
                tracing::info!("resumed session for {}", session.user.email);
                self.session = Some(session);
                self.screen = Screen::Project;
            }
            Ok(None) => {}
            Err(err) => tracing::warn!("could not restore session: {err}"),
        }
    }

    /// Prefill the sign-in email (from the persisted config) and move focus
    /// to the password field.
    pub fn with_last_email(mut self, email: Option<String>) -> Self {
        if let Some(email) = email {
            self.sign_in.prefill_email(&email);
        }
        self
    }

    /// Email of the signed-in user, if any. Valid after `run` returns since
    /// the loop no longer consumes the app.
    pub fn session_email(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.user.email.as_str())
    }

    pub async fn run(&mut self, tui: &mut RecastTui) -> anyhow::Result<AppOutcome> {
        self.resume_session().await;
        let mut events = EventStream::new();
        loop {
            tui.terminal.draw(|frame| self.draw(frame))?;
            // The loading frame for a staged submission is now on screen;
            // safe to block on the provider.
            if self.pending_submit.is_some() {
                self.resolve_pending_submit().await;
                continue;
            }
            let Some(event) = events.next().await else {
                return Ok(AppOutcome::Quit);
            };
            let Some(event) = AppEvent::from_crossterm(event?) else {
                continue;
            };
            if let Some(outcome) = self.handle_event(event).await {
                return Ok(outcome);
            }
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let buf = frame.buffer_mut();
        match self.screen {
            Screen::SignIn => render_sign_in(area, buf, &self.sign_in),
            Screen::SignUp => render_sign_up(area, buf, &self.sign_up),
            Screen::Project => self.project.render(
                area,
                buf,
                self.session.as_ref().map(|s| s.user.email.as_str()),
            ),
        }
    }

    /// Advance the state machine by one event. Public so tests can drive the
    /// app without a terminal.
    pub async fn handle_event(&mut self, event: AppEvent) -> Option<AppOutcome> {
        match event {
            AppEvent::Key(key) if is_ctrl(key, 'c') => Some(AppOutcome::Quit),
            AppEvent::Key(key) => self.handle_key(key).await,
            AppEvent::Paste(pasted) => {
                match self.screen {
                    Screen::SignIn => self.sign_in.handle_paste(&pasted),
                    Screen::SignUp => self.sign_up.handle_paste(&pasted),
                    Screen::Project => self.project.handle_paste(&pasted),
                }
                None
            }
            AppEvent::Redraw => None,
        }
    }

    async fn handle_key(&mut self, key: KeyEvent) -> Option<AppOutcome> {
        match self.screen {
            Screen::SignIn => {
                if is_ctrl(key, 'u') {
                    self.sign_up = SignUpForm::new();
                    self.screen = Screen::SignUp;
                    return None;
                }
                if self.sign_in.loading {
                    return None;
                }
                if let Some(request) = self.sign_in.handle_key(key) {
                    self.sign_in.loading = true;
                    self.pending_submit = Some(PendingSubmit::SignIn(request));
                }
                None
            }
            Screen::SignUp => {
                if is_ctrl(key, 'u') || key.code == KeyCode::Esc {
                    self.screen = Screen::SignIn;
                    return None;
                }
                if self.sign_up.loading {
                    return None;
                }
                if let Some(request) = self.sign_up.handle_key(key) {
                    self.sign_up.loading = true;
                    self.pending_submit = Some(PendingSubmit::SignUp(request));
                }
                None
            }
            Screen::Project => {
                if is_ctrl(key, 'l') {
                    self.sign_out().await;
                    return None;
                }
                self.project
                    .handle_key(key)
                    .map(AppOutcome::Generate)
            }
        }
    }

    /// Run the staged provider call and fold its outcome back into the form.
    /// Public alongside `handle_event` so tests can drive the full submit
    /// cycle without a terminal.
    pub async fn resolve_pending_submit(&mut self) {
        let Some(pending) = self.pending_submit.take() else {
            return;
        };
        let Some(provider) = &self.provider else {
            self.sign_in.loading = false;
            self.sign_up.loading = false;
            return;
        };

        match pending {
            PendingSubmit::SignIn(request) => {
                let result = provider.sign_in(request).await;
                self.sign_in.loading = false;
                match result {
                    Ok(session) => self.enter_project(session),
                    Err(err) => self.sign_in.error = Some(err.to_string()),
                }
            }
            PendingSubmit::SignUp(request) => {
                let result = provider.sign_up(request).await;
                self.sign_up.loading = false;
                match result {
                    Ok(session) => self.enter_project(session),
                    Err(err) => self.sign_up.error = Some(err.to_string()),
                }
            }
        }
    }

    fn enter_project(&mut self, session: Session) {
        tracing::info!("signed in as {}", session.user.email);
        self.session = Some(session);
        self.sign_in = SignInForm::new();
        self.sign_up = SignUpForm::new();
        self.project.reset();
        self.screen = Screen::Project;
    }

    async fn sign_out(&mut self) {
        let result = match &self.provider {
            Some(provider) => provider.sign_out().await,
            None => return,
        };
        match result {
            Ok(()) => {
                self.session = None;
                self.project.reset();
                self.screen = Screen::SignIn;
            }
            // Keep the session; the user can retry.
            Err(err) => tracing::warn!("sign out failed: {err}"),
        }
    }
}

fn is_ctrl(key: KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}
