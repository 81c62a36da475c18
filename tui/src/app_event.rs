//! Application-level events used to coordinate UI actions.

use crossterm::event::Event;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;

/// Semantic events consumed by the app loop. Raw crossterm events are reduced
/// to these so the screens never see the event-dispatch mechanism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    /// Bracketed paste. In Text mode this is transcript content; in Upload
    /// mode a paste that resolves to an existing file path is treated as a
    /// drop onto the upload zone.
    Paste(String),
    /// Terminal resize; triggers a redraw only.
    Redraw,
}

impl AppEvent {
    pub fn from_crossterm(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Some(AppEvent::Key(key)),
            Event::Paste(pasted) => Some(AppEvent::Paste(pasted)),
            Event::Resize(_, _) => Some(AppEvent::Redraw),
            _ => None,
        }
    }
}
