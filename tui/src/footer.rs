//! The footer renders the keyboard hints under the composer.
//!
//! Pure rendering: it formats [`FooterProps`] into a `Line` without mutating
//! any state. Whether generate is currently allowed is decided upstream and
//! passed in; the footer does not query the controllers.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;

#[derive(Clone, Copy, Debug)]
pub struct FooterProps {
    /// Result of the readiness predicate; controls how the generate hint is
    /// styled.
    pub ready: bool,
    /// Whether a sign-out hint should be shown.
    pub signed_in: bool,
}

pub fn footer_height(_props: FooterProps) -> u16 {
    1
}

pub fn render_footer(area: Rect, buf: &mut Buffer, props: FooterProps) {
    Paragraph::new(footer_line(props)).render(area, buf);
}

fn footer_line(props: FooterProps) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = vec![
        " tab".into(),
        " pane ".dim(),
        " ctrl+t".into(),
        " upload/text ".dim(),
        " ctrl+n".into(),
        " new project ".dim(),
    ];

    if props.ready {
        spans.push(" ctrl+g".bold());
        spans.push(" generate ".into());
    } else {
        spans.push(" ctrl+g".dim());
        spans.push(" generate ".dim());
    }

    if props.signed_in {
        spans.push(" ctrl+l".into());
        spans.push(" sign out ".dim());
    }

    spans.push(" ctrl+c".into());
    spans.push(" quit".dim());

    Line::from(spans)
}
