//! The dual-surface source pane.
//!
//! Renders the [`SourceInput`] state: an upload drop zone (with drag
//! highlight and selected-file card) or a transcript area, plus the inline
//! validation error. Pure rendering over the core state; all mutation happens
//! through the semantic operations on [`SourceInput`] in the project screen.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;
use ratatui::widgets::Wrap;
use recast_core::InputMode;
use recast_core::SourceInput;
use recast_core::format_file_size;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

pub fn render_dual_input(area: Rect, buf: &mut Buffer, source: &SourceInput, focused: bool) {
    let border_style = if source.drag_active() {
        Style::default().fg(Color::Yellow)
    } else if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(mode_tabs(source.mode()));
    let inner = block.inner(area);
    block.render(area, buf);

    let mut lines = match source.mode() {
        InputMode::Upload => upload_lines(source, inner.width),
        InputMode::Text => transcript_lines(source),
    };

    if let Some(err) = source.error() {
        lines.push(Line::from(""));
        lines.push(Line::from(err.to_string().red()));
    }

    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .render(inner, buf);
}

fn mode_tabs(mode: InputMode) -> Line<'static> {
    let (upload, text): (Span<'static>, Span<'static>) = match mode {
        InputMode::Upload => (" Upload File ".bold(), " Paste Text ".dim()),
        InputMode::Text => (" Upload File ".dim(), " Paste Text ".bold()),
    };
    Line::from(vec![upload, "│".dim(), text])
}

fn upload_lines(source: &SourceInput, width: u16) -> Vec<Line<'static>> {
    if let Some(file) = source.draft().file() {
        let name = truncate_to_width(&file.name, width.saturating_sub(4) as usize);
        return vec![
            Line::from(""),
            Line::from(vec!["♪ ".into(), name.bold()]),
            Line::from(
                format!(
                    "{} · backspace to remove",
                    format_file_size(file.size_bytes)
                )
                .dim(),
            ),
        ];
    }

    let limit_mb = source.constraints().max_size_mb();
    let hint = if source.drag_active() {
        Line::from("Release to upload".yellow().bold())
    } else {
        Line::from("Paste a file path here, or drop a file onto the terminal".dim())
    };
    vec![
        Line::from(""),
        Line::from("Upload your audio file".bold()),
        hint,
        Line::from(format!("Supports audio files up to {limit_mb}MB").dim()),
    ]
}

fn transcript_lines(source: &SourceInput) -> Vec<Line<'static>> {
    let content = source.draft().text().unwrap_or("");
    if content.is_empty() {
        return vec![
            Line::from(""),
            Line::from("Paste your transcript here...".dim()),
        ];
    }

    let mut lines: Vec<Line<'static>> = content
        .lines()
        .map(|l| Line::from(l.to_string()))
        .collect();
    if content.ends_with('\n') {
        lines.push(Line::from(""));
    }
    let chars = content.chars().count();
    lines.push(Line::from(format!("{chars} characters").dim()));
    lines
}

/// Truncate to a display-cell budget, appending `…` when anything was cut.
/// Wide characters (CJK) count as two cells.
fn truncate_to_width(text: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(text) <= max_width {
        return text.to_string();
    }
    let budget = max_width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}
