//! Checkbox list over the platform catalog.
//!
//! One row per catalog entry, in catalog order. A selected row shows the
//! requested quantity and its bound; an unselected row shows the default that
//! would apply on toggle. The cursor is view state only and lives in the
//! project screen.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;
use recast_core::ContentPicker;

/// Rows plus the surrounding border.
pub fn picker_height(picker: &ContentPicker) -> u16 {
    picker.catalog().len() as u16 + 2
}

pub fn render_platform_picker(
    area: Rect,
    buf: &mut Buffer,
    picker: &ContentPicker,
    cursor: usize,
    focused: bool,
) {
    let block = Block::default().borders(Borders::ALL).title(" Platforms ");
    let inner = block.inner(area);
    block.render(area, buf);

    let lines: Vec<Line<'static>> = picker
        .catalog()
        .iter()
        .enumerate()
        .map(|(idx, option)| {
            let pointer: Span<'static> = if focused && idx == cursor {
                "› ".cyan()
            } else {
                "  ".into()
            };

            match picker.quantity(&option.id) {
                Some(quantity) => Line::from(vec![
                    pointer,
                    "[x] ".into(),
                    option.display_name.clone().bold(),
                    format!("  posts: {quantity} (max {})", option.max_quantity).dim(),
                ]),
                None => Line::from(vec![
                    pointer,
                    "[ ] ".into(),
                    option.display_name.clone().into(),
                    format!("  default {}", option.default_quantity).dim(),
                ]),
            }
        })
        .collect();

    Paragraph::new(lines).render(inner, buf);
}
