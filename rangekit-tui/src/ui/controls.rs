//! Control rows — label, track with thumbs, value text; colour swatch below.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use rangekit_core::{ColorReadout, DualRange, Slider, Thumb};

use crate::app::{AppState, RowKind, LABEL_WIDTH, ROW_PITCH, VALUE_WIDTH};
use crate::theme;

const THUMB: &str = "●";
const LOW_THUMB: &str = "◀";
const HIGH_THUMB: &str = "▶";
const RAIL: &str = "─";
const FILL: &str = "━";

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    for row in &app.rows {
        let track = row.track;
        let label_area = Rect::new(area.x, track.y, LABEL_WIDTH.saturating_sub(1), 1);
        let value_x = track.x + track.width + 1;
        let value_area = Rect::new(value_x, track.y, VALUE_WIDTH.saturating_sub(1), 1);

        let (label, line, value) = match row.kind {
            RowKind::Slider(i) => {
                let slider = &app.board.sliders()[i];
                (
                    label_span(slider.label(), slider.is_focused()),
                    slider_line(slider, track),
                    slider.state().value_text.clone(),
                )
            }
            RowKind::Dual(i) => {
                let dual = &app.board.duals()[i];
                let low = &dual.thumb(Thumb::Low).state().value_text;
                let high = &dual.thumb(Thumb::High).state().value_text;
                (
                    label_span(dual.label(), dual.rail_focused()),
                    range_line(dual, track),
                    format!("{low} to {high}"),
                )
            }
        };
        f.render_widget(Paragraph::new(Line::from(label)), label_area);
        f.render_widget(Paragraph::new(line), track);
        f.render_widget(Paragraph::new(Span::styled(value, theme::neutral())), value_area);
    }

    if let Some(readout) = app.board.color() {
        let y = area.y + app.rows.len() as u16 * ROW_PITCH;
        if y < area.y + area.height {
            let swatch = Rect::new(area.x, y, area.width, 1);
            f.render_widget(Paragraph::new(color_line(readout)), swatch);
        }
    }
}

fn label_span(label: &str, focused: bool) -> Span<'static> {
    let style = if focused { theme::accent_bold() } else { theme::muted() };
    Span::styled(label.to_string(), style)
}

/// Column inside a `width`-wide track that an indicator position falls on.
pub fn indicator_column(position: f64, origin: u16, width: u16) -> usize {
    let last = width.saturating_sub(1) as f64;
    (position - origin as f64).round().clamp(0.0, last) as usize
}

fn slider_line(slider: &Slider, track: Rect) -> Line<'static> {
    let width = track.width as usize;
    let thumb = indicator_column(slider.indicator_position(), track.x, track.width);
    let rail = theme::rail(slider.is_focused());
    Line::from(vec![
        Span::styled(FILL.repeat(thumb), theme::positive()),
        Span::styled(THUMB, theme::thumb(slider.is_focused(), slider.is_dragging())),
        Span::styled(RAIL.repeat(width.saturating_sub(thumb + 1)), rail),
    ])
}

fn range_line(dual: &DualRange, track: Rect) -> Line<'static> {
    let width = track.width as usize;
    let low = dual.thumb(Thumb::Low);
    let high = dual.thumb(Thumb::High);
    let low_col = indicator_column(low.indicator_position(), track.x, track.width);
    let high_col =
        indicator_column(high.indicator_position(), track.x, track.width).max(low_col + 1);
    let rail = theme::rail(dual.rail_focused());
    Line::from(vec![
        Span::styled(RAIL.repeat(low_col), rail),
        Span::styled(LOW_THUMB, theme::thumb(low.is_focused(), low.is_dragging())),
        Span::styled(FILL.repeat(high_col - low_col - 1), theme::positive()),
        Span::styled(HIGH_THUMB, theme::thumb(high.is_focused(), high.is_dragging())),
        Span::styled(RAIL.repeat(width.saturating_sub(high_col + 1)), rail),
    ])
}

fn color_line(readout: &ColorReadout) -> Line<'static> {
    let [r, g, b] = readout.channels.map(|c| c.clamp(0, 255) as u8);
    Line::from(vec![
        Span::styled(format!("{:<width$}", "Colour", width = LABEL_WIDTH as usize), theme::muted()),
        Span::styled("        ", Style::default().bg(Color::Rgb(r, g, b))),
        Span::raw("  "),
        Span::styled(readout.hex.clone(), theme::accent_bold()),
        Span::raw("  "),
        Span::styled(format!("rgb({})", readout.rgb), theme::neutral()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_column_clamps_to_track() {
        assert_eq!(indicator_column(10.0, 10, 20), 0);
        assert_eq!(indicator_column(14.4, 10, 20), 4);
        assert_eq!(indicator_column(2.0, 10, 20), 0);
        assert_eq!(indicator_column(100.0, 10, 20), 19);
        assert_eq!(indicator_column(5.0, 0, 0), 0);
    }

    #[test]
    fn colour_line_shows_readout() {
        let line = color_line(&ColorReadout::from_channels(255, 0, 16));
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains("#ff0010"));
        assert!(text.contains("rgb(255, 0, 16)"));
        assert_eq!(line.spans[1].style.bg, Some(Color::Rgb(255, 0, 16)));
    }

    #[test]
    fn colour_line_clamps_out_of_byte_channels() {
        let line = color_line(&ColorReadout::from_channels(300, -5, 0));
        assert_eq!(line.spans[1].style.bg, Some(Color::Rgb(255, 0, 0)));
    }
}
