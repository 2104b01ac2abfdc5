//! Photo detail view contents.
//!
//! Terminals cannot show the image itself, so the detail view lists what
//! the API says about the photo and where each rendition can be fetched.

use super::constants::{DETAIL_POPUP_HEIGHT_PERCENT, DETAIL_POPUP_WIDTH_PERCENT};
use super::layout::centered_percent;
use super::modal::{render_modal_frame, render_modal_hint};
use super::styles::Palette;
use crate::model::Photo;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

/// Draw the detail view for `photo`. Returns the modal rect.
pub fn render_detail_modal(frame: &mut Frame, photo: Option<&Photo>, palette: &Palette) -> Rect {
    let area = centered_percent(
        DETAIL_POPUP_WIDTH_PERCENT,
        DETAIL_POPUP_HEIGHT_PERCENT,
        frame.area(),
    );
    let inner = render_modal_frame(frame, area, " Photo ", palette);
    let lines = match photo {
        Some(photo) => detail_lines(photo, palette),
        None => vec![Line::from("No photo selected")],
    };
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    render_modal_hint(frame, area, "Esc or click outside: close", palette);
    area
}

fn field<'a>(label: &'static str, value: String, palette: &Palette) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<14}", label), palette.key_hint),
        Span::raw(value),
    ])
}

/// Lines describing `photo`.
pub fn detail_lines<'a>(photo: &Photo, palette: &Palette) -> Vec<Line<'a>> {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("#{}  {}", photo.ref_index, photo.caption()),
            palette.section_header,
        )),
        Line::from(""),
        field("Photographer", photo.photographer.clone(), palette),
        field("Profile", photo.photographer_url.clone(), palette),
        field("Size", photo.dimensions_label(), palette),
        field("Page", photo.url.clone(), palette),
    ];
    if let Some(color) = photo.avg_color.as_deref().filter(|c| !c.is_empty()) {
        lines.push(field("Avg color", color.to_string(), palette));
    }
    if photo.liked {
        lines.push(field("Liked", "yes".to_string(), palette));
    }

    let renditions = photo.src.renditions();
    if !renditions.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Downloads", palette.section_header)));
        for (name, url) in renditions {
            lines.push(field(name, url.to_string(), palette));
        }
    }
    lines
}
