//! Plain-text rendering of a [`SearchPageView`] for the terminal.

use crate::highlight::Segment;
use crate::pagination::{PageMarker, Pagination};
use crate::views::{CardView, DisplayMode, SearchPageView};

const MARK: &str = "**";

pub fn render_page(view: &SearchPageView) -> String {
    match &view.display {
        DisplayMode::Idle => String::new(),
        DisplayMode::Loading => "Searching...".to_string(),
        DisplayMode::Failure { reason } => format!("Error: {reason}"),
        DisplayMode::Empty => "No results found".to_string(),
        DisplayMode::Results => {
            let mut lines = Vec::new();
            for (i, card) in view.cards.iter().enumerate() {
                lines.extend(render_card(i + 1, card));
                lines.push(String::new());
            }
            if let Some(pagination) = &view.pagination {
                lines.push(render_pagination(pagination));
            }
            lines.join("\n")
        }
    }
}

fn render_card(position: usize, card: &CardView) -> Vec<String> {
    let item = &card.item;
    let mut lines = vec![format!(
        "{position}. {} <{}>",
        item.display_name, item.profile_url
    )];
    if let Some(headline) = &item.headline {
        lines.push(format!("   {headline}"));
    }
    if !card.highlighted.is_empty() {
        lines.push(format!("   {}", render_segments(&card.highlighted)));
    }
    if let Some(details) = &item.additional_details {
        lines.push(format!("   {details}"));
    }
    if let Some(location) = &item.location {
        lines.push(format!("   Location: {location}"));
    }
    if let Some(sample) = &item.sample_name {
        lines.push(format!("   Sample: {sample}"));
    }
    if let Some(media) = &item.media_url {
        lines.push(format!("   Audio: {media}"));
    }
    lines
}

/// Wraps matching segments in `**`.
pub fn render_segments(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| {
            if s.is_match {
                format!("{MARK}{}{MARK}", s.text)
            } else {
                s.text.clone()
            }
        })
        .collect()
}

/// One-line control, e.g. `< Prev  1 ... 8 9 [10] 11 12 ... 20  Next >`.
pub fn render_pagination(pagination: &Pagination) -> String {
    let mut parts = Vec::with_capacity(pagination.markers.len() + 2);
    if pagination.has_previous {
        parts.push("< Prev ".to_string());
    }
    for marker in &pagination.markers {
        parts.push(match marker {
            PageMarker::Page(n) if *n == pagination.current => format!("[{n}]"),
            PageMarker::Page(n) => n.to_string(),
            PageMarker::Ellipsis => "...".to_string(),
        });
    }
    if pagination.has_next {
        parts.push(" Next >".to_string());
    }
    parts.join(" ")
}
