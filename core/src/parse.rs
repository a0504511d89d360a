//! Marker-based parsing of model replies.
//!
//! Replies are free-form text that should contain `TITLE:`, `BULLETS:`,
//! `NOTES:`, and `IMAGE:` sections. Each field is the substring between its
//! marker and the next marker that is present (or the end of the text).
//! Marker parsing against free-form model output is fragile, so every
//! field has a hard fallback and the pipeline never aborts on a bad reply.

use clubdeck_common::{SlideContent, TitleSlide};

pub const FALLBACK_TITLE: &str = "Slide Title (Parsing Failed)";
pub const FALLBACK_BULLETS: [&str; 2] = ["Failed to parse content", "Please check API response"];
pub const FALLBACK_NOTES: &str = "Parsing failed for this slide's content.";
pub const FALLBACK_IMAGE_TERM: &str = "error";

const TITLE_MARKER: &str = "TITLE:";
const SUBTITLE_MARKER: &str = "SUBTITLE:";
const BULLETS_MARKER: &str = "BULLETS:";
const NOTES_MARKER: &str = "NOTES:";
const IMAGE_MARKER: &str = "IMAGE:";

/// Substring from `from` up to `to` (or end of text), empty when the
/// markers appear out of order.
fn slice_between(content: &str, from: usize, to: Option<usize>) -> &str {
    let to = to.unwrap_or(content.len());
    if to <= from {
        ""
    } else {
        &content[from..to]
    }
}

/// Split bullet text into lines, stripping leading `-`, `•`, `*`, and
/// spaces, and dropping lines that end up empty.
pub fn clean_bullet_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| {
            line.trim()
                .trim_start_matches(|c: char| c == '-' || c == '\u{2022}' || c == '*' || c == ' ')
                .to_string()
        })
        .filter(|line| !line.is_empty())
        .collect()
}

/// Parse one content-slide reply. Missing sections degrade to their
/// documented fallbacks; a reply with no markers at all yields the full
/// fallback record.
pub fn parse_slide_content(content: &str) -> SlideContent {
    let title_start = content.find(TITLE_MARKER);
    let bullets_start = content.find(BULLETS_MARKER);
    let notes_start = content.find(NOTES_MARKER);
    let image_start = content.find(IMAGE_MARKER);

    let title = title_start
        .map(|s| slice_between(content, s + TITLE_MARKER.len(), bullets_start).trim().to_string())
        .filter(|t| !t.is_empty());

    let bullets = bullets_start.map(|s| {
        clean_bullet_lines(slice_between(content, s + BULLETS_MARKER.len(), notes_start))
    });

    let notes = notes_start
        .map(|s| slice_between(content, s + NOTES_MARKER.len(), image_start).trim().to_string());

    let image_term = match image_start {
        Some(s) => content[s + IMAGE_MARKER.len()..].trim().to_string(),
        // No IMAGE: section; fall back to the parsed title, then to the
        // hard-coded term.
        None => title.clone().unwrap_or_else(|| FALLBACK_IMAGE_TERM.to_string()),
    };

    SlideContent {
        title: title.unwrap_or_else(|| FALLBACK_TITLE.to_string()),
        bullets: bullets
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| FALLBACK_BULLETS.iter().map(|s| s.to_string()).collect()),
        notes: notes
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| FALLBACK_NOTES.to_string()),
        image_term,
    }
}

/// Parse a title-slide reply. When both markers are present the fields are
/// sliced out; otherwise the first two non-empty lines are used, and the
/// caller-supplied defaults cover everything else.
pub fn parse_title_content(content: &str, default_title: &str, default_subtitle: &str) -> TitleSlide {
    let title_start = content.find(TITLE_MARKER);
    let subtitle_start = content.find(SUBTITLE_MARKER);

    if let (Some(t), Some(s)) = (title_start, subtitle_start) {
        let title = slice_between(content, t + TITLE_MARKER.len(), Some(s)).trim();
        let subtitle = content[s + SUBTITLE_MARKER.len()..].trim();
        return TitleSlide {
            title: if title.is_empty() { default_title.to_string() } else { title.to_string() },
            subtitle: if subtitle.is_empty() {
                default_subtitle.to_string()
            } else {
                subtitle.to_string()
            },
        };
    }

    let mut lines = content.lines().map(str::trim).filter(|l| !l.is_empty());
    let title = lines.next().map(str::to_string);
    let subtitle = lines.next().map(str::to_string);
    TitleSlide {
        title: title.unwrap_or_else(|| default_title.to_string()),
        subtitle: subtitle.unwrap_or_else(|| default_subtitle.to_string()),
    }
}
