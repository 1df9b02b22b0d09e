use crate::metrics::TextMetrics;
use fleetprint_style::FontSpec;

pub const ELLIPSIS: &str = "...";

/// Characters kept in front of an ellipsis, at minimum.
const MIN_TRUNCATED_CHARS: usize = 3;

/// Greedy word wrap of `text` into lines no wider than `max_width`.
///
/// Explicit `\n` always starts a new line. A word wider than `max_width` on its own
/// is broken between characters. Always returns at least one line.
pub fn wrap_words<M>(text: &str, max_width: f32, font: &FontSpec, metrics: &M) -> Vec<String>
where
    M: TextMetrics + ?Sized,
{
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        wrap_paragraph(paragraph, max_width, font, metrics, &mut lines);
    }
    lines
}

fn wrap_paragraph<M>(
    paragraph: &str,
    max_width: f32,
    font: &FontSpec,
    metrics: &M,
    lines: &mut Vec<String>,
) where
    M: TextMetrics + ?Sized,
{
    let mut current = String::new();
    for word in paragraph.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if metrics.text_width(&candidate, font) <= max_width {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if metrics.text_width(word, font) <= max_width {
            current = word.to_string();
        } else {
            current = break_word(word, max_width, font, metrics, lines);
        }
    }
    lines.push(current);
}

/// Pushes full-width chunks of `word` and returns the unfinished tail.
fn break_word<M>(
    word: &str,
    max_width: f32,
    font: &FontSpec,
    metrics: &M,
    lines: &mut Vec<String>,
) -> String
where
    M: TextMetrics + ?Sized,
{
    let mut chunk = String::new();
    for c in word.chars() {
        chunk.push(c);
        if metrics.text_width(&chunk, font) > max_width && chunk.chars().count() > 1 {
            chunk.pop();
            lines.push(std::mem::take(&mut chunk));
            chunk.push(c);
        }
    }
    chunk
}

/// Shortens `text` with a trailing ellipsis until it fits `max_width`.
///
/// Text that already fits is returned unchanged. At least three characters of the
/// original are kept, so the result may still be wider than `max_width`.
pub fn truncate_with_ellipsis<M>(text: &str, max_width: f32, font: &FontSpec, metrics: &M) -> String
where
    M: TextMetrics + ?Sized,
{
    if metrics.text_width(text, font) <= max_width {
        return text.to_string();
    }
    let mut chars: Vec<char> = text.chars().collect();
    loop {
        let candidate = format!("{}{}", chars.iter().collect::<String>(), ELLIPSIS);
        if chars.len() <= MIN_TRUNCATED_CHARS || metrics.text_width(&candidate, font) <= max_width {
            return candidate;
        }
        chars.pop();
    }
}
