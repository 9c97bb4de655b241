use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Parses a backend timestamp. Values without an offset are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// `HH:MM` in `tz`, or the raw value if it does not parse.
pub fn format_time_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    parse_timestamp(raw)
        .map(|ts| ts.with_timezone(tz).format("%H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// `YYYY-MM-DD` in `tz`, or the raw value if it does not parse.
pub fn format_date_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    parse_timestamp(raw)
        .map(|ts| ts.with_timezone(tz).format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| raw.to_string())
}

pub fn format_time(raw: &str) -> String {
    format_time_in(raw, &Local)
}

pub fn format_date(raw: &str) -> String {
    format_date_in(raw, &Local)
}

/// Greedy word wrap on display width, so CJK and emoji count as two
/// columns. Explicit newlines are kept and words wider than `width` are
/// broken by character.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_width = 0;

        for word in paragraph.split_whitespace() {
            let word_width = word.width();
            if line.is_empty() && word_width <= width {
                line.push_str(word);
                line_width = word_width;
                continue;
            }
            if !line.is_empty() && line_width + 1 + word_width <= width {
                line.push(' ');
                line.push_str(word);
                line_width += 1 + word_width;
                continue;
            }

            if !line.is_empty() {
                out.push(std::mem::take(&mut line));
            }
            if word_width > width {
                let mut broken = wrap_chars(word, width);
                if let Some(last) = broken.pop() {
                    out.extend(broken);
                    line_width = last.width();
                    line = last;
                }
            } else {
                line.push_str(word);
                line_width = word_width;
            }
        }
        out.push(line);
    }
    out
}

/// Breaks `text` at character boundaries into parts no wider than `width`.
/// Zero-width characters stay attached to the preceding part.
pub fn wrap_chars(text: &str, width: usize) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if ch_width == 0 {
            current.push(ch);
            continue;
        }
        if current_width + ch_width > width && !current.is_empty() {
            parts.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(ch);
        current_width += ch_width;
    }

    if !current.is_empty() {
        parts.push(current);
    }
    parts
}
