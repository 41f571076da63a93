use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// 51234900 -> "51,234,900"
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

pub fn signed_percent(value: f64) -> String {
    if value >= 0.0 {
        format!("+{value:.2}%")
    } else {
        format!("{value:.2}%")
    }
}

pub fn price(value: f64) -> String {
    format!("${value:.2}")
}

/// Pad with spaces up to `width` display columns, truncating with an
/// ellipsis when the text is too wide.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let text_width = UnicodeWidthStr::width(text);
    if text_width <= width {
        let mut padded = String::with_capacity(text.len() + width - text_width);
        padded.push_str(text);
        padded.extend(std::iter::repeat(' ').take(width - text_width));
        return padded;
    }

    let mut truncated = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + ch_width > width.saturating_sub(1) {
            break;
        }
        truncated.push(ch);
        used += ch_width;
    }
    truncated.push('…');
    used += 1;
    truncated.extend(std::iter::repeat(' ').take(width.saturating_sub(used)));
    truncated
}
