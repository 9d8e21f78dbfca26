//! Tab label markup helpers.
//!
//! The highlight pass styles the focused tab by wrapping its label in
//! simple inline markup, and restores the plain text when the tab loses
//! focus. Only the wrappers produced here are ever stripped, so labels
//! that legitimately contain angle brackets pass through untouched.

/// Wrap a plain label in the configured bold/color markup.
pub(crate) fn focused_markup(label: &str, bold: bool, color: Option<&str>) -> String {
    let mut markup = label.to_string();
    if bold {
        markup = format!("<b>{markup}</b>");
    }
    if let Some(color) = color {
        markup = format!("<span color=\"{color}\">{markup}</span>");
    }
    markup
}

/// Undo [`focused_markup`]: peel any `<span ...>` and `<b>` wrappers.
pub(crate) fn strip_markup(label: &str) -> String {
    let mut text = label;
    loop {
        if let Some(inner) = text
            .strip_prefix("<b>")
            .and_then(|rest| rest.strip_suffix("</b>"))
        {
            text = inner;
            continue;
        }
        if text.starts_with("<span ") {
            if let Some(close) = text.find('>') {
                if let Some(inner) = text[close + 1..].strip_suffix("</span>") {
                    text = inner;
                    continue;
                }
            }
        }
        break;
    }
    text.to_string()
}
