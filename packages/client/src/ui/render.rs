//! Message content preparation for the terminal.
//!
//! The server linkifies URLs into `<a href>` markup and otherwise passes user
//! text through. Before display the content is sanitized (control characters
//! dropped, anchor tags unwrapped to their text) and then, with the `emoji`
//! feature, `:shortcode:` sequences are replaced with their glyphs.

use chatroom_shared::text::sanitize;

/// Sanitize and decorate message content for display.
pub fn render_content(raw: &str) -> String {
    replace_shortcodes(&sanitize(raw))
}

#[cfg(feature = "emoji")]
fn replace_shortcodes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(':') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let glyph = after
            .find(':')
            .map(|end| &after[..end])
            .filter(|name| is_shortcode(name))
            .and_then(|name| emojis::get_by_shortcode(name).map(|emoji| (name.len(), emoji)));
        match glyph {
            Some((len, emoji)) => {
                out.push_str(emoji.as_str());
                rest = &after[len + 1..];
            }
            None => {
                out.push(':');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(not(feature = "emoji"))]
fn replace_shortcodes(text: &str) -> String {
    text.to_string()
}

#[cfg(feature = "emoji")]
fn is_shortcode(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-'))
}
