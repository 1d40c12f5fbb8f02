//! Display sanitizing for server-supplied text.
//!
//! Everything the server relays (nicknames, message bodies, notices, status
//! banners, admin records) may carry user-typed bytes. Before it reaches a
//! terminal, control characters are dropped and the server's `<a href>`
//! linkify markup is unwrapped to its visible text.

/// Drop control characters (newlines excepted) and unwrap `<a ...>` tags.
///
/// Dropping ESC and the C1 controls is what keeps text from moving the
/// cursor, recoloring or retitling the terminal.
pub fn sanitize(raw: &str) -> String {
    unwrap_anchors(raw)
        .chars()
        .filter(|c| *c == '\n' || !c.is_control())
        .collect()
}

/// Like [`sanitize`], for fields shown on a single line: newlines become spaces.
pub fn sanitize_line(raw: &str) -> String {
    unwrap_anchors(raw)
        .chars()
        .filter_map(|c| match c {
            '\n' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

fn unwrap_anchors(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        if let Some(after) = tail.strip_prefix("</a>") {
            rest = after;
            continue;
        }
        if (tail.starts_with("<a ") || tail.starts_with("<a>"))
            && let Some(end) = tail.find('>')
        {
            rest = &tail[end + 1..];
            continue;
        }
        out.push('<');
        rest = &tail[1..];
    }
    out.push_str(rest);
    out
}
