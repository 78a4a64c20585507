//! Low-level Markdown formatting helpers shared by the TOC model and the
//! document scanner's marker recognition.

/// Indent unit for nested TOC entries, in spaces
pub const INDENT_WIDTH: usize = 4;

/// Marker label for a single self-contained TOC insertion point
pub const LABEL_TOC: &str = "toc";
/// Marker label opening a replaceable TOC span
pub const LABEL_BEGIN_TOC: &str = "begintoc";
/// Marker label closing a replaceable TOC span
pub const LABEL_END_TOC: &str = "endtoc";

/// Character that introduces an ATX heading
pub const HEADING_CHAR: char = '#';

/// Normalize heading text into an intra-document anchor name: lowercase,
/// alphanumerics kept, whitespace and `-` mapped to `-`, everything else
/// dropped. Consecutive `-` are not collapsed.
pub fn anchor_name(text: &str) -> String {
    let mut anchor = String::new();
    for c in text.chars() {
        if c.is_alphanumeric() {
            anchor.extend(c.to_lowercase());
        } else if c.is_whitespace() || c == '-' {
            anchor.push('-');
        }
    }
    anchor
}

/// Build an anchor reference from an anchor name
pub fn anchor_ref(name: &str) -> String {
    format!("#{}", name)
}

/// Build an inline Markdown link
pub fn inline_link(text: &str, target: &str) -> String {
    format!("[{}]({})", text, target)
}

/// Build a reference-style ("detached") link definition
pub fn detached_link(label: &str, target: &str) -> String {
    format!("[{}]: {}", label, target)
}

/// Build a bulleted list item, using `*` when the alternate glyph is requested
pub fn list_item(text: &str, alt_list_char: bool) -> String {
    let list_char = if alt_list_char { '*' } else { '-' };
    format!("{} {}", list_char, text)
}

/// Build a numbered list item
pub fn numbered_list_item(text: &str, n: usize) -> String {
    format!("{}. {}", n, text)
}

/// Build a TOC marker line, optionally carrying a human comment,
/// e.g. `[endtoc]: # (generated)`
pub fn marker_comment(label: &str, comment: Option<&str>) -> String {
    let target = match comment {
        Some(text) if !text.is_empty() => format!("# ({})", text),
        _ => "#".to_string(),
    };
    detached_link(label, &target)
}
