//! Base-title grouping for session takes.

/// Folder key used when a title has nothing left to group by.
pub const UNTITLED_SESSION: &str = "Untitled Session";

/// The folder key a session take is grouped under.
///
/// Everything from the first `" ("` onward is dropped and the rest trimmed,
/// so `"Night Drive (Alt Mix)"` and `"Night Drive (Demo)"` both become
/// `"Night Drive"`. When nothing is left the trimmed title itself is used,
/// and an empty title falls back to [`UNTITLED_SESSION`]. The result is never
/// empty.
///
/// # Examples
///
/// ```
/// use oeuvre_core::browse::base_title;
///
/// assert_eq!(base_title("Night Drive (Alt Mix)"), "Night Drive");
/// assert_eq!(base_title("Solo"), "Solo");
/// assert_eq!(base_title("   "), "Untitled Session");
/// ```
pub fn base_title(title: &str) -> String {
    let head = title.split(" (").next().unwrap_or(title).trim();
    if !head.is_empty() {
        return head.to_string();
    }
    let whole = title.trim();
    if whole.is_empty() {
        UNTITLED_SESSION.to_string()
    } else {
        whole.to_string()
    }
}
