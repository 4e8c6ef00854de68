//! String helpers shared across the pipeline.
//!
//! Everything here truncates on `char` boundaries: the text flowing through
//! this pipeline is CJK, where a byte-indexed slice would panic mid-codepoint.

/// Keep at most `max` characters of `s`.
///
/// Used for the push-service title limit and for the fallback template's
/// background section.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_chars("hello", 10), "hello");
/// assert_eq!(truncate_chars("焦点访谈", 2), "焦点");
/// ```
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters with an ellipsis and a count of
/// the dropped characters appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    let total = s.chars().count();
    if total <= max {
        s.to_string()
    } else {
        format!("{}…(+{} chars)", truncate_chars(s, max), total - max)
    }
}
