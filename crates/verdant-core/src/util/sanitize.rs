//! Log-injection guard for caller-supplied free text.
//!
//! Anything a caller typed (search queries, resource-type labels) is
//! sanitized with [`sanitize_for_log`] before it reaches an operational log
//! line, so a crafted query cannot forge extra log records or smuggle
//! terminal escapes.

/// Strip control characters from caller-supplied text before logging.
///
/// Every Unicode control character (the full category, not just newlines)
/// is replaced with a space, and the result is trimmed. Pure function, no
/// side effects.
///
/// # Example
///
/// ```
/// use verdant_core::sanitize_for_log;
///
/// assert_eq!(sanitize_for_log("pizza\n\t place"), "pizza   place");
/// ```
pub fn sanitize_for_log(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}
