use ammonia;

/// Clean user-submitted free text using the ammonia library.
///
/// Application answers are rendered in the admin dashboard, so anything a
/// visitor types passes through this whitelist-based sanitizer first. Safe
/// tags survive; <script> and event-handler attributes do not.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}

/// Escape text for interpolation into an HTML context.
///
/// Unlike `clean_html`, nothing survives as markup: every character with an
/// HTML meaning comes out entity-encoded. Used for plain values (like a
/// visitor's name) rendered into email bodies.
pub fn escape_text(input: &str) -> String {
    ammonia::clean_text(input)
}
