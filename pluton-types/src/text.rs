/// Quotes a string for the engine console: embedded double quotes are
/// escaped and trailing backslashes dropped so the closing quote survives.
pub fn quote_safe(s: &str) -> String {
    let escaped = s.replace('"', "\\\"");
    format!("\"{}\"", escaped.trim_end_matches('\\'))
}
