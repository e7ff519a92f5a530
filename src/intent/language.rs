// intent/language.rs

/// Default when nothing better is known.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Guesses an ISO 639-1 code from the dominant script of `text`.
/// Returns `None` for text without letters.
pub fn detect_language(text: &str) -> Option<&'static str> {
    let (mut latin, mut devanagari, mut malayalam) = (0usize, 0usize, 0usize);
    for c in text.chars() {
        match c {
            '\u{0900}'..='\u{097F}' => devanagari += 1,
            '\u{0D00}'..='\u{0D7F}' => malayalam += 1,
            c if c.is_ascii_alphabetic() => latin += 1,
            _ => {}
        }
    }

    if latin + devanagari + malayalam == 0 {
        return None;
    }
    if devanagari >= malayalam && devanagari > latin {
        Some("hi")
    } else if malayalam > latin {
        Some("ml")
    } else {
        Some("en")
    }
}

/// Collapses a detected code onto the supported reply languages.
pub fn classify_language(code: &str) -> &'static str {
    let code = code.trim().to_lowercase();
    if code.starts_with("hi") {
        "hi"
    } else if code.starts_with("ml") {
        "ml"
    } else {
        DEFAULT_LANGUAGE
    }
}

/// An explicit caller choice wins verbatim (lower-cased); otherwise the
/// language is detected from the text.
pub fn resolve_language(text: &str, explicit: Option<&str>) -> String {
    if let Some(code) = explicit.map(str::trim).filter(|c| !c.is_empty()) {
        return code.to_lowercase();
    }
    detect_language(text)
        .map(classify_language)
        .unwrap_or(DEFAULT_LANGUAGE)
        .to_string()
}
