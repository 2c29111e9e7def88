//! The raw-input boundary: turning pasted or loaded text into scan targets.

use std::io::Read;
use tracing::warn;

use crate::core::error::{Result, ScannerError};

/// Split a raw URL blob into scan targets: one per line, surrounding
/// whitespace stripped, blank lines dropped. URL syntax is not validated.
pub fn parse_url_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// External paste source that can populate the target list, clipboard-style.
pub trait PasteSource {
    fn read_text(&self) -> Result<String>;
}

/// Paste source backed by standard input.
pub struct StdinPaste;

impl PasteSource for StdinPaste {
    fn read_text(&self) -> Result<String> {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| ScannerError::Clipboard(e.to_string()))?;
        Ok(buf)
    }
}

/// Replace `current` with the paste source's contents. A read failure is
/// logged and leaves `current` untouched; it is never surfaced as an error.
pub fn paste_urls(source: &dyn PasteSource, current: &mut String) {
    match source.read_text() {
        Ok(text) => *current = text,
        Err(e) => warn!("Failed to read paste source: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPaste(&'static str);

    impl PasteSource for FixedPaste {
        fn read_text(&self) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingPaste;

    impl PasteSource for FailingPaste {
        fn read_text(&self) -> Result<String> {
            Err(ScannerError::Clipboard("denied".to_string()))
        }
    }

    #[test]
    fn test_parse_strips_and_drops_blanks() {
        let raw = "  https://a.com  \n\n\thttps://b.com\n   \n";
        assert_eq!(parse_url_list(raw), vec!["https://a.com", "https://b.com"]);
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_url_list("").is_empty());
        assert!(parse_url_list("  \n \n").is_empty());
    }

    #[test]
    fn test_parse_does_not_validate_syntax() {
        assert_eq!(parse_url_list("not a url"), vec!["not a url"]);
    }

    #[test]
    fn test_paste_replaces_input() {
        let mut current = "old".to_string();
        paste_urls(&FixedPaste("https://a.com\n"), &mut current);
        assert_eq!(current, "https://a.com\n");
    }

    #[test]
    fn test_paste_failure_leaves_input_unchanged() {
        let mut current = "old".to_string();
        paste_urls(&FailingPaste, &mut current);
        assert_eq!(current, "old");
    }
}
