use once_cell::sync::Lazy;
use regex::Regex;

static INVALID_SELECTOR_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9_\-:/]+").unwrap());

/// Make a class name safe to use as a CSS selector
pub fn escape_name(name: &str) -> String {
    INVALID_SELECTOR_CHARS
        .replace_all(name.trim(), "-")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_name() {
        assert_eq!(escape_name("  my class  "), "my-class");
        assert_eq!(escape_name("w-1/2"), "w-1/2");
        assert_eq!(escape_name("hover:bg-red"), "hover:bg-red");
        assert_eq!(escape_name("a.b#c!!d"), "a-b-c-d");
    }
}
