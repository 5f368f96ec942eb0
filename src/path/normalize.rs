//! Path normalisation.

/// Path separator shared by bind-time and match-time splitting.
pub const SEPARATOR: char = '/';

/// Normalize a path pattern.
///
/// Runs of consecutive separators collapse into one, then a single leading
/// and a single trailing separator are stripped. The root normalizes to the
/// empty string.
pub fn normalize(path: &str) -> String {
    let mut compact = String::with_capacity(path.len());
    let mut previous_was_separator = false;
    for c in path.chars() {
        let is_separator = c == SEPARATOR;
        if is_separator && previous_was_separator {
            continue;
        }
        previous_was_separator = is_separator;
        compact.push(c);
    }

    let trimmed = compact.strip_prefix(SEPARATOR).unwrap_or(&compact);
    let trimmed = if trimmed.len() > 1 {
        trimmed.strip_suffix(SEPARATOR).unwrap_or(trimmed)
    } else {
        trimmed
    };
    trimmed.to_string()
}

/// Split a request path into match segments.
///
/// The first segment is always the empty root segment, whether or not the
/// path starts with a separator. Trailing separators are kept as a final
/// empty segment; the matcher tolerates them.
pub fn split_segments(path: &str) -> Vec<&str> {
    let mut segments: Vec<&str> = path.split(SEPARATOR).collect();
    if segments.first().is_some_and(|s| !s.is_empty()) {
        segments.insert(0, "");
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        let cases = [
            ("hello//", "hello"),
            ("hello/{id}/", "hello/{id}"),
            ("//hello/{id}/", "hello/{id}"),
            ("//", ""),
            ("/", ""),
            ("", ""),
            ("a", "a"),
            ("/a//b///c/", "a/b/c"),
        ];
        for (path, expected) in cases {
            assert_eq!(normalize(path), expected, "normalize({path:?})");
        }
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for path in ["hello//", "//hello/{id}/", "//", "/a//b/*rest/", "x"] {
            let once = normalize(path);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_split_segments_adds_root() {
        assert_eq!(split_segments("/items/42"), vec!["", "items", "42"]);
        assert_eq!(split_segments("items/42"), vec!["", "items", "42"]);
        assert_eq!(split_segments("/items/"), vec!["", "items", ""]);
        assert_eq!(split_segments(""), vec![""]);
        assert_eq!(split_segments("/"), vec!["", ""]);
    }
}
