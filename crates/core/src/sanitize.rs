const WINDOWS_RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

pub const MAX_DIRNAME_LEN: usize = 255;

/// Makes one folder or album name safe to use as a single directory segment.
///
/// Applied segment by segment, the same way the `{folder_album}` path layout
/// builds export directories, so resolved paths compare equal to what was
/// written to disk.
pub fn sanitize_dirname(value: &str) -> String {
    let replaced: String = value
        .chars()
        .map(|ch| if is_disallowed_char(ch) { '_' } else { ch })
        .collect();

    let mut out = replaced.trim_end_matches([' ', '.']).trim().to_string();

    if out.is_empty() {
        out = "untitled".to_string();
    }

    if is_windows_reserved(&out) {
        out.push_str("_dir");
    }

    if out.chars().count() > MAX_DIRNAME_LEN {
        out = out.chars().take(MAX_DIRNAME_LEN).collect();
    }

    out
}

/// Separators a template literal may carry next to a token.
pub(crate) fn is_separator(ch: char) -> bool {
    matches!(ch, '_' | '-' | ' ')
}

fn is_disallowed_char(ch: char) -> bool {
    matches!(ch, '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|') || ch.is_control()
}

fn is_windows_reserved(value: &str) -> bool {
    let stem = value
        .split('.')
        .next()
        .unwrap_or(value)
        .to_ascii_uppercase();
    WINDOWS_RESERVED_NAMES
        .iter()
        .any(|reserved| reserved == &stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_path_separators() {
        assert_eq!(sanitize_dirname("Summer/Winter"), "Summer_Winter");
        assert_eq!(sanitize_dirname("a:b*c"), "a_b_c");
    }

    #[test]
    fn sanitize_trims_trailing_dots_and_spaces() {
        assert_eq!(sanitize_dirname("Trip... "), "Trip");
        assert_eq!(sanitize_dirname("   "), "untitled");
    }

    #[test]
    fn sanitize_handles_reserved_names() {
        assert_eq!(sanitize_dirname("aux"), "aux_dir");
        assert_eq!(sanitize_dirname("Auxiliary"), "Auxiliary");
    }

    #[test]
    fn sanitize_truncates_long_names() {
        let long = "x".repeat(MAX_DIRNAME_LEN + 20);
        assert_eq!(sanitize_dirname(&long).chars().count(), MAX_DIRNAME_LEN);
    }
}
