//! Reference syntax

const FIND_MARKER: &str = "$(find";

/// A file reference as written in a launch file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference<'a> {
    /// Used as-is
    Path(&'a str),
    /// `$(find package)suffix`
    Find { package: &'a str, suffix: &'a str },
    /// Starts like `$(find` but has no package or no closing `)`
    Malformed,
}

/// Classify a file reference.
///
/// Only a leading `$(find <package>)` is recognized; other `$(...)` forms
/// are plain paths.
pub fn parse_reference(input: &str) -> Reference<'_> {
    let Some(rest) = input.strip_prefix(FIND_MARKER) else {
        return Reference::Path(input);
    };
    if !rest.starts_with(char::is_whitespace) {
        return Reference::Path(input);
    }

    match rest.find(')') {
        Some(close) => {
            let package = rest[..close].trim();
            if package.is_empty() || package.contains(char::is_whitespace) {
                return Reference::Malformed;
            }
            Reference::Find {
                package,
                suffix: &rest[close + 1..],
            }
        }
        None => Reference::Malformed,
    }
}
