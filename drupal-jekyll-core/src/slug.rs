//! Title to slug conversion.
//!
//! The same slug is used for the post file name and for every directory
//! segment derived from the menu, so the function must stay deterministic.
//! Two distinct titles can produce the same slug; nothing disambiguates them.

/// Convert a node or menu title into a file/path-safe identifier.
///
/// The pipeline, in order:
/// 1. trim surrounding whitespace and lower-case
/// 2. `&` becomes ` and ` (so an escaped `&amp;` leaves `amp` behind)
/// 3. whitespace, `.`, `/` and `\` become `-`
/// 4. anything outside `[a-z0-9_-]` is dropped
/// 5. runs of two or more `-`/`_` collapse to one `-`
/// 6. one leading and one trailing `-`/`_` are removed
///
/// Never fails; an empty or all-punctuation title yields an empty string.
pub fn slugify(title: &str) -> String {
    let lowered = title.trim_matches(is_strip_char).to_lowercase();
    let expanded = lowered.replace('&', " and ");

    let mut kept = String::with_capacity(expanded.len());
    for c in expanded.chars() {
        if is_space(c) || matches!(c, '.' | '/' | '\\') {
            kept.push('-');
        } else if is_word_char(c) || c == '-' {
            kept.push(c);
        }
    }

    let collapsed = collapse_separators(&kept);
    let trimmed = collapsed
        .strip_prefix(&['-', '_'][..])
        .unwrap_or(&collapsed);
    let trimmed = trimmed.strip_suffix(&['-', '_'][..]).unwrap_or(trimmed);
    trimmed.to_string()
}

/// Whitespace in the ASCII sense, including vertical tab.
fn is_space(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0B'
}

fn is_strip_char(c: char) -> bool {
    is_space(c) || c == '\0'
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_separator(c: char) -> bool {
    c == '-' || c == '_'
}

/// Replace every run of two or more separators with a single `-`.
/// A lone `_` or `-` is kept as-is.
fn collapse_separators(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut run = String::new();

    for c in s.chars() {
        if is_separator(c) {
            run.push(c);
            continue;
        }
        flush_run(&mut out, &mut run);
        out.push(c);
    }
    flush_run(&mut out, &mut run);
    out
}

fn flush_run(out: &mut String, run: &mut String) {
    match run.len() {
        0 => {}
        1 => out.push_str(run),
        _ => out.push('-'),
    }
    run.clear();
}

#[cfg(test)]
#[path = "tests/slug_tests.rs"]
mod tests;
