//! Tag and attribute name normalization.

/// Convert an XML name to camel case: `wc-status` becomes `wcStatus`.
///
/// `-`, `_`, `.`, `:` and whitespace act as word separators and are removed;
/// the character after a separator is upper-cased and the first character of
/// the result is lower-cased. Names that are already camel case come back
/// unchanged.
pub fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for ch in name.chars() {
        if is_separator(ch) {
            upper_next = !out.is_empty();
            continue;
        }
        if out.is_empty() {
            out.extend(ch.to_lowercase());
        } else if upper_next {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        upper_next = false;
    }
    out
}

fn is_separator(ch: char) -> bool {
    matches!(ch, '-' | '_' | '.' | ':') || ch.is_whitespace()
}
