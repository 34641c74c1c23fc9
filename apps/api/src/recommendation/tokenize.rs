use std::collections::HashSet;

/// Characters that belong to a token. Everything else separates tokens.
fn is_token_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '+' || c == '#'
}

/// Lowercases `text` and splits it into a set of keyword tokens.
///
/// Token characters are `a-z`, `0-9`, `+` and `#`, so `c++` and `c#`
/// survive intact while `node.js` becomes `node` and `js`. Non-ASCII
/// letters act as separators.
pub fn tokenize(text: &str) -> HashSet<String> {
    let lowered = text.to_lowercase();
    let mut tokens = HashSet::new();
    let mut current = String::new();

    for c in lowered.chars() {
        if is_token_char(c) {
            current.push(c);
        } else if !current.is_empty() {
            tokens.insert(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.insert(current);
    }

    tokens
}
