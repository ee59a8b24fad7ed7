//! Case-insensitive wildcard matching.
//!
//! `*` matches any sequence of characters (including none) and `?` matches
//! exactly one. Both per-label host matching and username checking go
//! through this single primitive, so the two share its exact semantics.

/// Match `text` against a wildcard `pattern`, folding ASCII case.
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().map(|c| c.to_ascii_lowercase()).collect();
    let text: Vec<char> = text.chars().map(|c| c.to_ascii_lowercase()).collect();
    match_chars(&pattern, &text)
}

/// Iterative matcher with `*` backtracking.
fn match_chars(pattern: &[char], text: &[char]) -> bool {
    let mut p = 0;
    let mut t = 0;
    let mut star_p = None; // position after the last '*' seen
    let mut star_t = 0; // text position when that '*' was seen

    while t < text.len() {
        if p < pattern.len() && (pattern[p] == '?' || pattern[p] == text[t]) {
            p += 1;
            t += 1;
        } else if p < pattern.len() && pattern[p] == '*' {
            star_p = Some(p);
            star_t = t;
            p += 1;
        } else if let Some(sp) = star_p {
            // Mismatch: give the last '*' one more character and retry
            p = sp + 1;
            star_t += 1;
            t = star_t;
        } else {
            return false;
        }
    }

    // Trailing '*'s match the empty sequence
    while p < pattern.len() && pattern[p] == '*' {
        p += 1;
    }
    p == pattern.len()
}
