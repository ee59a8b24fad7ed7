use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

use crate::error::{AuthError, Result};
use crate::types::{MaskRule, RecordKind};

/// Regex pattern for parsing mask rules
/// Format: allow(user@hostpattern[, class]) / deny(user@hostpattern[, reason])
static RULE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(allow|deny)\s*\(([^,)]+)(?:,\s*([^)]+))?\)$")
        .expect("RULE_PATTERN: hardcoded regex is invalid")
});

/// Maximum nesting depth for `file:` include directives.
const MAX_INCLUDE_DEPTH: usize = 10;

/// Parse mask rules from text.
///
/// Supports `file: /path/to/rules.conf` directive to include rules from an
/// external file.
pub fn parse_rules(text: &str) -> Result<Vec<MaskRule>> {
    parse_rules_inner(text, 0)
}

fn parse_rules_inner(text: &str, depth: usize) -> Result<Vec<MaskRule>> {
    if depth > MAX_INCLUDE_DEPTH {
        return Err(AuthError::ParseError(format!(
            "file include depth exceeds maximum ({MAX_INCLUDE_DEPTH}), possible circular include"
        )));
    }

    let mut rules = Vec::new();

    for (line_num, line) in text.lines().enumerate() {
        let line_num = line_num + 1; // 1-based line numbers

        // Remove comments and trim whitespace
        let line = if let Some(comment_pos) = line.find('#') {
            &line[..comment_pos]
        } else {
            line
        };
        let line = line.trim();

        // Skip empty lines
        if line.is_empty() {
            continue;
        }

        // Handle file include directive
        if let Some(path) = line.strip_prefix("file:") {
            let path = path.trim();
            let file_rules = parse_rules_from_file_inner(path, depth + 1)?;
            rules.extend(file_rules);
            continue;
        }

        let rule = parse_single_rule(line, line_num)?;
        rules.push(rule);
    }

    Ok(rules)
}

/// Parse mask rules from a file.
pub fn parse_rules_from_file(path: impl AsRef<Path>) -> Result<Vec<MaskRule>> {
    parse_rules_from_file_inner(path, 0)
}

fn parse_rules_from_file_inner(path: impl AsRef<Path>, depth: usize) -> Result<Vec<MaskRule>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| {
        AuthError::ParseError(format!(
            "Failed to read rules file '{}': {}",
            path.display(),
            e
        ))
    })?;
    parse_rules_inner(&text, depth)
}

/// Parse a single rule line
fn parse_single_rule(line: &str, line_num: usize) -> Result<MaskRule> {
    let captures = RULE_PATTERN
        .captures(line)
        .ok_or_else(|| AuthError::ParseErrorAtLine {
            line: line_num,
            message: format!("Invalid rule format: {}", line),
        })?;

    let kind = match captures.get(1).map(|m| m.as_str()) {
        Some("allow") => RecordKind::Allow,
        _ => RecordKind::Deny,
    };

    let mask = captures
        .get(2)
        .map(|m| m.as_str().trim())
        .unwrap_or_default();
    if mask.is_empty() {
        return Err(AuthError::ParseErrorAtLine {
            line: line_num,
            message: "Empty mask".to_string(),
        });
    }

    let (username, hostname) = split_mask(mask);
    if hostname.is_empty() {
        return Err(AuthError::InvalidMask(mask.to_string()));
    }

    let note = captures.get(3).map(|m| m.as_str().trim().to_string());

    Ok(MaskRule {
        kind,
        username,
        hostname,
        note,
        line_num,
    })
}

/// Split a `user@host` mask. A mask without `@` is the usual K-line
/// shorthand for `*@host`.
fn split_mask(mask: &str) -> (String, String) {
    match mask.split_once('@') {
        Some((user, host)) => (user.to_string(), host.to_string()),
        None => ("*".to_string(), mask.to_string()),
    }
}
