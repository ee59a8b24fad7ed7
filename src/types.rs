/// Which forest a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// I-line: grants a user@host mask permission to connect
    Allow,
    /// K-line: denies a user@host mask
    Deny,
}

/// Surface the engine needs from a stored record.
///
/// The hostname pattern is read once at insertion, the username pattern at
/// resolution time. Everything else a record carries is opaque payload.
pub trait Record {
    /// Username glob pattern (`*`/`?`, matched case-insensitively)
    fn username_pattern(&self) -> &str;

    /// Hostname glob pattern, matched label by label
    fn hostname_pattern(&self) -> &str;
}

/// Parsed text rule before compilation
#[derive(Debug, Clone)]
pub struct MaskRule {
    /// Allow (I-line) or deny (K-line)
    pub kind: RecordKind,
    /// Username glob pattern
    pub username: String,
    /// Hostname glob pattern
    pub hostname: String,
    /// Connection class for allow rules, ban reason for deny rules
    pub note: Option<String>,
    /// Line number in the original text (for error reporting)
    pub line_num: usize,
}

impl Record for MaskRule {
    fn username_pattern(&self) -> &str {
        &self.username
    }

    fn hostname_pattern(&self) -> &str {
        &self.hostname
    }
}

/// Cache key for LRU cache
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct CacheKey {
    pub kind: RecordKind,
    pub username: String,
    pub hostname: String,
}

impl CacheKey {
    pub fn new(kind: RecordKind, username: &str, hostname: &str) -> Self {
        Self {
            kind,
            username: username.to_ascii_lowercase(),
            hostname: hostname.to_ascii_lowercase(),
        }
    }
}
