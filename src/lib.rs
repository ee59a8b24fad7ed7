//! A hostmask authorization and ban matching engine for IRC authentication
//! helpers.
//!
//! Authorization (I-line) and ban (K-line) records are organized into a
//! label-indexed tree per kind, so deciding which record applies to a
//! connecting `username@hostname` pair costs one step per dotted label of
//! the hostname instead of a scan over every configured mask. An exact
//! label always beats a wildcard label at the same depth; among several
//! wildcard labels at one depth the first in sibling order wins.
//!
//! # Example
//!
//! ```rust
//! use iauth_engine::{compile, parse_rules};
//!
//! let rules_text = "
//! allow(admin@console.example.com, opers)
//! allow(*@*.example.com, users)       # rest of the ISP
//! deny(*@*.badisp.net, drones)
//! ";
//!
//! let rules = parse_rules(rules_text).unwrap();
//! let engine = compile(rules, 1024);
//!
//! let granted = engine.find_authorization("alice", "shell.example.com");
//! assert_eq!(granted.unwrap().note.as_deref(), Some("users"));
//!
//! let banned = engine.find_ban("bob", "dialup.badisp.net");
//! assert_eq!(banned.unwrap().note.as_deref(), Some("drones"));
//!
//! assert!(engine.find_ban("bob", "shell.example.com").is_none());
//! ```
//!
//! # Mask syntax
//!
//! Rules follow the format:
//! ```text
//! allow(user@hostpattern[, class])
//! deny(user@hostpattern[, reason])
//! ```
//!
//! Both pattern halves support `*` (any sequence, including empty) and `?`
//! (exactly one character), matched case-insensitively. The host pattern is
//! matched label by label, so `*.example.com` covers `a.example.com` and
//! `a.b.example.com` but not `example.com` itself. A mask without `@`
//! stands for `*@mask`.

pub mod engine;
pub mod error;
pub mod glob;
pub mod host;
pub mod parser;
pub mod tree;
pub mod types;

// Re-export commonly used items
pub use engine::{compile, Engine, SharedEngine, DEFAULT_CACHE_SIZE};
pub use error::{AuthError, Result};
pub use glob::glob_match;
pub use host::{split_labels, HOSTLEN};
pub use parser::{parse_rules, parse_rules_from_file};
pub use tree::MatchTree;
pub use types::{MaskRule, Record, RecordKind};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_workflow() {
        let rules_text = r#"
# Staff
allow(admin@console.example.com, opers)

# Regular users at the ISP
allow(*@*.example.com, users)

# Known drone hosts
deny(*@*.badisp.net, drones)
deny(*@open.proxy.example, proxy)
"#;

        let rules = parse_rules(rules_text).unwrap();
        assert_eq!(rules.len(), 4);

        let engine = compile(rules, DEFAULT_CACHE_SIZE);
        assert_eq!(engine.allow_count(), 2);
        assert_eq!(engine.deny_count(), 2);

        // Exact host, exact user -> oper class
        let result = engine.find_authorization("admin", "console.example.com");
        assert_eq!(result.unwrap().note.as_deref(), Some("opers"));

        // Wildcard host -> user class
        let result = engine.find_authorization("alice", "shell.example.com");
        assert_eq!(result.unwrap().note.as_deref(), Some("users"));

        // Host outside every allow pattern
        assert!(engine.find_authorization("alice", "elsewhere.org").is_none());

        // Bans are an independent forest
        let result = engine.find_ban("bob", "dialup.badisp.net");
        assert_eq!(result.unwrap().note.as_deref(), Some("drones"));
        assert!(engine.find_ban("alice", "shell.example.com").is_none());
    }
}
