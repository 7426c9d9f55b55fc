//! Malicious signature library.
//!
//! Fixed substring signatures for the attack classes the engine recognizes:
//! - Command injection
//! - SQL injection
//! - Cross-site scripting
//! - Path traversal
//!
//! The tables are built once and never mutated. Matching is case-insensitive.

use lazy_static::lazy_static;
use regex::Regex;

use super::SignatureMatcher;

/// A known-malicious substring signature
#[derive(Debug, Clone, Copy)]
pub struct Signature {
    /// Signature name
    pub name: &'static str,
    /// The literal substring to match (lowercase)
    pub needle: &'static str,
    /// Attack category
    pub category: SignatureCategory,
    /// Description
    pub description: &'static str,
}

/// Attack categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureCategory {
    /// Shell command injection
    CommandInjection,
    /// SQL injection
    SqlInjection,
    /// Cross-site scripting
    Xss,
    /// Directory / path traversal
    PathTraversal,
}

impl std::fmt::Display for SignatureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignatureCategory::CommandInjection => write!(f, "command_injection"),
            SignatureCategory::SqlInjection => write!(f, "sql_injection"),
            SignatureCategory::Xss => write!(f, "xss"),
            SignatureCategory::PathTraversal => write!(f, "path_traversal"),
        }
    }
}

/// SQL injection signatures
pub static SQL_SIGNATURES: &[Signature] = &[
    Signature {
        name: "union_select",
        needle: "union select",
        category: SignatureCategory::SqlInjection,
        description: "UNION-based query extension",
    },
    Signature {
        name: "union_all_select",
        needle: "union all select",
        category: SignatureCategory::SqlInjection,
        description: "UNION ALL query extension",
    },
    Signature {
        name: "drop_table",
        needle: "drop table",
        category: SignatureCategory::SqlInjection,
        description: "Destructive DDL statement",
    },
    Signature {
        name: "insert_into",
        needle: "insert into",
        category: SignatureCategory::SqlInjection,
        description: "Row insertion through user input",
    },
    Signature {
        name: "or_true",
        needle: "or 1=1",
        category: SignatureCategory::SqlInjection,
        description: "Boolean tautology bypass",
    },
    Signature {
        name: "sql_comment",
        needle: "-- ",
        category: SignatureCategory::SqlInjection,
        description: "Trailing-comment clause truncation",
    },
    Signature {
        name: "delete_from",
        needle: "delete from",
        category: SignatureCategory::SqlInjection,
        description: "Destructive DML statement",
    },
];

/// Cross-site scripting signatures
pub static XSS_SIGNATURES: &[Signature] = &[
    Signature {
        name: "script_tag",
        needle: "<script",
        category: SignatureCategory::Xss,
        description: "Inline script element",
    },
    Signature {
        name: "javascript_uri",
        needle: "javascript:",
        category: SignatureCategory::Xss,
        description: "javascript: URI scheme",
    },
    Signature {
        name: "onmouseover_handler",
        needle: "onmouseover=",
        category: SignatureCategory::Xss,
        description: "Mouse event handler attribute",
    },
    Signature {
        name: "onerror_handler",
        needle: "onerror=",
        category: SignatureCategory::Xss,
        description: "Error event handler attribute",
    },
    Signature {
        name: "onload_handler",
        needle: "onload=",
        category: SignatureCategory::Xss,
        description: "Load event handler attribute",
    },
    Signature {
        name: "onclick_handler",
        needle: "onclick=",
        category: SignatureCategory::Xss,
        description: "Click event handler attribute",
    },
];

/// Path traversal signatures
pub static TRAVERSAL_SIGNATURES: &[Signature] = &[
    Signature {
        name: "dot_dot_slash",
        needle: "../",
        category: SignatureCategory::PathTraversal,
        description: "Parent directory traversal",
    },
    Signature {
        name: "dot_dot_backslash",
        needle: "..\\",
        category: SignatureCategory::PathTraversal,
        description: "Windows parent directory traversal",
    },
    Signature {
        name: "etc_passwd",
        needle: "/etc/passwd",
        category: SignatureCategory::PathTraversal,
        description: "Password file read",
    },
    Signature {
        name: "env_file",
        needle: ".env",
        category: SignatureCategory::PathTraversal,
        description: "Environment secrets file read",
    },
];

/// Command injection signatures
pub static COMMAND_SIGNATURES: &[Signature] = &[
    Signature {
        name: "whoami",
        needle: "whoami",
        category: SignatureCategory::CommandInjection,
        description: "Identity probe command",
    },
    Signature {
        name: "uname",
        needle: "uname",
        category: SignatureCategory::CommandInjection,
        description: "System fingerprint command",
    },
    Signature {
        name: "curl",
        needle: "curl",
        category: SignatureCategory::CommandInjection,
        description: "Remote fetch command",
    },
    Signature {
        name: "wget",
        needle: "wget",
        category: SignatureCategory::CommandInjection,
        description: "Remote fetch command",
    },
    Signature {
        name: "bash",
        needle: "bash",
        category: SignatureCategory::CommandInjection,
        description: "Shell invocation",
    },
    Signature {
        name: "sudo",
        needle: "sudo",
        category: SignatureCategory::CommandInjection,
        description: "Privilege escalation command",
    },
    Signature {
        name: "system_call",
        needle: "system(",
        category: SignatureCategory::CommandInjection,
        description: "Library shell-out call",
    },
    Signature {
        name: "exec_call",
        needle: "exec(",
        category: SignatureCategory::CommandInjection,
        description: "Process replacement call",
    },
];

/// Iterate over every signature in the library
pub fn all_signatures() -> impl Iterator<Item = &'static Signature> {
    SQL_SIGNATURES
        .iter()
        .chain(XSS_SIGNATURES)
        .chain(TRAVERSAL_SIGNATURES)
        .chain(COMMAND_SIGNATURES)
}

/// Total number of signatures in the library
pub fn signature_count() -> usize {
    SQL_SIGNATURES.len()
        + XSS_SIGNATURES.len()
        + TRAVERSAL_SIGNATURES.len()
        + COMMAND_SIGNATURES.len()
}

lazy_static! {
    /// Compiled case-insensitive regexes, one per signature
    static ref SIGNATURE_REGEX: Vec<Regex> = {
        all_signatures()
            .filter_map(|s| Regex::new(&format!("(?i){}", regex::escape(s.needle))).ok())
            .collect()
    };
}

/// Regex-backed secondary matcher.
///
/// Redundant with [`super::SignatureAutomaton`] over the same signature
/// library; deployments wanting a second opinion compose the two by OR.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegexMatcher;

impl RegexMatcher {
    /// Create a matcher over the built-in signature library
    pub fn new() -> Self {
        Self
    }
}

impl SignatureMatcher for RegexMatcher {
    fn scan(&self, payload: &[u8]) -> bool {
        let text = String::from_utf8_lossy(payload);
        SIGNATURE_REGEX.iter().any(|r| r.is_match(&text))
    }
}
