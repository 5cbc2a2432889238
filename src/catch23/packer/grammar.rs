//! Line-level micro-grammar for the preprocessor directives the packer cares
//! about.
//!
//! Patterns are matched against the stripped text of a line and anchored at
//! its start. Anything after the captured part of a directive is ignored.

use std::sync::LazyLock;

use regex::Regex;

static SYSTEM_INCLUDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#\s*include\s<(.*)>").expect("valid system include pattern"));

static LOCAL_INCLUDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*#\s*include\s"(.*)""#).expect("valid local include pattern"));

static GUARD_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#\s*ifndef\s(.*)").expect("valid guard open pattern"));

static GUARD_DEFINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#\s*define\s").expect("valid guard define pattern"));

static GUARD_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#\s*endif\s*//(.*)").expect("valid guard close pattern"));

/// Classification of a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// `#include <target>`
    SystemInclude(String),
    /// `#include "target"`
    LocalInclude(String),
    /// `#ifndef NAME`, with the name trimmed.
    GuardOpen(String),
    /// `#define ...`
    GuardDefine,
    /// `#endif //NAME`, with everything after `//` kept verbatim.
    GuardClose(String),
    Other,
}

impl LineKind {
    /// Classifies the stripped text of a line.
    pub fn classify(stripped: &str) -> Self {
        if let Some(target) = capture(&SYSTEM_INCLUDE, stripped) {
            LineKind::SystemInclude(target.to_string())
        } else if let Some(target) = capture(&LOCAL_INCLUDE, stripped) {
            LineKind::LocalInclude(target.to_string())
        } else if let Some(name) = capture(&GUARD_OPEN, stripped) {
            LineKind::GuardOpen(name.trim().to_string())
        } else if GUARD_DEFINE.is_match(stripped) {
            LineKind::GuardDefine
        } else if let Some(name) = capture(&GUARD_CLOSE, stripped) {
            LineKind::GuardClose(name.to_string())
        } else {
            LineKind::Other
        }
    }
}

/// Outcome of testing a line against a header's closing guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardCloser {
    /// `#endif // NAME`
    Conventional,
    /// `#endif //NAME`: accepted, but worth a warning.
    MissingSpace,
}

/// Checks whether `stripped` closes the include guard named `guard`.
pub fn match_guard_closer(stripped: &str, guard: &str) -> Option<GuardCloser> {
    let name = capture(&GUARD_CLOSE, stripped)?;
    if name.trim() != guard {
        return None;
    }
    if name.starts_with(' ') {
        Some(GuardCloser::Conventional)
    } else {
        Some(GuardCloser::MissingSpace)
    }
}

fn capture<'a>(pattern: &Regex, text: &'a str) -> Option<&'a str> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
