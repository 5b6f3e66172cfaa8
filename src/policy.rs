//! Branch naming policy.
//!
//! [`check_branch_name`] runs the checks in a fixed order and stops at the first failure; later
//! checks rely on the earlier ones (the slug split needs exactly one `/`, the length check needs an
//! ASCII-only name). A candidate is either accepted unchanged apart from case and surrounding
//! whitespace, or rejected. Nothing is repaired.

use thiserror::Error;

use crate::version::extract_release_version;

pub const MAX_BRANCH_NAME_LEN: usize = 48;

/// Recognized branch prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchPrefix {
    Main,
    Master,
    Develop,
    Feature,
    Feat,
    Bugfix,
    Fix,
    Hotfix,
    Release,
    Chore,
}

impl BranchPrefix {
    pub const ALL: [BranchPrefix; 10] = [
        BranchPrefix::Main,
        BranchPrefix::Master,
        BranchPrefix::Develop,
        BranchPrefix::Feature,
        BranchPrefix::Feat,
        BranchPrefix::Bugfix,
        BranchPrefix::Fix,
        BranchPrefix::Hotfix,
        BranchPrefix::Release,
        BranchPrefix::Chore,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BranchPrefix::Main => "main",
            BranchPrefix::Master => "master",
            BranchPrefix::Develop => "develop",
            BranchPrefix::Feature => "feature/",
            BranchPrefix::Feat => "feat/",
            BranchPrefix::Bugfix => "bugfix/",
            BranchPrefix::Fix => "fix/",
            BranchPrefix::Hotfix => "hotfix/",
            BranchPrefix::Release => "release/",
            BranchPrefix::Chore => "chore/",
        }
    }

    /// Bare prefixes name a long-lived branch rather than a change category.
    pub fn is_bare(self) -> bool {
        !self.as_str().ends_with('/')
    }

    /// What the prefix is for and a sample name, for prompting. `None` for bare prefixes.
    pub fn guidance(self) -> Option<(&'static str, &'static str)> {
        match self {
            BranchPrefix::Main | BranchPrefix::Master | BranchPrefix::Develop => None,
            BranchPrefix::Feature => Some(("new features", "feature/add-login-page")),
            BranchPrefix::Feat => Some(("new features (short form)", "feat/add-login-page")),
            BranchPrefix::Bugfix => Some(("bug fixes", "bugfix/fix-header-bug")),
            BranchPrefix::Fix => Some(("bug fixes (short form)", "fix/header-bug")),
            BranchPrefix::Hotfix => Some(("urgent production fixes", "hotfix/security-patch")),
            BranchPrefix::Release => Some(("preparing a release", "release/v1.2.0")),
            BranchPrefix::Chore => Some((
                "non-code work such as dependencies or docs",
                "chore/update-dependencies",
            )),
        }
    }

    /// Bare prefixes must be the whole name or be followed by `/`; so `developer/x` is not
    /// `develop`.
    pub fn matches(self, name: &str) -> bool {
        let p = self.as_str();
        if self.is_bare() {
            name == p || name.strip_prefix(p).is_some_and(|rest| rest.starts_with('/'))
        } else {
            name.starts_with(p)
        }
    }

    pub fn detect(name: &str) -> Option<BranchPrefix> {
        BranchPrefix::ALL.into_iter().find(|p| p.matches(name))
    }
}

/// Why a candidate was refused, one variant per policy check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("does not start with a recognized prefix")]
    UnknownPrefix,
    #[error("must contain exactly one '/'")]
    SlashCount,
    #[error("ends with '/'")]
    TrailingSlash,
    #[error("contains disallowed character {0:?}")]
    InvalidCharacter(char),
    #[error("starts or ends with '-' or '.'")]
    EdgeSeparator,
    #[error("contains '--' or '..'")]
    DoubledSeparator,
    #[error("release branch needs a vMAJOR.MINOR.PATCH version")]
    InvalidReleaseVersion,
    #[error("'.' is only allowed in release versions")]
    DotOutsideRelease,
    #[error("is {0} characters long (max {max})", max = MAX_BRANCH_NAME_LEN)]
    TooLong(usize),
}

/// Validates a raw candidate and returns the canonical branch name.
pub fn check_branch_name(raw: &str) -> Result<String, Rejection> {
    let name = raw.trim().to_lowercase();

    let prefix = BranchPrefix::detect(&name).ok_or(Rejection::UnknownPrefix)?;
    if name.matches('/').count() != 1 {
        return Err(Rejection::SlashCount);
    }
    if name.ends_with('/') {
        return Err(Rejection::TrailingSlash);
    }
    if let Some(c) = name.chars().find(|c| !is_allowed_char(*c)) {
        return Err(Rejection::InvalidCharacter(c));
    }

    let slug = name.split_once('/').map(|(_, s)| s).unwrap_or_default();
    if has_edge_separator(&name) || has_edge_separator(slug) {
        return Err(Rejection::EdgeSeparator);
    }
    if name.contains("--") || name.contains("..") {
        return Err(Rejection::DoubledSeparator);
    }

    if prefix == BranchPrefix::Release {
        // The version owns exactly two dots; any other dot is out of policy.
        let version_ok = extract_release_version(&name).is_some();
        if !version_ok || slug.matches('.').count() != 2 {
            return Err(Rejection::InvalidReleaseVersion);
        }
    } else if name.contains('.') {
        return Err(Rejection::DotOutsideRelease);
    }

    if name.len() > MAX_BRANCH_NAME_LEN {
        return Err(Rejection::TooLong(name.len()));
    }
    Ok(name)
}

/// Sentinel form of [`check_branch_name`].
pub fn validate_branch_name(raw: &str) -> Option<String> {
    check_branch_name(raw).ok()
}

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '.' | '/')
}

fn has_edge_separator(s: &str) -> bool {
    let edge = |c: char| c == '-' || c == '.';
    s.starts_with(edge) || s.ends_with(edge)
}
