use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};

use crate::exec;

fn quiet_git(args: &[&str], what: &str) -> Result<bool> {
    let status = Command::new("git")
        .args(args)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .with_context(|| format!("Failed to run {what}"))?;
    Ok(status.success())
}

pub(crate) fn ensure_work_tree() -> Result<()> {
    if !quiet_git(&["rev-parse", "--is-inside-work-tree"], "git rev-parse")? {
        bail!("Not a git repository (git rev-parse --is-inside-work-tree failed)");
    }
    Ok(())
}

pub(crate) fn has_commit() -> Result<bool> {
    quiet_git(
        &["rev-parse", "--verify", "--quiet", "HEAD"],
        "git rev-parse --verify HEAD",
    )
}

pub(crate) fn ensure_ref_exists(name: &str) -> Result<()> {
    if !quiet_git(
        &["rev-parse", "--verify", "--quiet", name],
        "git rev-parse --verify",
    )? {
        bail!("Base ref not found: {name}");
    }
    Ok(())
}

pub(crate) fn ensure_branch_name_valid(name: &str) -> Result<()> {
    if !quiet_git(
        &["check-ref-format", "--branch", name],
        "git check-ref-format --branch",
    )? {
        bail!("Invalid branch name: {name}");
    }
    Ok(())
}

pub(crate) fn branch_exists(name: &str) -> Result<bool> {
    let ref_name = format!("refs/heads/{name}");
    quiet_git(
        &["show-ref", "--verify", "--quiet", &ref_name],
        "git show-ref --verify",
    )
}

/// `git checkout -b <name> [<base>]`
pub(crate) fn checkout_new_branch(name: &str, base: Option<&str>) -> Result<()> {
    let mut cmd = Command::new("git");
    cmd.args(["checkout", "-b", name]);
    if let Some(base) = base {
        cmd.arg(base);
    }
    exec::run_ok(cmd, "git checkout -b")
}
