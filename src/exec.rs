use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};

pub(crate) fn ensure_in_path(bin: &str) -> Result<()> {
    let found = Command::new(bin)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success());
    if !found {
        bail!("{bin} not found in PATH");
    }
    Ok(())
}

/// Runs `cmd` with inherited stdio; `what` names it in errors.
pub(crate) fn run_ok(mut cmd: Command, what: &str) -> Result<()> {
    let status = cmd
        .status()
        .with_context(|| format!("Failed to run {what}"))?;
    if !status.success() {
        bail!("{what} failed with status: {status}");
    }
    Ok(())
}

pub(crate) fn can_prompt() -> bool {
    use std::io::IsTerminal;
    std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
}
