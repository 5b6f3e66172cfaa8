use anyhow::{bail, Context, Result};
use dialoguer::{theme::ColorfulTheme, Input};

use crate::exec;
use trans_cli::translate::{translate, TargetLang};

pub(crate) fn cmd_translate(text: &str, target: TargetLang) -> Result<()> {
    let translated = translate(text, target)?;
    println!("{translated}");
    Ok(())
}

/// Translates line by line until an empty line or `q`/`quit`/`exit`.
pub(crate) fn cmd_interactive() -> Result<()> {
    if !exec::can_prompt() {
        bail!("-i requires a TTY");
    }

    println!("Interactive translation. Chinese input goes to English, anything else to Chinese.");
    println!("Enter an empty line or `q` to quit.");
    let theme = ColorfulTheme::default();
    loop {
        let line: String = Input::with_theme(&theme)
            .with_prompt(">")
            .allow_empty(true)
            .interact_text()
            .context("Prompt failed")?;
        let line = line.trim();
        if line.is_empty() || matches!(line, "q" | "quit" | "exit") {
            return Ok(());
        }

        match translate(line, TargetLang::detect_for(line)) {
            Ok(translated) => println!("{translated}"),
            Err(e) => eprintln!("Translation failed: {e:#}"),
        }
    }
}
