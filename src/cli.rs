use anyhow::{bail, Result};
use clap::{ArgGroup, Parser};

use crate::commands;
use trans_cli::translate::TargetLang;

#[derive(Parser, Debug)]
#[command(
    name = "trans",
    version,
    about = "Quick translation and LLM-assisted git branch naming",
    group(ArgGroup::new("mode").args(["english", "chinese", "interactive", "branch"]))
)]
struct Cli {
    /// Translate Chinese text to English
    #[arg(short = 'e', long = "en")]
    english: bool,
    /// Translate English text to Chinese
    #[arg(short = 'c', long = "zh")]
    chinese: bool,
    /// Interactive translation mode
    #[arg(short = 'i', long)]
    interactive: bool,
    /// Generate a git branch name from a change description (needs OPENAI_API_KEY)
    #[arg(short = 'b', long)]
    branch: bool,
    /// With --branch: create and switch to the generated branch
    #[arg(long, requires = "branch")]
    create: bool,
    /// With --create: start point for the new branch (default: current HEAD)
    #[arg(long, requires = "create")]
    base: Option<String>,
    /// Text to translate, or the change description for --branch
    text: Vec<String>,
}

#[derive(Debug)]
pub(crate) struct BranchArgs {
    pub(crate) description: String,
    pub(crate) create: bool,
    pub(crate) base: Option<String>,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.interactive {
        return commands::translate::cmd_interactive();
    }
    if !(cli.english || cli.chinese || cli.branch) {
        bail!(
            "No mode selected. Usage:\n  \
trans -e <chinese text>    # translate to English\n  \
trans -c <english text>    # translate to Chinese\n  \
trans -i                   # interactive translation\n  \
trans -b <description>     # generate a git branch name"
        );
    }

    let text = cli.text.join(" ");
    if text.trim().is_empty() {
        if cli.branch {
            bail!("Please provide a change description");
        }
        bail!("Please provide text to translate");
    }

    if cli.branch {
        return commands::branch::cmd_branch(BranchArgs {
            description: text,
            create: cli.create,
            base: cli.base,
        });
    }
    let target = if cli.english {
        TargetLang::English
    } else {
        TargetLang::Chinese
    };
    commands::translate::cmd_translate(&text, target)
}
