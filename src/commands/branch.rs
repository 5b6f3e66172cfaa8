use anyhow::{bail, Result};

use crate::cli::BranchArgs;
use crate::exec;
use crate::git;

pub(crate) fn cmd_branch(args: BranchArgs) -> Result<()> {
    if args.create {
        exec::ensure_in_path("git")?;
        git::ensure_work_tree()?;
        if let Some(base) = &args.base {
            git::ensure_ref_exists(base)?;
        } else if !git::has_commit()? {
            bail!(
                "This git repository has no commits yet (unborn HEAD). \
Create an initial commit or pass --base."
            );
        }
    }

    let name = trans_cli::generate_branch_name(&args.description)?;

    if !args.create {
        println!("{name}");
        return Ok(());
    }

    git::ensure_branch_name_valid(&name)?;
    if git::branch_exists(&name)? {
        bail!("Branch already exists: {name}");
    }
    git::checkout_new_branch(&name, args.base.as_deref())?;
    println!("{name}");
    Ok(())
}
