use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Result, bail};
use clap::Args;
use ftpdeploy_deployer::fetch;
use log::error;

use crate::commands::ConnectionArgs;

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Remote file to download
    pub remote: String,

    /// Local destination; defaults to the remote file name in the current directory
    pub local: Option<PathBuf>,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

pub fn run(args: FetchArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            error!("[error] {e:#}");
            eprintln!("[fetch] {e:#}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: FetchArgs) -> Result<ExitCode> {
    let local = local_destination(&args.remote, args.local.clone())?;
    let mut client = args.connection.connect()?;
    let bytes = fetch(&mut client, &args.remote, &local)?;

    eprintln!("[fetch] {} -> {} ({bytes} bytes)", args.remote, local.display());
    Ok(ExitCode::SUCCESS)
}

pub(crate) fn local_destination(remote: &str, local: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(local) = local {
        return Ok(local);
    }
    match remote.rsplit('/').next() {
        Some(name) if !name.is_empty() && name != "." && name != ".." => Ok(PathBuf::from(name)),
        _ => bail!("'{remote}' does not name a file; pass a local path"),
    }
}
