use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;
use clap::Args;
use ftpdeploy_deployer::{DeployPlan, deploy};
use ftpdeploy_fs::IgnoreOptions;
use ftpdeploy_runtime::DEFAULT_REMOTE_ROOT;
use log::error;

use crate::commands::ConnectionArgs;

#[derive(Debug, Args)]
pub struct DeployArgs {
    /// File or directory to upload
    pub artifact: PathBuf,

    /// Remote directory holding one directory per project
    #[arg(long, default_value = DEFAULT_REMOTE_ROOT)]
    pub remote_root: String,

    /// Empty the existing project directory before uploading
    #[arg(long)]
    pub replace: bool,

    /// Gitignore-style pattern to skip (repeatable)
    #[arg(long, short = 'x', value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Gitignore-format file with more patterns to skip (repeatable)
    #[arg(long, value_name = "FILE")]
    pub ignore_file: Vec<PathBuf>,

    /// Also upload VCS metadata and OS clutter
    #[arg(long)]
    pub no_default_excludes: bool,

    /// Build configuration name, for the log only
    #[arg(long, short = 'c')]
    pub configuration: Option<String>,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

impl DeployArgs {
    pub fn plan(&self) -> DeployPlan {
        DeployPlan {
            remote_root: self.remote_root.clone(),
            replace: self.replace,
            ignore: IgnoreOptions {
                use_default_patterns: !self.no_default_excludes,
                extra_patterns: self.exclude.clone(),
                extra_ignore_files: self.ignore_file.clone().into_boxed_slice(),
            },
            configuration: self.configuration.clone(),
            ..DeployPlan::new(&self.artifact)
        }
    }
}

pub fn run(args: DeployArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            error!("[error] {e:#}");
            eprintln!("[deploy] {e:#}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: DeployArgs) -> Result<ExitCode> {
    let plan = args.plan();
    let mut client = args.connection.connect()?;

    let started = Instant::now();
    let report = deploy(&mut client, &plan)?;
    let elapsed = started.elapsed();

    if report.created_dirs > 0 {
        eprintln!("[deploy] created {} directories", report.created_dirs);
    }
    if report.removed > 0 {
        eprintln!("[deploy] removed {} old entries", report.removed);
    }
    eprintln!(
        "[deploy] {} files ({} bytes) uploaded to {}/{} in {:.2}s",
        report.uploaded_files,
        report.bytes,
        client.display_name(),
        report.remote_path.trim_start_matches('/'),
        elapsed.as_secs_f64()
    );

    for path in &report.size_mismatches {
        eprintln!("[deploy] warning: size of {path} changed during upload");
    }

    if report.uploaded_files == 0 {
        // Nothing left after excludes.
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}
