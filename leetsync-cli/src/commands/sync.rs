//! `leetsync sync` — fetch accepted submissions and commit the new ones.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use leetsync_client::LeetCodeClient;
use leetsync_core::config;
use leetsync_git::GitRepository;
use leetsync_sync::{pipeline, FailurePolicy, SyncOptions, SyncOutcome, SyncReport};

/// Arguments for `leetsync sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Show what would be committed without writing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Continue past per-submission failures instead of aborting.
    #[arg(long)]
    pub keep_going: bool,

    /// Push to the configured remote after a successful sync.
    #[arg(long)]
    pub push: bool,

    /// Refetch the problem-id metadata instead of using the cache.
    #[arg(long)]
    pub refresh_problems: bool,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let home: PathBuf = dirs::home_dir().context("could not determine home directory")?;
        let cfg = config::load_at(&home)?;

        let mut repo = GitRepository::open(&cfg.solutions_repo).with_context(|| {
            format!(
                "cannot open solutions repo at {}",
                cfg.solutions_repo.display()
            )
        })?;
        let repo_root = repo.workdir().to_path_buf();

        let mut client = LeetCodeClient::new(&cfg, home.clone(), self.refresh_problems);

        let options = SyncOptions {
            dry_run: self.dry_run,
            policy: if self.keep_going {
                FailurePolicy::KeepGoing
            } else {
                FailurePolicy::FailFast
            },
        };

        let report = pipeline::run(&home, &repo_root, &mut client, &mut repo, options)
            .context("sync failed")?;
        print_report(&report, self.dry_run);

        if self.push && !self.dry_run && report.synced_count() > 0 {
            println!("pushing to '{}'…", cfg.remote);
            repo.push(&cfg.remote)
                .with_context(|| format!("push to '{}' failed", cfg.remote))?;
        }

        if report.has_failures() {
            bail!("{} submission(s) failed to sync", report.failed_count());
        }
        Ok(())
    }
}

fn print_report(report: &SyncReport, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };

    for entry in &report.entries {
        match &entry.outcome {
            SyncOutcome::Synced { path } => {
                println!("  {}  {}", "✎".green(), path.display());
            }
            SyncOutcome::WouldSync { path } => {
                println!("  {}  {}", "~".cyan(), path.display());
            }
            SyncOutcome::Failed { path, error } => {
                println!("  {}  {} — {}", "✗".red(), path.display(), error);
            }
            // Skips are summarized, not listed; a mature account has
            // hundreds of them per run.
            SyncOutcome::Skipped => {}
        }
    }

    let new_count = report.synced_count() + report.would_sync_count();
    if new_count == 0 && report.failed_count() == 0 {
        println!("{prefix}{} nothing new to sync", "✓".green());
    } else {
        println!(
            "{prefix}{} {} new, {} already synced, {} failed",
            "✓".green(),
            new_count,
            report.skipped_count(),
            report.failed_count()
        );
    }
}
