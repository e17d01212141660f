//! `leetsync init` — scaffold `~/.leetsync/config.json`.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use leetsync_core::config::{self, Config};

/// Arguments for `leetsync init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path to the local solutions git repository.
    pub repo: PathBuf,

    /// Value of the LEETCODE_SESSION cookie (can be filled in later).
    #[arg(long, default_value = "")]
    pub session: String,

    /// Value of the csrftoken cookie (can be filled in later).
    #[arg(long, default_value = "")]
    pub csrf: String,

    /// Remote to push to after a successful sync.
    #[arg(long, default_value = "origin")]
    pub remote: String,

    /// Overwrite an existing config.
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    pub fn run(self) -> Result<()> {
        let home: PathBuf = dirs::home_dir().context("could not determine home directory")?;

        let config_path = config::config_path_at(&home);
        if config_path.exists() && !self.force {
            bail!(
                "config already exists at {}; use --force to overwrite",
                config_path.display()
            );
        }

        if !self.repo.exists() {
            bail!("solutions repo path not found: {}", self.repo.display());
        }
        let repo = self
            .repo
            .canonicalize()
            .with_context(|| format!("cannot resolve repo path {}", self.repo.display()))?;

        let needs_cookies = self.session.is_empty() || self.csrf.is_empty();
        let cfg = Config {
            leetcode_session: self.session,
            csrf_token: self.csrf,
            solutions_repo: repo,
            remote: self.remote,
        };
        config::save_at(&home, &cfg).context("failed to write config")?;

        println!("{} wrote {}", "✓".green(), config_path.display());
        if needs_cookies {
            println!(
                "  fill in leetcode_session and csrf_token from a logged-in browser session before running `leetsync sync`"
            );
        }
        Ok(())
    }
}
