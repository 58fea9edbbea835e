//! Plan execution — gcloud preconditions and sequential step runs.
//!
//! Strictly sequential: each step blocks until the child exits, the first
//! failure aborts the rest. Earlier steps are not rolled back.

use super::types::{Config, Plan, TOKEN_FILE};
use crate::transport::Runner;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Staged service-account key with guaranteed cleanup.
///
/// The key document must exist on disk for `gcloud auth
/// activate-service-account --key-file`; the guard removes it when
/// dropped, on every exit path including early failure.
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    /// Write the key document to `path` with owner-only permissions.
    pub fn stage(path: &Path, token: &str) -> Result<TokenFile, String> {
        let mut opts = std::fs::OpenOptions::new();
        opts.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            opts.mode(0o600);
        }
        let mut file = opts
            .open(path)
            .map_err(|e| format!("error writing token file {}: {}", path.display(), e))?;
        file.write_all(token.as_bytes())
            .map_err(|e| format!("error writing token file {}: {}", path.display(), e))?;
        Ok(TokenFile {
            path: path.to_path_buf(),
        })
    }
}

impl Drop for TokenFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            log::warn!("could not remove token file {}: {}", self.path.display(), e);
        }
    }
}

/// Execute the compiled plan.
///
/// Preconditions run first: a gcloud version check, then credential
/// activation from [`TOKEN_FILE`]. Either failing aborts before any plan
/// step is attempted. In dry-run mode every invocation, preconditions
/// included, is logged instead of spawned.
pub fn execute(cfg: &Config, plan: &Plan) -> Result<(), String> {
    let runner = Runner::new(&cfg.dir, cfg.dry_run, cfg.verbose);

    runner.run("gcloud", ["version"])?;
    runner.run(
        "gcloud",
        ["auth", "activate-service-account", "--key-file", TOKEN_FILE],
    )?;

    for step in &plan.steps {
        runner.run("gcloud", step)?;
    }

    Ok(())
}
