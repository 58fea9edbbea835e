//! Subprocess transport — blocking command execution for the plugin.
//!
//! One command at a time, stdout/stderr inherited from the plugin process
//! so gcloud output streams straight into the build log.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Runs external commands in the step's working directory.
///
/// Dry-run mode logs the command line and reports success without
/// spawning anything.
#[derive(Debug, Clone)]
pub struct Runner {
    dir: PathBuf,
    dry_run: bool,
    verbose: bool,
}

impl Runner {
    pub fn new(dir: &Path, dry_run: bool, verbose: bool) -> Runner {
        Runner {
            dir: dir.to_path_buf(),
            dry_run,
            verbose,
        }
    }

    /// Run one command to completion, suspending the caller until the
    /// child exits. Non-zero exit and spawn failure both become errors.
    pub fn run<I, S>(&self, program: &str, args: I) -> Result<(), String>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let display = || {
            let mut line = program.to_string();
            for a in &args {
                line.push(' ');
                line.push_str(&a.to_string_lossy());
            }
            line
        };

        if self.dry_run {
            log::info!("dry-run: {}", display());
            return Ok(());
        }
        if self.verbose {
            log::info!("running: {}", display());
        } else {
            log::debug!("running: {}", display());
        }

        let mut cmd = Command::new(program);
        cmd.args(&args);
        if !self.dir.as_os_str().is_empty() {
            cmd.current_dir(&self.dir);
        }

        let status = cmd
            .status()
            .map_err(|e| format!("failed to run {}: {}", program, e))?;
        if !status.success() {
            return Err(format!("{} failed: {}", display(), status));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner() -> Runner {
        Runner::new(Path::new(""), false, false)
    }

    #[test]
    fn test_run_success() {
        assert!(runner().run("true", Vec::<String>::new()).is_ok());
    }

    #[test]
    fn test_run_nonzero_exit() {
        let err = runner().run("false", Vec::<String>::new()).unwrap_err();
        assert!(err.contains("false failed"), "unexpected error: {err}");
    }

    #[test]
    fn test_run_spawn_failure() {
        let err = runner()
            .run("/no/such/binary", Vec::<String>::new())
            .unwrap_err();
        assert!(err.contains("failed to run"), "unexpected error: {err}");
    }

    #[test]
    fn test_run_exit_code_in_error() {
        let err = runner().run("sh", ["-c", "exit 42"]).unwrap_err();
        assert!(err.contains("42"), "unexpected error: {err}");
    }

    #[test]
    fn test_dry_run_never_spawns() {
        let r = Runner::new(Path::new(""), true, false);
        assert!(r.run("/no/such/binary", ["boom"]).is_ok());
    }

    #[test]
    fn test_run_uses_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker"), "x").unwrap();
        let r = Runner::new(dir.path(), false, false);
        assert!(r.run("sh", ["-c", "test -f marker"]).is_ok());
    }

    #[test]
    fn test_run_missing_working_directory() {
        let r = Runner::new(Path::new("/no/such/dir"), false, false);
        assert!(r.run("true", Vec::<String>::new()).is_err());
    }

    #[test]
    fn test_run_accepts_owned_and_borrowed_args() {
        assert!(runner().run("echo", ["borrowed"]).is_ok());
        assert!(runner().run("echo", vec!["owned".to_string()]).is_ok());
    }
}
