//! Top-level plugin run — config assembly, token staging, plan, execution.

use crate::core::executor::{self, TokenFile};
use crate::core::planner;
use crate::core::types::{Config, TOKEN_FILE};
use std::path::Path;

/// Run the plugin end to end against the process environment.
///
/// The compile step happens before the key touches disk, so a config or
/// plan error never leaves a credential behind; once staged, the token
/// file is removed on every exit path by its guard.
pub fn run() -> Result<(), String> {
    let cfg = Config::from_env()?;
    let plan = planner::compile(&cfg)?;

    let _token = TokenFile::stage(Path::new(TOKEN_FILE), &cfg.token)?;
    executor::execute(&cfg, &plan)
}
