//! Config assembly from the Drone step environment.
//!
//! All plugin input arrives as `PLUGIN_*` environment variables injected by
//! the Drone runner. The environment is snapshotted once and turned into a
//! single immutable [`Config`] that the planner and executor receive by
//! reference; nothing downstream reads the environment again.

use super::parser::{parse_functions, project_from_token};
use super::types::{Config, DEFAULT_RUNTIME, DEFAULT_VERBOSITY};
use super::validate::is_valid_for_deploy;
use std::path::PathBuf;

/// Vars named `PLUGIN_ENV_SECRET_<K>` contribute a `K=<value>` pair to
/// every deployed function's environment.
const ENV_SECRET_PREFIX: &str = "PLUGIN_ENV_SECRET_";

impl Config {
    /// Snapshot the process environment and assemble the plugin config.
    pub fn from_env() -> Result<Config, String> {
        let vars: Vec<(String, String)> = std::env::vars().collect();
        Config::from_vars(&vars)
    }

    /// Assemble the config from an explicit variable snapshot.
    ///
    /// Fatal outcomes: missing action, missing token, no resolvable
    /// functions for any action but `list`, and a project id that is set
    /// neither as a variable nor inside the credential document. For
    /// `deploy`, functions failing the deployability rules are dropped
    /// here with a logged reason; only the survivors are kept.
    pub fn from_vars(vars: &[(String, String)]) -> Result<Config, String> {
        let get = |key: &str| {
            vars.iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.as_str())
                .unwrap_or("")
        };

        let mut cfg = Config {
            dir: PathBuf::from(get("DRONE_WORKSPACE")).join(get("PLUGIN_DIR")),
            action: get("PLUGIN_ACTION").to_string(),
            dry_run: get("PLUGIN_DRY_RUN") == "true",
            verbose: get("PLUGIN_VERBOSE") == "true",
            project: get("PLUGIN_PROJECT").to_string(),
            runtime: get("PLUGIN_RUNTIME").to_string(),
            token: get("PLUGIN_TOKEN").to_string(),
            verbosity: get("PLUGIN_VERBOSITY").to_string(),
            ..Config::default()
        };

        if cfg.action.is_empty() {
            return Err("missing action".to_string());
        }
        if cfg.verbosity.is_empty() {
            cfg.verbosity = DEFAULT_VERBOSITY.to_string();
        }

        for (name, value) in vars {
            if let Some(key) = name.strip_prefix(ENV_SECRET_PREFIX) {
                cfg.env_secrets.push(format!("{key}={value}"));
            }
        }

        if cfg.token.is_empty() {
            cfg.token = get("TOKEN").to_string();
            if cfg.token.is_empty() {
                return Err("missing token".to_string());
            }
        }

        if cfg.runtime.is_empty() {
            cfg.runtime = DEFAULT_RUNTIME.to_string();
        }

        let listing = get("PLUGIN_FUNCTIONS");
        match cfg.action.as_str() {
            "call" | "delete" => cfg.functions = parse_functions(listing, &cfg.runtime),
            "deploy" => {
                cfg.functions = parse_functions(listing, &cfg.runtime)
                    .into_iter()
                    .filter(|f| is_valid_for_deploy(f))
                    .collect();
            }
            _ => {}
        }

        if cfg.functions.is_empty() && cfg.action != "list" {
            return Err("didn't find any functions".to_string());
        }

        if cfg.project.is_empty() {
            cfg.project = project_from_token(&cfg.token);
            if cfg.project.is_empty() {
                return Err("project id not found in token or setting".to_string());
            }
        }

        log::info!("using project id: {}", cfg.project);

        Ok(cfg)
    }
}
