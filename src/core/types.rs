//! Plugin data model — functions, configuration, and the execution plan.
//!
//! `Function` mirrors the attribute objects accepted in the `functions`
//! setting of the Drone step; `Config` is the whole plugin input assembled
//! from the step environment; `Plan` is the compiled sequence of gcloud
//! argument vectors.

use indexmap::IndexMap;
use serde::Deserialize;
use std::path::PathBuf;

/// Where the service-account key is staged for `gcloud auth` inside the
/// ephemeral build container.
pub const TOKEN_FILE: &str = "/tmp/token.json";

/// Sentinel used to join `--set-env-vars` pairs when the step doesn't pick
/// its own delimiter.
pub const DEFAULT_ENV_VAR_DELIMITER: &str = ":|:";

/// Runtime assumed when neither the step nor the function sets one.
pub const DEFAULT_RUNTIME: &str = "go111";

/// gcloud verbosity used when the step doesn't set one.
pub const DEFAULT_VERBOSITY: &str = "warning";

// ============================================================================
// Functions
// ============================================================================

/// One deployable Cloud Function.
///
/// Every field is optional in the structured listing; `name` is filled from
/// the listing key during parsing, never from the attribute object itself.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Function {
    /// Function name (listing key, trimmed).
    #[serde(skip)]
    pub name: String,

    /// Trigger kind: `http`, `bucket`, `topic`, or `event`.
    pub trigger: String,

    /// Event identifier, required for `event` triggers.
    pub trigger_event: String,

    /// Resource identifier, required for every non-http trigger.
    pub trigger_resource: String,

    /// Pass `--allow-unauthenticated` on deploy.
    pub allow_unauthenticated: bool,

    /// Entry-point symbol inside the source.
    pub entrypoint: String,

    /// Memory spec, e.g. `512MB`.
    pub memory: String,

    /// Deployment region, e.g. `us-east1`.
    pub region: String,

    /// Retry policy.
    pub retry: String,

    /// Runtime identifier; defaulted from the step runtime when empty.
    pub runtime: String,

    /// Source path relative to the working directory.
    pub source: String,

    /// Execution timeout, e.g. `20s`.
    pub timeout: String,

    /// Service account the function runs as.
    pub serviceaccount: String,

    /// Delimiter for joining `--set-env-vars` pairs; defaulted to
    /// [`DEFAULT_ENV_VAR_DELIMITER`] when empty.
    pub environment_delimiter: String,

    /// Function environment overlay. Only the first map is consulted;
    /// insertion order is preserved so compiled plans are deterministic.
    pub environment: Vec<IndexMap<String, String>>,

    /// Payload for `--data`, used by the `call` action only.
    pub data: String,
}

// ============================================================================
// Configuration
// ============================================================================

/// Complete plugin input, assembled once from the step environment and
/// threaded by reference through validation, planning, and execution.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Selected action: `call`, `deploy`, `delete`, or `list`.
    pub action: String,

    /// Log the invocations instead of spawning gcloud.
    pub dry_run: bool,

    /// Echo every invocation before running it.
    pub verbose: bool,

    /// Working directory for gcloud (workspace joined with the step dir).
    pub dir: PathBuf,

    /// Target project id; derived from the credential when unset.
    pub project: String,

    /// Raw service-account key JSON.
    pub token: String,

    /// Default runtime applied to functions that don't set one.
    pub runtime: String,

    /// gcloud `--verbosity` level.
    pub verbosity: String,

    /// `KEY=VALUE` pairs from `PLUGIN_ENV_SECRET_*` vars, in snapshot order.
    pub env_secrets: Vec<String>,

    /// Functions resolved for the selected action.
    pub functions: Vec<Function>,
}

// ============================================================================
// Plan
// ============================================================================

/// Ordered gcloud invocations, one argument vector per step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub steps: Vec<Vec<String>>,
}
