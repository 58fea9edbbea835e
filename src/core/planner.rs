//! Plan generation — compile the config into gcloud argument vectors.
//!
//! Every action shares the same prefix; the per-action arms append their
//! own arguments in a fixed order so that compiling the same config twice
//! yields byte-identical plans. Step order equals function order.

use super::types::{Config, Function, Plan};
use super::validate::is_valid_for_deploy;

/// Compile an execution plan, one gcloud invocation per step.
///
/// Errors on an unknown action and on any deploy function that fails the
/// deployability re-check — functions were already filtered during config
/// assembly, so a rejection here means the two passes disagree and the run
/// must stop rather than silently skip.
pub fn compile(cfg: &Config) -> Result<Plan, String> {
    let mut plan = Plan::default();

    let base_args = vec![
        "--quiet".to_string(),
        "functions".to_string(),
        cfg.action.clone(),
        "--project".to_string(),
        cfg.project.clone(),
        "--verbosity".to_string(),
        cfg.verbosity.clone(),
    ];

    match cfg.action.as_str() {
        "call" => {
            for f in &cfg.functions {
                let mut args = base_args.clone();
                args.push(f.name.clone());
                if !f.region.is_empty() {
                    args.push("--region".to_string());
                    args.push(f.region.clone());
                }
                if !f.data.is_empty() {
                    args.push("--data".to_string());
                    args.push(f.data.clone());
                }
                plan.steps.push(args);
            }
        }

        "deploy" => {
            for f in &cfg.functions {
                if !is_valid_for_deploy(f) {
                    return Err(format!("invalid config for function: {}", f.name));
                }
                plan.steps.push(deploy_args(cfg, f, &base_args));
            }
        }

        "delete" => {
            for f in &cfg.functions {
                let mut args = base_args.clone();
                args.push(f.name.clone());
                if !f.region.is_empty() {
                    args.push("--region".to_string());
                    args.push(f.region.clone());
                }
                plan.steps.push(args);
            }
        }

        "list" => {
            plan.steps.push(base_args);
        }

        action => {
            return Err(format!("action: {action} not implemented yet"));
        }
    }

    Ok(plan)
}

/// Build the argument vector for deploying one function.
fn deploy_args(cfg: &Config, f: &Function, base_args: &[String]) -> Vec<String> {
    let mut args = base_args.to_vec();
    args.push(f.name.clone());
    args.push("--runtime".to_string());
    args.push(f.runtime.clone());

    match f.trigger.as_str() {
        "bucket" => {
            args.push("--trigger-bucket".to_string());
            args.push(f.trigger_resource.clone());
        }
        "http" => {
            args.push("--trigger-http".to_string());
        }
        "topic" => {
            args.push("--trigger-topic".to_string());
            args.push(f.trigger_resource.clone());
        }
        "event" => {
            args.push("--trigger-event".to_string());
            args.push(f.trigger_event.clone());
            // gcloud only accepts the `=` form for this flag.
            args.push(format!("--trigger-resource={}", f.trigger_resource));
        }
        _ => {}
    }

    if f.allow_unauthenticated {
        args.push("--allow-unauthenticated".to_string());
    }
    for (flag, value) in [
        ("--source", &f.source),
        ("--memory", &f.memory),
        ("--entry-point", &f.entrypoint),
        ("--region", &f.region),
        ("--retry", &f.retry),
        ("--timeout", &f.timeout),
        ("--service-account", &f.serviceaccount),
    ] {
        if !value.is_empty() {
            args.push(flag.to_string());
            args.push(value.clone());
        }
    }

    if let Some(env_str) = env_vars_value(cfg, f) {
        args.push("--set-env-vars".to_string());
        args.push(env_str);
    }

    args
}

/// Combine step-wide secrets with the function's first environment overlay
/// into a `^<delimiter>^`-prefixed value for `--set-env-vars`.
///
/// The caret form tells gcloud which delimiter separates the pairs, so a
/// delimiter embedded in a value can't collide with gcloud's own `,`
/// splitting. Returns `None` when there is nothing to set.
fn env_vars_value(cfg: &Config, f: &Function) -> Option<String> {
    if cfg.env_secrets.is_empty() && f.environment.is_empty() {
        return None;
    }

    let mut pairs = cfg.env_secrets.clone();
    if let Some(overlay) = f.environment.first() {
        for (k, v) in overlay {
            pairs.push(format!("{k}={v}"));
        }
    }

    Some(format!(
        "^{}^{}",
        f.environment_delimiter,
        pairs.join(&f.environment_delimiter)
    ))
}
