//! Deployability rules for the `deploy` action.
//!
//! Rejections are diagnosed through the log, not raised: the config
//! assembly drops rejected functions and keeps going, while the planner
//! treats a rejection at compile time as a hard error.

use super::types::Function;

const KNOWN_RUNTIMES: &[&str] = &[
    "nodejs6", "nodejs8", "nodejs10", "nodejs12", "python37", "python38", "go111", "go113",
    "java11",
];

const KNOWN_TRIGGERS: &[&str] = &["http", "bucket", "topic", "event"];

/// Whether `r` is a runtime the functions service accepts.
pub fn is_valid_runtime(r: &str) -> bool {
    KNOWN_RUNTIMES.contains(&r)
}

/// Whether `t` is a known trigger kind.
pub fn is_valid_trigger(t: &str) -> bool {
    KNOWN_TRIGGERS.contains(&t)
}

/// Decide whether a function can be deployed.
///
/// An unknown runtime rejects outright. `http` triggers need nothing else;
/// every other trigger kind must be known and carry a resource, and `event`
/// triggers additionally need an event identifier.
pub fn is_valid_for_deploy(f: &Function) -> bool {
    if !is_valid_runtime(&f.runtime) {
        log::warn!(
            "missing or invalid runtime [{}] for function: {}",
            f.runtime,
            f.name
        );
        return false;
    }

    if f.trigger == "http" {
        return true;
    }

    if (f.trigger.is_empty() && f.trigger_event.is_empty() && f.trigger_resource.is_empty())
        || !is_valid_trigger(&f.trigger)
    {
        log::warn!("missing or invalid trigger for function {}", f.name);
        return false;
    }

    if f.trigger != "http" && f.trigger_resource.is_empty() {
        log::warn!("missing or invalid trigger resource for function {}", f.name);
        return false;
    }

    if f.trigger == "event" && f.trigger_event.is_empty() {
        log::warn!("missing trigger event for function {}", f.name);
        return false;
    }

    true
}
