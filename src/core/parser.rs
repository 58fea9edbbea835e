//! Function-listing parser and credential inspection.
//!
//! The `functions` setting accepts two shapes:
//! - a JSON listing: a sequence of mapping objects, each mapping a function
//!   name to a list of attribute objects;
//! - a plain comma-separated list of function names.
//!
//! The strict JSON parse is attempted first; any structural or syntactic
//! failure falls back to the comma-separated shape. That downgrade is silent
//! and deliberate — a malformed listing becomes a (possibly empty) name
//! list, never an error.

use super::types::{Function, DEFAULT_ENV_VAR_DELIMITER};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;

/// One listing entry: ordered (name, attribute objects) pairs.
///
/// Deserialized through a map visitor instead of a map type so that an
/// entry with duplicate names keeps every occurrence, in document order.
struct ListingEntry(Vec<(String, Vec<Function>)>);

impl<'de> Deserialize<'de> for ListingEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntryVisitor;

        impl<'de> Visitor<'de> for EntryVisitor {
            type Value = ListingEntry;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of function name to attribute objects")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pairs = Vec::new();
                while let Some(pair) = map.next_entry::<String, Vec<Function>>()? {
                    pairs.push(pair);
                }
                Ok(ListingEntry(pairs))
            }
        }

        deserializer.deserialize_map(EntryVisitor)
    }
}

/// Parse the `functions` setting into a list of functions.
///
/// Structured entries get their name from the trimmed listing key and have
/// empty `runtime`/`environment_delimiter` fields filled with the defaults.
/// Inputs that don't parse as a structured listing are treated as a
/// comma-separated name list; empty input yields an empty list.
pub fn parse_functions(raw: &str, default_runtime: &str) -> Vec<Function> {
    let listing: Vec<ListingEntry> = match serde_json::from_str(raw) {
        Ok(listing) => listing,
        Err(_) => return parse_function_names(raw),
    };

    let mut res = Vec::new();
    for ListingEntry(pairs) in listing {
        for (name, attrs) in pairs {
            for mut f in attrs {
                f.name = name.trim().to_string();
                if f.runtime.is_empty() {
                    f.runtime = default_runtime.to_string();
                }
                if f.environment_delimiter.is_empty() {
                    f.environment_delimiter = DEFAULT_ENV_VAR_DELIMITER.to_string();
                }
                res.push(f);
            }
        }
    }
    res
}

/// Fallback shape: comma-separated names, trimmed, empties dropped.
fn parse_function_names(raw: &str) -> Vec<Function> {
    raw.split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(|n| Function {
            name: n.to_string(),
            ..Function::default()
        })
        .collect()
}

/// Read the `project_id` field out of a service-account key document.
/// Returns an empty string on any parse failure or when the field is
/// missing; never errors.
pub fn project_from_token(token: &str) -> String {
    #[derive(Deserialize)]
    struct TokenInfo {
        #[serde(default)]
        project_id: String,
    }

    serde_json::from_str::<TokenInfo>(token)
        .map(|t| t.project_id)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_KEY: &str = r#"
{
  "type": "service_account",
  "project_id": "my-project-id",
  "private_key_id": "",
  "client_email": "my-project@appspot.gserviceaccount.com",
  "client_id": "123"
}
"#;

    const INVALID_KEY: &str = r#"
{
  "type": "service_account",
  234: "invalid Json    ,
}
"#;

    #[test]
    fn test_parse_structured_listing() {
        let raw = r#"[{"TransferFile":[{"trigger":"http"}]},{"HeyNow123":[{"trigger":"bucket","trigger_resource":"gs://my-bucket","memory":"512MB"}]}]"#;
        let fns = parse_functions(raw, "go111");
        assert_eq!(fns.len(), 2);
        assert_eq!(fns[0].name, "TransferFile");
        assert_eq!(fns[0].trigger, "http");
        assert_eq!(fns[1].name, "HeyNow123");
        assert_eq!(fns[1].trigger_resource, "gs://my-bucket");
        assert_eq!(fns[1].memory, "512MB");
    }

    #[test]
    fn test_parse_fills_default_runtime_and_delimiter() {
        let fns = parse_functions(r#"[{"F":[{"trigger":"http"}]}]"#, "python37");
        assert_eq!(fns[0].runtime, "python37");
        assert_eq!(fns[0].environment_delimiter, DEFAULT_ENV_VAR_DELIMITER);
    }

    #[test]
    fn test_parse_keeps_explicit_runtime_and_delimiter() {
        let raw = r#"[{"F":[{"trigger":"http","runtime":"nodejs10","environment_delimiter":"~%~"}]}]"#;
        let fns = parse_functions(raw, "go111");
        assert_eq!(fns[0].runtime, "nodejs10");
        assert_eq!(fns[0].environment_delimiter, "~%~");
    }

    #[test]
    fn test_parse_trims_listing_key() {
        let fns = parse_functions(r#"[{"  Padded  ":[{"trigger":"http"}]}]"#, "go111");
        assert_eq!(fns[0].name, "Padded");
    }

    #[test]
    fn test_parse_multiple_attribute_objects_per_name() {
        let raw = r#"[{"F":[{"region":"us-east1"},{"region":"europe-west1"}]}]"#;
        let fns = parse_functions(raw, "go111");
        assert_eq!(fns.len(), 2);
        assert_eq!(fns[0].name, "F");
        assert_eq!(fns[1].name, "F");
        assert_eq!(fns[1].region, "europe-west1");
    }

    #[test]
    fn test_parse_duplicate_keys_preserved_in_order() {
        let raw = r#"[{"F":[{"region":"a"}],"F":[{"region":"b"}]}]"#;
        let fns = parse_functions(raw, "go111");
        assert_eq!(fns.len(), 2);
        assert_eq!(fns[0].region, "a");
        assert_eq!(fns[1].region, "b");
    }

    #[test]
    fn test_parse_comma_separated_fallback() {
        let fns = parse_functions("TransferFile,ProcessEvents4,ThirdFunc", "go111");
        let names: Vec<_> = fns.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["TransferFile", "ProcessEvents4", "ThirdFunc"]);
        // Bare names carry no attributes and no defaults.
        assert!(fns[0].runtime.is_empty());
        assert!(fns[0].environment_delimiter.is_empty());
    }

    #[test]
    fn test_parse_fallback_trims_and_drops_empty_tokens() {
        let fns = parse_functions(" a , ,b,,  c ", "go111");
        let names: Vec<_> = fns.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_functions("", "go111").is_empty());
    }

    #[test]
    fn test_parse_malformed_listing_downgrades_silently() {
        // Broken JSON is treated as a name list, not an error.
        let fns = parse_functions(r#"[{"F":[{"trigger":"#, "go111");
        assert_eq!(fns.len(), 1);
        assert_eq!(fns[0].name, r#"[{"F":[{"trigger":"#);
    }

    #[test]
    fn test_parse_empty_listing() {
        assert!(parse_functions("[]", "go111").is_empty());
    }

    #[test]
    fn test_project_from_token_valid() {
        assert_eq!(project_from_token(VALID_KEY), "my-project-id");
    }

    #[test]
    fn test_project_from_token_invalid() {
        assert_eq!(project_from_token(INVALID_KEY), "");
    }

    #[test]
    fn test_project_from_token_missing_field() {
        assert_eq!(project_from_token(r#"{"type": "service_account"}"#), "");
    }
}
