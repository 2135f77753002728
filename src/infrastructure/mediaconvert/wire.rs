//! Request body for the MediaConvert REST API.
//!
//! Job templates are written with PascalCase member names, the way the console
//! exports them. The REST protocol expects lower camel case, so member names are
//! rewritten on the way out. Values are never touched, and neither are the keys of
//! the selector maps, which are user-chosen names.

use serde_json::{json, Map, Value};

use crate::modules::job::dto::JobRequest;

const NAMED_MAPS: &[&str] = &[
    "AudioSelectors",
    "AudioSelectorGroups",
    "CaptionSelectors",
    "DynamicAudioSelectors",
];

pub fn create_job_body(request: &JobRequest) -> Result<Vec<u8>, serde_json::Error> {
    let body = json!({
        "jobTemplate": request.job_template,
        "queue": request.queue,
        "role": request.role,
        "settings": to_wire_casing(&request.settings),
    });
    serde_json::to_vec(&body)
}

pub fn to_wire_casing(value: &Value) -> Value {
    match value {
        Value::Object(members) => Value::Object(
            members
                .iter()
                .map(|(name, member)| {
                    let converted = if NAMED_MAPS.contains(&name.as_str()) {
                        named_map(member)
                    } else {
                        to_wire_casing(member)
                    };
                    (lower_first(name), converted)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(to_wire_casing).collect()),
        other => other.clone(),
    }
}

fn named_map(value: &Value) -> Value {
    match value {
        Value::Object(entries) => Value::Object(
            entries
                .iter()
                .map(|(name, entry)| (name.clone(), to_wire_casing(entry)))
                .collect::<Map<_, _>>(),
        ),
        other => to_wire_casing(other),
    }
}

fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
