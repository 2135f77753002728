use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::common::error::{ConfigError, JobError};

#[derive(Clone, Copy, Debug)]
enum Segment {
    Key(&'static str),
    Index(usize),
}

use Segment::{Index, Key};

const HLS_DESTINATION: &[Segment] = &[
    Key("OutputGroups"),
    Index(0),
    Key("OutputGroupSettings"),
    Key("HlsGroupSettings"),
    Key("Destination"),
];

const FILE_INPUT: &[Segment] = &[Key("Inputs"), Index(0), Key("FileInput")];

/// A freshly loaded copy of the bundled job settings document.
#[derive(Debug, Clone)]
pub struct JobTemplate {
    document: Value,
}

impl JobTemplate {
    /// Reads and parses the template. The file handle is released before this returns,
    /// on success and on error alike.
    pub async fn load(path: &Path) -> Result<Self, JobError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ConfigError::TemplateUnreadable {
                path: path.to_path_buf(),
                source,
            })?;

        let document =
            serde_json::from_slice(&bytes).map_err(|source| ConfigError::TemplateInvalid {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(path = %path.display(), bytes = bytes.len(), "Loaded job template");
        Ok(Self::from_document(document))
    }

    pub fn from_document(document: Value) -> Self {
        Self { document }
    }

    /// Points the first output group at `output_uri` and the first input at `input_uri`.
    pub fn materialize(mut self, input_uri: &str, output_uri: &str) -> Result<Value, JobError> {
        *slot_mut(&mut self.document, HLS_DESTINATION)? = Value::String(output_uri.to_string());
        *slot_mut(&mut self.document, FILE_INPUT)? = Value::String(input_uri.to_string());
        Ok(self.document)
    }
}

/// Walks to the leaf at `path`. Every container on the way must exist; the leaf
/// itself is created when absent.
fn slot_mut<'a>(root: &'a mut Value, path: &[Segment]) -> Result<&'a mut Value, JobError> {
    let Some((leaf, parents)) = path.split_last() else {
        return Ok(root);
    };

    let mut current = root;
    for (depth, segment) in parents.iter().enumerate() {
        let next = match *segment {
            Key(name) => current.get_mut(name),
            Index(i) => current.get_mut(i),
        };
        current = next.ok_or_else(|| JobError::TemplateShape(render(&path[..=depth])))?;
    }

    match *leaf {
        Key(name) => match current {
            Value::Object(map) => Ok(map.entry(name).or_insert(Value::Null)),
            _ => Err(JobError::TemplateShape(render(path))),
        },
        Index(i) => current
            .get_mut(i)
            .ok_or_else(|| JobError::TemplateShape(render(path))),
    }
}

fn render(path: &[Segment]) -> String {
    let mut out = String::new();
    for segment in path {
        match segment {
            Key(name) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(name);
            }
            Index(i) => out.push_str(&format!("[{}]", i)),
        }
    }
    out
}
