// Loose accessors over raw webhook payloads
//
// Webhook payloads are large and only a handful of fields matter, so instead of
// mirroring the platform schema we walk the JSON tree by path. Missing keys and
// nulls are "absent" (the caller applies a default); a present value with the
// wrong JSON type is a validation error naming the dotted field path.

use serde_json::Value;

use crate::error::{HookError, Result};

/// Read-only view over a webhook payload
#[derive(Debug, Clone, Copy)]
pub struct Payload<'a> {
    root: &'a Value,
}

impl<'a> Payload<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self { root }
    }

    /// String at `path`, `None` if any segment is missing or null
    pub fn str_at(&self, path: &[&str]) -> Result<Option<&'a str>> {
        match self.lookup(path)? {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(HookError::invalid_field(path.join("."), "string")),
        }
    }

    /// String at `path`, or `default` when absent
    pub fn str_or(&self, path: &[&str], default: &str) -> Result<String> {
        Ok(self.str_at(path)?.unwrap_or(default).to_string())
    }

    /// Boolean at `path`, `None` if any segment is missing or null
    pub fn bool_at(&self, path: &[&str]) -> Result<Option<bool>> {
        match self.lookup(path)? {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(_) => Err(HookError::invalid_field(path.join("."), "boolean")),
        }
    }

    fn lookup(&self, path: &[&str]) -> Result<Option<&'a Value>> {
        let mut current = self.root;
        for (depth, segment) in path.iter().enumerate() {
            let Value::Object(map) = current else {
                let parent = if depth == 0 {
                    "payload".to_string()
                } else {
                    path[..depth].join(".")
                };
                return Err(HookError::invalid_field(parent, "object"));
            };
            match map.get(*segment) {
                None | Some(Value::Null) => return Ok(None),
                Some(next) => current = next,
            }
        }
        Ok(Some(current))
    }
}
