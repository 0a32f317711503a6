use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ProfileError, Result, Scope};

/// Which document schema a document is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    Registry,
    Asset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaIssue {
    pub path: String,
    pub message: String,
}

impl SchemaIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Outcome of a schema check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaReport {
    pub valid: bool,
    #[serde(default)]
    pub errors: Vec<SchemaIssue>,
}

impl SchemaReport {
    pub fn valid() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    pub fn invalid(errors: Vec<SchemaIssue>) -> Self {
        Self {
            valid: false,
            errors,
        }
    }

    pub fn into_result(self, scope: &Scope) -> Result<()> {
        if self.valid {
            return Ok(());
        }
        Err(ProfileError::SchemaViolation {
            scope: scope.clone(),
            issues: self.errors,
        })
    }
}

/// JSON schema checking, supplied by the host.
pub trait SchemaValidator {
    fn validate(&self, document: &Value, schema: SchemaKind) -> SchemaReport;
}

impl<F> SchemaValidator for F
where
    F: Fn(&Value, SchemaKind) -> SchemaReport,
{
    fn validate(&self, document: &Value, schema: SchemaKind) -> SchemaReport {
        self(document, schema)
    }
}

/// Accepts every document. For hosts that validate documents elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipSchemaValidation;

impl SchemaValidator for SkipSchemaValidation {
    fn validate(&self, _document: &Value, _schema: SchemaKind) -> SchemaReport {
        SchemaReport::valid()
    }
}
