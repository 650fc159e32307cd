//! Marker families: a recognized prefix plus the parser for lines that carry it.
//!
//! The pipeline is handed its families explicitly; nothing is registered globally.

use crate::core::marker::grammar::MarkerSchema;
use crate::core::marker::parser::parse_body;
use crate::core::rules::Rule;
use crate::issues::MarkerErrorKind;

/// One annotation family sharing the extraction pass.
pub trait MarkerFamily: Send + Sync {
    /// Prefix that identifies a line as belonging to this family.
    fn prefix(&self) -> &str;

    /// Parse the text after the prefix.
    fn parse(&self, body: &str) -> Result<Rule, MarkerErrorKind>;

    /// Parse a full trimmed line, if it belongs to this family.
    fn parse_line(&self, line: &str) -> Option<Result<Rule, MarkerErrorKind>> {
        line.strip_prefix(self.prefix()).map(|body| self.parse(body))
    }
}

/// The `+rbac:` family.
#[derive(Debug, Clone, Default)]
pub struct RbacMarkers {
    schema: MarkerSchema,
}

impl RbacMarkers {
    pub fn new(schema: MarkerSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &MarkerSchema {
        &self.schema
    }
}

impl MarkerFamily for RbacMarkers {
    fn prefix(&self) -> &str {
        self.schema.prefix()
    }

    fn parse(&self, body: &str) -> Result<Rule, MarkerErrorKind> {
        parse_body(&self.schema, body)
    }
}
