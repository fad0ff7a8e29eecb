use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// Semantic type of a tool parameter, as advertised in `inputSchema`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Integer,
    Number,
    Boolean,
}

impl ParamType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }

    /// Whether a JSON value is acceptable for this type.
    #[must_use]
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
        }
    }
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single named, typed parameter of a tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolParameter {
    name: String,
    param_type: ParamType,
    description: String,
    required: bool,
    allowed_values: Option<Vec<String>>,
}

impl ToolParameter {
    /// Create an optional parameter without enumerated values.
    pub fn new(
        name: impl Into<String>,
        param_type: ParamType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type,
            description: description.into(),
            required: false,
            allowed_values: None,
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Restrict the parameter to a fixed set of values.
    #[must_use]
    pub fn with_enum<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn param_type(&self) -> ParamType {
        self.param_type
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn allowed_values(&self) -> Option<&[String]> {
        self.allowed_values.as_deref()
    }
}

/// Name, description and ordered parameters of a tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDefinition {
    name: String,
    description: String,
    parameters: Vec<ToolParameter>,
}

impl ToolDefinition {
    /// Build a definition, rejecting empty names and duplicate parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyToolName`], [`Error::EmptyParameterName`] or
    /// [`Error::DuplicateParameter`] when the definition is malformed.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Vec<ToolParameter>,
    ) -> Result<Self, Error> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::EmptyToolName);
        }

        {
            let mut seen = HashSet::new();
            for param in &parameters {
                if param.name.is_empty() {
                    return Err(Error::EmptyParameterName(name));
                }
                if !seen.insert(param.name.as_str()) {
                    return Err(Error::DuplicateParameter {
                        tool: name,
                        param: param.name.clone(),
                    });
                }
            }
        }

        Ok(Self {
            name,
            description: description.into(),
            parameters,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn parameters(&self) -> &[ToolParameter] {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&ToolParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}
