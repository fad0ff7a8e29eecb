//! Projection of tool definitions into MCP `inputSchema` objects.
//!
//! Output is byte-stable for a given definition: properties follow parameter
//! declaration order and every property serializes its keys in a fixed order.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use xentral_core::{ParamType, ToolDefinition};

/// JSON-Schema-shaped description of a tool's arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputSchema {
    #[serde(rename = "type")]
    pub schema_type: &'static str,
    pub properties: Properties,
    pub required: Vec<String>,
}

/// Ordered `name -> schema` map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Properties(Vec<(String, PropertySchema)>);

impl Properties {
    pub fn get(&self, name: &str) -> Option<&PropertySchema> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, p)| p)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }
}

impl Serialize for Properties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, schema) in &self.0 {
            map.serialize_entry(name, schema)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub param_type: ParamType,
    pub description: String,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<String>>,
}

/// One entry of the `tools/list` result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolListing {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: InputSchema,
}

impl From<&ToolDefinition> for ToolListing {
    fn from(definition: &ToolDefinition) -> Self {
        Self {
            name: definition.name().to_string(),
            description: definition.description().to_string(),
            input_schema: project(definition),
        }
    }
}

/// Convert a definition into its `inputSchema`.
pub fn project(definition: &ToolDefinition) -> InputSchema {
    let properties = definition
        .parameters()
        .iter()
        .map(|param| {
            (
                param.name().to_string(),
                PropertySchema {
                    param_type: param.param_type(),
                    description: param.description().to_string(),
                    allowed_values: param.allowed_values().map(<[String]>::to_vec),
                },
            )
        })
        .collect();

    let required = definition
        .parameters()
        .iter()
        .filter(|p| p.is_required())
        .map(|p| p.name().to_string())
        .collect();

    InputSchema {
        schema_type: "object",
        properties: Properties(properties),
        required,
    }
}
