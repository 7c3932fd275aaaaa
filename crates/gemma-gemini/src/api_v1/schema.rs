use std::collections::BTreeMap;

use gemma_core::schema::{SchemaKind, SchemaNode};
use serde::{Deserialize, Serialize};

/// Gemini's `Schema` object as used in `generationConfig.responseSchema`.
///
/// Only the subset [`SchemaNode`] can express is modelled; empty collections
/// are left out of the payload.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub r#type: Type,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub r#enum: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Type {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

impl From<SchemaKind> for Type {
    fn from(value: SchemaKind) -> Self {
        match value {
            SchemaKind::Object => Type::Object,
            SchemaKind::Array => Type::Array,
            SchemaKind::String => Type::String,
            SchemaKind::Number => Type::Number,
            SchemaKind::Integer => Type::Integer,
            SchemaKind::Boolean => Type::Boolean,
        }
    }
}

impl From<&SchemaNode> for Schema {
    fn from(node: &SchemaNode) -> Self {
        Self {
            r#type: node.kind().into(),
            format: node.format().map(str::to_string),
            description: node.description().map(str::to_string),
            r#enum: node.enum_values().to_vec(),
            items: node.items().map(|items| Box::new(items.into())),
            properties: node
                .properties()
                .iter()
                .map(|(key, child)| (key.clone(), child.into()))
                .collect(),
            required: node.required().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn renders_provider_schema() {
        let node = SchemaNode::from_value(&json!({
            "type": "object",
            "description": "An order",
            "properties": {
                "status": { "type": "string", "enum": ["open", "closed"] },
                "placed": { "type": "string", "format": "date-time" },
                "lines": {
                    "type": "array",
                    "items": { "type": "object", "properties": { "qty": { "type": "integer" } } }
                }
            },
            "required": ["status"]
        }))
        .unwrap();

        let wire = serde_json::to_value(Schema::from(&node)).unwrap();

        assert_eq!(wire["type"], "OBJECT");
        assert_eq!(wire["description"], "An order");
        assert_eq!(wire["required"], json!(["status"]));
        assert_eq!(wire["properties"]["status"]["enum"], json!(["open", "closed"]));
        assert_eq!(wire["properties"]["placed"]["format"], "date-time");
        assert_eq!(wire["properties"]["lines"]["type"], "ARRAY");
        assert_eq!(wire["properties"]["lines"]["items"]["properties"]["qty"]["type"], "INTEGER");
    }

    #[test]
    fn leaf_omits_empty_fields() {
        let wire = serde_json::to_value(Schema::from(&SchemaNode::new(SchemaKind::Boolean))).unwrap();
        assert_eq!(wire, json!({ "type": "BOOLEAN" }));
    }

    #[test]
    fn provider_form_translates_back() {
        let node = SchemaNode::default_response();
        let wire = serde_json::to_value(Schema::from(&node)).unwrap();

        assert_eq!(SchemaNode::from_value(&wire).unwrap(), node);
    }
}
