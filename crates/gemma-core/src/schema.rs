//! Typed representation of the JSON Schema subset understood by the
//! provider's response-schema field, and the translator that decodes a
//! loosely-typed schema document into it.
//!
//! The supported keywords are `type`, `description`, `properties`, `items`,
//! `required`, `enum` and `format`. Anything else in the document is ignored:
//! there are no unions, no `$ref` resolution and no numeric bounds.
//!
//! Decoding happens **once** at the boundary ([`SchemaNode::from_value`]); from
//! there on the rest of the workspace only deals with [`SchemaNode`].
//!
//! ```rust
//! use gemma_core::schema::{SchemaKind, SchemaNode};
//! use serde_json::json;
//!
//! let node = SchemaNode::from_value(&json!({
//!     "type": "object",
//!     "properties": { "title": { "type": "string" } },
//!     "required": ["title", 7]
//! }))
//! .unwrap();
//!
//! assert_eq!(node.kind(), SchemaKind::Object);
//! assert_eq!(node.required(), ["title"]);
//! ```
use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// The six node kinds a response schema may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    Object,
    Array,
    String,
    Number,
    Integer,
    Boolean,
}

impl SchemaKind {
    pub const ALL: [SchemaKind; 6] = [
        SchemaKind::Object,
        SchemaKind::Array,
        SchemaKind::String,
        SchemaKind::Number,
        SchemaKind::Integer,
        SchemaKind::Boolean,
    ];

    /// Canonical (lowercase JSON Schema) spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            SchemaKind::Object => "object",
            SchemaKind::Array => "array",
            SchemaKind::String => "string",
            SchemaKind::Number => "number",
            SchemaKind::Integer => "integer",
            SchemaKind::Boolean => "boolean",
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive, so provider-native spellings (`"OBJECT"`) decode too.
impl FromStr for SchemaKind {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SchemaKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| SchemaError::UnsupportedType(s.to_string()))
    }
}

/// Failure while decoding a schema document.
///
/// Nested failures are wrapped in [`SchemaError::Property`] or
/// [`SchemaError::Items`] on the way up, so the outermost error always names
/// the path to the offending node. See [`SchemaError::path`].
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("schema document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("schema node must be a JSON object")]
    NotAnObject,

    #[error("schema node is missing a string `type` field")]
    MissingType,

    #[error("unsupported schema type `{0}`")]
    UnsupportedType(String),

    #[error("field `{field}` must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    #[error("property `{key}`: {source}")]
    Property {
        key: String,
        #[source]
        source: Box<SchemaError>,
    },

    #[error("items: {source}")]
    Items {
        #[source]
        source: Box<SchemaError>,
    },
}

impl SchemaError {
    /// Dotted path from the document root to the failing node, e.g.
    /// `address.zip` or `tags.items`. Empty for a failure at the root.
    pub fn path(&self) -> String {
        let mut segments = Vec::new();
        let mut current = self;
        loop {
            match current {
                SchemaError::Property { key, source } => {
                    segments.push(key.as_str());
                    current = source;
                }
                SchemaError::Items { source } => {
                    segments.push("items");
                    current = source;
                }
                _ => break,
            }
        }
        segments.join(".")
    }

    /// The innermost error, with all path wrappers removed.
    pub fn root_cause(&self) -> &SchemaError {
        match self {
            SchemaError::Property { source, .. } | SchemaError::Items { source } => {
                source.root_cause()
            }
            other => other,
        }
    }
}

/// One node of a response schema.
///
/// `properties` is only ever populated for [`SchemaKind::Object`] and `items`
/// only for [`SchemaKind::Array`]; the constructors and the translator keep it
/// that way, which is why the fields are private.
///
/// Properties live in a `BTreeMap`, so iteration is deterministic. Callers
/// should still treat them as an unordered association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaNode {
    kind: SchemaKind,
    description: Option<String>,
    properties: BTreeMap<String, SchemaNode>,
    items: Option<Box<SchemaNode>>,
    required: Vec<String>,
    enum_values: Vec<String>,
    format: Option<String>,
}

impl SchemaNode {
    /// Leaf node of the given kind with nothing else set.
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            description: None,
            properties: BTreeMap::new(),
            items: None,
            required: Vec::new(),
            enum_values: Vec::new(),
            format: None,
        }
    }

    pub fn object(properties: impl IntoIterator<Item = (String, SchemaNode)>) -> Self {
        Self {
            properties: properties.into_iter().collect(),
            ..Self::new(SchemaKind::Object)
        }
    }

    pub fn array(items: SchemaNode) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::new(SchemaKind::Array)
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_required<S: Into<String>>(mut self, required: impl IntoIterator<Item = S>) -> Self {
        self.required = required.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_enum<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Schema used when the caller supplies none: a single required
    /// `message` string.
    pub fn default_response() -> Self {
        let message = SchemaNode::new(SchemaKind::String)
            .with_description("Response message from Gemini");

        SchemaNode::object([("message".to_string(), message)]).with_required(["message"])
    }

    pub fn kind(&self) -> SchemaKind {
        self.kind
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub fn properties(&self) -> &BTreeMap<String, SchemaNode> {
        &self.properties
    }

    pub fn items(&self) -> Option<&SchemaNode> {
        self.items.as_deref()
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    pub fn enum_values(&self) -> &[String] {
        &self.enum_values
    }

    /// Parse raw schema file contents.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SchemaError> {
        let document: Value = serde_json::from_slice(bytes)?;
        Self::from_value(&document)
    }

    /// Decode one schema node (and, recursively, its children).
    ///
    /// * `type` must be a string naming one of the [`SchemaKind`]s.
    /// * `description` / `format` are copied when they are strings and
    ///   ignored otherwise.
    /// * `required` / `enum` keep their string entries in order; anything
    ///   else in those arrays is dropped without complaint.
    /// * `properties` is read for objects, `items` for arrays. A failing
    ///   child aborts the whole translation.
    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        let Value::Object(map) = value else {
            return Err(SchemaError::NotAnObject);
        };

        let kind: SchemaKind = map
            .get("type")
            .and_then(Value::as_str)
            .ok_or(SchemaError::MissingType)?
            .parse()?;

        let mut node = SchemaNode::new(kind);
        node.description = string_field(map, "description");
        node.format = string_field(map, "format");
        node.required = string_list(map, "required");
        node.enum_values = string_list(map, "enum");

        match kind {
            SchemaKind::Object => {
                if let Some(properties) = map.get("properties") {
                    let Value::Object(properties) = properties else {
                        return Err(SchemaError::InvalidField {
                            field: "properties",
                            expected: "an object",
                        });
                    };

                    for (key, child) in properties {
                        let child = Self::from_value(child).map_err(|source| {
                            SchemaError::Property {
                                key: key.clone(),
                                source: Box::new(source),
                            }
                        })?;
                        node.properties.insert(key.clone(), child);
                    }
                }
            }
            SchemaKind::Array => {
                if let Some(items) = map.get("items") {
                    let items = Self::from_value(items).map_err(|source| SchemaError::Items {
                        source: Box::new(source),
                    })?;
                    node.items = Some(Box::new(items));
                }
            }
            SchemaKind::String | SchemaKind::Number | SchemaKind::Integer | SchemaKind::Boolean => {}
        }

        Ok(node)
    }

    /// Canonical JSON Schema rendering: lowercase type names, only the
    /// fields that are set. Feeding it back to [`Self::from_value`] yields an
    /// equal node.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("type".into(), Value::String(self.kind.as_str().into()));

        if let Some(description) = &self.description {
            map.insert("description".into(), Value::String(description.clone()));
        }
        if let Some(format) = &self.format {
            map.insert("format".into(), Value::String(format.clone()));
        }
        if !self.properties.is_empty() {
            let properties = self
                .properties
                .iter()
                .map(|(key, child)| (key.clone(), child.to_value()))
                .collect();
            map.insert("properties".into(), Value::Object(properties));
        }
        if let Some(items) = &self.items {
            map.insert("items".into(), items.to_value());
        }
        if !self.required.is_empty() {
            map.insert("required".into(), string_array(&self.required));
        }
        if !self.enum_values.is_empty() {
            map.insert("enum".into(), string_array(&self.enum_values));
        }

        Value::Object(map)
    }
}

impl TryFrom<&Value> for SchemaNode {
    type Error = SchemaError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl Serialize for SchemaNode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_value().serialize(serializer)
    }
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

fn string_list(map: &Map<String, Value>, key: &str) -> Vec<String> {
    map.get(key)
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn string_array(values: &[String]) -> Value {
    Value::Array(values.iter().cloned().map(Value::String).collect())
}
