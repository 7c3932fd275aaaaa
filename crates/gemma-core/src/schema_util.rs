//! Helpers for turning Rust type information into a [`SchemaNode`]. The
//! JSON Schema is produced with [`schemars`] and then decoded through the
//! regular translator, so the same subset rules apply.
//!
//! Types whose schema needs unions (`Option<T>` renders as
//! `"type": ["string", "null"]`) or `$ref`s are rejected by the translator.
//! Stick to plain structs, `Vec`s, strings, numbers and booleans.

use schemars::{r#gen::SchemaSettings, JsonSchema, SchemaGenerator};

use crate::schema::{SchemaError, SchemaNode};

/// Generate a [`SchemaNode`] for the given `T`, with every subschema inlined.
///
/// # Example
///
/// ```
/// use gemma_core::schema_util::schema_node_for;
/// use schemars::JsonSchema;
///
/// #[derive(JsonSchema)]
/// struct Foo { bar: String }
///
/// let schema = schema_node_for::<Foo>().unwrap();
/// assert!(schema.properties().contains_key("bar"));
/// ```
pub fn schema_node_for<T>() -> Result<SchemaNode, SchemaError>
where
    T: JsonSchema,
{
    // Providers don't resolve `$ref`s, and neither does the translator.
    let mut settings = SchemaSettings::draft07();
    settings.inline_subschemas = true;

    let generator = SchemaGenerator::new(settings);
    let root = generator.into_root_schema_for::<T>();

    let document = serde_json::to_value(root)?;
    SchemaNode::from_value(&document)
}

#[cfg(test)]
mod tests {
    use schemars::JsonSchema;

    use super::*;
    use crate::schema::SchemaKind;

    #[allow(dead_code)]
    #[derive(JsonSchema)]
    struct Invoice {
        /// Invoice number as printed on the document.
        number: String,
        total: f64,
        paid: bool,
        lines: Vec<Line>,
    }

    #[allow(dead_code)]
    #[derive(JsonSchema)]
    struct Line {
        sku: String,
        quantity: u32,
    }

    #[allow(dead_code)]
    #[derive(JsonSchema)]
    struct WithOptional {
        note: Option<String>,
    }

    #[test]
    fn derives_nested_schema() {
        let node = schema_node_for::<Invoice>().unwrap();

        assert_eq!(node.kind(), SchemaKind::Object);
        assert!(node.required().iter().any(|r| r == "number"));

        let number = &node.properties()["number"];
        assert_eq!(number.kind(), SchemaKind::String);
        assert_eq!(
            number.description(),
            Some("Invoice number as printed on the document.")
        );

        assert_eq!(node.properties()["total"].kind(), SchemaKind::Number);
        assert_eq!(node.properties()["paid"].kind(), SchemaKind::Boolean);

        let lines = &node.properties()["lines"];
        let line = lines.items().expect("array items");
        assert_eq!(line.kind(), SchemaKind::Object);
        assert_eq!(line.properties()["quantity"].kind(), SchemaKind::Integer);
    }

    #[test]
    fn optional_fields_are_rejected() {
        let err = schema_node_for::<WithOptional>().unwrap_err();
        assert_eq!(err.path(), "note");
        assert!(matches!(err.root_cause(), SchemaError::MissingType));
    }
}
