//! The subset of an `openAPIV3Schema` node that drives example rendering
use indexmap::IndexMap;
use serde::Deserialize;

/// A node in an `openAPIV3Schema` tree
///
/// Only the keywords that affect the rendered example are kept; everything else
/// (`required`, `enum`, `format`, `oneOf`, ...) is ignored during deserialization.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    /// `object`, `array`, `string`, `boolean`, `integer` (or anything else, which renders nothing)
    #[serde(rename = "type")]
    pub type_: Option<String>,
    pub description: Option<String>,
    /// Named fields of an object, in declaration order
    pub properties: Option<IndexMap<String, SchemaNode>>,
    /// Value schema of an arbitrary-key map
    pub additional_properties: Option<SchemaOrBool>,
    /// Element schema of an array
    pub items: Option<SchemaOrArray>,
    pub default: Option<serde_json::Value>,
    #[serde(rename = "x-kubernetes-int-or-string")]
    pub x_kubernetes_int_or_string: Option<bool>,
    #[serde(rename = "x-kubernetes-preserve-unknown-fields")]
    pub x_kubernetes_preserve_unknown_fields: Option<bool>,
}

/// `additionalProperties` is either a value schema or a plain allow/deny flag
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum SchemaOrBool {
    Bool(bool),
    Schema(Box<SchemaNode>),
}

/// `items` is either a single element schema or a tuple of schemas
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum SchemaOrArray {
    Schemas(Vec<SchemaNode>),
    Schema(Box<SchemaNode>),
}

impl SchemaNode {
    pub fn type_name(&self) -> Option<&str> {
        self.type_.as_deref()
    }

    /// The value schema of a map, if `additionalProperties` carries one
    pub fn map_values(&self) -> Option<&SchemaNode> {
        match &self.additional_properties {
            Some(SchemaOrBool::Schema(s)) => Some(s),
            _ => None,
        }
    }

    pub fn is_int_or_string(&self) -> bool {
        self.x_kubernetes_int_or_string.unwrap_or(false)
    }

    pub fn preserves_unknown_fields(&self) -> bool {
        self.x_kubernetes_preserve_unknown_fields.unwrap_or(false)
    }

    /// Placeholder literal to inline as this node's value
    ///
    /// Returns `None` when the node has no scalar placeholder and its children must be
    /// rendered instead. Concrete scalar types win over the kubernetes extension flags,
    /// and `x-kubernetes-int-or-string` wins over `x-kubernetes-preserve-unknown-fields`.
    pub fn example_value(&self) -> Option<&'static str> {
        match self.type_name() {
            Some("string") => Some(r#""""#),
            Some("boolean") => Some("false"),
            Some("integer") => Some("0"),
            _ if self.is_int_or_string() => Some("1Gi"),
            _ if self.preserves_unknown_fields() => Some("{}"),
            _ => None,
        }
    }

    /// The description folded onto a single line, or an empty string
    pub fn comment(&self) -> String {
        self.description
            .as_deref()
            .map(|d| d.replace('\n', " "))
            .unwrap_or_default()
    }

    /// The description split into its lines, for comments placed above a field
    pub fn comment_lines(&self) -> Vec<&str> {
        self.description
            .as_deref()
            .map(|d| d.lines().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod test {
    use super::{SchemaNode, SchemaOrArray, SchemaOrBool};

    fn node(yaml: &str) -> SchemaNode {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn scalar_placeholders() {
        assert_eq!(node("type: string").example_value(), Some(r#""""#));
        assert_eq!(node("type: boolean").example_value(), Some("false"));
        assert_eq!(node("type: integer").example_value(), Some("0"));
        assert_eq!(node("type: object").example_value(), None);
        assert_eq!(node("type: array").example_value(), None);
        assert_eq!(node("type: number").example_value(), None);
    }

    #[test]
    fn extension_flag_placeholders() {
        assert_eq!(node("x-kubernetes-int-or-string: true").example_value(), Some("1Gi"));
        assert_eq!(
            node("x-kubernetes-preserve-unknown-fields: true").example_value(),
            Some("{}")
        );
        assert_eq!(node("x-kubernetes-int-or-string: false").example_value(), None);
        // object with preserved fields still collapses to {}
        assert_eq!(
            node("{type: object, x-kubernetes-preserve-unknown-fields: true}").example_value(),
            Some("{}")
        );
    }

    #[test]
    fn placeholder_precedence() {
        let both = r#"
x-kubernetes-int-or-string: true
x-kubernetes-preserve-unknown-fields: true
"#;
        assert_eq!(node(both).example_value(), Some("1Gi"));
        let typed = r#"
type: string
x-kubernetes-int-or-string: true
"#;
        assert_eq!(node(typed).example_value(), Some(r#""""#));
    }

    #[test]
    fn comment_folds_newlines() {
        let n = node("description: \"first\\nsecond\\nthird\"");
        assert_eq!(n.comment(), "first second third");
        assert_eq!(n.comment_lines(), vec!["first", "second", "third"]);
        assert_eq!(node("type: string").comment(), "");
        assert!(node("type: string").comment_lines().is_empty());
    }

    #[test]
    fn properties_keep_declaration_order() {
        let n = node(
            r#"
type: object
properties:
  zeta: {type: string}
  alpha: {type: integer}
  mid: {type: boolean}
"#,
        );
        let names: Vec<_> = n.properties.unwrap().into_keys().collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn additional_properties_and_items_forms() {
        let map = node("{type: object, additionalProperties: {type: string}}");
        assert_eq!(map.map_values().and_then(|v| v.type_name()), Some("string"));
        let open = node("{type: object, additionalProperties: true}");
        assert_eq!(open.additional_properties, Some(SchemaOrBool::Bool(true)));
        assert!(open.map_values().is_none());

        let single = node("{type: array, items: {type: integer}}");
        assert!(matches!(single.items, Some(SchemaOrArray::Schema(_))));
        let tuple = node("{type: array, items: [{type: integer}, {type: string}]}");
        assert!(matches!(tuple.items, Some(SchemaOrArray::Schemas(ref s)) if s.len() == 2));
    }

    #[test]
    fn schema_defaults_are_kept() {
        let n = node("{type: integer, default: 3}");
        assert_eq!(n.default, Some(serde_json::json!(3)));
    }
}
