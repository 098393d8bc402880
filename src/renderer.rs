//! Renders a schema tree into a commented example instance
use std::{cmp::Ordering, io::Write};

use anyhow::{bail, Context, Result};
use typed_builder::TypedBuilder;

use crate::{
    crd::ExampleSource,
    output::{indentation, LineWriter, OutputFormat, COMMENT_PADDING},
    SchemaNode, SchemaOrArray,
};

/// Standard kubernetes sub-schemas collapsed to `{}` with `hide_core_types`
const CORE_TYPES: [&str; 4] = ["tolerations", "nodeAffinity", "podAffinity", "podAntiAffinity"];

/// Description prefixes of container resource maps, with the cpu and memory quantities to show
const RESOURCE_QUANTITIES: [(&str, &str, &str); 2] = [
    ("Requests describes the minimum amount of compute resources required.", "500m", "1Gi"),
    ("Limits describes the maximum amount of compute resources allowed.", "750m", "2Gi"),
];

/// Example renderer configuration
///
/// `ExampleRenderer::default()` renders properties in declaration order with comments
/// trailing at column 40, using only the built-in placeholders.
#[derive(TypedBuilder, Clone, Debug)]
pub struct ExampleRenderer {
    /// Column trailing comments are aligned to
    #[builder(default = COMMENT_PADDING)]
    pub comment_padding: usize,
    /// Comment placement
    #[builder(default)]
    pub format: OutputFormat,
    /// Prefer the schema `default` keyword over the built-in placeholders
    #[builder(default)]
    pub use_defaults: bool,
    /// Render tolerations and affinities as `{}`
    #[builder(default)]
    pub hide_core_types: bool,
    /// Order fields by category rather than declaration order
    #[builder(default)]
    pub sort_properties: bool,
    /// Render container resource requests and limits with cpu and memory entries
    #[builder(default)]
    pub resource_quantities: bool,
}

impl Default for ExampleRenderer {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Where in the output tree a node is rendered
#[derive(Clone, Copy, Debug)]
struct Position {
    /// Nesting level, two spaces each
    level: usize,
    /// Whether the node is the single example element of an enclosing array
    list_head: bool,
}

impl Position {
    fn nested(self) -> Self {
        Position {
            level: self.level + 1,
            list_head: false,
        }
    }

    /// Indentation of the first line of a list element, which carries the `- ` marker
    fn head_indent(self) -> String {
        format!("{}- ", indentation(self.level.saturating_sub(1)))
    }
}

impl ExampleRenderer {
    /// Render a complete example resource
    ///
    /// The `apiVersion`, `kind` and `metadata` preamble comes from the CRD metadata,
    /// followed by the remaining schema at the top level.
    pub fn render<W: Write>(&self, source: &ExampleSource, out: &mut W) -> Result<()> {
        let meta = &source.metadata;
        debug!("rendering example for {} {}", meta.api_version(), meta.kind);
        let mut w = LineWriter::new(out, self.format, self.comment_padding);
        w.line(
            &format!("apiVersion: {}", meta.api_version()),
            source.api_version_field.as_ref(),
            0,
        )?;
        w.line(&format!("kind: {}", meta.kind), source.kind_field.as_ref(), 0)?;
        w.line("metadata:", None, 0)?;
        w.line("  name: example", None, 0)?;
        self.render_(&source.schema, Position { level: 0, list_head: false }, &mut w)
    }

    /// Render the subtree of `schema` at a nesting level
    ///
    /// With `list_head` set the first line is marked as an array element.
    pub fn render_node<W: Write>(
        &self,
        schema: &SchemaNode,
        level: usize,
        list_head: bool,
        out: &mut W,
    ) -> Result<()> {
        let mut w = LineWriter::new(out, self.format, self.comment_padding);
        self.render_(schema, Position { level, list_head }, &mut w)
    }

    /// Render a complete example resource into a string
    pub fn render_to_string(&self, source: &ExampleSource) -> Result<String> {
        let mut buf = Vec::new();
        self.render(source, &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }

    fn render_<W: Write>(&self, schema: &SchemaNode, pos: Position, w: &mut LineWriter<W>) -> Result<()> {
        let Some(type_) = schema.type_name() else {
            bail!("schema node has no type");
        };
        match type_ {
            "object" if schema.properties.is_some() => self.render_struct(schema, pos, w),
            "object" if schema.additional_properties.is_some() => self.render_map(schema, pos, w),
            "array" => self.render_array(schema, pos, w),
            x => {
                warn!("no example rendered for '{}' node at level {}", x, pos.level);
                Ok(())
            }
        }
    }

    // one line per field, recursing into fields without a placeholder
    fn render_struct<W: Write>(&self, schema: &SchemaNode, pos: Position, w: &mut LineWriter<W>) -> Result<()> {
        let mut fields: Vec<_> = schema.properties.iter().flatten().collect();
        if self.sort_properties {
            fields.sort_by(|(a, _), (b, _)| by_category(a, b));
        }
        for (i, (name, member)) in fields.into_iter().enumerate() {
            let indent = if i == 0 && pos.list_head {
                pos.head_indent()
            } else {
                indentation(pos.level)
            };
            if let Some(value) = self.placeholder(name, member) {
                w.line(&format!("{indent}{name}: {value}"), Some(member), pos.level)?;
            } else {
                w.line(&format!("{indent}{name}:"), Some(member), pos.level)?;
                self.render_(member, pos.nested(), w)
                    .with_context(|| format!("rendering property {name:?}"))?;
            }
        }
        Ok(())
    }

    // a single representative entry under a placeholder key
    fn render_map<W: Write>(&self, schema: &SchemaNode, pos: Position, w: &mut LineWriter<W>) -> Result<()> {
        let Some(values) = schema.map_values() else {
            warn!("no example rendered for map without a value schema");
            return Ok(());
        };
        let indent = if pos.list_head {
            pos.head_indent()
        } else {
            indentation(pos.level)
        };
        if let Some((cpu, memory)) = self.quantities_for(schema) {
            w.line(&format!(r#"{indent}cpu: "{cpu}""#), Some(values), pos.level)?;
            let indent = indentation(pos.level);
            w.line(&format!(r#"{indent}memory: "{memory}""#), Some(values), pos.level)?;
            Ok(())
        } else if let Some(value) = self.placeholder("", values) {
            w.line(&format!(r#"{indent}"key": {value}"#), Some(values), pos.level)?;
            Ok(())
        } else {
            w.line(&format!(r#"{indent}"key":"#), None, pos.level)?;
            self.render_(values, pos.nested(), w)
                .context("rendering map values")
        }
    }

    // a single example element, marked at the parent's indentation
    fn render_array<W: Write>(&self, schema: &SchemaNode, pos: Position, w: &mut LineWriter<W>) -> Result<()> {
        let items = match &schema.items {
            Some(SchemaOrArray::Schema(s)) => s,
            Some(SchemaOrArray::Schemas(_)) => bail!("only support single schema in array"),
            None => bail!("missing items in array type"),
        };
        let dash_level = pos.level.saturating_sub(1);
        if let Some(value) = self.placeholder("", items) {
            w.line(
                &format!("{}- {value}", indentation(dash_level)),
                Some(items),
                dash_level,
            )?;
            Ok(())
        } else {
            let head = Position {
                level: pos.level,
                list_head: true,
            };
            self.render_(items, head, w).context("rendering array items")
        }
    }

    /// Example cpu and memory quantities for a resource requests or limits map
    fn quantities_for(&self, schema: &SchemaNode) -> Option<(&'static str, &'static str)> {
        if !self.resource_quantities {
            return None;
        }
        let description = schema.description.as_deref()?;
        RESOURCE_QUANTITIES
            .iter()
            .find(|(marker, _, _)| description.contains(marker))
            .map(|&(_, cpu, memory)| (cpu, memory))
    }

    /// Placeholder for a named field, taking configured overrides into account
    fn placeholder(&self, name: &str, schema: &SchemaNode) -> Option<String> {
        if self.use_defaults {
            if let Some(default) = &schema.default {
                return Some(default.to_string());
            }
        }
        if self.hide_core_types && CORE_TYPES.contains(&name) {
            return Some("{}".into());
        }
        schema.example_value().map(String::from)
    }
}

fn sort_category(name: &str) -> u8 {
    match name {
        "enabled" => 0,
        "nodeSelector" | "tolerations" | "affinity" | "resources" => 2,
        _ => 1,
    }
}

// enabled < everything else < scheduling and resource fields, alphabetical within each
fn by_category(a: &str, b: &str) -> Ordering {
    sort_category(a).cmp(&sort_category(b)).then_with(|| a.cmp(b))
}
