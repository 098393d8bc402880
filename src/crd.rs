//! Loading of the CRD envelope and extraction of the schema to render
use std::io::Read;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::SchemaNode;

/// Root properties every kubernetes object carries, rendered from CRD metadata instead
const ENVELOPE_KEYS: [&str; 3] = ["apiVersion", "kind", "metadata"];

/// The parts of a `CustomResourceDefinition` needed to render an example
#[derive(Deserialize, Clone, Debug)]
pub struct CustomResourceDefinition {
    pub spec: CustomResourceDefinitionSpec,
}

#[derive(Deserialize, Clone, Debug)]
pub struct CustomResourceDefinitionSpec {
    pub group: String,
    pub names: CustomResourceDefinitionNames,
    pub versions: Vec<CustomResourceDefinitionVersion>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct CustomResourceDefinitionNames {
    pub kind: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct CustomResourceDefinitionVersion {
    pub name: String,
    pub schema: Option<CustomResourceValidation>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct CustomResourceValidation {
    #[serde(rename = "openAPIV3Schema")]
    pub open_api_v3_schema: Option<SchemaNode>,
}

/// Group, kind and version an example is rendered for
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Metadata {
    pub group: String,
    pub kind: String,
    pub version: String,
}

impl Metadata {
    pub fn api_version(&self) -> String {
        format!("{}/{}", self.group, self.version)
    }
}

/// Everything the renderer needs from one CRD version
#[derive(Clone, Debug)]
pub struct ExampleSource {
    pub metadata: Metadata,
    /// The schema's own `apiVersion` property, kept for its description
    pub api_version_field: Option<SchemaNode>,
    /// The schema's own `kind` property, kept for its description
    pub kind_field: Option<SchemaNode>,
    /// The version schema without the envelope properties
    pub schema: SchemaNode,
}

impl CustomResourceDefinition {
    /// Parse a CRD from a YAML (or JSON) document
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        serde_yaml::from_reader(reader).context("failed to parse CRD document")
    }

    pub fn from_yaml(data: &str) -> Result<Self> {
        serde_yaml::from_str(data).context("failed to parse CRD document")
    }

    /// Find the named version, or the first declared version if no name is given
    pub fn find_version(&self, version: Option<&str>) -> Result<&CustomResourceDefinitionVersion> {
        let kind = &self.spec.names.kind;
        if let Some(version) = version {
            self.spec.versions.iter().find(|v| v.name == version).ok_or_else(|| {
                anyhow!(
                    "Version '{}' not found in CRD '{}'\navailable versions are '{}'",
                    version,
                    kind,
                    self.all_versions()
                )
            })
        } else {
            self.spec
                .versions
                .first()
                .ok_or_else(|| anyhow!("CRD '{}' has no versions", kind))
        }
    }

    pub fn all_versions(&self) -> String {
        self.spec
            .versions
            .iter()
            .map(|v| v.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Extract metadata and the envelope-free schema of a version
    pub fn example_source(&self, version: Option<&str>) -> Result<ExampleSource> {
        let found = self.find_version(version)?;
        let mut schema = found
            .schema
            .as_ref()
            .and_then(|s| s.open_api_v3_schema.clone())
            .ok_or_else(|| anyhow!("no openAPIV3Schema found for version '{}'", found.name))?;
        debug!("extracting {} {} from schema", self.spec.names.kind, found.name);

        let [api_version_field, kind_field, _] = match schema.properties.as_mut() {
            Some(props) => ENVELOPE_KEYS.map(|key| props.shift_remove(key)),
            None => Default::default(),
        };

        Ok(ExampleSource {
            metadata: Metadata {
                group: self.spec.group.clone(),
                kind: self.spec.names.kind.clone(),
                version: found.name.clone(),
            },
            api_version_field,
            kind_field,
            schema,
        })
    }
}
