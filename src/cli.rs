use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{CustomResourceDefinition, ExampleRenderer, OutputFormat, COMMENT_PADDING};

/// Render a commented, fully populated example custom resource from a CRD
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct CrdToCr {
    /// CRD to read (stdin when omitted or `-`)
    pub crd: Option<PathBuf>,

    /// Where to write the example (stdout when omitted or `-`)
    pub out: Option<PathBuf>,

    /// Use this CRD version instead of the first one declared
    #[arg(long)]
    pub api_version: Option<String>,

    /// Column to align trailing comments to
    #[arg(long, default_value_t = COMMENT_PADDING)]
    pub padding: usize,

    /// Place comments after each line, or in a block above it
    #[arg(long, value_enum, default_value_t = OutputFormat::Oneline)]
    pub format: OutputFormat,

    /// Use schema default values where present
    #[arg(long)]
    pub use_defaults: bool,

    /// Collapse tolerations and affinities to {}
    #[arg(long)]
    pub hide_core_types: bool,

    /// Put `enabled` first and scheduling/resource fields last
    #[arg(long)]
    pub sort_properties: bool,

    /// Show cpu and memory quantities in container resource requests and limits
    #[arg(long)]
    pub resource_quantities: bool,
}

impl CrdToCr {
    /// Read the CRD, render its example and write it out
    pub fn dispatch(&self) -> Result<()> {
        let crd = match stdio_or_path(self.crd.as_deref()) {
            Some(path) => {
                let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
                CustomResourceDefinition::from_reader(file)?
            }
            None => CustomResourceDefinition::from_reader(io::stdin().lock())?,
        };
        let source = crd.example_source(self.api_version.as_deref())?;

        let sink: Box<dyn Write> = match stdio_or_path(self.out.as_deref()) {
            Some(path) => {
                Box::new(File::create(path).with_context(|| format!("failed to create {}", path.display()))?)
            }
            None => Box::new(io::stdout().lock()),
        };
        let mut out = BufWriter::new(sink);
        self.renderer().render(&source, &mut out)?;
        out.flush().context("failed to flush output")?;
        Ok(())
    }

    fn renderer(&self) -> ExampleRenderer {
        ExampleRenderer::builder()
            .comment_padding(self.padding)
            .format(self.format)
            .use_defaults(self.use_defaults)
            .hide_core_types(self.hide_core_types)
            .sort_properties(self.sort_properties)
            .resource_quantities(self.resource_quantities)
            .build()
    }
}

// `-` and a missing argument both mean the standard stream
fn stdio_or_path(arg: Option<&Path>) -> Option<&Path> {
    arg.filter(|p| *p != Path::new("-"))
}

#[cfg(test)]
mod test {
    use super::CrdToCr;
    use crate::OutputFormat;
    use clap::Parser;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        CrdToCr::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let args = CrdToCr::parse_from(["crd-to-cr"]);
        assert!(args.crd.is_none());
        assert!(args.out.is_none());
        assert_eq!(args.padding, 40);
        assert_eq!(args.format, OutputFormat::Oneline);
        assert!(!args.use_defaults);
        assert!(!args.resource_quantities);
    }

    #[test]
    fn positionals_and_flags() {
        let args = CrdToCr::parse_from([
            "crd-to-cr",
            "crd.yaml",
            "-",
            "--format",
            "multiline",
            "--padding",
            "60",
            "--api-version",
            "v1beta1",
        ]);
        assert_eq!(args.crd.unwrap().to_str(), Some("crd.yaml"));
        assert_eq!(args.out.unwrap().to_str(), Some("-"));
        assert_eq!(args.format, OutputFormat::Multiline);
        assert_eq!(args.padding, 60);
        assert_eq!(args.api_version.as_deref(), Some("v1beta1"));
        let renderer =
            CrdToCr::parse_from(["crd-to-cr", "--padding", "60", "--resource-quantities"]).renderer();
        assert_eq!(renderer.comment_padding, 60);
        assert!(renderer.resource_quantities);
    }
}
