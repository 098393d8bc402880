//! Commented example custom resources from kubernetes `CustomResourceDefinition`s
//!
//! ```no_run
//! use crd_to_cr::{CustomResourceDefinition, ExampleRenderer};
//!
//! let crd = CustomResourceDefinition::from_reader(std::fs::File::open("crd.yaml")?)?;
//! let source = crd.example_source(None)?;
//! let example = ExampleRenderer::default().render_to_string(&source)?;
//! print!("{example}");
//! # Ok::<(), anyhow::Error>(())
//! ```
#[macro_use] extern crate log;

mod crd;
pub use crd::{CustomResourceDefinition, ExampleSource, Metadata};
mod output;
pub use output::{format_block, format_line, OutputFormat, COMMENT_PADDING};
mod renderer;
pub use renderer::ExampleRenderer;
mod schema;
pub use schema::{SchemaNode, SchemaOrArray, SchemaOrBool};

#[cfg(feature = "cli")] mod cli;
#[cfg(feature = "cli")] pub use cli::CrdToCr;
