//! # ttr
//!
//! Template Text Renderer: bulk text generation from tabular data and templates.
//!
//! Records are loaded from CSV, YAML or spreadsheet files, reshaped by processors,
//! rendered one by one through the template each record names, and grouped by a
//! result key into one text per result.
//!
//! ```no_run
//! use ttr::{DataSource, Generator, GeneratorConfig};
//!
//! let mut generator = Generator::new(GeneratorConfig::default())?;
//! generator.add_template("ifcfg", "interface {{ interface }}\n encapsulation dot1q {{ vid }}\n!");
//! generator.load_data(
//!     DataSource::Text("- {interface: Gi1/1, vid: 100, template: ifcfg, device: r1}".into()),
//!     Some("yaml"),
//! )?;
//! let results = generator.run()?;
//! assert_eq!(results.get("r1"), Some("interface Gi1/1\n encapsulation dot1q 100\n!"));
//! # Ok::<(), ttr::Error>(())
//! ```
//!
//! ## Modules
//!
//! - `record` - Ordered key/value records
//! - `data` - Data loaders (csv, yaml, xlsx)
//! - `processors` - Record reshaping (multitemplate, filtering, templates_split)
//! - `templates` - Template cache and the resolution chain
//! - `render` - Render engine and the tera backend
//! - `returners` - Result dispatch (self, file, terminal)
//! - `validate` - Optional model validation
//! - `registry` - Named plugin lookup
//! - `generator` - Pipeline orchestration
//! - `config` - Generator configuration

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod generator;
pub mod processors;
pub mod record;
pub mod registry;
pub mod render;
pub mod returners;
pub mod templates;
pub mod validate;

pub use config::GeneratorConfig;
pub use data::DataSource;
pub use error::{Error, Result};
pub use generator::Generator;
pub use record::Record;
pub use registry::PluginRegistry;
pub use render::RenderResults;
pub use templates::TemplateCache;
