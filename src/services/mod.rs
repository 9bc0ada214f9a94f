pub mod export;
pub mod mappings;

pub use export::{ExportError, ExportJob, ExportReport, render_json};
pub use mappings::{ChainMappings, DuplicateKey, ExportSummary, Mapping, MappingKind, build_mapping};
