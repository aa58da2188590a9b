//! Exchange-format conversion
//!
//! This crate turns exchange documents into editor graphs and back. It holds
//! the node type registry, the default layout, the importer, the exporter and
//! the editing session that ties them together.

mod exporter;
mod importer;
pub mod layout;
pub mod registry;
mod session;

pub use exporter::{serialize, to_string_pretty, to_value};
pub use importer::{parse, parse_str, ImportOptions, ImportReport, Importer};
pub use layout::LayoutConfig;
pub use registry::{TypeDescriptor, TypeInfo};
pub use session::EditorSession;
