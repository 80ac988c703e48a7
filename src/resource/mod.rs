//! Generic resource layer: declarative per-type configuration and the
//! CRUD/pagination engine every page drives.

pub mod config;
pub mod engine;
pub mod registry;

pub use config::{ColumnConfig, Formatter, Labels, QuickFilter, ResourceConfig};
pub use engine::{EngineError, ResourceEngine, ResourceState, DEFAULT_PAGE_LIMIT};
pub use registry::config_for;
