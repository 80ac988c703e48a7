//! Knowledge-base document domain: wire types, typed payload views,
//! Mongo extended-JSON dates and dotted-path value access.

pub mod data;
pub mod date;
pub mod path;
pub mod types;

pub use data::{
    decode_data, encode_data, ApplicationData, ApplicationStatus, Engagement, Feature, ModelData,
    NeedData, NeedStatus, PostData, PromptData, Specification, SpecificationConstraints,
};
pub use date::{format_mongo_date, format_mongo_date_time, MongoDate, DATE_FALLBACK};
pub use path::{display_value, get_nested_value};
pub use types::{Document, DocumentLink, DocumentListResponse, DocumentType, PartialDocument};
