//! Typed, fault-tolerant access to flat property sources.

mod error;
mod format;
mod parse;
mod store;
mod value;

pub use error::{ConversionError, PropertiesError};
pub use format::SourceFormat;
pub use parse::parse_properties;
pub use store::{PropertyStore, StoreOptions};
pub use value::{PropertyValue, FALSY, TRUTHY};
