pub mod properties;
pub mod resource;
mod error;

pub use error::Error;
pub use properties::{PropertiesError, PropertyStore};
pub use resource::{ResourceError, ResourceResolver};
