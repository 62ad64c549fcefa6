//! Lookup of bundled resources and of single entries inside ZIP archives.

mod archive;
mod error;
mod resolver;
mod source;

pub use archive::ArchiveEntry;
pub use error::ResourceError;
pub use resolver::{ResourceResolver, ResourceResolverBuilder, ResourceStream};
pub use source::{DirectorySource, EmbeddedSource, Location, ResourceSource};
