use crate::properties::PropertiesError;
use crate::resource::ResourceError;
use thiserror::Error;

/// Top-level error type for the stowage library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("resource error: {0}")]
    Resource(#[from] ResourceError),

    #[error("properties error: {0}")]
    Properties(#[from] PropertiesError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict_load(root: &std::path::Path) -> Result<crate::PropertyStore, Error> {
        let resolver = crate::ResourceResolver::new(root);
        Ok(crate::PropertyStore::try_load(&resolver, "missing.properties")?)
    }

    #[test]
    fn test_properties_error_converts() {
        let dir = tempfile::TempDir::new().unwrap();

        let err = strict_load(dir.path()).unwrap_err();

        assert!(matches!(err, Error::Properties(PropertiesError::NotFound(_))));
        assert_eq!(
            err.to_string(),
            "properties error: property source not found: missing.properties"
        );
    }

    #[test]
    fn test_resource_error_converts() {
        let err: Error = ResourceError::Packaged {
            name: "bundle.zip".into(),
        }
        .into();

        assert_eq!(
            err.to_string(),
            "resource error: resource 'bundle.zip' is packaged and has no direct file path"
        );
    }
}
