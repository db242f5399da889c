//! Package-relative path resolution

pub mod locator;
pub mod types;

pub use locator::{
    CachingLocator, ChainLocator, EnvPrefixLocator, PackageLocator, RospackLocator, StaticLocator,
};
pub use types::{parse_reference, Reference};

use crate::error::{ExtractError, Result};
use std::{path::Path, sync::Arc};

/// Resolves `$(find <package>)` references through a [`PackageLocator`]
#[derive(Clone)]
pub struct PathResolver {
    locator: Arc<dyn PackageLocator>,
}

impl PathResolver {
    pub fn new<L: PackageLocator + 'static>(locator: L) -> Self {
        Self {
            locator: Arc::new(locator),
        }
    }

    /// Resolve a file reference found in `origin`.
    ///
    /// `$(find pkg)/rest` becomes the package location followed by `/rest`.
    /// Anything else is returned unchanged.
    pub fn resolve(&self, reference: &str, origin: &Path) -> Result<String> {
        match parse_reference(reference) {
            Reference::Path(path) => Ok(path.to_string()),
            Reference::Find { package, suffix } => {
                let location = self.locator.locate(package).map_err(|source| {
                    ExtractError::PackageResolution {
                        package: package.to_string(),
                        reference: reference.to_string(),
                        file: origin.to_path_buf(),
                        source,
                    }
                })?;
                let resolved = format!("{}{}", location.display(), suffix);
                log::trace!("Resolved {} -> {}", reference, resolved);
                Ok(resolved)
            }
            Reference::Malformed => Err(ExtractError::MalformedReference {
                reference: reference.to_string(),
                file: origin.to_path_buf(),
            }),
        }
    }
}

impl std::fmt::Debug for PathResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathResolver").finish_non_exhaustive()
    }
}
