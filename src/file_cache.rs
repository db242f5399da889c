//! Launch file contents shared by one traversal

use crate::{error::Result, xml::read_descriptor};
use dashmap::DashMap;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

/// Contents of the launch files read during one extraction, keyed by
/// canonical path.
///
/// Clones share the same map, so parallel include branches read a shared
/// file once. A new extraction starts with an empty cache and always sees
/// the files as they are on disk.
#[derive(Debug, Clone, Default)]
pub(crate) struct DescriptorCache {
    files: Arc<DashMap<PathBuf, Arc<str>>>,
}

impl DescriptorCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Contents of `path`, read from disk on first use of `canonical_path`
    pub(crate) fn read(&self, path: &Path, canonical_path: &Path) -> Result<Arc<str>> {
        if let Some(entry) = self.files.get(canonical_path) {
            log::trace!("Launch file cache hit: {}", path.display());
            return Ok(Arc::clone(entry.value()));
        }

        let content: Arc<str> = read_descriptor(path)?.into();
        self.files.insert(canonical_path.to_path_buf(), Arc::clone(&content));
        Ok(content)
    }
}
