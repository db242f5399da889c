use super::LaunchTraverser;
use crate::{actions::Include, error::Result, record::Inventory};
use rayon::prelude::*;
use std::path::Path;

impl<'r> LaunchTraverser<'r> {
    pub(super) fn process_includes(&mut self, includes: &[Include], origin: &Path) -> Result<()> {
        if self.options.parallel_includes && includes.len() > 1 {
            log::debug!("Processing {} includes in parallel", includes.len());
            for inventory in self.process_includes_parallel(includes, origin)? {
                self.inventory.extend(inventory);
            }
            return Ok(());
        }

        for include in includes {
            self.process_include(include, origin)?;
        }
        Ok(())
    }

    fn process_include(&mut self, include: &Include, origin: &Path) -> Result<()> {
        let resolved = self.resolver.resolve(&include.file, origin)?;
        log::info!("Including launch file: {}", resolved);
        self.traverse_file(Path::new(&resolved))
    }

    /// Traverse each include on its own branch.
    ///
    /// Results come back in declaration order; the first failing include in
    /// that order decides the error.
    fn process_includes_parallel(
        &self,
        includes: &[Include],
        origin: &Path,
    ) -> Result<Vec<Inventory>> {
        let results: Vec<Result<Inventory>> = includes
            .par_iter()
            .map(|include| {
                let mut branch = self.branch();
                branch.process_include(include, origin)?;
                Ok(branch.inventory)
            })
            .collect();

        results.into_iter().collect()
    }

    /// Fresh traverser sharing this one's include chain, file cache and clock
    fn branch(&self) -> Self {
        LaunchTraverser {
            resolver: self.resolver,
            options: self.options,
            started: self.started,
            include_chain: self.include_chain.clone(),
            cache: self.cache.clone(),
            inventory: Inventory::default(),
        }
    }
}
