//! Recursive launch tree traversal

mod include;

use crate::{
    actions::{ExternalParameterSet, Include, Node, Parameter},
    error::{ExtractError, Result},
    file_cache::DescriptorCache,
    params::load_parameters,
    record::{Inventory, RecordKind},
    substitution::PathResolver,
    xml::{parse_descriptor, DescriptorElements},
};
use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

/// Limits and switches for one extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Entity kinds to collect
    pub kind: RecordKind,
    /// Include nesting allowed below the root file
    pub max_depth: usize,
    /// Wall-clock budget for the whole traversal, checked on entry to each
    /// file. A package lookup already in flight is bounded only by its
    /// locator (see `RospackLocator::with_timeout`).
    pub timeout: Option<Duration>,
    /// Traverse sibling includes on the rayon pool
    pub parallel_includes: bool,
}

impl ExtractOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 64;

    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            kind: RecordKind::All,
            max_depth: Self::DEFAULT_MAX_DEPTH,
            timeout: None,
            parallel_includes: false,
        }
    }
}

/// Depth-first walker over a launch file and everything it includes.
///
/// Each file contributes its `<param>`s, then the parameters of its loaded
/// `<rosparam>` files, then its `<node>`s, followed by the output of each
/// `<include>` in declaration order. A file reached along two include paths
/// contributes twice.
pub struct LaunchTraverser<'r> {
    resolver: &'r PathResolver,
    options: &'r ExtractOptions,
    started: Instant,
    /// Canonical paths of the files on the current include branch
    include_chain: Vec<PathBuf>,
    /// Launch files already read in this extraction
    cache: DescriptorCache,
    inventory: Inventory,
}

impl<'r> LaunchTraverser<'r> {
    pub fn new(resolver: &'r PathResolver, options: &'r ExtractOptions) -> Self {
        Self {
            resolver,
            options,
            started: Instant::now(),
            include_chain: Vec::new(),
            cache: DescriptorCache::new(),
            inventory: Inventory::default(),
        }
    }

    pub fn traverse_file(&mut self, path: &Path) -> Result<()> {
        let canonical_path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        self.check_entry(path, &canonical_path)?;

        let content = self.cache.read(path, &canonical_path)?;
        let doc = parse_descriptor(&content, path)?;
        let elements = DescriptorElements::collect(&doc);

        if self.options.kind.includes_parameters() {
            let mut params: Vec<Parameter> =
                elements.params.iter().map(Parameter::from_entity).collect();
            for set in elements.rosparams.iter().map(ExternalParameterSet::from_entity) {
                params.extend(load_parameters(&set, self.resolver, path)?);
            }
            log::debug!("{} parameters in {}", params.len(), path.display());
            self.inventory.parameters.extend(params);
        }

        if self.options.kind.includes_nodes() {
            let nodes: Vec<Node> = elements.nodes.iter().map(Node::from_entity).collect();
            log::debug!("{} nodes in {}", nodes.len(), path.display());
            self.inventory.nodes.extend(nodes);
        }

        let includes: Vec<Include> = elements.includes.iter().map(Include::from_entity).collect();

        self.include_chain.push(canonical_path);
        let result = self.process_includes(&includes, path);
        self.include_chain.pop();
        result
    }

    /// Reject cycles, runaway nesting and an exhausted time budget before a
    /// file is read
    fn check_entry(&self, path: &Path, canonical_path: &Path) -> Result<()> {
        if self.include_chain.iter().any(|p| p == canonical_path) {
            let mut chain = self.include_chain.clone();
            chain.push(canonical_path.to_path_buf());
            log::error!("Circular include detected: {}", canonical_path.display());
            return Err(ExtractError::CyclicInclude { chain });
        }

        if self.include_chain.len() > self.options.max_depth {
            return Err(ExtractError::DepthExceeded {
                file: path.to_path_buf(),
                limit: self.options.max_depth,
            });
        }

        if let Some(budget) = self.options.timeout {
            let elapsed = self.started.elapsed();
            if elapsed > budget {
                return Err(ExtractError::Timeout {
                    file: path.to_path_buf(),
                    elapsed,
                });
            }
        }

        Ok(())
    }

    pub fn into_inventory(self) -> Inventory {
        self.inventory
    }
}

/// Walk the tree rooted at `root` and collect what `options` asks for
pub fn extract(
    root: &Path,
    resolver: &PathResolver,
    options: &ExtractOptions,
) -> Result<Inventory> {
    log::info!("Extracting from launch file: {}", root.display());
    let mut traverser = LaunchTraverser::new(resolver, options);
    traverser.traverse_file(root)?;
    let inventory = traverser.into_inventory();
    log::info!(
        "  {} parameters, {} nodes",
        inventory.parameters.len(),
        inventory.nodes.len()
    );
    Ok(inventory)
}
