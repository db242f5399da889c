//! launch_inventory library
//!
//! Walks a ROS launch file, the `<rosparam>` files it loads and every file
//! it includes, and returns a flat list of parameters and nodes tagged with
//! the scope they were declared in.

pub mod actions;
pub mod error;
mod file_cache;
pub mod params;
pub mod record;
pub mod substitution;
pub mod traverser;
pub mod xml;

pub use actions::{ExternalParameterSet, Include, Node, Parameter};
pub use error::{ExtractError, LocateError, Result};
pub use record::{ExtendedParameter, Inventory, OutputFormat, RecordKind, RecordWriter};
pub use substitution::{PackageLocator, PathResolver};
pub use traverser::{ExtractOptions, LaunchTraverser};

use std::path::Path;

/// Collect parameters and nodes from the tree rooted at `root`
pub fn extract_inventory(
    root: &Path,
    resolver: &PathResolver,
    options: &ExtractOptions,
) -> Result<Inventory> {
    traverser::extract(root, resolver, options)
}

/// All parameters in traversal order
pub fn extract_parameters(root: &Path, resolver: &PathResolver) -> Result<Vec<Parameter>> {
    let options = ExtractOptions::new(RecordKind::Parameters);
    Ok(extract_inventory(root, resolver, &options)?.parameters)
}

/// All nodes in traversal order.
///
/// `<rosparam>` files are not opened.
pub fn extract_nodes(root: &Path, resolver: &PathResolver) -> Result<Vec<Node>> {
    let options = ExtractOptions::new(RecordKind::Nodes);
    Ok(extract_inventory(root, resolver, &options)?.nodes)
}

/// Same parameters as [`extract_parameters`], displayed in the extended schema
pub fn extract_extended_parameters(
    root: &Path,
    resolver: &PathResolver,
) -> Result<Vec<ExtendedParameter>> {
    Ok(extract_parameters(root, resolver)?
        .into_iter()
        .map(ExtendedParameter)
        .collect())
}
