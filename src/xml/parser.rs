//! XML launch file parser

use crate::{
    error::{ExtractError, Result},
    xml::entity::{Entity, XmlEntity},
};
use std::{fs, path::Path};

/// Element kinds recognized in a launch file
pub const PARAM_TAG: &str = "param";
pub const NODE_TAG: &str = "node";
pub const ROSPARAM_TAG: &str = "rosparam";
pub const INCLUDE_TAG: &str = "include";

/// Raw elements of one launch file, grouped by kind.
///
/// Each list keeps document order. Elements are gathered from the whole
/// tree, so a `<param>` nested in a `<group>` is found as well as one at
/// the top level.
#[derive(Debug, Default)]
pub struct DescriptorElements<'a, 'input> {
    pub params: Vec<XmlEntity<'a, 'input>>,
    pub nodes: Vec<XmlEntity<'a, 'input>>,
    pub rosparams: Vec<XmlEntity<'a, 'input>>,
    pub includes: Vec<XmlEntity<'a, 'input>>,
}

impl<'a, 'input> DescriptorElements<'a, 'input> {
    pub fn collect(doc: &'a roxmltree::Document<'input>) -> Self {
        let mut elements = Self::default();

        for node in doc.descendants().filter(|n| n.is_element()) {
            let entity = XmlEntity::new(node);
            match entity.type_name() {
                PARAM_TAG => elements.params.push(entity),
                NODE_TAG => elements.nodes.push(entity),
                ROSPARAM_TAG => elements.rosparams.push(entity),
                INCLUDE_TAG => elements.includes.push(entity),
                _ => {}
            }
        }

        elements
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
            && self.nodes.is_empty()
            && self.rosparams.is_empty()
            && self.includes.is_empty()
    }
}

/// Read a launch file from disk
pub fn read_descriptor(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| ExtractError::DescriptorRead {
        file: path.to_path_buf(),
        source,
    })
}

/// Parse launch file text into a document tree
pub fn parse_descriptor<'input>(
    content: &'input str,
    file: &Path,
) -> Result<roxmltree::Document<'input>> {
    roxmltree::Document::parse(content).map_err(|source| ExtractError::MalformedDescriptor {
        file: file.to_path_buf(),
        source,
    })
}
