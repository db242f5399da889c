//! `<rosparam>` records

use super::enclosing_scope;
use crate::xml::{Entity, XmlEntity};

/// Command that merges an external parameter file
pub const LOAD_COMMAND: &str = "load";

/// Reference to an external parameter file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalParameterSet {
    pub file: String,
    pub command: String,
    /// Enclosing node name, or `"launch"`
    pub parent: String,
}

impl ExternalParameterSet {
    pub fn from_entity(entity: &XmlEntity) -> Self {
        Self {
            file: entity.attr_or_empty("file"),
            command: entity.attr_or_empty("command"),
            parent: enclosing_scope(entity),
        }
    }

    /// Whether this set contributes parameters
    pub fn is_load(&self) -> bool {
        self.command == LOAD_COMMAND
    }
}
