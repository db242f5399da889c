//! Node records

use super::UNKNOWN_TYPE;
use crate::xml::{Entity, XmlEntity};
use serde::{Deserialize, Serialize};

/// A declared process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub package: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
}

impl Node {
    pub fn new(package: impl Into<String>, name: impl Into<String>, node_type: &str) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
            node_type: if node_type.is_empty() {
                UNKNOWN_TYPE.to_string()
            } else {
                node_type.to_string()
            },
        }
    }

    pub fn from_entity(entity: &XmlEntity) -> Self {
        Self::new(
            entity.attr_or_empty("pkg"),
            entity.attr_or_empty("name"),
            &entity.attr_or("type", UNKNOWN_TYPE),
        )
    }
}
