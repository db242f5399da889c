//! `<include>` records

use crate::xml::{Entity, XmlEntity};

/// Reference to a nested launch file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Include {
    pub file: String,
}

impl Include {
    pub fn from_entity(entity: &XmlEntity) -> Self {
        Self {
            file: entity.attr_or_empty("file"),
        }
    }
}
