//! XML parsing module

pub mod entity;
pub mod parser;

pub use entity::{Entity, XmlEntity};
pub use parser::{parse_descriptor, read_descriptor, DescriptorElements};
