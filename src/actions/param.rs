//! Parameter records

use super::{LAUNCH_SCOPE, UNKNOWN_TYPE};
use crate::xml::{parser::NODE_TAG, Entity, XmlEntity};
use serde::{Deserialize, Serialize};

/// A parameter with its originating scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Enclosing node name, or `"launch"` for file scope
    pub parent: String,
    pub namespace: String,
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: String,
    pub value: String,
}

impl Parameter {
    /// Build a parameter from a declared name such as `robot/speed`.
    ///
    /// An empty type becomes `"UNK"`.
    pub fn declared(
        parent: impl Into<String>,
        declared_name: &str,
        param_type: &str,
        value: impl Into<String>,
    ) -> Self {
        let (namespace, name) = split_param_name(declared_name);
        Self {
            parent: parent.into(),
            namespace: namespace.to_string(),
            name: name.to_string(),
            param_type: if param_type.is_empty() {
                UNKNOWN_TYPE.to_string()
            } else {
                param_type.to_string()
            },
            value: value.into(),
        }
    }

    /// Build a parameter loaded from a key of an external parameter file.
    ///
    /// Keys are taken verbatim: no namespace split, type always `"UNK"`.
    pub fn external(
        parent: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            parent: parent.into(),
            namespace: String::new(),
            name: key.into(),
            param_type: UNKNOWN_TYPE.to_string(),
            value: value.into(),
        }
    }

    pub fn from_entity(entity: &XmlEntity) -> Self {
        Self::declared(
            enclosing_scope(entity),
            &entity.attr_or_empty("name"),
            &entity.attr_or("type", UNKNOWN_TYPE),
            entity.attr_or_empty("value"),
        )
    }
}

/// Split a declared parameter name on its last `/`.
///
/// Returns `(namespace, name)`; the namespace is empty when there is no `/`.
/// Leading `~` or `/` get no special treatment.
pub fn split_param_name(declared: &str) -> (&str, &str) {
    match declared.rfind('/') {
        Some(slash) => (&declared[..slash], &declared[slash + 1..]),
        None => ("", declared),
    }
}

/// Scope of an element: the name of its directly enclosing `<node>`, or
/// `"launch"`.
pub fn enclosing_scope(entity: &XmlEntity) -> String {
    match entity.parent_element() {
        Some(parent) if parent.type_name() == NODE_TAG => parent.attr_or_empty("name"),
        _ => LAUNCH_SCOPE.to_string(),
    }
}
