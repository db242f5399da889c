//! XML entity abstraction

/// Read-only view of a launch file element
pub trait Entity {
    /// Element tag name (e.g., "node", "param")
    fn type_name(&self) -> &str;

    /// Attribute value, if present
    fn attr(&self, name: &str) -> Option<&str>;

    /// Attribute value, or the empty string when absent
    fn attr_or_empty(&self, name: &str) -> String {
        self.attr(name).unwrap_or_default().to_string()
    }

    /// Attribute value, or `default` when absent or empty
    fn attr_or(&self, name: &str, default: &str) -> String {
        match self.attr(name) {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => default.to_string(),
        }
    }
}

/// XML entity implementation wrapping roxmltree::Node
#[derive(Debug, Clone, Copy)]
pub struct XmlEntity<'a, 'input> {
    node: roxmltree::Node<'a, 'input>,
}

impl<'a, 'input> XmlEntity<'a, 'input> {
    pub fn new(node: roxmltree::Node<'a, 'input>) -> Self {
        Self { node }
    }

    /// Nearest enclosing element, skipping text and comment nodes
    pub fn parent_element(&self) -> Option<XmlEntity<'a, 'input>> {
        self.node.parent_element().map(XmlEntity::new)
    }
}

impl<'a, 'input> Entity for XmlEntity<'a, 'input> {
    fn type_name(&self) -> &str {
        self.node.tag_name().name()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.node.attribute(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_attribute_is_empty() {
        let xml = r#"<param name="rate" />"#;
        let doc = roxmltree::Document::parse(xml).unwrap();
        let entity = XmlEntity::new(doc.root_element());

        assert_eq!(entity.type_name(), "param");
        assert_eq!(entity.attr_or_empty("name"), "rate");
        assert_eq!(entity.attr_or_empty("value"), "");
        assert_eq!(entity.attr("value"), None);
    }

    #[test]
    fn test_attr_or_default() {
        let xml = r#"<node pkg="demo" name="talker" type="" />"#;
        let doc = roxmltree::Document::parse(xml).unwrap();
        let entity = XmlEntity::new(doc.root_element());

        assert_eq!(entity.attr_or("type", "UNK"), "UNK");
        assert_eq!(entity.attr_or("pkg", "UNK"), "demo");
        assert_eq!(entity.attr_or("missing", "UNK"), "UNK");
    }

    #[test]
    fn test_parent_element_skips_text() {
        let xml = r#"<launch>
            <node name="driver">
                <!-- comment -->
                <param name="rate" value="10" />
            </node>
        </launch>"#;
        let doc = roxmltree::Document::parse(xml).unwrap();
        let root = XmlEntity::new(doc.root_element());
        let param = doc
            .descendants()
            .find(|n| n.has_tag_name("param"))
            .map(XmlEntity::new)
            .unwrap();

        let parent = param.parent_element().unwrap();
        assert_eq!(parent.type_name(), "node");
        assert_eq!(parent.attr("name"), Some("driver"));
        assert!(root.parent_element().is_none());
    }
}
