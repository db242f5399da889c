//! Inventory data structures

use crate::actions::{Node, Parameter};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Which entity kinds an extraction collects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Parameters,
    Nodes,
    All,
}

impl RecordKind {
    pub fn name(self) -> &'static str {
        match self {
            RecordKind::Parameters => "parameters",
            RecordKind::Nodes => "nodes",
            RecordKind::All => "parameters and nodes",
        }
    }

    pub fn includes_parameters(self) -> bool {
        matches!(self, RecordKind::Parameters | RecordKind::All)
    }

    pub fn includes_nodes(self) -> bool {
        matches!(self, RecordKind::Nodes | RecordKind::All)
    }
}

/// Flattened result of a launch tree traversal, in traversal order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub parameters: Vec<Parameter>,
    pub nodes: Vec<Node>,
}

impl Inventory {
    pub fn extend(&mut self, other: Inventory) {
        self.parameters.extend(other.parameters);
        self.nodes.extend(other.nodes);
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// A parameter rendered in the 14-column extended schema:
/// `id,runID,timestamp,transType,source,name,value,default,type,setFrom,nodeNS,paramNS,succ,msg`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtendedParameter(pub Parameter);

impl fmt::Display for ExtendedParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let param = &self.0;
        write!(
            f,
            ",,,set,lf,{},{},,{},{},,{},,",
            param.name, param.value, param.param_type, param.parent, param.namespace
        )
    }
}

impl From<Parameter> for ExtendedParameter {
    fn from(param: Parameter) -> Self {
        Self(param)
    }
}

/// Basic CSV line: `parent,namespace,name,type,value`
pub fn parameter_csv(param: &Parameter) -> String {
    format!(
        "{},{},{},{},{}",
        param.parent, param.namespace, param.name, param.param_type, param.value
    )
}

/// Basic CSV line: `package,name,type`
pub fn node_csv(node: &Node) -> String {
    format!("{},{},{}", node.package, node.name, node.node_type)
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "params" | "parameters" => Ok(RecordKind::Parameters),
            "nodes" => Ok(RecordKind::Nodes),
            "all" => Ok(RecordKind::All),
            other => Err(format!("Unknown record kind: {}", other)),
        }
    }
}
