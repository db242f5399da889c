//! Typed records built from launch file elements

pub mod include;
pub mod node;
pub mod param;
pub mod rosparam;

pub use include::Include;
pub use node::Node;
pub use param::{enclosing_scope, split_param_name, Parameter};
pub use rosparam::ExternalParameterSet;

/// Type tag used when a `<param>` or `<node>` declares none
pub const UNKNOWN_TYPE: &str = "UNK";

/// Scope of parameters declared outside any `<node>`
pub const LAUNCH_SCOPE: &str = "launch";
