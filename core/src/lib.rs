mod client;
mod engine;
mod models;
mod path;
mod render;
mod shape;
mod tree;

pub use crate::client::{HttpClient, InspectClient};
pub use crate::engine::{InspectError, InspectorEngine, InspectorOptions};
pub use crate::models::{AttrInfo, GlobalsResponse, InspectResponse, Shape};
pub use crate::path::{Accessor, VarPath};
pub use crate::render::{LineKind, RenderLine};
pub use crate::tree::{step, Effect, Node, NodeEvent, NodeId, NodeState};
