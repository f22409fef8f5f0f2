use std::collections::HashMap;

use crate::models::Shape;
use crate::path::VarPath;

/// Identifier of one node. Stable for the node's lifetime and never reused
/// within a session, so a late reference to a torn-down node simply misses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u64);

/// Expand/collapse lifecycle of a single node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeState {
  /// No children, no pending request. The initial state.
  Collapsed,
  /// Inspect request in flight.
  Loading,
  /// Children materialized (possibly zero of them, for empty containers).
  Expanded,
  /// The last request failed; the message renders in place of children.
  Failed { message: String },
}

/// What happened to a node.
#[derive(Debug, Clone)]
pub enum NodeEvent {
  /// User expand/collapse action.
  Toggle,
  /// The in-flight request settled with a classified shape.
  Fetched(Shape),
  /// The in-flight request settled with an error (transport or remote).
  FetchFailed(String),
}

/// What the engine must do after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
  /// Issue an inspect request for the node's path.
  StartFetch,
  /// Materialize children from the shape.
  BuildChildren(Shape),
  /// Discard all descendants and their state.
  TearDown,
  None,
}

/// Pure transition function of the per-node state machine.
///
/// Never performs I/O and never touches children; the engine interprets the
/// returned effect. One outstanding request per node falls out of the
/// `Loading` guard here, and collapse is only reachable from `Expanded`, so
/// a response for a torn-down node cannot occur.
pub fn step(state: &NodeState, event: &NodeEvent) -> (NodeState, Effect) {
  match (state, event) {
    (NodeState::Collapsed, NodeEvent::Toggle) => (NodeState::Loading, Effect::StartFetch),
    // A click on a failed node re-attempts; the error is not sticky.
    (NodeState::Failed { .. }, NodeEvent::Toggle) => (NodeState::Loading, Effect::StartFetch),
    (NodeState::Expanded, NodeEvent::Toggle) => (NodeState::Collapsed, Effect::TearDown),
    // Toggling while a request is in flight is a no-op.
    (NodeState::Loading, NodeEvent::Toggle) => (NodeState::Loading, Effect::None),
    (NodeState::Loading, NodeEvent::Fetched(shape)) => {
      (NodeState::Expanded, Effect::BuildChildren(shape.clone()))
    }
    (NodeState::Loading, NodeEvent::FetchFailed(message)) => (
      NodeState::Failed {
        message: message.clone(),
      },
      Effect::None,
    ),
    // A settle event for a node that is not Loading cannot happen in the
    // current design; ignore it rather than corrupt state.
    (other, NodeEvent::Fetched(_) | NodeEvent::FetchFailed(_)) => (other.clone(), Effect::None),
  }
}

/// One tree element bound to exactly one path.
#[derive(Debug, Clone)]
pub struct Node {
  pub id: NodeId,
  pub path: VarPath,
  pub label: String,
  pub state: NodeState,
  /// Owned child list; empty until expanded, emptied again on collapse.
  pub children: Vec<NodeId>,
  /// Last shape the server reported for this node, if any.
  pub shape: Option<Shape>,
  /// Immediately-available value rendered inline (primitive attributes).
  pub value: Option<String>,
  /// Leaf attributes are not expandable and never fetch.
  pub expandable: bool,
}

/// The node store. Children are owned: collapse removes whole subtrees.
#[derive(Debug, Default)]
pub struct Tree {
  nodes: HashMap<NodeId, Node>,
  roots: Vec<NodeId>,
  next_id: u64,
}

impl Tree {
  pub fn roots(&self) -> &[NodeId] {
    &self.roots
  }

  pub fn get(&self, id: NodeId) -> Option<&Node> {
    self.nodes.get(&id)
  }

  pub(crate) fn set_state(&mut self, id: NodeId, state: NodeState) {
    if let Some(node) = self.nodes.get_mut(&id) {
      node.state = state;
    }
  }

  /// Seed one collapsed root node. Root order is display order.
  pub(crate) fn seed_root(&mut self, name: &str) -> NodeId {
    let id = self.insert(VarPath::root(name), name.to_string(), true, None);
    self.roots.push(id);
    id
  }

  pub(crate) fn insert(
    &mut self,
    path: VarPath,
    label: String,
    expandable: bool,
    value: Option<String>,
  ) -> NodeId {
    let id = NodeId(self.next_id);
    self.next_id += 1;
    self.nodes.insert(
      id,
      Node {
        id,
        path,
        label,
        state: NodeState::Collapsed,
        children: Vec::new(),
        shape: None,
        value,
        expandable,
      },
    );
    id
  }

  /// Attach freshly built children (and the shape they came from) to a node.
  pub(crate) fn attach(&mut self, id: NodeId, children: Vec<NodeId>, shape: Shape) {
    if let Some(node) = self.nodes.get_mut(&id) {
      node.children = children;
      node.shape = Some(shape);
    }
  }

  /// Collapse teardown: remove all descendants and forget the stale shape.
  pub(crate) fn teardown(&mut self, id: NodeId) {
    let children = match self.nodes.get_mut(&id) {
      Some(node) => {
        node.shape = None;
        std::mem::take(&mut node.children)
      }
      None => return,
    };
    for child in children {
      self.remove_subtree(child);
    }
  }

  fn remove_subtree(&mut self, id: NodeId) {
    if let Some(node) = self.nodes.remove(&id) {
      for child in node.children {
        self.remove_subtree(child);
      }
    }
  }
}
