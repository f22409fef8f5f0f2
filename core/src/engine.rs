use std::{sync::Arc, time::Duration};

use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, error};

use crate::{
  client::InspectClient,
  models::Shape,
  path::Accessor,
  render::{self, RenderLine},
  shape,
  tree::{step, Effect, Node, NodeEvent, NodeId, Tree},
};

/// Failure kinds surfaced per node.
#[derive(Debug, Error)]
pub enum InspectError {
  /// The request could not complete (network or HTTP/JSON layer).
  #[error("transport failure: {0}")]
  Transport(String),
  /// The request completed but the server reported an error for the path.
  #[error("{0}")]
  Remote(String),
  /// The referenced node does not exist (e.g. torn down by a collapse).
  #[error("unknown node: {0:?}")]
  UnknownNode(NodeId),
}

#[derive(Debug, Clone)]
pub struct InspectorOptions {
  /// Cap for inline `Value:` previews.
  pub value_preview_max_chars: usize,
  /// Per-request timeout for the HTTP client.
  pub request_timeout: Duration,
}

impl Default for InspectorOptions {
  fn default() -> Self {
    Self {
      value_preview_max_chars: 300,
      request_timeout: Duration::from_secs(10),
    }
  }
}

/// Owns the node tree and drives the per-node state machine.
///
/// All mutation happens under one short-lived lock, never held across a
/// suspension point, so expansions of distinct nodes may be in flight
/// concurrently and settle in any order; each only touches its own subtree.
#[derive(Clone)]
pub struct InspectorEngine {
  options: InspectorOptions,
  client: Arc<dyn InspectClient>,
  tree: Arc<Mutex<Tree>>,
}

impl InspectorEngine {
  pub fn new(client: Arc<dyn InspectClient>, options: InspectorOptions) -> Self {
    Self {
      options,
      client,
      tree: Arc::new(Mutex::new(Tree::default())),
    }
  }

  /// Shell API: load_roots() -> seeded root node ids.
  ///
  /// One-time root listing; a failure here is terminal for the session
  /// (logged, nothing rendered). Root order is preserved for display.
  pub async fn load_roots(&self) -> Result<Vec<NodeId>, InspectError> {
    let globals = match self.client.fetch_globals().await {
      Ok(globals) => globals,
      Err(e) => {
        error!("failed to fetch globals: {e}");
        return Err(e);
      }
    };
    let mut tree = self.tree.lock();
    Ok(globals.iter().map(|name| tree.seed_root(name)).collect())
  }

  /// Shell API: toggle(node_id) -> expand, collapse, or retry one node.
  ///
  /// The reducer decides the transition; the fetch effect runs without the
  /// tree lock held. A toggle on a leaf or on a `Loading` node is a no-op.
  pub async fn toggle(&self, id: NodeId) -> Result<(), InspectError> {
    let (path, effect) = {
      let mut tree = self.tree.lock();
      let node = tree.get(id).ok_or(InspectError::UnknownNode(id))?;
      if !node.expandable {
        return Ok(());
      }
      let (next, effect) = step(&node.state, &NodeEvent::Toggle);
      let path = node.path.clone();
      tree.set_state(id, next);
      if matches!(effect, Effect::TearDown) {
        tree.teardown(id);
      }
      (path, effect)
    };

    if !matches!(effect, Effect::StartFetch) {
      return Ok(());
    }

    let serialized = path.serialize();
    let event = match self.client.fetch_details(&serialized).await {
      Ok(details) => {
        debug!(path = %serialized, "inspect ok");
        NodeEvent::Fetched(shape::classify(&details, self.options.value_preview_max_chars))
      }
      Err(e) => {
        debug!(path = %serialized, "inspect failed: {e}");
        NodeEvent::FetchFailed(e.to_string())
      }
    };
    self.settle(id, event);
    Ok(())
  }

  /// Shell API: render() -> flattened display lines for the whole tree.
  pub fn render(&self) -> Vec<RenderLine> {
    render::render_tree(&self.tree.lock())
  }

  pub fn roots(&self) -> Vec<NodeId> {
    self.tree.lock().roots().to_vec()
  }

  /// Snapshot of one node (path, label, state, children, shape, value).
  pub fn node(&self, id: NodeId) -> Option<Node> {
    self.tree.lock().get(id).cloned()
  }

  fn settle(&self, id: NodeId, event: NodeEvent) {
    let mut tree = self.tree.lock();
    let Some(node) = tree.get(id) else {
      // The node went away while the request was in flight; nothing to do.
      return;
    };
    let (next, effect) = step(&node.state, &event);
    tree.set_state(id, next);
    if let Effect::BuildChildren(shape) = effect {
      self.build_children(&mut tree, id, shape);
    }
  }

  // One child per element/key/attribute, in descriptor order; each child's
  // path is the parent path plus exactly one accessor.
  fn build_children(&self, tree: &mut Tree, parent: NodeId, shape: Shape) {
    let parent_path = match tree.get(parent) {
      Some(node) => node.path.clone(),
      None => return,
    };
    let mut children = Vec::new();
    match &shape {
      Shape::Sequence { len } => {
        for i in 0..*len {
          let path = parent_path.extend(Accessor::Index(i));
          children.push(tree.insert(path, format!("[{i}]"), true, None));
        }
      }
      Shape::Mapping { keys } => {
        for key in keys {
          let path = parent_path.extend(Accessor::Key(key.clone()));
          children.push(tree.insert(path, key.clone(), true, None));
        }
      }
      Shape::Object { attrs } => {
        for attr in attrs {
          let path = parent_path.extend(Accessor::Attr(attr.name.clone()));
          let label = format!("{} ({})", attr.name, attr.declared_type);
          children.push(tree.insert(path, label, attr.expandable, attr.value.clone()));
        }
      }
      Shape::Names { names } => {
        for name in names {
          let path = parent_path.extend(Accessor::fallback(name));
          children.push(tree.insert(path, name.clone(), true, None));
        }
      }
      Shape::Opaque => {}
    }
    tree.attach(parent, children, shape);
  }
}
