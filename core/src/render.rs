use crate::models::Shape;
use crate::tree::{NodeId, NodeState, Tree};

/// What a line in the flattened view represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
  /// A node row. Actionable when the node is expandable.
  Node,
  /// Inline primitive value under an attribute row.
  Value,
  /// Empty/opaque marker under an expanded node.
  Marker,
  /// Placeholder while a request is in flight.
  Loading,
  /// Error text for a failed node.
  Error,
}

/// One line of the flattened tree. Presentation (indent, colors, layout) is
/// entirely the shell's concern.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderLine {
  pub depth: usize,
  pub text: String,
  pub kind: LineKind,
  /// The node this line belongs to; markers carry their parent's id.
  pub node: NodeId,
}

pub(crate) fn render_tree(tree: &Tree) -> Vec<RenderLine> {
  let mut out = Vec::new();
  for id in tree.roots() {
    render_node(tree, *id, 0, &mut out);
  }
  out
}

fn render_node(tree: &Tree, id: NodeId, depth: usize, out: &mut Vec<RenderLine>) {
  let Some(node) = tree.get(id) else { return };
  out.push(RenderLine {
    depth,
    text: node.label.clone(),
    kind: LineKind::Node,
    node: id,
  });
  if let Some(value) = &node.value {
    out.push(RenderLine {
      depth: depth + 1,
      text: format!("Value: {value}"),
      kind: LineKind::Value,
      node: id,
    });
  }
  match &node.state {
    NodeState::Collapsed => {}
    NodeState::Loading => out.push(RenderLine {
      depth: depth + 1,
      text: "Loading...".to_string(),
      kind: LineKind::Loading,
      node: id,
    }),
    NodeState::Failed { message } => out.push(RenderLine {
      depth: depth + 1,
      text: message.clone(),
      kind: LineKind::Error,
      node: id,
    }),
    NodeState::Expanded => {
      if node.children.is_empty() {
        // An expanded-but-empty node must stay distinguishable from a
        // collapsed one.
        out.push(RenderLine {
          depth: depth + 1,
          text: empty_marker(node.shape.as_ref()).to_string(),
          kind: LineKind::Marker,
          node: id,
        });
      } else {
        for child in &node.children {
          render_node(tree, *child, depth + 1, out);
        }
      }
    }
  }
}

fn empty_marker(shape: Option<&Shape>) -> &'static str {
  match shape {
    Some(Shape::Sequence { .. }) => "This list/tuple is empty.",
    Some(Shape::Mapping { .. }) => "This dictionary is empty.",
    Some(Shape::Object { .. }) => "No attributes found.",
    Some(Shape::Names { .. }) => "No keys or attributes found.",
    Some(Shape::Opaque) | None => "No further details to display.",
  }
}
