use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `GET /varinspector/globals` response body: the ordered root listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalsResponse {
  pub globals: Vec<String>,
}

/// `GET /varinspector/inspect` response body.
///
/// The server sets either `error` or `details`, never both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectResponse {
  #[serde(default)]
  pub error: Option<String>,
  #[serde(default)]
  pub details: Option<Value>,
}

/// Normalized description of one inspected value's structure.
///
/// Produced by a single classification pass over the raw `details` payload;
/// everything downstream dispatches on this tag with an exhaustive match.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
  /// List/tuple-like value with an integer length.
  Sequence { len: u64 },
  /// Dict-like value with an ordered key list.
  Mapping { keys: Vec<String> },
  /// Object/class value with an ordered attribute list.
  Object { attrs: Vec<AttrInfo> },
  /// Keys-only / attributes-only fallback: bare names, no per-item details.
  Names { names: Vec<String> },
  /// None of the recognized shapes; nothing further to show.
  Opaque,
}

/// One attribute row of an `Object` shape.
#[derive(Debug, Clone, PartialEq)]
pub struct AttrInfo {
  pub name: String,
  /// Declared type tag as reported by the server ("attribute" when absent).
  pub declared_type: String,
  /// Immediately-available primitive value, already rendered for display.
  pub value: Option<String>,
  /// Container-like attributes (object/class/dict/list/tuple) can be
  /// expanded further; everything else is a leaf.
  pub expandable: bool,
}
