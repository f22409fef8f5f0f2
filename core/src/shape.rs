use serde_json::Value;

use crate::models::{AttrInfo, Shape};

// Type tags treated as containers, i.e. worth expanding further.
const CONTAINER_TYPES: [&str; 5] = ["object", "class", "dict", "list", "tuple"];

pub(crate) fn is_container_type(type_tag: &str) -> bool {
  CONTAINER_TYPES.contains(&type_tag)
}

/// Classify one raw `details` payload into a `Shape`.
///
/// Recognized, in order: list/tuple with a length, dict with keys,
/// object/class with an attribute map, then a bare keys/attributes name
/// list. Anything else is `Opaque`. Only the shape tag and required fields
/// are validated; deep correctness of the payload is the server's problem.
pub(crate) fn classify(details: &Value, value_preview_max_chars: usize) -> Shape {
  let type_tag = details.get("type").and_then(Value::as_str).unwrap_or("");

  if matches!(type_tag, "list" | "tuple") {
    if let Some(len) = details.get("length").and_then(Value::as_u64) {
      return Shape::Sequence { len };
    }
  }

  if type_tag == "dict" {
    if let Some(keys) = string_array(details.get("keys")) {
      return Shape::Mapping { keys };
    }
  }

  if matches!(type_tag, "object" | "class") {
    if let Some(attrs) = details.get("attributes").and_then(Value::as_object) {
      let attrs = attrs
        .iter()
        .map(|(name, desc)| attr_info(name, desc, value_preview_max_chars))
        .collect();
      return Shape::Object { attrs };
    }
  }

  // Some servers return bare keys/attributes arrays without full descriptors.
  if let Some(names) = string_array(details.get("keys")) {
    return Shape::Names { names };
  }
  if let Some(names) = string_array(details.get("attributes")) {
    return Shape::Names { names };
  }

  Shape::Opaque
}

fn attr_info(name: &str, desc: &Value, value_preview_max_chars: usize) -> AttrInfo {
  let declared_type = desc
    .get("type")
    .and_then(Value::as_str)
    .unwrap_or("attribute")
    .to_string();
  let expandable = is_container_type(&declared_type);
  // Containers are fetched lazily on expand; only leaves carry their value
  // inline.
  let value = if expandable {
    None
  } else {
    desc
      .get("value")
      .map(|v| render_scalar(v, value_preview_max_chars))
  };
  AttrInfo {
    name: name.to_string(),
    declared_type,
    value,
    expandable,
  }
}

// Strings render bare, every other JSON scalar via its literal form.
fn render_scalar(v: &Value, max_chars: usize) -> String {
  let s = match v {
    Value::String(s) => s.clone(),
    other => other.to_string(),
  };
  truncate_chars(s, max_chars)
}

fn truncate_chars(s: String, max_chars: usize) -> String {
  if s.chars().count() <= max_chars {
    return s;
  }
  let mut out: String = s.chars().take(max_chars).collect();
  out.push('…');
  out
}

fn string_array(v: Option<&Value>) -> Option<Vec<String>> {
  let arr = v?.as_array()?;
  Some(
    arr
      .iter()
      .map(|v| match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
      })
      .collect(),
  )
}
