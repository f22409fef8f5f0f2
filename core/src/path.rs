use std::borrow::Cow;
use std::fmt;

/// One step from a value to one of its children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Accessor {
  /// Element position in a list/tuple.
  Index(u64),
  /// Mapping key. Serialized bracket+quoted regardless of how the key looks.
  Key(String),
  /// Object attribute, serialized with dot notation.
  Attr(String),
}

impl Accessor {
  /// Accessor for a bare name from a keys-only/attributes-only payload.
  ///
  /// The originating shape does not say whether an all-digit name is a
  /// sequence index or a mapping key that happens to look like a number, so
  /// digits address by index and everything else by quoted key. See
  /// DESIGN.md for why the ambiguity is kept.
  pub fn fallback(name: &str) -> Accessor {
    if !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()) {
      if let Ok(i) = name.parse::<u64>() {
        return Accessor::Index(i);
      }
    }
    Accessor::Key(name.to_string())
  }
}

/// Immutable accessor chain locating a nested value under a named root.
///
/// The serialized form is both the request parameter sent to the server and
/// the stable identity of a location: two paths with equal serialization are
/// the same location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VarPath {
  root: String,
  accessors: Vec<Accessor>,
}

impl VarPath {
  /// A path with zero accessors, addressing a top-level value.
  pub fn root(name: impl Into<String>) -> Self {
    Self {
      root: name.into(),
      accessors: Vec::new(),
    }
  }

  /// Returns a new path with one accessor appended. Pure; never fails.
  pub fn extend(&self, accessor: Accessor) -> VarPath {
    let mut accessors = Vec::with_capacity(self.accessors.len() + 1);
    accessors.extend(self.accessors.iter().cloned());
    accessors.push(accessor);
    VarPath {
      root: self.root.clone(),
      accessors,
    }
  }

  /// The request form: root name followed by one token per accessor.
  pub fn serialize(&self) -> String {
    self.to_string()
  }
}

impl fmt::Display for VarPath {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.root)?;
    for accessor in &self.accessors {
      match accessor {
        Accessor::Index(i) => write!(f, "[{i}]")?,
        Accessor::Key(k) => write!(f, "[\"{}\"]", escape_key(k))?,
        Accessor::Attr(name) => write!(f, ".{name}")?,
      }
    }
    Ok(())
  }
}

// Keys may contain quotes; keep the serialized form unambiguous.
fn escape_key(k: &str) -> Cow<'_, str> {
  if k.contains(['"', '\\']) {
    Cow::Owned(k.replace('\\', "\\\\").replace('"', "\\\""))
  } else {
    Cow::Borrowed(k)
  }
}
