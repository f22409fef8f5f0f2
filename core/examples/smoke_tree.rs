use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use vi_core::{InspectClient, InspectError, InspectorEngine, InspectorOptions};

// Canned client so the smoke run needs no server.
struct DemoClient;

#[async_trait]
impl InspectClient for DemoClient {
  async fn fetch_globals(&self) -> Result<Vec<String>, InspectError> {
    Ok(vec!["user".into(), "stats".into()])
  }

  async fn fetch_details(&self, path: &str) -> Result<Value, InspectError> {
    match path {
      "user" => Ok(json!({
        "type": "object",
        "attributes": {
          "name": {"type": "str", "value": "Ada"},
          "friends": {"type": "list"}
        }
      })),
      "user.friends" => Ok(json!({"type": "list", "length": 2})),
      "stats" => Ok(json!({"keys": ["1", "count"]})),
      _ => Err(InspectError::Remote(format!("no such path: {path}"))),
    }
  }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), InspectError> {
  let eng = InspectorEngine::new(Arc::new(DemoClient), InspectorOptions::default());

  let roots = eng.load_roots().await?;
  for id in &roots {
    eng.toggle(*id).await?;
  }
  if let Some(user) = eng.node(roots[0]) {
    for child in user.children {
      eng.toggle(child).await?;
    }
  }

  for line in eng.render() {
    println!("{}{}", "  ".repeat(line.depth), line.text);
  }
  Ok(())
}
