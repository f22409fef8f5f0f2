use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use vi_core::{HttpClient, InspectorEngine, InspectorOptions, LineKind, RenderLine};

// All work runs on one cooperative event loop; requests are async and
// non-blocking, nothing here needs a second thread.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let base_url = match std::env::args()
    .nth(1)
    .or_else(|| std::env::var("VARINSPECTOR_URL").ok())
  {
    Some(url) => url,
    None => bail!("usage: varinspector <base-url> (or set VARINSPECTOR_URL)"),
  };

  let options = InspectorOptions::default();
  let client = HttpClient::new(&base_url, &options).context("build http client")?;
  let engine = InspectorEngine::new(Arc::new(client), options);

  engine.load_roots().await.context("fetch globals")?;

  let mut lines = BufReader::new(tokio::io::stdin()).lines();
  loop {
    let rendered = engine.render();
    print_tree(&rendered);
    println!();
    println!("row number to expand/collapse, q to quit:");

    let Some(input) = lines.next_line().await? else { break };
    let input = input.trim();
    if input.is_empty() {
      continue;
    }
    if input == "q" {
      break;
    }
    let Ok(row) = input.parse::<usize>() else {
      println!("not a row number: {input}");
      continue;
    };
    match rendered.get(row) {
      Some(line) if line.kind == LineKind::Node => {
        if let Err(e) = engine.toggle(line.node).await {
          eprintln!("toggle failed: {e}");
        }
      }
      Some(_) => println!("row {row} is not a node"),
      None => println!("no such row: {row}"),
    }
  }
  Ok(())
}

fn print_tree(lines: &[RenderLine]) {
  for (i, line) in lines.iter().enumerate() {
    let indent = "  ".repeat(line.depth);
    match line.kind {
      LineKind::Node => println!("{i:>3} {indent}{}", line.text),
      _ => println!("    {indent}{}", line.text),
    }
  }
}
