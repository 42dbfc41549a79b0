//! Compare two texts and print the report
//!
//! ```text
//! cargo run --example compare_texts -- "我爱北京天安门" "我爱上海外滩"
//! RUST_LOG=textcompare_core=debug cargo run --example compare_texts
//! ```
//!
//! Settings come from `textcompare.toml` and `TEXTCOMPARE_*` variables.

use textcompare_core::{load_config, CompareEngine, DiffKind};

const DEFAULT_TEXT1: &str = "今天天气很好，我们一起去公园散步吧。Rust makes text diffs fast.";
const DEFAULT_TEXT2: &str = "今天天气不错，我们一起去公园跑步吧！Rust makes text diffing fast.";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let text1 = args.next().unwrap_or_else(|| DEFAULT_TEXT1.to_string());
    let text2 = args.next().unwrap_or_else(|| DEFAULT_TEXT2.to_string());

    let config = load_config()?;
    tracing::info!(algorithm = config.algorithm.name(), backend = ?config.breaker.backend, "configuration loaded");

    let engine = CompareEngine::from_config(config)?;
    if let Err(err) = engine.initialize().await {
        tracing::warn!(error = %err, "continuing with single-character Chinese splitting");
    }

    println!("Text 1 tokens: {:?}", engine.segment_result(&text1));
    println!("Text 2 tokens: {:?}", engine.segment_result(&text2));
    println!();

    let report = engine.compare(&text1, &text2);
    println!("{}", report);

    println!("Character diff:");
    for part in &report.char_diff {
        let marker = match part.kind {
            DiffKind::Same => ' ',
            DiffKind::Added => '+',
            DiffKind::Removed => '-',
        };
        println!("  {} {:?}", marker, part.value);
    }

    println!();
    println!("Shared words: {}", report.highlight.same_words.join(" "));
    println!("{}", serde_json::to_string_pretty(&report.highlight)?);

    Ok(())
}
