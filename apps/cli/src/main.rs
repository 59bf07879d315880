mod config;
mod errors;
mod layout;
mod llm_client;
mod localization;
mod render;
mod workflow;

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::localization::{LlmPoemSource, PoemSource};
use crate::render::{BackgroundSupplier, CardRenderer, PaperTexture};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting VerseCard v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
    );
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Wire collaborators behind their trait seams
    let source: Arc<dyn PoemSource> = Arc::new(LlmPoemSource::new(llm));
    let background: Arc<dyn BackgroundSupplier> = Arc::new(match config.texture_seed {
        Some(seed) => PaperTexture::seeded(seed),
        None => PaperTexture::new(),
    });
    let renderer = Arc::new(CardRenderer::new(background));

    match prompt_for_mode()? {
        Mode::Collect => {
            workflow::run_collect_step(
                source,
                Path::new(&config.poem_list_path),
                Path::new(&config.review_file_path),
            )
            .await?;
        }
        Mode::Produce => {
            workflow::run_produce_step(
                renderer,
                Path::new(&config.review_file_path),
                Path::new(&config.output_dir),
                Path::new(&config.fonts_dir),
            )
            .await?;
        }
        Mode::Exit => {}
    }

    Ok(())
}

enum Mode {
    Collect,
    Produce,
    Exit,
}

/// Interactive menu on stdin. One step per run: the operator is expected to
/// proof-read the review file between collect and render. Invalid input
/// re-prompts.
fn prompt_for_mode() -> Result<Mode> {
    loop {
        println!();
        println!("==============================");
        println!("   VerseCard workflow");
        println!("==============================");
        println!("1. [collect] fetch localized poems -> review file");
        println!("2. [render]  review file -> card images");
        println!("0. exit");
        print!("\nSelect a mode: ");
        std::io::stdout().flush()?;

        let mut choice = String::new();
        std::io::stdin().read_line(&mut choice)?;
        match choice.trim() {
            "1" => return Ok(Mode::Collect),
            "2" => return Ok(Mode::Produce),
            "0" => return Ok(Mode::Exit),
            other => println!("Invalid choice '{other}', try again."),
        }
    }
}
