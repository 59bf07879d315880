use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub poem_list_path: String,
    pub review_file_path: String,
    pub output_dir: String,
    pub fonts_dir: String,
    /// Fixed background-texture seed for reproducible output; unset means
    /// fresh entropy per card.
    pub texture_seed: Option<u64>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.deepseek.com".to_string()),
            poem_list_path: std::env::var("POEM_LIST_PATH")
                .unwrap_or_else(|_| "poems.json".to_string()),
            review_file_path: std::env::var("REVIEW_FILE_PATH")
                .unwrap_or_else(|_| "poems_to_review.json".to_string()),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or_else(|_| "./output".to_string()),
            fonts_dir: std::env::var("FONTS_DIR")
                .unwrap_or_else(|_| "./assets/fonts".to_string()),
            texture_seed: match std::env::var("TEXTURE_SEED") {
                Ok(raw) => Some(
                    raw.parse()
                        .context("TEXTURE_SEED must be an unsigned integer")?,
                ),
                Err(_) => None,
            },
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
