//! Render step — read the (possibly hand-edited) review file and produce one
//! card per language for every record, plus the social copy text file.
//!
//! Cards render inside `spawn_blocking` so the CPU-bound composition never
//! blocks the tokio scheduler. A failed card is logged and skipped.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{error, info};

use crate::errors::AppError;
use crate::localization::{Language, LocalizedPoem, ReviewRecord};
use crate::render::composer::{CardRenderer, RenderRequest};
use crate::render::fonts::font_file;

/// Body font size for every language.
const BODY_FONT_SIZE: f32 = 40.0;
/// Stands in for localized titles/authors the model left empty.
const PLACEHOLDER: &str = "Unknown";

/// Runs the render step over the whole review file.
pub async fn run_produce_step(
    renderer: Arc<CardRenderer>,
    review_file_path: &Path,
    output_dir: &Path,
    fonts_dir: &Path,
) -> Result<(), AppError> {
    if !review_file_path.exists() {
        return Err(AppError::Validation(format!(
            "review file {} not found; run the collect step first",
            review_file_path.display()
        )));
    }
    let raw = std::fs::read_to_string(review_file_path)?;
    let records: Vec<ReviewRecord> = serde_json::from_str(&raw)?;
    info!("Rendering cards for {} poems", records.len());

    for record in &records {
        let dir = card_dir(output_dir, &record.input.title);
        std::fs::create_dir_all(&dir)?;
        info!("Processing \"{}\"", record.input.title);

        if let Some(copy) = &record.versions.social_copy {
            std::fs::write(dir.join("social_copy.txt"), copy)?;
        }

        for lang in Language::ALL {
            let request = build_request(record.versions.version(lang), fonts_dir, lang);
            let output_path = dir.join(format!("{}.jpg", lang.code()));
            let renderer = Arc::clone(&renderer);

            // CPU-bound composition — spawn_blocking keeps the executor free.
            let result =
                tokio::task::spawn_blocking(move || renderer.render(&request, &output_path))
                    .await
                    .map_err(|e| {
                        AppError::Internal(anyhow::anyhow!(
                            "spawn_blocking failed in render step: {e}"
                        ))
                    })?;

            if let Err(e) = result {
                error!(
                    "Card {} for \"{}\" failed, skipping: {e}",
                    lang.code(),
                    record.input.title
                );
            }
        }
    }

    info!("All renders finished; see {}", output_dir.display());
    Ok(())
}

/// Output directory for one poem: `<output_dir>/<safe_title>_cards`, where the
/// safe title replaces spaces with underscores.
fn card_dir(output_dir: &Path, title: &str) -> PathBuf {
    output_dir.join(format!("{}_cards", title.replace(' ', "_")))
}

fn build_request(poem: &LocalizedPoem, fonts_dir: &Path, lang: Language) -> RenderRequest {
    RenderRequest {
        title: non_empty_or(&poem.title, PLACEHOLDER),
        author: non_empty_or(&poem.author, PLACEHOLDER),
        content: poem.content.clone(),
        font_path: fonts_dir.join(font_file(lang)),
        font_size: BODY_FONT_SIZE,
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use image::{Rgba, RgbaImage};

    use crate::localization::{PoemInput, PoemPack};
    use crate::render::background::BackgroundSupplier;

    struct FlatPaper;

    impl BackgroundSupplier for FlatPaper {
        fn supply(&self, width: u32, height: u32) -> Result<RgbaImage, AppError> {
            Ok(RgbaImage::from_pixel(
                width,
                height,
                Rgba([250, 245, 240, 255]),
            ))
        }
    }

    fn review_record(title: &str) -> ReviewRecord {
        ReviewRecord {
            input: PoemInput {
                title: title.to_string(),
                author: "Pushkin".to_string(),
            },
            collected_at: Utc::now(),
            versions: PoemPack {
                en: LocalizedPoem {
                    title: title.to_string(),
                    author: "Alexander Pushkin".to_string(),
                    content: "A short verse".to_string(),
                },
                social_copy: Some("Six languages, one elegy.".to_string()),
                ..PoemPack::default()
            },
        }
    }

    #[test]
    fn test_card_dir_replaces_spaces_in_title() {
        let dir = card_dir(Path::new("./output"), "Ode to a Nightingale");
        assert_eq!(
            dir,
            PathBuf::from("./output/Ode_to_a_Nightingale_cards")
        );
    }

    #[test]
    fn test_build_request_substitutes_placeholders() {
        let poem = LocalizedPoem {
            title: "  ".to_string(),
            author: String::new(),
            content: "verse".to_string(),
        };
        let request = build_request(&poem, Path::new("./fonts"), Language::Ru);
        assert_eq!(request.title, "Unknown");
        assert_eq!(request.author, "Unknown");
        assert_eq!(request.content, "verse");
        assert_eq!(request.font_path, PathBuf::from("./fonts/serif_latin.ttf"));
        assert_eq!(request.font_size, 40.0);
    }

    #[tokio::test]
    async fn test_missing_review_file_is_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = Arc::new(CardRenderer::new(Arc::new(FlatPaper)));
        let err = run_produce_step(
            renderer,
            &dir.path().join("absent.json"),
            dir.path(),
            dir.path(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_produce_writes_social_copy_and_survives_font_failures() {
        let dir = tempfile::tempdir().unwrap();
        let review = dir.path().join("review.json");
        std::fs::write(
            &review,
            serde_json::to_string_pretty(&vec![review_record("Elegy")]).unwrap(),
        )
        .unwrap();

        let renderer = Arc::new(CardRenderer::new(Arc::new(FlatPaper)));
        // The fonts directory is empty: cards either fall back to a system font
        // or fail as per-item errors, and the step still completes.
        run_produce_step(renderer, &review, dir.path(), dir.path())
            .await
            .unwrap();

        let card_dir = dir.path().join("Elegy_cards");
        assert!(card_dir.is_dir());
        assert_eq!(
            std::fs::read_to_string(card_dir.join("social_copy.txt")).unwrap(),
            "Six languages, one elegy."
        );
    }
}
