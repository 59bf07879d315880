//! Font loading and the per-language font table.

use std::path::Path;

use ab_glyph::FontArc;
use tracing::warn;

use crate::errors::AppError;
use crate::localization::Language;

/// Font file used for each card language, resolved against the configured
/// fonts directory. The four Latin-script languages share one serif face.
pub fn font_file(lang: Language) -> &'static str {
    match lang {
        Language::ZhCn => "serif_cn.ttf",
        Language::ZhTw => "serif_tw.ttf",
        Language::En | Language::Fr | Language::De | Language::Ru => "serif_latin.ttf",
    }
}

/// Common system font locations probed when a card font is missing.
const FALLBACK_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSerif-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSerif-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial Unicode.ttf", // macOS
    "C:/Windows/Fonts/arial.ttf",                           // Windows
];

/// Loads and parses one font file.
pub fn load_font(path: &Path) -> Result<FontArc, AppError> {
    let bytes = std::fs::read(path)
        .map_err(|e| AppError::Asset(format!("cannot read font {}: {e}", path.display())))?;
    FontArc::try_from_vec(bytes)
        .map_err(|e| AppError::Asset(format!("cannot parse font {}: {e}", path.display())))
}

/// Finds any usable system font for degraded rendering.
pub fn fallback_font() -> Result<FontArc, AppError> {
    for candidate in FALLBACK_FONT_PATHS {
        let path = Path::new(candidate);
        if path.exists() {
            if let Ok(font) = load_font(path) {
                return Ok(font);
            }
        }
    }
    Err(AppError::Asset(
        "no usable fallback font found on this system".to_string(),
    ))
}

/// Resolves the font for one render call.
///
/// A missing or corrupt card font degrades to a system fallback instead of
/// failing the render; the substitution is logged so the operator can fix the
/// asset. Only when no fallback exists either does the call fail.
pub fn resolve_font(path: &Path) -> Result<FontArc, AppError> {
    match load_font(path) {
        Ok(font) => Ok(font),
        Err(e) => {
            warn!("Falling back to a system font: {e}");
            fallback_font()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_font_file_per_language() {
        assert_eq!(font_file(Language::ZhCn), "serif_cn.ttf");
        assert_eq!(font_file(Language::ZhTw), "serif_tw.ttf");
        for lang in [Language::En, Language::Fr, Language::De, Language::Ru] {
            assert_eq!(font_file(lang), "serif_latin.ttf");
        }
    }

    #[test]
    fn test_load_font_missing_file_is_asset_error() {
        let err = load_font(Path::new("definitely/not/here.ttf")).unwrap_err();
        assert!(matches!(err, AppError::Asset(_)), "got {err:?}");
    }

    #[test]
    fn test_load_font_rejects_non_font_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"this is not a font").unwrap();
        let err = load_font(file.path()).unwrap_err();
        assert!(matches!(err, AppError::Asset(_)), "got {err:?}");
    }

    #[test]
    fn test_resolve_font_substitutes_fallback() {
        // Only meaningful on hosts with at least one system font installed.
        if fallback_font().is_err() {
            return;
        }
        let font = resolve_font(Path::new("definitely/not/here.ttf"));
        assert!(font.is_ok());
    }
}
