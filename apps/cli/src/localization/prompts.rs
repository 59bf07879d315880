// All LLM prompt constants for the localization module.
// Reuses the cross-cutting JSON-only fragment from llm_client::prompts.

/// System prompt for the six-language poem fetch.
pub const LOCALIZE_SYSTEM: &str = r#"You are a senior poetry editor fluent in many languages. Given a poem title and author, retrieve the poem in 6 language versions.

Core requirements:
1. FULL LOCALIZATION: translate not only the title and content but ALSO the author's name into each target language.
   - The French version must use the French spelling (e.g. "Alexandre Pouchkine").
   - The Russian version must use the Russian spelling (e.g. "Александр Пушкин").
   - The traditional Chinese version must use traditional characters.
2. ACCURACY FIRST: retrieve the authoritative original text where one exists; translate faithfully otherwise.
3. CLEAN FORMAT: content holds verse lines only. Do NOT repeat the title inside content.

Return a JSON object with this EXACT schema (no extra fields):
{
  "zh_cn": {"title": "简体中文标题", "author": "简体中文作者名", "content": "..."},
  "zh_tw": {"title": "繁體中文標題", "author": "繁體中文作者名", "content": "..."},
  "en": {"title": "English Title", "author": "English Author Name", "content": "..."},
  "fr": {"title": "Titre français", "author": "Auteur français", "content": "..."},
  "de": {"title": "Deutscher Titel", "author": "Deutscher Autor", "content": "..."},
  "ru": {"title": "Русское название", "author": "Русский автор", "content": "..."},
  "social_copy": "a short social media caption introducing the poem"
}

Inside each content field, separate stanzas and verse lines with newline characters."#;

/// User prompt template. Replace `{title}` and `{author}` before sending.
pub const LOCALIZE_PROMPT_TEMPLATE: &str = "Process the poem \"{title}\" by {author}. \
    Make sure the output covers the title, the localized author name, and the full content \
    for all 6 languages.";

/// Builds the user prompt for one (title, author) pair.
pub(crate) fn build_localize_prompt(title: &str, author: &str) -> String {
    LOCALIZE_PROMPT_TEMPLATE
        .replace("{title}", title)
        .replace("{author}", author)
}
