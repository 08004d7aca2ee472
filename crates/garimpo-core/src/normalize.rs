//! Language-aware cleanup of free-text search terms and location predicates.
//!
//! Sources differ in what they expect: some take the location as a separate
//! parameter (so it must be stripped from the keywords), some index mostly
//! English titles (so Portuguese role words are translated), and some have no
//! country filter at all (so results are scoped by a fixed pattern).

use std::sync::LazyLock;

use regex::Regex;

use crate::models::JobCandidate;

/// Free-standing tokens meaning "remote" or the country, removed from
/// keywords before querying sources that take location separately.
const LOCATION_TOKENS: &[&str] = &["remoto", "remota", "remote", "brasil", "brazil"];

/// Fixed PT→EN dictionary of role words, applied word-by-word.
const ROLE_TRANSLATIONS: &[(&str, &str)] = &[
    ("desenvolvedor", "developer"),
    ("desenvolvedora", "developer"),
    ("desenvolvimento", "development"),
    ("programador", "programmer"),
    ("programadora", "programmer"),
    ("engenheiro", "engineer"),
    ("engenheira", "engineer"),
    ("engenharia", "engineering"),
    ("estagiário", "intern"),
    ("estagiario", "intern"),
    ("estágio", "internship"),
    ("estagio", "internship"),
    ("júnior", "junior"),
    ("pleno", "mid-level"),
    ("sênior", "senior"),
    ("analista", "analyst"),
    ("cientista", "scientist"),
    ("dados", "data"),
    ("segurança", "security"),
    ("seguranca", "security"),
    ("testes", "testing"),
    ("vaga", "job"),
    ("vagas", "jobs"),
];

/// Country/region/major-city/"remote" synonyms. Stricter than the generic
/// location predicate; used by sources with no native country filter.
static BRAZIL_SCOPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(brasil|brazil|remoto|remote|anywhere|worldwide|global|latam|latin america|américa latina|são paulo|sao paulo|rio de janeiro|belo horizonte|brasília|brasilia|recife|porto alegre|curitiba|salvador|fortaleza|campinas|florianópolis|florianopolis)\b",
    )
    .expect("valid location pattern")
});

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Remove free-standing remote/country tokens from a keyword string.
///
/// May return an empty string when every token was a location token; callers
/// fall back to the original keywords in that case.
pub fn strip_location_tokens(keywords: &str) -> String {
    keywords
        .split_whitespace()
        .filter(|word| {
            let lower = word.to_lowercase();
            !LOCATION_TOKENS.contains(&lower.as_str())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Translate Portuguese role words to English, word-by-word, case-insensitive,
/// whole-word only. Unknown words pass through untouched.
pub fn translate_keywords(keywords: &str) -> String {
    keywords
        .split_whitespace()
        .map(|word| {
            let lower = word.to_lowercase();
            ROLE_TRANSLATIONS
                .iter()
                .find(|(pt, _)| *pt == lower)
                .map(|(_, en)| *en)
                .unwrap_or(word)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The query forms a translation-sensitive source should run: the original,
/// plus the translated form when it differs. Results are merged and
/// deduplicated later by URL.
pub fn query_variants(keywords: &str) -> Vec<String> {
    let translated = translate_keywords(keywords);
    if translated.eq_ignore_ascii_case(keywords) {
        vec![keywords.to_string()]
    } else {
        vec![keywords.to_string(), translated]
    }
}

/// Last-mile location filter applied by the orchestrator to the merged set:
/// an empty target matches everything; otherwise the target must appear as a
/// case-insensitive substring of the candidate's location, title or
/// description.
pub fn candidate_matches_location(candidate: &JobCandidate, target: &str) -> bool {
    if target.is_empty() {
        return true;
    }
    let needle = target.to_lowercase();
    candidate.location.to_lowercase().contains(&needle)
        || candidate.title.to_lowercase().contains(&needle)
        || candidate.description.to_lowercase().contains(&needle)
}

/// True when a location string names Brazil, a major Brazilian city, or a
/// remote-friendly scope.
pub fn location_in_brazil_scope(location: &str) -> bool {
    BRAZIL_SCOPE.is_match(location)
}

/// Strip HTML tags and collapse whitespace. Used to clean descriptions
/// before handing them to the summarizer.
pub fn strip_html(text: &str) -> String {
    let stripped = HTML_TAG.replace_all(text, " ");
    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}
