use lazy_static::lazy_static;
use regex::Regex;

use super::dto::CatalogItem;

const LONG_SECTION_CHARS: usize = 400;
const CHUNK_CHARS: usize = 250;

/// Items to show for a search box: recommendations while the query is empty,
/// otherwise every catalog item whose name contains the query (any case).
pub fn search<'a>(
    query: &str,
    recommended: &'a [CatalogItem],
    all: &'a [CatalogItem],
) -> Vec<&'a CatalogItem> {
    let query = query.to_lowercase();
    if query.is_empty() {
        return recommended.iter().collect();
    }
    all.iter()
        .filter(|item| item.name.to_lowercase().contains(&query))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RationaleSection {
    Heading(String),
    Paragraph(String),
}

/// Splits the free-text rationale returned by `/classify` into display sections.
pub fn rationale_sections(text: &str) -> Vec<RationaleSection> {
    lazy_static! {
        static ref NUMBERING_RE: Regex = Regex::new(r"(?m)^\d+\.\s?").unwrap();
    }
    let cleaned = NUMBERING_RE.replace_all(text, "");

    let mut sections = Vec::new();
    for raw in cleaned.split("\n\n") {
        let section = raw.trim();
        if section.is_empty() {
            continue;
        }
        let lower = section.to_lowercase();
        if lower.contains("eco-score summary") || lower.contains("recommendation") {
            sections.push(RationaleSection::Heading(section.to_string()));
        } else if section.chars().count() > LONG_SECTION_CHARS {
            sections.extend(
                chunk_sentences(section)
                    .into_iter()
                    .map(RationaleSection::Paragraph),
            );
        } else {
            sections.push(RationaleSection::Paragraph(section.to_string()));
        }
    }
    sections
}

fn chunk_sentences(section: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    for sentence in section.split_inclusive(". ") {
        if !current.is_empty()
            && current.chars().count() + sentence.chars().count() >= CHUNK_CHARS
        {
            chunks.push(current.trim().to_string());
            current.clear();
        }
        current.push_str(sentence);
    }
    if !current.trim().is_empty() {
        chunks.push(current.trim().to_string());
    }
    chunks
}
