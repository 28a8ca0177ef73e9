//! Closed-class pronoun lexicon.
//!
//! Gender is only ever read off pronouns. Singular "they" and the common
//! neopronoun sets (xe/xem, ze/zir, ey/em, fae/faer) are person pronouns
//! without a binary gender, so they map to [`Gender::Unknown`] rather than
//! to either `Male` or `Female`.

use anno_coref_core::{Gender, Number};

const MASCULINE: &[&str] = &["he", "him", "his", "himself"];
const FEMININE: &[&str] = &["she", "her", "hers", "herself"];
const NEUTER: &[&str] = &["it", "its", "itself"];
const NEUTRAL_PERSON: &[&str] = &[
    "they", "them", "their", "theirs", "themselves", "themself",
    "xe", "xem", "xyr", "xyrs", "xemself",
    "ze", "hir", "zir", "hirs", "zirs", "hirself", "zirself",
    "ey", "em", "eir", "eirs", "emself",
    "fae", "faer", "faers", "faeself",
];
const FIRST_SECOND_SINGULAR: &[&str] = &[
    "i", "me", "my", "mine", "myself", "you", "your", "yours", "yourself",
];
const FIRST_PLURAL: &[&str] = &["we", "us", "our", "ours", "ourselves", "yourselves"];
const THEY_FORMS: &[&str] = &["they", "them", "their", "theirs", "themselves"];

fn contains(table: &[&str], word: &str) -> bool {
    table.iter().any(|w| *w == word)
}

/// Lowercased single word, or `None` for multi-word text.
fn normalize(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.contains(char::is_whitespace) {
        return None;
    }
    Some(trimmed.to_lowercase())
}

/// Check if text is a pronoun.
#[must_use]
pub fn is_pronoun(text: &str) -> bool {
    normalize(text).is_some_and(|w| {
        contains(MASCULINE, &w)
            || contains(FEMININE, &w)
            || contains(NEUTER, &w)
            || contains(NEUTRAL_PERSON, &w)
            || contains(FIRST_SECOND_SINGULAR, &w)
            || contains(FIRST_PLURAL, &w)
    })
}

/// Gender signalled by a pronoun. `None` for anything that is not a
/// third-person pronoun.
#[must_use]
pub fn pronoun_gender(text: &str) -> Option<Gender> {
    let w = normalize(text)?;
    if contains(MASCULINE, &w) {
        Some(Gender::Male)
    } else if contains(FEMININE, &w) {
        Some(Gender::Female)
    } else if contains(NEUTER, &w) {
        Some(Gender::Neuter)
    } else if contains(NEUTRAL_PERSON, &w) {
        Some(Gender::Unknown)
    } else {
        None
    }
}

/// Number signalled by a pronoun. `None` if not a pronoun.
///
/// The "they" forms are reported plural; callers should give that reading a
/// lower confidence since singular "they" is common.
#[must_use]
pub fn pronoun_number(text: &str) -> Option<Number> {
    let w = normalize(text)?;
    if contains(THEY_FORMS, &w) || contains(FIRST_PLURAL, &w) {
        Some(Number::Plural)
    } else if contains(MASCULINE, &w)
        || contains(FEMININE, &w)
        || contains(NEUTER, &w)
        || contains(NEUTRAL_PERSON, &w)
        || contains(FIRST_SECOND_SINGULAR, &w)
    {
        Some(Number::Singular)
    } else {
        None
    }
}

/// Whether a pronoun is ambiguous between singular and plural ("they").
#[must_use]
pub fn is_they_form(text: &str) -> bool {
    normalize(text).is_some_and(|w| contains(THEY_FORMS, &w))
}

/// he / she / it and neopronouns, excluding "they" forms.
#[must_use]
pub fn is_singular_third_person(text: &str) -> bool {
    normalize(text).is_some_and(|w| {
        contains(MASCULINE, &w)
            || contains(FEMININE, &w)
            || contains(NEUTER, &w)
            || (contains(NEUTRAL_PERSON, &w) && !contains(THEY_FORMS, &w))
    })
}
