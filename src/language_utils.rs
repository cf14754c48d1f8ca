use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// Validates the language pair of a translation request and turns codes into
/// display names for prompts. ISO 639-1 (2-letter) and ISO 639-2 (3-letter,
/// both /T and /B) codes are accepted, optionally followed by region or script
/// subtags (`pt-br`, `zh_CN`, `sr-latn`). Only the primary subtag is checked.
/// Language code type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-2/T (3-letter) code
    Part2T,
    /// ISO 639-2/B (3-letter) code
    Part2B,
}

// ISO 639-2/B codes that differ from their /T counterpart
const PART2B_TO_PART2T: &[(&str, &str)] = &[
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("dut", "nld"),
    ("fre", "fra"),
    ("geo", "kat"),
    ("ger", "deu"),
    ("gre", "ell"),
    ("ice", "isl"),
    ("mac", "mkd"),
    ("may", "msa"),
    ("per", "fas"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

/// Split a code into its primary subtag and the lowercased rest, if any
fn split_subtags(code: &str) -> (String, Option<String>) {
    let normalized = code.trim().to_lowercase().replace('_', "-");
    match normalized.split_once('-') {
        Some((primary, rest)) => (primary.to_string(), Some(rest.to_string())),
        None => (normalized, None),
    }
}

fn resolve(code: &str) -> Option<(Language, LanguageCodeType)> {
    let (normalized, _) = split_subtags(code);
    match normalized.len() {
        2 => Language::from_639_1(&normalized).map(|lang| (lang, LanguageCodeType::Part1)),
        3 => Language::from_639_3(&normalized)
            .map(|lang| (lang, LanguageCodeType::Part2T))
            .or_else(|| {
                PART2B_TO_PART2T
                    .iter()
                    .find(|(b, _)| *b == normalized)
                    .and_then(|(_, t)| Language::from_639_3(t))
                    .map(|lang| (lang, LanguageCodeType::Part2B))
            }),
        _ => None,
    }
}

/// Validate if a language code is a valid ISO 639-1 or ISO 639-2 code
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    resolve(code)
        .map(|(_, kind)| kind)
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Normalize a language code to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    resolve(code)
        .map(|(lang, _)| lang.to_639_3().to_string())
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Get the English name of a language from its code
pub fn get_language_name(code: &str) -> Result<String> {
    resolve(code)
        .map(|(lang, _)| lang.to_name().to_string())
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Check if two language codes refer to the same language and variant
///
/// `pt-br` and `pt-pt` differ, `fr` and `fre` match.
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (resolve(code1), resolve(code2)) {
        (Some((a, _)), Some((b, _))) => a == b && split_subtags(code1).1 == split_subtags(code2).1,
        _ => false,
    }
}
