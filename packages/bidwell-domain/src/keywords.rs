use std::collections::HashSet;

use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

/// Splits free text into lowercase word tokens with at least `min_chars` characters.
///
/// Tokens keep first-seen order and are de-duplicated.
pub fn extract_keywords(text: &str, min_chars: usize) -> Vec<String> {
	let normalized: String = text.nfkc().collect();
	let mut seen = HashSet::new();
	let mut out = Vec::new();

	for word in normalized.unicode_words() {
		if word.chars().count() < min_chars {
			continue;
		}

		let token = word.to_lowercase();

		if seen.insert(token.clone()) {
			out.push(token);
		}
	}

	out
}

pub fn fold(value: &str) -> String {
	value.nfkc().collect::<String>().trim().to_lowercase()
}

/// Case-insensitive overlap between a candidate's keyword list and extracted tokens.
pub fn overlaps(keywords: &[String], tokens: &[String]) -> bool {
	if keywords.is_empty() || tokens.is_empty() {
		return false;
	}

	let tokens: HashSet<&str> = tokens.iter().map(String::as_str).collect();

	keywords.iter().any(|keyword| tokens.contains(fold(keyword).as_str()))
}
