//! ASCII folding for brewery names and locations.

use crate::text::EncodingError;
use std::collections::HashMap;

/// Characters pasted from web pages and their ASCII replacements.
pub const DEFAULT_SUBSTITUTIONS: &[(char, char)] = &[
    ('\u{201C}', '"'),  // left double quotation mark
    ('\u{2019}', '\''), // right single quotation mark
    ('\u{2013}', '-'),  // en dash
    ('\u{00E9}', 'e'),  // latin small letter e with acute
];

/// Maps a fixed set of non-ASCII characters to ASCII replacements.
///
/// Any other non-ASCII character is rejected rather than dropped, so the
/// output is always pure ASCII.
#[derive(Clone, Debug)]
pub struct Normalizer {
    table: HashMap<char, char>,
}

impl Normalizer {
    /// Creates a normalizer from a substitution table.
    pub fn new(substitutions: &[(char, char)]) -> Self {
        Self {
            table: substitutions.iter().copied().collect(),
        }
    }

    /// Replaces every mapped character in `text` and checks the result is ASCII.
    pub fn normalize(&self, text: &str) -> Result<String, EncodingError> {
        let mut normalized = String::with_capacity(text.len());
        for (position, character) in text.chars().enumerate() {
            let character = self.table.get(&character).copied().unwrap_or(character);
            if !character.is_ascii() {
                return Err(EncodingError::Unrepresentable {
                    character,
                    code: character as u32,
                    position,
                    text: text.to_owned(),
                });
            }
            normalized.push(character);
        }
        Ok(normalized)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_SUBSTITUTIONS)
    }
}
