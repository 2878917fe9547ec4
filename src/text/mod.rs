//! Text handling for pasted brewery lists.
//!
//! Input bytes are decoded with one declared encoding, then each field is run
//! through a [`Normalizer`] that folds a fixed set of typographic characters
//! down to plain ASCII.
use thiserror::Error;

pub mod encoding;
pub mod normalizer;

pub use encoding::decode;
pub use encoding::resolve_encoding;
pub use normalizer::Normalizer;

/// Errors raised while decoding input or folding it to ASCII.
#[derive(Error, Debug, PartialEq)]
pub enum EncodingError {
    #[error("Unknown text encoding '{0}'")]
    UnknownEncoding(String),

    #[error("Input is not valid {0} text")]
    Malformed(&'static str),

    #[error("Character '{character}' (U+{code:04X}) at position {position} has no ASCII replacement in '{text}'")]
    Unrepresentable {
        character: char,
        code: u32,
        position: usize,
        text: String,
    },
}
