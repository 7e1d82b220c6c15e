pub mod json_compact;
pub mod ta;

pub use json_compact::JsonCompactFormatter;
pub use ta::TaFormatter;

use sha2::{Digest, Sha256};
use std::borrow::Cow;

/// How graph identifiers are written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdMode {
    #[default]
    Verbatim,
    /// Every identifier is replaced by its SHA-256 digest.
    Anonymized,
}

impl IdMode {
    pub fn from_flag(anonymize: bool) -> Self {
        if anonymize {
            Self::Anonymized
        } else {
            Self::Verbatim
        }
    }

    pub fn render<'a>(self, id: &'a str) -> Cow<'a, str> {
        match self {
            Self::Verbatim => Cow::Borrowed(id),
            Self::Anonymized => Cow::Owned(digest(id)),
        }
    }
}

/// Lowercase hex SHA-256 of `id`, always 64 characters.
pub fn digest(id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(id.as_bytes());
    format!("{:x}", hasher.finalize())
}
