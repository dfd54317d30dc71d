use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub title: String,      // File name, used for ordering and warnings
    pub path: PathBuf,      // Full path on disk
}

/// The last three digits of a qualifying paragraph, in their original order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    /// Builds a token from a digit string, keeping only its last three characters.
    /// Returns `None` when fewer than three characters are available.
    pub fn from_digits(digits: &str) -> Option<Self> {
        let count = digits.chars().count();
        if count < 3 {
            return None;
        }
        Some(Token(digits.chars().skip(count - 3).collect()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn canonical_key(&self) -> String {
        canonical_key(&self.0)
    }
}

/// Sorts the last three characters of `token` ascending so every permutation of the same
/// digits maps to one group key. Inputs shorter than three characters come back unchanged.
pub fn canonical_key(token: &str) -> String {
    let count = token.chars().count();
    if count < 3 {
        return token.to_string();
    }

    let mut digits: Vec<char> = token.chars().skip(count - 3).collect();
    digits.sort_unstable();
    digits.into_iter().collect()
}

/// Tokens extracted from one document, in paragraph order.
#[derive(Debug, Clone, Default)]
pub struct FileEntries {
    pub document: String,
    pub tokens: Vec<Token>,
}
