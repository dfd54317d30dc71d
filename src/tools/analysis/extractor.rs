use regex::Regex;

use crate::core::{
    DaoError,
    Token,
};

/// Pulls 3-digit tokens out of paragraph text.
///
/// Only decimal digits (Unicode `Nd`) count, so full-width digits are kept while fractions,
/// Roman numerals and other numeric symbols are ignored.
pub struct TokenExtractor {
    digit_re: Regex,
}

impl TokenExtractor {
    pub fn new() -> Result<Self, DaoError> {
        let digit_re = Regex::new(r"\p{Nd}")?;
        Ok(Self { digit_re })
    }

    /// Keeps only the decimal digits of `text`, in order.
    pub fn keep_digits(&self, text: &str) -> String {
        self.digit_re.find_iter(text).map(|m| m.as_str()).collect()
    }

    /// The token carried by one paragraph, if it has at least three digits.
    pub fn extract_token(&self, paragraph: &str) -> Option<Token> {
        Token::from_digits(&self.keep_digits(paragraph.trim()))
    }

    /// Tokens of a whole document, in paragraph order. Paragraphs with fewer than three
    /// digits contribute nothing.
    pub fn extract_tokens<S: AsRef<str>>(&self, paragraphs: &[S]) -> Vec<Token> {
        paragraphs.iter().filter_map(|p| self.extract_token(p.as_ref())).collect()
    }
}
