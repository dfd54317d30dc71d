use std::{
    borrow::Cow,
    fs::File,
    io::{
        BufReader,
        Read,
    },
    path::Path,
};

use regex::{
    Captures,
    Regex,
};
use zip::{
    result::ZipError,
    ZipArchive,
};

use crate::core::DaoError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Reads the top-level body paragraphs of a `.docx` file.
///
/// Paragraph text is the concatenation of the paragraph's `w:t` runs with XML entities
/// decoded. Only direct children of `w:body` are read: paragraphs nested in tables, text
/// boxes or body-level content controls (`w:sdt`) are skipped.
pub struct DocxReader {
    element_re: Regex,
    entity_re: Regex,
}

impl DocxReader {
    pub fn new() -> Result<Self, DaoError> {
        // Matches opening, closing and self-closing tags of the elements we care about.
        // The trailing \b keeps w:p from matching w:pPr, w:sdt from matching w:sdtContent, and so on.
        let element_re = Regex::new(r"<(/?)w:(p|t|tab|br|cr|tbl|sdt)\b([^>]*)>")?;
        let entity_re = Regex::new(r"&(#x[0-9a-fA-F]+|#[0-9]+|amp|lt|gt|quot|apos);")?;
        Ok(Self { element_re, entity_re })
    }

    pub fn read(&self, path: &Path) -> Result<Vec<String>, DaoError> {
        let file = File::open(path)?;
        let mut archive = ZipArchive::new(BufReader::new(file))?;

        let mut xml = String::new();
        let mut part = archive.by_name(DOCUMENT_PART).map_err(|e| match e {
            ZipError::FileNotFound => DaoError::MissingDocumentPart(DOCUMENT_PART.to_string()),
            other => other.into(),
        })?;
        part.read_to_string(&mut xml)?;

        Ok(self.paragraphs(&xml))
    }

    pub fn paragraphs(&self, xml: &str) -> Vec<String> {
        let mut paragraphs = Vec::new();
        let mut current: Option<String> = None;
        let mut paragraph_depth = 0usize;
        // Tables, plus content controls that wrap whole paragraphs.
        let mut container_depth = 0usize;
        let mut text_start: Option<usize> = None;

        for caps in self.element_re.captures_iter(xml) {
            let whole = caps.get(0).map(|m| (m.start(), m.end())).unwrap_or_default();
            let closing = &caps[1] == "/";
            let self_closing = caps[3].trim_end().ends_with('/');
            let collecting = paragraph_depth == 1 && current.is_some();

            match (&caps[2], closing) {
                ("tbl", false) if !self_closing => container_depth += 1,
                ("tbl", true) => container_depth = container_depth.saturating_sub(1),
                ("sdt", false) if !self_closing && paragraph_depth == 0 => container_depth += 1,
                ("sdt", true) if paragraph_depth == 0 => container_depth = container_depth.saturating_sub(1),
                ("p", false) => {
                    let top_level = paragraph_depth == 0 && container_depth == 0;
                    if self_closing {
                        if top_level {
                            paragraphs.push(String::new());
                        }
                    } else {
                        if top_level {
                            current = Some(String::new());
                        }
                        paragraph_depth += 1;
                    }
                }
                ("p", true) => {
                    if paragraph_depth == 1 {
                        if let Some(text) = current.take() {
                            paragraphs.push(text);
                        }
                    }
                    paragraph_depth = paragraph_depth.saturating_sub(1);
                    text_start = None;
                }
                ("t", false) => {
                    text_start = (collecting && !self_closing).then_some(whole.1);
                }
                ("t", true) => {
                    if let (Some(start), Some(text)) = (text_start.take(), current.as_mut()) {
                        if collecting {
                            text.push_str(&self.decode_entities(&xml[start..whole.0]));
                        }
                    }
                }
                ("tab", false) if collecting => {
                    if let Some(text) = current.as_mut() {
                        text.push('\t');
                    }
                }
                ("br" | "cr", false) if collecting => {
                    if let Some(text) = current.as_mut() {
                        text.push('\n');
                    }
                }
                _ => {}
            }
        }

        paragraphs
    }

    fn decode_entities<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        self.entity_re.replace_all(raw, |caps: &Captures| {
            let entity = &caps[1];
            match entity {
                "amp" => "&".to_string(),
                "lt" => "<".to_string(),
                "gt" => ">".to_string(),
                "quot" => "\"".to_string(),
                "apos" => "'".to_string(),
                _ => {
                    let code = match entity.strip_prefix("#x") {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => entity[1..].parse::<u32>().ok(),
                    };
                    code.and_then(char::from_u32)
                        .map(String::from)
                        .unwrap_or_else(|| caps[0].to_string())
                }
            }
        })
    }
}
