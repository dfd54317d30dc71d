#![allow(dead_code)]

use std::{
    fs::File,
    io::Write,
    path::{
        Path,
        PathBuf,
    },
};

use tempfile::TempDir;
use zip::{
    write::SimpleFileOptions,
    ZipWriter,
};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

pub fn document_xml(paragraphs: &[&str]) -> String {
    let body: String = paragraphs
        .iter()
        .map(|p| format!(r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#, escape(p)))
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}<w:sectPr/></w:body></w:document>"#,
        body
    )
}

/// Writes a minimal `.docx` whose body holds one paragraph per entry.
pub fn write_docx(path: &Path, paragraphs: &[&str]) {
    let file = File::create(path).expect("create docx");
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(CONTENT_TYPES.as_bytes()).unwrap();
    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(document_xml(paragraphs).as_bytes()).unwrap();
    zip.finish().unwrap();
}

pub struct Fixture {
    tmp: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self { tmp: tempfile::tempdir().expect("create temp dir") }
    }

    pub fn path(&self) -> &Path {
        self.tmp.path()
    }

    pub fn docx(&self, name: &str, paragraphs: &[&str]) -> PathBuf {
        let path = self.tmp.path().join(name);
        write_docx(&path, paragraphs);
        path
    }

    pub fn raw(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.tmp.path().join(name);
        std::fs::write(&path, bytes).expect("write fixture");
        path
    }
}
