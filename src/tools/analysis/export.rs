use std::{
    fs::File,
    io::{
        BufWriter,
        Write,
    },
    path::Path,
};

use zip::{
    write::SimpleFileOptions,
    ZipWriter,
};

use crate::core::DaoError;

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Sheet" sheetId="1" r:id="rId1"/></sheets></workbook>"#;

const WORKBOOK_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

/// File name used when an export target is a directory, e.g. `phan_tich_2026-10-19.csv`.
pub fn default_file_name(extension: &str) -> String {
    let date_str = chrono::Utc::now().format("%Y-%m-%d").to_string();
    format!("phan_tich_{}.{}", date_str, extension)
}

/// Export the rendered report as a CSV file, verbatim.
pub fn export_csv(report: &str, output_path: &Path) -> Result<(), DaoError> {
    let file = File::create(output_path)
        .map_err(|e| DaoError::Custom(format!("Failed to create CSV file: {}", e)))?;
    let mut writer = BufWriter::new(file);

    writer
        .write_all(report.as_bytes())
        .map_err(|e| DaoError::Custom(format!("Failed to write CSV file: {}", e)))?;
    writer.flush().map_err(|e| DaoError::Custom(format!("Failed to flush CSV file: {}", e)))?;

    Ok(())
}

/// Export the rendered report as a single-sheet `.xlsx` workbook. Each line becomes a row
/// and each comma-separated field a cell, both 1-indexed from A1.
pub fn export_xlsx(report: &str, output_path: &Path) -> Result<(), DaoError> {
    let file = File::create(output_path)
        .map_err(|e| DaoError::Custom(format!("Failed to create workbook: {}", e)))?;

    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let parts = [
        ("[Content_Types].xml", CONTENT_TYPES_XML.to_string()),
        ("_rels/.rels", ROOT_RELS_XML.to_string()),
        ("xl/workbook.xml", WORKBOOK_XML.to_string()),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS_XML.to_string()),
        ("xl/worksheets/sheet1.xml", sheet_xml(report)),
    ];

    for (name, content) in parts {
        zip.start_file(name, options)
            .map_err(|e| DaoError::Custom(format!("Failed to create {}: {}", name, e)))?;
        zip.write_all(content.as_bytes())
            .map_err(|e| DaoError::Custom(format!("Failed to write {}: {}", name, e)))?;
    }

    zip.finish().map_err(|e| DaoError::Custom(format!("Failed to finalize workbook: {}", e)))?;

    Ok(())
}

fn sheet_xml(report: &str) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );

    for (row_idx, line) in report.lines().enumerate() {
        let row = row_idx + 1;
        xml.push_str(&format!(r#"<row r="{}">"#, row));
        if !line.is_empty() {
            for (col_idx, value) in line.split(',').enumerate() {
                xml.push_str(&format!(
                    r#"<c r="{}{}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                    column_name(col_idx + 1),
                    row,
                    escape_xml(value)
                ));
            }
        }
        xml.push_str("</row>");
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

/// Spreadsheet column letters for a 1-indexed column: 1 -> A, 26 -> Z, 27 -> AA.
pub fn column_name(mut column: usize) -> String {
    let mut letters = Vec::new();
    while column > 0 {
        let remainder = (column - 1) % 26;
        letters.push((b'A' + remainder as u8) as char);
        column = (column - 1) / 26;
    }
    letters.iter().rev().collect()
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
