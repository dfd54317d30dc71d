mod common;

use std::sync::{
    atomic::{
        AtomicBool,
        Ordering,
    },
    Arc,
    Mutex,
};

use common::Fixture;
use phantichdao::{
    analyze_folder,
    core::pipeline::ProgressCallback,
    tools::analysis::{
        models::{
            format_percentage,
            RunPhase,
            DEFAULT_REPORT_TITLE,
        },
        AnalysisOptions,
        AnalysisOutcome,
        AnalysisResult,
        MAX_DOCUMENTS,
        MILESTONES,
    },
    DaoError,
};

fn run(fixture: &Fixture) -> AnalysisOutcome {
    analyze_folder(fixture.path(), &AnalysisOptions::default(), None, None).expect("analysis runs")
}

fn success(fixture: &Fixture) -> AnalysisResult {
    match run(fixture) {
        AnalysisOutcome::Success(result) => result,
        other => panic!("Expected success, got {:?}", other),
    }
}

#[test]
fn empty_folder_has_no_documents() {
    let fixture = Fixture::new();
    fixture.raw("notes.txt", b"123");

    assert!(matches!(run(&fixture), AnalysisOutcome::NoDocumentsFound));
}

#[test]
fn missing_folder_fails() {
    let fixture = Fixture::new();
    let missing = fixture.path().join("missing");

    let err = analyze_folder(&missing, &AnalysisOptions::default(), None, None).unwrap_err();
    assert!(matches!(err, DaoError::FolderNotFound(_)));
    assert!(matches!(AnalysisOutcome::from(err), AnalysisOutcome::Failed(_)));
}

#[test]
fn single_document_lines() {
    let fixture = Fixture::new();
    fixture.docx("ket_qua.docx", &["Giải: 123", "abc", "45678"]);

    let result = success(&fixture);
    assert_eq!(result.documents, vec!["ket_qua.docx"]);
    assert_eq!(result.milestones, MILESTONES.to_vec());

    for top in &result.top_lists {
        assert_eq!(top.files_considered, 1);
        assert_eq!(top.total_entries, 2);
        let keys: Vec<&str> = top.keys().collect();
        assert_eq!(keys, vec!["123", "678"]);
    }

    let keys: Vec<&str> = result.summary_rows.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, vec!["123", "678"]);
    assert!(result.warnings.is_empty());
}

#[test]
fn six_documents_fill_windows_from_the_end() {
    let fixture = Fixture::new();
    for i in 1..=6 {
        fixture.docx(&format!("ky_{:02}.docx", i), &["Giải đặc biệt", "512"]);
    }

    let result = success(&fixture);
    let first = &result.top_lists[0];
    assert_eq!(first.milestone, 5);
    assert_eq!(first.total_entries, 5);
    assert_eq!(first.entries.len(), 1);
    assert_eq!(first.entries[0].key, "125");
    assert_eq!(first.entries[0].count, 5);

    let last = &result.top_lists[3];
    assert_eq!(last.milestone, 20);
    assert_eq!(last.files_considered, 6);
    assert_eq!(last.entries[0].count, 6);
    assert_eq!(last.total_entries, 6);

    assert_eq!(result.summary_rows.len(), 1);
    assert_eq!(result.summary_rows[0].fields(), vec![
        "125", "5", "100.00%", "6", "100.00%", "6", "100.00%", "6", "100.00%"
    ]);
}

#[test]
fn only_the_last_documents_by_name_are_used() {
    let fixture = Fixture::new();
    for i in 0..(MAX_DOCUMENTS + 4) {
        let name = if i % 3 == 0 { format!("KY_{:02}.DOCX", i) } else { format!("ky_{:02}.docx", i) };
        fixture.docx(&name, &[format!("{:03}", i).as_str()]);
    }

    let result = success(&fixture);
    assert_eq!(result.documents.len(), MAX_DOCUMENTS);
    assert_eq!(result.documents[0].to_lowercase(), "ky_04.docx");
    assert_eq!(result.documents.last().unwrap().to_lowercase(), "ky_33.docx");
}

#[test]
fn windows_are_nested() {
    let fixture = Fixture::new();
    let groups = ["123", "321", "456", "789", "987", "111", "654", "213", "999", "132"];
    for i in 0..22 {
        let a = groups[i % groups.len()];
        let b = groups[(i * 7 + 3) % groups.len()];
        fixture.docx(&format!("ky_{:02}.docx", i), &[a, "không số", b]);
    }

    let result = success(&fixture);
    for pair in result.top_lists.windows(2) {
        assert!(pair[0].total_entries <= pair[1].total_entries);
        assert!(pair[0].files_considered <= pair[1].files_considered);
    }
    for row in &result.summary_rows {
        for pair in row.cells.windows(2) {
            assert!(pair[0].count <= pair[1].count);
        }
        for cell in &row.cells {
            assert!((0.0..=100.0).contains(&cell.percentage));
        }
    }

    let mut seen = std::collections::HashSet::new();
    assert!(result.summary_rows.iter().all(|row| seen.insert(row.key.clone())));
}

#[test]
fn unreadable_documents_become_warnings() {
    let fixture = Fixture::new();
    fixture.docx("a.docx", &["111"]);
    fixture.raw("b.docx", b"this is not a zip archive");
    fixture.docx("c.docx", &["222"]);

    let result = success(&fixture);
    assert_eq!(result.documents, vec!["a.docx", "b.docx", "c.docx"]);
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].document, "b.docx");
    assert_eq!(result.top_lists[0].total_entries, 2);
}

#[test]
fn documents_without_numbers_have_no_analyzable_data() {
    let fixture = Fixture::new();
    fixture.docx("a.docx", &["Kết quả xổ số", "Giải 12"]);
    fixture.docx("b.docx", &[]);

    match run(&fixture) {
        AnalysisOutcome::NoAnalyzableData { report, warnings } => {
            assert!(warnings.is_empty());
            assert!(report.starts_with(DEFAULT_REPORT_TITLE));
            assert_eq!(report.matches("(khong co du lieu)").count(), MILESTONES.len());
            assert!(report.ends_with("Khong co du lieu 3-chu-so de phan tich."));
        }
        other => panic!("Expected NoAnalyzableData, got {:?}", other),
    }
}

#[test]
fn report_rows_split_back_into_summary_fields() {
    let fixture = Fixture::new();
    fixture.docx("a.docx", &["123", "456", "654", "777"]);
    fixture.docx("b.docx", &["231", "777", "890"]);

    let result = success(&fixture);
    let lines: Vec<&str> = result.report.lines().collect();
    let table_start = lines.len() - result.summary_rows.len();

    for (line, row) in lines[table_start..].iter().zip(&result.summary_rows) {
        let fields: Vec<String> = line.split(',').map(String::from).collect();
        assert_eq!(fields, row.fields());
    }

    assert_eq!(lines[table_start - 1], "NhomDao,5ky_SoLan,5ky_TyLe,10ky_SoLan,10ky_TyLe,15ky_SoLan,15ky_TyLe,20ky_SoLan,20ky_TyLe");
    assert_eq!(format_percentage(result.top_lists[0].entries[0].percentage), "28.57%");
}

#[test]
fn custom_title_heads_the_report() {
    let fixture = Fixture::new();
    fixture.docx("a.docx", &["123"]);

    let options = AnalysisOptions { report_title: "KET QUA".to_string() };
    match analyze_folder(fixture.path(), &options, None, None).unwrap() {
        AnalysisOutcome::Success(result) => assert!(result.report.starts_with("KET QUA\n\nMOC 5 KY")),
        other => panic!("Expected success, got {:?}", other),
    }
}

#[test]
fn cancelled_run_yields_no_result() {
    let fixture = Fixture::new();
    fixture.docx("a.docx", &["123"]);

    let cancel = Arc::new(AtomicBool::new(true));
    let result = analyze_folder(fixture.path(), &AnalysisOptions::default(), None, Some(cancel));
    assert!(matches!(result, Err(DaoError::Cancelled)));
}

#[test]
fn cancel_between_documents_stops_the_run() {
    let fixture = Fixture::new();
    fixture.docx("a.docx", &["123"]);
    fixture.docx("b.docx", &["456"]);
    fixture.docx("c.docx", &["789"]);

    let cancel = Arc::new(AtomicBool::new(false));
    let phases = Arc::new(Mutex::new(Vec::new()));
    let (flag, sink) = (cancel.clone(), phases.clone());
    let callback: ProgressCallback = Box::new(move |phase| {
        if matches!(phase, RunPhase::Extracting { current: 1, .. }) {
            flag.store(true, Ordering::Relaxed);
        }
        sink.lock().unwrap().push(phase);
    });

    let result = analyze_folder(fixture.path(), &AnalysisOptions::default(), Some(callback), Some(cancel));
    assert!(matches!(result, Err(DaoError::Cancelled)));

    let phases = phases.lock().unwrap();
    assert_eq!(*phases, vec![
        RunPhase::Scanning,
        RunPhase::Extracting { current: 1, total: 3, document: "a.docx".to_string() },
    ]);
}

#[test]
fn fractions_and_roman_numerals_are_not_digits() {
    let fixture = Fixture::new();
    fixture.docx("a.docx", &["Giải ½ 12", "Ⅻ 45", "Giải 〇 9"]);

    assert!(matches!(run(&fixture), AnalysisOutcome::NoAnalyzableData { .. }));
}

#[test]
fn progress_follows_the_run_phases() {
    let fixture = Fixture::new();
    fixture.docx("a.docx", &["123"]);
    fixture.docx("b.docx", &["456"]);

    let phases = Arc::new(Mutex::new(Vec::new()));
    let sink = phases.clone();
    let callback: ProgressCallback = Box::new(move |phase| sink.lock().unwrap().push(phase));

    let outcome = analyze_folder(fixture.path(), &AnalysisOptions::default(), Some(callback), None).unwrap();
    assert!(matches!(outcome, AnalysisOutcome::Success(_)));

    let phases = phases.lock().unwrap();
    assert_eq!(*phases, vec![
        RunPhase::Scanning,
        RunPhase::Extracting { current: 1, total: 2, document: "a.docx".to_string() },
        RunPhase::Extracting { current: 2, total: 2, document: "b.docx".to_string() },
        RunPhase::Aggregating,
        RunPhase::Ranking,
        RunPhase::Done,
    ]);
}
