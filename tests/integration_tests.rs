//! Integration tests for the resume analyzer

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Object, Stream};
use resume_analyzer::config::OutputFormat;
use resume_analyzer::input::manager::InputManager;
use resume_analyzer::ner::gazetteer::SkillGazetteer;
use resume_analyzer::output::{AnalysisReport, ReportGenerator, ReportMetadata};
use resume_analyzer::processing::scorer::TfidfScorer;
use resume_analyzer::{ResumeAnalyzer, ResumeAnalyzerError};
use std::io::{Cursor, Write};
use std::path::Path;
use std::sync::Arc;
use zip::write::SimpleFileOptions;

fn analyzer() -> ResumeAnalyzer {
    ResumeAnalyzer::new(Arc::new(SkillGazetteer::new().unwrap()), Box::new(TfidfScorer::new()))
}

fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>", p))
        .collect();
    build_docx_body(&body)
}

fn build_docx_body(body: &str) -> Vec<u8> {
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    );

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    writer.start_file("[Content_Types].xml", options).unwrap();
    writer.write_all(b"<?xml version=\"1.0\"?><Types/>").unwrap();
    writer.start_file("word/document.xml", options).unwrap();
    writer.write_all(xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

fn build_pdf(pages: &[&str]) -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        // An empty string gives a page with no drawing operations
        let operations = if text.is_empty() {
            Vec::new()
        } else {
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ]
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let manager = InputManager::default();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text = manager.extract_text(path).await.unwrap();
    let raw = std::fs::read_to_string(path).unwrap();

    assert_eq!(text.as_str(), raw);
    assert!(text.contains("Jane Doe"));
}

#[tokio::test]
async fn test_text_extraction_from_docx() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume.docx");
    std::fs::write(&path, build_docx(&["Jane Doe", "Rust &amp; Python", "6 years"])).unwrap();

    let text = InputManager::default().extract_text(&path).await.unwrap();
    assert_eq!(text.as_str(), "Jane Doe Rust & Python 6 years");
}

#[tokio::test]
async fn test_text_extraction_from_pdf_keeps_page_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume.pdf");
    std::fs::write(&path, build_pdf(&["Page one Kubernetes", "Page two Rust"])).unwrap();

    let text = InputManager::default().extract_text(&path).await.unwrap();
    let first = text.find("Page one").expect("first page text");
    let second = text.find("Page two").expect("second page text");
    assert!(first < second);
}

#[tokio::test]
async fn test_text_extraction_from_docx_with_text_box() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("template.docx");
    let body = concat!(
        "<w:p><w:r><w:t>Jane Doe</w:t></w:r>",
        "<w:r><w:drawing><wp:inline><a:graphic><a:graphicData><wps:wsp><wps:txbx><w:txbxContent>",
        "<w:p><w:r><w:t>jane@example.com</w:t></w:r></w:p>",
        "</w:txbxContent></wps:txbx></wps:wsp></a:graphicData></a:graphic></wp:inline></w:drawing></w:r>",
        "<w:r><w:t xml:space=\"preserve\"> Staff Engineer</w:t></w:r></w:p>",
        "<w:p><w:r><w:t>8 years of Rust</w:t></w:r></w:p>",
    );
    std::fs::write(&path, build_docx_body(body)).unwrap();

    let text = InputManager::default().extract_text(&path).await.unwrap();
    assert_eq!(text.as_str(), "Jane Doe Staff Engineer 8 years of Rust");
}

#[tokio::test]
async fn test_pdf_empty_page_keeps_separator() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume.pdf");
    std::fs::write(&path, build_pdf(&["alpha", "", "omega"])).unwrap();

    let text = InputManager::default().extract_text(&path).await.unwrap();
    assert_eq!(text.as_str(), "alpha\n  omega\n");
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let manager = InputManager::default();

    for name in ["tests/fixtures/photo.png", "tests/fixtures/unsupported.xyz"] {
        let result = manager.extract_text(Path::new(name)).await;
        assert!(matches!(result, Err(ResumeAnalyzerError::UnsupportedFormat(_))));
    }
}

#[tokio::test]
async fn test_nonexistent_file() {
    let result = InputManager::default()
        .extract_text(Path::new("tests/fixtures/does_not_exist.txt"))
        .await;
    assert!(matches!(result, Err(ResumeAnalyzerError::InvalidInput(_))));
}

#[tokio::test]
async fn test_document_size_limit() {
    let manager = InputManager::new(16);
    let result = manager.load_document(Path::new("tests/fixtures/sample_resume.txt")).await;
    assert!(matches!(result, Err(ResumeAnalyzerError::DocumentTooLarge { limit: 16, .. })));
}

#[tokio::test]
async fn test_document_from_declared_media_type() {
    let manager = InputManager::default();
    let document = manager
        .document_from_bytes("text/plain; charset=utf-8", b"MS in Physics".to_vec(), "upload")
        .unwrap();

    let analysis = analyzer().analyze_document(&document, "physics").unwrap();
    assert_eq!(analysis.result.education.len(), 1);
    assert_eq!(analysis.result.education[0].field, "Physics");

    let rejected = manager.document_from_bytes("image/png", vec![0x89, 0x50], "upload");
    assert!(matches!(rejected, Err(ResumeAnalyzerError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_full_pipeline_on_fixtures() {
    let manager = InputManager::default();
    let document = manager
        .load_document(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    let job = manager
        .read_job_description(Path::new("tests/fixtures/job_description.txt"))
        .await
        .unwrap();

    let analysis = analyzer().analyze_document(&document, &job).unwrap();
    let result = &analysis.result;

    for skill in ["Rust", "Python", "Kubernetes", "PostgreSQL", "Docker"] {
        assert!(result.skills.contains(skill), "missing skill {}", skill);
    }
    assert_eq!(result.experience, vec!["7 years", "4+ yrs", "3 years"]);
    assert_eq!(result.education.len(), 2);
    assert_eq!(result.education[0].degree, "Bachelor");
    assert_eq!(result.education[0].field, "Science in Computer Science");
    assert_eq!(result.education[1].field, "Distributed Systems");
    assert!(result.skills.is_disjoint(&result.organizations));

    let score = analysis.compatibility_score.value();
    assert!(score > 0.0 && score < 100.0);

    let again = analyzer().analyze_document(&document, &job).unwrap();
    assert_eq!(again.compatibility_score, analysis.compatibility_score);
    assert_eq!(again.result, analysis.result);
}

#[tokio::test]
async fn test_json_report_counts_match_result() {
    let manager = InputManager::default();
    let text = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    let analysis = analyzer().analyze_text(&text, "Rust engineer").unwrap();

    let report = AnalysisReport::new(
        analysis,
        ReportMetadata {
            generated_at: chrono::Utc::now(),
            resume_file: "tests/fixtures/sample_resume.txt".to_string(),
            job_source: "inline".to_string(),
            recognizer: "skill-gazetteer".to_string(),
            scorer: "tfidf".to_string(),
            improvement_threshold: 70.0,
        },
    );
    let json = ReportGenerator::with_options(false, false)
        .generate_report(&report, &OutputFormat::Json)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let result = &value["analysis"]["result"];
    assert_eq!(
        value["summary"]["skills_identified"].as_u64().unwrap() as usize,
        result["skills"].as_array().unwrap().len()
    );
    assert_eq!(
        value["summary"]["experience_items"].as_u64().unwrap() as usize,
        result["experience"].as_array().unwrap().len()
    );
    assert_eq!(value["summary"]["needs_improvement"], true);
}
