//! End-to-end DOCX tests.
//!
//! Assemble structured documents and read the packages back through the
//! inspector to check the formatting Word will see.

use std::io::Cursor;

use tansiq::inspect::{DocxSummary, ParagraphSummary};
use tansiq::numerals::{NumberFormat, NumberRestart};
use tansiq::style::{Alignment, HalfPoints, Twips};
use tansiq::{
    Assembler, DocElement, ElementKind, Error, Footnote, StructuredDocument, ThesisProfile,
    UnresolvedPolicy, read_docx_from_reader,
};

fn roundtrip(assembler: &Assembler, doc: &StructuredDocument) -> DocxSummary {
    let bytes = assembler.assemble(doc).unwrap();
    read_docx_from_reader(Cursor::new(bytes)).unwrap()
}

fn scenario_a() -> StructuredDocument {
    StructuredDocument::new("مقدمة")
        .with_element(DocElement::paragraph("هذا نص [[FN:a]] تجريبي."))
        .with_footnote(Footnote::new("a", "تعليق توضيحي"))
}

fn chapter() -> StructuredDocument {
    StructuredDocument::new("الفصل الأول")
        .with_element(DocElement::new(ElementKind::Heading1, "المبحث الأول"))
        .with_element(DocElement::paragraph(
            "قال الشافعي[[FN:f1]] في الرسالة، وتبعه الغزالي[[FN:f2]].",
        ))
        .with_element(DocElement::new(ElementKind::Heading2, "المطلب الأول[[FN:f3]]"))
        .with_element(DocElement::paragraph("ثم عاد إلى المسألة[[FN:f1]]."))
        .with_footnote(Footnote::new("f1", "الرسالة، ص ٢٣."))
        .with_footnote(Footnote::new("f2", "المستصفى، ج ١، ص ٤٥."))
        .with_footnote(Footnote::new("f3", "انظر ما سبق."))
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_single_paragraph_with_one_footnote() {
    let summary = roundtrip(&Assembler::default(), &scenario_a());

    assert_eq!(summary.paragraphs.len(), 2);
    let title = &summary.paragraphs[0];
    assert_eq!(title.text(), "مقدمة");
    assert_eq!(title.alignment, Some(Alignment::Center));
    assert!(title.runs[0].bold);
    assert_eq!(title.runs[0].size, Some(HalfPoints(36)));

    let body = &summary.paragraphs[1];
    let texts: Vec<&str> = body.runs.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["هذا نص ", "(", "", ")", " تجريبي."]);
    assert_eq!(body.footnote_references(), vec![1]);
    for run in &body.runs[1..4] {
        assert!(run.superscript);
        assert_eq!(run.size, Some(HalfPoints(24)));
    }

    assert_eq!(summary.footnotes.len(), 1);
    let note = summary.footnote(1).unwrap();
    assert!(note.has_mark());
    assert_eq!(note.text(), "() تعليق توضيحي");
    let note_paragraph = &note.paragraphs[0];
    assert_eq!(note_paragraph.alignment, Some(Alignment::Right));
    assert_eq!(note_paragraph.jc.as_deref(), Some("left"));
    assert_eq!(note_paragraph.style.as_deref(), Some("FootnoteText"));
    assert!(note_paragraph.bidi);
    assert_eq!(note_paragraph.line, Some(240));
}

#[test]
fn test_unresolved_marker_is_dropped() {
    let doc = StructuredDocument::new("عنوان")
        .with_element(DocElement::paragraph("نص [[FN:missing]] آخر."));
    let summary = roundtrip(&Assembler::default(), &doc);

    let body = &summary.paragraphs[1];
    assert_eq!(body.text(), "نص  آخر.");
    assert!(body.footnote_references().is_empty());
    assert!(summary.footnotes.is_empty());
}

#[test]
fn test_unresolved_marker_rejected_when_strict() {
    let doc = StructuredDocument::new("عنوان")
        .with_element(DocElement::paragraph("نص [[FN:missing]] آخر."));
    let profile = ThesisProfile::default().with_unresolved_markers(UnresolvedPolicy::Reject);
    let result = Assembler::new(profile).unwrap().assemble(&doc);
    match result {
        Err(Error::UnresolvedFootnote { id, element }) => {
            assert_eq!(id, "missing");
            assert_eq!(element, 0);
        }
        other => panic!("expected unresolved footnote error, got {other:?}"),
    }
}

#[test]
fn test_duplicate_ids_yield_generic_assembly_error() {
    let doc = StructuredDocument::new("عنوان")
        .with_footnote(Footnote::new("x", "أ"))
        .with_footnote(Footnote::new("x", "ب"));
    let err = Assembler::default().assemble(&doc).unwrap_err();
    assert!(matches!(err, Error::Assembly));
    assert_eq!(err.user_message(), tansiq::error::ASSEMBLY_FAILED_MESSAGE);
}

// ============================================================================
// Layout invariants
// ============================================================================

#[test]
fn test_every_body_paragraph_is_bidi() {
    let summary = roundtrip(&Assembler::default(), &chapter());
    assert!(summary.paragraphs.iter().all(|p| p.bidi));
    assert!(summary.footer.iter().all(|p| p.bidi));
    assert!(summary.section_bidi);
}

#[test]
fn test_headings_right_aligned_and_body_justified() {
    let summary = roundtrip(&Assembler::default(), &chapter());
    let p = &summary.paragraphs;

    for heading in [&p[1], &p[3]] {
        assert_eq!(heading.alignment, Some(Alignment::Right));
        // Leading edge of a bidi paragraph, which Word draws on the right.
        assert_eq!(heading.jc.as_deref(), Some("left"));
        assert_eq!(heading.spacing_before, Some(Twips(500)));
        let first = &heading.runs[0];
        assert!(first.bold);
        assert_eq!(first.size, Some(HalfPoints(32)));
    }
    for body in [&p[2], &p[4]] {
        assert_eq!(body.alignment, Some(Alignment::Justified));
        assert_eq!(body.jc.as_deref(), Some("both"));
        assert_eq!(body.spacing_before, Some(Twips(240)));
        assert_eq!(body.spacing_after, Some(Twips(150)));
        assert_eq!(body.line, Some(360));
        assert!(!body.runs[0].bold);
    }
}

#[test]
fn test_every_run_carries_the_academic_font() {
    let summary = roundtrip(&Assembler::default(), &chapter());
    let runs = summary
        .paragraphs
        .iter()
        .chain(summary.footnotes.iter().flat_map(|f| &f.paragraphs))
        .flat_map(|p: &ParagraphSummary| &p.runs);
    for run in runs {
        assert_eq!(run.font.as_deref(), Some("Traditional Arabic"));
    }
}

#[test]
fn test_footnotes_numbered_by_sequence_and_reused() {
    let summary = roundtrip(&Assembler::default(), &chapter());

    assert_eq!(summary.paragraphs[2].footnote_references(), vec![1, 2]);
    assert_eq!(summary.paragraphs[3].footnote_references(), vec![3]);
    assert_eq!(summary.paragraphs[4].footnote_references(), vec![1]);

    let ids: Vec<u32> = summary.footnotes.iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert!(summary.footnote(2).unwrap().text().ends_with("المستصفى، ج ١، ص ٤٥."));
}

#[test]
fn test_heading_reference_is_raised() {
    let summary = roundtrip(&Assembler::default(), &chapter());
    let heading = &summary.paragraphs[3];
    assert_eq!(heading.text(), "المطلب الأول()");
    assert!(heading.runs[1..].iter().all(|r| r.superscript && !r.bold));
}

// ============================================================================
// Section and numbering
// ============================================================================

#[test]
fn test_footnote_numbering_restarts_each_page_in_native_digits() {
    let summary = roundtrip(&Assembler::default(), &scenario_a());
    for numbering in [summary.settings_numbering, summary.section_numbering] {
        let numbering = numbering.unwrap();
        assert_eq!(numbering.format, Some(NumberFormat::ArabicIndic));
        assert_eq!(numbering.restart, Some(NumberRestart::EachPage));
        assert_eq!(numbering.start, Some(1));
    }
}

#[test]
fn test_binding_margin_on_the_right() {
    let summary = roundtrip(&Assembler::default(), &scenario_a());
    let margins = summary.margins.unwrap();
    assert_eq!(margins.right, Twips(1701));
    assert_eq!(margins.left, Twips(1417));
    assert_eq!(margins.top, Twips(1417));
    assert_eq!(margins.bottom, Twips(1417));
    assert_eq!(summary.page_size, Some((Twips(11906), Twips(16838))));
}

#[test]
fn test_footer_page_number_field() {
    let summary = roundtrip(&Assembler::default(), &scenario_a());
    assert_eq!(summary.footer_instructions, vec!["PAGE".to_string()]);
    assert_eq!(summary.footer[0].alignment, Some(Alignment::Center));
    assert_eq!(summary.page_number_format, Some(NumberFormat::ArabicIndic));
}

#[test]
fn test_core_properties() {
    let summary = roundtrip(&Assembler::default(), &scenario_a());
    assert_eq!(summary.title.as_deref(), Some("مقدمة"));
    assert_eq!(summary.language.as_deref(), Some("ar-SA"));
}

// ============================================================================
// Edge cases
// ============================================================================

#[test]
fn test_empty_document_has_only_title() {
    let summary = roundtrip(&Assembler::default(), &StructuredDocument::new("عنوان"));
    assert_eq!(summary.paragraphs.len(), 1);
    assert!(summary.footnotes.is_empty());
}

#[test]
fn test_special_characters_survive() {
    let doc = StructuredDocument::new("أ & ب")
        .with_element(DocElement::paragraph("x < y > z \"q\" 'a'"));
    let summary = roundtrip(&Assembler::default(), &doc);
    assert_eq!(summary.paragraphs[0].text(), "أ & ب");
    assert_eq!(summary.paragraphs[1].text(), "x < y > z \"q\" 'a'");
    assert_eq!(summary.title.as_deref(), Some("أ & ب"));
}

#[test]
fn test_output_is_deterministic() {
    let assembler = Assembler::default();
    let first = assembler.assemble(&chapter()).unwrap();
    let second = assembler.assemble(&chapter()).unwrap();
    assert_eq!(first, second);
}
