//! Document assembler: structured document in, serialized DOCX out.

use std::io::Cursor;

use tracing::{debug, error, warn};

use crate::config::ThesisProfile;
use crate::document::{
    Document, FOOTNOTE_TEXT_STYLE, FootnoteBody, Paragraph, ParagraphFormat, Run, RunFormat,
    Section,
};
use crate::error::{AssemblyError, Error, Result};
use crate::export::{DocxExporter, Exporter};
use crate::footnote::{FootnoteIndex, Span, footnote_usage, markers, splice, strip_markers};
use crate::schema::{ElementKind, StructuredDocument};
use crate::style::{Alignment, StyleProfile};

/// Builds and serializes thesis documents under one [`ThesisProfile`].
///
/// # Example
///
/// ```
/// use tansiq::{Assembler, DocElement, Footnote, StructuredDocument};
///
/// let doc = StructuredDocument::new("مقدمة")
///     .with_element(DocElement::paragraph("هذا نص [[FN:a]] تجريبي."))
///     .with_footnote(Footnote::new("a", "تعليق توضيحي"));
///
/// let bytes = Assembler::default().assemble(&doc)?;
/// assert!(bytes.starts_with(b"PK"));
/// # Ok::<(), tansiq::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    profile: ThesisProfile,
}

impl Assembler {
    /// Create an assembler, rejecting an invalid profile.
    pub fn new(profile: ThesisProfile) -> Result<Self> {
        profile.validate()?;
        Ok(Self { profile })
    }

    pub fn profile(&self) -> &ThesisProfile {
        &self.profile
    }

    /// Assemble `doc` into DOCX bytes.
    ///
    /// All-or-nothing: either the complete package or an error. Internal
    /// failures are logged and reported as [`Error::Assembly`]; only a
    /// rejected unresolved marker surfaces as its own validation error.
    pub fn assemble(&self, doc: &StructuredDocument) -> Result<Vec<u8>> {
        let document = self.build(doc).map_err(reclassify)?;

        let mut cursor = Cursor::new(Vec::new());
        DocxExporter::new()
            .export(&document, &mut cursor)
            .map_err(|e| reclassify(AssemblyError::Io(e)))?;

        debug!(bytes = cursor.get_ref().len(), "document serialized");
        Ok(cursor.into_inner())
    }

    /// Build the document model without serializing it.
    pub fn build(&self, doc: &StructuredDocument) -> std::result::Result<Document, AssemblyError> {
        let profile = &self.profile;
        let index = FootnoteIndex::build(&doc.footnotes)?;
        debug!(
            elements = doc.elements.len(),
            footnotes = index.len(),
            "assembling document"
        );

        let usage = footnote_usage(&doc.elements, &doc.footnotes);
        if usage.diverges(&doc.footnotes) {
            warn!(
                first_use = ?usage.first_use,
                "footnotes are numbered in sequence order, which differs from the order of first reference"
            );
        }
        if !usage.unused.is_empty() {
            warn!(unused = ?usage.unused, "footnotes without any reference in the text");
        }

        let footnotes = (1u32..)
            .zip(&doc.footnotes)
            .map(|(id, footnote)| FootnoteBody {
                id,
                paragraph: self.footnote_paragraph(&footnote.text),
            })
            .collect();

        let mut body = Vec::with_capacity(doc.elements.len() + 1);
        body.push(self.title_paragraph(&doc.title));

        for (position, element) in doc.elements.iter().enumerate() {
            let spans = splice(&element.text, &index, profile.unresolved_markers).map_err(
                |unresolved| AssemblyError::UnresolvedFootnote {
                    id: unresolved.id,
                    element: position,
                },
            )?;
            body.push(self.element_paragraph(element.kind, &spans));
        }

        Ok(Document {
            title: doc.title.clone(),
            language: profile.language.clone(),
            font: profile.font.clone(),
            default_size: profile.styles.paragraph.size,
            body,
            footnotes,
            footer: self.footer_paragraph(),
            section: self.section(),
        })
    }

    fn title_paragraph(&self, title: &str) -> Paragraph {
        let style = self.profile.styles.profile(ElementKind::Title);
        if markers(title).next().is_some() {
            warn!("footnote markers in the document title are not rendered");
        }
        Paragraph::new(paragraph_format(style)).with_run(Run::text(
            strip_markers(title),
            RunFormat::new(style.size).bold(style.bold).rtl(),
        ))
    }

    fn element_paragraph(&self, kind: ElementKind, spans: &[Span<'_>]) -> Paragraph {
        let style = self.profile.styles.profile(kind);
        let text_format = RunFormat::new(style.size).bold(style.bold).rtl();
        let reference_format = RunFormat::new(self.profile.footnotes.reference_size).superscript();

        let mut paragraph = Paragraph::new(
            paragraph_format(style).line_spacing(self.profile.body_line_spacing),
        );
        for span in spans {
            match *span {
                Span::Text(text) => paragraph.push(Run::text(text, text_format)),
                Span::Reference(id) => {
                    paragraph.push(Run::text("(", reference_format));
                    paragraph.push(Run::FootnoteReference {
                        id,
                        format: reference_format,
                    });
                    paragraph.push(Run::text(")", reference_format));
                }
            }
        }
        paragraph
    }

    fn footnote_paragraph(&self, text: &str) -> Paragraph {
        let style = &self.profile.footnotes;
        let format = RunFormat::new(style.size);
        let paragraph = ParagraphFormat::rtl(Alignment::Right)
            .style(FOOTNOTE_TEXT_STYLE)
            .line_spacing(style.line_spacing);
        Paragraph::new(paragraph)
            .with_run(Run::text("(", format))
            .with_run(Run::FootnoteMark { format })
            .with_run(Run::text(") ", format))
            .with_run(Run::text(text, format.rtl()))
    }

    fn footer_paragraph(&self) -> Paragraph {
        let format = RunFormat::new(self.profile.footer_size);
        Paragraph::new(ParagraphFormat::rtl(Alignment::Center)).with_run(Run::PageNumber {
            format,
            placeholder: self.profile.page_number_format.render(1),
        })
    }

    fn section(&self) -> Section {
        let page = &self.profile.page;
        Section {
            page_width: page.width,
            page_height: page.height,
            margins: page.resolved_margins(),
            footnote_numbering: self.profile.footnote_numbering,
            page_number_format: self.profile.page_number_format,
            bidi: true,
        }
    }
}

fn paragraph_format(style: &StyleProfile) -> ParagraphFormat {
    ParagraphFormat::rtl(style.alignment).spacing(style.spacing_before, style.spacing_after)
}

/// Collapse internal causes into the caller-facing taxonomy.
fn reclassify(err: AssemblyError) -> Error {
    match err {
        AssemblyError::UnresolvedFootnote { id, element } => {
            Error::UnresolvedFootnote { id, element }
        }
        other => {
            error!(error = %other, "formatting engine failed");
            Error::Assembly
        }
    }
}
