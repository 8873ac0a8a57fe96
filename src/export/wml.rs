//! WordprocessingML markup for paragraphs, runs, sections, footnotes, and
//! the footer.

use std::fmt::Write as _;

use quick_xml::escape::escape;

use crate::document::{Document, Paragraph, Run, RunFormat, Section};

use super::parts::{FOOTER_REL_ID, XML_DECLARATION};

pub(crate) const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub(crate) const R_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Character style applied to footnote references in body text.
pub(crate) const FOOTNOTE_REFERENCE_STYLE: &str = "FootnoteReference";

/// Generate `word/document.xml`.
pub fn document_xml(doc: &Document) -> String {
    let mut out = String::with_capacity(4096);
    out.push_str(XML_DECLARATION);
    let _ = write!(out, "\n<w:document xmlns:w=\"{W_NS}\" xmlns:r=\"{R_NS}\">");
    out.push_str("<w:body>");
    for paragraph in &doc.body {
        write_paragraph(&mut out, paragraph, &doc.font);
    }
    write_section(&mut out, &doc.section);
    out.push_str("</w:body></w:document>");
    out
}

/// Generate `word/footnotes.xml`, including the separator footnotes Word
/// expects under ids -1 and 0.
pub fn footnotes_xml(doc: &Document) -> String {
    let mut out = String::with_capacity(1024);
    out.push_str(XML_DECLARATION);
    let _ = write!(out, "\n<w:footnotes xmlns:w=\"{W_NS}\" xmlns:r=\"{R_NS}\">");
    out.push_str(concat!(
        "<w:footnote w:type=\"separator\" w:id=\"-1\"><w:p><w:pPr><w:bidi/>",
        "<w:spacing w:after=\"0\" w:line=\"240\" w:lineRule=\"auto\"/></w:pPr>",
        "<w:r><w:separator/></w:r></w:p></w:footnote>",
        "<w:footnote w:type=\"continuationSeparator\" w:id=\"0\"><w:p><w:pPr><w:bidi/>",
        "<w:spacing w:after=\"0\" w:line=\"240\" w:lineRule=\"auto\"/></w:pPr>",
        "<w:r><w:continuationSeparator/></w:r></w:p></w:footnote>",
    ));
    for footnote in &doc.footnotes {
        let _ = write!(out, "<w:footnote w:id=\"{}\">", footnote.id);
        write_paragraph(&mut out, &footnote.paragraph, &doc.font);
        out.push_str("</w:footnote>");
    }
    out.push_str("</w:footnotes>");
    out
}

/// Generate `word/footer1.xml`.
pub fn footer_xml(doc: &Document) -> String {
    let mut out = String::with_capacity(512);
    out.push_str(XML_DECLARATION);
    let _ = write!(out, "\n<w:ftr xmlns:w=\"{W_NS}\" xmlns:r=\"{R_NS}\">");
    write_paragraph(&mut out, &doc.footer, &doc.font);
    out.push_str("</w:ftr>");
    out
}

fn write_paragraph(out: &mut String, paragraph: &Paragraph, font: &str) {
    let format = &paragraph.format;
    out.push_str("<w:p><w:pPr>");
    if let Some(style) = format.style {
        let _ = write!(out, "<w:pStyle w:val=\"{style}\"/>");
    }
    if format.bidi {
        out.push_str("<w:bidi/>");
    }
    if format.spacing_before.is_some()
        || format.spacing_after.is_some()
        || format.line_spacing.is_some()
    {
        out.push_str("<w:spacing");
        if let Some(before) = format.spacing_before {
            let _ = write!(out, " w:before=\"{}\"", before.0);
        }
        if let Some(after) = format.spacing_after {
            let _ = write!(out, " w:after=\"{}\"", after.0);
        }
        if let Some(line) = format.line_spacing {
            let _ = write!(
                out,
                " w:line=\"{}\" w:lineRule=\"auto\"",
                line.line_value()
            );
        }
        out.push_str("/>");
    }
    let _ = write!(out, "<w:jc w:val=\"{}\"/>", format.alignment.ooxml_token(format.bidi));
    out.push_str("</w:pPr>");

    for run in &paragraph.runs {
        write_run(out, run, font);
    }
    out.push_str("</w:p>");
}

fn write_run(out: &mut String, run: &Run, font: &str) {
    match run {
        Run::Text { text, format } => {
            // Empty text runs carry nothing; Word drops them anyway.
            if text.is_empty() {
                return;
            }
            out.push_str("<w:r>");
            write_run_properties(out, format, font, None);
            let _ = write!(out, "<w:t xml:space=\"preserve\">{}</w:t>", escape(text.as_str()));
            out.push_str("</w:r>");
        }
        Run::FootnoteReference { id, format } => {
            out.push_str("<w:r>");
            write_run_properties(out, format, font, Some(FOOTNOTE_REFERENCE_STYLE));
            let _ = write!(out, "<w:footnoteReference w:id=\"{id}\"/>");
            out.push_str("</w:r>");
        }
        Run::FootnoteMark { format } => {
            out.push_str("<w:r>");
            write_run_properties(out, format, font, None);
            out.push_str("<w:footnoteRef/></w:r>");
        }
        Run::PageNumber {
            format,
            placeholder,
        } => {
            let mut field_run = |body: &str| {
                out.push_str("<w:r>");
                write_run_properties(out, format, font, None);
                out.push_str(body);
                out.push_str("</w:r>");
            };
            field_run("<w:fldChar w:fldCharType=\"begin\"/>");
            field_run("<w:instrText xml:space=\"preserve\"> PAGE </w:instrText>");
            field_run("<w:fldChar w:fldCharType=\"separate\"/>");
            field_run(&format!("<w:t>{}</w:t>", escape(placeholder.as_str())));
            field_run("<w:fldChar w:fldCharType=\"end\"/>");
        }
    }
}

/// Run properties in schema order. The font is written on every run
/// rather than trusted to style inheritance.
fn write_run_properties(out: &mut String, format: &RunFormat, font: &str, style: Option<&str>) {
    out.push_str("<w:rPr>");
    if let Some(style) = style {
        let _ = write!(out, "<w:rStyle w:val=\"{style}\"/>");
    }
    let font = escape(font);
    let _ = write!(
        out,
        "<w:rFonts w:ascii=\"{font}\" w:hAnsi=\"{font}\" w:cs=\"{font}\"/>"
    );
    if format.bold {
        out.push_str("<w:b/><w:bCs/>");
    }
    let _ = write!(
        out,
        "<w:sz w:val=\"{0}\"/><w:szCs w:val=\"{0}\"/>",
        format.size.0
    );
    if format.superscript {
        out.push_str("<w:vertAlign w:val=\"superscript\"/>");
    }
    if format.rtl {
        out.push_str("<w:rtl/>");
    }
    out.push_str("</w:rPr>");
}

/// Footnote numbering properties (`pos` omitted, bottom of page is the
/// default).
pub(crate) fn write_footnote_properties(out: &mut String, section: &Section) {
    let numbering = &section.footnote_numbering;
    let _ = write!(
        out,
        "<w:numFmt w:val=\"{}\"/><w:numStart w:val=\"{}\"/><w:numRestart w:val=\"{}\"/>",
        numbering.format.ooxml_token(),
        numbering.start,
        numbering.restart.ooxml_token()
    );
}

fn write_section(out: &mut String, section: &Section) {
    out.push_str("<w:sectPr>");
    let _ = write!(
        out,
        "<w:footerReference w:type=\"default\" r:id=\"{FOOTER_REL_ID}\"/>"
    );
    out.push_str("<w:footnotePr>");
    write_footnote_properties(out, section);
    out.push_str("</w:footnotePr>");
    out.push_str("<w:type w:val=\"continuous\"/>");
    let _ = write!(
        out,
        "<w:pgSz w:w=\"{}\" w:h=\"{}\"/>",
        section.page_width.0, section.page_height.0
    );
    let m = &section.margins;
    let _ = write!(
        out,
        "<w:pgMar w:top=\"{}\" w:right=\"{}\" w:bottom=\"{}\" w:left=\"{}\" w:header=\"{}\" w:footer=\"{}\" w:gutter=\"0\"/>",
        m.top.0, m.right.0, m.bottom.0, m.left.0, m.header.0, m.footer.0
    );
    let _ = write!(
        out,
        "<w:pgNumType w:fmt=\"{}\"/>",
        section.page_number_format.ooxml_token()
    );
    if section.bidi {
        out.push_str("<w:bidi/>");
    }
    out.push_str("</w:sectPr>");
}
