//! Package-level parts: content types, relationships, properties, styles,
//! and settings.

use std::fmt::Write as _;

use quick_xml::escape::escape;

use crate::document::{Document, FOOTNOTE_TEXT_STYLE};

use super::wml::{FOOTNOTE_REFERENCE_STYLE, W_NS, write_footnote_properties};

pub(crate) const XML_DECLARATION: &str =
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Relationship id of the default footer within `document.xml.rels`.
pub(crate) const FOOTER_REL_ID: &str = "rId4";

/// Generate `[Content_Types].xml`.
pub fn content_types_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/word/settings.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml"/><Override PartName="/word/footnotes.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.footnotes+xml"/><Override PartName="/word/footer1.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.footer+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/><Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/></Types>"#
}

/// Generate `_rels/.rels`.
pub fn package_rels_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/></Relationships>"#
}

/// Generate `word/_rels/document.xml.rels`.
pub fn document_rels_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/settings" Target="settings.xml"/><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/footnotes" Target="footnotes.xml"/><Relationship Id="rId4" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer" Target="footer1.xml"/></Relationships>"#
}

/// Generate `docProps/core.xml`.
///
/// No timestamps are written, so identical input yields identical bytes.
pub fn core_xml(doc: &Document) -> String {
    let mut out = String::with_capacity(512);
    out.push_str(XML_DECLARATION);
    out.push_str(concat!(
        "\n<cp:coreProperties ",
        "xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" ",
        "xmlns:dc=\"http://purl.org/dc/elements/1.1/\" ",
        "xmlns:dcterms=\"http://purl.org/dc/terms/\" ",
        "xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">"
    ));
    let _ = write!(out, "<dc:title>{}</dc:title>", escape(doc.title.as_str()));
    let _ = write!(
        out,
        "<dc:language>{}</dc:language>",
        escape(doc.language.as_str())
    );
    let _ = write!(
        out,
        "<cp:lastModifiedBy>{}</cp:lastModifiedBy>",
        env!("CARGO_PKG_NAME")
    );
    out.push_str("</cp:coreProperties>");
    out
}

/// Generate `docProps/app.xml`.
pub fn app_xml() -> &'static str {
    concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        "\n<Properties xmlns=\"http://schemas.openxmlformats.org/officeDocument/2006/extended-properties\">",
        "<Application>",
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION"),
        "</Application></Properties>"
    )
}

/// Generate `word/styles.xml`.
///
/// Document defaults carry the font on all script slots, the body size,
/// right-to-left direction, and the complex-script language.
pub fn styles_xml(doc: &Document) -> String {
    let font = escape(doc.font.as_str());
    let language = escape(doc.language.as_str());
    let size = doc.default_size.0;

    let mut out = String::with_capacity(2048);
    out.push_str(XML_DECLARATION);
    let _ = write!(out, "\n<w:styles xmlns:w=\"{W_NS}\">");

    let _ = write!(
        out,
        concat!(
            "<w:docDefaults><w:rPrDefault><w:rPr>",
            "<w:rFonts w:ascii=\"{font}\" w:hAnsi=\"{font}\" w:eastAsia=\"{font}\" w:cs=\"{font}\"/>",
            "<w:sz w:val=\"{size}\"/><w:szCs w:val=\"{size}\"/><w:rtl/>",
            "<w:lang w:val=\"{language}\" w:bidi=\"{language}\"/>",
            "</w:rPr></w:rPrDefault>",
            "<w:pPrDefault><w:pPr><w:bidi/></w:pPr></w:pPrDefault></w:docDefaults>"
        ),
        font = font,
        size = size,
        language = language,
    );

    out.push_str(concat!(
        "<w:style w:type=\"paragraph\" w:default=\"1\" w:styleId=\"Normal\">",
        "<w:name w:val=\"Normal\"/><w:qFormat/><w:pPr><w:bidi/></w:pPr></w:style>",
    ));
    let _ = write!(
        out,
        concat!(
            "<w:style w:type=\"paragraph\" w:styleId=\"{id}\">",
            "<w:name w:val=\"footnote text\"/><w:basedOn w:val=\"Normal\"/>",
            "<w:pPr><w:bidi/><w:spacing w:after=\"0\" w:line=\"240\" w:lineRule=\"auto\"/></w:pPr>",
            "</w:style>"
        ),
        id = FOOTNOTE_TEXT_STYLE,
    );
    let _ = write!(
        out,
        concat!(
            "<w:style w:type=\"character\" w:styleId=\"{id}\">",
            "<w:name w:val=\"footnote reference\"/>",
            "<w:rPr><w:vertAlign w:val=\"superscript\"/></w:rPr></w:style>"
        ),
        id = FOOTNOTE_REFERENCE_STYLE,
    );

    out.push_str("</w:styles>");
    out
}

/// Generate `word/settings.xml`.
///
/// Word reads document-wide footnote numbering from here; the section
/// repeats it.
pub fn settings_xml(doc: &Document) -> String {
    let mut out = String::with_capacity(512);
    out.push_str(XML_DECLARATION);
    let _ = write!(out, "\n<w:settings xmlns:w=\"{W_NS}\">");
    out.push_str("<w:defaultTabStop w:val=\"720\"/>");
    out.push_str("<w:footnotePr>");
    write_footnote_properties(&mut out, &doc.section);
    out.push_str("<w:footnote w:id=\"-1\"/><w:footnote w:id=\"0\"/></w:footnotePr>");
    out.push_str(concat!(
        "<w:compat><w:compatSetting w:name=\"compatibilityMode\" ",
        "w:uri=\"http://schemas.microsoft.com/office/word\" w:val=\"15\"/></w:compat>"
    ));
    out.push_str("</w:settings>");
    out
}
