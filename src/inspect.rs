//! DOCX inspection.
//!
//! Reads a WordprocessingML package back into a flat summary of the
//! properties the formatter controls: paragraph alignment and direction,
//! run formatting, footnotes, numbering policy, margins, and the footer
//! field. The summary is what `tansiq --info` prints.

use std::fmt;
use std::io::{Read, Seek};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use zip::ZipArchive;

use crate::error::{Error, Result};
use crate::numerals::{NumberFormat, NumberRestart};
use crate::style::{Alignment, HalfPoints, ResolvedMargins, Twips};

/// Formatting and content of one run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Literal text (`w:t`), empty for reference and field runs.
    pub text: String,
    /// Target of a `w:footnoteReference`.
    pub footnote_reference: Option<u32>,
    /// Whether the run holds a `w:footnoteRef` number mark.
    pub footnote_mark: bool,
    pub bold: bool,
    pub superscript: bool,
    pub rtl: bool,
    pub size: Option<HalfPoints>,
    /// Complex-script font slot.
    pub font: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParagraphSummary {
    /// Visual alignment, resolved against the paragraph direction.
    pub alignment: Option<Alignment>,
    /// Raw `w:jc` value.
    pub jc: Option<String>,
    /// Paragraph style id (`w:pStyle`).
    pub style: Option<String>,
    pub bidi: bool,
    pub spacing_before: Option<Twips>,
    pub spacing_after: Option<Twips>,
    /// Raw `w:line` value (240 = single).
    pub line: Option<u32>,
    pub runs: Vec<RunSummary>,
}

impl ParagraphSummary {
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn footnote_references(&self) -> Vec<u32> {
        self.runs.iter().filter_map(|r| r.footnote_reference).collect()
    }
}

/// A footnote body. Separator footnotes (ids -1 and 0) are skipped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FootnoteSummary {
    pub id: u32,
    pub paragraphs: Vec<ParagraphSummary>,
}

impl FootnoteSummary {
    pub fn text(&self) -> String {
        self.paragraphs.iter().map(ParagraphSummary::text).collect()
    }

    pub fn has_mark(&self) -> bool {
        self.paragraphs
            .iter()
            .flat_map(|p| &p.runs)
            .any(|r| r.footnote_mark)
    }
}

/// A `w:footnotePr` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NumberingSummary {
    pub format: Option<NumberFormat>,
    pub start: Option<u32>,
    pub restart: Option<NumberRestart>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocxSummary {
    pub title: Option<String>,
    pub language: Option<String>,
    pub paragraphs: Vec<ParagraphSummary>,
    pub footnotes: Vec<FootnoteSummary>,
    /// Document-wide numbering from `settings.xml`.
    pub settings_numbering: Option<NumberingSummary>,
    /// Numbering from the section properties.
    pub section_numbering: Option<NumberingSummary>,
    pub page_size: Option<(Twips, Twips)>,
    pub margins: Option<ResolvedMargins>,
    pub section_bidi: bool,
    pub page_number_format: Option<NumberFormat>,
    pub footer: Vec<ParagraphSummary>,
    /// Field instructions found in the footer, trimmed.
    pub footer_instructions: Vec<String>,
}

impl DocxSummary {
    pub fn footnote(&self, id: u32) -> Option<&FootnoteSummary> {
        self.footnotes.iter().find(|f| f.id == id)
    }
}

impl fmt::Display for DocxSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title:      {}", self.title.as_deref().unwrap_or("-"))?;
        writeln!(f, "Language:   {}", self.language.as_deref().unwrap_or("-"))?;
        writeln!(f, "Paragraphs: {}", self.paragraphs.len())?;
        writeln!(f, "Footnotes:  {}", self.footnotes.len())?;
        if let Some(numbering) = self.section_numbering.or(self.settings_numbering) {
            writeln!(
                f,
                "Numbering:  {} from {}, restart {}",
                numbering.format.map_or("-", NumberFormat::ooxml_token),
                numbering.start.unwrap_or(1),
                numbering.restart.map_or("-", NumberRestart::ooxml_token),
            )?;
        }
        if let Some(m) = self.margins {
            writeln!(
                f,
                "Margins:    top {:.2} cm, right {:.2} cm, bottom {:.2} cm, left {:.2} cm",
                m.top.cm(),
                m.right.cm(),
                m.bottom.cm(),
                m.left.cm()
            )?;
        }
        if !self.footer_instructions.is_empty() {
            writeln!(f, "Footer:     {}", self.footer_instructions.join(" | "))?;
        }
        for (i, paragraph) in self.paragraphs.iter().enumerate() {
            let alignment = paragraph.alignment.map_or("-", Alignment::as_str);
            writeln!(f, "  [{i}] {alignment:<7} {}", paragraph.text())?;
        }
        Ok(())
    }
}

/// Read a DOCX file from disk.
pub fn read_docx<P: AsRef<Path>>(path: P) -> Result<DocxSummary> {
    let file = std::fs::File::open(path)?;
    read_docx_from_reader(file)
}

/// Read a DOCX package from any [`Read`] + [`Seek`] source.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use tansiq::inspect::read_docx_from_reader;
/// use tansiq::{Assembler, StructuredDocument};
///
/// let bytes = Assembler::default().assemble(&StructuredDocument::new("مقدمة"))?;
/// let summary = read_docx_from_reader(Cursor::new(bytes))?;
/// assert_eq!(summary.paragraphs[0].text(), "مقدمة");
/// # Ok::<(), tansiq::Error>(())
/// ```
pub fn read_docx_from_reader<R: Read + Seek>(reader: R) -> Result<DocxSummary> {
    let mut archive = ZipArchive::new(reader).map_err(|e| Error::Inspect(e.to_string()))?;

    let document = read_archive_file(&mut archive, "word/document.xml")?
        .ok_or_else(|| Error::Inspect("missing word/document.xml".into()))?;

    let mut summary = DocxSummary::default();
    let body = parse_part(&document)?;
    summary.paragraphs = body.paragraphs;
    summary.section_numbering = body.numbering;
    summary.page_size = body.page_size;
    summary.margins = body.margins;
    summary.section_bidi = body.section_bidi;
    summary.page_number_format = body.page_number_format;

    if let Some(xml) = read_archive_file(&mut archive, "word/footnotes.xml")? {
        summary.footnotes = parse_part(&xml)?.footnotes;
    }
    if let Some(xml) = read_archive_file(&mut archive, "word/settings.xml")? {
        summary.settings_numbering = parse_part(&xml)?.numbering;
    }
    if let Some(xml) = read_archive_file(&mut archive, "word/footer1.xml")? {
        let footer = parse_part(&xml)?;
        summary.footer = footer.paragraphs;
        summary.footer_instructions = footer.instructions;
    }
    if let Some(xml) = read_archive_file(&mut archive, "docProps/core.xml")? {
        let (title, language) = parse_core(&xml)?;
        summary.title = title;
        summary.language = language;
    }

    Ok(summary)
}

fn read_archive_file<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: &str,
) -> Result<Option<String>> {
    match archive.by_name(path) {
        Ok(mut file) => {
            let mut contents = Vec::new();
            file.read_to_end(&mut contents)?;
            let contents = strip_bom(&contents);
            String::from_utf8(contents.to_vec())
                .map(Some)
                .map_err(|e| Error::Inspect(format!("{path}: {e}")))
        }
        Err(zip::result::ZipError::FileNotFound) => Ok(None),
        Err(e) => Err(Error::Inspect(e.to_string())),
    }
}

fn strip_bom(data: &[u8]) -> &[u8] {
    data.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(data)
}

/// Everything one WordprocessingML part can contribute.
#[derive(Default)]
struct PartContents {
    paragraphs: Vec<ParagraphSummary>,
    footnotes: Vec<FootnoteSummary>,
    numbering: Option<NumberingSummary>,
    page_size: Option<(Twips, Twips)>,
    margins: Option<ResolvedMargins>,
    section_bidi: bool,
    page_number_format: Option<NumberFormat>,
    instructions: Vec<String>,
}

#[derive(Default)]
struct PartState {
    paragraph: Option<ParagraphSummary>,
    run: Option<RunSummary>,
    footnote: Option<FootnoteSummary>,
    in_ppr: bool,
    in_sect_pr: bool,
    in_footnote_pr: bool,
    in_text: bool,
    in_separator: bool,
    instruction: Option<String>,
}

/// Parse document, footnotes, footer, or settings markup.
fn parse_part(xml: &str) -> Result<PartContents> {
    let mut reader = Reader::from_str(xml);
    let mut part = PartContents::default();
    let mut state = PartState::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                open_element(&e, &mut part, &mut state)?;
                apply_property(&e, &mut part, &mut state)?;
            }
            Ok(Event::Empty(e)) => {
                apply_property(&e, &mut part, &mut state)?;
            }
            Ok(Event::Text(e)) => {
                let raw = String::from_utf8_lossy(e.as_ref());
                push_text(&mut state, &raw);
            }
            Ok(Event::GeneralRef(e)) => {
                let entity = String::from_utf8_lossy(e.as_ref());
                if let Ok(resolved) = unescape(&format!("&{entity};")) {
                    push_text(&mut state, &resolved);
                }
            }
            Ok(Event::End(e)) => {
                let name = e.name();
                match local_name(name.as_ref()) {
                    b"p" => {
                        if let Some(mut paragraph) = state.paragraph.take() {
                            paragraph.alignment = paragraph
                                .jc
                                .as_deref()
                                .and_then(|v| Alignment::from_ooxml_token(v, paragraph.bidi));
                            match state.footnote.as_mut() {
                                Some(footnote) => footnote.paragraphs.push(paragraph),
                                None if state.in_separator => {}
                                None => part.paragraphs.push(paragraph),
                            }
                        }
                    }
                    b"r" => {
                        if let (Some(run), Some(paragraph)) =
                            (state.run.take(), state.paragraph.as_mut())
                        {
                            paragraph.runs.push(run);
                        }
                    }
                    b"t" => state.in_text = false,
                    b"instrText" => {
                        if let Some(instruction) = state.instruction.take() {
                            part.instructions.push(instruction.trim().to_string());
                        }
                    }
                    b"pPr" => state.in_ppr = false,
                    b"sectPr" => state.in_sect_pr = false,
                    b"footnotePr" => state.in_footnote_pr = false,
                    b"footnote" => {
                        state.in_separator = false;
                        if let Some(footnote) = state.footnote.take() {
                            part.footnotes.push(footnote);
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Inspect(e.to_string())),
            _ => {}
        }
    }

    Ok(part)
}

fn push_text(state: &mut PartState, text: &str) {
    if let Some(instruction) = state.instruction.as_mut() {
        instruction.push_str(text);
    } else if state.in_text {
        if let Some(run) = state.run.as_mut() {
            run.text.push_str(text);
        }
    }
}

/// Container elements that open a scope.
fn open_element(e: &BytesStart<'_>, part: &mut PartContents, state: &mut PartState) -> Result<()> {
    let name = e.name();
    match local_name(name.as_ref()) {
        b"p" => state.paragraph = Some(ParagraphSummary::default()),
        b"r" => state.run = Some(RunSummary::default()),
        b"t" => state.in_text = true,
        b"instrText" => state.instruction = Some(String::new()),
        b"pPr" => state.in_ppr = true,
        b"sectPr" => state.in_sect_pr = true,
        b"footnotePr" => {
            state.in_footnote_pr = true;
            part.numbering.get_or_insert_with(NumberingSummary::default);
        }
        b"footnote" if !state.in_footnote_pr => {
            // Separators carry negative or zero ids and no content of interest.
            state.footnote = match attr(e, b"id")?.and_then(|id| id.parse::<i64>().ok()) {
                Some(id) if id > 0 => Some(FootnoteSummary {
                    id: u32::try_from(id).map_err(|e| Error::Inspect(e.to_string()))?,
                    paragraphs: Vec::new(),
                }),
                _ => None,
            };
            state.in_separator = state.footnote.is_none();
        }
        _ => {}
    }
    Ok(())
}

/// Leaf property elements, whether written empty or with content.
fn apply_property(e: &BytesStart<'_>, part: &mut PartContents, state: &mut PartState) -> Result<()> {
    let name = e.name();
    let local = local_name(name.as_ref());

    if state.in_footnote_pr {
        if let Some(numbering) = part.numbering.as_mut() {
            match local {
                b"numFmt" => {
                    numbering.format =
                        attr(e, b"val")?.and_then(|v| NumberFormat::from_ooxml_token(&v))
                }
                b"numStart" => numbering.start = attr(e, b"val")?.and_then(|v| v.parse().ok()),
                b"numRestart" => {
                    numbering.restart =
                        attr(e, b"val")?.and_then(|v| NumberRestart::from_ooxml_token(&v))
                }
                _ => {}
            }
        }
        return Ok(());
    }

    if let Some(run) = state.run.as_mut() {
        match local {
            b"b" => run.bold = toggle(e)?,
            b"vertAlign" => run.superscript = attr(e, b"val")?.as_deref() == Some("superscript"),
            b"rtl" => run.rtl = toggle(e)?,
            b"sz" => run.size = attr(e, b"val")?.and_then(|v| v.parse().ok()).map(HalfPoints),
            b"rFonts" => run.font = attr(e, b"cs")?,
            b"footnoteReference" => {
                run.footnote_reference = attr(e, b"id")?.and_then(|v| v.parse().ok())
            }
            b"footnoteRef" => run.footnote_mark = true,
            _ => {}
        }
        return Ok(());
    }

    if state.in_ppr {
        if let Some(paragraph) = state.paragraph.as_mut() {
            match local {
                b"bidi" => paragraph.bidi = toggle(e)?,
                b"jc" => paragraph.jc = attr(e, b"val")?,
                b"pStyle" => paragraph.style = attr(e, b"val")?,
                b"spacing" => {
                    paragraph.spacing_before = twips_attr(e, b"before")?;
                    paragraph.spacing_after = twips_attr(e, b"after")?;
                    paragraph.line = attr(e, b"line")?.and_then(|v| v.parse().ok());
                }
                _ => {}
            }
        }
        return Ok(());
    }

    if state.in_sect_pr {
        match local {
            b"pgSz" => {
                if let (Some(w), Some(h)) = (twips_attr(e, b"w")?, twips_attr(e, b"h")?) {
                    part.page_size = Some((w, h));
                }
            }
            b"pgMar" => {
                part.margins = Some(ResolvedMargins {
                    top: twips_attr(e, b"top")?.unwrap_or_default(),
                    right: twips_attr(e, b"right")?.unwrap_or_default(),
                    bottom: twips_attr(e, b"bottom")?.unwrap_or_default(),
                    left: twips_attr(e, b"left")?.unwrap_or_default(),
                    header: twips_attr(e, b"header")?.unwrap_or_default(),
                    footer: twips_attr(e, b"footer")?.unwrap_or_default(),
                })
            }
            b"pgNumType" => {
                part.page_number_format =
                    attr(e, b"fmt")?.and_then(|v| NumberFormat::from_ooxml_token(&v))
            }
            b"bidi" => part.section_bidi = toggle(e)?,
            _ => {}
        }
    }
    Ok(())
}

/// Value of the attribute whose local name is `key`, unescaped.
fn attr(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes().flatten() {
        if local_name(attr.key.as_ref()) == key {
            let raw = String::from_utf8(attr.value.to_vec())
                .map_err(|e| Error::Inspect(e.to_string()))?;
            let value = unescape(&raw).map_err(|e| Error::Inspect(e.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn twips_attr(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<Twips>> {
    Ok(attr(e, key)?.and_then(|v| v.parse().ok()).map(Twips))
}

/// On/off property: present means on unless `w:val` says otherwise.
fn toggle(e: &BytesStart<'_>) -> Result<bool> {
    Ok(!matches!(
        attr(e, b"val")?.as_deref(),
        Some("0" | "false" | "off")
    ))
}

fn parse_core(xml: &str) -> Result<(Option<String>, Option<String>)> {
    let mut reader = Reader::from_str(xml);
    let mut title = None;
    let mut language = None;
    let mut current: Option<&'static str> = None;
    let mut buf_text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.name();
                current = match local_name(name.as_ref()) {
                    b"title" => Some("title"),
                    b"language" => Some("language"),
                    _ => None,
                };
                buf_text.clear();
            }
            Ok(Event::Text(e)) if current.is_some() => {
                buf_text.push_str(&String::from_utf8_lossy(e.as_ref()));
            }
            Ok(Event::GeneralRef(e)) if current.is_some() => {
                let entity = String::from_utf8_lossy(e.as_ref());
                if let Ok(resolved) = unescape(&format!("&{entity};")) {
                    buf_text.push_str(&resolved);
                }
            }
            Ok(Event::End(_)) => {
                match current.take() {
                    Some("title") => title = Some(buf_text.clone()),
                    Some("language") => language = Some(buf_text.clone()),
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Inspect(e.to_string())),
            _ => {}
        }
    }

    Ok((title, language))
}

/// Extract local name from a namespaced XML name (e.g. `w:p` -> `p`).
fn local_name(name: &[u8]) -> &[u8] {
    name.iter()
        .rposition(|&b| b == b':')
        .map(|i| &name[i + 1..])
        .unwrap_or(name)
}
