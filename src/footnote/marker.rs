//! Inline footnote marker scanning and splicing.
//!
//! A marker is `[[FN:<id>]]` where `<id>` is one or more characters other
//! than `]`. Splicing turns element text into an ordered list of plain text
//! spans and resolved footnote references.

use memchr::memmem;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use super::FootnoteIndex;

pub const MARKER_OPEN: &str = "[[FN:";
pub const MARKER_CLOSE: &str = "]]";

/// One marker occurrence within a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker<'a> {
    /// The referenced footnote id.
    pub id: &'a str,
    /// Byte offset of the opening `[[`.
    pub start: usize,
    /// Byte offset just past the closing `]]`.
    pub end: usize,
}

/// Iterator over the markers in a text, left to right, non-overlapping.
#[derive(Debug, Clone)]
pub struct Markers<'a> {
    text: &'a str,
    pos: usize,
}

/// Scan `text` for footnote markers.
pub fn markers(text: &str) -> Markers<'_> {
    Markers { text, pos: 0 }
}

impl<'a> Iterator for Markers<'a> {
    type Item = Marker<'a>;

    fn next(&mut self) -> Option<Marker<'a>> {
        let bytes = self.text.as_bytes();
        while self.pos < bytes.len() {
            let start = self.pos + memmem::find(&bytes[self.pos..], MARKER_OPEN.as_bytes())?;
            let id_start = start + MARKER_OPEN.len();
            let rest = &self.text[id_start..];
            let id_len = memchr::memchr(b']', rest.as_bytes()).unwrap_or(rest.len());

            if id_len > 0 && rest[id_len..].starts_with(MARKER_CLOSE) {
                let end = id_start + id_len + MARKER_CLOSE.len();
                self.pos = end;
                return Some(Marker {
                    id: &rest[..id_len],
                    start,
                    end,
                });
            }

            // `[` is ASCII, so the next byte is a char boundary.
            self.pos = start + 1;
        }
        None
    }
}

/// A piece of spliced element text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span<'a> {
    /// Plain text, never empty.
    Text(&'a str),
    /// Reference to the footnote with this sequential number.
    Reference(u32),
}

/// What to do with a marker whose id names no footnote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnresolvedPolicy {
    /// Omit the reference and keep the surrounding text intact.
    #[default]
    Drop,
    /// Fail the splice with [`UnresolvedMarker`].
    Reject,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no footnote with id `{id}`")]
pub struct UnresolvedMarker {
    pub id: String,
}

/// Split `text` around its markers.
///
/// Plain spans keep every non-marker character in order, so concatenating
/// the [`Span::Text`] pieces always yields [`strip_markers`]`(text)`.
///
/// ```
/// use tansiq::{Footnote, FootnoteIndex, Span, UnresolvedPolicy, splice};
///
/// let index = FootnoteIndex::build(&[Footnote::new("a", "تعليق")])?;
/// let spans = splice("هذا نص [[FN:a]] تجريبي.", &index, UnresolvedPolicy::Drop).unwrap();
/// assert_eq!(
///     spans,
///     vec![Span::Text("هذا نص "), Span::Reference(1), Span::Text(" تجريبي.")]
/// );
/// # Ok::<(), tansiq::AssemblyError>(())
/// ```
pub fn splice<'a>(
    text: &'a str,
    index: &FootnoteIndex,
    policy: UnresolvedPolicy,
) -> Result<Vec<Span<'a>>, UnresolvedMarker> {
    let mut spans = Vec::new();
    let mut last = 0;

    for marker in markers(text) {
        if marker.start > last {
            spans.push(Span::Text(&text[last..marker.start]));
        }
        match (index.get(marker.id), policy) {
            (Some(number), _) => spans.push(Span::Reference(number)),
            (None, UnresolvedPolicy::Drop) => {
                warn!(id = marker.id, "dropping reference to unknown footnote");
            }
            (None, UnresolvedPolicy::Reject) => {
                return Err(UnresolvedMarker {
                    id: marker.id.to_string(),
                });
            }
        }
        last = marker.end;
    }

    if last < text.len() {
        spans.push(Span::Text(&text[last..]));
    }
    Ok(spans)
}

/// `text` with every marker removed.
pub fn strip_markers(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for marker in markers(text) {
        out.push_str(&text[last..marker.start]);
        last = marker.end;
    }
    out.push_str(&text[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Footnote;
    use proptest::prelude::*;

    fn index(ids: &[&str]) -> FootnoteIndex {
        let footnotes: Vec<Footnote> = ids.iter().map(|id| Footnote::new(*id, "")).collect();
        FootnoteIndex::build(&footnotes).unwrap()
    }

    fn plain_text(spans: &[Span<'_>]) -> String {
        spans
            .iter()
            .filter_map(|s| match s {
                Span::Text(t) => Some(*t),
                Span::Reference(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_no_markers() {
        let spans = splice("نص بلا حواش", &index(&[]), UnresolvedPolicy::Drop).unwrap();
        assert_eq!(spans, vec![Span::Text("نص بلا حواش")]);
    }

    #[test]
    fn test_empty_text() {
        let spans = splice("", &index(&["a"]), UnresolvedPolicy::Drop).unwrap();
        assert!(spans.is_empty());
    }

    #[test]
    fn test_markers_at_start_and_end() {
        let spans = splice("[[FN:a]]وسط[[FN:b]]", &index(&["a", "b"]), UnresolvedPolicy::Drop)
            .unwrap();
        assert_eq!(
            spans,
            vec![Span::Reference(1), Span::Text("وسط"), Span::Reference(2)]
        );
    }

    #[test]
    fn test_adjacent_markers_produce_no_empty_text() {
        let spans = splice("أ[[FN:a]][[FN:b]]ب", &index(&["a", "b"]), UnresolvedPolicy::Drop)
            .unwrap();
        assert_eq!(
            spans,
            vec![
                Span::Text("أ"),
                Span::Reference(1),
                Span::Reference(2),
                Span::Text("ب")
            ]
        );
    }

    #[test]
    fn test_same_footnote_referenced_twice() {
        let spans = splice("[[FN:a]] و [[FN:a]]", &index(&["a"]), UnresolvedPolicy::Drop).unwrap();
        assert_eq!(
            spans,
            vec![Span::Reference(1), Span::Text(" و "), Span::Reference(1)]
        );
    }

    #[test]
    fn test_unresolved_marker_is_dropped() {
        let spans = splice("نص [[FN:missing]] آخر.", &index(&[]), UnresolvedPolicy::Drop).unwrap();
        assert_eq!(spans, vec![Span::Text("نص "), Span::Text(" آخر.")]);
    }

    #[test]
    fn test_unresolved_marker_is_rejected_in_strict_mode() {
        let err = splice("نص [[FN:missing]] آخر.", &index(&[]), UnresolvedPolicy::Reject)
            .unwrap_err();
        assert_eq!(err.id, "missing");
    }

    #[test]
    fn test_malformed_markers_are_plain_text() {
        let text = "[[FN:]] [[FN:a] [FN:a]] [[fn:a]] [[FN:a";
        let spans = splice(text, &index(&["a"]), UnresolvedPolicy::Reject).unwrap();
        assert_eq!(spans, vec![Span::Text(text)]);
    }

    #[test]
    fn test_marker_after_stray_bracket() {
        let spans = splice("[[[FN:a]]]", &index(&["a"]), UnresolvedPolicy::Drop).unwrap();
        assert_eq!(
            spans,
            vec![Span::Text("["), Span::Reference(1), Span::Text("]")]
        );
    }

    #[test]
    fn test_marker_positions() {
        let found: Vec<_> = markers("ab[[FN:x]]c").collect();
        assert_eq!(
            found,
            vec![Marker {
                id: "x",
                start: 2,
                end: 10
            }]
        );
    }

    #[test]
    fn test_strip_markers() {
        assert_eq!(strip_markers("هذا نص [[FN:a]] تجريبي."), "هذا نص  تجريبي.");
        assert_eq!(strip_markers("[[FN:a]][[FN:b]]"), "");
    }

    fn text_piece() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-z ]{0,6}",
            "[ابتثجحخدذرزسشصضطظعغفقكلمنهوي ]{0,6}",
            Just("[".to_string()),
            Just("]".to_string()),
            Just("[[FN:".to_string()),
        ]
    }

    proptest! {
        #[test]
        fn prop_plain_spans_equal_stripped_text(
            pieces in prop::collection::vec(
                (text_piece(), prop::option::of(prop_oneof![Just("a"), Just("b"), Just("zz")])),
                0..8
            )
        ) {
            let mut text = String::new();
            for (piece, id) in &pieces {
                text.push_str(piece);
                if let Some(id) = id {
                    text.push_str(&format!("[[FN:{id}]]"));
                }
            }

            // "zz" is never in the index, exercising the drop path too.
            let spans = splice(&text, &index(&["a", "b"]), UnresolvedPolicy::Drop).unwrap();
            prop_assert_eq!(plain_text(&spans), strip_markers(&text));
            prop_assert!(spans.iter().all(|s| !matches!(s, Span::Text(t) if t.is_empty())));
        }
    }
}
