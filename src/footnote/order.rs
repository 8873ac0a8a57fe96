use std::collections::HashSet;

use crate::schema::{DocElement, Footnote};

use super::markers;

/// How the body text uses the footnotes sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FootnoteUsage {
    /// Known footnote ids in order of their first marker in the body.
    pub first_use: Vec<String>,
    /// Footnotes that no marker references. Their bodies are still emitted.
    pub unused: Vec<String>,
}

impl FootnoteUsage {
    /// True when numbering by sequence order shows references out of order
    /// in the body, e.g. (٢) appearing before (١).
    ///
    /// Numbers are never reassigned to match first use; this only reports.
    pub fn diverges(&self, footnotes: &[Footnote]) -> bool {
        let sequence = footnotes
            .iter()
            .map(|f| f.id.as_str())
            .filter(|id| self.first_use.iter().any(|used| used.as_str() == *id));
        !sequence.eq(self.first_use.iter().map(String::as_str))
    }
}

/// Collect first-use order and unused footnotes for a document body.
pub fn footnote_usage(elements: &[DocElement], footnotes: &[Footnote]) -> FootnoteUsage {
    let known: HashSet<&str> = footnotes.iter().map(|f| f.id.as_str()).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut first_use = Vec::new();

    for element in elements {
        for marker in markers(&element.text) {
            if known.contains(marker.id) && seen.insert(marker.id) {
                first_use.push(marker.id.to_string());
            }
        }
    }

    let unused = footnotes
        .iter()
        .filter(|f| !seen.contains(f.id.as_str()))
        .map(|f| f.id.clone())
        .collect();

    FootnoteUsage { first_use, unused }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn footnotes(ids: &[&str]) -> Vec<Footnote> {
        ids.iter().map(|id| Footnote::new(*id, "")).collect()
    }

    #[test]
    fn test_matching_order() {
        let elements = vec![
            DocElement::paragraph("أ [[FN:1]] ب [[FN:2]]"),
            DocElement::paragraph("ج [[FN:1]]"),
        ];
        let notes = footnotes(&["1", "2"]);
        let usage = footnote_usage(&elements, &notes);
        assert_eq!(usage.first_use, vec!["1", "2"]);
        assert!(usage.unused.is_empty());
        assert!(!usage.diverges(&notes));
    }

    #[test]
    fn test_reversed_order_is_reported() {
        let elements = vec![DocElement::paragraph("أ [[FN:2]] ب [[FN:1]]")];
        let notes = footnotes(&["1", "2"]);
        let usage = footnote_usage(&elements, &notes);
        assert_eq!(usage.first_use, vec!["2", "1"]);
        assert!(usage.diverges(&notes));
    }

    #[test]
    fn test_unused_and_unknown_ids() {
        let elements = vec![DocElement::paragraph("[[FN:ghost]] [[FN:b]]")];
        let notes = footnotes(&["a", "b"]);
        let usage = footnote_usage(&elements, &notes);
        assert_eq!(usage.first_use, vec!["b"]);
        assert_eq!(usage.unused, vec!["a"]);
        // An unused footnote alone does not make the order diverge.
        assert!(!usage.diverges(&notes));
    }
}
