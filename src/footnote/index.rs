use std::collections::HashMap;

use crate::error::AssemblyError;
use crate::schema::Footnote;

/// Maps each footnote id to a dense 1-based number.
///
/// Numbers follow the order of the footnotes sequence, not the order in
/// which markers first appear in the body text. Duplicate ids are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FootnoteIndex {
    numbers: HashMap<String, u32>,
}

impl FootnoteIndex {
    /// Build the index in one pass over `footnotes`.
    ///
    /// ```
    /// use tansiq::{Footnote, FootnoteIndex};
    ///
    /// let index = FootnoteIndex::build(&[
    ///     Footnote::new("b", "الثانية"),
    ///     Footnote::new("a", "الأولى"),
    /// ])?;
    /// assert_eq!(index.get("b"), Some(1));
    /// assert_eq!(index.get("a"), Some(2));
    /// # Ok::<(), tansiq::AssemblyError>(())
    /// ```
    pub fn build(footnotes: &[Footnote]) -> Result<Self, AssemblyError> {
        let mut numbers = HashMap::with_capacity(footnotes.len());
        for (number, footnote) in (1u32..).zip(footnotes) {
            if numbers.insert(footnote.id.clone(), number).is_some() {
                return Err(AssemblyError::DuplicateFootnote(footnote.id.clone()));
            }
        }
        Ok(Self { numbers })
    }

    /// The sequential number for `id`, if it names a known footnote.
    pub fn get(&self, id: &str) -> Option<u32> {
        self.numbers.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.numbers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.numbers.iter().map(|(id, &n)| (id.as_str(), n))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, HashSet};

    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_index() {
        let index = FootnoteIndex::build(&[]).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.get("a"), None);
    }

    #[test]
    fn test_numbers_follow_sequence_order() {
        let footnotes = vec![
            Footnote::new("x", "1"),
            Footnote::new("y", "2"),
            Footnote::new("z", "3"),
        ];
        let index = FootnoteIndex::build(&footnotes).unwrap();
        assert_eq!(index.get("x"), Some(1));
        assert_eq!(index.get("y"), Some(2));
        assert_eq!(index.get("z"), Some(3));
        assert!(!index.contains("w"));
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let footnotes = vec![
            Footnote::new("a", "first"),
            Footnote::new("b", "second"),
            Footnote::new("a", "again"),
        ];
        match FootnoteIndex::build(&footnotes) {
            Err(AssemblyError::DuplicateFootnote(id)) => assert_eq!(id, "a"),
            other => panic!("expected duplicate error, got {other:?}"),
        }
    }

    proptest! {
        #[test]
        fn prop_index_is_bijection_onto_one_to_n(
            ids in prop::collection::hash_set("[a-z0-9]{1,6}", 0..40)
        ) {
            let footnotes: Vec<Footnote> = ids
                .iter()
                .map(|id| Footnote::new(id.clone(), "body"))
                .collect();
            let index = FootnoteIndex::build(&footnotes).unwrap();

            let values: BTreeSet<u32> = index.iter().map(|(_, n)| n).collect();
            let expected: BTreeSet<u32> = (1..=footnotes.len() as u32).collect();
            prop_assert_eq!(values, expected);

            let keys: HashSet<&str> = index.iter().map(|(id, _)| id).collect();
            prop_assert_eq!(keys.len(), footnotes.len());
            for (position, footnote) in footnotes.iter().enumerate() {
                prop_assert_eq!(index.get(&footnote.id), Some(position as u32 + 1));
            }
        }
    }
}
