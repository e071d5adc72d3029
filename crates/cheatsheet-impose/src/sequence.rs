//! Page sequence building
//!
//! Flattens the selected pages of one or more documents into a single
//! 1-based sequence. The planner only sees the sequence length; the
//! renderer maps sequence positions back to `(document, page)`.

use crate::page_range::parse_page_range;

/// Page selection for one source document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSelection<'a> {
    /// Pages in the document
    pub page_count: usize,
    /// Page-range expression; `None` or empty selects every page
    pub range: Option<&'a str>,
}

impl<'a> PageSelection<'a> {
    pub fn all(page_count: usize) -> Self {
        Self {
            page_count,
            range: None,
        }
    }

    pub fn with_range(page_count: usize, range: &'a str) -> Self {
        Self {
            page_count,
            range: Some(range),
        }
    }

    /// Selected 1-based page numbers within the document
    pub fn resolve(&self) -> Vec<usize> {
        parse_page_range(self.range.unwrap_or(""), self.page_count)
    }
}

/// A page of the sequence, located in its source document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceEntry {
    /// Index of the source document, in upload order
    pub document: usize,
    /// 1-based page number within that document
    pub page: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSequence {
    entries: Vec<SequenceEntry>,
}

impl PageSequence {
    /// Concatenate the selections in document order.
    pub fn build(selections: &[PageSelection<'_>]) -> Self {
        let entries = selections
            .iter()
            .enumerate()
            .flat_map(|(document, selection)| {
                selection
                    .resolve()
                    .into_iter()
                    .map(move |page| SequenceEntry { document, page })
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a 1-based sequence position
    pub fn get(&self, position: usize) -> Option<SequenceEntry> {
        position
            .checked_sub(1)
            .and_then(|i| self.entries.get(i))
            .copied()
    }

    pub fn entries(&self) -> &[SequenceEntry] {
        &self.entries
    }
}
