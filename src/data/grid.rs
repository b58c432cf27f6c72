use super::filter::FilteredTable;

/// Rows per page in the data table.
pub const PAGE_SIZE: usize = 10;

// ---------------------------------------------------------------------------
// Table view state: search + pagination over the filtered table
// ---------------------------------------------------------------------------

/// Search text and page cursor for the data table.
///
/// Tied to the snapshot generation it was last synced with; a newer
/// generation resets it to the first page.
#[derive(Debug, Clone, Default)]
pub struct TableView {
    pub search: String,
    page: usize,
    generation: u64,
}

impl TableView {
    /// Reset the page cursor if the filtered table has been recomputed.
    pub fn sync(&mut self, generation: u64) {
        if self.generation != generation {
            self.generation = generation;
            self.page = 0;
        }
    }

    pub fn set_search(&mut self, search: String) {
        if self.search != search {
            self.search = search;
            self.page = 0;
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Positions (within `view`) of the rows matching the search text.
    ///
    /// A row matches when any of its cells contains the trimmed search text,
    /// ignoring case. An empty search matches every row.
    pub fn matching_rows(&self, view: &FilteredTable) -> Vec<usize> {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return (0..view.len()).collect();
        }
        view.iter()
            .enumerate()
            .filter(|(_, rec)| {
                rec.cells
                    .iter()
                    .any(|cell| cell.to_lowercase().contains(&needle))
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Slice of `matches` shown on the current page, clamping the cursor.
    pub fn current_page<'a>(&mut self, matches: &'a [usize]) -> &'a [usize] {
        self.page = self.page.min(page_count(matches.len()) - 1);
        let start = self.page * PAGE_SIZE;
        let end = (start + PAGE_SIZE).min(matches.len());
        &matches[start..end]
    }

    pub fn next_page(&mut self, total: usize) {
        self.page = (self.page + 1).min(page_count(total) - 1);
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    pub fn first_page(&mut self) {
        self.page = 0;
    }

    pub fn last_page(&mut self, total: usize) {
        self.page = page_count(total) - 1;
    }
}

/// Number of pages for `total` rows; an empty table still has one page.
pub fn page_count(total: usize) -> usize {
    total.div_ceil(PAGE_SIZE).max(1)
}

/// "Showing 11 to 20 of 57 entries" style summary. The
/// "(filtered from N total)" suffix appears only while a search narrows the
/// filtered rows.
pub fn entries_label(page: usize, on_page: usize, matches: usize, filtered: usize) -> String {
    let mut label = if on_page == 0 {
        "Showing 0 entries".to_string()
    } else {
        let first = page * PAGE_SIZE + 1;
        format!("Showing {first} to {} of {matches} entries", first + on_page - 1)
    };
    if matches != filtered {
        label.push_str(&format!(" (filtered from {filtered} total)"));
    }
    label
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::data::filter::{apply, FilterState};
    use crate::data::model::tests::{record, table};

    fn view_of(n: usize) -> FilteredTable {
        let records = (0..n)
            .map(|i| {
                let gender = if i % 2 == 0 { "Male" } else { "Female" };
                record(&format!("{i}"), gender, "40", "100", "25", "smokes", "0")
            })
            .collect();
        let full = Arc::new(table(records));
        apply(&full, &FilterState::unfiltered(&full))
    }

    #[test]
    fn pages_hold_ten_rows() {
        let view = view_of(23);
        let mut tv = TableView::default();
        let matches = tv.matching_rows(&view);
        assert_eq!(page_count(matches.len()), 3);
        assert_eq!(tv.current_page(&matches).len(), 10);

        tv.next_page(matches.len());
        tv.next_page(matches.len());
        assert_eq!(tv.current_page(&matches), &[20, 21, 22]);

        tv.next_page(matches.len());
        assert_eq!(tv.page(), 2);
        tv.prev_page();
        assert_eq!(tv.page(), 1);
        tv.first_page();
        assert_eq!(tv.page(), 0);
        tv.last_page(matches.len());
        assert_eq!(tv.page(), 2);
    }

    #[test]
    fn search_is_case_insensitive_over_all_cells() {
        let view = view_of(6);
        let mut tv = TableView::default();
        tv.set_search("  fEmAlE ".to_string());
        assert_eq!(tv.matching_rows(&view), vec![1, 3, 5]);

        tv.set_search("4".to_string());
        // Every row has age 40; id 4 also matches but is already counted.
        assert_eq!(tv.matching_rows(&view).len(), 6);
    }

    #[test]
    fn new_generation_resets_page() {
        let view = view_of(30);
        let mut tv = TableView::default();
        let matches = tv.matching_rows(&view);
        tv.sync(1);
        tv.last_page(matches.len());
        assert_eq!(tv.page(), 2);

        tv.sync(1);
        assert_eq!(tv.page(), 2);
        tv.sync(2);
        assert_eq!(tv.page(), 0);
    }

    #[test]
    fn stale_page_is_clamped_to_shorter_results() {
        let mut tv = TableView::default();
        let long: Vec<usize> = (0..40).collect();
        tv.last_page(long.len());
        let short: Vec<usize> = (0..12).collect();
        assert_eq!(tv.current_page(&short), &[10, 11]);
        assert_eq!(tv.page(), 1);
    }

    #[test]
    fn empty_table_has_one_empty_page() {
        let mut tv = TableView::default();
        assert_eq!(page_count(0), 1);
        assert!(tv.current_page(&[]).is_empty());
        assert_eq!(entries_label(0, 0, 0, 0), "Showing 0 entries");
    }

    #[test]
    fn entries_label_mentions_search_narrowing() {
        assert_eq!(entries_label(1, 10, 57, 57), "Showing 11 to 20 of 57 entries");
        assert_eq!(
            entries_label(0, 3, 3, 57),
            "Showing 1 to 3 of 3 entries (filtered from 57 total)"
        );
    }
}
