//! Sortable, paginated table state

use uuid::Uuid;
use crate::{
    table::{sorted, SortDirection, SortState, Sortable},
    types::Dataset,
};

/// The visible slice of a table after sorting and paging.
#[derive(Debug)]
pub struct TablePage<'a, T: Sortable> {
    pub rows: Vec<&'a T>,
    /// 1-based.
    pub page: usize,
    pub page_count: usize,
    pub total_rows: usize,
    /// Index of `rows[0]` within the sorted dataset.
    pub offset: usize,
    pub sort: SortState<T::Column>,
}

pub struct SortableTable<T: Sortable> {
    sort: SortState<T::Column>,
    page: usize,
    page_size: usize,
    last_dataset: Option<Uuid>,
    last_row_count: usize,
}

impl<T: Sortable> SortableTable<T> {
    pub fn new(column: T::Column, direction: SortDirection, page_size: usize) -> Self {
        Self {
            sort: SortState::new(column, direction),
            page: 1,
            page_size: page_size.max(1),
            last_dataset: None,
            last_row_count: 0,
        }
    }

    pub fn sort(&self) -> SortState<T::Column> {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Pages available for the last rendered dataset, never less than one.
    pub fn page_count(&self) -> usize {
        page_count(self.last_row_count, self.page_size)
    }

    /// Column header interaction. Leaves the page unchanged.
    pub fn select_column(&mut self, column: T::Column) {
        self.sort.select_column(column);
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.page_count());
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page.saturating_add(1));
    }

    pub fn previous_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    /// Records the dataset about to be shown. A dataset with a new identity
    /// sends the table back to page 1.
    pub fn observe(&mut self, dataset: &Dataset<T>) {
        if self.last_dataset != Some(dataset.id()) {
            self.last_dataset = Some(dataset.id());
            self.page = 1;
        }
        self.last_row_count = dataset.len();
        self.page = self.page.clamp(1, self.page_count());
    }

    /// Sorts a copy of the dataset's row references and returns the current
    /// page.
    pub fn render<'a>(&mut self, dataset: &'a Dataset<T>) -> TablePage<'a, T> {
        self.observe(dataset);

        let ordered = sorted(dataset.rows(), &self.sort);
        let start = (self.page - 1).saturating_mul(self.page_size);
        let end = start.saturating_add(self.page_size).min(ordered.len());
        let rows = if start < end {
            ordered[start..end].to_vec()
        } else {
            Vec::new()
        };

        TablePage {
            rows,
            page: self.page,
            page_count: self.page_count(),
            total_rows: dataset.len(),
            offset: start,
            sort: self.sort,
        }
    }
}

fn page_count(rows: usize, page_size: usize) -> usize {
    rows.div_ceil(page_size.max(1)).max(1)
}
