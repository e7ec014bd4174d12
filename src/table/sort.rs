//! Sort state machine and comparators

use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::fmt::Debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

/// Key a row exposes for one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortValue<'a> {
    Text(&'a str),
    /// Two texts compared in order, e.g. a pair's token symbols.
    TextPair(&'a str, &'a str),
    /// `None` (e.g. unavailable APR) orders below every number.
    Number(Option<Decimal>),
}

impl SortValue<'_> {
    pub fn compare(&self, other: &SortValue<'_>) -> Ordering {
        match (self, other) {
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            (SortValue::TextPair(a0, a1), SortValue::TextPair(b0, b1)) => (a0, a1).cmp(&(b0, b1)),
            (SortValue::Number(a), SortValue::Number(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortValue::Text(_) => 0,
            SortValue::TextPair(..) => 1,
            SortValue::Number(_) => 2,
        }
    }
}

/// Closed set of sortable columns for one table type.
pub trait SortColumn: Copy + Eq + Debug + 'static {
    const ALL: &'static [Self];

    /// Header text.
    fn label(self) -> &'static str;

    /// Short command-line name.
    fn key(self) -> &'static str;

    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim().to_ascii_lowercase();
        Self::ALL.iter().copied().find(|c| c.key() == raw)
    }
}

/// A row type that can be ordered by its table's columns.
pub trait Sortable {
    type Column: SortColumn;

    fn sort_value(&self, column: Self::Column) -> SortValue<'_>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<C> {
    pub column: C,
    pub direction: SortDirection,
}

impl<C: SortColumn> SortState<C> {
    pub const DEFAULT_DIRECTION: SortDirection = SortDirection::Ascending;

    pub fn new(column: C, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    /// Header click: a new column starts ascending, the active one toggles.
    pub fn select_column(&mut self, column: C) {
        if self.column == column {
            self.direction = self.direction.toggled();
        } else {
            self.column = column;
            self.direction = Self::DEFAULT_DIRECTION;
        }
    }

    pub fn compare<T: Sortable<Column = C>>(&self, a: &T, b: &T) -> Ordering {
        let ordering = a
            .sort_value(self.column)
            .compare(&b.sort_value(self.column));
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    /// Arrow shown next to `column`'s header, empty when inactive.
    pub fn indicator(&self, column: C) -> &'static str {
        if self.column == column {
            self.direction.arrow()
        } else {
            ""
        }
    }
}

/// Stable, non-destructive sort: returns references in sorted order and
/// leaves `rows` untouched.
pub fn sorted<'a, T: Sortable>(rows: &'a [T], state: &SortState<T::Column>) -> Vec<&'a T> {
    let mut view: Vec<&T> = rows.iter().collect();
    view.sort_by(|a, b| state.compare(*a, *b));
    view
}
