use crate::domain::entities::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Sort specification for the view pipeline. `key: None` keeps the dataset
/// in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub key: Option<String>,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn unsorted() -> Self {
        Self {
            key: None,
            direction: SortDirection::Asc,
        }
    }

    /// Header-click behavior: clicking the active sort key flips the
    /// direction, clicking a different key starts ascending.
    pub fn toggle(&mut self, key: &str) {
        if self.key.as_deref() == Some(key) {
            self.direction = self.direction.flipped();
        } else {
            self.key = Some(key.to_string());
            self.direction = SortDirection::Asc;
        }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::unsorted()
    }
}

/// Page window over the filtered sequence. `size` must be greater than zero;
/// out-of-range `index` values produce an empty slice, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    pub index: usize,
    pub size: usize,
}

impl PageSpec {
    pub fn first(size: usize) -> Self {
        Self { index: 0, size }
    }
}

/// Result of one pass through the view pipeline. `total_count` is the size
/// of the filtered sequence before pagination and drives the caller's
/// pagination bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewResult {
    pub rows: Vec<Record>,
    pub total_count: usize,
}
