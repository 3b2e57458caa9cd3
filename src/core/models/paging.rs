/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Sort by the K-th selected column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortCriteria {
    pub column: usize,
    pub asc: bool,
}

impl SortCriteria {
    pub fn new(column: usize, asc: bool) -> Self {
        Self { column, asc }
    }
}

/// One page of results plus the total number of matching rows.
///
/// `limit` and `offset` are set by the caller, `result_count` by the
/// pagination helper and `result_list` by whoever maps the rows.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedList<T> {
    pub limit: usize,
    pub offset: usize,
    pub result_count: u64,
    pub result_list: Vec<T>,
}

impl<T> PaginatedList<T> {
    pub fn new(limit: usize, offset: usize) -> Self {
        Self {
            limit,
            offset,
            result_count: 0,
            result_list: Vec::new(),
        }
    }

    /// First page with the default page size.
    pub fn default_page() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, 0)
    }
}

/// What a session needs to fetch one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub sort: Option<SortCriteria>,
    pub offset: usize,
    pub limit: usize,
}
