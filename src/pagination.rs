use serde::Serialize;

use crate::repository::{CustomerPageQuery, CustomerSortField, SortDirection};

pub const DEFAULT_PAGE: usize = 0;
pub const DEFAULT_LINES_PER_PAGE: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSort {
    pub order_by: CustomerSortField,
    pub direction: SortDirection,
}

/// One zero-based page of results plus the metadata clients need to walk the
/// remaining pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: usize,
    pub total_pages: usize,
    pub number: usize,
    pub size: usize,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
    pub sort: PageSort,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, query: &CustomerPageQuery, total_elements: usize) -> Self {
        let total_pages = if query.per_page == 0 {
            0
        } else {
            total_elements.div_ceil(query.per_page)
        };

        Self {
            number_of_elements: content.len(),
            empty: content.is_empty(),
            content,
            total_elements,
            total_pages,
            number: query.page,
            size: query.per_page,
            first: query.page == 0,
            last: query.page.saturating_add(1) >= total_pages,
            sort: PageSort {
                order_by: query.order_by,
                direction: query.direction,
            },
        }
    }

    /// Converts every item while keeping the page metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number: self.number,
            size: self.size,
            number_of_elements: self.number_of_elements,
            first: self.first,
            last: self.last,
            empty: self.empty,
            sort: self.sort,
        }
    }
}
