//! Page requests and paged results.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::error::{AppError, AppResult};

/// Slice of an ordered result set: skip `offset` rows, return at most `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PageRequest {
    #[validate(range(min = 0, message = "must not be negative"))]
    offset: i64,
    #[validate(range(min = 0, message = "must not be negative"))]
    limit: i64,
}

impl PageRequest {
    /// Creates a request from a raw offset and limit.
    ///
    /// # Errors
    /// `InvalidPageRequest` when either value is negative
    pub fn new(offset: i64, limit: i64) -> AppResult<Self> {
        let request = Self { offset, limit };
        request.ensure_valid()?;
        Ok(request)
    }

    /// Creates a request for the zero-based `page` of `size` rows.
    ///
    /// # Errors
    /// `InvalidPageRequest` when either value is negative or the offset
    /// overflows
    pub fn of_page(page: i64, size: i64) -> AppResult<Self> {
        if page < 0 {
            return Err(AppError::invalid_page_request("page", "must not be negative"));
        }
        let offset = page
            .checked_mul(size)
            .ok_or_else(|| AppError::invalid_page_request("page", "offset overflows"))?;
        Self::new(offset, size)
    }

    /// Re-checks the request. Deserialized requests bypass [`PageRequest::new`],
    /// so anything that issues a query calls this first.
    pub fn ensure_valid(&self) -> AppResult<()> {
        self.validate().map_err(invalid_page_request)
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Zero-based page index; 0 when the limit is 0.
    pub fn page_index(&self) -> i64 {
        if self.limit == 0 {
            0
        } else {
            self.offset / self.limit
        }
    }

    /// True when this request starts at the first row.
    pub fn is_first(&self) -> bool {
        self.offset == 0
    }
}

fn invalid_page_request(errors: ValidationErrors) -> AppError {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    match fields.first() {
        Some((field, details)) => {
            let reason = details
                .first()
                .and_then(|detail| detail.message.as_ref())
                .map(|message| message.to_string())
                .unwrap_or_else(|| "is out of range".to_string());
            AppError::invalid_page_request(field.to_string(), reason)
        }
        None => AppError::invalid_page_request("page", errors.to_string()),
    }
}

/// One page of results plus the total number of matching rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    content: Vec<T>,
    total_count: i64,
    page_index: i64,
    page_size: i64,
}

impl<T> Page<T> {
    /// Creates a page for `request`.
    ///
    /// `total_count` is raised to the number of rows actually held so the page
    /// never reports fewer rows than it carries.
    pub fn new(content: Vec<T>, request: &PageRequest, total_count: i64) -> Self {
        let held = content.len() as i64;
        Self {
            content,
            total_count: total_count.max(held),
            page_index: request.page_index(),
            page_size: request.limit(),
        }
    }

    pub fn content(&self) -> &[T] {
        &self.content
    }

    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    pub fn total_count(&self) -> i64 {
        self.total_count
    }

    pub fn page_index(&self) -> i64 {
        self.page_index
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Number of pages of `page_size` needed for `total_count` rows.
    pub fn total_pages(&self) -> i64 {
        if self.page_size == 0 {
            return if self.total_count == 0 { 0 } else { 1 };
        }
        self.total_count / self.page_size + i64::from(self.total_count % self.page_size != 0)
    }

    pub fn has_next(&self) -> bool {
        self.page_index < self.total_pages().saturating_sub(1)
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }

    /// Transforms the content, keeping the paging metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_count: self.total_count,
            page_index: self.page_index,
            page_size: self.page_size,
        }
    }
}

/// How a paged search obtains its total count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountStrategy {
    /// Always run the count query
    Simple,
    /// Skip the count query when the first page is already short
    #[default]
    Complex,
}

impl CountStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CountStrategy::Simple => "simple",
            CountStrategy::Complex => "complex",
        }
    }
}

impl FromStr for CountStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "simple" => Ok(CountStrategy::Simple),
            "complex" => Ok(CountStrategy::Complex),
            _ => Err(format!(
                "Invalid count strategy '{}'. Valid strategies are: simple, complex",
                s
            )),
        }
    }
}

impl std::fmt::Display for CountStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_zero() {
        let request = PageRequest::new(0, 0).unwrap();

        assert_eq!(request.offset(), 0);
        assert_eq!(request.limit(), 0);
        assert_eq!(request.page_index(), 0);
    }

    #[test]
    fn test_negative_offset_is_rejected() {
        match PageRequest::new(-1, 10) {
            Err(AppError::InvalidPageRequest { field, reason }) => {
                assert_eq!(field, "offset");
                assert_eq!(reason, "must not be negative");
            }
            other => panic!("Expected InvalidPageRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_limit_is_rejected() {
        match PageRequest::new(0, -5) {
            Err(AppError::InvalidPageRequest { field, .. }) => assert_eq!(field, "limit"),
            other => panic!("Expected InvalidPageRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_of_page_computes_offset() {
        let request = PageRequest::of_page(3, 20).unwrap();

        assert_eq!(request.offset(), 60);
        assert_eq!(request.limit(), 20);
        assert_eq!(request.page_index(), 3);
    }

    #[test]
    fn test_of_page_rejects_negative_page_and_overflow() {
        assert!(matches!(
            PageRequest::of_page(-1, 20),
            Err(AppError::InvalidPageRequest { .. })
        ));
        assert!(matches!(
            PageRequest::of_page(i64::MAX, 2),
            Err(AppError::InvalidPageRequest { .. })
        ));
    }

    #[test]
    fn test_deserialized_request_is_checked() {
        let request: PageRequest = serde_json::from_str(r#"{"offset":-3,"limit":2}"#).unwrap();

        assert!(request.ensure_valid().is_err());
    }

    #[test]
    fn test_page_metadata() {
        let request = PageRequest::of_page(1, 2).unwrap();
        let page = Page::new(vec!["member3", "member4"], &request, 5);

        assert_eq!(page.total_count(), 5);
        assert_eq!(page.page_index(), 1);
        assert_eq!(page.page_size(), 2);
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn test_page_total_never_below_content() {
        let request = PageRequest::new(0, 10).unwrap();
        let page = Page::new(vec![1, 2, 3], &request, 1);

        assert_eq!(page.total_count(), 3);
    }

    #[test]
    fn test_page_past_the_end_keeps_total() {
        let request = PageRequest::new(100, 10).unwrap();
        let page: Page<i32> = Page::new(Vec::new(), &request, 4);

        assert!(page.is_empty());
        assert_eq!(page.total_count(), 4);
        assert!(!page.has_next());
    }

    #[test]
    fn test_total_pages_with_largest_page_size() {
        let request = PageRequest::new(0, i64::MAX).unwrap();
        let page = Page::new(vec![1, 2, 3, 4], &request, 4);

        assert_eq!(page.total_pages(), 1);
        assert!(!page.has_next());
    }

    #[test]
    fn test_has_next_on_last_addressable_page() {
        let request = PageRequest::new(i64::MAX, 1).unwrap();
        let page: Page<i32> = Page::new(Vec::new(), &request, 4);

        assert_eq!(page.page_index(), i64::MAX);
        assert_eq!(page.total_pages(), 4);
        assert!(!page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let request = PageRequest::new(0, 3).unwrap();

        assert_eq!(Page::new(vec![1, 2, 3], &request, 7).total_pages(), 3);
        assert_eq!(Page::new(vec![1, 2, 3], &request, 6).total_pages(), 2);
        assert_eq!(Page::<i32>::new(Vec::new(), &request, 0).total_pages(), 0);
    }

    #[test]
    fn test_map_keeps_metadata() {
        let request = PageRequest::new(0, 2).unwrap();
        let page = Page::new(vec![10, 20], &request, 4).map(|age| age + 1);

        assert_eq!(page.content(), &[11, 21]);
        assert_eq!(page.total_count(), 4);
    }

    #[test]
    fn test_count_strategy_parse() {
        assert_eq!("simple".parse::<CountStrategy>(), Ok(CountStrategy::Simple));
        assert_eq!("COMPLEX".parse::<CountStrategy>(), Ok(CountStrategy::Complex));
        assert!("fast".parse::<CountStrategy>().is_err());
        assert_eq!(CountStrategy::default(), CountStrategy::Complex);
    }
}
