//! Page-number pagination contract
//!
//! Turns raw `page` / `perPage` query values into a bounded slice window.
//! Out-of-range input is rejected with the violated bound, never clamped.

use std::ops::Range;

use crate::error::DomainError;

/// Zero-based page used when the caller sends none
pub const DEFAULT_PAGE: u64 = 0;
/// Page size used when the caller sends none
pub const DEFAULT_PER_PAGE: u32 = 10;
/// Smallest accepted page size
pub const MIN_PER_PAGE: u32 = 1;
/// Largest accepted page size
pub const MAX_PER_PAGE: u32 = 20;

/// Validated page descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    per_page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageRequest {
    /// Validate raw page parameters, applying defaults for missing values
    pub fn normalize(page: Option<i64>, per_page: Option<i64>) -> Result<Self, DomainError> {
        let page = page.unwrap_or(DEFAULT_PAGE as i64);
        let per_page = per_page.unwrap_or(i64::from(DEFAULT_PER_PAGE));

        if page < 0 {
            return Err(DomainError::validation(
                "page must be greater than or equal to 0",
            ));
        }
        if per_page < i64::from(MIN_PER_PAGE) {
            return Err(DomainError::validation(format!(
                "per page must be greater than or equal to {MIN_PER_PAGE}"
            )));
        }
        if per_page > i64::from(MAX_PER_PAGE) {
            return Err(DomainError::validation(format!(
                "per page must be less than or equal to {MAX_PER_PAGE}"
            )));
        }

        Ok(Self {
            page: page as u64,
            per_page: per_page as u32,
        })
    }

    /// Validate page parameters exactly as they arrived in a query string
    ///
    /// Integers too large for `i64` saturate and then hit the normal bound
    /// checks; anything else that is not an integer is rejected.
    pub fn parse(page: Option<&str>, per_page: Option<&str>) -> Result<Self, DomainError> {
        let page = page.map(|raw| parse_integer(raw, "page")).transpose()?;
        let per_page = per_page.map(|raw| parse_integer(raw, "per page")).transpose()?;
        Self::normalize(page, per_page)
    }

    #[inline]
    pub fn page(&self) -> u64 {
        self.page
    }

    #[inline]
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Index of the first row on this page
    pub fn offset(&self) -> usize {
        let offset = self.page.saturating_mul(u64::from(self.per_page));
        usize::try_from(offset).unwrap_or(usize::MAX)
    }

    /// Maximum number of rows on this page
    #[inline]
    pub fn limit(&self) -> usize {
        self.per_page as usize
    }

    /// Half-open window `[page*perPage, page*perPage+perPage)`
    pub fn window(&self) -> Range<usize> {
        let start = self.offset();
        start..start.saturating_add(self.limit())
    }

    /// Apply the window to an ordered result set; past the end yields `[]`
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let window = self.window();
        let start = window.start.min(items.len());
        let end = window.end.min(items.len());
        &items[start..end]
    }
}

fn parse_integer(raw: &str, name: &str) -> Result<i64, DomainError> {
    if let Ok(value) = raw.parse::<i64>() {
        return Ok(value);
    }

    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(if raw.starts_with('-') { i64::MIN } else { i64::MAX });
    }

    Err(DomainError::validation(format!("{name} must be an integer")))
}
