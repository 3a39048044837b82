//! This modules defines the common functionality for paging data.

use crate::Error;

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of transactions per page when not specified in a request.
    pub default_page_size: u64,
    /// The largest page size a client may ask for.
    pub max_page_size: u64,
}

impl PaginationConfig {
    /// Create a config that starts on page one.
    ///
    /// # Errors
    /// Returns [Error::InvalidConfig] if either size is zero, if
    /// `default_page_size` is larger than `max_page_size`, or if
    /// `max_page_size` does not fit in an SQL integer.
    pub fn new(default_page_size: u64, max_page_size: u64) -> Result<Self, Error> {
        if default_page_size == 0 || max_page_size == 0 {
            return Err(Error::InvalidConfig(
                "page sizes must be at least 1".to_owned(),
            ));
        }

        if default_page_size > max_page_size {
            return Err(Error::InvalidConfig(format!(
                "the default page size {default_page_size} is larger than the maximum page size {max_page_size}"
            )));
        }

        if i64::try_from(max_page_size).is_err() {
            return Err(Error::InvalidConfig(format!(
                "the maximum page size {max_page_size} is too large"
            )));
        }

        Ok(Self {
            default_page: 1,
            default_page_size,
            max_page_size,
        })
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

/// A validated, one-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// The one-based page number.
    pub number: u64,
    /// The maximum number of items on the page.
    pub size: u64,
}

impl Page {
    /// Build a page from the optional `page` and `per_page` query parameters,
    /// falling back to the defaults in `config`.
    ///
    /// # Errors
    /// Returns [Error::InvalidQuery] if either value is zero, if `per_page`
    /// is larger than [PaginationConfig::max_page_size], or if the page starts
    /// too far in for an SQL integer offset.
    pub fn new(
        page: Option<u64>,
        per_page: Option<u64>,
        config: &PaginationConfig,
    ) -> Result<Self, Error> {
        let number = page.unwrap_or(config.default_page);
        let size = per_page.unwrap_or(config.default_page_size);

        if number == 0 {
            return Err(Error::InvalidQuery("page must be at least 1".to_owned()));
        }

        if size == 0 || size > config.max_page_size {
            return Err(Error::InvalidQuery(format!(
                "perPage must be between 1 and {}",
                config.max_page_size
            )));
        }

        if checked_offset(number, size).is_none() {
            return Err(Error::InvalidQuery(format!("page {number} is too large")));
        }

        Ok(Self { number, size })
    }

    /// The maximum number of items on the page, as an SQL `LIMIT`.
    pub fn limit(&self) -> i64 {
        i64::try_from(self.size).unwrap_or(i64::MAX)
    }

    /// The number of items to skip before this page starts, as an SQL `OFFSET`.
    pub fn offset(&self) -> i64 {
        checked_offset(self.number, self.size).unwrap_or(i64::MAX)
    }
}

/// The offset of page `number`, or `None` if it does not fit in an `i64`.
fn checked_offset(number: u64, size: u64) -> Option<i64> {
    let skipped_pages = i64::try_from(number.checked_sub(1)?).ok()?;
    let size = i64::try_from(size).ok()?;

    skipped_pages.checked_mul(size)
}

/// The number of pages needed to show `item_count` items, `page_size` at a time.
pub fn page_count(item_count: u64, page_size: u64) -> u64 {
    item_count.div_ceil(page_size)
}
