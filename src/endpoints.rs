//! The API endpoint URIs.
//!
//! All routes live under [TRANSACTIONS_API]. The other constants are paths
//! relative to that prefix.

/// The resource path that every transaction route is nested under.
pub const TRANSACTIONS_API: &str = "/api/transactions";

/// Paginated, searchable list of transactions for a month.
pub const LIST: &str = "/";
/// Replace the stored transactions with a fresh copy of the seed feed.
pub const INITIALIZE_DATA: &str = "/initialize-data";
/// Sales totals for a month.
pub const STATISTICS: &str = "/statistics";
/// Price-range histogram for a month.
pub const BAR_CHART: &str = "/bar-chart";
/// Per-category item counts for a month.
pub const PIE_CHART: &str = "/pie-chart";
/// The transactions, statistics and both charts for a month in one response.
pub const COMBINED_DATA: &str = "/combined-data";

/// Join a route path onto [TRANSACTIONS_API].
///
/// The list route `/` maps to the prefix itself so that clients do not need a
/// trailing slash.
#[cfg(test)]
pub fn full_path(route: &str) -> String {
    if route == LIST {
        TRANSACTIONS_API.to_owned()
    } else {
        format!("{TRANSACTIONS_API}{route}")
    }
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::full_path;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok(), "{uri} is not a valid URI");
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_API);
        assert_endpoint_is_valid_uri(endpoints::LIST);
        assert_endpoint_is_valid_uri(endpoints::INITIALIZE_DATA);
        assert_endpoint_is_valid_uri(endpoints::STATISTICS);
        assert_endpoint_is_valid_uri(endpoints::BAR_CHART);
        assert_endpoint_is_valid_uri(endpoints::PIE_CHART);
        assert_endpoint_is_valid_uri(endpoints::COMBINED_DATA);
    }

    #[test]
    fn full_path_joins_prefix() {
        assert_eq!(
            full_path(endpoints::STATISTICS),
            "/api/transactions/statistics"
        );
        assert!(full_path(endpoints::STATISTICS).parse::<Uri>().is_ok());
    }

    #[test]
    fn full_path_of_list_is_prefix() {
        assert_eq!(full_path(endpoints::LIST), "/api/transactions");
    }
}
