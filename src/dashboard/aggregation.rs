//! Sales aggregation for the dashboard statistics and charts.
//!
//! Every function here works on the sales of a single month, as returned by
//! [get_sales_in_month](super::transaction::get_sales_in_month).

use std::collections::BTreeMap;

use serde::Serialize;

use crate::dashboard::transaction::Sale;

/// Sales totals for a month.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SalesStatistics {
    /// The summed price of every item.
    pub total_sales: f64,
    /// The summed price of the items that sold.
    pub total_sold_sales: f64,
    /// The summed price of the items that did not sell.
    pub total_deficit_sales: f64,
    /// The number of items that sold.
    pub sold_items: u64,
    /// The number of items that did not sell.
    pub not_sold_items: u64,
}

/// Sums prices and counts items, split by whether they sold.
///
/// `total_sales` is always `total_sold_sales + total_deficit_sales`.
pub(super) fn compute_statistics(sales: &[Sale]) -> SalesStatistics {
    let mut statistics = SalesStatistics::default();

    for sale in sales {
        if sale.sold {
            statistics.total_sold_sales += sale.price;
            statistics.sold_items += 1;
        } else {
            statistics.total_deficit_sales += sale.price;
            statistics.not_sold_items += 1;
        }
    }

    statistics.total_sales = statistics.total_sold_sales + statistics.total_deficit_sales;

    statistics
}

/// A price bucket for the histogram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct PriceRange {
    /// The lowest price shown in the label.
    pub min: u32,
    /// The inclusive upper bound, `None` for the open-ended last bucket.
    pub max: Option<u32>,
}

impl PriceRange {
    /// The label shown on the chart, e.g. "51 - 100" or "301 - above".
    pub fn label(&self) -> String {
        match self.max {
            Some(max) => format!("{} - {}", self.min, max),
            None => format!("{} - above", self.min),
        }
    }
}

/// The histogram buckets in ascending order.
///
/// A price belongs to the first bucket whose upper bound it does not exceed,
/// so fractional prices between two labels, e.g. 50.5, go in the higher one.
pub(super) const PRICE_RANGES: [PriceRange; 6] = [
    PriceRange {
        min: 0,
        max: Some(50),
    },
    PriceRange {
        min: 51,
        max: Some(100),
    },
    PriceRange {
        min: 101,
        max: Some(150),
    },
    PriceRange {
        min: 151,
        max: Some(200),
    },
    PriceRange {
        min: 201,
        max: Some(300),
    },
    PriceRange {
        min: 301,
        max: None,
    },
];

/// The number of items in a price bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(super) struct PriceRangeCount {
    pub range: String,
    pub count: u64,
}

/// Counts the items in each of the [PRICE_RANGES].
///
/// Always returns six buckets in ascending price order, including empty ones.
pub(super) fn compute_histogram(sales: &[Sale]) -> Vec<PriceRangeCount> {
    let mut counts = [0u64; PRICE_RANGES.len()];

    for sale in sales {
        let bucket = PRICE_RANGES
            .iter()
            .position(|range| range.max.is_none_or(|max| sale.price <= f64::from(max)))
            .unwrap_or(PRICE_RANGES.len() - 1);

        counts[bucket] += 1;
    }

    PRICE_RANGES
        .iter()
        .zip(counts)
        .map(|(range, count)| PriceRangeCount {
            range: range.label(),
            count,
        })
        .collect()
}

/// The number of items in a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(super) struct CategoryCount {
    pub category: String,
    pub count: u64,
}

/// Counts the items in each category that appears in `sales`.
///
/// Categories are sorted by name.
pub(super) fn compute_category_breakdown(sales: &[Sale]) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();

    for sale in sales {
        *counts.entry(sale.category.as_str()).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_owned(),
            count,
        })
        .collect()
}

/// The subset of [SalesStatistics] included in [CombinedData].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CombinedStatistics {
    pub total_sales: f64,
    pub sold_items: u64,
    pub not_sold_items: u64,
}

/// Everything the dashboard shows for a month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CombinedData {
    pub transactions: Vec<Sale>,
    pub statistics: CombinedStatistics,
    pub bar_chart_data: Vec<PriceRangeCount>,
    pub pie_chart_data: Vec<CategoryCount>,
}

/// Bundles the sales with their statistics, histogram and category breakdown.
pub(super) fn compute_combined(sales: Vec<Sale>) -> CombinedData {
    let statistics = compute_statistics(&sales);
    let bar_chart_data = compute_histogram(&sales);
    let pie_chart_data = compute_category_breakdown(&sales);

    CombinedData {
        statistics: CombinedStatistics {
            total_sales: statistics.total_sales,
            sold_items: statistics.sold_items,
            not_sold_items: statistics.not_sold_items,
        },
        transactions: sales,
        bar_chart_data,
        pie_chart_data,
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::dashboard::{
        aggregation::{
            CategoryCount, PRICE_RANGES, compute_category_breakdown, compute_combined,
            compute_histogram, compute_statistics,
        },
        transaction::Sale,
    };

    fn create_test_sale(price: f64, sold: bool, category: &str) -> Sale {
        Sale {
            title: format!("{category} item"),
            price,
            sold,
            date_of_sale: datetime!(2022-03-15 10:00 UTC),
            category: category.to_owned(),
            image_url: None,
        }
    }

    fn histogram_counts(sales: &[Sale]) -> Vec<u64> {
        compute_histogram(sales)
            .into_iter()
            .map(|bucket| bucket.count)
            .collect()
    }

    #[test]
    fn statistics_split_by_sold() {
        let sales = vec![
            create_test_sale(100.0, true, "a"),
            create_test_sale(50.5, true, "a"),
            create_test_sale(20.25, false, "b"),
        ];

        let statistics = compute_statistics(&sales);

        assert_eq!(statistics.total_sold_sales, 150.5);
        assert_eq!(statistics.total_deficit_sales, 20.25);
        assert_eq!(statistics.total_sales, 170.75);
        assert_eq!(statistics.sold_items, 2);
        assert_eq!(statistics.not_sold_items, 1);
    }

    #[test]
    fn statistics_partitions_add_up_to_total() {
        let sales = [0.1, 0.2, 0.3, 109.95, 22.3, 55.99, 7.0]
            .iter()
            .enumerate()
            .map(|(i, price)| create_test_sale(*price, i % 2 == 0, "x"))
            .collect::<Vec<_>>();

        let statistics = compute_statistics(&sales);
        let all_prices: f64 = sales.iter().map(|sale| sale.price).sum();

        assert_eq!(
            statistics.total_sold_sales + statistics.total_deficit_sales,
            statistics.total_sales
        );
        assert!((statistics.total_sales - all_prices).abs() < 1e-9);
    }

    #[test]
    fn statistics_of_no_sales_are_zero() {
        let statistics = compute_statistics(&[]);

        assert_eq!(statistics, Default::default());
    }

    #[test]
    fn histogram_labels_are_fixed() {
        let labels = compute_histogram(&[])
            .into_iter()
            .map(|bucket| bucket.range)
            .collect::<Vec<_>>();

        assert_eq!(
            labels,
            vec![
                "0 - 50",
                "51 - 100",
                "101 - 150",
                "151 - 200",
                "201 - 300",
                "301 - above"
            ]
        );
    }

    #[test]
    fn histogram_bounds_are_inclusive() {
        let sales = [0.0, 50.0, 51.0, 100.0, 101.0, 150.0, 151.0, 200.0, 201.0, 300.0, 301.0]
            .map(|price| create_test_sale(price, false, "x"));

        assert_eq!(histogram_counts(&sales), vec![2, 2, 2, 2, 2, 1]);
    }

    #[test]
    fn histogram_places_fractional_prices_in_next_bucket() {
        let sales = [50.5, 100.01, 300.5, 1000.0].map(|price| create_test_sale(price, false, "x"));

        assert_eq!(histogram_counts(&sales), vec![0, 1, 1, 0, 0, 2]);
    }

    #[test]
    fn histogram_counts_every_sale_once() {
        let sales = (0..500)
            .map(|i| create_test_sale(f64::from(i) * 0.77, i % 3 == 0, "x"))
            .collect::<Vec<_>>();

        let total: u64 = histogram_counts(&sales).iter().sum();

        assert_eq!(total, sales.len() as u64);
        assert_eq!(compute_histogram(&sales).len(), PRICE_RANGES.len());
    }

    #[test]
    fn category_breakdown_counts_observed_categories() {
        let sales = vec![
            create_test_sale(1.0, true, "jewelery"),
            create_test_sale(1.0, false, "electronics"),
            create_test_sale(1.0, false, "jewelery"),
            create_test_sale(1.0, false, "men's clothing"),
        ];

        let breakdown = compute_category_breakdown(&sales);

        assert_eq!(
            breakdown,
            vec![
                CategoryCount {
                    category: "electronics".to_owned(),
                    count: 1
                },
                CategoryCount {
                    category: "jewelery".to_owned(),
                    count: 2
                },
                CategoryCount {
                    category: "men's clothing".to_owned(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn category_breakdown_of_no_sales_is_empty() {
        assert!(compute_category_breakdown(&[]).is_empty());
    }

    #[test]
    fn combined_uses_the_same_sales_for_everything() {
        let sales = vec![
            create_test_sale(10.0, true, "a"),
            create_test_sale(320.0, false, "b"),
        ];

        let combined = compute_combined(sales.clone());

        assert_eq!(combined.transactions, sales);
        assert_eq!(combined.statistics.total_sales, 330.0);
        assert_eq!(combined.statistics.sold_items, 1);
        assert_eq!(combined.statistics.not_sold_items, 1);
        assert_eq!(combined.bar_chart_data, compute_histogram(&sales));
        assert_eq!(combined.pie_chart_data, compute_category_breakdown(&sales));
    }
}
