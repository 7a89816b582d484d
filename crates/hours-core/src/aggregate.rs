//! Hour totals over a dataset, all-time and per service year.
//!
//! Everything here is a pure function of a borrowed [`Dataset`].

use std::fmt;

use serde::Serialize;
use serde::ser::SerializeMap;

use crate::category::Category;
use crate::dataset::{Dataset, Entry};
use crate::types::MonthKey;

/// Reporting year running from September of `start_year` through August of
/// the following year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ServiceYear {
    pub start_year: i32,
}

impl ServiceYear {
    pub const fn new(start_year: i32) -> Self {
        Self { start_year }
    }

    /// The service year a given month belongs to.
    pub const fn containing(month: MonthKey) -> Self {
        if month.month() >= 9 {
            Self::new(month.year())
        } else {
            Self::new(month.year() - 1)
        }
    }

    pub const fn contains(self, month: MonthKey) -> bool {
        (month.year() == self.start_year && month.month() >= 9)
            || (month.year() - 1 == self.start_year && month.month() <= 8)
    }
}

impl fmt::Display for ServiceYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.start_year, i64::from(self.start_year) + 1)
    }
}

/// Hours per category, with every category present.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CategoryTotals {
    hours: [f64; Category::COUNT],
}

impl CategoryTotals {
    pub const fn get(&self, category: Category) -> f64 {
        self.hours[category.index()]
    }

    /// Categories and their totals in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// Sum over all categories.
    pub fn sum(&self) -> f64 {
        self.hours.iter().sum()
    }

    fn add(&mut self, category: Category, hours: f64) {
        self.hours[category.index()] += hours;
    }
}

impl Serialize for CategoryTotals {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(Category::COUNT))?;
        for (category, hours) in self.iter() {
            map.serialize_entry(category.identifier(), &hours)?;
        }
        map.end()
    }
}

fn sum_by_category<'a>(entries: impl Iterator<Item = &'a Entry>) -> CategoryTotals {
    let mut totals = CategoryTotals::default();
    for entry in entries {
        // Rows with unknown categories stay stored but are not counted here.
        if let Some(category) = entry.category() {
            totals.add(category, entry.hours);
        }
    }
    totals
}

/// Whether a stored date string falls in the service year starting in
/// `start_year`. Unparseable dates are never in any service year.
pub fn is_in_service_year(date: &str, start_year: i32) -> bool {
    MonthKey::parse_lenient(date).is_some_and(|month| ServiceYear::new(start_year).contains(month))
}

/// All-time hours per category.
pub fn totals_by_category(dataset: &Dataset) -> CategoryTotals {
    sum_by_category(dataset.entries.iter())
}

/// All-time general hours, whatever the category.
pub fn total_general(dataset: &Dataset) -> f64 {
    dataset.entries.iter().map(|e| e.hours).sum()
}

/// All-time LDC hours.
pub fn total_ldc(dataset: &Dataset) -> f64 {
    dataset.ldc_entries.iter().map(|e| e.hours).sum()
}

/// Hours per category within one service year.
pub fn totals_by_category_in_service_year(dataset: &Dataset, start_year: i32) -> CategoryTotals {
    sum_by_category(
        dataset
            .entries
            .iter()
            .filter(|e| is_in_service_year(&e.date, start_year)),
    )
}

/// LDC hours within one service year.
pub fn total_ldc_in_service_year(dataset: &Dataset, start_year: i32) -> f64 {
    dataset
        .ldc_entries
        .iter()
        .filter(|e| is_in_service_year(&e.date, start_year))
        .map(|e| e.hours)
        .sum()
}

/// General, LDC and combined hours for one period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodTotals {
    pub general: f64,
    pub ldc: f64,
    pub total: f64,
}

impl PeriodTotals {
    fn new(general: f64, ldc: f64) -> Self {
        Self {
            general,
            ldc,
            total: general + ldc,
        }
    }
}

/// Summary figures shown in the overview report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub service_year: ServiceYear,
    pub all_time: PeriodTotals,
    pub in_service_year: PeriodTotals,
    pub by_category: CategoryTotals,
}

impl Overview {
    pub fn compute(dataset: &Dataset, service_year: ServiceYear) -> Self {
        let start = service_year.start_year;
        // Service-year general hours only count known categories.
        let year_general = totals_by_category_in_service_year(dataset, start).sum();
        Self {
            service_year,
            all_time: PeriodTotals::new(total_general(dataset), total_ldc(dataset)),
            in_service_year: PeriodTotals::new(
                year_general,
                total_ldc_in_service_year(dataset, start),
            ),
            by_category: totals_by_category(dataset),
        }
    }
}

#[cfg(test)]
#[expect(
    clippy::float_cmp,
    reason = "sums of quarter hours are exact in binary floating point"
)]
mod tests {
    use super::*;

    use crate::dataset::LdcEntry;

    fn month(year: i32, month: u32) -> MonthKey {
        MonthKey::new(year, month).unwrap()
    }

    fn sample() -> Dataset {
        Dataset {
            entries: vec![
                Entry::new(month(2024, 9), Category::Trolley, 1.0),
                Entry::new(month(2024, 9), Category::Trolley, 0.5),
                Entry::new(month(2025, 8), Category::Port, 2.25),
                Entry::new(month(2025, 9), Category::Informal, 3.0),
                Entry {
                    date: "2024-10-01".to_string(),
                    service_type: "Gardening".to_string(),
                    hours: 4.0,
                },
                Entry {
                    date: "garbage".to_string(),
                    service_type: "Trolley".to_string(),
                    hours: 0.75,
                },
            ],
            ldc_entries: vec![
                LdcEntry::new(month(2024, 8), 5.0),
                LdcEntry::new(month(2024, 11), 1.5),
            ],
            selected_category: Category::Trolley,
        }
    }

    #[test]
    fn service_year_boundaries() {
        assert!(is_in_service_year("2024-09-01", 2024));
        assert!(is_in_service_year("2025-08-01", 2024));
        assert!(!is_in_service_year("2025-09-01", 2024));
        assert!(!is_in_service_year("2024-01-01", 2024));
        assert!(!is_in_service_year("2024-08-01", 2024));
    }

    #[test]
    fn unparseable_dates_are_in_no_service_year() {
        assert!(!is_in_service_year("", 2024));
        assert!(!is_in_service_year("garbage", 2024));
        assert!(!is_in_service_year("2024", 2024));
    }

    #[test]
    fn extreme_start_years_match_nothing() {
        assert!(!is_in_service_year("2024-09-01", i32::MAX));
        assert!(!is_in_service_year("2024-01-01", i32::MIN));
        assert!(is_in_service_year("9999-08-01", 9998));
        assert_eq!(
            ServiceYear::new(i32::MAX).to_string(),
            "2147483647/2147483648"
        );
    }

    #[test]
    fn service_year_containing_month() {
        assert_eq!(ServiceYear::containing(month(2024, 9)), ServiceYear::new(2024));
        assert_eq!(ServiceYear::containing(month(2024, 12)), ServiceYear::new(2024));
        assert_eq!(ServiceYear::containing(month(2025, 1)), ServiceYear::new(2024));
        assert_eq!(ServiceYear::containing(month(2025, 8)), ServiceYear::new(2024));
        assert_eq!(ServiceYear::new(2024).to_string(), "2024/2025");
    }

    #[test]
    fn all_time_totals_include_every_category() {
        let totals = totals_by_category(&Dataset::default());
        assert_eq!(totals.iter().count(), Category::COUNT);
        assert!(totals.iter().all(|(_, hours)| hours == 0.0));
    }

    #[test]
    fn same_month_rows_sum_without_merging() {
        let dataset = sample();
        let totals = totals_by_category(&dataset);
        assert_eq!(totals.get(Category::Trolley), 2.25);
        assert_eq!(dataset.entries.len(), 6);
    }

    #[test]
    fn unknown_categories_are_skipped_per_category_but_counted_in_general() {
        let dataset = sample();
        let totals = totals_by_category(&dataset);
        assert_eq!(totals.sum(), 2.25 + 2.25 + 3.0);
        assert_eq!(total_general(&dataset), 1.0 + 0.5 + 2.25 + 3.0 + 4.0 + 0.75);
    }

    #[test]
    fn service_year_totals_filter_by_window() {
        let dataset = sample();
        let totals = totals_by_category_in_service_year(&dataset, 2024);
        assert_eq!(totals.get(Category::Trolley), 1.5);
        assert_eq!(totals.get(Category::Port), 2.25);
        assert_eq!(totals.get(Category::Informal), 0.0);
        assert_eq!(total_ldc_in_service_year(&dataset, 2024), 1.5);
        assert_eq!(total_ldc_in_service_year(&dataset, 2023), 5.0);
        assert_eq!(total_ldc(&dataset), 6.5);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let dataset = sample();
        let snapshot = dataset.clone();
        assert_eq!(totals_by_category(&dataset), totals_by_category(&dataset));
        assert_eq!(total_general(&dataset), total_general(&dataset));
        assert_eq!(
            totals_by_category_in_service_year(&dataset, 2024),
            totals_by_category_in_service_year(&dataset, 2024)
        );
        assert_eq!(
            Overview::compute(&dataset, ServiceYear::new(2024)),
            Overview::compute(&dataset, ServiceYear::new(2024))
        );
        assert_eq!(dataset, snapshot);
    }

    #[test]
    fn overview_combines_periods() {
        let overview = Overview::compute(&sample(), ServiceYear::new(2024));
        assert_eq!(overview.all_time.general, 11.5);
        assert_eq!(overview.all_time.ldc, 6.5);
        assert_eq!(overview.all_time.total, 18.0);
        assert_eq!(overview.in_service_year.general, 3.75);
        assert_eq!(overview.in_service_year.ldc, 1.5);
        assert_eq!(overview.in_service_year.total, 5.25);
    }

    #[test]
    fn category_totals_serialize_in_display_order() {
        let json = serde_json::to_string(&totals_by_category(&sample())).unwrap();
        assert!(json.starts_with(r#"{"Chinesischer Haus-zu-Haus":0.0,"#));
        assert!(json.contains(r#""Trolley":2.25"#));
        assert!(json.ends_with(r#""Sonstige":0.0}"#));
    }
}
