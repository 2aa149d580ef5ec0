//! Chart-ready derivations of the statistics snapshot.
//!
//! The line chart, bar chart and table all render from one `StatisticsView`
//! so a filter change applies to the three of them at once.

use crate::display::{self, DisplayLocale};
use crate::{Category, Statistics};

/// Palette shared by charts, table badges and category cards.
/// Index 0 is reserved for the month total.
pub const SERIES_COLORS: [&str; 9] = [
    "#FFFFFF", "#A3D9D4", "#84CAC3", "#65BCB3", "#46AEA2",
    "#379F94", "#288F86", "#198077", "#0A7069",
];

pub fn series_color(index: usize) -> &'static str {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

/// Which categories the statistics view shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(i64),
}

impl CategoryFilter {
    pub const ALL_VALUE: &'static str = "all";

    /// Parse the value of the filter `<select>`; unknown values mean all.
    pub fn from_select_value(value: &str) -> Self {
        match value.trim().parse::<i64>() {
            Ok(id) => CategoryFilter::Only(id),
            Err(_) => CategoryFilter::All,
        }
    }

    pub fn select_value(&self) -> String {
        match self {
            CategoryFilter::All => Self::ALL_VALUE.to_string(),
            CategoryFilter::Only(id) => id.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Series {
    /// Sum over all categories for the month
    Total,
    Category {
        id: i64,
        name: String,
        color_index: usize,
    },
}

impl Series {
    pub fn label(&self) -> &str {
        match self {
            Series::Total => "Total",
            Series::Category { name, .. } => name,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Series::Total => series_color(0),
            Series::Category { color_index, .. } => series_color(*color_index),
        }
    }
}

/// One month of the chart data
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRow {
    /// `YYYY-MM`
    pub month: String,
    pub label: String,
    pub total: f64,
    /// `(category id, amount)` in category-list order
    pub amounts: Vec<(i64, f64)>,
}

impl ChartRow {
    pub fn amount_for(&self, series: &Series) -> f64 {
        match series {
            Series::Total => self.total,
            Series::Category { id, .. } => self
                .amounts
                .iter()
                .find(|(category_id, _)| category_id == id)
                .map(|(_, amount)| *amount)
                .unwrap_or(0.0),
        }
    }
}

/// One row per month in chronological order, with every category's amount
/// for that month (0 when the category had no spending).
pub fn chart_rows(
    statistics: &Statistics,
    categories: &[Category],
    locale: DisplayLocale,
) -> Vec<ChartRow> {
    statistics
        .monthly_totals
        .iter()
        .map(|(month, total)| ChartRow {
            month: month.clone(),
            label: display::format_month_key(month, locale),
            total: *total,
            amounts: categories
                .iter()
                .map(|category| {
                    let amount = statistics
                        .category_stat(category.id)
                        .map(|stat| stat.amount_for_month(month))
                        .unwrap_or(0.0);
                    (category.id, amount)
                })
                .collect(),
        })
        .collect()
}

/// Everything the three statistics renderings draw from
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsView {
    pub filter: CategoryFilter,
    pub rows: Vec<ChartRow>,
    /// Category series that pass the filter
    pub categories: Vec<Series>,
}

impl StatisticsView {
    /// A filter naming a category that no longer exists shows all categories.
    pub fn new(
        statistics: &Statistics,
        categories: &[Category],
        filter: CategoryFilter,
        locale: DisplayLocale,
    ) -> Self {
        let filter = match filter {
            CategoryFilter::Only(id) if !categories.iter().any(|c| c.id == id) => {
                CategoryFilter::All
            }
            other => other,
        };

        let series = categories
            .iter()
            .enumerate()
            .filter(|(_, category)| match filter {
                CategoryFilter::All => true,
                CategoryFilter::Only(id) => category.id == id,
            })
            .map(|(index, category)| Series::Category {
                id: category.id,
                name: category.name.clone(),
                color_index: index + 1,
            })
            .collect();

        Self {
            filter,
            rows: chart_rows(statistics, categories, locale),
            categories: series,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn with_total(&self, total_first: bool) -> Vec<Series> {
        let mut series = self.categories.clone();
        if self.filter == CategoryFilter::All {
            if total_first {
                series.insert(0, Series::Total);
            } else {
                series.push(Series::Total);
            }
        }
        series
    }

    /// Total line first (all-categories mode only), then categories
    pub fn line_series(&self) -> Vec<Series> {
        self.with_total(true)
    }

    pub fn bar_series(&self) -> Vec<Series> {
        self.categories.clone()
    }

    /// Categories, then the total column (all-categories mode only)
    pub fn table_columns(&self) -> Vec<Series> {
        self.with_total(false)
    }

    /// Largest value any of `series` reaches, for the chart's y range
    pub fn max_value(&self, series: &[Series]) -> f64 {
        self.rows
            .iter()
            .flat_map(|row| series.iter().map(move |s| row.amount_for(s)))
            .fold(0.0, f64::max)
    }
}

/// Month-over-month movement of the latest month total
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthChange {
    /// Absolute percentage
    pub percent: f64,
    pub increase: bool,
}

/// Compare the two most recent months of `monthly_totals`.
///
/// Fewer than two months is no change; a previous month of zero counts as a
/// 100% increase.
pub fn month_over_month(statistics: &Statistics) -> MonthChange {
    let mut recent = statistics.monthly_totals.values().rev();
    let (current, previous) = match (recent.next(), recent.next()) {
        (Some(current), Some(previous)) => (*current, *previous),
        _ => {
            return MonthChange {
                percent: 0.0,
                increase: false,
            }
        }
    };

    if previous == 0.0 {
        return MonthChange {
            percent: 100.0,
            increase: true,
        };
    }

    let change = (current - previous) / previous * 100.0;
    MonthChange {
        percent: change.abs(),
        increase: change > 0.0,
    }
}

/// Headline numbers of the overview panel
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub total_amount: f64,
    pub current_month_amount: f64,
    pub month_change: MonthChange,
    pub category_count: usize,
    pub average_per_category: f64,
}

impl Overview {
    pub fn new(statistics: &Statistics, categories: &[Category]) -> Self {
        let category_count = categories.len();
        let average_per_category = if category_count > 0 {
            statistics.total_amount / category_count as f64
        } else {
            0.0
        };

        Self {
            total_amount: statistics.total_amount,
            current_month_amount: statistics.current_month_amount,
            month_change: month_over_month(statistics),
            category_count,
            average_per_category,
        }
    }
}

/// Per-category summary card below the charts
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCard {
    pub id: i64,
    pub name: String,
    pub total_amount: f64,
    pub latest_month_amount: f64,
    pub color: &'static str,
}

/// Cards follow the snapshot's category order; colours match the chart
/// series of the same category.
pub fn category_cards(statistics: &Statistics, categories: &[Category]) -> Vec<CategoryCard> {
    statistics
        .category_stats
        .iter()
        .enumerate()
        .map(|(index, stat)| {
            let color_index = categories
                .iter()
                .position(|category| category.id == stat.id)
                .unwrap_or(index);
            CategoryCard {
                id: stat.id,
                name: stat.name.clone(),
                total_amount: stat.total_amount,
                latest_month_amount: stat.latest_month_amount(),
                color: series_color(color_index + 1),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CategoryStat;
    use std::collections::BTreeMap;

    fn category(id: i64, name: &str) -> Category {
        Category {
            id,
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn months(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn snapshot() -> Statistics {
        Statistics {
            total_amount: 60.0,
            current_month_amount: 25.0,
            category_stats: vec![
                CategoryStat {
                    id: 1,
                    name: "Groceries".to_string(),
                    total_amount: 45.0,
                    monthly_stats: months(&[("2024-01", 20.0), ("2024-02", 25.0)]),
                },
                CategoryStat {
                    id: 2,
                    name: "Transport".to_string(),
                    total_amount: 15.0,
                    monthly_stats: months(&[("2023-12", 15.0)]),
                },
            ],
            // Inserted out of order on purpose
            monthly_totals: months(&[("2024-02", 25.0), ("2023-12", 15.0), ("2024-01", 20.0)]),
        }
    }

    fn categories() -> Vec<Category> {
        vec![category(1, "Groceries"), category(2, "Transport")]
    }

    #[test]
    fn test_rows_are_chronological_with_zero_fallback() {
        let rows = chart_rows(&snapshot(), &categories(), DisplayLocale::English);

        let months: Vec<&str> = rows.iter().map(|r| r.month.as_str()).collect();
        assert_eq!(months, vec!["2023-12", "2024-01", "2024-02"]);
        assert_eq!(rows[0].label, "December 2023");
        assert_eq!(rows[0].amounts, vec![(1, 0.0), (2, 15.0)]);
        assert_eq!(rows[2].amounts, vec![(1, 25.0), (2, 0.0)]);
        assert_eq!(rows[2].total, 25.0);
    }

    #[test]
    fn test_category_without_stats_gets_zeroes() {
        let mut list = categories();
        list.push(category(3, "Fun"));
        let rows = chart_rows(&snapshot(), &list, DisplayLocale::English);
        assert!(rows.iter().all(|row| row.amounts[2] == (3, 0.0)));
    }

    #[test]
    fn test_all_filter_series() {
        let view = StatisticsView::new(&snapshot(), &categories(), CategoryFilter::All, DisplayLocale::English);

        let line = view.line_series();
        let labels: Vec<&str> = line.iter().map(|s| s.label()).collect();
        assert_eq!(labels, vec!["Total", "Groceries", "Transport"]);
        assert_eq!(view.bar_series().len(), 2);
        assert_eq!(view.table_columns().last(), Some(&Series::Total));
        assert_eq!(view.max_value(&view.line_series()), 25.0);
    }

    #[test]
    fn test_single_category_filter_applies_to_every_rendering() {
        let view = StatisticsView::new(
            &snapshot(),
            &categories(),
            CategoryFilter::Only(2),
            DisplayLocale::English,
        );
        let transport = Series::Category {
            id: 2,
            name: "Transport".to_string(),
            color_index: 2,
        };

        assert_eq!(view.line_series(), vec![transport.clone()]);
        assert_eq!(view.bar_series(), vec![transport.clone()]);
        assert_eq!(view.table_columns(), vec![transport.clone()]);
        assert_eq!(view.max_value(&view.bar_series()), 15.0);
        assert_eq!(view.rows.len(), 3);
    }

    #[test]
    fn test_filter_for_missing_category_falls_back_to_all() {
        let view = StatisticsView::new(
            &snapshot(),
            &categories(),
            CategoryFilter::Only(99),
            DisplayLocale::English,
        );
        assert_eq!(view.filter, CategoryFilter::All);
        assert_eq!(view.categories.len(), 2);
    }

    #[test]
    fn test_filter_select_values() {
        assert_eq!(CategoryFilter::from_select_value("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::from_select_value("12"), CategoryFilter::Only(12));
        assert_eq!(CategoryFilter::from_select_value("x"), CategoryFilter::All);
        assert_eq!(CategoryFilter::Only(12).select_value(), "12");
        assert_eq!(CategoryFilter::All.select_value(), "all");
    }

    #[test]
    fn test_empty_snapshot_has_no_rows() {
        let view = StatisticsView::new(
            &Statistics::default(),
            &categories(),
            CategoryFilter::All,
            DisplayLocale::English,
        );
        assert!(view.is_empty());
        assert_eq!(view.max_value(&view.line_series()), 0.0);
    }

    #[test]
    fn test_month_over_month() {
        let change = month_over_month(&snapshot());
        assert!(change.increase);
        assert!((change.percent - 25.0).abs() < 1e-9);

        let mut statistics = snapshot();
        statistics.monthly_totals = months(&[("2024-01", 40.0), ("2024-02", 10.0)]);
        let change = month_over_month(&statistics);
        assert!(!change.increase);
        assert!((change.percent - 75.0).abs() < 1e-9);

        statistics.monthly_totals = months(&[("2024-01", 0.0), ("2024-02", 10.0)]);
        assert_eq!(
            month_over_month(&statistics),
            MonthChange { percent: 100.0, increase: true }
        );

        assert_eq!(
            month_over_month(&Statistics::default()),
            MonthChange { percent: 0.0, increase: false }
        );
    }

    #[test]
    fn test_overview_average() {
        let overview = Overview::new(&snapshot(), &categories());
        assert_eq!(overview.category_count, 2);
        assert_eq!(overview.average_per_category, 30.0);

        let overview = Overview::new(&snapshot(), &[]);
        assert_eq!(overview.average_per_category, 0.0);
    }

    #[test]
    fn test_category_cards_match_series_colours() {
        let cards = category_cards(&snapshot(), &categories());
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].latest_month_amount, 25.0);
        assert_eq!(cards[0].color, series_color(1));
        assert_eq!(cards[1].color, series_color(2));
    }
}
