pub mod category_cards;
pub mod monthly_chart;
pub mod statistics_table;
pub mod statistics_view;

pub use statistics_view::StatisticsPanel;
