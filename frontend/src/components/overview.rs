use shared::display::format_currency;
use shared::statistics::{MonthChange, Overview};
use shared::{Category, Statistics};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct OverviewPanelProps {
    pub statistics: Statistics,
    pub categories: Vec<Category>,
}

fn change_label(change: &MonthChange) -> String {
    let arrow = if change.increase { "▲" } else { "▼" };
    format!("{} {:.1}% vs last month", arrow, change.percent)
}

#[function_component(OverviewPanel)]
pub fn overview_panel(props: &OverviewPanelProps) -> Html {
    let overview = Overview::new(&props.statistics, &props.categories);
    let change_class = if overview.month_change.increase {
        "change-increase"
    } else {
        "change-decrease"
    };

    html! {
        <section class="overview-panel">
            <div class="overview-card">
                <span class="overview-label">{"Total spent"}</span>
                <span class="overview-value">{format_currency(overview.total_amount)}</span>
            </div>
            <div class="overview-card">
                <span class="overview-label">{"This month"}</span>
                <span class="overview-value">{format_currency(overview.current_month_amount)}</span>
                <span class={classes!("overview-change", change_class)}>
                    {change_label(&overview.month_change)}
                </span>
            </div>
            <div class="overview-card">
                <span class="overview-label">{"Categories"}</span>
                <span class="overview-value">{overview.category_count.to_string()}</span>
            </div>
            <div class="overview-card">
                <span class="overview-label">{"Average per category"}</span>
                <span class="overview-value">{format_currency(overview.average_per_category)}</span>
            </div>
        </section>
    }
}
