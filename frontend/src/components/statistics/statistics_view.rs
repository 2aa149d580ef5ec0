use shared::statistics::category_cards;
use shared::{Category, CategoryFilter, DisplayLocale, Statistics, StatisticsView};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use super::category_cards::CategoryCards;
use super::monthly_chart::{ChartKind, MonthlyChart};
use super::statistics_table::StatisticsTable;
use crate::services::Logger;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatisticsTab {
    Line,
    Bar,
    Table,
}

impl StatisticsTab {
    const ALL: [StatisticsTab; 3] = [StatisticsTab::Line, StatisticsTab::Bar, StatisticsTab::Table];

    fn label(&self) -> &'static str {
        match self {
            StatisticsTab::Line => "Trend",
            StatisticsTab::Bar => "By month",
            StatisticsTab::Table => "Table",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct StatisticsPanelProps {
    pub statistics: Statistics,
    pub categories: Vec<Category>,
    pub locale: DisplayLocale,
}

/// Monthly statistics with a category filter and line/bar/table tabs
#[function_component(StatisticsPanel)]
pub fn statistics_panel(props: &StatisticsPanelProps) -> Html {
    let filter = use_state(CategoryFilter::default);
    let tab = use_state(|| StatisticsTab::Line);

    let view = use_memo(
        (
            props.statistics.clone(),
            props.categories.clone(),
            *filter,
            props.locale,
        ),
        |(statistics, categories, filter, locale)| {
            StatisticsView::new(statistics, categories, *filter, *locale)
        },
    );

    let on_filter_change = {
        let filter = filter.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let value = select.value();
            Logger::info_with_component("statistics-view", &format!("Filter changed to {}", value));
            filter.set(CategoryFilter::from_select_value(&value));
        })
    };

    let cards = category_cards(&props.statistics, &props.categories);

    html! {
        <section class="statistics-section">
            <div class="statistics-toolbar">
                <h2>{"Statistics"}</h2>
                <select class="filter-select" onchange={on_filter_change}>
                    <option
                        value={CategoryFilter::All.select_value()}
                        selected={view.filter == CategoryFilter::All}
                    >
                        {"All categories"}
                    </option>
                    {for props.categories.iter().map(|category| html! {
                        <option
                            key={category.id}
                            value={CategoryFilter::Only(category.id).select_value()}
                            selected={view.filter == CategoryFilter::Only(category.id)}
                        >
                            {&category.name}
                        </option>
                    })}
                </select>
            </div>

            <div class="view-toggle">
                {for StatisticsTab::ALL.iter().map(|candidate| {
                    let onclick = {
                        let tab = tab.clone();
                        let candidate = *candidate;
                        Callback::from(move |_: MouseEvent| tab.set(candidate))
                    };
                    html! {
                        <button
                            class={classes!("toggle-btn", (*tab == *candidate).then_some("active"))}
                            {onclick}
                        >
                            {candidate.label()}
                        </button>
                    }
                })}
            </div>

            {if view.is_empty() {
                html! {
                    <div class="chart-empty">
                        <p>{"No statistics yet. Add some expenses to see monthly trends."}</p>
                    </div>
                }
            } else {
                match *tab {
                    StatisticsTab::Line => html! {
                        <MonthlyChart view={(*view).clone()} kind={ChartKind::Line} />
                    },
                    StatisticsTab::Bar => html! {
                        <MonthlyChart view={(*view).clone()} kind={ChartKind::Bar} />
                    },
                    StatisticsTab::Table => html! {
                        <StatisticsTable view={(*view).clone()} />
                    },
                }
            }}

            <CategoryCards {cards} />
        </section>
    }
}
