use shared::ActiveView;
use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::{
    CategoryDetail, CategoryFormModal, CategoryList, CategoryPills, ExpenseFormModal, Header,
    NotificationStack, OverviewPanel, StatisticsPanel,
};
use hooks::use_expense_tracker;
use services::{logging, AppConfig, HttpApiClient};

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: AppConfig,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let locale = props.config.locale;
    let api_client = use_memo(props.config.api_url.clone(), |api_url| {
        HttpApiClient::with_base_url(api_url)
    });
    let tracker = use_expense_tracker(&api_client);
    let state = &tracker.state;
    let actions = &tracker.actions;

    let on_add_category = {
        let open_category_form = actions.open_category_form.clone();
        Callback::from(move |_: ()| open_category_form.emit(None))
    };

    let on_edit_category = {
        let open_category_form = actions.open_category_form.clone();
        Callback::from(move |category| open_category_form.emit(Some(category)))
    };

    let on_add_expense = {
        let open_expense_form = actions.open_expense_form.clone();
        Callback::from(move |_: ()| open_expense_form.emit(None))
    };

    let on_edit_expense = {
        let open_expense_form = actions.open_expense_form.clone();
        Callback::from(move |expense| open_expense_form.emit(Some(expense)))
    };

    let main_section = match state.active_view() {
        ActiveView::Statistics => html! {
            <StatisticsPanel
                statistics={state.statistics.clone()}
                categories={state.categories.clone()}
                {locale}
            />
        },
        ActiveView::CategoryDetail(category) => html! {
            <CategoryDetail
                category={category.clone()}
                expenses={state.expenses.clone()}
                {locale}
                loading={state.expenses_loading || (state.loading && state.expenses.is_empty())}
                on_add_expense={on_add_expense}
                on_edit_category={on_edit_category.clone()}
                on_delete_category={actions.delete_category.clone()}
                on_edit_expense={on_edit_expense}
                on_delete_expense={actions.delete_expense.clone()}
            />
        },
        ActiveView::AllCategories => html! {
            <>
                <OverviewPanel
                    statistics={state.statistics.clone()}
                    categories={state.categories.clone()}
                />
                {if state.loading && state.categories.is_empty() {
                    html! { <div class="loading">{"Loading categories..."}</div> }
                } else {
                    html! {
                        <CategoryList
                            categories={state.categories.clone()}
                            on_view={actions.select_category.clone()}
                            on_edit={on_edit_category.clone()}
                            on_delete={actions.delete_category.clone()}
                        />
                    }
                }}
            </>
        },
    };

    html! {
        <>
            <Header
                total_amount={state.statistics.total_amount}
                show_statistics={state.show_statistics}
                on_add_category={on_add_category}
                on_toggle_statistics={actions.toggle_statistics.clone()}
            />

            <main class="main">
                <div class="container">
                    <CategoryPills
                        categories={state.categories.clone()}
                        selected_id={state.selected_category_id()}
                        on_select={actions.select_category.clone()}
                        on_show_all={actions.show_all_categories.clone()}
                    />
                    {main_section}
                </div>
            </main>

            <CategoryFormModal
                is_open={state.category_form_open}
                initial_data={state.editing_category.clone()}
                on_submit={actions.submit_category.clone()}
                on_close={actions.close_category_form.clone()}
            />
            <ExpenseFormModal
                is_open={state.expense_form_open}
                initial_data={state.editing_expense.clone()}
                category_name={state.selected_category.as_ref().map(|c| c.name.clone())}
                on_submit={actions.submit_expense.clone()}
                on_close={actions.close_expense_form.clone()}
            />
            <NotificationStack
                notifications={state.notifications.clone()}
                on_dismiss={actions.dismiss_notification.clone()}
            />
        </>
    }
}

fn main() {
    let (config, warnings) = AppConfig::from_build_env();
    logging::init(config.log_level);
    for warning in warnings {
        log::warn!("{}", warning);
    }
    log::info!("Expense tracker talking to {}", config.api_url);

    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
