use gloo::dialogs::confirm;
use shared::display::format_currency;
use shared::{Category, DisplayLocale, Expense};
use yew::prelude::*;

use super::category_list::delete_category_prompt;
use super::expense_list::ExpenseList;

#[derive(Properties, PartialEq)]
pub struct CategoryDetailProps {
    pub category: Category,
    pub expenses: Vec<Expense>,
    pub locale: DisplayLocale,
    pub loading: bool,
    pub on_add_expense: Callback<()>,
    pub on_edit_category: Callback<Category>,
    pub on_delete_category: Callback<i64>,
    pub on_edit_expense: Callback<Expense>,
    pub on_delete_expense: Callback<i64>,
}

/// Selected category summary and its expense table
#[function_component(CategoryDetail)]
pub fn category_detail(props: &CategoryDetailProps) -> Html {
    let on_add_expense = {
        let on_add_expense = props.on_add_expense.clone();
        Callback::from(move |_: MouseEvent| on_add_expense.emit(()))
    };

    let on_edit_category = {
        let on_edit_category = props.on_edit_category.clone();
        let category = props.category.clone();
        Callback::from(move |_: MouseEvent| on_edit_category.emit(category.clone()))
    };

    let on_delete_category = {
        let on_delete_category = props.on_delete_category.clone();
        let id = props.category.id;
        let prompt = delete_category_prompt(&props.category.name);
        Callback::from(move |_: MouseEvent| {
            if confirm(&prompt) {
                on_delete_category.emit(id);
            }
        })
    };

    let category = &props.category;

    html! {
        <section class="category-detail">
            <div class="summary-card">
                <div class="summary-info">
                    <h2>{&category.name}</h2>
                    {if category.description.is_empty() {
                        html! {}
                    } else {
                        html! { <p class="category-description">{&category.description}</p> }
                    }}
                </div>
                <div class="summary-total">
                    <span class="summary-label">{"Total"}</span>
                    <span class="summary-amount">{format_currency(category.total_amount)}</span>
                </div>
                <div class="card-actions">
                    <button class="btn btn-secondary" onclick={on_edit_category}>{"Edit category"}</button>
                    <button class="btn btn-danger" onclick={on_delete_category}>{"Delete category"}</button>
                    <button class="btn btn-primary" onclick={on_add_expense}>{"Add expense"}</button>
                </div>
            </div>

            {if props.loading {
                html! { <div class="loading">{"Loading expenses..."}</div> }
            } else {
                html! {
                    <ExpenseList
                        expenses={props.expenses.clone()}
                        locale={props.locale}
                        on_edit={props.on_edit_expense.clone()}
                        on_delete={props.on_delete_expense.clone()}
                    />
                }
            }}
        </section>
    }
}
