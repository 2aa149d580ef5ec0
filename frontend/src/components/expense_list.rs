use gloo::dialogs::confirm;
use shared::display::{format_currency, format_long_date};
use shared::{DisplayLocale, Expense};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ExpenseListProps {
    pub expenses: Vec<Expense>,
    pub locale: DisplayLocale,
    pub on_edit: Callback<Expense>,
    pub on_delete: Callback<i64>,
}

#[function_component(ExpenseList)]
pub fn expense_list(props: &ExpenseListProps) -> Html {
    if props.expenses.is_empty() {
        return html! {
            <div class="empty-state">
                <p>{"No expenses yet in this category."}</p>
            </div>
        };
    }

    html! {
        <div class="table-container">
            <table class="expenses-table">
                <thead>
                    <tr>
                        <th>{"Name"}</th>
                        <th>{"Amount"}</th>
                        <th>{"Date"}</th>
                        <th>{"Description"}</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {for props.expenses.iter().map(|expense| {
                        let on_edit = {
                            let on_edit = props.on_edit.clone();
                            let expense = expense.clone();
                            Callback::from(move |_: MouseEvent| on_edit.emit(expense.clone()))
                        };
                        let on_delete = {
                            let on_delete = props.on_delete.clone();
                            let id = expense.id;
                            let prompt = format!("Delete expense \"{}\"?", expense.name);
                            Callback::from(move |_: MouseEvent| {
                                if confirm(&prompt) {
                                    on_delete.emit(id);
                                }
                            })
                        };

                        html! {
                            <tr key={expense.id}>
                                <td class="expense-name">{&expense.name}</td>
                                <td class="amount">{format_currency(expense.amount)}</td>
                                <td class="date">{format_long_date(&expense.date, props.locale)}</td>
                                <td class="description">{&expense.description}</td>
                                <td class="row-actions">
                                    <button class="btn btn-small btn-secondary" onclick={on_edit}>{"Edit"}</button>
                                    <button class="btn btn-small btn-danger" onclick={on_delete}>{"Delete"}</button>
                                </td>
                            </tr>
                        }
                    })}
                </tbody>
            </table>
        </div>
    }
}
