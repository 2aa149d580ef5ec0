use shared::{Expense, ExpenseDraft, ExpenseForm};
use web_sys::{HtmlInputElement, HtmlTextAreaElement, MouseEvent};
use yew::prelude::*;

use crate::services::date_utils::get_current_date;
use crate::services::Logger;

#[derive(Properties, PartialEq)]
pub struct ExpenseFormModalProps {
    pub is_open: bool,
    /// Expense being edited, `None` when creating
    pub initial_data: Option<Expense>,
    /// Selected category, shown in the create header
    pub category_name: Option<String>,
    pub on_submit: Callback<ExpenseDraft>,
    pub on_close: Callback<()>,
}

fn modal_title(is_edit: bool, category_name: Option<&str>) -> String {
    match (is_edit, category_name) {
        (true, _) => "Edit expense".to_string(),
        (false, Some(name)) => format!("New expense in {}", name),
        (false, None) => "New expense".to_string(),
    }
}

#[function_component(ExpenseFormModal)]
pub fn expense_form_modal(props: &ExpenseFormModalProps) -> Html {
    let form = use_state(|| ExpenseForm::from_initial(props.initial_data.as_ref(), get_current_date()));
    let error_message = use_state(|| Option::<String>::None);

    use_effect_with((props.initial_data.clone(), props.is_open), {
        let form = form.clone();
        let error_message = error_message.clone();
        move |(initial_data, _)| {
            form.set(ExpenseForm::from_initial(initial_data.as_ref(), get_current_date()));
            error_message.set(None);
            || ()
        }
    });

    let on_name_input = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.name = input.value();
            form.set(next);
        })
    };

    let on_amount_input = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.set_amount(&input.value());
            form.set(next);
        })
    };

    let on_date_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.date = input.value();
            form.set(next);
        })
    };

    let on_description_input = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.description = input.value();
            form.set(next);
        })
    };

    let on_submit = {
        let form = form.clone();
        let error_message = error_message.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match form.to_draft() {
                Ok(draft) => {
                    error_message.set(None);
                    on_submit.emit(draft);
                }
                Err(e) => {
                    Logger::debug_with_component("expense-form", &format!("Submission blocked: {}", e));
                    error_message.set(Some(e.to_string()));
                }
            }
        })
    };

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(());
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| {
            on_close.emit(());
        })
    };

    if !props.is_open {
        return html! {};
    }

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal" onclick={on_modal_click}>
                <div class="modal-content">
                    <h3 class="modal-title">
                        {modal_title(form.is_edit(), props.category_name.as_deref())}
                    </h3>

                    {if let Some(error) = (*error_message).clone() {
                        html! { <div class="form-error">{error}</div> }
                    } else {
                        html! {}
                    }}

                    <form class="modal-form" onsubmit={on_submit}>
                        <div class="form-group">
                            <label for="expense-name">{"Name"}</label>
                            <input
                                id="expense-name"
                                type="text"
                                class="form-input"
                                placeholder="e.g. Milk"
                                value={form.name.clone()}
                                oninput={on_name_input}
                                required=true
                                autofocus=true
                            />
                        </div>

                        <div class="form-group">
                            <label for="expense-amount">{"Amount"}</label>
                            <input
                                id="expense-amount"
                                type="number"
                                step="0.01"
                                class="form-input"
                                value={form.amount.input_value()}
                                oninput={on_amount_input}
                                required=true
                            />
                        </div>

                        <div class="form-group">
                            <label for="expense-date">{"Date"}</label>
                            <input
                                id="expense-date"
                                type="date"
                                class="form-input"
                                value={form.date.clone()}
                                onchange={on_date_change}
                                required=true
                            />
                        </div>

                        <div class="form-group">
                            <label for="expense-description">{"Description"}</label>
                            <textarea
                                id="expense-description"
                                class="form-input"
                                rows="2"
                                value={form.description.clone()}
                                oninput={on_description_input}
                            />
                        </div>

                        <div class="modal-buttons">
                            <button type="submit" class="btn btn-primary">
                                {if form.is_edit() { "Save" } else { "Add" }}
                            </button>
                            <button type="button" class="btn btn-secondary" onclick={on_cancel}>
                                {"Cancel"}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
