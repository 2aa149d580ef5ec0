use shared::{Category, CategoryForm, CategoryRequest};
use web_sys::{HtmlInputElement, HtmlTextAreaElement, MouseEvent};
use yew::prelude::*;

use crate::services::Logger;

#[derive(Properties, PartialEq)]
pub struct CategoryFormModalProps {
    pub is_open: bool,
    /// Category being edited, `None` when creating
    pub initial_data: Option<Category>,
    pub on_submit: Callback<CategoryRequest>,
    pub on_close: Callback<()>,
}

#[function_component(CategoryFormModal)]
pub fn category_form_modal(props: &CategoryFormModalProps) -> Html {
    let form = use_state(|| CategoryForm::from_initial(props.initial_data.as_ref()));
    let error_message = use_state(|| Option::<String>::None);

    // Reset whenever the modal opens or the editing target changes
    use_effect_with((props.initial_data.clone(), props.is_open), {
        let form = form.clone();
        let error_message = error_message.clone();
        move |(initial_data, _)| {
            form.set(CategoryForm::from_initial(initial_data.as_ref()));
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
            match form.to_request() {
                Ok(request) => {
                    error_message.set(None);
                    on_submit.emit(request);
                }
                Err(e) => {
                    Logger::debug_with_component("category-form", &format!("Submission blocked: {}", e));
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
                        {if form.is_edit() { "Edit category" } else { "New category" }}
                    </h3>

                    {if let Some(error) = (*error_message).clone() {
                        html! { <div class="form-error">{error}</div> }
                    } else {
                        html! {}
                    }}

                    <form class="modal-form" onsubmit={on_submit}>
                        <div class="form-group">
                            <label for="category-name">{"Name"}</label>
                            <input
                                id="category-name"
                                type="text"
                                class="form-input"
                                placeholder="e.g. Groceries"
                                value={form.name.clone()}
                                oninput={on_name_input}
                                required=true
                                autofocus=true
                            />
                        </div>

                        <div class="form-group">
                            <label for="category-description">{"Description"}</label>
                            <textarea
                                id="category-description"
                                class="form-input"
                                rows="3"
                                value={form.description.clone()}
                                oninput={on_description_input}
                            />
                        </div>

                        <div class="modal-buttons">
                            <button type="submit" class="btn btn-primary">
                                {if form.is_edit() { "Save" } else { "Create" }}
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
