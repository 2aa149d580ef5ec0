use gloo::dialogs::confirm;
use shared::display::format_currency;
use shared::Category;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CategoryListProps {
    pub categories: Vec<Category>,
    pub on_view: Callback<Category>,
    pub on_edit: Callback<Category>,
    pub on_delete: Callback<i64>,
}

fn expense_count_label(count: usize) -> String {
    match count {
        1 => "1 expense".to_string(),
        n => format!("{} expenses", n),
    }
}

#[function_component(CategoryList)]
pub fn category_list(props: &CategoryListProps) -> Html {
    if props.categories.is_empty() {
        return html! {
            <div class="empty-state">
                <p>{"No categories yet. Create one to start tracking expenses."}</p>
            </div>
        };
    }

    html! {
        <div class="category-grid">
            {for props.categories.iter().map(|category| {
                let on_view = {
                    let on_view = props.on_view.clone();
                    let category = category.clone();
                    Callback::from(move |_: MouseEvent| on_view.emit(category.clone()))
                };
                let on_edit = {
                    let on_edit = props.on_edit.clone();
                    let category = category.clone();
                    Callback::from(move |_: MouseEvent| on_edit.emit(category.clone()))
                };
                let on_delete = {
                    let on_delete = props.on_delete.clone();
                    let id = category.id;
                    let prompt = delete_category_prompt(&category.name);
                    Callback::from(move |_: MouseEvent| {
                        if confirm(&prompt) {
                            on_delete.emit(id);
                        }
                    })
                };

                html! {
                    <div key={category.id} class="category-card">
                        <div class="category-card-header">
                            <h3>{&category.name}</h3>
                            <span class="category-total">{format_currency(category.total_amount)}</span>
                        </div>
                        {if category.description.is_empty() {
                            html! {}
                        } else {
                            html! { <p class="category-description">{&category.description}</p> }
                        }}
                        <div class="category-card-footer">
                            <span class="category-count">{expense_count_label(category.expense_count())}</span>
                            <div class="card-actions">
                                <button class="btn btn-small btn-primary" onclick={on_view}>{"View"}</button>
                                <button class="btn btn-small btn-secondary" onclick={on_edit}>{"Edit"}</button>
                                <button class="btn btn-small btn-danger" onclick={on_delete}>{"Delete"}</button>
                            </div>
                        </div>
                    </div>
                }
            })}
        </div>
    }
}

/// Confirmation text shown before a category and its expenses are removed
pub fn delete_category_prompt(name: &str) -> String {
    format!("Delete category \"{}\" and all of its expenses?", name)
}
