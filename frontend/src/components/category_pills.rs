use shared::display::format_currency;
use shared::Category;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CategoryPillsProps {
    pub categories: Vec<Category>,
    pub selected_id: Option<i64>,
    pub on_select: Callback<Category>,
    pub on_show_all: Callback<()>,
}

/// Horizontal category filter above the main section
#[function_component(CategoryPills)]
pub fn category_pills(props: &CategoryPillsProps) -> Html {
    let on_show_all = {
        let on_show_all = props.on_show_all.clone();
        Callback::from(move |_: MouseEvent| on_show_all.emit(()))
    };

    html! {
        <nav class="category-pills">
            <button
                class={classes!("pill", props.selected_id.is_none().then_some("active"))}
                onclick={on_show_all}
            >
                {"All categories"}
            </button>
            {for props.categories.iter().map(|category| {
                let is_active = props.selected_id == Some(category.id);
                let onclick = {
                    let on_select = props.on_select.clone();
                    let category = category.clone();
                    Callback::from(move |_: MouseEvent| on_select.emit(category.clone()))
                };

                html! {
                    <button
                        key={category.id}
                        class={classes!("pill", is_active.then_some("active"))}
                        {onclick}
                    >
                        {&category.name}
                        <span class="pill-badge">{format_currency(category.total_amount)}</span>
                    </button>
                }
            })}
        </nav>
    }
}
