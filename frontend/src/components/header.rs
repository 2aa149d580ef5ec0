use shared::display::format_currency;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub total_amount: f64,
    pub show_statistics: bool,
    pub on_add_category: Callback<()>,
    pub on_toggle_statistics: Callback<()>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let on_add_category = {
        let on_add_category = props.on_add_category.clone();
        Callback::from(move |_: MouseEvent| on_add_category.emit(()))
    };

    let on_toggle_statistics = {
        let on_toggle_statistics = props.on_toggle_statistics.clone();
        Callback::from(move |_: MouseEvent| on_toggle_statistics.emit(()))
    };

    html! {
        <header class="header">
            <div class="container">
                <h1>{"Expense Tracker"}</h1>
                <div class="header-right">
                    <div class="balance-display">
                        <span class="balance-label">{"Total spent:"}</span>
                        <span class="balance-amount">{format_currency(props.total_amount)}</span>
                    </div>
                    <div class="header-menus">
                        <button
                            class={classes!("btn", "btn-secondary", props.show_statistics.then_some("active"))}
                            onclick={on_toggle_statistics}
                        >
                            {if props.show_statistics { "Hide statistics" } else { "Statistics" }}
                        </button>
                        <button class="btn btn-primary" onclick={on_add_category}>
                            {"New category"}
                        </button>
                    </div>
                </div>
            </div>
        </header>
    }
}
