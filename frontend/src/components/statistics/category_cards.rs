use shared::display::format_currency;
use shared::statistics::CategoryCard;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CategoryCardsProps {
    pub cards: Vec<CategoryCard>,
}

#[function_component(CategoryCards)]
pub fn category_cards(props: &CategoryCardsProps) -> Html {
    if props.cards.is_empty() {
        return html! {};
    }

    html! {
        <div class="stat-cards">
            {for props.cards.iter().map(|card| html! {
                <div key={card.id} class="stat-card" style={format!("border-left-color: {}", card.color)}>
                    <h4>{&card.name}</h4>
                    <span class="stat-card-total">{format_currency(card.total_amount)}</span>
                    <span class="stat-card-latest">
                        {format!("Latest month: {}", format_currency(card.latest_month_amount))}
                    </span>
                </div>
            })}
        </div>
    }
}
