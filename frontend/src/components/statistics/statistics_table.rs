use shared::display::format_currency;
use shared::StatisticsView;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatisticsTableProps {
    pub view: StatisticsView,
}

/// Month rows with one column per visible series
#[function_component(StatisticsTable)]
pub fn statistics_table(props: &StatisticsTableProps) -> Html {
    let columns = props.view.table_columns();

    html! {
        <div class="table-container">
            <table class="statistics-table">
                <thead>
                    <tr>
                        <th>{"Month"}</th>
                        {for columns.iter().map(|series| html! { <th>{series.label()}</th> })}
                    </tr>
                </thead>
                <tbody>
                    {for props.view.rows.iter().map(|row| html! {
                        <tr key={row.month.clone()}>
                            <td class="date">{&row.label}</td>
                            {for columns.iter().map(|series| html! {
                                <td class="amount">{format_currency(row.amount_for(series))}</td>
                            })}
                        </tr>
                    })}
                </tbody>
            </table>
        </div>
    }
}
