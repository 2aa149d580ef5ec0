use shared::{Notification, NotificationLevel};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct NotificationStackProps {
    pub notifications: Vec<Notification>,
    pub on_dismiss: Callback<u32>,
}

fn level_class(level: NotificationLevel) -> &'static str {
    match level {
        NotificationLevel::Success => "toast-success",
        NotificationLevel::Warning => "toast-warning",
        NotificationLevel::Error => "toast-error",
    }
}

/// Transient toasts in the corner; each one also closes itself after a timeout
#[function_component(NotificationStack)]
pub fn notification_stack(props: &NotificationStackProps) -> Html {
    html! {
        <div class="toast-stack">
            {for props.notifications.iter().map(|notification| {
                let on_dismiss = {
                    let on_dismiss = props.on_dismiss.clone();
                    let id = notification.id;
                    Callback::from(move |_: MouseEvent| on_dismiss.emit(id))
                };

                html! {
                    <div key={notification.id} class={classes!("toast", level_class(notification.level))}>
                        <div class="toast-body">
                            <strong class="toast-title">{&notification.title}</strong>
                            {if let Some(description) = &notification.description {
                                html! { <p class="toast-description">{description}</p> }
                            } else {
                                html! {}
                            }}
                        </div>
                        <button class="toast-close" onclick={on_dismiss}>{"×"}</button>
                    </div>
                }
            })}
        </div>
    }
}
