use yew::prelude::*;
use crate::hooks::use_notification::{Notification, NotificationKind};

#[derive(Properties, PartialEq)]
pub struct NotificationToastProps {
    pub notification: Option<Notification>,
    pub on_dismiss: Callback<()>,
}

#[function_component(NotificationToast)]
pub fn notification_toast(props: &NotificationToastProps) -> Html {
    let Some(notification) = props.notification.as_ref() else {
        return html! {};
    };

    let class = match notification.kind {
        NotificationKind::Success => "notification success",
        NotificationKind::Error => "notification error",
    };

    let on_click = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| on_dismiss.emit(()))
    };

    html! {
        <div class={class} role="status">
            <span class="notification-message">{&notification.message}</span>
            <button class="notification-close" onclick={on_click}>{"×"}</button>
        </div>
    }
}
