use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// How long a toast stays on screen
const NOTIFICATION_TIMEOUT_MS: u32 = 3000;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NotificationKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NotificationKind::Error, message: message.into() }
    }
}

pub struct UseNotificationResult {
    pub current: Option<Notification>,
    pub notify: Callback<Notification>,
    pub dismiss: Callback<()>,
}

/// A single transient toast; a newer notification replaces the older one
#[hook]
pub fn use_notification() -> UseNotificationResult {
    let current = use_state(|| Option::<Notification>::None);
    // bumps on every notify so an older timer does not clear a newer toast
    let generation: Rc<RefCell<u32>> = use_mut_ref(|| 0);

    let notify = {
        let current = current.clone();
        let generation = generation.clone();
        use_callback((), move |notification: Notification, _| {
            let id = {
                let mut generation = generation.borrow_mut();
                *generation += 1;
                *generation
            };
            current.set(Some(notification));

            let current = current.clone();
            let generation = generation.clone();
            spawn_local(async move {
                gloo::timers::future::TimeoutFuture::new(NOTIFICATION_TIMEOUT_MS).await;
                if *generation.borrow() == id {
                    current.set(None);
                }
            });
        })
    };

    let dismiss = {
        let current = current.clone();
        use_callback((), move |_: (), _| current.set(None))
    };

    UseNotificationResult {
        current: (*current).clone(),
        notify,
        dismiss,
    }
}
