use crate::core::toast::{Toast, ToastStore};
use gloo_timers::callback::Timeout;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

const AUTO_DISMISS_MS: u32 = 4000;

#[function_component(ToastHost)]
pub(crate) fn toast_host() -> Html {
    let toasts = use_selector(|store: &ToastStore| store.toasts.clone());
    let on_dismiss = use_memo(
        |_| {
            let dispatch = Dispatch::<ToastStore>::new();
            Callback::from(move |id: u64| dispatch.reduce_mut(|store| store.dismiss(id)))
        },
        (),
    );

    html! {
        <div class="toast-host bottom" aria-live="polite" aria-atomic="true">
            {for toasts.iter().map(|toast| html! {
                <ToastItem key={toast.id} toast={toast.clone()} on_dismiss={(*on_dismiss).clone()} />
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ToastItemProps {
    toast: Toast,
    on_dismiss: Callback<u64>,
}

/// One toast; its auto-dismiss timer lives as long as the toast is mounted.
#[function_component(ToastItem)]
fn toast_item(props: &ToastItemProps) -> Html {
    let id = props.toast.id;
    {
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with_deps(
            move |id: &u64| {
                let id = *id;
                let handle = Timeout::new(AUTO_DISMISS_MS, move || on_dismiss.emit(id));
                move || drop(handle)
            },
            id,
        );
    }
    let on_close = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| on_dismiss.emit(id))
    };

    html! {
        <div class={classes!("toast", props.toast.kind.class())} role="status">
            <span>{props.toast.message.clone()}</span>
            <button class="ghost" aria-label="Закрыть" onclick={on_close}>{"✕"}</button>
        </div>
    }
}
