use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;
use thaw::{Button, ButtonAppearance};

#[component]
pub fn Modal(
    title: String,
    /// Escape, overlay click and the close button all end up here
    on_close: Callback<()>,
    /// Buttons rendered below the body
    #[prop(optional)]
    footer: Option<ChildrenFn>,
    children: Children,
) -> impl IntoView {
    let handle = window_event_listener(ev::keydown, move |event| {
        if event.key() == "Escape" {
            on_close.run(());
        }
    });
    on_cleanup(move || handle.remove());

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal" on:click=|ev: ev::MouseEvent| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">{title}</h2>
                    <button class="button button--icon modal__close" on:click=move |_| on_close.run(())>
                        {icon("x")}
                    </button>
                </div>
                <div class="modal-body">{children()}</div>
                {footer.map(|footer| view! { <div class="modal-footer">{footer()}</div> })}
            </div>
        </div>
    }
}

/// Yes/no question in front of a destructive action.
/// While `busy` the buttons are disabled and closing is ignored.
#[component]
pub fn ConfirmDialog(
    #[prop(into)]
    title: String,
    #[prop(into)]
    message: String,
    #[prop(optional, into)]
    confirm_label: Option<String>,
    #[prop(into)]
    busy: Signal<bool>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let confirm_label = confirm_label.unwrap_or_else(|| "Delete".to_string());
    let close = Callback::new(move |_| {
        if !busy.get_untracked() {
            on_cancel.run(());
        }
    });

    let footer: ChildrenFn = std::sync::Arc::new(move || {
        let confirm_label = confirm_label.clone();
        view! {
            <Button
                appearance=ButtonAppearance::Secondary
                disabled=busy
                on_click=move |_| close.run(())
            >
                "Cancel"
            </Button>
            <Button
                appearance=ButtonAppearance::Primary
                disabled=busy
                on_click=move |_| on_confirm.run(())
            >
                {confirm_label}
            </Button>
        }
        .into_any()
    });

    view! {
        <Modal title=title on_close=close footer=footer>
            <p>{message}</p>
        </Modal>
    }
}
