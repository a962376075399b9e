use crate::shared::icons::icon;
use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Modal dialog: overlay, header with title and close button, body.
///
/// Closes on the close button, on a click on the overlay itself and on Escape.
/// No footer is rendered; content owns its own actions.
#[component]
pub fn Modal(
    #[prop(into)]
    title: Signal<String>,
    on_close: Callback<()>,
    /// CSS width of the surface (default `800px`)
    #[prop(optional, into)]
    width: Option<String>,
    children: Children,
) -> impl IntoView {
    let width = width.unwrap_or_else(|| "800px".to_string());
    let overlay_mouse_down = RwSignal::new(false);

    // Escape
    let keydown = window_event_listener(ev::keydown, move |event| {
        if event.key() == "Escape" {
            on_close.run(());
        }
    });
    on_cleanup(move || keydown.remove());

    let is_direct_overlay_event = |ev: &ev::MouseEvent| -> bool {
        match (ev.target(), ev.current_target()) {
            (Some(t), Some(ct)) => t == ct,
            _ => false,
        }
    };

    let handle_overlay_mouse_down = move |ev: ev::MouseEvent| {
        overlay_mouse_down.set(is_direct_overlay_event(&ev));
    };

    let handle_overlay_click = move |ev: ev::MouseEvent| {
        let should_close = overlay_mouse_down.get_untracked() && is_direct_overlay_event(&ev);
        overlay_mouse_down.set(false);
        if should_close {
            // Закрываем на следующем тике: оверлей удаляется во время собственного клика
            spawn_local(async move {
                TimeoutFuture::new(0).await;
                on_close.run(());
            });
        }
    };

    let stop_propagation = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
    };

    view! {
        <div
            class="modal-overlay"
            style="position: fixed; inset: 0; background: rgba(0, 0, 0, 0.45); display: flex; align-items: flex-start; justify-content: center; padding-top: 60px; z-index: 1000;"
            on:mousedown=handle_overlay_mouse_down
            on:click=handle_overlay_click
        >
            <div
                class="modal"
                style=format!(
                    "background: #fff; border-radius: 8px; width: {}; max-width: calc(100vw - 32px); max-height: calc(100vh - 120px); overflow: auto; box-shadow: 0 6px 16px rgba(0, 0, 0, 0.15);",
                    width
                )
                on:click=stop_propagation
            >
                <div
                    class="modal-header"
                    style="display: flex; align-items: center; justify-content: space-between; padding: 16px 24px; border-bottom: 1px solid #f0f0f0;"
                >
                    <h2 class="modal-title" style="margin: 0; font-size: 16px; font-weight: 600;">
                        {move || title.get()}
                    </h2>
                    <button
                        class="button button--icon modal__close"
                        style="background: none; border: none; cursor: pointer; color: #666;"
                        title="Закрыть"
                        on:click=move |_| on_close.run(())
                    >
                        {icon("x")}
                    </button>
                </div>
                <div class="modal-body" style="padding: 24px;">
                    {children()}
                </div>
            </div>
        </div>
    }
}
