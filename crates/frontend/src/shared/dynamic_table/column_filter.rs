use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;
use thaw::*;

/// Выпадающий фильтр колонки: поле ввода, "Найти" и "Сбросить".
///
/// `on_apply` receives the entered value; an empty string clears the filter.
#[component]
pub fn ColumnFilter(
    /// Текущее значение фильтра (пусто, если не активен)
    #[prop(into)]
    current: Signal<String>,
    #[prop(into)]
    title: String,
    on_apply: Callback<String>,
) -> impl IntoView {
    let placeholder = format!("Поиск: {}", title);
    let trigger_title = format!("Фильтр: {}", title);
    let open = RwSignal::new(false);
    let draft = RwSignal::new(String::new());

    let toggle = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        if !open.get_untracked() {
            draft.set(current.get_untracked());
        }
        open.update(|o| *o = !*o);
    };

    let apply = move || {
        on_apply.run(draft.get_untracked());
        open.set(false);
    };

    let reset = move || {
        draft.set(String::new());
        on_apply.run(String::new());
        open.set(false);
    };

    view! {
        <span
            style="position: relative; display: inline-flex;"
            on:click=|ev: ev::MouseEvent| ev.stop_propagation()
        >
            <button
                class="column-filter__trigger"
                style=move || format!(
                    "background: none; border: none; cursor: pointer; padding: 2px; display: inline-flex; color: {};",
                    if current.get().is_empty() { "#bfbfbf" } else { "#1890ff" }
                )
                title=trigger_title
                on:click=toggle
            >
                {icon("filter")}
            </button>
            <Show when=move || open.get()>
                <div
                    class="column-filter__dropdown"
                    style="position: absolute; top: 100%; left: 0; z-index: 50; background: #fff; padding: 8px; border-radius: 6px; box-shadow: 0 6px 16px rgba(0, 0, 0, 0.15); display: flex; flex-direction: column; gap: 8px; min-width: 200px;"
                    on:keydown=move |ev: ev::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            apply();
                        }
                    }
                >
                    <Input value=draft placeholder=placeholder.clone() />
                    <div style="display: flex; gap: 8px;">
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| apply()
                        >
                            {icon("search")}
                            " Найти"
                        </Button>
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| reset()
                        >
                            "Сбросить"
                        </Button>
                    </div>
                </div>
            </Show>
        </span>
    }
}
