use crate::shared::icons::icon;
use contracts::shared::table::{PaginationState, PAGE_SIZE_OPTIONS};
use leptos::prelude::*;

/// Текст счётчика: "стр / всего (строк)"; при активном поиске добавляется общее число.
pub fn pagination_info(state: &PaginationState, count: usize) -> String {
    let page = state.effective_page(count);
    let pages = state.page_count(count);
    if count == state.total {
        format!("{} / {} ({})", page, pages, count)
    } else {
        format!("{} / {} ({} из {})", page, pages, count, state.total)
    }
}

/// PaginationControls - кнопки страниц и выбор размера страницы
#[component]
pub fn PaginationControls(
    /// Current state (1-based page)
    #[prop(into)]
    state: Signal<PaginationState>,

    /// Rows after filtering; pages are counted from this
    #[prop(into)]
    count: Signal<usize>,

    on_page_change: Callback<usize>,

    on_page_size_change: Callback<usize>,
) -> impl IntoView {
    let current_page = move || state.with(|s| s.effective_page(count.get()));
    let total_pages = move || state.with(|s| s.page_count(count.get()));
    let page_size = move || state.with(|s| s.page_size);

    view! {
        <div class="pagination-controls" style="display: flex; align-items: center; gap: 4px;">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(1)
                disabled=move || current_page() <= 1
                title="Первая страница"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page();
                    if page > 1 {
                        on_page_change.run(page - 1);
                    }
                }
                disabled=move || current_page() <= 1
                title="Предыдущая страница"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info" style="padding: 0 8px;">
                {move || state.with(|s| pagination_info(s, count.get()))}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page();
                    if page < total_pages() {
                        on_page_change.run(page + 1);
                    }
                }
                disabled=move || current_page() >= total_pages()
                title="Следующая страница"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(total_pages())
                disabled=move || current_page() >= total_pages()
                title="Последняя страница"
            >
                {icon("chevrons-right")}
            </button>
            <select
                class="page-size-select"
                on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<usize>() {
                        on_page_size_change.run(size);
                    }
                }
                prop:value=move || page_size().to_string()
            >
                {PAGE_SIZE_OPTIONS
                    .iter()
                    .map(|&size| {
                        view! {
                            <option value=size.to_string() selected=move || page_size() == size>
                                {format!("{} / стр.", size)}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}
