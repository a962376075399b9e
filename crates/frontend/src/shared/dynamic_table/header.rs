//! Ячейка заголовка динамической таблицы
//!
//! Сортируемая колонка переключает сортировку по клику (▲ → ▼ → без сортировки),
//! колонка с поиском получает выпадающий фильтр.

use super::column_filter::ColumnFilter;
use crate::shared::list_utils::{sort_class, sort_indicator};
use contracts::shared::table::column::SortState;
use contracts::shared::table::ColumnDescriptor;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn ColumnHeader(
    column: ColumnDescriptor,
    #[prop(into)]
    sort: Signal<Option<SortState>>,
    /// Значение фильтра этой колонки
    #[prop(into)]
    filter_value: Signal<String>,
    on_sort: Callback<String>,
    /// `(column key, value)`
    on_filter: Callback<(String, String)>,
) -> impl IntoView {
    let ColumnDescriptor {
        title,
        key,
        sortable,
        searchable,
        ..
    } = column;

    let key_for_click = key.clone();
    let key_for_indicator = key.clone();
    let key_for_class = key.clone();
    let key_for_filter = key;

    let handle_click = move |_| {
        if sortable {
            on_sort.run(key_for_click.clone());
        }
    };

    let header_style = if sortable {
        "display: flex; align-items: center; gap: 4px; cursor: pointer;"
    } else {
        "display: flex; align-items: center; gap: 4px;"
    };

    let filter = searchable.then(|| {
        let on_apply = Callback::new(move |value: String| {
            on_filter.run((key_for_filter.clone(), value));
        });
        view! { <ColumnFilter current=filter_value title=title.clone() on_apply=on_apply /> }
    });

    view! {
        <TableHeaderCell resizable=true min_width=100.0>
            <div class="table__sortable-header" style=header_style on:click=handle_click>
                {title}
                {sortable.then(|| view! {
                    <span class=move || sort.with(|s| sort_class(s.as_ref(), &key_for_class))>
                        {move || sort.with(|s| sort_indicator(s.as_ref(), &key_for_indicator))}
                    </span>
                })}
                {filter}
            </div>
        </TableHeaderCell>
    }
}
