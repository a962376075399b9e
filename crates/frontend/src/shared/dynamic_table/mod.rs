//! DynamicTable - универсальная таблица по описанию колонок
//!
//! Источник строк: список от вызывающего кода (`data`) или удалённый
//! endpoint (`api`), результат которого полностью заменяет `data`.
//! Над активным источником работают общий поиск, фильтры колонок,
//! сортировка и клиентская пагинация. Действия над строкой: просмотр и
//! редактирование в модальном окне, удаление с подтверждением, плюс
//! дополнительные действия вызывающего кода.
//!
//! # Пример
//! ```rust,ignore
//! <DynamicTable
//!     columns=vec![
//!         ColumnDescriptor::new("ID", "id").sortable(),
//!         ColumnDescriptor::new("Имя", "name").sortable().searchable(),
//!         ColumnDescriptor::new("Статус", "activo"),
//!     ]
//!     api=ApiDescriptor::new("/api/users").with_data_prop("items")
//!     on_delete=Callback::new(move |row: Row| log::info!("{:?}", row))
//! />
//! ```

pub mod actions;
pub mod column_filter;
pub mod form;
pub mod header;
pub mod state;

use self::actions::{plan_action, resolve_table_actions, ActionOutcome, TableAction};
use self::form::{DynamicForm, FormMode};
use self::header::ColumnHeader;
use self::state::{create_state, filtered_rows, FetchFence, RowSelection};
use crate::shared::api_utils::fetch_rows;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::status_indicator::StatusIndicator;
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, SearchInput};
use crate::shared::modal::Modal;
use contracts::shared::form::{FormDescriptor, FormValues};
use contracts::shared::table::column::DEFAULT_STATUS_FIELD;
use contracts::shared::table::pagination::DEFAULT_PAGE_SIZE;
use contracts::shared::table::row::{cell_text, row_key, DEFAULT_ROW_KEY};
use contracts::shared::table::{ApiDescriptor, ColumnDescriptor, Row};
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen_futures::spawn_local;

#[component]
pub fn DynamicTable(
    columns: Vec<ColumnDescriptor>,
    /// Строки от вызывающего кода; игнорируются, если задан `api`
    #[prop(optional, into)]
    data: MaybeProp<Vec<Row>>,
    #[prop(optional, into)]
    api: MaybeProp<ApiDescriptor>,
    /// Внешний признак загрузки (например, пока вызывающий код сам грузит `data`)
    #[prop(optional, into)]
    loading: MaybeProp<bool>,
    /// Полная замена стандартного набора действий
    #[prop(optional_no_strip)]
    actions: Option<Vec<TableAction>>,
    /// Действия после стандартных
    #[prop(optional)]
    more_actions: Vec<TableAction>,
    #[prop(optional)]
    on_reload: Option<Callback<()>>,
    #[prop(optional)]
    on_delete: Option<Callback<Row>>,
    #[prop(optional)]
    can_create: bool,
    #[prop(optional)]
    on_create: Option<Callback<()>>,
    #[prop(optional, into)]
    create_text: MaybeProp<String>,
    #[prop(optional)]
    can_export_pdf: bool,
    /// Получает строки после поиска и фильтров
    #[prop(optional)]
    on_export_pdf: Option<Callback<Vec<Row>>>,
    #[prop(optional)]
    can_export_excel: bool,
    #[prop(optional)]
    on_export_excel: Option<Callback<Vec<Row>>>,
    /// Схема формы; без неё форма строится по колонкам
    #[prop(optional_no_strip)]
    form_config: Option<FormDescriptor>,
    #[prop(optional)]
    on_submit: Option<Callback<FormValues>>,
    #[prop(optional, into)]
    row_key_field: MaybeProp<String>,
    #[prop(optional, into)]
    status_field: MaybeProp<String>,
    #[prop(optional)]
    page_size: Option<usize>,
) -> impl IntoView {
    let state = create_state(page_size.unwrap_or(DEFAULT_PAGE_SIZE));
    let form_descriptor = StoredValue::new(FormDescriptor::resolve(form_config, &columns));
    let columns = StoredValue::new(columns);
    let row_actions = StoredValue::new(resolve_table_actions(actions, more_actions));
    let key_field = move || row_key_field.get().unwrap_or_else(|| DEFAULT_ROW_KEY.to_string());
    let status_field = move || status_field.get().unwrap_or_else(|| DEFAULT_STATUS_FIELD.to_string());

    let (fetched, set_fetched) = signal(Vec::<Row>::new());
    let (fetching, set_fetching) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let (reload_tick, set_reload_tick) = signal(0u32);
    let fence = StoredValue::new(FetchFence::default());

    // Загрузка строк с endpoint; ответ устаревшего запроса отбрасывается
    Effect::new(move |_| {
        reload_tick.track();
        let mut ticket = 0;
        fence.update_value(|f| ticket = f.begin());
        let Some(api) = api.get() else {
            set_fetching.set(false);
            set_error.set(None);
            return;
        };
        set_fetching.set(true);
        set_error.set(None);

        spawn_local(async move {
            let result = fetch_rows(&api).await;
            if fence.try_with_value(|f| f.is_current(ticket)) != Some(true) {
                log::debug!("Ответ {} устарел, пропускаем", api.url);
                return;
            }
            match result {
                Ok(rows) => {
                    log::debug!("Загружено строк: {} ({})", rows.len(), api.url);
                    set_fetched.set(rows);
                }
                Err(e) => {
                    log::error!("Ошибка загрузки {}: {}", api.url, e);
                    set_error.set(Some(e.to_string()));
                    set_fetched.set(Vec::new());
                }
            }
            set_fetching.set(false);
        });
    });

    let source_rows = Memo::new(move |_| {
        if api.get().is_some() {
            fetched.get()
        } else {
            data.get().unwrap_or_default()
        }
    });

    // total следует за источником строк, а не за поиском
    Effect::new(move |_| {
        let total = source_rows.with(|rows| rows.len());
        state.update(|s| s.pagination.reseed(total));
    });

    let query = Memo::new(move |_| state.with(|s| s.query.clone()));
    let filtered = Memo::new(move |_| {
        query.with(|q| source_rows.with(|rows| columns.with_value(|cols| filtered_rows(rows, cols, q))))
    });
    let filtered_count = Signal::derive(move || filtered.with(|rows| rows.len()));
    let visible = Memo::new(move |_| {
        let pagination = state.with(|s| s.pagination);
        filtered.with(|rows| pagination.slice(rows).to_vec())
    });

    let is_loading = move || fetching.get() || loading.get().unwrap_or(false);

    // Модальное окно просмотра/редактирования и подтверждение удаления
    let selected = RwSignal::new(RowSelection::default());
    let pending_delete = RwSignal::new(None::<Row>);
    let delete_open = RwSignal::new(false);

    let run_action = move |action: TableAction, row: Row| {
        let outcome = plan_action(
            &action.kind(),
            &action.descriptor.key,
            action.on_click.is_some(),
            row,
        );
        match outcome {
            ActionOutcome::OpenView(row) => selected.update(|s| s.open(FormMode::View, row)),
            ActionOutcome::OpenEdit(row) => selected.update(|s| s.open(FormMode::Edit, row)),
            ActionOutcome::ConfirmDelete(row) => {
                pending_delete.set(Some(row));
                delete_open.set(true);
            }
            ActionOutcome::Invoke(row) => {
                if let Some(handler) = action.on_click {
                    handler.run(row);
                }
            }
            ActionOutcome::Unhandled { key, row } => {
                log::info!("Действие \"{}\" без обработчика: {:?}", key, row);
            }
        }
    };

    let confirm_delete = move || {
        delete_open.set(false);
        let Some(row) = pending_delete.get_untracked() else {
            return;
        };
        pending_delete.set(None);
        match on_delete {
            Some(handler) => handler.run(row),
            None => log::info!("Удаление записи: {:?}", row),
        }
    };

    let handle_reload = move |_| {
        if api.get_untracked().is_some() {
            set_reload_tick.update(|t| *t += 1);
        }
        if let Some(handler) = on_reload {
            handler.run(());
        }
    };

    let export = move |handler: Option<Callback<Vec<Row>>>, kind: &'static str| {
        let rows = filtered.get_untracked();
        match handler {
            Some(handler) => handler.run(rows),
            None => log::info!("Экспорт {}: {} строк", kind, rows.len()),
        }
    };

    let show_reload = on_reload.is_some() || api.get_untracked().is_some();

    let header_cells = columns.with_value(|cols| {
        cols.iter()
            .cloned()
            .map(|column| {
                let key = column.key.clone();
                view! {
                    <ColumnHeader
                        column=column
                        sort=Signal::derive(move || query.with(|q| q.sort.clone()))
                        filter_value=Signal::derive(move || query.with(|q| q.column_filter(&key)))
                        on_sort=Callback::new(move |field: String| state.update(|s| s.toggle_sort(&field)))
                        on_filter=Callback::new(move |(field, value): (String, String)| {
                            state.update(|s| s.set_column_filter(&field, &value))
                        })
                    />
                }
            })
            .collect_view()
    });

    let render_cell = move |column: &ColumnDescriptor, row: &Row, search: &str| -> AnyView {
        if column.data_index == status_field() {
            view! { <StatusIndicator value=row.get(&column.data_index).cloned() /> }.into_any()
        } else {
            highlight_matches(&cell_text(row, &column.data_index), search)
        }
    };

    let render_actions = move |row: Row| {
        row_actions.with_value(|list| {
            list.iter()
                .cloned()
                .map(|action| {
                    let row = row.clone();
                    let title = action.descriptor.label.clone();
                    let icon_name = action.descriptor.icon.clone();
                    let label = action.descriptor.label.clone();
                    view! {
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Subtle
                            attr:title=title
                            on_click=move |_| run_action(action.clone(), row.clone())
                        >
                            {match icon_name {
                                Some(name) => icon(&name),
                                None => view! { <span>{label}</span> }.into_any(),
                            }}
                        </Button>
                    }
                })
                .collect_view()
        })
    };

    let body_rows = move || {
        let rows = visible.get();
        let offset = state.with(|s| s.pagination.page_range(filtered_count.get()).start);
        let key_field = key_field();
        let search = query.with(|q| q.search_query.clone());

        if rows.is_empty() {
            let span = columns.with_value(|c| c.len()) + 1;
            return view! {
                <TableRow>
                    <TableCell attr:colspan=span.to_string()>
                        <div style="padding: 24px; text-align: center; color: #8c8c8c;">"Нет данных"</div>
                    </TableCell>
                </TableRow>
            }
            .into_any();
        }

        rows.into_iter()
            .enumerate()
            .map(|(index, row)| {
                let key = row_key(&row, &key_field, offset + index);
                let cells = columns.with_value(|cols| {
                    cols.iter()
                        .map(|column| {
                            let cell = render_cell(column, &row, &search);
                            view! {
                                <TableCell>
                                    <TableCellLayout>{cell}</TableCellLayout>
                                </TableCell>
                            }
                        })
                        .collect_view()
                });
                view! {
                    <TableRow attr:data-row-key=key>
                        {cells}
                        <TableCell>
                            <div style="display: flex; gap: 4px;">{render_actions(row)}</div>
                        </TableCell>
                    </TableRow>
                }
            })
            .collect_view()
            .into_any()
    };

    let modal = move || {
        selected.with(|s| s.current()).map(|(mode, row)| {
            let submit = on_submit.map(|handler| {
                Callback::new(move |values: FormValues| {
                    handler.run(values);
                    selected.update(|s| s.close());
                })
            });
            view! {
                <Modal title=mode.title().to_string() on_close=Callback::new(move |_| selected.update(|s| s.close()))>
                    <DynamicForm
                        descriptor=form_descriptor.get_value()
                        initial=FormValues::from_row(&row)
                        mode=mode
                        on_submit=submit
                    />
                </Modal>
            }
        })
    };

    view! {
        <div class="dynamic-table">
            <div
                class="dynamic-table__toolbar"
                style="display: flex; align-items: center; justify-content: space-between; gap: 12px; margin-bottom: 12px; flex-wrap: wrap;"
            >
                <SearchInput
                    value=Signal::derive(move || query.with(|q| q.search_query.clone()))
                    on_change=Callback::new(move |value: String| state.update(|s| s.set_search(value)))
                />
                <div style="display: flex; gap: 8px;">
                    {show_reload.then(|| view! {
                        <Button appearance=ButtonAppearance::Secondary on_click=handle_reload>
                            {icon("refresh")}
                            " Обновить"
                        </Button>
                    })}
                    {can_export_pdf.then(|| view! {
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| export(on_export_pdf, "PDF")>
                            {icon("file-pdf")}
                            " PDF"
                        </Button>
                    })}
                    {can_export_excel.then(|| view! {
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| export(on_export_excel, "Excel")>
                            {icon("file-excel")}
                            " Excel"
                        </Button>
                    })}
                    {can_create.then(|| view! {
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| {
                                match on_create {
                                    Some(handler) => handler.run(()),
                                    None => log::info!("Создание записи: обработчик не задан"),
                                }
                            }
                        >
                            {icon("plus")}
                            {move || format!(" {}", create_text.get().unwrap_or_else(|| "Создать".to_string()))}
                        </Button>
                    })}
                </div>
            </div>

            {move || error.get().map(|msg| view! {
                <div style="margin-bottom: 12px;">
                    <MessageBar intent=MessageBarIntent::Error>{msg}</MessageBar>
                </div>
            })}

            <div style="position: relative;">
                <Show when=is_loading>
                    <div style="position: absolute; inset: 0; display: flex; align-items: center; justify-content: center; background: rgba(255, 255, 255, 0.6); z-index: 5;">
                        <Spinner />
                    </div>
                </Show>
                <Table>
                    <TableHeader>
                        <TableRow>
                            {header_cells}
                            <TableHeaderCell min_width=120.0>"Действия"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>{body_rows}</TableBody>
                </Table>
            </div>

            <div style="display: flex; justify-content: flex-end; margin-top: 12px;">
                <PaginationControls
                    state=Signal::derive(move || state.with(|s| s.pagination))
                    count=filtered_count
                    on_page_change=Callback::new(move |page: usize| state.update(|s| s.pagination.set_page(page)))
                    on_page_size_change=Callback::new(move |size: usize| {
                        let count = filtered_count.get_untracked();
                        state.update(|s| s.change_page_size(size, count));
                    })
                />
            </div>

            {modal}

            <Dialog open=delete_open>
                <DialogSurface>
                    <DialogBody>
                        <DialogTitle>"Удалить запись?"</DialogTitle>
                        <DialogContent>"Это действие нельзя отменить."</DialogContent>
                        <DialogActions>
                            <Button appearance=ButtonAppearance::Primary on_click=move |_| confirm_delete()>
                                "Удалить"
                            </Button>
                            <Button
                                appearance=ButtonAppearance::Subtle
                                on_click=move |_| {
                                    delete_open.set(false);
                                    pending_delete.set(None);
                                }
                            >
                                "Отмена"
                            </Button>
                        </DialogActions>
                    </DialogBody>
                </DialogSurface>
            </Dialog>
        </div>
    }
}
