//! Встраивание виджетов в страницы, не использующие Leptos.
//!
//! - `<dashboard-card icon=".." color=".." title=".." description=".." path=".." tags='[..]'>`
//!   превращается в карточку вызовом `registerDashboardCards()`;
//! - `mountDashboardCard(id, props)` и `mountDynamicTable(id, config)` монтируют
//!   виджет в элемент с заданным id.
//!
//! Таблица сообщает о действиях пользователя всплывающими `CustomEvent`
//! на элементе-хосте: `table-reload`, `table-create`, `table-delete`,
//! `table-export-pdf`, `table-export-excel`, `table-action`, `table-submit`.

use crate::shared::components::dashboard_card::DashboardCardFromProps;
use crate::shared::dynamic_table::actions::TableAction;
use crate::shared::dynamic_table::DynamicTable;
use contracts::shared::card::{CardProps, CardTag};
use contracts::shared::form::FormValues;
use contracts::shared::table::{ActionDescriptor, ActionKind, Row, TableConfig};
use leptos::prelude::*;
use serde::Serialize;
use thaw::ConfigProvider;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CustomEvent, CustomEventInit, HtmlElement};

pub const CARD_TAG_NAME: &str = "dashboard-card";
const DEFAULT_CARD_COLOR: &str = "#1890ff";

pub const EVENT_RELOAD: &str = "table-reload";
pub const EVENT_CREATE: &str = "table-create";
pub const EVENT_DELETE: &str = "table-delete";
pub const EVENT_EXPORT_PDF: &str = "table-export-pdf";
pub const EVENT_EXPORT_EXCEL: &str = "table-export-excel";
pub const EVENT_ACTION: &str = "table-action";
pub const EVENT_SUBMIT: &str = "table-submit";

/// Свойства карточки из атрибутов элемента.
///
/// `tags` is a JSON array of `{ color?, icon?, text }`; an empty `path` means no target.
pub fn card_props_from_attributes(
    attr: impl Fn(&str) -> Option<String>,
) -> Result<CardProps, String> {
    let tags = match attr("tags").filter(|t| !t.trim().is_empty()) {
        Some(json) => serde_json::from_str::<Vec<CardTag>>(&json)
            .map_err(|e| format!("Некорректный атрибут tags: {}", e))?,
        None => Vec::new(),
    };

    Ok(CardProps {
        icon: attr("icon").unwrap_or_default(),
        color: attr("color").unwrap_or_else(|| DEFAULT_CARD_COLOR.to_string()),
        title: attr("title").unwrap_or_default(),
        description: attr("description").unwrap_or_default(),
        path: attr("path").filter(|p| !p.is_empty()),
        tags,
    })
}

fn host_element(element_id: &str) -> Result<HtmlElement, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(element_id))
        .ok_or_else(|| JsValue::from_str(&format!("Элемент #{} не найден", element_id)))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| JsValue::from_str(&format!("#{} не является HTML-элементом", element_id)))
}

fn mount_card(element: HtmlElement, props: CardProps) {
    leptos::mount::mount_to(element, move || {
        view! {
            <ConfigProvider>
                <DashboardCardFromProps props=props />
            </ConfigProvider>
        }
    })
    .forget();
}

/// Монтирует карточку в каждый `<dashboard-card>` документа. Возвращает их число.
#[wasm_bindgen(js_name = registerDashboardCards)]
pub fn register_dashboard_cards() -> Result<u32, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document недоступен"))?;
    let nodes = document.query_selector_all(CARD_TAG_NAME)?;

    let mut mounted = 0;
    for index in 0..nodes.length() {
        let Some(element) = nodes
            .item(index)
            .and_then(|node| node.dyn_into::<HtmlElement>().ok())
        else {
            continue;
        };
        match card_props_from_attributes(|name| element.get_attribute(name)) {
            Ok(props) => {
                mount_card(element, props);
                mounted += 1;
            }
            Err(e) => log::error!("<{}>: {}", CARD_TAG_NAME, e),
        }
    }
    log::debug!("Смонтировано карточек: {}", mounted);
    Ok(mounted)
}

#[wasm_bindgen(js_name = mountDashboardCard)]
pub fn mount_dashboard_card(element_id: &str, props: JsValue) -> Result<(), JsValue> {
    let props: CardProps = serde_wasm_bindgen::from_value(props)?;
    mount_card(host_element(element_id)?, props);
    Ok(())
}

#[wasm_bindgen(js_name = mountDynamicTable)]
pub fn mount_dynamic_table(element_id: &str, config: JsValue) -> Result<(), JsValue> {
    let config: TableConfig = serde_wasm_bindgen::from_value(config)?;
    config
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let element = host_element(element_id)?;
    let host_id = element_id.to_string();

    leptos::mount::mount_to(element, move || {
        view! {
            <ConfigProvider>
                <EmbeddedTable config=config host_id=host_id />
            </ConfigProvider>
        }
    })
    .forget();
    Ok(())
}

/// Отправляет всплывающее событие на элемент-хост.
///
/// The host is looked up by id on every dispatch, so a replaced element still
/// receives events.
fn emit<T: Serialize + ?Sized>(host_id: &str, name: &str, detail: &T) {
    let Some(element) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(host_id))
    else {
        log::warn!("Событие {} не отправлено: #{} отсутствует", name, host_id);
        return;
    };

    let detail = match detail.serialize(&serde_wasm_bindgen::Serializer::json_compatible()) {
        Ok(value) => value,
        Err(e) => {
            log::error!("Не удалось сериализовать {}: {}", name, e);
            return;
        }
    };

    let init = CustomEventInit::new();
    init.set_bubbles(true);
    init.set_detail(&detail);
    match CustomEvent::new_with_event_init_dict(name, &init) {
        Ok(event) => {
            let _ = element.dispatch_event(&event);
        }
        Err(e) => log::error!("Событие {} не создано: {:?}", name, e),
    }
}

#[derive(Serialize)]
struct ActionEventDetail<'a> {
    key: &'a str,
    row: &'a Row,
}

/// Встроенные просмотр/редактирование/удаление обрабатывает таблица,
/// остальные действия уходят хосту событием `table-action`.
fn embedded_action(descriptor: ActionDescriptor, host_id: &str) -> TableAction {
    if !matches!(descriptor.kind(), ActionKind::Custom(_)) {
        return TableAction::new(descriptor);
    }
    let host_id = host_id.to_string();
    let key = descriptor.key.clone();
    TableAction::new(descriptor).with_handler(Callback::new(move |row: Row| {
        emit(&host_id, EVENT_ACTION, &ActionEventDetail { key: &key, row: &row });
    }))
}

#[component]
fn EmbeddedTable(config: TableConfig, host_id: String) -> impl IntoView {
    let TableConfig {
        columns,
        data,
        api,
        row_key,
        status_field,
        page_size,
        can_create,
        create_text,
        can_export_pdf,
        can_export_excel,
        form_config,
        actions,
        more_actions,
    } = config;

    let actions = actions.map(|list| {
        list.into_iter()
            .map(|d| embedded_action(d, &host_id))
            .collect::<Vec<_>>()
    });
    let more_actions = more_actions
        .into_iter()
        .map(|d| embedded_action(d, &host_id))
        .collect::<Vec<_>>();

    let event = |name: &'static str| {
        let host_id = host_id.clone();
        Callback::new(move |_: ()| emit(&host_id, name, &()))
    };
    let rows_event = |name: &'static str| {
        let host_id = host_id.clone();
        Callback::new(move |rows: Vec<Row>| emit(&host_id, name, &rows))
    };
    let on_delete = {
        let host_id = host_id.clone();
        Callback::new(move |row: Row| emit(&host_id, EVENT_DELETE, &row))
    };
    let on_submit = {
        let host_id = host_id.clone();
        Callback::new(move |values: FormValues| emit(&host_id, EVENT_SUBMIT, &values))
    };

    view! {
        <DynamicTable
            columns=columns
            data=data
            api=api
            actions=actions
            more_actions=more_actions
            on_reload=event(EVENT_RELOAD)
            on_delete=on_delete
            can_create=can_create
            on_create=event(EVENT_CREATE)
            create_text=create_text
            can_export_pdf=can_export_pdf
            on_export_pdf=rows_event(EVENT_EXPORT_PDF)
            can_export_excel=can_export_excel
            on_export_excel=rows_event(EVENT_EXPORT_EXCEL)
            form_config=form_config
            on_submit=on_submit
            row_key_field=row_key
            status_field=status_field
            page_size=page_size
        />
    }
}
