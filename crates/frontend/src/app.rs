use crate::shared::components::dashboard_card::DashboardCard;
use crate::shared::dynamic_table::actions::TableAction;
use crate::shared::dynamic_table::DynamicTable;
use contracts::shared::card::CardTag;
use contracts::shared::form::FormValues;
use contracts::shared::table::{ActionDescriptor, ColumnDescriptor, Row};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes, A};
use leptos_router::path;
use serde_json::json;
use thaw::*;

fn demo_rows() -> Vec<Row> {
    let rows = json!([
        {"id": 1, "nombre": "Ana Pérez", "email": "ana@example.com", "edad": 34, "activo": 1},
        {"id": 2, "nombre": "Bruno Díaz", "email": "bruno@example.com", "edad": 27, "activo": 0},
        {"id": 3, "nombre": "Carla Gómez", "email": "carla@example.com", "edad": null, "activo": true},
        {"id": 4, "nombre": "Diego Ruiz", "email": "diego@example.com", "edad": 45, "activo": "true"},
        {"id": 5, "nombre": "Elena Soto", "email": "elena@example.com", "edad": 19, "activo": false},
        {"id": 6, "nombre": "Fabio Mora", "email": "fabio@example.com", "edad": 52, "activo": 1},
        {"id": 7, "nombre": "Gloria Vera", "email": "gloria@example.com", "edad": 38, "activo": 1},
        {"id": 8, "nombre": "Hugo León", "email": "hugo@example.com", "edad": 23, "activo": 0},
        {"id": 9, "nombre": "Inés Rojas", "email": "ines@example.com", "edad": 61, "activo": 1},
        {"id": 10, "nombre": "Javier Paz", "email": "javier@example.com", "edad": 30, "activo": 1},
        {"id": 11, "nombre": "Karen Vidal", "email": "karen@example.com", "edad": 41, "activo": 0}
    ]);
    rows.as_array()
        .map(|items| items.iter().filter_map(|v| v.as_object().cloned()).collect())
        .unwrap_or_default()
}

#[component]
fn HomePage() -> impl IntoView {
    view! {
        <div style="display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 24px; padding: 24px;">
            <DashboardCard
                icon="users"
                color="#1890ff"
                title="Пользователи"
                description="Список учётных записей с поиском и сортировкой"
                path="/users"
                tags=vec![
                    CardTag { color: Some("#52c41a".into()), icon: None, text: "Таблица".into() },
                    CardTag { color: None, icon: Some("search".into()), text: "Поиск".into() },
                ]
            />
            <DashboardCard
                icon="chart"
                color="#722ed1"
                title="Документация Leptos"
                description="Открывается в новой вкладке"
                path="https://leptos.dev"
            />
            <DashboardCard
                icon="📊"
                color="#fa8c16"
                title="Отчёты"
                description="Раздел в разработке"
            />
        </div>
    }
}

#[component]
fn UsersPage() -> impl IntoView {
    let (rows, set_rows) = signal(demo_rows());

    let columns = vec![
        ColumnDescriptor::new("ID", "id").sortable(),
        ColumnDescriptor::new("Имя", "nombre").sortable().searchable(),
        ColumnDescriptor::new("Email", "email").searchable(),
        ColumnDescriptor::new("Возраст", "edad").sortable(),
        ColumnDescriptor::new("Статус", "activo"),
    ];

    let print = TableAction::new(ActionDescriptor::new("print", "Печать", Some("printer")))
        .with_handler(Callback::new(|row: Row| log::info!("Печать: {:?}", row)));

    view! {
        <div style="padding: 24px;">
            <div style="margin-bottom: 16px;">
                <A href="/">"← На главную"</A>
            </div>
            <h1 style="margin-top: 0;">"Пользователи"</h1>
            <DynamicTable
                columns=columns
                data=rows
                more_actions=vec![print]
                on_reload=Callback::new(move |_| set_rows.set(demo_rows()))
                on_delete=Callback::new(move |row: Row| {
                    set_rows.update(|list| list.retain(|r| r.get("id") != row.get("id")));
                })
                can_create=true
                on_create=Callback::new(|_| log::info!("Создание пользователя"))
                create_text="Новый пользователь"
                can_export_pdf=true
                on_export_pdf=Callback::new(|rows: Vec<Row>| log::info!("PDF: {} строк", rows.len()))
                can_export_excel=true
                on_export_excel=Callback::new(|rows: Vec<Row>| log::info!("Excel: {} строк", rows.len()))
                on_submit=Callback::new(move |values: FormValues| {
                    let updated = values.into_row();
                    set_rows.update(|list| {
                        if let Some(row) = list.iter_mut().find(|r| r.get("id") == updated.get("id")) {
                            *row = updated;
                        }
                    });
                })
            />
        </div>
    }
}

#[component]
pub fn App() -> impl IntoView {
    view! {
        <ConfigProvider>
            <Router>
                <Routes fallback=|| view! { <div style="padding: 24px;">"Страница не найдена"</div> }>
                    <Route path=path!("/") view=HomePage />
                    <Route path=path!("/users") view=UsersPage />
                </Routes>
            </Router>
        </ConfigProvider>
    }
}
