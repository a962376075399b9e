use contracts::shared::table::column::is_active_flag;
use leptos::prelude::*;
use serde_json::Value;

pub fn status_label(active: bool) -> (&'static str, &'static str) {
    if active {
        ("Активен", "#52c41a")
    } else {
        ("Неактивен", "#ff4d4f")
    }
}

/// Цветной индикатор статуса вместо сырого значения поля
#[component]
pub fn StatusIndicator(value: Option<Value>) -> impl IntoView {
    let (label, color) = status_label(is_active_flag(value.as_ref()));

    view! {
        <span style="display: inline-flex; align-items: center; gap: 6px;">
            <span style=format!(
                "width: 8px; height: 8px; border-radius: 50%; background: {}; display: inline-block;",
                color
            )></span>
            <span style=format!("color: {};", color)>{label}</span>
        </span>
    }
}
