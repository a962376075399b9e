//! Переходы по клику: внешняя ссылка в новой вкладке или навигация внутри страницы.

use contracts::shared::card::CardTarget;
use wasm_bindgen::JsValue;

/// Opens `url` in a new browsing context.
pub fn open_external(url: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.open_with_url_and_target(url, "_blank") {
        log::error!("Не удалось открыть {}: {:?}", url, e);
    }
}

/// Pushes `path` onto the history and emits `popstate`, so a mounted router
/// re-renders without a full page reload.
pub fn navigate_in_place(path: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let history = match window.history() {
        Ok(history) => history,
        Err(e) => {
            log::error!("History API недоступен: {:?}", e);
            return;
        }
    };
    if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(path)) {
        log::error!("Не удалось перейти на {}: {:?}", path, e);
        return;
    }
    match web_sys::PopStateEvent::new("popstate") {
        Ok(event) => {
            let _ = window.dispatch_event(&event);
        }
        Err(e) => log::warn!("popstate не отправлен: {:?}", e),
    }
}

pub fn follow(target: &CardTarget) {
    match target {
        CardTarget::Inert => {}
        CardTarget::External(url) => open_external(url),
        CardTarget::Internal(path) => navigate_in_place(path),
    }
}
