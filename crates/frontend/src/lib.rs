pub mod app;
pub mod shared;

use wasm_bindgen::prelude::wasm_bindgen;

/// Точка входа демо-приложения.
#[wasm_bindgen]
pub fn hydrate() {
    leptos::mount::mount_to_body(app::App);
}

/// Initializes logging and the panic hook once the module is loaded.
///
/// Host pages that only embed widgets call the exported `registerDashboardCards`,
/// `mountDashboardCard` or `mountDynamicTable` afterwards instead of `hydrate`.
#[wasm_bindgen(start)]
pub fn start() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
}
