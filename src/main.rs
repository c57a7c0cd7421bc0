mod api;
mod app;
mod format;
mod models;
mod pages;
mod routes;
mod session;

use app::App;

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Clarity starting...");

    yew::Renderer::<App>::new().render();
}
