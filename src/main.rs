mod api;
mod app;
mod components;
mod context;
mod pages;

use app::App;

fn main() {
    // tracing events are forwarded to `log` and from there to the console
    _ = console_log::init_with_level(log::Level::Info);
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
