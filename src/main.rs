mod camera;
mod components;
mod config;
mod error;
mod model;
mod render;
mod state;
mod util;

fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<components::app::App>::new().render();
}
