use crate::app::App;

mod api;
mod app;
mod components;
mod context;
mod helpers;
mod i18n;
mod markdown;
mod tops_sheet;

fn main() {
    yew::Renderer::<App>::new().render();
}
