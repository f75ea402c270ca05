//! Homeschool Frontend Entry Point
//!
//! Augments the server-rendered pages: sidebar navigation on every page,
//! the attendance grid controller wherever attendance cells are rendered.

mod color;
mod commands;
mod components;
mod config;
mod dom;
mod grid;
mod logging;
mod sidebar;
mod store;

use grid::GridController;
use log::LevelFilter;

fn start() {
    color::expose_on_window();
    sidebar::init();
    if GridController::attach(config::page_config()).is_none() {
        log::debug!("no attendance grid on this page");
    }
}

fn main() {
    console_error_panic_hook::set_once();
    logging::init(if cfg!(debug_assertions) { LevelFilter::Debug } else { LevelFilter::Info });

    match dom::document() {
        Some(doc) if doc.ready_state() == "loading" => {
            dom::listen(&doc, "DOMContentLoaded", |_| start());
        }
        Some(_) => start(),
        None => {}
    }
}
