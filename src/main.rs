#![allow(warnings)]
//! Project Portal Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod console;
mod context;
mod filters;
mod format;
mod markdown;
mod models;
mod pages;
mod presentation;
mod progress;
mod route;
mod sequence;
mod session;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
