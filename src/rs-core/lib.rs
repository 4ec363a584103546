use wasm_bindgen::prelude::*;

mod bindings;
mod configuration;
pub mod controller;
pub mod dispatcher;
pub mod identifier;
pub mod multi_view;
pub mod player;
mod utils;

pub use utils::logger::{Logger, LoggerLevel};
pub use utils::time_format;
