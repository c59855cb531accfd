// Weekly Calendar Library
// Week layout engine plus the egui widget that renders it

pub mod models;
pub mod services;
pub mod ui_egui;
pub mod utils;
