// Work Item Grid Library
// Exports all modules for testing and reuse

pub mod grid;
pub mod models;
pub mod services;
pub mod ui_egui;
pub mod utils;
