//! # gravdust
//!
//! Windowed front end for the gravdust particle sandbox: wgpu canvas,
//! egui toolbar and HUD, layered configuration and a headless runner.

pub mod app;
pub mod config;
pub mod headless;
pub mod input;
pub mod render;
pub mod ui;

pub use app::App;
