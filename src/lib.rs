pub mod api;
pub mod app;
pub mod config;
pub mod currency;
pub mod importers;
pub mod models;
pub mod services;
pub mod utils;
