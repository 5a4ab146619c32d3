pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod roster;
pub mod schedule;
pub mod services;
pub mod state;
pub mod upstream;
