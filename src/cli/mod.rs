//! Terminal front end: one module per command plus shared rendering helpers.

pub mod browse;
pub mod explore;
pub mod export;
pub mod listing;
pub mod overview;
pub mod render;
pub mod setup;
pub mod ui;
