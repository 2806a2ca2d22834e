pub mod api;
pub mod config;
pub mod data_models;
pub mod fetcher;
pub mod query_state;
pub mod renderer;
pub mod sanitizer;
pub mod view;
