pub mod api;
pub mod config;
pub mod errors;
pub mod form;
pub mod modal;
pub mod model;
pub mod search;
pub mod seed;
pub mod server;
pub mod store;
