pub mod config;
pub mod logging;

pub mod classifier;
pub mod error;
pub mod fetch;
pub mod page;
pub mod sheet;
pub mod sync;
pub mod url_model;
