pub mod treemap_service;

pub use treemap_service::*;
