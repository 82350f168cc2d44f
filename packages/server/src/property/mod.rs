pub mod service;
pub mod snapshot;
