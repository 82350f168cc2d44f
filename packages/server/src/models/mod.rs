pub mod auth;
pub mod block;
pub mod project;
pub mod property;
pub mod shared;
