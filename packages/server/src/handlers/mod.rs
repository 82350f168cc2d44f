pub mod auth;
pub mod block;
pub mod deploy;
pub mod project;
pub mod property;
pub mod public;
