mod common;

mod auth;
mod deploy;
