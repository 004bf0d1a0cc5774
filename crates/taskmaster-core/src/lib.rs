pub mod account;
pub mod auth;
pub mod config;
pub mod datastore;
pub mod task;
