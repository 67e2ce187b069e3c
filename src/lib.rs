pub mod auth;
pub mod config;
pub mod errors;
pub mod logging;
pub mod model;
pub mod remote;
pub mod repository;
pub mod rows;
pub mod screens;
pub mod session;
pub mod store;
pub mod views;

#[cfg(test)]
pub(crate) mod test_support;
