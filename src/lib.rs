pub mod app;
pub mod controllers;
pub mod dispatch;
pub mod error;
pub mod indexer;
pub mod logging;
pub mod model;
pub mod remote;
pub mod screens;
pub mod stager;
pub mod store;

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
