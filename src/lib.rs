pub mod app;
pub mod config;
pub mod crossref;
pub mod db;
pub mod domain;
pub mod error;
pub mod normalize;
pub mod output;
pub mod store;
