pub mod air_data;
pub mod catalog;
pub mod cli;
pub mod collector;
pub mod config;
pub mod devices;
pub mod exposition;
pub mod http;
