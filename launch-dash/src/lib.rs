pub mod aggregate;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod figure;
pub mod launch;
pub mod utils;
pub mod view;
