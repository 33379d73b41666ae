//! Tabular data layer
//!
//! Generic typed table storage and the CSV loader that fills it. The launch
//! model is built on top of this in `crate::launch`.

pub mod datatable;
pub mod datatable_loaders;
