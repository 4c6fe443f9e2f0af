// src/lib.rs
//! Reconciles spreadsheet-authored sense collocations against a WordNet-like
//! model: audit the rows, resolve their sense keys, and merge them as typed
//! `collocation` / `collocation_inv` relations.

pub mod core;
pub mod error;
pub mod persistence;
pub mod sheet;

pub use crate::core::engine::{CollocationEngine, EngineOptions};
pub use crate::core::model::WordnetModel;
pub use crate::error::{CollocError, Result};
