//! Shared utilities for LitNet crates.
//!
//! This crate provides the Polars `AnyValue` helpers used by ingestion,
//! preprocessing, and export to read cells as text, labels, numbers, or
//! presence flags.

pub mod polars;

pub use self::polars::{
    cell_label, cell_number, cell_presence, cell_text, format_number, parse_presence,
};
