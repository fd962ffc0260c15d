//! Input loading for LitNet.
//!
//! This crate reads the labelled records table into a Polars DataFrame and
//! loads the small companion tables that drive filtering, network selection,
//! and edge annotation.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use litnet_ingest::{load_network_config, read_records};
//!
//! let records = read_records(Path::new("sample/records.csv"))?;
//! let columns = load_network_config(Path::new("sample/network_config.csv"))?;
//! ```

mod companion;
mod csv;
mod error;
mod tables;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use self::csv::{
    MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, read_csv_frame, read_records,
    validate_encoding,
};

// === Companion Tables ===
pub use companion::{load_edge_view_options, load_filter_groups, load_network_config};

// === Table Identities ===
pub use tables::{InputTable, require_columns};
