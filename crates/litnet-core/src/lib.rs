//! Core analysis pipeline for LitNet.
//!
//! - **preprocess**: raw record table to one row per record with 0/1 flags
//! - **matrix**: the presence matrix and row masks
//! - **filter**: OR-within, AND-across row selection
//! - **itemsets**: level-wise frequent itemset mining over tid-lists
//! - **rules**: association rules and the canonical rule table
//! - **network**: node and edge assembly
//! - **state**: caller-owned selection state and derived views
//! - **cache**: prepared tables keyed by input digest

pub mod cache;
pub mod filter;
pub mod itemsets;
pub mod matrix;
pub mod network;
pub mod preprocess;
pub mod rules;
pub mod state;

pub use cache::{CacheKey, PreparedCache, sha256_hex};
pub use itemsets::{FrequentItemsets, Itemset, mine};
pub use matrix::{PresenceMatrix, RowMask};
pub use network::{Network, assemble, build_network};
pub use preprocess::{PreparedTable, normalize};
pub use rules::{AssociationRule, canonicalize, canonicalize_table, derive_rules};
pub use state::{AnalysisState, AnalysisView, Selection, pair_metrics};
