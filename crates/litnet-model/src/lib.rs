//! Shared data model for LitNet.
//!
//! - **schema**: explicit per-column classification ([`ColumnKind`])
//! - **options**: preprocessing, mining, network and rule options plus the
//!   TOML-backed [`AnalysisConfig`]
//! - **filter**: filter groups (OR within, AND across) and the filter catalog
//! - **colors**: symmetric edge color/label annotations
//! - **network**: node, edge, canonical rule and pair metric records
//! - **error**: the error taxonomy shared by every stage

pub mod colors;
pub mod error;
pub mod filter;
pub mod network;
pub mod options;
pub mod schema;

pub use colors::{DEFAULT_EDGE_COLOR, EdgeColorMap, EdgeStyle, EdgeViewOption};
pub use error::{AnalysisError, ErrorKind, ErrorReport, Result};
pub use filter::{FilterCatalog, FilterGroup, FilterSpec};
pub use network::{CanonicalRule, NetworkEdge, NetworkNode, PairMetrics};
pub use options::{
    AnalysisConfig, MiningOptions, NetworkOptions, PreprocessOptions, RuleOptions, RuleSortKey,
};
pub use schema::{ColumnKind, ColumnSpec, TableSchema};
