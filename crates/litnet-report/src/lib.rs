//! Exports for LitNet: selected papers as CSV or RIS, and the rule table.

pub mod error;
pub mod naming;
pub mod papers;
pub mod rules;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub use error::{ReportError, Result};
pub use naming::{EXPORT_PREFIX, ExportFormat, default_export_name};
pub use papers::{Paper, papers_from_frame, write_papers_csv, write_ris};
pub use rules::write_rules_csv;

use litnet_model::CanonicalRule;

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufWriter::new(file))
}

/// Writes `papers` to `path` in the given format.
pub fn export_papers(path: &Path, papers: &[Paper], format: ExportFormat) -> Result<()> {
    let writer = create(path)?;
    match format {
        ExportFormat::Csv => write_papers_csv(writer, papers)?,
        ExportFormat::Ris => write_ris(writer, papers)?,
    }
    tracing::info!(path = %path.display(), papers = papers.len(), %format, "papers exported");
    Ok(())
}

/// Writes the rule table to `path` as CSV.
pub fn export_rules(path: &Path, rules: &[CanonicalRule]) -> Result<()> {
    write_rules_csv(create(path)?, rules)?;
    tracing::info!(path = %path.display(), rules = rules.len(), "rule table exported");
    Ok(())
}
