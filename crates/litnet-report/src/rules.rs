//! Rule table CSV export.

use std::io::Write;

use litnet_model::CanonicalRule;

use crate::error::Result;

/// Writes the canonical rule table with its display column names.
pub fn write_rules_csv<W: Write>(writer: W, rules: &[CanonicalRule]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    if rules.is_empty() {
        writer.write_record(CanonicalRule::COLUMNS)?;
    }
    for rule in rules {
        writer.serialize(rule)?;
    }
    writer.flush()?;
    Ok(())
}
