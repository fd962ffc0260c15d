//! Default export file names.

use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDateTime;

pub const EXPORT_PREFIX: &str = "litnet_export";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Ris,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Ris => "ris",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// `litnet_export_<mmddyyHHMMSS>.<ext>` for the given local time.
pub fn default_export_name(at: NaiveDateTime, format: ExportFormat) -> PathBuf {
    PathBuf::from(format!(
        "{EXPORT_PREFIX}_{}.{}",
        at.format("%m%d%y%H%M%S"),
        format.extension()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn name_encodes_timestamp() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(14, 5, 9)
            .unwrap();
        assert_eq!(
            default_export_name(at, ExportFormat::Ris),
            PathBuf::from("litnet_export_030724140509.ris")
        );
        assert_eq!(
            default_export_name(at, ExportFormat::Csv),
            PathBuf::from("litnet_export_030724140509.csv")
        );
    }
}
