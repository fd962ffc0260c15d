//! Paper list exports: CSV and RIS.

use std::io::Write;

use litnet_common::cell_text;
use polars::prelude::DataFrame;
use serde::Serialize;

use crate::error::{ReportError, Result};

pub const TITLE_COLUMN: &str = "Title";
pub const ABSTRACT_COLUMN: &str = "Abstract";

/// One selected record as exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paper {
    #[serde(rename = "Refid")]
    pub id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Abstract")]
    pub abstract_text: String,
}

/// Reads the identifier, title and abstract of every row of `frame`.
pub fn papers_from_frame(frame: &DataFrame, identifier_column: &str) -> Result<Vec<Paper>> {
    let column = |name: &str| {
        frame.column(name).map_err(|_| ReportError::MissingColumn {
            column: name.to_string(),
        })
    };
    let ids = column(identifier_column)?;
    let titles = column(TITLE_COLUMN)?;
    let abstracts = column(ABSTRACT_COLUMN)?;
    let mut papers = Vec::with_capacity(frame.height());
    for idx in 0..frame.height() {
        papers.push(Paper {
            id: cell_text(ids.get(idx)?),
            title: cell_text(titles.get(idx)?),
            abstract_text: cell_text(abstracts.get(idx)?),
        });
    }
    Ok(papers)
}

/// Writes `Refid,Title,Abstract` rows.
pub fn write_papers_csv<W: Write>(writer: W, papers: &[Paper]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    if papers.is_empty() {
        writer.write_record(["Refid", TITLE_COLUMN, ABSTRACT_COLUMN])?;
    }
    for paper in papers {
        writer.serialize(paper)?;
    }
    writer.flush()?;
    Ok(())
}

fn ris_field<W: Write>(writer: &mut W, tag: &str, value: &str) -> std::io::Result<()> {
    // RIS fields are single-line.
    let value = value.replace(['\r', '\n'], " ");
    let value = value.trim();
    if value.is_empty() {
        writeln!(writer, "{tag}  -")
    } else {
        writeln!(writer, "{tag}  - {value}")
    }
}

/// Writes one journal (`JOUR`) entry per paper.
pub fn write_ris<W: Write>(mut writer: W, papers: &[Paper]) -> Result<()> {
    for (idx, paper) in papers.iter().enumerate() {
        if idx > 0 {
            writeln!(writer)?;
        }
        ris_field(&mut writer, "TY", "JOUR")?;
        ris_field(&mut writer, "ID", &paper.id)?;
        ris_field(&mut writer, "T1", &paper.title)?;
        ris_field(&mut writer, "AB", &paper.abstract_text)?;
        writeln!(writer, "ER  -")?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{NamedFrom, Series};

    fn papers() -> Vec<Paper> {
        vec![
            Paper {
                id: "12".into(),
                title: "Arsenic, in drinking water".into(),
                abstract_text: "Line one\nline two".into(),
            },
            Paper {
                id: "40".into(),
                title: "Rodent exposure".into(),
                abstract_text: String::new(),
            },
        ]
    }

    #[test]
    fn csv_quotes_commas() {
        let mut out = Vec::new();
        write_papers_csv(&mut out, &papers()).unwrap();
        let text = String::from_utf8(out).unwrap();
        insta::assert_snapshot!(text, @r#"
        Refid,Title,Abstract
        12,"Arsenic, in drinking water","Line one
        line two"
        40,Rodent exposure,
        "#);
    }

    #[test]
    fn empty_csv_keeps_header() {
        let mut out = Vec::new();
        write_papers_csv(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Refid,Title,Abstract\n");
    }

    #[test]
    fn ris_entries_are_single_line_fields() {
        let mut out = Vec::new();
        write_ris(&mut out, &papers()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "TY  - JOUR\nID  - 12\nT1  - Arsenic, in drinking water\nAB  - Line one line two\nER  -\n\
             \nTY  - JOUR\nID  - 40\nT1  - Rodent exposure\nAB  -\nER  -\n"
        );
    }

    #[test]
    fn papers_read_from_frame() {
        let frame = DataFrame::new(vec![
            Series::new("Refid".into(), vec![7i64, 9]).into(),
            Series::new("Title".into(), vec![Some("T7"), None]).into(),
            Series::new("Abstract".into(), vec!["A7", "A9"]).into(),
        ])
        .unwrap();
        let papers = papers_from_frame(&frame, "Refid").unwrap();
        assert_eq!(papers[0].id, "7");
        assert_eq!(papers[1].title, "");
        assert!(matches!(
            papers_from_frame(&frame, "RecordId"),
            Err(ReportError::MissingColumn { .. })
        ));
    }
}
