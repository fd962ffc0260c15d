//! Row selection over a presence matrix.
//!
//! Columns inside a group are combined with OR, groups are combined with AND.
//! Empty groups do not restrict anything.

use litnet_model::{AnalysisError, FilterSpec, Result};

use crate::matrix::{PresenceMatrix, RowMask};

/// Computes the row mask for `spec` without touching the matrix.
pub fn row_mask(matrix: &PresenceMatrix, spec: &FilterSpec) -> Result<RowMask> {
    let mut bits = vec![true; matrix.height()];
    for group in spec.groups.iter().filter(|group| !group.is_empty()) {
        let mut group_bits = vec![false; matrix.height()];
        for name in &group.columns {
            let column = matrix.column_by_label(name).ok_or_else(|| {
                AnalysisError::configuration(match &group.name {
                    Some(group_name) => {
                        format!("filter group '{group_name}' names unknown column '{name}'")
                    }
                    None => format!("filter names unknown column '{name}'"),
                })
            })?;
            for (bit, cell) in group_bits.iter_mut().zip(column) {
                *bit |= *cell;
            }
        }
        for (bit, group_bit) in bits.iter_mut().zip(group_bits) {
            *bit &= group_bit;
        }
    }
    Ok(RowMask::from_bits(bits))
}

/// Applies `spec`, returning the filtered matrix and the mask that produced it.
pub fn apply(matrix: &PresenceMatrix, spec: &FilterSpec) -> Result<(PresenceMatrix, RowMask)> {
    let mask = row_mask(matrix, spec)?;
    tracing::debug!(
        groups = spec.groups.len(),
        selected = mask.selected(),
        total = matrix.height(),
        "filter applied"
    );
    Ok((matrix.select(&mask), mask))
}

#[cfg(test)]
mod tests {
    use super::*;
    use litnet_model::FilterGroup;

    fn matrix() -> PresenceMatrix {
        PresenceMatrix::new(
            vec!["1".into(), "2".into(), "3".into(), "4".into()],
            vec!["Human".into(), "Rodents".into(), "Oral".into()],
            vec![
                vec![true, false, true, false],
                vec![false, true, true, false],
                vec![true, true, false, false],
            ],
        )
        .unwrap()
    }

    fn group(columns: &[&str]) -> FilterGroup {
        FilterGroup::new(columns.iter().map(|c| c.to_string()).collect())
    }

    #[test]
    fn or_within_group() {
        let spec = FilterSpec::new().with_group(group(&["Human", "Rodents"]));
        let (filtered, mask) = apply(&matrix(), &spec).unwrap();
        assert_eq!(mask.bits(), &[true, true, true, false]);
        assert_eq!(filtered.height(), 3);
    }

    #[test]
    fn and_across_groups() {
        let spec = FilterSpec::new()
            .with_group(group(&["Human", "Rodents"]))
            .with_group(group(&["Oral"]));
        let mask = row_mask(&matrix(), &spec).unwrap();
        assert_eq!(mask.bits(), &[true, true, false, false]);
    }

    #[test]
    fn empty_spec_selects_everything() {
        let spec = FilterSpec::new().with_group(group(&[]));
        let (filtered, mask) = apply(&matrix(), &spec).unwrap();
        assert_eq!(mask.selected(), 4);
        assert_eq!(filtered, matrix());
    }

    #[test]
    fn node_pair_requires_both() {
        let spec = FilterSpec::new().with_node_pair("Human", "Rodents");
        let mask = row_mask(&matrix(), &spec).unwrap();
        assert_eq!(mask.bits(), &[false, false, true, false]);
    }

    #[test]
    fn unknown_column_is_configuration_error() {
        let spec = FilterSpec::new().with_group(FilterGroup::named("Species", vec!["Fish".into()]));
        let err = apply(&matrix(), &spec).unwrap_err();
        assert!(err.to_string().contains("'Species'"));
        assert!(err.to_string().contains("'Fish'"));
    }

    #[test]
    fn duplicate_columns_are_harmless() {
        let once = row_mask(&matrix(), &FilterSpec::new().with_group(group(&["Oral"]))).unwrap();
        let twice =
            row_mask(&matrix(), &FilterSpec::new().with_group(group(&["Oral", "Oral"]))).unwrap();
        assert_eq!(once, twice);
    }
}
