//! Frequent itemset enumeration.
//!
//! Support is counted with per-column tid-lists (sorted row indices) that are
//! intersected for larger itemsets. Enumeration is level-wise: size-k
//! candidates are joined from frequent (k-1)-itemsets sharing their first k-2
//! items, and dropped when any (k-1)-subset is infrequent.

use std::collections::{BTreeMap, BTreeSet};

use litnet_model::{MiningOptions, Result};

use crate::matrix::PresenceMatrix;

/// A set of column indices, kept sorted and free of duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Itemset(Vec<usize>);

impl Itemset {
    pub fn new(mut items: Vec<usize>) -> Self {
        items.sort_unstable();
        items.dedup();
        Self(items)
    }

    pub fn single(item: usize) -> Self {
        Self(vec![item])
    }

    pub fn items(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, item: usize) -> bool {
        self.0.binary_search(&item).is_ok()
    }

    /// Items of `self` that are not in `other`.
    pub fn difference(&self, other: &Itemset) -> Itemset {
        Self(
            self.0
                .iter()
                .copied()
                .filter(|item| !other.contains(*item))
                .collect(),
        )
    }

    /// Every subset with exactly one item removed.
    fn drop_one_subsets(&self) -> impl Iterator<Item = Itemset> + '_ {
        (0..self.0.len()).map(move |skip| {
            Self(
                self.0
                    .iter()
                    .enumerate()
                    .filter(|(idx, _)| *idx != skip)
                    .map(|(_, item)| *item)
                    .collect(),
            )
        })
    }

    /// Every non-empty proper subset, smallest first.
    pub fn proper_subsets(&self) -> Vec<Itemset> {
        let n = self.0.len();
        let mut subsets = Vec::new();
        for size in 1..n {
            combinations(n, size, &mut |positions| {
                subsets.push(Self(positions.iter().map(|pos| self.0[*pos]).collect()));
            });
        }
        subsets
    }

    /// Joins the labels of the items with `", "`.
    pub fn label(&self, labels: &[String]) -> String {
        self.0
            .iter()
            .filter_map(|item| labels.get(*item).map(String::as_str))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Calls `visit` with every `size`-combination of `0..n`, in lexicographic order.
fn combinations(n: usize, size: usize, visit: &mut dyn FnMut(&[usize])) {
    if size > n {
        return;
    }
    let mut positions: Vec<usize> = (0..size).collect();
    loop {
        visit(&positions);
        let Some(pivot) = (0..size).rev().find(|idx| positions[*idx] < n - size + idx) else {
            return;
        };
        positions[pivot] += 1;
        for idx in pivot + 1..size {
            positions[idx] = positions[idx - 1] + 1;
        }
    }
}

/// Frequent itemsets with their supporting record counts.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequentItemsets {
    total_rows: usize,
    labels: Vec<String>,
    counts: BTreeMap<Itemset, usize>,
}

impl FrequentItemsets {
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Column labels the itemset indices refer to.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn count(&self, itemset: &Itemset) -> Option<usize> {
        self.counts.get(itemset).copied()
    }

    /// Fraction of records containing every item of `itemset`.
    pub fn support(&self, itemset: &Itemset) -> Option<f64> {
        self.count(itemset)
            .map(|count| count as f64 / self.total_rows as f64)
    }

    /// Itemsets in index order with their counts.
    pub fn iter(&self) -> impl Iterator<Item = (&Itemset, usize)> {
        self.counts.iter().map(|(itemset, count)| (itemset, *count))
    }

    pub fn of_size(&self, size: usize) -> impl Iterator<Item = (&Itemset, usize)> {
        self.iter().filter(move |(itemset, _)| itemset.len() == size)
    }

    /// Count of the itemset with the given labels, in any order.
    pub fn count_of_labels(&self, labels: &[&str]) -> Option<usize> {
        let mut items = Vec::with_capacity(labels.len());
        for label in labels {
            items.push(self.labels.iter().position(|l| l == label)?);
        }
        self.count(&Itemset::new(items))
    }

    pub fn support_of_labels(&self, labels: &[&str]) -> Option<f64> {
        self.count_of_labels(labels)
            .map(|count| count as f64 / self.total_rows as f64)
    }
}

/// Sorted intersection of two sorted row lists.
fn intersect(a: &[usize], b: &[usize]) -> Vec<usize> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}

/// Enumerates every itemset of up to `options.max_itemset_size` columns whose
/// support reaches `options.min_support`.
///
/// Itemsets with no supporting record are never reported. With
/// `exclude_constant_columns`, columns present in every record are skipped.
pub fn mine(matrix: &PresenceMatrix, options: &MiningOptions) -> Result<FrequentItemsets> {
    options.validate()?;
    let span = tracing::info_span!(
        "mine",
        rows = matrix.height(),
        columns = matrix.width(),
        min_support = options.min_support,
        max_size = options.max_itemset_size
    );
    let _enter = span.enter();

    let total_rows = matrix.height();
    let mut counts = BTreeMap::new();
    if total_rows == 0 {
        tracing::debug!("no records to mine");
        return Ok(FrequentItemsets {
            total_rows,
            labels: matrix.labels().to_vec(),
            counts,
        });
    }
    let is_frequent = |count: usize| {
        count > 0 && count as f64 / total_rows as f64 >= options.min_support
    };

    let mut level: Vec<(Itemset, Vec<usize>)> = Vec::new();
    for idx in 0..matrix.width() {
        let tids = matrix.tid_list(idx);
        if options.exclude_constant_columns && tids.len() == total_rows {
            tracing::debug!(column = %matrix.labels()[idx], "skipping constant column");
            continue;
        }
        if is_frequent(tids.len()) {
            level.push((Itemset::single(idx), tids));
        }
    }

    let mut size = 1;
    while !level.is_empty() {
        for (itemset, tids) in &level {
            counts.insert(itemset.clone(), tids.len());
        }
        tracing::debug!(size, frequent = level.len(), "itemset level complete");
        if size >= options.max_itemset_size {
            break;
        }
        let previous: BTreeSet<&Itemset> = level.iter().map(|(itemset, _)| itemset).collect();
        let mut next = Vec::new();
        for (i, (left, left_tids)) in level.iter().enumerate() {
            for (right, right_tids) in &level[i + 1..] {
                let prefix = size - 1;
                if left.items()[..prefix] != right.items()[..prefix] {
                    continue;
                }
                let mut items = left.items().to_vec();
                items.push(right.items()[prefix]);
                let candidate = Itemset::new(items);
                if !candidate
                    .drop_one_subsets()
                    .all(|subset| previous.contains(&subset))
                {
                    continue;
                }
                let tids = intersect(left_tids, right_tids);
                if is_frequent(tids.len()) {
                    next.push((candidate, tids));
                }
            }
        }
        next.sort_by(|a, b| a.0.cmp(&b.0));
        level = next;
        size += 1;
    }

    Ok(FrequentItemsets {
        total_rows,
        labels: matrix.labels().to_vec(),
        counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(columns: Vec<Vec<bool>>) -> PresenceMatrix {
        let rows = columns.first().map_or(0, Vec::len);
        let labels = (0..columns.len()).map(|i| format!("C{i}")).collect();
        let ids = (0..rows).map(|i| i.to_string()).collect();
        PresenceMatrix::new(ids, labels, columns).unwrap()
    }

    #[test]
    fn counts_pairs_from_tid_lists() {
        let m = matrix(vec![
            vec![true, true, false, false],
            vec![false, true, true, false],
        ]);
        let frequent = mine(&m, &MiningOptions::default()).unwrap();
        assert_eq!(frequent.count(&Itemset::single(0)), Some(2));
        assert_eq!(frequent.count(&Itemset::new(vec![1, 0])), Some(1));
        assert_eq!(frequent.support(&Itemset::new(vec![0, 1])), Some(0.25));
    }

    #[test]
    fn prunes_zero_support_even_at_zero_threshold() {
        let m = matrix(vec![vec![true, false], vec![false, false]]);
        let options = MiningOptions::default().with_min_support(0.0);
        let frequent = mine(&m, &options).unwrap();
        assert_eq!(frequent.count(&Itemset::single(1)), None);
        assert_eq!(frequent.len(), 1);
    }

    #[test]
    fn respects_min_support() {
        let m = matrix(vec![
            vec![true, true, true, false],
            vec![true, false, false, false],
        ]);
        let options = MiningOptions::default().with_min_support(0.5);
        let frequent = mine(&m, &options).unwrap();
        assert!(frequent.count(&Itemset::single(0)).is_some());
        assert!(frequent.count(&Itemset::single(1)).is_none());
    }

    #[test]
    fn excludes_constant_columns() {
        let m = matrix(vec![vec![true, true, true], vec![true, false, true]]);
        let frequent = mine(&m, &MiningOptions::default()).unwrap();
        assert_eq!(frequent.count(&Itemset::single(0)), None);
        assert_eq!(frequent.of_size(2).count(), 0);

        let keep = MiningOptions {
            exclude_constant_columns: false,
            ..MiningOptions::default()
        };
        let frequent = mine(&m, &keep).unwrap();
        assert_eq!(frequent.count(&Itemset::new(vec![0, 1])), Some(2));
    }

    #[test]
    fn enumerates_triples_with_subset_pruning() {
        let m = matrix(vec![
            vec![true, true, false, true],
            vec![true, true, true, false],
            vec![true, false, true, false],
        ]);
        let options = MiningOptions::default().with_max_itemset_size(3);
        let frequent = mine(&m, &options).unwrap();
        assert_eq!(frequent.count(&Itemset::new(vec![0, 1, 2])), Some(1));
        assert_eq!(frequent.of_size(3).count(), 1);

        let strict = options.with_min_support(0.5);
        let frequent = mine(&m, &strict).unwrap();
        // {0,2} has one record, so {0,1,2} is never a candidate.
        assert_eq!(frequent.count(&Itemset::new(vec![0, 2])), None);
        assert_eq!(frequent.count(&Itemset::new(vec![1, 2])), Some(2));
        assert_eq!(frequent.of_size(3).count(), 0);
    }

    #[test]
    fn stops_at_max_size() {
        let m = matrix(vec![vec![true, false], vec![true, false], vec![false, true]]);
        let options = MiningOptions::default().with_max_itemset_size(1);
        let frequent = mine(&m, &options).unwrap();
        assert_eq!(frequent.of_size(2).count(), 0);
        assert_eq!(frequent.len(), 3);
    }

    #[test]
    fn rejects_invalid_options() {
        let m = matrix(vec![vec![true]]);
        assert!(mine(&m, &MiningOptions::default().with_min_support(1.5)).is_err());
        assert!(mine(&m, &MiningOptions::default().with_min_support(f64::NAN)).is_err());
        assert!(mine(&m, &MiningOptions::default().with_max_itemset_size(0)).is_err());
    }

    #[test]
    fn empty_matrix_yields_nothing() {
        let m = PresenceMatrix::new(Vec::new(), vec!["A".into()], vec![Vec::new()]).unwrap();
        let frequent = mine(&m, &MiningOptions::default()).unwrap();
        assert!(frequent.is_empty());
        assert_eq!(frequent.total_rows(), 0);
    }

    #[test]
    fn proper_subsets_of_triple() {
        let subsets = Itemset::new(vec![4, 2, 9]).proper_subsets();
        let items: Vec<Vec<usize>> = subsets.iter().map(|s| s.items().to_vec()).collect();
        assert_eq!(
            items,
            vec![vec![2], vec![4], vec![9], vec![2, 4], vec![2, 9], vec![4, 9]]
        );
    }

    #[test]
    fn labels_join_with_comma() {
        let labels = vec!["Human".to_string(), "Oral".to_string()];
        assert_eq!(Itemset::new(vec![1, 0]).label(&labels), "Human, Oral");
    }
}
