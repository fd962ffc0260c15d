//! Association rules derived from frequent itemsets.
//!
//! Every frequent itemset of size two or more yields one rule per non-empty
//! proper subset taken as antecedent. A pair `{A, B}` therefore yields both
//! `A -> B` and `B -> A`; [`canonicalize`] keeps one of them for display.

use std::cmp::Ordering;
use std::collections::HashSet;

use litnet_model::{AnalysisError, CanonicalRule, Result, RuleSortKey};

use crate::itemsets::{FrequentItemsets, Itemset};

/// A directed rule `antecedent -> consequent` with its metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct AssociationRule {
    pub antecedent: Itemset,
    pub consequent: Itemset,
    pub antecedent_label: String,
    pub consequent_label: String,
    pub antecedent_support: f64,
    pub consequent_support: f64,
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
    pub leverage: f64,
    pub pmi: f64,
    pub antecedent_count: usize,
    pub consequent_count: usize,
    pub count: usize,
}

impl AssociationRule {
    /// The display row for this orientation.
    pub fn to_canonical(&self) -> CanonicalRule {
        CanonicalRule {
            entity_1: self.antecedent_label.clone(),
            entity_2: self.consequent_label.clone(),
            entity_1_count: self.antecedent_count,
            entity_2_count: self.consequent_count,
            cooccurrence_count: self.count,
            support: self.support,
            lift: self.lift,
            leverage: self.leverage,
            pmi: self.pmi,
        }
    }
}

/// Computes the metrics of one rule from raw record counts.
fn evaluate(
    antecedent: Itemset,
    consequent: Itemset,
    counts: (usize, usize, usize),
    itemsets: &FrequentItemsets,
) -> Result<AssociationRule> {
    let (antecedent_count, consequent_count, count) = counts;
    let antecedent_label = antecedent.label(itemsets.labels());
    let consequent_label = consequent.label(itemsets.labels());
    let context = format!("rule {antecedent_label} -> {consequent_label}");
    let total = itemsets.total_rows() as f64;
    if total == 0.0 || antecedent_count == 0 || consequent_count == 0 {
        return Err(AnalysisError::numeric(context, "component support is zero"));
    }
    let antecedent_support = antecedent_count as f64 / total;
    let consequent_support = consequent_count as f64 / total;
    let support = count as f64 / total;
    let lift = support / (antecedent_support * consequent_support);
    if !lift.is_finite() || lift <= 0.0 {
        return Err(AnalysisError::numeric(
            context,
            format!("lift {lift} has no logarithm"),
        ));
    }
    Ok(AssociationRule {
        antecedent,
        consequent,
        antecedent_label,
        consequent_label,
        antecedent_support,
        consequent_support,
        support,
        confidence: support / antecedent_support,
        lift,
        leverage: support - antecedent_support * consequent_support,
        pmi: lift.ln(),
        antecedent_count,
        consequent_count,
        count,
    })
}

/// Derives every rule from the frequent itemsets of size two or more.
///
/// Rules with degenerate metrics are logged and left out.
pub fn derive_rules(itemsets: &FrequentItemsets) -> Vec<AssociationRule> {
    let span = tracing::info_span!("derive_rules", itemsets = itemsets.len());
    let _enter = span.enter();

    let mut rules = Vec::new();
    let mut excluded = 0usize;
    for (itemset, count) in itemsets.iter().filter(|(itemset, _)| itemset.len() >= 2) {
        for antecedent in itemset.proper_subsets() {
            let consequent = itemset.difference(&antecedent);
            let (Some(antecedent_count), Some(consequent_count)) =
                (itemsets.count(&antecedent), itemsets.count(&consequent))
            else {
                continue;
            };
            match evaluate(
                antecedent,
                consequent,
                (antecedent_count, consequent_count, count),
                itemsets,
            ) {
                Ok(rule) => rules.push(rule),
                Err(err) => {
                    excluded += 1;
                    tracing::warn!(error = %err, "rule excluded");
                }
            }
        }
    }
    tracing::debug!(rules = rules.len(), excluded, "rules derived");
    rules
}

fn sort_value(rule: &CanonicalRule, key: RuleSortKey) -> f64 {
    match key {
        RuleSortKey::CooccurrenceCount => rule.cooccurrence_count as f64,
        RuleSortKey::Support => rule.support,
        RuleSortKey::Lift => rule.lift,
        RuleSortKey::Leverage => rule.leverage,
        RuleSortKey::Pmi => rule.pmi,
        RuleSortKey::Entity1Count => rule.entity_1_count as f64,
        RuleSortKey::Entity2Count => rule.entity_2_count as f64,
    }
}

fn compare(a: &CanonicalRule, b: &CanonicalRule, key: RuleSortKey) -> Ordering {
    sort_value(b, key)
        .total_cmp(&sort_value(a, key))
        .then_with(|| a.entity_1.cmp(&b.entity_1))
        .then_with(|| a.entity_2.cmp(&b.entity_2))
}

/// Unordered identity of a display row: its two labels in sorted order.
fn label_key(rule: &CanonicalRule) -> (String, String) {
    if rule.entity_1 <= rule.entity_2 {
        (rule.entity_1.clone(), rule.entity_2.clone())
    } else {
        (rule.entity_2.clone(), rule.entity_1.clone())
    }
}

/// Unordered identity of a rule: its two itemsets in sorted order.
fn itemset_key(rule: &AssociationRule) -> (Itemset, Itemset) {
    if rule.antecedent <= rule.consequent {
        (rule.antecedent.clone(), rule.consequent.clone())
    } else {
        (rule.consequent.clone(), rule.antecedent.clone())
    }
}

/// Sorts rows by `key` (descending, ties by `entity_1` then `entity_2`) and
/// keeps the first row for each unordered pair of labels.
///
/// Display rows carry labels only; prefer [`canonicalize`] when the rules are
/// at hand. Applying this to its own output returns the same table.
pub fn canonicalize_table(mut rows: Vec<CanonicalRule>, key: RuleSortKey) -> Vec<CanonicalRule> {
    rows.sort_by(|a, b| compare(a, b, key));
    let mut seen = HashSet::new();
    rows.retain(|row| seen.insert(label_key(row)));
    rows
}

/// The rule table: one row per unordered pair of itemsets, in the order of
/// [`canonicalize_table`].
pub fn canonicalize(rules: &[AssociationRule], key: RuleSortKey) -> Vec<CanonicalRule> {
    let mut rows: Vec<(CanonicalRule, (Itemset, Itemset))> = rules
        .iter()
        .map(|rule| (rule.to_canonical(), itemset_key(rule)))
        .collect();
    rows.sort_by(|a, b| compare(&a.0, &b.0, key));
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter_map(|(row, sides)| seen.insert(sides).then_some(row))
        .collect()
}
