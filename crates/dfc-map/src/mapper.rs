//! Schema mapper implementation.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::{Column, DataFrame};
use serde::Serialize;
use tracing::{Span, debug, info, warn};

use dfc_model::{DEFAULT_FUZZY_THRESHOLD, FieldMapping};

use crate::error::MappingError;
use crate::similarity::similarity_ratio;

/// How a column label was resolved to a standard name.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchKind {
    /// Case-insensitive alias hit.
    Exact,
    /// Best similarity score at or above the threshold.
    Fuzzy { score: f64 },
}

/// A resolved column label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnMatch {
    /// Original column label.
    pub source: String,
    /// Standard name the column maps to.
    pub target: String,
    pub kind: MatchKind,
}

impl ColumnMatch {
    /// True when the label actually changes.
    pub fn is_rename(&self) -> bool {
        self.source != self.target
    }
}

/// A rename that was refused because the target label was already taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCollision {
    /// Column that kept its original label.
    pub column: String,
    /// Standard name it would have been renamed to.
    pub target: String,
    /// Original label of the column holding the target name.
    pub claimed_by: String,
}

/// Output of [`SchemaMapper::standardize`].
#[derive(Debug, Clone)]
pub struct Standardized {
    /// Relabeled copy of the input frame.
    pub frame: DataFrame,
    /// Resolved columns whose label was applied, in column order.
    pub matches: Vec<ColumnMatch>,
    /// Renames refused to keep labels unique.
    pub collisions: Vec<LabelCollision>,
}

impl Standardized {
    /// Number of columns whose label changed.
    pub fn renamed_count(&self) -> usize {
        self.matches.iter().filter(|m| m.is_rename()).count()
    }
}

/// Maps varied column labels onto standard field names.
///
/// Built once from an ordered list of [`FieldMapping`]s; the order is the
/// tie-break priority for fuzzy matches. Read-only after construction.
#[derive(Debug, Clone)]
pub struct SchemaMapper {
    mappings: Vec<FieldMapping>,
    /// Lowercased standard names, parallel to `mappings`.
    standard_keys: Vec<String>,
    /// Lowercased aliases in registration order with their mapping index.
    aliases: Vec<(String, usize)>,
    alias_index: BTreeMap<String, usize>,
    threshold: f64,
    span: Span,
}

impl SchemaMapper {
    /// Build the alias and standard-name indices.
    ///
    /// Rejects configurations where one alias would resolve to two different
    /// standard names, instead of letting the later one win.
    pub fn new(mappings: Vec<FieldMapping>) -> Result<Self, MappingError> {
        let mut standard_keys: Vec<String> = Vec::with_capacity(mappings.len());
        for (position, mapping) in mappings.iter().enumerate() {
            if mapping.standard_name.trim().is_empty() {
                return Err(MappingError::EmptyStandardName { position });
            }
            let key = mapping.standard_name.to_lowercase();
            if standard_keys.contains(&key) {
                return Err(MappingError::DuplicateStandardName {
                    name: mapping.standard_name.clone(),
                });
            }
            standard_keys.push(key);
        }

        let mut aliases = Vec::new();
        let mut alias_index: BTreeMap<String, usize> = BTreeMap::new();
        for (owner, mapping) in mappings.iter().enumerate() {
            for alias in &mapping.aliases {
                if alias.trim().is_empty() {
                    return Err(MappingError::EmptyAlias {
                        standard: mapping.standard_name.clone(),
                    });
                }
                let key = alias.to_lowercase();
                if let Some(&existing) = alias_index.get(&key) {
                    if existing == owner {
                        continue;
                    }
                    return Err(MappingError::ConflictingAlias {
                        alias: alias.clone(),
                        first: mappings[existing].standard_name.clone(),
                        second: mapping.standard_name.clone(),
                    });
                }
                if let Some(shadowed) = standard_keys.iter().position(|s| *s == key)
                    && shadowed != owner
                {
                    return Err(MappingError::AliasShadowsStandard {
                        alias: alias.clone(),
                        owner: mapping.standard_name.clone(),
                        standard: mappings[shadowed].standard_name.clone(),
                    });
                }
                alias_index.insert(key.clone(), owner);
                aliases.push((key, owner));
            }
        }

        Ok(Self {
            mappings,
            standard_keys,
            aliases,
            alias_index,
            threshold: DEFAULT_FUZZY_THRESHOLD,
            span: Span::none(),
        })
    }

    /// Set the minimum similarity for a fuzzy match.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Attach the span that mapping events are recorded under.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn mappings(&self) -> &[FieldMapping] {
        &self.mappings
    }

    /// Standard names in registration order.
    pub fn standard_names(&self) -> impl Iterator<Item = &str> {
        self.mappings.iter().map(|m| m.standard_name.as_str())
    }

    /// Resolve a single column label.
    ///
    /// Returns `None` when neither an alias nor a fuzzy candidate matches.
    pub fn resolve(&self, column: &str) -> Option<ColumnMatch> {
        let key = column.to_lowercase();
        if let Some(&owner) = self.alias_index.get(&key) {
            return Some(ColumnMatch {
                source: column.to_string(),
                target: self.mappings[owner].standard_name.clone(),
                kind: MatchKind::Exact,
            });
        }

        let (owner, score) = self.best_candidate(&key)?;
        if score < self.threshold {
            return None;
        }
        let target = self.mappings[owner].standard_name.clone();
        info!(
            parent: &self.span,
            column,
            target = %target,
            score,
            "fuzzy matched column"
        );
        Some(ColumnMatch {
            source: column.to_string(),
            target,
            kind: MatchKind::Fuzzy { score },
        })
    }

    /// Highest-scoring candidate; standard names first, then aliases.
    ///
    /// Only a strictly greater score replaces the current best, so ties go to
    /// the earliest-registered candidate.
    fn best_candidate(&self, key: &str) -> Option<(usize, f64)> {
        let standards = self.standard_keys.iter().enumerate();
        let aliases = self.aliases.iter().map(|(alias, owner)| (*owner, alias));

        let mut best: Option<(usize, f64)> = None;
        let mut best_score = 0.0;
        for (owner, candidate) in standards.chain(aliases) {
            let score = similarity_ratio(key, candidate);
            if score > best_score {
                best_score = score;
                best = Some((owner, score));
            }
        }
        best
    }

    /// Relabel a frame's columns with their standard names.
    ///
    /// Row count, column count and column order are preserved, and the input
    /// frame is left untouched. Unmatched columns keep their label.
    pub fn standardize(&self, frame: &DataFrame) -> Result<Standardized, MappingError> {
        let originals: Vec<String> = frame
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();
        let resolved: Vec<Option<ColumnMatch>> =
            originals.iter().map(|column| self.resolve(column)).collect();

        let (labels, collisions) = assign_labels(&originals, &resolved);
        for collision in &collisions {
            warn!(
                parent: &self.span,
                column = %collision.column,
                target = %collision.target,
                claimed_by = %collision.claimed_by,
                "standard name already taken, keeping original label"
            );
        }

        let columns: Vec<Column> = frame
            .get_columns()
            .iter()
            .zip(&labels)
            .map(|(column, label)| column.clone().with_name(label.as_str().into()))
            .collect();
        let standardized = DataFrame::new(columns)?;

        let refused: BTreeSet<&str> = collisions.iter().map(|c| c.column.as_str()).collect();
        let matches: Vec<ColumnMatch> = resolved
            .into_iter()
            .flatten()
            .filter(|m| !refused.contains(m.source.as_str()))
            .collect();
        debug!(
            parent: &self.span,
            columns = originals.len(),
            matched = matches.len(),
            collisions = collisions.len(),
            "standardized frame"
        );

        Ok(Standardized {
            frame: standardized,
            matches,
            collisions,
        })
    }
}

/// Pick a unique label per column.
///
/// A column keeping its own label always holds it. When a rename would
/// duplicate a label, the renamed column falls back to its original label;
/// this repeats until every label is unique.
fn assign_labels(
    originals: &[String],
    resolved: &[Option<ColumnMatch>],
) -> (Vec<String>, Vec<LabelCollision>) {
    let renames = |idx: usize| {
        resolved[idx]
            .as_ref()
            .is_some_and(|m| m.target != originals[idx])
    };
    let mut fallback = vec![false; originals.len()];
    let mut collisions = Vec::new();

    loop {
        let labels: Vec<&str> = (0..originals.len())
            .map(|idx| match &resolved[idx] {
                Some(m) if !fallback[idx] => m.target.as_str(),
                _ => originals[idx].as_str(),
            })
            .collect();

        let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
        let mut conflict = None;
        for (idx, label) in labels.iter().enumerate() {
            if let Some(&holder) = seen.get(label) {
                // Input labels are unique, so at least one side is a rename.
                let (loser, winner) = if renames(idx) && !fallback[idx] {
                    (idx, holder)
                } else {
                    (holder, idx)
                };
                conflict = Some((loser, winner, label.to_string()));
                break;
            }
            seen.insert(label, idx);
        }

        match conflict {
            None => {
                let labels = labels.into_iter().map(str::to_string).collect();
                return (labels, collisions);
            }
            Some((loser, winner, target)) => {
                fallback[loser] = true;
                collisions.push(LabelCollision {
                    column: originals[loser].clone(),
                    target,
                    claimed_by: originals[winner].clone(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exact(source: &str, target: &str) -> Option<ColumnMatch> {
        Some(ColumnMatch {
            source: source.to_string(),
            target: target.to_string(),
            kind: MatchKind::Exact,
        })
    }

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn first_rename_claims_the_label() {
        let originals = names(&["rev", "sale_amount"]);
        let resolved = vec![exact("rev", "revenue"), exact("sale_amount", "revenue")];

        let (labels, collisions) = assign_labels(&originals, &resolved);

        assert_eq!(labels, vec!["revenue", "sale_amount"]);
        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[0].column, "sale_amount");
        assert_eq!(collisions[0].claimed_by, "rev");
    }

    #[test]
    fn kept_label_beats_earlier_rename() {
        let originals = names(&["rev", "revenue"]);
        let resolved = vec![exact("rev", "revenue"), None];

        let (labels, collisions) = assign_labels(&originals, &resolved);

        assert_eq!(labels, vec!["rev", "revenue"]);
        assert_eq!(collisions[0].column, "rev");
        assert_eq!(collisions[0].claimed_by, "revenue");
    }

    #[test]
    fn fallback_cascades_until_unique() {
        // "x" -> "y" is only possible while "y" renames away; once "y" falls
        // back, "x" must fall back too.
        let originals = names(&["x", "y", "z"]);
        let resolved = vec![exact("x", "y"), exact("y", "z"), None];

        let (labels, collisions) = assign_labels(&originals, &resolved);

        assert_eq!(labels, vec!["x", "y", "z"]);
        assert_eq!(collisions.len(), 2);
    }
}
