//! Ordered plan selection table
//!
//! Rules are evaluated top to bottom and the first whose guard accepts the
//! present fields builds the plan. Later rules are never consulted once one
//! fires. The table is plain data so the priority order can be read (and
//! tested) without a store.

use super::criteria::{ResolvedCriteria, SearchField};
use super::plan::{AccessPath, AccessPlan};
use crate::store::{FilterExpression, KeyCondition};

/// Predicate over the set of present fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Both fields present (others may be too)
    Both(SearchField, SearchField),
    /// This field present and no other
    Only(SearchField),
    /// This field present, possibly alongside others
    Has(SearchField),
}

impl Guard {
    pub fn accepts(&self, criteria: &ResolvedCriteria) -> bool {
        match *self {
            Guard::Both(a, b) => criteria.has(a) && criteria.has(b),
            Guard::Only(field) => criteria.present() == [field],
            Guard::Has(field) => criteria.has(field),
        }
    }
}

/// Plan constructor selected by a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Query the table by (title, album); residual on the remaining fields
    PrimaryKey,
    /// Query a single-attribute index with no residual filter
    SoleIndex(SearchField),
    /// Query a single-attribute index; residual on every other present field
    FilteredIndex(SearchField),
}

/// One row of the selection table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanRule {
    pub name: &'static str,
    pub guard: Guard,
    pub action: Action,
}

impl PlanRule {
    /// Builds the plan for criteria accepted by this rule's guard.
    ///
    /// Returns `None` if a key field is absent, which only happens when the
    /// guard and action of a rule disagree.
    pub fn build(&self, criteria: &ResolvedCriteria) -> Option<AccessPlan> {
        let (path, key_condition, key_fields) = match self.action {
            Action::PrimaryKey => {
                let title = criteria.value_of(SearchField::Title)?;
                let album = criteria.value_of(SearchField::Album)?;
                (
                    AccessPath::PrimaryKey,
                    KeyCondition::partition(SearchField::Title.attribute(), title)
                        .with_sort(SearchField::Album.attribute(), album),
                    vec![SearchField::Title, SearchField::Album],
                )
            }
            Action::SoleIndex(field) | Action::FilteredIndex(field) => (
                AccessPath::SecondaryIndex(field),
                KeyCondition::partition(field.attribute(), criteria.value_of(field)?),
                vec![field],
            ),
        };

        let mut residual = FilterExpression::new();
        if !matches!(self.action, Action::SoleIndex(_)) {
            for field in criteria.present() {
                if key_fields.contains(&field) {
                    continue;
                }
                if let Some(value) = criteria.value_of(field) {
                    residual = residual.and_eq(field.attribute(), value);
                }
            }
        }

        Some(AccessPlan {
            rule: self.name,
            path,
            key_condition,
            residual,
        })
    }
}

/// Plan selection table, highest priority first.
///
/// When several fields are present without the (title, album) pair the
/// index is chosen artist > title > album > year.
pub const PLAN_RULES: &[PlanRule] = &[
    PlanRule {
        name: "title-and-album",
        guard: Guard::Both(SearchField::Title, SearchField::Album),
        action: Action::PrimaryKey,
    },
    PlanRule {
        name: "artist-only",
        guard: Guard::Only(SearchField::Artist),
        action: Action::SoleIndex(SearchField::Artist),
    },
    PlanRule {
        name: "title-only",
        guard: Guard::Only(SearchField::Title),
        action: Action::SoleIndex(SearchField::Title),
    },
    PlanRule {
        name: "album-only",
        guard: Guard::Only(SearchField::Album),
        action: Action::SoleIndex(SearchField::Album),
    },
    PlanRule {
        name: "year-only",
        guard: Guard::Only(SearchField::Year),
        action: Action::SoleIndex(SearchField::Year),
    },
    PlanRule {
        name: "artist-with-filters",
        guard: Guard::Has(SearchField::Artist),
        action: Action::FilteredIndex(SearchField::Artist),
    },
    PlanRule {
        name: "title-with-filters",
        guard: Guard::Has(SearchField::Title),
        action: Action::FilteredIndex(SearchField::Title),
    },
    PlanRule {
        name: "album-with-filters",
        guard: Guard::Has(SearchField::Album),
        action: Action::FilteredIndex(SearchField::Album),
    },
    PlanRule {
        name: "year-with-filters",
        guard: Guard::Has(SearchField::Year),
        action: Action::FilteredIndex(SearchField::Year),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(title: Option<&str>, album: Option<&str>, artist: Option<&str>, year: Option<i64>) -> ResolvedCriteria {
        ResolvedCriteria {
            title: title.map(String::from),
            album: album.map(String::from),
            artist: artist.map(String::from),
            year,
        }
    }

    fn first_match(criteria: &ResolvedCriteria) -> &'static PlanRule {
        PLAN_RULES
            .iter()
            .find(|r| r.guard.accepts(criteria))
            .expect("a rule must match non-empty criteria")
    }

    #[test]
    fn test_pair_rule_is_first() {
        assert_eq!(PLAN_RULES[0].action, Action::PrimaryKey);
    }

    #[test]
    fn test_only_guard_requires_exclusivity() {
        let c = resolved(None, None, Some("X"), Some(1999));
        assert!(!Guard::Only(SearchField::Artist).accepts(&c));
        assert!(Guard::Has(SearchField::Artist).accepts(&c));
    }

    #[test]
    fn test_every_nonempty_combination_has_a_rule() {
        for mask in 1u8..16 {
            let c = resolved(
                (mask & 1 != 0).then_some("T"),
                (mask & 2 != 0).then_some("A"),
                (mask & 4 != 0).then_some("X"),
                (mask & 8 != 0).then_some(2000),
            );
            let rule = first_match(&c);
            assert!(rule.build(&c).is_some(), "rule {} failed to build", rule.name);
        }
    }

    #[test]
    fn test_empty_criteria_matches_nothing() {
        let c = ResolvedCriteria::default();
        assert!(PLAN_RULES.iter().all(|r| !r.guard.accepts(&c)));
    }

    #[test]
    fn test_sole_index_has_no_residual() {
        let c = resolved(None, Some("Parachutes"), None, None);
        let plan = first_match(&c).build(&c).unwrap();
        assert_eq!(plan.rule, "album-only");
        assert!(plan.residual.is_empty());
    }

    #[test]
    fn test_title_beats_album_and_year() {
        let c = resolved(Some("Yellow"), None, None, Some(2000));
        let plan = first_match(&c).build(&c).unwrap();
        assert_eq!(plan.path, AccessPath::SecondaryIndex(SearchField::Title));
        assert_eq!(plan.residual_attributes(), vec!["year"]);
    }

    #[test]
    fn test_album_beats_year() {
        let c = resolved(None, Some("Parachutes"), None, Some(2000));
        let plan = first_match(&c).build(&c).unwrap();
        assert_eq!(plan.rule, "album-with-filters");
        assert_eq!(plan.residual_attributes(), vec!["year"]);
    }
}
