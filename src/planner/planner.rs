//! Query planner
//!
//! Produces deterministic access plans from sparse search criteria.
//!
//! Selection priority (strict order):
//! 1. Title and album both present: primary key
//! 2. Exactly one field present: that field's index, no residual filter
//! 3. Several fields present: artist > title > album > year index,
//!    residual filter on every other present field
//!
//! Empty criteria are rejected; a full table scan is never planned.

use super::criteria::SearchCriteria;
use super::errors::{PlannerError, PlannerResult};
use super::plan::AccessPlan;
use super::rules::{PlanRule, PLAN_RULES};

/// Query planner over an ordered rule table (no runtime state)
#[derive(Debug, Clone, Copy)]
pub struct QueryPlanner {
    rules: &'static [PlanRule],
}

impl QueryPlanner {
    /// Creates a planner over the catalog's rule table
    pub fn new() -> Self {
        Self { rules: PLAN_RULES }
    }

    /// Plans a search, returning an immutable plan or error.
    ///
    /// This method is deterministic: same inputs → same plan.
    pub fn plan(&self, criteria: &SearchCriteria) -> PlannerResult<AccessPlan> {
        // 1. Resolve blanks and coerce year (invalid year rejects everything)
        let resolved = criteria.resolve()?;

        // 2. Never scan unconstrained
        if resolved.is_empty() {
            return Err(PlannerError::empty_criteria());
        }

        // 3. First matching rule wins
        let rule = self
            .rules
            .iter()
            .find(|r| r.guard.accepts(&resolved))
            .ok_or_else(|| PlannerError::no_plan("No rule accepts the supplied attributes"))?;

        rule.build(&resolved)
            .ok_or_else(|| PlannerError::no_plan(format!("Rule '{}' could not build a plan", rule.name)))
    }
}

impl Default for QueryPlanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::criteria::SearchField;
    use crate::planner::errors::PlannerErrorCode;
    use crate::planner::plan::AccessPath;
    use crate::store::{AttributeValue, Equality, KeyCondition};

    fn plan(criteria: SearchCriteria) -> AccessPlan {
        QueryPlanner::new().plan(&criteria).unwrap()
    }

    #[test]
    fn test_title_album_uses_primary_key() {
        let p = plan(SearchCriteria::new().with_title("T").with_album("A").with_artist("B"));
        assert_eq!(p.path, AccessPath::PrimaryKey);
        assert_eq!(
            p.key_condition,
            KeyCondition::partition("title", "T").with_sort("album", "A")
        );
        assert_eq!(p.residual.predicates(), &[Equality::new("artist", "B")]);
    }

    #[test]
    fn test_title_album_ignores_other_fields_for_path() {
        let p = plan(
            SearchCriteria::new()
                .with_title("T")
                .with_album("A")
                .with_artist("B")
                .with_year(1999_i64),
        );
        assert_eq!(p.path, AccessPath::PrimaryKey);
        assert_eq!(p.residual_attributes(), vec!["artist", "year"]);
    }

    #[test]
    fn test_single_field_uses_its_index() {
        let cases = [
            (SearchCriteria::new().with_artist("X"), SearchField::Artist),
            (SearchCriteria::new().with_title("X"), SearchField::Title),
            (SearchCriteria::new().with_album("X"), SearchField::Album),
            (SearchCriteria::new().with_year(1999_i64), SearchField::Year),
        ];
        for (criteria, field) in cases {
            let p = plan(criteria);
            assert_eq!(p.path, AccessPath::SecondaryIndex(field));
            assert!(p.residual.is_empty());
        }
    }

    #[test]
    fn test_artist_and_year() {
        let p = plan(SearchCriteria::new().with_artist("X").with_year(1999_i64));
        assert_eq!(p.path, AccessPath::SecondaryIndex(SearchField::Artist));
        assert_eq!(p.key_condition, KeyCondition::partition("artist", "X"));
        assert_eq!(
            p.residual.predicates(),
            &[Equality::new("year", AttributeValue::N(1999))]
        );
    }

    #[test]
    fn test_artist_has_highest_index_priority() {
        let p = plan(
            SearchCriteria::new()
                .with_title("T")
                .with_artist("X")
                .with_year(2001_i64),
        );
        assert_eq!(p.path, AccessPath::SecondaryIndex(SearchField::Artist));
        assert_eq!(p.residual_attributes(), vec!["title", "year"]);
    }

    #[test]
    fn test_zero_year_is_a_residual_predicate() {
        let p = plan(SearchCriteria::new().with_album("A").with_year(0_i64));
        assert_eq!(p.path, AccessPath::SecondaryIndex(SearchField::Album));
        assert_eq!(
            p.residual.predicates(),
            &[Equality::new("year", AttributeValue::N(0))]
        );
    }

    #[test]
    fn test_string_year_is_coerced_into_key() {
        let p = plan(SearchCriteria::new().with_year("1999"));
        assert_eq!(p.key_condition, KeyCondition::partition("year", AttributeValue::N(1999)));
    }

    #[test]
    fn test_empty_criteria_rejected() {
        let err = QueryPlanner::new().plan(&SearchCriteria::new()).unwrap_err();
        assert_eq!(err.code(), PlannerErrorCode::EmptyCriteria);
    }

    #[test]
    fn test_invalid_year_key_rejected() {
        let err = QueryPlanner::new()
            .plan(&SearchCriteria::new().with_year("not-a-year"))
            .unwrap_err();
        assert_eq!(err.code(), PlannerErrorCode::InvalidYear);
    }

    #[test]
    fn test_deterministic_planning() {
        let criteria = SearchCriteria::new().with_album("A").with_title("T2").with_year(1990_i64);
        let planner = QueryPlanner::new();
        let p1 = planner.plan(&criteria).unwrap();
        let p2 = planner.plan(&criteria).unwrap();
        assert_eq!(p1, p2);
    }
}
