//! Explain plan output
//!
//! Produces deterministic, human-readable explain output.

use std::fmt;

use serde::Serialize;

use super::errors::PlannerError;
use super::plan::AccessPlan;

/// Explain plan output
#[derive(Debug, Clone, Serialize)]
pub struct ExplainPlan {
    /// Whether planning succeeded
    pub accepted: bool,
    /// Rule that fired (if accepted)
    pub rule: Option<String>,
    /// Scanned index (if accepted)
    pub index: Option<String>,
    /// Scan type description
    pub scan_type: Option<String>,
    /// Key condition
    pub key_condition: Option<String>,
    /// Residual predicates, ANDed
    pub residual: Vec<String>,
    /// Rejection reason (if rejected)
    pub rejection_reason: Option<String>,
    /// Rejection error code (if rejected)
    pub rejection_code: Option<String>,
}

impl ExplainPlan {
    /// Creates an explain plan from a successful access plan
    pub fn from_plan(plan: &AccessPlan) -> Self {
        Self {
            accepted: true,
            rule: Some(plan.rule.to_string()),
            index: Some(plan.index_label().to_string()),
            scan_type: Some(plan.path.as_str().to_string()),
            key_condition: Some(plan.key_condition.to_string()),
            residual: plan
                .residual
                .predicates()
                .iter()
                .map(|p| p.to_string())
                .collect(),
            rejection_reason: None,
            rejection_code: None,
        }
    }

    /// Creates an explain plan from a planning error
    pub fn from_error(err: &PlannerError) -> Self {
        Self {
            accepted: false,
            rule: None,
            index: None,
            scan_type: None,
            key_condition: None,
            residual: Vec::new(),
            rejection_reason: Some(err.message().to_string()),
            rejection_code: Some(err.code().code().to_string()),
        }
    }
}

impl fmt::Display for ExplainPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== EXPLAIN PLAN ===")?;

        if self.accepted {
            writeln!(f, "Status: ACCEPTED")?;
            if let Some(rule) = &self.rule {
                writeln!(f, "Rule: {}", rule)?;
            }
            if let Some(idx) = &self.index {
                writeln!(f, "Index: {}", idx)?;
            }
            if let Some(scan) = &self.scan_type {
                writeln!(f, "Scan Type: {}", scan)?;
            }
            if let Some(key) = &self.key_condition {
                writeln!(f, "Key Condition: {}", key)?;
            }
            if !self.residual.is_empty() {
                writeln!(f, "Residual Filter:")?;
                for pred in &self.residual {
                    writeln!(f, "  - {}", pred)?;
                }
            }
        } else {
            writeln!(f, "Status: REJECTED")?;
            if let Some(code) = &self.rejection_code {
                writeln!(f, "Error Code: {}", code)?;
            }
            if let Some(reason) = &self.rejection_reason {
                writeln!(f, "Reason: {}", reason)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::criteria::SearchCriteria;
    use crate::planner::planner::QueryPlanner;

    #[test]
    fn test_explain_accepted_plan() {
        let plan = QueryPlanner::new()
            .plan(&SearchCriteria::new().with_artist("X").with_year(1999_i64))
            .unwrap();
        let explain = ExplainPlan::from_plan(&plan);

        assert!(explain.accepted);
        assert_eq!(explain.index, Some("ArtistIndex".into()));
        assert_eq!(explain.scan_type, Some("INDEX_QUERY".into()));
        assert_eq!(explain.residual, vec!["year = 1999".to_string()]);

        let output = format!("{}", explain);
        assert!(output.contains("ACCEPTED"));
        assert!(output.contains(r#"Key Condition: artist = "X""#));
    }

    #[test]
    fn test_explain_rejected_plan() {
        let err = QueryPlanner::new().plan(&SearchCriteria::new()).unwrap_err();
        let explain = ExplainPlan::from_error(&err);

        assert!(!explain.accepted);
        assert_eq!(explain.rejection_code, Some("MUSICAT_QUERY_EMPTY".into()));

        let output = format!("{}", explain);
        assert!(output.contains("REJECTED"));
        assert!(output.contains("MUSICAT_QUERY_EMPTY"));
    }

    #[test]
    fn test_explain_deterministic() {
        let plan = QueryPlanner::new()
            .plan(&SearchCriteria::new().with_title("T").with_album("A"))
            .unwrap();
        let explain1 = format!("{}", ExplainPlan::from_plan(&plan));
        let explain2 = format!("{}", ExplainPlan::from_plan(&plan));

        assert_eq!(explain1, explain2);
        assert!(explain1.contains("Index: PRIMARY"));
    }
}
