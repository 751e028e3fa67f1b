//! Compatibility calculation between proprietary apps and alternatives
//!
//! Compatibility is binary per capability: an alternative is compatible
//! with a declared capability iff it has an active implementation whose
//! capability id matches. The score is the percentage of the proprietary
//! app's declared set that the alternative covers.

use std::collections::HashSet;

use crate::core::identity::EntityId;
use crate::entities::{Alternative, ProprietaryApp};

/// Result of comparing one alternative against one proprietary app
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatReport {
    /// Declared capabilities the alternative implements, in the
    /// alternative's implementation order
    pub matched: Vec<EntityId>,

    /// Declared capabilities the alternative is missing, in the
    /// proprietary app's declaration order
    pub missing: Vec<EntityId>,

    /// Number of declared capabilities (deduplicated)
    pub total: usize,

    /// Percentage score in [0, 100]
    pub score: u8,
}

impl CompatReport {
    /// Compare an alternative's active implementations against a
    /// proprietary app's declared capability set.
    pub fn compute(app: &ProprietaryApp, alt: &Alternative) -> Self {
        let declared = app.declared_capability_ids();
        Self::from_parts(&declared, &app.links.capabilities, alt)
    }

    fn from_parts(
        declared: &HashSet<EntityId>,
        declaration_order: &[EntityId],
        alt: &Alternative,
    ) -> Self {
        let implemented: HashSet<&EntityId> = alt
            .active_implementations()
            .map(|i| &i.capability)
            .collect();

        let matched: Vec<EntityId> = alt
            .active_implementations()
            .map(|i| i.capability.clone())
            .filter(|id| declared.contains(id))
            .collect();

        let mut seen = HashSet::new();
        let missing: Vec<EntityId> = declaration_order
            .iter()
            .filter(|id| seen.insert((*id).clone()))
            .filter(|id| !implemented.contains(id))
            .cloned()
            .collect();

        let total = declared.len();
        let score = compatibility_score(matched.len(), total);

        Self {
            matched,
            missing,
            total,
            score,
        }
    }

    /// True when every declared capability is covered
    pub fn is_full_match(&self) -> bool {
        self.total > 0 && self.matched.len() == self.total
    }
}

/// Percentage of `total` covered by `matches`, rounded half up.
///
/// A zero-capability app scores 0 against every alternative (no division
/// by zero).
pub fn compatibility_score(matches: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    (100.0 * matches as f64 / total as f64).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EntityPrefix;
    use crate::entities::CapabilityImplementation;

    fn cap() -> EntityId {
        EntityId::new(EntityPrefix::Cap)
    }

    fn alt_implementing(caps: &[EntityId]) -> Alternative {
        let mut alt = Alternative::new("Alt".to_string(), "test".to_string());
        for c in caps {
            alt.implementations
                .push(CapabilityImplementation::new(c.clone()));
        }
        alt
    }

    fn app_declaring(caps: &[EntityId]) -> ProprietaryApp {
        let mut app = ProprietaryApp::new("App".to_string(), "test".to_string());
        app.links.capabilities = caps.to_vec();
        app
    }

    #[test]
    fn test_half_coverage_scores_50() {
        let (a, b, c, d) = (cap(), cap(), cap(), cap());
        let app = app_declaring(&[a.clone(), b.clone(), c.clone(), d.clone()]);
        let alt = alt_implementing(&[a.clone(), c.clone()]);

        let report = CompatReport::compute(&app, &alt);
        assert_eq!(report.matched.len(), 2);
        assert_eq!(report.total, 4);
        assert_eq!(report.score, 50);
        assert_eq!(report.missing, vec![b, d]);
    }

    #[test]
    fn test_zero_declared_scores_zero() {
        let app = app_declaring(&[]);
        let alt = alt_implementing(&[cap(), cap()]);

        let report = CompatReport::compute(&app, &alt);
        assert_eq!(report.score, 0);
        assert!(report.matched.is_empty());
        assert!(report.missing.is_empty());
    }

    #[test]
    fn test_zero_implementations_scores_zero() {
        let app = app_declaring(&[cap(), cap()]);
        let alt = alt_implementing(&[]);

        let report = CompatReport::compute(&app, &alt);
        assert_eq!(report.score, 0);
        assert!(report.matched.is_empty());
        assert_eq!(report.missing.len(), 2);
    }

    #[test]
    fn test_full_coverage_scores_100() {
        let (a, b) = (cap(), cap());
        let app = app_declaring(&[a.clone(), b.clone()]);
        let alt = alt_implementing(&[b, a]);

        let report = CompatReport::compute(&app, &alt);
        assert_eq!(report.score, 100);
        assert!(report.is_full_match());
        assert!(report.missing.is_empty());
    }

    #[test]
    fn test_extra_implementations_do_not_count() {
        let a = cap();
        let app = app_declaring(&[a.clone()]);
        let alt = alt_implementing(&[a, cap(), cap()]);

        let report = CompatReport::compute(&app, &alt);
        assert_eq!(report.matched.len(), 1);
        assert_eq!(report.score, 100);
    }

    #[test]
    fn test_inactive_implementations_are_excluded() {
        let (a, b) = (cap(), cap());
        let app = app_declaring(&[a.clone(), b.clone()]);
        let mut alt = alt_implementing(&[a]);
        let mut inactive = CapabilityImplementation::new(b);
        inactive.is_active = false;
        alt.implementations.push(inactive);

        let report = CompatReport::compute(&app, &alt);
        assert_eq!(report.matched.len(), 1);
        assert_eq!(report.score, 50);
    }

    #[test]
    fn test_duplicate_declarations_count_once() {
        let a = cap();
        let app = app_declaring(&[a.clone(), a.clone()]);
        let alt = alt_implementing(&[a]);

        let report = CompatReport::compute(&app, &alt);
        assert_eq!(report.total, 1);
        assert_eq!(report.score, 100);
    }

    #[test]
    fn test_score_rounds_half_up() {
        assert_eq!(compatibility_score(1, 8), 13); // 12.5 -> 13
        assert_eq!(compatibility_score(1, 3), 33);
        assert_eq!(compatibility_score(2, 3), 67);
    }

    #[test]
    fn test_score_is_deterministic() {
        let (a, b, c) = (cap(), cap(), cap());
        let app = app_declaring(&[a.clone(), b.clone(), c.clone()]);
        let alt = alt_implementing(&[c, a]);

        let first = CompatReport::compute(&app, &alt);
        let second = CompatReport::compute(&app, &alt);
        assert_eq!(first, second);
    }
}
