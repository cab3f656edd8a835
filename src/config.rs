/// How homomorphism search treats literals over derived predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivedPolicy {
    /// Meeting a derived literal is an error.
    Forbidden,
    /// Derived literals match iff their predicate names match.
    SameName,
    /// Names match, or the derivation rules are mutually homomorphic.
    RuleStructural,
}

#[derive(Debug, Clone, Copy)]
pub struct AnalysisConfig {
    pub derived_literals: DerivedPolicy,
}

pub const ANALYSIS_CONFIG: AnalysisConfig =
    AnalysisConfig { derived_literals: DerivedPolicy::RuleStructural };

impl Default for AnalysisConfig {
    fn default() -> Self {
        ANALYSIS_CONFIG
    }
}
