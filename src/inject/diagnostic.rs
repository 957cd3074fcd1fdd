use log::{debug, warn};

use super::RuleError;

/// Non-fatal conditions raised while injecting dependencies.
///
/// None of these stop a resolution; the host pack simply loads with fewer
/// injected dependencies than configured.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Diagnostic {
    #[error("No content packs matched :{rule}:")]
    UnmatchedRule { rule: String },

    #[error("Rule '{rule}' does not target content pack '{host}'")]
    NotApplicable { rule: String, host: String },

    #[error(transparent)]
    MalformedRule(#[from] RuleError),

    #[error("Could not find the content pack catalog")]
    MissingCatalog,

    #[error("Content pack '{package}' is already a dependency of '{host}'")]
    DuplicateInjection { package: String, host: String },
}

impl Diagnostic {
    /// Whether this points at a configuration or ordering problem the user
    /// should look at, as opposed to a rule simply not applying.
    pub fn is_problem(&self) -> bool {
        matches!(
            self,
            Diagnostic::UnmatchedRule { .. }
                | Diagnostic::MalformedRule(_)
                | Diagnostic::MissingCatalog
        )
    }

    /// Send this diagnostic to the log.
    pub fn report(&self) {
        if self.is_problem() {
            warn!("{}", self);
        } else {
            debug!("{}", self);
        }
    }
}
