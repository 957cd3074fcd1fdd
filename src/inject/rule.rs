//! Injection rule grammar.
//!
//! A rule is one configuration line:
//!
//! - `<selector>` injects the selected pack into every host
//! - `<selector>=<target1>,<target2>,...` injects it only into the listed hosts
//!
//! Selectors and targets match a pack by name or by project id. Nothing is
//! trimmed; empty entries in the target list are dropped.

use std::fmt;

use super::Diagnostic;
use crate::package::PackageDescriptor;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("rule '{0}' has more than one '=' separator")]
    TooManySeparators(String),
    #[error("rule '{0}' has an empty pack selector")]
    EmptySelector(String),
    #[error("rule '{0}' has no target packs after '='")]
    EmptyTargets(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionRule {
    pub source_selector: String,
    /// Empty means every host
    pub target_selectors: Vec<String>,
}

impl InjectionRule {
    pub fn parse(line: &str) -> Result<Self, RuleError> {
        let mut parts = line.split('=');
        let selector = parts.next().unwrap_or_default();
        let targets = parts.next();

        if parts.next().is_some() {
            return Err(RuleError::TooManySeparators(line.to_string()));
        }
        if selector.is_empty() {
            return Err(RuleError::EmptySelector(line.to_string()));
        }

        let target_selectors: Vec<String> = match targets {
            None => Vec::new(),
            Some(list) => {
                let mut targets: Vec<String> = Vec::new();
                for target in list.split(',').filter(|t| !t.is_empty()) {
                    if !targets.iter().any(|t| t == target) {
                        targets.push(target.to_string());
                    }
                }
                if targets.is_empty() {
                    return Err(RuleError::EmptyTargets(line.to_string()));
                }
                targets
            }
        };

        Ok(Self {
            source_selector: selector.to_string(),
            target_selectors,
        })
    }

    pub fn is_scoped(&self) -> bool {
        !self.target_selectors.is_empty()
    }

    /// Whether this rule injects anything into `host` at all.
    pub fn applies_to(&self, host: &PackageDescriptor) -> bool {
        !self.is_scoped()
            || self
                .target_selectors
                .iter()
                .any(|target| host.is_selected_by(target))
    }
}

impl fmt::Display for InjectionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_scoped() {
            write!(f, "{}={}", self.source_selector, self.target_selectors.join(","))
        } else {
            write!(f, "{}", self.source_selector)
        }
    }
}

/// Rules in declaration order, with the lines that failed to parse.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuleSet {
    rules: Vec<InjectionRule>,
    rejected: Vec<Diagnostic>,
}

impl RuleSet {
    /// Parse every line. Malformed lines are dropped and reported through
    /// [`RuleSet::rejected`]; they never fail the whole set.
    pub fn parse<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = RuleSet::default();
        for line in lines {
            match InjectionRule::parse(line.as_ref()) {
                Ok(rule) => set.rules.push(rule),
                Err(e) => {
                    log::warn!("Ignoring content pack injection: {}", e);
                    set.rejected.push(Diagnostic::MalformedRule(e));
                }
            }
        }
        set
    }

    pub fn rules(&self) -> &[InjectionRule] {
        &self.rules
    }

    pub fn rejected(&self) -> &[Diagnostic] {
        &self.rejected
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn extend(&mut self, other: RuleSet) {
        self.rules.extend(other.rules);
        self.rejected.extend(other.rejected);
    }
}
