//! Content pack dependency injection
//!
//! Rules name a pack to inject and, optionally, the hosts it is injected
//! into. The resolver turns rules plus a catalog snapshot into references
//! prepended to a host's dependency list; the manager wires that into the
//! engine's hook points.

mod diagnostic;
mod manager;
mod resolver;
mod rule;

pub use diagnostic::Diagnostic;
pub use manager::ContentPackManager;
pub use resolver::{DependencyInjectionResolver, Resolution};
pub use rule::{InjectionRule, RuleError, RuleSet};
