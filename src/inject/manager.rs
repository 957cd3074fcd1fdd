//! The content pack manager feature: the two hook points the host engine
//! calls into.

use log::{debug, info};
use std::path::PathBuf;

use super::{DependencyInjectionResolver, Diagnostic, Resolution, RuleSet};
use crate::config::ContentPackManagerConfig;
use crate::package::{
    CatalogProvider, ContentRegistry, PackOrigin, PackageDescriptor, PackageReference,
};
use crate::runtime::Runtime;

pub struct ContentPackManager {
    enabled: bool,
    appended_folders: Vec<PathBuf>,
    rules: RuleSet,
    resolver: DependencyInjectionResolver,
    log_names_resolved: bool,
}

impl ContentPackManager {
    pub fn new(config: &ContentPackManagerConfig) -> Self {
        let rules = RuleSet::parse(&config.content_pack_injections);
        if rules.is_empty() {
            debug!("No content pack injections configured");
        }
        Self {
            enabled: config.enabled,
            appended_folders: config.appended_content_pack_folders.clone(),
            resolver: DependencyInjectionResolver::new(rules.clone()),
            rules,
            log_names_resolved: config.log_content_pack_names_resolved,
        }
    }

    /// Add rules after the configured ones.
    pub fn with_extra_rules(mut self, extra: RuleSet) -> Self {
        self.rules.extend(extra);
        self.resolver = DependencyInjectionResolver::new(self.rules.clone());
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Rule lines that were dropped at parse time.
    pub fn rejected_rules(&self) -> &[Diagnostic] {
        self.rules.rejected()
    }

    /// Hook: the engine is about to rebuild its project list. Appends the
    /// configured folders at the end of the search path.
    pub fn on_refresh_project_list<R: Runtime>(&self, registry: &mut ContentRegistry<'_, R>) {
        if !self.enabled || self.appended_folders.is_empty() {
            return;
        }
        for folder in &self.appended_folders {
            registry.include_search_path(folder.clone(), PackOrigin::Local);
        }
    }

    /// Hook: `host`'s dependencies are about to be resolved. Splices the
    /// injected references into `dependencies` in place.
    pub fn on_resolve_dependencies<P: CatalogProvider + ?Sized>(
        &self,
        host: &PackageDescriptor,
        provider: &P,
        dependencies: &mut Vec<PackageReference>,
    ) -> Resolution {
        if !self.enabled {
            return Resolution::default();
        }

        if self.log_names_resolved {
            info!(
                "Resolve dependencies for content pack: Name='{}' ProjectId='{}'",
                host.name, host.project_id
            );
        }

        let Some(catalog) = provider.snapshot() else {
            let diagnostic = Diagnostic::MissingCatalog;
            diagnostic.report();
            return Resolution {
                injected: Vec::new(),
                diagnostics: vec![diagnostic],
            };
        };

        let resolution = self.resolver.inject(host, &catalog, dependencies);
        if !resolution.is_empty() {
            debug!(
                "Injected {} dependency(ies) into '{}'",
                resolution.injected.len(),
                host.name
            );
        }
        resolution
    }
}
