//! Dependency injection resolver.
//!
//! Given a host pack, a catalog snapshot and the configured rules, work out
//! which package references get spliced into the front of the host's
//! dependency list. The resolver is pure: it never touches the registry or
//! the host, it only reports what to insert.

use log::info;

use super::{Diagnostic, InjectionRule, RuleSet};
use crate::package::{Catalog, PackageDescriptor, PackageReference};

/// Outcome of resolving one host.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Resolution {
    /// References in the order they were inserted at the head of the list.
    /// The last one ends up first.
    pub injected: Vec<PackageReference>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.injected.is_empty()
    }

    /// Insert every injected reference at index 0 of `dependencies`, skipping
    /// any already present. Applying the same resolution twice is a no-op the
    /// second time.
    ///
    /// Returns the number of references inserted.
    pub fn apply(&self, dependencies: &mut Vec<PackageReference>) -> usize {
        let mut inserted = 0;
        for reference in &self.injected {
            if !dependencies.contains(reference) {
                dependencies.insert(0, reference.clone());
                inserted += 1;
            }
        }
        inserted
    }

    /// Problems worth surfacing, leaving out rules that merely did not apply.
    pub fn problems(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_problem())
    }
}

#[derive(Debug, Clone, Default)]
pub struct DependencyInjectionResolver {
    rules: RuleSet,
}

impl DependencyInjectionResolver {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[InjectionRule] {
        self.rules.rules()
    }

    /// Work out what to prepend to `host`'s dependency list.
    ///
    /// Rules run in declaration order. For each one the first catalog pack it
    /// selects is taken; a reference already in `existing` (or injected by an
    /// earlier rule) is skipped.
    pub fn resolve(
        &self,
        host: &PackageDescriptor,
        catalog: &Catalog,
        existing: &[PackageReference],
    ) -> Resolution {
        let mut resolution = Resolution::default();

        for rule in self.rules.rules() {
            if !rule.applies_to(host) {
                resolution.diagnostics.push(Diagnostic::NotApplicable {
                    rule: rule.to_string(),
                    host: host.name.clone(),
                });
                continue;
            }

            let Some(pack) = catalog.find(&rule.source_selector) else {
                resolution.diagnostics.push(Diagnostic::UnmatchedRule {
                    rule: rule.to_string(),
                });
                continue;
            };

            let reference = pack.to_reference();
            if existing.contains(&reference) || resolution.injected.contains(&reference) {
                resolution.diagnostics.push(Diagnostic::DuplicateInjection {
                    package: pack.name.clone(),
                    host: host.name.clone(),
                });
                continue;
            }

            info!(
                "Injecting content pack {} as dependency of {}",
                pack.name, host.name
            );
            resolution.injected.push(reference);
        }

        resolution
    }

    /// Resolve and apply in one step, mutating `dependencies` in place.
    pub fn inject(
        &self,
        host: &PackageDescriptor,
        catalog: &Catalog,
        dependencies: &mut Vec<PackageReference>,
    ) -> Resolution {
        let resolution = self.resolve(host, catalog, dependencies);
        resolution.apply(dependencies);
        for diagnostic in &resolution.diagnostics {
            diagnostic.report();
        }
        resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack(name: &str, id: &str) -> PackageDescriptor {
        PackageDescriptor::new(name, id).with_version("1.0")
    }

    fn resolver(lines: &[&str]) -> DependencyInjectionResolver {
        DependencyInjectionResolver::new(RuleSet::parse(lines))
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            pack("Dragonfall", "df"),
            pack("Hong Kong", "hk"),
            pack("pkgA", "a-01"),
            pack("pkgB", "b-01"),
            pack("Foo", "123"),
        ])
    }

    fn names(deps: &[PackageReference]) -> Vec<&str> {
        deps.iter().map(|d| d.package_name.as_str()).collect()
    }

    #[test]
    fn test_later_rules_end_up_first() {
        let host = pack("Dragonfall", "df");
        let mut deps = vec![pack("X", "x").to_reference()];

        resolver(&["pkgA", "pkgB"]).inject(&host, &catalog(), &mut deps);

        assert_eq!(names(&deps), vec!["pkgB", "pkgA", "X"]);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let host = pack("Dragonfall", "df");
        let resolver = resolver(&["pkgA", "pkgB"]);
        let existing = vec![pack("X", "x").to_reference()];

        let mut once = existing.clone();
        resolver.resolve(&host, &catalog(), &existing).apply(&mut once);

        let mut twice = existing.clone();
        resolver.resolve(&host, &catalog(), &existing).apply(&mut twice);
        let second = resolver.resolve(&host, &catalog(), &existing);
        assert_eq!(second.apply(&mut twice), 0);

        assert_eq!(once, twice);

        // Injecting into an already-injected list changes nothing either.
        let again = resolver.inject(&host, &catalog(), &mut twice);
        assert!(again.is_empty());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unscoped_rule_applies_to_every_host() {
        let resolver = resolver(&["pkgA"]);
        for host in catalog().iter() {
            let mut deps = Vec::new();
            resolver.inject(host, &catalog(), &mut deps);
            assert_eq!(names(&deps), vec!["pkgA"], "host {}", host.name);
        }
    }

    #[test]
    fn test_scoped_rule_restricts_hosts() {
        let resolver = resolver(&["pkgA=Dragonfall,hk"]);

        let mut df = Vec::new();
        resolver.inject(&pack("Dragonfall", "df"), &catalog(), &mut df);
        assert_eq!(names(&df), vec!["pkgA"]);

        let mut hk = Vec::new();
        resolver.inject(&pack("Hong Kong", "hk"), &catalog(), &mut hk);
        assert_eq!(names(&hk), vec!["pkgA"]);

        let mut other = Vec::new();
        let resolution = resolver.inject(&pack("Foo", "123"), &catalog(), &mut other);
        assert!(other.is_empty());
        assert_eq!(
            resolution.diagnostics,
            vec![Diagnostic::NotApplicable {
                rule: "pkgA=Dragonfall,hk".into(),
                host: "Foo".into(),
            }]
        );
        assert_eq!(resolution.problems().count(), 0);
    }

    #[test]
    fn test_selector_matches_name_or_id() {
        let host = pack("Dragonfall", "df");
        let by_name = resolver(&["Foo"]).resolve(&host, &catalog(), &[]);
        let by_id = resolver(&["123"]).resolve(&host, &catalog(), &[]);

        assert_eq!(by_name.injected, by_id.injected);
        assert_eq!(by_name.injected[0].package_id, "123");
    }

    #[test]
    fn test_first_catalog_match_wins() {
        let catalog = Catalog::new(vec![
            pack("Portraits", "p-old").with_version("1"),
            pack("Portraits", "p-new").with_version("2"),
        ]);
        let resolution = resolver(&["Portraits"]).resolve(&pack("Dragonfall", "df"), &catalog, &[]);
        assert_eq!(resolution.injected.len(), 1);
        assert_eq!(resolution.injected[0].package_id, "p-old");
    }

    #[test]
    fn test_malformed_rule_does_not_block_others() {
        let resolver = resolver(&["a=b=c", "pkgA"]);
        let mut deps = Vec::new();
        resolver.inject(&pack("Dragonfall", "df"), &catalog(), &mut deps);

        assert_eq!(names(&deps), vec!["pkgA"]);
        assert_eq!(resolver.rules().len(), 1);
    }

    #[test]
    fn test_empty_catalog_and_empty_rules() {
        let host = pack("Dragonfall", "df");

        let empty_rules = resolver(&[]).resolve(&host, &catalog(), &[]);
        assert_eq!(empty_rules, Resolution::default());

        let empty_catalog = resolver(&["pkgA", "pkgB"]).resolve(&host, &Catalog::default(), &[]);
        assert!(empty_catalog.is_empty());
        assert_eq!(
            empty_catalog.diagnostics,
            vec![
                Diagnostic::UnmatchedRule { rule: "pkgA".into() },
                Diagnostic::UnmatchedRule { rule: "pkgB".into() },
            ]
        );
    }

    #[test]
    fn test_already_present_reference_is_skipped() {
        let host = pack("Dragonfall", "df");
        let existing = vec![pack("pkgA", "a-01").to_reference()];

        let resolution = resolver(&["pkgA"]).resolve(&host, &catalog(), &existing);
        assert!(resolution.is_empty());
        assert!(matches!(
            resolution.diagnostics[0],
            Diagnostic::DuplicateInjection { .. }
        ));
    }

    #[test]
    fn test_reference_differing_in_version_is_not_a_duplicate() {
        let host = pack("Dragonfall", "df");
        let mut deps = vec![pack("pkgA", "a-01").with_version("0.9").to_reference()];

        resolver(&["pkgA"]).inject(&host, &catalog(), &mut deps);

        assert_eq!(deps.len(), 2);
        assert_eq!(deps[0].package_version, "1.0");
    }

    #[test]
    fn test_two_rules_selecting_same_pack_inject_once() {
        let host = pack("Dragonfall", "df");
        let resolution = resolver(&["pkgA", "a-01", "pkgA=df"]).resolve(&host, &catalog(), &[]);

        assert_eq!(resolution.injected.len(), 1);
        assert_eq!(
            resolution
                .diagnostics
                .iter()
                .filter(|d| matches!(d, Diagnostic::DuplicateInjection { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn test_concurrent_resolution_matches_sequential() {
        let resolver = resolver(&["pkgA", "pkgB=hk", "Foo=Dragonfall,hk"]);
        let catalog = catalog();
        let hosts = [pack("Dragonfall", "df"), pack("Hong Kong", "hk")];
        let existing = vec![pack("X", "x").to_reference()];

        let sequential: Vec<Resolution> = hosts
            .iter()
            .map(|host| resolver.resolve(host, &catalog, &existing))
            .collect();

        let (resolver, catalog, existing) = (&resolver, &catalog, &existing);
        let concurrent: Vec<Resolution> = std::thread::scope(|scope| {
            let handles: Vec<_> = hosts
                .iter()
                .map(|host| scope.spawn(move || resolver.resolve(host, catalog, existing)))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(concurrent, sequential);
        assert_eq!(names(&sequential[0].injected), vec!["pkgA", "Foo"]);
        assert_eq!(names(&sequential[1].injected), vec!["pkgA", "pkgB", "Foo"]);
    }
}
