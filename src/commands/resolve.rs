use anyhow::{Result, anyhow};
use std::path::PathBuf;

use crate::{
    config::Config,
    inject::{ContentPackManager, Diagnostic, Resolution, RuleSet},
    package::{CatalogProvider, DiscoveredPack, PackageDescriptor, PackageReference},
    runtime::Runtime,
};

use super::load_registry;

/// Print each host's dependency list as it looks after injection.
///
/// `extra_rules` run after the configured `content_pack_injections`. With
/// `host` set, only that pack (by name or project id) is resolved.
#[tracing::instrument(skip(runtime, config))]
pub fn resolve<R: Runtime>(
    runtime: R,
    config: &Config,
    search_paths: &[PathBuf],
    extra_rules: &[String],
    host: Option<&str>,
) -> Result<()> {
    let manager = ContentPackManager::new(&config.content_pack_manager)
        .with_extra_rules(RuleSet::parse(extra_rules));
    let registry = load_registry(&runtime, search_paths, &manager);

    if !manager.is_enabled() {
        println!("Content pack manager is disabled; showing declared dependencies.");
    }
    for rejected in manager.rejected_rules() {
        println!("! {}", rejected);
    }

    let hosts: Vec<&DiscoveredPack> = match host {
        Some(selector) => vec![
            registry
                .find(selector)
                .ok_or_else(|| anyhow!("Content pack '{}' not found", selector))?,
        ],
        None => registry.packs().iter().collect(),
    };

    if hosts.is_empty() {
        println!("No content packs found.");
        return Ok(());
    }

    for pack in hosts {
        let (dependencies, resolution) = resolve_pack(&manager, pack, &registry);
        let problems: Vec<&Diagnostic> = resolution.problems().collect();
        print!(
            "{}",
            format_dependencies(&pack.descriptor, &dependencies, &problems)
        );
    }

    Ok(())
}

/// The pack's declared dependencies with injected ones spliced in front.
fn resolve_pack<P: CatalogProvider + ?Sized>(
    manager: &ContentPackManager,
    pack: &DiscoveredPack,
    provider: &P,
) -> (Vec<PackageReference>, Resolution) {
    let mut dependencies = pack.dependencies.clone();
    let resolution = manager.on_resolve_dependencies(&pack.descriptor, provider, &mut dependencies);
    (dependencies, resolution)
}

/// Host header, one line per dependency, then one `!` line per rule problem.
fn format_dependencies(
    host: &PackageDescriptor,
    dependencies: &[PackageReference],
    problems: &[&Diagnostic],
) -> String {
    let mut out = format!("{} ({})\n", host.name, host.project_id);
    if dependencies.is_empty() {
        out.push_str("  (no dependencies)\n");
    }
    for dep in dependencies {
        if dep.package_version.is_empty() {
            out.push_str(&format!("  {} ({})\n", dep.package_name, dep.package_id));
        } else {
            out.push_str(&format!(
                "  {} ({}) {}\n",
                dep.package_name, dep.package_id, dep.package_version
            ));
        }
    }
    for problem in problems {
        out.push_str(&format!("  ! {}\n", problem));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContentPackManagerConfig;
    use crate::package::{Catalog, PackOrigin};
    use crate::runtime::MockRuntime;

    fn discovered(name: &str, id: &str, deps: Vec<PackageReference>) -> DiscoveredPack {
        DiscoveredPack {
            descriptor: PackageDescriptor::new(name, id).with_version("1.0"),
            dependencies: deps,
            dir: PathBuf::from("/packs").join(name),
            origin: PackOrigin::Builtin,
        }
    }

    #[test]
    fn test_resolve_pack_prepends_injections() {
        let core = PackageDescriptor::new("Core", "core").to_reference();
        let host = discovered("Dragonfall", "df", vec![core.clone()]);
        let portraits = discovered("Portraits", "p1", vec![]);
        let catalog = Catalog::new(vec![host.descriptor.clone(), portraits.descriptor.clone()]);

        let manager = ContentPackManager::new(&ContentPackManagerConfig {
            content_pack_injections: vec!["Portraits=Dragonfall".into()],
            ..Default::default()
        });

        let (deps, resolution) = resolve_pack(&manager, &host, &catalog);
        assert_eq!(deps, vec![portraits.descriptor.to_reference(), core]);
        assert_eq!(resolution.problems().count(), 0);

        let (untouched, _) = resolve_pack(&manager, &portraits, &catalog);
        assert!(untouched.is_empty());
    }

    #[test]
    fn test_format_dependencies() {
        let host = PackageDescriptor::new("Dragonfall", "df");
        let deps = vec![
            PackageDescriptor::new("Portraits", "p1")
                .with_version("1.0")
                .to_reference(),
            PackageDescriptor::new("Core", "core").to_reference(),
        ];

        assert_eq!(
            format_dependencies(&host, &deps, &[]),
            "Dragonfall (df)\n  Portraits (p1) 1.0\n  Core (core)\n"
        );
        assert_eq!(
            format_dependencies(&host, &[], &[]),
            "Dragonfall (df)\n  (no dependencies)\n"
        );

        let unmatched = Diagnostic::UnmatchedRule {
            rule: "Voices".into(),
        };
        assert_eq!(
            format_dependencies(&host, &[], &[&unmatched]),
            "Dragonfall (df)\n  (no dependencies)\n  ! No content packs matched :Voices:\n"
        );
    }

    #[test]
    fn test_resolve_unknown_host() {
        let mut runtime = MockRuntime::new();
        runtime.expect_is_dir().returning(|_| true);
        runtime.expect_exists().returning(|_| true);
        runtime.expect_read_dir().returning(|_| Ok(vec![]));

        let err = resolve(
            runtime,
            &Config::default(),
            &[PathBuf::from("/packs")],
            &[],
            Some("Nope"),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Content pack 'Nope' not found");
    }
}
