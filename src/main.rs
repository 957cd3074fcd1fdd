use anyhow::Result;
use clap::Parser;
use cpinject::config::Config;
use std::path::PathBuf;

/// cpinject - content pack dependency injector
///
/// Scan content pack folders, splice configured packs into other packs'
/// dependency lists, and inspect music asset replacements.
///
/// Examples:
///   cpinject packs -s ./ContentPacks
///   cpinject resolve -s ./ContentPacks --rule "Portraits=Dragonfall"
#[derive(Parser, Debug)]
#[command(author, version = env!("CPINJECT_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to <config dir>/cpinject/config.toml; also via CPINJECT_CONFIG)
    #[arg(
        long = "config",
        short = 'c',
        env = "CPINJECT_CONFIG",
        value_name = "PATH",
        global = true
    )]
    pub config: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List the content packs found in the search paths
    Packs(PacksArgs),

    /// Show each content pack's dependencies after injection
    Resolve(ResolveArgs),

    /// Show configured music replacements
    Music(MusicArgs),
}

#[derive(clap::Args, Debug)]
pub struct PacksArgs {
    /// Folder containing content packs; repeat to add more, scanned in order
    #[arg(long = "search-path", short = 's', value_name = "DIR")]
    pub search_paths: Vec<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct ResolveArgs {
    /// Folder containing content packs; repeat to add more, scanned in order
    #[arg(long = "search-path", short = 's', value_name = "DIR")]
    pub search_paths: Vec<PathBuf>,

    /// Extra injection rule, applied after the configured ones
    #[arg(long = "rule", short = 'r', value_name = "PACK[=TARGET,...]")]
    pub rules: Vec<String>,

    /// Only resolve this content pack (name or project id)
    #[arg(long = "host", value_name = "PACK")]
    pub host: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct MusicArgs {
    /// Only show the replacement for this asset, e.g. "Music/HongKong-TitleTheme-UI"
    #[arg(long = "asset", value_name = "NAME")]
    pub asset: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = cpinject::runtime::RealRuntime;
    let config = Config::locate(&runtime, cli.config.as_deref())?;

    match cli.command {
        Commands::Packs(args) => cpinject::commands::packs(runtime, &config, &args.search_paths)?,
        Commands::Resolve(args) => cpinject::commands::resolve(
            runtime,
            &config,
            &args.search_paths,
            &args.rules,
            args.host.as_deref(),
        )?,
        Commands::Music(args) => cpinject::commands::music(runtime, &config, args.asset.as_deref())?,
    }
    Ok(())
}
