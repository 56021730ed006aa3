// Command-line front end for inspecting and changing batch sizes.
// The library in lib.rs is what the sync pipeline embeds.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use sync_batch_sizer::{BatchSizer, JsonFileStore, MemoryProbe, SizerSettings, SystemMemoryProbe};

#[derive(Parser, Debug)]
#[command(name = "sync-batch-sizer", about = "Resolve and configure sync batch sizes")]
struct Cli {
    /// JSON file holding persisted batch sizes
    #[arg(long, default_value = "batch-sizes.json")]
    store: PathBuf,

    /// Optional JSON settings file; environment variables override it
    #[arg(long)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the batch size for an entity
    Resolve {
        #[arg(long)]
        entity: String,
        #[arg(long = "override")]
        override_size: Option<i64>,
        /// Scale by current memory pressure
        #[arg(long, value_enum)]
        adaptive: Option<ProbeScope>,
    },
    /// Persist a batch size for an entity
    Set {
        #[arg(long)]
        entity: String,
        #[arg(long)]
        value: i64,
    },
    /// List the known entity kinds with their aliases, defaults and bounds
    Entities,
    /// Print the page ranges needed to fetch `total` records
    Plan {
        #[arg(long)]
        entity: String,
        #[arg(long)]
        total: u64,
        #[arg(long = "override")]
        override_size: Option<i64>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ProbeScope {
    System,
    Process,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => SizerSettings::from_json_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => SizerSettings::default(),
    }
    .apply_env(|key| std::env::var(key).ok());
    debug!("Effective settings: {:?}", settings);

    let store = JsonFileStore::open(&cli.store)
        .with_context(|| format!("opening store {}", cli.store.display()))?;
    let sizer = BatchSizer::new(store, &settings);

    match cli.command {
        Command::Resolve { entity, override_size, adaptive } => {
            let resolution = sizer.explain(&entity, override_size);
            if !resolution.entity.is_known() {
                warn!("Unknown entity {:?}, using fallback bounds", entity);
            }
            let size = match adaptive {
                None => resolution.size,
                Some(scope) => {
                    let probe = match scope {
                        ProbeScope::System => SystemMemoryProbe::system(),
                        ProbeScope::Process => SystemMemoryProbe::process(settings.memory_limit_bytes()),
                    };
                    sizer.adaptive_batch_size(&entity, override_size, Some(&probe as &dyn MemoryProbe))
                }
            };
            info!("{} resolved from {:?}", resolution.entity, resolution.source);
            println!("{}", size);
        }
        Command::Set { entity, value } => {
            if !sizer.set_batch_size(&entity, value) {
                anyhow::bail!("failed to store batch size for {}", entity);
            }
            let stored = sizer.batch_size(&entity, None);
            info!("Stored batch size {} for {}", stored, entity);
            println!("{}", stored);
        }
        Command::Entities => {
            let registry = sizer.resolver().validator().registry();
            for profile in registry.profiles() {
                println!(
                    "{}\t{}\tdefault={}\tmin={}\tmax={}",
                    profile.kind,
                    profile.aliases.join(","),
                    profile.default_size,
                    profile.limits.min,
                    profile.limits.max
                );
            }
        }
        Command::Plan { entity, total, override_size } => {
            for range in sizer.plan(&entity, total, override_size) {
                println!("{}-{}", range.start, range.end);
            }
        }
    }

    Ok(())
}
