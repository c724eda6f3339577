mod script;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use varsel_core::SelectorConfig;
use varsel_engine::{parse_product_json, VariantSelector};

#[derive(Debug, Parser)]
#[command(name = "varsel")]
#[command(about = "Resolve variant availability for a storefront product feed")]
struct Cli {
    /// Selector config YAML; overrides `VARSEL_CONFIG_PATH`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the option groups, flags and default variant after loading.
    Inspect {
        /// Product JSON (bare or `{"product": ...}`).
        #[arg(long)]
        feed: PathBuf,
    },
    /// Replay shopper interactions and print one notification per line.
    Simulate {
        #[arg(long)]
        feed: PathBuf,

        /// Inline steps, e.g. `"select 1 M; hover 0 Blue; unhover 0"`.
        #[arg(long, conflicts_with = "script_file", required_unless_present = "script_file")]
        script: Option<String>,

        #[arg(long)]
        script_file: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let app_config = varsel_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(app_config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let selector_config = match cli.config.or(app_config.selector_config_path) {
        Some(path) => varsel_core::load_selector_config(&path)?,
        None => SelectorConfig::default(),
    };
    tracing::debug!(env = %app_config.env, ?selector_config, "configuration loaded");

    match cli.command {
        Commands::Inspect { feed } => run_inspect(&feed, selector_config),
        Commands::Simulate {
            feed,
            script,
            script_file,
        } => {
            let source = match (script, script_file) {
                (Some(inline), _) => inline,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read script {}", path.display()))?,
                (None, None) => anyhow::bail!("either --script or --script-file is required"),
            };
            run_simulate(&feed, selector_config, &source)
        }
    }
}

fn load_selector(feed: &Path, config: SelectorConfig) -> anyhow::Result<VariantSelector> {
    let json = std::fs::read_to_string(feed)
        .with_context(|| format!("failed to read feed {}", feed.display()))?;
    let product = parse_product_json(&json)?;
    tracing::info!(
        product_id = %product.product_id,
        variants = product.variants.len(),
        "feed parsed"
    );
    Ok(product.into_selector(config)?)
}

fn run_inspect(feed: &Path, config: SelectorConfig) -> anyhow::Result<()> {
    let selector = load_selector(feed, config)?;
    let hidden_groups: Vec<usize> = (0..selector.options().len())
        .filter(|&group| selector.is_group_hidden(group))
        .collect();
    let summary = serde_json::json!({
        "variants": selector.catalog().len(),
        "default_variant": selector.catalog().default_variant(),
        "cart_variant_id": selector.cart_variant_id(),
        "groups": selector.options().groups(),
        "hidden_groups": hidden_groups,
        "images": selector.image_refs(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn run_simulate(feed: &Path, config: SelectorConfig, source: &str) -> anyhow::Result<()> {
    let steps = script::parse_script(source)?;
    let mut selector = load_selector(feed, config)?;

    for (index, step) in steps.iter().enumerate() {
        let change = step
            .apply(&mut selector)
            .with_context(|| format!("step {} ({step:?}) failed", index + 1))?;
        match change {
            Some(change) => println!("{}", serde_json::to_string(&change)?),
            None => tracing::warn!(step = index + 1, "catalog is empty; nothing to reset to"),
        }
    }

    tracing::info!(
        steps = steps.len(),
        cart_variant_id = selector.cart_variant_id().unwrap_or(""),
        "simulation finished"
    );
    Ok(())
}
