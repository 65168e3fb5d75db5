//! pattern-tree
//!
//! Walks a pattern library directory, builds its component/collection tree and
//! prints it.

use anyhow::Result;
use clap::Parser;
use pattern_tree::builder::TreeBuilder;
use pattern_tree::cli::Cli;
use pattern_tree::config::{FileConfigResolver, SettingsLoader, SettingsPaths};
use pattern_tree::entity::Source;
use pattern_tree::format::{OutputFormat, render};
use pattern_tree::logging::{self, LogTarget};
use pattern_tree::walk;
use std::sync::Arc;
use tracing::{debug, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&LogTarget::parse(&cli.log), cli.verbose)?;

    let mut paths = SettingsPaths::discover();
    if let Some(config_path) = &cli.config {
        paths = paths.with_explicit(config_path);
    }
    let loader = SettingsLoader::load_with_paths(paths)
        .map_err(|err| err.into_report("failed to load settings"))?;
    for (tier, path) in loader.sources() {
        debug!(tier = %tier, path = %path.display(), "settings source");
    }
    let settings = loader.into_settings();

    let tree = walk::describe(&cli.dir, &settings.walk)
        .await
        .map_err(|err| err.into_report(format!("failed to walk {}", cli.dir.display())))?;

    let mut source = Source::from_settings(&settings).with_dir(&cli.dir);
    let builder = TreeBuilder::new(Arc::new(FileConfigResolver::new()));
    let root = builder
        .build(&tree, &mut source)
        .await
        .map_err(|err| err.into_report("failed to build component tree"))?;

    let format = OutputFormat::from(cli.format);
    info!(format = ?format, "rendering tree");
    println!("{}", render(&root, format).trim_end());
    Ok(())
}
