//! tag-chips - a terminal tag-chip editor for comma-separated fields.

use anyhow::Context;
use clap::Parser;

use tag_chips::app::App;
use tag_chips::cli::Cli;
use tag_chips::config::{Config, TagEditorSettings};
use tag_chips::error::AppError;
use tag_chips::logging;
use tag_chips::tags::TagList;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => anyhow::bail!(AppError::from(e).user_message()),
    };

    if cli.normalize {
        let mut props = config.control;
        props.merge(cli.overrides());
        let settings = TagEditorSettings::from_properties(&props);
        println!("{}", TagList::parse(props.raw_value(), settings.max_tag_length));
        return Ok(());
    }

    if let Err(e) = logging::init() {
        eprintln!("Logging disabled: {e}");
    }

    let app = App::new(config, cli.overrides(), cli.mode(), cli.config.clone());
    let value = app.run().context("tag editor failed")?;
    logging::shutdown();

    println!("{value}");
    Ok(())
}
