//! Command-line front end for the farm selection store

use std::io::Write;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use cropkeeper_client::{FarmDirectory, FarmSelectionStore, LoadOutcome};
use rust_decimal::Decimal;
use shared::{Farm, FarmId, FarmInput, SizeUnit};

#[derive(Debug, Parser)]
#[command(name = "cropkeeper", version, about = "Manage farms and the active farm")]
pub struct Cli {
    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Farm records and the active farm
    #[command(subcommand)]
    Farms(FarmCommand),
}

#[derive(Debug, Subcommand)]
pub enum FarmCommand {
    /// List farms, marking the active one
    List,
    /// Show the active farm
    Current,
    /// Make a farm the active farm
    Select { id: FarmId },
    /// Forget all farm state and the remembered selection
    Clear,
    /// Show one farm
    Show { id: FarmId },
    /// Create a farm
    Add(FarmArgs),
    /// Replace a farm's attributes
    Update {
        id: FarmId,
        #[command(flatten)]
        farm: FarmArgs,
    },
    /// Delete a farm
    Remove { id: FarmId },
}

#[derive(Debug, Args)]
pub struct FarmArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub size: Decimal,

    /// acres, hectares, square_feet or square_meters
    #[arg(long, default_value = "acres")]
    pub unit: SizeUnit,

    #[arg(long)]
    pub location: Option<String>,
}

impl From<FarmArgs> for FarmInput {
    fn from(args: FarmArgs) -> Self {
        let input = FarmInput::new(args.name, args.size).with_unit(args.unit);
        match args.location {
            Some(location) => input.with_location(location),
            None => input,
        }
    }
}

/// Run a command, writing its output to `out`
pub async fn run<W: Write>(
    command: Command,
    store: &FarmSelectionStore,
    out: &mut W,
) -> anyhow::Result<()> {
    let Command::Farms(command) = command;

    match command {
        FarmCommand::List => {
            load(store).await?;
            let state = store.snapshot();
            if state.farms.is_empty() {
                writeln!(out, "No farms yet")?;
            }
            for farm in &state.farms {
                let marker = if state.selected_id() == Some(&farm.id) { "*" } else { " " };
                writeln!(out, "{} {}", marker, describe(farm))?;
            }
        }
        FarmCommand::Current => {
            load(store).await?;
            match store.snapshot().selected_farm {
                Some(farm) => writeln!(out, "{}", describe(&farm))?,
                None => writeln!(out, "No farm selected")?,
            }
        }
        FarmCommand::Select { id } => {
            load(store).await?;
            let farm = store
                .snapshot()
                .find(&id)
                .cloned()
                .with_context(|| format!("Farm {} not found", id))?;
            store.set_selected_farm(Some(farm.clone()));
            writeln!(out, "Active farm: {}", describe(&farm))?;
        }
        FarmCommand::Clear => {
            store.clear_farm_state();
            writeln!(out, "Farm state cleared")?;
        }
        FarmCommand::Show { id } => {
            let farm = store.directory().get_by_id(&id).await?;
            writeln!(out, "{}", describe(&farm))?;
            writeln!(out, "  location: {}", farm.location)?;
            writeln!(out, "  created:  {}", farm.created_at.format("%Y-%m-%d %H:%M"))?;
        }
        FarmCommand::Add(args) => {
            let farm = store.directory().create(args.into()).await?;
            load(store).await?;
            writeln!(out, "Created {}", describe(&farm))?;
        }
        FarmCommand::Update { id, farm } => {
            let farm = store.directory().update(&id, farm.into()).await?;
            load(store).await?;
            writeln!(out, "Updated {}", describe(&farm))?;
        }
        FarmCommand::Remove { id } => {
            if store.directory().delete(&id).await? {
                writeln!(out, "Removed farm {}", id)?;
            } else {
                writeln!(out, "Farm {} did not exist", id)?;
            }
            load(store).await?;
        }
    }

    Ok(())
}

async fn load(store: &FarmSelectionStore) -> anyhow::Result<()> {
    match store.load_farms().await {
        LoadOutcome::Failed { message } => bail!("Failed to load farms: {}", message),
        LoadOutcome::Loaded { .. } | LoadOutcome::Discarded => Ok(()),
    }
}

fn describe(farm: &Farm) -> String {
    format!("[{}] {} ({} {})", farm.id, farm.name, farm.size, farm.size_unit)
}
