mod show;
mod tui;
mod viewer;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use clap::Parser;
use timesheet_core::format::format_hours;
use timesheet_core::{parse_entry, Config, FileDocumentRepository, TimesheetService};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "timesheet")]
#[command(about = "Record work hours into plain-text timesheets", long_about = None)]
struct Cli {
    /// Directory holding the timesheet documents (overrides the config file)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Create a new, empty timesheet document
    New { name: String },
    /// List timesheet documents
    List,
    /// Show the entries and totals of a document
    Show { name: String },
    /// Add a time entry (usage: add Jane date:01-05-2024 range:08:00-16:00 hours:8 nights:0 trips:2)
    Add {
        name: String,
        /// Entry fields as key:value, or positionally: date range hours nights trips
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Remove the entry at the given row number (as listed by `show`)
    Remove { name: String, index: usize },
    /// Replace the entry at the given row number
    Edit {
        name: String,
        index: usize,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Rebuild the totals block from the entries
    Recompute { name: String },
    /// Open a document in the external viewer
    Open { name: String },
    /// Show settings, or change them with the flags below
    Config {
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(long)]
        business_name: Option<String>,
        #[arg(long)]
        viewer: Option<String>,
    },
    /// Open the Terminal User Interface
    Tui,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_default()?;

    let data_dir = cli.dir.or_else(|| config.data_dir.clone());
    let repo = FileDocumentRepository::new(data_dir)?;
    let service = TimesheetService::new(repo, config.business_name.clone());
    let today = Local::now().date_naive();

    match cli.command {
        Some(Commands::New { name }) => {
            let doc = service.create(&name)?;
            println!(
                "Document {} created successfully.",
                service.repository().path_for(&doc.name)?.display()
            );
        }
        Some(Commands::List) => {
            let mut names: Vec<String> = service.list_documents()?.collect();
            names.sort();
            show::show_documents(&names);
        }
        Some(Commands::Show { name }) => {
            let doc = service.load(&name)?;
            show::show_document(&doc);
        }
        Some(Commands::Add { name, args }) => {
            let entry = parse_entry(&args, today)?;
            let doc = service.add_row(&name, entry)?;
            println!("Time entry added successfully ({} entries).", doc.rows.len());
            print_totals(&doc);
        }
        Some(Commands::Remove { name, index }) => {
            let doc = service.remove_row(&name, index)?;
            println!("Time entry {} removed successfully.", index);
            print_totals(&doc);
        }
        Some(Commands::Edit { name, index, args }) => {
            let entry = parse_entry(&args, today)?;
            let doc = service.replace_row(&name, index, entry)?;
            println!("Time entry {} updated successfully.", index);
            print_totals(&doc);
        }
        Some(Commands::Recompute { name }) => {
            let totals = service.recompute(&name)?;
            println!(
                "Totals: {} hours, {} nights, {} trips",
                format_hours(totals.total_hours),
                totals.total_nights,
                totals.total_trips
            );
        }
        Some(Commands::Open { name }) => {
            let path = service.repository().path_for(&name)?;
            if !path.exists() {
                return Err(anyhow!("No such document: {}", path.display()));
            }
            viewer::open_document(&path, config.viewer.as_deref())
                .with_context(|| format!("Failed to open document {}", path.display()))?;
        }
        Some(Commands::Config { data_dir, business_name, viewer }) => {
            run_config(config, data_dir, business_name, viewer)?;
        }
        Some(Commands::Tui) | None => {
            tui::run(service, config.viewer)?;
        }
    }
    Ok(())
}

fn print_totals(doc: &timesheet_core::TimesheetDocument) {
    let totals = doc.totals();
    println!(
        "  Totals: {} hours, {} nights, {} trips",
        format_hours(totals.total_hours),
        totals.total_nights,
        totals.total_trips
    );
}

fn run_config(
    mut config: Config,
    data_dir: Option<PathBuf>,
    business_name: Option<String>,
    viewer: Option<String>,
) -> Result<()> {
    let changed = data_dir.is_some() || business_name.is_some() || viewer.is_some();
    if let Some(dir) = data_dir {
        config.data_dir = Some(dir);
    }
    if let Some(name) = business_name {
        config.business_name = name;
    }
    if let Some(viewer) = viewer {
        config.viewer = Some(viewer);
    }

    let path = Config::default_path().ok_or_else(|| anyhow!("Could not determine config directory"))?;
    if changed {
        config.save(&path)?;
        println!("Saved {}", path.display());
    }

    println!("Config file:   {}", path.display());
    println!(
        "Data dir:      {}",
        config
            .data_dir
            .as_ref()
            .map(|d| d.display().to_string())
            .unwrap_or_else(|| "(current directory)".to_string())
    );
    println!("Business name: {}", config.business_name);
    println!("Viewer:        {}", config.viewer.as_deref().unwrap_or("(platform default)"));
    Ok(())
}
