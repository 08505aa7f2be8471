use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use posko_core::compose::{compose_many, compose_single, LinkStyle, TimelineOrder};
use posko_core::config::DashboardConfig;
use posko_core::view::{
    filter_options, find_by_row_index, option_label, select, RecordFilter, SortPolicy, Summary,
};
use posko_core::{process_sheet, Dataset, LocationRecord, ParserError, PipelineError};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod render;
mod source;

const DEFAULT_CONFIG_FILE: &str = "posko.toml";

#[derive(Parser, Debug)]
#[command(author, version, about = "Relief location coordination dashboard", long_about = None)]
struct Cli {
    /// TOML config file (defaults to ./posko.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Sheet export to read: a local CSV path or an http(s) URL
    #[arg(long, global = true)]
    source: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List locations matching the filters
    List(ListArgs),
    /// Show dashboard metrics and the available filter values
    Summary(FilterArgs),
    /// Show every detail of one location
    Show {
        /// Row index of the location in the sheet
        row_index: String,
    },
    /// Compose a WhatsApp message for one or more locations
    Message(MessageArgs),
    /// Dump the normalized dataset as JSON
    Export,
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    #[arg(long)]
    province: Vec<String>,
    #[arg(long)]
    regency: Vec<String>,
    #[arg(long)]
    coordinator: Vec<String>,
    /// Only locations with needs, regency and a reachable field coordinator
    #[arg(long)]
    ready_only: bool,
    /// Case-insensitive text to look for in post, needs, coordinators and last update
    #[arg(long)]
    search: Option<String>,
}

impl FilterArgs {
    fn to_filter(&self) -> RecordFilter {
        RecordFilter {
            provinces: self.province.iter().cloned().collect::<BTreeSet<_>>(),
            regencies: self.regency.iter().cloned().collect(),
            coordinators: self.coordinator.iter().cloned().collect(),
            ready_only: self.ready_only,
            search: self.search.clone(),
        }
    }

    fn filter_records<'a>(&self, dataset: &'a Dataset) -> Vec<&'a LocationRecord> {
        select(&dataset.records, &self.to_filter(), SortPolicy::default())
    }
}

#[derive(Args, Debug)]
struct ListArgs {
    #[command(flatten)]
    filter: FilterArgs,
    #[arg(long, value_enum, default_value_t = SortArg::Latest)]
    sort: SortArg,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SortArg {
    Latest,
    UpdateLevel,
    EntryOrder,
}

impl From<SortArg> for SortPolicy {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Latest => SortPolicy::LatestEntry,
            SortArg::UpdateLevel => SortPolicy::UpdateLevel,
            SortArg::EntryOrder => SortPolicy::EntryOrder,
        }
    }
}

#[derive(Args, Debug)]
struct MessageArgs {
    /// Row indexes of the locations to include
    #[arg(required = true)]
    row_indexes: Vec<String>,
    /// Append the closing call to action
    #[arg(long)]
    footer: bool,
    /// List updates oldest first
    #[arg(long)]
    oldest_first: bool,
    /// Produce a wa.me link instead of a whatsapp:// link
    #[arg(long)]
    web_link: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let config = load_config(cli.config.as_deref(), cli.source.as_deref())?;
    let location = config.source.location()?;
    let content = source::fetch_sheet(&location).await?;
    let dataset = process_sheet(&content, &config.columns).map_err(sheet_error)?;

    match cli.command {
        Command::List(args) => {
            let selected = select(
                &dataset.records,
                &args.filter.to_filter(),
                args.sort.into(),
            );
            println!("{}", render::records_table(&selected));
            info!(shown = selected.len(), total = dataset.records.len(), "listed locations");
        }
        Command::Summary(args) => {
            let filtered = args.filter_records(&dataset);
            let summary = Summary::compute(&dataset.records, &filtered);
            let options = filter_options(&dataset.records);
            println!("{}", render::summary_table(&summary, &options));
        }
        Command::Show { row_index } => match find_by_row_index(&dataset.records, &row_index) {
            Some(record) => {
                println!("{}", option_label(record));
                println!("{}", render::detail_table(record));
            }
            None => println!("No location with row index '{row_index}'; nothing to show."),
        },
        Command::Message(args) => print_message(&config, &dataset, &args),
        Command::Export => println!("{}", dataset.to_json_pretty()?),
    }

    Ok(())
}

fn sheet_error(err: PipelineError) -> anyhow::Error {
    let hint = match &err {
        PipelineError::Parser(ParserError::HeaderNotFound { .. }) => {
            "sheet layout is not usable; check that the header row starts with 'No'"
        }
        _ => "failed to process the sheet export",
    };
    anyhow::Error::new(err).context(hint)
}

fn init_tracing(json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(path: Option<&Path>, source: Option<&str>) -> Result<DashboardConfig> {
    let mut config = match path {
        Some(path) => DashboardConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            DashboardConfig::load(Path::new(DEFAULT_CONFIG_FILE))
                .with_context(|| format!("failed to load {DEFAULT_CONFIG_FILE}"))?
        }
        None => DashboardConfig::default(),
    };
    config.apply_env();
    if let Some(source) = source {
        config.source.set_location(source);
    }
    Ok(config)
}

fn print_message(config: &DashboardConfig, dataset: &Dataset, args: &MessageArgs) {
    let mut options = config.message.options(args.footer);
    if args.oldest_first {
        options.timeline = TimelineOrder::OldestFirst;
    }
    if args.web_link {
        options.link_style = LinkStyle::WebLink;
    }

    let mut records: Vec<&LocationRecord> = Vec::with_capacity(args.row_indexes.len());
    for id in &args.row_indexes {
        match find_by_row_index(&dataset.records, id) {
            Some(record) => records.push(record),
            None => warn!(row_index = %id, "skipping unknown location"),
        }
    }

    let message = match records.as_slice() {
        [] => {
            println!("No matching locations; nothing to compose.");
            return;
        }
        [record] => compose_single(record, &options),
        many => compose_many(many, &options),
    };

    println!("{}", message.body);
    println!();
    println!("{}", message.link);
}
