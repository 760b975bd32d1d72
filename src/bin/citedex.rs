use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use citedex::app::App;
use citedex::config::{ConfigLoader, DEFAULT_LIST_LIMIT};
use citedex::crossref::{CrossrefClient, CrossrefHttpClient, CrossrefWork};
use citedex::db::open_db;
use citedex::error::CitedexError;
use citedex::output::JsonOutput;
use citedex::store::SqlitePaperStore;

#[derive(Parser)]
#[command(name = "citedex")]
#[command(about = "Import Crossref search results into a local SQLite paper catalog")]
#[command(version, author)]
struct Cli {
    #[arg(long, global = true)]
    config: Option<String>,

    #[arg(long, global = true)]
    db: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Search Crossref and insert new papers into the catalog")]
    Search(SearchArgs),
    #[command(about = "List the most recently imported papers")]
    Papers(PapersArgs),
}

#[derive(Args)]
struct SearchArgs {
    keywords: String,

    #[arg(long)]
    rows: Option<u32>,
}

#[derive(Args)]
struct PapersArgs {
    #[arg(long, default_value_t = DEFAULT_LIST_LIMIT)]
    limit: u32,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(citedex) = report.downcast_ref::<CitedexError>() {
            return ExitCode::from(map_exit_code(citedex));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &CitedexError) -> u8 {
    match error {
        CitedexError::EmptyQuery
        | CitedexError::ConfigRead(_)
        | CitedexError::ConfigParse(_) => 2,
        CitedexError::CrossrefHttp(_) | CitedexError::CrossrefStatus { .. } => 3,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let resolved = ConfigLoader::resolve(cli.config.as_deref()).into_diagnostic()?;
    let db_path = cli.db.unwrap_or(resolved.db_path);
    let mut conn = open_db(&db_path).into_diagnostic()?;

    match cli.command {
        Commands::Search(args) => {
            let crossref = CrossrefHttpClient::new().into_diagnostic()?;
            let app = App::new(crossref);
            let rows = args.rows.unwrap_or(resolved.default_rows);
            let mut store = SqlitePaperStore::begin(&mut conn).into_diagnostic()?;
            let result = app.import(&mut store, &args.keywords, rows).into_diagnostic()?;
            JsonOutput::print_import(&result).into_diagnostic()?;
            Ok(())
        }
        Commands::Papers(args) => {
            let app = App::new(NopCrossref);
            let store = SqlitePaperStore::begin(&mut conn).into_diagnostic()?;
            let result = app.list_papers(&store, args.limit).into_diagnostic()?;
            JsonOutput::print_list(&result).into_diagnostic()?;
            Ok(())
        }
    }
}

#[derive(Clone, Copy)]
struct NopCrossref;

impl CrossrefClient for NopCrossref {
    fn search(&self, _query: &str, _rows: u32) -> Result<Vec<CrossrefWork>, CitedexError> {
        Err(CitedexError::CrossrefHttp(
            "Crossref client not configured".to_string(),
        ))
    }
}
