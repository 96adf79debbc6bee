//! bve CLI - design BI views and generate their artifacts
//!
//! Usage:
//!   bve list
//!   bve new <name> --data <file> [--group <id>]... [--note <text>]
//!   bve sql <name> [--dialect <dialect>]
//!   bve create|reset|delete|copy|open|rows <name>
//!
//! Examples:
//!   bve new "Sales by Region" --data sales.json --group 3
//!   bve sql "Sales by Region" --dialect postgres
//!   bve create "Sales by Region"

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use bve::compile::ViewDefinition;
use bve::config::Settings;
use bve::editor::{self, NewView};
use bve::env::Env;
use bve::fields::resolve;
use bve::model::{BveView, GroupId, UserId};
use bve::registry::SchemaRegistry;
use bve::sql::Dialect;
use bve::store::SqliteStore;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

type CliResult = Result<(), Box<dyn Error>>;

#[derive(Parser)]
#[command(name = "bve")]
#[command(about = "bve - BI view editor: generate report views, types and grants")]
#[command(version)]
struct Cli {
    /// Path to a bve.toml config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Acting user id
    #[arg(long, global = true, default_value_t = 1)]
    user: UserId,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List BI views
    List,

    /// Create a draft BI view
    New {
        name: String,

        /// File holding the field selection
        #[arg(short, long)]
        data: PathBuf,

        /// Group granted read-write access (repeatable)
        #[arg(short, long = "group")]
        groups: Vec<GroupId>,

        #[arg(short, long)]
        note: Option<String>,
    },

    /// Print the backing view SQL without running it
    Sql {
        name: String,

        /// SQL dialect to generate (defaults to the configured one)
        #[arg(short, long)]
        dialect: Option<DialectArg>,
    },

    /// Generate the view, type, presentation and grants
    Create { name: String },

    /// Remove generated artifacts and return to draft
    Reset { name: String },

    /// Delete a draft BI view
    Delete { name: String },

    /// Duplicate a BI view as a draft
    Copy { name: String },

    /// Print the action descriptor that opens the view
    Open { name: String },

    /// Print the records of a created view as JSON lines
    Rows { name: String },
}

#[derive(Clone, ValueEnum)]
enum DialectArg {
    Postgres,
    Duckdb,
    Sqlite,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Postgres => Dialect::Postgres,
            DialectArg::Duckdb => Dialect::DuckDb,
            DialectArg::Sqlite => Dialect::Sqlite,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.logging.filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, settings: &Settings) -> CliResult {
    let mut store = SqliteStore::open(settings.store_path()?)?;
    let mut registry = SchemaRegistry::new();
    registry.boot(&store)?;
    let mut env = Env::new(&mut store, &mut registry, cli.user);

    match cli.command {
        Commands::List => cmd_list(&env),
        Commands::New {
            name,
            data,
            groups,
            note,
        } => {
            let data = fs::read_to_string(&data)?;
            let mut values = NewView::new(name).data(data).groups(groups);
            values.note = note;
            let view = editor::create(&mut env, values)?;
            println!("Created draft '{}' ({})", view.name, view.model_name);
            Ok(())
        }
        Commands::Sql { name, dialect } => {
            let dialect = match dialect {
                Some(d) => d.into(),
                None => settings.sql.dialect()?,
            };
            cmd_sql(&env, &name, dialect)
        }
        Commands::Create { name } => {
            let view = by_name(&env, &name)?;
            let view = editor::action_create(&mut env, view.id)?;
            println!(
                "Created '{}' (action {}, view {})",
                view.model_name,
                view.action_id.unwrap_or_default(),
                view.view_id.unwrap_or_default()
            );
            Ok(())
        }
        Commands::Reset { name } => {
            let view = by_name(&env, &name)?;
            editor::action_reset(&mut env, view.id)?;
            println!("Reset '{}' to draft", name);
            Ok(())
        }
        Commands::Delete { name } => {
            let view = by_name(&env, &name)?;
            editor::unlink(&mut env, view.id)?;
            println!("Deleted '{}'", name);
            Ok(())
        }
        Commands::Copy { name } => {
            let view = by_name(&env, &name)?;
            let copied = editor::copy(&mut env, view.id)?;
            println!("Copied to '{}'", copied.name);
            Ok(())
        }
        Commands::Open { name } => {
            let view = by_name(&env, &name)?;
            println!("{}", serde_json::to_string_pretty(&editor::open_view(&view))?);
            Ok(())
        }
        Commands::Rows { name } => {
            let view = by_name(&env, &name)?;
            for row in editor::read_records(&mut env, view.id)? {
                println!("{}", serde_json::Value::Object(row));
            }
            Ok(())
        }
    }
}

fn by_name(env: &Env<'_, SqliteStore>, name: &str) -> Result<BveView, Box<dyn Error>> {
    editor::find_by_name(env, name)?.ok_or_else(|| format!("BI view '{}' not found", name).into())
}

fn cmd_list(env: &Env<'_, SqliteStore>) -> CliResult {
    let views = editor::list(env)?;
    if views.is_empty() {
        println!("No BI views defined.");
        return Ok(());
    }

    println!("BI views:");
    for view in &views {
        println!("  - {} [{}] ({})", view.name, view.state, view.model_name);
    }
    Ok(())
}

fn cmd_sql(env: &Env<'_, SqliteStore>, name: &str, dialect: Dialect) -> CliResult {
    let view = by_name(env, name)?;
    let selection = resolve(&*env.host, view.data.as_deref())?;
    let definition = ViewDefinition::build(&view.model_name, &selection);
    for statement in definition.statements(dialect) {
        println!("{};", statement);
    }
    Ok(())
}
