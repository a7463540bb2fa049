use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use futures::TryStreamExt;
use serde::Serialize;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use kubedb_client::api::{DeleteOptions, ListOptions, Spec, WatchEvent};
use kubedb_client::error::format_api_error;
use kubedb_client::{ExtensionClient, ResourceClient, RestConfig, StaticRegistry};

/// Command line client for kubedb.com resources
#[derive(Parser, Debug)]
#[command(name = "kubedbctl", version, about, long_about = None)]
struct Args {
    /// Path to the kubeconfig file (defaults to $KUBECONFIG or ~/.kube/config)
    #[arg(long, global = true)]
    kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use
    #[arg(long, global = true)]
    context: Option<String>,

    /// Namespace to operate in
    #[arg(short, long, global = true)]
    namespace: Option<String>,

    /// Operate across all namespaces
    #[arg(short = 'A', long, global = true)]
    all_namespaces: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "yaml", global = true)]
    output: Output,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List objects of a kind, or show a single object
    Get {
        kind: Kind,
        name: Option<String>,
        /// Label selector
        #[arg(short = 'l', long)]
        selector: Option<String>,
    },
    /// Delete an object
    Delete { kind: Kind, name: String },
    /// Print change events until interrupted
    Watch {
        kind: Kind,
        /// Label selector
        #[arg(short = 'l', long)]
        selector: Option<String>,
    },
}

impl Command {
    fn kind(&self) -> Kind {
        match self {
            Command::Get { kind, .. } | Command::Delete { kind, .. } | Command::Watch { kind, .. } => *kind,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Snapshots,
    DormantDatabases,
    Elasticsearches,
    Postgreses,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Output {
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("kubedb_client={0},kubedbctl={0}", tracing_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("kubedbctl started with log level: {:?}", level);

    Some(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    let (config, default_namespace) = RestConfig::infer(args.kubeconfig.clone(), args.context.as_deref())
        .context("Failed to load cluster configuration")?;

    let namespace = if args.all_namespaces {
        String::new()
    } else {
        args.namespace.clone().unwrap_or(default_namespace)
    };
    tracing::info!("Using host: {}, namespace: {:?}", config.host, namespace);

    let client = ExtensionClient::new_for_config(&config, &StaticRegistry::kubedb())
        .context("Failed to create kubedb client")?;

    let result = match args.command.kind() {
        Kind::Snapshots => run(client.snapshots(&namespace), &args).await,
        Kind::DormantDatabases => run(client.dormant_databases(&namespace), &args).await,
        Kind::Elasticsearches => run(client.elasticsearches(&namespace), &args).await,
        Kind::Postgreses => run(client.postgreses(&namespace), &args).await,
    };

    if let Err(err) = result {
        tracing::error!("{:?}", err);
        anyhow::bail!(format_api_error(&err));
    }

    Ok(())
}

async fn run<S: Spec>(resources: ResourceClient<'_, S>, args: &Args) -> kubedb_client::Result<()> {
    match &args.command {
        Command::Get { name: Some(name), .. } => {
            let obj = resources.get(name).await?;
            print(&obj, args.output)
        }
        Command::Get { name: None, selector, .. } => {
            let list = resources.list(&list_options(selector)).await?;
            print(&list, args.output)
        }
        Command::Delete { name, .. } => {
            resources.delete(name, &DeleteOptions::default()).await?;
            println!("{} {:?} deleted", S::kind(), name);
            Ok(())
        }
        Command::Watch { selector, .. } => {
            let mut events = resources.watch(&list_options(selector)).await?;
            while let Some(event) = events.try_next().await? {
                match event {
                    WatchEvent::Added(obj) => println!("ADDED\t{}/{}", obj.namespace(), obj.name()),
                    WatchEvent::Modified(obj) => println!("MODIFIED\t{}/{}", obj.namespace(), obj.name()),
                    WatchEvent::Deleted(obj) => println!("DELETED\t{}/{}", obj.namespace(), obj.name()),
                    WatchEvent::Bookmark(_) => {}
                    WatchEvent::Error(status) => return Err(kubedb_client::Error::Api(status)),
                }
            }
            Ok(())
        }
    }
}

fn list_options(selector: &Option<String>) -> ListOptions {
    ListOptions {
        label_selector: selector.clone(),
        ..Default::default()
    }
}

fn print<T: Serialize>(value: &T, output: Output) -> kubedb_client::Result<()> {
    let text = match output {
        Output::Json => serde_json::to_string_pretty(value)?,
        Output::Yaml => serde_yaml::to_string(value).map_err(|err| kubedb_client::Error::Codec(err.to_string()))?,
    };
    println!("{}", text);
    Ok(())
}
