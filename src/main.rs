use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;

use courtside::client::ApiClient;
use courtside::config::AppConfig;
use courtside::credentials::Credentials;
use courtside::logger;
use courtside::providers::Api;
use courtside::sofascore;
use courtside::tennis_abstract::{self, Tour};

#[derive(Debug, Parser)]
#[command(name = "courtside", about = "Pull sports statistics from RapidAPI providers")]
struct Cli {
    /// Config file to load instead of config/default.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List known endpoints.
    Endpoints {
        #[arg(long, value_enum)]
        api: Option<Api>,
    },
    /// Call an endpoint and print the JSON response.
    Retrieve {
        #[command(flatten)]
        call: EndpointCall,
        /// Also cache the response at the endpoint's sample location.
        #[arg(long)]
        dump: bool,
    },
    /// Print a previously dumped endpoint sample.
    ReadSample {
        #[command(flatten)]
        call: EndpointCall,
    },
    /// Pull a tracked player's full SofaScore match history.
    Matches {
        /// Player name as listed in the roster, or a SofaScore team id.
        player: String,
        /// Write the raw events under the data directory.
        #[arg(long)]
        dump: bool,
        /// Print raw events instead of parsed matches.
        #[arg(long)]
        raw: bool,
    },
    /// List Tennis Abstract players.
    Players {
        #[arg(value_enum)]
        tour: Tour,
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[derive(Debug, clap::Args)]
struct EndpointCall {
    #[arg(value_enum)]
    api: Api,
    endpoint: String,
    #[arg(long)]
    folder: Option<String>,
    /// Required parameter values, in order.
    values: Vec<String>,
    /// Optional parameter as key=value; repeatable.
    #[arg(long = "opt", value_parser = parse_key_value)]
    opts: Vec<(String, String)>,
}

impl EndpointCall {
    fn values(&self) -> Vec<&str> {
        self.values.iter().map(String::as_str).collect()
    }

    fn opts(&self) -> Vec<(&str, &str)> {
        self.opts.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }
}

fn parse_key_value(s: &str) -> std::result::Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got {s:?}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    logger::init_logging(&config.monitoring)?;

    match cli.command {
        Command::Endpoints { api } => {
            list_endpoints(api);
            Ok(())
        }
        Command::Retrieve { call, dump } => {
            let client = build_client(&config)?;
            let endpoint = call.api.endpoint(&call.endpoint, call.folder.as_deref())?;
            let data = if dump {
                client.dump_sample(&endpoint, &call.values(), &call.opts()).await?
            } else {
                client.retrieve(&endpoint, &call.values(), &call.opts(), None).await?
            };
            print_json(&data)
        }
        Command::ReadSample { call } => {
            let client = build_client(&config)?;
            let endpoint = call.api.endpoint(&call.endpoint, call.folder.as_deref())?;
            let data = client.read_sample(&endpoint, &call.values(), &call.opts())?;
            print_json(&data)
        }
        Command::Matches { player, dump, raw } => run_matches(&config, &player, dump, raw).await,
        Command::Players { tour, limit } => {
            let players = tennis_abstract::players(&config.storage.tennis_abstract_dir, tour)?;
            for player in players.iter().take(limit.unwrap_or(usize::MAX)) {
                println!("{}\t{}", player.id, player);
            }
            Ok(())
        }
    }
}

fn build_client(config: &AppConfig) -> Result<ApiClient> {
    let credentials = Credentials::load(&config.storage.credentials_file)
        .context("Failed to load API credentials")?;
    Ok(ApiClient::new(config, credentials)?)
}

fn list_endpoints(api: Option<Api>) {
    let apis = match api {
        Some(api) => vec![api],
        None => Api::ALL.to_vec(),
    };
    for api in apis {
        println!("{api} ({})", api.provider().host());
        for endpoint in api.endpoints() {
            println!("  {}", endpoint.url());
            if !endpoint.params().is_empty() {
                println!("      params:    {}", endpoint.params().join(", "));
            }
            if !endpoint.optparams().is_empty() {
                println!("      optparams: {}", endpoint.optparams().join(", "));
            }
        }
    }
}

async fn run_matches(config: &AppConfig, player: &str, dump: bool, raw: bool) -> Result<()> {
    let team_id = match player.parse::<u64>() {
        Ok(id) => id,
        Err(_) => match sofascore::team_id(player) {
            Some(id) => id,
            None => bail!("Player {player:?} is not in the roster"),
        },
    };
    let name = sofascore::player_name(team_id)
        .with_context(|| format!("Invalid player team ID: {team_id}"))?;

    let client = build_client(config)?;
    let events = sofascore::pull_all_matches(&client, team_id).await?;

    if dump {
        let today = chrono::Local::now().date_naive();
        let dest = sofascore::dump_matches(&events, name, client.data_dir(), today)?;
        tracing::info!(path = %dest.display(), "Raw events written");
    }

    let events = sofascore::prune_canceled(events);
    if raw {
        return print_json(&Value::Array(events));
    }

    let matches = sofascore::parse_matches(&events);
    tracing::info!(events = events.len(), parsed = matches.len(), "Matches parsed");
    for m in &matches {
        println!("{}  {m}", m.time.timestamp.format("%Y-%m-%d"));
    }
    Ok(())
}

fn print_json(data: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}
