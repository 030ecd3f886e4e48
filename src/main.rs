use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use eventintel::api::client::ApiClient;
use eventintel::api::gateway::EventApi;
use eventintel::api::pacer::RequestPacer;
use eventintel::config::Config;
use eventintel::output::progress::Spinner;
use eventintel::output::terminal;
use eventintel::workflow::discovery::{self, AttendeeQuery, EventQuery, KNOWN_CATEGORIES};
use eventintel::workflow::Workflow;

/// eventintel: discover events, find who's going, and engage with them.
///
/// Talks to the event intelligence backend (EVENTINTEL_API_URL). Use
/// `shell` for the full workflow; `events` and `attendees` are one-shot
/// lookups for scripting.
#[derive(Parser)]
#[command(name = "eventintel", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover events by location, date range and category
    Events {
        /// City or area to search (e.g. "Austin, TX")
        #[arg(long)]
        location: String,

        /// Comma-separated categories (see `eventintel categories`)
        #[arg(long, value_delimiter = ',')]
        categories: Vec<String>,

        /// First day of the range, YYYY-MM-DD (default: today)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Last day of the range, YYYY-MM-DD (default: 30 days from start)
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Max events to return (default: EVENTINTEL_MAX_EVENTS or 10)
        #[arg(long)]
        max: Option<u32>,
    },

    /// Discover social-media attendees of an event
    Attendees {
        /// Event name as shown by `events`
        #[arg(long)]
        event: String,

        /// Event date to narrow the search
        #[arg(long)]
        date: Option<String>,

        /// Max attendees to return (default: EVENTINTEL_MAX_ATTENDEES or 20)
        #[arg(long)]
        max: Option<u32>,
    },

    /// Interactive session: events -> attendees -> notify & act
    Shell,

    /// List the event categories the backend understands
    Categories,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Structured logging to stderr so it doesn't interleave with tables
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("eventintel=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Events {
            location,
            categories,
            start,
            end,
            max,
        } => {
            let config = Config::load()?;
            let mut workflow = build_workflow(&config)?;

            let today = chrono::Local::now().date_naive();
            let start_date = start.unwrap_or(today);
            let end_date = end.unwrap_or_else(|| discovery::default_date_range(start_date).1);

            let query = EventQuery {
                location,
                start_date,
                end_date,
                categories,
                max_results: max.unwrap_or(config.max_events),
            };
            for unknown in query.unknown_categories() {
                terminal::warning(&format!("'{unknown}' is not a known category"));
            }

            let events = workflow.discover_events(&query).await?;
            terminal::display_events(events);
        }

        Commands::Attendees { event, date, max } => {
            let config = Config::load()?;
            let mut workflow = build_workflow(&config)?;

            let query = AttendeeQuery {
                event_name: event,
                event_date: date,
                max_results: max.unwrap_or(config.max_attendees),
            };
            workflow.discover_attendees(&query).await?;

            let state = workflow.state();
            terminal::display_attendees(
                state.attendee_event(),
                state.attendees(),
                state.selection(),
                state.select_all_state(),
            );
        }

        Commands::Shell => {
            let config = Config::load()?;
            let mut workflow = build_workflow(&config)?;
            info!(api_url = %config.api_url, "Starting interactive session");
            eventintel::shell::run(&mut workflow, &config).await?;
        }

        Commands::Categories => {
            println!("{}", "Known categories:".bold());
            for category in KNOWN_CATEGORIES {
                println!("  {category}");
            }
        }
    }

    Ok(())
}

/// Build the backend client and a fresh workflow around it.
fn build_workflow(config: &Config) -> Result<Workflow> {
    config.require_api_url()?;

    let mut client = ApiClient::new(&config.api_url)?;
    if let Some(qps) = config.max_qps {
        client = client.with_pacer(RequestPacer::per_second(qps)?);
    }

    let api: Arc<dyn EventApi> = Arc::new(client);
    Ok(Workflow::new(api, Box::new(Spinner::new())))
}
