mod form;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use wayfarer_agents::TripPlanner;
use wayfarer_core::{
    trip_form, validate_trip, Interest, MealPreference, Submission, TripRequest, BUSY_MESSAGE,
};
use wayfarer_llm::{GeminiClient, ModelSettings};
use wayfarer_observability::{init_tracing, AppMetrics};

#[derive(Debug, Parser)]
#[command(name = "wayfarer")]
#[command(about = "Smart AI travel planner")]
struct Cli {
    /// TOML file holding API_KEY (top level or under [general]).
    #[arg(long, env = "WAYFARER_SECRETS_FILE")]
    secrets: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan a trip from command-line flags.
    Plan {
        #[command(flatten)]
        trip: TripArgs,
        #[arg(long)]
        json: bool,
    },
    /// Fill in the trip form interactively.
    Form {
        #[arg(long)]
        json: bool,
    },
    /// Print the form description as JSON.
    Schema,
}

#[derive(Debug, Args)]
struct TripArgs {
    #[arg(long, default_value = "")]
    source: String,
    #[arg(long, default_value = "")]
    destination: String,
    #[arg(long, default_value = "ALL")]
    interest: Interest,
    #[arg(long, default_value_t = 0)]
    budget: u64,
    /// Defaults to today.
    #[arg(long)]
    start_date: Option<NaiveDate>,
    /// Defaults to today.
    #[arg(long)]
    end_date: Option<NaiveDate>,
    #[arg(long, default_value = "No Preference")]
    meal: MealPreference,
    #[arg(long)]
    special: Option<String>,
}

impl TripArgs {
    fn into_request(self, today: NaiveDate) -> TripRequest {
        TripRequest {
            source: self.source,
            destination: self.destination,
            interest: self.interest,
            budget: self.budget,
            start_date: self.start_date.unwrap_or(today),
            end_date: self.end_date.unwrap_or(today),
            meal_preference: self.meal,
            special_requirements: self.special,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing("wayfarer_cli");

    if let Command::Schema = cli.command {
        println!("{}", serde_json::to_string_pretty(&trip_form())?);
        return Ok(ExitCode::SUCCESS);
    }

    // No key, no planner: stop before the form is shown.
    let settings = match ModelSettings::load(cli.secrets.as_deref()) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("⚠️ {err}");
            return Ok(ExitCode::FAILURE);
        }
    };
    let planner = build_planner(&settings)?;
    let today = chrono::Local::now().date_naive();

    match cli.command {
        Command::Plan { trip, json } => {
            let request = trip.into_request(today);
            run_submission(&planner, &request, today, json).await?;
        }
        Command::Form { json } => {
            let request = {
                let stdin = io::stdin();
                let mut input = stdin.lock();
                let mut output = io::stdout();
                form::prompt_trip(&mut input, &mut output, today)?
            };
            run_submission(&planner, &request, today, json).await?;
        }
        Command::Schema => {}
    }

    Ok(ExitCode::SUCCESS)
}

fn build_planner(settings: &ModelSettings) -> Result<TripPlanner> {
    let model = GeminiClient::new(settings).context("failed to build Gemini client")?;
    Ok(TripPlanner::new(Arc::new(model), AppMetrics::shared()))
}

async fn run_submission(
    planner: &TripPlanner,
    request: &TripRequest,
    today: NaiveDate,
    json: bool,
) -> Result<()> {
    if validate_trip(request, today).proceed() && !json {
        eprintln!("{BUSY_MESSAGE}");
    }

    let submission = planner.submit(request, today).await;

    let mut stdout = io::stdout();
    if json {
        writeln!(stdout, "{}", serde_json::to_string_pretty(&submission)?)?;
    } else {
        render(&mut stdout, &submission)?;
    }
    Ok(())
}

fn render<W: Write>(out: &mut W, submission: &Submission) -> Result<()> {
    for warning in &submission.warnings {
        writeln!(out, "⚠️ {warning}")?;
    }
    if let Some(banner) = &submission.banner {
        writeln!(out, "{banner}")?;
    }
    if let Some(itinerary) = &submission.itinerary {
        writeln!(out, "\n{itinerary}")?;
    }
    Ok(())
}
