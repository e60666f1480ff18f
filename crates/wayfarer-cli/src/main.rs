//! Wayfarer - Budget-constrained trip planner

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use std::io::{self, Write};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use wayfarer_core::{PlannerConfig, TripRequest};
use wayfarer_engine::{Planner, ProviderSet};
use wayfarer_providers::ProviderConfig;

mod extract;

use extract::extract;

#[derive(Parser)]
#[command(
    name = "wayfarer",
    version,
    about = "Plan a trip: flights, hotel, activities, and a day-by-day itinerary within budget"
)]
struct Cli {
    /// Free-text trip request, e.g. "plan a trip to Paris from New York,
    /// 2025-10-08 to 2025-10-15, $1500 per person, 2 travelers"
    request: Option<String>,

    /// Destination city (overrides anything parsed from the request text)
    #[arg(long)]
    destination: Option<String>,

    /// Departure city
    #[arg(long = "from")]
    origin: Option<String>,

    /// Departure date, YYYY-MM-DD
    #[arg(long)]
    depart: Option<String>,

    /// Return date, YYYY-MM-DD
    #[arg(long = "return")]
    return_date: Option<String>,

    /// Budget per person in USD
    #[arg(long)]
    budget: Option<f64>,

    /// Number of travelers
    #[arg(long)]
    travelers: Option<u32>,

    /// Comma-separated interests: culture,food,adventure,relaxation
    #[arg(long)]
    interests: Option<String>,

    /// Optimization priority: economy, balanced, or luxury
    #[arg(long)]
    priority: Option<String>,

    /// Prompt for the trip details interactively
    #[arg(long, short)]
    interactive: bool,

    /// Print the final plan state as JSON instead of the report
    #[arg(long)]
    json: bool,

    /// Run the provider searches one at a time
    #[arg(long)]
    serial: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("{}: {e:#}", "Error".red().bold());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let request = build_request(&cli)?;

    let providers = ProviderSet::from_config(&ProviderConfig::from_env())?;
    let config = PlannerConfig {
        parallel_search: !cli.serial,
        ..Default::default()
    };
    let planner = Planner::new(providers).with_config(config);

    if !cli.json {
        if let Some(destination) = &request.destination {
            println!(
                "{} {}",
                "Planning your trip to".cyan().bold(),
                destination
            );
        }
    }

    let outcome = planner.run(request).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome.state)?);
    } else {
        println!("{}", outcome.report);
    }

    Ok(())
}

/// Assemble the trip request: free text first, explicit flags override,
/// interactive prompts fill anything still missing when requested.
fn build_request(cli: &Cli) -> anyhow::Result<TripRequest> {
    let mut request = cli
        .request
        .as_deref()
        .map(extract)
        .unwrap_or_default();

    if cli.destination.is_some() {
        request.destination = cli.destination.clone();
    }
    if cli.origin.is_some() {
        request.origin = cli.origin.clone();
    }
    if let Some(depart) = &cli.depart {
        request.departure_date = Some(parse_date(depart).context("invalid --depart date")?);
    }
    if let Some(ret) = &cli.return_date {
        request.return_date = Some(parse_date(ret).context("invalid --return date")?);
    }
    if cli.budget.is_some() {
        request.budget_per_person = cli.budget;
    }
    if cli.travelers.is_some() {
        request.traveler_count = cli.travelers;
    }
    if let Some(interests) = &cli.interests {
        request.preferences = interests
            .split(',')
            .filter_map(|tag| tag.trim().parse().ok())
            .collect();
    }
    if let Some(priority) = &cli.priority {
        request.priority = Some(
            priority
                .parse()
                .map_err(|_| anyhow::anyhow!("unknown priority: {priority}"))?,
        );
    }

    if cli.interactive {
        fill_interactively(&mut request)?;
    }

    Ok(request)
}

fn fill_interactively(request: &mut TripRequest) -> anyhow::Result<()> {
    if request.destination.is_none() {
        request.destination = non_empty(prompt("Where would you like to travel? ")?);
    }
    if request.origin.is_none() {
        request.origin = non_empty(prompt("Where are you departing from? ")?);
    }
    if request.departure_date.is_none() {
        if let Some(answer) = non_empty(prompt("Departure date (YYYY-MM-DD): ")?) {
            request.departure_date = Some(parse_date(&answer).context("invalid departure date")?);
        }
    }
    if request.return_date.is_none() {
        if let Some(answer) = non_empty(prompt(
            "Return date (YYYY-MM-DD, or press Enter for one-way): ",
        )?) {
            request.return_date = Some(parse_date(&answer).context("invalid return date")?);
        }
    }
    if request.budget_per_person.is_none() {
        if let Some(answer) = non_empty(prompt("Budget per person ($): ")?) {
            request.budget_per_person =
                Some(answer.parse().context("budget must be a number")?);
        }
    }
    if request.traveler_count.is_none() {
        if let Some(answer) = non_empty(prompt("Number of travelers: ")?) {
            request.traveler_count =
                Some(answer.parse().context("traveler count must be a number")?);
        }
    }
    Ok(())
}

fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(answer.trim().to_string())
}

fn non_empty(answer: String) -> Option<String> {
    if answer.is_empty() {
        None
    } else {
        Some(answer)
    }
}

fn parse_date(value: &str) -> anyhow::Result<chrono::NaiveDate> {
    chrono::NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .with_context(|| format!("expected YYYY-MM-DD, got {value:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfarer_core::BudgetPriority;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("wayfarer").chain(args.iter().copied()))
    }

    #[test]
    fn test_flags_override_free_text() {
        let cli = cli(&[
            "plan a trip to Paris from New York, $900 per person",
            "--budget",
            "1500",
            "--travelers",
            "3",
        ]);
        let request = build_request(&cli).unwrap();
        assert_eq!(request.destination.as_deref(), Some("Paris"));
        assert_eq!(request.budget_per_person, Some(1500.0));
        assert_eq!(request.traveler_count, Some(3));
    }

    #[test]
    fn test_interest_and_priority_flags() {
        let cli = cli(&[
            "--destination",
            "Tokyo",
            "--interests",
            "food, relaxation",
            "--priority",
            "luxury",
        ]);
        let request = build_request(&cli).unwrap();
        assert_eq!(request.preferences.len(), 2);
        assert_eq!(request.priority, Some(BudgetPriority::Luxury));
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let cli = cli(&["--destination", "Rome", "--depart", "next tuesday"]);
        assert!(build_request(&cli).is_err());
    }
}
