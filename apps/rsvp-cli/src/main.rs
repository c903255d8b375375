//! RSVP terminal client
//!
//! Walks through the two-step form against a running RSVP API: create an
//! event (or open one by id), then record guest responses until a blank name.

use clap::Parser;
use core_config::tracing::{init_cli_tracing, install_color_eyre};
use eyre::Result;
use rsvp_cli::{HttpEventsApi, RsvpStatus, RsvpWizard, Submission, render_event};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tracing::info;

#[derive(Parser)]
#[command(name = "rsvp")]
#[command(about = "Create an event and collect RSVPs from the terminal")]
struct Cli {
    /// Base URL of the RSVP API
    #[arg(long, env = "RSVP_API_URL", default_value = "http://localhost:4000")]
    api_url: String,

    /// Skip step 1 and collect RSVPs for an existing event
    #[arg(short, long)]
    event: Option<String>,
}

type Input = Lines<BufReader<Stdin>>;

/// Print `label` and read one trimmed line; `None` on end of input.
async fn prompt(input: &mut Input, label: &str) -> Result<Option<String>> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(label.as_bytes()).await?;
    stdout.flush().await?;

    Ok(input.next_line().await?.map(|line| line.trim().to_string()))
}

/// Ask until the answer is a known status; blank picks the default.
async fn prompt_status(input: &mut Input) -> Result<Option<RsvpStatus>> {
    loop {
        let Some(answer) = prompt(input, "Status [yes/no/maybe] (yes): ").await? else {
            return Ok(None);
        };
        if answer.is_empty() {
            return Ok(Some(RsvpStatus::default()));
        }
        match answer.parse() {
            Ok(status) => return Ok(Some(status)),
            Err(_) => println!("Please answer yes, no or maybe."),
        }
    }
}

async fn create_step(wizard: &mut RsvpWizard<HttpEventsApi>, input: &mut Input) -> Result<bool> {
    println!("Step 1 of 2: Create your event");

    while wizard.step() == 1 {
        let Some(title) = prompt(input, "Event title: ").await? else {
            return Ok(false);
        };
        let Some(date) = prompt(input, "Date (YYYY-MM-DD): ").await? else {
            return Ok(false);
        };

        match wizard.create_event(&title, &date).await {
            Submission::Done => {}
            Submission::Skipped => println!("Title and date are required."),
            Submission::Busy => println!("Still creating the event..."),
            Submission::Failed => {
                println!("Error: {}", wizard.last_error().unwrap_or_default());
            }
        }
    }
    Ok(true)
}

async fn rsvp_step(wizard: &mut RsvpWizard<HttpEventsApi>, input: &mut Input) -> Result<()> {
    println!("Step 2 of 2: Collect RSVPs (blank name to finish)");

    loop {
        if let Some(event) = wizard.event() {
            println!("\n{}", render_event(event));
        }

        let Some(name) = prompt(input, "Guest name: ").await? else {
            return Ok(());
        };
        if name.is_empty() {
            return Ok(());
        }
        let Some(status) = prompt_status(input).await? else {
            return Ok(());
        };

        match wizard.add_rsvp(&name, status).await {
            Submission::Failed => {
                println!("Error: {}", wizard.last_error().unwrap_or_default());
            }
            Submission::Busy => println!("Still saving the previous RSVP..."),
            Submission::Done | Submission::Skipped => {}
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();
    init_cli_tracing();

    let cli = Cli::parse();
    info!(api_url = %cli.api_url, "Using RSVP API");

    let mut wizard = RsvpWizard::new(HttpEventsApi::new(cli.api_url));
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    match cli.event {
        Some(id) => {
            if wizard.open_event(&id).await != Submission::Done {
                let message = wizard.last_error().unwrap_or("Event id is required");
                return Err(eyre::eyre!("Could not open event {}: {}", id, message));
            }
        }
        None => {
            if !create_step(&mut wizard, &mut input).await? {
                return Ok(());
            }
        }
    }

    rsvp_step(&mut wizard, &mut input).await
}
