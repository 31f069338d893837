use std::io::{self, Write};
use std::time::Duration;

use aama_core::{dispatch, ActionOutcome, ChatReply, ChatSession, THINKING_DELAY};
use aama_observability::init_tracing;
use aama_reviews::{ProxyClient, ReviewsView};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use url::Url;

#[derive(Debug, Parser)]
#[command(name = "daycare")]
#[command(about = "Aama Daycare assistant and reviews CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive chat. `/action <id>` runs a quick reply, `exit` quits.
    Chat {
        #[arg(long)]
        no_delay: bool,
    },
    Ask {
        text: Vec<String>,
    },
    Action {
        id: String,
    },
    Reviews {
        #[arg(
            long,
            env = "AAMA_REVIEWS_PROXY_URL",
            default_value = "http://localhost:8080/api/yelp-reviews"
        )]
        proxy_url: String,
        #[arg(long, default_value_t = 10)]
        timeout_seconds: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("aama_cli");
    let cli = Cli::parse();

    match cli.command {
        Command::Chat { no_delay } => run_chat(!no_delay).await?,
        Command::Ask { text } => {
            let mut session = ChatSession::new();
            match session.submit(&text.join(" ")) {
                Some(reply) => println!("{}", serde_json::to_string_pretty(&reply)?),
                None => anyhow::bail!("question must not be empty"),
            }
        }
        Command::Action { id } => {
            println!("{}", serde_json::to_string_pretty(&dispatch(&id))?);
        }
        Command::Reviews {
            proxy_url,
            timeout_seconds,
        } => {
            let url: Url = proxy_url
                .parse()
                .with_context(|| format!("invalid --proxy-url {proxy_url}"))?;
            let client = reqwest_client(Duration::from_secs(timeout_seconds))?;
            let mut view = ReviewsView::new(ProxyClient::new(client, url));
            let state = view.load().await;

            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "state": state,
                    "offline": view.is_offline(),
                    "error": view.last_error(),
                    "payload": view.snapshot(),
                }))?
            );
        }
    }

    Ok(())
}

async fn run_chat(with_delay: bool) -> Result<()> {
    let mut session = ChatSession::new();
    if let Some(greeting) = session.messages().first() {
        println!("{}\n", greeting.text);
    }

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        let message = line.trim();
        if message.eq_ignore_ascii_case("exit") || message.eq_ignore_ascii_case("quit") {
            break;
        }

        if let Some(action) = message.strip_prefix("/action ") {
            match session.apply_action(action.trim()) {
                ActionOutcome::Navigate { target } => {
                    println!("\nopen {:?}: {}\n", target.kind, target.uri)
                }
                ActionOutcome::Reply { text } => println!("\n{text}\n"),
            }
            continue;
        }

        let Some(reply) = session.submit(message) else {
            continue;
        };
        if with_delay {
            tokio::time::sleep(THINKING_DELAY).await;
        }
        print_reply(&reply);
    }

    Ok(())
}

fn print_reply(reply: &ChatReply) {
    println!("\n{}\n", reply.text);
    if !reply.suggested_follow_ups.is_empty() {
        println!("Suggestions:");
        for follow_up in &reply.suggested_follow_ups {
            println!("- {} (/action {})", follow_up.label, follow_up.action);
        }
        println!();
    }
}

fn reqwest_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("failed to build HTTP client")
}
