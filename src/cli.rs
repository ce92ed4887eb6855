use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::api;
use crate::config::Config;
use crate::controller::SearchController;
use crate::provider::{SearchProvider, Voice123Client};
use crate::render::render_page;
use crate::views::SearchPageView;

#[derive(Debug, Parser)]
#[command(name = "voicesearch", about = "Search the Voice123 talent directory")]
pub struct Cli {
    /// Search endpoint, overrides VOICE123_API_BASE
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one search and print the results
    Search {
        keywords: Vec<String>,
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Search interactively, paging with :n / :p / :g N
    Interactive { keywords: Vec<String> },
    /// Serve the JSON search API and the static UI
    Serve {
        /// Overrides LISTEN_ADDR
        #[arg(long)]
        listen: Option<String>,
        #[arg(long, default_value = "static")]
        static_dir: PathBuf,
    },
}

impl Cli {
    pub fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(base) = &self.api_base {
            config.api_base = base.clone();
        }
        if let Command::Serve {
            listen: Some(listen),
            ..
        } = &self.command
        {
            config.listen_addr = listen.clone();
        }
        config
    }
}

pub async fn run(cli: Cli, config: Config) -> Result<()> {
    let client = Voice123Client::new(&config).context("Failed to build HTTP client")?;

    match cli.command {
        Command::Search { keywords, page } => {
            let controller = SearchController::new(client);
            controller.execute_search(keywords.join(" "), page).await;
            println!("{}", render_page(&SearchPageView::from_state(&controller.snapshot())));
            Ok(())
        }
        Command::Interactive { keywords } => {
            let controller = SearchController::new(client);
            run_interactive(&controller, keywords.join(" ")).await
        }
        Command::Serve { static_dir, .. } => serve(client, &config.listen_addr, static_dir).await,
    }
}

async fn serve(client: Voice123Client, listen_addr: &str, static_dir: PathBuf) -> Result<()> {
    let router = api::create_router(Arc::new(client), static_dir);
    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("Failed to bind {listen_addr}"))?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}

/// One line typed at the interactive prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Search(String),
    Next,
    Previous,
    Goto(u32),
    Help,
    Quit,
    Noop,
    Unknown(String),
}

pub fn parse_command(line: &str) -> ReplCommand {
    let line = line.trim();
    let Some(command) = line.strip_prefix(':') else {
        return if line.is_empty() {
            ReplCommand::Noop
        } else {
            ReplCommand::Search(line.to_string())
        };
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("n" | "next"), None) => ReplCommand::Next,
        (Some("p" | "prev"), None) => ReplCommand::Previous,
        (Some("g" | "page"), Some(n)) => match n.parse::<u32>() {
            Ok(page) if page > 0 => ReplCommand::Goto(page),
            _ => ReplCommand::Unknown(line.to_string()),
        },
        (Some("h" | "help"), None) => ReplCommand::Help,
        (Some("q" | "quit"), None) => ReplCommand::Quit,
        _ => ReplCommand::Unknown(line.to_string()),
    }
}

const HELP: &str = "type keywords to search, :n next page, :p previous page, :g N go to page, :q quit";

async fn run_interactive<P: SearchProvider>(
    controller: &SearchController<P>,
    initial_keywords: String,
) -> Result<()> {
    println!("{HELP}");
    if !initial_keywords.is_empty() {
        drive(controller, controller.execute_search(initial_keywords, 1)).await;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            ReplCommand::Search(keywords) => {
                drive(controller, controller.execute_search(keywords, 1)).await
            }
            ReplCommand::Next => match controller.next_page() {
                Some(search) => drive(controller, search).await,
                None => println!("already on the last page"),
            },
            ReplCommand::Previous => match controller.previous_page() {
                Some(search) => drive(controller, search).await,
                None => println!("already on the first page"),
            },
            ReplCommand::Goto(page) => match controller.pagination() {
                Some(pagination) if page <= pagination.total => {
                    drive(controller, controller.change_page(page)).await
                }
                Some(pagination) => println!("there are only {} pages", pagination.total),
                None => println!("search for something first"),
            },
            ReplCommand::Help => println!("{HELP}"),
            ReplCommand::Quit => break,
            ReplCommand::Noop => {}
            ReplCommand::Unknown(input) => println!("unknown command {input:?}, :h for help"),
        }
    }
    Ok(())
}

/// Shows the loading state, waits for the search, then shows the outcome.
async fn drive<P: SearchProvider>(
    controller: &SearchController<P>,
    search: impl Future<Output = ()>,
) {
    println!("{}", render_page(&SearchPageView::from_state(&controller.snapshot())));
    search.await;
    println!("{}", render_page(&SearchPageView::from_state(&controller.snapshot())));
}
