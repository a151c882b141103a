//! Command-line surface: one-shot subcommands plus an interactive shell that
//! keeps a search session (and its cache key) alive between commands.

use std::io::Write;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tracing::error;

use crate::api_client::ResumeBackend;
use crate::errors::SearchError;
use crate::presentation::{render_cache_status, render_details, render_header, render_table};
use crate::search::{SearchPhase, SearchRequest, SearchSession, SearchUpdate};

const CONFIRM_CLEAR_CURRENT: &str = "Are you sure you want to clear the current search cache? \
    This will remove the cache for the current folder and query combination.";
const CONFIRM_CLEAR_ALL: &str = "Are you sure you want to clear ALL cache? \
    This will remove all cached data including both Gemini and Vector cache.";

const HELP: &str = "\
Commands:
  folder <path>      choose the resume folder (step 1)
  search <skills>    rank resumes in the folder against comma-separated skills
  force <skills>     same as search, but bypass the backend caches
  details <n>        show row <n> of the last results
  clear current      clear the cache entry of the last search
  clear all          clear every backend cache
  status             show folder, search state and cache status
  help               show this message
  quit               leave the shell
";

#[derive(Parser)]
#[command(name = "finder")]
#[command(version)]
#[command(about = "Rank resumes in a folder against a skill query", long_about = None)]
pub struct Cli {
    /// Backend base URL (overrides RESUME_API_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a single search and print the ranked table
    Search {
        #[arg(long)]
        folder: String,
        #[arg(long)]
        skills: String,
        /// Bypass backend caches and recompute
        #[arg(long)]
        force: bool,
        /// Also print the full details of this row
        #[arg(long)]
        details: Option<usize>,
    },
    /// Clear one cache entry by the key shown in a previous search
    ClearCurrent {
        #[arg(long)]
        cache_key: String,
    },
    /// Clear every backend cache
    ClearAll {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Interactive session (default)
    Shell,
}

pub async fn run(cli: Cli, backend: Arc<dyn ResumeBackend>) -> Result<()> {
    let mut session = SearchSession::new(backend);
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut out = std::io::stdout();

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Search {
            folder,
            skills,
            force,
            details,
        } => {
            let request = SearchRequest::new(folder, skills).forced(force);
            session.search(&request).await?;
            write!(out, "{}", render_results(&session))?;
            if let Some(row) = details {
                match session.resume_at(row) {
                    Some(resume) => write!(out, "\n{}", render_details(resume))?,
                    None => bail!("No result row {row}"),
                }
            }
            Ok(())
        }
        Commands::ClearCurrent { cache_key } => {
            let response = session.clear_key(&cache_key).await?;
            writeln!(out, "{}", response.message)?;
            Ok(())
        }
        Commands::ClearAll { yes } => {
            if !yes && !confirm(&mut input, &mut out, CONFIRM_CLEAR_ALL).await? {
                writeln!(out, "Cancelled.")?;
                return Ok(());
            }
            let response = session.clear_all().await?;
            writeln!(out, "{}", response.message)?;
            Ok(())
        }
        Commands::Shell => Shell::new(session, input, out).run().await,
    }
}

/// Header, cache banner (when known) and results table.
fn render_results(session: &SearchSession) -> String {
    let mut text = render_header(session.resumes(), session.cache_info());
    text.push('\n');
    if let Some(info) = session.cache_info() {
        text.push_str(&render_cache_status(info));
    }
    text.push_str(&render_table(session.resumes()));
    text
}

async fn confirm<R, W>(input: &mut Lines<R>, out: &mut W, question: &str) -> Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write!(out, "{question} [y/N] ")?;
    out.flush()?;
    let answer = input.next_line().await?.unwrap_or_default();
    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

#[derive(Debug, PartialEq, Eq)]
enum ShellCommand {
    Folder(String),
    Search { skills: String, force: bool },
    Details(usize),
    ClearCurrent,
    ClearAll,
    Status,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

fn parse_command(line: &str) -> ShellCommand {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_ascii_lowercase().as_str() {
        "" => ShellCommand::Empty,
        "folder" => ShellCommand::Folder(rest.to_string()),
        "search" => ShellCommand::Search {
            skills: rest.to_string(),
            force: false,
        },
        "force" => ShellCommand::Search {
            skills: rest.to_string(),
            force: true,
        },
        "details" => match rest.parse::<usize>() {
            Ok(row) => ShellCommand::Details(row),
            Err(_) => ShellCommand::Invalid("Usage: details <row number>".to_string()),
        },
        "clear" => match rest.to_ascii_lowercase().as_str() {
            "current" => ShellCommand::ClearCurrent,
            "all" => ShellCommand::ClearAll,
            _ => ShellCommand::Invalid("Usage: clear current | clear all".to_string()),
        },
        "status" => ShellCommand::Status,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => ShellCommand::Invalid(format!("Unknown command '{other}'. Type 'help'.")),
    }
}

struct Shell<R, W> {
    session: SearchSession,
    folder: String,
    input: Lines<R>,
    out: W,
}

impl<R, W> Shell<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    fn new(session: SearchSession, input: Lines<R>, out: W) -> Self {
        Self {
            session,
            folder: String::new(),
            input,
            out,
        }
    }

    async fn run(mut self) -> Result<()> {
        write!(self.out, "{HELP}")?;
        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;

            let Some(line) = self.input.next_line().await? else {
                break;
            };

            match parse_command(&line) {
                ShellCommand::Quit => break,
                command => self.execute(command).await?,
            }
        }
        Ok(())
    }

    async fn execute(&mut self, command: ShellCommand) -> Result<()> {
        match command {
            ShellCommand::Empty | ShellCommand::Quit => {}
            ShellCommand::Help => write!(self.out, "{HELP}")?,
            ShellCommand::Invalid(message) => writeln!(self.out, "{message}")?,
            ShellCommand::Folder(path) => {
                if path.trim().is_empty() {
                    writeln!(self.out, "Please select a folder first.")?;
                } else {
                    self.folder = path;
                    writeln!(
                        self.out,
                        "Folder set to {}. Now search for skills.",
                        self.folder
                    )?;
                }
            }
            ShellCommand::Search { skills, force } => {
                let request = SearchRequest::new(self.folder.clone(), skills).forced(force);
                writeln!(self.out, "Analyzing resumes...")?;
                match self.session.search(&request).await {
                    Ok(SearchUpdate::Applied { resumes }) => {
                        writeln!(self.out, "{resumes} matching resumes.")?;
                        write!(self.out, "{}", render_results(&self.session))?;
                    }
                    Ok(SearchUpdate::Superseded) => {}
                    Err(e) => self.report(&e)?,
                }
            }
            ShellCommand::Details(row) => match self.session.resume_at(row) {
                Some(resume) => write!(self.out, "{}", render_details(resume))?,
                None => writeln!(
                    self.out,
                    "No result row {row} ({} rows shown).",
                    self.session.resumes().len()
                )?,
            },
            ShellCommand::ClearCurrent => {
                if self.session.cache_key().is_none() {
                    // Checked before asking so the user is not prompted for nothing.
                    let err = SearchError::Precondition(
                        "No current cache to clear. Please perform a search first.".to_string(),
                    );
                    return self.report(&err);
                }
                if confirm(&mut self.input, &mut self.out, CONFIRM_CLEAR_CURRENT).await? {
                    match self.session.clear_current().await {
                        Ok(response) => writeln!(self.out, "{}", response.message)?,
                        Err(e) => self.report(&e)?,
                    }
                }
            }
            ShellCommand::ClearAll => {
                if confirm(&mut self.input, &mut self.out, CONFIRM_CLEAR_ALL).await? {
                    match self.session.clear_all().await {
                        Ok(response) => writeln!(self.out, "{}", response.message)?,
                        Err(e) => self.report(&e)?,
                    }
                }
            }
            ShellCommand::Status => self.status()?,
        }
        Ok(())
    }

    fn status(&mut self) -> Result<()> {
        let folder = if self.folder.is_empty() {
            "(none)"
        } else {
            self.folder.as_str()
        };
        writeln!(self.out, "Folder: {folder}")?;
        let phase = match self.session.phase() {
            SearchPhase::Idle => "idle".to_string(),
            SearchPhase::Searching => "searching".to_string(),
            SearchPhase::Succeeded => format!("{} results", self.session.resumes().len()),
            SearchPhase::Failed(e) => format!("failed: {e}"),
        };
        writeln!(self.out, "Last search: {phase}")?;
        match self.session.cache_info() {
            Some(info) => write!(self.out, "{}", render_cache_status(info))?,
            None => writeln!(self.out, "Cache: no cache information")?,
        }
        Ok(())
    }

    fn report(&mut self, e: &SearchError) -> Result<()> {
        error!("{e}");
        writeln!(self.out, "Error: {e}")?;
        if e.is_retryable() {
            writeln!(self.out, "Run the same command again to retry.")?;
        }
        Ok(())
    }
}
