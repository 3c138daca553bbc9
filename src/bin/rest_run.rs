//! Command-line driver: runs one request of a `.http` file with its
//! dependencies and prints the response.
//!
//! ```text
//! rest-run requests.http --line 12 --settings settings.json
//! ```
//!
//! Logging goes to stderr (`RUST_LOG`, default `info`); responses go to
//! stdout. Ctrl+C cancels the request in flight; the rest of the run goes on.

use anyhow::{ensure, Context};
use async_trait::async_trait;
use clap::Parser;
use rest_runner::config::{load_config, RestClientConfig};
use rest_runner::controller::{Collaborators, LogStatusReporter, RequestController};
use rest_runner::document::FileDocument;
use rest_runner::executor::{ExecutionConfig, ReqwestTransport};
use rest_runner::history::JsonlHistoryStore;
use rest_runner::models::RequestRange;
use rest_runner::parser::HttpRequestParser;
use rest_runner::prompt::{Confirmation, UserPrompt};
use rest_runner::ui::TextDocumentView;
use rest_runner::variables::ResponseVariableCache;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};
use tokio::sync::Mutex;

#[derive(Parser, Debug)]
#[command(name = "rest-run", version, about = "Run a request from a .http file")]
struct Args {
    /// The .http file holding the requests
    file: PathBuf,

    /// A line (1-based) inside the request block to run
    #[arg(short, long)]
    line: usize,

    /// JSON settings file with a "rest-client" section
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// History file [default: ~/.config/rest-runner/history.jsonl]
    #[arg(long)]
    history: Option<PathBuf>,
}

/// Asks confirmations on a line-based input, prints errors to stderr.
///
/// One reader serves every question, so answers piped in ahead of time are
/// consumed one line per confirmation.
struct LinePrompt<R> {
    input: Mutex<R>,
}

impl<R> LinePrompt<R> {
    fn new(input: R) -> Self {
        Self {
            input: Mutex::new(input),
        }
    }
}

type StdinPrompt = LinePrompt<BufReader<Stdin>>;

impl StdinPrompt {
    fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

#[async_trait]
impl<R> UserPrompt for LinePrompt<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn confirm(&self, message: &str) -> Confirmation {
        eprint!("{} [y/N] ", message);

        let mut answer = String::new();
        let mut input = self.input.lock().await;
        match input.read_line(&mut answer).await {
            Ok(0) | Err(_) => Confirmation::Dismissed,
            Ok(_) => match answer.trim().to_lowercase().as_str() {
                "y" | "yes" => Confirmation::Yes,
                _ => Confirmation::No,
            },
        }
    }

    fn show_error(&self, message: &str) {
        eprintln!("error: {}", message);
    }
}

/// Drives `run` to completion, cancelling the request in flight whenever
/// `interrupt` fires. Requests still queued in the run are sent afterwards.
async fn run_with_interrupts<F, I, S>(controller: &RequestController, run: F, mut interrupt: S)
where
    F: Future<Output = ()>,
    S: FnMut() -> I,
    I: Future,
{
    tokio::pin!(run);
    loop {
        tokio::select! {
            _ = &mut run => break,
            _ = interrupt() => controller.cancel().await,
        }
    }
}

fn read_settings(path: Option<&PathBuf>) -> anyhow::Result<RestClientConfig> {
    let settings = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read settings {}", path.display()))?;
            let value: serde_json::Value = serde_json::from_str(&text)
                .with_context(|| format!("Settings {} are not valid JSON", path.display()))?;
            Some(value)
        }
        None => None,
    };

    load_config(settings).map_err(anyhow::Error::msg)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    ensure!(args.line > 0, "--line is 1-based");

    let config = read_settings(args.settings.as_ref())?;
    let document = FileDocument::open(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?
        .with_cursor_line(args.line - 1);

    let history = match args.history {
        Some(path) => JsonlHistoryStore::new(path, config.history_limit),
        None => JsonlHistoryStore::from_config(&config)?,
    };
    let transport = ReqwestTransport::new(&ExecutionConfig::from(&config))?;

    // a terminal has no panels: both previews print to stdout
    let view = Arc::new(TextDocumentView::with_sink(std::io::stdout()));
    let collaborators = Collaborators {
        parser: Arc::new(HttpRequestParser),
        transport: Arc::new(transport),
        status: Arc::new(LogStatusReporter),
        prompt: Arc::new(StdinPrompt::stdin()),
        text_view: view.clone(),
        panel_view: view,
        history: Arc::new(history),
        cache: Arc::new(ResponseVariableCache::new()),
    };
    let controller = RequestController::with_config(collaborators, config);

    run_with_interrupts(
        &controller,
        controller.run(Arc::new(document), RequestRange::line(args.line - 1)),
        || async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::warn!("Unable to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        },
    )
    .await;

    controller.dispose();
    Ok(())
}
