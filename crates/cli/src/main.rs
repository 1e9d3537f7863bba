use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::Context;
use clap::{Parser, Subcommand};
use stacks_app::desk::{Command, Desk, Response, HELP_TEXT};
use stacks_kernel::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "stacks", version, about = "Library catalog front desk and API server")]
struct Cli {
    /// Start with an empty catalog instead of the starter titles
    #[arg(long, global = true)]
    empty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Interactive front desk reading one request per line from stdin
    Desk {
        /// Print the usage banner before every reply
        #[arg(long)]
        help_banner: bool,
    },
    /// Serve the HTTP API until Ctrl-C
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the catalog, or the books matching QUERY
    Books { query: Option<String> },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load stacks settings")?;
    if cli.empty {
        settings.catalog.seed_books = false;
    }
    stacks_telemetry::init(&settings.telemetry);

    tracing::debug!(env = ?settings.environment, command = ?cli.command, "stacks cli starting");

    match cli.command {
        Commands::Desk { help_banner } => {
            let show_help = help_banner || settings.desk.show_help;
            run_desk(&settings, show_help)
        }
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }
            let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
            runtime.block_on(stacks_app::serve(&settings))
        }
        Commands::Books { query } => {
            let mut desk = Desk::new(stacks_app::build_catalog(&settings));
            let command = match query {
                Some(query) => Command::Search { query },
                None => Command::AllBooks,
            };
            println!("{}", desk.execute(&command));
            Ok(())
        }
    }
}

fn run_desk(settings: &Settings, show_help: bool) -> anyhow::Result<()> {
    let mut desk = Desk::new(stacks_app::build_catalog(settings)).with_help_banner(show_help);

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut out = io::stdout().lock();

    if interactive && !show_help {
        writeln!(out, "{}", HELP_TEXT)?;
    }

    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            write!(out, "> ")?;
            out.flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read from stdin")?;

        match desk.respond(&line) {
            Response::Silent => {}
            Response::Reply(text) => writeln!(out, "{}", text)?,
            Response::Quit => break,
        }
    }

    tracing::debug!(
        books = desk.catalog().len(),
        users = desk.catalog().user_count(),
        "desk session ended"
    );
    Ok(())
}
