use std::{
    fs::OpenOptions,
    io::{BufRead, BufReader, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::{Builder, Target};
use matrix_snippet_mcp::{
    dispatcher::{dispatch, resolve_template},
    document::{CursorPosition, Document},
    host::BufferHost,
    snippets::Operation,
    state::SnippetTools,
    types::McpMessage,
};

const INSTRUCTIONS: &str = "Inserts C++ matrix-math functions into a document. Use open_document to pick the file and cursor, then call one of the insert_matrix_* tools.";

#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// File to persist session state in. Sessions are kept in memory when unset.
    #[arg(long, env = "MCP_SESSION_STORAGE_PATH", global = true)]
    session_storage: Option<String>,

    /// File to append logs to, filtered by RUST_LOG
    #[arg(long, env = "LOG_LOCATION", global = true)]
    log_location: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve MCP over stdin/stdout (the default)
    Serve,

    /// List the available snippets
    List,

    /// Print a snippet to stdout
    Show { operation: Operation },

    /// Insert a snippet into a file and save it
    Insert {
        operation: Operation,

        /// File to insert into
        file: Option<PathBuf>,

        /// Zero-based cursor line
        #[arg(long, conflicts_with = "offset")]
        line: Option<usize>,

        /// Zero-based cursor column, in characters
        #[arg(long, requires = "line")]
        column: Option<usize>,

        /// Cursor as a character offset from the start of the file
        #[arg(long)]
        offset: Option<usize>,
    },
}

fn main() -> Result<ExitCode> {
    let Cli {
        session_storage,
        log_location,
        command,
    } = Cli::parse();
    let command = command.unwrap_or(Command::Serve);

    if let Some(log_location) = log_location {
        let path = PathBuf::from(&*shellexpand::tilde(&log_location));
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Builder::from_default_env()
            .target(Target::Pipe(Box::new(
                OpenOptions::new().create(true).append(true).open(path)?,
            )))
            .init();
    } else if !matches!(command, Command::Serve) {
        // stdout belongs to the protocol only while serving
        Builder::from_default_env().init();
    }

    match command {
        Command::Serve => {
            serve(session_storage.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        Command::List => {
            for operation in Operation::ALL {
                println!("{:<16}{}", operation.to_string(), operation.title());
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Show { operation } => {
            print!("{}", resolve_template(operation));
            Ok(ExitCode::SUCCESS)
        }
        Command::Insert {
            operation,
            file,
            line,
            column,
            offset,
        } => {
            let position = line.map(|line| CursorPosition::new(line, column.unwrap_or(0)));
            insert(operation, file, position, offset)
        }
    }
}

fn serve(session_storage: Option<&str>) -> Result<()> {
    let mut state = SnippetTools::new(session_storage)?;

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut reader = BufReader::new(stdin);
    let mut line = String::new();

    loop {
        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Ok(_) => {
                log::trace!("<- {line}");
                match serde_json::from_str(&line) {
                    Ok(McpMessage::Request(request)) => {
                        let response = request.execute(&mut state, Some(INSTRUCTIONS));
                        let response_str = serde_json::to_string(&response)?;
                        log::trace!("-> {response_str}");
                        stdout.write_all(response_str.as_bytes())?;
                        stdout.write_all(b"\n")?;
                        stdout.flush()?;
                    }
                    Ok(McpMessage::Notification(notification)) => {
                        log::debug!("ignoring notification {}", notification.method);
                    }
                    Err(e) => log::warn!("unparseable message: {e}"),
                }
            }
            Err(e) => {
                log::error!("Error reading line: {e}");
                break;
            }
        }
    }

    Ok(())
}

fn insert(
    operation: Operation,
    file: Option<PathBuf>,
    position: Option<CursorPosition>,
    offset: Option<usize>,
) -> Result<ExitCode> {
    let document = match file {
        Some(file) => {
            let mut document = Document::open(file)?;
            if let Some(offset) = offset {
                document.set_cursor(offset)?;
            } else if let Some(position) = position {
                document.set_cursor_position(position)?;
            }
            Some(document)
        }
        None => None,
    };

    let mut host = BufferHost::new(document);
    let result = dispatch(&mut host, operation);
    for notification in host.notifications() {
        eprintln!("{notification}");
    }

    if result.is_err() {
        return Ok(ExitCode::FAILURE);
    }

    if let Some(mut document) = host.into_document().filter(Document::is_dirty) {
        document.save()?;
    }
    Ok(ExitCode::SUCCESS)
}
