use std::fs::File;
use std::io::{self, BufReader, IsTerminal, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use scheme_interpreter as scheme;

use scheme::reader::{tokenize, Reader};
use scheme::repl::{Flow, Repl};
use scheme::scanner::Scanner;

#[derive(ClapParser, Debug)]
#[command(version, about = "Scheme subset interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Option<Commands>,

    /// Enable logging to scheme.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes input from a file, printing each token
    Tokenize {
        filename: Option<PathBuf>,

        /// Print tokens as JSON
        #[arg(long)]
        json: bool,
    },

    /// Reads every datum from a file and prints it back
    Parse {
        filename: Option<PathBuf>,

        /// Print syntax trees as JSON
        #[arg(long)]
        json: bool,
    },

    /// Evaluates every top-level form of a file
    Run { filename: Option<PathBuf> },

    /// Interactive read-eval-print loop on standard input (the default)
    Repl,
}

/// Reads the contents of a file into a String
fn read_file(filename: PathBuf) -> Result<String> {
    info!("Reading file: {:?}", filename);
    let file = File::open(&filename).context(format!("Failed to open file {:?}", filename))?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();

    let bytes = reader
        .read_to_end(&mut buf)
        .context(format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", bytes, filename);

    String::from_utf8(buf).context(format!("File {:?} is not valid UTF-8", filename))
}

fn init_logger() -> Result<()> {
    let log_file = File::create("scheme.log").context("Failed to create scheme.log")?;

    Builder::new()
        .format(|buf, record| {
            // Strip 'scheme_interpreter::' from module path
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("scheme_interpreter::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug) // Default to Debug, override with RUST_LOG
        .parse_default_env()
        .init();

    info!("Logger initialized, writing to scheme.log");
    Ok(())
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    if args.log {
        init_logger()?;
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    match args.commands.unwrap_or(Commands::Repl) {
        Commands::Tokenize { filename, json } => match filename {
            Some(filename) => {
                info!("Running Tokenize subcommand");
                let src = read_file(filename)?;
                let mut tokenized = true;

                for token in Scanner::new(&src) {
                    match token {
                        Ok(token) => {
                            if json {
                                println!("{}", serde_json::to_string(&token)?);
                            } else {
                                println!("{}", token);
                            }
                        }

                        Err(e) => {
                            tokenized = false;
                            debug!("Tokenization debug: {}", e);
                            eprintln!("{}", e);
                        }
                    }
                }

                if !tokenized {
                    debug!("Tokenization failed, exiting with code 65");
                    std::process::exit(65);
                }

                info!("Tokenization completed successfully");
            }

            None => {
                println!("No input filepath was provided. Exiting...");
                std::process::exit(0);
            }
        },

        Commands::Parse { filename, json } => match filename {
            Some(filename) => {
                info!("Running Parse subcommand");
                let src = read_file(filename)?;

                let tokens = match tokenize(&src) {
                    Ok(tokens) => tokens,
                    Err(e) => {
                        eprintln!("{}", e);
                        std::process::exit(65);
                    }
                };

                for datum in Reader::new(&tokens) {
                    match datum {
                        Ok(datum) => {
                            if json {
                                println!("{}", serde_json::to_string(&datum)?);
                            } else {
                                println!("{}", datum);
                            }
                        }

                        Err(e) => {
                            debug!("Parse debug: {}", e);
                            eprintln!("{}", e);
                            std::process::exit(65);
                        }
                    }
                }

                info!("Parse subcommand completed");
            }

            None => {
                println!("No input filepath was provided. Exiting...");
                std::process::exit(0);
            }
        },

        Commands::Run { filename } => match filename {
            Some(filename) => {
                info!("Running Run subcommand");
                let src = read_file(filename)?;
                let mut repl = Repl::new(io::stdout().lock());

                match repl.run_source(&src) {
                    Ok(Flow::Terminate) => info!("Program exited"),
                    Ok(Flow::Continue) => info!("Program executed successfully"),
                    Err(e) => {
                        debug!("Read debug: {}", e);
                        eprintln!("{}", e);
                        std::process::exit(65);
                    }
                }
            }

            None => {
                println!("No input filepath was provided. Exiting...");
                std::process::exit(0);
            }
        },

        Commands::Repl => {
            info!("Running REPL");
            let stdin = io::stdin();
            let prompt = stdin.is_terminal();
            let mut repl = Repl::new(io::stdout().lock());

            repl.run_interactive(stdin.lock(), prompt)
                .context("REPL terminated with an I/O error")?;
        }
    }

    Ok(())
}
