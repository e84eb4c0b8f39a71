use std::{io, path::PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tools::{analyze::coincidence::DEFAULT_MAX_KEY_LENGTH, encode::keyword::Keyword};
use tracing_subscriber::EnvFilter;
use vigenere::{
    console::{Console, Destination, Kind},
    files::read_text,
};

/// Vigenere cipher: encrypt with a known keyword, or break a ciphertext with frequency analysis.
///
/// Without a subcommand an interactive menu is shown.
#[derive(Parser)]
#[command(name = "vigenere", version, long_about = None)]
struct Cli {
    /// Do not print the title banner
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a plaintext file with a keyword
    Encrypt {
        /// Plaintext file (".txt" is appended if there is no extension)
        #[arg(short, long)]
        input: PathBuf,

        /// Keyword, only its letters are used
        #[arg(short, long)]
        keyword: Keyword,

        /// Write the ciphertext to this file instead of the screen
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Recover the keyword of a ciphertext file and decrypt it interactively
    Decrypt {
        /// Ciphertext file (".txt" is appended if there is no extension)
        #[arg(short, long)]
        input: PathBuf,

        /// Key length to use, asked for after the diagnostics if missing
        #[arg(short = 'l', long)]
        key_length: Option<usize>,

        /// Largest key length in the index of coincidence table
        #[arg(short, long, default_value_t = DEFAULT_MAX_KEY_LENGTH)]
        max_key_length: usize,

        /// Write the plaintext to this file instead of the screen
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Only print the key length diagnostics of a ciphertext file
    Analyze {
        /// Ciphertext file (".txt" is appended if there is no extension)
        #[arg(short, long)]
        input: PathBuf,

        /// Largest key length in the index of coincidence table
        #[arg(short, long, default_value_t = DEFAULT_MAX_KEY_LENGTH)]
        max_key_length: usize,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn destination(output: Option<PathBuf>) -> Destination {
    output.map_or(Destination::Screen, Destination::File)
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let stdout = io::stdout();
    let mut console = Console::new(io::stdin().lock(), stdout.lock());
    if !cli.quiet {
        console.banner()?;
    }

    match cli.command {
        None => console.menu(DEFAULT_MAX_KEY_LENGTH)?,
        Some(Commands::Encrypt {
            input,
            keyword,
            output,
        }) => {
            let plaintext = read_text(&input)?;
            let ciphertext = console.encrypt(&plaintext, &keyword)?;
            console.emit(&ciphertext, Kind::Ciphertext, &destination(output))?;
        }
        Some(Commands::Decrypt {
            input,
            key_length,
            max_key_length,
            output,
        }) => {
            let ciphertext = read_text(&input)?;
            let (keyword, plaintext) = console.decrypt(&ciphertext, key_length, max_key_length)?;
            console.say(format_args!("\nFinal keyword: {keyword}"))?;
            console.emit(&plaintext, Kind::Plaintext, &destination(output))?;
        }
        Some(Commands::Analyze {
            input,
            max_key_length,
        }) => {
            let ciphertext = read_text(&input)?;
            console.show_diagnostics(&ciphertext, max_key_length)?;
        }
    }
    Ok(())
}
