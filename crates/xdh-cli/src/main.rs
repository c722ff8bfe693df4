use clap::{Parser, Subcommand};

mod derive;
mod dh_demo;
mod genpkey;
mod hexstr;
mod pkey;

/// Command-line driver for X25519/X448 key agreement.
#[derive(Parser)]
#[command(name = "xdh")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a private key.
    Genpkey {
        /// Algorithm (x25519, x448).
        #[arg(short, long, default_value = "x25519")]
        algorithm: String,
        /// Output file (defaults to stdout).
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the public key of a private key.
    Pkey {
        /// Input file containing a hex private key.
        #[arg(short, long)]
        input: String,
    },
    /// Derive a shared secret from a private key and a peer public key.
    Derive {
        /// File containing our hex private key.
        #[arg(long)]
        key: String,
        /// File containing the peer's hex public key.
        #[arg(long)]
        peer_key: String,
    },
    /// Run a fresh two-party key exchange end to end.
    DhDemo {
        /// Algorithm (x25519, x448).
        #[arg(short, long, default_value = "x25519")]
        algorithm: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Genpkey { algorithm, output } => genpkey::run(algorithm, output.as_deref()),
        Commands::Pkey { input } => pkey::run(input),
        Commands::Derive { key, peer_key } => derive::run(key, peer_key),
        Commands::DhDemo { algorithm } => dh_demo::run(algorithm),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
