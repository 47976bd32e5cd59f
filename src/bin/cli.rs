//! hashkv CLI Client
//!
//! Command-line interface for interacting with hashkv.

use clap::{Parser, Subcommand};
use hashkv::network::Client;

/// hashkv CLI
#[derive(Parser, Debug)]
#[command(name = "hashkv-cli")]
#[command(about = "CLI for the hashkv server")]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:6379")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Increment the integer stored in a hash field
    Hincrby {
        key: String,
        field: String,
        /// Signed amount to add
        #[arg(allow_hyphen_values = true)]
        delta: String,
    },

    /// Set a hash field
    Hset {
        key: String,
        field: String,
        value: String,
    },

    /// Get a hash field
    Hget {
        key: String,
        field: String,
    },

    /// Set a string value
    Set {
        key: String,
        value: String,
    },

    /// Delete one or more keys
    Del {
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Ping the server
    Ping,

    /// Send arbitrary command arguments as-is
    Raw {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

impl Commands {
    fn into_args(self) -> Vec<String> {
        match self {
            Commands::Hincrby { key, field, delta } => vec!["HINCRBY".into(), key, field, delta],
            Commands::Hset { key, field, value } => vec!["HSET".into(), key, field, value],
            Commands::Hget { key, field } => vec!["HGET".into(), key, field],
            Commands::Set { key, value } => vec!["SET".into(), key, value],
            Commands::Del { keys } => vec!["DEL".to_string()].into_iter().chain(keys).collect(),
            Commands::Ping => vec!["PING".into()],
            Commands::Raw { args } => args,
        }
    }
}

fn main() {
    let args = Args::parse();

    let mut client = match Client::connect(&args.server) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Could not connect to {}: {}", args.server, e);
            std::process::exit(1);
        }
    };

    match client.send_args(&args.command.into_args()) {
        Ok(reply) => {
            println!("{}", reply);
            if reply.is_error() {
                std::process::exit(2);
            }
        }
        Err(e) => {
            eprintln!("Request failed: {}", e);
            std::process::exit(1);
        }
    }
}
