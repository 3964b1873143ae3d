//! Command line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use novalib::{BookId, Intent};

/// NovaLib - track which library books are on the shelf
#[derive(Parser, Debug)]
#[command(name = "novalib", version, about = "Track library books and their circulation status")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the inventory (overrides storage.data_dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a book; it starts out Available
    Add {
        title: String,
        author: String,
    },

    /// Flip a book between Available and Issued
    Toggle {
        #[arg(value_parser = parse_id, allow_hyphen_values = true)]
        id: String,
    },

    /// Delete a book
    Remove {
        #[arg(value_parser = parse_id, allow_hyphen_values = true)]
        id: String,
    },

    /// Show the counts and the books whose title matches
    List {
        /// Case-insensitive title substring
        #[arg(short, long, default_value = "")]
        search: String,

        /// Print the view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show total, available, and issued counts
    Stats,
}

impl Command {
    /// Intents this command feeds into the session, in order. `resolve` maps
    /// typed id text onto a stored id.
    pub fn intents(&self, resolve: impl Fn(&str) -> BookId) -> Vec<Intent> {
        match self {
            Command::Add { title, author } => vec![Intent::Add {
                title: title.clone(),
                author: author.clone(),
            }],
            Command::Toggle { id } => vec![Intent::ToggleStatus(resolve(id))],
            Command::Remove { id } => vec![Intent::Remove(resolve(id))],
            Command::List { search, .. } => vec![Intent::SetSearchText(search.clone())],
            Command::Stats => Vec::new(),
        }
    }
}

fn parse_id(raw: &str) -> Result<String, String> {
    if raw.is_empty() {
        return Err("id must not be empty".to_string());
    }
    Ok(raw.to_string())
}
