//! CLI module - Command-line interface for AnimeChains
//!
//! Running without a subcommand performs the export.

mod commands;

use crate::domain::ChainId;
use crate::models::chain::{ChainField, ChainFilter, ChainPatch, NewChain};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// AnimeChains - anime identifier chains across Shikimori, AnimeGo,
/// MyAnimeList, Kinopoisk and IMDb
#[derive(Parser)]
#[command(name = "animechains")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file to use instead of the default lookup
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the lookup JSON files and README (default)
    Export,

    /// Insert a new chain
    #[command(alias = "a")]
    Add {
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Show the first chain matching a filter
    #[command(alias = "get")]
    Show {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List all chains matching a filter
    #[command(alias = "ls", alias = "l")]
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Overwrite fields of an existing chain
    #[command(alias = "u")]
    Update {
        /// Chain ID
        id: i32,

        #[command(flatten)]
        fields: FieldArgs,

        /// Set a field to NULL (repeatable)
        #[arg(long, value_name = "FIELD")]
        clear: Vec<ChainField>,
    },

    /// Show the totals an export would report, without writing files
    Stats,

    /// Create default config file
    Init,
}

/// One flag per catalog column.
#[derive(Args, Debug, Clone, Default)]
pub struct FieldArgs {
    /// Shikimori id
    #[arg(long)]
    pub shikimori_id: Option<String>,

    /// AnimeGo page URL
    #[arg(long)]
    pub animego_url: Option<String>,

    /// MyAnimeList id
    #[arg(long)]
    pub mal_id: Option<String>,

    /// Kinopoisk id
    #[arg(long)]
    pub kinopoisk_id: Option<String>,

    /// IMDb id
    #[arg(long)]
    pub imdb_id: Option<String>,
}

impl FieldArgs {
    /// Flags that were given, in column order.
    pub fn given(&self) -> impl Iterator<Item = (ChainField, &str)> {
        [
            (ChainField::ShikimoriId, &self.shikimori_id),
            (ChainField::AnimegoUrl, &self.animego_url),
            (ChainField::MalId, &self.mal_id),
            (ChainField::KinopoiskId, &self.kinopoisk_id),
            (ChainField::ImdbId, &self.imdb_id),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
    }

    #[must_use]
    pub fn to_new_chain(&self) -> NewChain {
        NewChain {
            shikimori_id: self.shikimori_id.clone(),
            animego_url: self.animego_url.clone(),
            mal_id: self.mal_id.clone(),
            kinopoisk_id: self.kinopoisk_id.clone(),
            imdb_id: self.imdb_id.clone(),
        }
    }

    #[must_use]
    pub fn to_patch(&self, clear: &[ChainField]) -> ChainPatch {
        let patch = self
            .given()
            .fold(ChainPatch::new(), |patch, (field, value)| patch.set(field, value));
        clear.iter().fold(patch, |patch, field| patch.clear(*field))
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Match on chain ID
    #[arg(long)]
    pub id: Option<i32>,

    #[command(flatten)]
    pub fields: FieldArgs,

    /// Match rows where FIELD is NULL (repeatable)
    #[arg(long = "null", value_name = "FIELD")]
    pub null: Vec<ChainField>,
}

impl FilterArgs {
    #[must_use]
    pub fn to_filter(&self) -> ChainFilter {
        let mut filter = self
            .fields
            .given()
            .fold(ChainFilter::all(), |filter, (field, value)| filter.field_eq(field, value));
        if let Some(id) = self.id {
            filter = filter.id(ChainId::new(id));
        }
        self.null
            .iter()
            .fold(filter, |filter, field| filter.is_null(*field))
    }
}

pub use commands::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_export() {
        let cli = Cli::try_parse_from(["animechains"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn update_builds_typed_patch() {
        let cli = Cli::try_parse_from([
            "animechains",
            "update",
            "3",
            "--kinopoisk-id",
            "9",
            "--clear",
            "imdb_id",
        ])
        .unwrap();

        let Some(Commands::Update { id, fields, clear }) = cli.command else {
            panic!("expected update command");
        };
        assert_eq!(id, 3);
        assert_eq!(
            fields.to_patch(&clear),
            ChainPatch::new()
                .set(ChainField::KinopoiskId, "9")
                .clear(ChainField::ImdbId)
        );
    }

    #[test]
    fn unknown_field_is_rejected() {
        let res = Cli::try_parse_from(["animechains", "update", "3", "--clear", "title"]);
        assert!(res.is_err());
    }

    #[test]
    fn list_builds_filter() {
        let cli = Cli::try_parse_from([
            "animechains",
            "--config",
            "other.toml",
            "list",
            "--shikimori-id",
            "5",
            "--null",
            "animego_url",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("other.toml")));
        let Some(Commands::List { filter }) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(
            filter.to_filter(),
            ChainFilter::all()
                .field_eq(ChainField::ShikimoriId, "5")
                .is_null(ChainField::AnimegoUrl)
        );
    }
}
