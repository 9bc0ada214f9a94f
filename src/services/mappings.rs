//! Lookup tables derived from the stored chains.
//!
//! Both mappings are plain `BTreeMap`s so iteration, and therefore the JSON
//! output, is always in ascending key order.

use crate::config::DuplicatePolicy;
use crate::models::chain::{Chain, ChainField};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// The two lookup tables the export produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingKind {
    /// Shikimori id to AnimeGo page URL.
    Shikimori2Animego,
    /// Kinopoisk id to Shikimori id.
    Kinopoisk2Shikimori,
}

impl MappingKind {
    pub const ALL: [Self; 2] = [Self::Shikimori2Animego, Self::Kinopoisk2Shikimori];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Shikimori2Animego => "shikimori2animego",
            Self::Kinopoisk2Shikimori => "kinopoisk2shikimori",
        }
    }

    #[must_use]
    pub const fn key_field(self) -> ChainField {
        match self {
            Self::Shikimori2Animego => ChainField::ShikimoriId,
            Self::Kinopoisk2Shikimori => ChainField::KinopoiskId,
        }
    }

    #[must_use]
    pub const fn value_field(self) -> ChainField {
        match self {
            Self::Shikimori2Animego => ChainField::AnimegoUrl,
            Self::Kinopoisk2Shikimori => ChainField::ShikimoriId,
        }
    }

    /// The (key, value) pair this chain contributes, if both halves are known.
    #[must_use]
    pub fn pair(self, chain: &Chain) -> Option<(&str, &str)> {
        Some((chain.known(self.key_field())?, chain.known(self.value_field())?))
    }
}

impl fmt::Display for MappingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Duplicate key '{key}' in {mapping}: '{existing}' conflicts with '{incoming}'")]
pub struct DuplicateKey {
    pub mapping: MappingKind,
    pub key: String,
    pub existing: String,
    pub incoming: String,
}

pub type Mapping = BTreeMap<String, String>;

/// Builds one mapping from chains in storage order.
///
/// A repeated key with an identical value is never a conflict.
pub fn build_mapping(
    kind: MappingKind,
    chains: &[Chain],
    policy: DuplicatePolicy,
) -> Result<Mapping, DuplicateKey> {
    let mut mapping = Mapping::new();

    for chain in chains {
        let Some((key, value)) = kind.pair(chain) else {
            continue;
        };

        match mapping.entry(key.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(value.to_string());
            }
            Entry::Occupied(mut slot) => {
                if slot.get() == value {
                    continue;
                }
                debug!(
                    mapping = kind.name(),
                    key,
                    existing = slot.get().as_str(),
                    incoming = value,
                    chain_id = %chain.chain_id,
                    "Duplicate mapping key"
                );
                match policy {
                    DuplicatePolicy::LastWriteWins => {
                        slot.insert(value.to_string());
                    }
                    DuplicatePolicy::FirstWriteWins => {}
                    DuplicatePolicy::Reject => {
                        return Err(DuplicateKey {
                            mapping: kind,
                            key: key.to_string(),
                            existing: slot.get().clone(),
                            incoming: value.to_string(),
                        });
                    }
                }
            }
        }
    }

    Ok(mapping)
}

/// Everything the export writes, computed in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainMappings {
    pub total_chains: usize,
    pub shikimori2animego: Mapping,
    pub kinopoisk2shikimori: Mapping,
}

impl ChainMappings {
    pub fn from_chains(chains: &[Chain], policy: DuplicatePolicy) -> Result<Self, DuplicateKey> {
        Ok(Self {
            total_chains: chains.len(),
            shikimori2animego: build_mapping(MappingKind::Shikimori2Animego, chains, policy)?,
            kinopoisk2shikimori: build_mapping(MappingKind::Kinopoisk2Shikimori, chains, policy)?,
        })
    }

    #[must_use]
    pub const fn get(&self, kind: MappingKind) -> &Mapping {
        match kind {
            MappingKind::Shikimori2Animego => &self.shikimori2animego,
            MappingKind::Kinopoisk2Shikimori => &self.kinopoisk2shikimori,
        }
    }

    #[must_use]
    pub fn summary(&self) -> ExportSummary {
        ExportSummary {
            total_chains: self.total_chains,
            shikimori2animego: self.shikimori2animego.len(),
            kinopoisk2shikimori: self.kinopoisk2shikimori.len(),
        }
    }
}

/// Totals reported in the README.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub total_chains: usize,
    pub shikimori2animego: usize,
    pub kinopoisk2shikimori: usize,
}

impl ExportSummary {
    #[must_use]
    pub fn render_markdown(&self) -> String {
        format!(
            "# AnimeChains\n\n\
             Total chains: {}\n\
             Total shikimori2animego chains: {}\n\
             Total kinopoisk2shikimori chains: {}\n",
            self.total_chains, self.shikimori2animego, self.kinopoisk2shikimori
        )
    }
}
