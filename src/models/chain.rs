use crate::domain::ChainId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One anime title's identifiers across the external catalogs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    pub chain_id: ChainId,
    pub shikimori_id: Option<String>,
    pub animego_url: Option<String>,
    pub mal_id: Option<String>,
    pub kinopoisk_id: Option<String>,
    pub imdb_id: Option<String>,
}

impl Chain {
    #[must_use]
    pub fn field(&self, field: ChainField) -> Option<&str> {
        match field {
            ChainField::ShikimoriId => self.shikimori_id.as_deref(),
            ChainField::AnimegoUrl => self.animego_url.as_deref(),
            ChainField::MalId => self.mal_id.as_deref(),
            ChainField::KinopoiskId => self.kinopoisk_id.as_deref(),
            ChainField::ImdbId => self.imdb_id.as_deref(),
        }
    }

    /// Like [`Chain::field`], but an empty string counts as missing.
    #[must_use]
    pub fn known(&self, field: ChainField) -> Option<&str> {
        self.field(field).filter(|v| !v.is_empty())
    }
}

/// Field values for a chain that has not been stored yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewChain {
    pub shikimori_id: Option<String>,
    pub animego_url: Option<String>,
    pub mal_id: Option<String>,
    pub kinopoisk_id: Option<String>,
    pub imdb_id: Option<String>,
}

/// The optional catalog columns of a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainField {
    ShikimoriId,
    AnimegoUrl,
    MalId,
    KinopoiskId,
    ImdbId,
}

impl ChainField {
    pub const ALL: [Self; 5] = [
        Self::ShikimoriId,
        Self::AnimegoUrl,
        Self::MalId,
        Self::KinopoiskId,
        Self::ImdbId,
    ];

    #[must_use]
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::ShikimoriId => "shikimori_id",
            Self::AnimegoUrl => "animego_url",
            Self::MalId => "mal_id",
            Self::KinopoiskId => "kinopoisk_id",
            Self::ImdbId => "imdb_id",
        }
    }
}

impl fmt::Display for ChainField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for ChainField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|f| f.column_name() == normalized)
            .ok_or_else(|| {
                format!(
                    "unknown chain field '{s}' (expected one of: shikimori_id, animego_url, mal_id, kinopoisk_id, imdb_id)"
                )
            })
    }
}

/// Per-field slot shared by filters and patches.
///
/// `None` leaves the column out, `Some(None)` means `NULL`, `Some(Some(v))`
/// means the value `v`.
pub type FieldSlot = Option<Option<String>>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct FieldSlots {
    shikimori_id: FieldSlot,
    animego_url: FieldSlot,
    mal_id: FieldSlot,
    kinopoisk_id: FieldSlot,
    imdb_id: FieldSlot,
}

impl FieldSlots {
    fn slot(&self, field: ChainField) -> &FieldSlot {
        match field {
            ChainField::ShikimoriId => &self.shikimori_id,
            ChainField::AnimegoUrl => &self.animego_url,
            ChainField::MalId => &self.mal_id,
            ChainField::KinopoiskId => &self.kinopoisk_id,
            ChainField::ImdbId => &self.imdb_id,
        }
    }

    fn slot_mut(&mut self, field: ChainField) -> &mut FieldSlot {
        match field {
            ChainField::ShikimoriId => &mut self.shikimori_id,
            ChainField::AnimegoUrl => &mut self.animego_url,
            ChainField::MalId => &mut self.mal_id,
            ChainField::KinopoiskId => &mut self.kinopoisk_id,
            ChainField::ImdbId => &mut self.imdb_id,
        }
    }

    fn iter(&self) -> impl Iterator<Item = (ChainField, Option<&str>)> + '_ {
        ChainField::ALL
            .into_iter()
            .filter_map(|f| self.slot(f).as_ref().map(|v| (f, v.as_deref())))
    }
}

/// Exact-match filter over any subset of chain columns.
///
/// An empty filter matches every row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainFilter {
    chain_id: Option<ChainId>,
    fields: FieldSlots,
}

impl ChainFilter {
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn id(mut self, id: ChainId) -> Self {
        self.chain_id = Some(id);
        self
    }

    #[must_use]
    pub fn field_eq(mut self, field: ChainField, value: impl Into<String>) -> Self {
        *self.fields.slot_mut(field) = Some(Some(value.into()));
        self
    }

    #[must_use]
    pub fn is_null(mut self, field: ChainField) -> Self {
        *self.fields.slot_mut(field) = Some(None);
        self
    }

    #[must_use]
    pub const fn chain_id(&self) -> Option<ChainId> {
        self.chain_id
    }

    /// Constrained columns; `None` values mean "must be NULL".
    pub fn constraints(&self) -> impl Iterator<Item = (ChainField, Option<&str>)> + '_ {
        self.fields.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chain_id.is_none() && self.fields.iter().next().is_none()
    }
}

/// Typed partial update: only the fields that were set or cleared are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainPatch {
    fields: FieldSlots,
}

impl ChainPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn set(mut self, field: ChainField, value: impl Into<String>) -> Self {
        *self.fields.slot_mut(field) = Some(Some(value.into()));
        self
    }

    #[must_use]
    pub fn clear(mut self, field: ChainField) -> Self {
        *self.fields.slot_mut(field) = Some(None);
        self
    }

    /// Fields to overwrite; `None` values clear the column.
    pub fn changes(&self) -> impl Iterator<Item = (ChainField, Option<&str>)> + '_ {
        self.fields.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes().next().is_none()
    }
}
