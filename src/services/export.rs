use crate::config::ExportConfig;
use crate::db::{ChainError, Store};
use crate::services::mappings::{ChainMappings, DuplicateKey, ExportSummary, Mapping, MappingKind};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Store(#[from] ChainError),

    #[error(transparent)]
    DuplicateKey(#[from] DuplicateKey),

    #[error("Failed to serialize {mapping}: {source}")]
    Serialize {
        mapping: MappingKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Serializes a mapping as an indented JSON object.
///
/// Keys come out in ascending order and non-ASCII text is written as-is.
/// No trailing newline is appended.
pub fn render_json(mapping: &Mapping, indent: usize) -> Result<Vec<u8>, serde_json::Error> {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    mapping.serialize(&mut ser)?;
    Ok(buf)
}

/// Result of a finished export.
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub summary: ExportSummary,
    /// Written files, in write order.
    pub files: Vec<PathBuf>,
}

/// One-shot export of the chains table to lookup files and a README.
///
/// Runs strictly in sequence: fetch, derive, serialize, then write. Nothing
/// is written if fetching or serializing fails. A failed write leaves the
/// files written before it in place.
pub struct ExportJob {
    store: Store,
    config: ExportConfig,
}

impl ExportJob {
    #[must_use]
    pub const fn new(store: Store, config: ExportConfig) -> Self {
        Self { store, config }
    }

    /// Fetches every chain and derives both mappings without touching disk.
    pub async fn collect(&self) -> Result<ChainMappings, ExportError> {
        let chains = self.store.list_all_chains().await?;
        info!(count = chains.len(), "Loaded chains");

        let mappings = ChainMappings::from_chains(&chains, self.config.duplicate_policy)?;
        Ok(mappings)
    }

    pub async fn run(&self) -> Result<ExportReport, ExportError> {
        let mappings = self.collect().await?;
        let outputs = self.render(&mappings)?;

        if self.config.create_output_dir {
            let dir = Path::new(&self.config.output_dir);
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|source| ExportError::Write {
                    path: dir.to_path_buf(),
                    source,
                })?;
        }

        let mut files = Vec::with_capacity(outputs.len());
        for (path, contents) in outputs {
            tokio::fs::write(&path, &contents)
                .await
                .map_err(|source| ExportError::Write {
                    path: path.clone(),
                    source,
                })?;
            info!(path = %path.display(), bytes = contents.len(), "Wrote export file");
            files.push(path);
        }

        let summary = mappings.summary();
        info!(
            total_chains = summary.total_chains,
            shikimori2animego = summary.shikimori2animego,
            kinopoisk2shikimori = summary.kinopoisk2shikimori,
            "Export finished"
        );

        Ok(ExportReport { summary, files })
    }

    fn render(&self, mappings: &ChainMappings) -> Result<Vec<(PathBuf, Vec<u8>)>, ExportError> {
        let mut outputs = Vec::with_capacity(MappingKind::ALL.len() + 1);

        for kind in MappingKind::ALL {
            let contents = render_json(mappings.get(kind), self.config.indent)
                .map_err(|source| ExportError::Serialize { mapping: kind, source })?;
            outputs.push((self.mapping_path(kind), contents));
        }

        outputs.push((
            PathBuf::from(&self.config.readme_path),
            mappings.summary().render_markdown().into_bytes(),
        ));

        Ok(outputs)
    }

    fn mapping_path(&self, kind: MappingKind) -> PathBuf {
        match kind {
            MappingKind::Shikimori2Animego => self.config.shikimori2animego_path(),
            MappingKind::Kinopoisk2Shikimori => self.config.kinopoisk2shikimori_path(),
        }
    }
}
