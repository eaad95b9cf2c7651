//! In-memory series catalog
//!
//! A simple `EpisodeSource` backed by a list of series, loadable from the
//! JSON document the series editor produces.

use std::path::Path;

use tracing::debug;

use crate::error::{ReelError, Result};
use crate::traits::EpisodeSource;
use crate::types::{Episode, Series, SeriesId};

/// Series catalog held in memory
#[derive(Debug, Clone, Default)]
pub struct SeriesCatalog {
    series: Vec<Series>,
}

impl SeriesCatalog {
    /// Create a catalog from a list of series
    pub fn new(series: Vec<Series>) -> Self {
        Self { series }
    }

    /// Parse a catalog from JSON (an array of series)
    pub fn from_json(json: &str) -> Result<Self> {
        let series: Vec<Series> = serde_json::from_str(json)?;
        Ok(Self::new(series))
    }

    /// Load a catalog from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        debug!(
            "Loaded catalog from {} ({} series)",
            path.display(),
            catalog.series.len()
        );
        Ok(catalog)
    }

    /// Look up a series
    pub fn series(&self, series_id: &SeriesId) -> Result<&Series> {
        self.series
            .iter()
            .find(|s| &s.id == series_id)
            .ok_or_else(|| ReelError::SeriesNotFound(series_id.clone()))
    }

    /// All series in the catalog
    pub fn all(&self) -> &[Series] {
        &self.series
    }
}

impl EpisodeSource for SeriesCatalog {
    fn get_episode(&self, series_id: &SeriesId, episode_index: usize) -> Result<Episode> {
        self.series(series_id)?
            .episodes
            .get(episode_index)
            .cloned()
            .ok_or_else(|| ReelError::EpisodeNotFound {
                series_id: series_id.clone(),
                index: episode_index,
            })
    }

    fn get_total_episodes(&self, series_id: &SeriesId) -> Result<usize> {
        Ok(self.series(series_id)?.episodes.len())
    }
}
