//! Navigation requests handed to the routing collaborator

use serde::{Deserialize, Serialize};
use std::fmt;

use super::SeriesId;

/// A request for the navigation collaborator
///
/// The player never navigates itself; it only emits one of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavigationRequest {
    /// Open the player on another episode of the series
    Episode {
        /// Target series
        series_id: SeriesId,
        /// Zero-based episode index
        index: usize,
    },

    /// Return to the series overview page
    SeriesOverview {
        /// Target series
        series_id: SeriesId,
    },

    /// Open the series editor (used from the "no media" screen)
    EditSeries {
        /// Target series
        series_id: SeriesId,
    },
}

impl NavigationRequest {
    /// Series the request refers to
    pub fn series_id(&self) -> &SeriesId {
        match self {
            Self::Episode { series_id, .. }
            | Self::SeriesOverview { series_id }
            | Self::EditSeries { series_id } => series_id,
        }
    }
}

impl fmt::Display for NavigationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Episode { series_id, index } => {
                write!(f, "/series/{}/player/{}", series_id, index)
            }
            Self::SeriesOverview { series_id } => write!(f, "/series/{}", series_id),
            Self::EditSeries { series_id } => write!(f, "/series/{}/edit", series_id),
        }
    }
}
