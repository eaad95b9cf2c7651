//! Series type

use serde::{Deserialize, Serialize};

use super::{Episode, SeriesId};

/// A documentary series: an ordered list of episodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    /// Series identifier
    pub id: SeriesId,

    /// Display title
    pub title: String,

    /// Episodes in viewing order
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

impl Series {
    /// Create a new series
    pub fn new(id: impl Into<String>, title: impl Into<String>, episodes: Vec<Episode>) -> Self {
        Self {
            id: SeriesId::new(id),
            title: title.into(),
            episodes,
        }
    }
}
