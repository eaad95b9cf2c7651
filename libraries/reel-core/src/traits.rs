//! Collaborator traits for Reel
//!
//! The player consumes episodes from a data service and hands navigation
//! requests to a router. Both live outside the playback engine.

use crate::error::Result;
use crate::types::{Episode, NavigationRequest, SeriesId};

/// Data service that supplies episodes
///
/// Implementations: `SeriesCatalog` (in-memory / JSON file), HTTP clients, etc.
pub trait EpisodeSource {
    /// Fetch one episode of a series
    ///
    /// # Errors
    /// Returns an error if the series or episode does not exist or the fetch fails
    fn get_episode(&self, series_id: &SeriesId, episode_index: usize) -> Result<Episode>;

    /// Number of episodes in a series
    ///
    /// # Errors
    /// Returns an error if the series does not exist or the fetch fails
    fn get_total_episodes(&self, series_id: &SeriesId) -> Result<usize>;
}

/// Routing collaborator that acts on navigation requests
pub trait Navigator {
    /// Perform (or enqueue) a navigation
    fn navigate(&mut self, request: NavigationRequest);

    /// Open another episode of the series
    fn go_to_episode(&mut self, series_id: &SeriesId, index: usize) {
        self.navigate(NavigationRequest::Episode {
            series_id: series_id.clone(),
            index,
        });
    }

    /// Return to the series overview
    fn go_to_series_overview(&mut self, series_id: &SeriesId) {
        self.navigate(NavigationRequest::SeriesOverview {
            series_id: series_id.clone(),
        });
    }

    /// Open the series editor
    fn go_to_edit_series(&mut self, series_id: &SeriesId) {
        self.navigate(NavigationRequest::EditSeries {
            series_id: series_id.clone(),
        });
    }
}

/// Collects requests in order; handy for hosts that route after the fact
impl Navigator for Vec<NavigationRequest> {
    fn navigate(&mut self, request: NavigationRequest) {
        self.push(request);
    }
}
