//! Platform-agnostic media output trait
//!
//! Abstracts the two playback elements the engine drives: the looping
//! background-music handle and the element showing the current video.

use crate::error::Result;

/// Platform media element (audio handle, video element, native player)
///
/// The engine only issues commands; decoding and rendering stay on the
/// platform side. Calls are idempotent from the engine's point of view.
pub trait MediaOutput {
    /// Bind the element to a source
    ///
    /// # Arguments
    /// * `url` - Source locator
    /// * `looping` - Restart from the beginning when the source ends
    fn load(&mut self, url: &str, looping: bool) -> Result<()>;

    /// Start or resume playback
    ///
    /// May be refused by the platform (autoplay policy, broken source).
    fn play(&mut self) -> Result<()>;

    /// Pause playback, keeping the position
    fn pause(&mut self);

    /// Move the position back to the start
    fn rewind(&mut self) -> Result<()>;

    /// Set linear output volume in [0, 1]
    fn set_volume(&mut self, volume: f32);

    /// Silence or unsilence the element without touching its volume
    fn set_muted(&mut self, muted: bool);
}

/// Output that records every command, for tests
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct RecordingOutput {
    /// Commands in the order received
    pub log: std::rc::Rc<std::cell::RefCell<Vec<String>>>,
}

#[cfg(test)]
impl RecordingOutput {
    pub fn calls(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    pub fn last(&self, prefix: &str) -> Option<String> {
        self.log
            .borrow()
            .iter()
            .rev()
            .find(|c| c.starts_with(prefix))
            .cloned()
    }
}

#[cfg(test)]
impl MediaOutput for RecordingOutput {
    fn load(&mut self, url: &str, looping: bool) -> Result<()> {
        self.log.borrow_mut().push(format!("load {} {}", url, looping));
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.log.borrow_mut().push("play".to_string());
        Ok(())
    }

    fn pause(&mut self) {
        self.log.borrow_mut().push("pause".to_string());
    }

    fn rewind(&mut self) -> Result<()> {
        self.log.borrow_mut().push("rewind".to_string());
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        self.log.borrow_mut().push(format!("volume {:.2}", volume));
    }

    fn set_muted(&mut self, muted: bool) {
        self.log.borrow_mut().push(format!("muted {}", muted));
    }
}
