//! Testing utilities for peekr
//!
//! This module provides fixtures for writing tests, including a
//! `RecordingFactory` that logs every player it creates and releases.
//!
//! Only available when compiled with `cfg(test)`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::player::{MediaPlayer, PlaybackSource, PlayerFactory};
use crate::preview::RendererBinding;
use crate::resource::{MediaType, ResourceDescriptor};

/// Resource on the `local` provider
#[must_use]
pub fn resource(name: &str, media_type: MediaType) -> ResourceDescriptor {
    ResourceDescriptor::new(name, media_type, "local")
}

/// Binding labels, in order
#[must_use]
pub fn names(bindings: &[RendererBinding]) -> Vec<&str> {
    bindings.iter().map(|b| b.name.as_str()).collect()
}

/// Link resolver that makes proxied URLs easy to recognise in assertions
#[must_use]
pub fn proxy_link(resource: &ResourceDescriptor) -> String {
    format!("proxy://{}", resource.name)
}

#[derive(Debug, Default)]
struct Recording {
    log: Vec<String>,
    live: usize,
}

/// Player factory that records `create <title>` / `release <title>` lines
///
/// Clones share the same log, so a test can keep one clone and hand the
/// other to the adapter.
#[derive(Debug, Clone, Default)]
pub struct RecordingFactory {
    state: Rc<RefCell<Recording>>,
}

impl RecordingFactory {
    #[must_use]
    pub fn log(&self) -> Vec<String> {
        self.state.borrow().log.clone()
    }

    /// Players created and not yet released
    #[must_use]
    pub fn live(&self) -> usize {
        self.state.borrow().live
    }
}

impl PlayerFactory for RecordingFactory {
    type Player = RecordingPlayer;

    fn create(&mut self, source: &PlaybackSource) -> RecordingPlayer {
        let mut state = self.state.borrow_mut();
        state.log.push(format!("create {}", source.title));
        state.live += 1;
        RecordingPlayer {
            title: source.title.clone(),
            state: Rc::clone(&self.state),
            released: false,
        }
    }
}

/// Player handed out by `RecordingFactory`
#[derive(Debug)]
pub struct RecordingPlayer {
    title: String,
    state: Rc<RefCell<Recording>>,
    released: bool,
}

impl MediaPlayer for RecordingPlayer {
    fn release(&mut self) {
        assert!(!self.released, "player {} released twice", self.title);
        self.released = true;
        let mut state = self.state.borrow_mut();
        state.log.push(format!("release {}", self.title));
        state.live -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_factory_shares_log_between_clones() {
        let factory = RecordingFactory::default();
        let mut handle = factory.clone();
        let source = PlaybackSource {
            url: "u".into(),
            title: "t.mp4".into(),
            subtitle: None,
            autoplay: false,
        };
        let mut player = handle.create(&source);
        assert_eq!(factory.live(), 1);
        player.release();
        assert_eq!(factory.log(), ["create t.mp4", "release t.mp4"]);
        assert_eq!(factory.live(), 0);
    }
}
