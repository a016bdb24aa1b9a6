//! Lifecycle of the single external player bound to the media preview

use serde::Serialize;
use tracing::{debug, warn};

use super::links::{ExternalLink, PlayerCatalog};
use crate::resource::ResourceDescriptor;

/// Sibling extensions recognised as external subtitle tracks, in priority order
pub const SUBTITLE_EXTENSIONS: [&str; 3] = [".srt", ".ass", ".vtt"];

/// External subtitle file found next to the media
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubtitleTrack {
    pub url: String,
    /// Lowercase extension of the subtitle file (`srt`, `ass`, `vtt`)
    pub format: String,
}

/// Everything a player needs to start
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaybackSource {
    pub url: String,
    pub title: String,
    pub subtitle: Option<SubtitleTrack>,
    pub autoplay: bool,
}

/// Signals raised by a live player
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    /// Playback reached the end of the media
    Ended,
    /// The player could not play the media; it reports this itself
    Failed(String),
}

/// Where the host should navigate after an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Name of the sibling to open
    pub name: String,
}

/// A live external player instance
pub trait MediaPlayer {
    /// Tear the instance down. Called exactly once per instance.
    fn release(&mut self);
}

/// Creates player instances
pub trait PlayerFactory {
    type Player: MediaPlayer;

    fn create(&mut self, source: &PlaybackSource) -> Self::Player;
}

/// Resolves the URL a sibling resource is fetched from
pub trait LinkResolver {
    fn link(&self, resource: &ResourceDescriptor) -> String;
}

impl<F> LinkResolver for F
where
    F: Fn(&ResourceDescriptor) -> String,
{
    fn link(&self, resource: &ResourceDescriptor) -> String {
        self(resource)
    }
}

/// Inputs for mounting a media resource
#[derive(Debug, Clone, Copy)]
pub struct MountRequest<'a> {
    /// Resource selected for preview
    pub resource: &'a ResourceDescriptor,
    /// Direct URL of its content
    pub raw_url: &'a str,
    /// Full listing of the containing folder, in listing order
    pub siblings: &'a [ResourceDescriptor],
}

struct Mounted<P> {
    player: P,
    current: ResourceDescriptor,
    source: PlaybackSource,
    playlist: Vec<ResourceDescriptor>,
}

/// Owns at most one external player at a time
///
/// `Unmounted -> Mounted` on [`PlaybackAdapter::mount`], back to `Unmounted`
/// on [`PlaybackAdapter::unmount`] or drop. The player is released on every
/// exit path, and before any replacement is created.
pub struct PlaybackAdapter<F: PlayerFactory> {
    factory: F,
    catalog: PlayerCatalog,
    autoplay: bool,
    mounted: Option<Mounted<F::Player>>,
}

impl<F: PlayerFactory> PlaybackAdapter<F> {
    #[must_use]
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            catalog: PlayerCatalog::builtin(),
            autoplay: false,
            mounted: None,
        }
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: PlayerCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    #[must_use]
    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Source the live player was created from
    #[must_use]
    pub fn source(&self) -> Option<&PlaybackSource> {
        self.mounted.as_ref().map(|m| &m.source)
    }

    /// Resource currently bound to the player
    #[must_use]
    pub fn current(&self) -> Option<&ResourceDescriptor> {
        self.mounted.as_ref().map(|m| &m.current)
    }

    /// Same-type siblings offered in the selector, or just the current
    /// resource when the listing has none
    #[must_use]
    pub fn playlist(&self) -> &[ResourceDescriptor] {
        self.mounted
            .as_ref()
            .map(|m| m.playlist.as_slice())
            .unwrap_or_default()
    }

    /// Acquire a player for `request.resource`, releasing any previous one first
    pub fn mount(&mut self, request: MountRequest<'_>, links: &dyn LinkResolver) -> &PlaybackSource {
        self.unmount();

        let source = PlaybackSource {
            url: request.raw_url.to_string(),
            title: request.resource.name.clone(),
            subtitle: find_subtitle(request.siblings).map(|sub| SubtitleTrack {
                url: links.link(sub),
                format: sub.extension(),
            }),
            autoplay: self.autoplay,
        };
        let player = self.factory.create(&source);
        debug!(name = %source.title, subtitle = source.subtitle.is_some(), "player mounted");

        let mut playlist: Vec<ResourceDescriptor> = request
            .siblings
            .iter()
            .filter(|s| s.media_type == request.resource.media_type)
            .cloned()
            .collect();
        if playlist.is_empty() {
            playlist.push(request.resource.clone());
        }

        let mounted = self.mounted.insert(Mounted {
            player,
            current: request.resource.clone(),
            source,
            playlist,
        });
        &mounted.source
    }

    /// Release the player if one is live. Idempotent.
    pub fn unmount(&mut self) {
        if let Some(mut mounted) = self.mounted.take() {
            mounted.player.release();
            debug!(name = %mounted.current.name, "player released");
        }
    }

    /// Feed a player event. Returns where to navigate, if anywhere.
    pub fn handle(&mut self, event: PlayerEvent) -> Option<Navigation> {
        let mounted = self.mounted.as_ref()?;
        match event {
            PlayerEvent::Ended => {
                let next = next_in_playlist(&mounted.playlist, &mounted.current.name)?;
                debug!(from = %mounted.current.name, to = %next.name, "auto-advance");
                Some(Navigation {
                    name: next.name.clone(),
                })
            }
            PlayerEvent::Failed(reason) => {
                warn!(name = %mounted.current.name, %reason, "player failed");
                None
            }
        }
    }

    /// Deep links into external players for the mounted resource
    #[must_use]
    pub fn external_links(&self) -> Vec<ExternalLink> {
        self.mounted
            .as_ref()
            .map(|m| self.catalog.links(&m.source.url, &m.current.name))
            .unwrap_or_default()
    }
}

impl<F: PlayerFactory> Drop for PlaybackAdapter<F> {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// First sibling whose name ends with a subtitle extension
fn find_subtitle(siblings: &[ResourceDescriptor]) -> Option<&ResourceDescriptor> {
    siblings
        .iter()
        .find(|s| SUBTITLE_EXTENSIONS.iter().any(|ext| s.name.ends_with(ext)))
}

/// Element after `current`; a resource missing from the list advances to the first entry
fn next_in_playlist<'a>(playlist: &'a [ResourceDescriptor], current: &str) -> Option<&'a ResourceDescriptor> {
    let next = playlist
        .iter()
        .position(|r| r.name == current)
        .map_or(0, |i| i + 1);
    playlist.get(next)
}
