//! Media playback support
//!
//! - Deep links that hand a resource over to a native player app
//! - The adapter owning the in-page player for the media preview

mod error;
pub mod lifecycle;
pub mod links;

pub use error::{CatalogError, Result};
pub use lifecycle::{
    LinkResolver, MediaPlayer, MountRequest, Navigation, PlaybackAdapter, PlaybackSource, PlayerEvent,
    PlayerFactory, SubtitleTrack, SUBTITLE_EXTENSIONS,
};
pub use links::{build_link, substitute, ExternalLink, ExternalPlayerScheme, PlayerCatalog};
