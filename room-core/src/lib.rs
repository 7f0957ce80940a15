//! Engine behind the scroll-scrubbed video room.
//!
//! Everything here is single-threaded and clock-free: callers pass `now_ms`
//! into each operation and call [`room::Room::tick`] to let timers fire.
//! The browser shell supplies the media element, the scroll container and
//! the position store through the traits in [`media`], [`sampler`] and
//! [`store`].

pub mod types;
pub mod config;
pub mod catalog;
pub mod content;
pub mod store;
pub mod tween;
pub mod sampler;
pub mod media;
pub mod parallax;
pub mod overlay;
pub mod navigation;
pub mod idle;
pub mod room;

pub use catalog::{Catalog, HighlightPoint, NavigationPoint};
pub use config::{MappingPolicy, RoomConfig, ScrollDirection};
pub use idle::HintChange;
pub use media::MediaResource;
pub use navigation::NavigateOutcome;
pub use overlay::{OverlayEvent, OverlayPhase};
pub use room::{Modal, Room, RoomEvent};
pub use sampler::ScrollProvider;
pub use store::{MemoryStore, PositionStore, StoreError};
pub use types::{Point2, Position, ProgressRange, Rect, ScrollBehavior};
