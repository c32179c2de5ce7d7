//! playback-state: what the device is playing, as far as we can tell
//!
//! The controller reports device state as a loose `key: value` dump; [`parse_status`]
//! scrapes it into a [`PlaybackInfo`] without ever failing. The controller cannot say
//! *which* station or favorite is playing, so [`SourceTracker`] remembers what we
//! last started and patches it into the record.

mod types;
pub use types::{PlaybackInfo, PlayerState, SourceKind, SourceState};

mod parser;
pub use parser::{parse_status, NOTHING_PLAYING};

mod tracker;
pub use tracker::SourceTracker;

mod catalog;
pub use catalog::{load_catalog_file, Catalog, Catalogs};
