#![forbid(unsafe_code)]

//! Domain logic for the folio portfolio application.
//!
//! Everything here is headless: state machines, stores, and formatting with
//! no terminal or network dependencies. The binary crate wires these pieces
//! to the runtime; tests drive them directly.
//!
//! - [`store`] — injected profile key/value storage (memory + JSON file).
//! - [`visit`] — first-visit gating and the loading sequence phases.
//! - [`progress`] — the randomized progress walk.
//! - [`catalog`] — the fixed project catalog with its visible cursor.
//! - [`composer`] — contact form state and the outbound messaging URL.
//! - [`geo`] — cached location resolution with a static fallback.

pub mod catalog;
pub mod composer;
pub mod geo;
pub mod progress;
pub mod store;
pub mod visit;

pub use catalog::{CatalogStore, ProjectRecord};
pub use composer::ContactForm;
pub use geo::{GeoError, GeoReply, LocationProvider};
pub use progress::ProgressWalk;
pub use store::{JsonFileStore, MemoryStore, ProfileStore, StoreError, StoreResult};
pub use visit::{LoadPhase, LoadSequence};
