#![forbid(unsafe_code)]

//! Minimal Elm-style runtime for the folio terminal application.
//!
//! - [`program`] — the update/view loop, commands, and terminal session.
//! - [`event`] — input events and key/mouse predicates.
//! - [`frame`] — cell grid, geometry, and styling.
//! - [`subscription`] — declarative interval timers with structured teardown.
//! - [`animation`] — easing, fades, and declarative transition timelines.

pub mod animation;
pub mod event;
pub mod frame;
pub mod program;
pub mod subscription;

pub use animation::{Animation, Fade, Timeline, Transition};
pub use event::Event;
pub use frame::{Cell, Color, Frame, Rect, Style};
pub use program::{Cmd, Model, Program, ProgramConfig};
pub use subscription::{Every, StopSignal, SubId, Subscription, SubscriptionManager};
