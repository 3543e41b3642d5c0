// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Multi-touch sample tracking and incremental transform recovery
//!
//! This crate implements the state and geometry behind "pinch/rotate/pan"
//! direct manipulation: it tracks the set of active touch contacts across
//! begin/move/cancel/end events and derives, from consecutive samples of those
//! contacts, the incremental affine transform (translation, rotation, uniform
//! scale) implied by the motion.
//!
//! The crate is platform-independent: input is an abstract stream of
//! [`event::TouchEvent`] values which the host constructs from its own event
//! system. No windowing or rendering dependencies are involved.
//!
//! -   [`geom`] provides [`Vec2`](geom::Vec2), [`Linear`](geom::Linear) and
//!     [`Affine`](geom::Affine): 2D vector arithmetic and angle-preserving
//!     affine transforms
//! -   [`event`] provides [`SampleTracker`](event::SampleTracker) (touch
//!     sample bookkeeping), [`recover`](event::recover) (incremental
//!     transform recovery) and
//!     [`PanComponent`](event::components::PanComponent) (transform
//!     accumulation with optional translation clamping)
//! -   [`config`] provides setup-time configuration with optional file
//!     (de)serialisation behind the `json` and `toml` features
//!
//! # Example
//!
//! ```
//! use touch_pan::event::components::PanComponent;
//! use touch_pan::event::{EventKind, Touch, TouchEvent, TouchId, TouchPhase};
//! use touch_pan::geom::Vec2;
//!
//! let touch = |id: u64, x, y, phase| Touch {
//!     id: TouchId(id),
//!     position: Vec2(x, y),
//!     phase,
//! };
//!
//! let mut pan = PanComponent::new();
//! pan.handle(&TouchEvent::new(EventKind::Begin, [
//!     touch(1, 0.0, 0.0, TouchPhase::Started),
//! ]));
//! pan.handle(&TouchEvent::new(EventKind::Move, [
//!     touch(1, 5.0, 5.0, TouchPhase::Moved),
//! ]));
//!
//! // One matched contact: pure translation
//! let delta = pan.transform().delta();
//! assert_eq!(delta, Vec2(5.0, 5.0));
//! ```

pub extern crate easy_cast as cast;

pub mod config;
pub mod event;
pub mod geom;
