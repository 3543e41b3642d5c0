// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Event handling
//!
//! The host constructs a [`TouchEvent`] for each touch lifecycle event of its
//! platform (begin / move / end / cancel) and feeds it to a [`SampleTracker`],
//! which maintains the set of active [`TouchSample`]s and reports each step's
//! previous and new sample sets to an observer.
//!
//! [`recover`] turns one such step — a previous and a current [`SampleSet`] —
//! into the incremental [`Affine`](crate::geom::Affine) transform explaining
//! the motion: a pure translation for one matched contact, a rigid
//! rotate/scale/translate recovery for two, identity otherwise.
//!
//! [`components::PanComponent`] combines both with transform accumulation for
//! hosts which do not keep their own running transform.

mod recovery;
mod touch;

pub mod components;

pub use recovery::{MatchedPairs, match_samples, recover};
pub use touch::{
    EventKind, GesturePhase, MAX_TOUCHES, SampleObserver, SampleSet, SampleTracker, Touch,
    TouchEvent, TouchId, TouchPhase, TouchSample,
};
