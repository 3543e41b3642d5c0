// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Geometry data types
//!
//! [`Vec2`] is a 2D floating-point (`f64`) type used for touch locations and
//! coordinate differences.
//!
//! [`Linear`] and [`Affine`] are angle-preserving transforms over [`Vec2`]:
//! scaling and rotation, respectively with an added translation.

mod transform;
mod vector;
pub use transform::{Affine, Linear};
pub use vector::Vec2;
