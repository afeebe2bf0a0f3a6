//! 4x4 homogeneous transform engine.
//!
//! [`Mat4`] stores its entries column-major (`a1..d4`, letter = column,
//! digit = row) and provides construction, composition, inversion,
//! classification and a batched 2d to homogeneous 4d point mapper whose
//! kernel is picked from the matrix's [`TypeMask`].

mod angle;
mod error;
mod mat;
mod scalar;
mod vec;

pub use angle::*;
pub use error::*;
pub use mat::*;
pub use num_traits::{One, Zero};
pub use scalar::*;
pub use vec::*;

use facet::Facet;
use serde::{Deserialize, Serialize};
