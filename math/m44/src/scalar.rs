use std::fmt::Debug;

use num_traits::{Float, FloatConst};

/// The real number type every vector and matrix in this crate is built on.
pub trait Scalar:
  Float + FloatConst + Default + Debug + bytemuck::Pod + Send + Sync + 'static
{
  #[inline(always)]
  fn pi_by_c180() -> Self {
    Self::PI() / Self::c180()
  }

  #[inline(always)]
  fn c180_by_pi() -> Self {
    Self::c180() / Self::PI()
  }

  fn c180() -> Self;

  /// Lossless conversion to the precision intermediate results are computed in.
  fn widen(self) -> f64;

  /// Round a widened result back, the only lossy step of a widened computation.
  fn narrow(v: f64) -> Self;
}

impl Scalar for f32 {
  #[inline(always)]
  fn c180() -> Self {
    180.
  }

  #[inline(always)]
  fn widen(self) -> f64 {
    self.into()
  }

  #[inline(always)]
  fn narrow(v: f64) -> Self {
    v as f32
  }
}

impl Scalar for f64 {
  #[inline(always)]
  fn c180() -> Self {
    180.
  }

  #[inline(always)]
  fn widen(self) -> f64 {
    self
  }

  #[inline(always)]
  fn narrow(v: f64) -> Self {
    v
  }
}
