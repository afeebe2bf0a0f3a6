use std::{marker::PhantomData, ops::*};

use crate::*;

pub type NormalizedVec3<T> = NormalizedVector<T, Vec3<T>>;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct NormalizedVector<T, V> {
  pub value: V,
  phantom: PhantomData<T>,
}

pub trait IntoNormalizedVector<T, V> {
  #[must_use]
  fn into_normalized(self) -> NormalizedVector<T, V>;

  /// # Safety
  ///
  /// the caller must make sure self has unit length.
  #[must_use]
  unsafe fn into_normalized_unchecked(self) -> NormalizedVector<T, V>;
}

impl<T: Scalar, V: InnerProductSpace<T>> IntoNormalizedVector<T, V> for V {
  #[inline(always)]
  fn into_normalized(self) -> NormalizedVector<T, V> {
    unsafe { NormalizedVector::wrap(self.normalize()) }
  }
  #[inline(always)]
  unsafe fn into_normalized_unchecked(self) -> NormalizedVector<T, V> {
    NormalizedVector::wrap(self)
  }
}

impl<T, V> NormalizedVector<T, V> {
  /// # Safety
  ///
  /// v must have unit length.
  #[inline(always)]
  pub unsafe fn wrap(v: V) -> Self {
    Self {
      value: v,
      phantom: PhantomData,
    }
  }
}

pub trait InnerData<T> {
  fn get_inner(self) -> T;
}

impl<T, V> InnerData<V> for NormalizedVector<T, V> {
  #[inline(always)]
  fn get_inner(self) -> V {
    self.value
  }
}
impl<V> InnerData<V> for V {
  #[inline(always)]
  fn get_inner(self) -> V {
    self
  }
}

// after mul scalar, the vector may not be normalized
impl<T, V: VectorSpace<T>> Mul<T> for NormalizedVector<T, V> {
  type Output = V;
  #[inline(always)]
  fn mul(self, rhs: T) -> Self::Output {
    self.value * rhs
  }
}

impl<T, V> Deref for NormalizedVector<T, V> {
  type Target = V;
  #[inline(always)]
  fn deref(&self) -> &Self::Target {
    &self.value
  }
}

#[test]
fn normalize_axis() {
  let a = Vec3::<f64>::new(0., 3., 4.).into_normalized();
  assert!((a.y - 0.6).abs() < 1e-12);
  assert!((a.z - 0.8).abs() < 1e-12);
  assert!((a.value.length() - 1.).abs() < 1e-12);
  let zero = Vec3::<f64>::new(0., 0., 0.).into_normalized();
  assert_eq!(zero.value, Vec3::new(0., 0., 0.));
}
