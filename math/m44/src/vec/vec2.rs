use crate::*;
use std::fmt::Debug;
use std::{fmt, ops::*};

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq)]
pub struct Vec2<T> {
  pub x: T,
  pub y: T,
}

unsafe impl<T: bytemuck::Zeroable> bytemuck::Zeroable for Vec2<T> {}
unsafe impl<T: bytemuck::Pod> bytemuck::Pod for Vec2<T> {}

impl<T: Scalar> VectorDimension<2> for Vec2<T> {}
impl<T> VectorSpace<T> for Vec2<T> where
  T: Add<T, Output = T> + Sub<T, Output = T> + Mul<T, Output = T> + Div<T, Output = T> + Copy
{
}
impl<T: Scalar> InnerProductSpace<T> for Vec2<T> {
  #[inline]
  fn dot_impl(&self, b: Self) -> T {
    self.x * b.x + self.y * b.y
  }
}

impl<T> Vec2<T> {
  #[inline(always)]
  pub const fn new(x: T, y: T) -> Self {
    Self { x, y }
  }
}

impl<T: Copy> Vec2<T> {
  /// Lift into a homogeneous point on the z = 0 plane.
  #[inline]
  pub fn expand_to_point(self) -> Vec4<T>
  where
    T: One + Zero,
  {
    Vec4::new(self.x, self.y, T::zero(), T::one())
  }
}

impl<T> fmt::Display for Vec2<T>
where
  T: Debug,
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "({:?}, {:?})", self.x, self.y)
  }
}
