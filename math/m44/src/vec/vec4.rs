use crate::*;
use std::{fmt, ops::Sub};
use std::{fmt::Debug, ops::*};

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq)]
pub struct Vec4<T> {
  pub x: T,
  pub y: T,
  pub z: T,
  pub w: T,
}

unsafe impl<T: bytemuck::Zeroable> bytemuck::Zeroable for Vec4<T> {}
unsafe impl<T: bytemuck::Pod> bytemuck::Pod for Vec4<T> {}

impl<T: Scalar> VectorDimension<4> for Vec4<T> {}
impl<T> VectorSpace<T> for Vec4<T> where
  T: Add<T, Output = T> + Sub<T, Output = T> + Mul<T, Output = T> + Div<T, Output = T> + Copy
{
}
impl<T: Scalar> InnerProductSpace<T> for Vec4<T> {
  #[inline]
  fn dot_impl(&self, b: Self) -> T {
    self.x * b.x + self.y * b.y + self.z * b.z + self.w * b.w
  }
}

impl<T> Vec4<T> {
  #[inline(always)]
  pub const fn new(x: T, y: T, z: T, w: T) -> Self {
    Self { x, y, z, w }
  }
}

impl<T: Copy> From<[T; 4]> for Vec4<T> {
  #[inline]
  fn from(v: [T; 4]) -> Self {
    Self::new(v[0], v[1], v[2], v[3])
  }
}

impl<T: Copy> Vec4<T> {
  #[inline]
  pub fn to_array(self) -> [T; 4] {
    [self.x, self.y, self.z, self.w]
  }

  #[inline]
  pub fn xyz(self) -> Vec3<T> {
    Vec3::new(self.x, self.y, self.z)
  }
}

impl<T> fmt::Display for Vec4<T>
where
  T: Debug,
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(
      f,
      "({:?}, {:?}, {:?}, {:?})",
      self.x, self.y, self.z, self.w
    )
  }
}
