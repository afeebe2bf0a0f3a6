use crate::*;
use std::fmt::Debug;
use std::{fmt, ops::*};

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq)]
pub struct Vec3<T> {
  pub x: T,
  pub y: T,
  pub z: T,
}

unsafe impl<T: bytemuck::Zeroable> bytemuck::Zeroable for Vec3<T> {}
unsafe impl<T: bytemuck::Pod> bytemuck::Pod for Vec3<T> {}

impl<T: Scalar> VectorDimension<3> for Vec3<T> {}
impl<T> VectorSpace<T> for Vec3<T> where
  T: Add<T, Output = T> + Sub<T, Output = T> + Mul<T, Output = T> + Div<T, Output = T> + Copy
{
}
impl<T: Scalar> InnerProductSpace<T> for Vec3<T> {
  #[inline]
  fn dot_impl(&self, b: Self) -> T {
    self.x * b.x + self.y * b.y + self.z * b.z
  }
}

impl<T> Vec3<T> {
  #[inline(always)]
  pub const fn new(x: T, y: T, z: T) -> Self {
    Self { x, y, z }
  }
}

impl<T: Copy> Vec3<T> {
  #[inline]
  pub fn expand_with(self, w: T) -> Vec4<T> {
    Vec4::new(self.x, self.y, self.z, w)
  }

  #[inline]
  pub fn expand_with_one(self) -> Vec4<T>
  where
    T: One,
  {
    self.expand_with(T::one())
  }
}

impl<T: Scalar> Vec3<T> {
  #[inline]
  pub fn cross(&self, b: Self) -> Self {
    Self {
      x: self.y * b.z - self.z * b.y,
      y: self.z * b.x - self.x * b.z,
      z: self.x * b.y - self.y * b.x,
    }
  }
}

impl<T> fmt::Display for Vec3<T>
where
  T: Debug,
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "({:?}, {:?}, {:?})", self.x, self.y, self.z)
  }
}

#[test]
fn cross_follows_right_hand() {
  let x = Vec3::new(1., 0., 0.);
  let y = Vec3::new(0., 1., 0.);
  assert_eq!(x.cross(y), Vec3::new(0., 0., 1.));
  assert_eq!(Vec3::<f64>::new(3., 4., 0.).length(), 5.);
}
