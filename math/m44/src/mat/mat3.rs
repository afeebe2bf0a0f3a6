use std::ops::{Add, Div, Mul};

use crate::*;

/// Planar homogeneous transform.
///
/// `c1, c2` hold the translation and `a3, b3, c3` the planar perspective row,
/// the matrix is affine when that row is `(0, 0, 1)`.
#[repr(C)]
#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq, Facet)]
pub struct Mat3<T> {
  pub a1: T, pub a2: T, pub a3: T,
  pub b1: T, pub b2: T, pub b3: T,
  pub c1: T, pub c2: T, pub c3: T,
}

impl<T: Scalar> SquareMatrixDimension<2> for Mat3<T> {}
impl<T: Scalar> SquareMatrix<T> for Mat3<T> {
  fn identity() -> Self {
    Self::one()
  }
  fn transpose(&self) -> Self {
    #[rustfmt::skip]
    let mat = Mat3::new(
      self.a1, self.b1, self.c1,
      self.a2, self.b2, self.c2,
      self.a3, self.b3, self.c3,
    );
    mat
  }

  fn det(&self) -> T {
    let t11 = self.c3 * self.b2 - self.b3 * self.c2;
    let t12 = self.b3 * self.c1 - self.c3 * self.b1;
    let t13 = self.c2 * self.b1 - self.b2 * self.c1;
    self.a1 * t11 + self.a2 * t12 + self.a3 * t13
  }

  fn inverse(&self) -> Option<Self> {
    let det = self.det();
    if det == T::zero() {
      return None;
    }

    let inv_det = T::one() / det;

    Self {
      a1: (self.c3 * self.b2 - self.b3 * self.c2) * inv_det,
      a2: (self.a3 * self.c2 - self.c3 * self.a2) * inv_det,
      a3: (self.b3 * self.a2 - self.a3 * self.b2) * inv_det,
      b1: (self.b3 * self.c1 - self.c3 * self.b1) * inv_det,
      b2: (self.c3 * self.a1 - self.a3 * self.c1) * inv_det,
      b3: (self.a3 * self.b1 - self.b3 * self.a1) * inv_det,
      c1: (self.c2 * self.b1 - self.b2 * self.c1) * inv_det,
      c2: (self.a2 * self.c1 - self.c2 * self.a1) * inv_det,
      c3: (self.b2 * self.a1 - self.a2 * self.b1) * inv_det,
    }
    .into()
  }
}

impl<T> Mul<Vec2<T>> for Mat3<T>
where
  T: Copy + Add<Output = T> + Mul<Output = T> + Div<Output = T> + num_traits::One,
{
  type Output = Vec2<T>;

  fn mul(self, v: Vec2<T>) -> Vec2<T> {
    let v = Vec3::new(v.x, v.y, T::one());
    let v = self * v;
    Vec2::new(v.x, v.y) / v.z
  }
}

impl<T> Mul<Vec3<T>> for Mat3<T>
where
  T: Copy + Add<Output = T> + Mul<Output = T>,
{
  type Output = Vec3<T>;

  fn mul(self, v: Vec3<T>) -> Vec3<T> {
    Vec3 {
      x: v.x * self.a1 + v.y * self.b1 + v.z * self.c1,
      y: v.x * self.a2 + v.y * self.b2 + v.z * self.c2,
      z: v.x * self.a3 + v.y * self.b3 + v.z * self.c3,
    }
  }
}

impl<T> Mul for Mat3<T>
where
  T: Copy + Mul<Output = T> + Add<Output = T>,
{
  type Output = Self;

  fn mul(self, m: Self) -> Self {
    let a = self;

    Self {
      a1: a.a1 * m.a1 + a.b1 * m.a2 + a.c1 * m.a3,
      a2: a.a2 * m.a1 + a.b2 * m.a2 + a.c2 * m.a3,
      a3: a.a3 * m.a1 + a.b3 * m.a2 + a.c3 * m.a3,

      b1: a.a1 * m.b1 + a.b1 * m.b2 + a.c1 * m.b3,
      b2: a.a2 * m.b1 + a.b2 * m.b2 + a.c2 * m.b3,
      b3: a.a3 * m.b1 + a.b3 * m.b2 + a.c3 * m.b3,

      c1: a.a1 * m.c1 + a.b1 * m.c2 + a.c1 * m.c3,
      c2: a.a2 * m.c1 + a.b2 * m.c2 + a.c2 * m.c3,
      c3: a.a3 * m.c1 + a.b3 * m.c2 + a.c3 * m.c3,
    }
  }
}

impl<T> Mat3<T>
where
  T: Copy,
{
  #[allow(clippy::too_many_arguments)]
  pub fn new(m11: T, m12: T, m13: T, m21: T, m22: T, m23: T, m31: T, m32: T, m33: T) -> Self {
    #[rustfmt::skip]
    let mat = Self {
      a1: m11, a2: m12, a3: m13,
      b1: m21, b2: m22, b3: m23,
      c1: m31, c2: m32, c3: m33,
    };
    mat
  }

  pub fn to_mat2(self) -> Mat2<T> {
    #[rustfmt::skip]
    let mat = Mat2 {
      a1: self.a1, a2: self.a2,
      b1: self.b1, b2: self.b2,
    };
    mat
  }
}

impl<T> Mat3<T>
where
  T: Scalar,
{
  /// Rotation about the origin, positive theta turns x toward y.
  pub fn rotate(theta: T) -> Self {
    let (s, c) = theta.sin_cos();

    #[rustfmt::skip]
    let mat = Mat3::new(
      c,         s,         T::zero(),
      -s,        c,         T::zero(),
      T::zero(), T::zero(), T::one(),
    );
    mat
  }

  pub fn scale(scale: impl Into<Vec2<T>>) -> Self {
    let Vec2 { x, y } = scale.into();
    let (a1, a2, a3) = (x, T::zero(), T::zero());
    let (b1, b2, b3) = (T::zero(), y, T::zero());
    let (c1, c2, c3) = (T::zero(), T::zero(), T::one());

    #[rustfmt::skip]
    let mat = Mat3::new(
      a1, a2, a3,
      b1, b2, b3,
      c1, c2, c3
    );
    mat
  }

  pub fn translate(translate: impl Into<Vec2<T>>) -> Self {
    let Vec2 { x, y } = translate.into();
    let (a1, a2, a3) = (T::one(), T::zero(), T::zero());
    let (b1, b2, b3) = (T::zero(), T::one(), T::zero());
    let (c1, c2, c3) = (x, y, T::one());

    #[rustfmt::skip]
    let mat = Mat3::new(
      a1, a2, a3,
      b1, b2, b3,
      c1, c2, c3
    );
    mat
  }

  pub fn is_affine(&self) -> bool {
    self.a3 == T::zero() && self.b3 == T::zero() && self.c3 == T::one()
  }
}

impl<T> num_traits::Zero for Mat3<T>
where
  T: num_traits::Zero + Copy + PartialEq,
{
  #[inline(always)]
  fn zero() -> Self {
    #[rustfmt::skip]
    let mat = Self {
      a1: T::zero(), a2: T::zero(), a3: T::zero(),
      b1: T::zero(), b2: T::zero(), b3: T::zero(),
      c1: T::zero(), c2: T::zero(), c3: T::zero(),
    };
    mat
  }
  #[inline(always)]
  fn is_zero(&self) -> bool {
    self.eq(&Self::zero())
  }
}

impl<T> num_traits::One for Mat3<T>
where
  T: num_traits::One + num_traits::Zero + Copy,
{
  #[inline(always)]
  fn one() -> Self {
    #[rustfmt::skip]
    let mat = Self {
      a1: T::one(),  a2: T::zero(), a3: T::zero(),
      b1: T::zero(), b2: T::one(),  b3: T::zero(),
      c1: T::zero(), c2: T::zero(), c3: T::one(),
    };
    mat
  }
}

#[test]
fn mul() {
  let cgmath_mat1 = cgmath::Matrix3::<f32>::from_translation(cgmath::vec2(1., 2.));
  let cgmath_mat2 = cgmath::Matrix3::<f32>::from_nonuniform_scale(3., -2.);
  let cgmath_point = cgmath::vec3(1., 2., 3.);
  let cgmath_r = cgmath_mat1 * cgmath_mat2 * cgmath_point;
  let cgmath_r: [f32; 3] = *cgmath_r.as_ref();

  let math_mat1 = Mat3::<f32>::translate((1., 2.));
  let math_mat2 = Mat3::<f32>::scale((3., -2.));
  let math_point = Vec3::new(1., 2., 3.);
  let math_r = math_mat1 * math_mat2 * math_point;
  let math_r = [math_r.x, math_r.y, math_r.z];

  assert_eq!(cgmath_r, math_r)
}

#[test]
fn planar_rotation_and_point_mapping() {
  let m = Mat3::<f64>::translate((10., 0.)) * Mat3::rotate(std::f64::consts::FRAC_PI_2);
  let p = m * Vec2::new(1., 0.);
  assert!((p.x - 10.).abs() < 1e-12);
  assert!((p.y - 1.).abs() < 1e-12);
  assert!(m.is_affine());
  let inv = m.inverse().unwrap();
  let back = inv * p;
  assert!((back.x - 1.).abs() < 1e-12);
  assert!(back.y.abs() < 1e-12);
}
