use std::ops::{Add, Mul};

use facet::Facet;

use crate::*;

/// The upper left 2x2 block of a planar transform.
#[repr(C)]
#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq, Facet)]
pub struct Mat2<T> {
  pub a1: T, pub a2: T,
  pub b1: T, pub b2: T,
}

impl<T: Scalar> SquareMatrixDimension<1> for Mat2<T> {}
impl<T: Scalar> SquareMatrix<T> for Mat2<T> {
  fn identity() -> Self {
    Self::one()
  }
  fn transpose(&self) -> Self {
    let (a1, a2) = (self.a1, self.b1);
    let (b1, b2) = (self.a2, self.b2);
    #[rustfmt::skip]
    let mat = Mat2 {
      a1, a2,
      b1, b2,
    };
    mat
  }
  fn det(&self) -> T {
    self.a1 * self.b2 - self.a2 * self.b1
  }
  fn inverse(&self) -> Option<Self> {
    let det = self.det();
    if det == T::zero() {
      return None;
    }
    let inv_det = T::one() / det;
    #[rustfmt::skip]
    let mat = Self {
      a1:  self.b2 * inv_det, a2: -self.a2 * inv_det,
      b1: -self.b1 * inv_det, b2:  self.a1 * inv_det,
    };
    Some(mat)
  }
}

impl<T> Mul for Mat2<T>
where
  T: Copy + Mul<Output = T> + Add<Output = T>,
{
  type Output = Self;

  fn mul(self, b: Self) -> Self {
    let a = self;

    Mat2 {
      a1: a.a1 * b.a1 + a.b1 * b.a2,
      a2: a.a2 * b.a1 + a.b2 * b.a2,
      b1: a.a1 * b.b1 + a.b1 * b.b2,
      b2: a.a2 * b.b1 + a.b2 * b.b2,
    }
  }
}

impl<T> Mul<Vec2<T>> for Mat2<T>
where
  T: Copy + Add<Output = T> + Mul<Output = T>,
{
  type Output = Vec2<T>;

  fn mul(self, v: Vec2<T>) -> Vec2<T> {
    Vec2 {
      x: v.x * self.a1 + v.y * self.b1,
      y: v.x * self.a2 + v.y * self.b2,
    }
  }
}

impl<T> Mat2<T>
where
  T: Copy,
{
  pub fn new(m11: T, m12: T, m21: T, m22: T) -> Self {
    Self {
      a1: m11,
      a2: m12,
      b1: m21,
      b2: m22,
    }
  }
}

impl<T: Scalar> Mat2<T> {
  pub fn scale(x: T, y: T) -> Self {
    #[rustfmt::skip]
    let mat = Mat2 {
      a1: x,         a2: T::zero(),
      b1: T::zero(), b2: y,
    };
    mat
  }

  /// True when every row and every column holds at most one entry whose magnitude
  /// exceeds `epsilon`, so axis aligned rects stay axis aligned (scale, flip or a
  /// multiple of 90 degree rotation).
  ///
  /// Rounding leaves values around 1e-16 where an exact zero is expected, so an
  /// epsilon is used instead of comparing with zero.
  pub fn is_axis_aligned(&self, epsilon: T) -> bool {
    let significant = |v: T| (v.abs() > epsilon) as u8;
    let (a1, a2) = (significant(self.a1), significant(self.a2));
    let (b1, b2) = (significant(self.b1), significant(self.b2));

    let column_a = a1 + a2;
    let column_b = b1 + b2;
    let row_1 = a1 + b1;
    let row_2 = a2 + b2;

    column_a <= 1 && column_b <= 1 && row_1 <= 1 && row_2 <= 1
  }
}

impl<T> num_traits::Zero for Mat2<T>
where
  T: num_traits::Zero + Copy + PartialEq,
{
  #[inline(always)]
  fn zero() -> Self {
    #[rustfmt::skip]
    let mat = Mat2 {
      a1: T::zero(), a2: T::zero(),
      b1: T::zero(), b2: T::zero(),
    };
    mat
  }
  #[inline(always)]
  fn is_zero(&self) -> bool {
    self.eq(&Self::zero())
  }
}

impl<T> num_traits::One for Mat2<T>
where
  T: num_traits::One + num_traits::Zero + Copy,
{
  #[inline(always)]
  fn one() -> Self {
    #[rustfmt::skip]
    let mat = Mat2 {
      a1: T::one(),  a2: T::zero(),
      b1: T::zero(), b2: T::one(),
    };
    mat
  }
}

#[test]
fn axis_alignment_of_blocks() {
  assert!(Mat2::scale(2., -3.).is_axis_aligned(1e-6));
  // 90 degree rotation swaps the axes but keeps them aligned
  assert!(Mat2::new(0., 1., -1., 0.).is_axis_aligned(1e-6));
  assert!(Mat2::new(1e-17, 1., -1., 1e-17).is_axis_aligned(1e-6));
  assert!(!Mat2::new(1., 1., 0., 1.).is_axis_aligned(1e-6));
  let s = std::f64::consts::FRAC_1_SQRT_2;
  assert!(!Mat2::new(s, s, -s, s).is_axis_aligned(1e-6));
}

#[test]
fn inverse_of_block() {
  let m = Mat2::<f64>::new(4., 7., 2., 6.);
  let inv = m.inverse().unwrap();
  let product = m * inv;
  assert!((product.a1 - 1.).abs() < 1e-12);
  assert!(product.a2.abs() < 1e-12);
  assert!(product.b1.abs() < 1e-12);
  assert!((product.b2 - 1.).abs() < 1e-12);
  assert!(Mat2::<f64>::new(1., 2., 2., 4.).inverse().is_none());
}
