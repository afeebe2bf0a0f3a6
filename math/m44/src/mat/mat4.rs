use std::ops::{Add, Div, Mul};

use crate::*;

/// Homogeneous 3d transform, column major.
///
/// The letter names the column and the digit the row: `d1, d2, d3` is the
/// translation, `a4, b4, c4` the perspective row and `d4` the homogeneous scale.
/// Nothing derived from the entries is cached, so any field may be written directly.
#[repr(C)]
#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq, Facet)]
pub struct Mat4<T> {
  pub a1: T, pub a2: T, pub a3: T, pub a4: T,
  pub b1: T, pub b2: T, pub b3: T, pub b4: T,
  pub c1: T, pub c2: T, pub c3: T, pub c4: T,
  pub d1: T, pub d2: T, pub d3: T, pub d4: T,
}

impl<T: Scalar> SquareMatrixDimension<3> for Mat4<T> {}
impl<T: Scalar> SquareMatrix<T> for Mat4<T> {
  fn identity() -> Self {
    Self::one()
  }

  fn transpose(&self) -> Self {
    #[rustfmt::skip]
    let mat = Mat4::new(
      self.a1, self.b1, self.c1, self.d1,
      self.a2, self.b2, self.c2, self.d2,
      self.a3, self.b3, self.c3, self.d3,
      self.a4, self.b4, self.c4, self.d4,
    );
    mat
  }

  /// The general path forms its minors in f64 whatever `T` is, so cancellation between
  /// them costs no f32 precision. Only the final value is rounded back.
  fn det(&self) -> T {
    if *self == Self::identity() {
      return T::one();
    }
    if self.type_mask().is_scale_translate() {
      return self.a1 * self.b2 * self.c3 * self.d4;
    }
    let widened = self.map(T::widen);
    T::narrow(determinant_from_minors(&widened.minors()))
  }

  fn inverse(&self) -> Option<Self> {
    let mask = self.type_mask();

    if mask == TypeMask::IDENTITY {
      return Some(*self);
    }

    if mask == TypeMask::TRANSLATE {
      return Some(Self::translate((-self.d1, -self.d2, -self.d3)));
    }

    if mask.is_scale_translate() {
      if self.a1 == T::zero() || self.b2 == T::zero() || self.c3 == T::zero() {
        log::trace!("reject inverting scale matrix with zero axis: {self:?}");
        return None;
      }
      let (inv_x, inv_y, inv_z) = (self.a1.recip(), self.b2.recip(), self.c3.recip());
      let (zero, one) = (T::zero(), T::one());

      #[rustfmt::skip]
      let inverse = Mat4::new(
        inv_x,              zero,               zero,               zero,
        zero,               inv_y,              zero,               zero,
        zero,               zero,               inv_z,              zero,
        -self.d1 * inv_x,   -self.d2 * inv_y,   -self.d3 * inv_z,   one,
      );
      return inverse.is_finite().then_some(inverse);
    }

    let b = self.minors();
    let det = determinant_from_minors(&b);
    if det == T::zero() {
      log::trace!("reject inverting singular matrix: {self:?}");
      return None;
    }
    let inv_det = det.recip();
    if !inv_det.is_finite() {
      log::trace!("reject inverting near singular matrix, det: {det:?}");
      return None;
    }
    let b = b.map(|m| m * inv_det);

    let [a00, a01, a02, a03, a10, a11, a12, a13, a20, a21, a22, a23, a30, a31, a32, a33] =
      self.to_col_major();
    let [b00, b01, b02, b03, b04, b05, b06, b07, b08, b09, b10, b11] = b;

    #[rustfmt::skip]
    let inverse = Mat4::new(
      a11 * b11 - a12 * b10 + a13 * b09,
      a02 * b10 - a01 * b11 - a03 * b09,
      a31 * b05 - a32 * b04 + a33 * b03,
      a22 * b04 - a21 * b05 - a23 * b03,

      a12 * b08 - a10 * b11 - a13 * b07,
      a00 * b11 - a02 * b08 + a03 * b07,
      a32 * b02 - a30 * b05 - a33 * b01,
      a20 * b05 - a22 * b02 + a23 * b01,

      a10 * b10 - a11 * b08 + a13 * b06,
      a01 * b08 - a00 * b10 - a03 * b06,
      a30 * b04 - a31 * b02 + a33 * b00,
      a21 * b02 - a20 * b04 - a23 * b00,

      a11 * b07 - a10 * b09 - a12 * b06,
      a00 * b09 - a01 * b07 + a02 * b06,
      a31 * b01 - a30 * b03 - a32 * b00,
      a20 * b03 - a21 * b01 + a22 * b00,
    );

    if !inverse.is_finite() {
      log::trace!("reject inverting matrix with non finite result: {self:?}");
      return None;
    }
    Some(inverse)
  }
}

/// `b00..b11`: the 2x2 minors of the upper and lower column pairs.
type Minors<T> = [T; 12];

fn determinant_from_minors<T: Scalar>(b: &Minors<T>) -> T {
  let [b00, b01, b02, b03, b04, b05, b06, b07, b08, b09, b10, b11] = *b;
  b00 * b11 - b01 * b10 + b02 * b09 + b03 * b08 - b04 * b07 + b05 * b06
}

impl<T: Scalar> Mat4<T> {
  fn minors(&self) -> Minors<T> {
    let [a00, a01, a02, a03, a10, a11, a12, a13, a20, a21, a22, a23, a30, a31, a32, a33] =
      self.to_col_major();
    [
      a00 * a11 - a01 * a10,
      a00 * a12 - a02 * a10,
      a00 * a13 - a03 * a10,
      a01 * a12 - a02 * a11,
      a01 * a13 - a03 * a11,
      a02 * a13 - a03 * a12,
      a20 * a31 - a21 * a30,
      a20 * a32 - a22 * a30,
      a20 * a33 - a23 * a30,
      a21 * a32 - a22 * a31,
      a21 * a33 - a23 * a31,
      a22 * a33 - a23 * a32,
    ]
  }

  fn is_finite(&self) -> bool {
    self.as_col_major().iter().all(|v| v.is_finite())
  }

  /// The out parameter flavour of [`SquareMatrix::inverse`], `inverse` is left untouched on failure.
  pub fn invert_into(&self, inverse: &mut Self) -> bool {
    match SquareMatrix::inverse(self) {
      Some(result) => {
        *inverse = result;
        true
      }
      None => false,
    }
  }

  /// Swap the off diagonal pairs in place, identity is detected and left alone.
  pub fn transpose_in_place(&mut self) -> &mut Self {
    if *self == Self::identity() {
      return self;
    }
    std::mem::swap(&mut self.a2, &mut self.b1);
    std::mem::swap(&mut self.a3, &mut self.c1);
    std::mem::swap(&mut self.a4, &mut self.d1);
    std::mem::swap(&mut self.b3, &mut self.c2);
    std::mem::swap(&mut self.b4, &mut self.d2);
    std::mem::swap(&mut self.c4, &mut self.d3);
    self
  }
}

impl<T: Scalar> Mat4<T> {
  /// Recomputed from the current entries on every call.
  pub fn type_mask(&self) -> TypeMask {
    let (zero, one) = (T::zero(), T::one());

    if self.a4 != zero || self.b4 != zero || self.c4 != zero || self.d4 != one {
      return TypeMask::FULL_PERSPECTIVE;
    }

    let mut mask = TypeMask::IDENTITY;
    if self.d1 != zero || self.d2 != zero || self.d3 != zero {
      mask |= TypeMask::TRANSLATE;
    }

    if self.a1 != one || self.b2 != one || self.c3 != one {
      mask |= TypeMask::SCALE;
    }

    if self.b1 != zero
      || self.a2 != zero
      || self.a3 != zero
      || self.c1 != zero
      || self.c2 != zero
      || self.b3 != zero
    {
      mask |= TypeMask::AFFINE;
    }

    mask
  }

  pub fn is_identity(&self) -> bool {
    self.type_mask() == TypeMask::IDENTITY
  }

  pub fn is_scale_translate(&self) -> bool {
    self.type_mask().is_scale_translate()
  }

  pub fn has_perspective(&self) -> bool {
    self.type_mask().contains(TypeMask::PERSPECTIVE)
  }

  /// Whether axis aligned rects in the xy plane stay axis aligned.
  ///
  /// Only the x/y perspective entries matter here, z is not relevant for a planar test.
  pub fn preserves_2d_axis_alignment(&self, epsilon: T) -> bool {
    if self.a4 != T::zero() || self.b4 != T::zero() {
      return false;
    }
    self.to_mat2().is_axis_aligned(epsilon)
  }
}

impl<T> Mul for Mat4<T>
where
  T: Copy + Add<Output = T> + Mul<Output = T>,
{
  type Output = Self;

  fn mul(self, m: Self) -> Self {
    let a = self;

    Self {
      a1: a.a1 * m.a1 + a.b1 * m.a2 + a.c1 * m.a3 + a.d1 * m.a4,
      a2: a.a2 * m.a1 + a.b2 * m.a2 + a.c2 * m.a3 + a.d2 * m.a4,
      a3: a.a3 * m.a1 + a.b3 * m.a2 + a.c3 * m.a3 + a.d3 * m.a4,
      a4: a.a4 * m.a1 + a.b4 * m.a2 + a.c4 * m.a3 + a.d4 * m.a4,

      b1: a.a1 * m.b1 + a.b1 * m.b2 + a.c1 * m.b3 + a.d1 * m.b4,
      b2: a.a2 * m.b1 + a.b2 * m.b2 + a.c2 * m.b3 + a.d2 * m.b4,
      b3: a.a3 * m.b1 + a.b3 * m.b2 + a.c3 * m.b3 + a.d3 * m.b4,
      b4: a.a4 * m.b1 + a.b4 * m.b2 + a.c4 * m.b3 + a.d4 * m.b4,

      c1: a.a1 * m.c1 + a.b1 * m.c2 + a.c1 * m.c3 + a.d1 * m.c4,
      c2: a.a2 * m.c1 + a.b2 * m.c2 + a.c2 * m.c3 + a.d2 * m.c4,
      c3: a.a3 * m.c1 + a.b3 * m.c2 + a.c3 * m.c3 + a.d3 * m.c4,
      c4: a.a4 * m.c1 + a.b4 * m.c2 + a.c4 * m.c3 + a.d4 * m.c4,

      d1: a.a1 * m.d1 + a.b1 * m.d2 + a.c1 * m.d3 + a.d1 * m.d4,
      d2: a.a2 * m.d1 + a.b2 * m.d2 + a.c2 * m.d3 + a.d2 * m.d4,
      d3: a.a3 * m.d1 + a.b3 * m.d2 + a.c3 * m.d3 + a.d3 * m.d4,
      d4: a.a4 * m.d1 + a.b4 * m.d2 + a.c4 * m.d3 + a.d4 * m.d4,
    }
  }
}

impl<T> Mul<Vec4<T>> for Mat4<T>
where
  T: Copy + Add<Output = T> + Mul<Output = T>,
{
  type Output = Vec4<T>;

  fn mul(self, v: Vec4<T>) -> Vec4<T> {
    Vec4 {
      x: v.x * self.a1 + v.y * self.b1 + v.z * self.c1 + v.w * self.d1,
      y: v.x * self.a2 + v.y * self.b2 + v.z * self.c2 + v.w * self.d2,
      z: v.x * self.a3 + v.y * self.b3 + v.z * self.c3 + v.w * self.d3,
      w: v.x * self.a4 + v.y * self.b4 + v.z * self.c4 + v.w * self.d4,
    }
  }
}

/// Point transform with perspective divide.
impl<T> Mul<Vec3<T>> for Mat4<T>
where
  T: Copy + Add<Output = T> + Mul<Output = T> + Div<Output = T> + num_traits::One,
{
  type Output = Vec3<T>;

  fn mul(self, v: Vec3<T>) -> Vec3<T> {
    let v = self * v.expand_with_one();
    v.xyz() / v.w
  }
}

#[rustfmt::skip]
impl<T: Sized> Mat4<T> {
  /// Entries in column major order.
  #[allow(clippy::too_many_arguments)]
  pub const fn new(
    m11: T, m12: T, m13: T, m14: T,
    m21: T, m22: T, m23: T, m24: T,
    m31: T, m32: T, m33: T, m34: T,
    m41: T, m42: T, m43: T, m44: T,
  ) -> Self {
    Self {
      a1: m11, a2: m12, a3: m13, a4: m14,
      b1: m21, b2: m22, b3: m23, b4: m24,
      c1: m31, c2: m32, c3: m33, c4: m34,
      d1: m41, d2: m42, d3: m43, d4: m44,
    }
  }
}

impl<T: Copy> Mat4<T> {
  pub fn new_from_column(c1: Vec4<T>, c2: Vec4<T>, c3: Vec4<T>, c4: Vec4<T>) -> Self {
    #[rustfmt::skip]
    let mat = Self {
      a1: c1.x, a2: c1.y, a3: c1.z, a4: c1.w,
      b1: c2.x, b2: c2.y, b3: c2.z, b4: c2.w,
      c1: c3.x, c2: c3.y, c3: c3.z, c4: c3.w,
      d1: c4.x, d2: c4.y, d3: c4.z, d4: c4.w,
    };
    mat
  }

  pub fn columns(&self) -> [Vec4<T>; 4] {
    [
      Vec4::new(self.a1, self.a2, self.a3, self.a4),
      Vec4::new(self.b1, self.b2, self.b3, self.b4),
      Vec4::new(self.c1, self.c2, self.c3, self.c4),
      Vec4::new(self.d1, self.d2, self.d3, self.d4),
    ]
  }

  pub fn position(&self) -> Vec3<T> {
    Vec3::new(self.d1, self.d2, self.d3)
  }

  /// The upper left 2x2 block.
  pub fn to_mat2(&self) -> Mat2<T> {
    #[rustfmt::skip]
    let mat = Mat2 {
      a1: self.a1, a2: self.a2,
      b1: self.b1, b2: self.b2,
    };
    mat
  }

  /// Drop the z row and column, lossy when the matrix carries any 3d information.
  pub fn to_mat3(&self) -> Mat3<T> {
    #[rustfmt::skip]
    let mat = Mat3 {
      a1: self.a1, a2: self.a2, a3: self.a4,
      b1: self.b1, b2: self.b2, b3: self.b4,
      c1: self.d1, c2: self.d2, c3: self.d4,
    };
    mat
  }

  pub fn to_col_major(&self) -> [T; 16] {
    (*self).into()
  }

  /// Entry `[r][c]` lands at `r * 4 + c`.
  pub fn to_row_major(&self) -> [T; 16] {
    #[rustfmt::skip]
    let rows = [
      self.a1, self.b1, self.c1, self.d1,
      self.a2, self.b2, self.c2, self.d2,
      self.a3, self.b3, self.c3, self.d3,
      self.a4, self.b4, self.c4, self.d4,
    ];
    rows
  }

  pub fn from_col_major(entries: [T; 16]) -> Self {
    entries.into()
  }

  pub fn from_row_major(entries: [T; 16]) -> Self {
    #[rustfmt::skip]
    let [
      a1, b1, c1, d1,
      a2, b2, c2, d2,
      a3, b3, c3, d3,
      a4, b4, c4, d4,
    ] = entries;
    #[rustfmt::skip]
    let mat = Self {
      a1, a2, a3, a4,
      b1, b2, b3, b4,
      c1, c2, c3, c4,
      d1, d2, d3, d4,
    };
    mat
  }

  pub fn from_col_major_slice(entries: &[T]) -> Result<Self, MatrixError> {
    Ok(Self::from_col_major(read_sixteen(entries)?))
  }

  pub fn from_row_major_slice(entries: &[T]) -> Result<Self, MatrixError> {
    Ok(Self::from_row_major(read_sixteen(entries)?))
  }

  pub fn set_col_major(&mut self, entries: [T; 16]) -> &mut Self {
    *self = Self::from_col_major(entries);
    self
  }

  pub fn set_row_major(&mut self, entries: [T; 16]) -> &mut Self {
    *self = Self::from_row_major(entries);
    self
  }
}

fn read_sixteen<T: Copy>(entries: &[T]) -> Result<[T; 16], MatrixError> {
  entries.try_into().map_err(|_| MatrixError::SliceLength {
    expected: 16,
    actual: entries.len(),
  })
}

impl<T: Scalar> Mat4<T> {
  pub fn as_col_major(&self) -> &[T; 16] {
    bytemuck::cast_ref(self)
  }

  /// Checked form of [`Mat4::rc`].
  pub fn get(&self, row: usize, col: usize) -> Option<T> {
    (row < 4 && col < 4).then(|| self.as_col_major()[col * 4 + row])
  }

  /// Entry at `[row][col]`.
  ///
  /// # Panics
  ///
  /// If `row` or `col` is greater than 3.
  pub fn rc(&self, row: usize, col: usize) -> T {
    assert!(row < 4 && col < 4, "matrix index out of range: [{row}][{col}]");
    self.as_col_major()[col * 4 + row]
  }

  /// # Panics
  ///
  /// If `row` or `col` is greater than 3.
  pub fn set_rc(&mut self, row: usize, col: usize, value: T) -> &mut Self {
    assert!(row < 4 && col < 4, "matrix index out of range: [{row}][{col}]");
    let entries: &mut [T; 16] = bytemuck::cast_mut(self);
    entries[col * 4 + row] = value;
    self
  }

  /// Upper left 3x3 from a row major array, the rest is reset to identity.
  pub fn from_3x3_row_major(entries: [T; 9]) -> Self {
    let [a1, b1, c1, a2, b2, c2, a3, b3, c3] = entries;
    let (zero, one) = (T::zero(), T::one());

    #[rustfmt::skip]
    let mat = Mat4::new(
      a1,   a2,   a3,   zero,
      b1,   b2,   b3,   zero,
      c1,   c2,   c3,   zero,
      zero, zero, zero, one,
    );
    mat
  }

  pub fn set_3x3_row_major(&mut self, entries: [T; 9]) -> &mut Self {
    *self = Self::from_3x3_row_major(entries);
    self
  }

  pub fn set_identity(&mut self) -> &mut Self {
    *self = Self::identity();
    self
  }

  pub fn translate(translate: impl Into<Vec3<T>>) -> Self {
    let Vec3 { x, y, z } = translate.into();
    let (zero, one) = (T::zero(), T::one());

    #[rustfmt::skip]
    let mat = Mat4::new(
      one,  zero, zero, zero,
      zero, one,  zero, zero,
      zero, zero, one,  zero,
      x,    y,    z,    one,
    );
    mat
  }

  pub fn scale(scale: impl Into<Vec3<T>>) -> Self {
    let Vec3 { x, y, z } = scale.into();
    let (zero, one) = (T::zero(), T::one());

    #[rustfmt::skip]
    let mat = Mat4::new(
      x,    zero, zero, zero,
      zero, y,    zero, zero,
      zero, zero, z,    zero,
      zero, zero, zero, one,
    );
    mat
  }

  /// Rotation of `radians` about `axis`, see [`Mat4::set_rotate_about_radians`].
  pub fn rotate(axis: impl Into<Vec3<T>>, radians: T) -> Self {
    let mut m = Self::identity();
    m.set_rotate_about_radians(axis, radians);
    m
  }

  /// `a * b`, the transform that applies `b` first.
  pub fn concat(a: Self, b: Self) -> Self {
    a * b
  }

  pub fn set_concat(&mut self, a: Self, b: Self) -> &mut Self {
    *self = a * b;
    self
  }

  /// `self = self * m`
  pub fn pre_concat(&mut self, m: Self) -> &mut Self {
    *self = *self * m;
    self
  }

  /// `self = m * self`
  pub fn post_concat(&mut self, m: Self) -> &mut Self {
    *self = m * *self;
    self
  }

  pub fn set_translate(&mut self, translate: impl Into<Vec3<T>>) -> &mut Self {
    *self = Self::translate(translate);
    self
  }

  /// `self = self * translate`
  pub fn pre_translate(&mut self, translate: impl Into<Vec3<T>>) -> &mut Self {
    let Vec3 { x, y, z } = translate.into();
    let [a, b, c, d] = self.columns();
    *self = Self::new_from_column(a, b, c, a * x + b * y + c * z + d);
    self
  }

  /// `self = translate * self`
  pub fn post_translate(&mut self, translate: impl Into<Vec3<T>>) -> &mut Self {
    let t: Vec3<T> = translate.into();
    let t = t.expand_with(T::zero());
    let [a, b, c, d] = self.columns().map(|col| col + t * col.w);
    *self = Self::new_from_column(a, b, c, d);
    self
  }

  pub fn set_scale(&mut self, scale: impl Into<Vec3<T>>) -> &mut Self {
    *self = Self::scale(scale);
    self
  }

  /// `self = self * scale`
  pub fn pre_scale(&mut self, scale: impl Into<Vec3<T>>) -> &mut Self {
    let Vec3 { x, y, z } = scale.into();
    let [a, b, c, d] = self.columns();
    *self = Self::new_from_column(a * x, b * y, c * z, d);
    self
  }

  /// `self = scale * self`
  pub fn post_scale(&mut self, scale: impl Into<Vec3<T>>) -> &mut Self {
    let s: Vec3<T> = scale.into();
    let s = s.expand_with(T::one());
    let [a, b, c, d] = self
      .columns()
      .map(|col| Vec4::new(col.x * s.x, col.y * s.y, col.z * s.z, col.w * s.w));
    *self = Self::new_from_column(a, b, c, d);
    self
  }

  /// Axis of any length is accepted. A zero length axis resets to identity instead of
  /// producing NaN.
  ///
  /// The axis is normalized in f64, so f32 axes whose squared length leaves the f32
  /// range still produce a rotation.
  pub fn set_rotate_about_radians(&mut self, axis: impl Into<Vec3<T>>, radians: T) -> &mut Self {
    let Vec3 { x, y, z } = axis.into();
    let axis = Vec3::new(x.widen(), y.widen(), z.widen());
    if axis.length2() == 0. {
      log::debug!("rotation axis has zero length, reset to identity");
      return self.set_identity();
    }
    *self = rotation_about_unit(axis.into_normalized(), radians.widen()).map(T::narrow);
    self
  }

  pub fn set_rotate_about_degrees(&mut self, axis: impl Into<Vec3<T>>, degrees: Deg<T>) -> &mut Self {
    self.set_rotate_about_radians(axis, degrees.to_rad())
  }

  /// Right hand rotation about a unit axis, overwrites the whole matrix.
  pub fn set_rotate_about_radians_unit(&mut self, axis: NormalizedVec3<T>, radians: T) -> &mut Self {
    let Vec3 { x, y, z } = axis.value;
    // SAFETY: widening to f64 is exact, the length is unchanged
    let axis = unsafe { NormalizedVec3::wrap(Vec3::new(x.widen(), y.widen(), z.widen())) };
    *self = rotation_about_unit(axis, radians.widen()).map(T::narrow);
    self
  }

  /// The full 4x4 product with a homogeneous vector given as plain scalars.
  pub fn map_scalars(&self, src: [T; 4]) -> [T; 4] {
    (*self * Vec4::from(src)).to_array()
  }

  /// Same as [`Mat4::map_scalars`] writing back into the source, the result is
  /// computed in full before anything is stored.
  pub fn map_scalars_in_place(&self, v: &mut [T; 4]) {
    let result = self.map_scalars(*v);
    *v = result;
  }
}

fn rotation_about_unit(axis: NormalizedVec3<f64>, radians: f64) -> Mat4<f64> {
  let Vec3 { x, y, z } = axis.value;
  let (s, c) = radians.sin_cos();
  let one_minus_c = 1. - c;

  let (xs, ys, zs) = (x * s, y * s, z * s);
  let (x_c, y_c, z_c) = (x * one_minus_c, y * one_minus_c, z * one_minus_c);
  let (xy_c, yz_c, zx_c) = (x * y_c, y * z_c, z * x_c);

  #[rustfmt::skip]
  let rotation = Mat4::new(
    x * x_c + c, xy_c + zs,   zx_c - ys,   0.,
    xy_c - zs,   y * y_c + c, yz_c + xs,   0.,
    zx_c + ys,   yz_c - xs,   z * z_c + c, 0.,
    0.,          0.,          0.,          1.,
  );
  rotation
}

/// Embed a planar transform, the z row and column pass through untouched.
impl<T: Scalar> From<Mat3<T>> for Mat4<T> {
  fn from(m: Mat3<T>) -> Self {
    let (zero, one) = (T::zero(), T::one());

    #[rustfmt::skip]
    let mat = Mat4::new(
      m.a1, m.a2, zero, m.a3,
      m.b1, m.b2, zero, m.b3,
      zero, zero, one,  zero,
      m.c1, m.c2, zero, m.c3,
    );
    mat
  }
}

impl<T> num_traits::Zero for Mat4<T>
where
  T: num_traits::Zero + Copy + PartialEq,
{
  #[inline(always)]
  fn zero() -> Self {
    #[rustfmt::skip]
    let mat = Self {
      a1: T::zero(), a2: T::zero(), a3: T::zero(), a4: T::zero(),
      b1: T::zero(), b2: T::zero(), b3: T::zero(), b4: T::zero(),
      c1: T::zero(), c2: T::zero(), c3: T::zero(), c4: T::zero(),
      d1: T::zero(), d2: T::zero(), d3: T::zero(), d4: T::zero(),
    };
    mat
  }
  #[inline(always)]
  fn is_zero(&self) -> bool {
    self.eq(&Self::zero())
  }
}

impl<T> num_traits::One for Mat4<T>
where
  T: num_traits::One + num_traits::Zero + Copy,
{
  #[inline(always)]
  fn one() -> Self {
    #[rustfmt::skip]
    let mat = Self {
      a1: T::one(),  a2: T::zero(), a3: T::zero(), a4: T::zero(),
      b1: T::zero(), b2: T::one(),  b3: T::zero(), b4: T::zero(),
      c1: T::zero(), c2: T::zero(), c3: T::one(),  c4: T::zero(),
      d1: T::zero(), d2: T::zero(), d3: T::zero(), d4: T::one(),
    };
    mat
  }
}

#[cfg(test)]
pub(crate) fn max_diff<T: Scalar>(a: &Mat4<T>, b: &Mat4<T>) -> T {
  a.as_col_major()
    .iter()
    .zip(b.as_col_major())
    .fold(T::zero(), |acc, (x, y)| acc.max((*x - *y).abs()))
}

#[cfg(test)]
fn sample_perspective() -> Mat4<f64> {
  let projection = cgmath::perspective(cgmath::Deg(60.), 1.5, 0.1, 100.);
  let view = cgmath::Matrix4::from_translation(cgmath::vec3(1., -2., -10.))
    * cgmath::Matrix4::from_axis_angle(cgmath::Vector3::new(0.6, 0.8, 0.), cgmath::Deg(33.));
  let m = projection * view;
  let entries: &[f64; 16] = m.as_ref();
  Mat4::from_col_major(*entries)
}

#[test]
fn identity_is_neutral() {
  let m = sample_perspective();
  let i = Mat4::identity();
  assert_eq!(m * i, m);
  assert_eq!(i * m, m);
  assert_eq!(Mat4::concat(m, i), m);
  assert_eq!(Mat4::concat(i, m), m);
  let mut chained = m;
  chained.pre_concat(i).post_concat(i);
  assert_eq!(chained, m);
}

#[test]
fn concat_is_associative() {
  let a = Mat4::<f64>::translate((1., 2., 3.));
  let b = Mat4::rotate((1., 1., 0.), 0.7);
  let c = sample_perspective();
  assert!(max_diff(&((a * b) * c), &(a * (b * c))) < 1e-9);

  let mut set = Mat4::zero();
  set.set_concat(a, b);
  assert_eq!(set, a * b);
  let mut pre = a;
  pre.pre_concat(b);
  assert_eq!(pre, a * b);
  let mut post = a;
  post.post_concat(b);
  assert_eq!(post, b * a);
}

#[test]
fn matches_cgmath_product() {
  let cg_a = cgmath::Matrix4::<f32>::from_translation(cgmath::vec3(1., 2., 3.));
  let cg_b = cgmath::Matrix4::<f32>::from_nonuniform_scale(3., -2., 0.5);
  let cg_r = cg_a * cg_b * cgmath::vec4(1., 2., 3., 1.);
  let cg_r: [f32; 4] = *cg_r.as_ref();

  let a = Mat4::<f32>::translate((1., 2., 3.));
  let b = Mat4::<f32>::scale((3., -2., 0.5));
  let r = a * b * Vec4::new(1., 2., 3., 1.);

  assert_eq!(cg_r, r.to_array());
}

#[test]
fn inverse_round_trips() {
  let samples = [
    Mat4::<f64>::translate((3., -4., 5.)),
    Mat4::scale((2., -0.5, 4.)),
    Mat4::translate((1., 2., 3.)) * Mat4::scale((2., 3., 4.)),
    Mat4::rotate((0.2, 1., -0.3), 1.1) * Mat4::translate((7., 0., -1.)),
    sample_perspective(),
  ];
  for m in samples {
    let inv = m.inverse().unwrap();
    assert!(max_diff(&(m * inv), &Mat4::identity()) < 1e-4, "{m:?}");
    assert!(max_diff(&(inv * m), &Mat4::identity()) < 1e-4, "{m:?}");

    let mut out = Mat4::zero();
    assert!(m.invert_into(&mut out));
    assert_eq!(out, inv);
  }
  assert_eq!(Mat4::<f32>::identity().inverse(), Some(Mat4::identity()));
}

#[test]
fn inverse_matches_cgmath() {
  use cgmath::SquareMatrix as _;
  let projection = cgmath::perspective(cgmath::Deg(45.), 1.2, 1., 50.);
  let model = cgmath::Matrix4::from_translation(cgmath::vec3(0.5, 1.5, -8.))
    * cgmath::Matrix4::from_angle_x(cgmath::Deg(20.));
  let cg = projection * model;
  let cg_entries: &[f64; 16] = cg.as_ref();
  let m = Mat4::from_col_major(*cg_entries);

  assert!((m.det() - cg.determinant()).abs() < 1e-9);

  let cg_inv = cg.invert().unwrap();
  let cg_inv_entries: &[f64; 16] = cg_inv.as_ref();
  let inv = m.inverse().unwrap();
  assert!(max_diff(&inv, &Mat4::from_col_major(*cg_inv_entries)) < 1e-9);
}

#[test]
fn singular_matrices_fail_to_invert() {
  let flat = Mat4::<f32>::scale((1., 0., 1.));
  assert_eq!(flat.inverse(), None);
  let flat = Mat4::<f32>::translate((1., 2., 3.)) * Mat4::scale((0., 1., 1.));
  assert_eq!(flat.inverse(), None);

  // two equal rows
  #[rustfmt::skip]
  let repeated = Mat4::<f32>::from_row_major([
    1., 2., 3., 4.,
    1., 2., 3., 4.,
    0., 1., 0., 2.,
    0., 0., 1., 1.,
  ]);
  assert_eq!(repeated.inverse(), None);

  let mut out = Mat4::identity();
  assert!(!repeated.invert_into(&mut out));
  assert_eq!(out, Mat4::identity());
  assert_eq!(repeated.inverse_or_identity(), Mat4::identity());
}

#[test]
fn determinant_paths() {
  assert_eq!(Mat4::<f32>::identity().det(), 1.);
  assert_eq!(Mat4::<f32>::scale((2., 3., 4.)).det(), 24.);
  assert_eq!(
    (Mat4::<f32>::translate((5., 6., 7.)) * Mat4::scale((2., -3., 4.))).det(),
    -24.
  );
  // a mirror flips the sign through the general path as well
  let mirrored = Mat4::<f64>::rotate((0., 0., 1.), 0.3) * Mat4::scale((-1., 1., 1.));
  assert!((mirrored.det() + 1.).abs() < 1e-12);

  #[rustfmt::skip]
  let general = Mat4::<f64>::from_row_major([
    2., 0., 1., 3.,
    1., 1., 0., 2.,
    0., 4., 1., 1.,
    1., 0., 2., 5.,
  ]);
  // cofactor expansion by hand along the first row
  assert_eq!(general.det(), 24.);
  assert_eq!(general.transpose().det(), 24.);

  let precise = Mat4::<f32>::rotate((1., 2., 3.), 0.5).map(f64::from);
  assert!((precise.det() - 1.).abs() < 1e-6);

  // f32 entries get their minors in f64, rounding happens once at the end
  #[rustfmt::skip]
  let near_singular = Mat4::<f32>::from_row_major([
    1., 1e4,      0., 0.,
    1., 1e4 + 1., 0., 0.,
    0., 0.,       1., 0.,
    0., 0.,       0., 1.5,
  ]);
  assert_eq!(near_singular.det(), near_singular.map(f64::from).det() as f32);
  assert_eq!(near_singular.det(), 1.5);
}

#[test]
fn transpose_twice_is_identity_operation() {
  let m = sample_perspective();
  assert_eq!(m.transpose().transpose(), m);

  let mut in_place = m;
  in_place.transpose_in_place();
  assert_eq!(in_place, m.transpose());
  in_place.transpose_in_place();
  assert_eq!(in_place, m);

  let mut i = Mat4::<f32>::identity();
  i.transpose_in_place();
  assert_eq!(i, Mat4::identity());
}

#[test]
fn classification() {
  assert_eq!(Mat4::<f32>::identity().type_mask(), TypeMask::IDENTITY);
  assert_eq!(
    Mat4::<f32>::translate((1., 0., 0.)).type_mask(),
    TypeMask::TRANSLATE
  );
  // translation on y alone must still be seen
  assert_eq!(
    Mat4::<f32>::translate((0., 1., 0.)).type_mask(),
    TypeMask::TRANSLATE
  );
  assert_eq!(Mat4::<f32>::scale((1., 1., 2.)).type_mask(), TypeMask::SCALE);
  assert_eq!(
    Mat4::<f32>::rotate((0., 0., 1.), 0.5).type_mask(),
    TypeMask::SCALE | TypeMask::AFFINE
  );
  assert_eq!(
    sample_perspective().type_mask(),
    TypeMask::FULL_PERSPECTIVE
  );

  let mut homogeneous_scale = Mat4::<f32>::identity();
  homogeneous_scale.d4 = 2.;
  assert_eq!(homogeneous_scale.type_mask(), TypeMask::FULL_PERSPECTIVE);
  assert!(homogeneous_scale.has_perspective());

  // recomputed from entries, never cached
  let mut m = Mat4::<f32>::identity();
  assert!(m.is_identity());
  m.set_rc(2, 3, 4.);
  assert_eq!(m.type_mask(), TypeMask::TRANSLATE);
  assert_eq!(m.type_mask(), m.type_mask());
  assert!(m.is_scale_translate());
}

#[test]
fn rotate_about_z() {
  let m = Mat4::<f32>::rotate((0., 0., 1.), std::f32::consts::FRAC_PI_2);
  let p = m * Vec3::new(1., 0., 0.);
  assert!(p.x.abs() < 1e-6);
  assert!((p.y - 1.).abs() < 1e-6);
  assert!(p.z.abs() < 1e-6);

  let mut by_degree = Mat4::<f32>::zero();
  by_degree.set_rotate_about_degrees((0., 0., 5.), Deg::by(90.));
  assert!(max_diff(&by_degree, &m) < 1e-6);
}

#[test]
fn rotate_about_zero_axis_is_identity() {
  for angle in [0., 1., -3.5, 100.] {
    let mut m = sample_perspective().map(|v| v as f32);
    m.set_rotate_about_radians((0., 0., 0.), angle);
    assert_eq!(m, Mat4::identity());
  }
}

#[test]
fn rotate_about_extreme_axis_lengths() {
  let unit = Mat4::<f32>::rotate((1., 0., 0.), 0.5);
  // squared lengths of these leave the f32 range in both directions
  for axis in [(1e20, 0., 0.), (1e-23, 0., 0.), (0., 3e19, 4e19)] {
    let m = Mat4::<f32>::rotate(axis, 0.5);
    assert!(!m.is_identity());
    assert!(m.as_col_major().iter().all(|v| v.is_finite()));
    if axis.0 != 0. {
      assert!(max_diff(&m, &unit) < 1e-6);
    }
  }

  let tiny = Mat4::<f32>::rotate((1e-23, 0., 0.), 0.5);
  assert!((tiny.b2 - 0.5f32.cos()).abs() < 1e-6);
  assert!((tiny.c2 + 0.5f32.sin()).abs() < 1e-6);

  let huge = Mat4::<f32>::rotate((0., 3e19, 4e19), 0.5);
  let expected = Mat4::<f32>::rotate((0., 0.6, 0.8), 0.5);
  assert!(max_diff(&huge, &expected) < 1e-6);
}

#[test]
fn rotate_matches_cgmath() {
  let axis = cgmath::Vector3::new(1., 2., 2.) / 3.;
  let cg = cgmath::Matrix4::<f64>::from_axis_angle(axis, cgmath::Rad(0.8));
  let cg_entries: &[f64; 16] = cg.as_ref();
  // unnormalized axis is normalized internally
  let m = Mat4::rotate((1., 2., 2.), 0.8);
  assert!(max_diff(&m, &Mat4::from_col_major(*cg_entries)) < 1e-12);
}

#[test]
fn closed_form_updates_match_concat() {
  let base = sample_perspective();

  let mut m = base;
  m.pre_translate((1., -2., 3.));
  assert!(max_diff(&m, &(base * Mat4::translate((1., -2., 3.)))) < 1e-12);

  let mut m = base;
  m.post_translate((1., -2., 3.));
  assert!(max_diff(&m, &(Mat4::translate((1., -2., 3.)) * base)) < 1e-12);

  let mut m = base;
  m.pre_scale((2., 0.5, -1.));
  assert!(max_diff(&m, &(base * Mat4::scale((2., 0.5, -1.)))) < 1e-12);

  let mut m = base;
  m.post_scale((2., 0.5, -1.));
  assert!(max_diff(&m, &(Mat4::scale((2., 0.5, -1.)) * base)) < 1e-12);

  let mut m = base;
  m.set_translate((4., 5., 6.));
  assert_eq!(m, Mat4::translate((4., 5., 6.)));
  m.set_scale((4., 5., 6.));
  assert_eq!(m, Mat4::scale((4., 5., 6.)));
}

#[test]
fn inverse_concat_round_trips() {
  let base = Mat4::<f64>::rotate((0., 1., 0.), 0.4) * Mat4::translate((1., 2., 3.));

  let m = Mat4::rotate((1., 0., 1.), 1.3) * Mat4::scale((2., 2., 0.5));
  let inv = m.inverse().unwrap();
  let mut round_trip = base;
  round_trip.pre_concat(m).pre_concat(inv);
  assert!(max_diff(&round_trip, &base) < 1e-9);

  let s = Mat4::scale((2., 4., 8.));
  let s_inv = s.inverse().unwrap();
  let mut scaled = Mat4::scale((3., 5., 7.));
  scaled.pre_concat(s).post_concat(s_inv);
  assert!(max_diff(&scaled, &Mat4::scale((3., 5., 7.))) < 1e-9);
}

#[test]
fn row_and_column_major_layouts() {
  let values: [f32; 16] = std::array::from_fn(|i| i as f32);
  let m = Mat4::from_row_major(values);
  assert_eq!(m.to_row_major(), values);
  assert_eq!(m.rc(0, 3), 3.);
  assert_eq!(m.rc(3, 0), 12.);
  assert_eq!(m.to_col_major(), m.transpose().to_row_major());
  assert_eq!(Mat4::from_col_major(m.to_col_major()), m);
  assert_eq!(m.as_col_major(), &m.to_col_major());

  let mut n = Mat4::zero();
  n.set_col_major(values);
  assert_eq!(n, m.transpose());
  n.set_row_major(values);
  assert_eq!(n, m);

  assert_eq!(Mat4::from_row_major_slice(&values), Ok(m));
  assert_eq!(Mat4::from_col_major_slice(&values), Ok(m.transpose()));
  assert_eq!(
    Mat4::<f32>::from_row_major_slice(&values[..15]),
    Err(MatrixError::SliceLength {
      expected: 16,
      actual: 15
    })
  );
}

#[test]
fn entry_access() {
  let mut m = Mat4::<f32>::identity();
  m.set_rc(1, 2, 7.).set_rc(3, 3, 2.);
  assert_eq!(m.rc(1, 2), 7.);
  assert_eq!(m.b3, 0.);
  assert_eq!(m.c2, 7.);
  assert_eq!(m.d4, 2.);
  assert_eq!(m.get(1, 2), Some(7.));
  assert_eq!(m.get(4, 0), None);
  assert_eq!(m.get(0, 4), None);

  m.set_identity();
  assert_eq!(m, Mat4::identity());
}

#[test]
fn set_3x3_row_major_resets_the_rest() {
  let mut m = sample_perspective().map(|v| v as f32);
  m.set_3x3_row_major([1., 2., 3., 4., 5., 6., 7., 8., 9.]);
  assert_eq!(m.rc(0, 1), 2.);
  assert_eq!(m.rc(1, 0), 4.);
  assert_eq!(m.rc(2, 2), 9.);
  assert_eq!(m.position(), Vec3::new(0., 0., 0.));
  assert_eq!((m.a4, m.b4, m.c4, m.d4), (0., 0., 0., 1.));
}

#[test]
fn map_scalars_handles_aliasing() {
  let m = sample_perspective();
  let src = [1.5, -2., 0.25, 1.];
  let expected = m.map_scalars(src);
  let mut v = src;
  m.map_scalars_in_place(&mut v);
  assert_eq!(v, expected);
  assert_eq!(expected, (m * Vec4::from(src)).to_array());
}

#[test]
fn planar_embedding() {
  let planar = Mat3::<f32>::translate((3., 4.)) * Mat3::rotate(0.3) * Mat3::scale((2., 5.));
  let m = Mat4::from(planar);
  assert_eq!(m.to_mat3(), planar);
  assert_eq!(m.c3, 1.);
  assert_eq!(m.d3, 0.);

  let mut projective = planar;
  projective.a3 = 0.01;
  projective.c3 = 2.;
  let m = Mat4::from(projective);
  assert_eq!(m.to_mat3(), projective);
  assert!(m.has_perspective());

  // z information is dropped by the truncation
  let deep = Mat4::<f32>::translate((1., 2., 3.));
  assert_eq!(deep.to_mat3(), Mat3::translate((1., 2.)));
}

#[test]
fn axis_alignment() {
  assert!(Mat4::<f64>::identity().preserves_2d_axis_alignment(1e-6));
  assert!(Mat4::<f64>::scale((2., -3., 0.)).preserves_2d_axis_alignment(1e-6));
  let quarter = Mat4::<f64>::rotate((0., 0., 1.), std::f64::consts::FRAC_PI_2);
  assert!(quarter.preserves_2d_axis_alignment(1e-6));
  assert!(!quarter.preserves_2d_axis_alignment(0.));
  let tilted = Mat4::<f64>::rotate((0., 0., 1.), 0.3);
  assert!(!tilted.preserves_2d_axis_alignment(1e-6));

  let mut projective = Mat4::<f64>::identity();
  projective.b4 = 0.5;
  assert!(!projective.preserves_2d_axis_alignment(1e-6));
  // z perspective does not affect the planar test
  let mut depth = Mat4::<f64>::identity();
  depth.c4 = 0.5;
  assert!(depth.preserves_2d_axis_alignment(1e-6));
}

#[test]
fn serializable_plain_data() {
  fn assert_serde<S: Serialize + for<'de> Deserialize<'de>>() {}
  assert_serde::<Mat4<f32>>();
  let identity = Mat4::<f32>::identity();
  let bytes: &[u8] = bytemuck::bytes_of(&identity);
  assert_eq!(bytes.len(), 64);
}
