mod dimension;
mod map2;
mod mat2;
mod mat3;
mod mat4;
mod type_mask;

pub use dimension::*;
pub use mat2::*;
pub use mat3::*;
pub use mat4::*;
pub use type_mask::*;

macro_rules! impl_matrix {
  ($MatrixN:ident { $($field:ident),+ }, $n:expr) => {
    impl<T: std::ops::Neg<Output = T>> std::ops::Neg for $MatrixN<T> {
      type Output = Self;
      #[inline]
      fn neg(self) -> Self {
        $MatrixN { $($field: -self.$field),+ }
      }
    }
    impl<T: std::ops::Add<Output = T>> std::ops::Add for $MatrixN<T> {
      type Output = Self;
      #[inline]
      fn add(self, rhs: Self) -> Self {
        $MatrixN { $($field: self.$field + rhs.$field),+ }
      }
    }
    impl<T: std::ops::Sub<Output = T>> std::ops::Sub for $MatrixN<T> {
      type Output = Self;
      #[inline]
      fn sub(self, rhs: Self) -> Self {
        $MatrixN { $($field: self.$field - rhs.$field),+ }
      }
    }
    impl<T: std::ops::Mul<Output = T> + Copy> std::ops::Mul<T> for $MatrixN<T> {
      type Output = Self;
      #[inline]
      fn mul(self, scalar: T) -> Self {
        $MatrixN { $($field: self.$field * scalar),+ }
      }
    }

    unsafe impl<T: bytemuck::Zeroable> bytemuck::Zeroable for $MatrixN<T> {}
    unsafe impl<T: bytemuck::Pod> bytemuck::Pod for $MatrixN<T> {}

    impl<T> $MatrixN<T> {
      /// Convert every entry, for example `f32` to `f64` before a precision sensitive step.
      pub fn map<X>(self, f: impl Fn(T) -> X) -> $MatrixN<X> {
        $MatrixN { $($field: f(self.$field)),+ }
      }
    }

    /// Column major.
    impl<T: Copy> From<[T; $n]> for $MatrixN<T> {
      #[inline]
      fn from(v: [T; $n]) -> Self {
        let [$($field),+] = v;
        $MatrixN { $($field),+ }
      }
    }

    /// Column major.
    impl<T> From<$MatrixN<T>> for [T; $n] {
      #[inline]
      fn from(m: $MatrixN<T>) -> Self {
        [$(m.$field),+]
      }
    }

    impl<T> AsRef<$MatrixN<T>> for $MatrixN<T> {
      fn as_ref(&self) -> &$MatrixN<T> {
        self
      }
    }

    impl<T> AsMut<$MatrixN<T>> for $MatrixN<T> {
      fn as_mut(&mut self) -> &mut $MatrixN<T> {
        self
      }
    }
  };
}

impl_matrix!(Mat2 { a1, a2, b1, b2 }, 4);
impl_matrix!(Mat3 { a1, a2, a3, b1, b2, b3, c1, c2, c3 }, 9);
#[rustfmt::skip]
impl_matrix!(Mat4 {
  a1, a2, a3, a4,
  b1, b2, b3, b4,
  c1, c2, c3, c4,
  d1, d2, d3, d4
}, 16);
