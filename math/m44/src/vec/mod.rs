mod dimension;
mod normalized;
mod vec2;
mod vec3;
mod vec4;

pub use dimension::*;
pub use normalized::*;
pub use vec2::*;
pub use vec3::*;
pub use vec4::*;

macro_rules! impl_vector_ops {
  ($VectorN:ident { $($field:ident),+ }, $Tuple:ty) => {
    impl<T: std::ops::Add<Output = T>> std::ops::Add for $VectorN<T> {
      type Output = Self;
      #[inline]
      fn add(self, rhs: Self) -> Self {
        $VectorN { $($field: self.$field + rhs.$field),+ }
      }
    }
    impl<T: std::ops::Sub<Output = T>> std::ops::Sub for $VectorN<T> {
      type Output = Self;
      #[inline]
      fn sub(self, rhs: Self) -> Self {
        $VectorN { $($field: self.$field - rhs.$field),+ }
      }
    }
    impl<T: std::ops::Mul<Output = T> + Copy> std::ops::Mul<T> for $VectorN<T> {
      type Output = Self;
      #[inline]
      fn mul(self, scalar: T) -> Self {
        $VectorN { $($field: self.$field * scalar),+ }
      }
    }
    impl<T: std::ops::Div<Output = T> + Copy> std::ops::Div<T> for $VectorN<T> {
      type Output = Self;
      #[inline]
      fn div(self, scalar: T) -> Self {
        $VectorN { $($field: self.$field / scalar),+ }
      }
    }
    impl<T: std::ops::Neg<Output = T>> std::ops::Neg for $VectorN<T> {
      type Output = Self;
      #[inline]
      fn neg(self) -> Self {
        $VectorN { $($field: -self.$field),+ }
      }
    }

    impl<T> From<$Tuple> for $VectorN<T> {
      #[inline]
      fn from(v: $Tuple) -> Self {
        let ($($field),+,) = v;
        $VectorN { $($field),+ }
      }
    }
  };
}

impl_vector_ops!(Vec2 { x, y }, (T, T));
impl_vector_ops!(Vec3 { x, y, z }, (T, T, T));
impl_vector_ops!(Vec4 { x, y, z, w }, (T, T, T, T));
