bitflags::bitflags! {
  /// Structural summary of a [`Mat4`](crate::Mat4), recomputed from the entries on every query.
  ///
  /// Only used to pick a cheaper code path, an empty mask is the identity.
  #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
  pub struct TypeMask: u8 {
    /// any translation entry is nonzero
    const TRANSLATE = 1 << 0;
    /// any diagonal scale entry is not one
    const SCALE = 1 << 1;
    /// the linear part skews or rotates
    const AFFINE = 1 << 2;
    /// the bottom row is not `(0, 0, 0, 1)`, always reported together with every other flag
    const PERSPECTIVE = 1 << 3;
  }
}

impl TypeMask {
  pub const IDENTITY: Self = Self::empty();

  /// The mask reported for a matrix with a projective bottom row.
  pub const FULL_PERSPECTIVE: Self = Self::all();

  pub fn is_scale_translate(self) -> bool {
    (self - (Self::SCALE | Self::TRANSLATE)).is_empty()
  }

  pub fn map2_kernel(self) -> Map2Kernel {
    if self.contains(Self::PERSPECTIVE) {
      Map2Kernel::Perspective
    } else if self.contains(Self::AFFINE) {
      Map2Kernel::Affine
    } else if self.contains(Self::SCALE) {
      Map2Kernel::ScaleTranslate
    } else if self.contains(Self::TRANSLATE) {
      Map2Kernel::Translate
    } else {
      Map2Kernel::Identity
    }
  }
}

/// The specialized 2d to homogeneous 4d mapping routines, each doing only the
/// arithmetic its class of matrix needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Map2Kernel {
  Identity,
  Translate,
  /// scale with or without translation
  ScaleTranslate,
  Affine,
  Perspective,
}

#[test]
fn kernel_selection() {
  assert_eq!(TypeMask::IDENTITY.map2_kernel(), Map2Kernel::Identity);
  assert_eq!(TypeMask::TRANSLATE.map2_kernel(), Map2Kernel::Translate);
  assert_eq!(TypeMask::SCALE.map2_kernel(), Map2Kernel::ScaleTranslate);
  assert_eq!(
    (TypeMask::SCALE | TypeMask::TRANSLATE).map2_kernel(),
    Map2Kernel::ScaleTranslate
  );
  for extra in [TypeMask::empty(), TypeMask::SCALE, TypeMask::TRANSLATE] {
    assert_eq!((TypeMask::AFFINE | extra).map2_kernel(), Map2Kernel::Affine);
  }
  assert_eq!(
    TypeMask::FULL_PERSPECTIVE.map2_kernel(),
    Map2Kernel::Perspective
  );
  // perspective alone still routes to the general kernel
  assert_eq!(TypeMask::PERSPECTIVE.map2_kernel(), Map2Kernel::Perspective);

  assert!(TypeMask::IDENTITY.is_scale_translate());
  assert!((TypeMask::SCALE | TypeMask::TRANSLATE).is_scale_translate());
  assert!(!TypeMask::AFFINE.is_scale_translate());
  assert!(!TypeMask::FULL_PERSPECTIVE.is_scale_translate());
}
