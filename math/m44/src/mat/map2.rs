use crate::*;

// Every kernel treats the source as the homogeneous point (x, y, 0, 1), so the
// z column of the matrix never contributes.

#[inline(always)]
fn map_identity<U: Scalar>(_: &Mat4<U>, p: Vec2<U>) -> Vec4<U> {
  Vec4::new(p.x, p.y, U::zero(), U::one())
}

#[inline(always)]
fn map_translate<U: Scalar>(m: &Mat4<U>, p: Vec2<U>) -> Vec4<U> {
  Vec4::new(p.x + m.d1, p.y + m.d2, m.d3, U::one())
}

#[inline(always)]
fn map_scale_translate<U: Scalar>(m: &Mat4<U>, p: Vec2<U>) -> Vec4<U> {
  Vec4::new(m.a1 * p.x + m.d1, m.b2 * p.y + m.d2, m.d3, U::one())
}

#[inline(always)]
fn map_affine<U: Scalar>(m: &Mat4<U>, p: Vec2<U>) -> Vec4<U> {
  Vec4::new(
    m.a1 * p.x + m.b1 * p.y + m.d1,
    m.a2 * p.x + m.b2 * p.y + m.d2,
    m.a3 * p.x + m.b3 * p.y + m.d3,
    U::one(),
  )
}

#[inline(always)]
fn map_perspective<U: Scalar>(m: &Mat4<U>, p: Vec2<U>) -> Vec4<U> {
  Vec4::new(
    m.a1 * p.x + m.b1 * p.y + m.d1,
    m.a2 * p.x + m.b2 * p.y + m.d2,
    m.a3 * p.x + m.b3 * p.y + m.d3,
    m.a4 * p.x + m.b4 * p.y + m.d4,
  )
}

fn map_batch<U: Scalar>(
  m: &Mat4<U>,
  src: &[Vec2<U>],
  dst: &mut [Vec4<U>],
  kernel: impl Fn(&Mat4<U>, Vec2<U>) -> Vec4<U>,
) {
  for (p, out) in src.iter().zip(dst) {
    *out = kernel(m, *p);
  }
}

/// The i-th output occupies scalars `4i..4i + 4` while its source sits at `2i..2i + 2`,
/// walking from the end means no source is overwritten before it is read.
fn map_batch_in_place<U: Scalar>(
  m: &Mat4<U>,
  buffer: &mut [U],
  count: usize,
  kernel: impl Fn(&Mat4<U>, Vec2<U>) -> Vec4<U>,
) {
  for i in (0..count).rev() {
    let p = Vec2::new(buffer[i * 2], buffer[i * 2 + 1]);
    let out = kernel(m, p);
    buffer[i * 4..i * 4 + 4].copy_from_slice(&out.to_array());
  }
}

impl<T: Scalar> Mat4<T> {
  /// The routine [`Mat4::map2`] runs for this matrix.
  pub fn map2_kernel(&self) -> Map2Kernel {
    self.type_mask().map2_kernel()
  }

  /// Map 2d points on the z = 0 plane to homogeneous 4d points, `dst[i] = self * (x, y, 0, 1)`.
  ///
  /// The kernel is chosen once per call from the type mask and skips the arithmetic
  /// the matrix class makes redundant. `U` may be wider than the matrix scalar, in which
  /// case the entries are promoted and the whole mapping runs in `U`.
  ///
  /// Only the first `src.len()` slots of `dst` are written. An empty `src` is a no-op.
  pub fn map2<U>(&self, src: &[Vec2<U>], dst: &mut [Vec4<U>]) -> Result<(), MatrixError>
  where
    U: Scalar + From<T>,
  {
    if dst.len() < src.len() {
      return Err(MatrixError::BufferTooSmall {
        required: src.len() * 4,
        actual: dst.len() * 4,
      });
    }
    if src.is_empty() {
      return Ok(());
    }

    let dst = &mut dst[..src.len()];
    let m = self.map(<U as From<T>>::from);
    match self.map2_kernel() {
      Map2Kernel::Identity => map_batch(&m, src, dst, map_identity),
      Map2Kernel::Translate => map_batch(&m, src, dst, map_translate),
      Map2Kernel::ScaleTranslate => map_batch(&m, src, dst, map_scale_translate),
      Map2Kernel::Affine => map_batch(&m, src, dst, map_affine),
      Map2Kernel::Perspective => map_batch(&m, src, dst, map_perspective),
    }
    Ok(())
  }

  /// [`Mat4::map2`] over flat scalar buffers, `src2` holds `x, y` pairs and `dst4`
  /// receives `x, y, z, w` quadruples.
  pub fn map2_flat<U>(&self, src2: &[U], dst4: &mut [U]) -> Result<(), MatrixError>
  where
    U: Scalar + From<T>,
  {
    if src2.len() % 2 != 0 {
      return Err(MatrixError::OddScalarCount(src2.len()));
    }
    let required = src2.len() * 2;
    if dst4.len() < required {
      return Err(MatrixError::BufferTooSmall {
        required,
        actual: dst4.len(),
      });
    }

    let src: &[Vec2<U>] = bytemuck::cast_slice(src2);
    let dst: &mut [Vec4<U>] = bytemuck::cast_slice_mut(&mut dst4[..required]);
    self.map2(src, dst)
  }

  /// Map `count` points whose 2d sources occupy the front of `buffer`, replacing them
  /// with their 4d results. The buffer must hold `count * 4` scalars.
  ///
  /// Gives the same results as [`Mat4::map2_flat`] between distinct buffers.
  pub fn map2_in_place<U>(&self, buffer: &mut [U], count: usize) -> Result<(), MatrixError>
  where
    U: Scalar + From<T>,
  {
    let required = count
      .checked_mul(4)
      .ok_or(MatrixError::PointCountOverflow(count))?;
    if buffer.len() < required {
      return Err(MatrixError::BufferTooSmall {
        required,
        actual: buffer.len(),
      });
    }
    if count == 0 {
      return Ok(());
    }

    let m = self.map(<U as From<T>>::from);
    match self.map2_kernel() {
      Map2Kernel::Identity => map_batch_in_place(&m, buffer, count, map_identity),
      Map2Kernel::Translate => map_batch_in_place(&m, buffer, count, map_translate),
      Map2Kernel::ScaleTranslate => map_batch_in_place(&m, buffer, count, map_scale_translate),
      Map2Kernel::Affine => map_batch_in_place(&m, buffer, count, map_affine),
      Map2Kernel::Perspective => map_batch_in_place(&m, buffer, count, map_perspective),
    }
    Ok(())
  }
}

#[cfg(test)]
use rand::{rngs::StdRng, Rng, SeedableRng};

#[cfg(test)]
fn random_points(rng: &mut StdRng, count: usize) -> Vec<Vec2<f32>> {
  (0..count)
    .map(|_| Vec2::new(rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0)))
    .collect()
}

#[cfg(test)]
fn one_of_each_kernel() -> Vec<(Map2Kernel, Mat4<f32>)> {
  let mut perspective = Mat4::rotate((1., 2., 0.5), 0.6) * Mat4::translate((1., 2., 3.));
  perspective.a4 = 0.01;
  perspective.b4 = -0.02;
  perspective.d4 = 1.5;

  vec![
    (Map2Kernel::Identity, Mat4::identity()),
    (Map2Kernel::Translate, Mat4::translate((3., -4., 5.))),
    (Map2Kernel::ScaleTranslate, Mat4::scale((2., -0.5, 3.))),
    (
      Map2Kernel::ScaleTranslate,
      Mat4::translate((1., 2., 3.)) * Mat4::scale((2., 4., 1.)),
    ),
    (
      Map2Kernel::Affine,
      Mat4::translate((7., 8., 9.)) * Mat4::rotate((0., 0., 1.), 0.4),
    ),
    (Map2Kernel::Perspective, perspective),
  ]
}

#[test]
fn kernels_agree_with_full_product() {
  let mut rng = StdRng::seed_from_u64(42);
  let src = random_points(&mut rng, 64);

  for (kernel, m) in one_of_each_kernel() {
    assert_eq!(m.map2_kernel(), kernel);

    let mut dst = vec![Vec4::new(0., 0., 0., 0.); src.len()];
    m.map2(&src, &mut dst).unwrap();

    for (p, out) in src.iter().zip(&dst) {
      let expected = m * p.expand_to_point();
      let tolerance = 1e-4 * (1. + expected.x.abs().max(expected.y.abs()));
      assert!((out.x - expected.x).abs() <= tolerance, "{kernel:?}");
      assert!((out.y - expected.y).abs() <= tolerance, "{kernel:?}");
      assert!((out.z - expected.z).abs() <= tolerance, "{kernel:?}");
      assert!((out.w - expected.w).abs() <= tolerance, "{kernel:?}");
    }
  }
}

#[test]
fn identity_and_translate_are_exact() {
  let src = [Vec2::new(1.5_f32, -2.), Vec2::new(0., 7.)];
  let mut dst = [Vec4::new(9., 9., 9., 9.); 2];

  Mat4::<f32>::identity().map2(&src, &mut dst).unwrap();
  assert_eq!(dst, [Vec4::new(1.5, -2., 0., 1.), Vec4::new(0., 7., 0., 1.)]);

  Mat4::<f32>::translate((3., 4., 5.)).map2(&src, &mut dst).unwrap();
  assert_eq!(dst, [Vec4::new(4.5, 2., 5., 1.), Vec4::new(3., 11., 5., 1.)]);
}

#[test]
fn concat_order_of_translate_and_scale() {
  let src = [Vec2::new(1.0_f32, 1.)];
  let mut dst = [Vec4::new(0., 0., 0., 0.)];

  // scale applied first, then the translation
  let mut m = Mat4::<f32>::translate((3., 4., 5.));
  m.pre_concat(Mat4::scale((2., 2., 2.)));
  m.map2(&src, &mut dst).unwrap();
  assert_eq!(dst[0], Vec4::new(5., 6., 5., 1.));

  // translation first, then everything is scaled
  let mut m = Mat4::<f32>::translate((3., 4., 5.));
  m.post_concat(Mat4::scale((2., 2., 2.)));
  m.map2(&src, &mut dst).unwrap();
  assert_eq!(dst[0], Vec4::new(8., 10., 10., 1.));
}

#[test]
fn empty_input_is_noop() {
  let mut dst: [Vec4<f32>; 0] = [];
  for (_, m) in one_of_each_kernel() {
    m.map2::<f32>(&[], &mut dst).unwrap();
    m.map2_flat::<f32>(&[], &mut []).unwrap();
    m.map2_in_place::<f32>(&mut [], 0).unwrap();
  }
  // untouched slots beyond the input stay as they are
  let mut dst = [Vec4::new(7., 7., 7., 7.)];
  Mat4::<f32>::identity().map2(&[], &mut dst).unwrap();
  assert_eq!(dst[0], Vec4::new(7., 7., 7., 7.));
}

#[test]
fn in_place_matches_distinct_buffers() {
  let mut rng = StdRng::seed_from_u64(7);
  let src = random_points(&mut rng, 33);
  let flat_src: &[f32] = bytemuck::cast_slice(&src);

  for (kernel, m) in one_of_each_kernel() {
    let mut expected = vec![0.; src.len() * 4];
    m.map2_flat(flat_src, &mut expected).unwrap();

    let mut buffer = vec![0.; src.len() * 4];
    buffer[..flat_src.len()].copy_from_slice(flat_src);
    m.map2_in_place(&mut buffer, src.len()).unwrap();

    assert_eq!(buffer, expected, "{kernel:?}");
  }
}

#[test]
fn double_precision_variant() {
  let mut rng = StdRng::seed_from_u64(3);
  let src = random_points(&mut rng, 16);
  let src_f64: Vec<Vec2<f64>> = src.iter().map(|p| Vec2::new(p.x.into(), p.y.into())).collect();

  for (kernel, m) in one_of_each_kernel() {
    let mut single = vec![Vec4::new(0., 0., 0., 0.); src.len()];
    m.map2(&src, &mut single).unwrap();

    let mut double = vec![Vec4::new(0., 0., 0., 0.); src.len()];
    m.map2(&src_f64, &mut double).unwrap();

    // the f64 path equals mapping with the promoted matrix
    let mut promoted = vec![Vec4::new(0., 0., 0., 0.); src.len()];
    m.map(f64::from).map2(&src_f64, &mut promoted).unwrap();
    assert_eq!(double, promoted, "{kernel:?}");

    for (s, d) in single.iter().zip(&double) {
      let tolerance = 1e-3 * (1. + d.x.abs().max(d.y.abs()));
      assert!((f64::from(s.x) - d.x).abs() <= tolerance, "{kernel:?}");
      assert!((f64::from(s.w) - d.w).abs() <= tolerance, "{kernel:?}");
    }
  }
}

#[test]
fn buffer_validation() {
  let m = Mat4::<f32>::translate((1., 2., 3.));
  let src = [Vec2::new(0., 0.); 3];
  let mut dst = [Vec4::new(0., 0., 0., 0.); 2];
  assert_eq!(
    m.map2(&src, &mut dst),
    Err(MatrixError::BufferTooSmall {
      required: 12,
      actual: 8
    })
  );

  assert_eq!(
    m.map2_flat(&[1., 2., 3.], &mut [0.; 8]),
    Err(MatrixError::OddScalarCount(3))
  );
  assert_eq!(
    m.map2_flat(&[1., 2., 3., 4.], &mut [0.; 7]),
    Err(MatrixError::BufferTooSmall {
      required: 8,
      actual: 7
    })
  );
  assert_eq!(
    m.map2_in_place(&mut [0.; 7], 2),
    Err(MatrixError::BufferTooSmall {
      required: 8,
      actual: 7
    })
  );

  // a larger destination only has its leading slots written
  // sizes that do not fit in usize are rejected, not wrapped
  assert_eq!(
    m.map2_in_place(&mut [0.; 4], 1 << (usize::BITS - 2)),
    Err(MatrixError::PointCountOverflow(1 << (usize::BITS - 2)))
  );
  assert_eq!(
    m.map2_in_place(&mut [0.; 4], usize::MAX),
    Err(MatrixError::PointCountOverflow(usize::MAX))
  );

  let mut dst = [-1.; 10];
  m.map2_flat(&[1., 1.], &mut dst).unwrap();
  assert_eq!(dst[..4], [2., 3., 3., 1.]);
  assert_eq!(dst[4..], [-1.; 6]);
}
