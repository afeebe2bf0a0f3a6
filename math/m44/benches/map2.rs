use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rendiation_m44::*;

fn generate_points(count: usize) -> Vec<f32> {
  let mut rng = StdRng::seed_from_u64(0);
  (0..count * 2).map(|_| rng.gen_range(-1000.0..1000.0)).collect()
}

fn criterion_benchmark(c: &mut Criterion) {
  let src = generate_points(black_box(10000));
  let mut dst = vec![0.; src.len() * 2];

  let mut perspective = Mat4::<f32>::rotate((0., 1., 1.), 0.3);
  perspective.a4 = 0.001;

  let cases = [
    ("identity", Mat4::<f32>::identity()),
    ("translate", Mat4::translate((10., 20., 0.))),
    ("scale translate", Mat4::translate((10., 20., 0.)) * Mat4::scale((2., 3., 1.))),
    ("affine", Mat4::rotate((0., 0., 1.), 0.3)),
    ("perspective", perspective),
  ];

  for (name, m) in cases {
    c.bench_function(&format!("map2 {name}"), |b| {
      b.iter(|| m.map2_flat(&src, &mut dst))
    });
  }

  let m = Mat4::<f32>::rotate((0., 0., 1.), 0.3);
  let mut dst64 = vec![0.; src.len() * 2];
  let src64: Vec<f64> = src.iter().map(|&v| v.into()).collect();
  c.bench_function("map2 affine double", |b| {
    b.iter(|| m.map2_flat(&src64, &mut dst64))
  });

  let mut buffer = vec![0.; src.len() * 2];
  c.bench_function("map2 affine in place", |b| {
    b.iter(|| {
      buffer[..src.len()].copy_from_slice(&src);
      m.map2_in_place(&mut buffer, src.len() / 2)
    })
  });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
