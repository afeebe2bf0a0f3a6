#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixError {
  #[error("expect {expected} matrix entries, got {actual}")]
  SliceLength { expected: usize, actual: usize },
  #[error("destination holds {actual} scalars but {required} are required")]
  BufferTooSmall { required: usize, actual: usize },
  #[error("2d point buffer has odd scalar count {0}")]
  OddScalarCount(usize),
  #[error("{0} points exceed the addressable scalar count")]
  PointCountOverflow(usize),
}
