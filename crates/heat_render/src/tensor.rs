/// A rank-2 weight tensor, immutable once loaded.
///
/// Values are stored row-major; `data.len()` always equals `rows * cols`.
#[derive(Clone, Debug)]
pub struct Tensor {
    pub name: String,
    pub rows: usize,
    pub cols: usize,
    data: Vec<f32>,
}

impl Tensor {
    pub fn new(name: impl Into<String>, rows: usize, cols: usize, data: Vec<f32>) -> Self {
        assert_eq!(rows * cols, data.len(), "tensor data length must match shape");
        Self { name: name.into(), rows, cols, data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn value(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.cols + col]
    }

    pub fn values(&self) -> &[f32] {
        &self.data
    }
}
