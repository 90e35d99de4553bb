//! Strided views over caller-owned sample buffers.
//!
//! Logical element `i` of a view lives at `data[i * stride]`. The kernels only
//! ever touch those positions; everything in between belongs to the caller.

use crate::error::{NslError, NslResult};

fn check_layout(len: usize, stride: usize, n: usize) -> NslResult<()> {
    if stride == 0 {
        return Err(NslError::InvalidStride);
    }
    if n == 0 {
        return Ok(());
    }
    let required = (n - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(1))
        .ok_or(NslError::InvalidStride)?;
    if len < required {
        return Err(NslError::BufferTooShort {
            n,
            stride,
            required,
            len,
        });
    }
    Ok(())
}

/// Read-only strided view of `n` samples.
#[derive(Debug, Clone, Copy)]
pub struct Strided<'a> {
    data: &'a [f64],
    stride: usize,
    n: usize,
}

impl<'a> Strided<'a> {
    pub fn new(data: &'a [f64], stride: usize, n: usize) -> NslResult<Self> {
        check_layout(data.len(), stride, n)?;
        Ok(Self { data, stride, n })
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn get(&self, i: usize) -> Option<f64> {
        (i < self.n).then(|| self.data[i * self.stride])
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + 'a {
        let data = self.data;
        data.iter().step_by(self.stride).take(self.n).copied()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }
}

/// Mutable strided view of `n` samples.
#[derive(Debug)]
pub struct StridedMut<'a> {
    data: &'a mut [f64],
    stride: usize,
    n: usize,
}

impl<'a> StridedMut<'a> {
    pub fn new(data: &'a mut [f64], stride: usize, n: usize) -> NslResult<Self> {
        check_layout(data.len(), stride, n)?;
        Ok(Self { data, stride, n })
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn get(&self, i: usize) -> Option<f64> {
        (i < self.n).then(|| self.data[i * self.stride])
    }

    /// Writes `value` at logical index `i`; indices past the end are ignored.
    pub fn set(&mut self, i: usize, value: f64) {
        if i < self.n {
            self.data[i * self.stride] = value;
        }
    }

    /// Copies the logical samples into a contiguous vector.
    pub fn to_vec(&self) -> Vec<f64> {
        self.data
            .iter()
            .step_by(self.stride)
            .take(self.n)
            .copied()
            .collect()
    }

    /// Writes `values` to the first `values.len()` logical positions.
    pub fn write_from(&mut self, values: &[f64]) -> NslResult<()> {
        if values.len() > self.n {
            return Err(NslError::LengthMismatch {
                expected: self.n,
                actual: values.len(),
            });
        }
        for (slot, v) in self.data.iter_mut().step_by(self.stride).zip(values) {
            *slot = *v;
        }
        Ok(())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut f64> {
        let n = self.n;
        self.data.iter_mut().step_by(self.stride).take(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_validation() {
        let data = [0.0; 5];
        assert!(Strided::new(&data, 2, 3).is_ok());
        assert_eq!(
            Strided::new(&data, 2, 4).unwrap_err(),
            NslError::BufferTooShort {
                n: 4,
                stride: 2,
                required: 7,
                len: 5
            }
        );
        assert_eq!(Strided::new(&data, 0, 1).unwrap_err(), NslError::InvalidStride);
        assert!(Strided::new(&data, 3, 0).unwrap().is_empty());
    }

    #[test]
    fn test_gather_scatter_leaves_gaps() {
        let mut data = vec![1.0, -1.0, 2.0, -1.0, 3.0];
        let mut view = StridedMut::new(&mut data, 2, 3).unwrap();
        assert_eq!(view.to_vec(), vec![1.0, 2.0, 3.0]);
        view.write_from(&[10.0, 20.0]).unwrap();
        view.set(7, 99.0);
        assert_eq!(view.get(2), Some(3.0));
        assert_eq!(data, vec![10.0, -1.0, 20.0, -1.0, 3.0]);
    }

    #[test]
    fn test_write_too_many() {
        let mut data = vec![0.0; 3];
        let mut view = StridedMut::new(&mut data, 1, 3).unwrap();
        assert!(view.write_from(&[1.0; 4]).is_err());
        for v in view.iter_mut() {
            *v += 1.0;
        }
        assert_eq!(data, vec![1.0; 3]);
    }
}
