//! Stack of equally-shaped 2D slices.

use crate::image::{Image, ImageView};
use crate::Error;

/// Ordered stack of slices sharing one `(width, height)`.
///
/// A volume always holds at least one slice of non-zero area.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume<T> {
    width: usize,
    height: usize,
    slices: Vec<Image<T>>,
}

impl<T> Volume<T> {
    pub fn from_slices(slices: Vec<Image<T>>) -> Result<Self, Error> {
        let first = slices.first().ok_or(Error::EmptyVolume)?;
        let (width, height) = first.shape();
        if first.is_empty() {
            return Err(Error::EmptyImage);
        }

        for (index, slice) in slices.iter().enumerate().skip(1) {
            if slice.shape() != (width, height) {
                return Err(Error::ShapeMismatch {
                    index,
                    expected: (width, height),
                    actual: slice.shape(),
                });
            }
        }

        Ok(Self {
            width,
            height,
            slices,
        })
    }

    /// Splits a contiguous `depth x height x width` buffer into slices.
    pub fn from_vec(width: usize, height: usize, depth: usize, data: Vec<T>) -> Result<Self, Error> {
        let area = width.checked_mul(height).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;
        let expected = area.checked_mul(depth).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;
        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        if depth == 0 {
            return Err(Error::EmptyVolume);
        }
        if area == 0 {
            return Err(Error::EmptyImage);
        }

        let mut slices = Vec::with_capacity(depth);
        let mut rest = data;
        for _ in 0..depth {
            let tail = rest.split_off(area);
            slices.push(Image::from_vec(width, height, rest)?);
            rest = tail;
        }

        Ok(Self {
            width,
            height,
            slices,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn depth(&self) -> usize {
        self.slices.len()
    }

    /// `(width, height, depth)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.width, self.height, self.slices.len())
    }

    pub fn voxel_count(&self) -> usize {
        self.width * self.height * self.slices.len()
    }

    pub fn slice(&self, z: usize) -> Option<ImageView<'_, T>> {
        self.slices.get(z).map(Image::as_view)
    }

    pub fn slices(&self) -> &[Image<T>] {
        &self.slices
    }

    pub fn slices_mut(&mut self) -> &mut [Image<T>] {
        &mut self.slices
    }

    /// Voxels in slice-major, then row-major order.
    pub fn voxels(&self) -> impl Iterator<Item = &T> + Clone + '_ {
        self.slices.iter().flat_map(|s| s.data().iter())
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Volume<U> {
        Volume {
            width: self.width,
            height: self.height,
            slices: self.slices.iter().map(|s| s.map(&mut f)).collect(),
        }
    }
}
