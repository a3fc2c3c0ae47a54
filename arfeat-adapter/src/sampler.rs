//! Strided scalar reads from a plane.

use arfeat_data::Plane;
use bytemuck::Pod;

/// Element types a plane can be sampled as.
pub(crate) trait Scalar: Pod {}

impl Scalar for u8 {}
impl Scalar for u16 {}
impl Scalar for f32 {}

/// Read the element at pixel `(x, y)` in native byte order.
///
/// Coordinates are not validated: the caller guarantees `x < width` and
/// `y < height` of a plane whose extent was checked when the frame was built.
#[inline]
pub(crate) fn sample<T: Scalar>(plane: &Plane<'_>, x: usize, y: usize) -> T {
    let offset = plane.offset(x, y);
    bytemuck::pod_read_unaligned(&plane.data()[offset..offset + std::mem::size_of::<T>()])
}
