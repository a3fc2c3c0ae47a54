//! Borrowed multi-plane frames.
//!
//! A [`RawFrame`] is a read-only view over planes owned by the capture
//! subsystem. Nothing here copies pixel data; the lifetime `'a` ties every
//! view back to the buffers it was built from.

use crate::format::PixelFormat;
use arrayvec::ArrayVec;
use thiserror::Error;

/// Maximum number of planes in a frame (Y, U, V plus one spare).
pub const MAX_PLANES: usize = 4;

/// Errors raised while assembling a frame.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("Frame has {0} planes, at most {max} are supported", max = MAX_PLANES)]
    TooManyPlanes(usize),

    #[error("Plane {plane} pixel stride {stride} is smaller than element size {element}")]
    PixelStrideTooSmall {
        plane: usize,
        stride: usize,
        element: usize,
    },

    #[error("Plane {plane} row stride {stride} cannot hold a row of {required} bytes")]
    RowStrideTooSmall {
        plane: usize,
        stride: usize,
        required: usize,
    },

    #[error("Plane {plane} holds {len} bytes, {required} required")]
    PlaneTooShort {
        plane: usize,
        len: usize,
        required: usize,
    },

    #[error("Plane {plane} strides describe more bytes than are addressable")]
    PlaneTooLarge { plane: usize },
}

/// One strided 2D byte array within a frame.
#[derive(Debug, Clone, Copy)]
pub struct Plane<'a> {
    data: &'a [u8],
    row_stride: usize,
    pixel_stride: usize,
}

impl<'a> Plane<'a> {
    /// Create a plane view.
    ///
    /// `row_stride` is the byte distance between rows and `pixel_stride` the
    /// byte distance between horizontally adjacent samples.
    pub fn new(data: &'a [u8], row_stride: usize, pixel_stride: usize) -> Self {
        Self {
            data,
            row_stride,
            pixel_stride,
        }
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    pub fn pixel_stride(&self) -> usize {
        self.pixel_stride
    }

    /// Byte offset of the sample at `(x, y)`.
    pub fn offset(&self, x: usize, y: usize) -> usize {
        y * self.row_stride + x * self.pixel_stride
    }
}

/// A captured frame in sensor-native layout.
#[derive(Debug, Clone)]
pub struct RawFrame<'a> {
    width: u32,
    height: u32,
    format: PixelFormat,
    planes: ArrayVec<Plane<'a>, MAX_PLANES>,
    discarded: bool,
}

impl<'a> RawFrame<'a> {
    /// Assemble a frame from its planes.
    ///
    /// The first plane must cover `width` x `height` samples of the format's
    /// element type. Later planes are chroma planes sub-sampled by two in both
    /// directions; in the bi-planar format each of their samples is a Cb/Cr
    /// byte pair.
    pub fn new(
        width: u32,
        height: u32,
        format: PixelFormat,
        planes: impl IntoIterator<Item = Plane<'a>>,
    ) -> Result<Self, FrameError> {
        let mut planes = planes.into_iter();
        let mut collected = ArrayVec::<Plane<'a>, MAX_PLANES>::new();
        while let Some(plane) = planes.next() {
            collected.try_push(plane).map_err(|_| {
                FrameError::TooManyPlanes(MAX_PLANES + 1 + planes.by_ref().count())
            })?;
        }

        let element = format.scalar_kind().map_or(1, |kind| kind.size());
        for (index, plane) in collected.iter().enumerate() {
            if plane.pixel_stride < element {
                return Err(FrameError::PixelStrideTooSmall {
                    plane: index,
                    stride: plane.pixel_stride,
                    element,
                });
            }
        }

        if width > 0 && height > 0 {
            for (index, plane) in collected.iter().enumerate() {
                let (columns, rows, element) = if index == 0 {
                    (width, height, element)
                } else if format == PixelFormat::IosYpCbCr420BiPlanar {
                    (width.div_ceil(2), height.div_ceil(2), 2 * element)
                } else {
                    (width.div_ceil(2), height.div_ceil(2), element)
                };
                check_extent(index, plane, columns as usize, rows as usize, element)?;
            }
        }

        Ok(Self {
            width,
            height,
            format,
            planes: collected,
            discarded: false,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sensor-native dimensions (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn planes(&self) -> &[Plane<'a>] {
        &self.planes
    }

    pub fn plane(&self, index: usize) -> Option<&Plane<'a>> {
        self.planes.get(index)
    }

    pub fn plane_count(&self) -> usize {
        self.planes.len()
    }

    /// Mark the frame as released by the capture subsystem.
    pub fn discard(&mut self) {
        self.discarded = true;
    }

    /// A frame is usable when it has not been discarded, has a non-empty
    /// extent and at least one plane.
    pub fn is_valid(&self) -> bool {
        !self.discarded && self.width > 0 && self.height > 0 && !self.planes.is_empty()
    }
}

/// Check that `plane` holds `columns` x `rows` samples of `element` bytes.
/// The last row needs no trailing padding.
fn check_extent(
    index: usize,
    plane: &Plane<'_>,
    columns: usize,
    rows: usize,
    element: usize,
) -> Result<(), FrameError> {
    let too_large = || FrameError::PlaneTooLarge { plane: index };
    let row_bytes = (columns - 1)
        .checked_mul(plane.pixel_stride)
        .and_then(|bytes| bytes.checked_add(element))
        .ok_or_else(too_large)?;
    if plane.row_stride < row_bytes {
        return Err(FrameError::RowStrideTooSmall {
            plane: index,
            stride: plane.row_stride,
            required: row_bytes,
        });
    }
    let required = (rows - 1)
        .checked_mul(plane.row_stride)
        .and_then(|bytes| bytes.checked_add(row_bytes))
        .ok_or_else(too_large)?;
    if plane.data.len() < required {
        return Err(FrameError::PlaneTooShort {
            plane: index,
            len: plane.data.len(),
            required,
        });
    }
    Ok(())
}
