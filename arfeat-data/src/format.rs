//! Pixel formats produced by the AR subsystem.

use serde::{Deserialize, Serialize};

/// Element type of a plane or feature buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    U8,
    U16,
    F32,
}

impl ScalarKind {
    /// Size of one element in bytes.
    pub fn size(self) -> usize {
        match self {
            ScalarKind::U8 => 1,
            ScalarKind::U16 => 2,
            ScalarKind::F32 => 4,
        }
    }
}

/// Layout of a captured frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelFormat {
    #[default]
    Unknown,
    /// Android YUV_420_888: Y, U and V planes with arbitrary pixel strides.
    AndroidYuv420,
    /// iOS 420f: Y plane plus an interleaved CbCr plane, full range.
    IosYpCbCr420BiPlanar,
    /// Single 8-bit channel.
    OneComponent8,
    /// Depth in meters.
    DepthFloat32,
    /// Depth in millimeters.
    DepthUint16,
}

impl PixelFormat {
    /// Element type of the format's planes, `None` for unrecognised formats.
    pub fn scalar_kind(self) -> Option<ScalarKind> {
        match self {
            PixelFormat::AndroidYuv420 => Some(ScalarKind::U8),
            PixelFormat::DepthFloat32 => Some(ScalarKind::F32),
            PixelFormat::DepthUint16 => Some(ScalarKind::U16),
            PixelFormat::IosYpCbCr420BiPlanar => Some(ScalarKind::U8),
            PixelFormat::OneComponent8 => Some(ScalarKind::U8),
            PixelFormat::Unknown => None,
        }
    }

    /// Whether the format is one of the planar color formats the converter accepts.
    pub fn is_planar_color(self) -> bool {
        matches!(
            self,
            PixelFormat::AndroidYuv420 | PixelFormat::IosYpCbCr420BiPlanar
        )
    }

    pub fn is_depth(self) -> bool {
        matches!(self, PixelFormat::DepthFloat32 | PixelFormat::DepthUint16)
    }

    /// Ordinal used by the host AR subsystem.
    pub fn code(self) -> i32 {
        match self {
            PixelFormat::Unknown => 0,
            PixelFormat::AndroidYuv420 => 1,
            PixelFormat::IosYpCbCr420BiPlanar => 2,
            PixelFormat::OneComponent8 => 3,
            PixelFormat::DepthFloat32 => 4,
            PixelFormat::DepthUint16 => 5,
        }
    }

    pub fn from_code(code: i32) -> PixelFormat {
        match code {
            1 => PixelFormat::AndroidYuv420,
            2 => PixelFormat::IosYpCbCr420BiPlanar,
            3 => PixelFormat::OneComponent8,
            4 => PixelFormat::DepthFloat32,
            5 => PixelFormat::DepthUint16,
            _ => PixelFormat::Unknown,
        }
    }
}
