//! Screen orientation handling.
//!
//! Sensor frames arrive in the device's landscape-native layout. Features are
//! expressed in display space, so the orientation decides both the rotation
//! applied when mapping viewport points and whether width/height swap.

use serde::{Deserialize, Serialize};

/// Display orientation of a frame.
///
/// `Unknown` means "whatever the display currently is" and is replaced by the
/// caller-supplied display orientation via [`Orientation::resolve`] before any
/// computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Unknown,
    LandscapeLeft,
    Portrait,
    LandscapeRight,
    PortraitUpsideDown,
}

impl Orientation {
    /// Substitute `Unknown` with the current display orientation.
    pub fn resolve(self, display: Orientation) -> Orientation {
        match self {
            Orientation::Unknown => display,
            requested => requested,
        }
    }

    /// Rotation in degrees from sensor space to display space.
    pub fn rotation_degrees(self) -> f32 {
        match self {
            Orientation::LandscapeLeft => 0.0,
            Orientation::Portrait => -90.0,
            Orientation::LandscapeRight => -180.0,
            Orientation::PortraitUpsideDown => -270.0,
            Orientation::Unknown => 0.0,
        }
    }

    /// Rotation in radians from sensor space to display space.
    pub fn rotation_radians(self) -> f32 {
        self.rotation_degrees().to_radians()
    }

    pub fn is_portrait(self) -> bool {
        matches!(self, Orientation::Portrait | Orientation::PortraitUpsideDown)
    }

    /// Feature dimensions for a sensor frame of `raw_width` x `raw_height`.
    ///
    /// Portrait orientations swap width and height.
    pub fn output_dimensions(self, raw_width: u32, raw_height: u32) -> (u32, u32) {
        if self.is_portrait() {
            (raw_height, raw_width)
        } else {
            (raw_width, raw_height)
        }
    }

    /// Ordinal used by the host display subsystem.
    pub fn code(self) -> i32 {
        match self {
            Orientation::Unknown => 0,
            Orientation::Portrait => 1,
            Orientation::PortraitUpsideDown => 2,
            Orientation::LandscapeLeft => 3,
            Orientation::LandscapeRight => 4,
        }
    }

    /// Inverse of [`Orientation::code`]. Unrecognised codes map to `Unknown`.
    pub fn from_code(code: i32) -> Orientation {
        match code {
            1 => Orientation::Portrait,
            2 => Orientation::PortraitUpsideDown,
            3 => Orientation::LandscapeLeft,
            4 => Orientation::LandscapeRight,
            _ => Orientation::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Orientation; 4] = [
        Orientation::LandscapeLeft,
        Orientation::Portrait,
        Orientation::LandscapeRight,
        Orientation::PortraitUpsideDown,
    ];

    #[test]
    fn test_resolve_unknown_uses_display() {
        for display in ALL {
            assert_eq!(Orientation::Unknown.resolve(display), display);
        }
    }

    #[test]
    fn test_resolve_keeps_requested() {
        for requested in ALL {
            assert_eq!(requested.resolve(Orientation::Portrait), requested);
        }
    }

    #[test]
    fn test_rotation_angles() {
        assert_eq!(Orientation::LandscapeLeft.rotation_degrees(), 0.0);
        assert_eq!(Orientation::Portrait.rotation_degrees(), -90.0);
        assert_eq!(Orientation::LandscapeRight.rotation_degrees(), -180.0);
        assert_eq!(Orientation::PortraitUpsideDown.rotation_degrees(), -270.0);
        assert_eq!(Orientation::Unknown.rotation_degrees(), 0.0);
    }

    #[test]
    fn test_output_dimensions_swap_only_for_portrait() {
        for o in ALL {
            let dims = o.output_dimensions(640, 480);
            if matches!(o, Orientation::Portrait | Orientation::PortraitUpsideDown) {
                assert_eq!(dims, (480, 640));
            } else {
                assert_eq!(dims, (640, 480));
            }
        }
    }

    #[test]
    fn test_code_round_trip() {
        for o in ALL {
            assert_eq!(Orientation::from_code(o.code()), o);
        }
        assert_eq!(Orientation::from_code(42), Orientation::Unknown);
    }
}
