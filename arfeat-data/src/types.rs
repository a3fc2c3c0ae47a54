//! Feature shape descriptors.

use crate::format::ScalarKind;
use serde::{Deserialize, Serialize};

/// Shape of a feature buffer after orientation correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureType {
    /// Width in display space.
    pub width: u32,
    /// Height in display space.
    pub height: u32,
    /// Channels (or planes, for raw frame types).
    pub channels: usize,
    /// Element type, `None` when the source format is not recognised.
    pub scalar: Option<ScalarKind>,
}

impl FeatureType {
    pub fn new(width: u32, height: u32, channels: usize, scalar: Option<ScalarKind>) -> Self {
        Self {
            width,
            height,
            channels,
            scalar,
        }
    }

    /// (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of scalar elements.
    pub fn element_count(&self) -> usize {
        self.width as usize * self.height as usize * self.channels
    }

    /// Buffer size in bytes, if the element type is known.
    pub fn byte_len(&self) -> Option<usize> {
        self.scalar.map(|kind| self.element_count() * kind.size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_len() {
        let ty = FeatureType::new(4, 3, 1, Some(ScalarKind::U16));
        assert_eq!(ty.element_count(), 12);
        assert_eq!(ty.byte_len(), Some(24));
        assert_eq!(FeatureType::new(4, 3, 1, None).byte_len(), None);
    }
}
