//! Rendered frames and observations.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An RGB8 image, row-major, top row first.
///
/// # Example
///
/// ```
/// use replay_types::Frame;
///
/// let frame = Frame::new(2, 2, vec![0; 2 * 2 * 3]).unwrap();
/// assert_eq!(frame.width, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Interleaved RGB bytes, `width * height * 3` of them.
    pub pixels: Vec<u8>,
}

impl Frame {
    /// Create a frame, checking that the pixel buffer matches the dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ReplayError::LengthMismatch`] when the buffer length
    /// is not `width * height * 3`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> crate::Result<Self> {
        let expected = width as usize * height as usize * 3;
        if pixels.len() != expected {
            return Err(crate::ReplayError::length_mismatch(
                "frame pixels",
                expected,
                pixels.len(),
            ));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create an all-black frame of the given size.
    #[must_use]
    pub fn black(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 3],
        }
    }

    /// Byte length of one pixel row.
    #[must_use]
    pub const fn row_bytes(&self) -> usize {
        self.width as usize * 3
    }

    /// Return the frame with its rows mirrored top-to-bottom.
    ///
    /// Renderers commonly produce images with the origin at the bottom-left;
    /// persisted frames use top row first.
    #[must_use]
    pub fn flipped_vertical(&self) -> Self {
        let row = self.row_bytes();
        let mut pixels = Vec::with_capacity(self.pixels.len());
        for chunk in self.pixels.chunks(row).rev() {
            pixels.extend_from_slice(chunk);
        }
        Self {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}

/// A sensor observation read from the simulation.
///
/// The collaborator may expose more channels; the pipeline consumes the
/// rendered image.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Observation {
    /// Rendered camera image.
    pub image: Frame,
}

impl Observation {
    /// Create an observation from a rendered frame.
    #[must_use]
    pub const fn new(image: Frame) -> Self {
        Self { image }
    }
}
