use genpdf::{PaperSize, Size};
use serde::{Deserialize, Serialize};

use crate::config::ValidationError;

/// Body text size of the document frame, in CSS pixels.
pub const BODY_FONT_PX: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperFormat {
    #[default]
    A4,
    Letter,
    Legal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Page setup for one export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfOptions {
    pub margin_mm: f64,
    pub paper: PaperFormat,
    pub orientation: Orientation,
    /// Multiplier applied to every font size.
    pub scale: f64,
    /// JPEG quality for embedded raster images.
    pub image_quality: f64,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            margin_mm: 10.0,
            paper: PaperFormat::A4,
            orientation: Orientation::Portrait,
            scale: 1.0,
            image_quality: 0.98,
        }
    }
}

impl PdfOptions {
    pub fn page_size(&self) -> Size {
        let size: Size = match self.paper {
            PaperFormat::A4 => PaperSize::A4,
            PaperFormat::Letter => PaperSize::Letter,
            PaperFormat::Legal => PaperSize::Legal,
        }
        .into();
        match self.orientation {
            Orientation::Portrait => size,
            Orientation::Landscape => Size::new(size.height, size.width),
        }
    }

    /// Point size for text styled at `px` CSS pixels (1px = 0.75pt), scaled.
    pub fn points(&self, px: f64) -> u8 {
        (px * 0.75 * self.scale).round().clamp(4.0, 96.0) as u8
    }

    pub fn margins(&self) -> i32 {
        self.margin_mm.round() as i32
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=50.0).contains(&self.margin_mm) {
            return Err(ValidationError::InvalidMargin(self.margin_mm));
        }
        if !(0.1..=4.0).contains(&self.scale) {
            return Err(ValidationError::InvalidScale(self.scale));
        }
        if !(0.0..=1.0).contains(&self.image_quality) {
            return Err(ValidationError::InvalidImageQuality(self.image_quality));
        }
        Ok(())
    }
}
