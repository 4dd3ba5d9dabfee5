//! # PDF Output
//!
//! Turns the HTML markup of a filled document into PDF bytes. The markup is
//! read back into headings, paragraphs and rules (`markup`), then laid out with
//! genpdf (`render`) according to the page setup in `options`.

mod markup;
mod options;
mod render;

pub use options::{Orientation, PaperFormat, PdfOptions};
pub use render::{GenPdfRenderer, PdfError, PdfRenderer};
