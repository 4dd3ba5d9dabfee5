//! genpdf implementation of [`PdfRenderer`].

use std::path::PathBuf;

use genpdf::elements::{Break, Paragraph};
use genpdf::fonts::{FontData, FontFamily};
use genpdf::style::{Style, StyledString};
use genpdf::{Alignment, Document, SimplePageDecorator};
use log::{debug, warn};
use thiserror::Error;

use super::markup::{self, Block, Span};
use super::options::{PdfOptions, BODY_FONT_PX};
use crate::config::PdfConfig;

const HEADING_PX: [f64; 3] = [24.0, 20.0, 16.0];
const HEADER_PX: f64 = 14.0;
const FOOTER_PX: f64 = 10.0;
const RULE_WIDTH: usize = 64;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("no usable font family in {dir}: {source}")]
    Font {
        dir: PathBuf,
        #[source]
        source: genpdf::error::Error,
    },

    #[error("PDF rendering failed: {0}")]
    Render(#[from] genpdf::error::Error),
}

/// Converts document markup into PDF bytes.
pub trait PdfRenderer: Send + Sync {
    fn render(&self, markup: &str, options: &PdfOptions) -> Result<Vec<u8>, PdfError>;
}

/// Lays the markup out with genpdf using TTF fonts loaded from disk.
#[derive(Debug, Clone)]
pub struct GenPdfRenderer {
    fonts_dir: PathBuf,
    family: String,
    fallback_family: String,
}

impl GenPdfRenderer {
    pub fn new(config: &PdfConfig) -> Self {
        Self {
            fonts_dir: config.fonts_dir.clone(),
            family: config.font_family.clone(),
            fallback_family: config.fallback_font_family.clone(),
        }
    }

    /// Load the configured family, falling back to the second one.
    fn load_font(&self) -> Result<FontFamily<FontData>, PdfError> {
        match genpdf::fonts::from_files(&self.fonts_dir, &self.family, None) {
            Ok(family) => Ok(family),
            Err(e) => {
                warn!("Font family {} unavailable ({}), trying {}", self.family, e, self.fallback_family);
                genpdf::fonts::from_files(&self.fonts_dir, &self.fallback_family, None).map_err(|source| {
                    PdfError::Font {
                        dir: self.fonts_dir.clone(),
                        source,
                    }
                })
            }
        }
    }

    fn configure_document(&self, title: &str, options: &PdfOptions) -> Result<Document, PdfError> {
        let mut doc = Document::new(self.load_font()?);
        doc.set_title(title);
        doc.set_paper_size(options.page_size());
        doc.set_font_size(options.points(BODY_FONT_PX));
        doc.set_line_spacing(1.25);

        let mut decorator = SimplePageDecorator::new();
        decorator.set_margins(options.margins());
        doc.set_page_decorator(decorator);
        Ok(doc)
    }
}

impl PdfRenderer for GenPdfRenderer {
    fn render(&self, html: &str, options: &PdfOptions) -> Result<Vec<u8>, PdfError> {
        let markup = markup::parse(html);
        debug!(
            "Rendering {} blocks ({:?}, {:?}, quality {})",
            markup.body.len(),
            options.paper,
            options.orientation,
            options.image_quality
        );

        let mut doc = self.configure_document(&markup.title, options)?;
        let alignment = if markup.rtl { Alignment::Right } else { Alignment::Left };

        if !markup.header.is_empty() {
            let base = Style::new().with_font_size(options.points(HEADER_PX));
            for line in &markup.header {
                doc.push(styled_paragraph(line, base, Alignment::Center));
            }
            doc.push(Break::new(2));
        }

        for block in &markup.body {
            match block {
                Block::Heading { level, spans } => {
                    let px = HEADING_PX[usize::from(level.saturating_sub(1)).min(2)];
                    let base = Style::new().bold().with_font_size(options.points(px));
                    doc.push(styled_paragraph(spans, base, alignment));
                    doc.push(Break::new(0.5));
                }
                Block::Paragraph { lines } => {
                    for line in lines {
                        doc.push(styled_paragraph(line, Style::new(), alignment));
                    }
                    doc.push(Break::new(1));
                }
                Block::Rule => {
                    doc.push(Paragraph::new("_".repeat(RULE_WIDTH)).aligned(Alignment::Center));
                    doc.push(Break::new(1));
                }
            }
        }

        if !markup.footer.is_empty() {
            doc.push(Break::new(2));
            let base = Style::new().italic().with_font_size(options.points(FOOTER_PX));
            for line in &markup.footer {
                doc.push(styled_paragraph(line, base, Alignment::Center));
            }
        }

        let mut bytes = Vec::new();
        doc.render(&mut bytes)?;
        Ok(bytes)
    }
}

/// Build one paragraph, layering each span's emphasis over `base`.
fn styled_paragraph(spans: &[Span], base: Style, alignment: Alignment) -> Paragraph {
    let mut paragraph = Paragraph::new("").aligned(alignment);
    for span in spans {
        let mut style = base;
        if span.bold {
            style = style.bold();
        }
        if span.italic {
            style = style.italic();
        }
        paragraph.push(StyledString::new(span.text.clone(), style));
    }
    paragraph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fonts_are_reported_with_their_directory() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = GenPdfRenderer::new(&PdfConfig {
            fonts_dir: dir.path().to_path_buf(),
            ..Default::default()
        });

        let err = renderer
            .render("<p>texte</p>", &PdfOptions::default())
            .unwrap_err();

        match err {
            PdfError::Font { dir: reported, .. } => assert_eq!(reported, dir.path()),
            other => panic!("unexpected error: {other}"),
        }
    }
}
