//! PDF export of a finished trip plan
//!
//! Renders the plan (title, itinerary body, budget lines, per-city sections)
//! with a Unicode-capable TTF font into an in-memory buffer. The font file is
//! a required external resource: when it is missing the exporter returns a
//! user-visible error and the caller skips the PDF while the rest of the
//! plan is unaffected. Rendering never touches the filesystem apart from
//! reading the font, so there is no temporary artifact to clean up.

use genpdf::{elements, fonts, style, Alignment, Element};
use std::path::Path;
use tracing::{info, instrument};

use crate::config::PdfConfig;
use crate::models::TripPlan;
use crate::{Result, TripPlannerError};

const TITLE: &str = "AI Trip Planner Itinerary";

/// PDF exporter bound to a configured font path
pub struct PdfExporter {
    font_path: String,
}

impl PdfExporter {
    /// Create an exporter from the PDF configuration
    #[must_use]
    pub fn new(config: &PdfConfig) -> Self {
        Self {
            font_path: config.font_path.clone(),
        }
    }

    /// Render the plan to PDF bytes.
    ///
    /// The font is loaded per export so a font installed after startup is
    /// picked up without a restart.
    #[instrument(skip(self, plan))]
    pub fn export(&self, plan: &TripPlan) -> Result<Vec<u8>> {
        let font_family = self.load_font_family()?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(TITLE);
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(15);
        doc.set_page_decorator(decorator);

        doc.push(
            elements::Paragraph::new(TITLE)
                .aligned(Alignment::Center)
                .styled(style::Style::new().with_font_size(16)),
        );
        doc.push(elements::Break::new(1.0));

        push_multiline(&mut doc, &plan.itinerary, 12);
        doc.push(elements::Break::new(1.0));

        doc.push(elements::Paragraph::new("Estimated Budget").styled(style::Style::new().with_font_size(14)));
        for item in &plan.budget {
            doc.push(
                elements::Paragraph::new(format!("{}: {}", item.category, item.amount))
                    .styled(style::Style::new().with_font_size(12)),
            );
        }

        if !plan.city_infos.is_empty() {
            doc.push(elements::Break::new(1.0));
            doc.push(
                elements::Paragraph::new("City Information")
                    .styled(style::Style::new().with_font_size(14)),
            );
            for city_info in &plan.city_infos {
                doc.push(
                    elements::Paragraph::new(city_info.city.clone())
                        .styled(style::Style::new().with_font_size(12)),
                );
                push_multiline(&mut doc, &city_info.info, 12);
                doc.push(elements::Break::new(0.5));
            }
        }

        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| TripPlannerError::pdf(format!("Failed to render PDF: {e}")))?;

        info!(bytes = buffer.len(), "Rendered trip plan PDF");
        Ok(buffer)
    }

    /// Load the configured TTF and reuse it for every style variant
    fn load_font_family(&self) -> Result<fonts::FontFamily<fonts::FontData>> {
        if !Path::new(&self.font_path).exists() {
            return Err(TripPlannerError::pdf(format!(
                "Missing font file: {}. Please download DejaVuSans.ttf and place it in the fonts/ folder.",
                self.font_path
            )));
        }

        let bytes = std::fs::read(&self.font_path)?;
        let font = fonts::FontData::new(bytes, None)
            .map_err(|e| TripPlannerError::pdf(format!("Invalid font file {}: {e}", self.font_path)))?;

        Ok(fonts::FontFamily {
            regular: font.clone(),
            bold: font.clone(),
            italic: font.clone(),
            bold_italic: font,
        })
    }
}

/// Push one paragraph per line, preserving blank lines as breaks
fn push_multiline(doc: &mut genpdf::Document, text: &str, font_size: u8) {
    for line in text.lines() {
        if line.trim().is_empty() {
            doc.push(elements::Break::new(0.5));
        } else {
            doc.push(
                elements::Paragraph::new(line).styled(style::Style::new().with_font_size(font_size)),
            );
        }
    }
}
