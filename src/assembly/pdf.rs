//! PDF serialization via `printpdf`. A4 portrait, builtin fonts, y-cursor
//! layout with page breaks.

use std::io::BufWriter;

use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference,
};

use super::render_text::NumberingState;
use super::{DocNode, DocumentTree, ExportError};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 20.0;
const MARGIN_BOTTOM: f32 = 20.0;
const TOP_Y: f32 = 280.0;
const WRAP_BODY: usize = 95;
const IMAGE_DPI: f32 = 96.0;

/// Render the document tree to PDF bytes.
pub fn render_pdf(tree: &DocumentTree) -> Result<Vec<u8>, ExportError> {
    let (doc, page1, layer1) =
        PdfDocument::new(&tree.title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(format!("font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::Pdf(format!("font error: {e}")))?;
    let courier = doc
        .add_builtin_font(BuiltinFont::Courier)
        .map_err(|e| ExportError::Pdf(format!("font error: {e}")))?;

    let mut writer = PageWriter {
        doc: &doc,
        layer: doc.get_page(page1).get_layer(layer1),
        y: TOP_Y,
    };

    writer.text(&tree.title, 14.0, MARGIN_LEFT, &bold);
    writer.advance(10.0);

    let mut numbering = NumberingState::new();
    for node in &tree.nodes {
        match node {
            DocNode::Heading { text, .. } => {
                numbering.reset();
                writer.advance(4.0);
                writer.text(text, 11.0, MARGIN_LEFT, &bold);
                writer.advance(6.0);
            }
            DocNode::Paragraph(text) => {
                for line in wrap_text(text, WRAP_BODY) {
                    writer.text(&line, 9.0, MARGIN_LEFT, &font);
                    writer.advance(4.5);
                }
                writer.advance(2.0);
            }
            DocNode::Numbered { level, text } => {
                let indent = MARGIN_LEFT + 5.0 * (*level as f32 - 1.0);
                let line = format!("{} {}", numbering.next_label(*level), text);
                for wrapped in wrap_text(&line, WRAP_BODY - 4 * *level as usize) {
                    writer.text(&wrapped, 9.0, indent, &font);
                    writer.advance(4.5);
                }
            }
            DocNode::Table { headers, rows } => {
                writer.text(&headers.join(" | "), 8.0, MARGIN_LEFT + 5.0, &bold);
                writer.advance(4.5);
                for row in rows {
                    for line in wrap_text(&row.join(" | "), 100) {
                        writer.text(&line, 8.0, MARGIN_LEFT + 5.0, &courier);
                        writer.advance(4.0);
                    }
                }
                writer.advance(3.0);
            }
            DocNode::Image { caption, png } => {
                writer.image(png, caption, &font)?;
            }
        }
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ExportError::Pdf(format!("save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| ExportError::Pdf(format!("buffer error: {e}")))
}

struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl PageWriter<'_> {
    fn text(&mut self, text: &str, size: f32, x: f32, font: &IndirectFontRef) {
        self.ensure_room(6.0);
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
    }

    fn advance(&mut self, mm: f32) {
        self.y -= mm;
    }

    fn ensure_room(&mut self, needed: f32) {
        if self.y - needed >= MARGIN_BOTTOM {
            return;
        }
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = TOP_Y;
    }

    fn image(
        &mut self,
        encoded: &[u8],
        caption: &str,
        font: &IndirectFontRef,
    ) -> Result<(), ExportError> {
        // Decoded with printpdf's bundled image crate: `from_dynamic_image`
        // only accepts that crate's `DynamicImage`.
        let decoded = printpdf::image_crate::load_from_memory(encoded)
            .map_err(|e| ExportError::Pdf(format!("image decode error: {e}")))?;
        let height_mm = decoded.height() as f32 / IMAGE_DPI * 25.4;

        self.ensure_room(height_mm + 12.0);
        self.advance(height_mm);
        Image::from_dynamic_image(&decoded).add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(MARGIN_LEFT)),
                translate_y: Some(Mm(self.y)),
                dpi: Some(IMAGE_DPI),
                ..Default::default()
            },
        );
        self.advance(5.0);
        if !caption.is_empty() {
            self.text(caption, 8.0, MARGIN_LEFT, font);
            self.advance(4.5);
        }
        self.advance(3.0);
        Ok(())
    }
}

/// Simple word-wrap for PDF text lines.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.chars().count() + word.chars().count() + 1 > max_chars && !current.is_empty() {
            lines.push(current.clone());
            current.clear();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Export file name for a record: the cleaned file name plus the `.pdf`
/// extension.
pub fn export_file_name(file_name: &str) -> String {
    format!("{}.pdf", file_name.trim())
}
