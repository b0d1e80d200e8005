//! Plain-text serialization of the document tree. This string is what the
//! API returns as `content`; the PDF serializer shares the numbering logic.

use super::numbering::{indent_for, label};
use super::{DocNode, DocumentTree};

/// Walks the node list tracking one counter per nesting level. A new item at
/// a shallower level resets every deeper counter; headings reset them all.
pub struct NumberingState {
    counters: [usize; 3],
}

impl NumberingState {
    pub fn new() -> Self {
        Self { counters: [0; 3] }
    }

    pub fn reset(&mut self) {
        self.counters = [0; 3];
    }

    /// Advance the counter for `level` (clamped to 1..=3) and return the
    /// rendered label.
    pub fn next_label(&mut self, level: u8) -> String {
        let slot = (level.clamp(1, 3) - 1) as usize;
        self.counters[slot] += 1;
        for deeper in self.counters[slot + 1..].iter_mut() {
            *deeper = 0;
        }
        label(level, self.counters[slot])
    }
}

impl Default for NumberingState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render_text(tree: &DocumentTree) -> String {
    let mut out = String::new();
    out.push_str(&tree.title);
    out.push_str("\n\n");

    let mut numbering = NumberingState::new();
    for node in &tree.nodes {
        match node {
            DocNode::Heading { text, .. } => {
                numbering.reset();
                out.push('\n');
                out.push_str(text);
                out.push('\n');
            }
            DocNode::Paragraph(text) => {
                out.push_str(text);
                out.push_str("\n\n");
            }
            DocNode::Numbered { level, text } => {
                out.push_str(&indent_for(*level));
                out.push_str(&numbering.next_label(*level));
                out.push(' ');
                out.push_str(text);
                out.push('\n');
            }
            DocNode::Table { headers, rows } => {
                out.push_str(&render_row(headers));
                out.push_str(&"-".repeat(headers.iter().map(|h| h.len() + 3).sum::<usize>()));
                out.push('\n');
                for row in rows {
                    out.push_str(&render_row(row));
                }
                out.push('\n');
            }
            DocNode::Image { caption, .. } => {
                if caption.is_empty() {
                    out.push_str("[Imagen]\n\n");
                } else {
                    out.push_str(&format!("[Imagen: {caption}]\n\n"));
                }
            }
        }
    }
    out
}

fn render_row(cells: &[String]) -> String {
    let mut line = cells.join(" | ");
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(nodes: Vec<DocNode>) -> DocumentTree {
        DocumentTree {
            title: "CU001 - Consultar clientes".into(),
            nodes,
        }
    }

    #[test]
    fn numbering_counters_nest_and_reset() {
        let mut state = NumberingState::new();
        assert_eq!(state.next_label(1), "1.");
        assert_eq!(state.next_label(2), "a.");
        assert_eq!(state.next_label(3), "i.");
        assert_eq!(state.next_label(3), "ii.");
        assert_eq!(state.next_label(2), "b.");
        // Deeper counter was reset by the level-2 item.
        assert_eq!(state.next_label(3), "i.");
        assert_eq!(state.next_label(1), "2.");
        assert_eq!(state.next_label(2), "a.");
    }

    #[test]
    fn headings_reset_the_numbering() {
        let rendered = render_text(&tree(vec![
            DocNode::Heading {
                level: 1,
                text: "Flujo principal de eventos".into(),
            },
            DocNode::Numbered {
                level: 1,
                text: "Paso uno".into(),
            },
            DocNode::Heading {
                level: 1,
                text: "Flujos alternativos".into(),
            },
            DocNode::Numbered {
                level: 1,
                text: "Alternativa uno".into(),
            },
        ]));
        assert!(rendered.contains("1. Paso uno"));
        assert!(rendered.contains("1. Alternativa uno"));
        assert!(!rendered.contains("2. Alternativa uno"));
    }

    #[test]
    fn items_are_indented_per_level() {
        let rendered = render_text(&tree(vec![
            DocNode::Numbered {
                level: 1,
                text: "Padre".into(),
            },
            DocNode::Numbered {
                level: 2,
                text: "Hijo".into(),
            },
            DocNode::Numbered {
                level: 3,
                text: "Nieto".into(),
            },
        ]));
        assert!(rendered.contains("1. Padre"));
        assert!(rendered.contains("   a. Hijo"));
        assert!(rendered.contains("      i. Nieto"));
    }

    #[test]
    fn tables_render_headers_and_rows() {
        let rendered = render_text(&tree(vec![DocNode::Table {
            headers: vec!["Fecha".into(), "Acción".into()],
            rows: vec![vec!["01/01/2026".into(), "Creación".into()]],
        }]));
        assert!(rendered.contains("Fecha | Acción"));
        assert!(rendered.contains("01/01/2026 | Creación"));
    }

    #[test]
    fn images_render_as_captioned_placeholders() {
        let rendered = render_text(&tree(vec![DocNode::Image {
            caption: "Búsqueda".into(),
            png: vec![1, 2, 3],
        }]));
        assert!(rendered.contains("[Imagen: Búsqueda]"));
    }
}
