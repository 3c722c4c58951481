//! Row rendering services for the expense form.
//!
//! This module turns a [`FormSchema`] into row descriptors and into the
//! typed table tree that the export pipeline serializes.

use super::markup::{Node, Tag};
use super::models::{FormSchema, RowDescriptor};

/// Maps an ordered label sequence to renderable rows.
///
/// Rendering is pure: the same schema always yields the same rows, one per
/// label, in label order.
///
/// # Examples
///
/// ```
/// use simplitrac::domain::{FormSchema, RowRenderer};
///
/// let rows = RowRenderer::render(&FormSchema::default());
/// assert_eq!(rows.len(), 6);
/// assert_eq!(rows[0].label, "Expenses");
/// assert_eq!(rows[0].placeholder, "Input 1");
/// assert_eq!(rows[5].placeholder, "Input 6");
/// ```
pub struct RowRenderer;

impl RowRenderer {
    /// Renders one row per label. An empty schema renders no rows.
    pub fn render(schema: &FormSchema) -> Vec<RowDescriptor> {
        let rows: Vec<RowDescriptor> = schema
            .labels()
            .iter()
            .enumerate()
            .map(|(key, label)| RowDescriptor {
                key,
                label: label.clone(),
                placeholder: Self::placeholder(key),
            })
            .collect();
        tracing::debug!(rows = rows.len(), "rendered form rows");
        rows
    }

    /// Placeholder text for the row at the given zero-based position.
    pub fn placeholder(position: usize) -> String {
        format!("Input {}", position + 1)
    }

    /// Builds `table > tbody > tr*`, each row holding a label cell and a
    /// text input cell.
    pub fn build_table(rows: &[RowDescriptor]) -> Node {
        let body = Node::element(Tag::Tbody).children(rows.iter().map(Self::build_row));
        Node::element(Tag::Table).attr("border", "1").child(body)
    }

    pub fn render_table(schema: &FormSchema) -> Node {
        Self::build_table(&Self::render(schema))
    }

    fn build_row(row: &RowDescriptor) -> Node {
        let input = Node::element(Tag::Input)
            .attr("type", "text")
            .attr("placeholder", row.placeholder.as_str());

        Node::element(Tag::Tr)
            .attr("data-key", row.key.to_string())
            .child(Node::element(Tag::Td).child(Node::text(row.label.as_str())))
            .child(Node::element(Tag::Td).child(input))
    }
}
