use serde::Serialize;

/// Column titles of the expense entry form, in display order.
pub const EXPENSE_LABELS: [&str; 6] = ["Expenses", "Date", "Item", "Retailer", "Cost", "Category"];

/// An ordered, immutable sequence of field labels.
///
/// Built from code or through `SchemaRepository::parse_schema`, which
/// validates external input.
///
/// # Examples
///
/// ```
/// use simplitrac::domain::FormSchema;
///
/// let schema = FormSchema::default();
/// assert_eq!(schema.len(), 6);
/// assert_eq!(schema.labels()[0], "Expenses");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormSchema {
    labels: Vec<String>,
}

impl Default for FormSchema {
    fn default() -> Self {
        Self::new(EXPENSE_LABELS)
    }
}

impl FormSchema {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// One rendered row: identity key, display text and input placeholder.
///
/// Rows are derived from a [`FormSchema`] on every render and are never
/// stored on their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowDescriptor {
    /// Zero-based position, stable across renders of the same schema
    pub key: usize,
    pub label: String,
    pub placeholder: String,
}
