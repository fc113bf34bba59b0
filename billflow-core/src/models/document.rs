use serde_json::Value;

/// The two document collections the reporting engine reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Invoice,
    Quotation,
}

impl DocumentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Invoice => "invoice",
            DocumentKind::Quotation => "quotation",
        }
    }
}

/// One raw row from the record store: a fixed-position tuple of mixed
/// string/number cells. The store owns this shape; we only read it.
pub type RawRow = Vec<Value>;

// Cell positions in the upstream row-tuple. This is the only place
// in the codebase that knows about the positional layout.
const DATE_CELL: usize = 2;
const TOTAL_CELL: usize = 8;
const PAYLOAD_CELL: usize = 9;
const STATUS_CELL: usize = 11;
const VALIDITY_CELL: usize = 15;

/// Typed view of one document row, populated once at the store
/// boundary so downstream logic never touches positional indices.
#[derive(Debug, Clone, Default)]
pub struct DocumentFields {
    /// Issue date text (heterogeneous formats).
    pub date: Option<String>,

    /// Raw total column, used as a money fallback when the payload
    /// blob is missing or corrupt.
    pub total: Option<String>,

    /// JSON-encoded payload blob (line items, override total).
    pub payload: Option<String>,

    /// Stored status text, not trusted as-is.
    pub status: Option<String>,

    /// Validity date text, quotations only.
    pub validity: Option<String>,
}

impl DocumentFields {
    /// Decodes the positional cells of one raw row. Missing or
    /// non-text cells become `None`; the row itself is never rejected
    /// here.
    pub fn from_cells(cells: &[Value]) -> Self {
        DocumentFields {
            date: cell_text(cells, DATE_CELL),
            total: cell_text(cells, TOTAL_CELL),
            payload: cell_text(cells, PAYLOAD_CELL),
            status: cell_text(cells, STATUS_CELL),
            validity: cell_text(cells, VALIDITY_CELL),
        }
    }

    pub fn status_text(&self) -> &str {
        self.status.as_deref().unwrap_or("")
    }
}

fn cell_text(cells: &[Value], index: usize) -> Option<String> {
    match cells.get(index)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
