//! Abstract spreadsheet access used by the extraction heuristics.
//!
//! The heuristics in [`crate::extract`] only ever talk to [`SheetReader`]; the
//! concrete workbook loaders in [`crate::io`] materialize a file into a
//! [`LoadedWorkbook`] of in-memory [`GridSheet`]s. All row and column
//! indices on this surface are 1-based.

pub mod text;

pub use text::cell_text;

/// Raw value held by a spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Rich text stored as its individual runs.
    RichText(Vec<String>),
    /// Formula with its cached result, when the file carries one.
    Formula {
        source: String,
        cached: Option<Box<CellValue>>,
    },
    /// Error value such as `#N/A` or `#REF!`.
    Error(String),
}

/// A single spreadsheet cell as seen by the heuristics.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    /// Precomputed display text, when the source format provides one.
    pub display: Option<String>,
    pub value: CellValue,
    /// Explicit indent level from the cell's alignment style.
    pub indent: Option<u32>,
}

impl Cell {
    pub fn new(value: CellValue) -> Self {
        Self {
            display: None,
            value,
            indent: None,
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::new(CellValue::Text(value.into()))
    }

    pub fn number(value: f64) -> Self {
        Self::new(CellValue::Number(value))
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    pub fn with_indent(mut self, indent: u32) -> Self {
        self.indent = Some(indent);
        self
    }
}

/// Read-only access to one worksheet.
pub trait SheetReader {
    /// Worksheet name.
    fn name(&self) -> &str;

    /// Index of the last row that may hold data.
    fn row_count(&self) -> u32;

    /// Index of the last column that may hold data.
    fn column_count(&self) -> u32;

    /// The cell at `(row, col)`, or `None` outside the used range.
    fn cell(&self, row: u32, col: u32) -> Option<&Cell>;

    /// Normalized text of the cell at `(row, col)`; never fails.
    fn cell_text(&self, row: u32, col: u32) -> String {
        text::cell_text(self.cell(row, col))
    }

    /// Explicit indent attribute of the cell at `(row, col)`, if any.
    fn cell_indent(&self, row: u32, col: u32) -> Option<u32> {
        self.cell(row, col).and_then(|cell| cell.indent)
    }
}

/// Worksheet enumeration over a loaded workbook.
pub trait WorkbookReader {
    type Sheet: SheetReader;

    /// Worksheet names in workbook order.
    fn sheet_names(&self) -> Vec<&str>;

    /// Looks a worksheet up by exact name.
    fn sheet(&self, name: &str) -> Option<&Self::Sheet>;
}

/// In-memory worksheet backed by a dense grid of cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridSheet {
    name: String,
    rows: Vec<Vec<Cell>>,
}

impl GridSheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Builds a sheet whose first vector is row 1, first cell column 1.
    pub fn from_rows(name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Builds a sheet of plain text cells; empty strings become empty cells.
    pub fn from_text_rows<R, S>(name: impl Into<String>, rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|value| {
                        let value = value.as_ref();
                        if value.is_empty() {
                            Cell::default()
                        } else {
                            Cell::text(value)
                        }
                    })
                    .collect()
            })
            .collect();
        Self::from_rows(name, rows)
    }

    /// Stores `cell` at the 1-based position, growing the grid as needed.
    /// Position zero is ignored.
    pub fn set_cell(&mut self, row: u32, col: u32, cell: Cell) {
        if row == 0 || col == 0 {
            return;
        }
        let (row_idx, col_idx) = ((row - 1) as usize, (col - 1) as usize);
        if self.rows.len() <= row_idx {
            self.rows.resize_with(row_idx + 1, Vec::new);
        }
        let cells = &mut self.rows[row_idx];
        if cells.len() <= col_idx {
            cells.resize_with(col_idx + 1, Cell::default);
        }
        cells[col_idx] = cell;
    }

    pub fn cell_mut(&mut self, row: u32, col: u32) -> Option<&mut Cell> {
        let row_idx = row.checked_sub(1)? as usize;
        let col_idx = col.checked_sub(1)? as usize;
        self.rows.get_mut(row_idx)?.get_mut(col_idx)
    }
}

impl SheetReader for GridSheet {
    fn name(&self) -> &str {
        &self.name
    }

    fn row_count(&self) -> u32 {
        self.rows.len() as u32
    }

    fn column_count(&self) -> u32 {
        self.rows.iter().map(Vec::len).max().unwrap_or(0) as u32
    }

    fn cell(&self, row: u32, col: u32) -> Option<&Cell> {
        let row_idx = row.checked_sub(1)? as usize;
        let col_idx = col.checked_sub(1)? as usize;
        self.rows.get(row_idx)?.get(col_idx)
    }
}

/// A fully materialized, read-only workbook owned by the caller.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadedWorkbook {
    sheets: Vec<GridSheet>,
}

impl LoadedWorkbook {
    pub fn new(sheets: Vec<GridSheet>) -> Self {
        Self { sheets }
    }

    pub fn sheets(&self) -> &[GridSheet] {
        &self.sheets
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

impl WorkbookReader for LoadedWorkbook {
    type Sheet = GridSheet;

    fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|sheet| sheet.name()).collect()
    }

    fn sheet(&self, name: &str) -> Option<&GridSheet> {
        self.sheets.iter().find(|sheet| sheet.name() == name)
    }
}
