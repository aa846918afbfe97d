use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Debit/credit marker attached to a balance amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Dr,
    Cr,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Dr => write!(f, "Dr"),
            Side::Cr => write!(f, "Cr"),
        }
    }
}

/// A balance cell's parsed value and its optional explicit side marker.
///
/// The side is only ever taken from a trailing `Dr`/`Cr` token in the source
/// text, never inferred from the sign of the amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AmountSide {
    pub amount: Option<f64>,
    pub side: Option<Side>,
}

impl AmountSide {
    pub fn new(amount: f64, side: Option<Side>) -> Self {
        Self {
            amount: Some(amount),
            side,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.amount.is_none() && self.side.is_none()
    }
}

/// Period movements for a ledger line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Transactions {
    pub debit: Option<f64>,
    pub credit: Option<f64>,
}

/// One account line of a trial balance in flat form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerRow {
    /// Account name with leading whitespace removed.
    pub ledger_name: String,
    /// Hierarchical depth inferred from indentation.
    pub level: u32,
    pub opening: AmountSide,
    pub transactions: Transactions,
    pub closing: AmountSide,
    /// 1-based row of the source sheet.
    pub row_no: u32,
}

impl LedgerRow {
    /// Creates a row with no balances or movements.
    pub fn new(ledger_name: impl Into<String>, level: u32, row_no: u32) -> Self {
        Self {
            ledger_name: ledger_name.into(),
            level,
            opening: AmountSide::default(),
            transactions: Transactions::default(),
            closing: AmountSide::default(),
            row_no,
        }
    }
}

/// A ledger row in tree form. Leaves carry no `children` key when serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerNode {
    #[serde(flatten)]
    pub row: LedgerRow,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<LedgerNode>,
}

impl LedgerNode {
    pub fn leaf(row: LedgerRow) -> Self {
        Self {
            row,
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Resolved 1-based column positions of the five trial balance columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnLayout {
    pub particulars_col: u32,
    pub opening_col: u32,
    pub debit_col: u32,
    pub credit_col: u32,
    pub closing_col: u32,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            particulars_col: 1,
            opening_col: 2,
            debit_col: 3,
            credit_col: 4,
            closing_col: 5,
        }
    }
}

/// Extraction metadata callers can inspect to judge how well a sheet parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMeta {
    pub header_lines: Vec<String>,
    pub header_row: u32,
    pub data_start_idx: u32,
    pub columns: ColumnLayout,
}

/// Constant tag identifying the document kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    #[default]
    #[serde(rename = "TRIAL_BALANCE")]
    TrialBalance,
}

/// The normalized record produced by one extraction of one worksheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialBalanceDocument {
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    pub sheet_name: String,
    pub extracted_at: DateTime<Utc>,
    pub meta: DocumentMeta,
    pub rows: Vec<LedgerNode>,
    pub rows_flat: Vec<LedgerRow>,
}

/// Role of the user driving an extraction, as supplied by the host application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    DocSpecialist,
    TeamLead,
    Manager,
    Ca,
}

impl Role {
    /// Only the document team uploads and parses sheets; managers and CAs
    /// work from documents that already exist.
    pub fn can_extract(self) -> bool {
        matches!(self, Role::DocSpecialist | Role::TeamLead)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::DocSpecialist => write!(f, "DOC_SPECIALIST"),
            Role::TeamLead => write!(f, "TEAM_LEAD"),
            Role::Manager => write!(f, "MANAGER"),
            Role::Ca => write!(f, "CA"),
        }
    }
}
