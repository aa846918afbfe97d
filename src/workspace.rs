use std::path::Path;

use tracing::info;

use crate::config::ExtractOptions;
use crate::error::Result;
use crate::extract::{default_sheet_name, extract_from_workbook};
use crate::io::excel_write;
use crate::model::{Role, TrialBalanceDocument};
use crate::sheet::{LoadedWorkbook, WorkbookReader};

/// One loaded workbook together with the document most recently extracted
/// from it.
///
/// Sheet selection and export take `&mut self`/`&self`, so a workspace can
/// only ever run one operation at a time. Selecting a sheet discards the
/// previous document.
#[derive(Debug)]
pub struct Workspace<W = LoadedWorkbook> {
    workbook: W,
    role: Role,
    options: ExtractOptions,
    selected_sheet: Option<String>,
    document: Option<TrialBalanceDocument>,
}

impl<W: WorkbookReader> Workspace<W> {
    pub fn new(workbook: W, role: Role) -> Self {
        Self::with_options(workbook, role, ExtractOptions::default())
    }

    pub fn with_options(workbook: W, role: Role, options: ExtractOptions) -> Self {
        Self {
            workbook,
            role,
            options,
            selected_sheet: None,
            document: None,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn workbook(&self) -> &W {
        &self.workbook
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.workbook.sheet_names()
    }

    pub fn selected_sheet(&self) -> Option<&str> {
        self.selected_sheet.as_deref()
    }

    /// Extracts `sheet_name`, or the default sheet when `None`, replacing any
    /// previous document. On failure the previous document is dropped too.
    pub fn select_sheet(&mut self, sheet_name: Option<&str>) -> Result<&TrialBalanceDocument> {
        self.document = None;
        let name = match sheet_name {
            Some(name) => name.to_string(),
            None => default_sheet_name(&self.workbook)?,
        };

        let document = extract_from_workbook(&self.workbook, Some(&name), self.role, &self.options)?;
        info!(sheet = %name, rows = document.rows_flat.len(), "sheet selected");
        self.selected_sheet = Some(name);
        Ok(self.document.insert(document))
    }

    /// Re-runs extraction on the selected sheet, or the default sheet when
    /// none has been selected yet.
    pub fn reparse(&mut self) -> Result<&TrialBalanceDocument> {
        let selected = self.selected_sheet.clone();
        self.select_sheet(selected.as_deref())
    }

    pub fn document(&self) -> Option<&TrialBalanceDocument> {
        self.document.as_ref()
    }

    pub fn has_document(&self) -> bool {
        self.document.is_some()
    }

    /// Exports the current document; `Ok(false)` when there is none.
    pub fn export_to(&self, path: &Path, sheet_label: &str) -> Result<bool> {
        excel_write::write_workbook(path, self.document.as_ref(), sheet_label)
    }

    /// Gives back the workbook, e.g. to load a different file.
    pub fn into_workbook(self) -> W {
        self.workbook
    }
}
