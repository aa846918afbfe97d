//! File adapters: `.xlsx` in through calamine, `.xlsx` out through
//! rust_xlsxwriter, and the JSON interchange form of the document.

pub mod document_json;
pub mod excel_read;
pub mod excel_write;
pub mod xlsx_styles;
