use super::{Cell, CellValue};

/// Flattens a cell into a string.
///
/// Resolution order: a non-blank display text, then the raw value (rich text
/// runs, cached formula result, formula source), then the stringified scalar.
/// Absent and error cells yield an empty string. The result is not trimmed so
/// callers can still see leading indentation.
pub fn cell_text(cell: Option<&Cell>) -> String {
    let Some(cell) = cell else {
        return String::new();
    };

    if let Some(display) = &cell.display {
        if !display.trim().is_empty() {
            return display.clone();
        }
    }

    value_text(&cell.value)
}

fn value_text(value: &CellValue) -> String {
    match value {
        CellValue::Empty | CellValue::Error(_) => String::new(),
        CellValue::Text(text) => text.clone(),
        CellValue::Number(number) => number.to_string(),
        CellValue::Bool(flag) => flag.to_string(),
        CellValue::RichText(runs) => runs.concat(),
        CellValue::Formula { source, cached } => match cached.as_deref() {
            Some(result) if !matches!(result, CellValue::Empty) => value_text(result),
            _ => source.clone(),
        },
    }
}
