//! Explicit cell indent levels read straight from an `.xlsx` package.
//!
//! calamine exposes values only, so the alignment indent of each cell is
//! resolved here: `xl/workbook.xml` and its relationships map sheet names to
//! worksheet parts, `xl/styles.xml` gives the indent of every `cellXfs`
//! record, and each worksheet part maps cells to those records through their
//! `s` attribute. Any part that is missing or malformed simply contributes
//! no indents.

use std::collections::HashMap;
use std::io::{Cursor, Read};

use quick_xml::Reader as XmlReader;
use quick_xml::events::{BytesStart, Event};
use tracing::warn;
use zip::ZipArchive;

/// 1-based `(row, col)` to indent level for one worksheet.
pub type CellIndents = HashMap<(u32, u32), u32>;

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
const STYLES_PART: &str = "xl/styles.xml";

/// Reads the non-zero indent of every styled cell, keyed by sheet name.
pub fn read_cell_indents(bytes: &[u8]) -> HashMap<String, CellIndents> {
    let mut indents = HashMap::new();

    let mut archive = match ZipArchive::new(Cursor::new(bytes)) {
        Ok(archive) => archive,
        Err(error) => {
            warn!(%error, "workbook package unreadable, cell indents ignored");
            return indents;
        }
    };

    let Some(styles) = read_part(&mut archive, STYLES_PART) else {
        return indents;
    };
    let xf_indents = parse_xf_indents(&styles);
    if xf_indents.iter().all(Option::is_none) {
        return indents;
    }

    let (Some(workbook), Some(rels)) = (
        read_part(&mut archive, WORKBOOK_PART),
        read_part(&mut archive, WORKBOOK_RELS_PART),
    ) else {
        return indents;
    };
    let targets = parse_relationships(&rels);

    for (sheet_name, rel_id) in parse_sheet_ids(&workbook) {
        let Some(target) = targets.get(&rel_id) else {
            continue;
        };
        let part = resolve_target(target);
        let Some(sheet_xml) = read_part(&mut archive, &part) else {
            continue;
        };
        let sheet_indents = parse_sheet_indents(&sheet_xml, &xf_indents);
        if !sheet_indents.is_empty() {
            indents.insert(sheet_name, sheet_indents);
        }
    }

    indents
}

fn read_part(archive: &mut ZipArchive<Cursor<&[u8]>>, path: &str) -> Option<String> {
    let mut file = archive.by_name(path).ok()?;
    let mut content = String::new();
    match file.read_to_string(&mut content) {
        Ok(_) => Some(content),
        Err(error) => {
            warn!(part = path, %error, "package part unreadable");
            None
        }
    }
}

fn attribute(element: &BytesStart<'_>, local_name: &[u8]) -> Option<String> {
    element
        .attributes()
        .filter_map(std::result::Result::ok)
        .find(|attr| attr.key.local_name().as_ref() == local_name)
        .and_then(|attr| attr.unescape_value().ok())
        .map(|value| value.to_string())
}

/// Indent of each `cellXfs/xf` record, in record order.
fn parse_xf_indents(xml: &str) -> Vec<Option<u32>> {
    let mut reader = XmlReader::from_str(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut indents = Vec::new();
    let mut in_cell_xfs = false;
    let mut in_xf = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"cellXfs" => in_cell_xfs = true,
                b"xf" if in_cell_xfs => {
                    indents.push(None);
                    in_xf = true;
                }
                b"alignment" if in_xf => set_last_indent(&mut indents, &e),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"xf" if in_cell_xfs => indents.push(None),
                b"alignment" if in_xf => set_last_indent(&mut indents, &e),
                _ => {}
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"cellXfs" => in_cell_xfs = false,
                b"xf" => in_xf = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(error) => {
                warn!(%error, "styles part malformed, cell indents ignored");
                return Vec::new();
            }
            _ => {}
        }
        buf.clear();
    }

    indents
}

fn set_last_indent(indents: &mut [Option<u32>], alignment: &BytesStart<'_>) {
    let indent = attribute(alignment, b"indent")
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|indent| *indent > 0);
    if let Some(last) = indents.last_mut() {
        *last = indent;
    }
}

/// Sheet name and relationship id of each `<sheet>` in workbook order.
fn parse_sheet_ids(xml: &str) -> Vec<(String, String)> {
    let mut reader = XmlReader::from_str(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut sheets = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(e) | Event::Start(e)) if e.local_name().as_ref() == b"sheet" => {
                if let (Some(name), Some(id)) = (attribute(&e, b"name"), attribute(&e, b"id")) {
                    sheets.push((name, id));
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    sheets
}

fn parse_relationships(xml: &str) -> HashMap<String, String> {
    let mut reader = XmlReader::from_str(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut relationships = HashMap::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(e) | Event::Start(e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                if let (Some(id), Some(target)) = (attribute(&e, b"Id"), attribute(&e, b"Target"))
                {
                    relationships.insert(id, target);
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    relationships
}

/// Relationship targets are relative to `xl/` unless absolute.
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{target}"),
    }
}

fn parse_sheet_indents(xml: &str, xf_indents: &[Option<u32>]) -> CellIndents {
    let mut reader = XmlReader::from_str(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut indents = CellIndents::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(e) | Event::Start(e)) if e.local_name().as_ref() == b"c" => {
                let indent = attribute(&e, b"s")
                    .and_then(|style| style.parse::<usize>().ok())
                    .and_then(|style| xf_indents.get(style).copied().flatten());
                let position = attribute(&e, b"r").and_then(|r| parse_cell_ref(&r));
                if let (Some(indent), Some(position)) = (indent, position) {
                    indents.insert(position, indent);
                }
            }
            Ok(Event::Eof) => break,
            Err(error) => {
                warn!(%error, "worksheet part malformed, remaining indents ignored");
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    indents
}

/// Parses an `A1`-style reference into a 1-based `(row, col)`.
fn parse_cell_ref(reference: &str) -> Option<(u32, u32)> {
    let split = reference.find(|ch: char| ch.is_ascii_digit())?;
    let (letters, digits) = reference.split_at(split);
    if letters.is_empty() {
        return None;
    }

    let mut col: u32 = 0;
    for ch in letters.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let value = ch.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
        col = col.checked_mul(26)?.checked_add(value)?;
    }

    let row = digits.parse::<u32>().ok().filter(|row| *row > 0)?;
    Some((row, col))
}
