//! OCR collaborator seam and Textract-shaped response reduction.
//!
//! The engine never talks to an OCR service directly: callers construct one
//! [`OcrClient`] and hand it to the [`Acquirer`](crate::Acquirer). Concrete
//! clients live in `quotefill-ocr`; tests use in-memory fakes.
//!
//! Responses are modelled on the AWS Textract block graph (`PAGE` → `LINE` →
//! `WORD`, `TABLE` → `CELL` → `WORD` / `SELECTION_ELEMENT`). Both operations
//! reduce that graph to plain strings: ordered lines for detection, row-major
//! cell grids for table analysis.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::OcrError;

/// Row-major table of cell texts.
pub type Table = Vec<Vec<String>>;

/// Glyph emitted for a ticked checkbox inside a table cell.
pub const SELECTED_MARK: &str = "☑";

/// An OCR service able to read one raster image at a time.
#[async_trait]
pub trait OcrClient: Send + Sync {
    /// Plain OCR: detected lines in reading order.
    async fn detect_lines(&self, image: &[u8]) -> Result<Vec<String>, OcrError>;

    /// Structured analysis: tables found on the image.
    ///
    /// Clients without table support return no tables.
    async fn analyze_tables(&self, _image: &[u8]) -> Result<Vec<Table>, OcrError> {
        Ok(Vec::new())
    }
}

// ── Textract block graph ──

/// Top-level `{"Blocks": [...]}` response body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BlocksResponse {
    #[serde(default)]
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Block {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub block_type: BlockType,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub row_index: Option<u32>,
    #[serde(default)]
    pub column_index: Option<u32>,
    #[serde(default)]
    pub selection_status: Option<String>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockType {
    Page,
    Line,
    Word,
    Table,
    Cell,
    SelectionElement,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Relationship {
    #[serde(rename = "Type", default)]
    pub kind: String,
    #[serde(default)]
    pub ids: Vec<String>,
}

impl BlockType {
    /// Map a Textract block type name (`"LINE"`, `"SELECTION_ELEMENT"`).
    pub fn from_name(name: &str) -> Self {
        match name {
            "PAGE" => Self::Page,
            "LINE" => Self::Line,
            "WORD" => Self::Word,
            "TABLE" => Self::Table,
            "CELL" => Self::Cell,
            "SELECTION_ELEMENT" => Self::SelectionElement,
            _ => Self::Other,
        }
    }
}

impl Block {
    fn child_ids(&self) -> impl Iterator<Item = &str> {
        self.relationships
            .iter()
            .filter(|r| r.kind == "CHILD")
            .flat_map(|r| r.ids.iter().map(String::as_str))
    }

    fn is_selected(&self) -> bool {
        self.selection_status.as_deref() == Some("SELECTED")
    }
}

/// `LINE` block texts in response order.
pub fn lines_from_blocks(blocks: &[Block]) -> Vec<String> {
    blocks
        .iter()
        .filter(|b| b.block_type == BlockType::Line)
        .filter_map(|b| b.text.clone())
        .collect()
}

/// Rebuild every `TABLE` block as a row-major grid.
///
/// Rows and columns follow the 1-based `RowIndex` / `ColumnIndex` of each
/// cell; missing cells become empty strings.
pub fn tables_from_blocks(blocks: &[Block]) -> Vec<Table> {
    let by_id: HashMap<&str, &Block> = blocks.iter().map(|b| (b.id.as_str(), b)).collect();
    let mut tables = Vec::new();

    for table in blocks.iter().filter(|b| b.block_type == BlockType::Table) {
        let mut rows: BTreeMap<u32, BTreeMap<u32, String>> = BTreeMap::new();

        for cell_id in table.child_ids() {
            let Some(cell) = by_id.get(cell_id) else {
                continue;
            };
            if cell.block_type != BlockType::Cell {
                continue;
            }

            let parts: Vec<&str> = cell
                .child_ids()
                .filter_map(|id| by_id.get(id))
                .filter_map(|child| match child.block_type {
                    BlockType::Word => child.text.as_deref(),
                    BlockType::SelectionElement if child.is_selected() => Some(SELECTED_MARK),
                    _ => None,
                })
                .collect();

            let row = cell.row_index.unwrap_or(0);
            let col = cell.column_index.unwrap_or(0);
            rows.entry(row)
                .or_default()
                .insert(col, parts.join(" ").trim().to_string());
        }

        if rows.is_empty() {
            continue;
        }

        let max_col = rows
            .values()
            .filter_map(|cols| cols.keys().next_back().copied())
            .max()
            .unwrap_or(0);
        let grid = rows
            .values()
            .map(|cols| {
                (1..=max_col)
                    .map(|c| cols.get(&c).cloned().unwrap_or_default())
                    .collect()
            })
            .collect();
        tables.push(grid);
    }

    tables
}

/// Parse a JSON `{"Blocks": [...]}` body.
pub fn parse_blocks(body: &[u8]) -> Result<Vec<Block>, OcrError> {
    let response: BlocksResponse =
        serde_json::from_slice(body).map_err(|e| OcrError::Decode(e.to_string()))?;
    Ok(response.blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(id: &str, block_type: BlockType, text: Option<&str>) -> Block {
        Block {
            id: id.into(),
            block_type,
            text: text.map(Into::into),
            ..Block::default()
        }
    }

    fn children(mut b: Block, ids: &[&str]) -> Block {
        b.relationships.push(Relationship {
            kind: "CHILD".into(),
            ids: ids.iter().map(|s| s.to_string()).collect(),
        });
        b
    }

    fn cell(id: &str, row: u32, col: u32, kids: &[&str]) -> Block {
        let mut c = children(block(id, BlockType::Cell, None), kids);
        c.row_index = Some(row);
        c.column_index = Some(col);
        c
    }

    #[test]
    fn lines_keep_response_order() {
        let blocks = vec![
            block("p", BlockType::Page, None),
            block("l1", BlockType::Line, Some("Progressive")),
            block("w1", BlockType::Word, Some("Progressive")),
            block("l2", BlockType::Line, Some("Total 6 month policy premium")),
        ];
        assert_eq!(
            lines_from_blocks(&blocks),
            vec!["Progressive", "Total 6 month policy premium"]
        );
    }

    #[test]
    fn tables_rebuild_grid_with_checkboxes() {
        let mut tick = block("s1", BlockType::SelectionElement, None);
        tick.selection_status = Some("SELECTED".into());
        let mut untick = block("s2", BlockType::SelectionElement, None);
        untick.selection_status = Some("NOT_SELECTED".into());

        let blocks = vec![
            children(block("t", BlockType::Table, None), &["c11", "c12", "c21", "c22"]),
            cell("c11", 1, 1, &["w1", "w2"]),
            cell("c12", 1, 2, &["s1"]),
            cell("c21", 2, 1, &["w3"]),
            cell("c22", 2, 2, &["s2"]),
            block("w1", BlockType::Word, Some("Roadside")),
            block("w2", BlockType::Word, Some("Assistance")),
            block("w3", BlockType::Word, Some("Rental")),
            tick,
            untick,
        ];

        let tables = tables_from_blocks(&blocks);
        assert_eq!(tables.len(), 1);
        assert_eq!(
            tables[0],
            vec![
                vec!["Roadside Assistance".to_string(), "☑".to_string()],
                vec!["Rental".to_string(), String::new()],
            ]
        );
    }

    #[test]
    fn tables_pad_missing_cells() {
        let blocks = vec![
            children(block("t", BlockType::Table, None), &["a", "b"]),
            cell("a", 1, 1, &["w"]),
            cell("b", 2, 3, &[]),
            block("w", BlockType::Word, Some("Collision")),
        ];
        let tables = tables_from_blocks(&blocks);
        assert_eq!(tables[0][0], vec!["Collision", "", ""]);
        assert_eq!(tables[0][1], vec!["", "", ""]);
    }

    #[test]
    fn parse_textract_json() {
        let body = br#"{
            "Blocks": [
                {"Id": "1", "BlockType": "PAGE"},
                {"Id": "2", "BlockType": "LINE", "Text": "VIN 1HGCM82633A123456",
                 "Relationships": [{"Type": "CHILD", "Ids": ["3"]}]},
                {"Id": "3", "BlockType": "WORD", "Text": "VIN"},
                {"Id": "4", "BlockType": "KEY_VALUE_SET"}
            ],
            "DocumentMetadata": {"Pages": 1}
        }"#;
        let blocks = parse_blocks(body).unwrap();
        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[3].block_type, BlockType::Other);
        assert_eq!(lines_from_blocks(&blocks), vec!["VIN 1HGCM82633A123456"]);
    }

    #[test]
    fn block_type_names() {
        assert_eq!(BlockType::from_name("SELECTION_ELEMENT"), BlockType::SelectionElement);
        assert_eq!(BlockType::from_name("LINE"), BlockType::Line);
        assert_eq!(BlockType::from_name("KEY_VALUE_SET"), BlockType::Other);
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = parse_blocks(b"not json").unwrap_err();
        assert!(matches!(err, OcrError::Decode(_)));
    }
}
