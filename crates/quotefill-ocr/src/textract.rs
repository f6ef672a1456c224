//! AWS Textract OCR client.
//!
//! Credentials come from the default AWS provider chain; only the region is
//! configured here. Both operations send the page image inline.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_textract::primitives::Blob;
use aws_sdk_textract::types::{self as sdk, Document, FeatureType};
use quotefill_acquire::ocr::{self, Block, BlockType, OcrClient, Relationship, Table};
use quotefill_acquire::OcrError;
use tracing::{debug, info};

pub struct TextractClient {
    client: aws_sdk_textract::Client,
}

impl TextractClient {
    /// Load AWS configuration for `region` and build the client once.
    pub async fn new(region: &str) -> Self {
        let aws_cfg = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_sdk_textract::config::Region::new(region.to_string()))
            .load()
            .await;

        info!(region = %region, "TextractClient initialised");
        Self {
            client: aws_sdk_textract::Client::new(&aws_cfg),
        }
    }

    fn document(image: &[u8]) -> Document {
        Document::builder().bytes(Blob::new(image.to_vec())).build()
    }
}

#[async_trait]
impl OcrClient for TextractClient {
    async fn detect_lines(&self, image: &[u8]) -> Result<Vec<String>, OcrError> {
        let resp = self
            .client
            .detect_document_text()
            .document(Self::document(image))
            .send()
            .await
            .map_err(|e| OcrError::Request(e.to_string()))?;

        let blocks: Vec<Block> = resp.blocks().iter().map(convert_block).collect();
        let lines = ocr::lines_from_blocks(&blocks);
        debug!(blocks = blocks.len(), lines = lines.len(), "Textract detect_document_text");
        Ok(lines)
    }

    async fn analyze_tables(&self, image: &[u8]) -> Result<Vec<Table>, OcrError> {
        let resp = self
            .client
            .analyze_document()
            .document(Self::document(image))
            .feature_types(FeatureType::Tables)
            .feature_types(FeatureType::Forms)
            .send()
            .await
            .map_err(|e| OcrError::Request(e.to_string()))?;

        let blocks: Vec<Block> = resp.blocks().iter().map(convert_block).collect();
        let tables = ocr::tables_from_blocks(&blocks);
        debug!(blocks = blocks.len(), tables = tables.len(), "Textract analyze_document");
        Ok(tables)
    }
}

/// Copy the fields the reducers read out of an SDK block.
fn convert_block(block: &sdk::Block) -> Block {
    Block {
        id: block.id().unwrap_or_default().to_string(),
        block_type: block
            .block_type()
            .map_or(BlockType::Other, |t| BlockType::from_name(t.as_str())),
        text: block.text().map(str::to_string),
        row_index: block.row_index().and_then(|i| u32::try_from(i).ok()),
        column_index: block.column_index().and_then(|i| u32::try_from(i).ok()),
        selection_status: block.selection_status().map(|s| s.as_str().to_string()),
        relationships: block
            .relationships()
            .iter()
            .map(|r| Relationship {
                kind: r.r#type().map(|t| t.as_str().to_string()).unwrap_or_default(),
                ids: r.ids().to_vec(),
            })
            .collect(),
    }
}
