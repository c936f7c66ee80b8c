// src/metadata.rs

use serde::{Deserialize, Serialize};

/// Retrievable unit of text with document and section provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Document title, identical for every chunk of a document
    pub doc_title: String,
    /// Heading of the (possibly merged) section the chunk came from
    pub section: String,
    /// 1-based, gap-free position of the chunk within its document
    pub chunk_id: usize,
    pub content: String,
}

impl Chunk {
    pub fn to_record(&self) -> ChunkRecord {
        ChunkRecord::from(self)
    }
}

/// Shape expected by the vector store: a string id, the text to embed, and
/// flat metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub id: String,
    pub document: String,
    pub metadata: RecordMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMetadata {
    pub doc_title: String,
    pub section: String,
    pub chunk_id: usize,
}

impl From<&Chunk> for ChunkRecord {
    fn from(chunk: &Chunk) -> Self {
        Self {
            id: chunk.chunk_id.to_string(),
            document: chunk.content.clone(),
            metadata: RecordMetadata {
                doc_title: chunk.doc_title.clone(),
                section: chunk.section.clone(),
                chunk_id: chunk.chunk_id,
            },
        }
    }
}
