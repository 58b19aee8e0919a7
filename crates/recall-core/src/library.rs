//! Knowledge-base loading and editing.
//!
//! A knowledge base is a JSON file holding an array of
//! `{id?, question, answer}` records. Records without an explicit id get
//! a content-derived one, so progress keys stay stable when the file is
//! reordered but move with the content when a card is rewritten.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::card::Card;
use crate::error::LibraryError;

/// Raw record as stored in a knowledge-base file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawCard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default)]
    question: String,
    #[serde(default)]
    answer: String,
}

impl RawCard {
    /// Explicit id when present, otherwise the content-derived one.
    fn effective_id(&self) -> String {
        match &self.id {
            Some(id) if !id.is_empty() => id.clone(),
            _ => content_id(&self.question, &self.answer),
        }
    }
}

/// Trim and normalize CR/CRLF line endings to LF.
fn normalize(text: &str) -> String {
    text.trim().replace("\r\n", "\n").replace('\r', "\n")
}

/// Content-derived card id: the first 8 hex characters of a SHA-256 hash
/// over the normalized `question|answer` pair.
pub fn content_id(question: &str, answer: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalize(question).as_bytes());
    hasher.update(b"|");
    hasher.update(normalize(answer).as_bytes());
    let digest = hex::encode(hasher.finalize());
    digest[..8].to_string()
}

/// A directory of knowledge-base files.
pub struct Library {
    dir: PathBuf,
}

impl Library {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, base: &str) -> PathBuf {
        let mut name = base.to_string();
        if !name.ends_with(".json") {
            name.push_str(".json");
        }
        self.dir.join(name)
    }

    /// List knowledge-base file names, newest name first. Creates the
    /// directory when it does not exist yet.
    pub fn list(&self) -> Result<Vec<String>, LibraryError> {
        fs::create_dir_all(&self.dir).map_err(|source| LibraryError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let entries = fs::read_dir(&self.dir).map_err(|source| LibraryError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| LibraryError::Io {
                path: self.dir.clone(),
                source,
            })?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(".json") {
                names.push(name);
            }
        }
        names.sort_by(|a, b| b.cmp(a));
        Ok(names)
    }

    fn read_raw(&self, base: &str) -> Result<(PathBuf, Vec<RawCard>), LibraryError> {
        let path = self.path_for(base);
        if !path.exists() {
            return Err(LibraryError::NotFound { path });
        }
        let raw = fs::read_to_string(&path).map_err(|source| LibraryError::Io {
            path: path.clone(),
            source,
        })?;
        let records: Vec<RawCard> =
            serde_json::from_str(&raw).map_err(|e| LibraryError::Malformed {
                path: path.clone(),
                message: e.to_string(),
            })?;
        Ok((path, records))
    }

    /// Load a knowledge base into review-ready cards, in file order.
    ///
    /// Question and answer text is normalized; records with an empty
    /// question or answer are skipped.
    pub fn load(&self, base: &str) -> Result<Vec<Card>, LibraryError> {
        let (_, records) = self.read_raw(base)?;

        let mut cards = Vec::with_capacity(records.len());
        for record in records {
            let question = normalize(&record.question);
            let answer = normalize(&record.answer);
            if question.is_empty() || answer.is_empty() {
                continue;
            }
            let id = match record.id {
                Some(id) if !id.is_empty() => id,
                _ => content_id(&question, &answer),
            };
            cards.push(Card { id, question, answer });
        }
        Ok(cards)
    }

    /// Rewrite one record's content in the backing file.
    ///
    /// Returns the record's id after the edit. Explicit ids are kept;
    /// content-derived ids are recomputed from the new content, so the
    /// caller must rekey any state held under the old id.
    pub fn edit(
        &self,
        base: &str,
        id: &str,
        question: &str,
        answer: &str,
    ) -> Result<String, LibraryError> {
        let (path, mut records) = self.read_raw(base)?;

        let Some(record) = records.iter_mut().find(|r| r.effective_id() == id) else {
            return Err(LibraryError::UnknownId {
                id: id.to_string(),
                path,
            });
        };

        record.question = question.to_string();
        record.answer = answer.to_string();
        let new_id = record.effective_id();

        let raw = serde_json::to_string_pretty(&records).map_err(|e| LibraryError::Malformed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        fs::write(&path, raw).map_err(|source| LibraryError::Io { path, source })?;
        Ok(new_id)
    }
}
