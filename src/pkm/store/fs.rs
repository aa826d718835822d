use super::DocumentStore;
use crate::error::{PkmError, Result};
use crate::schema::Document;
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const DATA_FILENAME: &str = "data.json";

/// Stores the document as pretty-printed JSON in `<data_dir>/data.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn data_file(&self) -> PathBuf {
        self.data_dir.join(DATA_FILENAME)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir).map_err(PkmError::Io)?;
        }
        Ok(())
    }
}

impl DocumentStore for JsonFileStore {
    fn load(&self) -> Result<Document> {
        let data_file = self.data_file();
        let content = match fs::read_to_string(&data_file) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("event=store_load module=store status=missing");
                return Ok(Document::default());
            }
            Err(e) => return Err(PkmError::Io(e)),
        };

        let document: Document =
            serde_json::from_str(&content).map_err(|source| PkmError::CorruptStore {
                path: data_file.clone(),
                source,
            })?;
        debug!(
            "event=store_load module=store status=ok notes={} tasks={}",
            document.notes.len(),
            document.tasks.len()
        );
        Ok(document)
    }

    fn save(&self, document: &Document) -> Result<()> {
        self.ensure_dir()?;

        let content = serde_json::to_string_pretty(document).map_err(PkmError::Serialization)?;

        // Write to a sibling temp file and rename over the target so a crash
        // never leaves a truncated data.json behind.
        let tmp_file = self.data_dir.join(format!(".data-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(PkmError::Io)?;
        if let Err(e) = fs::rename(&tmp_file, self.data_file()) {
            let _ = fs::remove_file(&tmp_file);
            return Err(PkmError::Io(e));
        }

        debug!(
            "event=store_save module=store status=ok notes={} tasks={}",
            document.notes.len(),
            document.tasks.len()
        );
        Ok(())
    }
}
