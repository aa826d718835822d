use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::fs::JsonFileStore;
use crate::store::DocumentStore;
use std::fs;

/// Creates the data directory and an empty data file if none exists yet.
pub fn run(store: &JsonFileStore) -> Result<CmdResult> {
    fs::create_dir_all(store.data_dir())?;

    let mut result = CmdResult::default();
    if store.data_file().exists() {
        // Loading validates the existing file without touching it.
        let doc = store.load()?;
        result.add_message(CmdMessage::info(format!(
            "Store already initialized at {} ({} notes, {} tasks)",
            store.data_file().display(),
            doc.notes.len(),
            doc.tasks.len()
        )));
    } else {
        store.save(&Default::default())?;
        result.add_message(CmdMessage::success(format!(
            "Initialized pkm store at {}",
            store.data_file().display()
        )));
    }
    Ok(result)
}
