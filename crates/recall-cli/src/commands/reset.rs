//! Saved-progress deletion.

use recall_core::{ProgressStore, Result};

pub fn run(base: &str) -> Result<()> {
    let store = ProgressStore::open_default()?;
    if store.reset(base)? {
        println!("Progress for '{base}' deleted.");
    } else {
        println!("No saved progress for '{base}'.");
    }
    Ok(())
}
