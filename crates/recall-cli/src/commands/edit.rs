//! Card editing with progress rekeying.

use recall_core::{Config, Library, ProgressStore, Result};

pub fn run(base: &str, id: &str, question: &str, answer: &str) -> Result<()> {
    let config = Config::load()?;
    let library = Library::new(config.knowledge_dir.clone());
    let new_id = library.edit(base, id, question, answer)?;

    // Content-derived ids move with the content; rekey saved progress so
    // the card's counters and queue position survive the edit.
    if new_id != id {
        let store = ProgressStore::open_default()?;
        if let Some(mut snapshot) = store.restore(base) {
            if let Some(state) = snapshot.items.remove(id) {
                snapshot.items.insert(new_id.clone(), state);
            }
            for slot in snapshot.queue_order.iter_mut() {
                if slot == id {
                    *slot = new_id.clone();
                }
            }
            store.save(base, &snapshot);
        }
    }

    if new_id == id {
        println!("Card '{id}' updated.");
    } else {
        println!("Card updated: {id} -> {new_id}");
    }
    Ok(())
}
