//! Knowledge-base listing.

use recall_core::{Config, Library, Result};

pub fn run() -> Result<()> {
    let config = Config::load()?;
    let library = Library::new(config.knowledge_dir.clone());
    let files = library.list()?;

    if files.is_empty() {
        println!("No knowledge bases in {}", library.dir().display());
        return Ok(());
    }
    for name in files {
        println!("{name}");
    }
    Ok(())
}
