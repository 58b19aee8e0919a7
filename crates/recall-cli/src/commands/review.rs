//! Interactive review session.
//!
//! Presents one card at a time: question first, answer on demand, then a
//! single-key judgment. Progress is saved after every judgment so a
//! session can be resumed at any point.

use std::io::{self, BufRead, Write};

use recall_core::{Config, Judgment, Library, PcgSource, ProgressStore, Result, Scheduler};

pub fn run(base: &str, fresh: bool, seed: Option<u64>) -> Result<()> {
    let config = Config::load()?;
    let library = Library::new(config.knowledge_dir.clone());
    let cards = library.load(base)?;
    if cards.is_empty() {
        println!("Knowledge base '{base}' has no reviewable cards.");
        return Ok(());
    }

    let store = ProgressStore::open_default()?;
    let restored = if fresh { None } else { store.restore(base) };
    let rng = match seed {
        Some(seed) => PcgSource::seeded(seed),
        None => PcgSource::from_entropy(),
    };
    let mut scheduler = Scheduler::new(cards, restored, Box::new(rng));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let (question, answer) = match scheduler.current() {
            Some(item) => (item.card.question.clone(), item.card.answer.clone()),
            None => break,
        };

        println!();
        println!(
            "[{}/{} mastered] {question}",
            scheduler.mastered(),
            scheduler.total()
        );
        print!("  (Enter to show the answer, q to quit) ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { return Ok(()) };
        if line?.trim().eq_ignore_ascii_case("q") {
            return Ok(());
        }

        println!("  -> {answer}");

        let judgment = loop {
            print!(
                "  [{}] recognized  [{}] forgotten  [q] quit: ",
                config.recognized_key, config.forgotten_key
            );
            io::stdout().flush()?;
            let Some(line) = lines.next() else { return Ok(()) };
            let input = line?.trim().to_lowercase();
            match input.chars().next() {
                Some(c) if c == config.recognized_key => break Judgment::Recognized,
                Some(c) if c == config.forgotten_key => break Judgment::Forgotten,
                Some('q') => return Ok(()),
                _ => println!("  unrecognized input"),
            }
        };

        scheduler.apply(judgment);
        store.save(base, &scheduler.snapshot());
    }

    println!();
    println!(
        "All cards reviewed -- {}/{} mastered.",
        scheduler.mastered(),
        scheduler.total()
    );
    Ok(())
}
