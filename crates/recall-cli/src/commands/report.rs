//! Review statistics: table display and file export.

use std::path::PathBuf;

use recall_core::{
    Config, CoreError, Library, PcgSource, ProgressStore, Report, Result, Scheduler,
};

pub fn run(base: &str, format: &str, output: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let library = Library::new(config.knowledge_dir.clone());
    let cards = library.load(base)?;

    let store = ProgressStore::open_default()?;
    let scheduler = Scheduler::new(cards, store.restore(base), Box::new(PcgSource::from_entropy()));
    let report = Report::build(base, &scheduler);

    match format {
        "table" => {
            print_table(&report);
            Ok(())
        }
        "csv" => emit(&report, report.to_csv()?, "csv", output),
        "txt" => emit(&report, report.to_text(), "txt", output),
        "html" => emit(&report, report.to_html(), "html", output),
        other => Err(CoreError::Custom(format!(
            "unknown report format '{other}' (expected table, csv, txt or html)"
        ))),
    }
}

fn emit(report: &Report, contents: String, extension: &str, output: Option<PathBuf>) -> Result<()> {
    let Some(path) = output else {
        print!("{contents}");
        return Ok(());
    };
    // A directory target gets a timestamped default name inside it.
    let path = if path.is_dir() {
        path.join(report.export_file_name(extension))
    } else {
        path
    };
    std::fs::write(&path, contents)?;
    println!("Report written to {}", path.display());
    Ok(())
}

fn print_table(report: &Report) {
    println!("Report for {}", report.base);
    println!(
        "Cards: {}   Mastered: {}   Reviews: {}",
        report.total, report.mastered, report.total_reviews
    );
    println!();
    println!(
        "{:<10} {:<50} {:>6} {:>8} {:>8} {:>9}",
        "ID", "Question", "Wrong", "Correct", "Reviews", "Mastered"
    );
    for row in &report.rows {
        println!(
            "{:<10} {:<50} {:>6} {:>8} {:>8} {:>9}",
            row.id,
            truncate(&row.question, 50),
            row.wrong_count,
            row.correct_count,
            row.review_count,
            if row.mastered { "yes" } else { "no" }
        );
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max - 3).collect();
        format!("{cut}...")
    }
}
