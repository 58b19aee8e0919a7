//! Per-card review statistics for tabular display and export.
//!
//! Reporting is read-only against the scheduler's state: it copies the
//! cumulative counters into sorted rows and renders them as CSV, plain
//! text or a self-contained HTML page.

use chrono::Local;
use serde::Serialize;

use crate::error::{CoreError, Result};
use crate::scheduler::Scheduler;

/// One card's cumulative counters.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub id: String,
    pub question: String,
    pub wrong_count: u32,
    pub correct_count: u32,
    pub review_count: u32,
    pub mastered: bool,
}

/// Review statistics for one knowledge base.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub base: String,
    pub total: usize,
    pub mastered: usize,
    pub total_reviews: u64,
    pub rows: Vec<ReportRow>,
}

impl Report {
    /// Build a report from scheduler state. Rows are sorted worst-first:
    /// wrong count descending, then correct count ascending.
    pub fn build(base: &str, scheduler: &Scheduler) -> Self {
        let mut rows: Vec<ReportRow> = scheduler
            .items()
            .map(|item| ReportRow {
                id: item.card.id.clone(),
                question: item.card.question.clone(),
                wrong_count: item.state.wrong_count,
                correct_count: item.state.correct_count,
                review_count: item.state.review_count,
                mastered: item.state.mastered,
            })
            .collect();
        rows.sort_by(|a, b| {
            b.wrong_count
                .cmp(&a.wrong_count)
                .then(a.correct_count.cmp(&b.correct_count))
                .then(a.id.cmp(&b.id))
        });

        Self {
            base: base.to_string(),
            total: rows.len(),
            mastered: rows.iter().filter(|row| row.mastered).count(),
            total_reviews: rows.iter().map(|row| u64::from(row.review_count)).sum(),
            rows,
        }
    }

    /// Render as CSV with a header row.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record([
            "ID",
            "Question",
            "Wrong Count",
            "Correct Count",
            "Review Count",
            "Mastered",
        ])?;
        for row in &self.rows {
            writer.write_record([
                row.id.clone(),
                row.question.clone(),
                row.wrong_count.to_string(),
                row.correct_count.to_string(),
                row.review_count.to_string(),
                String::from(if row.mastered { "Yes" } else { "No" }),
            ])?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| CoreError::Custom(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| CoreError::Custom(e.to_string()))
    }

    /// Render as a plain-text report.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Review Report - {}\n", self.base));
        out.push_str(&format!(
            "Generated on {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        ));
        out.push_str(&format!(
            "Cards: {} | Mastered: {} | Reviews: {}\n",
            self.total, self.mastered, self.total_reviews
        ));
        out.push_str(&"=".repeat(50));
        out.push('\n');
        for (index, row) in self.rows.iter().enumerate() {
            out.push_str(&format!("[{}] ID: {}\n", index + 1, row.id));
            out.push_str(&format!("Question: {}\n", row.question));
            out.push_str(&format!(
                "Wrong: {} | Correct: {} | Reviews: {} | Mastered: {}\n",
                row.wrong_count,
                row.correct_count,
                row.review_count,
                if row.mastered { "Yes" } else { "No" }
            ));
            out.push_str(&"-".repeat(40));
            out.push('\n');
        }
        out
    }

    /// Render as a self-contained HTML page.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        out.push_str("<meta charset=\"UTF-8\">\n");
        out.push_str(&format!(
            "<title>Review Report - {}</title>\n",
            html_escape(&self.base)
        ));
        out.push_str(
            "<style>\nbody { font-family: sans-serif; max-width: 960px; margin: 0 auto; padding: 20px; }\ntable { width: 100%; border-collapse: collapse; }\nth, td { padding: 8px 12px; text-align: left; border-bottom: 1px solid #ddd; }\nth { background: #f0f0f0; }\n</style>\n",
        );
        out.push_str("</head>\n<body>\n");
        out.push_str(&format!(
            "<h1>Review Report - {}</h1>\n",
            html_escape(&self.base)
        ));
        out.push_str(&format!(
            "<p>Generated on {} | Cards: {} | Mastered: {} | Reviews: {}</p>\n",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            self.total,
            self.mastered,
            self.total_reviews
        ));
        out.push_str("<table>\n<thead>\n<tr><th>ID</th><th>Question</th><th>Wrong</th><th>Correct</th><th>Reviews</th><th>Mastered</th></tr>\n</thead>\n<tbody>\n");
        for row in &self.rows {
            out.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                html_escape(&row.id),
                html_escape(&row.question),
                row.wrong_count,
                row.correct_count,
                row.review_count,
                if row.mastered { "Yes" } else { "No" }
            ));
        }
        out.push_str("</tbody>\n</table>\n</body>\n</html>\n");
        out
    }

    /// Default export file name, e.g. `review_report_capitals_20260823143000.csv`.
    pub fn export_file_name(&self, extension: &str) -> String {
        let stem = self.base.strip_suffix(".json").unwrap_or(&self.base);
        format!(
            "review_report_{}_{}.{}",
            stem,
            Local::now().format("%Y%m%d%H%M%S"),
            extension
        )
    }
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
