//! Output formatting and styling module.
//!
//! Provides a centralized interface for all CLI output, including colored
//! output, progress tracking, and the end-of-run summary table. Keeping the
//! styling here means the rest of the crate never touches escape codes.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Manages all CLI output with consistent styling and formatting.
///
/// This struct provides methods for:
/// - Success messages (green with ✓)
/// - Error messages (red with ✗)
/// - Warning messages (yellow with ⚠)
/// - Info messages (cyan)
/// - Progress bars for disposal runs
/// - The per-bucket summary table
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use shelflife::output::OutputFormatter;
    /// OutputFormatter::success("Moved to old/");
    /// ```
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    ///
    /// Errors go to stderr so they survive output redirection.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use shelflife::output::OutputFormatter;
    /// OutputFormatter::info("Organizing directory: /home/user/Downloads");
    /// ```
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Creates and returns a progress bar for disposal runs.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use shelflife::output::OutputFormatter;
    /// let pb = OutputFormatter::create_progress_bar(100);
    /// pb.inc(1);
    /// pb.finish_and_clear();
    /// ```
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("█▓░"),
        );
        pb
    }

    /// Prints a summary table of entry counts per bucket.
    ///
    /// Rows are printed in the order given, so callers control whether the
    /// youngest or oldest bucket comes first.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use shelflife::output::OutputFormatter;
    ///
    /// OutputFormatter::summary_table(&[("recent", 4), ("aged", 2), ("old", 9)], 15);
    /// ```
    pub fn summary_table(rows: &[(&str, usize)], total_entries: usize) {
        Self::header("SUMMARY");

        // Calculate column width
        let max_label_len = rows
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(0)
            .max(6); // At least "Bucket" width

        // Print header
        println!(
            "{:<width$} | {}",
            "Bucket".bold(),
            "Entries".bold(),
            width = max_label_len
        );
        println!("{}", "-".repeat(max_label_len + 12));

        // Print rows
        for (label, count) in rows {
            let entry_word = if *count == 1 { "entry" } else { "entries" };
            println!(
                "{:<width$} | {} {}",
                label,
                count.to_string().green(),
                entry_word,
                width = max_label_len
            );
        }

        // Print footer
        println!("{}", "-".repeat(max_label_len + 12));
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            total_entries.to_string().green().bold(),
            if total_entries == 1 { "entry" } else { "entries" },
            width = max_label_len
        );
    }
}
