use lexis_core::Summary;
use owo_colors::OwoColorize;

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "Lexis".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Sentiment and readability metrics for web articles\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print elapsed wall time, colored by throughput per article
pub fn print_timing(label: &str, duration: std::time::Duration, articles: usize) {
    let secs = duration.as_secs_f64();
    let per_article = if articles > 0 { secs / articles as f64 } else { 0.0 };
    let rate = format!("{:.2}s/article", per_article);

    let rate = if per_article < 1.0 {
        rate.dimmed().to_string()
    } else if per_article < 3.0 {
        rate.bright_yellow().to_string()
    } else {
        rate.bright_red().to_string()
    };

    eprintln!("  {} {:>8.2}s ({})", format!("{}:", label).dimmed(), secs, rate);
}

/// Print the end-of-run statistics table
pub fn print_summary(summary: &Summary) {
    eprintln!("\n{}", "═".repeat(60).dimmed());
    eprintln!("{}", "Summary Statistics".bold().cyan());
    eprintln!("{}", "═".repeat(60).dimmed());
    eprintln!(
        "  {} {}",
        "Articles processed:".dimmed(),
        summary.articles_processed.to_string().bright_white()
    );
    eprintln!(
        "  {} {}\n",
        "Articles with content:".dimmed(),
        summary.articles_with_content.to_string().bright_white()
    );

    for column in &summary.columns {
        eprintln!(
            "  {} Mean={:.4}, Range=({:.4}-{:.4})",
            format!("{}:", column.name).bold(),
            column.mean,
            column.min,
            column.max
        );
    }
    eprintln!();
}
