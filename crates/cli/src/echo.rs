use owo_colors::OwoColorize;

use cleanreader_core::{Article, OutboundMessage};

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!("\n{} {} {}", "cleanreader".bold().bright_blue(), "v".dimmed(), VERSION.dimmed());
    eprintln!("{}", "Distraction-free reader mode for saved pages\n".dimmed());
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

/// Print a notification the controller sent to the host
pub fn print_message(message: &OutboundMessage) {
    let json = message.to_json().unwrap_or_else(|e| e.to_string());
    eprintln!("  {} {}", "host ←".dimmed(), json.bright_white());
}

/// Print reading stats and the heading outline
pub fn print_stats(article: &Article) {
    eprintln!("{}", "═".repeat(60).dimmed());
    eprintln!("{}", "Reading Stats".bold().cyan());
    eprintln!("{}", "═".repeat(60).dimmed());

    if let Some(title) = &article.metadata.title {
        eprintln!("  {} {}", "Title:".dimmed(), title.bright_white());
    }
    eprintln!("  {} {}", "Located by:".dimmed(), format!("{:?}", article.located_by).bright_white());
    eprintln!("  {} {}", "Characters:".dimmed(), article.metrics.char_count.to_string().bright_white());
    eprintln!("  {} {}", "Words:".dimmed(), article.metrics.word_count.to_string().bright_white());
    eprintln!(
        "  {} {}",
        "Reading time:".dimmed(),
        format!("{} min", article.metrics.reading_time_minutes).bright_white()
    );
    eprintln!("  {} {}\n", "Headings:".dimmed(), article.headings.len().to_string().bright_white());
}

/// Format file size for display
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
