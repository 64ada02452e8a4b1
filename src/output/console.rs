//! Console output utilities.

use console::style;

use crate::config::Feed;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = format!(
        r#"
╔═══════════════════════════════════════════════════════╗
║     yars v{:<44}║
║     Media downloader for Reddit users and subreddits  ║
╚═══════════════════════════════════════════════════════╝
"#,
        env!("CARGO_PKG_VERSION")
    );
    println!("{}", style(banner).cyan());
}

/// Print configuration summary.
pub fn print_config_summary(feed: &Feed, download_dir: &str, authenticated: bool) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Feed: {}", feed);
    println!("  Directory: {}", download_dir);
    println!(
        "  Session: {}",
        if authenticated { "authenticated" } else { "anonymous" }
    );
    println!();
}
