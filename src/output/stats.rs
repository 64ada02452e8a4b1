//! Statistics reporting.

use console::style;

use crate::config::Feed;
use crate::download::RunStats;

/// Print statistics for a finished feed run.
pub fn print_run_stats(feed: &Feed, stats: &RunStats) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style(format!("Statistics for {}:", feed)).bold());
    println!("  Posts:    {}", stats.posts_seen);
    if stats.posts_unresolved > 0 {
        println!(
            "  Unresolved posts: {}",
            style(stats.posts_unresolved).yellow()
        );
    }
    println!("  Pictures: {}", stats.pic_count);
    println!("  Videos:   {}", stats.vid_count);
    println!("  Other:    {}", stats.other_count);
    println!("  Skipped:  {} (already present)", stats.already_present);
    println!("  Skipped:  {} (duplicates)", stats.duplicate_count);
    if stats.failed_count > 0 {
        println!("  Failed:   {}", style(stats.failed_count).red());
    }
    println!("  Total:    {} downloaded", stats.total_downloaded());
    println!("{}", style("═".repeat(50)).dim());
}

