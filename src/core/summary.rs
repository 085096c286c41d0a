//! Terminal summary of per-group mean errors.

use crate::core::metrics::{COMPOSITE_GROUP, GroupMeans};
use colored::Colorize;

/// Render the mean-error table as display lines. The overall row (mean of
/// the per-group means) is appended last, matching the plotted composite.
pub fn summary_lines(means: &[GroupMeans]) -> Vec<String> {
    let mut lines = Vec::with_capacity(means.len() + 2);
    lines.push(format!(
        "{:<24} {:>6} {:>12} {:>12} {:>12}",
        "group".bold(),
        "rows".bold(),
        "detached".bold(),
        "attached".bold(),
        "total".bold()
    ));

    for m in means {
        lines.push(format!(
            "{:<24} {:>6} {:>12.2} {:>12.2} {:>12.2}",
            m.group, m.rows, m.detached_error, m.attached_error, m.total_error
        ));
    }

    if !means.is_empty() {
        let n = means.len() as f64;
        let mean = |f: fn(&GroupMeans) -> f64| means.iter().map(|m| f(m)).sum::<f64>() / n;
        lines.push(format!(
            "{:<24} {:>6} {:>12.2} {:>12.2} {:>12.2}",
            COMPOSITE_GROUP.cyan().bold(),
            means.iter().map(|m| m.rows).sum::<usize>(),
            mean(|m| m.detached_error),
            mean(|m| m.attached_error),
            mean(|m| m.total_error)
        ));
    }
    lines
}
