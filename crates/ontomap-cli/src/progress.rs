//! Progress bar over the traits being resolved.

use indicatif::{ProgressBar, ProgressStyle};

const TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} traits ({eta}) {msg}";

/// Create a bar for `total` traits, hidden when `enabled` is false
pub fn trait_progress(total: usize, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(total as u64);
    let style = ProgressStyle::default_bar()
        .template(TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    bar.set_style(style);
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_is_valid() {
        assert!(ProgressStyle::default_bar().template(TEMPLATE).is_ok());
    }

    #[test]
    fn test_progress_counts() {
        let bar = trait_progress(3, false);
        bar.inc(2);
        assert_eq!(bar.position(), 2);
        assert!(bar.is_hidden());
    }
}
