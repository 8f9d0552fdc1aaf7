use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

/// Returns a progress bar over `length` steps, labelled with `prefix`.
pub fn bar(prefix: String, length: u64) -> Result<ProgressBar> {
    let pb = ProgressBar::new(length);
    pb.set_prefix(prefix);
    pb.set_style(
        ProgressStyle::with_template("{prefix}...\n[{wide_bar:.cyan/blue}] {pos}/{len}")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}
