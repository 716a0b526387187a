
use indicatif::{ProgressState, ProgressStyle};

/// Template shared by every progress bar; `{msg}` is left for callers to fill in
const PROGRESS_TEMPLATE: &str = "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} ({percent}); ETA: {eta_precise}; Speed: {per_sec} {msg}";

/// Shared function to pull our progress bar styling
pub fn get_progress_style() -> ProgressStyle {
    ProgressStyle::with_template(PROGRESS_TEMPLATE)
        .unwrap_or_else(|_e| ProgressStyle::default_bar())
        // a failed write into the status line only loses that redraw, so the result is dropped
        .with_key("percent", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
            let _ = write!(w, "{:.1}%", state.fraction() * 100.0);
        })
        .with_key("per_sec", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
            let _ = write!(w, "{:.0} pairs/s", state.per_sec());
        })
        .progress_chars("##-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use indicatif::{ProgressBar, ProgressDrawTarget};

    #[test]
    fn test_progress_style() {
        let bar = ProgressBar::with_draw_target(Some(10), ProgressDrawTarget::hidden())
            .with_style(get_progress_style());
        bar.inc(5);
        bar.set_message("halfway");
        assert_eq!(bar.position(), 5);
        bar.finish();
        assert!(bar.is_finished());
    }
}
