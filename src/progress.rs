//! Terminal progress for scans and copies.
//!
//! Library operations take an `Option<&dyn ProgressCallback>`; `None` keeps
//! them silent. [`Progress`] is the indicatif-backed reporter used by the CLI:
//! a bar when the phase announces a total, a spinner otherwise.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Phase name reported while building album records from a library walk.
pub const PHASE_SCAN: &str = "scan";
/// Phase name reported while copying an album into a target.
pub const PHASE_COPY: &str = "copy";

const MESSAGE_WIDTH: usize = 40;

/// Observer for long-running filesystem operations.
///
/// Implementations must tolerate calls from several rayon workers at once.
pub trait ProgressCallback: Send + Sync {
    /// A phase begins. `total` is the item count, or 0 when unknown.
    fn on_phase_start(&self, phase: &str, total: usize);

    /// One more item is done; `current` counts from 1.
    fn on_progress(&self, current: usize, path: &str);

    /// The phase is over, successfully or not.
    fn on_phase_end(&self, phase: &str);
}

/// indicatif reporter holding at most one live bar.
pub struct Progress {
    bar: Mutex<Option<ProgressBar>>,
    quiet: bool,
}

impl Progress {
    /// Create a reporter; a `quiet` one never draws.
    ///
    /// ```
    /// use albumsync::progress::{Progress, ProgressCallback, PHASE_COPY};
    ///
    /// let progress = Progress::new(true);
    /// progress.on_phase_start(PHASE_COPY, 0);
    /// progress.on_phase_end(PHASE_COPY);
    /// ```
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            bar: Mutex::new(None),
            quiet,
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<ProgressBar>> {
        self.bar.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn phase_label(phase: &str) -> &str {
    match phase {
        PHASE_SCAN => "Reading albums",
        PHASE_COPY => "Copying files",
        other => other,
    }
}

fn bar_for(phase: &str, total: usize) -> ProgressBar {
    let (bar, template) = if total > 0 {
        (
            ProgressBar::new(total as u64),
            "{prefix} [{bar:30.cyan/blue}] {pos}/{len} {msg}",
        )
    } else {
        (
            ProgressBar::new_spinner(),
            "{spinner:.green} {prefix} [{elapsed_precise}] {pos} {msg}",
        )
    };

    let style = ProgressStyle::with_template(template)
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .progress_chars("=> ");
    bar.set_style(style);
    bar.set_prefix(phase_label(phase).to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

impl ProgressCallback for Progress {
    fn on_phase_start(&self, phase: &str, total: usize) {
        if self.quiet {
            return;
        }
        if let Some(previous) = self.slot().replace(bar_for(phase, total)) {
            previous.finish_and_clear();
        }
    }

    fn on_progress(&self, current: usize, path: &str) {
        if self.quiet {
            return;
        }
        if let Some(bar) = self.slot().as_ref() {
            // Workers finish out of order; never move backwards
            if current as u64 > bar.position() {
                bar.set_position(current as u64);
            }
            bar.set_message(truncate_path(path, MESSAGE_WIDTH));
        }
    }

    fn on_phase_end(&self, phase: &str) {
        if let Some(bar) = self.slot().take() {
            bar.finish_and_clear();
            log::debug!("{} done: {} items", phase_label(phase), bar.position());
        }
    }
}

/// Shorten `path` to at most `max_len` characters, keeping the file name.
fn truncate_path(path: &str, max_len: usize) -> String {
    if path.chars().count() <= max_len {
        return path.to_string();
    }

    let name = std::path::Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name_len = name.chars().count();

    if name_len + 4 <= max_len {
        return format!(".../{}", name);
    }
    let tail: String = name.chars().skip(name_len + 3 - max_len).collect();
    format!("...{}", tail)
}
