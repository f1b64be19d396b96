//! Mapping from task events to presentation directives.
//!
//! The mapping from state to progress mode, ongoing flag, icon and tap action is
//! fixed; body copy is a presentation detail:
//!
//! | state            | progress       | ongoing | icon   | tap         |
//! |------------------|----------------|---------|--------|-------------|
//! | Prepare, Pending | indeterminate  | yes     | active | -           |
//! | Downloading      | determinate(p) | yes     | active | -           |
//! | Pause            | none           | no      | active | -           |
//! | Success          | none           | no      | done   | host entry  |
//! | Error, NoSpace   | none           | no      | done   | -           |

use super::types::{IconKind, NavigationTarget, PresentationDirective, ProgressMode, TaskState};

/// Host capability resolving "the application's default entry point".
///
/// Absence is a normal outcome: the Success directive simply carries no tap action.
pub trait EntryPointResolver: Send + Sync {
    fn resolve_default_entry_point(&self) -> Option<NavigationTarget>;
}

impl<F> EntryPointResolver for F
where
    F: Fn() -> Option<NavigationTarget> + Send + Sync,
{
    fn resolve_default_entry_point(&self) -> Option<NavigationTarget> {
        self()
    }
}

/// Resolver for hosts that know their entry point up front.
#[derive(Debug, Clone)]
pub struct StaticEntryPoint {
    target: Option<NavigationTarget>,
}

impl StaticEntryPoint {
    pub fn new(
        entry_point: impl Into<String>,
        action: impl Into<String>,
        request_code: i32,
    ) -> Self {
        Self {
            target: Some(NavigationTarget {
                entry_point: entry_point.into(),
                action: action.into(),
                request_code,
            }),
        }
    }

    /// A host whose launcher cannot be resolved.
    pub fn unresolvable() -> Self {
        Self { target: None }
    }
}

impl EntryPointResolver for StaticEntryPoint {
    fn resolve_default_entry_point(&self) -> Option<NavigationTarget> {
        self.target.clone()
    }
}

/// Clamp a raw engine progress value into `0..=100`.
pub fn clamp_progress(progress: i32) -> u8 {
    progress.clamp(0, 100) as u8
}

/// Body copy shown for each state.
pub fn body_for(state: TaskState) -> &'static str {
    match state {
        TaskState::Prepare | TaskState::Pending => "Waiting to download...",
        TaskState::Downloading => "Downloading...",
        TaskState::Pause => "Download paused",
        TaskState::Success => "Download complete",
        TaskState::Error | TaskState::NoSpace => "Download failed",
    }
}

/// Converts `(label, state, progress)` events into directives.
#[derive(Debug, Clone)]
pub struct DirectiveMapper {
    default_title: String,
}

impl DirectiveMapper {
    pub fn new(default_title: impl Into<String>) -> Self {
        Self {
            default_title: default_title.into(),
        }
    }

    /// Build the directive for one event.
    ///
    /// The resolver is consulted only for `Success`. Prepare and Pending produce
    /// identical directives.
    pub fn map(
        &self,
        label: &str,
        state: TaskState,
        progress: i32,
        resolver: &dyn EntryPointResolver,
    ) -> PresentationDirective {
        let title = if label.trim().is_empty() {
            self.default_title.clone()
        } else {
            label.to_string()
        };

        let (progress_mode, ongoing, icon_kind) = match state {
            TaskState::Prepare | TaskState::Pending => {
                (ProgressMode::Indeterminate, true, IconKind::DownloadActive)
            }
            TaskState::Downloading => (
                ProgressMode::Determinate {
                    percent: clamp_progress(progress),
                },
                true,
                IconKind::DownloadActive,
            ),
            TaskState::Pause => (ProgressMode::None, false, IconKind::DownloadActive),
            TaskState::Success | TaskState::Error | TaskState::NoSpace => {
                (ProgressMode::None, false, IconKind::DownloadDone)
            }
        };

        let tap_action = match state {
            TaskState::Success => {
                let target = resolver.resolve_default_entry_point();
                if target.is_none() {
                    tracing::debug!(
                        "Default entry point unresolved, success directive has no tap action"
                    );
                }
                target
            }
            _ => None,
        };

        PresentationDirective {
            title,
            body: body_for(state).to_string(),
            progress_mode,
            ongoing,
            icon_kind,
            tap_action,
        }
    }
}

impl Default for DirectiveMapper {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_TITLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn launcher() -> StaticEntryPoint {
        StaticEntryPoint::new("com.example.MainActivity", "SELECT_NOTIFICATION", 9527)
    }

    #[test]
    fn test_mapping_table() {
        let mapper = DirectiveMapper::default();
        let resolver = launcher();

        let expected = [
            (
                TaskState::Prepare,
                ProgressMode::Indeterminate,
                true,
                IconKind::DownloadActive,
                false,
            ),
            (
                TaskState::Pending,
                ProgressMode::Indeterminate,
                true,
                IconKind::DownloadActive,
                false,
            ),
            (
                TaskState::Downloading,
                ProgressMode::Determinate { percent: 37 },
                true,
                IconKind::DownloadActive,
                false,
            ),
            (TaskState::Pause, ProgressMode::None, false, IconKind::DownloadActive, false),
            (TaskState::Success, ProgressMode::None, false, IconKind::DownloadDone, true),
            (TaskState::Error, ProgressMode::None, false, IconKind::DownloadDone, false),
            (TaskState::NoSpace, ProgressMode::None, false, IconKind::DownloadDone, false),
        ];

        for (state, mode, ongoing, icon, has_tap) in expected {
            let d = mapper.map("movie.mp4", state, 37, &resolver);
            assert_eq!(d.progress_mode, mode, "progress mode for {}", state);
            assert_eq!(d.ongoing, ongoing, "ongoing for {}", state);
            assert_eq!(d.icon_kind, icon, "icon for {}", state);
            assert_eq!(d.tap_action.is_some(), has_tap, "tap action for {}", state);
        }
    }

    #[test]
    fn test_prepare_and_pending_identical() {
        let mapper = DirectiveMapper::default();
        let resolver = launcher();
        assert_eq!(
            mapper.map("a", TaskState::Prepare, 0, &resolver),
            mapper.map("a", TaskState::Pending, 0, &resolver)
        );
    }

    #[test]
    fn test_error_and_no_space_identical() {
        let mapper = DirectiveMapper::default();
        let resolver = launcher();
        assert_eq!(
            mapper.map("a", TaskState::Error, 50, &resolver),
            mapper.map("a", TaskState::NoSpace, 50, &resolver)
        );
    }

    #[test]
    fn test_empty_label_uses_default_title() {
        let mapper = DirectiveMapper::new("Fallback");
        let d = mapper.map("", TaskState::Pending, 0, &launcher());
        assert_eq!(d.title, "Fallback");

        let d = mapper.map("episode-01", TaskState::Pending, 0, &launcher());
        assert_eq!(d.title, "episode-01");
    }

    #[test]
    fn test_unresolved_entry_point_degrades_to_none() {
        let mapper = DirectiveMapper::default();
        let d = mapper.map("a", TaskState::Success, 100, &StaticEntryPoint::unresolvable());
        assert_eq!(d.icon_kind, IconKind::DownloadDone);
        assert!(d.tap_action.is_none());
    }

    #[test]
    fn test_resolver_only_consulted_on_success() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let calls = AtomicUsize::new(0);
        let resolver = || -> Option<NavigationTarget> {
            calls.fetch_add(1, Ordering::SeqCst);
            None
        };
        let mapper = DirectiveMapper::default();
        for state in TaskState::ALL {
            mapper.map("a", state, 10, &resolver);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_progress_is_clamped() {
        let mapper = DirectiveMapper::default();
        let d = mapper.map("a", TaskState::Downloading, 140, &launcher());
        assert_eq!(d.progress_mode, ProgressMode::Determinate { percent: 100 });
        let d = mapper.map("a", TaskState::Downloading, -3, &launcher());
        assert_eq!(d.progress_mode, ProgressMode::Determinate { percent: 0 });
    }
}
