//! Value types shared by the presenter, the directive mapper and the surface gateway.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Externally observed lifecycle of a download task.
///
/// Owned and advanced by the download engine; the presenter only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    Prepare,
    Pending,
    Downloading,
    Pause,
    Success,
    Error,
    /// Storage exhausted on the device.
    #[serde(alias = "enospc")]
    NoSpace,
}

impl TaskState {
    pub const ALL: [TaskState; 7] = [
        TaskState::Prepare,
        TaskState::Pending,
        TaskState::Downloading,
        TaskState::Pause,
        TaskState::Success,
        TaskState::Error,
        TaskState::NoSpace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prepare => "prepare",
            Self::Pending => "pending",
            Self::Downloading => "downloading",
            Self::Pause => "pause",
            Self::Success => "success",
            Self::Error => "error",
            Self::NoSpace => "no_space",
        }
    }

    /// States that reset the progress watermark when applied.
    pub fn resets_watermark(&self) -> bool {
        matches!(self, Self::Prepare | Self::Pending)
    }
}

impl std::fmt::Display for TaskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the progress indicator is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ProgressMode {
    Indeterminate,
    Determinate { percent: u8 },
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconKind {
    DownloadActive,
    DownloadDone,
}

/// Where a tap on the surface takes the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationTarget {
    /// Host entry point (e.g. the launcher component name)
    pub entry_point: String,
    /// Action delivered with the navigation
    pub action: String,
    /// Request code used by the host to dedupe pending navigations
    pub request_code: i32,
}

/// Fully resolved display fields for one event. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationDirective {
    pub title: String,
    pub body: String,
    pub progress_mode: ProgressMode,
    pub ongoing: bool,
    pub icon_kind: IconKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tap_action: Option<NavigationTarget>,
}

/// Fixed identifier of the single display entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotId(pub i32);

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the host tells the presenter about itself at setup time.
#[derive(Debug, Clone)]
pub struct HostContext {
    /// Human-readable application label, used as the channel name.
    pub app_label: String,
    /// Whether the host needs a channel registered before posting.
    pub requires_channel_registration: bool,
}

impl HostContext {
    pub fn new(app_label: impl Into<String>) -> Self {
        Self {
            app_label: app_label.into(),
            requires_channel_registration: true,
        }
    }

    /// Host without a channel concept; the builder is bound to the channel id directly.
    pub fn without_channels(app_label: impl Into<String>) -> Self {
        Self {
            app_label: app_label.into(),
            requires_channel_registration: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    Low,
    Default,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Default,
    High,
}

/// Channel registration request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub id: String,
    pub name: String,
    pub importance: Importance,
    /// No sound on post
    pub silent: bool,
}

impl ChannelConfig {
    pub fn silent(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            importance: Importance::Default,
            silent: true,
        }
    }
}

/// Properties fixed on the builder at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderBaseline {
    pub alert_once: bool,
    pub dismiss_on_tap: bool,
    pub priority: Priority,
}

impl Default for BuilderBaseline {
    fn default() -> Self {
        Self {
            alert_once: true,
            dismiss_on_tap: true,
            priority: Priority::Default,
        }
    }
}

/// Handle to a registered channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelHandle(pub String);

/// Handle to a host-side builder bound to a channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuilderHandle {
    pub id: Uuid,
    pub channel: ChannelHandle,
}

impl BuilderHandle {
    pub fn new(channel: ChannelHandle) -> Self {
        Self {
            id: Uuid::new_v4(),
            channel,
        }
    }
}
