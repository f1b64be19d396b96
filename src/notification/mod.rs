//! Download status notification.
//!
//! # Key Concepts
//! - Directive: the display fields computed for one task event
//! - Throttle: suppresses progress redraws smaller than a minimum delta
//! - Surface: host-supplied channel/builder/post primitives
//! - Presenter: owns the single slot and applies directives to the surface

mod directive;
mod presenter;
mod recording;
mod surface;
mod throttle;
pub mod types;

pub use directive::{
    body_for, clamp_progress, DirectiveMapper, EntryPointResolver, StaticEntryPoint,
};
pub use presenter::{NotificationPresenter, PresenterSnapshot, SharedPresenter};
pub use recording::{RecordingSurface, SurfaceCall};
pub use surface::{SurfaceError, SurfaceGateway, SurfaceResult};
pub use throttle::{ThrottlePolicy, DEFAULT_MIN_DELTA, WATERMARK_RESET};
pub use types::{
    BuilderBaseline, BuilderHandle, ChannelConfig, ChannelHandle, HostContext, IconKind,
    Importance, NavigationTarget, PresentationDirective, Priority, ProgressMode, SlotId, TaskState,
};
