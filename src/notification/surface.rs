//! Host display surface abstraction.
//!
//! The host supplies the channel, builder and post primitives. All calls are
//! fire-and-forget from the presenter's point of view: failures are logged,
//! never retried.

use async_trait::async_trait;
use thiserror::Error;

use super::types::{
    BuilderBaseline, BuilderHandle, ChannelConfig, ChannelHandle, PresentationDirective, SlotId,
};

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Channel registration failed: {0}")]
    ChannelRegistration(String),

    #[error("Builder construction failed: {0}")]
    BuilderConstruction(String),

    #[error("Failed to post to slot {slot}: {reason}")]
    Push { slot: SlotId, reason: String },

    #[error("Failed to withdraw slot {slot}: {reason}")]
    Withdraw { slot: SlotId, reason: String },
}

pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Trait for host display surfaces.
#[async_trait]
pub trait SurfaceGateway: Send + Sync {
    /// Register (or re-register) a notification channel.
    async fn register_channel(&self, config: &ChannelConfig) -> SurfaceResult<ChannelHandle>;

    /// Construct a builder bound to `channel`, or return the existing one.
    async fn build_or_get_builder(
        &self,
        channel: &ChannelHandle,
        baseline: &BuilderBaseline,
    ) -> SurfaceResult<BuilderHandle>;

    /// Post `directive` into `slot`, replacing whatever is shown there.
    async fn push(
        &self,
        slot: SlotId,
        builder: &BuilderHandle,
        directive: &PresentationDirective,
    ) -> SurfaceResult<()>;

    /// Remove whatever is shown in `slot`.
    async fn withdraw(&self, slot: SlotId) -> SurfaceResult<()>;
}
