//! In-memory surface that records every gateway call.
//!
//! Used by tests and the demo binary in place of a real host.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::surface::{SurfaceError, SurfaceGateway, SurfaceResult};
use super::types::{
    BuilderBaseline, BuilderHandle, ChannelConfig, ChannelHandle, PresentationDirective, SlotId,
};

/// One call observed by the surface.
#[derive(Debug, Clone)]
pub enum SurfaceCall {
    RegisterChannel(ChannelConfig),
    BuildBuilder {
        channel: ChannelHandle,
        baseline: BuilderBaseline,
    },
    Push {
        slot: SlotId,
        directive: PresentationDirective,
        at: DateTime<Utc>,
    },
    Withdraw(SlotId),
}

#[derive(Debug, Default)]
struct Inner {
    calls: Vec<SurfaceCall>,
    displayed: HashMap<SlotId, PresentationDirective>,
    builders: HashMap<ChannelHandle, BuilderHandle>,
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    inner: RwLock<Inner>,
    fail_registration: AtomicBool,
    fail_builder: AtomicBool,
    fail_push: AtomicBool,
    fail_withdraw: AtomicBool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn set_fail_registration(&self, fail: bool) {
        self.fail_registration.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_builder(&self, fail: bool) {
        self.fail_builder.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_push(&self, fail: bool) {
        self.fail_push.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_withdraw(&self, fail: bool) {
        self.fail_withdraw.store(fail, Ordering::SeqCst);
    }

    pub async fn calls(&self) -> Vec<SurfaceCall> {
        self.inner.read().await.calls.clone()
    }

    pub async fn registration_count(&self) -> usize {
        self.count(|c| matches!(c, SurfaceCall::RegisterChannel(_))).await
    }

    pub async fn builder_count(&self) -> usize {
        self.count(|c| matches!(c, SurfaceCall::BuildBuilder { .. })).await
    }

    pub async fn push_count(&self) -> usize {
        self.count(|c| matches!(c, SurfaceCall::Push { .. })).await
    }

    pub async fn withdraw_count(&self) -> usize {
        self.count(|c| matches!(c, SurfaceCall::Withdraw(_))).await
    }

    /// Directives pushed so far, oldest first.
    pub async fn pushed(&self) -> Vec<PresentationDirective> {
        self.inner
            .read()
            .await
            .calls
            .iter()
            .filter_map(|c| match c {
                SurfaceCall::Push { directive, .. } => Some(directive.clone()),
                _ => None,
            })
            .collect()
    }

    /// Times at which each push landed, oldest first.
    pub async fn pushed_at(&self) -> Vec<DateTime<Utc>> {
        self.inner
            .read()
            .await
            .calls
            .iter()
            .filter_map(|c| match c {
                SurfaceCall::Push { at, .. } => Some(*at),
                _ => None,
            })
            .collect()
    }

    /// What the slot currently shows, if anything.
    pub async fn displayed(&self, slot: SlotId) -> Option<PresentationDirective> {
        self.inner.read().await.displayed.get(&slot).cloned()
    }

    async fn count(&self, pred: impl Fn(&SurfaceCall) -> bool) -> usize {
        self.inner.read().await.calls.iter().filter(|c| pred(c)).count()
    }
}

#[async_trait]
impl SurfaceGateway for RecordingSurface {
    async fn register_channel(&self, config: &ChannelConfig) -> SurfaceResult<ChannelHandle> {
        let mut inner = self.inner.write().await;
        inner.calls.push(SurfaceCall::RegisterChannel(config.clone()));
        if self.fail_registration.load(Ordering::SeqCst) {
            return Err(SurfaceError::ChannelRegistration(format!(
                "channel {} rejected",
                config.id
            )));
        }
        Ok(ChannelHandle(config.id.clone()))
    }

    async fn build_or_get_builder(
        &self,
        channel: &ChannelHandle,
        baseline: &BuilderBaseline,
    ) -> SurfaceResult<BuilderHandle> {
        let mut inner = self.inner.write().await;
        inner.calls.push(SurfaceCall::BuildBuilder {
            channel: channel.clone(),
            baseline: *baseline,
        });
        if self.fail_builder.load(Ordering::SeqCst) {
            return Err(SurfaceError::BuilderConstruction(format!(
                "no builder for channel {}",
                channel.0
            )));
        }
        let builder = inner
            .builders
            .entry(channel.clone())
            .or_insert_with(|| BuilderHandle::new(channel.clone()))
            .clone();
        Ok(builder)
    }

    async fn push(
        &self,
        slot: SlotId,
        _builder: &BuilderHandle,
        directive: &PresentationDirective,
    ) -> SurfaceResult<()> {
        if self.fail_push.load(Ordering::SeqCst) {
            return Err(SurfaceError::Push {
                slot,
                reason: "surface rejected post".to_string(),
            });
        }
        let mut inner = self.inner.write().await;
        inner.calls.push(SurfaceCall::Push {
            slot,
            directive: directive.clone(),
            at: Utc::now(),
        });
        inner.displayed.insert(slot, directive.clone());
        Ok(())
    }

    async fn withdraw(&self, slot: SlotId) -> SurfaceResult<()> {
        if self.fail_withdraw.load(Ordering::SeqCst) {
            return Err(SurfaceError::Withdraw {
                slot,
                reason: "surface rejected withdraw".to_string(),
            });
        }
        let mut inner = self.inner.write().await;
        inner.calls.push(SurfaceCall::Withdraw(slot));
        inner.displayed.remove(&slot);
        Ok(())
    }
}
