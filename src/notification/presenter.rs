//! Notification presenter.
//!
//! Owns the single display slot for a download task. `setup` registers the
//! surface once, `apply` maps and throttles task events onto it, and `cancel`
//! tears it down until the next `setup`.
//!
//! The state lock guards only the check-and-mutate step of each operation and
//! is always released before calling into the gateway. Gateway calls from
//! `apply` and `cancel` reach the surface in the order their critical sections
//! completed. Nothing here returns an error: a broken notification must never
//! abort a download.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{oneshot, Mutex};

use super::directive::{clamp_progress, DirectiveMapper, EntryPointResolver};
use super::surface::SurfaceGateway;
use super::throttle::{ThrottlePolicy, WATERMARK_RESET};
use super::types::{
    BuilderBaseline, BuilderHandle, ChannelConfig, ChannelHandle, HostContext,
    PresentationDirective, SlotId, TaskState,
};
use crate::config::NotifierConfig;
use crate::logging::LogSink;

#[derive(Debug)]
struct PresenterState {
    /// Present iff registered.
    surface: Option<BuilderHandle>,
    watermark: i32,
    label: String,
    /// Bumped by every setup and cancel.
    generation: u64,
    last_directive: Option<PresentationDirective>,
    /// Completes when the most recently queued gateway call has finished.
    dispatch_tail: Option<oneshot::Receiver<()>>,
}

impl PresenterState {
    fn new() -> Self {
        Self {
            surface: None,
            watermark: WATERMARK_RESET,
            label: String::new(),
            generation: 0,
            last_directive: None,
            dispatch_tail: None,
        }
    }

    /// Queue behind the previous gateway call. Must be called inside the
    /// critical section so queue order matches critical-section order.
    fn enqueue_dispatch(&mut self) -> DispatchTicket {
        let (done, tail) = oneshot::channel();
        DispatchTicket {
            previous: self.dispatch_tail.replace(tail),
            _done: done,
        }
    }
}

/// Place in the gateway dispatch queue. Dropping it, including when the
/// owning future is cancelled, releases the next caller.
struct DispatchTicket {
    previous: Option<oneshot::Receiver<()>>,
    _done: oneshot::Sender<()>,
}

impl DispatchTicket {
    async fn wait_turn(&mut self) {
        if let Some(previous) = self.previous.take() {
            // A dropped sender means the previous holder finished or was cancelled.
            let _ = previous.await;
        }
    }
}

/// Point-in-time view of the presenter state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresenterSnapshot {
    pub registered: bool,
    pub watermark: i32,
    pub label: String,
    pub generation: u64,
    pub last_directive: Option<PresentationDirective>,
}

pub struct NotificationPresenter {
    gateway: Arc<dyn SurfaceGateway>,
    resolver: Arc<dyn EntryPointResolver>,
    mapper: DirectiveMapper,
    throttle: ThrottlePolicy,
    channel_id: String,
    slot: SlotId,
    log: LogSink,
    state: Mutex<PresenterState>,
    /// Serializes concurrent `setup` callers; never taken by `apply` or `cancel`.
    setup_lock: Mutex<()>,
}

/// Presenter shared between the UI context and download workers.
pub type SharedPresenter = Arc<NotificationPresenter>;

impl NotificationPresenter {
    pub fn new(
        config: &NotifierConfig,
        gateway: Arc<dyn SurfaceGateway>,
        resolver: Arc<dyn EntryPointResolver>,
    ) -> Self {
        Self {
            gateway,
            resolver,
            mapper: DirectiveMapper::new(config.default_title.clone()),
            throttle: ThrottlePolicy::new(config.min_progress_delta),
            channel_id: config.channel_id.clone(),
            slot: SlotId(config.slot_id),
            log: LogSink::new(config.debug_mode),
            state: Mutex::new(PresenterState::new()),
            setup_lock: Mutex::new(()),
        }
    }

    pub fn shared(
        config: &NotifierConfig,
        gateway: Arc<dyn SurfaceGateway>,
        resolver: Arc<dyn EntryPointResolver>,
    ) -> SharedPresenter {
        Arc::new(Self::new(config, gateway, resolver))
    }

    pub fn slot(&self) -> SlotId {
        self.slot
    }

    pub async fn is_registered(&self) -> bool {
        self.state.lock().await.surface.is_some()
    }

    pub async fn snapshot(&self) -> PresenterSnapshot {
        let state = self.state.lock().await;
        PresenterSnapshot {
            registered: state.surface.is_some(),
            watermark: state.watermark,
            label: state.label.clone(),
            generation: state.generation,
            last_directive: state.last_directive.clone(),
        }
    }

    /// Register the display surface. Idempotent.
    ///
    /// A failed registration leaves the presenter unregistered; a later call
    /// retries from scratch.
    pub async fn setup(&self, host: &HostContext) {
        let _setup = self.setup_lock.lock().await;

        if self.state.lock().await.surface.is_some() {
            self.log.debug("notification surface already registered");
            return;
        }

        let channel = if host.requires_channel_registration {
            let config = ChannelConfig::silent(&self.channel_id, &host.app_label);
            match self.gateway.register_channel(&config).await {
                Ok(handle) => handle,
                Err(e) => {
                    self.log.error(format!(
                        "notification channel {} not registered: {}",
                        self.channel_id, e
                    ));
                    return;
                }
            }
        } else {
            ChannelHandle(self.channel_id.clone())
        };

        let builder = match self
            .gateway
            .build_or_get_builder(&channel, &BuilderBaseline::default())
            .await
        {
            Ok(builder) => builder,
            Err(e) => {
                self.log.error(format!(
                    "notification builder for {} not created: {}",
                    channel.0, e
                ));
                return;
            }
        };

        let mut state = self.state.lock().await;
        state.surface = Some(builder);
        state.watermark = WATERMARK_RESET;
        state.generation += 1;
        state.last_directive = None;
        self.log.debug(format!(
            "notification surface registered on channel {} (slot {})",
            channel.0, self.slot
        ));
    }

    /// Present one task event. Silently ignored before `setup`.
    pub async fn apply(&self, label: &str, task_state: TaskState, progress: i32) {
        let progress = i32::from(clamp_progress(progress));
        let directive = self
            .mapper
            .map(label, task_state, progress, self.resolver.as_ref());

        let (builder, mut ticket) = {
            let mut state = self.state.lock().await;
            let Some(builder) = state.surface.clone() else {
                return;
            };
            if !self
                .throttle
                .should_flush(state.watermark, progress, task_state)
            {
                tracing::trace!(
                    "Throttled progress {} (watermark {})",
                    progress,
                    state.watermark
                );
                return;
            }
            state.watermark = self
                .throttle
                .next_watermark(state.watermark, progress, task_state);
            state.label = label.to_string();
            state.last_directive = Some(directive.clone());
            (builder, state.enqueue_dispatch())
        };

        ticket.wait_turn().await;
        if let Err(e) = self.gateway.push(self.slot, &builder, &directive).await {
            self.log.error(format!("failed to show {} notification: {}", task_state, e));
        }
    }

    /// Withdraw the slot and forget the surface. No-op when not registered.
    pub async fn cancel(&self) {
        let mut ticket = {
            let mut state = self.state.lock().await;
            if state.surface.take().is_none() {
                return;
            }
            state.generation += 1;
            state.watermark = WATERMARK_RESET;
            state.last_directive = None;
            state.enqueue_dispatch()
        };

        // Pushes queued before the teardown land first, so the withdraw is final.
        ticket.wait_turn().await;
        if let Err(e) = self.gateway.withdraw(self.slot).await {
            self.log.error(format!("failed to withdraw notification: {}", e));
        }
    }
}
