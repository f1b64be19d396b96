//! # M3U8 Notifier
//!
//! Surfaces the lifecycle of a long-running download task on a persistent,
//! single-slot status display owned by the host.
//!
//! This library provides:
//! - A presenter that registers the display surface once and tears it down on cancel
//! - A pure mapping from task events to presentation directives
//! - Throttling of high-frequency progress updates
//! - A debug-gated log sink
//!
//! ## Architecture
//!
//! ```text
//!   download worker            UI context
//!   (label, state, %)        setup / cancel
//!          │                       │
//!          ▼                       ▼
//!   ┌──────────────────────────────────────┐
//!   │        NotificationPresenter         │
//!   │  DirectiveMapper → ThrottlePolicy    │
//!   └──────────────────┬───────────────────┘
//!                      │ push / withdraw (fixed slot)
//!                      ▼
//!             ┌─────────────────┐
//!             │ SurfaceGateway  │  (host)
//!             └─────────────────┘
//! ```
//!
//! ## Modules
//! - `notification`: presenter, directive mapping, throttling and the surface trait
//! - `config`: notifier configuration
//! - `logging`: tracing setup and the gated log sink

pub mod config;
pub mod logging;
pub mod notification;

pub use config::NotifierConfig;
pub use logging::LogSink;
pub use notification::{NotificationPresenter, SharedPresenter, TaskState};
