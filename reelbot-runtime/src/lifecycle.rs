//! Lifecycle manager: lazy one-time construction of the [`ApplicationContext`], dispatch of updates
//! through the router, and single-shot shutdown.
//!
//! State machine: `Uninitialized -> Initializing -> Ready -> ShuttingDown -> Closed`. A failed
//! initialization falls back to `Uninitialized` so the next `acquire` retries. Nothing leaves `Closed`.
//!
//! Concurrent first callers share one in-flight initialization future; the state mutex is never
//! held across an await. Dispatches hold a read guard of `gate` and shutdown takes the write guard,
//! so shutdown happens-after every in-flight dispatch.

use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::{BoxFuture, FutureExt, Shared};
use reelbot_core::{
    DispatchError, HandlerError, InitializationError, LifecycleError, ReplyContext,
    UpdateEnvelope,
};
use reelbot_router::HandlerId;
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument, warn};

use crate::context::{ApplicationContext, ContextFactory};

type InitResult = Result<Arc<ApplicationContext>, InitializationError>;
type InitFuture = Shared<BoxFuture<'static, InitResult>>;

/// Observable lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    Initializing,
    Ready,
    ShuttingDown,
    Closed,
}

enum Slot {
    Uninitialized,
    Initializing { generation: u64, init: InitFuture },
    Ready(Arc<ApplicationContext>),
    ShuttingDown,
    Closed,
}

struct Inner {
    slot: Slot,
    generation: u64,
}

/// Result of a dispatch: which handler ran and how many replies it sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub handler: HandlerId,
    pub sends: usize,
}

/// Owns the process-wide [`ApplicationContext`]. Create one in the composition root and share it
/// (e.g. behind an `Arc`) with the HTTP boundary.
pub struct LifecycleManager {
    factory: Arc<dyn ContextFactory>,
    inner: Mutex<Inner>,
    gate: RwLock<()>,
}

impl LifecycleManager {
    pub fn new(factory: Arc<dyn ContextFactory>) -> Self {
        Self {
            factory,
            inner: Mutex::new(Inner {
                slot: Slot::Uninitialized,
                generation: 0,
            }),
            gate: RwLock::new(()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn state(&self) -> LifecycleState {
        match self.lock().slot {
            Slot::Uninitialized => LifecycleState::Uninitialized,
            Slot::Initializing { .. } => LifecycleState::Initializing,
            Slot::Ready(_) => LifecycleState::Ready,
            Slot::ShuttingDown => LifecycleState::ShuttingDown,
            Slot::Closed => LifecycleState::Closed,
        }
    }

    /// Returns the context, constructing it on first use. Concurrent callers during construction
    /// all await the same attempt and observe the same context or the same failure.
    pub async fn acquire(&self) -> Result<Arc<ApplicationContext>, LifecycleError> {
        let (generation, init) = {
            let mut inner = self.lock();
            match &inner.slot {
                Slot::Ready(ctx) => return Ok(ctx.clone()),
                Slot::ShuttingDown | Slot::Closed => return Err(LifecycleError::Closed),
                Slot::Initializing { generation, init } => (*generation, init.clone()),
                Slot::Uninitialized => {
                    inner.generation += 1;
                    let generation = inner.generation;
                    let init = AssertUnwindSafe(initialize(self.factory.clone()))
                        .catch_unwind()
                        .map(|caught| {
                            caught.unwrap_or_else(|_| {
                                error!("Initialization panicked");
                                Err(InitializationError(
                                    "initialization panicked".to_string(),
                                ))
                            })
                        })
                        .boxed()
                        .shared();
                    inner.slot = Slot::Initializing {
                        generation,
                        init: init.clone(),
                    };
                    debug!(generation, "Initialization started");
                    (generation, init)
                }
            }
        };

        let result = init.await;
        self.settle(generation, &result);
        result.map_err(LifecycleError::from)
    }

    /// Moves `Initializing` to `Ready` or back to `Uninitialized`, once per attempt.
    fn settle(&self, generation: u64, result: &InitResult) {
        let mut inner = self.lock();
        let current = matches!(
            inner.slot,
            Slot::Initializing { generation: g, .. } if g == generation
        );
        if !current {
            return;
        }
        inner.slot = match result {
            Ok(ctx) => {
                info!(
                    bot_id = ctx.identity().id,
                    username = ?ctx.identity().username,
                    "Application context ready"
                );
                Slot::Ready(ctx.clone())
            }
            Err(e) => {
                warn!(error = %e, "Initialization failed; will retry on next acquire");
                Slot::Uninitialized
            }
        };
    }

    /// Routes the update and runs the chosen handler. Handler failures (and panics) become a
    /// [`DispatchError`]; lifecycle state is untouched by them.
    #[instrument(skip(self, update), fields(update_id = update.update_id()))]
    pub async fn dispatch(&self, update: &UpdateEnvelope) -> Result<DispatchOutcome, DispatchError> {
        let _in_flight = self.gate.read().await;
        let ctx = self.acquire().await?;

        let handler_id = ctx.router().route(update);
        info!(
            chat_id = ?update.chat_id(),
            handler = %handler_id,
            "step: update routed"
        );

        let Some(handler) = ctx.router().resolve(&handler_id) else {
            return Ok(DispatchOutcome {
                handler: handler_id,
                sends: 0,
            });
        };

        let reply = ReplyContext::new(ctx.client().clone(), update.chat_id());
        let result = AssertUnwindSafe(handler.handle(update, &reply))
            .catch_unwind()
            .await
            .unwrap_or_else(|_| Err(HandlerError::Other("handler panicked".to_string())));

        match result {
            Ok(()) => {
                info!(
                    handler = %handler_id,
                    sends = reply.sent(),
                    "step: handler done"
                );
                Ok(DispatchOutcome {
                    handler: handler_id,
                    sends: reply.sent(),
                })
            }
            Err(source) => Err(DispatchError::Handler {
                handler: handler_id.to_string(),
                source,
            }),
        }
    }

    /// `Ready -> ShuttingDown -> Closed`, releasing the remote client once. Waits for an in-flight
    /// initialization and for in-flight dispatches. A no-op when uninitialized, closing or closed.
    pub async fn shutdown(&self) {
        let ctx = loop {
            let pending = {
                let mut inner = self.lock();
                match &inner.slot {
                    Slot::Uninitialized | Slot::ShuttingDown | Slot::Closed => {
                        debug!("Shutdown requested with nothing to release");
                        return;
                    }
                    Slot::Initializing { generation, init } => (*generation, init.clone()),
                    Slot::Ready(ctx) => {
                        let ctx = ctx.clone();
                        inner.slot = Slot::ShuttingDown;
                        break ctx;
                    }
                }
            };
            let (generation, init) = pending;
            let result = init.await;
            self.settle(generation, &result);
        };

        info!("Shutting down application context");
        let _drained = self.gate.write().await;
        ctx.client().close().await;
        self.lock().slot = Slot::Closed;
        info!("Application context closed");
    }
}

/// One construction attempt: client binding, identity handshake, handler registration.
async fn initialize(factory: Arc<dyn ContextFactory>) -> InitResult {
    let client = factory.create_client()?;
    let identity = match client.get_self_info().await {
        Ok(identity) => identity,
        Err(e) => {
            error!(error = %e, "Identity handshake failed");
            client.close().await;
            return Err(e.into());
        }
    };
    let router = factory.build_router(&identity);
    info!(
        commands = ?router.commands(),
        "Handlers registered"
    );
    Ok(Arc::new(ApplicationContext::new(client, identity, router)))
}
