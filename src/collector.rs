//! Activation Collector
//!
//! Subscription over control activations for one menu message. A collector ends
//! when its time limit elapses, when it is stopped through a [`CollectorHandle`],
//! or when every sender is dropped. Activations rejected by the filter are
//! dropped silently.

use chrono::{DateTime, Utc};
use futures::Stream;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::{sleep_until, Instant};
use tracing::debug;

/// One control activation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    pub custom_id: String,
    pub user_id: String,
    /// Selected values for select controls
    pub values: Vec<String>,
    pub received_at: DateTime<Utc>,
}

impl Activation {
    pub fn new(custom_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            custom_id: custom_id.into(),
            user_id: user_id.into(),
            values: Vec::new(),
            received_at: Utc::now(),
        }
    }

    pub fn with_values(mut self, values: Vec<String>) -> Self {
        self.values = values;
        self
    }
}

pub type ActivationFilter = Arc<dyn Fn(&Activation) -> bool + Send + Sync>;

#[derive(Clone)]
pub struct CollectorOptions {
    pub time_limit: Duration,
    /// Replaces the default "same user who opened the menu" filter
    pub filter: Option<ActivationFilter>,
}

impl CollectorOptions {
    pub fn new(time_limit: Duration) -> Self {
        Self {
            time_limit,
            filter: None,
        }
    }

    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Activation) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }
}

impl Default for CollectorOptions {
    fn default() -> Self {
        Self::new(Duration::from_secs(120))
    }
}

impl fmt::Debug for CollectorOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectorOptions")
            .field("time_limit", &self.time_limit)
            .field("filter", &self.filter.as_ref().map(|_| "custom"))
            .finish()
    }
}

/// Why a collector stopped yielding activations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectorEnd {
    Timeout,
    Stopped,
    /// Every sender was dropped
    Closed,
}

/// Stops a collector from anywhere
#[derive(Debug, Clone)]
pub struct CollectorHandle {
    stop: Arc<watch::Sender<bool>>,
}

impl CollectorHandle {
    pub fn stop(&self) {
        self.stop.send_replace(true);
    }

    pub fn is_stopped(&self) -> bool {
        *self.stop.borrow()
    }
}

/// Feeds activations into a collector
#[derive(Debug, Clone)]
pub struct ActivationSender {
    tx: mpsc::UnboundedSender<Activation>,
}

impl ActivationSender {
    /// Deliver an activation; returns false once the collector is gone
    pub fn send(&self, activation: Activation) -> bool {
        self.tx.send(activation).is_ok()
    }
}

/// Receiving side of a subscription
pub struct ActivationCollector {
    rx: mpsc::UnboundedReceiver<Activation>,
    filter: ActivationFilter,
    deadline: Instant,
    stop_rx: watch::Receiver<bool>,
    handle: CollectorHandle,
    ended: Option<CollectorEnd>,
}

/// Open a subscription for a menu started by `owner_user_id`
pub fn channel(
    owner_user_id: impl Into<String>,
    options: CollectorOptions,
) -> (ActivationSender, ActivationCollector) {
    let owner = owner_user_id.into();
    let filter: ActivationFilter = match options.filter {
        Some(filter) => filter,
        None => Arc::new(move |activation: &Activation| activation.user_id == owner),
    };
    let (tx, rx) = mpsc::unbounded_channel();
    let (stop_tx, stop_rx) = watch::channel(false);
    let collector = ActivationCollector {
        rx,
        filter,
        deadline: Instant::now() + options.time_limit,
        stop_rx,
        handle: CollectorHandle {
            stop: Arc::new(stop_tx),
        },
        ended: None,
    };
    (ActivationSender { tx }, collector)
}

impl ActivationCollector {
    pub fn handle(&self) -> CollectorHandle {
        self.handle.clone()
    }

    /// Reason the collector ended, once it has
    pub fn ended(&self) -> Option<CollectorEnd> {
        self.ended
    }

    /// Wait for the next accepted activation
    pub async fn next(&mut self) -> Result<Activation, CollectorEnd> {
        if let Some(end) = self.ended {
            return Err(end);
        }
        loop {
            if *self.stop_rx.borrow() {
                return Err(self.finish(CollectorEnd::Stopped));
            }
            tokio::select! {
                biased;
                changed = self.stop_rx.changed() => {
                    if changed.is_err() || *self.stop_rx.borrow() {
                        return Err(self.finish(CollectorEnd::Stopped));
                    }
                }
                _ = sleep_until(self.deadline) => {
                    return Err(self.finish(CollectorEnd::Timeout));
                }
                received = self.rx.recv() => {
                    match received {
                        Some(activation) if (self.filter)(&activation) => return Ok(activation),
                        Some(activation) => {
                            debug!(
                                custom_id = %activation.custom_id,
                                user_id = %activation.user_id,
                                "Filtered activation"
                            );
                        }
                        None => return Err(self.finish(CollectorEnd::Closed)),
                    }
                }
            }
        }
    }

    fn finish(&mut self, end: CollectorEnd) -> CollectorEnd {
        debug!(reason = ?end, "Collector ended");
        self.ended = Some(end);
        self.rx.close();
        end
    }

    /// Adapt into a stream of accepted activations that ends with the collector
    pub fn into_stream(self) -> impl Stream<Item = Activation> {
        futures::stream::unfold(self, |mut collector| async move {
            match collector.next().await {
                Ok(activation) => Some((activation, collector)),
                Err(_) => None,
            }
        })
    }
}
