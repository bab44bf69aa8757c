//! Loads the tokenization SDK and triggers discovery exactly once.
//!
//! When the client is already present, discovery runs as soon as the
//! document is ready, immediately if it already is. Otherwise the SDK script is injected and discovery
//! runs on the first ready notification that finds the client available.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::ports::SdkHost;

use super::TagDiscovery;

/// What [`SdkBootstrap::start`] decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapPlan {
    /// Client present; discover on document ready.
    DiscoverWhenReady,

    /// Script injected; discover when it reports ready.
    AwaitScript,
}

type Discovery = Box<dyn Fn() + Send + Sync>;

pub struct SdkBootstrap {
    host: Arc<dyn SdkHost>,
    script_url: String,
    plan: Mutex<Option<BootstrapPlan>>,
    ready: AtomicBool,
    done: AtomicBool,
    discovery: Discovery,
}

impl SdkBootstrap {
    pub fn new(
        host: Arc<dyn SdkHost>,
        script_url: impl Into<String>,
        discovery: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        Self {
            host,
            script_url: script_url.into(),
            plan: Mutex::new(None),
            ready: AtomicBool::new(false),
            done: AtomicBool::new(false),
            discovery: Box::new(discovery),
        }
    }

    /// Bootstrap that scans the whole document with `discovery`.
    pub fn for_discovery(
        host: Arc<dyn SdkHost>,
        script_url: impl Into<String>,
        discovery: Arc<TagDiscovery>,
    ) -> Self {
        Self::new(host, script_url, move || {
            if let Err(e) = discovery.replace_tags(None) {
                tracing::error!(error = %e, "payment tag discovery failed");
            }
        })
    }

    /// Decides how discovery will be triggered, injecting the SDK script
    /// if needed. Repeated calls return the first decision.
    ///
    /// With the client present and the document already ready, discovery
    /// runs before this returns.
    pub fn start(&self) -> BootstrapPlan {
        let decided = {
            let mut plan = self.plan.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(existing) = *plan {
                return existing;
            }

            let decided = if self.host.client_available() {
                BootstrapPlan::DiscoverWhenReady
            } else {
                tracing::debug!(src = %self.script_url, "injecting tokenization SDK");
                self.host.inject_script(&self.script_url);
                BootstrapPlan::AwaitScript
            };
            *plan = Some(decided);
            decided
        };

        if decided == BootstrapPlan::DiscoverWhenReady && self.is_document_ready() {
            self.run_once();
        }
        decided
    }

    /// Document became interactive. Returns true if discovery ran.
    ///
    /// A notification before [`start`](Self::start) is remembered.
    pub fn document_ready(&self) -> bool {
        self.ready.store(true, Ordering::SeqCst);
        let plan = *self.plan.lock().unwrap_or_else(PoisonError::into_inner);
        match plan {
            Some(BootstrapPlan::DiscoverWhenReady) => self.run_once(),
            _ => false,
        }
    }

    /// The injected script reported a load or ready-state change.
    /// Returns true if discovery ran.
    pub fn script_ready(&self) -> bool {
        if !self.host.client_available() {
            return false;
        }
        self.run_once()
    }

    fn is_document_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst) || self.host.is_document_ready()
    }

    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::SeqCst)
    }

    fn run_once(&self) -> bool {
        if self.done.swap(true, Ordering::SeqCst) {
            return false;
        }
        tracing::info!("running payment tag discovery");
        (self.discovery)();
        true
    }
}
