//! The cloud-sync boundary.
//!
//! The core publishes every committed [`ChangeSet`] to a [`SyncService`] and
//! merges change sets arriving from the service back into the live store.
//! The payload is the change set itself; how a service wraps, ships, and
//! acknowledges it on the wire is the service's business.
//!
//! The adapter is only constructed once the store sits at its final
//! location. During a pending migration nothing is attached, so a
//! partially-relocated store never talks to the service.

use crate::error::{BinderError, Result};
use crate::store::{ChangeSet, StoreEvent};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use tracing::{debug, warn};

/// A remote mirror for local commits.
pub trait SyncService: Send + Sync {
    /// Publish a locally committed change set.
    fn push(&self, changes: &ChangeSet) -> Result<()>;

    /// Hand over the channel of change sets arriving from other devices.
    /// Yields `Some` exactly once; the adapter owns the receiver afterwards.
    fn take_remote(&self) -> Option<Receiver<ChangeSet>>;
}

/// Wires a store (running inside a `StoreContext`) to a [`SyncService`].
///
/// Two threads do the work: a forwarder draining store events into
/// [`SyncService::push`], and a merger feeding remote change sets to the
/// `merge` callback, which is expected to submit an `apply_remote` job onto
/// the store context. Both exit when their channel closes.
pub struct SyncAdapter {
    _forwarder: thread::JoinHandle<()>,
    _merger: thread::JoinHandle<()>,
}

impl SyncAdapter {
    pub fn attach<M>(
        events: Receiver<StoreEvent>,
        service: Arc<dyn SyncService>,
        merge: M,
    ) -> Result<Self>
    where
        M: Fn(ChangeSet) + Send + 'static,
    {
        let remote = service
            .take_remote()
            .ok_or_else(|| BinderError::Store("sync remote receiver already taken".into()))?;

        let pusher = Arc::clone(&service);
        let forwarder = thread::Builder::new()
            .name("binder-sync-push".into())
            .spawn(move || {
                for event in events {
                    // Remote merges are not echoed back to the service.
                    if let StoreEvent::Committed(changes) = event {
                        if let Err(e) = pusher.push(&changes) {
                            warn!(error = %e, "failed to push local changes");
                        }
                    }
                }
                debug!("sync forwarder stopped");
            })
            .map_err(|e| BinderError::Store(format!("cannot start sync forwarder: {e}")))?;

        let merger = thread::Builder::new()
            .name("binder-sync-merge".into())
            .spawn(move || {
                for changes in remote {
                    merge(changes);
                }
                debug!("sync merger stopped");
            })
            .map_err(|e| BinderError::Store(format!("cannot start sync merger: {e}")))?;

        Ok(Self {
            _forwarder: forwarder,
            _merger: merger,
        })
    }
}

/// In-process [`SyncService`]: records every push and lets a caller inject
/// remote change sets. The reference implementation for tests and for
/// embedders without a real backend.
pub struct LoopbackSync {
    pushed: Mutex<Vec<ChangeSet>>,
    remote_tx: Sender<ChangeSet>,
    remote_rx: Mutex<Option<Receiver<ChangeSet>>>,
}

impl LoopbackSync {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            pushed: Mutex::new(Vec::new()),
            remote_tx: tx,
            remote_rx: Mutex::new(Some(rx)),
        }
    }

    /// Simulate a change set arriving from another device.
    pub fn inject_remote(&self, changes: ChangeSet) {
        let _ = self.remote_tx.send(changes);
    }

    /// Every change set pushed so far, oldest first.
    pub fn pushed(&self) -> Vec<ChangeSet> {
        self.pushed.lock().expect("pushed lock").clone()
    }
}

impl Default for LoopbackSync {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncService for LoopbackSync {
    fn push(&self, changes: &ChangeSet) -> Result<()> {
        // Round-trip through the wire representation, as a real backend
        // would before acknowledging.
        let envelope = serde_json::to_value(changes)?;
        let received: ChangeSet = serde_json::from_value(envelope)?;
        self.pushed.lock().expect("pushed lock").push(received);
        Ok(())
    }

    fn take_remote(&self) -> Option<Receiver<ChangeSet>> {
        self.remote_rx.lock().expect("remote lock").take()
    }
}
