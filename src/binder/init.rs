//! The composition root.
//!
//! [`initialize`] builds the whole object graph in the order the invariants
//! require: resolve the two candidate roots, run the one-shot migration
//! (before anything reads the store), move the store onto its serialized
//! context, and only then attach the sync adapter. The returned [`Binder`]
//! owns everything; nothing in the crate reaches for global state.

use crate::api::BinderApi;
use crate::error::Result;
use crate::locator::{self, StorePaths};
use crate::migrate;
use crate::store::sqlite::SqliteStore;
use crate::store::StoreContext;
use crate::sync::{SyncAdapter, SyncService};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

pub struct InitOptions {
    /// App-group identifier the shared storage root is scoped by.
    pub group_id: String,
    /// Override for the (private, shared) roots; tests point this at a
    /// temporary directory instead of the platform directories.
    pub roots: Option<(PathBuf, PathBuf)>,
    /// Cloud sync service; `None` runs the organizer purely locally.
    pub sync: Option<Arc<dyn SyncService>>,
}

impl InitOptions {
    pub fn new(group_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            roots: None,
            sync: None,
        }
    }

    pub fn with_roots(mut self, private_root: PathBuf, shared_root: PathBuf) -> Self {
        self.roots = Some((private_root, shared_root));
        self
    }

    pub fn with_sync(mut self, service: Arc<dyn SyncService>) -> Self {
        self.sync = Some(service);
        self
    }
}

/// A running organizer core: the API on its serialized context, the resolved
/// store locations, and the sync adapter (when a service was supplied).
pub struct Binder {
    pub context: Arc<StoreContext<BinderApi<SqliteStore>>>,
    pub paths: StorePaths,
    _adapter: Option<SyncAdapter>,
}

pub fn initialize(opts: InitOptions) -> Result<Binder> {
    let (private_root, shared_root) = match opts.roots {
        Some(roots) => roots,
        None => locator::resolve_roots(&opts.group_id)?,
    };
    let paths = StorePaths::new(&private_root, &shared_root);

    // Must complete before the context exists: migration touches the file
    // system outside the serialized context.
    let store = migrate::open_at_startup(&paths)?;

    let api = BinderApi::new(store);
    let context = Arc::new(StoreContext::new(api)?);

    let adapter = match opts.sync {
        Some(service) => {
            let events = context.perform_and_wait(|api| api.subscribe())?;
            let merge_context = Arc::clone(&context);
            let adapter = SyncAdapter::attach(events, service, move |changes| {
                let submitted = merge_context.submit(move |api| {
                    if let Err(e) = api.apply_remote(&changes) {
                        warn!(error = %e, "failed to merge remote changes");
                    }
                });
                if submitted.is_err() {
                    warn!("store context closed, dropping remote changes");
                }
            })?;
            Some(adapter)
        }
        None => None,
    };

    Ok(Binder {
        context,
        paths,
        _adapter: adapter,
    })
}
