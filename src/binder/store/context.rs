//! The serialized execution context the store lives on.
//!
//! One background worker thread owns the wrapped state. Jobs submitted from
//! any thread run strictly in submission order and never concurrently, which
//! is the sole concurrency guarantee the rest of the crate relies on: a write
//! submitted before a read is visible to that read. Submitted jobs cannot be
//! cancelled. Dropping the context closes the queue, drains the jobs already
//! submitted, and joins the worker.

use crate::error::{BinderError, Result};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

type Job<T> = Box<dyn FnOnce(&mut T) + Send>;

pub struct StoreContext<T: Send + 'static> {
    tx: Sender<Job<T>>,
    worker: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> StoreContext<T> {
    pub fn new(state: T) -> Result<Self> {
        let (tx, rx) = mpsc::channel::<Job<T>>();
        let worker = thread::Builder::new()
            .name("binder-store".into())
            .spawn(move || {
                let mut state = state;
                while let Ok(job) = rx.recv() {
                    job(&mut state);
                }
            })
            .map_err(|e| BinderError::Config(format!("cannot start store worker: {e}")))?;

        Ok(Self {
            tx,
            worker: Some(worker),
        })
    }

    /// Queue a job. Returns an error only if the context is closed.
    pub fn submit<F>(&self, job: F) -> Result<()>
    where
        F: FnOnce(&mut T) + Send + 'static,
    {
        self.tx
            .send(Box::new(job))
            .map_err(|_| BinderError::Store("store context is closed".into()))
    }

    /// Queue a job and hand back a channel carrying its result. The caller
    /// decides when (or whether) to wait.
    pub fn perform<R, F>(&self, job: F) -> Result<Receiver<R>>
    where
        R: Send + 'static,
        F: FnOnce(&mut T) -> R + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        self.submit(move |state| {
            // The caller may have dropped the receiver; the job still ran.
            let _ = tx.send(job(state));
        })?;
        Ok(rx)
    }

    /// Queue a job and block until it has run.
    pub fn perform_and_wait<R, F>(&self, job: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(&mut T) -> R + Send + 'static,
    {
        self.perform(job)?
            .recv()
            .map_err(|_| BinderError::Store("store worker exited before replying".into()))
    }
}

impl<T: Send + 'static> Drop for StoreContext<T> {
    fn drop(&mut self) {
        let (closed_tx, _) = mpsc::channel();
        drop(std::mem::replace(&mut self.tx, closed_tx));
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Barrier};

    #[test]
    fn jobs_run_in_submission_order() {
        let context = StoreContext::new(Vec::<usize>::new()).unwrap();
        for i in 0..100 {
            context.submit(move |log| log.push(i)).unwrap();
        }
        let seen = context.perform_and_wait(|log| log.clone()).unwrap();
        assert_eq!(seen, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn a_write_submitted_before_a_read_is_visible_to_it() {
        let context = Arc::new(StoreContext::new(0u32).unwrap());
        let barrier = Arc::new(Barrier::new(2));

        let ctx = Arc::clone(&context);
        let gate = Arc::clone(&barrier);
        let writer = std::thread::spawn(move || {
            ctx.submit(|state| *state = 7).unwrap();
            gate.wait();
        });

        barrier.wait();
        writer.join().unwrap();
        let read = context.perform_and_wait(|state| *state).unwrap();
        assert_eq!(read, 7);
    }

    #[test]
    fn drop_drains_already_submitted_jobs() {
        let (tx, rx) = mpsc::channel();
        {
            let context = StoreContext::new(tx).unwrap();
            for i in 0..10 {
                context
                    .submit(move |tx: &mut mpsc::Sender<i32>| {
                        tx.send(i).unwrap();
                    })
                    .unwrap();
            }
        }
        let drained: Vec<i32> = rx.iter().collect();
        assert_eq!(drained, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn perform_delivers_the_result_asynchronously() {
        let context = StoreContext::new(String::from("ready")).unwrap();
        let rx = context.perform(|state| state.len()).unwrap();
        assert_eq!(rx.recv().unwrap(), 5);
    }
}
