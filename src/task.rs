//!
//! Completion handles for generation jobs offloaded to a worker thread
//!
//! Domain parameter search is CPU bound and can run from seconds to minutes
//! at the largest sizes. The entry points here run the identical synchronous
//! algorithm on a dedicated thread and deliver the one result through a
//! single-resolution handle, so the calling thread stays free in the
//! meantime. There is no progress reporting and no mid-search cancellation;
//! dropping the handle simply abandons the result.
//!

use crate::{
    errors::{Error, Result},
    random::OsEntropy,
    Components, PrivateKey,
};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

/// Single-resolution completion handle for a background generation job
pub struct Generation<T> {
    rx: Receiver<Result<T>>,
}

impl<T: Send + 'static> Generation<T> {
    fn spawn<F>(job: F) -> Self
    where
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            // The receiver may already be gone when the search finishes
            let _ = tx.send(job());
        });

        Self { rx }
    }

    /// Block until the job resolves
    ///
    /// A worker that died without delivering (a panic in the search) surfaces
    /// as [`Error::GenerationAborted`].
    pub fn wait(self) -> Result<T> {
        self.rx.recv().unwrap_or(Err(Error::GenerationAborted))
    }

    /// Resolve without blocking
    ///
    /// Returns the handle itself while the job is still running; like
    /// [`wait`](Generation::wait), the result is delivered at most once.
    pub fn try_wait(self) -> core::result::Result<Result<T>, Self> {
        match self.rx.try_recv() {
            Ok(result) => Ok(result),
            Err(TryRecvError::Empty) => Err(self),
            Err(TryRecvError::Disconnected) => Ok(Err(Error::GenerationAborted)),
        }
    }
}

impl Components {
    /// Generate a new set of common components on a background thread
    ///
    /// Identical semantics to [`Components::generate`] with the operating
    /// system entropy source; only the blocking behavior differs.
    pub fn generate_async(size: (u32, u32)) -> Generation<Components> {
        Generation::spawn(move || Components::generate(&mut OsEntropy, size))
    }
}

impl PrivateKey {
    /// Generate common components and a keypair for them on a background thread
    ///
    /// The worker-thread counterpart of [`PrivateKey::generate_sized`].
    pub fn generate_sized_async(size: (u32, u32)) -> Generation<PrivateKey> {
        Generation::spawn(move || PrivateKey::generate_sized(&mut OsEntropy, size))
    }
}
