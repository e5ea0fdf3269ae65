//! Persistence of region configurations.

mod config;
mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use config::{LoadReport, RegionConfig, RegionEntry, parse_config};
pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::{FileStorage, load_from_path, save_to_path};

use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Default file name for a saved region configuration.
pub const DEFAULT_CONFIG_FILE: &str = "regions.json";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("File {0} not found")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for storage operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Backend that keeps named region configurations.
///
/// Operations return futures so slow backends never block the pointer loop;
/// the caller drives them to completion outside event handling.
pub trait Storage: Send + Sync {
    /// Save a configuration.
    fn save(&self, id: &str, config: &RegionConfig) -> BoxFuture<'_, StorageResult<()>>;

    /// Load a configuration.
    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<RegionConfig>>;

    /// Delete a configuration.
    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all configuration ids.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Check if a configuration exists.
    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

#[cfg(test)]
pub(crate) fn block_on<F: Future>(f: F) -> F::Output {
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);

    loop {
        if let Poll::Ready(result) = f.as_mut().poll(&mut cx) {
            return result;
        }
    }
}
