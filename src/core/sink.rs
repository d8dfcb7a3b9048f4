//! Sink trait for message output targets

use super::error::Result;
use std::sync::Arc;

/// An append-only output target.
///
/// Sinks are shared between ranks (and possibly threads), so every method
/// takes `&self`; implementations provide their own interior locking.
pub trait Sink: Send + Sync {
    fn write(&self, text: &str) -> Result<()>;
    fn flush(&self) -> Result<()>;
    fn name(&self) -> &str;
}

pub type SharedSink = Arc<dyn Sink>;
