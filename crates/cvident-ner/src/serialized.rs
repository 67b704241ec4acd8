//! Adapter for models that are not safe for concurrent inference.

use std::sync::Mutex;

use crate::{Entity, NerBackend, NerError};

/// A model that needs exclusive access per inference call, e.g. an FFI
/// handle with internal scratch buffers.
pub trait ExclusiveNer {
    fn name(&self) -> &str;
    fn annotate_mut(&mut self, text: &str) -> Result<Vec<Entity>, NerError>;
}

/// Mutex-fronted wrapper turning an [`ExclusiveNer`] into a shareable
/// [`NerBackend`]: inference calls are serialized while the rest of the
/// document pipeline stays parallel.
pub struct SerializedNer<M> {
    name: String,
    inner: Mutex<M>,
}

impl<M: ExclusiveNer> SerializedNer<M> {
    pub fn new(model: M) -> Self {
        let name = model.name().to_string();
        Self {
            name,
            inner: Mutex::new(model),
        }
    }
}

impl<M: ExclusiveNer + Send> NerBackend for SerializedNer<M> {
    fn name(&self) -> &str {
        &self.name
    }

    fn annotate(&self, text: &str) -> Result<Vec<Entity>, NerError> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .annotate_mut(text)
    }
}
