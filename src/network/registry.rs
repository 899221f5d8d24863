//! Entity registry (id → input or neuron) and its per-model cache
//!
//! The registry is derived once per [`NeuralNetwork`] instance and shared by
//! every evaluation of that instance. Entries are keyed by [`ModelId`], not
//! by model contents, and are dropped together with the model.

use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tracing::{debug, trace};

use crate::error::{EvalError, Result};
use crate::models::{ModelId, NeuralInput, NeuralNetwork, Neuron};

/// Position of an entity inside its network
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityRef {
    Input { index: usize },
    Neuron { layer: usize, index: usize },
}

/// Borrowed view of a resolved entity
#[derive(Debug, Clone, Copy)]
pub enum Entity<'a> {
    Input(&'a NeuralInput),
    Neuron(&'a Neuron),
}

impl Entity<'_> {
    pub fn id(&self) -> &str {
        match self {
            Entity::Input(input) => &input.id,
            Entity::Neuron(neuron) => &neuron.id,
        }
    }
}

#[derive(Debug, Default)]
pub struct EntityRegistry {
    entries: HashMap<String, EntityRef>,
}

impl EntityRegistry {
    /// Index every input and neuron of `network`; ids must be unique
    pub fn build(network: &NeuralNetwork) -> Result<Self> {
        let mut registry = Self::default();

        for (index, input) in network.inputs.iter().enumerate() {
            registry.insert(&input.id, EntityRef::Input { index })?;
        }

        for (layer, neural_layer) in network.layers.iter().enumerate() {
            for (index, neuron) in neural_layer.neurons.iter().enumerate() {
                registry.insert(&neuron.id, EntityRef::Neuron { layer, index })?;
            }
        }

        Ok(registry)
    }

    fn insert(&mut self, id: &str, entity: EntityRef) -> Result<()> {
        if self.entries.insert(id.to_string(), entity).is_some() {
            return Err(EvalError::invalid(format!("Duplicate entity id {}", id)));
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<EntityRef> {
        self.entries.get(id).copied()
    }

    /// Look up `id` in the network the registry was built from
    pub fn resolve<'a>(&self, network: &'a NeuralNetwork, id: &str) -> Option<Entity<'a>> {
        match self.get(id)? {
            EntityRef::Input { index } => network.inputs.get(index).map(Entity::Input),
            EntityRef::Neuron { layer, index } => network
                .layers
                .get(layer)
                .and_then(|neural_layer| neural_layer.neurons.get(index))
                .map(Entity::Neuron),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static ENTITY_CACHE: OnceLock<EntityCache> = OnceLock::new();

/// Concurrent memo of entity registries, one per live model instance
#[derive(Debug, Default)]
pub struct EntityCache {
    entries: DashMap<ModelId, Arc<EntityRegistry>>,
}

impl EntityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide cache used by the evaluators
    pub fn global() -> &'static EntityCache {
        ENTITY_CACHE.get_or_init(EntityCache::new)
    }

    /// Registry for `network`, built at most once per instance.
    ///
    /// The entry lock is held while building, so concurrent callers wait for
    /// the first build instead of repeating it. A failed build caches nothing.
    pub fn get_or_build(&self, network: &NeuralNetwork) -> Result<Arc<EntityRegistry>> {
        let id = network.id();

        if let Some(registry) = self.entries.get(&id) {
            trace!(model = %id, "entity registry cache hit");
            return Ok(Arc::clone(registry.value()));
        }

        let registry = self.entries.entry(id).or_try_insert_with(|| {
            debug!(model = %id, "building entity registry");
            EntityRegistry::build(network).map(Arc::new)
        })?;
        Ok(Arc::clone(registry.value()))
    }

    /// Forget the registry of a retired model
    pub fn invalidate(&self, id: ModelId) {
        if self.entries.remove(&id).is_some() {
            trace!(model = %id, "entity registry evicted");
        }
    }

    pub fn contains(&self, id: ModelId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Entity registry of `network`, memoized in the global cache
pub fn entity_registry(network: &NeuralNetwork) -> Result<Arc<EntityRegistry>> {
    EntityCache::global().get_or_build(network)
}
