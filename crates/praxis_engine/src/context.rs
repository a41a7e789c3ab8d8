//! The evaluation context threaded through every requirement check.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use praxis_foundation::{EntityId, Primitive, PrimitiveKind};
use praxis_storage::EntityGraph;
use praxis_taxonomy::Taxonomy;
use praxis_value::{ValueConfig, VariableId, VariableScope};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::warn;

use crate::config::EngineConfig;
use crate::definitions::{Definitions, ReferenceId};

/// Maximum depth of nested variable and reference resolution.
const MAX_NESTING: u32 = 64;

/// A registered definition currently being resolved.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum Active {
    Reference(ReferenceId),
    Variable(VariableId),
}

/// A role an entity plays in an event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// The entity performing the event.
    Actor,
    /// The entity the event is performed on.
    Target,
    /// The entity used to perform the event.
    Artifact,
}

impl Role {
    /// All roles, in evaluation order.
    pub const ALL: [Self; 3] = [Self::Actor, Self::Target, Self::Artifact];
}

/// The entities bound to an event's roles.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Binding {
    /// The actor.
    pub actor: Option<EntityId>,
    /// The target.
    pub target: Option<EntityId>,
    /// The artifact.
    pub artifact: Option<EntityId>,
}

impl Binding {
    /// Binds an actor alone.
    #[must_use]
    pub fn actor(actor: EntityId) -> Self {
        Self {
            actor: Some(actor),
            ..Self::default()
        }
    }

    /// Builder method to bind the target.
    #[must_use]
    pub fn with_target(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }

    /// Builder method to bind the artifact.
    #[must_use]
    pub fn with_artifact(mut self, artifact: EntityId) -> Self {
        self.artifact = Some(artifact);
        self
    }

    /// The entity bound to `role`.
    #[must_use]
    pub fn get(&self, role: Role) -> Option<EntityId> {
        match role {
            Role::Actor => self.actor,
            Role::Target => self.target,
            Role::Artifact => self.artifact,
        }
    }
}

/// Where a variable or reference starts from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Subject {
    /// The bound actor.
    Actor,
    /// The bound target.
    Target,
    /// The bound artifact.
    Artifact,
    /// Every entity a registered reference resolves to.
    Reference(ReferenceId),
}

impl From<Role> for Subject {
    fn from(role: Role) -> Self {
        match role {
            Role::Actor => Self::Actor,
            Role::Target => Self::Target,
            Role::Artifact => Self::Artifact,
        }
    }
}

/// Physics collaborator.
pub trait Collider {
    /// Returns true if the two entities are colliding.
    fn collide(&self, a: EntityId, b: EntityId) -> bool;
}

/// Engine-level source of manual input.
pub trait ManualInputProvider {
    /// Looks up a value by name and expected kind.
    fn manual_input(&self, name: &str, kind: PrimitiveKind) -> Option<Primitive>;
}

/// Everything one evaluation can see.
///
/// Evaluation only reads the graph. The context owns the random source
/// used by random selection, so it is single-threaded; build one context
/// per evaluating thread.
pub struct EvaluationContext<'a> {
    graph: &'a dyn EntityGraph,
    taxonomy: &'a Taxonomy,
    definitions: &'a Definitions,
    binding: Binding,
    manual_input: HashMap<Arc<str>, Primitive>,
    fallback: Option<&'a dyn ManualInputProvider>,
    collider: Option<&'a dyn Collider>,
    config: EngineConfig,
    rng: RefCell<ChaCha8Rng>,
    depth: Cell<u32>,
    active: RefCell<HashSet<Active>>,
}

impl<'a> EvaluationContext<'a> {
    /// Creates a context with the default configuration.
    #[must_use]
    pub fn new(
        graph: &'a dyn EntityGraph,
        taxonomy: &'a Taxonomy,
        definitions: &'a Definitions,
        binding: Binding,
    ) -> Self {
        let config = EngineConfig::default();
        Self {
            graph,
            taxonomy,
            definitions,
            binding,
            manual_input: HashMap::new(),
            fallback: None,
            collider: None,
            rng: RefCell::new(seeded_rng(&config)),
            config,
            depth: Cell::new(0),
            active: RefCell::new(HashSet::new()),
        }
    }

    /// Builder method to set the configuration; reseeds the random source.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.rng = RefCell::new(seeded_rng(&config));
        self.config = config;
        self
    }

    /// Builder method to supply one manual input value.
    #[must_use]
    pub fn with_manual_input(mut self, name: &str, value: impl Into<Primitive>) -> Self {
        self.manual_input.insert(name.into(), value.into());
        self
    }

    /// Builder method to set the manual input fallback.
    #[must_use]
    pub fn with_manual_input_provider(mut self, provider: &'a dyn ManualInputProvider) -> Self {
        self.fallback = Some(provider);
        self
    }

    /// Builder method to set the physics collaborator.
    #[must_use]
    pub fn with_collider(mut self, collider: &'a dyn Collider) -> Self {
        self.collider = Some(collider);
        self
    }

    /// The entity graph.
    #[must_use]
    pub fn graph(&self) -> &'a dyn EntityGraph {
        self.graph
    }

    /// The taxonomy.
    #[must_use]
    pub fn taxonomy(&self) -> &'a Taxonomy {
        self.taxonomy
    }

    /// The registered definitions.
    #[must_use]
    pub fn definitions(&self) -> &'a Definitions {
        self.definitions
    }

    /// The role binding.
    #[must_use]
    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    /// The engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The physics collaborator, if any.
    #[must_use]
    pub fn collider(&self) -> Option<&'a dyn Collider> {
        self.collider
    }

    /// The entity bound to `role`.
    #[must_use]
    pub fn entity(&self, role: Role) -> Option<EntityId> {
        self.binding.get(role)
    }

    /// Expands a subject into entities.
    ///
    /// A role yields its bound entity, if any. A reference yields
    /// everything it resolves to; an unknown reference yields nothing.
    #[must_use]
    pub fn subject_entities(&self, subject: &Subject) -> Vec<EntityId> {
        match subject {
            Subject::Actor => self.binding.actor.into_iter().collect(),
            Subject::Target => self.binding.target.into_iter().collect(),
            Subject::Artifact => self.binding.artifact.into_iter().collect(),
            Subject::Reference(id) => self.reference_entities(id),
        }
    }

    /// Resolves a registered reference.
    #[must_use]
    pub fn reference_entities(&self, id: &ReferenceId) -> Vec<EntityId> {
        let Some(reference) = self.definitions.reference(id) else {
            warn!(reference = %id, "unknown reference");
            return Vec::new();
        };
        self.guarded(Active::Reference(id.clone()), Vec::new(), || reference.entities(self))
    }

    /// Looks up a manual input value.
    ///
    /// The supplied values are consulted first, then the fallback provider.
    /// A value that cannot be coerced to `kind` is skipped. When nothing
    /// matches, the kind's zero value is returned.
    #[must_use]
    pub fn manual_input(&self, name: &str, kind: PrimitiveKind) -> Primitive {
        self.manual_input
            .get(name)
            .and_then(|value| value.try_coerce(kind))
            .or_else(|| {
                self.fallback
                    .and_then(|provider| provider.manual_input(name, kind))
                    .and_then(|value| value.try_coerce(kind))
            })
            .unwrap_or_else(|| Primitive::default_for(kind))
    }

    /// Runs `f` with the context's random source.
    pub fn with_rng<T>(&self, f: impl FnOnce(&mut ChaCha8Rng) -> T) -> T {
        f(&mut self.rng.borrow_mut())
    }

    /// Runs `f` one level deeper, or returns `fallback` past the nesting limit.
    ///
    /// Guards against variables and references that refer to themselves.
    pub(crate) fn nested<T>(&self, fallback: T, f: impl FnOnce() -> T) -> T {
        let depth = self.depth.get();
        if depth >= MAX_NESTING {
            warn!(depth, "evaluation nesting limit reached");
            return fallback;
        }
        self.depth.set(depth + 1);
        let result = f();
        self.depth.set(depth);
        result
    }

    /// Resolves a registered definition, or returns `fallback` if it is
    /// already being resolved further up.
    fn guarded<T>(&self, key: Active, fallback: T, f: impl FnOnce() -> T) -> T {
        if !self.active.borrow_mut().insert(key.clone()) {
            warn!(definition = ?key, "definition refers to itself");
            return fallback;
        }
        let result = self.nested(fallback, f);
        self.active.borrow_mut().remove(&key);
        result
    }
}

impl VariableScope for EvaluationContext<'_> {
    fn resolve(&self, variable: &VariableId, kind: PrimitiveKind) -> Primitive {
        let Some(definition) = self.definitions.variable(variable) else {
            warn!(%variable, "unknown variable");
            return Primitive::default_for(kind);
        };
        self.guarded(
            Active::Variable(variable.clone()),
            Primitive::default_for(kind),
            || definition.resolve(self, kind),
        )
    }

    fn value_config(&self) -> &ValueConfig {
        &self.config.values
    }
}

fn seeded_rng(config: &EngineConfig) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(config.seed.unwrap_or_else(rand::random))
}
