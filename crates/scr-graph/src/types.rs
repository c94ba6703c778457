//! Domain types for scr-graph.
//!
//! These types fall into two groups:
//! - **Runtime records**: `ComponentDescription`, `ComponentConfiguration`,
//!   `SatisfiedReference`, `ServiceReference` (what the component directory reports)
//! - **Graph values**: `Component`, `Cycle` (derived per query, never stored)
//!
//! ## Design Decisions
//!
//! | Decision | Choice | Rationale |
//! |----------|--------|-----------|
//! | Vertex kinds | Enum not optional fields | A vertex is either a component or a foreign service |
//! | Identity | Name / service id only | Configuration ids change across reactivations |
//! | Service properties | JSON values | Runtimes publish arbitrary property types |

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Service property naming the component that registered a service.
pub const COMPONENT_NAME_PROPERTY: &str = "component.name";

/// Service property listing the class names a service is registered under.
pub const OBJECT_CLASS_PROPERTY: &str = "objectClass";

/// Class name used for a foreign service that publishes no `objectClass`.
pub const UNKNOWN_CLASS_NAME: &str = "<unknown>";

// ============================================================================
// Strongly-typed ID wrappers
// ============================================================================

/// Identity of one configuration instance of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigurationId(pub i64);

impl ConfigurationId {
    /// Extract the raw i64 value.
    #[must_use]
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl From<i64> for ConfigurationId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ConfigurationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a registered service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(pub i64);

impl ServiceId {
    /// Extract the raw i64 value.
    #[must_use]
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl From<i64> for ServiceId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Runtime records
// ============================================================================

/// Lifecycle state of a component configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentState {
    /// Waiting for a required configuration
    UnsatisfiedConfiguration,
    /// Waiting for a required reference
    UnsatisfiedReference,
    /// All references bound, not yet activated
    Satisfied,
    /// Activated
    Active,
    /// Activation threw
    FailedActivation,
    /// Any state this crate does not know about
    #[serde(other)]
    Unknown,
}

impl ComponentState {
    /// Whether configurations in this state take part in the dependency graph.
    #[must_use]
    pub fn is_graphed(self) -> bool {
        matches!(self, Self::Satisfied | Self::Active)
    }

    /// Wire representation of the state.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UnsatisfiedConfiguration => "UNSATISFIED_CONFIGURATION",
            Self::UnsatisfiedReference => "UNSATISFIED_REFERENCE",
            Self::Satisfied => "SATISFIED",
            Self::Active => "ACTIVE",
            Self::FailedActivation => "FAILED_ACTIVATION",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ComponentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared component, independent of any running instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDescription {
    /// Component name, unique within one runtime
    pub name: String,
}

impl ComponentDescription {
    /// Create a description for the named component.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A concrete instance of a component description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentConfiguration {
    /// Configuration identity
    pub id: ConfigurationId,
    /// Current lifecycle state
    pub state: ComponentState,
    /// Dependencies that are currently bound
    #[serde(default)]
    pub satisfied_references: Vec<SatisfiedReference>,
}

/// A declared dependency together with the services currently bound to it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SatisfiedReference {
    /// Reference name from the component declaration
    #[serde(default)]
    pub name: String,
    /// Services bound to the reference
    #[serde(default)]
    pub bound_services: Vec<ServiceReference>,
}

/// A registered service as seen through a satisfied reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceReference {
    /// Service identity
    pub id: ServiceId,
    /// Service registration properties
    #[serde(default)]
    pub properties: BTreeMap<String, serde_json::Value>,
}

impl ServiceReference {
    /// Create a service reference without properties.
    #[must_use]
    pub fn new(id: impl Into<ServiceId>) -> Self {
        Self {
            id: id.into(),
            properties: BTreeMap::new(),
        }
    }

    /// Add a registration property.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Name of the component that registered this service, if it was
    /// registered by a component at all.
    #[must_use]
    pub fn component_name(&self) -> Option<&str> {
        self.properties
            .get(COMPONENT_NAME_PROPERTY)
            .and_then(serde_json::Value::as_str)
    }

    /// Class name(s) the service is registered under, comma separated.
    ///
    /// Falls back to [`UNKNOWN_CLASS_NAME`] when the property is missing or
    /// holds no strings.
    #[must_use]
    pub fn class_name(&self) -> String {
        let names: Vec<&str> = match self.properties.get(OBJECT_CLASS_PROPERTY) {
            Some(serde_json::Value::String(name)) => vec![name.as_str()],
            Some(serde_json::Value::Array(values)) => {
                values.iter().filter_map(serde_json::Value::as_str).collect()
            }
            _ => Vec::new(),
        };

        if names.is_empty() {
            UNKNOWN_CLASS_NAME.to_string()
        } else {
            names.join(",")
        }
    }
}

// ============================================================================
// Graph values
// ============================================================================

/// A running component that takes part in the dependency graph.
#[derive(Debug, Clone)]
pub struct RegisteredComponent {
    /// Component name (vertex identity)
    pub name: String,
    /// Configuration the vertex was built from
    pub configuration_id: ConfigurationId,
    /// State at the time the vertex was read
    pub state: ComponentState,
}

/// A dependency target that is not itself a declared component.
#[derive(Debug, Clone)]
pub struct ForeignReference {
    /// Service identity (vertex identity)
    pub reference_id: ServiceId,
    /// Class name(s) the service is registered under
    pub class_name: String,
}

/// A vertex of the dependency graph.
///
/// Equality, hashing and ordering only look at [`Component::key`]: two
/// registered components are the same vertex when their names match, two
/// foreign references when their service ids match. The kinds never compare
/// equal to each other.
#[derive(Debug, Clone)]
pub enum Component {
    /// A declared component with a satisfied or active configuration
    Registered(RegisteredComponent),
    /// A service provided outside the component framework
    Foreign(ForeignReference),
}

/// Identity of a [`Component`], ordered registered-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ComponentKey<'a> {
    /// Registered component name
    Registered(&'a str),
    /// Foreign service id
    Foreign(ServiceId),
}

impl fmt::Display for ComponentKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registered(name) => write!(f, "component:{name}"),
            Self::Foreign(id) => write!(f, "service:{id}"),
        }
    }
}

impl Component {
    /// Create a registered component vertex.
    pub fn registered(
        name: impl Into<String>,
        configuration_id: impl Into<ConfigurationId>,
        state: ComponentState,
    ) -> Self {
        Self::Registered(RegisteredComponent {
            name: name.into(),
            configuration_id: configuration_id.into(),
            state,
        })
    }

    /// Create a foreign reference vertex.
    pub fn foreign(reference_id: impl Into<ServiceId>, class_name: impl Into<String>) -> Self {
        Self::Foreign(ForeignReference {
            reference_id: reference_id.into(),
            class_name: class_name.into(),
        })
    }

    /// Vertex identity.
    #[must_use]
    pub fn key(&self) -> ComponentKey<'_> {
        match self {
            Self::Registered(c) => ComponentKey::Registered(&c.name),
            Self::Foreign(f) => ComponentKey::Foreign(f.reference_id),
        }
    }

    /// Human-readable label: `"<name> [<configuration id>]"` or
    /// `"<class name> [<reference id>]"`.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Registered(c) => format!("{} [{}]", c.name, c.configuration_id),
            Self::Foreign(f) => format!("{} [{}]", f.class_name, f.reference_id),
        }
    }

    /// The numeric id shown in identifier-only listings.
    #[must_use]
    pub fn identifier(&self) -> i64 {
        match self {
            Self::Registered(c) => c.configuration_id.as_i64(),
            Self::Foreign(f) => f.reference_id.as_i64(),
        }
    }

    /// Returns `true` for foreign reference vertices.
    #[must_use]
    pub fn is_foreign(&self) -> bool {
        matches!(self, Self::Foreign(_))
    }

    /// Component name for registered vertices.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Registered(c) => Some(&c.name),
            Self::Foreign(_) => None,
        }
    }
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Component {}

impl Hash for Component {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Component {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Component {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// An elementary circuit: distinct components where each one depends on the
/// next and the last depends on the first.
///
/// The rotation is whatever the enumeration produced. Compare cycles with
/// [`Cycle::normalized`] when the starting member must not matter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cycle {
    components: Vec<Component>,
}

impl Cycle {
    /// Create a cycle, validating invariants.
    ///
    /// Returns `None` if `components` is empty or lists a component twice.
    #[must_use]
    pub fn new(components: Vec<Component>) -> Option<Self> {
        if components.is_empty() {
            return None;
        }
        let mut seen = HashSet::with_capacity(components.len());
        if !components.iter().all(|c| seen.insert(c.key())) {
            return None;
        }
        Some(Self { components })
    }

    /// Members in circuit order.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Always `false`; a cycle has at least one member.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns `true` if `component` is a member.
    #[must_use]
    pub fn contains(&self, component: &Component) -> bool {
        self.components.contains(component)
    }

    /// Circuit edges `seq[i] -> seq[(i + 1) % n]`, including the edge from the
    /// last member back to the first.
    pub fn edges(&self) -> impl Iterator<Item = (&Component, &Component)> + '_ {
        let n = self.components.len();
        (0..n).map(move |i| (&self.components[i], &self.components[(i + 1) % n]))
    }

    /// The same circuit rotated so its least member comes first.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let min_idx = self
            .components
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.cmp(b))
            .map_or(0, |(idx, _)| idx);

        let mut components = Vec::with_capacity(self.components.len());
        components.extend_from_slice(&self.components[min_idx..]);
        components.extend_from_slice(&self.components[..min_idx]);

        Self { components }
    }
}

impl<'a> IntoIterator for &'a Cycle {
    type Item = &'a Component;
    type IntoIter = std::slice::Iter<'a, Component>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}
