use std::collections::HashMap;

use tracing::debug;

use crate::error::{IResult, not_found};
use crate::recognized::Recognized;

use super::types::*;

/// Read access to the immutable game-data snapshot.
///
/// Implementors only resolve names; the typed lookups are provided.
pub trait GameDataProvider {
    fn component(&self, name: &str) -> Option<&Component>;

    fn shell(&self, name: &str) -> IResult<&Shell> {
        self.component(name)
            .and_then(Component::shell_ref)
            .ok_or_else(|| not_found(ComponentKind::Shell, name))
    }

    fn torpedo(&self, name: &str) -> IResult<&Torpedo> {
        self.component(name)
            .and_then(Component::torpedo_ref)
            .ok_or_else(|| not_found(ComponentKind::Torpedo, name))
    }

    fn bomb(&self, name: &str) -> IResult<&AerialOrdnance> {
        self.component(name)
            .and_then(Component::bomb_ref)
            .ok_or_else(|| not_found(ComponentKind::Bomb, name))
    }

    fn rocket(&self, name: &str) -> IResult<&AerialOrdnance> {
        self.component(name)
            .and_then(Component::rocket_ref)
            .ok_or_else(|| not_found(ComponentKind::Rocket, name))
    }

    fn depth_charge(&self, name: &str) -> IResult<&DepthCharge> {
        self.component(name)
            .and_then(Component::depth_charge_ref)
            .ok_or_else(|| not_found(ComponentKind::DepthCharge, name))
    }

    fn aircraft(&self, name: &str) -> IResult<&Aircraft> {
        self.component(name)
            .and_then(Component::aircraft_ref)
            .ok_or_else(|| not_found(ComponentKind::Aircraft, name))
    }
}

type Partition = Recognized<Nation, char>;

/// In-memory snapshot partitioned by the nation letter of each name.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "Vec<Component>", into = "Vec<Component>")
)]
pub struct GameDataStore {
    partitions: HashMap<Partition, HashMap<String, Component>>,
}

impl GameDataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `component`, replacing any previous record with the same name.
    pub fn insert(&mut self, component: Component) -> Option<Component> {
        let partition = Nation::from_param_name(component.name());
        if !partition.is_known() {
            debug!(name = component.name(), "component has no known nation prefix");
        }
        self.partitions
            .entry(partition)
            .or_default()
            .insert(component.name().to_string(), component)
    }

    /// Every record in the partition of `nation`.
    pub fn nation(&self, nation: Nation) -> impl Iterator<Item = &Component> {
        self.partitions
            .get(&Recognized::Known(nation))
            .into_iter()
            .flat_map(HashMap::values)
    }

    pub fn len(&self) -> usize {
        self.partitions.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.partitions.values().flat_map(HashMap::values)
    }

    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> IResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl GameDataProvider for GameDataStore {
    fn component(&self, name: &str) -> Option<&Component> {
        self.partitions
            .get(&Nation::from_param_name(name))
            .and_then(|partition| partition.get(name))
    }
}

impl<I> From<I> for GameDataStore
where
    I: IntoIterator<Item = Component>,
{
    fn from(value: I) -> Self {
        let mut store = GameDataStore::new();
        for component in value {
            store.insert(component);
        }
        store
    }
}

impl From<GameDataStore> for Vec<Component> {
    fn from(store: GameDataStore) -> Self {
        store
            .partitions
            .into_values()
            .flat_map(HashMap::into_values)
            .collect()
    }
}
