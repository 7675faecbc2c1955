//! The type catalog produced by a successful parse.
//!
//! Registries are insertion-ordered `Vec`s of `Arc` handles; lookup is a
//! linear name scan (catalogs hold dozens of types at most).  Types are
//! immutable once the catalog is built — construction APIs and instances
//! share the `Arc`s.

use std::sync::Arc;

use ogb_rules::{AgentType, MapRule, MapType, UnitRule, UnitType};
use ogb_spatial::{PathType, WayType};

/// Every type kind a scenario script can declare.
#[derive(Default, Debug)]
pub struct TypeCatalog {
    pub(crate) resources: Vec<String>,
    pub(crate) path_types: Vec<Arc<PathType>>,
    pub(crate) way_types: Vec<Arc<WayType>>,
    pub(crate) agent_types: Vec<Arc<AgentType>>,
    pub(crate) map_rules: Vec<Arc<MapRule>>,
    pub(crate) unit_rules: Vec<Arc<UnitRule>>,
    pub(crate) map_types: Vec<Arc<MapType>>,
    pub(crate) unit_types: Vec<Arc<UnitType>>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Declared resource names ───────────────────────────────────────────

    pub fn resources(&self) -> &[String] {
        &self.resources
    }

    pub fn has_resource(&self, name: &str) -> bool {
        self.resources.iter().any(|r| r == name)
    }

    // ── Name lookups ──────────────────────────────────────────────────────

    pub fn path_type(&self, name: &str) -> Option<&Arc<PathType>> {
        self.path_types.iter().find(|t| t.name == name)
    }

    pub fn way_type(&self, name: &str) -> Option<&Arc<WayType>> {
        self.way_types.iter().find(|t| t.name == name)
    }

    pub fn agent_type(&self, name: &str) -> Option<&Arc<AgentType>> {
        self.agent_types.iter().find(|t| t.name == name)
    }

    pub fn map_rule(&self, name: &str) -> Option<&Arc<MapRule>> {
        self.map_rules.iter().find(|r| r.name == name)
    }

    pub fn unit_rule(&self, name: &str) -> Option<&Arc<UnitRule>> {
        self.unit_rules.iter().find(|r| r.name == name)
    }

    pub fn map_type(&self, name: &str) -> Option<&Arc<MapType>> {
        self.map_types.iter().find(|t| t.name == name)
    }

    pub fn unit_type(&self, name: &str) -> Option<&Arc<UnitType>> {
        self.unit_types.iter().find(|t| t.name == name)
    }

    // ── Insertion-ordered views ───────────────────────────────────────────

    pub fn path_types(&self) -> &[Arc<PathType>] {
        &self.path_types
    }

    pub fn way_types(&self) -> &[Arc<WayType>] {
        &self.way_types
    }

    pub fn agent_types(&self) -> &[Arc<AgentType>] {
        &self.agent_types
    }

    pub fn map_rules(&self) -> &[Arc<MapRule>] {
        &self.map_rules
    }

    pub fn unit_rules(&self) -> &[Arc<UnitRule>] {
        &self.unit_rules
    }

    pub fn map_types(&self) -> &[Arc<MapType>] {
        &self.map_types
    }

    pub fn unit_types(&self) -> &[Arc<UnitType>] {
        &self.unit_types
    }
}
