//! Rule value accessors: where a command reads and writes.
//!
//! The three variants are a closed set, modeled as a tagged enum rather than
//! open polymorphism — the dispatch is a three-arm match on the hot path.

use crate::context::RuleContext;

/// Selects the storage a command operates on.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RuleValue {
    /// A resource in the owning unit's bag.
    Local { resource: String },
    /// A resource in the city's global bag.
    Global { resource: String },
    /// The named map at the context's `(u, v)` cell, scattered over the
    /// context radius when it is non-zero.
    Map { name: String },
}

impl RuleValue {
    /// Current amount at the target.  Map targets read the center cell;
    /// missing locals or unknown maps read as 0.
    pub fn get(&self, ctx: &RuleContext<'_>) -> u32 {
        match self {
            RuleValue::Local { resource } => {
                ctx.locals.as_deref().map_or(0, |bag| bag.get(resource))
            }
            RuleValue::Global { resource } => ctx.globals.get(resource),
            RuleValue::Map { name } => ctx
                .maps
                .by_name(name)
                .map_or(0, |map| map.get(ctx.u, ctx.v)),
        }
    }

    /// Strict room check for bag targets and zero-radius map targets.
    ///
    /// A non-zero radius scatters: scatter absorbs what fits and discards
    /// the remainder by definition, so it always validates.
    pub fn can_add(&self, ctx: &RuleContext<'_>, n: u32) -> bool {
        match self {
            RuleValue::Local { resource } => ctx
                .locals
                .as_deref()
                .is_some_and(|bag| bag.can_add(resource, n)),
            RuleValue::Global { resource } => ctx.globals.can_add(resource, n),
            RuleValue::Map { name } => match ctx.maps.by_name(name) {
                None => false,
                Some(_) if ctx.radius > 0 => true,
                Some(map) => map.get(ctx.u, ctx.v).saturating_add(n) <= map.capacity(),
            },
        }
    }

    /// Sufficiency check, mirroring [`can_add`](Self::can_add).
    pub fn can_remove(&self, ctx: &RuleContext<'_>, n: u32) -> bool {
        match self {
            RuleValue::Local { resource } => ctx
                .locals
                .as_deref()
                .is_some_and(|bag| bag.can_remove(resource, n)),
            RuleValue::Global { resource } => ctx.globals.can_remove(resource, n),
            RuleValue::Map { name } => match ctx.maps.by_name(name) {
                None => false,
                Some(_) if ctx.radius > 0 => true,
                Some(map) => map.get(ctx.u, ctx.v) >= n,
            },
        }
    }

    /// Add `n` at the target (saturating; scatter over the radius for map
    /// targets).  Only called after a successful validate pass.
    pub fn add(&self, ctx: &mut RuleContext<'_>, n: u32) {
        match self {
            RuleValue::Local { resource } => {
                if let Some(bag) = ctx.locals.as_deref_mut() {
                    bag.add(resource, n);
                }
            }
            RuleValue::Global { resource } => {
                ctx.globals.add(resource, n);
            }
            RuleValue::Map { name } => {
                let (u, v, radius) = (ctx.u, ctx.v, ctx.radius);
                if let Some(map) = ctx.maps.by_name_mut(name) {
                    map.add_radius(u, v, radius, n);
                }
            }
        }
    }

    /// Remove `n` at the target (flooring; scatter over the radius for map
    /// targets).  Only called after a successful validate pass.
    pub fn remove(&self, ctx: &mut RuleContext<'_>, n: u32) {
        match self {
            RuleValue::Local { resource } => {
                if let Some(bag) = ctx.locals.as_deref_mut() {
                    bag.remove(resource, n);
                }
            }
            RuleValue::Global { resource } => {
                ctx.globals.remove(resource, n);
            }
            RuleValue::Map { name } => {
                let (u, v, radius) = (ctx.u, ctx.v, ctx.radius);
                if let Some(map) = ctx.maps.by_name_mut(name) {
                    map.remove_radius(u, v, radius, n);
                }
            }
        }
    }
}
