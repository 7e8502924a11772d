//! Base stats and resource pools.
//!
//! ```text
//! [ Attributes + skill ranks ]   (authored, stored)
//!      ↓
//! [ Attribute-derived bases ]    (computed)
//!      ↓
//! [ + folded EffectDelta ]       (computed, see `effect::applier`)
//!      ↓
//! [ ResourcePools rebase ]       (current values, stored)
//! ```

pub mod attributes;
pub mod resources;

pub use attributes::{Attribute, Attributes, BaseStats};
pub use resources::{ResourceKind, ResourceMaximums, ResourceMeter, ResourcePools};
