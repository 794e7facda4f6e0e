//! # Listener Context Model
//!
//! Per-pass, in-memory view of a gateway and its listeners. The translation
//! driver creates one [`GatewayContext`] per gateway per reconciliation pass;
//! the context derives and exclusively owns the listener status array, which
//! [`ListenerContext`] views write through by index. Contexts are rebuilt from
//! scratch every pass and never persisted, so stale status cannot leak across
//! passes when listeners are added, removed, or reordered.

pub mod contexts;
pub mod resources;
pub mod status;

pub use contexts::{GatewayContext, ListenerContext};
pub use resources::{
    Gateway, GatewayClass, HttpRouteSpec, ListenerProtocol, ListenerSpec, ParentRef,
    PolicyResource, ResourceSnapshot, RouteGroupKind,
};
pub use status::{Condition, ConditionStatus, GatewayStatus, ListenerStatus};
