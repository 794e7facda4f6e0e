//! Derived listener status for one reconciliation pass.
//!
//! The status structures here are in-memory only: an external collaborator
//! reads the final [`GatewayStatus`] after a pass completes successfully and
//! persists it. A pass that fails must not overwrite previously-reported
//! status, which is why the core never writes status anywhere itself.

use serde::{Deserialize, Serialize};

use crate::gateway::resources::RouteGroupKind;

/// Condition type: the listener has been accepted by the controller
pub const LISTENER_CONDITION_ACCEPTED: &str = "Accepted";
/// Condition type: the listener has been translated into proxy configuration
pub const LISTENER_CONDITION_PROGRAMMED: &str = "Programmed";
/// Condition type: the listener conflicts with another listener
pub const LISTENER_CONDITION_CONFLICTED: &str = "Conflicted";
/// Condition type: all references of the listener resolved
pub const LISTENER_CONDITION_RESOLVED_REFS: &str = "ResolvedRefs";

/// Condition reason: everything is in order
pub const LISTENER_REASON_ACCEPTED: &str = "Accepted";
/// Condition reason: the listener protocol is not supported
pub const LISTENER_REASON_UNSUPPORTED_PROTOCOL: &str = "UnsupportedProtocol";
/// Condition reason: a reference could not be resolved
pub const LISTENER_REASON_INVALID_ROUTE_KINDS: &str = "InvalidRouteKinds";

/// Three-valued condition status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}

/// One status condition, keyed by `condition_type`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub condition_type: String,
    pub status: ConditionStatus,
    pub reason: String,
    pub message: String,
}

/// Status of one gateway, rebuilt from scratch every pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayStatus {
    pub listeners: Vec<ListenerStatus>,
}

/// Status of one declared listener
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListenerStatus {
    pub name: String,
    #[serde(default)]
    pub supported_kinds: Vec<RouteGroupKind>,
    #[serde(default)]
    pub attached_routes: u32,
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

impl ListenerStatus {
    /// Fresh status entry carrying only the listener's name as identity
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), supported_kinds: Vec::new(), attached_routes: 0, conditions: Vec::new() }
    }

    /// Upsert a condition by type.
    ///
    /// Replaces an existing condition of the same type in place, preserving
    /// the order of first appearance for other types; appends otherwise.
    pub fn set_condition(
        &mut self,
        condition_type: &str,
        status: ConditionStatus,
        reason: &str,
        message: &str,
    ) {
        let condition = Condition {
            condition_type: condition_type.to_string(),
            status,
            reason: reason.to_string(),
            message: message.to_string(),
        };
        match self.conditions.iter_mut().find(|c| c.condition_type == condition_type) {
            Some(existing) => *existing = condition,
            None => self.conditions.push(condition),
        }
    }
}
