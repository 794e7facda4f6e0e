//! Gateway and listener contexts for one reconciliation pass.
//!
//! A [`GatewayContext`] wraps one gateway and exclusively owns its derived
//! status. [`ListenerContext`] is a thin view: the listener spec plus a
//! stable index into the owning context's status array. All status mutations
//! write through that index, so every holder of a listener context observes
//! the same status without copies to reconcile.

use crate::gateway::resources::{Gateway, ListenerSpec, ResourceSnapshot, RouteGroupKind};
use crate::gateway::status::{ConditionStatus, GatewayStatus, ListenerStatus};

/// Per-pass view of one gateway and its listeners.
///
/// Created at the start of a pass and discarded at the end; never shared
/// across concurrent passes and never persisted.
#[derive(Debug)]
pub struct GatewayContext {
    gateway: Gateway,
    status: GatewayStatus,
    listeners: Vec<ListenerContext>,
}

/// Non-owning view of one declared listener.
///
/// Holds the listener spec and the index of its status entry in the owning
/// [`GatewayContext`]. Cheap to clone; all clones address the same entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerContext {
    listener: ListenerSpec,
    status_idx: usize,
}

impl ListenerContext {
    /// The listener spec this context views
    pub fn listener(&self) -> &ListenerSpec {
        &self.listener
    }

    /// Index of this listener's status entry in the owning gateway context
    pub fn status_idx(&self) -> usize {
        self.status_idx
    }
}

impl GatewayContext {
    /// Wrap a gateway for one pass. Call [`reset_listeners`] before use.
    ///
    /// [`reset_listeners`]: GatewayContext::reset_listeners
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway, status: GatewayStatus::default(), listeners: Vec::new() }
    }

    /// The wrapped gateway
    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// Listener contexts, one per declared listener, in spec order
    pub fn listeners(&self) -> &[ListenerContext] {
        &self.listeners
    }

    /// The derived status for this pass
    pub fn status(&self) -> &GatewayStatus {
        &self.status
    }

    /// Hand the derived status to the status-write collaborator
    pub fn into_status(self) -> GatewayStatus {
        self.status
    }

    /// Rebuild the status array and listener contexts from the gateway's
    /// current listener spec.
    ///
    /// One fresh status entry per declared listener, in spec order, carrying
    /// only the listener name as identity; conditions and derived fields from
    /// any earlier call are discarded. A listener no longer in the spec loses
    /// its entry, a new one gets a blank entry. Idempotent.
    ///
    /// The snapshot supplies the routes used to seed each entry's
    /// `attached_routes` count.
    pub fn reset_listeners(&mut self, snapshot: &ResourceSnapshot) {
        self.status.listeners = self
            .gateway
            .listeners
            .iter()
            .map(|listener| {
                let mut status = ListenerStatus::new(&listener.name);
                status.attached_routes = count_attached_routes(snapshot, &self.gateway, &listener.name);
                status
            })
            .collect();

        self.listeners = self
            .gateway
            .listeners
            .iter()
            .enumerate()
            .map(|(idx, listener)| ListenerContext { listener: listener.clone(), status_idx: idx })
            .collect();

        tracing::debug!(
            gateway = %self.gateway.qualified_name(),
            listeners = self.listeners.len(),
            "Reset listener contexts"
        );
    }

    /// Record the route kinds a listener accepts, through the shared status
    /// entry addressed by the listener's index.
    pub fn set_supported_kinds(&mut self, listener: &ListenerContext, kinds: Vec<RouteGroupKind>) {
        self.status.listeners[listener.status_idx].supported_kinds = kinds;
    }

    /// Upsert a status condition on a listener, through the shared status
    /// entry addressed by the listener's index.
    pub fn set_listener_condition(
        &mut self,
        listener: &ListenerContext,
        condition_type: &str,
        status: ConditionStatus,
        reason: &str,
        message: &str,
    ) {
        self.status.listeners[listener.status_idx]
            .set_condition(condition_type, status, reason, message);
    }
}

fn count_attached_routes(snapshot: &ResourceSnapshot, gateway: &Gateway, listener_name: &str) -> u32 {
    snapshot
        .routes
        .iter()
        .filter(|route| {
            route
                .parent_refs
                .iter()
                .any(|pref| pref.targets(&route.namespace, gateway, listener_name))
        })
        .count() as u32
}
