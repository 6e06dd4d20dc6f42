//! Items and their lifecycle state machine.
//!
//! An item's status only ever moves forward:
//!
//! ```text
//! AwaitingPickup → AssignedToAgent → InTransit → Delivered
//! ```
//!
//! The transition methods below are the only way to change status; each one
//! stamps the relevant tick and rejects any non-forward move.  Skipping a
//! state forward is legal — a self-directed agent that grabs an unassigned
//! item jumps straight from `AwaitingPickup` to `InTransit`.

use crate::error::{CoreError, CoreResult};
use crate::ids::{AgentId, DeliveryId, ItemId, PickupId};
use crate::tick::Tick;

// ── ItemStatus ────────────────────────────────────────────────────────────────

/// Lifecycle stage of an item.  `Ord` follows lifecycle order, which is what
/// makes the forward-only check a single comparison.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum ItemStatus {
    /// Sitting in its pickup station's queue, unassigned.
    AwaitingPickup,
    /// Won in an auction; in the assigned agent's list, not yet collected.
    AssignedToAgent,
    /// Physically carried by an agent.
    InTransit,
    /// Dropped at the destination.  Terminal.
    Delivered,
}

impl ItemStatus {
    pub const ALL: [ItemStatus; 4] = [
        ItemStatus::AwaitingPickup,
        ItemStatus::AssignedToAgent,
        ItemStatus::InTransit,
        ItemStatus::Delivered,
    ];
}

// ── Item ──────────────────────────────────────────────────────────────────────

/// A parcel travelling from a pickup station to a delivery station.
#[derive(Clone, Debug)]
pub struct Item {
    pub id: ItemId,
    pub created_tick: Tick,
    /// Set exactly once, on the transition to `InTransit`.
    pub pickup_tick: Option<Tick>,
    /// Set exactly once, on the transition to `Delivered`.
    pub delivered_tick: Option<Tick>,
    pub source: PickupId,
    pub destination: DeliveryId,
    /// Set from `AssignedToAgent` onwards.
    pub assigned_agent: Option<AgentId>,
    /// 1-based position within the winning bundle; guides execution order.
    pub priority: Option<u32>,
    status: ItemStatus,
}

impl Item {
    /// A fresh item awaiting pickup at `source`.
    pub fn new(id: ItemId, created_tick: Tick, source: PickupId, destination: DeliveryId) -> Self {
        Self {
            id,
            created_tick,
            pickup_tick: None,
            delivered_tick: None,
            source,
            destination,
            assigned_agent: None,
            priority: None,
            status: ItemStatus::AwaitingPickup,
        }
    }

    #[inline]
    pub fn status(&self) -> ItemStatus {
        self.status
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status != ItemStatus::Delivered
    }

    fn advance(&mut self, to: ItemStatus) -> CoreResult<()> {
        if to <= self.status {
            return Err(CoreError::InvalidTransition {
                item: self.id,
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }

    /// `AwaitingPickup → AssignedToAgent`: the broker hands the item to a
    /// winning bidder.  `priority` is the 1-based bundle position.
    pub fn assign_to(&mut self, agent: AgentId, priority: u32) -> CoreResult<()> {
        self.advance(ItemStatus::AssignedToAgent)?;
        self.assigned_agent = Some(agent);
        self.priority = Some(priority);
        Ok(())
    }

    /// `AwaitingPickup | AssignedToAgent → InTransit`: the agent collects the
    /// item at its source station.  Stamps `pickup_tick`.
    pub fn pick_up(&mut self, agent: AgentId, tick: Tick) -> CoreResult<()> {
        self.advance(ItemStatus::InTransit)?;
        self.assigned_agent = Some(agent);
        self.pickup_tick = Some(tick);
        Ok(())
    }

    /// `InTransit → Delivered`.  Stamps `delivered_tick`.
    pub fn deliver(&mut self, tick: Tick) -> CoreResult<()> {
        if self.status != ItemStatus::InTransit {
            return Err(CoreError::InvalidTransition {
                item: self.id,
                from: self.status,
                to: ItemStatus::Delivered,
            });
        }
        self.advance(ItemStatus::Delivered)?;
        self.delivered_tick = Some(tick);
        Ok(())
    }
}
