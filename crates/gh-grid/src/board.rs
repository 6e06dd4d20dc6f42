//! The board and its entity registries.
//!
//! # Data layout
//!
//! Stations, obstacles, and agents live in registry `Vec`s indexed by their
//! typed ID — `grid.pickups[id.index()]` is O(1) and cache-friendly.  A
//! row-major `obstacle_mask` gives O(1) passability checks for the A* inner
//! loop.  Cell contents for rendering are derived from the registries on
//! demand rather than stored per cell; the registries are the single source
//! of truth.

use gh_core::{AgentId, DeliveryId, Item, ItemId, ItemStatus, PickupId, Pos, Tick};

use crate::error::{GridError, GridResult};

// ── Stations and obstacles ────────────────────────────────────────────────────

/// A station where items appear and wait to be collected.
#[derive(Debug)]
pub struct PickupStation {
    pub id: PickupId,
    pub pos: Pos,
    /// Items awaiting pickup, in arrival order.
    pub queue: Vec<Item>,
}

/// A station where items are consumed.  Delivered items are not stored here.
#[derive(Debug)]
pub struct DeliveryStation {
    pub id: DeliveryId,
    pub pos: Pos,
}

/// An impassable cell.
#[derive(Debug)]
pub struct Obstacle {
    pub pos: Pos,
}

// ── Agents ────────────────────────────────────────────────────────────────────

/// A bid an agent has won, kept for analytics.
#[derive(Clone, Debug)]
pub struct WonBid {
    pub tick: Tick,
    /// Bundle contents in visit order.
    pub items: Vec<ItemId>,
    pub cost: u64,
}

/// A courier agent's world state.
#[derive(Debug)]
pub struct AgentState {
    pub id: AgentId,
    pub pos: Pos,
    /// Maximum number of simultaneously held (assigned or carried) items.
    pub capacity: usize,
    /// Items currently associated with the agent (assigned or in transit),
    /// in assignment order.
    pub items: Vec<Item>,
    /// Sum of winning-bid costs accumulated over the run.
    pub total_cost: u64,
    /// Every auction bid this agent has won.
    pub won_bids: Vec<WonBid>,
}

/// Execution order inside an agent's load: bundle priority ascending, ties by
/// item creation order.  Items without a priority (grabbed directly off a
/// queue) sort after prioritised ones.
pub fn execution_order(item: &Item) -> (u32, u32) {
    (item.priority.unwrap_or(u32::MAX), item.id.0)
}

impl AgentState {
    fn new(id: AgentId, pos: Pos, capacity: usize) -> Self {
        Self {
            id,
            pos,
            capacity,
            items: Vec::new(),
            total_cost: 0,
            won_bids: Vec::new(),
        }
    }

    /// Number of slots in use — assigned plus carried items.
    pub fn in_use(&self) -> usize {
        self.items
            .iter()
            .filter(|i| {
                matches!(
                    i.status(),
                    ItemStatus::AssignedToAgent | ItemStatus::InTransit
                )
            })
            .count()
    }

    pub fn remaining_capacity(&self) -> usize {
        self.capacity.saturating_sub(self.in_use())
    }

    pub fn is_carrying(&self) -> bool {
        self.items
            .iter()
            .any(|i| i.status() == ItemStatus::InTransit)
    }

    /// Items currently carried, in list order.
    pub fn carried(&self) -> impl Iterator<Item = &Item> {
        self.items
            .iter()
            .filter(|i| i.status() == ItemStatus::InTransit)
    }

    /// Items assigned but not yet collected, in list order.
    pub fn assigned(&self) -> impl Iterator<Item = &Item> {
        self.items
            .iter()
            .filter(|i| i.status() == ItemStatus::AssignedToAgent)
    }

    /// The carried item to deliver next (highest priority, ties by creation).
    pub fn next_carried(&self) -> Option<&Item> {
        self.carried().min_by_key(|i| execution_order(i))
    }

    /// The assigned item to collect next (highest priority, ties by creation).
    pub fn next_assigned(&self) -> Option<&Item> {
        self.assigned().min_by_key(|i| execution_order(i))
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| i.id == id)
    }
}

// ── Cell contents (rendering support) ─────────────────────────────────────────

/// What occupies a cell.  A single cell may hold several objects at once
/// (e.g. an agent standing on a station); obstacles never share a cell in
/// well-formed configs but nothing here forbids it.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CellObject {
    Obstacle,
    Pickup(PickupId),
    Delivery(DeliveryId),
    Agent(AgentId),
}

// ── Grid ──────────────────────────────────────────────────────────────────────

/// The world: a `width × height` board plus registries of everything on it.
pub struct Grid {
    width: i32,
    height: i32,
    pub pickups: Vec<PickupStation>,
    pub deliveries: Vec<DeliveryStation>,
    pub obstacles: Vec<Obstacle>,
    pub agents: Vec<AgentState>,
    /// Delivered items, keyed by `assigned_agent` for per-agent analytics.
    pub delivered: Vec<Item>,
    /// Row-major `width * height` passability mask.
    obstacle_mask: Vec<bool>,
    /// Next `ItemId` to allocate.  Doubles as the created-items counter.
    next_item: u32,
}

impl Grid {
    /// An empty board.  Dimensions must be positive.
    pub fn new(width: i32, height: i32) -> GridResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            pickups: Vec::new(),
            deliveries: Vec::new(),
            obstacles: Vec::new(),
            agents: Vec::new(),
            delivered: Vec::new(),
            obstacle_mask: vec![false; (width * height) as usize],
            next_item: 0,
        })
    }

    // ── Dimensions and passability ────────────────────────────────────────

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    #[inline]
    pub fn is_obstacle(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && self.obstacle_mask[(pos.y * self.width + pos.x) as usize]
    }

    /// In bounds and not an obstacle.  Stations and agents do not block —
    /// this world has no agent-agent collisions.
    #[inline]
    pub fn passable(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && !self.obstacle_mask[(pos.y * self.width + pos.x) as usize]
    }

    fn check_bounds(&self, pos: Pos) -> GridResult<()> {
        if self.in_bounds(pos) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds { pos })
        }
    }

    // ── Construction ──────────────────────────────────────────────────────

    pub fn add_obstacle(&mut self, pos: Pos) -> GridResult<()> {
        self.check_bounds(pos)?;
        self.obstacle_mask[(pos.y * self.width + pos.x) as usize] = true;
        self.obstacles.push(Obstacle { pos });
        Ok(())
    }

    pub fn add_pickup(&mut self, pos: Pos) -> GridResult<PickupId> {
        self.check_bounds(pos)?;
        let id = PickupId(self.pickups.len() as u32);
        self.pickups.push(PickupStation {
            id,
            pos,
            queue: Vec::new(),
        });
        Ok(id)
    }

    pub fn add_delivery(&mut self, pos: Pos) -> GridResult<DeliveryId> {
        self.check_bounds(pos)?;
        let id = DeliveryId(self.deliveries.len() as u32);
        self.deliveries.push(DeliveryStation { id, pos });
        Ok(id)
    }

    pub fn add_agent(&mut self, pos: Pos, capacity: usize) -> GridResult<AgentId> {
        self.check_bounds(pos)?;
        let id = AgentId(self.agents.len() as u32);
        self.agents.push(AgentState::new(id, pos, capacity));
        Ok(id)
    }

    // ── Registry lookups ──────────────────────────────────────────────────

    pub fn pickup(&self, id: PickupId) -> GridResult<&PickupStation> {
        self.pickups
            .get(id.index())
            .ok_or(GridError::UnknownPickup(id))
    }

    pub fn pickup_mut(&mut self, id: PickupId) -> GridResult<&mut PickupStation> {
        self.pickups
            .get_mut(id.index())
            .ok_or(GridError::UnknownPickup(id))
    }

    pub fn delivery(&self, id: DeliveryId) -> GridResult<&DeliveryStation> {
        self.deliveries
            .get(id.index())
            .ok_or(GridError::UnknownDelivery(id))
    }

    pub fn agent(&self, id: AgentId) -> GridResult<&AgentState> {
        self.agents
            .get(id.index())
            .ok_or(GridError::UnknownAgent(id))
    }

    pub fn agent_mut(&mut self, id: AgentId) -> GridResult<&mut AgentState> {
        self.agents
            .get_mut(id.index())
            .ok_or(GridError::UnknownAgent(id))
    }

    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.agents.len() as u32).map(AgentId)
    }

    // ── Position queries ──────────────────────────────────────────────────

    pub fn pickup_at(&self, pos: Pos) -> Option<PickupId> {
        self.pickups.iter().find(|s| s.pos == pos).map(|s| s.id)
    }

    pub fn delivery_at(&self, pos: Pos) -> Option<DeliveryId> {
        self.deliveries.iter().find(|s| s.pos == pos).map(|s| s.id)
    }

    /// Everything on a cell, obstacles first, then stations, then agents.
    pub fn objects_at(&self, pos: Pos) -> Vec<CellObject> {
        let mut out = Vec::new();
        if self.is_obstacle(pos) {
            out.push(CellObject::Obstacle);
        }
        if let Some(id) = self.pickup_at(pos) {
            out.push(CellObject::Pickup(id));
        }
        if let Some(id) = self.delivery_at(pos) {
            out.push(CellObject::Delivery(id));
        }
        for agent in &self.agents {
            if agent.pos == pos {
                out.push(CellObject::Agent(agent.id));
            }
        }
        out
    }

    // ── Items ─────────────────────────────────────────────────────────────

    /// Create a new item in `source`'s queue.  Validates both station IDs.
    pub fn spawn_item(
        &mut self,
        source: PickupId,
        destination: DeliveryId,
        tick: Tick,
    ) -> GridResult<ItemId> {
        self.delivery(destination)?;
        let id = ItemId(self.next_item);
        let item = Item::new(id, tick, source, destination);
        self.pickup_mut(source)?.queue.push(item);
        self.next_item += 1;
        Ok(id)
    }

    /// Total number of items ever created this run.
    pub fn items_created(&self) -> usize {
        self.next_item as usize
    }

    /// Every item in the world: station queues, agent loads, and the
    /// delivered archive.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.pickups
            .iter()
            .flat_map(|s| s.queue.iter())
            .chain(self.agents.iter().flat_map(|a| a.items.iter()))
            .chain(self.delivered.iter())
    }

    // ── Fleet queries ─────────────────────────────────────────────────────

    /// Sum of every agent's remaining capacity.
    pub fn fleet_remaining_capacity(&self) -> usize {
        self.agents.iter().map(AgentState::remaining_capacity).sum()
    }

    /// Pickup stations ranked by queue depth, deepest first; ties broken by
    /// station ID so the ranking is stable.
    pub fn stations_by_queue_depth(&self) -> Vec<PickupId> {
        let mut ranked: Vec<&PickupStation> = self.pickups.iter().collect();
        ranked.sort_by_key(|s| (std::cmp::Reverse(s.queue.len()), s.id));
        ranked.iter().map(|s| s.id).collect()
    }

    // ── Mutation (engine only) ────────────────────────────────────────────

    /// Relocate an agent.  Bounds-checked; legality of the move (obstacles,
    /// adjacency) is the engine's responsibility.
    pub fn move_agent(&mut self, id: AgentId, to: Pos) -> GridResult<()> {
        self.check_bounds(to)?;
        self.agent_mut(id)?.pos = to;
        Ok(())
    }
}
