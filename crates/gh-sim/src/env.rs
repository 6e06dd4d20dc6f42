//! The `Environment` — owner of the grid and driver of the tick loop.

use gh_auction::run_auction;
use gh_behavior::{CourierPolicy, Intention};
use gh_core::{AgentId, Dir, ItemId, ItemStatus, SimRng, Tick};
use gh_factory::ItemFactory;
use gh_grid::Grid;
use gh_grid::board::execution_order;
use tracing::{debug, trace, warn};

use crate::arbitrate::split_conflicts;
use crate::error::{SimError, SimResult};
use crate::observer::SimObserver;
use crate::validate::check_legal;

// ── Assignment mode ───────────────────────────────────────────────────────────

/// How idle items find an agent.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Assignment {
    /// The broker runs a combinatorial reverse auction each tick.
    Auction,
    /// No broker: agents self-select targets via their policy's fallback.
    SelfDirected,
}

// ── Per-tick statistics ───────────────────────────────────────────────────────

/// What one tick did, for observers and the CSV log.
#[derive(Copy, Clone, Debug)]
pub struct TickStats {
    pub tick: Tick,
    /// Items created by the factory this tick.
    pub spawned: usize,
    /// Items assigned by the broker this tick.
    pub assigned: usize,
    /// Intentions enacted across all iterations.
    pub enacted: usize,
    /// Intentions set aside as conflicting (counted once per rejection).
    pub conflicts: usize,
    /// Propose/enact iterations used (1 = no conflicts).
    pub iterations: usize,
}

// ── Environment ───────────────────────────────────────────────────────────────

/// The simulation: a grid, an item factory, a policy, and the tick loop.
///
/// Within a tick the environment is the only writer of the grid; the policy
/// and the broker's bidding stage see `&Grid` only.
pub struct Environment<F: ItemFactory, P: CourierPolicy> {
    pub grid: Grid,
    pub tick: Tick,
    factory: F,
    policy: P,
    assignment: Assignment,
    rng: SimRng,
    /// Reserved agent-policy flag, carried through from the CLI.  Accepted
    /// and stored, with no behavioural effect until its meaning is settled.
    selfish: bool,
}

impl<F: ItemFactory, P: CourierPolicy> Environment<F, P> {
    pub fn new(grid: Grid, factory: F, policy: P, assignment: Assignment, seed: u64) -> Self {
        Self {
            grid,
            tick: Tick::ZERO,
            factory,
            policy,
            assignment,
            rng: SimRng::new(seed),
            selfish: false,
        }
    }

    /// Set the reserved selfishness flag.
    pub fn with_selfishness(mut self, selfish: bool) -> Self {
        self.selfish = selfish;
        self
    }

    pub fn selfishness(&self) -> bool {
        self.selfish
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run `rounds` ticks, reporting each to `observer`.
    pub fn run<O: SimObserver>(&mut self, rounds: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..rounds {
            observer.on_tick_start(self.tick);
            let stats = self.step()?;
            observer.on_tick_end(&stats, &self.grid);
        }
        observer.on_run_end(self.tick, &self.grid);
        Ok(())
    }

    /// Execute one full tick and advance the clock.
    pub fn step(&mut self) -> SimResult<TickStats> {
        let now = self.tick;

        // ── Phase ① generate ──────────────────────────────────────────────
        let created_before = self.grid.items_created();
        self.factory.add_items(&mut self.grid, now, &mut self.rng)?;
        let spawned = self.grid.items_created() - created_before;

        // ── Phase ② assign ────────────────────────────────────────────────
        let assigned = match self.assignment {
            Assignment::Auction => run_auction(&mut self.grid, now)?.assigned,
            Assignment::SelfDirected => 0,
        };

        // ── Phases ③–⑦: propose / validate / arbitrate / enact, iterated ──
        //
        // Only agents whose intentions were set aside re-propose, against the
        // already-updated grid.  Arbitration always passes at least one
        // member of each conflict group, so the set-aside count strictly
        // shrinks; the cap is a backstop against policy bugs.
        let mut pending: Vec<AgentId> = self.grid.agent_ids().collect();
        let iteration_cap = pending.len().max(1);
        let mut enacted = 0;
        let mut conflicts = 0;
        let mut iterations = 0;

        loop {
            iterations += 1;

            let mut batch = Vec::with_capacity(pending.len());
            for &agent in &pending {
                if let Some(intention) = self.policy.propose(agent, &self.grid)? {
                    batch.push(intention);
                }
            }
            if batch.is_empty() {
                break;
            }

            check_legal(&batch, &self.grid)?;

            let (consistent, conflicting) = split_conflicts(batch, &self.grid, &mut self.rng);
            for intention in &consistent {
                self.enact(intention, now)?;
            }
            enacted += consistent.len();
            conflicts += conflicting.len();

            if conflicting.is_empty() {
                break;
            }
            if iterations >= iteration_cap {
                warn!(
                    tick = now.0,
                    dropped = conflicting.len(),
                    "iteration cap reached; dropping conflicting intentions"
                );
                break;
            }
            pending = conflicting.iter().map(Intention::agent).collect();
        }

        // ── Phase ⑧ advance ───────────────────────────────────────────────
        self.tick = now + 1;

        let stats = TickStats {
            tick: now,
            spawned,
            assigned,
            enacted,
            conflicts,
            iterations,
        };
        debug!(
            tick = now.0,
            spawned, assigned, enacted, conflicts, iterations, "tick complete"
        );
        Ok(stats)
    }

    // ── Phase ⑥ enactment ─────────────────────────────────────────────────
    //
    // Consistent intentions are logically simultaneous; after arbitration
    // they touch disjoint resources, so this sequential application order is
    // unobservable.

    fn enact(&mut self, intention: &Intention, now: Tick) -> SimResult<()> {
        match *intention {
            Intention::Move { agent, dir } => self.enact_move(agent, dir),
            Intention::Pickup { agent, item } => self.enact_pickup(agent, item, now),
            Intention::Deliver { agent, item } => self.enact_deliver(agent, item, now),
        }
    }

    fn enact_move(&mut self, agent: AgentId, dir: Dir) -> SimResult<()> {
        let to = self.grid.agent(agent)?.pos.step(dir);
        self.grid.move_agent(agent, to)?;
        trace!(agent = %agent, to = %to, "moved");
        Ok(())
    }

    fn enact_pickup(&mut self, agent: AgentId, wanted: Option<ItemId>, now: Tick) -> SimResult<()> {
        let at = self.grid.agent(agent)?.pos;
        let station = self
            .grid
            .pickup_at(at)
            .ok_or(crate::error::IllegalIntention::PickupOffStation { agent, at })?;

        match wanted {
            // A concrete item: either the agent's own assignment (flip it to
            // carried in place) or an unassigned item still in the queue.
            Some(id) => {
                if self.grid.agent(agent)?.item(id).is_some() {
                    if let Some(held) = self.grid.agent_mut(agent)?.item_mut(id) {
                        held.pick_up(agent, now)?;
                    }
                } else {
                    let queue = &mut self.grid.pickup_mut(station)?.queue;
                    let idx = queue
                        .iter()
                        .position(|i| i.id == id)
                        .ok_or(SimError::MissingPickupItem { agent, item: id })?;
                    let mut taken = queue.remove(idx);
                    taken.pick_up(agent, now)?;
                    self.grid.agent_mut(agent)?.items.push(taken);
                }
                trace!(agent = %agent, item = %id, "picked up");
            }
            // Wildcard: the head of the queue.  Arbitration guarantees the
            // queue is deep enough, so an empty queue here is a logic error.
            None => {
                let queue = &mut self.grid.pickup_mut(station)?.queue;
                if queue.is_empty() {
                    return Err(SimError::EmptyQueue { agent, station });
                }
                let mut taken = queue.remove(0);
                taken.pick_up(agent, now)?;
                trace!(agent = %agent, item = %taken.id, "picked up (wildcard)");
                self.grid.agent_mut(agent)?.items.push(taken);
            }
        }

        debug_assert!(
            self.grid
                .agent(agent)
                .map(|s| s.in_use() <= s.capacity)
                .unwrap_or(true)
        );
        Ok(())
    }

    fn enact_deliver(&mut self, agent: AgentId, wanted: Option<ItemId>, now: Tick) -> SimResult<()> {
        let state = self.grid.agent_mut(agent)?;

        let idx = match wanted {
            Some(id) => state
                .items
                .iter()
                .position(|i| i.id == id && i.status() == ItemStatus::InTransit),
            None => {
                // Any carried item: take the one first in execution order.
                let mut best: Option<usize> = None;
                for (i, item) in state.items.iter().enumerate() {
                    if item.status() != ItemStatus::InTransit {
                        continue;
                    }
                    let better = best
                        .map(|b| execution_order(item) < execution_order(&state.items[b]))
                        .unwrap_or(true);
                    if better {
                        best = Some(i);
                    }
                }
                best
            }
        };
        let idx = idx.ok_or(SimError::NothingToDeliver { agent })?;

        let mut delivered = state.items.remove(idx);
        delivered.deliver(now)?;
        debug!(agent = %agent, item = %delivered.id, tick = now.0, "delivered");
        self.grid.delivered.push(delivered);
        Ok(())
    }
}
