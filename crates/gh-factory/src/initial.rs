//! One-shot initial seeding of the board.

use gh_core::{DeliveryId, PickupId, SimRng, Tick};
use gh_grid::Grid;
use tracing::debug;

use crate::error::{FactoryError, FactoryResult};
use crate::ItemFactory;

/// How the initial items are distributed.
pub enum Distribution {
    /// Seed every pickup station with `k` items whose destinations are drawn
    /// uniformly at random from the existing delivery stations.
    Uniform(usize),
    /// Per-station destination lists, added in the listed order.
    /// Pairs are `(source, destinations)`.
    Exact(Vec<(PickupId, Vec<DeliveryId>)>),
}

/// Strategy that adds a fixed population of items at the start of the run
/// and nothing afterwards.  `add_items` at any tick past 0 is a no-op.
pub struct InitialDistribution {
    distribution: Distribution,
}

impl InitialDistribution {
    pub fn new(distribution: Distribution) -> Self {
        Self { distribution }
    }

    fn seed_uniform(&self, grid: &mut Grid, k: usize, rng: &mut SimRng) -> FactoryResult<()> {
        let destinations: Vec<DeliveryId> = grid.deliveries.iter().map(|d| d.id).collect();
        if destinations.is_empty() && k > 0 {
            return Err(FactoryError::NoDeliveryStations);
        }
        let sources: Vec<PickupId> = grid.pickups.iter().map(|s| s.id).collect();
        for source in sources {
            for _ in 0..k {
                let dest = destinations[rng.gen_range(0..destinations.len())];
                grid.spawn_item(source, dest, Tick::ZERO)?;
            }
        }
        Ok(())
    }

    fn seed_exact(
        &self,
        grid: &mut Grid,
        plan: &[(PickupId, Vec<DeliveryId>)],
    ) -> FactoryResult<()> {
        // Validate every referenced station before touching the grid, so a
        // bad config cannot leave a half-seeded board behind.
        for (source, destinations) in plan {
            grid.pickup(*source)
                .map_err(|_| FactoryError::UnknownPickup(*source))?;
            for dest in destinations {
                grid.delivery(*dest)
                    .map_err(|_| FactoryError::UnknownDelivery(*dest))?;
            }
        }
        for (source, destinations) in plan {
            for dest in destinations {
                grid.spawn_item(*source, *dest, Tick::ZERO)?;
            }
        }
        Ok(())
    }
}

impl ItemFactory for InitialDistribution {
    fn add_items(&mut self, grid: &mut Grid, tick: Tick, rng: &mut SimRng) -> FactoryResult<()> {
        if tick != Tick::ZERO {
            return Ok(());
        }
        let before = grid.items_created();
        match &self.distribution {
            Distribution::Uniform(k) => self.seed_uniform(grid, *k, rng)?,
            Distribution::Exact(plan) => self.seed_exact(grid, plan)?,
        }
        debug!(spawned = grid.items_created() - before, "initial distribution seeded");
        Ok(())
    }
}
