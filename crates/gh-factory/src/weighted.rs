//! Per-tick weighted arrivals.

use gh_core::{DeliveryId, PickupId, SimRng, Tick};
use gh_grid::Grid;
use rand::distributions::{Distribution as _, WeightedIndex};
use tracing::debug;

use crate::error::{FactoryError, FactoryResult};
use crate::ItemFactory;

/// Strategy that adds items every tick.
///
/// For each configured pickup station, `steps_per_tick` independent
/// Bernoulli(p) draws decide how many items arrive; each item's destination
/// is sampled from the weighted delivery stations independently.
pub struct WeightedDistribution {
    /// Per-station arrival probability for a single step.
    pickup_distribution: Vec<(PickupId, f64)>,
    /// Positive weights over destination stations.
    delivery_weights: Vec<(DeliveryId, u64)>,
    steps_per_tick: usize,
    /// Destination IDs are validated once, on first use.
    targets_checked: bool,
}

impl WeightedDistribution {
    pub fn new(
        pickup_distribution: Vec<(PickupId, f64)>,
        delivery_weights: Vec<(DeliveryId, u64)>,
        steps_per_tick: usize,
    ) -> Self {
        Self {
            pickup_distribution,
            delivery_weights,
            steps_per_tick,
            targets_checked: false,
        }
    }

    fn check_targets(&mut self, grid: &Grid) -> FactoryResult<()> {
        if self.targets_checked {
            return Ok(());
        }
        for (dest, weight) in &self.delivery_weights {
            grid.delivery(*dest)
                .map_err(|_| FactoryError::UnknownDelivery(*dest))?;
            if *weight == 0 {
                return Err(FactoryError::ZeroWeight(*dest));
            }
        }
        if self.delivery_weights.is_empty() {
            return Err(FactoryError::NoDeliveryStations);
        }
        self.targets_checked = true;
        Ok(())
    }
}

impl ItemFactory for WeightedDistribution {
    fn add_items(&mut self, grid: &mut Grid, tick: Tick, rng: &mut SimRng) -> FactoryResult<()> {
        self.check_targets(grid)?;

        let weights: Vec<u64> = self.delivery_weights.iter().map(|&(_, w)| w).collect();
        let sampler =
            WeightedIndex::new(&weights).map_err(|e| FactoryError::BadWeights(e.to_string()))?;

        let before = grid.items_created();
        for &(source, probability) in &self.pickup_distribution {
            grid.pickup(source)
                .map_err(|_| FactoryError::UnknownPickup(source))?;

            let arrivals = (0..self.steps_per_tick)
                .filter(|_| rng.gen_bool(probability))
                .count();
            for _ in 0..arrivals {
                let dest = self.delivery_weights[sampler.sample(rng.inner())].0;
                grid.spawn_item(source, dest, tick)?;
            }
        }

        let spawned = grid.items_created() - before;
        if spawned > 0 {
            debug!(tick = tick.0, spawned, "weighted distribution arrivals");
        }
        Ok(())
    }
}
