//! JSON world configuration.
//!
//! Station references inside distributions use the string syntax
//! `"pickup_3"` / `"delivery_7"`: 1-based positions into the corresponding
//! coordinate list.  Everything is validated here, before the simulation is
//! assembled, so a bad config never produces a half-built world.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use gh_behavior::GreedyCourier;
use gh_core::{DeliveryId, PickupId, Pos};
use gh_factory::{Distribution, InitialDistribution, ItemFactory, WeightedDistribution};
use gh_grid::{Grid, GridError};
use gh_sim::{Assignment, Environment};

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse config file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed station id {0:?} (expected \"pickup_N\" or \"delivery_N\")")]
    MalformedId(String),

    #[error("station id {0:?} does not exist in this config")]
    UnknownStation(String),

    #[error("strategy {strategy:?} requires the {field:?} field")]
    MissingField {
        strategy: &'static str,
        field: &'static str,
    },

    #[error(transparent)]
    Grid(#[from] GridError),
}

// ── Schema ────────────────────────────────────────────────────────────────────

#[derive(Deserialize, Debug)]
pub struct SimulationConfig {
    /// `[W, H]`.
    pub grid_size: [i32; 2],
    #[serde(default)]
    pub obstacles: Vec<[i32; 2]>,
    pub pickup_stations: Vec<[i32; 2]>,
    pub delivery_stations: Vec<[i32; 2]>,
    pub agents: Vec<[i32; 2]>,
    pub strategy: Strategy,

    /// `InitialDistribution` payload: an item count or an exact plan.
    #[serde(default)]
    pub distribution: Option<DistributionSpec>,

    /// `WeightedDistribution` payload.
    #[serde(default)]
    pub pickup_distribution: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub delivery_weights: Option<BTreeMap<String, u64>>,
    #[serde(default)]
    pub steps_per_tick: Option<usize>,

    /// Uniform fleet capacity.
    #[serde(default = "default_agent_capacity")]
    pub agent_capacity: usize,

    /// How items find agents.
    #[serde(default)]
    pub assignment: AssignmentMode,
}

fn default_agent_capacity() -> usize {
    3
}

/// Item-generation strategy names, matched verbatim; anything else fails
/// deserialization.
#[derive(Deserialize, Copy, Clone, PartialEq, Eq, Debug)]
pub enum Strategy {
    InitialDistribution,
    WeightedDistribution,
}

#[derive(Deserialize, Copy, Clone, PartialEq, Eq, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentMode {
    /// Broker-run combinatorial auction each tick.
    #[default]
    Auction,
    /// Self-directed agents chasing station congestion.
    Greedy,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum DistributionSpec {
    /// Seed every pickup station with this many items.
    Count(usize),
    /// `{"pickup_1": ["delivery_2", …]}` — exact per-station plans.
    Exact(BTreeMap<String, Vec<String>>),
}

// ── Loading ───────────────────────────────────────────────────────────────────

pub fn load(path: &Path) -> Result<SimulationConfig, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    parse(&text)
}

pub fn parse(text: &str) -> Result<SimulationConfig, ConfigError> {
    Ok(serde_json::from_str(text)?)
}

// ── Station id syntax ─────────────────────────────────────────────────────────

fn parse_station_index(raw: &str, prefix: &str, count: usize) -> Result<u32, ConfigError> {
    let digits = raw
        .strip_prefix(prefix)
        .ok_or_else(|| ConfigError::MalformedId(raw.to_string()))?;
    let number: u32 = digits
        .parse()
        .map_err(|_| ConfigError::MalformedId(raw.to_string()))?;
    if number == 0 || number as usize > count {
        return Err(ConfigError::UnknownStation(raw.to_string()));
    }
    Ok(number - 1)
}

fn parse_pickup_id(raw: &str, count: usize) -> Result<PickupId, ConfigError> {
    parse_station_index(raw, "pickup_", count).map(PickupId)
}

fn parse_delivery_id(raw: &str, count: usize) -> Result<DeliveryId, ConfigError> {
    parse_station_index(raw, "delivery_", count).map(DeliveryId)
}

// ── Factory dispatch ──────────────────────────────────────────────────────────

/// The configured item-generation strategy, as one concrete type for the
/// `Environment`'s factory slot.
pub enum FactoryKind {
    Initial(InitialDistribution),
    Weighted(WeightedDistribution),
}

impl ItemFactory for FactoryKind {
    fn add_items(
        &mut self,
        grid: &mut Grid,
        tick: gh_core::Tick,
        rng: &mut gh_core::SimRng,
    ) -> gh_factory::FactoryResult<()> {
        match self {
            FactoryKind::Initial(f) => f.add_items(grid, tick, rng),
            FactoryKind::Weighted(f) => f.add_items(grid, tick, rng),
        }
    }
}

// ── Assembly ──────────────────────────────────────────────────────────────────

/// Build a ready-to-run environment from a parsed config.
pub fn build_environment(
    config: &SimulationConfig,
    seed: u64,
    selfish: bool,
) -> Result<Environment<FactoryKind, GreedyCourier>, ConfigError> {
    let [width, height] = config.grid_size;
    let mut grid = Grid::new(width, height)?;

    for &[x, y] in &config.obstacles {
        grid.add_obstacle(Pos::new(x, y))?;
    }
    for &[x, y] in &config.pickup_stations {
        grid.add_pickup(Pos::new(x, y))?;
    }
    for &[x, y] in &config.delivery_stations {
        grid.add_delivery(Pos::new(x, y))?;
    }
    for &[x, y] in &config.agents {
        grid.add_agent(Pos::new(x, y), config.agent_capacity)?;
    }

    let factory = build_factory(config)?;

    let fleet = config.agents.len();
    let (policy, assignment) = match config.assignment {
        AssignmentMode::Auction => (GreedyCourier::assigned_only(), Assignment::Auction),
        // Spread the fleet across the congestion ranking: agent i targets
        // the i-th most crowded station.
        AssignmentMode::Greedy => (
            GreedyCourier::crowd_seeking((0..fleet).collect()),
            Assignment::SelfDirected,
        ),
    };

    Ok(Environment::new(grid, factory, policy, assignment, seed).with_selfishness(selfish))
}

fn build_factory(config: &SimulationConfig) -> Result<FactoryKind, ConfigError> {
    let pickups = config.pickup_stations.len();
    let deliveries = config.delivery_stations.len();

    match config.strategy {
        Strategy::InitialDistribution => {
            let payload = config.distribution.as_ref().ok_or(ConfigError::MissingField {
                strategy: "InitialDistribution",
                field: "distribution",
            })?;
            let distribution = match payload {
                DistributionSpec::Count(k) => Distribution::Uniform(*k),
                DistributionSpec::Exact(plan) => {
                    let mut typed = Vec::with_capacity(plan.len());
                    for (source, destinations) in plan {
                        let source = parse_pickup_id(source, pickups)?;
                        let destinations = destinations
                            .iter()
                            .map(|d| parse_delivery_id(d, deliveries))
                            .collect::<Result<Vec<_>, _>>()?;
                        typed.push((source, destinations));
                    }
                    Distribution::Exact(typed)
                }
            };
            Ok(FactoryKind::Initial(InitialDistribution::new(distribution)))
        }

        Strategy::WeightedDistribution => {
            let probabilities =
                config
                    .pickup_distribution
                    .as_ref()
                    .ok_or(ConfigError::MissingField {
                        strategy: "WeightedDistribution",
                        field: "pickup_distribution",
                    })?;
            let weights = config
                .delivery_weights
                .as_ref()
                .ok_or(ConfigError::MissingField {
                    strategy: "WeightedDistribution",
                    field: "delivery_weights",
                })?;
            let steps_per_tick = config.steps_per_tick.ok_or(ConfigError::MissingField {
                strategy: "WeightedDistribution",
                field: "steps_per_tick",
            })?;

            let pickup_distribution = probabilities
                .iter()
                .map(|(id, &p)| parse_pickup_id(id, pickups).map(|id| (id, p)))
                .collect::<Result<Vec<_>, _>>()?;
            let delivery_weights = weights
                .iter()
                .map(|(id, &w)| parse_delivery_id(id, deliveries).map(|id| (id, w)))
                .collect::<Result<Vec<_>, _>>()?;

            Ok(FactoryKind::Weighted(WeightedDistribution::new(
                pickup_distribution,
                delivery_weights,
                steps_per_tick,
            )))
        }
    }
}
