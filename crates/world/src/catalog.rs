//! Static resource-node type catalog.
//!
//! Node-type definitions are baked into the binary and loaded once at
//! service start into three lookup structures: by id, by terrain, and the
//! full list. The catalog is immutable for the process lifetime and safe to
//! share across concurrent chunk requests.

use std::collections::{BTreeMap, HashMap};

use rand::Rng;
use serde::{Deserialize, Serialize};

use thicket_core::TerrainType;

/// Spawn rarity category.
///
/// Rarity drives both the spawn-noise threshold (rarer types demand higher
/// noise values, so fewer cells qualify) and the cluster-size distribution
/// (rarer types form smaller clusters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    /// Found on most qualifying terrain.
    Common,
    /// Noticeably sparser than common.
    Uncommon,
    /// A handful of clusters per region.
    Rare,
    /// A lucky find.
    VeryRare,
}

impl Rarity {
    /// Minimum normalized noise value (in `[0, 1]`) a cell must exceed to be
    /// a spawn candidate for this rarity.
    pub fn spawn_threshold(self) -> f64 {
        match self {
            Rarity::Common => 0.30,
            Rarity::Uncommon => 0.50,
            Rarity::Rare => 0.70,
            Rarity::VeryRare => 0.85,
        }
    }

    /// Integer weights for cluster sizes 1..=6.
    ///
    /// Rarer types are biased toward small clusters; very rare nodes never
    /// cluster beyond three.
    pub fn size_weights(self) -> [u32; 6] {
        match self {
            Rarity::Common => [10, 30, 40, 15, 5, 0],
            Rarity::Uncommon => [20, 35, 30, 10, 5, 0],
            Rarity::Rare => [40, 35, 20, 5, 0, 0],
            Rarity::VeryRare => [60, 30, 10, 0, 0, 0],
        }
    }
}

/// Client-facing presentation data for a node type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeVisual {
    /// Sprite sheet key.
    pub sprite: String,
    /// Render scale multiplier.
    pub scale: f32,
}

/// An item dropped alongside the primary yield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryDrop {
    /// Item key.
    pub item: String,
    /// Drop chance in `[0, 1]`.
    pub chance: f64,
}

/// Harvesting behavior of a node type.
///
/// `respawn_time_secs` is carried in the data model for the harvest system;
/// no respawn scheduler ticks it here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeProperties {
    /// Seconds of player interaction required per harvest.
    pub harvest_time_secs: u32,
    /// Seconds until a depleted node becomes harvestable again.
    pub respawn_time_secs: u32,
    /// Minimum primary yield per harvest.
    pub yield_min: u32,
    /// Maximum primary yield per harvest.
    pub yield_max: u32,
    /// Extra drops rolled independently of the primary yield.
    pub secondary_drops: Vec<SecondaryDrop>,
}

impl NodeProperties {
    /// Roll a primary yield in `[yield_min, yield_max]`.
    pub fn roll_yield<R: Rng>(&self, rng: &mut R) -> u32 {
        if self.yield_min >= self.yield_max {
            return self.yield_min;
        }
        rng.gen_range(self.yield_min..=self.yield_max)
    }
}

/// Definition of one resource node type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceNodeType {
    /// Stable numeric id, also used to derive the type's noise seed.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// Flavor text.
    pub description: String,
    /// Terrain this type spawns on.
    pub terrain_affinity: TerrainType,
    /// Spawn rarity.
    pub rarity: Rarity,
    /// Presentation data.
    pub visual: NodeVisual,
    /// Harvest behavior.
    pub properties: NodeProperties,
}

/// Immutable node-type registry with id and terrain lookups.
pub struct NodeCatalog {
    types: Vec<ResourceNodeType>,
    by_id: HashMap<i32, usize>,
    // BTreeMap keeps terrain iteration order deterministic across runs,
    // which pins down which clusters win near the per-chunk resource cap.
    by_terrain: BTreeMap<TerrainType, Vec<usize>>,
}

impl NodeCatalog {
    /// Build a catalog from a list of type definitions.
    ///
    /// Types within each terrain group are ordered by id so generation
    /// output is reproducible.
    pub fn new(types: Vec<ResourceNodeType>) -> Self {
        let mut by_id = HashMap::new();
        let mut by_terrain: BTreeMap<TerrainType, Vec<usize>> = BTreeMap::new();
        for (idx, ty) in types.iter().enumerate() {
            by_id.insert(ty.id, idx);
            by_terrain.entry(ty.terrain_affinity).or_default().push(idx);
        }
        for group in by_terrain.values_mut() {
            group.sort_by_key(|&idx| types[idx].id);
        }
        Self {
            types,
            by_id,
            by_terrain,
        }
    }

    /// The built-in node-type table.
    pub fn builtin() -> Self {
        Self::new(builtin_types())
    }

    /// Look up a type definition by id.
    pub fn by_id(&self, id: i32) -> Option<&ResourceNodeType> {
        self.by_id.get(&id).map(|&idx| &self.types[idx])
    }

    /// Types spawning on the given terrain, ordered by id.
    pub fn for_terrain(&self, terrain: TerrainType) -> Vec<&ResourceNodeType> {
        self.by_terrain
            .get(&terrain)
            .map(|group| group.iter().map(|&idx| &self.types[idx]).collect())
            .unwrap_or_default()
    }

    /// Iterate terrain groups in deterministic (terrain, then id) order.
    pub fn terrain_groups(
        &self,
    ) -> impl Iterator<Item = (TerrainType, Vec<&ResourceNodeType>)> + '_ {
        self.by_terrain.iter().map(move |(terrain, group)| {
            (
                *terrain,
                group.iter().map(|&idx| &self.types[idx]).collect(),
            )
        })
    }

    /// Full type list in definition order.
    pub fn all(&self) -> &[ResourceNodeType] {
        &self.types
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the catalog has no types.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

fn node_type(
    id: i32,
    name: &str,
    description: &str,
    terrain: TerrainType,
    rarity: Rarity,
    sprite: &str,
    harvest_time_secs: u32,
    respawn_time_secs: u32,
    yields: (u32, u32),
    secondary_drops: Vec<SecondaryDrop>,
) -> ResourceNodeType {
    ResourceNodeType {
        id,
        name: name.to_string(),
        description: description.to_string(),
        terrain_affinity: terrain,
        rarity,
        visual: NodeVisual {
            sprite: sprite.to_string(),
            scale: 1.0,
        },
        properties: NodeProperties {
            harvest_time_secs,
            respawn_time_secs,
            yield_min: yields.0,
            yield_max: yields.1,
            secondary_drops,
        },
    }
}

fn secondary(item: &str, chance: f64) -> SecondaryDrop {
    SecondaryDrop {
        item: item.to_string(),
        chance,
    }
}

fn builtin_types() -> Vec<ResourceNodeType> {
    vec![
        node_type(
            1,
            "Oak Tree",
            "A sturdy oak, good for timber.",
            TerrainType::Grass,
            Rarity::Common,
            "node/oak_tree",
            4,
            300,
            (2, 5),
            vec![secondary("acorn", 0.25)],
        ),
        node_type(
            2,
            "Berry Bush",
            "Wild berries, edible straight off the branch.",
            TerrainType::Grass,
            Rarity::Common,
            "node/berry_bush",
            2,
            180,
            (1, 4),
            vec![],
        ),
        node_type(
            3,
            "Wildflower Patch",
            "Flowers prized by dye makers.",
            TerrainType::Grass,
            Rarity::Uncommon,
            "node/wildflowers",
            2,
            240,
            (1, 3),
            vec![secondary("seed_pouch", 0.10)],
        ),
        node_type(
            4,
            "Driftwood Pile",
            "Sun-bleached wood washed up on the shore.",
            TerrainType::Sand,
            Rarity::Common,
            "node/driftwood",
            3,
            240,
            (1, 3),
            vec![],
        ),
        node_type(
            5,
            "Shell Bed",
            "Tide-polished shells half-buried in sand.",
            TerrainType::Sand,
            Rarity::Uncommon,
            "node/shell_bed",
            3,
            360,
            (1, 2),
            vec![secondary("pearl_fragment", 0.05)],
        ),
        node_type(
            6,
            "Boulder",
            "Loose stone, easy pickings for a mason.",
            TerrainType::Stone,
            Rarity::Common,
            "node/boulder",
            5,
            420,
            (2, 6),
            vec![secondary("flint", 0.20)],
        ),
        node_type(
            7,
            "Iron Vein",
            "Reddish ore streaking through the rock.",
            TerrainType::Stone,
            Rarity::Uncommon,
            "node/iron_vein",
            8,
            600,
            (1, 3),
            vec![],
        ),
        node_type(
            8,
            "Gold Vein",
            "A glittering seam of gold-bearing quartz.",
            TerrainType::Stone,
            Rarity::Rare,
            "node/gold_vein",
            10,
            900,
            (1, 2),
            vec![secondary("quartz", 0.30)],
        ),
        node_type(
            9,
            "Crystal Outcrop",
            "Resonant crystal jutting from a fissure.",
            TerrainType::Stone,
            Rarity::VeryRare,
            "node/crystal_outcrop",
            12,
            1800,
            (1, 1),
            vec![secondary("crystal_shard", 0.50)],
        ),
        node_type(
            10,
            "Clay Deposit",
            "Dense clay, ideal for pottery.",
            TerrainType::Dirt,
            Rarity::Common,
            "node/clay_deposit",
            4,
            300,
            (2, 4),
            vec![],
        ),
        node_type(
            11,
            "Peat Bed",
            "Compacted plant matter, slow-burning fuel.",
            TerrainType::Dirt,
            Rarity::Uncommon,
            "node/peat_bed",
            6,
            480,
            (1, 3),
            vec![],
        ),
        node_type(
            12,
            "Kelp Forest",
            "Ribbons of kelp swaying below the surface.",
            TerrainType::Water,
            Rarity::Common,
            "node/kelp_forest",
            3,
            240,
            (2, 5),
            vec![],
        ),
        node_type(
            13,
            "Pearl Bed",
            "Oysters clustered on a submerged ledge.",
            TerrainType::Water,
            Rarity::Rare,
            "node/pearl_bed",
            8,
            1200,
            (1, 2),
            vec![secondary("pearl", 0.40)],
        ),
    ]
}
