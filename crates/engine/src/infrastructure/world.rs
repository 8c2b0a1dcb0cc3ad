//! Initial world generation.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::json;

use twelveninja_domain::{AxialCoord, Difficulty, Tile};

struct Landmark {
    name: &'static str,
    tile_type: &'static str,
    description: &'static str,
    difficulty: Difficulty,
}

const HOME: Landmark = Landmark {
    name: "Duskfall Hamlet",
    tile_type: "village",
    description: "A quiet village perpetually shrouded in twilight. Excellent for trade and recruiting early followers.",
    difficulty: Difficulty::Easy,
};

const LANDMARKS: [Landmark; 9] = [
    Landmark {
        name: "The Obsidian Crag",
        tile_type: "crag",
        description: "A jagged wasteland of sharp rocks and dark minerals. Resources are rare, but valuable.",
        difficulty: Difficulty::Hard,
    },
    Landmark {
        name: "Shadow-Crest Summit",
        tile_type: "summit",
        description: "High-altitude peaks where the air is thin and ancient beasts roost. High risk, high reward.",
        difficulty: Difficulty::Hard,
    },
    Landmark {
        name: "Lantern's Deep",
        tile_type: "cavern",
        description: "A subterranean settlement illuminated by glowing fungi and lanterns. Good for mining operations.",
        difficulty: Difficulty::Medium,
    },
    Landmark {
        name: "Iron-Fang Range",
        tile_type: "mountain",
        description: "Snow-capped mountains rich in iron ore, guarded by territorial clans.",
        difficulty: Difficulty::Medium,
    },
    Landmark {
        name: "Serpent's Flow Valley",
        tile_type: "valley",
        description: "A lush, winding river valley. The soil is fertile for farming, but the river hides predators.",
        difficulty: Difficulty::Easy,
    },
    Landmark {
        name: "The Silent Stalks",
        tile_type: "forest",
        description: "A dense bamboo forest that confuses travelers. Home to stealthy units and wood resources.",
        difficulty: Difficulty::Medium,
    },
    Landmark {
        name: "Mist-Veiled Bridge",
        tile_type: "bridge",
        description: "A strategic choke point connecting two cliffs. Control this, and you control the trade routes.",
        difficulty: Difficulty::Hard,
    },
    Landmark {
        name: "Aether-Bound Citadel",
        tile_type: "citadel",
        description: "A floating fortress in the sky. Magic is potent here, but gravity is a constant threat.",
        difficulty: Difficulty::VeryHard,
    },
    Landmark {
        name: "The Calm Waters",
        tile_type: "lake",
        description: "Peaceful lakes and fishing spots. A safe haven for beginners to build up resources.",
        difficulty: Difficulty::Easy,
    },
];

const TERRAIN: [(&str, &str); 5] = [
    ("plains", "Open Plains"),
    ("forest", "Wild Forest"),
    ("hills", "Rolling Hills"),
    ("marsh", "Fog Marsh"),
    ("mountain", "Broken Peaks"),
];

/// Every coordinate within `radius` steps of the origin, one tile each.
///
/// The origin is always the home village. Named landmarks are scattered over
/// the rest; remaining cells get generic terrain whose difficulty grows with
/// distance. The same `seed` always yields the same layout.
pub fn generate_world(radius: u16, seed: Option<u64>) -> Vec<Tile> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let radius = i32::from(radius);

    let mut coords = Vec::new();
    for q in -radius..=radius {
        for r in (-radius).max(-q - radius)..=radius.min(-q + radius) {
            let coord = AxialCoord::new(q, r);
            if coord != AxialCoord::ORIGIN {
                coords.push(coord);
            }
        }
    }
    coords.shuffle(&mut rng);

    let mut tiles = Vec::with_capacity(coords.len() + 1);
    tiles.push(landmark_tile(AxialCoord::ORIGIN, &HOME));

    let (landmark_cells, rest) = coords.split_at(LANDMARKS.len().min(coords.len()));
    for (coord, landmark) in landmark_cells.iter().zip(LANDMARKS.iter()) {
        tiles.push(landmark_tile(*coord, landmark));
    }
    for coord in rest {
        let (tile_type, name) = TERRAIN[rng.gen_range(0..TERRAIN.len())];
        let difficulty = difficulty_for_distance(coord.distance(&AxialCoord::ORIGIN), radius);
        tiles.push(
            Tile::new(*coord, tile_type)
                .with_metadata("name", json!(name))
                .with_metadata("difficulty", json!(difficulty.as_str())),
        );
    }
    tiles
}

fn landmark_tile(coord: AxialCoord, landmark: &Landmark) -> Tile {
    Tile::new(coord, landmark.tile_type)
        .with_metadata("name", json!(landmark.name))
        .with_metadata("description", json!(landmark.description))
        .with_metadata("difficulty", json!(landmark.difficulty.as_str()))
}

fn difficulty_for_distance(distance: u32, radius: i32) -> Difficulty {
    let radius = radius.max(1) as f64;
    let ratio = f64::from(distance) / radius;
    if ratio < 0.35 {
        Difficulty::Easy
    } else if ratio < 0.7 {
        Difficulty::Medium
    } else if ratio < 0.95 {
        Difficulty::Hard
    } else {
        Difficulty::VeryHard
    }
}
