//! World state: the five entity lists plus season and year.
//!
//! All simulation state is owned by [`World`] and passed explicitly to the
//! systems that mutate it. User-driven edits (tile placement, destruction,
//! character placement) enter through the methods in this module and snap to
//! the 16-unit grid; procedural generation writes continuous coordinates.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::grid::{self, MapBounds, Vec2};

pub const PERSON_HP: i32 = 100;
pub const ENEMY_HP: i32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];

    pub fn index(self) -> u8 {
        match self {
            Season::Spring => 0,
            Season::Summer => 1,
            Season::Autumn => 2,
            Season::Winter => 3,
        }
    }

    pub fn from_index(index: u8) -> Season {
        Self::ALL[(index % 4) as usize]
    }

    pub fn next(self) -> Season {
        Self::from_index(self.index() + 1)
    }

    pub fn label(self) -> &'static str {
        match self {
            Season::Spring => "春",
            Season::Summer => "夏",
            Season::Autumn => "秋",
            Season::Winter => "冬",
        }
    }
}

/// Stable handle to a country. Countries are never removed, so the handle
/// stays valid for the lifetime of the world, including across save/load.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CountryId(u32);

impl CountryId {
    pub fn raw(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EnemyId(u64);

impl EnemyId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Item {
    Wood,
    Gold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Grass,
    Sand,
    Volcano,
    Hotspring,
    Acidvolcano,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Grass,
        ResourceKind::Sand,
        ResourceKind::Volcano,
        ResourceKind::Hotspring,
        ResourceKind::Acidvolcano,
    ];

    pub fn sprite(self) -> &'static str {
        match self {
            ResourceKind::Grass => "grass",
            ResourceKind::Sand => "sand",
            ResourceKind::Volcano => "volcano",
            ResourceKind::Hotspring => "hotspring",
            ResourceKind::Acidvolcano => "acidvolcano",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureKind {
    House,
}

impl StructureKind {
    pub fn sprite(self) -> &'static str {
        match self {
            StructureKind::House => "house",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    Zombie,
}

impl EnemyKind {
    pub fn sprite(self) -> &'static str {
        match self {
            EnemyKind::Zombie => "zombie",
        }
    }
}

/// What the character-placement tool puts down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterKind {
    Person,
    Zombie,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    pub population: u32,
    pub culture: String,
    /// Ordered tile claims. Duplicates are allowed and the list grows
    /// without bound; it feeds rendering only, never ownership queries.
    pub territory: Vec<Vec2>,
    pub flag: u32,
}

impl Country {
    pub fn flag_sprite(&self) -> String {
        format!("flag{}", self.flag)
    }

    /// Arithmetic mean of the territory coordinates, recomputed per call.
    /// None while the country holds no territory.
    pub fn flag_anchor(&self) -> Option<Vec2> {
        if self.territory.is_empty() {
            return None;
        }
        let sum = self
            .territory
            .iter()
            .fold(Vec2::default(), |acc, tile| acc + *tile);
        let n = self.territory.len() as f32;
        Some(Vec2::new(sum.x / n, sum.y / n))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub pos: Vec2,
    /// May go negative: people have no death handling.
    pub hp: i32,
    pub inventory: Vec<Item>,
    pub country: CountryId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub kind: ResourceKind,
    pub pos: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub kind: StructureKind,
    pub pos: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub pos: Vec2,
    pub hp: i32,
    pub kind: EnemyKind,
}

/// The persisted portion of the world: exactly the five entity lists.
/// Season and year are stored separately alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldData {
    pub countries: Vec<Country>,
    pub people: Vec<Person>,
    pub resources: Vec<Resource>,
    pub structures: Vec<Structure>,
    pub enemies: Vec<Enemy>,
}

pub struct World {
    pub countries: Vec<Country>,
    pub people: Vec<Person>,
    pub resources: Vec<Resource>,
    pub structures: Vec<Structure>,
    pub enemies: Vec<Enemy>,
    pub season: Season,
    pub year: u64,
    bounds: MapBounds,
    next_enemy_id: u64,
}

impl World {
    pub fn new(bounds: MapBounds) -> Self {
        Self {
            countries: Vec::new(),
            people: Vec::new(),
            resources: Vec::new(),
            structures: Vec::new(),
            enemies: Vec::new(),
            season: Season::Spring,
            year: 1,
            bounds,
            next_enemy_id: 0,
        }
    }

    pub fn bounds(&self) -> MapBounds {
        self.bounds
    }

    /// Cycle to the next season. Seasons only move when the host asks.
    pub fn advance_season(&mut self) {
        self.season = self.season.next();
    }

    pub(crate) fn advance_year(&mut self) {
        self.year += 1;
    }

    /// Register a country and hand back its permanent handle. Flag ids are
    /// sequential from 1, matching the flag sprite numbering.
    pub fn found_country(
        &mut self,
        name: String,
        culture: String,
        population: u32,
        territory: Vec<Vec2>,
    ) -> CountryId {
        let flag = self.countries.len() as u32 + 1;
        self.countries.push(Country {
            name,
            population,
            culture,
            territory,
            flag,
        });
        CountryId(self.countries.len() as u32 - 1)
    }

    pub fn country(&self, id: CountryId) -> Option<&Country> {
        self.countries.get(id.0 as usize)
    }

    pub fn country_mut(&mut self, id: CountryId) -> Option<&mut Country> {
        self.countries.get_mut(id.0 as usize)
    }

    pub fn country_ids(&self) -> Vec<CountryId> {
        (0..self.countries.len() as u32).map(CountryId).collect()
    }

    pub fn spawn_person(&mut self, pos: Vec2, country: CountryId) {
        self.people.push(Person {
            pos,
            hp: PERSON_HP,
            inventory: Vec::new(),
            country,
        });
    }

    pub fn spawn_enemy(&mut self, pos: Vec2) -> EnemyId {
        let id = EnemyId(self.next_enemy_id);
        self.next_enemy_id += 1;
        self.enemies.push(Enemy {
            id,
            pos,
            hp: ENEMY_HP,
            kind: EnemyKind::Zombie,
        });
        id
    }

    pub fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|enemy| enemy.id == id)
    }

    pub fn enemy_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|enemy| enemy.id == id)
    }

    pub fn remove_enemy(&mut self, id: EnemyId) {
        self.enemies.retain(|enemy| enemy.id != id);
    }

    /// Place a resource tile at the grid cell under (x, y).
    pub fn place_resource(&mut self, kind: ResourceKind, x: f32, y: f32) {
        self.resources.push(Resource {
            kind,
            pos: grid::snap_point(Vec2::new(x, y)),
        });
    }

    /// Remove every resource stored at exactly the grid cell under (x, y).
    /// Resources at continuous (unsnapped) coordinates never match.
    pub fn destroy_resource(&mut self, x: f32, y: f32) {
        let target = grid::snap_point(Vec2::new(x, y));
        self.resources.retain(|resource| resource.pos != target);
    }

    /// Place a person or zombie at the grid cell under (x, y). A person
    /// joins a uniformly random country; with no countries the placement is
    /// silently dropped.
    pub fn place_character(
        &mut self,
        kind: CharacterKind,
        x: f32,
        y: f32,
        rng: &mut impl Rng,
    ) {
        let pos = grid::snap_point(Vec2::new(x, y));
        match kind {
            CharacterKind::Person => {
                let ids = self.country_ids();
                if let Some(country) = ids.choose(rng) {
                    self.spawn_person(pos, *country);
                }
            }
            CharacterKind::Zombie => {
                self.spawn_enemy(pos);
            }
        }
    }

    pub fn data(&self) -> WorldData {
        WorldData {
            countries: self.countries.clone(),
            people: self.people.clone(),
            resources: self.resources.clone(),
            structures: self.structures.clone(),
            enemies: self.enemies.clone(),
        }
    }

    /// Replace the live entity lists, season, and year in place. The map
    /// bounds and the host's clock are untouched.
    pub fn restore(&mut self, data: WorldData, season: Season, year: u64) {
        self.next_enemy_id = data
            .enemies
            .iter()
            .map(|enemy| enemy.id.0 + 1)
            .max()
            .unwrap_or(0);
        self.countries = data.countries;
        self.people = data.people;
        self.resources = data.resources;
        self.structures = data.structures;
        self.enemies = data.enemies;
        self.season = season;
        self.year = year;
    }

    /// Draw-ordered view for the host renderer: resources, people, enemies,
    /// structures, then per-country territory overlays with flag anchors.
    pub fn frame(&self) -> RenderFrame {
        let mut sprites = Vec::with_capacity(
            self.resources.len() + self.people.len() + self.enemies.len() + self.structures.len(),
        );
        for resource in &self.resources {
            sprites.push(SpritePlacement::new(resource.kind.sprite(), resource.pos));
        }
        for person in &self.people {
            sprites.push(SpritePlacement::new("person", person.pos));
        }
        for enemy in &self.enemies {
            sprites.push(SpritePlacement::new(enemy.kind.sprite(), enemy.pos));
        }
        for structure in &self.structures {
            sprites.push(SpritePlacement::new(structure.kind.sprite(), structure.pos));
        }
        let territories = self
            .countries
            .iter()
            .map(|country| TerritoryOverlay {
                country: country.name.clone(),
                tiles: country.territory.clone(),
                flag: country
                    .flag_anchor()
                    .map(|anchor| SpritePlacement::new(&country.flag_sprite(), anchor)),
            })
            .collect();
        RenderFrame {
            year: self.year,
            season: self.season.label().to_string(),
            sprites,
            territories,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SpritePlacement {
    pub sprite: String,
    pub x: f32,
    pub y: f32,
}

impl SpritePlacement {
    fn new(sprite: &str, pos: Vec2) -> Self {
        Self {
            sprite: sprite.to_string(),
            x: pos.x,
            y: pos.y,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TerritoryOverlay {
    pub country: String,
    pub tiles: Vec<Vec2>,
    pub flag: Option<SpritePlacement>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderFrame {
    pub year: u64,
    pub season: String,
    pub sprites: Vec<SpritePlacement>,
    pub territories: Vec<TerritoryOverlay>,
}
