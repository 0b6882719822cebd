//! Catalog entries (creatures and items) and the remote page shapes they
//! arrive in.

use serde::{Deserialize, Serialize};

use super::stats::StatBlock;
use crate::store::{collections, Record};

/// Which catalog an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum CatalogKind {
    Creatures,
    Items,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 2] = [CatalogKind::Creatures, CatalogKind::Items];

    /// Store collection holding the cached catalog.
    pub fn catalog_collection(&self) -> &'static str {
        match self {
            CatalogKind::Creatures => collections::CREATURE_CATALOG,
            CatalogKind::Items => collections::ITEM_CATALOG,
        }
    }

    /// Store collection holding this kind's favorites.
    pub fn favorites_collection(&self) -> &'static str {
        match self {
            CatalogKind::Creatures => collections::CREATURE_FAVORITES,
            CatalogKind::Items => collections::ITEM_FAVORITES,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CatalogKind::Creatures => "creatures",
            CatalogKind::Items => "items",
        }
    }

    /// Parse a user-supplied kind name. Accepts singular and plural forms.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "creature" | "creatures" | "pokemon" => Some(CatalogKind::Creatures),
            "item" | "items" => Some(CatalogKind::Items),
            _ => None,
        }
    }
}

impl std::fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A cached catalog record. Overwritten wholesale on re-sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct CatalogEntry {
    pub id: i64,
    pub name: String,
    pub entity: EntityKind,
}

impl CatalogEntry {
    pub fn kind(&self) -> CatalogKind {
        match self.entity {
            EntityKind::Creature(_) => CatalogKind::Creatures,
            EntityKind::Item(_) => CatalogKind::Items,
        }
    }

    pub fn as_creature(&self) -> Option<&CreaturePayload> {
        match &self.entity {
            EntityKind::Creature(payload) => Some(payload),
            EntityKind::Item(_) => None,
        }
    }

    pub fn as_item(&self) -> Option<&ItemPayload> {
        match &self.entity {
            EntityKind::Item(payload) => Some(payload),
            EntityKind::Creature(_) => None,
        }
    }
}

impl Record for CatalogEntry {
    fn key(&self) -> String {
        self.id.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum EntityKind {
    Creature(CreaturePayload),
    Item(ItemPayload),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct CreaturePayload {
    pub types: Vec<String>,
    pub base_stats: StatBlock<u16>,
    /// Every move this creature can learn.
    pub movepool: Vec<String>,
    #[serde(default)]
    pub sprites: Sprites,
    pub base_experience: Option<u32>,
    pub height: Option<u32>,
    pub weight: Option<u32>,
}

impl CreaturePayload {
    pub fn can_learn(&self, move_name: &str) -> bool {
        self.movepool.iter().any(|m| m == move_name)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Sprites {
    pub front_default: Option<String>,
    pub back_default: Option<String>,
    pub front_shiny: Option<String>,
    pub back_shiny: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct ItemPayload {
    pub category: ItemCategory,
    pub cost: u32,
    pub effect: String,
    pub sprite: Option<String>,
    pub heal_amount: Option<u32>,
    pub usable_in_battle: bool,
    pub generation: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum ItemCategory {
    Healing,
    Revival,
    StatusHeal,
    StatBoost,
    #[serde(other)]
    Other,
}

// ============================================================================
// API response wrappers
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CreaturePageResponse {
    pub pokemon: Vec<RemoteCreature>,
    pub total: Option<u64>,
    pub page: Option<u32>,
    pub pages: Option<u32>,
}

/// Items are served in one response and carry no page count.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemPageResponse {
    pub items: Vec<RemoteItem>,
    pub total: Option<u64>,
    pub pages: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteCreature {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub base_stats: StatBlock<u16>,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub moves: Vec<String>,
    pub base_experience: Option<u32>,
    pub height: Option<u32>,
    pub weight: Option<u32>,
}

impl RemoteCreature {
    pub fn to_entry(&self) -> CatalogEntry {
        CatalogEntry {
            id: self.id,
            name: self.name.clone(),
            entity: EntityKind::Creature(CreaturePayload {
                types: self.types.clone(),
                base_stats: self.base_stats,
                movepool: self.moves.clone(),
                sprites: self.sprites.clone(),
                base_experience: self.base_experience,
                height: self.height,
                weight: self.weight,
            }),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteItem {
    pub id: i64,
    pub name: String,
    pub category: Option<ItemCategory>,
    #[serde(default)]
    pub cost: u32,
    #[serde(default)]
    pub effect: String,
    pub sprite: Option<String>,
    pub gen1_data: Option<RemoteItemGenData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteItemGenData {
    pub heal_amount: Option<u32>,
    #[serde(default)]
    pub usable_in_battle: bool,
    pub generation: Option<u8>,
}

impl RemoteItem {
    pub fn to_entry(&self) -> CatalogEntry {
        let gen_data = self.gen1_data.as_ref();
        CatalogEntry {
            id: self.id,
            name: self.name.clone(),
            entity: EntityKind::Item(ItemPayload {
                category: self.category.unwrap_or(ItemCategory::Other),
                cost: self.cost,
                effect: self.effect.clone(),
                sprite: self.sprite.clone(),
                heal_amount: gen_data.and_then(|g| g.heal_amount),
                usable_in_battle: gen_data.map(|g| g.usable_in_battle).unwrap_or(false),
                generation: gen_data.and_then(|g| g.generation).unwrap_or(1),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_creature_page() {
        let json = r#"{"pokemon":[{"id":25,"name":"pikachu","types":["electric"],"base_stats":{"hp":35,"attack":55,"defense":40,"special":50,"speed":90},"sprites":{"front_default":"https://img/25.png","back_default":null,"front_shiny":null,"back_shiny":null},"moves":["thunderbolt","thunder-wave","quick-attack","thunder","surf"],"base_experience":112,"height":4,"weight":60}],"total":151,"page":1,"pages":2}"#;

        let resp: CreaturePageResponse =
            serde_json::from_str(json).expect("Failed to parse creature page JSON");
        assert_eq!(resp.pages, Some(2));
        assert_eq!(resp.total, Some(151));

        let entry = resp.pokemon[0].to_entry();
        assert_eq!(entry.id, 25);
        assert_eq!(entry.kind(), CatalogKind::Creatures);
        let creature = entry.as_creature().expect("should be a creature");
        assert_eq!(creature.base_stats.speed, 90);
        assert!(creature.can_learn("surf"));
        assert!(!creature.can_learn("fly"));
        assert_eq!(creature.sprites.front_default.as_deref(), Some("https://img/25.png"));
    }

    #[test]
    fn test_parse_item_page_without_pages() {
        let json = r#"{"items":[{"id":17,"name":"potion","category":"healing","cost":300,"effect":"Restores 20 HP.","sprite":null,"gen1_data":{"heal_amount":20,"usable_in_battle":true,"generation":1}},{"id":80,"name":"poke-doll","category":"mystery","cost":1000,"effect":"","sprite":null,"gen1_data":null}],"total":2}"#;

        let resp: ItemPageResponse =
            serde_json::from_str(json).expect("Failed to parse item page JSON");
        assert_eq!(resp.pages, None);

        let potion = resp.items[0].to_entry();
        let payload = potion.as_item().expect("should be an item");
        assert_eq!(payload.category, ItemCategory::Healing);
        assert_eq!(payload.heal_amount, Some(20));
        assert!(payload.usable_in_battle);

        let doll = resp.items[1].to_entry();
        let payload = doll.as_item().expect("should be an item");
        assert_eq!(payload.category, ItemCategory::Other);
        assert!(!payload.usable_in_battle);
        assert_eq!(payload.generation, 1);
    }

    #[test]
    fn test_entity_kind_is_tagged_in_storage() {
        let entry = CatalogEntry {
            id: 1,
            name: "bulbasaur".to_string(),
            entity: EntityKind::Creature(CreaturePayload::default()),
        };
        let value = serde_json::to_value(&entry).expect("serialize entry");
        assert_eq!(value["entity"]["kind"], "creature");
        assert_eq!(entry.key(), "1");
    }

    #[test]
    fn test_catalog_kind_parse() {
        assert_eq!(CatalogKind::parse("Items"), Some(CatalogKind::Items));
        assert_eq!(CatalogKind::parse("creature"), Some(CatalogKind::Creatures));
        assert_eq!(CatalogKind::parse("moves"), None);
    }
}
