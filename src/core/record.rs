//! Purpose: Owned, serde-friendly mirror of the `Monster` schema.
//! Exports: `MonsterRecord`, `WeaponRecord`, `Vec3Record`, `ColorName`.
//! Role: Bridge between JSON (human input/output) and FlatBuffers (wire bytes).
//! Invariants: `pack` followed by `unpack` preserves every field this model carries,
//! except an unknown `equipped` variant, whose table this schema cannot describe.
//! Invariants: An equipped weapon equal to an entry in `weapons` shares that entry's table.
use flatbuffers::{FlatBufferBuilder, WIPOffset};
use serde::{Deserialize, Serialize};

use crate::core::error::{Error, ErrorKind};
use crate::core::schema::{Color, Equipment, Monster, MonsterArgs, Vec3, Weapon, WeaponArgs};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vec3Record {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<&Vec3> for Vec3Record {
    fn from(value: &Vec3) -> Self {
        Self {
            x: value.x(),
            y: value.y(),
            z: value.z(),
        }
    }
}

impl From<Vec3Record> for Vec3 {
    fn from(value: Vec3Record) -> Self {
        Vec3::new(value.x, value.y, value.z)
    }
}

/// A `Color` by name. Values written by a newer schema stay as their raw number.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum ColorName {
    Red,
    Green,
    #[default]
    Blue,
    #[serde(untagged)]
    Unknown(i8),
}

impl From<ColorName> for Color {
    fn from(value: ColorName) -> Self {
        match value {
            ColorName::Red => Color::Red,
            ColorName::Green => Color::Green,
            ColorName::Blue => Color::Blue,
            ColorName::Unknown(raw) => Color(raw),
        }
    }
}

impl From<Color> for ColorName {
    fn from(value: Color) -> Self {
        match value {
            Color::Red => ColorName::Red,
            Color::Green => ColorName::Green,
            Color::Blue => ColorName::Blue,
            other => ColorName::Unknown(other.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeaponRecord {
    pub name: String,
    #[serde(default)]
    pub damage: i16,
}

fn default_mana() -> i16 {
    Monster::DEFAULT_MANA
}

fn default_hp() -> i16 {
    Monster::DEFAULT_HP
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonsterRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<Vec3Record>,
    #[serde(default = "default_mana")]
    pub mana: i16,
    #[serde(default = "default_hp")]
    pub hp: i16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub inventory: Vec<u8>,
    #[serde(default)]
    pub color: ColorName,
    #[serde(default)]
    pub weapons: Vec<WeaponRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipped: Option<WeaponRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<Vec3Record>,
    /// Raw `equipped_type` tag of a union variant this schema does not know.
    /// Read-only: `pack` has no table to write for it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unknown_equipment: Option<u8>,
}

impl Default for MonsterRecord {
    fn default() -> Self {
        Self {
            pos: None,
            mana: Monster::DEFAULT_MANA,
            hp: Monster::DEFAULT_HP,
            name: None,
            inventory: Vec::new(),
            color: ColorName::default(),
            weapons: Vec::new(),
            equipped: None,
            path: Vec::new(),
            unknown_equipment: None,
        }
    }
}

impl MonsterRecord {
    /// The orc from the FlatBuffers tutorial: two weapons, the axe equipped.
    pub fn sample() -> Self {
        let axe = WeaponRecord {
            name: "Axe".to_string(),
            damage: 5,
        };
        Self {
            pos: Some(Vec3Record {
                x: 1.0,
                y: 2.0,
                z: 3.0,
            }),
            mana: 150,
            hp: 80,
            name: Some("MyMonster".to_string()),
            inventory: (0..10).collect(),
            color: ColorName::Red,
            weapons: vec![
                WeaponRecord {
                    name: "Sword".to_string(),
                    damage: 3,
                },
                axe.clone(),
            ],
            equipped: Some(axe),
            path: Vec::new(),
            unknown_equipment: None,
        }
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, Error> {
        serde_json::from_slice(bytes).map_err(|err| {
            Error::new(ErrorKind::Usage)
                .with_message("invalid monster json")
                .with_hint(
                    "Expected an object like {\"name\": \"Orc\", \"hp\": 80, \"weapons\": []}.",
                )
                .with_source(err)
        })
    }

    /// Writes this monster into `fbb` and returns the unfinished root offset.
    pub fn pack<'bldr>(&self, fbb: &mut FlatBufferBuilder<'bldr>) -> WIPOffset<Monster<'bldr>> {
        // Children are serialized before the table that references them.
        let weapon_offsets = self
            .weapons
            .iter()
            .map(|weapon| pack_weapon(fbb, weapon))
            .collect::<Vec<_>>();
        let weapons =
            (!weapon_offsets.is_empty()).then(|| fbb.create_vector(weapon_offsets.as_slice()));

        let equipped = self.equipped.as_ref().map(|wanted| {
            self.weapons
                .iter()
                .position(|weapon| weapon == wanted)
                .map(|idx| weapon_offsets[idx])
                .unwrap_or_else(|| pack_weapon(fbb, wanted))
        });

        let name = self.name.as_deref().map(|name| fbb.create_string(name));
        let inventory =
            (!self.inventory.is_empty()).then(|| fbb.create_vector(self.inventory.as_slice()));
        let path = if self.path.is_empty() {
            None
        } else {
            let points = self.path.iter().copied().map(Vec3::from).collect::<Vec<_>>();
            Some(fbb.create_vector(points.as_slice()))
        };
        let pos = self.pos.map(Vec3::from);

        Monster::create(
            fbb,
            &MonsterArgs {
                pos: pos.as_ref(),
                mana: self.mana,
                hp: self.hp,
                name,
                inventory,
                color: self.color.into(),
                weapons,
                equipped_type: if equipped.is_some() {
                    Equipment::Weapon
                } else {
                    Equipment::NONE
                },
                equipped: equipped.map(|weapon| weapon.as_union_value()),
                path,
            },
        )
    }

    /// Copies a verified `Monster` view into an owned record.
    ///
    /// Enum values outside this schema are kept as raw numbers, so buffers from a
    /// newer schema still read.
    pub fn unpack(monster: &Monster<'_>) -> Self {
        let weapons: Vec<WeaponRecord> = monster
            .weapons()
            .map(|weapons| weapons.iter().map(|weapon| unpack_weapon(&weapon)).collect())
            .unwrap_or_default();
        let (equipped, unknown_equipment) = match monster.equipped_type() {
            Equipment::NONE => (None, None),
            Equipment::Weapon => (
                monster.equipped_as_weapon().map(|weapon| unpack_weapon(&weapon)),
                None,
            ),
            other => {
                tracing::debug!(tag = other.0, "unknown equipment variant kept as raw tag");
                (None, Some(other.0))
            }
        };

        Self {
            pos: monster.pos().map(Vec3Record::from),
            mana: monster.mana(),
            hp: monster.hp(),
            name: monster.name().map(str::to_string),
            inventory: monster
                .inventory()
                .map(|inv| inv.iter().collect::<Vec<u8>>())
                .unwrap_or_default(),
            color: monster.color().into(),
            weapons,
            equipped,
            path: monster
                .path()
                .map(|path| path.iter().map(Vec3Record::from).collect::<Vec<_>>())
                .unwrap_or_default(),
            unknown_equipment,
        }
    }
}

fn pack_weapon<'bldr>(
    fbb: &mut FlatBufferBuilder<'bldr>,
    weapon: &WeaponRecord,
) -> WIPOffset<Weapon<'bldr>> {
    let name = fbb.create_string(&weapon.name);
    Weapon::create(
        fbb,
        &WeaponArgs {
            name: Some(name),
            damage: weapon.damage,
        },
    )
}

fn unpack_weapon(weapon: &Weapon<'_>) -> WeaponRecord {
    WeaponRecord {
        name: weapon.name().unwrap_or_default().to_string(),
        damage: weapon.damage(),
    }
}
