//! Purpose: The tutorial orc: build it field by field, then read every field back.
//! Exports: `build_sample`, `check_sample`, `summary_lines`, `SampleReport` and its parts.
//! Role: Canonical end-to-end exercise of the schema bindings.
//! Invariants: Every expectation is evaluated; a report lists all failures, not just the first.
//! Invariants: Checks run in release builds too; nothing here relies on `debug_assert!`.
use flatbuffers::FlatBufferBuilder;
use serde::Serialize;

use crate::core::schema::{
    Color, Equipment, Monster, MonsterArgs, Vec3, Weapon, WeaponArgs, finish_monster_buffer,
};

pub const EXPECTED_NAME: &str = "MyMonster";
pub const EXPECTED_HP: i16 = 80;
pub const EXPECTED_MANA: i16 = 150;
pub const EXPECTED_WEAPONS: [(&str, i16); 2] = [("Sword", 3), ("Axe", 5)];

/// Serializes the orc into `fbb` and finishes the buffer.
pub fn build_sample(fbb: &mut FlatBufferBuilder<'_>) {
    let weapon_one_name = fbb.create_string("Sword");
    let weapon_two_name = fbb.create_string("Axe");

    let sword = Weapon::create(
        fbb,
        &WeaponArgs {
            name: Some(weapon_one_name),
            damage: 3,
        },
    );
    let axe = Weapon::create(
        fbb,
        &WeaponArgs {
            name: Some(weapon_two_name),
            damage: 5,
        },
    );
    let weapons = fbb.create_vector(&[sword, axe]);

    let position = Vec3::new(1.0, 2.0, 3.0);
    let name = fbb.create_string(EXPECTED_NAME);
    let inventory = fbb.create_vector(&[0u8, 1, 2, 3, 4, 5, 6, 7, 8, 9]);

    let orc = Monster::create(
        fbb,
        &MonsterArgs {
            pos: Some(&position),
            mana: EXPECTED_MANA,
            hp: EXPECTED_HP,
            name: Some(name),
            inventory: Some(inventory),
            color: Color::Red,
            weapons: Some(weapons),
            equipped_type: Equipment::Weapon,
            equipped: Some(axe.as_union_value()),
            path: None,
        },
    );
    finish_monster_buffer(fbb, orc);
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleStatus {
    Ok,
    Mismatch,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SampleIssue {
    pub check: String,
    pub expected: String,
    pub actual: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SampleReport {
    pub status: SampleStatus,
    pub checks_run: usize,
    pub issues: Vec<SampleIssue>,
}

impl SampleReport {
    pub fn is_ok(&self) -> bool {
        self.status == SampleStatus::Ok
    }
}

struct Checker {
    checks_run: usize,
    issues: Vec<SampleIssue>,
}

impl Checker {
    fn new() -> Self {
        Self {
            checks_run: 0,
            issues: Vec::new(),
        }
    }

    fn expect<T>(&mut self, check: &str, expected: T, actual: T)
    where
        T: PartialEq + std::fmt::Debug,
    {
        self.checks_run += 1;
        if expected != actual {
            self.issues.push(SampleIssue {
                check: check.to_string(),
                expected: format!("{expected:?}"),
                actual: format!("{actual:?}"),
            });
        }
    }

    fn finish(self) -> SampleReport {
        let status = if self.issues.is_empty() {
            SampleStatus::Ok
        } else {
            SampleStatus::Mismatch
        };
        SampleReport {
            status,
            checks_run: self.checks_run,
            issues: self.issues,
        }
    }
}

/// Reads `monster` back and compares it with what `build_sample` wrote.
pub fn check_sample(monster: &Monster<'_>) -> SampleReport {
    let mut checker = Checker::new();

    checker.expect("hp", EXPECTED_HP, monster.hp());
    // mana equals the schema default, so it is absent from the buffer.
    checker.expect("mana", EXPECTED_MANA, monster.mana());
    checker.expect("name", Some(EXPECTED_NAME), monster.name());

    let pos = monster.pos();
    checker.expect("pos.present", true, pos.is_some());
    if let Some(pos) = pos {
        checker.expect("pos.z", 3.0f32, pos.z());
    }

    let inventory = monster.inventory();
    checker.expect("inventory.present", true, inventory.is_some());
    if let Some(inventory) = inventory {
        checker.expect("inventory.len", 10, inventory.len());
        if inventory.len() > 9 {
            checker.expect("inventory[9]", 9u8, inventory.get(9));
        }
    }

    match monster.weapons() {
        Some(weapons) => {
            checker.expect("weapons.len", EXPECTED_WEAPONS.len(), weapons.len());
            for (idx, weapon) in weapons.iter().enumerate() {
                let Some((name, damage)) = EXPECTED_WEAPONS.get(idx) else {
                    break;
                };
                checker.expect(&format!("weapons[{idx}].name"), Some(*name), weapon.name());
                checker.expect(&format!("weapons[{idx}].damage"), *damage, weapon.damage());
            }
        }
        None => checker.expect("weapons.present", true, false),
    }

    checker.expect("equipped_type", Equipment::Weapon, monster.equipped_type());
    match monster.equipped_as_weapon() {
        Some(equipped) => {
            checker.expect("equipped.name", Some("Axe"), equipped.name());
            checker.expect("equipped.damage", 5, equipped.damage());
        }
        None => checker.expect("equipped.present", true, false),
    }

    checker.finish()
}

/// Human summary printed after decoding: hp, mana, name and position.
pub fn summary_lines(monster: &Monster<'_>) -> Vec<String> {
    let mut lines = vec![
        format!("hp: {}", monster.hp()),
        format!("mana: {}", monster.mana()),
        format!("name: {}", monster.name().unwrap_or("<none>")),
    ];
    match monster.pos() {
        Some(pos) => lines.push(format!("pos: {}, {}, {}", pos.x(), pos.y(), pos.z())),
        None => lines.push("pos: <none>".to_string()),
    }
    lines
}
