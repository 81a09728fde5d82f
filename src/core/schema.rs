//! Purpose: Typed FlatBuffers bindings for `schema/monster.fbs` (`MyGame.Sample`).
//! Exports: `Color`, `Equipment`, `Vec3`, `Weapon`, `Monster`, their `*Args`/`*Builder`,
//! and root helpers (`root_as_monster*`, `finish_*monster_buffer`).
//! Role: The only module that touches raw vtable slots; everything else goes through it.
//! Invariants: Slot offsets and defaults match the schema; never renumber a slot.
//! Invariants: Read paths are only reachable from verified roots or builder-produced bytes.
//! Invariants: Fields equal to their schema default are not written by `push_slot`.
#![allow(non_upper_case_globals)]

use std::fmt;

use flatbuffers::{
    FlatBufferBuilder, ForwardsUOffset, InvalidFlatbuffer, Table, TableUnfinishedWIPOffset,
    UnionWIPOffset, VOffsetT, Vector, Verifiable, Verifier, VerifierOptions, WIPOffset,
};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Color(pub i8);

impl Color {
    pub const Red: Self = Self(0);
    pub const Green: Self = Self(1);
    pub const Blue: Self = Self(2);

    pub const ENUM_MIN: i8 = 0;
    pub const ENUM_MAX: i8 = 2;
    pub const ENUM_VALUES: &'static [Self] = &[Self::Red, Self::Green, Self::Blue];

    /// Returns the schema name of the variant, or `None` for values this build does not know.
    pub fn variant_name(self) -> Option<&'static str> {
        match self {
            Self::Red => Some("Red"),
            Self::Green => Some("Green"),
            Self::Blue => Some("Blue"),
            _ => None,
        }
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.variant_name() {
            Some(name) => f.write_str(name),
            None => f.write_fmt(format_args!("<UNKNOWN {:?}>", self.0)),
        }
    }
}

impl<'a> flatbuffers::Follow<'a> for Color {
    type Inner = Self;
    #[inline]
    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        Self(unsafe { flatbuffers::read_scalar_at::<i8>(buf, loc) })
    }
}

impl flatbuffers::Push for Color {
    type Output = Color;
    #[inline]
    unsafe fn push(&self, dst: &mut [u8], _written_len: usize) {
        unsafe { flatbuffers::emplace_scalar::<i8>(dst, self.0) };
    }
}

impl Verifiable for Color {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        i8::run_verifier(v, pos)
    }
}

impl flatbuffers::SimpleToVerifyInSlice for Color {}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Equipment(pub u8);

impl Equipment {
    pub const NONE: Self = Self(0);
    pub const Weapon: Self = Self(1);

    pub const ENUM_MIN: u8 = 0;
    pub const ENUM_MAX: u8 = 1;
    pub const ENUM_VALUES: &'static [Self] = &[Self::NONE, Self::Weapon];

    pub fn variant_name(self) -> Option<&'static str> {
        match self {
            Self::NONE => Some("NONE"),
            Self::Weapon => Some("Weapon"),
            _ => None,
        }
    }
}

impl fmt::Debug for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.variant_name() {
            Some(name) => f.write_str(name),
            None => f.write_fmt(format_args!("<UNKNOWN {:?}>", self.0)),
        }
    }
}

impl<'a> flatbuffers::Follow<'a> for Equipment {
    type Inner = Self;
    #[inline]
    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        Self(unsafe { flatbuffers::read_scalar_at::<u8>(buf, loc) })
    }
}

impl flatbuffers::Push for Equipment {
    type Output = Equipment;
    #[inline]
    unsafe fn push(&self, dst: &mut [u8], _written_len: usize) {
        unsafe { flatbuffers::emplace_scalar::<u8>(dst, self.0) };
    }
}

impl Verifiable for Equipment {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        u8::run_verifier(v, pos)
    }
}

impl flatbuffers::SimpleToVerifyInSlice for Equipment {}

/// Three little-endian `f32`s laid out inline; 12 bytes, 4-byte aligned in the buffer.
#[derive(Clone, Copy, PartialEq, Default)]
#[repr(transparent)]
pub struct Vec3(pub [u8; 12]);

impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        let mut bytes = [0u8; 12];
        bytes[0..4].copy_from_slice(&x.to_le_bytes());
        bytes[4..8].copy_from_slice(&y.to_le_bytes());
        bytes[8..12].copy_from_slice(&z.to_le_bytes());
        Self(bytes)
    }

    pub fn x(&self) -> f32 {
        self.component(0)
    }

    pub fn y(&self) -> f32 {
        self.component(4)
    }

    pub fn z(&self) -> f32 {
        self.component(8)
    }

    fn component(&self, offset: usize) -> f32 {
        let b = &self.0[offset..offset + 4];
        f32::from_le_bytes([b[0], b[1], b[2], b[3]])
    }
}

impl fmt::Debug for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vec3")
            .field("x", &self.x())
            .field("y", &self.y())
            .field("z", &self.z())
            .finish()
    }
}

impl flatbuffers::SimpleToVerifyInSlice for Vec3 {}

impl<'a> flatbuffers::Follow<'a> for Vec3 {
    type Inner = &'a Vec3;
    #[inline]
    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        unsafe { flatbuffers::follow_cast_ref::<Vec3>(buf, loc) }
    }
}

impl<'a> flatbuffers::Follow<'a> for &'a Vec3 {
    type Inner = &'a Vec3;
    #[inline]
    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        unsafe { flatbuffers::follow_cast_ref::<Vec3>(buf, loc) }
    }
}

impl flatbuffers::Push for Vec3 {
    type Output = Vec3;
    #[inline]
    unsafe fn push(&self, dst: &mut [u8], _written_len: usize) {
        dst.copy_from_slice(&self.0);
    }
    #[inline]
    fn alignment() -> flatbuffers::PushAlignment {
        flatbuffers::PushAlignment::new(4)
    }
}

impl Verifiable for Vec3 {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.in_buffer::<Self>(pos)
    }
}

#[derive(Copy, Clone, PartialEq)]
pub struct Weapon<'a> {
    pub _tab: Table<'a>,
}

impl<'a> flatbuffers::Follow<'a> for Weapon<'a> {
    type Inner = Weapon<'a>;
    #[inline]
    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        Self {
            _tab: unsafe { Table::new(buf, loc) },
        }
    }
}

impl<'a> Weapon<'a> {
    pub const VT_NAME: VOffsetT = 4;
    pub const VT_DAMAGE: VOffsetT = 6;

    /// # Safety
    /// `table` must point at a `Weapon` table inside a verified buffer.
    #[inline]
    pub unsafe fn init_from_table(table: Table<'a>) -> Self {
        Weapon { _tab: table }
    }

    pub fn create<'bldr: 'args, 'args: 'mut_bldr, 'mut_bldr>(
        fbb: &'mut_bldr mut FlatBufferBuilder<'bldr>,
        args: &'args WeaponArgs<'args>,
    ) -> WIPOffset<Weapon<'bldr>> {
        let mut builder = WeaponBuilder::new(fbb);
        if let Some(name) = args.name {
            builder.add_name(name);
        }
        builder.add_damage(args.damage);
        builder.finish()
    }

    #[inline]
    pub fn name(&self) -> Option<&'a str> {
        // Slot holds an offset to a string written by the builder.
        unsafe { self._tab.get::<ForwardsUOffset<&str>>(Weapon::VT_NAME, None) }
    }

    #[inline]
    pub fn damage(&self) -> i16 {
        unsafe { self._tab.get::<i16>(Weapon::VT_DAMAGE, Some(0)) }.unwrap_or(0)
    }
}

impl Verifiable for Weapon<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<ForwardsUOffset<&str>>("name", Self::VT_NAME, false)?
            .visit_field::<i16>("damage", Self::VT_DAMAGE, false)?
            .finish();
        Ok(())
    }
}

pub struct WeaponArgs<'a> {
    pub name: Option<WIPOffset<&'a str>>,
    pub damage: i16,
}

impl Default for WeaponArgs<'_> {
    #[inline]
    fn default() -> Self {
        WeaponArgs {
            name: None,
            damage: 0,
        }
    }
}

pub struct WeaponBuilder<'a: 'b, 'b> {
    fbb: &'b mut FlatBufferBuilder<'a>,
    start: WIPOffset<TableUnfinishedWIPOffset>,
}

impl<'a: 'b, 'b> WeaponBuilder<'a, 'b> {
    #[inline]
    pub fn new(fbb: &'b mut FlatBufferBuilder<'a>) -> WeaponBuilder<'a, 'b> {
        let start = fbb.start_table();
        WeaponBuilder { fbb, start }
    }

    #[inline]
    pub fn add_name(&mut self, name: WIPOffset<&'b str>) {
        self.fbb.push_slot_always::<WIPOffset<_>>(Weapon::VT_NAME, name);
    }

    #[inline]
    pub fn add_damage(&mut self, damage: i16) {
        self.fbb.push_slot::<i16>(Weapon::VT_DAMAGE, damage, 0);
    }

    #[inline]
    pub fn finish(self) -> WIPOffset<Weapon<'a>> {
        let o = self.fbb.end_table(self.start);
        WIPOffset::new(o.value())
    }
}

impl fmt::Debug for Weapon<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Weapon")
            .field("name", &self.name())
            .field("damage", &self.damage())
            .finish()
    }
}

#[derive(Copy, Clone, PartialEq)]
pub struct Monster<'a> {
    pub _tab: Table<'a>,
}

impl<'a> flatbuffers::Follow<'a> for Monster<'a> {
    type Inner = Monster<'a>;
    #[inline]
    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        Self {
            _tab: unsafe { Table::new(buf, loc) },
        }
    }
}

impl<'a> Monster<'a> {
    pub const VT_POS: VOffsetT = 4;
    pub const VT_MANA: VOffsetT = 6;
    pub const VT_HP: VOffsetT = 8;
    pub const VT_NAME: VOffsetT = 10;
    // 12 belonged to `friendly`, deprecated; the slot stays reserved.
    pub const VT_INVENTORY: VOffsetT = 14;
    pub const VT_COLOR: VOffsetT = 16;
    pub const VT_WEAPONS: VOffsetT = 18;
    pub const VT_EQUIPPED_TYPE: VOffsetT = 20;
    pub const VT_EQUIPPED: VOffsetT = 22;
    pub const VT_PATH: VOffsetT = 24;

    pub const DEFAULT_MANA: i16 = 150;
    pub const DEFAULT_HP: i16 = 100;
    pub const DEFAULT_COLOR: Color = Color::Blue;

    /// # Safety
    /// `table` must point at a `Monster` table inside a verified buffer.
    #[inline]
    pub unsafe fn init_from_table(table: Table<'a>) -> Self {
        Monster { _tab: table }
    }

    pub fn create<'bldr: 'args, 'args: 'mut_bldr, 'mut_bldr>(
        fbb: &'mut_bldr mut FlatBufferBuilder<'bldr>,
        args: &'args MonsterArgs<'args>,
    ) -> WIPOffset<Monster<'bldr>> {
        let mut builder = MonsterBuilder::new(fbb);
        // Wider fields first so the table packs without padding holes.
        if let Some(path) = args.path {
            builder.add_path(path);
        }
        if let Some(equipped) = args.equipped {
            builder.add_equipped(equipped);
        }
        if let Some(weapons) = args.weapons {
            builder.add_weapons(weapons);
        }
        if let Some(inventory) = args.inventory {
            builder.add_inventory(inventory);
        }
        if let Some(name) = args.name {
            builder.add_name(name);
        }
        if let Some(pos) = args.pos {
            builder.add_pos(pos);
        }
        builder.add_hp(args.hp);
        builder.add_mana(args.mana);
        builder.add_equipped_type(args.equipped_type);
        builder.add_color(args.color);
        builder.finish()
    }

    #[inline]
    pub fn pos(&self) -> Option<&'a Vec3> {
        unsafe { self._tab.get::<Vec3>(Monster::VT_POS, None) }
    }

    #[inline]
    pub fn mana(&self) -> i16 {
        unsafe { self._tab.get::<i16>(Monster::VT_MANA, Some(Self::DEFAULT_MANA)) }
            .unwrap_or(Self::DEFAULT_MANA)
    }

    #[inline]
    pub fn hp(&self) -> i16 {
        unsafe { self._tab.get::<i16>(Monster::VT_HP, Some(Self::DEFAULT_HP)) }
            .unwrap_or(Self::DEFAULT_HP)
    }

    #[inline]
    pub fn name(&self) -> Option<&'a str> {
        unsafe { self._tab.get::<ForwardsUOffset<&str>>(Monster::VT_NAME, None) }
    }

    #[inline]
    pub fn inventory(&self) -> Option<Vector<'a, u8>> {
        unsafe { self._tab.get::<ForwardsUOffset<Vector<'a, u8>>>(Monster::VT_INVENTORY, None) }
    }

    #[inline]
    pub fn color(&self) -> Color {
        unsafe { self._tab.get::<Color>(Monster::VT_COLOR, Some(Self::DEFAULT_COLOR)) }
            .unwrap_or(Self::DEFAULT_COLOR)
    }

    #[inline]
    pub fn weapons(&self) -> Option<Vector<'a, ForwardsUOffset<Weapon<'a>>>> {
        unsafe {
            self._tab.get::<ForwardsUOffset<Vector<'a, ForwardsUOffset<Weapon>>>>(
                Monster::VT_WEAPONS,
                None,
            )
        }
    }

    #[inline]
    pub fn equipped_type(&self) -> Equipment {
        unsafe { self._tab.get::<Equipment>(Monster::VT_EQUIPPED_TYPE, Some(Equipment::NONE)) }
            .unwrap_or(Equipment::NONE)
    }

    #[inline]
    pub fn equipped(&self) -> Option<Table<'a>> {
        unsafe { self._tab.get::<ForwardsUOffset<Table<'a>>>(Monster::VT_EQUIPPED, None) }
    }

    #[inline]
    pub fn path(&self) -> Option<Vector<'a, Vec3>> {
        unsafe { self._tab.get::<ForwardsUOffset<Vector<'a, Vec3>>>(Monster::VT_PATH, None) }
    }

    /// The equipped union value viewed as a `Weapon`, when the tag says so.
    pub fn equipped_as_weapon(&self) -> Option<Weapon<'a>> {
        if self.equipped_type() != Equipment::Weapon {
            return None;
        }
        // The tag was checked above and the verifier checked the variant table.
        self.equipped().map(|table| unsafe { Weapon::init_from_table(table) })
    }
}

impl Verifiable for Monster<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<Vec3>("pos", Self::VT_POS, false)?
            .visit_field::<i16>("mana", Self::VT_MANA, false)?
            .visit_field::<i16>("hp", Self::VT_HP, false)?
            .visit_field::<ForwardsUOffset<&str>>("name", Self::VT_NAME, false)?
            .visit_field::<ForwardsUOffset<Vector<'_, u8>>>(
                "inventory",
                Self::VT_INVENTORY,
                false,
            )?
            .visit_field::<Color>("color", Self::VT_COLOR, false)?
            .visit_field::<ForwardsUOffset<Vector<'_, ForwardsUOffset<Weapon>>>>(
                "weapons",
                Self::VT_WEAPONS,
                false,
            )?
            .visit_union::<Equipment, _>(
                "equipped_type",
                Self::VT_EQUIPPED_TYPE,
                "equipped",
                Self::VT_EQUIPPED,
                false,
                |key, v, pos| match key {
                    Equipment::Weapon => v
                        .verify_union_variant::<ForwardsUOffset<Weapon>>("Equipment::Weapon", pos),
                    _ => Ok(()),
                },
            )?
            .visit_field::<ForwardsUOffset<Vector<'_, Vec3>>>("path", Self::VT_PATH, false)?
            .finish();
        Ok(())
    }
}

pub struct MonsterArgs<'a> {
    pub pos: Option<&'a Vec3>,
    pub mana: i16,
    pub hp: i16,
    pub name: Option<WIPOffset<&'a str>>,
    pub inventory: Option<WIPOffset<Vector<'a, u8>>>,
    pub color: Color,
    pub weapons: Option<WIPOffset<Vector<'a, ForwardsUOffset<Weapon<'a>>>>>,
    pub equipped_type: Equipment,
    pub equipped: Option<WIPOffset<UnionWIPOffset>>,
    pub path: Option<WIPOffset<Vector<'a, Vec3>>>,
}

impl Default for MonsterArgs<'_> {
    #[inline]
    fn default() -> Self {
        MonsterArgs {
            pos: None,
            mana: Monster::DEFAULT_MANA,
            hp: Monster::DEFAULT_HP,
            name: None,
            inventory: None,
            color: Monster::DEFAULT_COLOR,
            weapons: None,
            equipped_type: Equipment::NONE,
            equipped: None,
            path: None,
        }
    }
}

pub struct MonsterBuilder<'a: 'b, 'b> {
    fbb: &'b mut FlatBufferBuilder<'a>,
    start: WIPOffset<TableUnfinishedWIPOffset>,
}

impl<'a: 'b, 'b> MonsterBuilder<'a, 'b> {
    #[inline]
    pub fn new(fbb: &'b mut FlatBufferBuilder<'a>) -> MonsterBuilder<'a, 'b> {
        let start = fbb.start_table();
        MonsterBuilder { fbb, start }
    }

    #[inline]
    pub fn add_pos(&mut self, pos: &Vec3) {
        self.fbb.push_slot_always::<Vec3>(Monster::VT_POS, *pos);
    }

    #[inline]
    pub fn add_mana(&mut self, mana: i16) {
        self.fbb.push_slot::<i16>(Monster::VT_MANA, mana, Monster::DEFAULT_MANA);
    }

    #[inline]
    pub fn add_hp(&mut self, hp: i16) {
        self.fbb.push_slot::<i16>(Monster::VT_HP, hp, Monster::DEFAULT_HP);
    }

    #[inline]
    pub fn add_name(&mut self, name: WIPOffset<&'b str>) {
        self.fbb.push_slot_always::<WIPOffset<_>>(Monster::VT_NAME, name);
    }

    #[inline]
    pub fn add_inventory(&mut self, inventory: WIPOffset<Vector<'b, u8>>) {
        self.fbb.push_slot_always::<WIPOffset<_>>(Monster::VT_INVENTORY, inventory);
    }

    #[inline]
    pub fn add_color(&mut self, color: Color) {
        self.fbb.push_slot::<Color>(Monster::VT_COLOR, color, Monster::DEFAULT_COLOR);
    }

    #[inline]
    pub fn add_weapons(&mut self, weapons: WIPOffset<Vector<'b, ForwardsUOffset<Weapon<'b>>>>) {
        self.fbb.push_slot_always::<WIPOffset<_>>(Monster::VT_WEAPONS, weapons);
    }

    #[inline]
    pub fn add_equipped_type(&mut self, equipped_type: Equipment) {
        self.fbb.push_slot::<Equipment>(Monster::VT_EQUIPPED_TYPE, equipped_type, Equipment::NONE);
    }

    #[inline]
    pub fn add_equipped(&mut self, equipped: WIPOffset<UnionWIPOffset>) {
        self.fbb.push_slot_always::<WIPOffset<_>>(Monster::VT_EQUIPPED, equipped);
    }

    #[inline]
    pub fn add_path(&mut self, path: WIPOffset<Vector<'b, Vec3>>) {
        self.fbb.push_slot_always::<WIPOffset<_>>(Monster::VT_PATH, path);
    }

    #[inline]
    pub fn finish(self) -> WIPOffset<Monster<'a>> {
        let o = self.fbb.end_table(self.start);
        WIPOffset::new(o.value())
    }
}

impl fmt::Debug for Monster<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ds = f.debug_struct("Monster");
        ds.field("pos", &self.pos());
        ds.field("mana", &self.mana());
        ds.field("hp", &self.hp());
        ds.field("name", &self.name());
        ds.field("inventory", &self.inventory().map(|inv| inv.len()));
        ds.field("color", &self.color());
        ds.field("weapons", &self.weapons().map(|w| w.len()));
        ds.field("equipped_type", &self.equipped_type());
        match self.equipped_as_weapon() {
            Some(weapon) => ds.field("equipped", &weapon),
            None => ds.field("equipped", &Option::<()>::None),
        };
        ds.field("path", &self.path().map(|p| p.len()));
        ds.finish()
    }
}

/// Verifies `buf` with default limits and returns the root `Monster`.
#[inline]
pub fn root_as_monster(buf: &[u8]) -> Result<Monster<'_>, InvalidFlatbuffer> {
    flatbuffers::root::<Monster>(buf)
}

#[inline]
pub fn root_as_monster_with_opts<'b, 'o>(
    opts: &'o VerifierOptions,
    buf: &'b [u8],
) -> Result<Monster<'b>, InvalidFlatbuffer> {
    flatbuffers::root_with_opts::<Monster<'b>>(opts, buf)
}

#[inline]
pub fn size_prefixed_root_as_monster(buf: &[u8]) -> Result<Monster<'_>, InvalidFlatbuffer> {
    flatbuffers::size_prefixed_root::<Monster>(buf)
}

#[inline]
pub fn size_prefixed_root_as_monster_with_opts<'b, 'o>(
    opts: &'o VerifierOptions,
    buf: &'b [u8],
) -> Result<Monster<'b>, InvalidFlatbuffer> {
    flatbuffers::size_prefixed_root_with_opts::<Monster<'b>>(opts, buf)
}

#[inline]
pub fn finish_monster_buffer<'a>(fbb: &mut FlatBufferBuilder<'a>, root: WIPOffset<Monster<'a>>) {
    fbb.finish(root, None);
}

#[inline]
pub fn finish_size_prefixed_monster_buffer<'a>(
    fbb: &mut FlatBufferBuilder<'a>,
    root: WIPOffset<Monster<'a>>,
) {
    fbb.finish_size_prefixed(root, None);
}
