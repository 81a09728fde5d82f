// Library contract: the tutorial monster survives disk and verification.
use flatbuffers::FlatBufferBuilder;
use monsterbuf::api::{
    ErrorKind, Framing, MappedBuffer, MonsterRecord, VerifyLimits, build_sample, check_sample,
    decode, schema, write_buffer,
};

#[test]
fn sample_survives_a_trip_through_a_file() {
    let mut fbb = FlatBufferBuilder::new();
    build_sample(&mut fbb);

    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("orc.bin");
    write_buffer(&path, fbb.finished_data()).expect("write");

    let mapped = MappedBuffer::open(&path).expect("open");
    let monster = decode(mapped.bytes(), Framing::Plain, VerifyLimits::default()).expect("decode");
    let report = check_sample(&monster);
    assert!(report.is_ok(), "{report:?}");
    assert_eq!(MonsterRecord::unpack(&monster), MonsterRecord::sample());
}

#[test]
fn monster_without_equipment_fails_checks_cleanly() {
    let mut fbb = FlatBufferBuilder::new();
    let monster = schema::Monster::create(
        &mut fbb,
        &schema::MonsterArgs {
            hp: 80,
            ..Default::default()
        },
    );
    schema::finish_monster_buffer(&mut fbb, monster);

    let monster = decode(fbb.finished_data(), Framing::Plain, VerifyLimits::default())
        .expect("decode");
    assert_eq!(monster.equipped_type(), schema::Equipment::NONE);
    assert!(monster.equipped_as_weapon().is_none());
    assert!(!check_sample(&monster).is_ok());
}

#[test]
fn every_single_byte_truncation_is_rejected_or_readable() {
    let mut fbb = FlatBufferBuilder::new();
    build_sample(&mut fbb);
    let bytes = fbb.finished_data();

    for cut in 0..bytes.len() {
        match decode(&bytes[..cut], Framing::Plain, VerifyLimits::default()) {
            Ok(monster) => {
                let _ = MonsterRecord::unpack(&monster);
            }
            Err(err) => assert_eq!(err.kind(), ErrorKind::Corrupt),
        }
    }
}
