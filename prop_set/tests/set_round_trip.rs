//! Cross-module scenarios: sets built through the public API, merged,
//! and pushed through the binary codec.

use proptest::prelude::*;

use prop_set::PropertySet;
use prop_types::{fourcc, Flags, PropertyType, Verbosity};
use prop_value::RefTarget;
use std::ptr::NonNull;

#[test]
fn schema_then_refresh_workflow() {
    // sender and receiver agree on the schema up front; later snapshots
    // travel values-only
    let mut sender = PropertySet::new();
    sender.create_property("speed", fourcc(*b"SPED")).set_float(0.0);
    sender.create_property("gear", fourcc(*b"GEAR")).set_int(1);
    sender
        .create_property("mode", fourcc(*b"MODE"))
        .set_enum_strings("eco,normal,sport");

    let mut schema = vec![0u8; sender.serialized_size(Verbosity::Verbose).unwrap()];
    sender.serialize_into(Verbosity::Verbose, &mut schema).unwrap();

    let mut receiver = PropertySet::new();
    receiver.deserialize(&schema).unwrap();
    assert_eq!(receiver.property_by_name("gear").unwrap().as_int(), 1);

    sender.modify_by_id(fourcc(*b"SPED"), |p| p.set_float(88.5));
    sender.modify_by_id(fourcc(*b"GEAR"), |p| p.set_int(4));
    sender.modify_by_id(fourcc(*b"MODE"), |p| {
        p.set_enum_val(2);
    });

    let mut snapshot = vec![0u8; sender.serialized_size(Verbosity::ValuesOnly).unwrap()];
    sender
        .serialize_into(Verbosity::ValuesOnly, &mut snapshot)
        .unwrap();
    assert!(snapshot.len() < schema.len());

    receiver.deserialize(&snapshot).unwrap();
    assert_eq!(receiver.property_by_name("speed").unwrap().as_float(), 88.5);
    assert_eq!(receiver.property_by_name("gear").unwrap().as_int(), 4);
    assert_eq!(receiver.property_by_name("mode").unwrap().as_int(), 2);
}

#[test]
fn reference_properties_publish_live_state() {
    let mut altitude = 1200.5f32;
    let mut engaged = true;

    let mut panel = PropertySet::new();
    panel.create_reference_property(
        "altitude",
        fourcc(*b"ALTI"),
        RefTarget::Float(NonNull::from(&mut altitude)),
    );
    panel.create_reference_property(
        "autopilot",
        fourcc(*b"AUTO"),
        RefTarget::Bool(NonNull::from(&mut engaged)),
    );

    // a reference property is locked to its target's type
    panel.modify_by_id(fourcc(*b"ALTI"), |p| p.set_int(0));
    assert_eq!(
        panel.property_by_id(fourcc(*b"ALTI")).unwrap().property_type(),
        PropertyType::Float
    );
    assert_eq!(
        panel.property_by_id(fourcc(*b"ALTI")).unwrap().as_float(),
        1200.5
    );

    // serialization captures the referenced state at call time
    let mut buf = vec![0u8; panel.serialized_size(Verbosity::Terse).unwrap()];
    panel.serialize_into(Verbosity::Terse, &mut buf).unwrap();

    let mut copy = PropertySet::new();
    copy.deserialize(&buf).unwrap();
    let alti = copy.property_by_id(fourcc(*b"ALTI")).unwrap();
    assert!(!alti.is_reference());
    assert_eq!(alti.as_float(), 1200.5);

    // writes through the set reach the backing variables
    panel.modify_by_id(fourcc(*b"AUTO"), |p| p.set_bool(false));
    drop(panel);
    assert!(!engaged);
    let _ = altitude;
}

#[test]
fn append_overwrite_flags_preserves_storage_bits() {
    let mut defaults = PropertySet::new();
    defaults.create_property("volume", 1).set_int(50);
    defaults.modify_by_id(1, |p| p.flags_mut().set(Flags::HIDDEN));

    let mut backing = 10i64;
    let mut live = PropertySet::new();
    live.create_reference_property("volume", 1, RefTarget::Int(NonNull::from(&mut backing)));

    live.append_property_set(&defaults, true);
    let p = live.property_by_id(1).unwrap();
    assert!(p.flags().is_set(Flags::HIDDEN));
    assert!(p.flags().is_set(Flags::REFERENCE));
    assert!(p.is_reference());
    drop(live);
    assert_eq!(backing, 50);
}

fn arb_small_set() -> impl Strategy<Value = Vec<(u32, i64)>> {
    prop::collection::vec((any::<u32>(), any::<i64>()), 0..20).prop_map(|mut entries| {
        entries.sort_by_key(|e| e.0);
        entries.dedup_by_key(|e| e.0);
        entries
    })
}

proptest! {
    #[test]
    fn prop_set_round_trip_preserves_count_and_values(entries in arb_small_set(), mode_sel in 0u8..3) {
        let mode = match mode_sel {
            0 => Verbosity::ValuesOnly,
            1 => Verbosity::Terse,
            _ => Verbosity::Verbose,
        };

        let mut src = PropertySet::new();
        for (id, v) in &entries {
            src.create_property(&format!("p{id}"), *id).set_int(*v);
        }

        let size = src.serialized_size(mode).unwrap();
        let mut buf = vec![0u8; size];
        prop_assert_eq!(src.serialize_into(mode, &mut buf).unwrap(), size);

        let mut dst = PropertySet::new();
        prop_assert_eq!(dst.deserialize(&buf).unwrap(), size);
        prop_assert_eq!(dst.property_count(), entries.len());
        for (id, v) in &entries {
            prop_assert_eq!(dst.property_by_id(*id).unwrap().as_int(), *v);
        }
    }

    #[test]
    fn prop_deserialize_is_a_merge(a in arb_small_set(), b in arb_small_set()) {
        let mut first = PropertySet::new();
        for (id, v) in &a {
            first.create_property("", *id).set_int(*v);
        }
        let mut second = PropertySet::new();
        for (id, v) in &b {
            second.create_property("", *id).set_int(*v);
        }

        let mut buf = vec![0u8; second.serialized_size(Verbosity::Terse).unwrap()];
        second.serialize_into(Verbosity::Terse, &mut buf).unwrap();
        first.deserialize(&buf).unwrap();

        // ids in `b` take b's value, ids only in `a` keep a's value
        for (id, v) in &b {
            prop_assert_eq!(first.property_by_id(*id).unwrap().as_int(), *v);
        }
        for (id, v) in &a {
            if !b.iter().any(|(bid, _)| bid == id) {
                prop_assert_eq!(first.property_by_id(*id).unwrap().as_int(), *v);
            }
        }
    }
}
