use proptest::prelude::*;
use proteus_model::vocab::NO_TARGETS_LIMIT;
use proteus_model::{
    EnumProperty, IntegerProperty, Measurement, Property, PropertyBase, PropertyFactory,
    PropertyKind, TraceProperty, TraceSettings, UnitProperty,
};

fn token() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

proptest! {
    #[test]
    fn prop_trace_never_exceeds_limit(
        targets in proptest::collection::vec("[a-z0-9]{0,6}", 0..20),
        max in -5i64..10
    ) {
        let trace = TraceProperty::new(
            PropertyBase::default(),
            targets.clone(),
            TraceSettings::new().with_max_targets_number(max),
        );

        let non_empty: Vec<String> = targets.into_iter().filter(|t| !t.is_empty()).collect();
        if max > 0 {
            prop_assert_eq!(trace.max_targets_number(), max);
            let limit = usize::try_from(max).unwrap();
            prop_assert!(trace.value().len() <= limit);
            prop_assert_eq!(trace.value().as_slice(), &non_empty[..non_empty.len().min(limit)]);
        } else {
            prop_assert_eq!(trace.max_targets_number(), NO_TARGETS_LIMIT);
            prop_assert_eq!(trace.value(), &non_empty);
        }
    }

    #[test]
    fn prop_measurement_text_matches_number(value in -1.0e9f64..1.0e9, unit in token()) {
        let from_text = Measurement::new(value.to_string(), &unit).unwrap();
        let from_float = Measurement::new(value, &unit).unwrap();
        prop_assert_eq!(from_text, from_float);
    }

    #[test]
    fn prop_measurement_rejects_multi_word_units(a in token(), b in token()) {
        let unit = format!("{a} {b}");
        prop_assert!(Measurement::new(1.0, &unit).unwrap_err().is_invalid_value());
    }

    #[test]
    fn prop_integer_round_trip(value in any::<i64>(), name in token()) {
        let property = IntegerProperty::new(PropertyBase::new(&name, "general"), value);
        let rebuilt = PropertyFactory::create(&property.generate_xml()).unwrap().unwrap();
        prop_assert!(Property::from(property).compare(&rebuilt));
    }

    #[test]
    fn prop_unit_round_trip(
        units in proptest::collection::vec(token(), 1..5),
        pick in any::<prop::sample::Index>(),
        value in -1.0e6f64..1.0e6
    ) {
        let unit = pick.get(&units).clone();
        let property = UnitProperty::new(
            PropertyBase::default(),
            Some(Measurement::new(value, &unit).unwrap()),
            Some(units.clone().into()),
        )
        .unwrap();
        let xml = property.generate_xml().to_xml().unwrap();
        let rebuilt = PropertyFactory::create(&proteus_model::Element::parse(&xml).unwrap())
            .unwrap()
            .unwrap();
        prop_assert_eq!(rebuilt.generate_xml().to_xml().unwrap(), xml);
    }

    #[test]
    fn prop_enum_value_always_a_choice(
        choices in proptest::collection::vec(token(), 1..6),
        value in token()
    ) {
        let property = EnumProperty::new(PropertyBase::default(), value, Some(choices.clone().into())).unwrap();
        prop_assert!(choices.contains(property.value()));
    }
}
