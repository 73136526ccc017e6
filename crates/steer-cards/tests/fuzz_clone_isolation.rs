use proptest::prelude::*;
use steer_cards::{Module, Parameters, Scalar, Sequence, Value};

fn scalar() -> impl Strategy<Value = Scalar> {
    prop_oneof![
        any::<bool>().prop_map(Scalar::Bool),
        any::<i64>().prop_map(Scalar::Int),
        (-1.0e6..1.0e6f64).prop_map(Scalar::Float),
        "[a-z]{0,8}".prop_map(Scalar::Str),
    ]
}

fn value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        scalar().prop_map(Value::Scalar),
        prop::collection::vec(scalar(), 0..4).prop_map(Value::List),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(("[a-z]{1,6}", inner.clone()), 0..4)
                .prop_map(|entries| Value::Params(Parameters::from_entries(entries))),
            ("[a-z]{1,6}", prop::collection::vec(("[a-z]{1,6}", inner), 0..4)).prop_map(
                |(name, entries)| {
                    Value::Module(Module::with_params(name, Parameters::from_entries(entries)))
                }
            ),
        ]
    })
}

fn parameters() -> impl Strategy<Value = Parameters> {
    prop::collection::vec(("[a-z]{1,6}", value()), 0..6).prop_map(Parameters::from_entries)
}

proptest! {
    #[test]
    fn clone_overlays_overrides(params in parameters(), key in "[a-z]{1,6}", replacement in scalar()) {
        let copy = params.clone_with([(key.clone(), Value::Scalar(replacement.clone()))]);
        prop_assert_eq!(copy.get(&key), Some(&Value::Scalar(replacement)));
        for (other, value) in params.iter().filter(|(other, _)| *other != key) {
            prop_assert_eq!(copy.get(other), Some(value));
        }
        let expected_len = params.len() + usize::from(!params.contains_key(&key));
        prop_assert_eq!(copy.len(), expected_len);
    }

    #[test]
    fn mutating_a_clone_never_touches_the_original(params in parameters()) {
        let snapshot = params.dump();
        let mut copy = params.clone_with(std::iter::empty::<(String, Value)>());
        let keys: Vec<String> = copy.keys().map(str::to_owned).collect();
        for key in keys {
            match copy.get_mut(&key) {
                Some(Value::Params(nested)) => {
                    nested.set("__touched", 1);
                }
                Some(Value::Module(module)) => {
                    module.set("__touched", 1);
                }
                Some(other) => *other = Value::from("__touched"),
                None => {}
            }
        }
        copy.set("__added", true);
        prop_assert_eq!(params.dump(), snapshot);
        prop_assert!(!params.contains_key("__added"));
    }

    #[test]
    fn module_clone_keeps_name_out_of_size(
        name in "[a-z]{1,6}",
        other in "[a-z]{1,6}",
        params in parameters(),
    ) {
        let module = Module::with_params(name, params.clone());
        let copy = module.clone_as(other.clone(), std::iter::empty::<(String, Value)>());
        prop_assert_eq!(copy.name(), other.as_str());
        prop_assert_eq!(copy.len(), params.len());
        prop_assert_eq!(module.len(), params.len());
        prop_assert_eq!(copy.params(), module.params());
    }

    #[test]
    fn sequence_removal_filters_in_order(count in 1usize..8, removed in prop::collection::vec(any::<bool>(), 8)) {
        let modules: Vec<Module> = (0..count).map(|idx| Module::new(format!("m{idx}"))).collect();
        let mut sequence = Sequence::from_modules(modules.clone());
        for (idx, module) in modules.iter().enumerate() {
            if removed[idx] {
                sequence.remove(module.name());
            }
        }
        let expected: Vec<&str> = modules
            .iter()
            .enumerate()
            .filter(|(idx, _)| !removed[*idx])
            .map(|(_, module)| module.name())
            .collect();
        prop_assert_eq!(sequence.names().collect::<Vec<_>>(), expected.clone());
        prop_assert_eq!(sequence.len(), expected.len());
        prop_assert_eq!(sequence.slot_count(), count);
        let survivors = Sequence::from_modules(expected.iter().map(|name| Module::new(*name)));
        prop_assert_eq!(sequence, survivors);
    }

    #[test]
    fn dump_is_a_function_of_structure(params in parameters()) {
        let rebuilt = Parameters::from_entries(params.clone());
        prop_assert_eq!(rebuilt.dump(), params.dump());
        prop_assert_eq!(rebuilt.fingerprint().unwrap(), params.fingerprint().unwrap());
    }
}
