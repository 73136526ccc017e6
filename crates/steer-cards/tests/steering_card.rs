//! A complete card in the shape handed to the generator.

use steer_cards::{Limits, Module, Parameters, Sequence, Value};

fn base_process() -> Module {
    Module::new("lpair")
        .with("mode", 1)
        .with(
            "inKinematics",
            Parameters::new()
                .with("pdgIds", (2212, 2212))
                .with("pz", (6500.0, 6500.0)),
        )
        .with(
            "outKinematics",
            Parameters::new()
                .with("pt", Limits::at_least(25.0))
                .with("eta", Limits::new(-2.5, 2.5)),
        )
}

fn card() -> Parameters {
    Parameters::new()
        .with("process", base_process())
        .with("integrator", Module::new("vegas").with("ncvg", 100_000).with("iterations", 10))
        .with(
            "generator",
            Parameters::new().with("numEvents", 10_000).with("printEvery", 1_000),
        )
        .with(
            "output",
            Sequence::from_modules([
                Module::new("text").with("variables", ["m(4)", "pt(7)"]),
                Module::new("lhef").with("filename", "events.lhe"),
            ]),
        )
}

#[test]
fn card_exposes_conventional_blocks() {
    let card = card();
    assert_eq!(
        card.keys().collect::<Vec<_>>(),
        ["process", "integrator", "generator", "output"]
    );
    let dispatch: Vec<&str> = ["process", "integrator"]
        .iter()
        .filter_map(|key| card.get(key).and_then(Value::as_module))
        .map(Module::name)
        .collect();
    assert_eq!(dispatch, ["lpair", "vegas"]);
}

#[test]
fn variant_card_reuses_skeleton_under_new_binding() {
    let base = card();
    let elastic = base_process().clone_as("lpair", [("mode", 3)]);
    let mut variant = base.clone_with([("process", elastic)]);
    if let Some(Value::Sequence(output)) = variant.get_mut("output") {
        output.remove("lhef");
        output.push(Module::new("root_tree").with("filename", "events.root"));
    }

    let base_output = base.get("output").and_then(Value::as_sequence).unwrap();
    assert_eq!(base_output.names().collect::<Vec<_>>(), ["text", "lhef"]);
    let variant_output = variant.get("output").and_then(Value::as_sequence).unwrap();
    assert_eq!(variant_output.names().collect::<Vec<_>>(), ["text", "root_tree"]);

    let diff = base.diff(&variant);
    let changed: Vec<_> = diff
        .get("mine")
        .and_then(Value::as_params)
        .unwrap()
        .keys()
        .collect();
    assert_eq!(changed, ["process", "output"]);
    assert_eq!(
        base.get("process").and_then(Value::as_module).unwrap().get_or("mode", 0),
        1
    );
}

#[test]
fn dump_shows_every_block() {
    let dump = card().dump();
    assert!(dump.starts_with("Parameters(\n    process = Module('lpair',\n"));
    assert!(dump.contains("\n            pt = Limits(25.0, None),\n"));
    assert!(dump.contains("\n    output = Sequence(\n        Module('text',\n"));
    assert!(dump.ends_with("    ),\n)"));
}
