use std::collections::{HashMap, HashSet};

use capcells::config::{generate, write_cells, CapInstance, CapsConfig};
use capcells::layout::gds::{read_gds, write_gds};
use capcells::pcell::library::Library;
use capcells::pcell::ParamValue;

mod common;
use common::out_path;

/// The `(layer, datatype)` pairs used by boundaries and texts in a struct.
fn struct_layers(strukt: &gds21::GdsStruct) -> HashSet<(i16, i16)> {
    let mut layers = HashSet::new();
    for elem in &strukt.elems {
        match elem {
            gds21::GdsElement::GdsBoundary(b) => {
                layers.insert((b.layer, b.datatype));
            }
            gds21::GdsElement::GdsTextElem(t) => {
                layers.insert((t.layer, t.texttype));
            }
            _ => {}
        }
    }
    layers
}

#[test]
fn export_and_reload_varactor() {
    let lib = Library::sky130_caps();
    let (cell, params) = lib
        .instantiate("cap_var", [("nf", ParamValue::Int(2)), ("gr", true.into())])
        .expect("varactor generation should succeed");
    assert_eq!(params.int("nf").unwrap(), 2);

    let path = out_path("export_and_reload_varactor", "cap_var.gds");
    write_gds(&cell, &path).expect("GDS export should succeed");

    let gds = read_gds(&path).expect("GDS library should load");
    float_eq::assert_float_eq!(gds.units.db_unit(), 1e-9, abs <= 1e-18);
    assert_eq!(gds.structs.len(), 1);
    assert_eq!(gds.structs[0].name, "Varactor(L=0.180,W=1.000)");

    let layers = struct_layers(&gds.structs[0]);
    for pair in [
        (64, 20), // nwell
        (65, 20), // diff
        (65, 44), // tap
        (66, 20), // poly
        (66, 44), // licon
        (67, 20), // li1
        (93, 44), // nsdm
        (94, 20), // psdm (guard ring)
        (95, 20), // npc
        (125, 44), // lvtn
        (83, 44), // model label
    ] {
        assert!(layers.contains(&pair), "expected layer {pair:?} in output");
    }
}

#[test]
fn mim_cap_stack_round_trips() {
    let lib = Library::sky130_caps();
    let (cell, _) = lib
        .instantiate(
            "mim_cap",
            [("type", "sky130_fd_pr__model__cap_mim_m4".into())],
        )
        .expect("MIM generation should succeed");

    let path = out_path("mim_cap_stack_round_trips", "mim_cap.gds");
    write_gds(&cell, &path).expect("GDS export should succeed");

    let gds = read_gds(&path).expect("GDS library should load");
    let layers = struct_layers(&gds.structs[0]);
    for pair in [
        (71, 20), // met4 bottom plate
        (97, 44), // cap2m
        (71, 44), // via4
        (72, 20), // met5 top terminal
        (72, 5),  // met5 label
        (71, 5),  // met4 label
    ] {
        assert!(layers.contains(&pair), "expected layer {pair:?} in output");
    }

    let mut texts = HashSet::new();
    for elem in &gds.structs[0].elems {
        if let gds21::GdsElement::GdsTextElem(t) = elem {
            texts.insert(t.string.to_string());
        }
    }
    assert_eq!(texts, HashSet::from(["PLUS".to_string(), "MINUS".to_string()]));
}

#[test]
fn batch_export_disambiguates_names() {
    let config = CapsConfig {
        lib: "caps_batch".into(),
        caps: vec![
            CapInstance {
                cell: "cap_var".into(),
                name: Some("var_a".into()),
                params: HashMap::from([("nf".into(), ParamValue::Int(2))]),
            },
            CapInstance {
                cell: "mim_cap".into(),
                name: None,
                params: HashMap::new(),
            },
            CapInstance {
                cell: "mim_cap".into(),
                name: None,
                params: HashMap::new(),
            },
        ],
    };
    let cells = generate(&config).expect("batch generation should succeed");
    assert_eq!(cells.len(), 3);

    let path = out_path("batch_export_disambiguates_names", "caps.gds");
    write_cells(&config.lib, &cells, &path).expect("GDS export should succeed");

    let gds = read_gds(&path).expect("GDS library should load");
    assert_eq!(gds.name, "caps_batch");
    let names: Vec<_> = gds.structs.iter().map(|s| s.name.to_string()).collect();
    assert_eq!(
        names,
        vec![
            "var_a",
            "mimcap(L=2.000,W=2.000)",
            "mimcap(L=2.000,W=2.000)_1",
        ]
    );
}
