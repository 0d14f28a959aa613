//! The set of sky130 mask layers used by the capacitor generators.
#![allow(missing_docs)]

use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// A GDS layer/datatype pair.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct GdsLayerSpec(pub i16, pub i16);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Layer {
    Nwell,
    Diff,
    Tap,
    Psdm,
    Nsdm,
    Lvtn,
    Hvtp,
    Poly,
    /// Nitride poly cut.
    Npc,
    Licon1,
    Li1,
    Mcon,
    Met1,
    Via,
    Met2,
    Via2,
    Met3,
    Via3,
    /// MIM capacitor plate between met3 and met4.
    Capm,
    Met4,
    Via4,
    /// MIM capacitor plate between met4 and met5.
    Cap2m,
    Met5,
    Text,
}

lazy_static! {
    static ref TO_GDS_DRAWING_LAYER: HashMap<Layer, GdsLayerSpec> = HashMap::from_iter([
        (Layer::Nwell, GdsLayerSpec(64, 20)),
        (Layer::Diff, GdsLayerSpec(65, 20)),
        (Layer::Tap, GdsLayerSpec(65, 44)),
        (Layer::Psdm, GdsLayerSpec(94, 20)),
        (Layer::Nsdm, GdsLayerSpec(93, 44)),
        (Layer::Lvtn, GdsLayerSpec(125, 44)),
        (Layer::Hvtp, GdsLayerSpec(78, 44)),
        (Layer::Poly, GdsLayerSpec(66, 20)),
        (Layer::Npc, GdsLayerSpec(95, 20)),
        (Layer::Licon1, GdsLayerSpec(66, 44)),
        (Layer::Li1, GdsLayerSpec(67, 20)),
        (Layer::Mcon, GdsLayerSpec(67, 44)),
        (Layer::Met1, GdsLayerSpec(68, 20)),
        (Layer::Via, GdsLayerSpec(68, 44)),
        (Layer::Met2, GdsLayerSpec(69, 20)),
        (Layer::Via2, GdsLayerSpec(69, 44)),
        (Layer::Met3, GdsLayerSpec(70, 20)),
        (Layer::Via3, GdsLayerSpec(70, 44)),
        (Layer::Capm, GdsLayerSpec(89, 44)),
        (Layer::Met4, GdsLayerSpec(71, 20)),
        (Layer::Via4, GdsLayerSpec(71, 44)),
        (Layer::Cap2m, GdsLayerSpec(97, 44)),
        (Layer::Met5, GdsLayerSpec(72, 20)),
        (Layer::Text, GdsLayerSpec(83, 44)),
    ]);
    static ref TO_GDS_PIN_LAYER: HashMap<Layer, GdsLayerSpec> = HashMap::from_iter([
        (Layer::Nwell, GdsLayerSpec(64, 16)),
        (Layer::Poly, GdsLayerSpec(66, 16)),
        (Layer::Li1, GdsLayerSpec(67, 16)),
        (Layer::Met1, GdsLayerSpec(68, 16)),
        (Layer::Met2, GdsLayerSpec(69, 16)),
        (Layer::Met3, GdsLayerSpec(70, 16)),
        (Layer::Met4, GdsLayerSpec(71, 16)),
        (Layer::Met5, GdsLayerSpec(72, 16)),
    ]);
    static ref TO_GDS_LABEL_LAYER: HashMap<Layer, GdsLayerSpec> = HashMap::from_iter([
        (Layer::Nwell, GdsLayerSpec(64, 5)),
        (Layer::Poly, GdsLayerSpec(66, 5)),
        (Layer::Li1, GdsLayerSpec(67, 5)),
        (Layer::Met1, GdsLayerSpec(68, 5)),
        (Layer::Met2, GdsLayerSpec(69, 5)),
        (Layer::Met3, GdsLayerSpec(70, 5)),
        (Layer::Met4, GdsLayerSpec(71, 5)),
        (Layer::Met5, GdsLayerSpec(72, 5)),
    ]);
    static ref GDS_LAYER_TO_LAYER: HashMap<GdsLayerSpec, Layer> = HashMap::from_iter(
        TO_GDS_DRAWING_LAYER
            .iter()
            .map(|(k, v)| (*v, *k))
            .chain(TO_GDS_PIN_LAYER.iter().map(|(k, v)| (*v, *k)))
            .chain(TO_GDS_LABEL_LAYER.iter().map(|(k, v)| (*v, *k)))
    );
}

impl Layer {
    pub fn gds_layer(&self) -> GdsLayerSpec {
        TO_GDS_DRAWING_LAYER[self]
    }

    pub fn gds_pin_layer(&self) -> Option<GdsLayerSpec> {
        TO_GDS_PIN_LAYER.get(self).copied()
    }

    pub fn gds_label_layer(&self) -> Option<GdsLayerSpec> {
        TO_GDS_LABEL_LAYER.get(self).copied()
    }

    pub fn from_gds(spec: GdsLayerSpec) -> Option<Self> {
        GDS_LAYER_TO_LAYER.get(&spec).copied()
    }
}
