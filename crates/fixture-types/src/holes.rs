use serde::{Deserialize, Serialize};

use crate::plate::PlateId;

/// One entry of the hole-operation table: what gets cut into a plate at
/// each location of an annotation type.
///
/// Deserialized from a TOML table with a `type` tag, e.g.
/// `{ type = "SimpleHole", diameter_mm = 1.4 }`. An unknown tag is a
/// deserialization error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HoleSpec {
    /// Leave the plate untouched.
    None,
    /// A plain through-hole.
    SimpleHole { diameter_mm: f64 },
    /// A through-hole with a wider counterbore sunk from the plate top.
    CounterboreHole {
        diameter_mm: f64,
        counterbore_diameter_mm: f64,
        counterbore_depth_mm: f64,
    },
}

impl HoleSpec {
    pub fn is_none(&self) -> bool {
        matches!(self, HoleSpec::None)
    }
}

/// Exactly three hole specs, one per plate in A, B, C order.
///
/// The fixed arity makes a two- or four-element annotation entry a
/// deserialization error rather than a runtime surprise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HoleTriple(pub [HoleSpec; 3]);

impl HoleTriple {
    pub fn for_plate(&self, plate: PlateId) -> &HoleSpec {
        &self.0[plate.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlateId, &HoleSpec)> {
        PlateId::ALL.into_iter().map(move |p| (p, self.for_plate(p)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_plate_indexes_in_order() {
        let triple = HoleTriple([
            HoleSpec::SimpleHole { diameter_mm: 1.0 },
            HoleSpec::None,
            HoleSpec::CounterboreHole {
                diameter_mm: 1.0,
                counterbore_diameter_mm: 2.0,
                counterbore_depth_mm: 1.5,
            },
        ]);
        assert!(matches!(
            triple.for_plate(PlateId::A),
            HoleSpec::SimpleHole { .. }
        ));
        assert!(triple.for_plate(PlateId::B).is_none());
        assert!(matches!(
            triple.for_plate(PlateId::C),
            HoleSpec::CounterboreHole { .. }
        ));
    }
}
