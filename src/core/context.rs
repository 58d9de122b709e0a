use crate::domain::model::{ComparativeContext, Equivalence, EquivalenceKind};

/// kg CO2 per kilometre driven.
pub const CAR_KG_PER_KM: f64 = 0.192;
/// kg CO2 per full smartphone charge.
pub const SMARTPHONE_KG_PER_CHARGE: f64 = 0.075;
/// kg CO2 for one cup of coffee.
pub const COFFEE_KG_PER_CUP: f64 = 0.5;

pub fn equivalences(emissions: f64) -> [Equivalence; 3] {
    [
        Equivalence {
            kind: EquivalenceKind::CarKilometers,
            quantity: emissions / CAR_KG_PER_KM,
        },
        Equivalence {
            kind: EquivalenceKind::SmartphoneCharges,
            quantity: emissions / SMARTPHONE_KG_PER_CHARGE,
        },
        Equivalence {
            kind: EquivalenceKind::CoffeePercent,
            quantity: emissions / COFFEE_KG_PER_CUP * 100.0,
        },
    ]
}

pub fn explain(emissions: f64) -> ComparativeContext {
    equivalences(emissions).map(|equivalence| equivalence.statement())
}
