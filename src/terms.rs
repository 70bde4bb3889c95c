use std::fmt;
use std::str::FromStr;

use fixed_map::Key;
use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// A linguistic label. Every variable in the network draws its states from this set.
///
/// Variants are grouped by label family and ordered by severity within a family, which is also
/// the iteration order of a [`Distribution`](crate::Distribution).
#[derive(Clone, Copy, Debug, Eq, Hash, Key, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum State {
    #[serde(rename = "muy bajo")]
    MuyBajo,
    #[serde(rename = "bajo")]
    Bajo,
    #[serde(rename = "medio")]
    Medio,
    #[serde(rename = "alto")]
    Alto,
    #[serde(rename = "muy alto")]
    MuyAlto,
    #[serde(rename = "muy baja")]
    MuyBaja,
    #[serde(rename = "baja")]
    Baja,
    #[serde(rename = "media")]
    Media,
    #[serde(rename = "alta")]
    Alta,
    #[serde(rename = "muy alta")]
    MuyAlta,
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "elevada")]
    Elevada,
    #[serde(rename = "nula")]
    Nula,
    #[serde(rename = "leve")]
    Leve,
    #[serde(rename = "significativa")]
    Significativa,
    #[serde(rename = "lejana")]
    Lejana,
    #[serde(rename = "cercana")]
    Cercana,
    #[serde(rename = "inexistente")]
    Inexistente,
    #[serde(rename = "parcial")]
    Parcial,
    #[serde(rename = "completo")]
    Completo,
}

impl State {
    pub const ALL: [State; 20] = [
        State::MuyBajo,
        State::Bajo,
        State::Medio,
        State::Alto,
        State::MuyAlto,
        State::MuyBaja,
        State::Baja,
        State::Media,
        State::Alta,
        State::MuyAlta,
        State::Normal,
        State::Elevada,
        State::Nula,
        State::Leve,
        State::Significativa,
        State::Lejana,
        State::Cercana,
        State::Inexistente,
        State::Parcial,
        State::Completo,
    ];

    pub fn name(self) -> &'static str {
        match self {
            State::MuyBajo => "muy bajo",
            State::Bajo => "bajo",
            State::Medio => "medio",
            State::Alto => "alto",
            State::MuyAlto => "muy alto",
            State::MuyBaja => "muy baja",
            State::Baja => "baja",
            State::Media => "media",
            State::Alta => "alta",
            State::MuyAlta => "muy alta",
            State::Normal => "normal",
            State::Elevada => "elevada",
            State::Nula => "nula",
            State::Leve => "leve",
            State::Significativa => "significativa",
            State::Lejana => "lejana",
            State::Cercana => "cercana",
            State::Inexistente => "inexistente",
            State::Parcial => "parcial",
            State::Completo => "completo",
        }
    }

    /// Position of the label on the 0-10 risk scale used by defuzzification.
    ///
    /// This table only weights states when collapsing a distribution; inference never uses it.
    pub fn scale(self) -> f64 {
        match self {
            State::MuyBajo | State::MuyBaja | State::Inexistente => 1.,
            State::Bajo | State::Baja | State::Nula | State::Cercana => 2.,
            State::Leve => 4.,
            State::Medio | State::Media | State::Normal | State::Parcial => 5.,
            State::Alto | State::Alta | State::Significativa | State::Lejana | State::Elevada => 8.,
            State::MuyAlto | State::MuyAlta | State::Completo => 9.,
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for State {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        State::ALL
            .iter()
            .copied()
            .find(|state| state.name() == s)
            .ok_or_else(|| GraphError::UnknownState(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for state in State::ALL {
            assert_eq!(state.name().parse::<State>(), Ok(state));
        }

        assert_eq!(
            "media-alta".parse::<State>(),
            Err(GraphError::UnknownState("media-alta".into()))
        );
    }

    #[test]
    fn test_scale_table() {
        let expected = [
            ("muy bajo", 1.),
            ("muy baja", 1.),
            ("bajo", 2.),
            ("baja", 2.),
            ("nula", 2.),
            ("medio", 5.),
            ("media", 5.),
            ("normal", 5.),
            ("alto", 8.),
            ("alta", 8.),
            ("muy alto", 9.),
            ("muy alta", 9.),
            ("leve", 4.),
            ("significativa", 8.),
            ("lejana", 8.),
            ("cercana", 2.),
            ("inexistente", 1.),
            ("parcial", 5.),
            ("completo", 9.),
            ("elevada", 8.),
        ];

        for (name, scale) in expected {
            let state: State = name.parse().unwrap();
            assert_eq!(state.scale(), scale, "{name}");
        }
    }
}
