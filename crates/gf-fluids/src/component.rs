//! Natural gas component definitions.

/// Number of components in a detailed natural gas analysis.
pub const NUM_COMPONENTS: usize = 21;

/// Natural gas components, in the grouped order used for composition vectors:
/// hydrocarbons first, then inerts and trace species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Component {
    /// Methane (CH₄)
    Methane,
    /// Ethane (C₂H₆)
    Ethane,
    /// Propane (C₃H₈)
    Propane,
    Isobutane,
    NButane,
    Isopentane,
    NPentane,
    NHexane,
    NHeptane,
    NOctane,
    NNonane,
    NDecane,
    /// Helium (He)
    Helium,
    /// Argon (Ar)
    Argon,
    /// Nitrogen (N₂)
    Nitrogen,
    /// Oxygen (O₂)
    Oxygen,
    /// Carbon monoxide (CO)
    CarbonMonoxide,
    /// Carbon dioxide (CO₂)
    CarbonDioxide,
    /// Hydrogen (H₂)
    Hydrogen,
    /// Water (H₂O)
    Water,
    /// Hydrogen sulfide (H₂S)
    HydrogenSulfide,
}

impl Component {
    /// All components in grouped order; `ALL[i].index() == i`.
    pub const ALL: [Component; NUM_COMPONENTS] = [
        Component::Methane,
        Component::Ethane,
        Component::Propane,
        Component::Isobutane,
        Component::NButane,
        Component::Isopentane,
        Component::NPentane,
        Component::NHexane,
        Component::NHeptane,
        Component::NOctane,
        Component::NNonane,
        Component::NDecane,
        Component::Helium,
        Component::Argon,
        Component::Nitrogen,
        Component::Oxygen,
        Component::CarbonMonoxide,
        Component::CarbonDioxide,
        Component::Hydrogen,
        Component::Water,
        Component::HydrogenSulfide,
    ];

    /// Position in the grouped composition vector.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Position in the reference equation-of-state ordering
    /// (CH₄, N₂, CO₂, C₂H₆, C₃H₈, H₂O, H₂S, H₂, CO, O₂, iC₄ … nC₁₀, He, Ar).
    pub fn eos_index(self) -> usize {
        match self {
            Component::Methane => 0,
            Component::Nitrogen => 1,
            Component::CarbonDioxide => 2,
            Component::Ethane => 3,
            Component::Propane => 4,
            Component::Water => 5,
            Component::HydrogenSulfide => 6,
            Component::Hydrogen => 7,
            Component::CarbonMonoxide => 8,
            Component::Oxygen => 9,
            Component::Isobutane => 10,
            Component::NButane => 11,
            Component::Isopentane => 12,
            Component::NPentane => 13,
            Component::NHexane => 14,
            Component::NHeptane => 15,
            Component::NOctane => 16,
            Component::NNonane => 17,
            Component::NDecane => 18,
            Component::Helium => 19,
            Component::Argon => 20,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Component::Methane => "methane",
            Component::Ethane => "ethane",
            Component::Propane => "propane",
            Component::Isobutane => "isobutane",
            Component::NButane => "n-butane",
            Component::Isopentane => "isopentane",
            Component::NPentane => "n-pentane",
            Component::NHexane => "n-hexane",
            Component::NHeptane => "n-heptane",
            Component::NOctane => "n-octane",
            Component::NNonane => "n-nonane",
            Component::NDecane => "n-decane",
            Component::Helium => "helium",
            Component::Argon => "argon",
            Component::Nitrogen => "nitrogen",
            Component::Oxygen => "oxygen",
            Component::CarbonMonoxide => "carbon-monoxide",
            Component::CarbonDioxide => "carbon-dioxide",
            Component::Hydrogen => "hydrogen",
            Component::Water => "water",
            Component::HydrogenSulfide => "hydrogen-sulfide",
        }
    }

    /// Molar mass [g/mol].
    pub fn molar_mass(self) -> f64 {
        match self {
            Component::Methane => 16.043,
            Component::Ethane => 30.07,
            Component::Propane => 44.097,
            Component::Isobutane | Component::NButane => 58.123,
            Component::Isopentane | Component::NPentane => 72.15,
            Component::NHexane => 86.177,
            Component::NHeptane => 100.204,
            Component::NOctane => 114.231,
            Component::NNonane => 128.258,
            Component::NDecane => 142.285,
            Component::Helium => 4.0026,
            Component::Argon => 39.948,
            Component::Nitrogen => 28.0135,
            Component::Oxygen => 31.9988,
            Component::CarbonMonoxide => 28.01,
            Component::CarbonDioxide => 44.01,
            Component::Hydrogen => 2.0159,
            Component::Water => 18.0153,
            Component::HydrogenSulfide => 34.082,
        }
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for Component {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['_', ' '], "-");
        match wanted.as_str() {
            "ch4" => return Ok(Component::Methane),
            "c2h6" => return Ok(Component::Ethane),
            "c3h8" => return Ok(Component::Propane),
            "he" => return Ok(Component::Helium),
            "ar" => return Ok(Component::Argon),
            "n2" => return Ok(Component::Nitrogen),
            "o2" => return Ok(Component::Oxygen),
            "co" => return Ok(Component::CarbonMonoxide),
            "co2" => return Ok(Component::CarbonDioxide),
            "h2" => return Ok(Component::Hydrogen),
            "h2o" => return Ok(Component::Water),
            "h2s" => return Ok(Component::HydrogenSulfide),
            _ => {}
        }
        Component::ALL
            .into_iter()
            .find(|c| c.key() == wanted)
            .ok_or("unknown component")
    }
}
