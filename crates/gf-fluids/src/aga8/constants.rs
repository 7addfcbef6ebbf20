//! Published constants of the AGA8-92DC detail characterization method
//! (ISO 12213-2). Component indices follow the EOS ordering of
//! [`Component::eos_index`](crate::Component::eos_index).

use crate::component::NUM_COMPONENTS;

/// Number of terms in the equation of state.
pub const NUM_TERMS: usize = 58;

/// Number of second-virial terms (n = 1..=18).
pub const NUM_VIRIAL: usize = 18;

/// First term with a density-dependent contribution (n = 13, zero-based 12).
pub const FIRST_DENSITY_TERM: usize = 12;

/// Binary interaction parameters are only non-unity for i < 8, j < 19.
pub const PAIR_ROWS: usize = 8;
pub const PAIR_COLS: usize = 19;

/// Gas constant [MJ/(kmol·K)], so that D·R·T is in MPa for D in kmol/m³.
pub const R_GAS: f64 = 8.314_462_618e-3;

/// Equation-of-state coefficients aₙ.
pub const A: [f64; NUM_TERMS] = [
    0.1538326, 1.341953, -2.998583, -0.04831228, 0.3757965,
    -1.589575, -0.05358847, 0.88659463, -0.71023704, -1.471722,
    1.32185035, -0.78665925, 2.29129e-09, 0.1576724, -0.4363864,
    -0.04408159, -0.003433888, 0.03205905, 0.02487355, 0.07332279,
    -0.001600573, 0.6424706, -0.4162601, -0.06689957, 0.2791795,
    -0.6966051, -0.002860589, -0.008098836, 3.150547, 0.007224479,
    -0.7057529, 0.5349792, -0.07931491, -1.418465, -5.99905e-17,
    0.1058402, 0.03431729, -0.007022847, 0.02495587, 0.04296818,
    0.7465453, -0.2919613, 7.294616, -9.936757, -0.005399808,
    -0.2432567, 0.04987016, 0.003733797, 1.874951, 0.002168144,
    -0.6587164, 0.000205518, 0.009776195, -0.02048708, 0.01557322,
    0.006862415, -0.001226752, 0.002850908,
];

/// Density exponents bₙ.
pub const B: [i32; NUM_TERMS] = [
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 2,
    2, 2, 2, 2, 2, 2, 2, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 4, 4, 4,
    4, 4, 4, 4, 5, 5, 5, 5, 5, 6, 6, 7, 7, 8, 8, 8, 9, 9,
];

/// Exponential switch cₙ.
pub const C: [i32; NUM_TERMS] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0,
    1, 1, 1, 1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 1,
    1, 1, 1, 1, 0, 1, 1, 1, 1, 0, 1, 0, 1, 1, 1, 1, 1, 1,
];

/// Exponential density exponents kₙ.
pub const K: [i32; NUM_TERMS] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 3, 2, 2, 2, 4, 4, 0, 0,
    2, 2, 2, 4, 4, 4, 4, 0, 1, 1, 2, 2, 3, 3, 4, 4, 4, 0, 0, 2,
    2, 2, 4, 4, 0, 2, 2, 4, 4, 0, 2, 0, 2, 1, 2, 2, 2, 2,
];

/// Temperature exponents uₙ.
pub const U: [f64; NUM_TERMS] = [
    0.0, 0.5, 1.0, 3.5, -0.5, 4.5, 0.5, 7.5, 9.5, 6.0,
    12.0, 12.5, -6.0, 2.0, 3.0, 2.0, 2.0, 11.0, -0.5, 0.5,
    0.0, 4.0, 6.0, 21.0, 23.0, 22.0, -1.0, -0.5, 7.0, -1.0,
    6.0, 4.0, 1.0, 9.0, -13.0, 21.0, 8.0, -0.5, 0.0, 2.0,
    7.0, 9.0, 22.0, 23.0, 1.0, 9.0, 3.0, 8.0, 23.0, 1.5,
    5.0, -0.5, 4.0, 7.0, 3.0, 0.0, 1.0, 0.0,
];

/// Orientation flags gₙ.
pub const G: [u8; NUM_TERMS] = [
    0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 1, 1, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1, 0, 1, 0, 0,
];

/// Quadrupole flags qₙ.
pub const Q: [u8; NUM_TERMS] = [
    0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0,
    0, 1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 1, 0, 0, 0, 0, 0, 1,
];

/// High-temperature flags fₙ.
pub const F: [u8; NUM_TERMS] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

/// Dipole flags sₙ (second-virial terms only).
pub const S: [u8; NUM_VIRIAL] = [0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0];

/// Association flags wₙ (second-virial terms only).
pub const W: [u8; NUM_VIRIAL] = [0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0, 0, 0];

/// Characteristic energy parameters Eᵢ [K].
pub const EI: [f64; NUM_COMPONENTS] = [
    151.3183, 99.73778, 241.9606, 244.1667, 298.1183, 514.0156, 296.355,
    26.95794, 105.5348, 122.7667, 324.0689, 337.6389, 365.5999, 370.6823,
    402.636293, 427.72263, 450.325022, 470.840891, 489.558373, 2.610111, 119.6299,
];

/// Size parameters Kᵢ [(m³/kmol)^(1/3)].
pub const KI: [f64; NUM_COMPONENTS] = [
    0.4619255, 0.4479153, 0.4557489, 0.5279209, 0.583749, 0.3825868, 0.4618263,
    0.3514916, 0.4533894, 0.4186954, 0.6406937, 0.6341423, 0.6738577, 0.6798307,
    0.7175118, 0.7525189, 0.784955, 0.8152731, 0.8437826, 0.3589888, 0.4216551,
];

/// Orientation parameters Gᵢ.
pub const GI: [f64; NUM_COMPONENTS] = [
    0.0, 0.027815, 0.189065, 0.0793, 0.141239, 0.3325, 0.0885,
    0.034369, 0.038953, 0.021, 0.256692, 0.281835, 0.332267, 0.366911,
    0.289731, 0.337542, 0.383381, 0.427354, 0.469659, 0.0, 0.0,
];

/// Quadrupole parameters Qᵢ (CO₂, H₂O, H₂S).
pub const QI: [f64; NUM_COMPONENTS] = {
    let mut q = [0.0; NUM_COMPONENTS];
    q[2] = 0.69;
    q[5] = 1.06775;
    q[6] = 0.633276;
    q
};

/// High-temperature parameters Fᵢ (H₂ only).
pub const FI: [f64; NUM_COMPONENTS] = {
    let mut f = [0.0; NUM_COMPONENTS];
    f[7] = 1.0;
    f
};

/// Dipole parameters Sᵢ (H₂O, H₂S).
pub const SI: [f64; NUM_COMPONENTS] = {
    let mut s = [0.0; NUM_COMPONENTS];
    s[5] = 1.5822;
    s[6] = 0.39;
    s
};

/// Association parameters Wᵢ (H₂O only).
pub const WI: [f64; NUM_COMPONENTS] = {
    let mut w = [0.0; NUM_COMPONENTS];
    w[5] = 1.0;
    w
};

/// One non-unity row of the binary interaction tables (i < j).
#[derive(Debug, Clone, Copy)]
pub struct BinaryEntry {
    pub i: usize,
    pub j: usize,
    /// Energy interaction Eᵢⱼ*.
    pub e: f64,
    /// Conformal energy Uᵢⱼ.
    pub u: f64,
    /// Size interaction Kᵢⱼ.
    pub k: f64,
    /// Orientation interaction Gᵢⱼ*.
    pub g: f64,
}

impl BinaryEntry {
    const fn new(i: usize, j: usize, e: f64, u: f64, k: f64, g: f64) -> Self {
        Self { i, j, e, u, k, g }
    }
}

/// Sparse binary interaction table. Pairs not listed use 1 for every parameter.
pub const BINARY: &[BinaryEntry] = &[
    BinaryEntry::new(0, 1, 0.97164, 0.886106, 1.00363, 1.0),
    BinaryEntry::new(0, 2, 0.960644, 0.963827, 0.995933, 0.807653),
    BinaryEntry::new(0, 4, 0.994635, 0.990877, 1.007619, 1.0),
    BinaryEntry::new(0, 5, 0.708218, 1.0, 1.0, 1.0),
    BinaryEntry::new(0, 6, 0.931484, 0.736833, 1.00008, 1.0),
    BinaryEntry::new(0, 7, 1.17052, 1.15639, 1.02326, 1.95731),
    BinaryEntry::new(0, 8, 0.990126, 1.0, 1.0, 1.0),
    BinaryEntry::new(0, 10, 1.01953, 1.0, 1.0, 1.0),
    BinaryEntry::new(0, 11, 0.989844, 0.992291, 0.997596, 1.0),
    BinaryEntry::new(0, 12, 1.00235, 1.0, 1.0, 1.0),
    BinaryEntry::new(0, 13, 0.999268, 1.00367, 1.002529, 1.0),
    BinaryEntry::new(0, 14, 1.107274, 1.302576, 0.982962, 1.0),
    BinaryEntry::new(0, 15, 0.88088, 1.191904, 0.983565, 1.0),
    BinaryEntry::new(0, 16, 0.880973, 1.205769, 0.982707, 1.0),
    BinaryEntry::new(0, 17, 0.881067, 1.219634, 0.981849, 1.0),
    BinaryEntry::new(0, 18, 0.881161, 1.233498, 0.980991, 1.0),
    BinaryEntry::new(1, 2, 1.02274, 0.835058, 0.982361, 0.982746),
    BinaryEntry::new(1, 3, 0.97012, 0.816431, 1.00796, 1.0),
    BinaryEntry::new(1, 4, 0.945939, 0.915502, 1.0, 1.0),
    BinaryEntry::new(1, 5, 0.746954, 1.0, 1.0, 1.0),
    BinaryEntry::new(1, 6, 0.902271, 0.993476, 0.942596, 1.0),
    BinaryEntry::new(1, 7, 1.08632, 0.408838, 1.03227, 1.0),
    BinaryEntry::new(1, 8, 1.00571, 1.0, 1.0, 1.0),
    BinaryEntry::new(1, 9, 1.021, 1.0, 1.0, 1.0),
    BinaryEntry::new(1, 10, 0.946914, 1.0, 1.0, 1.0),
    BinaryEntry::new(1, 11, 0.973384, 0.993556, 1.0, 1.0),
    BinaryEntry::new(1, 12, 0.95934, 1.0, 1.0, 1.0),
    BinaryEntry::new(1, 13, 0.94552, 1.0, 1.0, 1.0),
    BinaryEntry::new(2, 3, 0.925053, 0.96987, 1.00851, 0.370296),
    BinaryEntry::new(2, 4, 0.960237, 1.0, 1.0, 1.0),
    BinaryEntry::new(2, 5, 0.849408, 1.0, 1.0, 1.67309),
    BinaryEntry::new(2, 6, 0.955052, 1.04529, 1.00779, 1.0),
    BinaryEntry::new(2, 7, 1.28179, 1.0, 1.0, 1.0),
    BinaryEntry::new(2, 8, 1.5, 0.9, 1.0, 1.0),
    BinaryEntry::new(2, 10, 0.906849, 1.0, 1.0, 1.0),
    BinaryEntry::new(2, 11, 0.897362, 1.0, 1.0, 1.0),
    BinaryEntry::new(2, 12, 0.726255, 1.0, 1.0, 1.0),
    BinaryEntry::new(2, 13, 0.859764, 1.0, 1.0, 1.0),
    BinaryEntry::new(2, 14, 0.855134, 1.066638, 0.910183, 1.0),
    BinaryEntry::new(2, 15, 0.831229, 1.077634, 0.895362, 1.0),
    BinaryEntry::new(2, 16, 0.80831, 1.088178, 0.881152, 1.0),
    BinaryEntry::new(2, 17, 0.786323, 1.098291, 0.86752, 1.0),
    BinaryEntry::new(2, 18, 0.765171, 1.108021, 0.854406, 1.0),
    BinaryEntry::new(3, 4, 1.02256, 1.065173, 0.986893, 1.0),
    BinaryEntry::new(3, 5, 0.693168, 1.0, 1.0, 1.0),
    BinaryEntry::new(3, 6, 0.946871, 0.971926, 0.999969, 1.0),
    BinaryEntry::new(3, 7, 1.16446, 1.61666, 1.02034, 1.0),
    BinaryEntry::new(3, 10, 1.0, 1.25, 1.0, 1.0),
    BinaryEntry::new(3, 11, 1.01306, 1.25, 1.0, 1.0),
    BinaryEntry::new(3, 12, 1.0, 1.25, 1.0, 1.0),
    BinaryEntry::new(3, 13, 1.00532, 1.25, 1.0, 1.0),
    BinaryEntry::new(4, 7, 1.034787, 1.0, 1.0, 1.0),
    BinaryEntry::new(4, 11, 1.0049, 1.0, 1.0, 1.0),
    BinaryEntry::new(6, 14, 1.008692, 1.028973, 0.96813, 1.0),
    BinaryEntry::new(6, 15, 1.010126, 1.033754, 0.96287, 1.0),
    BinaryEntry::new(6, 16, 1.011501, 1.038338, 0.957828, 1.0),
    BinaryEntry::new(6, 17, 1.012821, 1.042735, 0.952441, 1.0),
    BinaryEntry::new(6, 18, 1.014089, 1.046966, 0.948338, 1.0),
    BinaryEntry::new(7, 8, 1.1, 1.0, 1.0, 1.0),
    BinaryEntry::new(7, 10, 1.3, 1.0, 1.0, 1.0),
    BinaryEntry::new(7, 11, 1.3, 1.0, 1.0, 1.0),
];
