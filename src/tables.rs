//! Data tables of the canonical volcanic risk network.
//!
//! Rule sets are plain data so variants can be loaded through [`GraphBuilder`](crate::GraphBuilder)
//! without touching the inference code.

use crate::terms::State::{self, *};
use crate::variable::Variable;

pub(crate) type Triple = (f64, f64, f64);
pub(crate) type Row = &'static [(State, Triple)];

pub(crate) struct NodeTable {
    pub(crate) variable: Variable,
    pub(crate) states: &'static [State],
    pub(crate) prior: Row,
    pub(crate) rules: &'static [(&'static [State], Row)],
}

pub(crate) struct PartitionTable {
    pub(crate) variable: Variable,
    pub(crate) domain: (f64, f64),
    pub(crate) step: f64,
    pub(crate) states: &'static [(State, f64, f64)],
}

const LEVELS: &[State] = &[Baja, Media, Alta];

pub(crate) const NODES: &[NodeTable] = &[
    NodeTable {
        variable: Variable::Sismicidad,
        states: LEVELS,
        prior: &[(Baja, (0.3, 0.4, 0.5)), (Media, (0.2, 0.3, 0.4)), (Alta, (0.1, 0.2, 0.3))],
        rules: &[],
    },
    NodeTable {
        variable: Variable::Gases,
        states: &[Normal, Elevada],
        prior: &[(Normal, (0.5, 0.6, 0.7)), (Elevada, (0.3, 0.4, 0.5))],
        rules: &[],
    },
    NodeTable {
        variable: Variable::Deformacion,
        states: &[Nula, Leve, Significativa],
        prior: &[
            (Nula, (0.4, 0.5, 0.6)),
            (Leve, (0.2, 0.3, 0.4)),
            (Significativa, (0.1, 0.2, 0.3)),
        ],
        rules: &[],
    },
    NodeTable {
        variable: Variable::Historia,
        states: LEVELS,
        prior: &[(Baja, (0.3, 0.4, 0.5)), (Media, (0.2, 0.3, 0.4)), (Alta, (0.1, 0.2, 0.3))],
        rules: &[],
    },
    NodeTable {
        variable: Variable::Densidad,
        states: LEVELS,
        prior: &[(Baja, (0.2, 0.3, 0.4)), (Media, (0.3, 0.4, 0.5)), (Alta, (0.2, 0.3, 0.4))],
        rules: &[],
    },
    NodeTable {
        variable: Variable::Preparacion,
        states: &[MuyBajo, Bajo, Medio, Alto, MuyAlto],
        prior: &[
            (MuyBajo, (0.1, 0.2, 0.3)),
            (Bajo, (0.2, 0.25, 0.3)),
            (Medio, (0.2, 0.25, 0.3)),
            (Alto, (0.15, 0.2, 0.25)),
            (MuyAlto, (0.05, 0.1, 0.15)),
        ],
        rules: &[],
    },
    NodeTable {
        variable: Variable::Proximidad,
        states: &[Lejana, Media, Cercana],
        prior: &[(Lejana, (0.2, 0.3, 0.4)), (Media, (0.3, 0.4, 0.5)), (Cercana, (0.2, 0.3, 0.4))],
        rules: &[],
    },
    NodeTable {
        variable: Variable::Evacuacion,
        states: &[Inexistente, Parcial, Completo],
        prior: &[
            (Inexistente, (0.2, 0.3, 0.4)),
            (Parcial, (0.3, 0.4, 0.5)),
            (Completo, (0.2, 0.3, 0.4)),
        ],
        rules: &[],
    },
    NodeTable {
        variable: Variable::Amenaza,
        states: LEVELS,
        prior: &[(Baja, (0.3, 0.4, 0.5)), (Media, (0.3, 0.4, 0.5)), (Alta, (0.2, 0.3, 0.4))],
        rules: &[
            (
                &[Alta, Elevada, Significativa, Alta],
                &[(Baja, (0.0, 0.02, 0.05)), (Media, (0.05, 0.1, 0.15)), (Alta, (0.8, 0.88, 0.95))],
            ),
            (
                &[Baja, Normal, Nula, Baja],
                &[(Baja, (0.85, 0.9, 0.95)), (Media, (0.05, 0.08, 0.1)), (Alta, (0.0, 0.02, 0.05))],
            ),
            (
                &[Alta, Elevada, Leve, Media],
                &[(Baja, (0.1, 0.15, 0.2)), (Media, (0.4, 0.5, 0.6)), (Alta, (0.3, 0.35, 0.4))],
            ),
            (
                &[Alta, Normal, Significativa, Alta],
                &[(Baja, (0.05, 0.1, 0.15)), (Media, (0.3, 0.4, 0.5)), (Alta, (0.4, 0.5, 0.6))],
            ),
            (
                &[Media, Elevada, Significativa, Alta],
                &[(Baja, (0.05, 0.1, 0.15)), (Media, (0.4, 0.5, 0.6)), (Alta, (0.3, 0.4, 0.5))],
            ),
            (
                &[Media, Normal, Leve, Media],
                &[(Baja, (0.3, 0.4, 0.5)), (Media, (0.5, 0.6, 0.7)), (Alta, (0.1, 0.15, 0.2))],
            ),
            (
                &[Media, Elevada, Nula, Baja],
                &[(Baja, (0.5, 0.6, 0.7)), (Media, (0.3, 0.35, 0.4)), (Alta, (0.05, 0.1, 0.15))],
            ),
            (
                &[Baja, Elevada, Significativa, Alta],
                &[(Baja, (0.2, 0.3, 0.4)), (Media, (0.4, 0.5, 0.6)), (Alta, (0.2, 0.3, 0.4))],
            ),
            (
                &[Baja, Normal, Significativa, Alta],
                &[(Baja, (0.4, 0.5, 0.6)), (Media, (0.3, 0.4, 0.5)), (Alta, (0.1, 0.15, 0.2))],
            ),
            (
                &[Alta, Normal, Leve, Media],
                &[(Baja, (0.2, 0.25, 0.3)), (Media, (0.5, 0.6, 0.7)), (Alta, (0.15, 0.2, 0.25))],
            ),
            (
                &[Media, Elevada, Leve, Media],
                &[(Baja, (0.15, 0.2, 0.25)), (Media, (0.5, 0.6, 0.7)), (Alta, (0.2, 0.25, 0.3))],
            ),
            (
                &[Baja, Elevada, Leve, Media],
                &[(Baja, (0.4, 0.5, 0.6)), (Media, (0.3, 0.4, 0.5)), (Alta, (0.1, 0.15, 0.2))],
            ),
        ],
    },
    NodeTable {
        variable: Variable::Vulnerabilidad,
        states: LEVELS,
        prior: &[(Baja, (0.3, 0.4, 0.5)), (Media, (0.3, 0.4, 0.5)), (Alta, (0.2, 0.3, 0.4))],
        rules: &[
            (
                &[Alta, MuyBajo, Cercana, Inexistente],
                &[(Baja, (0.0, 0.02, 0.05)), (Media, (0.05, 0.1, 0.15)), (Alta, (0.8, 0.88, 0.95))],
            ),
            (
                &[Baja, MuyAlto, Lejana, Completo],
                &[(Baja, (0.85, 0.9, 0.95)), (Media, (0.05, 0.08, 0.12)), (Alta, (0.0, 0.02, 0.05))],
            ),
            (
                &[Alta, Alto, Cercana, Completo],
                &[(Baja, (0.3, 0.4, 0.5)), (Media, (0.4, 0.5, 0.6)), (Alta, (0.1, 0.15, 0.2))],
            ),
            (
                &[Media, Medio, Media, Parcial],
                &[(Baja, (0.25, 0.35, 0.45)), (Media, (0.4, 0.5, 0.6)), (Alta, (0.15, 0.2, 0.25))],
            ),
            (
                &[Alta, Medio, Media, Parcial],
                &[(Baja, (0.1, 0.15, 0.2)), (Media, (0.4, 0.5, 0.6)), (Alta, (0.3, 0.35, 0.4))],
            ),
            (
                &[Baja, Bajo, Lejana, Inexistente],
                &[(Baja, (0.5, 0.6, 0.7)), (Media, (0.3, 0.35, 0.4)), (Alta, (0.05, 0.1, 0.15))],
            ),
            (
                &[Media, Bajo, Cercana, Parcial],
                &[(Baja, (0.15, 0.2, 0.25)), (Media, (0.5, 0.6, 0.7)), (Alta, (0.2, 0.25, 0.3))],
            ),
            // Revises the all-medium rule above; the builder keeps the first position.
            (
                &[Media, Medio, Media, Parcial],
                &[(Baja, (0.2, 0.3, 0.4)), (Media, (0.5, 0.6, 0.7)), (Alta, (0.1, 0.15, 0.2))],
            ),
            (
                &[Alta, Medio, Lejana, Parcial],
                &[(Baja, (0.3, 0.4, 0.5)), (Media, (0.4, 0.5, 0.6)), (Alta, (0.1, 0.15, 0.2))],
            ),
        ],
    },
    NodeTable {
        variable: Variable::Riesgo,
        states: &[Bajo, Medio, Alto],
        prior: &[(Bajo, (0.3, 0.4, 0.5)), (Medio, (0.3, 0.4, 0.5)), (Alto, (0.2, 0.3, 0.4))],
        rules: &[
            (
                &[Baja, Baja],
                &[(Bajo, (0.75, 0.85, 0.92)), (Medio, (0.05, 0.1, 0.15)), (Alto, (0.0, 0.03, 0.06))],
            ),
            (
                &[Baja, Media],
                &[(Bajo, (0.5, 0.6, 0.7)), (Medio, (0.25, 0.35, 0.45)), (Alto, (0.05, 0.1, 0.15))],
            ),
            (
                &[Baja, Alta],
                &[(Bajo, (0.25, 0.35, 0.45)), (Medio, (0.4, 0.5, 0.6)), (Alto, (0.15, 0.2, 0.25))],
            ),
            (
                &[Media, Baja],
                &[(Bajo, (0.4, 0.5, 0.6)), (Medio, (0.35, 0.45, 0.55)), (Alto, (0.05, 0.1, 0.15))],
            ),
            (
                &[Media, Media],
                &[(Bajo, (0.15, 0.25, 0.35)), (Medio, (0.5, 0.6, 0.7)), (Alto, (0.15, 0.25, 0.35))],
            ),
            (
                &[Media, Alta],
                &[(Bajo, (0.05, 0.1, 0.15)), (Medio, (0.35, 0.45, 0.55)), (Alto, (0.4, 0.5, 0.6))],
            ),
            (
                &[Alta, Baja],
                &[(Bajo, (0.15, 0.25, 0.35)), (Medio, (0.45, 0.55, 0.65)), (Alto, (0.15, 0.25, 0.35))],
            ),
            (
                &[Alta, Media],
                &[(Bajo, (0.05, 0.1, 0.15)), (Medio, (0.25, 0.35, 0.45)), (Alto, (0.5, 0.6, 0.7))],
            ),
            (
                &[Alta, Alta],
                &[(Bajo, (0.0, 0.02, 0.05)), (Medio, (0.1, 0.15, 0.2)), (Alto, (0.75, 0.85, 0.95))],
            ),
        ],
    },
];

// Derived nodes (amenaza, vulnerabilidad, riesgo) are never observed and have no partition.
pub(crate) const PARTITIONS: &[PartitionTable] = &[
    PartitionTable {
        variable: Variable::Sismicidad,
        domain: (0., 20.),
        step: 1.,
        states: &[(Baja, 0., 4.), (Media, 3., 10.), (Alta, 8., 20.)],
    },
    PartitionTable {
        variable: Variable::Gases,
        domain: (0., 5000.),
        step: 100.,
        states: &[(Normal, 0., 1200.), (Elevada, 800., 5000.)],
    },
    PartitionTable {
        variable: Variable::Deformacion,
        domain: (0., 50.),
        step: 1.,
        states: &[(Nula, 0., 4.), (Leve, 3., 20.), (Significativa, 15., 50.)],
    },
    PartitionTable {
        variable: Variable::Historia,
        domain: (0., 10.),
        step: 1.,
        states: &[(Baja, 0., 3.), (Media, 2., 8.), (Alta, 6., 10.)],
    },
    PartitionTable {
        variable: Variable::Densidad,
        domain: (0., 30000.),
        step: 500.,
        states: &[(Baja, 0., 6000.), (Media, 4000., 12000.), (Alta, 8000., 30000.)],
    },
    PartitionTable {
        variable: Variable::Preparacion,
        domain: (0., 5.),
        step: 0.1,
        states: &[
            (MuyBajo, 0., 1.5),
            (Bajo, 1., 2.5),
            (Medio, 1.5, 3.5),
            (Alto, 3., 4.5),
            (MuyAlto, 4., 5.),
        ],
    },
    PartitionTable {
        variable: Variable::Proximidad,
        domain: (0., 20.),
        step: 1.,
        states: &[(Cercana, 0., 6.), (Media, 4., 14.), (Lejana, 10., 20.)],
    },
    PartitionTable {
        variable: Variable::Evacuacion,
        domain: (0., 10.),
        step: 1.,
        states: &[(Inexistente, 0., 3.), (Parcial, 2., 7.), (Completo, 5., 10.)],
    },
];

/// Triangular partition of a Mamdani system variable, states as `(low, peak, high)`.
pub(crate) struct TrimfTable {
    pub(crate) variable: Variable,
    pub(crate) domain: (f64, f64),
    pub(crate) step: f64,
    pub(crate) states: Row,
}

pub(crate) struct MamdaniTable {
    pub(crate) inputs: &'static [TrimfTable],
    pub(crate) output: TrimfTable,
    pub(crate) rules: &'static [(&'static [State], State)],
}

const SCORE_LEVELS: Row = &[(Baja, (0., 0., 4.)), (Media, (3., 5., 7.)), (Alta, (6., 10., 10.))];
const WIDE_SCORE_LEVELS: Row = &[(Baja, (0., 0., 4.)), (Media, (2., 5., 8.)), (Alta, (6., 10., 10.))];

pub(crate) const MAMDANI_AMENAZA: MamdaniTable = MamdaniTable {
    inputs: &[
        TrimfTable {
            variable: Variable::Sismicidad,
            domain: (0., 20.),
            step: 1.,
            states: &[(Baja, (0., 0., 5.)), (Media, (3., 8., 12.)), (Alta, (10., 20., 20.))],
        },
        TrimfTable {
            variable: Variable::Gases,
            domain: (0., 5000.),
            step: 100.,
            states: &[(Normal, (0., 0., 1500.)), (Elevada, (1000., 5000., 5000.))],
        },
        TrimfTable {
            variable: Variable::Deformacion,
            domain: (0., 50.),
            step: 1.,
            states: &[
                (Nula, (0., 0., 5.)),
                (Leve, (3., 20., 30.)),
                (Significativa, (25., 50., 50.)),
            ],
        },
        TrimfTable {
            variable: Variable::Historia,
            domain: (0., 10.),
            step: 1.,
            states: &[(Baja, (0., 0., 2.)), (Media, (1., 5., 7.)), (Alta, (6., 10., 10.))],
        },
    ],
    output: TrimfTable {
        variable: Variable::Amenaza,
        domain: (0., 10.),
        step: 1.,
        states: SCORE_LEVELS,
    },
    rules: &[
        (&[Alta, Elevada, Significativa, Alta], Alta),
        (&[Media, Normal, Leve, Media], Media),
        (&[Baja, Normal, Nula, Baja], Baja),
        (&[Alta, Elevada, Leve, Media], Media),
        (&[Media, Normal, Nula, Baja], Baja),
    ],
};

pub(crate) const MAMDANI_VULNERABILIDAD: MamdaniTable = MamdaniTable {
    inputs: &[
        TrimfTable {
            variable: Variable::Densidad,
            domain: (0., 30000.),
            step: 500.,
            states: &[
                (Baja, (0., 0., 8000.)),
                (Media, (5000., 15000., 20000.)),
                (Alta, (15000., 30000., 30000.)),
            ],
        },
        TrimfTable {
            variable: Variable::Preparacion,
            domain: (0., 5.),
            step: 0.1,
            states: &[
                (MuyBajo, (0., 0., 1.)),
                (Bajo, (0.5, 1.5, 2.5)),
                (Medio, (2., 2.5, 3.5)),
                (Alto, (3., 4., 5.)),
                (MuyAlto, (4., 5., 5.)),
            ],
        },
        TrimfTable {
            variable: Variable::Proximidad,
            domain: (0., 20.),
            step: 1.,
            states: &[(Lejana, (10., 20., 20.)), (Media, (5., 10., 15.)), (Cercana, (0., 0., 10.))],
        },
        TrimfTable {
            variable: Variable::Evacuacion,
            domain: (0., 10.),
            step: 1.,
            states: &[
                (Inexistente, (0., 0., 3.)),
                (Parcial, (2., 5., 7.)),
                (Completo, (6., 10., 10.)),
            ],
        },
    ],
    output: TrimfTable {
        variable: Variable::Vulnerabilidad,
        domain: (0., 10.),
        step: 1.,
        states: SCORE_LEVELS,
    },
    rules: &[
        (&[Alta, MuyBajo, Cercana, Inexistente], Alta),
        (&[Media, Bajo, Media, Parcial], Media),
        (&[Baja, Alto, Lejana, Completo], Baja),
        (&[Alta, Medio, Media, Parcial], Media),
        (&[Media, MuyBajo, Cercana, Inexistente], Alta),
    ],
};

pub(crate) const MAMDANI_RIESGO: MamdaniTable = MamdaniTable {
    inputs: &[
        TrimfTable {
            variable: Variable::Amenaza,
            domain: (0., 10.),
            step: 1.,
            states: WIDE_SCORE_LEVELS,
        },
        TrimfTable {
            variable: Variable::Vulnerabilidad,
            domain: (0., 10.),
            step: 1.,
            states: WIDE_SCORE_LEVELS,
        },
    ],
    output: TrimfTable {
        variable: Variable::Riesgo,
        domain: (0., 10.),
        step: 1.,
        states: &[(Bajo, (0., 0., 4.)), (Medio, (2., 5., 8.)), (Alto, (6., 10., 10.))],
    },
    rules: &[
        (&[Baja, Baja], Bajo),
        (&[Baja, Media], Medio),
        (&[Baja, Alta], Medio),
        (&[Media, Baja], Medio),
        (&[Media, Media], Medio),
        (&[Media, Alta], Alto),
        (&[Alta, Baja], Medio),
        (&[Alta, Media], Alto),
        (&[Alta, Alta], Alto),
    ],
};
