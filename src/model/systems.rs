#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum System {
    DoublePendulum,
    Lorenz,
    Rossler,
    Lorenz96,
    KuramotoSivashinsky,
    Kolmogorov,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastKind {
    /// Histogram comparison of the first three state components.
    Ode,
    /// Log power spectrum of each snapshot.
    Pde1d,
    /// Log power spectrum of one cross-section of the `nf x nf` field.
    Pde2d { nf: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastParams {
    pub kind: ForecastKind,
    pub k: usize,
    pub modes: usize,
}

pub const ALL_SYSTEMS: [System; 6] = [
    System::DoublePendulum,
    System::Lorenz,
    System::Rossler,
    System::Lorenz96,
    System::KuramotoSivashinsky,
    System::Kolmogorov,
];

impl System {
    pub const fn name(self) -> &'static str {
        match self {
            System::DoublePendulum => "doublependulum",
            System::Lorenz => "Lorenz",
            System::Rossler => "Rossler",
            System::Lorenz96 => "Lorenz96",
            System::KuramotoSivashinsky => "KS",
            System::Kolmogorov => "Kolmogorov",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        ALL_SYSTEMS.into_iter().find(|system| system.name() == name)
    }

    pub const fn forecast_params(self) -> ForecastParams {
        match self {
            System::DoublePendulum | System::Lorenz | System::Rossler => ForecastParams {
                kind: ForecastKind::Ode,
                k: 20,
                modes: 1000,
            },
            System::KuramotoSivashinsky => ForecastParams {
                kind: ForecastKind::Pde1d,
                k: 20,
                modes: 100,
            },
            System::Lorenz96 => ForecastParams {
                kind: ForecastKind::Pde1d,
                k: 20,
                modes: 30,
            },
            System::Kolmogorov => ForecastParams {
                kind: ForecastKind::Pde2d { nf: 128 },
                k: 20,
                modes: 30,
            },
        }
    }
}

impl std::fmt::Display for System {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/systems.rs"]
mod tests;
