/// Free-energy surface of one dihedral over periodic bins, in kcal/mol.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergySurface {
    energies: Vec<f64>,
}

impl EnergySurface {
    pub fn new(energies: Vec<f64>) -> Self {
        Self { energies }
    }

    #[inline]
    pub fn bins(&self) -> usize {
        self.energies.len()
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.energies
    }

    #[inline]
    pub fn energy(&self, bin: usize) -> f64 {
        self.energies[bin]
    }

    /// Maps an unwrapped bin position onto `0..bins`.
    #[inline]
    pub fn wrap(&self, position: isize) -> usize {
        position.rem_euclid(self.bins() as isize) as usize
    }

    pub fn bin_width_degrees(&self) -> f64 {
        360.0 / self.bins() as f64
    }

    /// A copy of this surface lowered by `offset` in every bin.
    pub fn shifted(&self, offset: f64) -> Self {
        Self {
            energies: self.energies.iter().map(|e| e - offset).collect(),
        }
    }

    /// Energy at an unwrapped position with the load added.
    ///
    /// The surface repeats every `bins`, the load keeps growing across the boundary.
    #[inline]
    pub fn loaded_energy(&self, position: isize, load: &LoadFunction) -> f64 {
        self.energies[self.wrap(position)] + load.value(position, self.bins())
    }
}

/// Linear load tilting a surface by `slope` kcal/mol per full rotation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LoadFunction {
    pub slope: f64,
}

impl LoadFunction {
    pub fn new(slope: f64) -> Self {
        Self { slope }
    }

    pub fn none() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.slope != 0.0
    }

    #[inline]
    pub fn value(&self, position: isize, bins: usize) -> f64 {
        position as f64 * self.slope / bins as f64
    }
}
