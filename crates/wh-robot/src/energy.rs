//! Energy accounting.
//!
//! Every robot carries an [`EnergyLedger`] that only ever grows.  Costs come
//! from a store-wide [`EnergyModel`]; congestion surcharges are booked by the
//! execution engine through `RobotStore::add_congestion_penalty`, which
//! updates the energy total and the penalty counter together.

/// Energy charged per movement outcome.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnergyModel {
    /// Charged for every successful one-cell move, in any direction.
    pub per_move: f64,
    /// Charged when a move is refused.
    pub per_blocked_attempt: f64,
}

impl Default for EnergyModel {
    fn default() -> Self {
        Self { per_move: 1.0, per_blocked_attempt: 0.5 }
    }
}

/// Cumulative energy state of one robot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnergyLedger {
    pub total_energy_spent:       f64,
    pub successful_moves:         u32,
    pub blocked_attempts:         u32,
    pub total_congestion_penalty: f64,
}

impl EnergyLedger {
    pub(crate) fn charge_move(&mut self, model: &EnergyModel) {
        self.total_energy_spent += model.per_move;
        self.successful_moves += 1;
    }

    pub(crate) fn charge_blocked(&mut self, model: &EnergyModel) {
        self.total_energy_spent += model.per_blocked_attempt;
        self.blocked_attempts += 1;
    }

    pub(crate) fn charge_congestion(&mut self, penalty: f64) {
        self.total_congestion_penalty += penalty;
        self.total_energy_spent += penalty;
    }

    pub fn total_attempts(&self) -> u32 {
        self.successful_moves + self.blocked_attempts
    }

    /// Successful moves over total attempts; 1.0 before any attempt.
    pub fn energy_efficiency(&self) -> f64 {
        match self.total_attempts() {
            0 => 1.0,
            n => f64::from(self.successful_moves) / f64::from(n),
        }
    }
}

/// Snapshot of one robot's energy use, as written to `robot_reports.csv`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnergyReport {
    pub total_energy_spent:       f64,
    pub successful_moves:         u32,
    pub blocked_attempts:         u32,
    pub total_attempts:           u32,
    pub energy_efficiency:        f64,
    pub distance_to_target:       u32,
    /// Cells visited after the spawn cell.
    pub path_length:              usize,
    pub total_congestion_penalty: f64,
}
