use crate::domain::model::Participant;
use crate::domain::ports::GrowthModel;

/// Reports the same monthly growth for everyone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedGrowth(pub u32);

impl Default for FixedGrowth {
    fn default() -> Self {
        Self(15)
    }
}

impl GrowthModel for FixedGrowth {
    fn monthly_growth(&self, _participant: &Participant) -> u32 {
        self.0
    }
}
