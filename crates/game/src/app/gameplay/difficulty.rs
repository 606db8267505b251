pub(crate) const BASE_DIFFICULTY: f32 = 1.0;

/// Speed multiplier for enemy spawns. Raised once per completed boss stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DifficultyGovernor {
    level: f32,
    step: f32,
}

impl DifficultyGovernor {
    pub(crate) fn new(step: f32) -> Self {
        Self {
            level: BASE_DIFFICULTY,
            step,
        }
    }

    pub(crate) fn level(&self) -> f32 {
        self.level
    }

    pub(crate) fn increase(&mut self) -> f32 {
        self.level += self.step;
        self.level
    }

    pub(crate) fn reset(&mut self) {
        self.level = BASE_DIFFICULTY;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_and_resets() {
        let mut governor = DifficultyGovernor::new(0.2);
        assert!((governor.increase() - 1.2).abs() < 1e-5);
        assert!((governor.increase() - 1.4).abs() < 1e-5);
        governor.reset();
        assert_eq!(governor.level(), BASE_DIFFICULTY);
    }
}
