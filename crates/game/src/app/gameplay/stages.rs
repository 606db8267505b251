use super::types::{AlarmKey, Flag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Stage {
    Introduction,
    Interval,
    Comet,
    Saucer,
    Boss,
    Scoreboard,
}

impl Stage {
    /// Alarm that ends the stage, if the stage is time-boxed.
    pub(crate) fn duration_alarm(self) -> Option<AlarmKey> {
        match self {
            Stage::Introduction => Some(AlarmKey::IntroStageDuration),
            Stage::Interval => Some(AlarmKey::IntervalStageDuration),
            Stage::Comet => Some(AlarmKey::CometStageDuration),
            Stage::Saucer => Some(AlarmKey::SaucerStageDuration),
            Stage::Boss | Stage::Scoreboard => None,
        }
    }

    /// The full capability set a stage starts with.
    pub(crate) fn capability_policy(self) -> [(Flag, bool); 6] {
        let (horizontal, vertical, shoot, take_damage) = match self {
            Stage::Introduction | Stage::Interval | Stage::Comet => (true, true, true, true),
            Stage::Saucer => (true, false, true, true),
            Stage::Boss => (false, true, true, true),
            Stage::Scoreboard => (false, false, false, false),
        };
        [
            (Flag::MoveLeft, horizontal),
            (Flag::MoveRight, horizontal),
            (Flag::MoveUp, vertical),
            (Flag::MoveDown, vertical),
            (Flag::Shoot, shoot),
            (Flag::TakeDamage, take_damage),
        ]
    }
}

/// Where the interval leads, given the stage that preceded it. `None` for
/// stages that never precede an interval.
pub(crate) fn interval_successor(previous: Stage) -> Option<Stage> {
    match previous {
        Stage::Introduction | Stage::Boss => Some(Stage::Comet),
        Stage::Comet => Some(Stage::Saucer),
        Stage::Saucer => Some(Stage::Boss),
        Stage::Interval | Stage::Scoreboard => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StageMachine {
    current: Stage,
    previous: Stage,
}

impl Default for StageMachine {
    fn default() -> Self {
        Self {
            current: Stage::Introduction,
            previous: Stage::Introduction,
        }
    }
}

impl StageMachine {
    pub(crate) fn current(&self) -> Stage {
        self.current
    }

    pub(crate) fn previous(&self) -> Stage {
        self.previous
    }

    /// Shifts current into previous and returns the outgoing stage so the
    /// caller can run its finish hook.
    pub(crate) fn enter(&mut self, next: Stage) -> Stage {
        let outgoing = self.current;
        self.previous = outgoing;
        self.current = next;
        outgoing
    }

    pub(crate) fn set_previous(&mut self, previous: Stage) {
        self.previous = previous;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed(stage: Stage, flag: Flag) -> bool {
        stage
            .capability_policy()
            .iter()
            .find(|(candidate, _)| *candidate == flag)
            .map(|(_, enabled)| *enabled)
            .unwrap_or(false)
    }

    #[test]
    fn interval_routes_through_the_cycle() {
        let mut stage = Stage::Comet;
        let mut seen = Vec::new();
        for _ in 0..4 {
            stage = interval_successor(stage).expect("routable");
            seen.push(stage);
        }
        assert_eq!(
            seen,
            vec![Stage::Saucer, Stage::Boss, Stage::Comet, Stage::Saucer]
        );
        assert_eq!(interval_successor(Stage::Introduction), Some(Stage::Comet));
        assert_eq!(interval_successor(Stage::Scoreboard), None);
    }

    #[test]
    fn policies_lock_the_expected_axes() {
        assert!(!allowed(Stage::Saucer, Flag::MoveUp));
        assert!(allowed(Stage::Saucer, Flag::MoveLeft));
        assert!(!allowed(Stage::Boss, Flag::MoveRight));
        assert!(allowed(Stage::Boss, Flag::MoveDown));
        assert!(Flag::ALL
            .iter()
            .all(|flag| !allowed(Stage::Scoreboard, *flag)));
        assert!(Flag::ALL.iter().all(|flag| allowed(Stage::Interval, *flag)));
    }

    #[test]
    fn enter_records_the_outgoing_stage() {
        let mut machine = StageMachine::default();
        assert_eq!(machine.enter(Stage::Interval), Stage::Introduction);
        assert_eq!(machine.current(), Stage::Interval);
        assert_eq!(machine.previous(), Stage::Introduction);
    }
}
