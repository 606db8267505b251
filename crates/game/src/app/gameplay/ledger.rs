/// Player health, the running score and the session's high-score table.
#[derive(Debug, Clone)]
pub(crate) struct Ledger {
    health: i32,
    score: i64,
    high_scores: Vec<i64>,
}

impl Ledger {
    pub(crate) fn new(starting_health: i32, high_score_slots: usize) -> Self {
        Self {
            health: starting_health,
            score: 0,
            high_scores: vec![0; high_score_slots.max(1)],
        }
    }

    pub(crate) fn health(&self) -> i32 {
        self.health
    }

    pub(crate) fn score(&self) -> i64 {
        self.score
    }

    pub(crate) fn high_scores(&self) -> &[i64] {
        &self.high_scores
    }

    pub(crate) fn modify_health(&mut self, delta: i32) -> i32 {
        self.health = self.health.saturating_add(delta);
        self.health
    }

    pub(crate) fn modify_score(&mut self, delta: i64) -> i64 {
        self.score = self.score.saturating_add(delta);
        self.score
    }

    /// Resets health and score; the high-score table survives.
    pub(crate) fn reset(&mut self, starting_health: i32) {
        self.health = starting_health;
        self.score = 0;
    }

    /// Evicts the weakest entry when the score beats it, then re-sorts.
    /// Returns whether the table changed.
    pub(crate) fn commit_score(&mut self) -> bool {
        let lowest = self.high_scores.iter().copied().min().unwrap_or(0);
        if self.score <= 0 || self.score <= lowest {
            return false;
        }
        if let Some(last) = self.high_scores.last_mut() {
            *last = self.score;
        }
        bubble_sort_descending(&mut self.high_scores);
        true
    }
}

fn bubble_sort_descending(values: &mut [i64]) {
    loop {
        let mut swapped = false;
        for i in 1..values.len() {
            if values[i - 1] < values[i] {
                values.swap(i - 1, i);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger_with_scores(scores: &[i64]) -> Ledger {
        let mut ledger = Ledger::new(5, scores.len());
        ledger.high_scores.copy_from_slice(scores);
        ledger
    }

    #[test]
    fn commit_replaces_the_weakest_entry_and_sorts() {
        let mut ledger = ledger_with_scores(&[500, 400, 300, 200]);
        ledger.modify_score(350);
        assert!(ledger.commit_score());
        assert_eq!(ledger.high_scores(), &[500, 400, 350, 300]);
    }

    #[test]
    fn commit_ignores_scores_at_or_below_the_minimum() {
        let mut ledger = ledger_with_scores(&[500, 400, 300, 200]);
        ledger.modify_score(200);
        assert!(!ledger.commit_score());
        assert_eq!(ledger.high_scores(), &[500, 400, 300, 200]);

        let mut empty = Ledger::new(5, 8);
        assert!(!empty.commit_score());
        assert_eq!(empty.high_scores(), &[0; 8]);
    }

    #[test]
    fn later_commits_at_or_below_the_minimum_leave_the_table_alone() {
        let mut ledger = ledger_with_scores(&[90, 60, 30]);
        ledger.modify_score(70);
        assert!(ledger.commit_score());
        assert_eq!(ledger.high_scores(), &[90, 70, 60]);

        for score in [60, 10] {
            ledger.reset(5);
            ledger.modify_score(score);
            assert!(!ledger.commit_score());
            assert_eq!(ledger.high_scores(), &[90, 70, 60]);
        }
    }

    #[test]
    fn reset_keeps_high_scores() {
        let mut ledger = Ledger::new(5, 3);
        ledger.modify_health(-2);
        ledger.modify_score(40);
        ledger.commit_score();
        ledger.reset(5);
        assert_eq!(ledger.health(), 5);
        assert_eq!(ledger.score(), 0);
        assert_eq!(ledger.high_scores(), &[40, 0, 0]);
    }
}
