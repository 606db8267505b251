use arcade_engine::ArcadeWorld;

/// Object-type tags for everything the game spawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Kind {
    Ship,
    Comet,
    Saucer,
    Bullet,
    Boss,
    BossBullet,
    HealthIndicator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum AlarmKey {
    ShotFired,
    IntroStageDuration,
    IntervalStageDuration,
    CometStageDuration,
    SaucerStageDuration,
    ReviveImmunity,
    SpawnComet,
    SpawnSaucer,
    BossVulnerability,
    BossAttack,
    BossDeath,
}

impl AlarmKey {
    pub(crate) const ALL: [AlarmKey; 11] = [
        AlarmKey::ShotFired,
        AlarmKey::IntroStageDuration,
        AlarmKey::IntervalStageDuration,
        AlarmKey::CometStageDuration,
        AlarmKey::SaucerStageDuration,
        AlarmKey::ReviveImmunity,
        AlarmKey::SpawnComet,
        AlarmKey::SpawnSaucer,
        AlarmKey::BossVulnerability,
        AlarmKey::BossAttack,
        AlarmKey::BossDeath,
    ];
}

pub(crate) type GameWorld = ArcadeWorld<Kind, AlarmKey>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Flag {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Shoot,
    TakeDamage,
}

impl Flag {
    pub(crate) const ALL: [Flag; 6] = [
        Flag::MoveLeft,
        Flag::MoveRight,
        Flag::MoveUp,
        Flag::MoveDown,
        Flag::Shoot,
        Flag::TakeDamage,
    ];
}

/// Player capability flags. Every write goes through [`CapabilityFlags::set`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CapabilityFlags {
    move_left: bool,
    move_right: bool,
    move_up: bool,
    move_down: bool,
    shoot: bool,
    take_damage: bool,
}

impl Default for CapabilityFlags {
    fn default() -> Self {
        Self {
            move_left: true,
            move_right: true,
            move_up: true,
            move_down: true,
            shoot: true,
            take_damage: true,
        }
    }
}

impl CapabilityFlags {
    pub(crate) fn set(&mut self, flag: Flag, enabled: bool) {
        let slot = match flag {
            Flag::MoveLeft => &mut self.move_left,
            Flag::MoveRight => &mut self.move_right,
            Flag::MoveUp => &mut self.move_up,
            Flag::MoveDown => &mut self.move_down,
            Flag::Shoot => &mut self.shoot,
            Flag::TakeDamage => &mut self.take_damage,
        };
        *slot = enabled;
    }

    pub(crate) fn is_set(&self, flag: Flag) -> bool {
        match flag {
            Flag::MoveLeft => self.move_left,
            Flag::MoveRight => self.move_right,
            Flag::MoveUp => self.move_up,
            Flag::MoveDown => self.move_down,
            Flag::Shoot => self.shoot,
            Flag::TakeDamage => self.take_damage,
        }
    }

    pub(crate) fn set_all(&mut self, enabled: bool) {
        for flag in Flag::ALL {
            self.set(flag, enabled);
        }
    }

    /// Applies a full policy: every flag is written, none carries over.
    pub(crate) fn apply(&mut self, policy: &[(Flag, bool); 6]) {
        for &(flag, enabled) in policy {
            self.set(flag, enabled);
        }
    }
}
