use serde::{Deserialize, Serialize};

/// Hit points with a fixed ceiling. `0 <= hp <= max_hp` holds after every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub hp: i32,
    pub max_hp: i32,
}

impl Health {
    pub fn new(max_hp: i32) -> Self {
        let max_hp = max_hp.max(0);
        Self { hp: max_hp, max_hp }
    }

    /// Current HP clamped into `0..=max_hp`.
    pub fn with_hp(hp: i32, max_hp: i32) -> Self {
        let max_hp = max_hp.max(0);
        Self {
            hp: hp.clamp(0, max_hp),
            max_hp,
        }
    }

    pub fn is_down(&self) -> bool {
        self.hp == 0
    }

    pub fn missing(&self) -> i32 {
        self.max_hp - self.hp
    }
}

/// Apply damage with a floor of 0. Returns true if the creature dropped to 0 this call.
pub fn apply_damage(name: &str, health: &mut Health, dmg: i32, mut log: impl FnMut(String)) -> bool {
    if health.is_down() {
        return false;
    }
    let before = health.hp;
    health.hp = (health.hp - dmg.max(0)).max(0);
    log(format!("[DMG][{}] {} → {} (−{})", name, before, health.hp, before - health.hp));
    if health.hp == 0 {
        log(format!("[STATE][{}] drops to 0 HP", name));
        return true;
    }
    false
}

/// Healing capped at `max_hp`; returns the HP actually restored.
pub fn heal(name: &str, health: &mut Health, amount: i32, mut log: impl FnMut(String)) -> i32 {
    if amount <= 0 {
        return 0;
    }
    let before = health.hp;
    health.hp = (health.hp + amount).min(health.max_hp);
    let restored = health.hp - before;
    log(format!(
        "[HEAL][{}] +{} HP ({} → {})",
        name, restored, before, health.hp
    ));
    restored
}
