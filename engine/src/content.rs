use std::collections::HashMap;

pub const DEFAULT_SCENARIO: &str = "goblin_ambush";

pub fn builtin_scenarios() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        (
            "goblin_ambush",
            include_str!("../content/scenarios/goblin_ambush.json"),
        ),
        (
            "lava_cavern",
            include_str!("../content/scenarios/lava_cavern.json"),
        ),
        (
            "bone_crypt",
            include_str!("../content/scenarios/bone_crypt.json"),
        ),
    ])
}

/// Scenario ids in a stable order for listings.
pub fn scenario_ids() -> Vec<&'static str> {
    let mut ids: Vec<_> = builtin_scenarios().into_keys().collect();
    ids.sort_unstable();
    ids
}
