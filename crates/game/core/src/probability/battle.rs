//! Team strength for creature battles.

use rand::Rng;

use crate::config::EconomyConfig;
use crate::state::{CreatureRef, Inventory};

use super::rarity::RarityValues;

/// One slot of a battle team.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeamMember {
    pub creature: CreatureRef,
    pub count: u32,
    /// Catalog value of a single creature.
    pub value: u64,
}

/// Strongest team from an inventory: rarest tiers first, then most valuable,
/// at most [`EconomyConfig::MAX_BATTLE_TEAM`] slots of up to
/// [`EconomyConfig::MAX_COPIES_PER_TEAM_SLOT`] copies each.
pub fn strongest_team<F>(inventory: &Inventory, value_of: F) -> Vec<TeamMember>
where
    F: Fn(&CreatureRef) -> u64,
{
    let mut members: Vec<TeamMember> = inventory
        .creatures()
        .map(|(creature, count)| TeamMember {
            creature: creature.clone(),
            count: count.min(EconomyConfig::MAX_COPIES_PER_TEAM_SLOT),
            value: value_of(creature),
        })
        .collect();
    members.sort_by(|a, b| {
        b.creature
            .rarity
            .cmp(&a.creature.rarity)
            .then(b.value.cmp(&a.value))
            .then(a.creature.name.cmp(&b.creature.name))
    });
    members.truncate(EconomyConfig::MAX_BATTLE_TEAM);
    members
}

/// Opponent team size grows by one slot every 20 levels, capped at five.
pub fn opponent_team_size(level: u32) -> usize {
    (3 + level as usize / 20).min(EconomyConfig::MAX_BATTLE_TEAM)
}

/// `Σ value × power multiplier(rarity) × count`.
pub fn team_power(team: &[TeamMember], multipliers: &RarityValues) -> f64 {
    team.iter()
        .map(|member| {
            member.value as f64 * multipliers.get(member.creature.rarity) * f64::from(member.count)
        })
        .sum()
}

/// Applies the +/-20% battle-day variance to a team's power.
pub fn roll_power<R: Rng + ?Sized>(power: f64, rng: &mut R) -> f64 {
    power * rng.gen_range(0.8..1.2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ItemKey, Rarity};

    #[test]
    fn strongest_team_prefers_rare_and_caps_copies() {
        let mut inventory = Inventory::new();
        for (rarity, name, count) in [
            (Rarity::Common, "rat", 9),
            (Rarity::Common, "wolf", 1),
            (Rarity::Uncommon, "boar", 1),
            (Rarity::Rare, "lynx", 1),
            (Rarity::Epic, "griffin", 1),
            (Rarity::Legendary, "phoenix", 5),
        ] {
            inventory.add(ItemKey::creature(rarity, name), count).unwrap();
        }

        let team = strongest_team(&inventory, |creature| match creature.name.as_str() {
            "wolf" => 20,
            _ => 10,
        });

        assert_eq!(team.len(), 5);
        assert_eq!(team[0].creature.name, "phoenix");
        assert_eq!(team[0].count, 3);
        // Among commons the more valuable wolf wins the last slot.
        assert_eq!(team[4].creature.name, "wolf");
    }

    #[test]
    fn power_weights_rarity_and_count() {
        let team = vec![
            TeamMember {
                creature: CreatureRef::new(Rarity::Common, "rat"),
                count: 2,
                value: 10,
            },
            TeamMember {
                creature: CreatureRef::new(Rarity::Legendary, "phoenix"),
                count: 1,
                value: 100,
            },
        ];
        let multipliers = RarityValues {
            common: 1.0,
            uncommon: 1.5,
            rare: 2.5,
            epic: 4.0,
            legendary: 7.0,
        };
        assert_eq!(team_power(&team, &multipliers), 720.0);
    }

    #[test]
    fn opponent_size_is_capped() {
        assert_eq!(opponent_team_size(1), 3);
        assert_eq!(opponent_team_size(20), 4);
        assert_eq!(opponent_team_size(200), 5);
    }
}
