//! Quest template loader.

use std::collections::HashSet;
use std::path::Path;

use economy_core::{QuestOracle, QuestPeriod, QuestTemplate};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Quest templates per period, as read from `quests.ron`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct QuestCatalog {
    daily: Vec<QuestTemplate>,
    weekly: Vec<QuestTemplate>,
}

impl QuestCatalog {
    pub fn new(daily: Vec<QuestTemplate>, weekly: Vec<QuestTemplate>) -> LoadResult<Self> {
        let catalog = Self { daily, weekly };
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> LoadResult<()> {
        for (period, templates) in [("daily", &self.daily), ("weekly", &self.weekly)] {
            if templates.is_empty() {
                anyhow::bail!("No {period} quest templates");
            }
            let mut keys = HashSet::new();
            for template in templates {
                if !keys.insert(template.key.as_str()) {
                    anyhow::bail!("Duplicate {period} quest key '{}'", template.key);
                }
                if template.base_target == 0 {
                    anyhow::bail!("Quest '{}' has a zero target", template.key);
                }
            }
        }
        Ok(())
    }
}

impl QuestOracle for QuestCatalog {
    fn templates(&self, period: QuestPeriod) -> &[QuestTemplate] {
        match period {
            QuestPeriod::Daily => &self.daily,
            QuestPeriod::Weekly => &self.weekly,
        }
    }
}

/// Loader for quest templates from RON files.
pub struct QuestLoader;

impl QuestLoader {
    pub fn load(path: &Path) -> LoadResult<QuestCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<QuestCatalog> {
        let catalog: QuestCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse quests RON: {}", e))?;
        catalog.validate()?;
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use economy_core::QuestKind;

    use super::*;

    #[test]
    fn scale_defaults_when_omitted() {
        let catalog = QuestLoader::parse(
            r#"(
                daily: [
                    (key: "hunt", kind: hunt, base_target: 10, base_reward: (currency: 500, xp: 25)),
                    (
                        key: "battle",
                        kind: battle,
                        base_target: 2,
                        base_reward: (currency: 600, xp: 30),
                        scale: (easy: 1, medium: 2, hard: 4),
                    ),
                ],
                weekly: [
                    (key: "hunt_master", kind: hunt, base_target: 50, base_reward: (currency: 5000, xp: 200)),
                ],
            )"#,
        )
        .unwrap();

        let daily = catalog.templates(QuestPeriod::Daily);
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].scale.hard, 3);
        assert_eq!(daily[1].scale.hard, 4);
        assert_eq!(catalog.templates(QuestPeriod::Weekly)[0].kind, QuestKind::Hunt);
    }

    #[test]
    fn empty_period_is_rejected() {
        let err = QuestLoader::parse(
            r#"(daily: [(key: "hunt", kind: hunt, base_target: 10, base_reward: (currency: 1, xp: 1))], weekly: [])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("weekly"));
    }
}
