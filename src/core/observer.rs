use crate::domain::model::{HealthEvent, HealthEventKind};
use crate::domain::ports::HealthObserver;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Serialize)]
pub struct HealthAlert {
    pub timestamp: DateTime<Utc>,
    pub message: String,
    #[serde(flatten)]
    pub event: HealthEvent,
}

/// 追蹤危急動物並保留警報紀錄
#[derive(Debug, Clone, Default)]
pub struct HealthMonitor {
    critical_animals: BTreeSet<String>,
    alert_history: Vec<HealthAlert>,
}

impl HealthMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// 目前危急的動物（`name_species`）
    pub fn critical_animals(&self) -> Vec<String> {
        self.critical_animals.iter().cloned().collect()
    }

    pub fn is_critical(&self, animal_id: &str) -> bool {
        self.critical_animals.contains(animal_id)
    }

    pub fn alert_history(&self) -> &[HealthAlert] {
        &self.alert_history
    }

    fn describe(event: &HealthEvent) -> String {
        match &event.kind {
            HealthEventKind::Critical { new_health, .. } => format!(
                "🚨 HEALTH ALERT: {} the {} is in critical condition ({:.1}% health)",
                event.animal, event.species, new_health
            ),
            HealthEventKind::Improved { new_health, .. } => format!(
                "💚 {} the {} is recovering ({:.1}% health)",
                event.animal, event.species, new_health
            ),
            HealthEventKind::Died { cause, .. } => format!(
                "💀 {} the {} has died ({})",
                event.animal, event.species, cause
            ),
        }
    }
}

impl HealthObserver for HealthMonitor {
    fn on_health_event(&mut self, event: &HealthEvent) {
        let animal_id = event.animal_id();
        match event.kind {
            HealthEventKind::Critical { .. } => {
                self.critical_animals.insert(animal_id);
            }
            HealthEventKind::Improved { .. } | HealthEventKind::Died { .. } => {
                self.critical_animals.remove(&animal_id);
            }
        }

        let message = Self::describe(event);
        match event.kind {
            HealthEventKind::Improved { .. } => tracing::info!("{}", message),
            _ => tracing::warn!("{}", message),
        }

        self.alert_history.push(HealthAlert {
            timestamp: Utc::now(),
            message,
            event: event.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(kind: HealthEventKind) -> HealthEvent {
        HealthEvent {
            animal: "Simba".to_string(),
            species: "Lion".to_string(),
            kind,
        }
    }

    #[test]
    fn test_critical_then_improved() {
        let mut monitor = HealthMonitor::new();
        monitor.on_health_event(&event(HealthEventKind::Critical {
            old_health: 40.0,
            new_health: 25.0,
            threshold: 30.0,
        }));
        assert!(monitor.is_critical("Simba_Lion"));

        monitor.on_health_event(&event(HealthEventKind::Improved {
            old_health: 25.0,
            new_health: 50.0,
            threshold: 30.0,
        }));
        assert!(monitor.critical_animals().is_empty());
        assert_eq!(monitor.alert_history().len(), 2);
        assert!(monitor.alert_history()[0].message.contains("critical condition"));
    }

    #[test]
    fn test_death_clears_critical_state() {
        let mut monitor = HealthMonitor::new();
        monitor.on_health_event(&event(HealthEventKind::Critical {
            old_health: 100.0,
            new_health: 0.0,
            threshold: 30.0,
        }));
        monitor.on_health_event(&event(HealthEventKind::Died {
            cause: "health_depleted".to_string(),
            final_health: 0.0,
        }));

        assert!(!monitor.is_critical("Simba_Lion"));
        assert!(monitor.alert_history()[1].message.contains("has died"));
    }
}
