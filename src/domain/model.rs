use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::utils::error::ZooError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DietType {
    Carnivore,
    Herbivore,
    Omnivore,
}

impl DietType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Carnivore => "carnivore",
            Self::Herbivore => "herbivore",
            Self::Omnivore => "omnivore",
        }
    }
}

impl fmt::Display for DietType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DietType {
    type Err = ZooError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "carnivore" => Ok(Self::Carnivore),
            "herbivore" => Ok(Self::Herbivore),
            "omnivore" => Ok(Self::Omnivore),
            other => Err(ZooError::animal(format!("Unknown diet type: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimalClass {
    Mammal,
    Bird,
    Reptile,
}

impl fmt::Display for AnimalClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Mammal => "mammal",
            Self::Bird => "bird",
            Self::Reptile => "reptile",
        };
        f.write_str(name)
    }
}

/// 動物進食的結果
#[derive(Debug, Clone, PartialEq)]
pub struct FeedOutcome {
    pub message: String,
    pub accepted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnimalInfo {
    pub name: String,
    pub species: String,
    pub age: u32,
    pub health: f64,
    pub hunger: f64,
    pub happiness: f64,
    pub diet: DietType,
    pub habitat: String,
    #[serde(rename = "type")]
    pub class: AnimalClass,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnclosureInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub habitat: String,
    pub capacity: usize,
    pub animal_count: usize,
    pub occupancy_percent: f64,
    pub cleanliness: f64,
    pub needs_cleaning: bool,
    pub compatible_species: Vec<String>,
    pub animals: Vec<AnimalInfo>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DayLedger {
    pub income: f64,
    pub costs: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourceStatus {
    pub funds: f64,
    pub daily_costs: f64,
    pub daily_income: f64,
    pub last_day: DayLedger,
    pub food_supply: BTreeMap<String, f64>,
    pub medicine_supply: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Financials {
    pub funds: f64,
    pub ticket_price: f64,
    pub daily_costs: f64,
    pub daily_income: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StaffInfo {
    pub name: String,
    pub role: String,
    pub specialization: String,
    pub salary: f64,
    pub on_shift: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ZooStatus {
    pub name: String,
    pub days_operational: u32,
    pub total_visitors: u64,
    pub visitors_today: u32,
    pub enclosure_count: usize,
    pub animal_count: usize,
    pub enclosures: Vec<EnclosureInfo>,
    pub staff: Vec<StaffInfo>,
    pub resources: ResourceStatus,
    pub financials: Financials,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub daily_operations: f64,
    pub per_animal: f64,
    pub per_enclosure: f64,
    pub staff_wages: f64,
    pub total_daily: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FeedingResult {
    pub enclosure: String,
    pub food_type: String,
    pub successful: Vec<String>,
    pub refused: Vec<String>,
    pub failed: Vec<String>,
}

impl FeedingResult {
    pub fn fed_count(&self) -> usize {
        self.successful.len()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RestockReport {
    pub ordered: Vec<String>,
    pub failed: Vec<String>,
}

impl RestockReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HealthEventKind {
    Critical {
        old_health: f64,
        new_health: f64,
        threshold: f64,
    },
    Improved {
        old_health: f64,
        new_health: f64,
        threshold: f64,
    },
    Died {
        cause: String,
        final_health: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthEvent {
    pub animal: String,
    pub species: String,
    #[serde(flatten)]
    pub kind: HealthEventKind,
}

impl HealthEvent {
    /// 健康監控使用的動物識別碼
    pub fn animal_id(&self) -> String {
        format!("{}_{}", self.animal, self.species)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Weather,
    Animal,
    Financial,
    Visitor,
    Special,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSeverity {
    Positive,
    Neutral,
    Negative,
    Critical,
}

impl EventSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Positive => "✨",
            Self::Neutral => "ℹ️",
            Self::Negative => "⚠️",
            Self::Critical => "🚨",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventOutcome {
    pub messages: Vec<String>,
    pub health_impact: f64,
    pub happiness_impact: f64,
    pub visitor_impact: i64,
    pub financial_impact: f64,
    pub new_animal: Option<String>,
    pub lost_animal: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventSummary {
    pub name: String,
    pub event_type: EventType,
    pub severity: EventSeverity,
    pub outcome: EventOutcome,
}

impl fmt::Display for EventSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.severity.emoji(), self.name)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DayReport {
    pub day: u32,
    pub special_events: Vec<EventSummary>,
    pub event_messages: Vec<String>,
    pub behavior_events: Vec<String>,
    pub critical_animals: Vec<String>,
    pub deceased: Vec<String>,
    pub zoo_status: ZooStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diet_type_parsing_is_case_insensitive() {
        assert_eq!("Carnivore".parse::<DietType>().unwrap(), DietType::Carnivore);
        assert_eq!(" herbivore ".parse::<DietType>().unwrap(), DietType::Herbivore);
        assert!("photosynthesis".parse::<DietType>().is_err());
    }

    #[test]
    fn test_animal_info_serializes_flat_attributes() {
        let mut attributes = BTreeMap::new();
        attributes.insert("can_fly".to_string(), serde_json::json!(true));
        let info = AnimalInfo {
            name: "Sky".to_string(),
            species: "Eagle".to_string(),
            age: 3,
            health: 100.0,
            hunger: 0.0,
            happiness: 100.0,
            diet: DietType::Carnivore,
            habitat: "mountains".to_string(),
            class: AnimalClass::Bird,
            attributes,
        };

        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["type"], "bird");
        assert_eq!(value["diet"], "carnivore");
        assert_eq!(value["can_fly"], true);
    }

    #[test]
    fn test_health_event_id() {
        let event = HealthEvent {
            animal: "Simba".to_string(),
            species: "Lion".to_string(),
            kind: HealthEventKind::Died {
                cause: "health_depleted".to_string(),
                final_health: 0.0,
            },
        };
        assert_eq!(event.animal_id(), "Simba_Lion");
    }
}
