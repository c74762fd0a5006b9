use crate::animals::AnimalConfig;
use crate::core::engine::{Autopilot, DEFAULT_RESTOCK_THRESHOLD_KG};
use crate::core::events::{EventManager, DEFAULT_MAX_EVENTS_PER_DAY};
use crate::core::game_manager::{starter_enclosures, ZooManager, DEFAULT_INITIAL_FUNDS};
use crate::utils::error::{Result, ZooError};
use crate::utils::validation::{self, Validate};
use crate::zoo::{Enclosure, Zoo, DEFAULT_TICKET_PRICE};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const MAX_ANIMAL_AGE: u32 = 50;

/// 遊戲情境設定，對應 TOML 檔
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub zoo: ZooSection,
    pub simulation: SimulationSection,
    pub autopilot: AutopilotSection,
    pub enclosures: Vec<EnclosureConfig>,
    pub animals: Vec<AnimalConfig>,
    pub staff: Vec<StaffConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZooSection {
    pub name: String,
    pub initial_funds: f64,
    pub ticket_price: f64,
}

impl Default for ZooSection {
    fn default() -> Self {
        Self {
            name: "OzZoo".to_string(),
            initial_funds: DEFAULT_INITIAL_FUNDS,
            ticket_price: DEFAULT_TICKET_PRICE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSection {
    pub days: Option<u32>,
    pub seed: Option<u64>,
    pub events_enabled: bool,
    pub max_events_per_day: usize,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            days: None,
            seed: None,
            events_enabled: true,
            max_events_per_day: DEFAULT_MAX_EVENTS_PER_DAY,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutopilotSection {
    pub feed: bool,
    pub clean: bool,
    pub restock: bool,
    pub restock_threshold_kg: f64,
}

impl Default for AutopilotSection {
    fn default() -> Self {
        Self {
            feed: true,
            clean: true,
            restock: true,
            restock_threshold_kg: DEFAULT_RESTOCK_THRESHOLD_KG,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnclosureConfig {
    pub name: String,
    pub capacity: usize,
    #[serde(rename = "type")]
    pub habitat: String,
    #[serde(default)]
    pub compatible_species: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffConfig {
    pub name: String,
    pub salary: f64,
    pub specialization: Option<String>,
}

impl ScenarioConfig {
    /// 從 TOML 檔案載入情境
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading scenario from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(ZooError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${ZOO_NAME})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ZooError::config(format!("Invalid substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 沒有設定圍欄時使用預設圍欄
    pub fn enclosures(&self) -> Vec<Enclosure> {
        if self.enclosures.is_empty() {
            return starter_enclosures();
        }
        self.enclosures
            .iter()
            .map(|e| {
                Enclosure::new(
                    e.name.trim(),
                    e.capacity,
                    e.habitat.trim(),
                    e.compatible_species.clone(),
                )
            })
            .collect()
    }

    pub fn autopilot(&self) -> Autopilot {
        Autopilot {
            feed: self.autopilot.feed,
            clean: self.autopilot.clean,
            restock: self.autopilot.restock,
            restock_threshold_kg: self.autopilot.restock_threshold_kg,
        }
    }

    /// 尚未建立動物園的遊戲，互動模式由玩家命名
    pub fn new_manager(&self) -> ZooManager {
        let mut event_manager =
            EventManager::new().with_max_per_day(self.simulation.max_events_per_day);
        event_manager.set_enabled(self.simulation.events_enabled);

        ZooManager::new(self.simulation.seed).with_event_manager(event_manager)
    }

    /// 依情境建立遊戲：動物園、圍欄、動物與員工
    pub fn build_manager(&self) -> Result<ZooManager> {
        let mut manager = self.new_manager();

        let zoo = Zoo::new(self.zoo.name.trim(), self.zoo.initial_funds)
            .with_ticket_price(self.zoo.ticket_price);
        manager.create_zoo_with(zoo, self.enclosures())?;

        for (i, animal) in self.animals.iter().enumerate() {
            let enclosure = validation::validate_required_field(
                &format!("animals[{}].enclosure", i),
                &animal.enclosure,
            )?;
            let animal = manager.factory().create_from_config(animal)?;
            manager.place_animal(animal, enclosure)?;
        }

        for member in &self.staff {
            manager.hire_staff(&member.name, member.salary, member.specialization.clone())?;
        }

        Ok(manager)
    }
}

impl Validate for ScenarioConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("zoo.name", &self.zoo.name)?;
        validation::validate_finite_range(
            "zoo.initial_funds",
            self.zoo.initial_funds,
            0.0,
            f64::MAX,
        )?;
        validation::validate_finite_range(
            "zoo.ticket_price",
            self.zoo.ticket_price,
            0.0,
            1_000.0,
        )?;
        validation::validate_positive_number(
            "simulation.max_events_per_day",
            self.simulation.max_events_per_day,
            1,
        )?;
        if let Some(days) = self.simulation.days {
            validation::validate_positive_number("simulation.days", days as usize, 1)?;
        }
        validation::validate_finite_range(
            "autopilot.restock_threshold_kg",
            self.autopilot.restock_threshold_kg,
            0.0,
            f64::MAX,
        )?;

        for (i, enclosure) in self.enclosures.iter().enumerate() {
            validation::validate_non_empty_string(&format!("enclosures[{}].name", i), &enclosure.name)?;
            validation::validate_non_empty_string(&format!("enclosures[{}].type", i), &enclosure.habitat)?;
            validation::validate_positive_number(
                &format!("enclosures[{}].capacity", i),
                enclosure.capacity,
                1,
            )?;
        }
        validation::validate_unique_names(
            "enclosures.name",
            self.enclosures.iter().map(|e| e.name.trim()),
        )?;

        let enclosure_names: Vec<String> = self
            .enclosures()
            .iter()
            .map(|e| e.name().to_lowercase())
            .collect();
        for (i, animal) in self.animals.iter().enumerate() {
            if let Some(age) = animal.age {
                validation::validate_range(&format!("animals[{}].age", i), age, 0, MAX_ANIMAL_AGE)?;
            }
            if let Some(enclosure) = &animal.enclosure {
                if !enclosure_names.contains(&enclosure.trim().to_lowercase()) {
                    return Err(ZooError::InvalidConfigValueError {
                        field: format!("animals[{}].enclosure", i),
                        value: enclosure.clone(),
                        reason: "No enclosure with this name".to_string(),
                    });
                }
            }
        }

        for (i, member) in self.staff.iter().enumerate() {
            validation::validate_non_empty_string(&format!("staff[{}].name", i), &member.name)?;
            validation::validate_finite_range(
                &format!("staff[{}].salary", i),
                member.salary,
                0.0,
                f64::MAX,
            )?;
        }
        validation::validate_unique_names("staff.name", self.staff.iter().map(|s| s.name.trim()))?;

        Ok(())
    }
}
