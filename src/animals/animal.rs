use crate::animals::species::{ClassTraits, Species};
use crate::domain::model::{AnimalClass, AnimalInfo, DietType, HealthEvent, HealthEventKind};
use rand::Rng;
use serde_json::json;
use std::collections::BTreeMap;
use std::fmt;

/// 健康值低於（含）此門檻即視為危急
pub const CRITICAL_HEALTH_THRESHOLD: f64 = 30.0;

const MIN_VITAL: f64 = 0.0;
const MAX_VITAL: f64 = 100.0;

fn clamp_vital(value: f64) -> f64 {
    value.clamp(MIN_VITAL, MAX_VITAL)
}

/// 動物園中的動物。健康、飢餓、快樂度都限制在 0-100。
#[derive(Debug, Clone)]
pub struct Animal {
    name: String,
    species: String,
    age: u32,
    diet: DietType,
    habitat: String,
    health: f64,
    hunger: f64,
    happiness: f64,
    pub(crate) traits: ClassTraits,
    pub(crate) kind: Species,
    health_events: Vec<HealthEvent>,
}

impl Animal {
    pub fn new(
        name: impl Into<String>,
        species: impl Into<String>,
        age: u32,
        diet: DietType,
        habitat: impl Into<String>,
        traits: ClassTraits,
    ) -> Self {
        Self {
            name: name.into(),
            species: species.into(),
            age,
            diet,
            habitat: habitat.into(),
            health: MAX_VITAL,
            hunger: MIN_VITAL,
            happiness: MAX_VITAL,
            traits,
            kind: Species::Generic,
            health_events: Vec::new(),
        }
    }

    pub(crate) fn with_species(mut self, kind: Species) -> Self {
        self.kind = kind;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn diet(&self) -> DietType {
        self.diet
    }

    pub fn habitat(&self) -> &str {
        &self.habitat
    }

    pub fn health(&self) -> f64 {
        self.health
    }

    pub fn hunger(&self) -> f64 {
        self.hunger
    }

    pub fn happiness(&self) -> f64 {
        self.happiness
    }

    pub fn class(&self) -> AnimalClass {
        self.traits.class()
    }

    pub fn traits(&self) -> &ClassTraits {
        &self.traits
    }

    pub fn kind(&self) -> &Species {
        &self.kind
    }

    pub fn is_alive(&self) -> bool {
        self.health > MIN_VITAL
    }

    pub fn can_fly(&self) -> bool {
        matches!(self.traits, ClassTraits::Bird { can_fly: true, .. })
    }

    pub fn is_venomous(&self) -> bool {
        matches!(
            self.traits,
            ClassTraits::Reptile {
                is_venomous: true,
                ..
            }
        )
    }

    /// 調整健康值，跨越危急門檻或歸零時記錄健康事件
    pub fn adjust_health(&mut self, amount: f64) {
        let old_health = self.health;
        self.health = clamp_vital(old_health + amount);
        let new_health = self.health;
        let threshold = CRITICAL_HEALTH_THRESHOLD;

        if new_health <= threshold && old_health > threshold {
            self.push_health_event(HealthEventKind::Critical {
                old_health,
                new_health,
                threshold,
            });
        } else if new_health > threshold && old_health <= threshold {
            self.push_health_event(HealthEventKind::Improved {
                old_health,
                new_health,
                threshold,
            });
        }

        if new_health <= MIN_VITAL && old_health > MIN_VITAL {
            self.push_health_event(HealthEventKind::Died {
                cause: "health_depleted".to_string(),
                final_health: new_health,
            });
        }
    }

    pub fn adjust_hunger(&mut self, amount: f64) {
        self.hunger = clamp_vital(self.hunger + amount);
    }

    pub fn adjust_happiness(&mut self, amount: f64) {
        self.happiness = clamp_vital(self.happiness + amount);
    }

    fn push_health_event(&mut self, kind: HealthEventKind) {
        self.health_events.push(HealthEvent {
            animal: self.name.clone(),
            species: self.species.clone(),
            kind,
        });
    }

    /// 取出尚未派送的健康事件
    pub fn take_health_events(&mut self) -> Vec<HealthEvent> {
        std::mem::take(&mut self.health_events)
    }

    /// 模擬一天的狀態變化
    pub fn update_daily_status<R: Rng>(&mut self, rng: &mut R) {
        self.adjust_hunger(rng.random_range(5.0..15.0));

        if self.hunger > 70.0 {
            self.adjust_health(-rng.random_range(2.0..5.0));
        }

        let happiness_decrease = self.hunger * 0.1 + f64::from(self.age) * 0.5;
        self.adjust_happiness(-happiness_decrease);

        if rng.random_bool(0.1) {
            self.adjust_health(-rng.random_range(1.0..3.0));
        }

        match self.class() {
            // 群居互動
            AnimalClass::Mammal => {
                if rng.random_bool(0.3) {
                    self.adjust_happiness(2.0);
                }
            }
            AnimalClass::Bird => {
                if self.can_fly() {
                    self.adjust_hunger(5.0);
                }
            }
            // 代謝慢，偶爾曬太陽
            AnimalClass::Reptile => {
                self.adjust_hunger(-5.0);
                if rng.random_bool(0.4) {
                    self.adjust_happiness(3.0);
                }
            }
        }
    }

    pub fn info(&self) -> AnimalInfo {
        let mut attributes = BTreeMap::new();

        match &self.traits {
            ClassTraits::Mammal {
                fur_color,
                is_nocturnal,
            } => {
                attributes.insert("fur_color".to_string(), json!(fur_color));
                attributes.insert("is_nocturnal".to_string(), json!(is_nocturnal));
            }
            ClassTraits::Bird { wingspan, can_fly } => {
                attributes.insert("wingspan".to_string(), json!(wingspan));
                attributes.insert("can_fly".to_string(), json!(can_fly));
            }
            ClassTraits::Reptile {
                scale_type,
                is_venomous,
            } => {
                attributes.insert("scale_type".to_string(), json!(scale_type));
                attributes.insert("is_venomous".to_string(), json!(is_venomous));
            }
        }

        match &self.kind {
            Species::Lion {
                is_male,
                pride_leader,
            } => {
                let mane_size = if *is_male { "large" } else { "none" };
                attributes.insert("is_male".to_string(), json!(is_male));
                attributes.insert("mane_size".to_string(), json!(mane_size));
                attributes.insert("pride_leader".to_string(), json!(pride_leader));
            }
            Species::Elephant { tusk_length } => {
                attributes.insert("tusk_length".to_string(), json!(tusk_length));
                attributes.insert("trunk_skill".to_string(), json!("basic"));
            }
            Species::Eagle { vision_range_km } => {
                attributes.insert("vision_range_km".to_string(), json!(vision_range_km));
            }
            Species::Penguin { swimming_speed_kmh } => {
                attributes.insert("swimming_speed_kmh".to_string(), json!(swimming_speed_kmh));
            }
            Species::Snake | Species::Generic => {}
        }

        AnimalInfo {
            name: self.name.clone(),
            species: self.species.clone(),
            age: self.age,
            health: self.health,
            hunger: self.hunger,
            happiness: self.happiness,
            diet: self.diet,
            habitat: self.habitat.clone(),
            class: self.class(),
            attributes,
        }
    }
}

impl fmt::Display for Animal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} the {} (Health: {:.1}%)",
            self.name, self.species, self.health
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn zebra() -> Animal {
        Animal::zebra("Marty", 3)
    }

    #[test]
    fn test_new_animal_starts_healthy() {
        let animal = zebra();
        assert_eq!(animal.health(), 100.0);
        assert_eq!(animal.hunger(), 0.0);
        assert_eq!(animal.happiness(), 100.0);
        assert_eq!(animal.to_string(), "Marty the Zebra (Health: 100.0%)");
    }

    #[test]
    fn test_vitals_are_clamped() {
        let mut animal = zebra();
        animal.adjust_hunger(-50.0);
        animal.adjust_happiness(40.0);
        assert_eq!(animal.hunger(), 0.0);
        assert_eq!(animal.happiness(), 100.0);

        animal.adjust_hunger(250.0);
        assert_eq!(animal.hunger(), 100.0);
    }

    #[test]
    fn test_health_crossing_threshold_emits_events() {
        let mut animal = zebra();
        animal.adjust_health(-75.0);
        let events = animal.take_health_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0].kind, HealthEventKind::Critical { .. }));

        animal.adjust_health(-5.0);
        assert!(animal.take_health_events().is_empty());

        animal.adjust_health(20.0);
        let events = animal.take_health_events();
        assert!(matches!(events[0].kind, HealthEventKind::Improved { .. }));
    }

    #[test]
    fn test_single_fatal_drop_reports_critical_and_death() {
        let mut animal = zebra();
        animal.adjust_health(-500.0);
        assert!(!animal.is_alive());

        let events = animal.take_health_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0].kind, HealthEventKind::Critical { .. }));
        assert!(matches!(events[1].kind, HealthEventKind::Died { .. }));
    }

    #[test]
    fn test_daily_update_keeps_vitals_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut animals = vec![
            Animal::lion("Simba", 12, true, true),
            Animal::eagle("Sky", 4, 2.2),
            Animal::snake("Kaa", 30, false),
        ];

        for _ in 0..60 {
            for animal in animals.iter_mut() {
                animal.update_daily_status(&mut rng);
                for value in [animal.health(), animal.hunger(), animal.happiness()] {
                    assert!((0.0..=100.0).contains(&value));
                }
            }
        }

        // 不餵食兩個月後，老獅子必定飢餓
        assert!(animals[0].hunger() > 70.0);
    }

    #[test]
    fn test_reptile_gets_hungry_slower_than_flying_bird() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut snake = Animal::snake("Kaa", 2, false);
        let mut eagle = Animal::eagle("Sky", 2, 2.2);

        for _ in 0..3 {
            snake.update_daily_status(&mut rng);
            eagle.update_daily_status(&mut rng);
        }

        // 蛇每日最多 +10，老鷹每日至少 +10
        assert!(snake.hunger() <= 30.0);
        assert!(eagle.hunger() >= 30.0);
    }

    #[test]
    fn test_info_includes_species_attributes() {
        let info = Animal::lion("Nala", 5, false, false).info();
        assert_eq!(info.attributes["mane_size"], json!("none"));
        assert_eq!(info.attributes["fur_color"], json!("golden"));
        assert_eq!(info.class, AnimalClass::Mammal);
    }
}
