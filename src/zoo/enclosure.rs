use crate::animals::Animal;
use crate::domain::model::{DietType, EnclosureInfo, FeedingResult, HealthEvent};
use crate::domain::ports::{Cleanable, Feedable};
use crate::utils::error::{Result, ZooError};
use crate::zoo::resources::ResourceManager;
use rand::Rng;

/// 每隻動物每餐所需食物（公斤）
pub const FOOD_PER_ANIMAL_KG: f64 = 2.0;
const DIRTY_THRESHOLD: f64 = 30.0;
const UNPLEASANT_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone)]
pub struct Enclosure {
    name: String,
    capacity: usize,
    habitat: String,
    compatible_species: Vec<String>,
    animals: Vec<Animal>,
    cleanliness: f64,
}

impl Enclosure {
    pub fn new(
        name: impl Into<String>,
        capacity: usize,
        habitat: impl Into<String>,
        compatible_species: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            capacity,
            habitat: habitat.into(),
            compatible_species,
            animals: Vec::new(),
            cleanliness: 100.0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn habitat(&self) -> &str {
        &self.habitat
    }

    pub fn compatible_species(&self) -> &[String] {
        &self.compatible_species
    }

    pub fn animal_count(&self) -> usize {
        self.animals.len()
    }

    pub fn animals(&self) -> &[Animal] {
        &self.animals
    }

    pub fn animals_mut(&mut self) -> &mut [Animal] {
        &mut self.animals
    }

    pub fn find_animal_mut(&mut self, name: &str) -> Option<&mut Animal> {
        self.animals
            .iter_mut()
            .find(|animal| animal.name().eq_ignore_ascii_case(name))
    }

    pub fn is_full(&self) -> bool {
        self.animals.len() >= self.capacity
    }

    /// 雨天等事件可直接改變清潔度
    pub fn adjust_cleanliness(&mut self, amount: f64) {
        self.cleanliness = (self.cleanliness + amount).clamp(0.0, 100.0);
    }

    pub fn add_animal(&mut self, animal: Animal) -> Result<()> {
        if self.is_full() {
            return Err(ZooError::enclosure(format!(
                "Enclosure '{}' is at capacity ({} animals)",
                self.name, self.capacity
            )));
        }

        if let Err(reason) = self.check_compatibility(&animal) {
            let existing: Vec<&str> = self.animals.iter().map(|a| a.species()).collect();
            tracing::debug!("Compatibility check failed: {}", reason);
            return Err(ZooError::CompatibilityError {
                message: format!(
                    "Cannot add {} to enclosure with {:?}: {}",
                    animal.species(),
                    existing,
                    reason
                ),
                animal1_species: animal.species().to_string(),
                animal2_species: existing.first().copied().unwrap_or("none").to_string(),
            });
        }

        if animal.habitat() != self.habitat {
            tracing::warn!(
                "⚠️  {} prefers {} but is in {}",
                animal.species(),
                animal.habitat(),
                self.habitat
            );
        }

        tracing::info!(
            "✅ Added {} the {} to {}",
            animal.name(),
            animal.species(),
            self.name
        );
        self.animals.push(animal);
        Ok(())
    }

    /// 相容性檢查：空圍欄接受任何動物
    fn check_compatibility(&self, new_animal: &Animal) -> std::result::Result<(), String> {
        if self.animals.is_empty() {
            return Ok(());
        }

        if !self.compatible_species.is_empty()
            && !self
                .compatible_species
                .iter()
                .any(|s| s == new_animal.species())
        {
            return Err(format!(
                "{} not in compatible species list {:?}",
                new_animal.species(),
                self.compatible_species
            ));
        }

        for existing in &self.animals {
            if existing.species() == new_animal.species() {
                continue;
            }
            let existing_carnivore = existing.diet() == DietType::Carnivore;
            let new_carnivore = new_animal.diet() == DietType::Carnivore;
            if existing_carnivore != new_carnivore {
                let (hunter, prey) = if existing_carnivore {
                    (existing.species(), new_animal.species())
                } else {
                    (new_animal.species(), existing.species())
                };
                return Err(format!(
                    "carnivore conflict between {} and {}",
                    hunter, prey
                ));
            }
        }

        Ok(())
    }

    pub fn remove_animal(&mut self, animal_name: &str) -> Option<Animal> {
        let index = self
            .animals
            .iter()
            .position(|animal| animal.name().eq_ignore_ascii_case(animal_name))?;
        let removed = self.animals.remove(index);
        tracing::info!("❌ Removed {} from {}", removed.name(), self.name);
        Some(removed)
    }

    /// 移除健康歸零的動物
    pub fn remove_deceased(&mut self) -> Vec<Animal> {
        let (dead, alive): (Vec<Animal>, Vec<Animal>) =
            std::mem::take(&mut self.animals)
                .into_iter()
                .partition(|animal| !animal.is_alive());
        self.animals = alive;
        dead
    }

    pub fn feed_animals(&mut self, food_type: &str, resources: &mut ResourceManager) -> FeedingResult {
        let mut result = FeedingResult {
            enclosure: self.name.clone(),
            food_type: food_type.to_string(),
            ..Default::default()
        };

        let total_food_needed = self.animals.len() as f64 * FOOD_PER_ANIMAL_KG;
        if let Err(e) = resources.use_food(food_type, total_food_needed) {
            result.failed.push(format!("Food supply error: {}", e));
            return result;
        }

        for animal in self.animals.iter_mut() {
            let outcome = animal.feed(food_type);
            let entry = format!("{}: {}", animal.name(), outcome.message);
            if outcome.accepted {
                result.successful.push(entry);
            } else {
                result.refused.push(entry);
            }
        }

        result
    }

    pub fn update_daily_status<R: Rng>(&mut self, rng: &mut R) {
        let dirt_per_animal = rng.random_range(2.0..8.0);
        self.adjust_cleanliness(-(self.animals.len() as f64 * dirt_per_animal));

        for animal in self.animals.iter_mut() {
            animal.update_daily_status(rng);
        }

        if self.cleanliness < UNPLEASANT_THRESHOLD {
            for animal in self.animals.iter_mut() {
                animal.adjust_happiness(-5.0);
            }
        }
    }

    pub fn take_health_events(&mut self) -> Vec<HealthEvent> {
        self.animals
            .iter_mut()
            .flat_map(|animal| animal.take_health_events())
            .collect()
    }

    pub fn occupancy(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.animals.len() as f64 / self.capacity as f64 * 100.0
    }

    pub fn info(&self) -> EnclosureInfo {
        EnclosureInfo {
            name: self.name.clone(),
            habitat: self.habitat.clone(),
            capacity: self.capacity,
            animal_count: self.animals.len(),
            occupancy_percent: self.occupancy(),
            cleanliness: self.cleanliness,
            needs_cleaning: self.needs_cleaning(),
            compatible_species: self.compatible_species.clone(),
            animals: self.animals.iter().map(Animal::info).collect(),
        }
    }
}

impl Cleanable for Enclosure {
    fn clean(&mut self) {
        let old_cleanliness = self.cleanliness;
        self.cleanliness = 100.0;
        tracing::info!(
            "🧹 Cleaned {}. Cleanliness: {:.1}% → 100.0%",
            self.name,
            old_cleanliness
        );
    }

    fn cleanliness(&self) -> f64 {
        self.cleanliness
    }

    fn needs_cleaning(&self) -> bool {
        self.cleanliness < DIRTY_THRESHOLD
    }
}
