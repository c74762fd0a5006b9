use crate::animals::animal::Animal;
use crate::animals::species::ClassTraits;
use crate::domain::model::DietType;
use crate::utils::error::{Result, ZooError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 建立動物時可選的物種參數
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimalOptions {
    pub species: Option<String>,
    pub diet: Option<DietType>,
    pub habitat: Option<String>,
    pub is_male: Option<bool>,
    pub pride_leader: Option<bool>,
    pub tusk_length: Option<f64>,
    pub wingspan: Option<f64>,
    pub can_fly: Option<bool>,
    pub is_venomous: Option<bool>,
    pub fur_color: Option<String>,
    pub is_nocturnal: Option<bool>,
    pub scale_type: Option<String>,
}

/// 設定檔中的動物定義。必填欄位以 Option 表示，缺漏時回報完整清單。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnimalConfig {
    #[serde(rename = "type")]
    pub animal_type: Option<String>,
    pub name: Option<String>,
    pub age: Option<u32>,
    pub enclosure: Option<String>,
    #[serde(flatten)]
    pub options: AnimalOptions,
}

pub type AnimalConstructor = Box<dyn Fn(&str, u32, &AnimalOptions) -> Result<Animal> + Send + Sync>;

/// 以註冊表建立動物的工廠
pub struct AnimalFactory {
    registry: BTreeMap<String, AnimalConstructor>,
}

impl fmt::Debug for AnimalFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimalFactory")
            .field("species", &self.available_species())
            .finish()
    }
}

impl Default for AnimalFactory {
    fn default() -> Self {
        Self::new()
    }
}

fn require<'a, T>(animal_type: &str, field: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| {
        ZooError::animal(format!(
            "Error creating {}: missing '{}'. Check required parameters.",
            animal_type, field
        ))
    })
}

impl AnimalFactory {
    pub fn new() -> Self {
        let mut factory = Self {
            registry: BTreeMap::new(),
        };

        // 大型貓科
        factory.register_animal("lion", |name, age, opts| {
            Ok(Animal::lion(
                name,
                age,
                opts.is_male.unwrap_or(true),
                opts.pride_leader.unwrap_or(false),
            ))
        });
        factory.register_animal("tiger", |name, age, _| Ok(Animal::tiger(name, age)));

        // 鳥類
        factory.register_animal("eagle", |name, age, opts| {
            Ok(Animal::eagle(name, age, opts.wingspan.unwrap_or(2.2)))
        });
        factory.register_animal("penguin", |name, age, _| Ok(Animal::penguin(name, age)));

        // 爬蟲類
        factory.register_animal("snake", |name, age, opts| {
            Ok(Animal::snake(name, age, opts.is_venomous.unwrap_or(false)))
        });

        // 草食哺乳類
        factory.register_animal("elephant", |name, age, opts| {
            Ok(Animal::elephant(name, age, opts.tusk_length.unwrap_or(1.5)))
        });
        factory.register_animal("giraffe", |name, age, _| Ok(Animal::giraffe(name, age)));
        factory.register_animal("zebra", |name, age, _| Ok(Animal::zebra(name, age)));

        // 通用綱別，需指定物種、食性與棲地
        factory.register_animal("mammal", |name, age, opts| {
            let traits = ClassTraits::Mammal {
                fur_color: opts.fur_color.clone().unwrap_or_else(|| "brown".to_string()),
                is_nocturnal: opts.is_nocturnal.unwrap_or(false),
            };
            Self::generic("mammal", name, age, opts, traits)
        });
        factory.register_animal("bird", |name, age, opts| {
            let traits = ClassTraits::Bird {
                wingspan: opts.wingspan.unwrap_or(1.0),
                can_fly: opts.can_fly.unwrap_or(true),
            };
            Self::generic("bird", name, age, opts, traits)
        });
        factory.register_animal("reptile", |name, age, opts| {
            let traits = ClassTraits::Reptile {
                scale_type: opts.scale_type.clone().unwrap_or_else(|| "smooth".to_string()),
                is_venomous: opts.is_venomous.unwrap_or(false),
            };
            Self::generic("reptile", name, age, opts, traits)
        });

        factory
    }

    fn generic(
        animal_type: &str,
        name: &str,
        age: u32,
        opts: &AnimalOptions,
        traits: ClassTraits,
    ) -> Result<Animal> {
        let species = require(animal_type, "species", &opts.species)?;
        let diet = require(animal_type, "diet", &opts.diet)?;
        let habitat = require(animal_type, "habitat", &opts.habitat)?;
        Ok(Animal::new(
            name,
            species.clone(),
            age,
            *diet,
            habitat.clone(),
            traits,
        ))
    }

    /// 註冊新的動物類型，同名時覆蓋
    pub fn register_animal<F>(&mut self, animal_type: &str, constructor: F)
    where
        F: Fn(&str, u32, &AnimalOptions) -> Result<Animal> + Send + Sync + 'static,
    {
        let key = animal_type.trim().to_lowercase();
        if self.registry.insert(key.clone(), Box::new(constructor)).is_some() {
            tracing::debug!("Replaced animal type registration: {}", key);
        } else {
            tracing::debug!("Registered animal type: {}", key);
        }
    }

    pub fn is_registered(&self, animal_type: &str) -> bool {
        self.registry
            .contains_key(&animal_type.trim().to_lowercase())
    }

    pub fn create_animal(
        &self,
        animal_type: &str,
        name: &str,
        age: u32,
        options: &AnimalOptions,
    ) -> Result<Animal> {
        let key = animal_type.trim().to_lowercase();

        let constructor = self.registry.get(&key).ok_or_else(|| {
            ZooError::animal(format!(
                "Unknown animal type: {}. Available: {}",
                key,
                self.available_species().join(", ")
            ))
        })?;

        let name = name.trim();
        if name.is_empty() {
            return Err(ZooError::animal("Animal name cannot be empty"));
        }

        let animal = constructor(name, age, options)?;
        tracing::debug!("Factory created {} the {}", animal.name(), animal.species());
        Ok(animal)
    }

    /// 已註冊的類型（已排序）
    pub fn available_species(&self) -> Vec<String> {
        self.registry.keys().cloned().collect()
    }

    pub fn create_from_config(&self, config: &AnimalConfig) -> Result<Animal> {
        let mut missing_keys = Vec::new();
        if config.animal_type.is_none() {
            missing_keys.push("type");
        }
        if config.name.is_none() {
            missing_keys.push("name");
        }
        if config.age.is_none() {
            missing_keys.push("age");
        }

        match (&config.animal_type, &config.name, config.age) {
            (Some(animal_type), Some(name), Some(age)) => {
                self.create_animal(animal_type, name, age, &config.options)
            }
            _ => Err(ZooError::animal(format!(
                "Missing required configuration keys: {:?}",
                missing_keys
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::AnimalClass;

    #[test]
    fn test_create_known_species_case_insensitive() {
        let factory = AnimalFactory::new();
        let lion = factory
            .create_animal("LION", "Simba", 4, &AnimalOptions::default())
            .unwrap();
        assert_eq!(lion.species(), "Lion");

        let eagle = factory
            .create_animal(
                "eagle",
                "Sky",
                2,
                &AnimalOptions {
                    wingspan: Some(2.5),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(eagle.info().attributes["wingspan"], serde_json::json!(2.5));
    }

    #[test]
    fn test_unknown_type_lists_available_species() {
        let factory = AnimalFactory::new();
        let err = factory
            .create_animal("dragon", "Smaug", 300, &AnimalOptions::default())
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Unknown animal type: dragon"));
        assert!(message.contains("penguin"));
    }

    #[test]
    fn test_generic_type_requires_species_diet_and_habitat() {
        let factory = AnimalFactory::new();
        let err = factory
            .create_animal("mammal", "Wolfie", 3, &AnimalOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("Check required parameters"));

        let wolf = factory
            .create_animal(
                "mammal",
                "Wolfie",
                3,
                &AnimalOptions {
                    species: Some("Wolf".to_string()),
                    diet: Some(DietType::Carnivore),
                    habitat: Some("forest".to_string()),
                    is_nocturnal: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(wolf.species(), "Wolf");
        assert_eq!(wolf.class(), AnimalClass::Mammal);
    }

    #[test]
    fn test_register_new_type() {
        let mut factory = AnimalFactory::new();
        factory.register_animal("Lizard", |name, age, _| {
            Ok(Animal::new(
                name,
                "Lizard",
                age,
                DietType::Omnivore,
                "forest",
                ClassTraits::reptile(),
            ))
        });

        assert!(factory.is_registered("lizard"));
        let lizard = factory
            .create_animal("lizard", "Liz", 1, &AnimalOptions::default())
            .unwrap();
        assert_eq!(lizard.class(), AnimalClass::Reptile);
    }

    #[test]
    fn test_available_species_sorted() {
        let species = AnimalFactory::new().available_species();
        let mut sorted = species.clone();
        sorted.sort();
        assert_eq!(species, sorted);
        assert_eq!(species.len(), 11);
    }

    #[test]
    fn test_create_from_config_reports_missing_keys() {
        let factory = AnimalFactory::new();
        let config = AnimalConfig {
            animal_type: Some("zebra".to_string()),
            ..Default::default()
        };
        let err = factory.create_from_config(&config).unwrap_err();
        assert!(err.to_string().contains("[\"name\", \"age\"]"));
    }

    #[test]
    fn test_blank_name_rejected() {
        let factory = AnimalFactory::new();
        assert!(factory
            .create_animal("zebra", "   ", 2, &AnimalOptions::default())
            .is_err());
    }
}
