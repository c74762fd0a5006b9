use crate::animals::animal::Animal;
use crate::domain::model::{AnimalClass, DietType};

/// 綱別共有的特徵（哺乳類、鳥類、爬蟲類）
#[derive(Debug, Clone, PartialEq)]
pub enum ClassTraits {
    Mammal { fur_color: String, is_nocturnal: bool },
    Bird { wingspan: f64, can_fly: bool },
    Reptile { scale_type: String, is_venomous: bool },
}

impl ClassTraits {
    pub fn mammal() -> Self {
        Self::Mammal {
            fur_color: "brown".to_string(),
            is_nocturnal: false,
        }
    }

    pub fn bird() -> Self {
        Self::Bird {
            wingspan: 1.0,
            can_fly: true,
        }
    }

    pub fn reptile() -> Self {
        Self::Reptile {
            scale_type: "smooth".to_string(),
            is_venomous: false,
        }
    }

    pub fn class(&self) -> AnimalClass {
        match self {
            Self::Mammal { .. } => AnimalClass::Mammal,
            Self::Bird { .. } => AnimalClass::Bird,
            Self::Reptile { .. } => AnimalClass::Reptile,
        }
    }
}

/// 具有專屬行為的物種。其他物種（老虎、長頸鹿、斑馬、自訂物種）只套用綱別行為。
#[derive(Debug, Clone, PartialEq)]
pub enum Species {
    Lion { is_male: bool, pride_leader: bool },
    Elephant { tusk_length: f64 },
    Eagle { vision_range_km: f64 },
    Penguin { swimming_speed_kmh: f64 },
    Snake,
    Generic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    GiveBirth,
    Hunt,
    SprayWater,
    Fly,
    Soar,
    Slide,
    ShedSkin,
    Bask,
    Slither,
}

impl Behavior {
    pub const ALL: [Behavior; 9] = [
        Behavior::GiveBirth,
        Behavior::Hunt,
        Behavior::SprayWater,
        Behavior::Fly,
        Behavior::Soar,
        Behavior::Slide,
        Behavior::ShedSkin,
        Behavior::Bask,
        Behavior::Slither,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::GiveBirth => "give birth",
            Self::Hunt => "hunt",
            Self::SprayWater => "spray water",
            Self::Fly => "fly",
            Self::Soar => "soar",
            Self::Slide => "slide",
            Self::ShedSkin => "shed skin",
            Self::Bask => "bask",
            Self::Slither => "slither",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = label.trim().to_lowercase().replace(['_', '-'], " ");
        Self::ALL.into_iter().find(|b| b.label() == wanted)
    }
}

impl Animal {
    pub fn lion(name: impl Into<String>, age: u32, is_male: bool, pride_leader: bool) -> Self {
        Animal::new(
            name,
            "Lion",
            age,
            DietType::Carnivore,
            "savannah",
            ClassTraits::Mammal {
                fur_color: "golden".to_string(),
                is_nocturnal: false,
            },
        )
        .with_species(Species::Lion {
            is_male,
            pride_leader,
        })
    }

    pub fn tiger(name: impl Into<String>, age: u32) -> Self {
        Animal::new(
            name,
            "Tiger",
            age,
            DietType::Carnivore,
            "jungle",
            ClassTraits::mammal(),
        )
    }

    pub fn elephant(name: impl Into<String>, age: u32, tusk_length: f64) -> Self {
        Animal::new(
            name,
            "Elephant",
            age,
            DietType::Herbivore,
            "savannah",
            ClassTraits::Mammal {
                fur_color: "gray".to_string(),
                is_nocturnal: false,
            },
        )
        .with_species(Species::Elephant { tusk_length })
    }

    pub fn giraffe(name: impl Into<String>, age: u32) -> Self {
        Animal::new(
            name,
            "Giraffe",
            age,
            DietType::Herbivore,
            "savannah",
            ClassTraits::mammal(),
        )
    }

    pub fn zebra(name: impl Into<String>, age: u32) -> Self {
        Animal::new(
            name,
            "Zebra",
            age,
            DietType::Herbivore,
            "savannah",
            ClassTraits::mammal(),
        )
    }

    pub fn eagle(name: impl Into<String>, age: u32, wingspan: f64) -> Self {
        Animal::new(
            name,
            "Eagle",
            age,
            DietType::Carnivore,
            "mountains",
            ClassTraits::Bird {
                wingspan,
                can_fly: true,
            },
        )
        .with_species(Species::Eagle {
            vision_range_km: 3.0,
        })
    }

    pub fn penguin(name: impl Into<String>, age: u32) -> Self {
        Animal::new(
            name,
            "Penguin",
            age,
            DietType::Carnivore,
            "arctic",
            ClassTraits::Bird {
                wingspan: 0.3,
                can_fly: false,
            },
        )
        .with_species(Species::Penguin {
            swimming_speed_kmh: 8.0,
        })
    }

    pub fn snake(name: impl Into<String>, age: u32, is_venomous: bool) -> Self {
        Animal::new(
            name,
            "Snake",
            age,
            DietType::Carnivore,
            "forest",
            ClassTraits::Reptile {
                scale_type: "smooth".to_string(),
                is_venomous,
            },
        )
        .with_species(Species::Snake)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_species_constructors_fix_diet_and_habitat() {
        let lion = Animal::lion("Simba", 4, true, false);
        assert_eq!(lion.species(), "Lion");
        assert_eq!(lion.diet(), DietType::Carnivore);
        assert_eq!(lion.habitat(), "savannah");
        assert_eq!(lion.class(), AnimalClass::Mammal);

        let penguin = Animal::penguin("Pingu", 2);
        assert_eq!(penguin.class(), AnimalClass::Bird);
        assert!(!penguin.can_fly());

        let snake = Animal::snake("Kaa", 7, true);
        assert_eq!(snake.class(), AnimalClass::Reptile);
        assert_eq!(snake.habitat(), "forest");
    }

    #[test]
    fn test_behavior_from_label() {
        assert_eq!(Behavior::from_label("Spray_Water"), Some(Behavior::SprayWater));
        assert_eq!(Behavior::from_label("shed-skin"), Some(Behavior::ShedSkin));
        assert_eq!(Behavior::from_label("juggle"), None);
    }
}
