use crate::animals::animal::Animal;
use crate::animals::species::{Behavior, ClassTraits, Species};
use crate::domain::model::{DietType, FeedOutcome};
use crate::domain::ports::Feedable;
use crate::utils::error::{Result, ZooError};

fn contains_any(food: &str, keywords: &[&str]) -> bool {
    let food = food.to_lowercase();
    keywords.iter().any(|keyword| food.contains(keyword))
}

fn accepted(message: String) -> FeedOutcome {
    FeedOutcome {
        message,
        accepted: true,
    }
}

fn refused(message: String) -> FeedOutcome {
    FeedOutcome {
        message,
        accepted: false,
    }
}

impl Animal {
    pub fn make_sound(&self) -> String {
        match (self.kind(), self.traits()) {
            (Species::Lion { pride_leader: true, .. }, _) => {
                "ROAR! 🦁 (The ground trembles with authority!)".to_string()
            }
            (Species::Lion { .. }, _) => "Rooaar! 🦁".to_string(),
            (Species::Elephant { .. }, _) => "Trumpet! 🐘".to_string(),
            (Species::Eagle { .. }, _) => "Screeeech! 🦅".to_string(),
            (Species::Penguin { .. }, _) => "Honk! 🐧".to_string(),
            (Species::Snake, _) => "Hiss! 🐍".to_string(),
            (Species::Generic, ClassTraits::Mammal { .. }) => "Generic mammal sound!".to_string(),
            (Species::Generic, ClassTraits::Bird { .. }) => "Chirp chirp!".to_string(),
            (Species::Generic, ClassTraits::Reptile { .. }) => "Hiss!".to_string(),
        }
    }

    /// 餵食，依物種決定接受與否與數值變化
    pub fn eat(&mut self, food: &str) -> FeedOutcome {
        let name = self.name().to_string();

        match self.kind().clone() {
            Species::Lion { pride_leader, .. } => {
                if !contains_any(food, &["meat"]) {
                    return refused(format!(
                        "{} stares at the {} with disdain - this is not meat!",
                        name, food
                    ));
                }
                self.adjust_hunger(-35.0);
                self.adjust_happiness(10.0);
                if pride_leader {
                    accepted(format!("{} eats the {} first as pride leader! 🦁", name, food))
                } else {
                    accepted(format!("{} devours the {} hungrily! 🦁", name, food))
                }
            }
            Species::Elephant { .. } => {
                if contains_any(food, &["fruit", "vegetable"]) {
                    self.adjust_hunger(-25.0);
                    self.adjust_happiness(8.0);
                    accepted(format!(
                        "{} uses its trunk to eat the {} happily! 🐘",
                        name, food
                    ))
                } else {
                    self.adjust_hunger(-15.0);
                    accepted(format!("{} cautiously samples the {}.", name, food))
                }
            }
            Species::Eagle { .. } => {
                if contains_any(food, &["fish", "rodent"]) {
                    self.adjust_hunger(-30.0);
                    self.adjust_happiness(12.0);
                    accepted(format!(
                        "{} tears into the {} with sharp talons! 🦅",
                        name, food
                    ))
                } else {
                    self.adjust_hunger(-15.0);
                    accepted(format!("{} picks at the {} reluctantly.", name, food))
                }
            }
            Species::Penguin { .. } => {
                if contains_any(food, &["fish"]) {
                    self.adjust_hunger(-20.0);
                    self.adjust_happiness(12.0);
                    accepted(format!("{} eagerly swallows the {} whole! 🐧", name, food))
                } else {
                    self.adjust_hunger(-10.0);
                    refused(format!("{} waddles away from the {}.", name, food))
                }
            }
            Species::Snake | Species::Generic => self.eat_as_class(&name, food),
        }
    }

    fn eat_as_class(&mut self, name: &str, food: &str) -> FeedOutcome {
        match self.traits().clone() {
            ClassTraits::Mammal { .. } => {
                let has_meat = contains_any(food, &["meat"]);
                match self.diet() {
                    DietType::Carnivore if !has_meat => refused(format!(
                        "{} sniffs the {} but refuses to eat it - needs meat!",
                        name, food
                    )),
                    DietType::Herbivore if has_meat => refused(format!(
                        "{} looks disgusted by the {} - prefers plants!",
                        name, food
                    )),
                    _ => {
                        self.adjust_hunger(-30.0);
                        self.adjust_happiness(5.0);
                        accepted(format!(
                            "{} happily eats the {} with mammalian appetite!",
                            name, food
                        ))
                    }
                }
            }
            ClassTraits::Bird { can_fly, .. } => {
                let eating_style = if can_fly { "pecks at" } else { "waddles to" };
                if contains_any(food, &["seed", "worm"]) {
                    self.adjust_hunger(-25.0);
                    self.adjust_happiness(8.0);
                    accepted(format!(
                        "{} {} the {} enthusiastically!",
                        name, eating_style, food
                    ))
                } else {
                    self.adjust_hunger(-15.0);
                    accepted(format!("{} cautiously {} the {}.", name, eating_style, food))
                }
            }
            ClassTraits::Reptile { is_venomous, .. } => {
                if contains_any(food, &["insect", "rodent"]) {
                    self.adjust_hunger(-40.0);
                    self.adjust_happiness(3.0);
                    let venom_note = if is_venomous { " using venom!" } else { "." };
                    accepted(format!("{} slowly consumes the {}{}", name, food, venom_note))
                } else {
                    self.adjust_hunger(-20.0);
                    accepted(format!(
                        "{} cautiously tastes the {} before eating.",
                        name, food
                    ))
                }
            }
        }
    }

    /// 此動物可執行的特殊行為
    pub fn behaviors(&self) -> Vec<Behavior> {
        let mut behaviors = match self.traits() {
            ClassTraits::Mammal { .. } => vec![Behavior::GiveBirth],
            ClassTraits::Bird { .. } => vec![Behavior::Fly],
            ClassTraits::Reptile { .. } => vec![Behavior::ShedSkin, Behavior::Bask],
        };

        match self.kind() {
            Species::Lion { .. } => behaviors.push(Behavior::Hunt),
            Species::Elephant { .. } => behaviors.push(Behavior::SprayWater),
            Species::Eagle { .. } => behaviors.push(Behavior::Soar),
            Species::Penguin { .. } => behaviors.push(Behavior::Slide),
            Species::Snake => behaviors.push(Behavior::Slither),
            Species::Generic => {}
        }

        behaviors
    }

    pub fn perform(&mut self, behavior: Behavior) -> Result<String> {
        if !self.behaviors().contains(&behavior) {
            return Err(ZooError::animal(format!(
                "{} the {} cannot {}",
                self.name(),
                self.species(),
                behavior.label()
            )));
        }

        let name = self.name().to_string();
        let message = match behavior {
            Behavior::GiveBirth => format!("{} gives birth to live young!", name),
            Behavior::Hunt => {
                self.adjust_hunger(-20.0);
                self.adjust_happiness(15.0);
                let leader_note = match self.kind() {
                    Species::Lion {
                        pride_leader: true, ..
                    } => " leading the pride",
                    _ => "",
                };
                format!("{} goes hunting{}!", name, leader_note)
            }
            Behavior::SprayWater => {
                self.adjust_happiness(10.0);
                format!("{} sprays water with its trunk! 💦🐘", name)
            }
            Behavior::Fly => match self.traits().clone() {
                ClassTraits::Bird {
                    wingspan,
                    can_fly: true,
                } => {
                    self.adjust_happiness(10.0);
                    format!("{} soars through the air with {}m wingspan!", name, wingspan)
                }
                _ => format!("{} attempts to fly but can't get airborne.", name),
            },
            Behavior::Soar => {
                self.adjust_happiness(20.0);
                let range = match self.kind() {
                    Species::Eagle { vision_range_km } => *vision_range_km,
                    _ => 0.0,
                };
                format!("{} soars high above, scanning {}km ahead! 🦅", name, range)
            }
            Behavior::Slide => {
                self.adjust_happiness(15.0);
                format!("{} slides on its belly! 🐧⛄", name)
            }
            Behavior::ShedSkin => {
                self.adjust_health(5.0);
                let scale_type = match self.traits() {
                    ClassTraits::Reptile { scale_type, .. } => scale_type.clone(),
                    _ => "old".to_string(),
                };
                format!("{} sheds its {} skin!", name, scale_type)
            }
            Behavior::Bask => {
                self.adjust_happiness(15.0);
                format!("{} basks in the sun to regulate body temperature.", name)
            }
            Behavior::Slither => {
                self.adjust_happiness(5.0);
                format!("{} slithers silently through the undergrowth. 🐍", name)
            }
        };

        tracing::debug!("{} performed '{}'", self.name(), behavior.label());
        Ok(message)
    }
}

impl Feedable for Animal {
    fn feed(&mut self, food_type: &str) -> FeedOutcome {
        self.eat(food_type)
    }
}
