use crate::domain::model::{FeedingResult, StaffInfo};
use crate::domain::ports::Cleanable;
use crate::utils::error::{Result, ZooError};
use crate::zoo::enclosure::Enclosure;
use crate::zoo::resources::ResourceManager;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaffRole {
    Zookeeper { specialization: String },
}

impl StaffRole {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Zookeeper { .. } => "Zookeeper",
        }
    }
}

/// 園區員工，薪資以日計
#[derive(Debug, Clone)]
pub struct Staff {
    name: String,
    role: StaffRole,
    salary: f64,
    on_shift: bool,
}

impl Staff {
    pub fn zookeeper(name: impl Into<String>, salary: f64, specialization: Option<String>) -> Self {
        Self {
            name: name.into(),
            role: StaffRole::Zookeeper {
                specialization: specialization.unwrap_or_else(|| "general".to_string()),
            },
            salary,
            on_shift: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> &StaffRole {
        &self.role
    }

    pub fn salary(&self) -> f64 {
        self.salary
    }

    pub fn is_on_shift(&self) -> bool {
        self.on_shift
    }

    pub fn start_work(&mut self) {
        self.on_shift = true;
        tracing::debug!("{} started their shift", self.name);
    }

    pub fn end_work(&mut self) {
        self.on_shift = false;
        tracing::debug!("{} ended their shift", self.name);
    }

    fn ensure_on_shift(&self, task: &str) -> Result<()> {
        if !self.on_shift {
            return Err(ZooError::staff(format!(
                "{} is not on shift and cannot {}",
                self.name, task
            )));
        }
        Ok(())
    }

    pub fn feed_enclosure(
        &self,
        enclosure: &mut Enclosure,
        food_type: &str,
        resources: &mut ResourceManager,
    ) -> Result<FeedingResult> {
        self.ensure_on_shift("feed animals")?;
        Ok(enclosure.feed_animals(food_type, resources))
    }

    /// 只清潔需要清潔的圍欄，回傳是否有清潔
    pub fn clean_enclosure(&self, enclosure: &mut Enclosure) -> Result<bool> {
        self.ensure_on_shift("clean enclosures")?;
        if !enclosure.needs_cleaning() {
            return Ok(false);
        }
        enclosure.clean();
        Ok(true)
    }

    pub fn info(&self) -> StaffInfo {
        let StaffRole::Zookeeper { specialization } = &self.role;
        StaffInfo {
            name: self.name.clone(),
            role: self.role.title().to_string(),
            specialization: specialization.clone(),
            salary: self.salary,
            on_shift: self.on_shift,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animals::Animal;

    #[test]
    fn test_zookeeper_defaults_to_general() {
        let keeper = Staff::zookeeper("Alex", 120.0, None);
        let info = keeper.info();
        assert_eq!(info.role, "Zookeeper");
        assert_eq!(info.specialization, "general");
        assert!(!info.on_shift);
    }

    #[test]
    fn test_off_shift_keeper_cannot_work() {
        let keeper = Staff::zookeeper("Alex", 120.0, None);
        let mut enclosure = Enclosure::new("Pool", 3, "arctic", vec![]);
        let mut resources = ResourceManager::new(0.0);

        let err = keeper
            .feed_enclosure(&mut enclosure, "fish", &mut resources)
            .unwrap_err();
        assert!(matches!(err, ZooError::StaffError { .. }));
        assert!(keeper.clean_enclosure(&mut enclosure).is_err());
    }

    #[test]
    fn test_on_shift_keeper_feeds_and_cleans() {
        let mut keeper = Staff::zookeeper("Alex", 120.0, Some("birds".to_string()));
        keeper.start_work();

        let mut enclosure = Enclosure::new("Pool", 3, "arctic", vec![]);
        enclosure.add_animal(Animal::penguin("Pingu", 2)).unwrap();
        let mut resources = ResourceManager::new(0.0);

        let result = keeper
            .feed_enclosure(&mut enclosure, "fish", &mut resources)
            .unwrap();
        assert_eq!(result.fed_count(), 1);

        assert!(!keeper.clean_enclosure(&mut enclosure).unwrap());
        enclosure.adjust_cleanliness(-80.0);
        assert!(keeper.clean_enclosure(&mut enclosure).unwrap());

        keeper.end_work();
        assert!(!keeper.is_on_shift());
    }
}
