use crate::animals::{Animal, AnimalFactory, AnimalOptions, Behavior};
use crate::core::events::{EventContext, EventManager};
use crate::core::observer::HealthMonitor;
use crate::domain::model::{
    DayReport, EventSeverity, EventType, FeedingResult, RestockReport, ZooStatus,
};
use crate::domain::ports::{Cleanable, HealthObserver};
use crate::utils::error::{Result, ZooError};
use crate::zoo::{Enclosure, Staff, Zoo};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use serde::Serialize;
use std::fmt;

pub const DEFAULT_INITIAL_FUNDS: f64 = 50_000.0;
const MAX_BEHAVIOR_NOTES: usize = 5;
const GREAT_TURNOUT_INCOME: f64 = 1_000.0;

/// 預設的四個圍欄
pub fn starter_enclosures() -> Vec<Enclosure> {
    let species = |names: &[&str]| names.iter().map(|s| s.to_string()).collect();
    vec![
        Enclosure::new(
            "Savannah Plains",
            3,
            "savannah",
            species(&["Lion", "Elephant", "Zebra", "Giraffe"]),
        ),
        Enclosure::new("Eagle's Peak", 2, "aviary", species(&["Eagle", "Bird"])),
        Enclosure::new(
            "Reptile House",
            4,
            "forest",
            species(&["Snake", "Lizard", "Reptile"]),
        ),
        Enclosure::new("Penguin Pool", 3, "arctic", species(&["Penguin"])),
    ]
}

/// 藥品對健康與快樂度的效果
fn medicine_effect(medicine: &str) -> Option<(f64, f64)> {
    match medicine {
        "vaccine" => Some((10.0, 0.0)),
        "antibiotics" => Some((25.0, 0.0)),
        "pain_reliever" => Some((15.0, 5.0)),
        "vitamins" => Some((5.0, 5.0)),
        _ => None,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub day: u32,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Day {}: {}", self.day, self.message)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EventStat {
    pub name: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub severity: EventSeverity,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventStatistics {
    pub events_today: usize,
    pub today_events: Vec<EventStat>,
}

/// 遊戲主控：持有動物園、工廠、事件與健康觀察者
pub struct ZooManager {
    zoo: Option<Zoo>,
    factory: AnimalFactory,
    event_manager: EventManager,
    health_monitor: HealthMonitor,
    observers: Vec<Box<dyn HealthObserver>>,
    rng: StdRng,
    day_count: u32,
    log: Vec<LogEntry>,
}

impl Default for ZooManager {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ZooManager {
    /// 指定 seed 時整場模擬可重現
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        Self {
            zoo: None,
            factory: AnimalFactory::new(),
            event_manager: EventManager::new(),
            health_monitor: HealthMonitor::new(),
            observers: Vec::new(),
            rng,
            day_count: 0,
            log: Vec::new(),
        }
    }

    pub fn with_event_manager(mut self, event_manager: EventManager) -> Self {
        self.event_manager = event_manager;
        self
    }

    pub fn zoo(&self) -> Option<&Zoo> {
        self.zoo.as_ref()
    }

    fn zoo_mut(&mut self) -> Result<&mut Zoo> {
        self.zoo.as_mut().ok_or(ZooError::NoZooError)
    }

    pub fn day_count(&self) -> u32 {
        self.day_count
    }

    pub fn factory(&self) -> &AnimalFactory {
        &self.factory
    }

    pub fn factory_mut(&mut self) -> &mut AnimalFactory {
        &mut self.factory
    }

    pub fn event_manager_mut(&mut self) -> &mut EventManager {
        &mut self.event_manager
    }

    pub fn health_monitor(&self) -> &HealthMonitor {
        &self.health_monitor
    }

    pub fn add_observer(&mut self, observer: Box<dyn HealthObserver>) {
        self.observers.push(observer);
    }

    pub fn available_animals(&self) -> Vec<String> {
        self.factory.available_species()
    }

    fn log_event(&mut self, message: impl Into<String>) {
        self.log.push(LogEntry {
            timestamp: Utc::now(),
            day: self.day_count,
            message: message.into(),
        });
    }

    pub fn recent_events(&self, count: usize) -> &[LogEntry] {
        let start = self.log.len().saturating_sub(count);
        &self.log[start..]
    }

    pub fn create_zoo(&mut self, name: &str, initial_funds: f64) -> Result<()> {
        self.create_zoo_with(Zoo::new(name, initial_funds), starter_enclosures())
    }

    /// 以自訂圍欄建立動物園，取代現有的動物園
    pub fn create_zoo_with(&mut self, mut zoo: Zoo, enclosures: Vec<Enclosure>) -> Result<()> {
        if !zoo.funds().is_finite() || zoo.funds() < 0.0 {
            return Err(ZooError::InvalidAmountError { amount: zoo.funds() });
        }
        for enclosure in enclosures {
            zoo.add_enclosure(enclosure)?;
        }

        tracing::info!(
            "🏰 Created zoo: {} with ${:.2}",
            zoo.name(),
            zoo.funds()
        );
        let message = format!("Created new zoo: {} with ${:.2}", zoo.name(), zoo.funds());
        self.zoo = Some(zoo);
        self.log_event(message);
        Ok(())
    }

    /// 將健康事件派送給監控與所有觀察者
    fn dispatch_health_events(&mut self) {
        let Some(zoo) = self.zoo.as_mut() else {
            return;
        };

        for event in zoo.take_health_events() {
            self.health_monitor.on_health_event(&event);
            for observer in self.observers.iter_mut() {
                observer.on_health_event(&event);
            }
        }
    }

    pub fn add_animal_to_zoo(
        &mut self,
        animal_type: &str,
        name: &str,
        age: u32,
        enclosure_name: &str,
        options: &AnimalOptions,
    ) -> Result<()> {
        let animal = self.factory.create_animal(animal_type, name, age, options)?;
        self.place_animal(animal, enclosure_name)
    }

    /// 將已建立的動物放入圍欄
    pub fn place_animal(&mut self, animal: Animal, enclosure_name: &str) -> Result<()> {
        let species = animal.species().to_string();
        let animal_name = animal.name().to_string();

        self.zoo_mut()?.add_animal(animal, enclosure_name)?;
        self.log_event(format!(
            "Added {} the {} to {}",
            animal_name, species, enclosure_name
        ));
        Ok(())
    }

    pub fn feed_animals(&mut self, enclosure_name: Option<&str>) -> Result<Vec<FeedingResult>> {
        let results = self.zoo_mut()?.feed_animals(enclosure_name)?;
        let total_fed: usize = results.iter().map(FeedingResult::fed_count).sum();

        for result in &results {
            tracing::info!(
                "🍽️  Fed {} animals in {} with {}",
                result.fed_count(),
                result.enclosure,
                result.food_type
            );
            for failure in &result.failed {
                tracing::warn!("❌ {}: {}", result.enclosure, failure);
            }
        }

        self.log_event(format!(
            "Fed {} animals in {}",
            total_fed,
            enclosure_name.unwrap_or("all enclosures")
        ));
        self.dispatch_health_events();
        Ok(results)
    }

    pub fn clean_enclosures(&mut self, enclosure_name: Option<&str>) -> Result<usize> {
        let cleaned = self.zoo_mut()?.clean_enclosures(enclosure_name)?;
        if cleaned > 0 {
            self.log_event(format!(
                "Cleaned {} enclosure(s) in {}",
                cleaned,
                enclosure_name.unwrap_or("all enclosures")
            ));
        }
        Ok(cleaned)
    }

    pub fn buy_supplies(&mut self) -> Result<RestockReport> {
        let report = self.zoo_mut()?.order_supplies();
        if report.is_complete() {
            self.log_event("Purchased supplies");
        } else {
            self.log_event(format!(
                "Purchased supplies ({} order(s) failed)",
                report.failed.len()
            ));
        }
        Ok(report)
    }

    /// 使用一單位藥品治療動物
    pub fn treat_animal(&mut self, animal_name: &str, medicine: &str) -> Result<String> {
        let zoo = self.zoo_mut()?;
        if zoo.find_animal_mut(animal_name).is_none() {
            return Err(ZooError::animal(format!(
                "Animal '{}' not found",
                animal_name
            )));
        }

        let medicine = medicine.trim().to_lowercase().replace(' ', "_");
        let (health, happiness) = medicine_effect(&medicine).ok_or_else(|| {
            ZooError::resource(format!("Unknown medicine type: {}", medicine))
        })?;
        zoo.resources_mut().use_medicine(&medicine, 1)?;

        let animal = zoo
            .find_animal_mut(animal_name)
            .ok_or_else(|| ZooError::animal(format!("Animal '{}' not found", animal_name)))?;
        animal.adjust_health(health);
        animal.adjust_happiness(happiness);
        let message = format!(
            "💊 Treated {} with {}. Health: {:.1}%",
            animal.name(),
            medicine,
            animal.health()
        );

        self.log_event(format!("Treated {} with {}", animal_name, medicine));
        self.dispatch_health_events();
        Ok(message)
    }

    pub fn perform_behavior(&mut self, animal_name: &str, behavior: Behavior) -> Result<String> {
        let animal = self
            .zoo_mut()?
            .find_animal_mut(animal_name)
            .ok_or_else(|| ZooError::animal(format!("Animal '{}' not found", animal_name)))?;
        let message = animal.perform(behavior)?;
        self.dispatch_health_events();
        Ok(message)
    }

    pub fn hire_staff(
        &mut self,
        name: &str,
        salary: f64,
        specialization: Option<String>,
    ) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ZooError::staff("Staff name cannot be empty"));
        }
        if !salary.is_finite() || salary < 0.0 {
            return Err(ZooError::InvalidAmountError { amount: salary });
        }

        self.zoo_mut()?
            .hire_staff(Staff::zookeeper(name, salary, specialization))?;
        self.log_event(format!("Hired zookeeper {}", name));
        Ok(())
    }

    pub fn keeper_rounds(&mut self, keeper_name: &str) -> Result<(Vec<FeedingResult>, usize)> {
        let rounds = self.zoo_mut()?.keeper_rounds(keeper_name)?;
        self.log_event(format!("{} completed their rounds", keeper_name));
        self.dispatch_health_events();
        Ok(rounds)
    }

    /// 推進一天：事件、動物園每日更新、行為描述、健康警報
    pub fn advance_day(&mut self) -> Result<DayReport> {
        if self.zoo.is_none() {
            return Err(ZooError::NoZooError);
        }

        self.day_count += 1;
        let day = self.day_count;
        self.log_event(format!("Advanced to day {}", day));

        let special_events = {
            let zoo = self.zoo.as_mut().ok_or(ZooError::NoZooError)?;
            let mut ctx = EventContext {
                zoo,
                factory: &self.factory,
                day,
                rng: &mut self.rng,
            };
            self.event_manager.trigger_daily_events(&mut ctx).to_vec()
        };

        for event in &special_events {
            let impact = event.outcome.financial_impact;
            if impact > 0.0 {
                self.log_event(format!("Event: Gained ${:.0} from {}", impact, event.name));
            } else if impact < 0.0 {
                self.log_event(format!("Event: Lost ${:.0} from {}", -impact, event.name));
            }
            if let Some(lost) = &event.outcome.lost_animal {
                self.log_event(format!("Event: {} escaped", lost));
            }
            if let Some(born) = &event.outcome.new_animal {
                self.log_event(format!("Event: {} was born", born));
            }
        }

        let visitor_adjustment: i64 = special_events
            .iter()
            .map(|e| e.outcome.visitor_impact)
            .sum();
        let event_messages: Vec<String> = special_events
            .iter()
            .flat_map(|e| e.outcome.messages.iter().cloned())
            .collect();

        let outcome = {
            let zoo = self.zoo.as_mut().ok_or(ZooError::NoZooError)?;
            zoo.daily_update(&mut self.rng, visitor_adjustment)?
        };

        let deceased: Vec<String> = outcome
            .deceased
            .iter()
            .map(|animal| format!("{} the {}", animal.name(), animal.species()))
            .collect();
        for name in &deceased {
            self.log_event(format!("{} passed away", name));
        }

        let behavior_events = self.behavior_notes();
        self.dispatch_health_events();

        Ok(DayReport {
            day,
            special_events,
            event_messages,
            behavior_events,
            critical_animals: self.health_alerts(),
            deceased,
            zoo_status: self.zoo_status()?,
        })
    }

    /// 依動物狀態產生描述，最多五則
    fn behavior_notes(&mut self) -> Vec<String> {
        let Some(zoo) = self.zoo.as_ref() else {
            return Vec::new();
        };

        let mut notes = Vec::new();
        for animal in zoo.enclosures().iter().flat_map(|e| e.animals()) {
            let name = animal.name();
            let choices = if animal.happiness() > 80.0 {
                [
                    format!("{} is playing happily!", name),
                    format!("{} seems very content today.", name),
                    format!("{} is entertaining the visitors!", name),
                ]
            } else if animal.hunger() > 70.0 {
                [
                    format!("{} looks very hungry.", name),
                    format!("{} is searching for food.", name),
                    format!("{} seems restless and hungry.", name),
                ]
            } else if animal.health() < 50.0 {
                [
                    format!("{} doesn't look well.", name),
                    format!("{} seems weaker than usual.", name),
                    format!("{} needs medical attention.", name),
                ]
            } else {
                continue;
            };

            if let Some(note) = choices.choose(&mut self.rng) {
                notes.push(note.clone());
            }
        }

        if zoo.resources().last_day().income > GREAT_TURNOUT_INCOME {
            notes.push("🎉 Great visitor turnout today!".to_string());
        }
        if zoo.enclosures().iter().any(|e| e.needs_cleaning()) {
            notes.push("⚠️  Some enclosures need cleaning.".to_string());
        }

        notes.truncate(MAX_BEHAVIOR_NOTES);
        notes
    }

    /// 目前危急的動物
    pub fn health_alerts(&self) -> Vec<String> {
        self.health_monitor.critical_animals()
    }

    pub fn zoo_status(&self) -> Result<ZooStatus> {
        self.zoo
            .as_ref()
            .map(Zoo::status)
            .ok_or(ZooError::NoZooError)
    }

    pub fn is_game_over(&self) -> bool {
        match &self.zoo {
            Some(zoo) => zoo.funds() <= 0.0,
            None => true,
        }
    }

    pub fn event_statistics(&self) -> EventStatistics {
        let today = self.event_manager.today_events();
        EventStatistics {
            events_today: today.len(),
            today_events: today
                .iter()
                .map(|e| EventStat {
                    name: e.name.clone(),
                    event_type: e.event_type,
                    severity: e.severity,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::HealthEvent;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn manager_with_zoo() -> ZooManager {
        let mut manager = ZooManager::new(Some(42));
        manager.event_manager_mut().set_enabled(false);
        manager.create_zoo("Test Zoo", DEFAULT_INITIAL_FUNDS).unwrap();
        manager
    }

    struct Recorder(Rc<RefCell<Vec<HealthEvent>>>);

    impl HealthObserver for Recorder {
        fn on_health_event(&mut self, event: &HealthEvent) {
            self.0.borrow_mut().push(event.clone());
        }
    }

    #[test]
    fn test_operations_require_a_zoo() {
        let mut manager = ZooManager::new(Some(1));
        assert!(manager.is_game_over());
        assert!(matches!(
            manager.feed_animals(None),
            Err(ZooError::NoZooError)
        ));
        assert!(matches!(manager.advance_day(), Err(ZooError::NoZooError)));
        assert!(matches!(manager.zoo_status(), Err(ZooError::NoZooError)));
        assert!(manager
            .add_animal_to_zoo("lion", "Simba", 4, "Savannah Plains", &AnimalOptions::default())
            .is_err());
    }

    #[test]
    fn test_create_zoo_has_starter_enclosures() {
        let manager = manager_with_zoo();
        let status = manager.zoo_status().unwrap();
        assert_eq!(status.enclosure_count, 4);
        assert_eq!(status.financials.funds, DEFAULT_INITIAL_FUNDS);
        assert!(manager.recent_events(5)[0].to_string().starts_with("Day 0: Created new zoo"));
    }

    #[test]
    fn test_create_zoo_rejects_unusable_funds() {
        let mut manager = ZooManager::new(Some(1));
        for funds in [f64::NAN, f64::INFINITY, -10.0] {
            assert!(matches!(
                manager.create_zoo("Bad Books", funds),
                Err(ZooError::InvalidAmountError { .. })
            ));
        }
        assert!(manager.zoo().is_none());
    }

    #[test]
    fn test_add_animal_through_factory() {
        let mut manager = manager_with_zoo();
        manager
            .add_animal_to_zoo("lion", "Simba", 4, "Savannah Plains", &AnimalOptions::default())
            .unwrap();

        let err = manager
            .add_animal_to_zoo("zebra", "Marty", 3, "Savannah Plains", &AnimalOptions::default())
            .unwrap_err();
        assert!(matches!(err, ZooError::CompatibilityError { .. }));

        let err = manager
            .add_animal_to_zoo("dragon", "Smaug", 300, "Savannah Plains", &AnimalOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("Unknown animal type"));
        assert_eq!(manager.zoo().unwrap().animal_count(), 1);
    }

    #[test]
    fn test_treat_animal_effects_and_errors() {
        let mut manager = manager_with_zoo();
        manager
            .add_animal_to_zoo("penguin", "Pingu", 3, "Penguin Pool", &AnimalOptions::default())
            .unwrap();

        assert!(matches!(
            manager.treat_animal("Nobody", "vaccine"),
            Err(ZooError::AnimalError { .. })
        ));
        assert!(matches!(
            manager.treat_animal("Pingu", "elixir"),
            Err(ZooError::ResourceError { .. })
        ));

        let zoo = manager.zoo.as_mut().unwrap();
        zoo.find_animal_mut("Pingu").unwrap().adjust_health(-80.0);
        zoo.find_animal_mut("Pingu").unwrap().adjust_happiness(-50.0);
        manager.dispatch_health_events();
        assert_eq!(manager.health_alerts(), vec!["Pingu_Penguin".to_string()]);

        manager.treat_animal("pingu", "Pain Reliever").unwrap();
        let zoo = manager.zoo.as_mut().unwrap();
        let pingu = zoo.find_animal_mut("Pingu").unwrap();
        assert_eq!(pingu.health(), 35.0);
        assert_eq!(pingu.happiness(), 55.0);
        assert_eq!(zoo.resources().medicine_supply()["pain_reliever"], 19);

        // 回到門檻以上，不再危急
        assert!(manager.health_alerts().is_empty());
    }

    #[test]
    fn test_observers_receive_health_events() {
        let mut manager = manager_with_zoo();
        let seen = Rc::new(RefCell::new(Vec::new()));
        manager.add_observer(Box::new(Recorder(Rc::clone(&seen))));
        manager
            .add_animal_to_zoo("snake", "Kaa", 5, "Reptile House", &AnimalOptions::default())
            .unwrap();

        manager
            .zoo
            .as_mut()
            .unwrap()
            .find_animal_mut("Kaa")
            .unwrap()
            .adjust_health(-75.0);
        manager.treat_animal("Kaa", "antibiotics").unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].animal_id(), "Kaa_Snake");
    }

    #[test]
    fn test_perform_behavior() {
        let mut manager = manager_with_zoo();
        manager
            .add_animal_to_zoo("eagle", "Sky", 4, "Eagle's Peak", &AnimalOptions::default())
            .unwrap();
        assert!(manager.perform_behavior("Sky", Behavior::Soar).is_ok());
        assert!(matches!(
            manager.perform_behavior("Sky", Behavior::Hunt),
            Err(ZooError::AnimalError { .. })
        ));
    }

    #[test]
    fn test_hire_staff_validation() {
        let mut manager = manager_with_zoo();
        assert!(manager.hire_staff("  ", 100.0, None).is_err());
        assert!(manager.hire_staff("Alex", -1.0, None).is_err());
        assert!(manager.hire_staff("Alex", f64::NAN, None).is_err());
        assert!(manager.hire_staff("Alex", f64::INFINITY, None).is_err());
        manager.hire_staff("Alex", 100.0, None).unwrap();
        assert!(manager.hire_staff("Alex", 100.0, None).is_err());

        let (feedings, _) = manager.keeper_rounds("Alex").unwrap();
        assert_eq!(feedings.len(), 4);
    }

    #[test]
    fn test_advance_day_report() {
        let mut manager = manager_with_zoo();
        manager
            .add_animal_to_zoo("elephant", "Dumbo", 6, "Savannah Plains", &AnimalOptions::default())
            .unwrap();

        let report = manager.advance_day().unwrap();
        assert_eq!(report.day, 1);
        assert!(report.special_events.is_empty());
        assert!(report.behavior_events.len() <= MAX_BEHAVIOR_NOTES);
        assert_eq!(report.zoo_status.days_operational, 1);
        // 100 + [-20, 50] + 2 名訪客，每人 $25，必定超過 $1000
        assert!(report
            .behavior_events
            .iter()
            .any(|n| n.contains("Great visitor turnout")));
        assert_eq!(manager.day_count(), 1);
    }

    #[test]
    fn test_game_over_when_funds_run_out() {
        let mut manager = ZooManager::new(Some(7));
        manager.event_manager_mut().set_enabled(false);
        manager
            .create_zoo_with(Zoo::new("Broke", 100.0).with_ticket_price(0.0), starter_enclosures())
            .unwrap();

        assert!(!manager.is_game_over());
        manager.advance_day().unwrap();
        assert!(manager.is_game_over());
    }

    #[test]
    fn test_recent_events_limit() {
        let mut manager = manager_with_zoo();
        for _ in 0..3 {
            manager.advance_day().unwrap();
        }
        let recent = manager.recent_events(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[1].day, 3);
        assert!(manager.recent_events(100).len() >= 4);
    }

    #[test]
    fn test_event_statistics_follow_today() {
        let mut manager = ZooManager::new(Some(9));
        manager.create_zoo("Busy Zoo", DEFAULT_INITIAL_FUNDS).unwrap();
        for _ in 0..5 {
            let report = manager.advance_day().unwrap();
            let stats = manager.event_statistics();
            assert_eq!(stats.events_today, report.special_events.len());
            assert!(stats.events_today <= 3);
        }
    }
}
