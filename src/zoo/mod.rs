pub mod enclosure;
pub mod resources;
pub mod staff;

pub use enclosure::Enclosure;
pub use resources::ResourceManager;
pub use staff::{Staff, StaffRole};

use crate::animals::Animal;
use crate::domain::model::{
    CostBreakdown, DietType, FeedingResult, Financials, HealthEvent, RestockReport, ZooStatus,
};
use crate::domain::ports::Cleanable;
use crate::utils::error::{Result, ZooError};
use rand::Rng;

pub const DEFAULT_TICKET_PRICE: f64 = 25.0;
const BASE_OPERATING_COST: f64 = 500.0;
const COST_PER_ANIMAL: f64 = 10.0;
const COST_PER_ENCLOSURE: f64 = 50.0;
const BASE_VISITORS: i64 = 100;
const MIN_VISITORS: i64 = 10;

/// 一天營運的結果
#[derive(Debug, Clone, Default)]
pub struct DailyOutcome {
    pub visitors: u32,
    pub income: f64,
    pub costs: f64,
    pub deceased: Vec<Animal>,
}

/// 動物園：圍欄、資源、員工與訪客
#[derive(Debug, Clone)]
pub struct Zoo {
    name: String,
    enclosures: Vec<Enclosure>,
    resources: ResourceManager,
    staff: Vec<Staff>,
    ticket_price: f64,
    visitors_today: u32,
    total_visitors: u64,
    days_operational: u32,
    pending_health_events: Vec<HealthEvent>,
}

impl Zoo {
    pub fn new(name: impl Into<String>, initial_funds: f64) -> Self {
        Self {
            name: name.into(),
            enclosures: Vec::new(),
            resources: ResourceManager::new(initial_funds),
            staff: Vec::new(),
            ticket_price: DEFAULT_TICKET_PRICE,
            visitors_today: 0,
            total_visitors: 0,
            days_operational: 0,
            pending_health_events: Vec::new(),
        }
    }

    pub fn with_ticket_price(mut self, ticket_price: f64) -> Self {
        self.ticket_price = ticket_price;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn funds(&self) -> f64 {
        self.resources.funds()
    }

    pub fn ticket_price(&self) -> f64 {
        self.ticket_price
    }

    pub fn days_operational(&self) -> u32 {
        self.days_operational
    }

    pub fn visitors_today(&self) -> u32 {
        self.visitors_today
    }

    pub fn resources(&self) -> &ResourceManager {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut ResourceManager {
        &mut self.resources
    }

    pub fn enclosures(&self) -> &[Enclosure] {
        &self.enclosures
    }

    pub fn enclosures_mut(&mut self) -> &mut [Enclosure] {
        &mut self.enclosures
    }

    pub fn staff(&self) -> &[Staff] {
        &self.staff
    }

    pub fn find_enclosure(&self, name: &str) -> Option<&Enclosure> {
        self.enclosures
            .iter()
            .find(|e| e.name().eq_ignore_ascii_case(name))
    }

    pub fn find_enclosure_mut(&mut self, name: &str) -> Option<&mut Enclosure> {
        self.enclosures
            .iter_mut()
            .find(|e| e.name().eq_ignore_ascii_case(name))
    }

    fn require_enclosure_mut(&mut self, name: &str) -> Result<&mut Enclosure> {
        self.find_enclosure_mut(name)
            .ok_or_else(|| ZooError::enclosure(format!("Enclosure '{}' not found", name)))
    }

    pub fn find_animal_mut(&mut self, name: &str) -> Option<&mut Animal> {
        self.enclosures
            .iter_mut()
            .find_map(|e| e.find_animal_mut(name))
    }

    pub fn animal_count(&self) -> usize {
        self.enclosures.iter().map(Enclosure::animal_count).sum()
    }

    pub fn add_enclosure(&mut self, enclosure: Enclosure) -> Result<()> {
        if self.find_enclosure(enclosure.name()).is_some() {
            return Err(ZooError::enclosure(format!(
                "Enclosure with name '{}' already exists",
                enclosure.name()
            )));
        }

        tracing::info!("🏠 Added enclosure '{}' to {}", enclosure.name(), self.name);
        self.enclosures.push(enclosure);
        Ok(())
    }

    /// 移除空的圍欄。找不到時回傳 false。
    pub fn remove_enclosure(&mut self, name: &str) -> Result<bool> {
        let Some(index) = self
            .enclosures
            .iter()
            .position(|e| e.name().eq_ignore_ascii_case(name))
        else {
            return Ok(false);
        };

        let count = self.enclosures[index].animal_count();
        if count > 0 {
            return Err(ZooError::enclosure(format!(
                "Cannot remove enclosure '{}' with {} animals",
                name, count
            )));
        }

        let removed = self.enclosures.remove(index);
        tracing::info!("🗑️  Removed enclosure '{}' from {}", removed.name(), self.name);
        Ok(true)
    }

    pub fn add_animal(&mut self, animal: Animal, enclosure_name: &str) -> Result<()> {
        tracing::debug!(
            "🐾 Attempting to add {} the {} to {}",
            animal.name(),
            animal.species(),
            enclosure_name
        );
        self.require_enclosure_mut(enclosure_name)?.add_animal(animal)
    }

    /// 從所在圍欄移除動物，回傳圍欄名稱與動物
    pub fn remove_animal(&mut self, animal_name: &str) -> Option<(String, Animal)> {
        for enclosure in self.enclosures.iter_mut() {
            if let Some(mut animal) = enclosure.remove_animal(animal_name) {
                self.pending_health_events.extend(animal.take_health_events());
                return Some((enclosure.name().to_string(), animal));
            }
        }
        None
    }

    /// 依圍欄內動物的食性選擇食物
    pub fn determine_food_type(animals: &[Animal]) -> &'static str {
        if animals.iter().any(|a| a.diet() == DietType::Carnivore) {
            "meat"
        } else if animals.iter().any(|a| a.diet() == DietType::Herbivore) {
            "vegetables"
        } else {
            "seeds"
        }
    }

    pub fn feed_animals(&mut self, enclosure_name: Option<&str>) -> Result<Vec<FeedingResult>> {
        let resources = &mut self.resources;

        match enclosure_name {
            Some(name) => {
                let enclosure = self
                    .enclosures
                    .iter_mut()
                    .find(|e| e.name().eq_ignore_ascii_case(name))
                    .ok_or_else(|| ZooError::enclosure(format!("Enclosure '{}' not found", name)))?;
                let food_type = Self::determine_food_type(enclosure.animals());
                Ok(vec![enclosure.feed_animals(food_type, resources)])
            }
            None => Ok(self
                .enclosures
                .iter_mut()
                .map(|enclosure| {
                    let food_type = Self::determine_food_type(enclosure.animals());
                    enclosure.feed_animals(food_type, resources)
                })
                .collect()),
        }
    }

    /// 清潔需要清潔的圍欄，回傳清潔數量
    pub fn clean_enclosures(&mut self, enclosure_name: Option<&str>) -> Result<usize> {
        match enclosure_name {
            Some(name) => {
                let enclosure = self.require_enclosure_mut(name)?;
                if enclosure.needs_cleaning() {
                    enclosure.clean();
                    Ok(1)
                } else {
                    tracing::info!("✅ {} is already clean enough", enclosure.name());
                    Ok(0)
                }
            }
            None => {
                let mut cleaned = 0;
                for enclosure in self.enclosures.iter_mut().filter(|e| e.needs_cleaning()) {
                    enclosure.clean();
                    cleaned += 1;
                }
                Ok(cleaned)
            }
        }
    }

    pub fn hire_staff(&mut self, staff: Staff) -> Result<()> {
        if self
            .staff
            .iter()
            .any(|s| s.name().eq_ignore_ascii_case(staff.name()))
        {
            return Err(ZooError::staff(format!(
                "A staff member named '{}' already works here",
                staff.name()
            )));
        }
        tracing::info!(
            "👷 Hired {} as {} (${:.2}/day)",
            staff.name(),
            staff.role().title(),
            staff.salary()
        );
        self.staff.push(staff);
        Ok(())
    }

    /// 員工巡園：上班、餵食並清潔所有圍欄、下班
    pub fn keeper_rounds(&mut self, keeper_name: &str) -> Result<(Vec<FeedingResult>, usize)> {
        let keeper = self
            .staff
            .iter_mut()
            .find(|s| s.name().eq_ignore_ascii_case(keeper_name))
            .ok_or_else(|| ZooError::staff(format!("No staff member named '{}'", keeper_name)))?;

        keeper.start_work();
        let mut feedings = Vec::new();
        let mut cleaned = 0;
        for enclosure in self.enclosures.iter_mut() {
            let food_type = Self::determine_food_type(enclosure.animals());
            feedings.push(keeper.feed_enclosure(enclosure, food_type, &mut self.resources)?);
            if keeper.clean_enclosure(enclosure)? {
                cleaned += 1;
            }
        }
        keeper.end_work();

        Ok((feedings, cleaned))
    }

    pub fn calculate_costs(&self) -> CostBreakdown {
        let per_animal = self.animal_count() as f64 * COST_PER_ANIMAL;
        let per_enclosure = self.enclosures.len() as f64 * COST_PER_ENCLOSURE;
        let staff_wages: f64 = self.staff.iter().map(Staff::salary).sum();
        CostBreakdown {
            daily_operations: BASE_OPERATING_COST,
            per_animal,
            per_enclosure,
            staff_wages,
            total_daily: BASE_OPERATING_COST + per_animal + per_enclosure + staff_wages,
        }
    }

    /// 推進一天：訪客、圍欄與動物、死亡、營運成本
    pub fn daily_update<R: Rng>(
        &mut self,
        rng: &mut R,
        visitor_adjustment: i64,
    ) -> Result<DailyOutcome> {
        tracing::info!(
            "=== DAY {} UPDATE FOR {} ===",
            self.days_operational + 1,
            self.name.to_uppercase()
        );

        let (visitors, income) = self.simulate_visitors(rng, visitor_adjustment)?;

        for enclosure in self.enclosures.iter_mut() {
            enclosure.update_daily_status(rng);
        }

        let mut deceased = Vec::new();
        for enclosure in self.enclosures.iter_mut() {
            self.pending_health_events
                .extend(enclosure.take_health_events());
            for animal in enclosure.remove_deceased() {
                tracing::warn!(
                    "💀 {} the {} has died in {}",
                    animal.name(),
                    animal.species(),
                    enclosure.name()
                );
                deceased.push(animal);
            }
        }

        self.pay_operating_costs();
        let ledger = self.resources.close_day();
        self.days_operational += 1;

        tracing::info!("✅ Day {} completed!", self.days_operational);

        Ok(DailyOutcome {
            visitors,
            income,
            costs: ledger.costs,
            deceased,
        })
    }

    fn simulate_visitors<R: Rng>(&mut self, rng: &mut R, adjustment: i64) -> Result<(u32, f64)> {
        let random_factor = rng.random_range(-20..=50);
        let animal_attraction = self.animal_count() as i64 * 2;
        let visitors = (BASE_VISITORS + random_factor + animal_attraction + adjustment).max(MIN_VISITORS);
        let visitors = u32::try_from(visitors).unwrap_or(u32::MAX);

        self.visitors_today = visitors;
        self.total_visitors += u64::from(visitors);

        let income = f64::from(visitors) * self.ticket_price;
        self.resources.add_funds(income, "ticket sales")?;

        tracing::info!("🎟️  {} visitors today (${:.2} income)", visitors, income);
        Ok((visitors, income))
    }

    fn pay_operating_costs(&mut self) {
        let total_cost = self.calculate_costs().total_daily;

        if let Err(e) = self.resources.spend_funds(total_cost, "daily operations") {
            tracing::warn!("⚠️  Could not pay full operating costs: {}", e);
            self.resources.drain_funds("daily operations");
        }
    }

    /// 補貨：每項訂單各自成功或失敗
    pub fn order_supplies(&mut self) -> RestockReport {
        tracing::info!("📦 Ordering basic supplies...");
        let mut report = RestockReport::default();

        for (food, kg, cost_per_kg) in [("meat", 50.0, 8.0), ("seeds", 100.0, 2.0), ("vegetables", 80.0, 3.0)] {
            match self.resources.order_food(food, kg, cost_per_kg) {
                Ok(()) => report.ordered.push(format!("{}kg of {}", kg, food)),
                Err(e) => report.failed.push(format!("{}: {}", food, e)),
            }
        }

        for (medicine, units, cost_per_unit) in [("vaccine", 5, 15.0), ("antibiotics", 10, 8.0)] {
            match self.resources.order_medicine(medicine, units, cost_per_unit) {
                Ok(()) => report.ordered.push(format!("{} units of {}", units, medicine)),
                Err(e) => report.failed.push(format!("{}: {}", medicine, e)),
            }
        }

        report
    }

    pub fn take_health_events(&mut self) -> Vec<HealthEvent> {
        let mut events = std::mem::take(&mut self.pending_health_events);
        for enclosure in self.enclosures.iter_mut() {
            events.extend(enclosure.take_health_events());
        }
        events
    }

    pub fn status(&self) -> ZooStatus {
        let resources = self.resources.status();
        ZooStatus {
            name: self.name.clone(),
            days_operational: self.days_operational,
            total_visitors: self.total_visitors,
            visitors_today: self.visitors_today,
            enclosure_count: self.enclosures.len(),
            animal_count: self.animal_count(),
            enclosures: self.enclosures.iter().map(Enclosure::info).collect(),
            staff: self.staff.iter().map(Staff::info).collect(),
            financials: Financials {
                funds: resources.funds,
                ticket_price: self.ticket_price,
                daily_costs: resources.last_day.costs,
                daily_income: resources.last_day.income,
            },
            resources,
        }
    }
}
