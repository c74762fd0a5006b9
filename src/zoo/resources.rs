use crate::domain::model::{DayLedger, ResourceStatus};
use crate::utils::error::{Result, ZooError};
use std::collections::BTreeMap;

const STARTING_FOOD: [(&str, f64); 6] = [
    ("meat", 100.0),
    ("fish", 50.0),
    ("seeds", 200.0),
    ("fruits", 150.0),
    ("vegetables", 100.0),
    ("insects", 20.0),
];

const STARTING_MEDICINE: [(&str, u32); 4] = [
    ("vaccine", 10),
    ("antibiotics", 15),
    ("pain_reliever", 20),
    ("vitamins", 25),
];

/// 管理食物、藥品與資金
#[derive(Debug, Clone)]
pub struct ResourceManager {
    food_supply: BTreeMap<String, f64>,
    medicine_supply: BTreeMap<String, u32>,
    funds: f64,
    today: DayLedger,
    last_day: DayLedger,
}

impl ResourceManager {
    pub fn new(initial_funds: f64) -> Self {
        Self {
            food_supply: STARTING_FOOD
                .iter()
                .map(|(name, kg)| (name.to_string(), *kg))
                .collect(),
            medicine_supply: STARTING_MEDICINE
                .iter()
                .map(|(name, units)| (name.to_string(), *units))
                .collect(),
            funds: initial_funds,
            today: DayLedger::default(),
            last_day: DayLedger::default(),
        }
    }

    pub fn funds(&self) -> f64 {
        self.funds
    }

    pub fn food_supply(&self) -> &BTreeMap<String, f64> {
        &self.food_supply
    }

    pub fn medicine_supply(&self) -> &BTreeMap<String, u32> {
        &self.medicine_supply
    }

    pub fn food_stock(&self, food_type: &str) -> f64 {
        self.food_supply.get(food_type).copied().unwrap_or(0.0)
    }

    pub fn last_day(&self) -> DayLedger {
        self.last_day
    }

    pub fn spend_funds(&mut self, amount: f64, purpose: &str) -> Result<()> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(ZooError::FinancialError {
                message: "Cannot spend negative or non-finite amount".to_string(),
                current_balance: self.funds,
                required_amount: amount,
            });
        }

        if self.funds < amount {
            return Err(ZooError::FinancialError {
                message: format!("Insufficient funds for {}", purpose),
                current_balance: self.funds,
                required_amount: amount,
            });
        }

        self.funds -= amount;
        self.today.costs += amount;
        tracing::debug!(
            "💰 Spent ${:.2} on {}. Remaining: ${:.2}",
            amount,
            purpose,
            self.funds
        );
        Ok(())
    }

    /// 付出所有剩餘資金，回傳實際支付的金額
    pub fn drain_funds(&mut self, purpose: &str) -> f64 {
        let paid = self.funds.max(0.0);
        self.funds -= paid;
        self.today.costs += paid;
        tracing::warn!("💸 Paid remaining ${:.2} toward {}", paid, purpose);
        paid
    }

    pub fn add_funds(&mut self, amount: f64, source: &str) -> Result<()> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(ZooError::InvalidAmountError { amount });
        }

        self.funds += amount;
        self.today.income += amount;
        tracing::debug!(
            "💰 Added ${:.2} from {}. Total: ${:.2}",
            amount,
            source,
            self.funds
        );
        Ok(())
    }

    pub fn use_food(&mut self, food_type: &str, amount: f64) -> Result<()> {
        let available = self
            .food_supply
            .get_mut(food_type)
            .ok_or_else(|| ZooError::resource(format!("Unknown food type: {}", food_type)))?;

        if *available < amount {
            return Err(ZooError::resource(format!(
                "Insufficient {}. Available: {:.1}kg, Required: {:.1}kg",
                food_type, available, amount
            )));
        }

        *available -= amount;
        Ok(())
    }

    pub fn use_medicine(&mut self, medicine_type: &str, quantity: u32) -> Result<()> {
        let available = self.medicine_supply.get_mut(medicine_type).ok_or_else(|| {
            ZooError::resource(format!("Unknown medicine type: {}", medicine_type))
        })?;

        if *available < quantity {
            return Err(ZooError::resource(format!(
                "Insufficient {}. Available: {}, Required: {}",
                medicine_type, available, quantity
            )));
        }

        *available -= quantity;
        Ok(())
    }

    pub fn order_food(&mut self, food_type: &str, amount: f64, cost_per_kg: f64) -> Result<()> {
        let total_cost = amount * cost_per_kg;
        self.spend_funds(total_cost, &format!("ordering {}kg of {}", amount, food_type))?;

        let stock = self.food_supply.entry(food_type.to_string()).or_insert(0.0);
        *stock += amount;
        tracing::info!(
            "📦 Ordered {}kg of {}. New supply: {:.1}kg",
            amount,
            food_type,
            stock
        );
        Ok(())
    }

    pub fn order_medicine(
        &mut self,
        medicine_type: &str,
        quantity: u32,
        cost_per_unit: f64,
    ) -> Result<()> {
        let total_cost = f64::from(quantity) * cost_per_unit;
        self.spend_funds(
            total_cost,
            &format!("ordering {} units of {}", quantity, medicine_type),
        )?;

        let stock = self
            .medicine_supply
            .entry(medicine_type.to_string())
            .or_insert(0);
        *stock += quantity;
        tracing::info!(
            "💊 Ordered {} units of {}. New supply: {}",
            quantity,
            medicine_type,
            stock
        );
        Ok(())
    }

    /// 結算當日收支並重置
    pub fn close_day(&mut self) -> DayLedger {
        self.last_day = std::mem::take(&mut self.today);
        self.last_day
    }

    pub fn status(&self) -> ResourceStatus {
        ResourceStatus {
            funds: self.funds,
            daily_costs: self.today.costs,
            daily_income: self.today.income,
            last_day: self.last_day,
            food_supply: self.food_supply.clone(),
            medicine_supply: self.medicine_supply.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_supplies() {
        let resources = ResourceManager::new(1000.0);
        assert_eq!(resources.food_stock("meat"), 100.0);
        assert_eq!(resources.food_stock("insects"), 20.0);
        assert_eq!(resources.medicine_supply()["vitamins"], 25);
        assert_eq!(resources.funds(), 1000.0);
    }

    #[test]
    fn test_spend_funds_rejects_negative_and_overdraft() {
        let mut resources = ResourceManager::new(100.0);
        assert!(matches!(
            resources.spend_funds(-1.0, "refund"),
            Err(ZooError::FinancialError { .. })
        ));

        match resources.spend_funds(150.0, "new fence") {
            Err(ZooError::FinancialError {
                current_balance,
                required_amount,
                ..
            }) => {
                assert_eq!(current_balance, 100.0);
                assert_eq!(required_amount, 150.0);
            }
            other => panic!("expected financial error, got {:?}", other),
        }
        assert_eq!(resources.funds(), 100.0);
    }

    #[test]
    fn test_add_funds_rejects_negative() {
        let mut resources = ResourceManager::new(0.0);
        assert!(matches!(
            resources.add_funds(-5.0, "oops"),
            Err(ZooError::InvalidAmountError { .. })
        ));
    }

    #[test]
    fn test_non_finite_amounts_leave_funds_untouched() {
        let mut resources = ResourceManager::new(100.0);
        for amount in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                resources.add_funds(amount, "donation"),
                Err(ZooError::InvalidAmountError { .. })
            ));
            assert!(matches!(
                resources.spend_funds(amount, "repairs"),
                Err(ZooError::FinancialError { .. })
            ));
        }
        assert_eq!(resources.funds(), 100.0);
    }

    #[test]
    fn test_use_food_errors() {
        let mut resources = ResourceManager::new(0.0);
        assert!(resources.use_food("meat", 10.0).is_ok());
        assert_eq!(resources.food_stock("meat"), 90.0);

        let err = resources.use_food("cake", 1.0).unwrap_err();
        assert!(err.to_string().contains("Unknown food type"));

        let err = resources.use_food("insects", 25.0).unwrap_err();
        assert!(err.to_string().contains("Available: 20.0kg, Required: 25.0kg"));
    }

    #[test]
    fn test_use_medicine() {
        let mut resources = ResourceManager::new(0.0);
        resources.use_medicine("vaccine", 3).unwrap();
        assert_eq!(resources.medicine_supply()["vaccine"], 7);
        assert!(resources.use_medicine("vaccine", 8).is_err());
        assert!(resources.use_medicine("elixir", 1).is_err());
    }

    #[test]
    fn test_order_food_creates_new_type() {
        let mut resources = ResourceManager::new(500.0);
        resources.order_food("worms", 10.0, 5.0).unwrap();
        assert_eq!(resources.food_stock("worms"), 10.0);
        assert_eq!(resources.funds(), 450.0);
    }

    #[test]
    fn test_failed_order_leaves_stock_unchanged() {
        let mut resources = ResourceManager::new(10.0);
        assert!(resources.order_medicine("vaccine", 5, 15.0).is_err());
        assert_eq!(resources.medicine_supply()["vaccine"], 10);
        assert_eq!(resources.funds(), 10.0);
    }

    #[test]
    fn test_close_day_moves_ledger() {
        let mut resources = ResourceManager::new(1000.0);
        resources.add_funds(250.0, "tickets").unwrap();
        resources.spend_funds(100.0, "operations").unwrap();

        let ledger = resources.close_day();
        assert_eq!(ledger.income, 250.0);
        assert_eq!(ledger.costs, 100.0);

        let status = resources.status();
        assert_eq!(status.daily_income, 0.0);
        assert_eq!(status.last_day.income, 250.0);
    }

    #[test]
    fn test_drain_funds() {
        let mut resources = ResourceManager::new(42.0);
        assert_eq!(resources.drain_funds("operations"), 42.0);
        assert_eq!(resources.funds(), 0.0);
    }
}
