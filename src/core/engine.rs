use crate::core::game_manager::ZooManager;
use crate::domain::model::{DayReport, ZooStatus};
use crate::domain::ports::DailyRoutine;
use crate::utils::error::{Result, ZooError};
use serde::Serialize;
use std::path::Path;

pub const DEFAULT_RESTOCK_THRESHOLD_KG: f64 = 40.0;
const STAPLE_FOODS: [&str; 3] = ["meat", "seeds", "vegetables"];

/// 自動餵食、清潔與補貨
#[derive(Debug, Clone, PartialEq)]
pub struct Autopilot {
    pub feed: bool,
    pub clean: bool,
    pub restock: bool,
    pub restock_threshold_kg: f64,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            feed: true,
            clean: true,
            restock: true,
            restock_threshold_kg: DEFAULT_RESTOCK_THRESHOLD_KG,
        }
    }
}

impl Autopilot {
    fn needs_restock(&self, manager: &ZooManager) -> bool {
        manager.zoo().is_some_and(|zoo| {
            STAPLE_FOODS
                .iter()
                .any(|food| zoo.resources().food_stock(food) < self.restock_threshold_kg)
        })
    }
}

impl DailyRoutine for Autopilot {
    fn run(&self, manager: &mut ZooManager) -> Result<Vec<String>> {
        let mut actions = Vec::new();

        if self.restock && self.needs_restock(manager) {
            let report = manager.buy_supplies()?;
            actions.push(format!(
                "Restocked supplies ({} ordered, {} failed)",
                report.ordered.len(),
                report.failed.len()
            ));
        }

        if self.feed {
            let results = manager.feed_animals(None)?;
            let fed: usize = results.iter().map(|r| r.fed_count()).sum();
            actions.push(format!("Fed {} animals", fed));
        }

        if self.clean {
            let cleaned = manager.clean_enclosures(None)?;
            if cleaned > 0 {
                actions.push(format!("Cleaned {} enclosures", cleaned));
            }
        }

        Ok(actions)
    }
}

/// CSV 報表的一列
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayRecord {
    pub day: u32,
    pub visitors: u32,
    pub income: f64,
    pub costs: f64,
    pub funds: f64,
    pub animal_count: usize,
    pub events_fired: usize,
    pub events: String,
    pub actions: String,
    pub deceased: String,
}

impl DayRecord {
    fn from_report(report: &DayReport, actions: &[String]) -> Self {
        let status = &report.zoo_status;
        Self {
            day: report.day,
            visitors: status.visitors_today,
            income: status.financials.daily_income,
            costs: status.financials.daily_costs,
            funds: status.financials.funds,
            animal_count: status.animal_count,
            events_fired: report.special_events.len(),
            events: report
                .special_events
                .iter()
                .map(|e| e.name.as_str())
                .collect::<Vec<_>>()
                .join("; "),
            actions: actions.join("; "),
            deceased: report.deceased.join("; "),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationSummary {
    pub zoo_name: String,
    pub days_requested: u32,
    pub days_simulated: u32,
    pub game_over: bool,
    pub total_visitors: u64,
    pub final_funds: f64,
    pub records: Vec<DayRecord>,
    pub final_status: ZooStatus,
}

/// 以固定的每日例行工作連續推進多天
pub struct SimulationEngine<R: DailyRoutine> {
    manager: ZooManager,
    routine: R,
    records: Vec<DayRecord>,
}

impl<R: DailyRoutine> SimulationEngine<R> {
    pub fn new(manager: ZooManager, routine: R) -> Self {
        Self {
            manager,
            routine,
            records: Vec::new(),
        }
    }

    pub fn manager(&self) -> &ZooManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut ZooManager {
        &mut self.manager
    }

    pub fn records(&self) -> &[DayRecord] {
        &self.records
    }

    pub fn into_manager(self) -> ZooManager {
        self.manager
    }

    pub fn run(&mut self, days: u32) -> Result<SimulationSummary> {
        let status = self.manager.zoo_status()?;
        tracing::info!("🚀 Running {} for {} days", status.name, days);

        let mut days_simulated = 0;
        for _ in 0..days {
            if self.manager.is_game_over() {
                tracing::warn!("💀 Game over: {} ran out of funds", status.name);
                break;
            }

            let actions = self.routine.run(&mut self.manager)?;
            let report = self.manager.advance_day()?;
            let record = DayRecord::from_report(&report, &actions);

            tracing::info!(
                "📅 Day {}: {} visitors, funds ${:.2}, {} events",
                record.day,
                record.visitors,
                record.funds,
                record.events_fired
            );
            self.records.push(record);
            days_simulated += 1;
        }

        let final_status = self.manager.zoo_status()?;
        Ok(SimulationSummary {
            zoo_name: final_status.name.clone(),
            days_requested: days,
            days_simulated,
            game_over: self.manager.is_game_over(),
            total_visitors: final_status.total_visitors,
            final_funds: final_status.financials.funds,
            records: self.records.clone(),
            final_status,
        })
    }

    pub fn write_csv_report<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_csv_report(&self.records, path)
    }
}

/// 將每日紀錄寫成 CSV
pub fn write_csv_report<P: AsRef<Path>>(records: &[DayRecord], path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(ZooError::IoError)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush().map_err(ZooError::IoError)?;

    tracing::info!("📁 Wrote {} day records to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animals::AnimalOptions;
    use tempfile::TempDir;

    fn manager() -> ZooManager {
        let mut manager = ZooManager::new(Some(2024));
        manager.create_zoo("Engine Zoo", 50_000.0).unwrap();
        manager
            .add_animal_to_zoo("lion", "Simba", 5, "Savannah Plains", &AnimalOptions::default())
            .unwrap();
        manager
            .add_animal_to_zoo("penguin", "Pingu", 3, "Penguin Pool", &AnimalOptions::default())
            .unwrap();
        manager
    }

    #[test]
    fn test_run_records_each_day() {
        let mut engine = SimulationEngine::new(manager(), Autopilot::default());
        let summary = engine.run(7).unwrap();

        assert_eq!(summary.days_simulated, 7);
        assert!(!summary.game_over);
        assert_eq!(summary.records.len(), 7);
        for (i, record) in summary.records.iter().enumerate() {
            assert_eq!(record.day, i as u32 + 1);
            assert!(record.visitors >= 10);
            assert!(record.actions.contains("Fed"));
        }
        assert_eq!(summary.final_status.days_operational, 7);
    }

    #[test]
    fn test_same_seed_same_run() {
        let first = SimulationEngine::new(manager(), Autopilot::default())
            .run(10)
            .unwrap();
        let second = SimulationEngine::new(manager(), Autopilot::default())
            .run(10)
            .unwrap();
        assert_eq!(first.records, second.records);
    }

    #[test]
    fn test_stops_on_game_over() {
        let mut manager = ZooManager::new(Some(5));
        manager.event_manager_mut().set_enabled(false);
        manager
            .create_zoo_with(
                crate::zoo::Zoo::new("Doomed", 1_000.0).with_ticket_price(0.0),
                crate::core::game_manager::starter_enclosures(),
            )
            .unwrap();

        let summary = SimulationEngine::new(manager, Autopilot::default())
            .run(30)
            .unwrap();
        assert!(summary.game_over);
        assert!(summary.days_simulated < 30);
        assert_eq!(summary.final_funds, 0.0);
    }

    #[test]
    fn test_restock_when_staples_low() {
        let mut manager = manager();
        manager.event_manager_mut().set_enabled(false);
        let autopilot = Autopilot {
            feed: false,
            clean: false,
            restock: true,
            restock_threshold_kg: 150.0,
        };

        let actions = autopilot.run(&mut manager).unwrap();
        assert_eq!(actions.len(), 1);
        assert!(actions[0].starts_with("Restocked"));

        let idle = Autopilot {
            feed: false,
            clean: false,
            restock: false,
            ..Autopilot::default()
        };
        assert!(idle.run(&mut manager).unwrap().is_empty());
    }

    #[test]
    fn test_csv_report() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("reports").join("days.csv");

        let mut engine = SimulationEngine::new(manager(), Autopilot::default());
        engine.run(3).unwrap();
        engine.write_csv_report(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("day,visitors,income,costs,funds"));
        assert!(lines[1].starts_with("1,"));
    }
}
