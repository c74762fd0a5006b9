use crate::config::scenario::ScenarioConfig;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "ozzoo")]
#[command(about = "Run a zoo day by day, interactively or on autopilot")]
pub struct CliConfig {
    #[arg(long, help = "Scenario TOML file")]
    pub config: Option<String>,

    #[arg(long, help = "Zoo name (overrides the scenario)")]
    pub name: Option<String>,

    #[arg(long, help = "Starting funds (overrides the scenario)")]
    pub funds: Option<f64>,

    #[arg(long, help = "Seed for a reproducible run")]
    pub seed: Option<u64>,

    #[arg(long, help = "Run this many days on autopilot instead of the menu")]
    pub days: Option<u32>,

    #[arg(long, help = "Print the autopilot summary as JSON")]
    pub json: bool,

    #[arg(long, help = "Write the autopilot day records to this CSV file")]
    pub report: Option<String>,

    #[arg(long, help = "List the animal types the factory can create")]
    pub list_species: bool,

    #[arg(long, help = "Validate the scenario and build the zoo without running it")]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    /// 讀取情境檔（沒有時用預設值）並套用命令列覆寫
    pub fn load_scenario(&self) -> Result<ScenarioConfig> {
        let mut scenario = match &self.config {
            Some(path) => ScenarioConfig::from_file(path)?,
            None => ScenarioConfig::default(),
        };
        self.apply_overrides(&mut scenario);
        Ok(scenario)
    }

    pub fn apply_overrides(&self, scenario: &mut ScenarioConfig) {
        if let Some(name) = &self.name {
            scenario.zoo.name = name.clone();
        }
        if let Some(funds) = self.funds {
            scenario.zoo.initial_funds = funds;
        }
        if let Some(seed) = self.seed {
            scenario.simulation.seed = Some(seed);
        }
        if let Some(days) = self.days {
            scenario.simulation.days = Some(days);
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validation::validate_path("config", path)?;
        }
        if let Some(path) = &self.report {
            validation::validate_path("report", path)?;
        }
        if let Some(name) = &self.name {
            validation::validate_non_empty_string("name", name)?;
        }
        if let Some(funds) = self.funds {
            validation::validate_finite_range("funds", funds, 0.0, f64::MAX)?;
        }
        if let Some(days) = self.days {
            validation::validate_positive_number("days", days as usize, 1)?;
        }
        Ok(())
    }
}
