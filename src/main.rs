use anyhow::Context;
use clap::Parser;
use ozzoo::ui::{display, LinePrompt, MenuSystem};
use ozzoo::utils::error::{ErrorSeverity, ZooError};
use ozzoo::utils::{logger, validation::Validate};
use ozzoo::{AnimalFactory, CliConfig, ScenarioConfig, SimulationEngine};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose, config.log_json);

    tracing::info!("Starting ozzoo");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(err) = run(&config) {
        let Some(e) = err.downcast_ref::<ZooError>() else {
            return Err(err);
        };

        // 記錄詳細錯誤信息
        tracing::error!(
            "❌ ozzoo failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn run(config: &CliConfig) -> anyhow::Result<()> {
    if config.list_species {
        println!("{}", display::section("AVAILABLE SPECIES"));
        for species in AnimalFactory::new().available_species() {
            println!("  🐾 {}", species);
        }
        return Ok(());
    }

    let scenario = config.load_scenario()?;
    scenario.validate()?;

    if config.dry_run {
        return dry_run(config, &scenario);
    }

    match scenario.simulation.days {
        Some(days) => autopilot(config, &scenario, days),
        None => interactive(config, &scenario),
    }
}

fn dry_run(config: &CliConfig, scenario: &ScenarioConfig) -> anyhow::Result<()> {
    let manager = scenario.build_manager()?;
    let status = manager.zoo_status()?;

    if config.json {
        let json = serde_json::to_string_pretty(&status).context("serializing zoo status")?;
        println!("{}", json);
    } else {
        println!("{}", display::zoo_status(&status));
        println!("{}", display::success("Scenario is valid."));
    }
    Ok(())
}

fn autopilot(config: &CliConfig, scenario: &ScenarioConfig, days: u32) -> anyhow::Result<()> {
    let manager = scenario.build_manager()?;
    let mut engine = SimulationEngine::new(manager, scenario.autopilot());
    let summary = engine.run(days)?;

    if let Some(path) = &config.report {
        engine.write_csv_report(path)?;
        tracing::info!("📁 Report saved to: {}", path);
    }

    if config.json {
        let json =
            serde_json::to_string_pretty(&summary).context("serializing simulation summary")?;
        println!("{}", json);
    } else {
        println!("{}", display::simulation_summary(&summary));
    }

    tracing::info!(
        "✅ Simulation finished after {} of {} days",
        summary.days_simulated,
        summary.days_requested
    );
    Ok(())
}

fn interactive(config: &CliConfig, scenario: &ScenarioConfig) -> anyhow::Result<()> {
    // 未指定情境或名稱時由玩家命名動物園
    let manager = if config.config.is_none() && config.name.is_none() {
        scenario.new_manager()
    } else {
        scenario.build_manager()?
    };

    let prompt = LinePrompt::new()?;
    let stdout = std::io::stdout();
    let mut menu = MenuSystem::new(manager, prompt, stdout.lock())
        .with_initial_funds(scenario.zoo.initial_funds);
    menu.run()?;
    Ok(())
}
