use ozzoo::animals::AnimalOptions;
use ozzoo::core::{Autopilot, SimulationEngine, ZooManager};
use ozzoo::domain::model::ZooStatus;
use ozzoo::ScenarioConfig;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

const SCENARIO: &str = r#"
[zoo]
name = "Integration Zoo"
initial_funds = 20000.0
ticket_price = 20.0

[simulation]
seed = 42
max_events_per_day = 2

[autopilot]
restock_threshold_kg = 30.0

[[enclosures]]
name = "Savannah Plains"
capacity = 3
type = "savannah"
compatible_species = ["Lion"]

[[enclosures]]
name = "Grassland"
capacity = 4
type = "savannah"
compatible_species = ["Zebra", "Giraffe", "Elephant"]

[[enclosures]]
name = "Eagle's Peak"
capacity = 2
type = "aviary"

[[enclosures]]
name = "Penguin Pool"
capacity = 3
type = "arctic"

[[animals]]
type = "lion"
name = "Simba"
age = 5
enclosure = "Savannah Plains"
pride_leader = true

[[animals]]
type = "zebra"
name = "Stripes"
age = 3
enclosure = "Grassland"

[[animals]]
type = "eagle"
name = "Sky"
age = 2
enclosure = "Eagle's Peak"
wingspan = 2.1

[[animals]]
type = "penguin"
name = "Pingu"
age = 4
enclosure = "Penguin Pool"

[[staff]]
name = "Robin"
salary = 90.0
"#;

fn assert_vitals_in_bounds(status: &ZooStatus) {
    for enclosure in &status.enclosures {
        assert!((0.0..=100.0).contains(&enclosure.cleanliness));
        assert!(enclosure.animal_count <= enclosure.capacity);
        for animal in &enclosure.animals {
            for vital in [animal.health, animal.hunger, animal.happiness] {
                assert!(
                    (0.0..=100.0).contains(&vital),
                    "{} has vital {} out of bounds",
                    animal.name,
                    vital
                );
            }
        }
    }
    assert!(status.financials.funds >= 0.0);
}

#[test]
fn test_scenario_file_to_csv_report() {
    let mut scenario_file = NamedTempFile::new().unwrap();
    write!(scenario_file, "{}", SCENARIO).unwrap();

    let scenario = ScenarioConfig::from_file(scenario_file.path()).unwrap();
    let manager = scenario.build_manager().unwrap();
    let initial = manager.zoo_status().unwrap();
    assert_eq!(initial.animal_count, 4);
    assert_eq!(initial.enclosures[1].animals[0].name, "Stripes");

    let mut engine = SimulationEngine::new(manager, scenario.autopilot());
    let summary = engine.run(14).unwrap();

    assert_eq!(summary.zoo_name, "Integration Zoo");
    assert_eq!(summary.days_requested, 14);
    assert_eq!(summary.records.len() as u32, summary.days_simulated);
    assert_vitals_in_bounds(&summary.final_status);

    let visitors: u64 = summary.records.iter().map(|r| r.visitors as u64).sum();
    assert_eq!(summary.total_visitors, visitors);
    assert!(summary.records.iter().all(|r| r.events_fired <= 2));

    let temp_dir = TempDir::new().unwrap();
    let report = temp_dir.path().join("days.csv");
    engine.write_csv_report(&report).unwrap();

    let mut reader = csv::Reader::from_path(&report).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(&headers[0], "day");
    assert_eq!(&headers[4], "funds");
    assert_eq!(reader.records().count(), summary.records.len());
}

#[test]
fn test_same_scenario_and_seed_replays_identically() {
    let scenario = ScenarioConfig::from_toml_str(SCENARIO).unwrap();

    let first = SimulationEngine::new(scenario.build_manager().unwrap(), scenario.autopilot())
        .run(20)
        .unwrap();
    let second = SimulationEngine::new(scenario.build_manager().unwrap(), scenario.autopilot())
        .run(20)
        .unwrap();

    assert_eq!(first.records, second.records);
    assert_eq!(first.final_funds, second.final_funds);
}

#[test]
fn test_neglected_animals_raise_health_alerts() {
    let mut manager = ZooManager::new(Some(3));
    manager.event_manager_mut().set_enabled(false);
    manager.create_zoo("Neglect Zoo", 1_000_000.0).unwrap();
    manager
        .add_animal_to_zoo("elephant", "Dumbo", 10, "Savannah Plains", &AnimalOptions::default())
        .unwrap();
    manager
        .add_animal_to_zoo("snake", "Kaa", 6, "Reptile House", &AnimalOptions::default())
        .unwrap();

    let mut last_status = manager.zoo_status().unwrap();
    for _ in 0..60 {
        if manager.zoo_status().unwrap().animal_count == 0 {
            break;
        }
        let report = manager.advance_day().unwrap();
        last_status = report.zoo_status;
        assert_vitals_in_bounds(&last_status);
    }

    // 無人照顧的動物最終會進入危急或死亡
    let alerted = !manager.health_alerts().is_empty();
    let lost_animals = last_status.animal_count < 2;
    assert!(alerted || lost_animals);
    assert!(manager
        .recent_events(usize::MAX)
        .iter()
        .any(|entry| entry.message.starts_with("Advanced to day")));
}

#[test]
fn test_autopilot_keeps_animals_fed() {
    let mut manager = ZooManager::new(Some(8));
    manager.event_manager_mut().set_enabled(false);
    manager.create_zoo("Fed Zoo", 100_000.0).unwrap();
    manager
        .add_animal_to_zoo("giraffe", "Longneck", 7, "Savannah Plains", &AnimalOptions::default())
        .unwrap();

    let mut engine = SimulationEngine::new(manager, Autopilot::default());
    let summary = engine.run(10).unwrap();

    assert!(!summary.game_over);
    let giraffe = &summary.final_status.enclosures[0].animals[0];
    assert!(giraffe.hunger < 50.0, "hunger {}", giraffe.hunger);
    assert!(engine.manager().health_alerts().is_empty());
}
