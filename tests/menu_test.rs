use ozzoo::ui::{MenuSystem, ScriptedPrompt};
use ozzoo::ZooManager;

fn play(lines: &[&str]) -> (ZooManager, ScriptedPrompt, String) {
    let mut manager = ZooManager::new(Some(2025));
    manager.event_manager_mut().set_enabled(false);

    let prompt = ScriptedPrompt::new(lines.iter().copied());
    let mut menu = MenuSystem::new(manager, prompt, Vec::new()).with_initial_funds(30_000.0);
    menu.run().unwrap();

    let (manager, prompt, out) = menu.into_parts();
    (manager, prompt, String::from_utf8(out).unwrap())
}

#[test]
fn test_full_interactive_day() {
    let (manager, prompt, out) = play(&[
        "Sunny Acres", // 動物園名稱
        "2", "lion", "Nala", "4", "1", // 新增動物
        "2", "penguin", "Pingu", "2", "4",
        "3", "1", // 全部餵食
        "6", // 推進一天
        "4", "1", // 清潔
        "5", // 補貨
        "1", // 狀態
        "7", // 近期事件
        "8", // 健康警報
        "0",
    ]);

    assert!(out.contains("Zoo 'Sunny Acres' created with $30,000.00!"));
    assert!(out.contains("Nala the lion added successfully!"));
    assert!(out.contains("Pingu the penguin added successfully!"));
    // 企鵝只吃魚，圍欄配給的是肉
    assert!(out.contains("Pingu: Pingu waddles away from the meat."));
    assert!(out.contains("Successfully fed 1 animals total"));
    assert!(out.contains("DAY 1 MORNING REPORT"));
    assert!(out.contains("Sunny Acres - ZOO STATUS"));
    assert!(out.contains("Nala the Lion"));
    assert!(out.contains("Added Nala the Lion to Savannah Plains"));
    assert!(out.contains("No critical health issues!"));
    assert!(out.contains("Thanks for playing OzZoo!"));

    assert_eq!(manager.day_count(), 1);
    assert_eq!(manager.zoo().unwrap().animal_count(), 2);
    assert_eq!(prompt.remaining(), 0);
}

#[test]
fn test_incompatible_animal_is_reported_not_fatal() {
    let (manager, _, out) = play(&[
        "Mixed Zoo",
        "2", "zebra", "Stripes", "3", "1",
        "2", "lion", "Scar", "6", "1",
        "0",
    ]);

    assert!(out.contains("Stripes the zebra added successfully!"));
    assert!(out.contains("cannot live together with"));
    assert_eq!(manager.zoo().unwrap().animal_count(), 1);
}

#[test]
fn test_feed_specific_enclosure_and_treat() {
    let (manager, _, out) = play(&[
        "Care Zoo",
        "2", "elephant", "Dumbo", "12", "1",
        "3", "2", "1",
        "9", "Dumbo", "vitamins",
        "9", "Dumbo", "unicorn dust",
        "0",
    ]);

    assert!(out.contains("Savannah Plains: fed 1 with vegetables"));
    assert!(out.contains("Treated Dumbo with vitamins"));
    assert!(out.contains("Unknown medicine type: unicorn_dust"));
    let supply = &manager.zoo_status().unwrap().resources.medicine_supply;
    assert_eq!(supply["vitamins"], 24);
}

#[test]
fn test_input_ends_mid_action() {
    let (manager, prompt, out) = play(&["Short Zoo", "2", "lion"]);

    assert!(out.contains("Thanks for playing OzZoo!"));
    assert_eq!(manager.zoo().unwrap().animal_count(), 0);
    assert!(prompt.prompts().iter().any(|p| p == "Enter animal name: "));
}
