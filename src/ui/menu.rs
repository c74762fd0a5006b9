use crate::animals::AnimalOptions;
use crate::config::scenario::MAX_ANIMAL_AGE;
use crate::core::game_manager::{ZooManager, DEFAULT_INITIAL_FUNDS};
use crate::ui::display::{self, MenuOption};
use crate::ui::prompt::Prompt;
use crate::utils::error::{ErrorSeverity, Result, ZooError};
use std::io::Write;

const RECENT_EVENT_COUNT: usize = 10;

const MAIN_MENU: [MenuOption<'static>; 11] = [
    ("1", "📊 View Zoo Status", "See detailed information about your zoo"),
    ("2", "🐾 Add New Animal", "Add a new animal to your zoo"),
    ("3", "🍽️  Feed Animals", "Feed all animals or a specific enclosure"),
    ("4", "🧹 Clean Enclosures", "Keep your enclosures clean and healthy"),
    ("5", "🛒 Buy Supplies", "Purchase food and medicine"),
    ("6", "🌅 Advance Day", "Move to the next day"),
    ("7", "📜 Recent Events", "See what has happened recently"),
    ("8", "🚨 Health Alerts", "Check which animals need medical attention"),
    ("9", "💊 Treat Animal", "Use medicine on a sick animal"),
    ("10", "👷 Zookeepers", "Hire staff and send them on rounds"),
    ("0", "🚪 Exit Game", "Leave OzZoo"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// 互動式文字選單
pub struct MenuSystem<P: Prompt, W: Write> {
    manager: ZooManager,
    prompt: P,
    out: W,
    initial_funds: f64,
}

impl<P: Prompt, W: Write> MenuSystem<P, W> {
    pub fn new(manager: ZooManager, prompt: P, out: W) -> Self {
        Self {
            manager,
            prompt,
            out,
            initial_funds: DEFAULT_INITIAL_FUNDS,
        }
    }

    /// 尚未建立動物園時，新動物園的起始資金
    pub fn with_initial_funds(mut self, initial_funds: f64) -> Self {
        self.initial_funds = initial_funds;
        self
    }

    pub fn manager(&self) -> &ZooManager {
        &self.manager
    }

    pub fn into_parts(self) -> (ZooManager, P, W) {
        (self.manager, self.prompt, self.out)
    }

    fn say(&mut self, text: impl AsRef<str>) -> Result<()> {
        writeln!(self.out, "{}", text.as_ref())?;
        Ok(())
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        self.out.flush()?;
        Ok(self
            .prompt
            .read_line(prompt)?
            .map(|line| line.trim().to_string()))
    }

    /// 主迴圈。EOF、選擇離開或破產時結束
    pub fn run(&mut self) -> Result<()> {
        if self.manager.zoo().is_none() && !self.create_initial_zoo()? {
            return self.say(display::success("Thanks for playing OzZoo! 👋"));
        }

        loop {
            self.show_main_menu()?;
            let Some(choice) = self.ask("Enter your choice (0-10): ")? else {
                self.say(display::success("Thanks for playing OzZoo! 👋"))?;
                break;
            };

            match self.handle_choice(&choice) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(e) if e.severity() == ErrorSeverity::Critical => return Err(e),
                Err(e) => {
                    tracing::debug!("Menu action failed: {}", e);
                    self.say(display::error(&e.user_friendly_message()))?;
                }
            }
        }

        tracing::info!("👋 Interactive session ended on day {}", self.manager.day_count());
        Ok(())
    }

    fn create_initial_zoo(&mut self) -> Result<bool> {
        self.say(display::header("🎮 WELCOME TO OZZOO!", 60))?;
        self.say(display::section("CREATE YOUR DREAM ZOO"))?;

        loop {
            let Some(name) = self.ask("Enter your zoo name: ")? else {
                return Ok(false);
            };
            if name.is_empty() {
                self.say(display::error("Zoo name cannot be empty!"))?;
                continue;
            }

            self.manager.create_zoo(&name, self.initial_funds)?;
            self.say(display::success(&format!(
                "Zoo '{}' created with {}!",
                name,
                display::format_money(self.initial_funds)
            )))?;
            self.say(display::info(
                "Tip: Start by adding some animals and feeding them daily.",
            ))?;
            return Ok(true);
        }
    }

    fn show_main_menu(&mut self) -> Result<()> {
        self.say(format!("\n{}\n      OZZOO - ZOO SIMULATION GAME\n{}", "🦁".repeat(20), "🦁".repeat(20)))?;
        if let Ok(status) = self.manager.zoo_status() {
            let stats = display::quick_stats(&status, self.manager.day_count());
            self.say(stats)?;
        }
        self.say(display::menu("MAIN MENU", &MAIN_MENU))
    }

    fn handle_choice(&mut self, choice: &str) -> Result<Flow> {
        match choice {
            "1" => {
                let status = self.manager.zoo_status()?;
                self.say(display::zoo_status(&status))?;
            }
            "2" => self.add_animal()?,
            "3" => self.feed_animals()?,
            "4" => self.clean_enclosures()?,
            "5" => {
                let report = self.manager.buy_supplies()?;
                self.say(display::restock_report(&report))?;
            }
            "6" => return self.advance_day(),
            "7" => {
                self.say(display::header("📜 RECENT EVENTS", 60))?;
                let text = display::recent_events(self.manager.recent_events(RECENT_EVENT_COUNT));
                self.say(text)?;
                let stats = display::event_statistics(&self.manager.event_statistics());
                self.say(stats)?;
            }
            "8" => {
                self.say(display::header("🚨 HEALTH MONITOR", 60))?;
                let text = display::health_alerts(&self.manager.health_alerts());
                self.say(text)?;
            }
            "9" => self.treat_animal()?,
            "10" => self.manage_staff()?,
            "0" => {
                self.say(display::success("Thanks for playing OzZoo! 👋"))?;
                return Ok(Flow::Exit);
            }
            _ => self.say(display::error("Invalid choice! Please enter 0-10."))?,
        }
        Ok(Flow::Continue)
    }

    /// 列出圍欄並以編號選擇，輸入無效時回傳 None
    fn select_enclosure(&mut self, title: &str) -> Result<Option<String>> {
        let status = self.manager.zoo_status()?;
        let labels: Vec<(String, String)> = status
            .enclosures
            .iter()
            .enumerate()
            .map(|(i, e)| {
                (
                    (i + 1).to_string(),
                    format!(
                        "{} ({}/{}, {}, {:.0}% clean)",
                        e.name, e.animal_count, e.capacity, e.habitat, e.cleanliness
                    ),
                )
            })
            .collect();
        let options: Vec<MenuOption<'_>> = labels
            .iter()
            .map(|(key, label)| (key.as_str(), label.as_str(), ""))
            .collect();
        self.say(display::menu(title, &options))?;

        let Some(choice) = self.ask("Select enclosure (number): ")? else {
            return Ok(None);
        };
        let Ok(index) = choice.parse::<usize>() else {
            self.say(display::error("Please enter a valid number!"))?;
            return Ok(None);
        };
        match index.checked_sub(1).and_then(|i| status.enclosures.get(i)) {
            Some(enclosure) => Ok(Some(enclosure.name.clone())),
            None => {
                self.say(display::error("Invalid enclosure selection!"))?;
                Ok(None)
            }
        }
    }

    fn add_animal(&mut self) -> Result<()> {
        if self.manager.zoo().is_none() {
            return Err(ZooError::NoZooError);
        }

        self.say(display::header("🐾 ADD NEW ANIMAL", 60))?;
        self.say(display::section("AVAILABLE SPECIES"))?;
        let species = self.manager.available_animals();
        self.say(species.join(", "))?;

        let Some(animal_type) = self.ask("Enter animal type: ")? else {
            return Ok(());
        };
        if !self.manager.factory().is_registered(&animal_type) {
            return self.say(display::error(&format!(
                "Unknown animal type. Available: {}",
                species.join(", ")
            )));
        }

        let Some(name) = self.ask("Enter animal name: ")? else {
            return Ok(());
        };
        if name.is_empty() {
            return self.say(display::error("Animal name cannot be empty!"));
        }

        let Some(age) = self.ask("Enter animal age (years): ")? else {
            return Ok(());
        };
        let age = match age.parse::<u32>() {
            Ok(age) if age <= MAX_ANIMAL_AGE => age,
            Ok(_) => {
                return self.say(display::error(&format!(
                    "Please enter a reasonable age (0-{})!",
                    MAX_ANIMAL_AGE
                )))
            }
            Err(_) => return self.say(display::error("Please enter a valid number for age!")),
        };

        let Some(enclosure) = self.select_enclosure("SELECT ENCLOSURE")? else {
            return Ok(());
        };

        self.manager.add_animal_to_zoo(
            &animal_type,
            &name,
            age,
            &enclosure,
            &AnimalOptions::default(),
        )?;
        self.say(display::success(&format!(
            "{} the {} added successfully!",
            name,
            animal_type.to_lowercase()
        )))
    }

    fn feed_animals(&mut self) -> Result<()> {
        self.say(display::header("🍽️  FEED ANIMALS", 60))?;
        self.say(display::menu(
            "FEEDING OPTIONS",
            &[
                ("1", "Feed all animals", ""),
                ("2", "Feed a specific enclosure", ""),
                ("3", "Back to main menu", ""),
            ],
        ))?;

        let results = match self.ask("Enter your choice (1-3): ")?.as_deref() {
            Some("1") => self.manager.feed_animals(None)?,
            Some("2") => match self.select_enclosure("SELECT ENCLOSURE TO FEED")? {
                Some(enclosure) => self.manager.feed_animals(Some(&enclosure))?,
                None => return Ok(()),
            },
            Some("3") | None => return Ok(()),
            Some(_) => return self.say(display::error("Invalid choice!")),
        };

        if results.iter().all(|r| r.fed_count() == 0) {
            self.say(display::feeding_results(&results))?;
            return self.say(display::error("No animals were fed. Check food supplies!"));
        }
        self.say(display::feeding_results(&results))
    }

    fn clean_enclosures(&mut self) -> Result<()> {
        self.say(display::header("🧹 CLEAN ENCLOSURES", 60))?;

        let status = self.manager.zoo_status()?;
        let dirty: Vec<_> = status.enclosures.iter().filter(|e| e.needs_cleaning).collect();
        if dirty.is_empty() {
            return self.say(display::success("All enclosures are clean! 🎉"));
        }

        self.say(display::section("DIRTY ENCLOSURES NEEDING CLEANING"))?;
        let lines: Vec<String> = dirty
            .iter()
            .map(|e| {
                let urgency = if e.cleanliness < 30.0 { "URGENT" } else { "Soon" };
                format!("  🧹 {} - {:.1}% ({})", e.name, e.cleanliness, urgency)
            })
            .collect();
        for line in lines {
            self.say(line)?;
        }

        self.say(display::menu(
            "CLEANING OPTIONS",
            &[
                ("1", "Clean all dirty enclosures", ""),
                ("2", "Clean a specific enclosure", ""),
                ("3", "Back to main menu", ""),
            ],
        ))?;

        match self.ask("Enter your choice (1-3): ")?.as_deref() {
            Some("1") => {
                let cleaned = self.manager.clean_enclosures(None)?;
                self.say(display::success(&format!("Cleaned {} enclosures!", cleaned)))
            }
            Some("2") => {
                let Some(enclosure) = self.select_enclosure("SELECT ENCLOSURE TO CLEAN")? else {
                    return Ok(());
                };
                if self.manager.clean_enclosures(Some(&enclosure))? > 0 {
                    self.say(display::success(&format!("Cleaned {}!", enclosure)))
                } else {
                    self.say(display::warning(&format!("{} is already clean!", enclosure)))
                }
            }
            Some("3") | None => Ok(()),
            Some(_) => self.say(display::error("Invalid choice!")),
        }
    }

    fn advance_day(&mut self) -> Result<Flow> {
        let report = self.manager.advance_day()?;
        self.say(display::day_report(&report))?;

        if self.manager.is_game_over() {
            self.say(display::header("💀 GAME OVER", 50))?;
            self.say(display::error("Your zoo has run out of funds!"))?;
            self.say(display::info("Better luck next time!"))?;
            return Ok(Flow::Exit);
        }
        Ok(Flow::Continue)
    }

    fn treat_animal(&mut self) -> Result<()> {
        let status = self.manager.zoo_status()?;
        self.say(display::header("💊 TREAT ANIMAL", 60))?;
        self.say(display::health_alerts(&self.manager.health_alerts()))?;

        let Some(animal) = self.ask("Enter animal name: ")? else {
            return Ok(());
        };
        if animal.is_empty() {
            return self.say(display::error("Animal name cannot be empty!"));
        }

        self.say(display::section("MEDICINE CABINET"))?;
        let cabinet: Vec<String> = status
            .resources
            .medicine_supply
            .iter()
            .map(|(medicine, units)| format!("  💊 {}: {} units", medicine, units))
            .collect();
        self.say(cabinet.join("\n"))?;

        let Some(medicine) = self.ask("Enter medicine: ")? else {
            return Ok(());
        };
        let message = self.manager.treat_animal(&animal, &medicine)?;
        self.say(display::success(&message))
    }

    fn manage_staff(&mut self) -> Result<()> {
        self.say(display::header("👷 ZOOKEEPERS", 60))?;
        self.say(display::menu(
            "STAFF OPTIONS",
            &[
                ("1", "Hire a zookeeper", ""),
                ("2", "Send a zookeeper on rounds", "Feeds and cleans every enclosure"),
                ("3", "Back to main menu", ""),
            ],
        ))?;

        match self.ask("Enter your choice (1-3): ")?.as_deref() {
            Some("1") => self.hire_zookeeper(),
            Some("2") => {
                let Some(keeper) = self.ask("Zookeeper name: ")? else {
                    return Ok(());
                };
                let (results, cleaned) = self.manager.keeper_rounds(&keeper)?;
                self.say(display::feeding_results(&results))?;
                self.say(display::success(&format!(
                    "{} cleaned {} enclosures",
                    keeper, cleaned
                )))
            }
            Some("3") | None => Ok(()),
            Some(_) => self.say(display::error("Invalid choice!")),
        }
    }

    fn hire_zookeeper(&mut self) -> Result<()> {
        let Some(name) = self.ask("Zookeeper name: ")? else {
            return Ok(());
        };
        let Some(salary) = self.ask("Daily salary: ")? else {
            return Ok(());
        };
        let Ok(salary) = salary.trim_start_matches('$').parse::<f64>() else {
            return self.say(display::error("Please enter a valid salary!"));
        };
        let Some(specialization) = self.ask("Specialization (blank for general): ")? else {
            return Ok(());
        };
        let specialization = (!specialization.is_empty()).then_some(specialization);

        self.manager.hire_staff(&name, salary, specialization)?;
        self.say(display::success(&format!("Hired zookeeper {}!", name)))
    }
}
