//! 每日隨機事件。每個事件自行決定影響，由 `EventManager` 依機率觸發。

use crate::animals::{AnimalFactory, AnimalOptions};
use crate::domain::model::{EventOutcome, EventSeverity, EventSummary, EventType};
use crate::domain::ports::Cleanable;
use crate::zoo::Zoo;
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

pub const DEFAULT_MAX_EVENTS_PER_DAY: usize = 3;

/// 事件觸發時可存取的狀態
pub struct EventContext<'a> {
    pub zoo: &'a mut Zoo,
    pub factory: &'a AnimalFactory,
    pub day: u32,
    pub rng: &'a mut StdRng,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventResult {
    Occurred(EventOutcome),
    Skipped(String),
}

pub trait ZooEvent {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn event_type(&self) -> EventType;
    fn severity(&self) -> EventSeverity;
    /// 每日觸發機率 0.0-1.0
    fn probability(&self) -> f64;
    fn trigger(&self, ctx: &mut EventContext<'_>) -> EventResult;

    fn emoji(&self) -> &'static str {
        self.severity().emoji()
    }
}

fn occurred(messages: Vec<String>, visitor_impact: i64) -> EventResult {
    EventResult::Occurred(EventOutcome {
        messages,
        visitor_impact,
        ..Default::default()
    })
}

pub struct HeatwaveEvent;

impl ZooEvent for HeatwaveEvent {
    fn name(&self) -> &str {
        "Heatwave"
    }

    fn description(&self) -> &str {
        "A severe heatwave hits the zoo!"
    }

    fn event_type(&self) -> EventType {
        EventType::Weather
    }

    fn severity(&self) -> EventSeverity {
        EventSeverity::Negative
    }

    fn probability(&self) -> f64 {
        0.15
    }

    fn trigger(&self, ctx: &mut EventContext<'_>) -> EventResult {
        let mut health_impact = 0.0;
        let mut happiness_impact = 0.0;

        for enclosure in ctx.zoo.enclosures_mut() {
            for animal in enclosure.animals_mut() {
                let health_loss = ctx.rng.random_range(5.0..15.0);
                let happiness_loss = ctx.rng.random_range(10.0..25.0);
                animal.adjust_health(-health_loss);
                animal.adjust_happiness(-happiness_loss);
                health_impact += health_loss;
                happiness_impact += happiness_loss;
            }
        }

        let visitor_loss: i64 = ctx.rng.random_range(20..=50);
        EventResult::Occurred(EventOutcome {
            messages: vec![
                "🌡️ Animals are suffering from the heat! Health and happiness decreased.".to_string(),
                format!("☀️ Visitor numbers dropped by {} due to extreme heat.", visitor_loss),
            ],
            health_impact: -health_impact,
            happiness_impact: -happiness_impact,
            visitor_impact: -visitor_loss,
            ..Default::default()
        })
    }
}

pub struct PerfectWeatherEvent;

impl ZooEvent for PerfectWeatherEvent {
    fn name(&self) -> &str {
        "Perfect Weather"
    }

    fn description(&self) -> &str {
        "The weather is absolutely perfect today!"
    }

    fn event_type(&self) -> EventType {
        EventType::Weather
    }

    fn severity(&self) -> EventSeverity {
        EventSeverity::Positive
    }

    fn probability(&self) -> f64 {
        0.20
    }

    fn trigger(&self, ctx: &mut EventContext<'_>) -> EventResult {
        let mut happiness_impact = 0.0;
        for enclosure in ctx.zoo.enclosures_mut() {
            for animal in enclosure.animals_mut() {
                let gain = ctx.rng.random_range(10.0..20.0);
                animal.adjust_happiness(gain);
                happiness_impact += gain;
            }
        }

        let visitor_boost: i64 = ctx.rng.random_range(30..=80);
        EventResult::Occurred(EventOutcome {
            messages: vec![
                "☀️ Animals are enjoying the beautiful weather! Happiness increased.".to_string(),
                format!(
                    "🌤️ Visitor numbers increased by {} due to perfect weather!",
                    visitor_boost
                ),
            ],
            happiness_impact,
            visitor_impact: visitor_boost,
            ..Default::default()
        })
    }
}

pub struct RainyDayEvent;

impl RainyDayEvent {
    const RAIN_LOVERS: [&'static str; 2] = ["Elephant", "Penguin"];
}

impl ZooEvent for RainyDayEvent {
    fn name(&self) -> &str {
        "Rainy Day"
    }

    fn description(&self) -> &str {
        "It's raining heavily at the zoo."
    }

    fn event_type(&self) -> EventType {
        EventType::Weather
    }

    fn severity(&self) -> EventSeverity {
        EventSeverity::Neutral
    }

    fn probability(&self) -> f64 {
        0.25
    }

    fn trigger(&self, ctx: &mut EventContext<'_>) -> EventResult {
        let mut messages = Vec::new();

        for enclosure in ctx.zoo.enclosures_mut() {
            for animal in enclosure.animals_mut() {
                if Self::RAIN_LOVERS.contains(&animal.species()) {
                    animal.adjust_happiness(15.0);
                    messages.push(format!(
                        "💧 {} the {} is enjoying the rain!",
                        animal.name(),
                        animal.species()
                    ));
                } else {
                    animal.adjust_happiness(-8.0);
                }
            }
        }

        let visitor_loss: i64 = ctx.rng.random_range(10..=30);
        messages.push(format!(
            "🌧️ Visitor numbers decreased by {} due to rain.",
            visitor_loss
        ));

        for enclosure in ctx.zoo.enclosures_mut() {
            enclosure.adjust_cleanliness(ctx.rng.random_range(5.0..15.0));
        }
        messages.push("💦 Rain naturally cleaned the enclosures!".to_string());

        occurred(messages, -visitor_loss)
    }
}

pub struct AnimalBirthEvent;

impl AnimalBirthEvent {
    const ADULT_AGE: u32 = 2;
    const SUFFIXES: [&'static str; 4] = ["Junior", "II", "Little", "Baby"];
    const PREFIXES: [&'static str; 3] = ["Little ", "Tiny ", "Baby "];

    pub fn baby_name<R: Rng>(parent_name: &str, rng: &mut R) -> String {
        if rng.random_bool(0.5) {
            let suffix = Self::SUFFIXES.choose(rng).copied().unwrap_or("Junior");
            format!("{} {}", parent_name, suffix)
        } else {
            let prefix = Self::PREFIXES.choose(rng).copied().unwrap_or("Little ");
            format!("{}{}", prefix, parent_name)
        }
    }
}

impl ZooEvent for AnimalBirthEvent {
    fn name(&self) -> &str {
        "Animal Birth"
    }

    fn description(&self) -> &str {
        "A new animal is born in the zoo!"
    }

    fn event_type(&self) -> EventType {
        EventType::Animal
    }

    fn severity(&self) -> EventSeverity {
        EventSeverity::Positive
    }

    fn probability(&self) -> f64 {
        0.10
    }

    fn trigger(&self, ctx: &mut EventContext<'_>) -> EventResult {
        let parents: Vec<(usize, usize)> = ctx
            .zoo
            .enclosures()
            .iter()
            .enumerate()
            .flat_map(|(e, enclosure)| {
                enclosure
                    .animals()
                    .iter()
                    .enumerate()
                    .filter(|(_, animal)| animal.age() >= Self::ADULT_AGE)
                    .map(move |(a, _)| (e, a))
            })
            .collect();

        let Some(&(enclosure_idx, animal_idx)) = parents.choose(ctx.rng) else {
            return EventResult::Skipped("No adult animals for birth event".to_string());
        };

        let enclosure = &ctx.zoo.enclosures()[enclosure_idx];
        let enclosure_name = enclosure.name().to_string();
        let parent = &enclosure.animals()[animal_idx];
        let parent_name = parent.name().to_string();
        let species = parent.species().to_string();

        // 未註冊的物種改用綱別建構，沿用父母的食性與棲地
        let species_key = species.to_lowercase();
        let (animal_type, options) = if ctx.factory.is_registered(&species_key) {
            (species_key, AnimalOptions::default())
        } else {
            (
                parent.class().to_string(),
                AnimalOptions {
                    species: Some(species.clone()),
                    diet: Some(parent.diet()),
                    habitat: Some(parent.habitat().to_string()),
                    ..Default::default()
                },
            )
        };

        let baby_name = Self::baby_name(&parent_name, ctx.rng);
        let baby = match ctx.factory.create_animal(&animal_type, &baby_name, 0, &options) {
            Ok(baby) => baby,
            Err(e) => return EventResult::Skipped(format!("Birth failed: {}", e)),
        };

        if let Err(e) = ctx.zoo.add_animal(baby, &enclosure_name) {
            return EventResult::Skipped(format!("Could not add baby to enclosure: {}", e));
        }

        if let Some(enclosure) = ctx.zoo.find_enclosure_mut(&enclosure_name) {
            for animal in enclosure.animals_mut() {
                animal.adjust_happiness(10.0);
            }
        }

        EventResult::Occurred(EventOutcome {
            messages: vec![
                format!(
                    "🎉 {} gave birth to {} the baby {}!",
                    parent_name, baby_name, species
                ),
                format!("🎊 Animals in {} are celebrating!", enclosure_name),
            ],
            new_animal: Some(baby_name),
            ..Default::default()
        })
    }
}

pub struct AnimalEscapeEvent;

impl AnimalEscapeEvent {
    const UNHAPPY_THRESHOLD: f64 = 40.0;
}

impl ZooEvent for AnimalEscapeEvent {
    fn name(&self) -> &str {
        "Animal Escape"
    }

    fn description(&self) -> &str {
        "An animal has escaped from its enclosure!"
    }

    fn event_type(&self) -> EventType {
        EventType::Animal
    }

    fn severity(&self) -> EventSeverity {
        EventSeverity::Critical
    }

    fn probability(&self) -> f64 {
        0.08
    }

    fn trigger(&self, ctx: &mut EventContext<'_>) -> EventResult {
        let escapers: Vec<String> = ctx
            .zoo
            .enclosures()
            .iter()
            .flat_map(|enclosure| enclosure.animals())
            .filter(|animal| animal.happiness() < Self::UNHAPPY_THRESHOLD)
            .map(|animal| animal.name().to_string())
            .collect();

        let Some(escapee_name) = escapers.choose(ctx.rng).cloned() else {
            return EventResult::Skipped("No unhappy animals to escape".to_string());
        };

        let Some((enclosure_name, escapee)) = ctx.zoo.remove_animal(&escapee_name) else {
            return EventResult::Skipped(format!("{} could not be found", escapee_name));
        };

        let penalty = f64::from(ctx.rng.random_range(500u32..=2000));
        let resources = ctx.zoo.resources_mut();
        let paid = match resources.spend_funds(penalty, "escape recovery") {
            Ok(()) => penalty,
            Err(_) => resources.drain_funds("escape recovery"),
        };

        let visitor_loss: i64 = ctx.rng.random_range(50..=100);

        EventResult::Occurred(EventOutcome {
            messages: vec![
                format!(
                    "🚨 {} the {} escaped from {}!",
                    escapee.name(),
                    escapee.species(),
                    enclosure_name
                ),
                format!("💰 ${:.0} spent on recovery efforts.", paid),
                format!(
                    "🎟️ Visitor numbers decreased by {} due to safety concerns.",
                    visitor_loss
                ),
            ],
            visitor_impact: -visitor_loss,
            financial_impact: -paid,
            lost_animal: Some(escapee.name().to_string()),
            ..Default::default()
        })
    }
}

pub struct GenerousDonorEvent;

impl ZooEvent for GenerousDonorEvent {
    fn name(&self) -> &str {
        "Generous Donor"
    }

    fn description(&self) -> &str {
        "A wealthy donor makes a generous contribution!"
    }

    fn event_type(&self) -> EventType {
        EventType::Financial
    }

    fn severity(&self) -> EventSeverity {
        EventSeverity::Positive
    }

    fn probability(&self) -> f64 {
        0.12
    }

    fn trigger(&self, ctx: &mut EventContext<'_>) -> EventResult {
        // 營運越久，捐款越多
        let base_donation = ctx.rng.random_range(1000u32..=5000);
        let donation = f64::from(base_donation) + f64::from(ctx.day) * 10.0;

        if let Err(e) = ctx.zoo.resources_mut().add_funds(donation, "generous donation") {
            return EventResult::Skipped(format!("Donation could not be booked: {}", e));
        }

        EventResult::Occurred(EventOutcome {
            messages: vec![format!(
                "💰 Generous donor contributed ${:.0} to the zoo!",
                donation
            )],
            financial_impact: donation,
            ..Default::default()
        })
    }
}

pub struct UnexpectedExpenseEvent;

impl ZooEvent for UnexpectedExpenseEvent {
    fn name(&self) -> &str {
        "Unexpected Expense"
    }

    fn description(&self) -> &str {
        "An unexpected maintenance cost arises."
    }

    fn event_type(&self) -> EventType {
        EventType::Financial
    }

    fn severity(&self) -> EventSeverity {
        EventSeverity::Negative
    }

    fn probability(&self) -> f64 {
        0.18
    }

    fn trigger(&self, ctx: &mut EventContext<'_>) -> EventResult {
        let expense = f64::from(ctx.rng.random_range(300u32..=1200));

        match ctx
            .zoo
            .resources_mut()
            .spend_funds(expense, "unexpected maintenance")
        {
            Ok(()) => EventResult::Occurred(EventOutcome {
                messages: vec![format!("🔧 Unexpected maintenance cost: ${:.0}", expense)],
                financial_impact: -expense,
                ..Default::default()
            }),
            Err(_) => EventResult::Skipped(format!(
                "❌ Could not pay ${:.0} expense - insufficient funds!",
                expense
            )),
        }
    }
}

pub struct SchoolTripEvent;

impl ZooEvent for SchoolTripEvent {
    fn name(&self) -> &str {
        "School Trip"
    }

    fn description(&self) -> &str {
        "A large school group visits the zoo!"
    }

    fn event_type(&self) -> EventType {
        EventType::Visitor
    }

    fn severity(&self) -> EventSeverity {
        EventSeverity::Positive
    }

    fn probability(&self) -> f64 {
        0.15
    }

    fn trigger(&self, ctx: &mut EventContext<'_>) -> EventResult {
        let visitor_boost: i64 = ctx.rng.random_range(80..=150);
        occurred(
            vec![format!(
                "🎒 School trip brought {} extra visitors!",
                visitor_boost
            )],
            visitor_boost,
        )
    }
}

pub struct ProtestEvent;

impl ProtestEvent {
    const UNHAPPY_THRESHOLD: f64 = 30.0;

    fn poor_conditions(zoo: &Zoo) -> bool {
        zoo.enclosures().iter().any(|enclosure| {
            enclosure.needs_cleaning()
                || enclosure
                    .animals()
                    .iter()
                    .any(|animal| animal.happiness() < Self::UNHAPPY_THRESHOLD)
        })
    }
}

impl ZooEvent for ProtestEvent {
    fn name(&self) -> &str {
        "Animal Rights Protest"
    }

    fn description(&self) -> &str {
        "Protesters are demonstrating outside the zoo."
    }

    fn event_type(&self) -> EventType {
        EventType::Visitor
    }

    fn severity(&self) -> EventSeverity {
        EventSeverity::Negative
    }

    fn probability(&self) -> f64 {
        0.07
    }

    fn trigger(&self, ctx: &mut EventContext<'_>) -> EventResult {
        if Self::poor_conditions(ctx.zoo) {
            let visitor_loss: i64 = ctx.rng.random_range(60..=120);
            occurred(
                vec![format!(
                    "🚫 Animal rights protest reduced visitors by {}!",
                    visitor_loss
                )],
                -visitor_loss,
            )
        } else {
            occurred(
                vec!["🚫 Protest occurred but had little impact due to good animal care.".to_string()],
                -10,
            )
        }
    }
}

/// 管理所有事件並決定每日觸發哪些
pub struct EventManager {
    events: Vec<Box<dyn ZooEvent>>,
    today_events: Vec<EventSummary>,
    enabled: bool,
    max_per_day: usize,
}

impl std::fmt::Debug for EventManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventManager")
            .field("events", &self.available_events())
            .field("enabled", &self.enabled)
            .field("max_per_day", &self.max_per_day)
            .finish()
    }
}

impl Default for EventManager {
    fn default() -> Self {
        Self::new()
    }
}

impl EventManager {
    pub fn new() -> Self {
        Self {
            events: vec![
                Box::new(HeatwaveEvent),
                Box::new(PerfectWeatherEvent),
                Box::new(RainyDayEvent),
                Box::new(AnimalBirthEvent),
                Box::new(AnimalEscapeEvent),
                Box::new(GenerousDonorEvent),
                Box::new(UnexpectedExpenseEvent),
                Box::new(SchoolTripEvent),
                Box::new(ProtestEvent),
            ],
            today_events: Vec::new(),
            enabled: true,
            max_per_day: DEFAULT_MAX_EVENTS_PER_DAY,
        }
    }

    /// 沒有內建事件的管理器
    pub fn empty() -> Self {
        Self {
            events: Vec::new(),
            ..Self::new()
        }
    }

    pub fn with_max_per_day(mut self, max_per_day: usize) -> Self {
        self.max_per_day = max_per_day.max(1);
        self
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn max_per_day(&self) -> usize {
        self.max_per_day
    }

    pub fn add_custom_event(&mut self, event: Box<dyn ZooEvent>) {
        tracing::debug!("Registered custom event: {}", event.name());
        self.events.push(event);
    }

    pub fn available_events(&self) -> Vec<&str> {
        self.events.iter().map(|e| e.name()).collect()
    }

    pub fn today_events(&self) -> &[EventSummary] {
        &self.today_events
    }

    /// 觸發今日事件：隨機目標數量 1..=max_per_day，打亂後依機率逐一判定
    pub fn trigger_daily_events(&mut self, ctx: &mut EventContext<'_>) -> &[EventSummary] {
        self.today_events.clear();
        if !self.enabled || self.events.is_empty() {
            return &self.today_events;
        }

        let target = ctx.rng.random_range(1..=self.max_per_day);
        self.events.shuffle(ctx.rng);

        for event in &self.events {
            if self.today_events.len() >= target {
                break;
            }
            if !ctx.rng.random_bool(event.probability().clamp(0.0, 1.0)) {
                continue;
            }

            match event.trigger(ctx) {
                EventResult::Occurred(outcome) => {
                    tracing::info!("{} {} occurred", event.emoji(), event.name());
                    self.today_events.push(EventSummary {
                        name: event.name().to_string(),
                        event_type: event.event_type(),
                        severity: event.severity(),
                        outcome,
                    });
                }
                EventResult::Skipped(reason) => {
                    tracing::debug!("{} skipped: {}", event.name(), reason);
                }
            }
        }

        &self.today_events
    }
}
