//! 純文字格式化。所有函式回傳 `String`，由呼叫端決定輸出位置。

use crate::core::game_manager::{EventStatistics, LogEntry};
use crate::core::engine::SimulationSummary;
use crate::domain::model::{
    AnimalInfo, DayReport, EventSeverity, EventSummary, FeedingResult, RestockReport, ZooStatus,
};
use std::fmt::Write;

const HEADER_WIDTH: usize = 60;
const ANIMALS_PER_ENCLOSURE: usize = 3;

/// 選單項目：按鍵、標籤、說明
pub type MenuOption<'a> = (&'a str, &'a str, &'a str);

pub fn header(title: &str, width: usize) -> String {
    let line = "═".repeat(width);
    format!("\n{}\n{:^width$}\n{}\n", line, title, line, width = width)
}

pub fn section(title: &str) -> String {
    format!("\n▶ {}", title)
}

pub fn success(message: &str) -> String {
    format!("✅ {}", message)
}

pub fn error(message: &str) -> String {
    format!("❌ {}", message)
}

pub fn warning(message: &str) -> String {
    format!("⚠️  {}", message)
}

pub fn info(message: &str) -> String {
    format!("💡 {}", message)
}

/// 千分位金額，例如 `$12,345.67`
pub fn format_money(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("${}", amount);
    }

    let text = format!("{:.2}", amount.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // 四捨五入成 0 時不顯示負號
    let sign = if amount < 0.0 && text != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}

pub fn money(amount: f64, context: &str) -> String {
    if context.is_empty() {
        format!("💰 {}", format_money(amount))
    } else {
        format!("💰 {}: {}", context, format_money(amount))
    }
}

pub fn health_emoji(health: f64) -> &'static str {
    if health >= 70.0 {
        "💚"
    } else if health >= 40.0 {
        "💛"
    } else {
        "❤️"
    }
}

fn happiness_emoji(happiness: f64) -> &'static str {
    match happiness {
        h if h >= 80.0 => "😄",
        h if h >= 60.0 => "😊",
        h if h >= 40.0 => "😐",
        h if h >= 20.0 => "😟",
        _ => "😢",
    }
}

fn hunger_emoji(hunger: f64) -> &'static str {
    if hunger <= 20.0 {
        "🍖"
    } else if hunger <= 50.0 {
        "🍽️"
    } else {
        "🆘"
    }
}

pub fn animal_status(animal: &AnimalInfo) -> String {
    format!(
        "  {} the {}\n    {} Health: {:.1}% | {} Happiness: {:.1}% | {} Hunger: {:.1}%",
        animal.name,
        animal.species,
        health_emoji(animal.health),
        animal.health,
        happiness_emoji(animal.happiness),
        animal.happiness,
        hunger_emoji(animal.hunger),
        animal.hunger
    )
}

/// 依清潔度與動物密度估算的訪客滿意度
pub fn visitor_satisfaction(status: &ZooStatus) -> Option<f64> {
    let total = status.enclosures.len();
    if total == 0 {
        return None;
    }
    let clean = status
        .enclosures
        .iter()
        .filter(|e| e.cleanliness > 70.0)
        .count();
    let cleanliness_score = clean as f64 / total as f64 * 100.0;
    let density = status.animal_count as f64 / total as f64;
    Some((cleanliness_score * 0.6 + (density * 10.0).min(40.0)).min(100.0))
}

pub fn zoo_status(status: &ZooStatus) -> String {
    let mut out = header(&format!("🏰 {} - ZOO STATUS", status.name), 70);

    out.push_str(&section("FINANCIAL SUMMARY"));
    let f = &status.financials;
    let _ = write!(
        out,
        "\n{}\n{}\n{}\n🎟️  Ticket Price: ${:.2}\n",
        money(f.funds, "Current Funds"),
        money(f.daily_income, "Last Day's Income"),
        money(f.daily_costs, "Last Day's Costs"),
        f.ticket_price
    );

    out.push_str(&section("ZOO STATISTICS"));
    let _ = write!(
        out,
        "\n📅 Days Operational: {}\n🎟️  Visitors Today: {}\n🎟️  Total Visitors: {}\n🐾 Total Animals: {}\n🏠 Total Enclosures: {}\n",
        status.days_operational,
        status.visitors_today,
        status.total_visitors,
        status.animal_count,
        status.enclosure_count
    );
    if let Some(satisfaction) = visitor_satisfaction(status) {
        let _ = writeln!(out, "😊 Visitor Satisfaction: {:.1}%", satisfaction);
    }

    out.push_str(&section("ENCLOSURE STATUS"));
    for enclosure in &status.enclosures {
        let clean_emoji = match enclosure.cleanliness {
            c if c >= 80.0 => "✨",
            c if c >= 50.0 => "✅",
            _ => "🧹",
        };
        let _ = write!(
            out,
            "\n  {} ({}/{} animals)\n    {} Cleanliness: {:.1}% | 🏠 Type: {}",
            enclosure.name,
            enclosure.animal_count,
            enclosure.capacity,
            clean_emoji,
            enclosure.cleanliness,
            enclosure.habitat
        );
        for animal in enclosure.animals.iter().take(ANIMALS_PER_ENCLOSURE) {
            let _ = write!(out, "\n{}", animal_status(animal));
        }
        if enclosure.animals.len() > ANIMALS_PER_ENCLOSURE {
            let _ = write!(
                out,
                "\n    ... and {} more animals",
                enclosure.animals.len() - ANIMALS_PER_ENCLOSURE
            );
        }
    }

    if !status.staff.is_empty() {
        out.push_str(&section("STAFF"));
        for member in &status.staff {
            let _ = write!(
                out,
                "\n  👷 {} ({}, {}) {}/day",
                member.name,
                member.role,
                member.specialization,
                format_money(member.salary)
            );
        }
    }

    out.push_str(&section("RESOURCE STATUS"));
    for (food, amount) in &status.resources.food_supply {
        let emoji = if *amount > 20.0 { "📦" } else { "🆘" };
        let _ = write!(out, "\n  {} {}: {:.1}kg", emoji, food, amount);
    }
    for (medicine, units) in &status.resources.medicine_supply {
        let _ = write!(out, "\n  💊 {}: {} units", medicine, units);
    }
    out.push('\n');
    out
}

pub fn quick_stats(status: &ZooStatus, day: u32) -> String {
    format!(
        "💰 {} | 🐾 {} animals | 🎟️ {} visitors | 📅 Day {}",
        format_money(status.financials.funds),
        status.animal_count,
        status.total_visitors,
        day
    )
}

pub fn menu(title: &str, options: &[MenuOption<'_>]) -> String {
    let mut out = header(title, 50);
    for (key, label, description) in options {
        let _ = write!(out, "\n{}. {}", key, label);
        if !description.is_empty() {
            let _ = write!(out, "\n     {}", description);
        }
    }
    out.push('\n');
    out
}

fn event_impacts(event: &EventSummary) -> Vec<String> {
    let mut impacts = Vec::new();
    let money_impact = event.outcome.financial_impact;
    if money_impact > 0.0 {
        impacts.push(format!("💰 +{}", format_money(money_impact)));
    } else if money_impact < 0.0 {
        impacts.push(format!("💰 -{}", format_money(-money_impact)));
    }

    let visitors = event.outcome.visitor_impact;
    if visitors > 0 {
        impacts.push(format!("🎟️  +{} visitors", visitors));
    } else if visitors < 0 {
        impacts.push(format!("🎟️  -{} visitors", -visitors));
    }
    impacts
}

pub fn event_summary(events: &[EventSummary]) -> String {
    if events.is_empty() {
        return info("No special events today.");
    }

    let mut out = section("TODAY'S SPECIAL EVENTS");
    for event in events {
        let _ = write!(out, "\n{}", event);
        if event.severity == EventSeverity::Critical {
            out.push_str(" (CRITICAL)");
        }
        for message in &event.outcome.messages {
            let _ = write!(out, "\n   • {}", message);
        }
        let impacts = event_impacts(event);
        if !impacts.is_empty() {
            let _ = write!(out, "\n   Impact: {}", impacts.join(", "));
        }
    }
    out
}

/// `name_species` 形式的識別碼轉為可讀文字
fn describe_animal_id(animal_id: &str) -> String {
    match animal_id.rsplit_once('_') {
        Some((name, species)) => format!("{} the {}", name, species),
        None => animal_id.to_string(),
    }
}

pub fn health_alerts(critical_animals: &[String]) -> String {
    if critical_animals.is_empty() {
        return success("No critical health issues!");
    }

    let mut out = section("🚨 CRITICAL HEALTH ALERTS");
    for animal_id in critical_animals {
        let _ = write!(
            out,
            "\n❌ {} needs immediate medical attention!",
            describe_animal_id(animal_id)
        );
    }
    let _ = write!(
        out,
        "\n{}",
        info("Treat sick animals, feed them and clean enclosures to improve health.")
    );
    out
}

pub fn day_report(report: &DayReport) -> String {
    let mut out = header(&format!("🌅 DAY {} MORNING REPORT", report.day), HEADER_WIDTH);
    out.push_str(&event_summary(&report.special_events));

    if !report.behavior_events.is_empty() {
        out.push_str(&section("ANIMAL BEHAVIOR"));
        for note in &report.behavior_events {
            let _ = write!(out, "\n  • {}", note);
        }
    }

    for name in &report.deceased {
        let _ = write!(out, "\n💀 {} has passed away.", name);
    }

    let _ = write!(
        out,
        "\n\n🎟️  {} visitors | {} | 📅 Day {}\n",
        report.zoo_status.visitors_today,
        money(report.zoo_status.financials.funds, "Funds"),
        report.day
    );
    if !report.critical_animals.is_empty() {
        out.push_str(&health_alerts(&report.critical_animals));
        out.push('\n');
    }
    out
}

pub fn feeding_results(results: &[FeedingResult]) -> String {
    let mut lines = Vec::new();
    for result in results {
        lines.push(format!(
            "🍽️  {}: fed {} with {}",
            result.enclosure,
            result.fed_count(),
            result.food_type
        ));
        for entry in result.successful.iter().chain(&result.refused) {
            lines.push(format!("   {}", entry));
        }
        for failure in &result.failed {
            lines.push(format!("   {}", error(failure)));
        }
    }
    let total: usize = results.iter().map(FeedingResult::fed_count).sum();
    lines.push(success(&format!("Successfully fed {} animals total", total)));
    lines.join("\n")
}

pub fn restock_report(report: &RestockReport) -> String {
    let mut lines: Vec<String> = report
        .ordered
        .iter()
        .map(|item| format!("📦 Ordered {}", item))
        .collect();
    lines.extend(report.failed.iter().map(|item| error(item)));
    if report.is_complete() {
        lines.push(success("Purchased basic supplies!"));
    } else {
        lines.push(warning("Some supplies could not be purchased."));
    }
    lines.join("\n")
}

pub fn recent_events(entries: &[LogEntry]) -> String {
    if entries.is_empty() {
        return info("Nothing has happened yet.");
    }
    let mut out = section("RECENT EVENTS");
    for entry in entries {
        let _ = write!(out, "\n  {} {}", entry.timestamp.format("%H:%M:%S"), entry);
    }
    out
}

pub fn event_statistics(stats: &EventStatistics) -> String {
    let mut out = format!("📢 Events today: {}", stats.events_today);
    for event in &stats.today_events {
        let _ = write!(
            out,
            "\n  {} {} ({:?})",
            event.severity.emoji(),
            event.name,
            event.event_type
        );
    }
    out
}

pub fn simulation_summary(summary: &SimulationSummary) -> String {
    let mut out = header(&format!("📊 {} - SIMULATION SUMMARY", summary.zoo_name), HEADER_WIDTH);
    let _ = write!(
        out,
        "📅 Days simulated: {}/{}\n🎟️  Total visitors: {}\n{}\n",
        summary.days_simulated,
        summary.days_requested,
        summary.total_visitors,
        money(summary.final_funds, "Final funds")
    );
    for record in &summary.records {
        let _ = write!(
            out,
            "\n  Day {:>3}: {:>4} visitors | +{} -{} | {} | {} animals",
            record.day,
            record.visitors,
            format_money(record.income),
            format_money(record.costs),
            format_money(record.funds),
            record.animal_count
        );
        if !record.events.is_empty() {
            let _ = write!(out, " | {}", record.events);
        }
    }
    if summary.game_over {
        let _ = write!(out, "\n\n{}", error("GAME OVER - the zoo ran out of funds."));
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animals::Animal;
    use crate::zoo::{Enclosure, Zoo};

    #[test]
    fn test_format_money_groups_thousands() {
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(999.5), "$999.50");
        assert_eq!(format_money(1234567.891), "$1,234,567.89");
        assert_eq!(format_money(-2500.0), "-$2,500.00");
        assert_eq!(format_money(-0.001), "$0.00");
        assert_eq!(format_money(1e20), "$100,000,000,000,000,000,000.00");
        assert_eq!(format_money(f64::NAN), "$NaN");
        assert_eq!(format_money(f64::NEG_INFINITY), "$-inf");
    }

    #[test]
    fn test_health_emoji_bands() {
        assert_eq!(health_emoji(85.0), "💚");
        assert_eq!(health_emoji(40.0), "💛");
        assert_eq!(health_emoji(10.0), "❤️");
    }

    #[test]
    fn test_health_alerts_text() {
        assert!(health_alerts(&[]).contains("No critical health issues"));
        let text = health_alerts(&["Mr_Snuggles_Snake".to_string()]);
        assert!(text.contains("Mr_Snuggles the Snake needs immediate medical attention"));
    }

    #[test]
    fn test_zoo_status_lists_enclosures_and_animals() {
        let mut zoo = Zoo::new("Display Zoo", 12_500.0);
        zoo.add_enclosure(Enclosure::new("Pool", 5, "arctic", vec![]))
            .unwrap();
        for name in ["A", "B", "C", "D"] {
            zoo.add_animal(Animal::penguin(name, 2), "Pool").unwrap();
        }

        let text = zoo_status(&zoo.status());
        assert!(text.contains("Display Zoo - ZOO STATUS"));
        assert!(text.contains("$12,500.00"));
        assert!(text.contains("Pool (4/5 animals)"));
        assert!(text.contains("A the Penguin"));
        assert!(text.contains("... and 1 more animals"));
        assert!(text.contains("meat: 100.0kg"));
    }

    #[test]
    fn test_menu_layout() {
        let text = menu("MAIN MENU", &[("1", "View status", ""), ("0", "Exit", "Leave the game")]);
        assert!(text.contains("1. View status"));
        assert!(text.contains("0. Exit\n     Leave the game"));
    }
}
