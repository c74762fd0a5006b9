use crate::domain::model::{FeedOutcome, HealthEvent};

/// 可清潔的設施（圍欄）
pub trait Cleanable {
    fn clean(&mut self);
    /// 清潔度 0-100
    fn cleanliness(&self) -> f64;
    fn needs_cleaning(&self) -> bool;
}

pub trait Feedable {
    fn feed(&mut self, food_type: &str) -> FeedOutcome;
}

/// 接收動物健康狀態變化的觀察者
pub trait HealthObserver {
    fn on_health_event(&mut self, event: &HealthEvent);
}

/// 自動駕駛每日例行工作，回傳執行過的動作描述
pub trait DailyRoutine {
    fn run(&self, manager: &mut crate::core::ZooManager) -> crate::utils::error::Result<Vec<String>>;
}
