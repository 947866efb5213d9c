use serde::{Deserialize, Serialize};

/// Completion and payment statistics for one category within one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub total_amount_paid: f64,
    pub total_completed: u32,
    pub total_tasks: u32,
    /// 1..=12
    pub current_month: u32,
    pub year: i32,
    /// `total_completed / total_tasks`, 0 when there are no tasks
    pub completion_rate: f64,
}

impl MonthlySummary {
    pub fn empty(month: u32, year: i32) -> Self {
        Self {
            total_amount_paid: 0.0,
            total_completed: 0,
            total_tasks: 0,
            current_month: month,
            year,
            completion_rate: 0.0,
        }
    }

    /// Completion rate as a percentage in `[0, 100]`
    pub fn completion_percentage(&self) -> f64 {
        (self.completion_rate * 100.0).clamp(0.0, 100.0)
    }

    pub fn pending(&self) -> u32 {
        self.total_tasks.saturating_sub(self.total_completed)
    }

    /// Sum two summaries of the same month into one
    pub fn combine(&self, other: &MonthlySummary) -> MonthlySummary {
        let total_completed = self.total_completed + other.total_completed;
        let total_tasks = self.total_tasks + other.total_tasks;
        MonthlySummary {
            total_amount_paid: self.total_amount_paid + other.total_amount_paid,
            total_completed,
            total_tasks,
            current_month: self.current_month,
            year: self.year,
            completion_rate: completion_rate(total_completed, total_tasks),
        }
    }
}

/// Guarded division; never divides by zero
pub fn completion_rate(completed: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(completed) / f64::from(total)
    }
}

/// Per-category summaries for one month plus their aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummaries {
    pub personal: MonthlySummary,
    pub company: MonthlySummary,
    pub overall: MonthlySummary,
}

/// Difference between a month and the month before it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryComparison {
    pub amount_delta: f64,
    pub completed_delta: i64,
    pub completion_rate_delta: f64,
}

impl SummaryComparison {
    pub fn between(current: &MonthlySummary, previous: &MonthlySummary) -> Self {
        Self {
            amount_delta: current.total_amount_paid - previous.total_amount_paid,
            completed_delta: i64::from(current.total_completed) - i64::from(previous.total_completed),
            completion_rate_delta: current.completion_rate - previous.completion_rate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryComparison {
    pub personal: SummaryComparison,
    pub company: SummaryComparison,
    pub overall: SummaryComparison,
}
