//! Dashboard report shapes

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_revenue: String,
    pub total_transactions: i64,
    pub total_payouts: String,
    pub active_users: i64,
    pub pending_contracts: i64,
    pub overdue_invoices: i64,
}

/// One day of the revenue chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueChartPoint {
    pub date: NaiveDate,
    pub amount: String,
    pub transaction_count: i64,
}

/// One bucket of the weekly trend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
    pub label: String,
    pub value: String,
    pub percentage_change: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_deserializes() {
        let body = r#"{
            "total_revenue": "1250000.00",
            "total_transactions": 310,
            "total_payouts": "84000.00",
            "active_users": 12,
            "pending_contracts": 4,
            "overdue_invoices": 2
        }"#;
        let summary: DashboardSummary = serde_json::from_str(body).unwrap();
        assert_eq!(summary.total_transactions, 310);
    }

    #[test]
    fn test_chart_point_date() {
        let body = r#"{"date": "2025-03-01", "amount": "5400.00", "transaction_count": 9}"#;
        let point: RevenueChartPoint = serde_json::from_str(body).unwrap();
        assert_eq!(point.transaction_count, 9);
    }
}
