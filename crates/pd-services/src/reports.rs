//! Dashboard reports

use pd_client::ApiClient;
use pd_core::ApiResult;
use pd_models::report::{DashboardSummary, RevenueChartPoint, TrendPoint};

pub struct ReportsService<'a> {
    client: &'a ApiClient,
}

impl<'a> ReportsService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn dashboard_summary(&self) -> ApiResult<DashboardSummary> {
        self.client.get("reports/dashboard/summary/").await
    }

    /// Daily revenue for the trailing window (server default: 7 days).
    pub async fn revenue_chart(&self, days: Option<u32>) -> ApiResult<Vec<RevenueChartPoint>> {
        match days {
            Some(days) => {
                let query = [("days".to_string(), days.to_string())];
                self.client
                    .get_query("reports/dashboard/revenue-chart/", &query)
                    .await
            }
            None => self.client.get("reports/dashboard/revenue-chart/").await,
        }
    }

    /// Week-over-week trend buckets (server default: 4 weeks).
    pub async fn weekly_trend(&self, weeks: Option<u32>) -> ApiResult<Vec<TrendPoint>> {
        match weeks {
            Some(weeks) => {
                let query = [("weeks".to_string(), weeks.to_string())];
                self.client
                    .get_query("reports/dashboard/weekly-trend/", &query)
                    .await
            }
            None => self.client.get("reports/dashboard/weekly-trend/").await,
        }
    }
}
