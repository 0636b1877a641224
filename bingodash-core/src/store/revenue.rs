use std::sync::Arc;

use bingodash_model::{
    DailyRevenue, DateRange, DateRangeRevenue, MonthlyRevenue, RevenuePeriod,
    WeeklyRevenue,
};
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::api::AdminApi;
use crate::error::ApiResult;

/// Everything the revenue screen shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RevenueState {
    pub period: RevenuePeriod,
    pub total: Option<f64>,
    pub daily: Vec<DailyRevenue>,
    pub weekly: Vec<WeeklyRevenue>,
    pub monthly: Vec<MonthlyRevenue>,
    pub range: Option<DateRangeRevenue>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Revenue figures are read-only aggregates, so this store has no
/// collection semantics: each period is fetched whole.
#[derive(Clone)]
pub struct RevenueStore {
    api: Arc<dyn AdminApi>,
    state: Arc<RwLock<RevenueState>>,
}

impl std::fmt::Debug for RevenueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevenueStore")
            .field("state", &*self.state.read())
            .finish_non_exhaustive()
    }
}

impl RevenueStore {
    pub fn new(api: Arc<dyn AdminApi>) -> Self {
        Self {
            api,
            state: Arc::default(),
        }
    }

    pub fn state(&self) -> RevenueState {
        self.state.read().clone()
    }

    pub fn clear_error(&self) {
        self.state.write().error = None;
    }

    /// Refreshes the headline total.
    ///
    /// Runs alongside the period fetches, so it leaves the loading flag
    /// alone and only records failures.
    pub async fn fetch_total(&self) -> ApiResult<f64> {
        match self.api.revenue_total().await {
            Ok(total) => {
                self.state.write().total = Some(total.total_revenue);
                Ok(total.total_revenue)
            }
            Err(err) => {
                warn!(error = %err, "failed to load revenue total");
                self.state.write().error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Switches to a daily, weekly or monthly period and loads its series.
    ///
    /// [`RevenuePeriod::Range`] only records the selection; the range report
    /// needs dates and is loaded by [`RevenueStore::fetch_range`].
    pub async fn select_period(&self, period: RevenuePeriod) -> ApiResult<()> {
        self.state.write().period = period;
        debug!(%period, "revenue period selected");
        match period {
            RevenuePeriod::Daily => {
                let rows = self.track(self.api.revenue_daily()).await?;
                self.state.write().daily = rows;
            }
            RevenuePeriod::Weekly => {
                let rows = self.track(self.api.revenue_weekly()).await?;
                self.state.write().weekly = rows;
            }
            RevenuePeriod::Monthly => {
                let rows = self.track(self.api.revenue_monthly()).await?;
                self.state.write().monthly = rows;
            }
            RevenuePeriod::Range => {}
        }
        Ok(())
    }

    pub async fn fetch_range(
        &self,
        range: DateRange,
    ) -> ApiResult<DateRangeRevenue> {
        self.state.write().period = RevenuePeriod::Range;
        let report = self.track(self.api.revenue_range(&range)).await?;
        self.state.write().range = Some(report.clone());
        Ok(report)
    }

    async fn track<R>(
        &self,
        call: impl std::future::Future<Output = ApiResult<R>>,
    ) -> ApiResult<R> {
        {
            let mut state = self.state.write();
            state.loading = true;
            state.error = None;
        }
        let result = call.await;
        let mut state = self.state.write();
        state.loading = false;
        if let Err(err) = &result {
            warn!(error = %err, "revenue request failed");
            state.error = Some(err.to_string());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockAdminApi;
    use crate::error::ApiError;
    use bingodash_model::TotalRevenue;
    use bingodash_model::chrono::NaiveDate;

    #[tokio::test]
    async fn period_selection_loads_matching_series() {
        let mut api = MockAdminApi::new();
        api.expect_revenue_weekly().times(1).returning(|| {
            Ok(vec![WeeklyRevenue {
                week: "2024-W10".into(),
                revenue: 120.5,
            }])
        });
        api.expect_revenue_daily().never();

        let store = RevenueStore::new(Arc::new(api));
        store.select_period(RevenuePeriod::Weekly).await.unwrap();

        let state = store.state();
        assert_eq!(state.period, RevenuePeriod::Weekly);
        assert_eq!(state.weekly.len(), 1);
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn total_failure_records_error_without_loading() {
        let mut api = MockAdminApi::new();
        api.expect_revenue_total()
            .returning(|| Err(ApiError::Transport("timed out".into())));

        let store = RevenueStore::new(Arc::new(api));
        assert!(store.fetch_total().await.is_err());
        let state = store.state();
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Network error: timed out"));
    }

    #[tokio::test]
    async fn range_report_is_kept() {
        let mut api = MockAdminApi::new();
        api.expect_revenue_range().returning(|range| {
            Ok(DateRangeRevenue {
                start_date: range.start().to_string(),
                end_date: range.end().to_string(),
                revenue: 42.0,
                payment_history: Vec::new(),
            })
        });
        api.expect_revenue_total()
            .returning(|| Ok(TotalRevenue { total_revenue: 900.0 }));

        let store = RevenueStore::new(Arc::new(api));
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
        .unwrap();
        store.fetch_range(range).await.unwrap();
        store.fetch_total().await.unwrap();

        let state = store.state();
        assert_eq!(state.period, RevenuePeriod::Range);
        assert_eq!(state.range.unwrap().revenue, 42.0);
        assert_eq!(state.total, Some(900.0));
    }
}
