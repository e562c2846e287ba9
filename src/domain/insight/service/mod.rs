//! Use cases behind the insight and window endpoints.
//!
//! Each `*_at` function takes the clock as an argument; the async wrappers
//! read `Utc::now()` once per request.

use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::debug;
use validator::Validate;

use crate::api::dto::paginated_response::PaginatedResponse;
use crate::api::dto::window_dto::{PriorWindowDto, WindowPresetDto, WindowQuery};
use crate::core::config::AppConfig;
use crate::domain::common::service::pagination::{PageSize, SortState};
use crate::domain::common::service::ranking::{rank_multi, SortDirection, CHART_ROW_LIMIT};
use crate::domain::comparison::service::{
    merge, spend_delta, top_by_change, top_cost_drivers, total_spend, totals,
};
use crate::domain::efficiency::service::{
    compute_cost, efficiency_rows, fleet_efficiency, fleet_total_efficiency, summarize,
    top_by_savings,
};
use crate::domain::insight::dto::{
    ComparisonRequest, ComparisonResponse, EfficiencyRequest, EfficiencyResponse,
    TopDriversRequest, TopDriversResponse,
};
use crate::domain::window::model::{WindowPreset, WindowSpec};
use crate::domain::window::service::{prior_range, prior_window, resolve_window};

pub const COMPARISON_DEFAULT_SORT: &str = "currentCost";
pub const EFFICIENCY_DEFAULT_SORT: &str = "costSavings";
pub const TOP_DRIVERS_DEFAULT_SORT: &str = "totalCost";

/// Per-deployment table defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsightSettings {
    pub default_page_size: PageSize,
    pub top_drivers_limit: usize,
}

impl Default for InsightSettings {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for InsightSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            default_page_size: config.default_page_size,
            top_drivers_limit: config.top_drivers_limit,
        }
    }
}

pub async fn list_window_presets() -> Result<Vec<WindowPresetDto>> {
    Ok(WindowPreset::ALL.into_iter().map(WindowPresetDto::from).collect())
}

pub async fn get_prior_window(q: WindowQuery) -> Result<PriorWindowDto> {
    Ok(prior_window_at(q.window.as_deref(), Utc::now()))
}

pub fn prior_window_at(window: Option<&str>, now: DateTime<Utc>) -> PriorWindowDto {
    let raw = window.unwrap_or(WindowPreset::Last7d.as_code());
    let spec = WindowSpec::parse(raw);
    let prior = prior_range(&spec, now);

    PriorWindowDto {
        window: raw.to_string(),
        recognized: spec.is_recognized(),
        current: resolve_window(&spec, now),
        prior_window: prior.to_string(),
        prior,
    }
}

pub async fn compare_costs(
    settings: InsightSettings,
    req: ComparisonRequest,
) -> Result<ComparisonResponse> {
    compare_costs_at(settings, req, Utc::now())
}

pub fn compare_costs_at(
    settings: InsightSettings,
    req: ComparisonRequest,
    now: DateTime<Utc>,
) -> Result<ComparisonResponse> {
    req.validate()?;

    let current = req.current.unwrap_or_default();
    let prior = req.prior.unwrap_or_default();

    let rows = merge(&current, &prior);
    let totals = totals(&rows);
    let chart = top_by_change(rows.clone(), CHART_ROW_LIMIT);

    let sort = req
        .table
        .sort_state(SortState::new(COMPARISON_DEFAULT_SORT, SortDirection::Desc));
    let ranked = rank_multi(rows, &req.table.sort_keys(&sort));
    let page = req.table.page_state(settings.default_page_size, ranked.len());

    Ok(ComparisonResponse {
        window: req.window.as_ref().map(ToString::to_string),
        prior_window: req
            .window
            .as_ref()
            .map(|w| prior_window(w, now).to_string()),
        totals,
        sort,
        rows: PaginatedResponse::from_state(&ranked, &page),
        chart,
    })
}

pub async fn efficiency_report(
    settings: InsightSettings,
    req: EfficiencyRequest,
) -> Result<EfficiencyResponse> {
    req.validate()?;

    let records = req.efficiencies.unwrap_or_default();
    let summary = summarize(&records, req.cluster_savings_summary);

    let sort = req
        .table
        .sort_state(SortState::new(EFFICIENCY_DEFAULT_SORT, SortDirection::Desc));
    let rows = efficiency_rows(&records);
    let chart = top_by_savings(rows.clone(), CHART_ROW_LIMIT);
    let ranked = rank_multi(rows, &req.table.sort_keys(&sort));
    let page = req.table.page_state(settings.default_page_size, ranked.len());

    Ok(EfficiencyResponse {
        summary,
        sort,
        rows: PaginatedResponse::from_state(&ranked, &page),
        chart,
    })
}

pub async fn top_drivers(
    settings: InsightSettings,
    req: TopDriversRequest,
) -> Result<TopDriversResponse> {
    req.validate()?;

    let current = req.current.unwrap_or_default();
    let prior = req.prior.unwrap_or_default();
    let efficiencies = req.efficiencies.unwrap_or_default();

    let sort = SortState::new(
        req.order_by.unwrap_or_else(|| TOP_DRIVERS_DEFAULT_SORT.to_string()),
        req.direction.unwrap_or_default(),
    );
    let limit = req.limit.unwrap_or(settings.top_drivers_limit);

    // Without compute cost there is nothing to blend; use the backend's own scores.
    let cluster_efficiency = if compute_cost(&efficiencies) > 0.0 {
        fleet_efficiency(&efficiencies)
    } else {
        fleet_total_efficiency(&current)
    };
    let total_savings = summarize(&efficiencies, None).total_savings;
    let drivers = top_cost_drivers(&current, &prior, &efficiencies, &sort.as_key(), limit);

    debug!(drivers = drivers.len(), limit, "Built top cost drivers");

    Ok(TopDriversResponse {
        spend: spend_delta(total_spend(&current), total_spend(&prior)),
        cluster_efficiency,
        total_savings,
        sort,
        drivers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use validator::ValidationErrors;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 15, 30, 0).unwrap()
    }

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    }

    fn comparison(body: serde_json::Value) -> ComparisonRequest {
        serde_json::from_value(body).unwrap()
    }

    #[tokio::test]
    async fn lists_every_preset() {
        let presets = list_window_presets().await.unwrap();
        assert_eq!(presets.len(), WindowPreset::ALL.len());
        assert_eq!(presets[0].value, "today");
        assert!(presets.iter().any(|p| p.value == "lastweek" && p.spans_multiple_days));
    }

    #[test]
    fn prior_window_defaults_to_seven_days() {
        let dto = prior_window_at(None, now());
        assert_eq!(dto.window, "7d");
        assert!(dto.recognized);
        assert_eq!(dto.prior_window, "2023-12-27T15:30:00Z,2024-01-03T15:30:00Z");
        assert_eq!(dto.prior.end, dto.current.start);
    }

    #[test]
    fn prior_window_flags_unrecognized_input() {
        let dto = prior_window_at(Some("fortnight"), now());
        assert_eq!(dto.window, "fortnight");
        assert!(!dto.recognized);
        assert_eq!(dto.prior_window, "2023-12-27T15:30:00Z,2024-01-03T15:30:00Z");
    }

    #[test]
    fn comparison_ranks_pages_and_totals() {
        let req = comparison(json!({
            "window": "24h",
            "current": {
                "a": { "totalCost": 10.0 },
                "b": { "totalCost": 30.0 },
                "c": { "totalCost": 20.0 },
                "__idle__": { "totalCost": 500.0 }
            },
            "prior": {
                "a": { "totalCost": 5.0 },
                "gone": { "totalCost": 7.0 }
            },
            "table": { "page_size": 10 }
        }));

        let res = compare_costs_at(InsightSettings::default(), req, now()).unwrap();

        let names: Vec<&str> = res.rows.items.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a", "gone"]);
        assert_eq!(res.rows.total, 4);
        assert_eq!(res.rows.page_size, 10);
        assert_eq!(res.totals.current_cost, 60.0);
        assert_eq!(res.totals.prior_cost, 12.0);
        assert_eq!(res.sort, SortState::new("currentCost", SortDirection::Desc));
        assert_eq!(res.window.as_deref(), Some("24h"));
        assert_eq!(
            res.prior_window.as_deref(),
            Some("2024-01-08T15:30:00Z,2024-01-09T15:30:00Z")
        );
    }

    #[test]
    fn comparison_honours_sort_and_page() {
        let current: serde_json::Value = (0..12)
            .map(|i| (format!("e{i:02}"), json!({ "totalCost": i as f64 })))
            .collect::<serde_json::Map<_, _>>()
            .into();
        let req = comparison(json!({
            "current": current,
            "table": { "order_by": "name", "direction": "asc", "page": 1, "page_size": 10 }
        }));

        let res = compare_costs_at(InsightSettings::default(), req, now()).unwrap();

        let names: Vec<&str> = res.rows.items.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["e10", "e11"]);
        assert_eq!(res.rows.page, 1);
        assert_eq!(res.rows.page_count, 2);
        assert!(res.window.is_none());
        assert!(res.prior_window.is_none());
    }

    #[test]
    fn comparison_with_null_datasets_is_empty() {
        let req = comparison(json!({ "current": null, "prior": null }));
        let res = compare_costs_at(InsightSettings::default(), req, now()).unwrap();
        assert!(res.rows.items.is_empty());
        assert_eq!(res.rows.page_size, 25);
        assert_eq!(res.totals.change_pct, 0.0);
    }

    #[test]
    fn rejects_unsupported_page_size() {
        let err = serde_json::from_value::<ComparisonRequest>(json!({
            "table": { "page_size": 30 }
        }));
        assert!(err.is_err());
    }

    #[test]
    fn rejects_empty_order_by() {
        let req = comparison(json!({ "table": { "order_by": "" } }));
        let err = compare_costs_at(InsightSettings::default(), req, now()).unwrap_err();
        assert!(err.downcast_ref::<ValidationErrors>().is_some());
    }

    #[tokio::test]
    async fn efficiency_report_defaults_to_savings_desc() {
        let req: EfficiencyRequest = serde_json::from_value(json!({
            "efficiencies": [
                { "name": "a", "cpuCost": 80.0, "ramCost": 20.0, "cpuEfficiency": 0.5,
                  "memoryEfficiency": 1.0, "costSavings": 3.0 },
                { "name": "b", "cpuCost": 10.0, "ramCost": 10.0, "cpuEfficiency": 0.2,
                  "memoryEfficiency": 0.4, "costSavings": 9.0 },
                { "name": "__unallocated__", "cpuCost": 10.0, "costSavings": 100.0 }
            ],
            "cluster_savings_summary": { "scaleDownLikely": true, "estimatedNodesFreed": 1.0 }
        }))
        .unwrap();

        let res = efficiency_report(InsightSettings::default(), req).await.unwrap();

        let names: Vec<&str> = res.rows.items.iter().map(|r| r.record.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(res.summary.total_savings, 12.0);
        assert_eq!(res.summary.below_target_count, 1);
        assert!(res.summary.cluster_savings_summary.unwrap().scale_down_likely);
    }

    #[tokio::test]
    async fn top_drivers_uses_limit_and_efficiency_fallback() {
        let req: TopDriversRequest = serde_json::from_value(json!({
            "current": {
                "a": { "totalCost": 100.0, "totalEfficiency": 0.9 },
                "b": { "totalCost": 300.0, "totalEfficiency": 0.5 },
                "c": { "totalCost": 50.0 }
            },
            "prior": { "b": { "totalCost": 200.0 } },
            "limit": 2
        }))
        .unwrap();

        let res = top_drivers(InsightSettings::default(), req).await.unwrap();

        let names: Vec<&str> = res.drivers.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(res.drivers[0].cost_change_pct, 50.0);
        assert_eq!(res.spend.current, 450.0);
        assert_eq!(res.spend.prior, 200.0);
        let expected = (90.0 + 150.0) / 450.0;
        assert!((res.cluster_efficiency - expected).abs() < 1e-9);
        assert_eq!(res.total_savings, 0.0);
    }

    #[tokio::test]
    async fn top_drivers_rejects_out_of_range_limit() {
        let req = TopDriversRequest {
            limit: Some(0),
            ..Default::default()
        };
        let err = top_drivers(InsightSettings::default(), req).await.unwrap_err();
        assert!(err.downcast_ref::<ValidationErrors>().is_some());
    }

    #[test]
    fn reversed_custom_range_falls_back_to_seven_days() {
        init_tracing();

        let dto = prior_window_at(Some("2024-01-15T00:00:00Z,2024-01-08T00:00:00Z"), now());

        assert!(!dto.recognized);
        assert_eq!(dto.current.to_string(), "2024-01-03T15:30:00Z,2024-01-10T15:30:00Z");
        assert_eq!(dto.prior_window, "2023-12-27T15:30:00Z,2024-01-03T15:30:00Z");
    }

    #[test]
    fn comparison_chart_ranks_by_absolute_change() {
        let req = comparison(json!({
            "current": {
                "up": { "totalCost": 110.0 },
                "down": { "totalCost": 20.0 },
                "steady": { "totalCost": 500.0 }
            },
            "prior": {
                "up": { "totalCost": 100.0 },
                "down": { "totalCost": 80.0 },
                "steady": { "totalCost": 500.0 }
            }
        }));

        let res = compare_costs_at(InsightSettings::default(), req, now()).unwrap();

        let chart: Vec<&str> = res.chart.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(chart, vec!["down", "up", "steady"]);
        // The table keeps its own order.
        assert_eq!(res.rows.items[0].name, "steady");
    }

    #[test]
    fn comparison_chart_is_capped() {
        let current: serde_json::Value = (0..20)
            .map(|i| (format!("e{i:02}"), json!({ "totalCost": i as f64 })))
            .collect::<serde_json::Map<_, _>>()
            .into();
        let req = comparison(json!({ "current": current }));

        let res = compare_costs_at(InsightSettings::default(), req, now()).unwrap();

        assert_eq!(res.chart.len(), CHART_ROW_LIMIT);
        assert_eq!(res.chart[0].name, "e19");
    }

    #[test]
    fn comparison_applies_toggle_and_tie_breakers() {
        let req = comparison(json!({
            "current": {
                "b": { "totalCost": 5.0 },
                "a": { "totalCost": 5.0 },
                "c": { "totalCost": 1.0 }
            },
            "table": {
                "order_by": "currentCost",
                "direction": "desc",
                "toggle": "currentCost",
                "then_by": [{ "order_by": "name", "direction": "desc" }]
            }
        }));

        let res = compare_costs_at(InsightSettings::default(), req, now()).unwrap();

        assert_eq!(res.sort, SortState::new("currentCost", SortDirection::Asc));
        let names: Vec<&str> = res.rows.items.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["c", "b", "a"]);
    }

    #[tokio::test]
    async fn efficiency_chart_follows_savings() {
        let req: EfficiencyRequest = serde_json::from_value(json!({
            "efficiencies": [
                { "name": "a", "cpuCost": 1.0, "costSavings": 2.0 },
                { "name": "b", "cpuCost": 1.0, "costSavings": 8.0 }
            ],
            "table": { "order_by": "name", "direction": "asc" }
        }))
        .unwrap();

        let res = efficiency_report(InsightSettings::default(), req).await.unwrap();

        let chart: Vec<&str> = res.chart.iter().map(|r| r.record.name.as_str()).collect();
        assert_eq!(chart, vec!["b", "a"]);
        assert_eq!(res.rows.items[0].record.name, "a");
    }

    #[tokio::test]
    async fn cluster_efficiency_without_compute_cost_uses_reported_scores() {
        init_tracing();

        let req: TopDriversRequest = serde_json::from_value(json!({
            "current": { "a": { "totalCost": 100.0, "totalEfficiency": 0.9 } },
            "efficiencies": [{ "name": "a", "cpuCost": 0.0, "ramCost": 0.0 }]
        }))
        .unwrap();

        let res = top_drivers(InsightSettings::default(), req).await.unwrap();

        assert!((res.cluster_efficiency - 0.9).abs() < 1e-9);
    }
}
