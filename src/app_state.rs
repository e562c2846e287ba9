use std::sync::Arc;

use crate::api::dto::window_dto::{PriorWindowDto, WindowPresetDto, WindowQuery};
use crate::core::config::AppConfig;
use crate::domain::insight::dto::{
    ComparisonRequest, ComparisonResponse, EfficiencyRequest, EfficiencyResponse,
    TopDriversRequest, TopDriversResponse,
};
use crate::domain::insight::service::{self as insight, InsightSettings};

macro_rules! delegate_async_service {
    ($(fn $name:ident($($arg:ident : $typ:ty),*) -> $ret:ty => $path:path;)+) => {
        $(
            pub async fn $name(&self, $($arg: $typ),*) -> anyhow::Result<$ret> {
                $path($($arg),*).await
            }
        )+
    };
}

#[derive(Clone)]
pub struct AppState {
    pub window_service: Arc<WindowService>,
    pub insight_service: Arc<InsightService>,
}

pub fn build_app_state(config: &AppConfig) -> AppState {
    AppState {
        window_service: Arc::new(WindowService),
        insight_service: Arc::new(InsightService::new(InsightSettings::from(config))),
    }
}

#[derive(Clone, Default)]
pub struct WindowService;

impl WindowService {
    delegate_async_service! {
        fn list_window_presets() -> Vec<WindowPresetDto> => insight::list_window_presets;
        fn get_prior_window(q: WindowQuery) -> PriorWindowDto => insight::get_prior_window;
    }
}

/// Insight use cases bound to the deployment's table defaults.
#[derive(Clone, Default)]
pub struct InsightService {
    settings: InsightSettings,
}

impl InsightService {
    pub fn new(settings: InsightSettings) -> Self {
        Self { settings }
    }

    pub async fn compare_costs(
        &self,
        req: ComparisonRequest,
    ) -> anyhow::Result<ComparisonResponse> {
        insight::compare_costs(self.settings, req).await
    }

    pub async fn efficiency_report(
        &self,
        req: EfficiencyRequest,
    ) -> anyhow::Result<EfficiencyResponse> {
        insight::efficiency_report(self.settings, req).await
    }

    pub async fn top_drivers(
        &self,
        req: TopDriversRequest,
    ) -> anyhow::Result<TopDriversResponse> {
        insight::top_drivers(self.settings, req).await
    }
}
