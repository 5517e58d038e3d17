use chrono::Local;
use log::{debug, warn};

use crate::app::state::{Generation, RequestSlot, RequestState};
use crate::config::DashboardConfig;
use crate::fetch::{FetchResult, MarketChartQuery, MarketsQuery};
use crate::market::{Asset, PricePoint, PriceSeries};

pub const HEADING: &str = "Crypto Dashboard";

/// Where the dashboard is in its two-phase fetch sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initial,
    ListLoading,
    ListReady,
    SeriesLoading,
    SeriesReady,
    Error,
}

/// Work the dashboard wants done; executed by [`crate::app::runtime::FetchRuntime`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchCommand {
    Markets {
        generation: Generation,
        query: MarketsQuery,
    },
    Series {
        generation: Generation,
        query: MarketChartQuery,
    },
}

/// Result of a [`FetchCommand`], tagged with the generation it was issued under.
#[derive(Debug)]
pub enum Completion {
    Markets {
        generation: Generation,
        result: FetchResult<Vec<Asset>>,
    },
    Series {
        generation: Generation,
        asset_id: String,
        result: FetchResult<Vec<PricePoint>>,
    },
}

/// State machine driving the market list and price series fetches.
pub struct Dashboard {
    config: DashboardConfig,
    phase: Phase,
    markets: RequestSlot<Vec<Asset>>,
    series: RequestSlot<PriceSeries>,
    /// Last good series, shown marked stale once a newer request fails.
    previous_series: Option<PriceSeries>,
    selected: String,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Self {
        let selected = config.default_asset.clone();
        Self {
            config,
            phase: Phase::Initial,
            markets: RequestSlot::default(),
            series: RequestSlot::default(),
            previous_series: None,
            selected,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn markets(&self) -> &RequestState<Vec<Asset>> {
        self.markets.state()
    }

    pub fn series(&self) -> &RequestState<PriceSeries> {
        self.series.state()
    }

    pub fn assets(&self) -> &[Asset] {
        self.markets.state().ready().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_loading(&self) -> bool {
        self.markets.state().is_loading() || self.series.state().is_loading()
    }

    /// Kick off the market list fetch. Only the first call does anything.
    pub fn start(&mut self) -> Option<FetchCommand> {
        if self.phase != Phase::Initial {
            return None;
        }

        let generation = self.markets.begin();
        self.phase = Phase::ListLoading;
        debug!("requesting top {} markets", self.config.page_size);

        Some(FetchCommand::Markets {
            generation,
            query: MarketsQuery::from_config(&self.config),
        })
    }

    /// Commit a selector change. Re-selecting the current asset fetches it again.
    pub fn select(&mut self, asset_id: &str) -> Option<FetchCommand> {
        if self.markets.state().ready().is_none() {
            debug!("ignoring selection of {asset_id} before the market list is ready");
            return None;
        }

        let assets = self.assets();
        if !assets.is_empty() && !assets.iter().any(|asset| asset.id == asset_id) {
            warn!("ignoring selection of unknown asset {asset_id}");
            return None;
        }

        self.selected = asset_id.to_string();
        self.request_series()
    }

    /// Fetch the current selection again.
    pub fn reload(&mut self) -> Option<FetchCommand> {
        let selected = self.selected.clone();
        self.select(&selected)
    }

    /// Fold a finished fetch into the state; may return the next fetch to run.
    pub fn apply(&mut self, completion: Completion) -> Option<FetchCommand> {
        match completion {
            Completion::Markets { generation, result } => self.apply_markets(generation, result),
            Completion::Series {
                generation,
                asset_id,
                result,
            } => {
                self.apply_series(generation, &asset_id, result);
                None
            }
        }
    }

    fn apply_markets(
        &mut self,
        generation: Generation,
        result: FetchResult<Vec<Asset>>,
    ) -> Option<FetchCommand> {
        if !self.markets.is_current(generation) {
            debug!("discarding stale market list {:?}", generation);
            return None;
        }

        match result {
            Ok(assets) => {
                debug!("market list ready with {} assets", assets.len());
                if let Some(first) = assets.first() {
                    if !assets.iter().any(|asset| asset.id == self.selected) {
                        debug!("{} not listed, selecting {}", self.selected, first.id);
                        self.selected = first.id.clone();
                    }
                }
                self.markets.settle(generation, Ok(assets));
                self.phase = Phase::ListReady;
                self.request_series()
            }
            Err(err) => {
                warn!("market list fetch failed: {err}");
                self.markets.settle(generation, Err(err.to_string()));
                self.phase = Phase::Error;
                None
            }
        }
    }

    fn apply_series(
        &mut self,
        generation: Generation,
        asset_id: &str,
        result: FetchResult<Vec<PricePoint>>,
    ) {
        if !self.series.is_current(generation) {
            debug!("discarding stale {asset_id} series {:?}", generation);
            return;
        }

        let outcome = result.and_then(|points| {
            PriceSeries::from_points(asset_id, &points, &Local, &self.config.date_format)
        });

        match outcome {
            Ok(series) => {
                debug!("{asset_id} series ready with {} points", series.len());
                self.series.settle(generation, Ok(series));
                self.previous_series = None;
                self.phase = Phase::SeriesReady;
            }
            Err(err) => {
                warn!("price series fetch for {asset_id} failed: {err}");
                self.series.settle(generation, Err(err.to_string()));
                if self.config.clear_chart_on_error {
                    self.previous_series = None;
                }
                self.phase = Phase::Error;
            }
        }
    }

    fn request_series(&mut self) -> Option<FetchCommand> {
        let (generation, previous) = self.series.restart();
        if let Some(previous) = previous {
            self.previous_series = Some(previous);
        }

        match MarketChartQuery::new(&self.selected, &self.config) {
            Ok(query) => {
                self.phase = Phase::SeriesLoading;
                debug!("requesting {} series {:?}", query.asset_id, generation);
                Some(FetchCommand::Series { generation, query })
            }
            Err(err) => {
                self.series.settle(generation, Err(err.to_string()));
                self.phase = Phase::Error;
                None
            }
        }
    }

    /// Snapshot of what the screen should show right now.
    pub fn view(&self) -> DashboardView<'_> {
        let error = self
            .markets
            .state()
            .error()
            .or_else(|| self.series.state().error());

        let selector = self.markets.state().ready().map(|assets| SelectorView {
            options: assets
                .iter()
                .map(|asset| SelectorOption {
                    label: asset.option_label(),
                    value: asset.id.as_str(),
                })
                .collect(),
            selected: self.selected.as_str(),
        });

        let chart = selector.as_ref().and_then(|_| {
            let (series, stale) = match self.series.state() {
                RequestState::Ready(series) => (series, false),
                RequestState::Failed(_) if !self.config.clear_chart_on_error => {
                    (self.previous_series.as_ref()?, true)
                }
                _ => return None,
            };
            Some(ChartView {
                title: series.title(),
                series,
                stale,
                currency_symbol: self.config.currency_symbol.as_str(),
                legend: LegendPlacement::Top,
            })
        });

        DashboardView {
            heading: HEADING,
            loading: self.is_loading(),
            error,
            selector,
            chart,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPlacement {
    Top,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectorOption<'a> {
    pub label: String,
    pub value: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectorView<'a> {
    pub options: Vec<SelectorOption<'a>>,
    pub selected: &'a str,
}

impl SelectorView<'_> {
    pub fn selected_index(&self) -> Option<usize> {
        self.options
            .iter()
            .position(|option| option.value == self.selected)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartView<'a> {
    pub title: String,
    pub series: &'a PriceSeries,
    /// Series belongs to an earlier request; the newest one failed.
    pub stale: bool,
    pub currency_symbol: &'a str,
    pub legend: LegendPlacement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView<'a> {
    pub heading: &'static str,
    pub loading: bool,
    pub error: Option<&'a str>,
    pub selector: Option<SelectorView<'a>>,
    pub chart: Option<ChartView<'a>>,
}

impl DashboardView<'_> {
    pub fn status_line(&self) -> Option<String> {
        if self.loading {
            Some("Loading...".to_string())
        } else {
            self.error.map(|message| format!("Error: {message}"))
        }
    }
}
