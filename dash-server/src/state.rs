use cached::{Cached, SizedCache};
use launch_dash::dashboard::Dashboard;
use launch_dash::figure::Figure;
use launch_dash::utils::logging::LogRingBuffer;
use launch_dash::view::{PayloadRange, SiteFilter};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::trace;

/// Cache key for a computed figure. Bounds are keyed by their bit patterns.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FigureKey {
    SuccessPie(SiteFilter),
    PayloadScatter(SiteFilter, u64, u64),
}

impl FigureKey {
    pub fn scatter(site: SiteFilter, range: PayloadRange) -> Self {
        FigureKey::PayloadScatter(site, range.low.to_bits(), range.high.to_bits())
    }
}

#[derive(Clone)]
pub struct AppState {
    pub dashboard: Dashboard,
    pub logs: LogRingBuffer,
    figures: Arc<Mutex<SizedCache<FigureKey, Figure>>>,
}

impl AppState {
    pub fn new(dashboard: Dashboard, logs: LogRingBuffer, cache_size: usize) -> Self {
        Self {
            dashboard,
            logs,
            // SizedCache panics on a zero capacity
            figures: Arc::new(Mutex::new(SizedCache::with_size(cache_size.max(1)))),
        }
    }

    pub async fn success_pie(&self, site: SiteFilter) -> Figure {
        let key = FigureKey::SuccessPie(site.clone());
        self.cached_figure(key, || self.dashboard.success_pie(&site))
            .await
    }

    pub async fn payload_scatter(&self, site: SiteFilter, range: PayloadRange) -> Figure {
        let key = FigureKey::scatter(site.clone(), range);
        self.cached_figure(key, || self.dashboard.payload_scatter(&site, range))
            .await
    }

    /// The lock is released while `build` runs, so concurrent misses may
    /// build the same figure twice; the last insert wins.
    async fn cached_figure<F>(&self, key: FigureKey, build: F) -> Figure
    where
        F: FnOnce() -> Figure,
    {
        if let Some(figure) = self.figures.lock().await.cache_get(&key) {
            trace!(target: "server", "figure cache hit {:?}", key);
            return figure.clone();
        }

        let figure = build();
        self.figures.lock().await.cache_set(key, figure.clone());
        figure
    }

    pub async fn cached_figures(&self) -> usize {
        self.figures.lock().await.cache_size()
    }
}
