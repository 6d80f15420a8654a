use crate::format::price_change;
use crate::models::metals::{Benchmark, BoardStatus, MetalCard, MetalsQuote, MetalsSnapshot};
use crate::services::metals::{MetalsClient, MetalsError};
use chrono::{DateTime, Local};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::select;
use tokio::sync::{Mutex, RwLock, broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub const DEFAULT_INTERVAL_SECS: f64 = 10.0;
pub const MIN_INTERVAL_SECS: f64 = 3.0;
pub const MAX_INTERVAL_SECS: f64 = 300.0;

/// Parses a user-supplied refresh interval in seconds, clamped to 3..=300.
///
/// Blank or unparsable input falls back to 10 seconds.
pub fn clamp_interval(raw: &str) -> f64 {
    let raw = raw.trim();
    if raw.is_empty() {
        return DEFAULT_INTERVAL_SECS;
    }
    match raw.parse::<f64>() {
        Ok(secs) if secs.is_finite() => secs.clamp(MIN_INTERVAL_SECS, MAX_INTERVAL_SECS),
        _ => DEFAULT_INTERVAL_SECS,
    }
}

/// Renders a metals.dev timestamp in local time; `now` when absent or bad.
fn display_time(timestamp: Option<&str>) -> String {
    let local = timestamp
        .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
        .map(|ts| ts.with_timezone(&Local))
        .unwrap_or_else(Local::now);
    format!("数据时间：{}", local.format("%Y-%m-%d %H:%M:%S"))
}

/// Cards and status for the metals page, plus the spots seen last poll.
#[derive(Debug, Clone)]
pub struct MetalsBoard {
    previous_gold: Option<f64>,
    previous_silver: Option<f64>,
    snapshot: MetalsSnapshot,
}

impl MetalsBoard {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            previous_gold: None,
            previous_silver: None,
            snapshot: MetalsSnapshot {
                status: BoardStatus {
                    message: "填写 API Key 后点击开始".to_string(),
                    is_error: false,
                },
                gold: None,
                silver: None,
                unit: None,
                last_updated: None,
                currency: currency.into(),
                polling: false,
                interval_secs: DEFAULT_INTERVAL_SECS,
            },
        }
    }

    pub fn snapshot(&self) -> &MetalsSnapshot {
        &self.snapshot
    }

    pub fn set_status(&mut self, message: impl Into<String>, is_error: bool) {
        self.snapshot.status = BoardStatus {
            message: message.into(),
            is_error,
        };
    }

    pub fn apply_error(&mut self, err: &MetalsError) {
        self.set_status(err.to_string(), true);
    }

    pub fn apply_quote(&mut self, quote: &MetalsQuote, requested_currency: &str) {
        let currency = quote
            .currency
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| requested_currency.to_string());
        let metals = &quote.metals;

        self.snapshot.gold = Some(MetalCard {
            name: "黄金".to_string(),
            spot: metals.gold,
            currency: currency.clone(),
            change: price_change(metals.gold, self.previous_gold),
            benchmarks: vec![
                benchmark("LBMA 早盘", metals.lbma_gold_am),
                benchmark("LBMA 午盘", metals.lbma_gold_pm),
                benchmark("MCX", metals.mcx_gold),
                benchmark("IBJA", metals.ibja_gold),
            ],
        });
        self.previous_gold = metals.gold;

        self.snapshot.silver = Some(MetalCard {
            name: "白银".to_string(),
            spot: metals.silver,
            currency,
            change: price_change(metals.silver, self.previous_silver),
            benchmarks: vec![
                benchmark("LBMA", metals.lbma_silver),
                benchmark("MCX", metals.mcx_silver),
            ],
        });
        self.previous_silver = metals.silver;

        let unit = quote.unit.clone().filter(|u| !u.is_empty());
        self.snapshot.last_updated = Some(display_time(quote.timestamp.as_deref()));
        self.set_status(
            format!("已更新（单位：{}）", unit.as_deref().unwrap_or("toz")),
            false,
        );
        self.snapshot.unit = unit;
    }
}

fn benchmark(label: &str, value: Option<f64>) -> Benchmark {
    Benchmark {
        label: label.to_string(),
        value,
    }
}

/// Messages from the poller handle to its running timer task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Refresh,
    Stop,
}

struct Timer {
    id: u64,
    handle: JoinHandle<()>,
    commands: mpsc::UnboundedSender<Command>,
}

struct Inner {
    client: MetalsClient,
    api_key: RwLock<String>,
    board: RwLock<MetalsBoard>,
    // held across a whole fetch so timer ticks and currency refetches never overlap
    fetching: Mutex<()>,
    timer: Mutex<Option<Timer>>,
    next_timer_id: AtomicU64,
    tx: broadcast::Sender<MetalsSnapshot>,
}

/// Fixed-interval metals.dev poller; one timer at a time.
///
/// A timer started with [`MetalsPoller::start`] follows its viewers: once a
/// refresh finds no subscriber left it stops itself.
#[derive(Clone)]
pub struct MetalsPoller {
    inner: Arc<Inner>,
}

impl MetalsPoller {
    pub fn new(client: MetalsClient, api_key: impl Into<String>, currency: impl Into<String>) -> Self {
        // small buffer; slow clients may miss snapshots, the next one supersedes them
        let (tx, _) = broadcast::channel(32);
        Self {
            inner: Arc::new(Inner {
                client,
                api_key: RwLock::new(api_key.into()),
                board: RwLock::new(MetalsBoard::new(currency)),
                fetching: Mutex::new(()),
                timer: Mutex::new(None),
                next_timer_id: AtomicU64::new(0),
                tx,
            }),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MetalsSnapshot> {
        self.inner.tx.subscribe()
    }

    pub async fn snapshot(&self) -> MetalsSnapshot {
        self.inner.board.read().await.snapshot().clone()
    }

    pub async fn is_polling(&self) -> bool {
        self.inner
            .timer
            .lock()
            .await
            .as_ref()
            .is_some_and(|timer| !timer.handle.is_finished())
    }

    async fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut MetalsBoard),
    {
        let snapshot = {
            let mut board = self.inner.board.write().await;
            f(&mut *board);
            board.snapshot().clone()
        };
        // ignore lagging/no receivers
        let _ = self.inner.tx.send(snapshot);
    }

    /// One fetch with the current key and currency.
    pub async fn refresh_once(&self) {
        let _fetching = self.inner.fetching.lock().await;

        let api_key = self.inner.api_key.read().await.clone();
        if api_key.trim().is_empty() {
            self.update(|board| board.apply_error(&MetalsError::MissingApiKey))
                .await;
            return;
        }

        let currency = self.inner.board.read().await.snapshot().currency.clone();
        self.update(|board| board.set_status("请求中...", false)).await;

        match self.inner.client.fetch_latest(&api_key, &currency).await {
            Ok(quote) => {
                tracing::debug!(%currency, gold = ?quote.metals.gold, "metals quote received");
                self.update(|board| board.apply_quote(&quote, &currency))
                    .await;
            }
            Err(err) => {
                tracing::warn!(error = ?err, %currency, "metals fetch failed");
                self.update(|board| board.apply_error(&err)).await;
            }
        }
    }

    /// Replaces any running timer: fetches now, then every clamped interval
    /// for as long as someone is subscribed. Returns the interval used.
    pub async fn start(&self, raw_interval: &str, currency: Option<String>, api_key: Option<String>) -> f64 {
        self.start_timer(raw_interval, currency, api_key, true).await
    }

    /// Like [`MetalsPoller::start`], but keeps polling with nobody watching
    /// until [`MetalsPoller::stop`].
    pub async fn start_detached(
        &self,
        raw_interval: &str,
        currency: Option<String>,
        api_key: Option<String>,
    ) -> f64 {
        self.start_timer(raw_interval, currency, api_key, false).await
    }

    async fn start_timer(
        &self,
        raw_interval: &str,
        currency: Option<String>,
        api_key: Option<String>,
        follow_viewers: bool,
    ) -> f64 {
        let interval_secs = clamp_interval(raw_interval);
        if let Some(api_key) = api_key {
            *self.inner.api_key.write().await = api_key;
        }

        let mut timer = self.inner.timer.lock().await;
        if let Some(old) = timer.take() {
            // an in-flight fetch of the old timer still finishes
            let _ = old.commands.send(Command::Stop);
        }

        self.update(|board| {
            if let Some(currency) = currency {
                board.snapshot.currency = currency;
            }
            board.snapshot.polling = true;
            board.snapshot.interval_secs = interval_secs;
            board.set_status("正在实时获取...", false);
        })
        .await;

        let id = self.inner.next_timer_id.fetch_add(1, Ordering::Relaxed);
        let (commands, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(self.clone().run_timer(id, interval_secs, follow_viewers, rx));
        *timer = Some(Timer {
            id,
            handle,
            commands,
        });
        tracing::info!(interval_secs, follow_viewers, "metals polling started");
        interval_secs
    }

    async fn run_timer(
        self,
        id: u64,
        interval_secs: f64,
        follow_viewers: bool,
        mut commands: mpsc::UnboundedReceiver<Command>,
    ) {
        let mut ticker = tokio::time::interval(Duration::from_secs_f64(interval_secs));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            // first tick completes immediately
            select! {
                _ = ticker.tick() => {}
                command = commands.recv() => match command {
                    Some(Command::Refresh) => {}
                    Some(Command::Stop) | None => break,
                },
            }
            self.refresh_once().await;

            if follow_viewers && self.inner.tx.receiver_count() == 0 {
                self.release(id).await;
                break;
            }
        }
    }

    /// Ends timer `id` if it is still the current one.
    async fn release(&self, id: u64) {
        let mut timer = self.inner.timer.lock().await;
        if timer.as_ref().is_none_or(|timer| timer.id != id) {
            return;
        }
        *timer = None;
        self.update(|board| board.snapshot.polling = false).await;
        tracing::info!("metals polling stopped, no viewers left");
    }

    /// Switches currency; refetches right away only while polling.
    pub async fn set_currency(&self, currency: String) {
        self.update(|board| board.snapshot.currency = currency).await;
        if let Some(timer) = self.inner.timer.lock().await.as_ref() {
            let _ = timer.commands.send(Command::Refresh);
        }
    }

    /// Cancels the timer between ticks; a fetch already under way completes.
    pub async fn stop(&self) {
        let mut timer = self.inner.timer.lock().await;
        if let Some(old) = timer.take() {
            let _ = old.commands.send(Command::Stop);
            tracing::info!("metals polling stopped");
        }
        self.update(|board| board.snapshot.polling = false).await;
    }
}
