use leptos::*;
use wasm_bindgen::JsValue;
use web_sys::{KeyboardEvent, MouseEvent, TouchEvent};

use crate::{
    application::{ChartApplicationService, ChartPage},
    config::AppConfig,
    domain::{
        chart::{AxisDomain, ChartModel, TrendPalette, TrendTracker},
        errors::ChartError,
        logging::LogComponent,
        market_data::{PriceFeed, PricePoint, TickerSymbol},
    },
    event_utils::{EventOptions, is_picker_shortcut, window_event_listener_with_options},
    log_debug, log_error, log_info, log_warn,
    presentation::current_config,
    time_utils::{format_date_label, format_date_time, format_percent, format_price, format_usd},
};

pub const VIEW_WIDTH: f64 = 800.0;
pub const VIEW_HEIGHT: f64 = 320.0;
const PAD_LEFT: f64 = 72.0;
const PAD_RIGHT: f64 = 16.0;
const PAD_TOP: f64 = 16.0;
const PAD_BOTTOM: f64 = 28.0;
/// Horizontal grid lines, including both domain bounds
pub const Y_TICKS: usize = 5;

const ERROR_MESSAGE: &str = "Error with Pyth (ticker not found?)";

/// Maps sample indices and prices into SVG view-box coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartGeometry {
    len: usize,
    domain: AxisDomain,
}

impl ChartGeometry {
    pub fn new(model: &ChartModel) -> Self {
        Self { len: model.len(), domain: model.domain }
    }

    fn plot_width() -> f64 {
        VIEW_WIDTH - PAD_LEFT - PAD_RIGHT
    }

    fn plot_height() -> f64 {
        VIEW_HEIGHT - PAD_TOP - PAD_BOTTOM
    }

    /// A single sample sits in the middle.
    pub fn x(&self, index: usize) -> f64 {
        if self.len < 2 {
            return PAD_LEFT + Self::plot_width() / 2.0;
        }
        PAD_LEFT + index as f64 / (self.len - 1) as f64 * Self::plot_width()
    }

    pub fn y(&self, value: f64) -> f64 {
        PAD_TOP + (1.0 - self.domain.fraction(value)) * Self::plot_height()
    }

    /// Horizontal position in the plot area as `[0, 1]`, unclamped
    pub fn fraction_at(&self, view_x: f64) -> f64 {
        (view_x - PAD_LEFT) / Self::plot_width()
    }

    /// Evenly spaced values from the lower to the upper domain bound
    pub fn y_ticks(&self) -> Vec<f64> {
        (0..Y_TICKS)
            .map(|k| self.domain.lower + self.domain.span() * k as f64 / (Y_TICKS - 1) as f64)
            .collect()
    }

    pub fn polyline(&self, points: &[PricePoint]) -> String {
        points
            .iter()
            .enumerate()
            .map(|(i, point)| format!("{:.2},{:.2}", self.x(i), self.y(point.close())))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn location_ticker() -> Option<TickerSymbol> {
    let search = web_sys::window()?.location().search().ok()?;
    AppConfig::ticker_from_query(&search)
}

fn write_location_ticker(ticker: &TickerSymbol, replace: bool) {
    let Some(history) = web_sys::window().and_then(|window| window.history().ok()) else {
        return;
    };
    let url = AppConfig::ticker_query(ticker);
    let result = if replace {
        history.replace_state_with_url(&JsValue::NULL, "", Some(&url))
    } else {
        history.push_state_with_url(&JsValue::NULL, "", Some(&url))
    };
    if let Err(e) = result {
        log_warn!(LogComponent::Presentation("App"), "⚠️ Failed to update URL: {:?}", e);
    }
}

/// Ticker from `?ticker=`, or the configured default written back into the URL
fn initial_ticker(config: &AppConfig) -> TickerSymbol {
    match location_ticker() {
        Some(ticker) => ticker,
        None => {
            let ticker = config.default_ticker();
            write_location_ticker(&ticker, true);
            ticker
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let service = ChartApplicationService::new(current_config());
    let ticker = create_rw_signal(initial_ticker(service.config()));

    let back_forward = window_event_listener_with_options(ev::popstate, &EventOptions::default(), move |_| {
        if let Some(next) = location_ticker() {
            ticker.set(next);
        }
    });
    on_cleanup(move || back_forward.remove());

    let page = {
        let service = service.clone();
        create_local_resource(
            move || ticker.get(),
            move |ticker| {
                let service = service.clone();
                async move { service.load_page(ticker, ChartApplicationService::now_secs()).await }
            },
        )
    };

    let feeds = Signal::derive(move || {
        page.with(|page| {
            page.as_ref().and_then(|page| page.feeds.as_ref().ok().cloned()).unwrap_or_default()
        })
    });

    view! {
        <style>{STYLES}</style>
        <div class="price-chart-app">
            <TickerPicker ticker feeds service />
            <Suspense fallback=move || view! { <div class="chart-status">"Loading..."</div> }>
                {move || {
                    page.get()
                        .map(|ChartPage { ticker, chart, .. }| match chart {
                            Ok(model) => view! { <PriceChart ticker model /> }.into_view(),
                            Err(error) => view! { <ChartErrorMessage error /> }.into_view(),
                        })
                }}
            </Suspense>
        </div>
    }
}

/// Searchable feed list, toggled with Ctrl+K / Cmd+K
#[component]
fn TickerPicker(
    ticker: RwSignal<TickerSymbol>,
    #[prop(into)] feeds: Signal<Vec<PriceFeed>>,
    service: ChartApplicationService,
) -> impl IntoView {
    let open = create_rw_signal(false);
    let query = create_rw_signal(String::new());
    let service = store_value(service);

    let shortcut = window_event_listener_with_options(ev::keydown, &EventOptions::active(), move |event: KeyboardEvent| {
        if is_picker_shortcut(&event.key(), event.ctrl_key(), event.meta_key()) {
            event.prevent_default();
            open.update(|open| *open = !*open);
        }
    });
    on_cleanup(move || shortcut.remove());

    let results = move || service.with_value(|service| service.search(&feeds.get(), &query.get()));

    let select = move |symbol: String| {
        match TickerSymbol::new(&symbol) {
            Ok(next) => {
                log_info!(LogComponent::Presentation("TickerPicker"), "🎯 Selected {}", next);
                write_location_ticker(&next, false);
                ticker.set(next);
            }
            Err(e) => {
                log_warn!(LogComponent::Presentation("TickerPicker"), "⚠️ {}: {}", symbol, e);
            }
        }
        open.set(false);
        query.set(String::new());
    };

    view! {
        <div class="ticker-picker">
            <button class="picker-toggle" on:click=move |_| open.update(|open| *open = !*open)>
                <span>{move || ticker.get().to_string()}</span>
                <kbd>"⌘K"</kbd>
            </button>
            <Show when=move || open.get()>
                <div class="picker-panel">
                    <input
                        type="text"
                        placeholder="Search price feeds..."
                        prop:value=move || query.get()
                        on:input=move |ev| query.set(event_target_value(&ev))
                    />
                    <ul class="picker-results">
                        <For
                            each=results
                            key=|feed| feed.symbol.clone()
                            children=move |feed| {
                                let symbol = feed.symbol.clone();
                                view! {
                                    <li on:click=move |_| select(symbol.clone())>
                                        <span class="feed-symbol">{feed.symbol}</span>
                                        <span class="feed-description">{feed.description}</span>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </div>
            </Show>
        </div>
    }
}

/// Close line split at the first close, with hover readouts
#[component]
fn PriceChart(ticker: TickerSymbol, model: ChartModel) -> impl IntoView {
    let tracker = create_rw_signal(TrendTracker::new());
    tracker.update(|tracker| {
        if let Err(e) = tracker.load(&model.points) {
            log_error!(LogComponent::Presentation("PriceChart"), "❌ {}", e);
        }
    });

    let hovered = create_rw_signal(None::<usize>);
    let geometry = ChartGeometry::new(&model);
    let palette = TrendPalette::default();
    let container_ref = create_node_ref::<html::Div>();

    let line = geometry.polyline(&model.points);
    let split = format!("{:.2}%", model.split_offset());
    let gradient_top = geometry.y(model.max_value);
    let gradient_bottom = geometry.y(model.min_value);
    let reference_y = geometry.y(model.reference_value);
    let x_labels: Vec<(f64, String)> = (0..model.len())
        .step_by(model.x_tick_interval())
        .map(|i| (geometry.x(i), format_date_label(model.points[i].timestamp.value())))
        .collect();
    let model = store_value(model);

    let hover_at = move |client_x: f64| {
        let Some(container) = container_ref.get_untracked() else {
            return;
        };
        let rect = container.get_bounding_client_rect();
        if rect.width() <= 0.0 {
            return;
        }
        let view_x = (client_x - rect.left()) * VIEW_WIDTH / rect.width();
        let hit = model.with_value(|model| {
            model.index_at(geometry.fraction_at(view_x)).and_then(|i| model.points.get(i).map(|p| (i, p.close())))
        });
        if let Some((index, close)) = hit {
            hovered.set(Some(index));
            tracker.update(|tracker| tracker.pointer_move(close));
        }
    };
    let enter = move || tracker.update(TrendTracker::pointer_enter);
    let leave = move || {
        hovered.set(None);
        tracker.update(TrendTracker::pointer_leave);
    };

    let hover_marker = move || {
        let index = hovered.get()?;
        let (point, is_up) =
            model.with_value(|model| model.points.get(index).map(|p| (*p, model.is_up_value(p.close()))))?;
        let (x, y) = (geometry.x(index), geometry.y(point.close()));
        let fill = if is_up { palette.up } else { palette.down };
        Some(view! {
            <g class="hover-marker">
                <line x1=x x2=x y1=PAD_TOP y2={VIEW_HEIGHT - PAD_BOTTOM} stroke-dasharray="4 4" />
                <circle cx=x cy=y r="4" fill=fill />
            </g>
        })
    };

    log_debug!(LogComponent::Presentation("PriceChart"), "🎨 {} ready, split at {}", ticker, split);

    view! {
        <div class="chart-card">
            <LastPrice ticker tracker />
            <div
                class="chart-wrapper"
                node_ref=container_ref
                on:mouseenter=move |_| enter()
                on:mousemove=move |ev: MouseEvent| hover_at(ev.client_x() as f64)
                on:mouseleave=move |_| leave()
                on:touchstart=move |ev: TouchEvent| {
                    enter();
                    if let Some(touch) = ev.touches().get(0) {
                        hover_at(touch.client_x() as f64);
                    }
                }
                on:touchmove=move |ev: TouchEvent| {
                    if let Some(touch) = ev.touches().get(0) {
                        hover_at(touch.client_x() as f64);
                    }
                }
                on:touchend=move |_| leave()
            >
                <svg viewBox={format!("0 0 {} {}", VIEW_WIDTH, VIEW_HEIGHT)}>
                    <defs>
                        <linearGradient
                            id="trend-split"
                            gradientUnits="userSpaceOnUse"
                            x1="0"
                            x2="0"
                            y1=gradient_top
                            y2=gradient_bottom
                        >
                            <stop offset="0%" stop-color=palette.up />
                            <stop offset={split.clone()} stop-color=palette.up />
                            <stop offset=split stop-color=palette.down />
                            <stop offset="100%" stop-color=palette.down />
                        </linearGradient>
                    </defs>
                    <PriceAxis geometry tracker />
                    <line
                        class="reference-line"
                        x1=PAD_LEFT
                        x2={VIEW_WIDTH - PAD_RIGHT}
                        y1=reference_y
                        y2=reference_y
                        stroke=palette.line
                        stroke-dasharray="2 6"
                    />
                    <polyline points=line fill="none" stroke="url(#trend-split)" stroke-width="2" />
                    {x_labels
                        .into_iter()
                        .map(|(x, label)| {
                            view! {
                                <text class="x-label" x=x y={VIEW_HEIGHT - 8.0} text-anchor="middle">
                                    {label}
                                </text>
                            }
                        })
                        .collect_view()}
                    {hover_marker}
                </svg>
                <ChartTooltip hovered tracker model />
            </div>
        </div>
    }
}

/// Y tick labels plus a highlighted label at the value under the pointer
#[component]
fn PriceAxis(geometry: ChartGeometry, tracker: RwSignal<TrendTracker>) -> impl IntoView {
    let ticks = geometry
        .y_ticks()
        .into_iter()
        .map(|value| {
            let y = geometry.y(value);
            view! {
                <g class="y-tick">
                    <line x1=PAD_LEFT x2={VIEW_WIDTH - PAD_RIGHT} y1=y y2=y />
                    <text x={PAD_LEFT - 8.0} y=y text-anchor="end" dominant-baseline="middle">
                        {format_usd(value)}
                    </text>
                </g>
            }
        })
        .collect_view();

    let hover_label = move || {
        tracker.with(|tracker| tracker.is_hovering().then(|| tracker.current_value())).map(|value| {
            let y = geometry.y(value);
            view! {
                <text class="y-hover-label" x={PAD_LEFT - 8.0} y=y text-anchor="end" dominant-baseline="middle">
                    {format_usd(value)}
                </text>
            }
        })
    };

    view! {
        <g class="price-axis">
            {ticks}
            {hover_label}
        </g>
    }
}

#[component]
fn ChartTooltip(
    hovered: RwSignal<Option<usize>>,
    tracker: RwSignal<TrendTracker>,
    model: StoredValue<ChartModel>,
) -> impl IntoView {
    let content = move || {
        if !tracker.with(TrendTracker::is_hovering) {
            return None;
        }
        let index = hovered.get()?;
        let (timestamp, left) = model.with_value(|model| {
            let geometry = ChartGeometry::new(model);
            model.points.get(index).map(|p| (p.timestamp.value(), geometry.x(index) / VIEW_WIDTH * 100.0))
        })?;
        let value = tracker.with(TrendTracker::current_value);
        Some(view! {
            <div class="tooltip" style:left={format!("{:.2}%", left)}>
                <div class="tooltip-date">{format_date_time(timestamp)}</div>
                <div class="tooltip-price">{format_price(value)}</div>
            </div>
        })
    };

    content
}

/// Price readout with the change since the first close
#[component]
fn LastPrice(ticker: TickerSymbol, tracker: RwSignal<TrendTracker>) -> impl IntoView {
    let palette = TrendPalette::default();
    let trend = create_memo(move |_| tracker.with(TrendTracker::trend));

    view! {
        <div class="last-price">
            <span class="ticker">{ticker.to_string()}</span>
            <span class="price">{move || format_price(tracker.with(TrendTracker::current_value))}</span>
            {move || match trend.get() {
                Ok(trend) => {
                    view! {
                        <span class="change" style:color=palette.for_direction(trend.direction)>
                            {format_percent(trend.percent_change)}
                        </span>
                    }
                        .into_view()
                }
                Err(_) => view! { <span class="change">"--"</span> }.into_view(),
            }}
        </div>
    }
}

#[component]
fn ChartErrorMessage(error: ChartError) -> impl IntoView {
    view! {
        <div class="chart-error">
            <p>{ERROR_MESSAGE}</p>
            <small>{error.to_string()}</small>
        </div>
    }
}

const STYLES: &str = r#"
.price-chart-app {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
    max-width: 960px;
    margin: 0 auto;
    padding: 24px;
    --chart-1: 220 14% 60%;
    --chart-2: 142 71% 45%;
    --chart-5: 0 84% 60%;
}

.ticker-picker {
    position: relative;
    margin-bottom: 16px;
}

.picker-toggle {
    display: flex;
    gap: 12px;
    align-items: center;
    padding: 6px 12px;
    border-radius: 6px;
    border: 1px solid #d0d4da;
    background: white;
    cursor: pointer;
}

.picker-panel {
    position: absolute;
    z-index: 10;
    width: 320px;
    background: white;
    border: 1px solid #d0d4da;
    border-radius: 6px;
    box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15);
}

.picker-panel input {
    width: 100%;
    box-sizing: border-box;
    padding: 8px;
    border: none;
    border-bottom: 1px solid #e5e7eb;
}

.picker-results {
    list-style: none;
    margin: 0;
    padding: 4px 0;
}

.picker-results li {
    display: flex;
    justify-content: space-between;
    padding: 6px 12px;
    cursor: pointer;
}

.picker-results li:hover {
    background: #f3f4f6;
}

.feed-description {
    color: #6b7280;
    font-size: 12px;
}

.last-price {
    display: flex;
    gap: 16px;
    align-items: baseline;
    margin-bottom: 8px;
}

.last-price .price {
    font-size: 24px;
    font-weight: 700;
    font-variant-numeric: tabular-nums;
}

.chart-wrapper {
    position: relative;
    cursor: crosshair;
}

.chart-wrapper svg {
    width: 100%;
    height: auto;
}

.y-tick line {
    stroke: #e5e7eb;
}

.y-tick text, .x-label {
    fill: #6b7280;
    font-size: 11px;
}

.y-hover-label {
    font-size: 11px;
    font-weight: 700;
}

.hover-marker line {
    stroke: #9ca3af;
}

.tooltip {
    position: absolute;
    top: 0;
    transform: translateX(-50%);
    background: rgba(17, 24, 39, 0.9);
    color: white;
    padding: 6px 10px;
    border-radius: 6px;
    font-size: 12px;
    pointer-events: none;
    white-space: nowrap;
}

.chart-status, .chart-error {
    padding: 48px 0;
    text-align: center;
    color: #6b7280;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market_data::RawSeries;

    fn model() -> ChartModel {
        ChartModel::from_series(&RawSeries {
            t: vec![1, 2, 3],
            o: vec![10.0, 12.0, 9.0],
            h: vec![11.0, 12.0, 15.0],
            l: vec![10.0, 9.0, 9.0],
            c: vec![11.0, 9.0, 15.0],
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn geometry_spans_the_plot_area() {
        let geometry = ChartGeometry::new(&model());
        assert_eq!(geometry.x(0), PAD_LEFT);
        assert_eq!(geometry.x(2), VIEW_WIDTH - PAD_RIGHT);
        assert_eq!(geometry.fraction_at(PAD_LEFT), 0.0);
    }

    #[test]
    fn higher_prices_sit_higher() {
        let model = model();
        let geometry = ChartGeometry::new(&model);
        assert!(geometry.y(model.max_value) < geometry.y(model.min_value));
        assert_eq!(geometry.y(model.domain.upper), PAD_TOP);
        assert_eq!(geometry.y_ticks().len(), Y_TICKS);
        assert_eq!(geometry.y_ticks()[0], model.domain.lower);
    }

    #[test]
    fn polyline_has_one_pair_per_point() {
        let model = model();
        let line = ChartGeometry::new(&model).polyline(&model.points);
        assert_eq!(line.split(' ').count(), 3);
        assert!(line.starts_with("72.00,"));
    }
}
