use yew::prelude::*;

use crate::chart::{CHART_HEIGHT, CHART_WIDTH, compute_chart_geometry};
use crate::format::{format_amount, format_num, format_pct, market_label, pct_class};
use crate::models::{
    stock::StockList,
    summary::{IndexQuote, MarketSection},
};
use crate::series::{ChartSeries, SH_INDEX, SZ_INDEX};
use crate::state::BoardData;

// Kept free of `<`, `>` and `&`: SSR escapes text nodes, scripts included.
const BOARD_JS: &str = r#"
(function () {
  var board = document.getElementById('board');
  var button = document.getElementById('btnRefresh');
  var date = document.getElementById('date');
  var time = document.getElementById('time');

  function fail(id, message) {
    var region = document.getElementById(id);
    if (!region) { return; }
    var box = document.createElement('div');
    box.className = 'error';
    box.textContent = message;
    region.replaceChildren(box);
  }

  function showError() {
    fail('indexGrid', '网络错误');
    fail('marketOverview', '网络错误');
    fail('hotTable', '加载失败');
    fail('fallTable', '加载失败');
  }

  function refresh() {
    button.disabled = true;
    fetch('/partials/board')
      .then(function (res) {
        if (!res.ok) { throw new Error('HTTP ' + res.status); }
        return res.text();
      })
      .then(function (html) {
        board.innerHTML = html;
        var stamp = board.querySelector('[data-date]');
        if (stamp) {
          date.textContent = stamp.getAttribute('data-date');
          time.textContent = stamp.getAttribute('data-time');
        }
      })
      .catch(showError)
      .finally(function () { button.disabled = false; });
  }

  button.addEventListener('click', refresh);
})();
"#;

#[derive(Properties, PartialEq)]
pub struct IndexGridProps {
    pub indices: Vec<IndexQuote>,
    #[prop_or_default]
    pub error: Option<String>,
}

#[function_component(IndexGrid)]
pub fn index_grid(props: &IndexGridProps) -> Html {
    if let Some(error) = &props.error {
        return html! { <div class="error">{ error.clone() }</div> };
    }
    if props.indices.is_empty() {
        return html! { <div class="error">{ "暂无指数数据" }</div> };
    }

    html! {
        <>
            { for props.indices.iter().map(|item| html! {
                <div class="index-card">
                    <div class="name">{ item.name.clone() }</div>
                    <div class="price">{ format_num(Some(item.price)) }</div>
                    <div class={classes!("pct", pct_class(Some(item.pct_change)))}>
                        { format_pct(Some(item.pct_change)) }
                    </div>
                </div>
            }) }
        </>
    }
}

#[derive(Properties, PartialEq)]
pub struct MarketOverviewProps {
    pub market: MarketSection,
}

#[function_component(MarketOverview)]
pub fn market_overview(props: &MarketOverviewProps) -> Html {
    let breadth = match &props.market {
        MarketSection::Breadth(breadth) => breadth,
        MarketSection::Error { error } => {
            let message = if error.is_empty() { "暂无概览数据" } else { error.as_str() };
            return html! { <div class="error">{ message.to_string() }</div> };
        }
    };

    let item = |class: Option<&'static str>, label: &'static str, value: String| {
        html! {
            <div class={classes!("overview-item", class)}>
                <div class="label">{ label }</div>
                <div class="value">{ value }</div>
            </div>
        }
    };

    html! {
        <>
            { item(Some("up"), "上涨家数", format_num(Some(f64::from(breadth.up)))) }
            { item(Some("down"), "下跌家数", format_num(Some(f64::from(breadth.down)))) }
            { item(None, "平盘", format_num(Some(f64::from(breadth.flat)))) }
            { item(Some("up"), "涨停", format_num(Some(f64::from(breadth.limit_up)))) }
            { item(Some("down"), "跌停", format_num(Some(f64::from(breadth.limit_down)))) }
            { item(Some("amount"), "两市成交额", format_amount(Some(breadth.total_amount))) }
        </>
    }
}

#[derive(Properties, PartialEq)]
pub struct StockTableProps {
    pub stocks: StockList,
}

#[function_component(StockTable)]
pub fn stock_table(props: &StockTableProps) -> Html {
    if !props.stocks.ok {
        return html! { <div class="error">{ "加载失败" }</div> };
    }
    if props.stocks.list.is_empty() {
        return html! { <div class="error">{ "暂无数据" }</div> };
    }

    html! {
        <table>
            <thead>
                <tr>
                    <th>{ "代码" }</th>
                    <th>{ "市场" }</th>
                    <th>{ "名称" }</th>
                    <th>{ "最新价" }</th>
                    <th>{ "涨跌幅" }</th>
                    <th>{ "成交额" }</th>
                </tr>
            </thead>
            <tbody>
                { for props.stocks.list.iter().map(|row| html! {
                    <tr>
                        <td>{ row.code.clone() }</td>
                        <td>{ market_label(&row.market).to_string() }</td>
                        <td>{ row.name.clone() }</td>
                        <td>{ format_num(Some(row.price)) }</td>
                        <td class={classes!("pct-cell", pct_class(Some(row.pct_change)))}>
                            { format_pct(Some(row.pct_change)) }
                        </td>
                        <td class="amount-cell">{ format_amount(Some(row.amount)) }</td>
                    </tr>
                }) }
            </tbody>
        </table>
    }
}

#[derive(Clone, PartialEq)]
pub struct ChartLine {
    pub label: &'static str,
    pub color: &'static str,
    pub values: Vec<f64>,
}

#[derive(Properties, PartialEq)]
pub struct LineChartProps {
    pub title: &'static str,
    pub labels: Vec<String>,
    pub lines: Vec<ChartLine>,
}

#[function_component(LineChart)]
pub fn line_chart(props: &LineChartProps) -> Html {
    let values: Vec<&[f64]> = props.lines.iter().map(|line| line.values.as_slice()).collect();
    let geometry = compute_chart_geometry(&values, CHART_WIDTH, CHART_HEIGHT);

    let legend = html! {
        <div class="legend">
            { for props.lines.iter().map(|line| html! {
                <span class="legend-item">
                    <span class="legend-dot" style={format!("background:{}", line.color)}></span>
                    { line.label }
                </span>
            }) }
        </div>
    };

    let body = match geometry {
        Some(geometry) => {
            let first = props.labels.first().cloned().unwrap_or_default();
            let last = props.labels.last().cloned().unwrap_or_default();
            html! {
                <>
                    <svg class="chart-svg" viewBox={format!("0 0 {CHART_WIDTH} {CHART_HEIGHT}")}>
                        { for props.lines.iter().zip(geometry.lines.iter()).map(|(line, points)| html! {
                            <polyline points={points.clone()} fill="none" stroke={line.color} stroke-width="2" />
                        }) }
                    </svg>
                    <div class="chart-axis">
                        <span>{ first }</span>
                        <span>{ format!("{} ~ {}", format_num(Some(geometry.min_value)), format_num(Some(geometry.max_value))) }</span>
                        <span>{ last }</span>
                    </div>
                </>
            }
        }
        None => html! { <div class="chart-empty">{ "刷新两次以上后显示走势" }</div> },
    };

    html! {
        <div class="chart-card">
            <div class="chart-title">{ props.title }</div>
            { legend }
            { body }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ChartsProps {
    pub series: ChartSeries,
}

#[function_component(Charts)]
pub fn charts(props: &ChartsProps) -> Html {
    let columns = props.series.columns();
    html! {
        <div class="charts">
            <LineChart
                title="指数走势"
                labels={columns.labels.clone()}
                lines={vec![
                    ChartLine { label: SH_INDEX, color: "#d81e06", values: columns.sh.clone() },
                    ChartLine { label: SZ_INDEX, color: "#0052d9", values: columns.sz.clone() },
                ]}
            />
            <LineChart
                title="涨跌家数"
                labels={columns.labels}
                lines={vec![
                    ChartLine { label: "上涨家数", color: "#f44336", values: columns.up },
                    ChartLine { label: "下跌家数", color: "#009688", values: columns.down },
                ]}
            />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct BoardProps {
    pub data: BoardData,
}

/// Everything inside `#board`; also served alone as the refresh fragment.
#[function_component(Board)]
pub fn board(props: &BoardProps) -> Html {
    let data = &props.data;
    html! {
        <div class="board-body" data-date={data.summary.date.clone()} data-time={data.summary.time.clone()}>
            <section class="section">
                <h2>{ "主要指数" }</h2>
                <div id="indexGrid" class="index-grid">
                    <IndexGrid indices={data.summary.indices.clone()} error={data.summary.indices_error.clone()} />
                </div>
            </section>
            <section class="section">
                <h2>{ "两市概览" }</h2>
                <div id="marketOverview" class="market-overview">
                    <MarketOverview market={data.summary.market.clone()} />
                </div>
            </section>
            <section class="section">
                <h2>{ "盘中走势" }</h2>
                <Charts series={data.series.clone()} />
            </section>
            <div class="tables">
                <section class="section">
                    <h2>{ "涨幅榜" }</h2>
                    <div id="hotTable" class="table-wrap"><StockTable stocks={data.hot.clone()} /></div>
                </section>
                <section class="section">
                    <h2>{ "跌幅榜" }</h2>
                    <div id="fallTable" class="table-wrap"><StockTable stocks={data.fall.clone()} /></div>
                </section>
            </div>
        </div>
    }
}

#[function_component(BoardPage)]
pub fn board_page(props: &BoardProps) -> Html {
    html! {
        <html lang="zh-CN">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <title>{ "A股当日市场摘要" }</title>
                <link rel="stylesheet" href="/static/style.css" />
            </head>
            <body class="page">
                <header class="topbar">
                    <h1>{ "A股当日市场摘要" }</h1>
                    <div class="stamp">
                        <span id="date">{ props.data.summary.date.clone() }</span>
                        <span id="time">{ props.data.summary.time.clone() }</span>
                    </div>
                    <button id="btnRefresh" class="btn">{ "刷新" }</button>
                    <a class="nav" href="/metals">{ "贵金属行情" }</a>
                </header>
                <main id="board">
                    <Board data={props.data.clone()} />
                </main>
                <script>{ BOARD_JS }</script>
            </body>
        </html>
    }
}
