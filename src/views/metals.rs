use yew::prelude::*;

use crate::format::format_metal_price;
use crate::models::metals::{MetalCard, MetalsSnapshot};

pub const CURRENCIES: [&str; 6] = ["USD", "CNY", "EUR", "GBP", "JPY", "INR"];

// Kept free of `<`, `>` and `&`: SSR escapes text nodes, scripts included.
const METALS_JS: &str = r#"
(function () {
  var board = document.getElementById('metals-board');
  var apiKey = document.getElementById('apiKey');
  var currency = document.getElementById('currency');
  var interval = document.getElementById('refreshInterval');
  var start = document.getElementById('startButton');

  function post(url, body) {
    return fetch(url, {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify(body)
    }).then(function (res) { return res.json(); });
  }

  function reload() {
    fetch('/partials/metals')
      .then(function (res) { return res.text(); })
      .then(function (html) { board.innerHTML = html; })
      .catch(function (err) { console.error(err); });
  }

  start.addEventListener('click', function () {
    post('/api/metals/polling', {
      interval: interval.value,
      currency: currency.value,
      api_key: apiKey.value
    }).then(function (data) {
      if (data.interval) { interval.value = data.interval; }
      reload();
    });
  });

  currency.addEventListener('change', function () {
    post('/api/metals/currency', { currency: currency.value }).then(reload);
  });

  function connect() {
    var scheme = location.protocol === 'https:' ? 'wss://' : 'ws://';
    var ws = new WebSocket(scheme + location.host + '/ws/metals');
    ws.onmessage = reload;
    ws.onclose = function () { setTimeout(connect, 3000); };
  }

  connect();
})();
"#;

#[derive(Properties, PartialEq)]
pub struct MetalCardProps {
    pub id: &'static str,
    pub title: &'static str,
    pub card: Option<MetalCard>,
}

#[function_component(MetalCardView)]
pub fn metal_card_view(props: &MetalCardProps) -> Html {
    let Some(card) = &props.card else {
        return html! {
            <div class="metal-card" id={props.id}>
                <div class="metal-name">{ props.title }</div>
                <div class="metal-price">{ format_metal_price(None) }</div>
                <div class="change neutral">{ "变化: --" }</div>
            </div>
        };
    };

    html! {
        <div class="metal-card" id={props.id}>
            <div class="metal-name">{ card.name.clone() }</div>
            <div class="metal-price">
                <span class="value">{ format_metal_price(card.spot) }</span>
                <span class="currency">{ card.currency.clone() }</span>
            </div>
            <div class={classes!("change", card.change.direction.css_class())}>
                { card.change.text.clone() }
            </div>
            <dl class="benchmarks">
                { for card.benchmarks.iter().map(|b| html! {
                    <>
                        <dt>{ b.label.clone() }</dt>
                        <dd>{ format_metal_price(b.value) }</dd>
                    </>
                }) }
            </dl>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct MetalsBoardProps {
    pub snapshot: MetalsSnapshot,
}

/// Everything inside `#metals-board`; also served alone as a fragment.
#[function_component(MetalsBoardView)]
pub fn metals_board_view(props: &MetalsBoardProps) -> Html {
    let snapshot = &props.snapshot;
    let status_class = if snapshot.status.is_error { "status error" } else { "status ok" };

    html! {
        <>
            <div class="status-row">
                <span id="statusText" class={status_class}>{ snapshot.status.message.clone() }</span>
                <span id="lastUpdated" class="time">{ snapshot.last_updated.clone().unwrap_or_default() }</span>
            </div>
            <div class="metal-grid">
                <MetalCardView id="gold" title="黄金" card={snapshot.gold.clone()} />
                <MetalCardView id="silver" title="白银" card={snapshot.silver.clone()} />
            </div>
        </>
    }
}

#[function_component(MetalsPage)]
pub fn metals_page(props: &MetalsBoardProps) -> Html {
    let snapshot = &props.snapshot;
    html! {
        <html lang="zh-CN">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <title>{ "贵金属实时行情" }</title>
                <link rel="stylesheet" href="/static/style.css" />
            </head>
            <body class="page metals">
                <header class="topbar">
                    <h1>{ "贵金属实时行情" }</h1>
                    <a class="nav" href="/">{ "A股摘要" }</a>
                </header>
                <section class="controls">
                    <label>
                        { "API Key" }
                        <input id="apiKey" type="password" placeholder="Metals.Dev API Key" autocomplete="off" />
                    </label>
                    <label>
                        { "币种" }
                        <select id="currency">
                            { for CURRENCIES.iter().map(|code| html! {
                                <option value={*code} selected={*code == snapshot.currency}>{ *code }</option>
                            }) }
                        </select>
                    </label>
                    <label>
                        { "刷新间隔（秒）" }
                        <input id="refreshInterval" type="number" min="3" max="300" value={snapshot.interval_secs.to_string()} />
                    </label>
                    <button id="startButton" class="btn">{ "开始" }</button>
                </section>
                <main id="metals-board">
                    <MetalsBoardView snapshot={snapshot.clone()} />
                </main>
                <script>{ METALS_JS }</script>
            </body>
        </html>
    }
}
