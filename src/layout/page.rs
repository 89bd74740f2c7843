//! Index page rendering
//!
//! Renders the layout tree to HTML and wraps it in a page that loads
//! Plotly.js and a small client script. The script draws the initial
//! figures, forwards slider changes over the WebSocket and falls back to
//! `POST /api/v1/update` when the socket is down.

use std::fmt::Write;

use super::{Component, RangeSlider, Style, DASHBOARD_TITLE};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.27.0.min.js";

/// Render the full HTML page for a layout
pub fn render_page(layout: &Component, debug: bool) -> String {
    let mut body = String::new();
    render_component(layout, &mut body);

    let debug_badge = if debug {
        r#"<div class="debug-badge">debug</div>"#
    } else {
        ""
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <script src="{plotly}"></script>
    <style>{css}</style>
</head>
<body>
{body}
{debug_badge}
<script>{js}</script>
</body>
</html>
"#,
        title = escape(DASHBOARD_TITLE),
        plotly = PLOTLY_CDN,
        css = PAGE_CSS,
        body = body,
        debug_badge = debug_badge,
        js = PAGE_JS,
    )
}

/// Render one component and its children
pub fn render_component(component: &Component, out: &mut String) {
    match component {
        Component::Div {
            class_name,
            style,
            children,
        } => {
            out.push_str("<div");
            push_class(out, class_name.as_deref());
            push_style(out, style);
            out.push('>');
            for child in children {
                render_component(child, out);
            }
            out.push_str("</div>");
        }
        Component::H1 { text, style } => {
            out.push_str("<h1");
            push_style(out, style);
            let _ = write!(out, ">{}</h1>", escape(text));
        }
        Component::H3 { text, class_name } => {
            out.push_str("<h3");
            push_class(out, class_name.as_deref());
            let _ = write!(out, ">{}</h3>", escape(text));
        }
        Component::RangeSlider(slider) => render_slider(slider, out),
        Component::Graph { id } => {
            let _ = write!(out, r#"<div class="graph" id="{}"></div>"#, escape(id));
        }
    }
}

fn render_slider(slider: &RangeSlider, out: &mut String) {
    let class = if slider.included {
        "range-slider included"
    } else {
        "range-slider"
    };

    let _ = write!(
        out,
        r#"<div class="{class}" id="{id}" data-min="{min}" data-max="{max}">"#,
        class = class,
        id = escape(&slider.id),
        min = slider.min,
        max = slider.max,
    );
    out.push_str(r#"<div class="slider-track"></div>"#);

    for (handle, value) in [("lo", slider.value.start), ("hi", slider.value.end)] {
        let _ = write!(
            out,
            r#"<input type="range" class="handle {handle}" min="{min}" max="{max}" step="{step}" value="{value}">"#,
            handle = handle,
            min = slider.min,
            max = slider.max,
            step = slider.step,
            value = value,
        );
    }

    out.push_str(r#"<div class="slider-marks">"#);
    let span = slider.max.saturating_sub(slider.min).max(1) as f64;
    for (index, label) in &slider.marks {
        let left = (index.saturating_sub(slider.min)) as f64 / span * 100.0;
        let _ = write!(
            out,
            r#"<span class="mark" style="left: {:.2}%">{}</span>"#,
            left,
            escape(label)
        );
    }
    out.push_str("</div></div>");
}

fn push_class(out: &mut String, class_name: Option<&str>) {
    if let Some(class_name) = class_name {
        let _ = write!(out, r#" class="{}""#, escape(class_name));
    }
}

fn push_style(out: &mut String, style: &Style) {
    if style.is_empty() {
        return;
    }
    let css: Vec<String> = style
        .iter()
        .map(|(k, v)| format!("{}: {}", kebab_case(k), v))
        .collect();
    let _ = write!(out, r#" style="{}""#, escape(&css.join("; ")));
}

/// `textAlign` -> `text-align`
fn kebab_case(property: &str) -> String {
    let mut out = String::with_capacity(property.len() + 2);
    for c in property.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Escape text for HTML content and attribute values
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const PAGE_CSS: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 0; padding: 16px; background: #f5f6f8; }
.row { display: flex; justify-content: space-between; margin-bottom: 16px; }
.card { box-sizing: border-box; background: #fff; border-radius: 6px; box-shadow: 0 1px 3px rgba(0,0,0,0.12); }
.card-header { margin: 0 0 8px 0; font-size: 1.05em; }
.graph { height: 360px; }
.range-slider { position: relative; height: 44px; margin: 8px 4px 4px 4px; }
.range-slider .slider-track { position: absolute; top: 9px; left: 0; right: 0; height: 4px; background: #d0d4da; border-radius: 2px; }
.range-slider.included .slider-track { background: #7fafdf; }
.range-slider input.handle { position: absolute; left: 0; top: 0; width: 100%; margin: 0; pointer-events: none; background: none; -webkit-appearance: none; appearance: none; }
.range-slider input.handle::-webkit-slider-thumb { pointer-events: all; }
.range-slider input.handle::-moz-range-thumb { pointer-events: all; }
.slider-marks { position: absolute; top: 24px; left: 0; right: 0; font-size: 10px; color: #666; }
.slider-marks .mark { position: absolute; transform: translateX(-50%); white-space: nowrap; }
.debug-badge { position: fixed; bottom: 8px; right: 8px; padding: 2px 8px; background: #c0392b; color: #fff; border-radius: 4px; font-size: 12px; }
"#;

const PAGE_JS: &str = r#"
(function () {
    const plot = (id, figure) => {
        const el = document.getElementById(id);
        if (el) { Plotly.react(el, figure.data, figure.layout, {responsive: true}); }
    };

    fetch('/api/v1/figures')
        .then(r => r.json())
        .then(body => Object.entries(body.figures).forEach(([id, fig]) => plot(id, fig)));

    let socket = null;
    const connect = () => {
        const proto = location.protocol === 'https:' ? 'wss:' : 'ws:';
        socket = new WebSocket(`${proto}//${location.host}/ws`);
        socket.onmessage = (event) => {
            const msg = JSON.parse(event.data);
            if (msg.type === 'figure') { plot(msg.id, msg.figure); }
            else if (msg.type === 'error') { console.warn('graphboard:', msg.message); }
        };
        socket.onclose = () => { socket = null; setTimeout(connect, 2000); };
    };
    connect();

    // Resolves once; updates made before it lands wait for it
    const dependencies = fetch('/api/v1/dependencies')
        .then(r => r.json())
        .then(body => body.dependencies)
        .catch(() => []);

    const postUpdate = (id, value) => dependencies.then(deps => deps
        .filter(d => d.inputs.some(i => i.id === id && i.property === 'value'))
        .forEach(d => fetch('/api/v1/update', {
            method: 'POST',
            headers: {'Content-Type': 'application/json'},
            body: JSON.stringify({output: d.output, inputs: [{id, property: 'value', value}]}),
        })
            .then(r => r.ok ? r.json() : null)
            .then(body => body && Object.entries(body.response)
                .forEach(([gid, props]) => plot(gid, props.figure)))));

    document.querySelectorAll('.range-slider').forEach(slider => {
        const [lo, hi] = slider.querySelectorAll('input.handle');
        const send = () => {
            const a = Number(lo.value), b = Number(hi.value);
            const value = [Math.min(a, b), Math.max(a, b)];
            if (socket && socket.readyState === WebSocket.OPEN) {
                socket.send(JSON.stringify({type: 'control_changed', id: slider.id, property: 'value', value}));
            } else {
                postUpdate(slider.id, value);
            }
        };
        lo.addEventListener('change', send);
        hi.addEventListener('change', send);
    });
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DataConfig;
    use crate::data::SampleData;
    use crate::layout::{build_layout, ids};

    fn page(debug: bool) -> String {
        let data = SampleData::generate(&DataConfig::default());
        render_page(&build_layout(&data), debug)
    }

    #[test]
    fn test_page_has_every_graph() {
        let html = page(false);
        for id in ids::GRAPHS {
            assert!(html.contains(&format!(r#"<div class="graph" id="{}"></div>"#, id)));
        }
        assert!(html.contains(PLOTLY_CDN));
        assert!(html.contains("<h1 style=\"text-align: center\">Dashboard with Interactive Graphs</h1>"));
    }

    #[test]
    fn test_slider_markup() {
        let html = page(false);
        assert!(html.contains(r#"<div class="range-slider included" id="date-slider1" data-min="0" data-max="364">"#));
        assert!(html.contains(r#"<div class="range-slider" id="date-slider2" data-min="0" data-max="364">"#));
        assert!(html.contains(r#"value="364""#));
        assert!(html.contains(">Jan 2023</span>"));
    }

    #[test]
    fn test_http_fallback_waits_for_dependencies() {
        let html = page(false);
        assert!(html.contains("const dependencies = fetch('/api/v1/dependencies')"));
        assert!(html.contains("const postUpdate = (id, value) => dependencies.then(deps => deps"));
        assert!(html.contains("postUpdate(slider.id, value);"));
        assert!(!html.contains("let dependencies = [];"));
    }

    #[test]
    fn test_debug_badge() {
        assert!(page(true).contains("debug-badge\">debug"));
        assert!(!page(false).contains("debug-badge\">debug"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_kebab_case() {
        assert_eq!(kebab_case("textAlign"), "text-align");
        assert_eq!(kebab_case("width"), "width");
    }
}
