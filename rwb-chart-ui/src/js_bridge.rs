//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The D3.js combo chart and the Leaflet map live in `assets/js/*.js` and are
//! evaluated as globals (no ES modules) once both libraries have loaded.
//! This module serializes data and calls those globals.

use rwb_data::map::MapMarker;

// Embed the chart and map JS files at compile time
static COMBO_CHART_JS: &str = include_str!("../assets/js/combo-chart.js");
static AREA_MAP_JS: &str = include_str!("../assets/js/area-map.js");

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('RWB JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Quote a JSON document as a single-quoted JS string literal body.
fn escape_json(json: &str) -> String {
    json.replace('\\', "\\\\").replace('\'', "\\'").replace('\n', "")
}

/// Initialize chart and map scripts with a wait-for-libraries polling loop.
///
/// The scripts are evaluated at global scope via indirect eval once both
/// `d3` and `L` exist, then their entry points are promoted to `window.*`.
pub fn init_charts() {
    let all_js = [COMBO_CHART_JS, AREA_MAP_JS].join("\n");

    let store_js = format!(
        "window.__rwbChartScripts = {};",
        serde_json::to_string(&all_js).unwrap_or_default()
    );
    let _ = js_sys::eval(&store_js);

    let init_js = r#"
        (function() {
            var waitForLibs = setInterval(function() {
                if (typeof d3 !== 'undefined' && typeof L !== 'undefined') {
                    clearInterval(waitForLibs);
                    (0, eval)(window.__rwbChartScripts);
                    delete window.__rwbChartScripts;
                    if (typeof renderComboChart !== 'undefined') window.renderComboChart = renderComboChart;
                    if (typeof initAreaMap !== 'undefined') window.initAreaMap = initAreaMap;
                    if (typeof showAreaMarker !== 'undefined') window.showAreaMarker = showAreaMarker;
                    window.__rwbChartsReady = true;
                    console.log('RWB charts initialized');
                }
            }, 100);
        })();
    "#;
    let _ = js_sys::eval(init_js);
}

/// Script that runs `call` once the scripts are ready and `container_id`
/// exists.
///
/// Calls queue in `window.__rwbPending` keyed by function and container; a
/// newer call replaces the queued one, so only the latest draw runs.
fn ready_script(function: &str, container_id: &str, call: &str) -> String {
    format!(
        r#"
        (function() {{
            var pending = window.__rwbPending || (window.__rwbPending = {{}});
            var key = '{function}:{container_id}';
            var queued = key in pending;
            pending[key] = function() {{ {call} }};
            if (queued) return;
            var poll = setInterval(function() {{
                if (window.__rwbChartsReady &&
                    typeof window.{function} !== 'undefined' &&
                    document.getElementById('{container_id}')) {{
                    clearInterval(poll);
                    var run = pending[key];
                    delete pending[key];
                    try {{
                        run();
                    }} catch(e) {{ console.error('[RWB] {function} error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    )
}

fn when_ready(function: &str, container_id: &str, call: &str) {
    call_js(&ready_script(function, container_id, call));
}

/// Render a bar + line chart from a `ComboChartSpec` JSON document.
pub fn render_combo_chart(container_id: &str, spec_json: &str) {
    let escaped = escape_json(spec_json);
    when_ready(
        "renderComboChart",
        container_id,
        &format!("window.renderComboChart('{container_id}', '{escaped}');"),
    );
}

/// Create the Leaflet map centred on `marker`.
pub fn init_map(container_id: &str, marker: &MapMarker) {
    let escaped = escape_json(&serde_json::to_string(marker).unwrap_or_default());
    when_ready(
        "initAreaMap",
        container_id,
        &format!("window.initAreaMap('{container_id}', '{escaped}');"),
    );
}

/// Move the marker and rice-area circle, recentring the map.
pub fn show_area_marker(container_id: &str, marker: &MapMarker) {
    let escaped = escape_json(&serde_json::to_string(marker).unwrap_or_default());
    when_ready(
        "showAreaMarker",
        container_id,
        &format!("window.showAreaMarker('{escaped}');"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_json() {
        assert_eq!(escape_json(r#"{"a":"it's"}"#), r#"{"a":"it\'s"}"#);
        assert_eq!(escape_json("{\"a\":\"x\\\"y\"}\n"), r#"{"a":"x\\"y"}"#);
    }

    #[test]
    fn test_ready_script_queues_latest_call_per_container() {
        let script = ready_script("renderComboChart", "rainChart", "draw(2);");
        assert!(script.contains("var key = 'renderComboChart:rainChart';"));
        assert!(script.contains("pending[key] = function() { draw(2); };"));
        // A second call only swaps the queued closure.
        let replace = script.find("pending[key] = function()").unwrap();
        let early_return = script.find("if (queued) return;").unwrap();
        let poll = script.find("setInterval").unwrap();
        assert!(replace < early_return && early_return < poll);
        assert!(script.contains("delete pending[key];"));
    }
}
