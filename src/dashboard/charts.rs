//! Chart generation and rendering for the dashboard.
//!
//! Creates the ECharts balance breakdown pie chart showing where the
//! account's money sits: the spendable balance, the amount spent, and the
//! amount still missing to reach the savings target.
//!
//! The chart is generated as JSON configuration for the ECharts library and
//! rendered with a corresponding HTML container and JavaScript
//! initialization code.

use charming::{
    Chart,
    component::{Legend, Title},
    element::{JsFunction, Tooltip, Trigger},
    series::Pie,
};
use maud::PreEscaped;

use crate::{html::HeadElement, ledger::BalanceBreakdown};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// The pie chart showing how the account's money is split between the
/// spendable balance, the amount spent and the amount still missing to
/// reach the savings target.
///
/// An overdrawn balance is clamped to zero, the overdraw warning banner
/// covers that case.
pub(super) fn breakdown_chart(breakdown: &BalanceBreakdown) -> Chart {
    Chart::new()
        .title(
            Title::new()
                .text("Balance Breakdown")
                .subtext("Where your money sits"),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().top("bottom"))
        .series(Pie::new().name("Breakdown").radius("55%").data(vec![
            (breakdown.available.max(0.0), "Available"),
            (breakdown.spent, "Spent"),
            (breakdown.remaining_to_target, "To target"),
        ]))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}
