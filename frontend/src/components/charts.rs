//! SVG 图表
//!
//! 几何计算在 `rxlens_shared::chart` 中完成，这里只负责输出 SVG 元素。
//! 所有图表使用 viewBox 自适应宽度。

use leptos::prelude::*;
use rxlens_shared::chart::{self, Plot, bar_layout, donut_slices, line_points};

/// 环形图配色，按顺序循环使用
const PALETTE: [&str; 6] = ["#6366f1", "#ec4899", "#10b981", "#f59e0b", "#0ea5e9", "#8b5cf6"];

fn palette(i: usize) -> &'static str {
    PALETTE[i % PALETTE.len()]
}

/// SVG 坐标
fn coord(v: f64) -> String {
    format!("{v:.1}")
}

#[component]
fn EmptyChart() -> impl IntoView {
    view! {
        <div class="h-48 flex items-center justify-center text-base-content/50 text-sm">
            "No data available"
        </div>
    }
}

/// 柱状图
#[component]
pub fn BarChart(#[prop(into)] series: Signal<Vec<(String, f64)>>) -> impl IntoView {
    let plot = Plot::default();
    let view_box = format!("0 0 {} {}", plot.width, plot.height);

    move || {
        let bars = series.with(|s| bar_layout(&plot, s));
        if bars.is_empty() {
            return view! { <EmptyChart /> }.into_any();
        }
        let view_box = view_box.clone();
        view! {
            <svg viewBox=view_box class="w-full h-auto" role="img">
                <line
                    x1=coord(plot.padding)
                    y1=coord(plot.baseline())
                    x2=coord(plot.width - plot.padding)
                    y2=coord(plot.baseline())
                    class="stroke-base-300"
                />
                {bars
                    .into_iter()
                    .map(|bar| {
                        let label_x = bar.x + bar.width / 2.0;
                        view! {
                            <g>
                                <rect
                                    x=coord(bar.x)
                                    y=coord(bar.y)
                                    width=coord(bar.width)
                                    height=coord(bar.height)
                                    rx="3"
                                    class="fill-primary"
                                />
                                <text
                                    x=coord(label_x)
                                    y=coord(plot.baseline() + 16.0)
                                    text-anchor="middle"
                                    class="fill-base-content text-[10px]"
                                >
                                    {bar.label.clone()}
                                </text>
                            </g>
                        }
                    })
                    .collect_view()}
            </svg>
        }
        .into_any()
    }
}

/// 折线图
///
/// `max` 固定纵轴上限（例如百分比用 100），为 None 时自动取整。
#[component]
pub fn LineChart(
    #[prop(into)] series: Signal<Vec<(String, f64)>>,
    #[prop(optional)] max: Option<f64>,
) -> impl IntoView {
    let plot = Plot::default();
    let view_box = format!("0 0 {} {}", plot.width, plot.height);

    move || {
        let (labels, values): (Vec<String>, Vec<f64>) = series.get().into_iter().unzip();
        let points = line_points(&plot, &values, max);
        if points.is_empty() {
            return view! { <EmptyChart /> }.into_any();
        }
        let view_box = view_box.clone();
        view! {
            <svg viewBox=view_box class="w-full h-auto" role="img">
                <line
                    x1=coord(plot.padding)
                    y1=coord(plot.baseline())
                    x2=coord(plot.width - plot.padding)
                    y2=coord(plot.baseline())
                    class="stroke-base-300"
                />
                <polyline
                    points=chart::polyline(&points)
                    fill="none"
                    stroke-width="2"
                    class="stroke-secondary"
                />
                {points
                    .into_iter()
                    .zip(labels)
                    .map(|((x, y), label)| {
                        view! {
                            <g>
                                <circle cx=coord(x) cy=coord(y) r="4" class="fill-secondary" />
                                <text
                                    x=coord(x)
                                    y=coord(plot.baseline() + 16.0)
                                    text-anchor="middle"
                                    class="fill-base-content text-[10px]"
                                >
                                    {label}
                                </text>
                            </g>
                        }
                    })
                    .collect_view()}
            </svg>
        }
        .into_any()
    }
}

/// 环形图 + 图例
#[component]
pub fn DonutChart(#[prop(into)] series: Signal<Vec<(String, f64)>>) -> impl IntoView {
    move || {
        let slices = series.with(|s| donut_slices(s, (100.0, 100.0), 55.0, 90.0));
        if slices.is_empty() {
            return view! { <EmptyChart /> }.into_any();
        }
        let legend = slices
            .iter()
            .enumerate()
            .map(|(i, slice)| {
                view! {
                    <li class="flex items-center gap-2 text-sm">
                        <span class="inline-block w-3 h-3 rounded-sm" style=format!("background-color: {}", palette(i))></span>
                        <span class="flex-1">{slice.label.clone()}</span>
                        <span class="text-base-content/60">{format!("{:.0}%", slice.fraction * 100.0)}</span>
                    </li>
                }
            })
            .collect_view();
        view! {
            <div class="flex flex-col md:flex-row items-center gap-6">
                <svg viewBox="0 0 200 200" class="w-48 h-48" role="img">
                    {slices
                        .into_iter()
                        .enumerate()
                        .map(|(i, slice)| {
                            view! {
                                <path d=slice.path fill=palette(i) />
                            }
                        })
                        .collect_view()}
                </svg>
                <ul class="space-y-2 flex-1 w-full">{legend}</ul>
            </div>
        }
        .into_any()
    }
}
