//! 图表几何计算
//!
//! 只把服务端给出的序列映射为 SVG 坐标，不做任何统计推导。

use std::f64::consts::PI;

/// 绘图区域（SVG viewBox 坐标）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plot {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for Plot {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 300.0,
            padding: 32.0,
        }
    }
}

impl Plot {
    fn inner_width(&self) -> f64 {
        (self.width - 2.0 * self.padding).max(0.0)
    }

    fn inner_height(&self) -> f64 {
        (self.height - 2.0 * self.padding).max(0.0)
    }

    pub fn baseline(&self) -> f64 {
        self.height - self.padding
    }

    /// 值 → y 坐标
    pub fn y_of(&self, value: f64, max: f64) -> f64 {
        let ratio = if max > 0.0 { (value / max).clamp(0.0, 1.0) } else { 0.0 };
        self.baseline() - ratio * self.inner_height()
    }
}

/// 坐标轴上限：向上取到 1/2/5 × 10^n
pub fn nice_max(max: f64) -> f64 {
    if !max.is_finite() || max <= 0.0 {
        return 1.0;
    }
    let exponent = max.log10().floor();
    let base = 10f64.powi(exponent as i32);
    let fraction = max / base;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * base
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: String,
    pub value: f64,
}

/// 柱状图布局
pub fn bar_layout(plot: &Plot, series: &[(String, f64)]) -> Vec<Bar> {
    if series.is_empty() {
        return Vec::new();
    }
    let max = nice_max(series.iter().map(|(_, v)| *v).fold(0.0, f64::max));
    let slot = plot.inner_width() / series.len() as f64;
    let bar_width = slot * 0.7;

    series
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            let y = plot.y_of(*value, max);
            Bar {
                x: plot.padding + slot * i as f64 + (slot - bar_width) / 2.0,
                y,
                width: bar_width,
                height: plot.baseline() - y,
                label: label.clone(),
                value: *value,
            }
        })
        .collect()
}

/// 折线图的点，`fixed_max` 为 None 时自动取上限
pub fn line_points(plot: &Plot, values: &[f64], fixed_max: Option<f64>) -> Vec<(f64, f64)> {
    if values.is_empty() {
        return Vec::new();
    }
    let max = fixed_max.unwrap_or_else(|| nice_max(values.iter().copied().fold(0.0, f64::max)));
    let step = if values.len() > 1 {
        plot.inner_width() / (values.len() - 1) as f64
    } else {
        0.0
    };
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = if values.len() > 1 {
                plot.padding + step * i as f64
            } else {
                plot.width / 2.0
            };
            (x, plot.y_of(*v, max))
        })
        .collect()
}

/// SVG `points` 属性
pub fn polyline(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{:.1},{:.1}", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// 环形图的一段
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub value: f64,
    /// 占比 [0, 1]
    pub fraction: f64,
    pub path: String,
}

fn polar(cx: f64, cy: f64, r: f64, angle: f64) -> (f64, f64) {
    (cx + r * angle.cos(), cy + r * angle.sin())
}

/// 环形图（donut）各段路径，从 12 点方向顺时针
pub fn donut_slices(
    series: &[(String, f64)],
    center: (f64, f64),
    inner: f64,
    outer: f64,
) -> Vec<Slice> {
    let total: f64 = series.iter().map(|(_, v)| v.max(0.0)).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    let (cx, cy) = center;
    let mut start = -PI / 2.0;

    series
        .iter()
        .map(|(label, value)| {
            let fraction = value.max(0.0) / total;
            // 整圆无法用单段 arc 表示
            let sweep = (fraction * 2.0 * PI).min(2.0 * PI - 1e-4);
            let end = start + sweep;
            let large = if sweep > PI { 1 } else { 0 };

            let (ox1, oy1) = polar(cx, cy, outer, start);
            let (ox2, oy2) = polar(cx, cy, outer, end);
            let (ix2, iy2) = polar(cx, cy, inner, end);
            let (ix1, iy1) = polar(cx, cy, inner, start);
            let path = format!(
                "M {:.2} {:.2} A {} {} 0 {} 1 {:.2} {:.2} L {:.2} {:.2} A {} {} 0 {} 0 {:.2} {:.2} Z",
                ox1, oy1, outer, outer, large, ox2, oy2, ix2, iy2, inner, inner, large, ix1, iy1
            );
            start = end;
            Slice {
                label: label.clone(),
                value: *value,
                fraction,
                path,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nice_max() {
        assert_eq!(nice_max(0.0), 1.0);
        assert_eq!(nice_max(7.0), 10.0);
        assert_eq!(nice_max(13.0), 20.0);
        assert_eq!(nice_max(180.0), 200.0);
        assert_eq!(nice_max(450.0), 500.0);
        assert_eq!(nice_max(100.0), 100.0);
        assert_eq!(nice_max(f64::NAN), 1.0);
    }

    #[test]
    fn test_bar_layout_heights_are_proportional() {
        let plot = Plot::default();
        let series = vec![("Mon".to_string(), 50.0), ("Tue".to_string(), 100.0)];
        let bars = bar_layout(&plot, &series);
        assert_eq!(bars.len(), 2);
        assert!((bars[1].height - 2.0 * bars[0].height).abs() < 1e-9);
        assert!((bars[1].y - plot.padding).abs() < 1e-9);
        assert!(bars[0].x < bars[1].x);
    }

    #[test]
    fn test_line_points_fixed_max() {
        let plot = Plot::default();
        let points = line_points(&plot, &[0.0, 100.0], Some(100.0));
        assert_eq!(points[0], (plot.padding, plot.baseline()));
        assert_eq!(points[1], (plot.width - plot.padding, plot.padding));
        assert!(line_points(&plot, &[], None).is_empty());
    }

    #[test]
    fn test_donut_fractions_sum_to_one() {
        let series = vec![
            ("Active".to_string(), 45.0),
            ("Completed".to_string(), 35.0),
            ("Cancelled".to_string(), 20.0),
        ];
        let slices = donut_slices(&series, (100.0, 100.0), 60.0, 80.0);
        let sum: f64 = slices.iter().map(|s| s.fraction).sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(slices[0].path.starts_with("M 100.00 20.00"));
        assert!(donut_slices(&[], (0.0, 0.0), 1.0, 2.0).is_empty());
    }
}
