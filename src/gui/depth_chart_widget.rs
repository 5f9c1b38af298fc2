/// 深度图组件
///
/// 把买卖两条累计序列画成阶梯面积图，处理横轴切换、缩放和点击选单

use egui_plot::{GridMark, Legend, Line, LineStyle, Plot, PlotBounds, PlotPoint, PlotPoints, VLine};
use std::ops::RangeInclusive;

use crate::app::DepthChartApp;
use crate::config::ChartConfig;
use crate::depth::display_formatter::{format_volume_tick, format_x_tick};
use crate::depth::{AxisMode, ChartData, OrderTooltip, Series};

/// 翻译函数
pub type Translator = Box<dyn Fn(&str) -> String>;

pub struct DepthChartWidget {
    config: ChartConfig,
    translate: Translator,
}

impl DepthChartWidget {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            translate: Box::new(|key: &str| key.to_string()),
        }
    }

    pub fn with_translator<F>(mut self, translate: F) -> Self
    where
        F: Fn(&str) -> String + 'static,
    {
        self.translate = Box::new(translate);
        self
    }

    fn color(rgba: [u8; 4]) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(rgba[0], rgba[1], rgba[2], rgba[3])
    }

    /// 渲染整个组件
    pub fn show(&mut self, ui: &mut egui::Ui, app: &mut DepthChartApp) {
        self.render_controls(ui, app);
        ui.separator();

        // 中心未定义：显示加载状态而不是空图
        if app.is_loading() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading...");
            });
            return;
        }

        let chart = match app.chart_data() {
            Some(chart) => chart.clone(),
            None => return,
        };

        let clicked_x = self.render_chart(ui, app, chart);
        if let Some(x) = clicked_x {
            app.click_at(x);
        }
    }

    /// 横轴模式切换与缩放按钮
    fn render_controls(&self, ui: &mut egui::Ui, app: &mut DepthChartApp) {
        ui.horizontal(|ui| {
            let mode = app.window().mode();
            for candidate in [AxisMode::Premium, AxisMode::BaseAmount] {
                let label = (self.translate)(candidate.label_key());
                if ui.selectable_label(mode == candidate, label).clicked() {
                    app.set_axis_mode(candidate);
                }
            }

            ui.separator();

            if ui.button("➖").on_hover_text("Zoom out").clicked() {
                app.expand_range();
            }
            let can_shrink = app.can_shrink_range();
            if ui
                .add_enabled(can_shrink, egui::Button::new("➕"))
                .on_hover_text("Zoom in")
                .clicked()
            {
                app.shrink_range();
            }

            ui.label(format!("± {}", format_x_tick(mode, app.window().x_range())));
        });
    }

    /// 渲染图表，返回被点击位置的x坐标
    fn render_chart(&self, ui: &mut egui::Ui, app: &DepthChartApp, chart: ChartData) -> Option<f64> {
        let mode = chart.mode;
        let (min_x, max_x) = chart.bounds();
        let max_y = chart.buy.total_volume().max(chart.sell.total_volume()).max(f64::EPSILON);
        let suffix = self.config.volume_suffix.clone();
        let y_suffix = suffix.clone();
        let currency_label = app.currency_label();
        let hover_chart = chart.clone();

        let plot = Plot::new("depth_chart")
            .height(self.config.height)
            .legend(Legend::default())
            .show_grid(self.config.show_grid)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label(app.axis_label(self.translate.as_ref()))
            .x_axis_formatter(move |mark: GridMark, _digits: usize, _range: &RangeInclusive<f64>| {
                format_x_tick(mode, mark.value)
            })
            .y_axis_formatter(move |mark: GridMark, _digits: usize, _range: &RangeInclusive<f64>| {
                format_volume_tick(mark.value, &y_suffix)
            })
            .label_formatter(move |_name: &str, point: &PlotPoint| {
                hover_chart
                    .nearest_order(point.x)
                    .map(|order| OrderTooltip::from_order(order, &currency_label, &suffix).to_text())
                    .unwrap_or_default()
            });

        let response = plot.show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max([min_x, 0.0], [max_x, max_y * 1.1]));

            self.render_series(plot_ui, &chart.buy, Self::color(self.config.buy_color));
            self.render_series(plot_ui, &chart.sell, Self::color(self.config.sell_color));

            if self.config.show_center_marker {
                plot_ui.vline(
                    VLine::new(chart.center)
                        .color(egui::Color32::GRAY)
                        .style(LineStyle::Dashed { length: 5.0 }),
                );
            }

            plot_ui.pointer_coordinate()
        });

        if response.response.clicked() {
            response.inner.map(|point| point.x)
        } else {
            None
        }
    }

    /// 阶梯面积：点本身已是阶梯形，填充到 y=0
    fn render_series(&self, plot_ui: &mut egui_plot::PlotUi, series: &Series, color: egui::Color32) {
        if series.is_empty() {
            return;
        }
        let points: PlotPoints = series.xy().into_iter().collect();
        let line = Line::new(points)
            .color(color)
            .width(2.0)
            .fill(0.0)
            .name((self.translate)(series.id.as_str()));
        plot_ui.line(line);
    }
}
