use eframe::egui;

use crate::app::DepthChartApp;
use crate::gui::DepthChartWidget;

/// 深度图窗口
pub struct DepthSightGui {
    app: DepthChartApp,
    chart_widget: DepthChartWidget,
    show_stats: bool,
}

impl DepthSightGui {
    pub fn new(mut app: DepthChartApp) -> Self {
        let chart_widget = DepthChartWidget::new(app.config().chart.clone());

        app.set_on_order_clicked(|id, coordinator| {
            log::info!("选中订单 {} (协调者: {})", id, coordinator.unwrap_or("-"));
        });

        Self {
            app,
            chart_widget,
            show_stats: false,
        }
    }

    pub fn app_mut(&mut self) -> &mut DepthChartApp {
        &mut self.app
    }
}

impl eframe::App for DepthSightGui {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // 处理外部排队的输入变化
        self.app.event_loop();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.label(format!("币种: {}", self.app.currency_label()));
                ui.separator();
                let order_count = self.app.model().orders().len();
                ui.label(format!("订单: {}", order_count));
                ui.separator();
                ui.checkbox(&mut self.show_stats, "统计");
            });
        });

        if self.show_stats {
            egui::TopBottomPanel::bottom("stats_panel").show(ctx, |ui| {
                let stats = self.app.stats();
                ui.horizontal(|ui| {
                    ui.label(format!("事件: {}", stats.total_events_processed));
                    ui.separator();
                    ui.label(format!("重算阶段: {}", stats.stages_run));
                    ui.separator();
                    ui.label(format!("忽略: {}", stats.ignored_events));
                });
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_widget.show(ui, &mut self.app);
        });
    }
}
