use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use shared::display::format_currency;
use shared::{Series, StatisticsView};
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use crate::services::Logger;

const CANVAS_WIDTH: u32 = 800;
const CANVAS_HEIGHT: u32 = 350;

const BACKGROUND: RGBColor = RGBColor(31, 41, 55);
const TEXT: RGBColor = RGBColor(209, 213, 219);
const AXIS: RGBColor = RGBColor(75, 85, 99);
const GRID: RGBColor = RGBColor(55, 65, 81);
const GRID_LIGHT: RGBColor = RGBColor(43, 53, 68);

type MonthChart<'a> = ChartContext<'a, CanvasBackend, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Share of a month slot taken up by its bar group
const BAR_GROUP_WIDTH: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartKind {
    Line,
    Bar,
}

/// `#RRGGBB` to a plotters colour; anything unreadable draws grey.
fn hex_color(hex: &str) -> RGBColor {
    let digits = hex.trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        digits
            .get(range)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
    };

    match (digits.len(), channel(0..2), channel(2..4), channel(4..6)) {
        (6, Some(r), Some(g), Some(b)) => RGBColor(r, g, b),
        _ => RGBColor(128, 128, 128),
    }
}

/// Horizontal extent of one bar: month slots are centred on their index and
/// the series of a month sit side by side.
fn bar_span(month_index: usize, series_index: usize, series_count: usize) -> (f64, f64) {
    let width = BAR_GROUP_WIDTH / series_count.max(1) as f64;
    let start = month_index as f64 - BAR_GROUP_WIDTH / 2.0 + series_index as f64 * width;
    (start, start + width)
}

/// Top of the y axis, leaving headroom above the tallest value
fn y_upper_bound(max_value: f64) -> f64 {
    if max_value > 0.0 {
        max_value * 1.1
    } else {
        1.0
    }
}

/// Month label for an x-axis tick; ticks between months stay blank.
fn month_tick_label(labels: &[String], x: f64) -> String {
    let index = x.round();
    if (x - index).abs() > 0.01 || index < 0.0 {
        return String::new();
    }
    labels.get(index as usize).cloned().unwrap_or_default()
}

#[derive(Properties, PartialEq)]
pub struct MonthlyChartProps {
    pub view: StatisticsView,
    pub kind: ChartKind,
}

pub struct MonthlyChart {
    canvas_ref: NodeRef,
}

impl Component for MonthlyChart {
    type Message = ();
    type Properties = MonthlyChartProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            canvas_ref: NodeRef::default(),
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        // `rendered` redraws after the re-render
        ctx.props() != old_props
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        if let Err(e) = self.draw_chart(ctx.props()) {
            Logger::warn_with_component("monthly-chart", &format!("Failed to draw chart: {}", e));
        }
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <div class="chart-content">
                <canvas
                    ref={self.canvas_ref.clone()}
                    class="statistics-chart-canvas"
                    width={CANVAS_WIDTH.to_string()}
                    height={CANVAS_HEIGHT.to_string()}
                ></canvas>
            </div>
        }
    }
}

impl MonthlyChart {
    fn draw_chart(&self, props: &MonthlyChartProps) -> Result<(), String> {
        let view = &props.view;
        if view.is_empty() {
            return Ok(());
        }

        let canvas = match self.canvas_ref.cast::<HtmlCanvasElement>() {
            Some(canvas) => canvas,
            None => return Ok(()),
        };
        canvas.set_width(CANVAS_WIDTH);
        canvas.set_height(CANVAS_HEIGHT);

        let backend = CanvasBackend::with_canvas_object(canvas)
            .ok_or_else(|| "canvas has no 2d context".to_string())?;
        let root = backend.into_drawing_area();
        root.fill(&BACKGROUND).map_err(|e| e.to_string())?;

        let series = match props.kind {
            ChartKind::Line => view.line_series(),
            ChartKind::Bar => view.bar_series(),
        };
        let labels: Vec<String> = view.rows.iter().map(|row| row.label.clone()).collect();
        let month_count = view.rows.len();
        let x_range = -0.5..(month_count as f64 - 0.5);
        let y_range = 0.0..y_upper_bound(view.max_value(&series));

        let mut chart = ChartBuilder::on(&root)
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(80)
            .build_cartesian_2d(x_range, y_range)
            .map_err(|e| e.to_string())?;

        chart
            .configure_mesh()
            .x_labels(month_count + 1)
            .y_labels(8)
            .x_label_formatter(&|x| month_tick_label(&labels, *x))
            .y_label_formatter(&|v| format_currency(*v))
            .label_style(("sans-serif", 12, &TEXT))
            .axis_style(&AXIS)
            .bold_line_style(&GRID)
            .light_line_style(&GRID_LIGHT)
            .draw()
            .map_err(|e| e.to_string())?;

        match props.kind {
            ChartKind::Line => Self::draw_lines(&mut chart, view, &series)?,
            ChartKind::Bar => Self::draw_bars(&mut chart, view, &series)?,
        }

        chart
            .configure_series_labels()
            .background_style(&BACKGROUND)
            .border_style(&AXIS)
            .label_font(("sans-serif", 12, &TEXT))
            .position(SeriesLabelPosition::UpperLeft)
            .draw()
            .map_err(|e| e.to_string())?;

        root.present().map_err(|e| e.to_string())
    }

    fn draw_lines(
        chart: &mut MonthChart<'_>,
        view: &StatisticsView,
        series: &[Series],
    ) -> Result<(), String> {
        for line in series {
            let color = hex_color(line.color());
            let points: Vec<(f64, f64)> = view
                .rows
                .iter()
                .enumerate()
                .map(|(index, row)| (index as f64, row.amount_for(line)))
                .collect();

            chart
                .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))
                .map_err(|e| e.to_string())?
                .label(line.label())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], color.stroke_width(2)));

            chart
                .draw_series(points.into_iter().map(|point| Circle::new(point, 3, color.filled())))
                .map_err(|e| e.to_string())?;
        }
        Ok(())
    }

    fn draw_bars(
        chart: &mut MonthChart<'_>,
        view: &StatisticsView,
        series: &[Series],
    ) -> Result<(), String> {
        let series_count = series.len();
        for (series_index, bars) in series.iter().enumerate() {
            let color = hex_color(bars.color());
            chart
                .draw_series(view.rows.iter().enumerate().map(|(month_index, row)| {
                    let (x0, x1) = bar_span(month_index, series_index, series_count);
                    Rectangle::new([(x0, 0.0), (x1, row.amount_for(bars))], color.filled())
                }))
                .map_err(|e| e.to_string())?
                .label(bars.label())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
        }
        Ok(())
    }
}
