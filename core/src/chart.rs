use std::error::Error;

use log::info;
use plotters::prelude::*;

use crate::error::{PipelineError, Result};
use crate::types::WeeklyBucket;

/// Mottaker av ukestabellen. Bytt ut for annen backend (notebook, web osv.).
pub trait ChartRenderer {
    fn render(&self, weeks: &[WeeklyBucket]) -> Result<()>;
}

const BAR_COLOR: RGBColor = RGBColor(99, 110, 250);
const LINE_COLOR: RGBColor = RGBColor(239, 85, 59);
const LEGEND_HEIGHT: u32 = 50;

pub const TITLE: &str = "Weekly distance";
pub const DISTANCE_LABEL: &str = "Weekly distance (km)";
pub const TIME_LABEL: &str = "Elapsed time (h)";

/// Søyler (km) på venstre akse, linje+markører (timer) på høyre akse,
/// felles horisontal legend under plottet.
pub struct SvgChartRenderer {
    pub path: String,
    pub width: u32,
    pub height: u32,
}

impl SvgChartRenderer {
    pub fn new(path: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            width,
            height,
        }
    }

    fn draw(&self, weeks: &[WeeklyBucket]) -> std::result::Result<(), Box<dyn Error>> {
        let root = SVGBackend::new(&self.path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;
        let (plot_area, legend_area) =
            root.split_vertically(self.height.saturating_sub(LEGEND_HEIGHT));

        let n = weeks.len();
        let x_range = -0.5f64..(n.max(1) as f64 - 0.5);
        let y_max = axis_max(weeks.iter().map(|w| w.distance_km));
        let y2_max = axis_max(weeks.iter().map(|w| w.time_hours));

        let mut chart = ChartBuilder::on(&plot_area)
            .caption(TITLE, ("sans-serif", 28))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .right_y_label_area_size(60)
            .build_cartesian_2d(x_range.clone(), 0f64..y_max)?
            .set_secondary_coord(x_range, 0f64..y2_max);

        let week_label = |x: &f64| {
            let i = x.round();
            if (x - i).abs() > 1e-6 || i < 0.0 || i as usize >= n {
                return String::new();
            }
            weeks[i as usize].week.format("%Y-%m-%d").to_string()
        };

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n.clamp(1, 12))
            .x_label_formatter(&week_label)
            .x_desc("Week")
            .y_desc("Distance (km)")
            .draw()?;
        chart
            .configure_secondary_axes()
            .y_desc(TIME_LABEL)
            .draw()?;

        chart.draw_series(weeks.iter().enumerate().map(|(i, w)| {
            let x = i as f64;
            Rectangle::new([(x - 0.35, 0.0), (x + 0.35, w.distance_km)], BAR_COLOR.filled())
        }))?;

        let points: Vec<(f64, f64)> = weeks
            .iter()
            .enumerate()
            .map(|(i, w)| (i as f64, w.time_hours))
            .collect();
        chart.draw_secondary_series(LineSeries::new(
            points.iter().copied(),
            LINE_COLOR.stroke_width(2),
        ))?;
        chart.draw_secondary_series(
            points
                .iter()
                .map(|&p| Circle::new(p, 4, LINE_COLOR.filled())),
        )?;

        // Legend: sentrert, horisontal, under plottet
        let (w, _) = legend_area.dim_in_pixel();
        let cx = w as i32 / 2;
        let cy = LEGEND_HEIGHT as i32 / 2;
        let font = ("sans-serif", 16).into_font();
        legend_area.draw(&Rectangle::new(
            [(cx - 230, cy - 6), (cx - 210, cy + 6)],
            BAR_COLOR.filled(),
        ))?;
        legend_area.draw(&Text::new(DISTANCE_LABEL, (cx - 202, cy - 8), font.clone()))?;
        legend_area.draw(&PathElement::new(
            vec![(cx + 20, cy), (cx + 44, cy)],
            LINE_COLOR.stroke_width(2),
        ))?;
        legend_area.draw(&Circle::new((cx + 32, cy), 4, LINE_COLOR.filled()))?;
        legend_area.draw(&Text::new(TIME_LABEL, (cx + 52, cy - 8), font))?;

        root.present()?;
        Ok(())
    }
}

/// Øvre akseverdi med 10 % luft; 1.0 når det ikke finnes data.
fn axis_max(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.filter(|v| v.is_finite()).fold(0.0f64, f64::max);
    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

impl ChartRenderer for SvgChartRenderer {
    fn render(&self, weeks: &[WeeklyBucket]) -> Result<()> {
        self.draw(weeks)
            .map_err(|e| PipelineError::Render(e.to_string()))?;
        info!("📈 Graf skrevet til {} ({} uker)", self.path, weeks.len());
        Ok(())
    }
}
