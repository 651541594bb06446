use crate::render::chart::{
    Axis, ChartSeries, ChartSpec, Dash, FontSizes, GridLines, Marker, SeriesStyle, VerticalMarker,
};
use crate::workflow::runner::CoordinationResult;
use motorcore::models::SpeedTorqueCurves;

pub const COORDINATION_STEM: &str = "coordenograma_tempo_x_corrente";
pub const SPEED_STEM: &str = "speed_vs_current";
pub const TORQUE_STEM: &str = "torque_vs_speed";

const COORDINATION_TIME_RANGE_S: (f64, f64) = (0.1, 1000.0);
const PROTECTOR_NAME: &str = "WEG MPW80";

/// Log-log time/current coordination chart, 15x10 in at 300 dpi.
pub fn coordination_chart(result: &CoordinationResult) -> ChartSpec {
    let params = &result.params;
    let series = vec![
        ChartSeries::new(
            "Motor thermal limit (cold)",
            result.cold_withstand.time_current_series().points(),
            SeriesStyle::line("green", 2.5).marker(Marker::Triangle, 8.0),
        ),
        ChartSeries::new(
            "Motor thermal limit (hot)",
            result.hot_withstand.time_current_series().points(),
            SeriesStyle::line("blue", 2.5)
                .marker(Marker::Circle, 8.0)
                .opacity(0.7),
        ),
        ChartSeries::new(
            format!("Trip curve ({})", PROTECTOR_NAME),
            result.trip_curve.thermal.time_current_series().points(),
            SeriesStyle::line("red", 2.5).dash(Dash::Dashed),
        ),
        ChartSeries::new(
            format!("Magnetic trip ({})", PROTECTOR_NAME),
            result.trip_curve.magnetic.time_current_series().points(),
            SeriesStyle::line("red", 2.5).dash(Dash::Dashed).opacity(0.6),
        ),
        ChartSeries::new(
            "Motor starting current",
            result.starting_current.points(),
            SeriesStyle::line("black", 3.0).opacity(0.8),
        ),
    ];

    let vertical_markers = vec![
        VerticalMarker {
            x: params.t_start,
            label: format!("Start time ({:?}s)", params.t_start),
            style: SeriesStyle::line("darkgreen", 2.0).dash(Dash::Dotted),
        },
        VerticalMarker {
            x: params.t_lrc_cold,
            label: format!("Locked-rotor time ({:?}s)", params.t_lrc_cold),
            style: SeriesStyle::line("darkred", 2.0).dash(Dash::Dotted),
        },
    ];

    ChartSpec {
        file_stem: COORDINATION_STEM.into(),
        title: "Motor Protection and Starting Coordination".into(),
        width_in: 15.0,
        height_in: 10.0,
        dpi: 300.0,
        x_axis: Axis::log(
            "Time (s) - [log scale]",
            COORDINATION_TIME_RANGE_S.0,
            COORDINATION_TIME_RANGE_S.1,
        ),
        y_axis: Axis::log(
            "Current (A) - [log scale]",
            params.i_nominal * 0.9,
            params.i_start_peak * 2.0,
        ),
        series,
        vertical_markers,
        grid: GridLines::Both,
        fonts: FontSizes {
            title: 20.0,
            title_bold: true,
            axis_label: 14.0,
            tick: 10.0,
            legend: 12.0,
        },
    }
}

/// Rotor speed against rotor current.
pub fn speed_chart(curves: &SpeedTorqueCurves) -> ChartSpec {
    let points = curves
        .currents
        .iter()
        .copied()
        .zip(curves.speeds.iter().copied())
        .collect::<Vec<_>>();
    linear_chart(
        SPEED_STEM,
        "Speed x Current",
        Axis::linear_fit("Rotor current (A)", curves.currents.iter().copied()),
        Axis::linear_fit("Speed (rpm)", curves.speeds.iter().copied()),
        ChartSeries::new("Speed (rpm)", points, SeriesStyle::line("orange", 1.5)),
    )
}

/// Shaft torque against rotor speed.
pub fn torque_chart(curves: &SpeedTorqueCurves) -> ChartSpec {
    let points = curves
        .speeds
        .iter()
        .copied()
        .zip(curves.torques.iter().copied())
        .collect::<Vec<_>>();
    linear_chart(
        TORQUE_STEM,
        "Torque x Speed",
        Axis::linear_fit("Speed (rpm)", curves.speeds.iter().copied()),
        Axis::linear_fit("Torque (N·m)", curves.torques.iter().copied()),
        ChartSeries::new("Torque (N·m)", points, SeriesStyle::line("purple", 1.5)),
    )
}

fn linear_chart(
    file_stem: &str,
    title: &str,
    x_axis: Axis,
    y_axis: Axis,
    series: ChartSeries,
) -> ChartSpec {
    ChartSpec {
        file_stem: file_stem.into(),
        title: title.into(),
        width_in: 10.0,
        height_in: 6.0,
        dpi: 100.0,
        x_axis,
        y_axis,
        series: vec![series],
        vertical_markers: Vec::new(),
        grid: GridLines::Major,
        fonts: FontSizes::default(),
    }
}
