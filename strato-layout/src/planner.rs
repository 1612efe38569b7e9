use tracing::debug;

use crate::plan::LayoutParams;
use crate::plan::PanelFlags;
use crate::plan::PanelPlan;
use crate::plan::PanelRow;
use crate::plan::RowKind;
use crate::plan::SeriesKind;

/// Plans the chart rows for `flags` with the default height ratios.
pub fn plan_panels(flags: PanelFlags) -> PanelPlan {
    plan_panels_with(flags, &LayoutParams::default())
}

/// Plans the chart rows for `flags`.
///
/// Rows are, in order: the candlestick row, a thin spacer that keeps the
/// range slider clear of the next panel, then volume and stochastic when
/// enabled. The VWAP moving average never gets a row of its own; it is
/// overlaid on the candlestick row. Only the candlestick row carries the
/// range slider, and only the indicator rows draw grid lines.
///
/// Every flag combination yields a plan with at least two rows.
pub fn plan_panels_with(flags: PanelFlags, params: &LayoutParams) -> PanelPlan {
    let mut kinds = vec![RowKind::Main, RowKind::Spacer];
    if flags.show_volume {
        kinds.push(RowKind::Volume);
    }
    if flags.show_stochastic {
        kinds.push(RowKind::Stochastic);
    }

    let rows: Vec<PanelRow> = kinds
        .iter()
        .map(|&kind| build_row(kind, flags, params))
        .collect();

    let index_of = |kind: RowKind| kinds.iter().position(|&k| k == kind);

    let plan = PanelPlan {
        main_row_index: 0,
        spacer_row_index: 1,
        volume_row_index: index_of(RowKind::Volume),
        stochastic_row_index: index_of(RowKind::Stochastic),
        title: params.title.clone(),
        shared_time_axis: true,
        show_legend: false,
        vertical_spacing: params.vertical_spacing,
        figure_height: params.figure_height,
        tick_format: params.tick_format.clone(),
        rows,
    };

    debug!(?flags, rows = plan.row_count(), "planned chart panels");

    plan
}

fn build_row(kind: RowKind, flags: PanelFlags, params: &LayoutParams) -> PanelRow {
    let (height, series) = match kind {
        RowKind::Main => {
            let mut series = vec![SeriesKind::Candlestick];
            if flags.show_vwap_ma {
                series.push(SeriesKind::VwapMa);
            }
            (params.main_height, series)
        }
        RowKind::Spacer => (params.spacer_height, vec![SeriesKind::Placeholder]),
        RowKind::Volume => (params.content_height, vec![SeriesKind::Volume]),
        RowKind::Stochastic => (
            params.content_height,
            vec![SeriesKind::StochK, SeriesKind::StochD],
        ),
    };

    PanelRow {
        kind,
        height,
        title: kind.title().to_string(),
        axis_title: (kind != RowKind::Spacer).then(|| kind.title().to_string()),
        series,
        range_slider: kind == RowKind::Main,
        show_grid: kind.is_content(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(plan: &PanelPlan) -> Vec<RowKind> {
        plan.rows.iter().map(|row| row.kind).collect()
    }

    #[test]
    fn test_candles_only() {
        let plan = plan_panels(PanelFlags::new(false, false, false));

        assert_eq!(plan.row_count(), 2);
        assert_eq!(kinds(&plan), vec![RowKind::Main, RowKind::Spacer]);
        assert_eq!(plan.rows[0].series, vec![SeriesKind::Candlestick]);
        assert_eq!(plan.rows[1].series, vec![SeriesKind::Placeholder]);
        assert_eq!(plan.volume_row_index, None);
        assert_eq!(plan.stochastic_row_index, None);
        assert_eq!(plan.rows[1].axis_title, None);
    }

    #[test]
    fn test_volume_precedes_stochastic() {
        let plan = plan_panels(PanelFlags::new(true, true, false));

        assert_eq!(plan.row_count(), 4);
        assert_eq!(
            kinds(&plan),
            vec![
                RowKind::Main,
                RowKind::Spacer,
                RowKind::Volume,
                RowKind::Stochastic
            ]
        );
        assert_eq!(plan.volume_row_index, Some(2));
        assert_eq!(plan.stochastic_row_index, Some(3));
        assert_eq!(plan.row_of(SeriesKind::VwapMa), None);
    }

    #[test]
    fn test_vwap_ma_overlays_main_row() {
        let plan = plan_panels(PanelFlags::new(true, false, true));

        assert_eq!(plan.row_count(), 3);
        assert_eq!(
            kinds(&plan),
            vec![RowKind::Main, RowKind::Spacer, RowKind::Volume]
        );
        assert_eq!(plan.row_of(SeriesKind::VwapMa), Some(plan.main_row_index));
        assert_eq!(
            plan.rows[0].series,
            vec![SeriesKind::Candlestick, SeriesKind::VwapMa]
        );
    }

    #[test]
    fn test_stochastic_without_volume() {
        let plan = plan_panels(PanelFlags::new(false, true, false));

        assert_eq!(plan.row_count(), 3);
        assert_eq!(plan.stochastic_row_index, Some(2));
        assert_eq!(plan.rows[2].title, "Stochastic");
        assert_eq!(
            plan.rows[2].series,
            vec![SeriesKind::StochK, SeriesKind::StochD]
        );
    }

    #[test]
    fn test_row_heights() {
        let plan = plan_panels(PanelFlags::default());
        assert_eq!(plan.row_heights(), vec![0.5, 0.12, 0.25, 0.25]);

        let params = LayoutParams {
            main_height: 3.0,
            spacer_height: 0.5,
            content_height: 1.0,
            ..Default::default()
        };
        let plan = plan_panels_with(PanelFlags::new(false, true, true), &params);
        assert_eq!(plan.row_heights(), vec![3.0, 0.5, 1.0]);
    }

    #[test]
    fn test_every_combination() {
        for flags in PanelFlags::all() {
            let plan = plan_panels(flags);
            let expected_rows =
                2 + usize::from(flags.show_volume) + usize::from(flags.show_stochastic);

            assert_eq!(plan.row_count(), expected_rows, "{flags:?}");
            assert_eq!(plan.range_slider_rows(), vec![plan.main_row_index]);
            assert_eq!(plan.main_row_index, 0);
            assert_eq!(plan.spacer_row_index, 1);
            assert_eq!(plan.row_of(SeriesKind::Candlestick), Some(0));
            assert_eq!(
                plan.row_of(SeriesKind::VwapMa).is_some(),
                flags.show_vwap_ma
            );
            for row in &plan.rows {
                assert_eq!(row.show_grid, row.kind.is_content(), "{flags:?}");
            }
            assert!(plan.shared_time_axis);
            assert!(!plan.show_legend);
        }
    }

    #[test]
    fn test_deterministic() {
        for flags in PanelFlags::all() {
            assert_eq!(plan_panels(flags), plan_panels(flags));
        }
    }

    #[test]
    fn test_figure_settings_copied() {
        let params = LayoutParams {
            title: Some("Pair XBT/USD".to_string()),
            ..Default::default()
        };
        let plan = plan_panels_with(PanelFlags::default(), &params);

        assert_eq!(plan.title.as_deref(), Some("Pair XBT/USD"));
        assert_eq!(plan.figure_height, 1050);
        assert_eq!(plan.vertical_spacing, 0.05);
        assert_eq!(plan.tick_format, "%b %d, %Y");
    }

    #[test]
    fn test_plan_serializes() {
        let plan = plan_panels(PanelFlags::new(false, true, false));
        let json = serde_json::to_value(&plan).unwrap();

        assert_eq!(json["rows"].as_array().unwrap().len(), 3);
        assert_eq!(json["rows"][0]["kind"], "main");
        assert_eq!(json["rows"][0]["range_slider"], true);
        assert_eq!(json["rows"][2]["series"][1], "stoch_d");
        assert_eq!(json["stochastic_row_index"], 2);
        assert!(json["volume_row_index"].is_null());
    }
}
