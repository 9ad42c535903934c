//! Property tests for the fit computation.

use cubefit::{Constraint, Face, FitPolicy, Placement, fit, fit_with};
use proptest::prelude::*;

const EPS: f64 = 1e-9;

fn dim() -> impl Strategy<Value = u32> {
    1u32..=8000
}

proptest! {
    #[test]
    fn uniform_fit_stays_inside_box(sw in dim(), sh in dim(), bw in dim(), bh in dim()) {
        let r = fit(sw as f64, sh as f64, bw as f64, bh as f64).unwrap();
        prop_assert!(r.fits_within(bw as f64, bh as f64, EPS), "{r:?}");
    }

    #[test]
    fn uniform_fit_touches_one_edge(sw in dim(), sh in dim(), bw in dim(), bh in dim()) {
        let r = fit(sw as f64, sh as f64, bw as f64, bh as f64).unwrap();
        prop_assert!(r.width == bw as f64 || r.height == bh as f64, "{r:?}");
    }

    #[test]
    fn uniform_fit_preserves_aspect(sw in dim(), sh in dim(), bw in dim(), bh in dim()) {
        let r = fit(sw as f64, sh as f64, bw as f64, bh as f64).unwrap();
        let source_ratio = sw as f64 / sh as f64;
        let fit_ratio = r.width / r.height;
        prop_assert!((source_ratio - fit_ratio).abs() <= source_ratio * 1e-9);
    }

    #[test]
    fn uniform_fit_is_centered(sw in dim(), sh in dim(), bw in dim(), bh in dim()) {
        let r = fit(sw as f64, sh as f64, bw as f64, bh as f64).unwrap();
        prop_assert!((r.x - (bw as f64 - r.width) / 2.0).abs() <= EPS);
        prop_assert!((r.y - (bh as f64 - r.height) / 2.0).abs() <= EPS);
    }

    #[test]
    fn fit_is_deterministic(sw in dim(), sh in dim(), bw in dim(), bh in dim()) {
        let a = fit(sw as f64, sh as f64, bw as f64, bh as f64);
        let b = fit(sw as f64, sh as f64, bw as f64, bh as f64);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn fit_with_is_deterministic(
        sw in dim(),
        sh in dim(),
        bw in dim(),
        bh in dim(),
        policy in prop_oneof![
            Just(FitPolicy::Uniform),
            Just(FitPolicy::AxisPriority),
            Just(FitPolicy::Distort),
        ],
        placement in prop_oneof![Just(Placement::Center), Just(Placement::SideMargins)],
    ) {
        let args = (sw as f64, sh as f64, bw as f64, bh as f64);
        let a = fit_with(policy, placement, args.0, args.1, args.2, args.3);
        let b = fit_with(policy, placement, args.0, args.1, args.2, args.3);
        prop_assert_eq!(a, b);

        let layout = Constraint::new(bw, bh)
            .policy(policy)
            .placement(placement)
            .compute(sw, sh)
            .unwrap();
        prop_assert_eq!(layout.pixel_rect(), layout.clone().pixel_rect());
    }

    #[test]
    fn refitting_the_result_changes_nothing(sw in dim(), sh in dim(), bw in dim(), bh in dim()) {
        let first = fit(sw as f64, sh as f64, bw as f64, bh as f64).unwrap();
        let second = fit(first.width, first.height, bw as f64, bh as f64).unwrap();
        prop_assert!((first.width - second.width).abs() <= 1e-6);
        prop_assert!((first.height - second.height).abs() <= 1e-6);
    }

    #[test]
    fn side_margins_keep_the_filled_axis_at_zero(sw in dim(), sh in dim(), bw in dim(), bh in dim()) {
        let r = fit_with(
            FitPolicy::Uniform,
            Placement::SideMargins,
            sw as f64,
            sh as f64,
            bw as f64,
            bh as f64,
        )
        .unwrap();
        prop_assert!(r.fits_within(bw as f64, bh as f64, EPS));
        prop_assert!(r.x == 0.0 || r.y == 0.0, "{r:?}");
    }

    #[test]
    fn pixel_rect_stays_on_canvas(sw in dim(), sh in dim(), face in 0usize..6) {
        let face = Face::from_index(face).unwrap();
        let layout = face.constraint().compute(sw, sh).unwrap();
        let rect = layout.pixel_rect();
        prop_assert!(rect.width >= 1 && rect.height >= 1);
        prop_assert!(rect.x >= 0 && rect.y >= 0);
        prop_assert!(rect.x + rect.width as i64 <= layout.canvas.width as i64);
        prop_assert!(rect.y + rect.height as i64 <= layout.canvas.height as i64);

        let right = layout.canvas.width as i64 - rect.x - rect.width as i64;
        let bottom = layout.canvas.height as i64 - rect.y - rect.height as i64;
        prop_assert!(right - rect.x == 0 || right - rect.x == 1, "{rect:?}");
        prop_assert!(bottom - rect.y == 0 || bottom - rect.y == 1, "{rect:?}");
    }

    #[test]
    fn distort_always_fills(sw in dim(), sh in dim(), bw in dim(), bh in dim()) {
        let layout = Constraint::new(bw, bh)
            .policy(FitPolicy::Distort)
            .compute(sw, sh)
            .unwrap();
        prop_assert_eq!((layout.fit.width, layout.fit.height), (bw as f64, bh as f64));
        prop_assert_eq!((layout.fit.x, layout.fit.y), (0.0, 0.0));
    }
}
