use futures::executor::block_on;
use mapcore::{Canvas, ErrorKind, SdfParameters, SdfRasterizer, SdfResult, rasterize};
use std::convert::Infallible;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// An opaque 8×8 square centered in the default 16 px icon area.
fn draw_square(canvas: &mut Canvas, buffer: u32) -> Result<(), Infallible> {
    let b = buffer as f64;
    canvas.fill_rect(b + 4.0, b + 4.0, 8.0, 8.0);
    Ok(())
}

fn draw_circle(canvas: &mut Canvas, buffer: u32) -> Result<(), Infallible> {
    let b = buffer as f64;
    canvas.fill_circle(b + 8.0, b + 8.0, 5.5);
    Ok(())
}

#[test]
fn test_output_layout() {
    init_logger();

    let sdf = rasterize(SdfParameters::default(), draw_square).unwrap();
    assert_eq!(sdf.width(), 22);
    assert_eq!(sdf.height(), 22);
    assert_eq!(sdf.data().len(), 22 * 22 * 4);
    assert!(sdf.data().chunks_exact(4).all(|px| px[..3] == [0, 0, 0]));
    assert_eq!(sdf.alpha_channel().count(), 22 * 22);
}

#[test]
fn test_square_inside_higher_than_outside() {
    let sdf = rasterize(SdfParameters::default(), draw_square).unwrap();

    // Square covers image pixels 7..=14 on both axes, center row is 11
    let center = sdf.alpha_at(11, 11).unwrap();
    let inner_edge = sdf.alpha_at(7, 11).unwrap();
    let outer_edge = sdf.alpha_at(6, 11).unwrap();
    let far = sdf.alpha_at(0, 11).unwrap();

    assert!(center > outer_edge);
    assert!(center >= inner_edge);
    assert!(inner_edge > outer_edge);
    assert!(outer_edge > far);

    // Insideness never increases walking from the center out to the border
    let row: Vec<u8> = (0..=11).rev().map(|x| sdf.alpha_at(x, 11).unwrap()).collect();
    assert!(row.windows(2).all(|w| w[0] >= w[1]), "{:?}", row);
}

#[test]
fn test_square_encoded_values() {
    let sdf = rasterize(SdfParameters::default(), draw_square).unwrap();

    // d = -1 on the inner edge, +1 just outside, radius 8, cutoff 0.25
    assert_eq!(sdf.alpha_at(7, 11), Some(223));
    assert_eq!(sdf.alpha_at(6, 11), Some(159));
    // Four pixels outside: 255 - 255 * (4 / 8 + 0.25)
    assert_eq!(sdf.alpha_at(3, 11), Some(64));
}

#[test]
fn test_symmetric_shape_gives_symmetric_field() {
    let sdf = rasterize(SdfParameters::default(), draw_square).unwrap();
    let size = sdf.width();
    for y in 0..size {
        for x in 0..size {
            assert_eq!(
                sdf.alpha_at(x, y),
                sdf.alpha_at(size - 1 - x, y),
                "mirror mismatch at ({}, {})",
                x,
                y
            );
            assert_eq!(sdf.alpha_at(x, y), sdf.alpha_at(y, x));
        }
    }
}

#[test]
fn test_determinism() {
    let params = SdfParameters::default().with_icon_size(24).with_buffer(4);

    let first = rasterize(params, draw_circle).unwrap();
    let second = rasterize(params, draw_circle).unwrap();
    assert_eq!(first.data(), second.data());

    let mut reused = SdfRasterizer::new(params).unwrap();
    reused.rasterize(draw_square).unwrap();
    let third = reused.rasterize(draw_circle).unwrap();
    assert_eq!(first.data(), third.data());
}

#[test]
fn test_extreme_parameters_clamp() {
    let tiny_radius = SdfParameters::default().with_radius(1e-9);
    let sdf = rasterize(tiny_radius, draw_square).unwrap();
    // No anti-aliasing on the square: every pixel is a whole pixel in or out
    assert!(sdf.alpha_channel().all(|a| a == 0 || a == 255));
    assert_eq!(sdf.alpha_at(11, 11), Some(255));
    assert_eq!(sdf.alpha_at(0, 0), Some(0));

    for cutoff in [-50.0, 50.0] {
        let params = SdfParameters::default().with_cutoff(cutoff);
        let sdf = rasterize(params, draw_circle).unwrap();
        let expected = if cutoff < 0.0 { 255 } else { 0 };
        assert!(sdf.alpha_channel().all(|a| a == expected));
    }

    let huge_radius = SdfParameters::default().with_radius(1e12).with_cutoff(0.0);
    let sdf = rasterize(huge_radius, draw_circle).unwrap();
    // Finite distances vanish against the radius; only unbounded ones do not
    assert_eq!(sdf.alpha_at(11, 11), Some(255));
}

#[test]
fn test_antialiased_edges_are_between_full_values() {
    let sdf = rasterize(SdfParameters::default(), draw_circle).unwrap();
    let edge_value = 255.0 * (1.0 - 0.25);
    let near_edge = sdf
        .alpha_channel()
        .filter(|&a| (a as f64 - edge_value).abs() < 32.0)
        .count();
    assert!(near_edge > 0);
}

#[test]
fn test_invalid_parameters() {
    init_logger();

    let cases = [
        SdfParameters::default().with_icon_size(0),
        SdfParameters::default().with_buffer(0),
        SdfParameters::default().with_radius(f64::INFINITY),
        SdfParameters::default().with_radius(-1.0),
        SdfParameters::default().with_cutoff(f64::NAN),
        SdfParameters::default().with_icon_size(100_000),
    ];
    for params in cases {
        let err = SdfRasterizer::new(params).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameters, "{:?}", params);
    }
}

#[test]
fn test_render_failure_propagates() {
    init_logger();

    let err = rasterize(SdfParameters::default(), |canvas, buffer| {
        canvas.fill_rect(buffer as f64, buffer as f64, 4.0, 4.0);
        Err(format!("could not decode icon at offset {}", buffer))
    })
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RenderFailed);
    assert!(err.to_string().contains("offset 3"));
}

#[test]
fn test_async_draw_matches_sync_draw() {
    let params = SdfParameters::default();
    let expected = rasterize(params, draw_circle).unwrap();

    let mut rasterizer = SdfRasterizer::new(params).unwrap();
    let sdf: SdfResult = block_on(rasterizer.rasterize_async(|mut canvas, buffer| async move {
        draw_circle(&mut canvas, buffer)?;
        Ok::<Canvas, Infallible>(canvas)
    }))
    .unwrap();

    assert_eq!(sdf, expected);
}

#[test]
fn test_async_failure_then_recovery() {
    let mut rasterizer = SdfRasterizer::new(SdfParameters::default()).unwrap();

    let err = block_on(
        rasterizer.rasterize_async(|_canvas, _| async { Err::<Canvas, _>("decoder gave up") }),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RenderFailed);

    // The surface was dropped with the failed future; the next call gets a fresh one
    let sdf = block_on(rasterizer.rasterize_async(|mut canvas, buffer| async move {
        draw_square(&mut canvas, buffer)?;
        Ok::<Canvas, Infallible>(canvas)
    }))
    .unwrap();
    assert_eq!(sdf, rasterize(SdfParameters::default(), draw_square).unwrap());
}

#[test]
fn test_async_wrong_surface_rejected() {
    let mut rasterizer = SdfRasterizer::new(SdfParameters::default()).unwrap();
    let err = block_on(
        rasterizer.rasterize_async(|_canvas, _| async { Ok::<Canvas, Infallible>(Canvas::new(4, 4)) }),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RenderFailed);
}

#[test]
fn test_glyph_mask_blit() {
    // A 2×2 mask blitted at the icon origin behaves like two filled pixels
    let params = SdfParameters::default().with_icon_size(4).with_buffer(2);
    let from_mask = rasterize(params, |canvas, buffer| {
        canvas.blit_alpha(buffer, buffer, 2, &[255, 255, 0, 0]);
        Ok::<(), Infallible>(())
    })
    .unwrap();
    let from_rect = rasterize(params, |canvas, buffer| {
        canvas.fill_rect(buffer as f64, buffer as f64, 2.0, 1.0);
        Ok::<(), Infallible>(())
    })
    .unwrap();
    assert_eq!(from_mask, from_rect);
}
