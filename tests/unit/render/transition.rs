use super::*;
use crate::render::sink::InMemorySink;

fn solid(w: u32, h: u32, v: u8) -> RgbImage {
    RgbImage::from_pixel(w, h, Rgb([v, v, v]))
}

fn quick(steps: u32) -> FadeOpts {
    FadeOpts {
        duration: Duration::ZERO,
        steps,
        ..FadeOpts::default()
    }
}

#[test]
fn defaults() {
    let opts = FadeOpts::default();
    assert_eq!(opts.duration, Duration::from_millis(500));
    assert_eq!(opts.steps, 10);
    assert_eq!(opts.background, CANVAS_BG);
}

#[test]
fn first_slide_is_emitted_once_at_full_strength() {
    let mut sink = InMemorySink::new();
    let to = solid(8, 8, 200);
    let n = fade(None, &to, &FadeOpts::default(), &mut sink).unwrap();
    assert_eq!(n, 1);
    assert_eq!(sink.factors(), vec![1.0]);
    assert_eq!(sink.frames()[0].image.as_raw(), to.as_raw());
    assert!(sink.is_finished());
}

#[test]
fn emits_steps_plus_one_linear_factors() {
    let mut sink = InMemorySink::new();
    let n = fade(Some(&solid(8, 8, 0)), &solid(8, 8, 255), &quick(4), &mut sink).unwrap();
    assert_eq!(n, 5);
    assert_eq!(sink.factors(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    let idx: Vec<u32> = sink.frames().iter().map(|f| f.idx).collect();
    assert_eq!(idx, vec![0, 1, 2, 3, 4]);
}

#[test]
fn endpoints_match_inputs_and_midpoints_increase() {
    let mut sink = InMemorySink::new();
    fade(Some(&solid(6, 6, 10)), &solid(6, 6, 250), &quick(10), &mut sink).unwrap();
    let frames = sink.frames();
    assert_eq!(frames.first().unwrap().image.get_pixel(0, 0).0, [10, 10, 10]);
    assert_eq!(frames.last().unwrap().image.get_pixel(0, 0).0, [250, 250, 250]);
    let values: Vec<u8> = frames.iter().map(|f| f.image.get_pixel(3, 3).0[0]).collect();
    assert!(values.windows(2).all(|w| w[0] <= w[1]), "{values:?}");
}

#[test]
fn zero_steps_emits_target_once() {
    let mut sink = InMemorySink::new();
    let n = fade(Some(&solid(4, 4, 0)), &solid(4, 4, 90), &quick(0), &mut sink).unwrap();
    assert_eq!(n, 1);
    assert_eq!(sink.factors(), vec![1.0]);
    assert_eq!(sink.frames()[0].image.get_pixel(0, 0).0, [90, 90, 90]);
}

#[test]
fn mismatched_sizes_share_a_padded_frame() {
    let mut sink = InMemorySink::new();
    let wide = solid(10, 4, 255);
    let tall = solid(4, 10, 255);
    fade(Some(&wide), &tall, &quick(2), &mut sink).unwrap();

    assert_eq!(
        sink.config(),
        Some(SinkConfig {
            width: 10,
            height: 10,
            frames: 3
        })
    );
    for f in sink.frames() {
        assert_eq!(f.image.dimensions(), (10, 10));
    }
    // corner is padding in both images
    assert_eq!(sink.frames()[1].image.get_pixel(0, 0).0, CANVAS_BG);
}

#[test]
fn sleeps_between_frames_but_not_after_the_last() {
    let mut sink = InMemorySink::new();
    let opts = FadeOpts {
        duration: Duration::from_millis(40),
        steps: 2,
        ..FadeOpts::default()
    };
    let start = std::time::Instant::now();
    fade(Some(&solid(2, 2, 0)), &solid(2, 2, 1), &opts, &mut sink).unwrap();
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(40), "{elapsed:?}");
}

#[test]
fn crossfade_rejects_size_mismatch() {
    let err = crossfade_rgb(&solid(2, 2, 0), &solid(3, 2, 0), 0.5).unwrap_err();
    assert!(matches!(err, PartyError::Validation(_)));
}

#[test]
fn crossfade_clamps_factor() {
    let a = solid(1, 1, 40);
    let b = solid(1, 1, 200);
    assert_eq!(crossfade_rgb(&a, &b, -3.0).unwrap().as_raw(), a.as_raw());
    assert_eq!(crossfade_rgb(&a, &b, 7.0).unwrap().as_raw(), b.as_raw());
    let mid = crossfade_rgb(&a, &b, 0.5).unwrap().get_pixel(0, 0).0[0];
    assert!((118..=122).contains(&mid), "{mid}");
}

#[test]
fn pad_to_centers_and_crops() {
    let img = solid(2, 2, 255);
    let padded = pad_to(&img, 6, 4, [0, 0, 0]);
    assert_eq!(padded.get_pixel(0, 0).0, [0, 0, 0]);
    assert_eq!(padded.get_pixel(2, 1).0, [255, 255, 255]);
    assert_eq!(padded.get_pixel(3, 2).0, [255, 255, 255]);
    assert_eq!(padded.get_pixel(4, 1).0, [0, 0, 0]);

    let cropped = pad_to(&solid(8, 8, 7), 2, 2, [0, 0, 0]);
    assert_eq!(cropped.dimensions(), (2, 2));
    assert_eq!(cropped.get_pixel(1, 1).0, [7, 7, 7]);
}
