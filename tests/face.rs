use std::time::{Duration, Instant};

use watchface::{
    hand_angles, AmbientPolicy, Canvas, ClockTime, DisplayMode, FaceKind, FixedClock,
    NormalPolicy, Renderer, Scheduler, WatchApp, WatchConfig, WatchEvent, WatchFace,
};

#[derive(Default)]
struct FakeRenderer {
    frames: Vec<(DisplayMode, ClockTime)>,
}

impl Renderer for FakeRenderer {
    fn render(&mut self, mode: DisplayMode, time: &ClockTime) {
        self.frames.push((mode, *time));
    }

    fn paint(&self, _canvas: &mut Canvas<'_>) {}
}

fn setup(ambient: AmbientPolicy) -> (WatchFace<FakeRenderer, FixedClock>, FixedClock) {
    let clock = FixedClock::new(ClockTime::new(10, 15, 30, 250).unwrap());
    let scheduler = Scheduler::new(NormalPolicy::AlignToSecond, ambient);
    let face = WatchFace::new(FakeRenderer::default(), clock.clone(), scheduler);
    (face, clock)
}

#[test]
fn periodic_ambient_timer_is_cancelled_by_normal() {
    let (mut face, _) = setup(AmbientPolicy::Periodic(Duration::from_secs(60)));
    let now = Instant::now();

    face.handle(WatchEvent::AmbientModeChanged(true), now);
    face.handle(WatchEvent::AmbientModeChanged(true), now);
    assert_eq!(face.pending_count(), 1);
    assert!(!face.frame_requested());
    // 10:15:30.250 -> next minute boundary
    let ambient_deadline = face.next_deadline().unwrap();
    assert_eq!(ambient_deadline, now + Duration::from_millis(29_750));
    assert_eq!(face.render_count(), 2);

    face.handle(WatchEvent::AmbientModeChanged(false), now);
    assert_eq!(face.mode(), DisplayMode::Normal);
    assert_eq!(face.next_deadline(), None);

    assert!(!face.poll(ambient_deadline + Duration::from_secs(120)));
    assert_eq!(face.render_count(), 2);
    assert_eq!(face.mode(), DisplayMode::Normal);
    assert!(face.frame_requested());
}

#[test]
fn normal_ambient_normal_leaves_no_stale_timer() {
    let (mut face, clock) = setup(AmbientPolicy::External);
    let now = Instant::now();
    face.start();
    face.animation_frame(now);
    let normal_deadline = face.next_deadline().unwrap();

    face.handle(WatchEvent::AmbientModeChanged(true), now);
    face.handle(WatchEvent::AmbientModeChanged(false), now);
    assert!(face.frame_requested());
    assert_eq!(face.next_deadline(), None);

    // the old second-boundary timeout was cancelled and must not fire
    let renders = face.render_count();
    assert!(!face.poll(normal_deadline + Duration::from_secs(5)));
    assert_eq!(face.render_count(), renders);

    clock.advance_millis(10);
    assert!(face.animation_frame(now + Duration::from_millis(10)));
    assert_eq!(face.render_count(), renders + 1);
    assert_eq!(face.pending_count(), 1);
}

#[test]
fn ambient_wake_renders_once_without_mode_change() {
    let (mut face, _) = setup(AmbientPolicy::External);
    let now = Instant::now();
    face.handle(WatchEvent::AmbientModeChanged(true), now);
    let before = face.render_count();

    face.handle(WatchEvent::VisibilityChanged { visible: true }, now);
    assert_eq!(face.mode(), DisplayMode::Ambient);
    assert_eq!(face.render_count(), before + 1);

    face.handle(WatchEvent::TimeTick, now);
    assert_eq!(face.mode(), DisplayMode::Ambient);
    assert_eq!(face.render_count(), before + 2);
    assert_eq!(face.pending_count(), 0);
    assert!(face
        .renderer()
        .frames
        .iter()
        .all(|(mode, _)| *mode == DisplayMode::Ambient));
}

#[test]
fn normal_chain_renders_every_second() {
    let (mut face, clock) = setup(AmbientPolicy::External);
    let mut now = Instant::now();
    face.start();
    face.animation_frame(now);

    for _ in 0..5 {
        let deadline = face.next_deadline().unwrap();
        clock.advance_millis((deadline - now).as_millis() as u32);
        now = deadline;
        assert!(face.poll(now));
        assert!(face.animation_frame(now));
        assert_eq!(face.last_render().unwrap().millis(), 0);
    }

    let seconds: Vec<u8> = face
        .renderer()
        .frames
        .iter()
        .map(|(_, time)| time.seconds())
        .collect();
    assert_eq!(seconds, vec![30, 31, 32, 33, 34, 35]);
}

#[test]
fn timezone_change_rerenders_with_new_time() {
    let (mut face, clock) = setup(AmbientPolicy::External);
    let now = Instant::now();
    face.handle(WatchEvent::AmbientModeChanged(true), now);

    clock.set(ClockTime::hms(11, 15, 30).unwrap());
    face.handle(WatchEvent::TimezoneChanged, now);
    assert_eq!(face.mode(), DisplayMode::Ambient);
    assert_eq!(face.last_render().unwrap().hours(), 11);
}

#[test]
fn rendered_time_yields_expected_angles() {
    let (mut face, clock) = setup(AmbientPolicy::External);
    clock.set(ClockTime::hms(10, 15, 30).unwrap());
    face.start();
    face.animation_frame(Instant::now());

    let angles = hand_angles(&face.last_render().unwrap());
    assert!((angles.hour - 307.75).abs() < 1e-9);
    assert!((angles.minute - 93.0).abs() < 1e-9);
}

#[test]
fn app_face_runs_without_a_window() {
    for kind in [FaceKind::Canvas, FaceKind::Transform] {
        let config = WatchConfig::builder()
            .face(kind)
            .start_time(ClockTime::hms(8, 20, 0).unwrap())
            .build();
        let app = WatchApp::new(config);
        let mut face = app.face(120, 120).unwrap();
        let now = Instant::now();
        face.start();
        assert!(face.animation_frame(now));
        assert_eq!(face.last_render().unwrap().hours(), 8);

        let mut frame = vec![0u8; 120 * 120 * 4];
        face.renderer().paint(&mut Canvas::new(&mut frame, 120, 120));
        assert!(frame.chunks(4).any(|pixel| pixel[3] == 0xff));

        face.handle(WatchEvent::AmbientModeChanged(true), now);
        assert_eq!(face.mode(), DisplayMode::Ambient);
        assert!(face.next_deadline().is_some());
    }
}
