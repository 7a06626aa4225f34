//! Frame loop and name-capture scenarios driven against recording fakes.

use std::{
    cell::{
        Cell,
        RefCell,
    },
    collections::VecDeque,
    pin::pin,
    rc::Rc,
    task::{
        Context,
        Poll,
        Waker,
    },
};

use embassy_futures::block_on;
use embassy_time::{
    Duration,
    Instant,
};
use hexbadge::{
    CONFIG,
    EntryOutcome,
    EntryView,
    Error,
    Host,
    Input,
    InteractionController,
    Io,
    Key,
    LED_RING_COUNT,
    LedSink,
    NAME_KEY,
    NameEntry,
    RenderSink,
    RotationField,
    Scene,
    SettingsError,
    SettingsStore,
    State,
    hsv_to_rgb,
    scene::{
        Font,
        LabelKind,
        TextMetrics,
    },
};
use palette::Srgb;

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Start,
    Leds(usize),
    Frame(LabelKind, String),
    Overlay(String),
    Set(String, String),
    Save,
    Minimise,
}

type Log = Rc<RefCell<Vec<Event>>>;

struct Screen {
    log: Log,
    fail: bool,
}

impl TextMetrics for Screen {
    fn text_width(&self, text: &str, _font: Font) -> f32 {
        text.len() as f32 * 10.0
    }
}

impl RenderSink for Screen {
    /// Suspends once per frame, like a renderer waiting out the frame period.
    async fn render(&mut self, scene: &Scene<'_>) -> hexbadge::Result<()> {
        if self.fail {
            return Err(Error::Display);
        }
        self.log
            .borrow_mut()
            .push(Event::Frame(scene.label.kind, scene.label.text.to_string()));
        embassy_futures::yield_now().await;
        Ok(())
    }

    async fn render_overlay(&mut self, view: &EntryView<'_>) -> hexbadge::Result<()> {
        self.log.borrow_mut().push(Event::Overlay(view.prompt.to_string()));
        Ok(())
    }
}

struct Ring {
    log: Log,
    last: Vec<Srgb<u8>>,
}

impl LedSink for Ring {
    fn show(&mut self, colors: &[Srgb<u8>]) {
        self.log.borrow_mut().push(Event::Leds(colors.len()));
        self.last = colors.to_vec();
    }
}

/// Cancel presses queued per frame; `true` means pressed.
struct Presses(VecDeque<bool>);

impl Input for Presses {
    fn take_cancel(&mut self) -> bool {
        self.0.pop_front().unwrap_or(false)
    }

    async fn next_key(&mut self) -> hexbadge::Result<Key> {
        Err(Error::Input)
    }
}

/// Overlay that renders once and resolves with the next scripted outcome.
struct ScriptedEntry(VecDeque<EntryOutcome>);

impl NameEntry for ScriptedEntry {
    async fn run<R: RenderSink, I: Input>(
        &mut self,
        prompt: &str,
        render: &mut R,
        _input: &mut I,
    ) -> hexbadge::Result<EntryOutcome> {
        render
            .render_overlay(&EntryView {
                prompt,
                text: "",
                pending: ' ',
            })
            .await?;
        self.0.pop_front().ok_or(Error::NameEntry)
    }
}

struct Store {
    log: Log,
    name: Option<String>,
    fail_save: bool,
}

impl SettingsStore for Store {
    fn get(&self, key: &str) -> Option<String> {
        assert_eq!(key, NAME_KEY);
        self.name.clone()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.log
            .borrow_mut()
            .push(Event::Set(key.to_string(), value.to_string()));
    }

    fn save(&mut self) -> Result<(), SettingsError> {
        self.log.borrow_mut().push(Event::Save);
        if self.fail_save {
            Err(SettingsError::Unavailable)
        } else {
            Ok(())
        }
    }
}

struct FakeHost {
    log: Log,
    clock: Cell<u64>,
}

impl Host for FakeHost {
    fn now(&self) -> Instant {
        let ms = self.clock.get();
        self.clock.set(ms + 33);
        Instant::from_millis(ms)
    }

    fn minimise(&mut self) {
        self.log.borrow_mut().push(Event::Minimise);
    }

    fn on_start(&mut self) {
        self.log.borrow_mut().push(Event::Start);
    }
}

type Controller = InteractionController<Screen, Ring, Presses, ScriptedEntry, Store, FakeHost>;

#[derive(Default)]
struct Setup {
    name: Option<&'static str>,
    outcomes: Vec<EntryOutcome>,
    presses: Vec<bool>,
    fail_save: bool,
    fail_render: bool,
}

impl Setup {
    fn build(self) -> (Controller, Log) {
        let log = Log::default();
        let controller = InteractionController::new(
            CONFIG,
            Io {
                render: Screen {
                    log: log.clone(),
                    fail: self.fail_render,
                },
                leds: Ring {
                    log: log.clone(),
                    last: Vec::new(),
                },
                input: Presses(self.presses.into()),
                entry: ScriptedEntry(self.outcomes.into()),
                settings: Store {
                    log: log.clone(),
                    name: self.name.map(str::to_string),
                    fail_save: self.fail_save,
                },
                host: FakeHost {
                    log: log.clone(),
                    clock: Cell::new(0),
                },
            },
        );
        (controller, log)
    }
}

fn step(controller: &mut Controller) -> hexbadge::Result<State> {
    block_on(controller.step())
}

/// Drive a step to completion by hand, counting how often it suspended.
fn step_counting_suspensions(controller: &mut Controller) -> (usize, hexbadge::Result<State>) {
    let mut fut = pin!(controller.step());
    let mut cx = Context::from_waker(Waker::noop());
    let mut suspensions = 0;
    loop {
        match fut.as_mut().poll(&mut cx) {
            Poll::Ready(state) => return (suspensions, state),
            Poll::Pending => suspensions += 1,
        }
    }
}

fn settings_calls(log: &Log) -> Vec<Event> {
    log.borrow()
        .iter()
        .filter(|e| matches!(e, Event::Set(..) | Event::Save))
        .cloned()
        .collect()
}

#[test]
fn known_name_keeps_animating() {
    let (mut controller, log) = Setup {
        name: Some("Grace"),
        ..Setup::default()
    }
    .build();

    for _ in 0..5 {
        assert_eq!(step(&mut controller), Ok(State::Animating));
    }
    assert_eq!(controller.name(), Some("Grace"));

    let log = log.borrow();
    assert_eq!(log[0], Event::Start);
    let frames = log
        .iter()
        .filter(|e| **e == Event::Frame(LabelKind::Name, "Grace".to_string()))
        .count();
    assert_eq!(frames, 5);
    assert!(!log.iter().any(|e| matches!(e, Event::Overlay(_))));
}

#[test]
fn leds_pushed_before_each_frame() {
    let (mut controller, log) = Setup {
        name: Some("Grace"),
        ..Setup::default()
    }
    .build();

    step(&mut controller).unwrap();
    let log = log.borrow();
    assert_eq!(log[1], Event::Leds(LED_RING_COUNT));
    assert!(matches!(log[2], Event::Frame(..)));
}

#[test]
fn animating_step_suspends_only_at_render() {
    let (mut controller, log) = Setup {
        name: Some("Grace"),
        ..Setup::default()
    }
    .build();

    for frame in 1..=10 {
        assert_eq!(
            step_counting_suspensions(&mut controller),
            (1, Ok(State::Animating))
        );
        let leds = log
            .borrow()
            .iter()
            .filter(|e| matches!(e, Event::Leds(_)))
            .count();
        assert_eq!(leds, frame);
    }
}

#[test]
fn prompt_frame_suspends_once_before_capture() {
    let (mut controller, _log) = Setup::default().build();
    assert_eq!(
        step_counting_suspensions(&mut controller),
        (1, Ok(State::CapturingName))
    );
}

#[test]
fn each_animating_step_advances_rotation_once() {
    let (mut controller, _log) = Setup {
        name: Some("Grace"),
        ..Setup::default()
    }
    .build();
    let mut expected = RotationField::new();

    for _ in 0..50 {
        step(&mut controller).unwrap();
        expected.advance(Duration::from_millis(33));
    }
    assert_eq!(controller.rotation(), &expected);

    let leds = &controller.io().leds.last;
    assert_eq!(leds[0], hsv_to_rgb(0.0, 1.0, 0.5));
    assert_eq!(
        leds[LED_RING_COUNT - 1],
        hsv_to_rgb(expected.reference_angle(), 1.0, 0.5)
    );
}

#[test]
fn prompt_frame_renders_before_capture() {
    let (mut controller, log) = Setup::default().build();
    assert_eq!(controller.state(), State::Animating);

    assert_eq!(step(&mut controller), Ok(State::CapturingName));
    let frames: Vec<_> = log
        .borrow()
        .iter()
        .filter(|e| matches!(e, Event::Frame(..)))
        .cloned()
        .collect();
    assert_eq!(
        frames,
        [Event::Frame(
            LabelKind::Prompt,
            hexbadge::scene::NAME_PROMPT.to_string()
        )]
    );
}

#[test]
fn accepted_name_is_stored_and_saved() {
    let (mut controller, log) = Setup {
        outcomes: vec![EntryOutcome::Accepted("Ada".to_string())],
        ..Setup::default()
    }
    .build();

    assert_eq!(step(&mut controller), Ok(State::CapturingName));
    assert_eq!(step(&mut controller), Ok(State::Animating));
    assert_eq!(controller.name(), Some("Ada"));
    assert_eq!(
        settings_calls(&log),
        [
            Event::Set("name".to_string(), "Ada".to_string()),
            Event::Save
        ]
    );

    assert_eq!(step(&mut controller), Ok(State::Animating));
    assert_eq!(
        log.borrow().last(),
        Some(&Event::Frame(LabelKind::Name, "Ada".to_string()))
    );
}

#[test]
fn overlay_gets_configured_prompt() {
    let (mut controller, log) = Setup {
        outcomes: vec![EntryOutcome::Accepted("Ada".to_string())],
        ..Setup::default()
    }
    .build();

    step(&mut controller).unwrap();
    step(&mut controller).unwrap();
    assert!(
        log.borrow()
            .contains(&Event::Overlay("What is your name?".to_string()))
    );
}

#[test]
fn cancelled_capture_terminates_without_saving() {
    let (mut controller, log) = Setup {
        outcomes: vec![EntryOutcome::Cancelled],
        ..Setup::default()
    }
    .build();

    assert_eq!(step(&mut controller), Ok(State::CapturingName));
    assert_eq!(step(&mut controller), Ok(State::Terminated));
    assert_eq!(controller.name(), None);
    assert!(settings_calls(&log).is_empty());
    assert_eq!(log.borrow().last(), Some(&Event::Minimise));

    // Terminal: further steps do nothing.
    let before = log.borrow().len();
    assert_eq!(step(&mut controller), Ok(State::Terminated));
    assert_eq!(log.borrow().len(), before);
}

#[test]
fn failed_save_keeps_name() {
    let (mut controller, log) = Setup {
        outcomes: vec![EntryOutcome::Accepted("Ada".to_string())],
        fail_save: true,
        ..Setup::default()
    }
    .build();

    step(&mut controller).unwrap();
    assert_eq!(step(&mut controller), Ok(State::Animating));
    assert_eq!(controller.name(), Some("Ada"));
    assert_eq!(settings_calls(&log).last(), Some(&Event::Save));

    // No second prompt.
    assert_eq!(step(&mut controller), Ok(State::Animating));
}

#[test]
fn empty_name_prompts_again() {
    let (mut controller, log) = Setup {
        outcomes: vec![
            EntryOutcome::Accepted(String::new()),
            EntryOutcome::Accepted("Ada".to_string()),
        ],
        ..Setup::default()
    }
    .build();

    step(&mut controller).unwrap();
    assert_eq!(step(&mut controller), Ok(State::Animating));
    assert_eq!(controller.name(), None);
    assert!(settings_calls(&log).is_empty());

    assert_eq!(step(&mut controller), Ok(State::CapturingName));
    assert_eq!(step(&mut controller), Ok(State::Animating));
    assert_eq!(controller.name(), Some("Ada"));
}

#[test]
fn cancel_button_minimises_while_animating() {
    let (mut controller, log) = Setup {
        name: Some("Grace"),
        presses: vec![false, false, true],
        ..Setup::default()
    }
    .build();

    assert_eq!(step(&mut controller), Ok(State::Animating));
    assert_eq!(step(&mut controller), Ok(State::Animating));
    assert_eq!(step(&mut controller), Ok(State::Terminated));

    let log = log.borrow();
    assert_eq!(log.last(), Some(&Event::Minimise));
    let frames = log.iter().filter(|e| matches!(e, Event::Frame(..))).count();
    assert_eq!(frames, 2);
}

#[test]
fn cancel_button_bypasses_capture() {
    let (mut controller, log) = Setup {
        presses: vec![true],
        ..Setup::default()
    }
    .build();

    assert_eq!(step(&mut controller), Ok(State::Terminated));
    assert!(!log.borrow().iter().any(|e| matches!(e, Event::Overlay(_))));
}

#[test]
fn run_returns_once_minimised() {
    let (mut controller, log) = Setup {
        outcomes: vec![EntryOutcome::Cancelled],
        ..Setup::default()
    }
    .build();

    assert_eq!(block_on(controller.run()), Ok(()));
    assert_eq!(controller.state(), State::Terminated);
    let minimised = log
        .borrow()
        .iter()
        .filter(|e| **e == Event::Minimise)
        .count();
    assert_eq!(minimised, 1);
}

#[test]
fn render_failure_propagates() {
    let (mut controller, _log) = Setup {
        name: Some("Grace"),
        fail_render: true,
        ..Setup::default()
    }
    .build();

    assert_eq!(step(&mut controller), Err(Error::Display));
    assert_eq!(block_on(controller.run()), Err(Error::Display));
}

#[test]
fn overlay_failure_propagates() {
    let (mut controller, _log) = Setup::default().build();

    step(&mut controller).unwrap();
    assert_eq!(step(&mut controller), Err(Error::NameEntry));
    assert_eq!(controller.state(), State::CapturingName);
}

#[test]
fn stored_empty_name_counts_as_unset() {
    let (mut controller, _log) = Setup {
        name: Some(""),
        ..Setup::default()
    }
    .build();

    assert_eq!(controller.name(), None);
    assert_eq!(step(&mut controller), Ok(State::CapturingName));
}
