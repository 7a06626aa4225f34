//! Frame loop and the name-capture state machine.

use alloc::string::String;

use embassy_time::{
    Duration,
    Instant,
};

use crate::{
    Result,
    config::Config,
    io::{
        EntryOutcome,
        Host,
        Input,
        LedSink,
        NameEntry,
        RenderSink,
    },
    rotation::RotationField,
    scene::SceneComposer,
    settings::{
        NAME_KEY,
        SettingsStore,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    Animating,
    CapturingName,
    Terminated,
}

/// The collaborators a controller drives.
pub struct Io<R, L, I, N, S, H> {
    pub render: R,
    pub leds: L,
    pub input: I,
    pub entry: N,
    pub settings: S,
    pub host: H,
}

/// Runs the badge animation and captures a name when none is stored.
///
/// Every [`step`](Self::step) in [`State::Animating`] suspends exactly once,
/// inside [`RenderSink::render`]. Capturing a name suspends for as long as
/// the overlay runs.
pub struct InteractionController<R, L, I, N, S, H> {
    config: Config,
    composer: SceneComposer,
    field: RotationField,
    name: Option<String>,
    state: State,
    last_frame: Instant,
    io: Io<R, L, I, N, S, H>,
}

impl<R, L, I, N, S, H> InteractionController<R, L, I, N, S, H>
where
    R: RenderSink,
    L: LedSink,
    I: Input,
    N: NameEntry,
    S: SettingsStore,
    H: Host,
{
    /// Read the stored name and notify the host that the app is starting.
    pub fn new(config: Config, mut io: Io<R, L, I, N, S, H>) -> Self {
        io.host.on_start();

        let name = io.settings.get(NAME_KEY).filter(|n| !n.is_empty());
        match &name {
            Some(n) => info!("showing name {}", n.as_str()),
            None => info!("no name stored, prompting after first frame"),
        }

        let last_frame = io.host.now();
        Self {
            config,
            composer: SceneComposer::default(),
            field: RotationField::new(),
            name,
            state: State::Animating,
            last_frame,
            io,
        }
    }

    /// Step until the app is minimised.
    pub async fn run(&mut self) -> Result<()> {
        while self.state != State::Terminated {
            self.step().await?;
        }
        Ok(())
    }

    /// Run one iteration of the current state and return the state after it.
    pub async fn step(&mut self) -> Result<State> {
        match self.state {
            State::Animating => self.animate().await?,
            State::CapturingName => self.capture_name().await?,
            State::Terminated => {}
        }
        Ok(self.state)
    }

    async fn animate(&mut self) -> Result<()> {
        if self.io.input.take_cancel() {
            info!("cancel pressed");
            self.terminate();
            return Ok(());
        }

        let now = self.io.host.now();
        let elapsed = now
            .checked_duration_since(self.last_frame)
            .unwrap_or(Duration::from_ticks(0));
        self.last_frame = now;
        self.field.advance(elapsed);

        self.io.leds.show(&self.composer.leds(&self.field));

        let scene = self
            .composer
            .scene(&self.field, self.name.as_deref(), &self.io.render);
        self.io.render.render(&scene).await?;

        if self.name.is_none() {
            self.state = State::CapturingName;
        }
        Ok(())
    }

    async fn capture_name(&mut self) -> Result<()> {
        debug!("opening name entry");
        let outcome = self
            .io
            .entry
            .run(self.config.entry_prompt, &mut self.io.render, &mut self.io.input)
            .await?;

        match outcome {
            EntryOutcome::Accepted(name) if !name.is_empty() => {
                self.store_name(name);
                self.state = State::Animating;
            }
            EntryOutcome::Accepted(_) => {
                warn!("name entry returned an empty name, prompting again");
                self.state = State::Animating;
            }
            EntryOutcome::Cancelled => {
                info!("name entry cancelled");
                self.terminate();
            }
        }
        Ok(())
    }

    /// Keep the name in memory whether or not it could be persisted.
    fn store_name(&mut self, name: String) {
        self.io.settings.set(NAME_KEY, &name);
        if let Err(err) = self.io.settings.save() {
            warn!("failed to save settings: {}", err);
        }
        info!("name set to {}", name.as_str());
        self.name = Some(name);
    }

    fn terminate(&mut self) {
        self.io.host.minimise();
        self.state = State::Terminated;
    }

    pub const fn state(&self) -> State {
        self.state
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub const fn rotation(&self) -> &RotationField {
        &self.field
    }

    pub const fn config(&self) -> &Config {
        &self.config
    }

    pub const fn io(&self) -> &Io<R, L, I, N, S, H> {
        &self.io
    }

    /// Release the collaborators, e.g. to blank the LEDs after minimising.
    pub fn into_io(self) -> Io<R, L, I, N, S, H> {
        self.io
    }
}
