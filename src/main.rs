use clap::Parser;
use iced::{Element, Length, Size, Task, Theme, keyboard};
use perspective_shadow::VanishingRays;
use perspective_shadow::config::SceneSettings;
use perspective_shadow::control_points::ControlPoints;
use perspective_shadow::perspective_box::DEFAULT_DEPTH_FACTOR;
use perspective_shadow::scene_canvas::SceneCanvas;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use anyhow::Result;

#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(long, default_value_t = 1024.0)]
    width: f32,
    #[arg(long, default_value_t = 768.0)]
    height: f32,
    /// Fraction of the way each back vertex is pulled towards the vanishing point
    #[arg(short, long, default_value_t = DEFAULT_DEPTH_FACTOR)]
    depth: f32,
    /// Draw the vanishing point rays on through the vanishing point
    #[arg(long)]
    extend_vanishing_rays: bool,
}

impl Cli {
    fn settings(&self) -> Result<SceneSettings> {
        anyhow::ensure!(
            (0.0..1.0).contains(&self.depth),
            "depth factor must lie in [0, 1), got {}",
            self.depth
        );
        anyhow::ensure!(
            self.width > 0.0 && self.height > 0.0,
            "window size must be positive, got {}x{}",
            self.width,
            self.height
        );
        let vanishing_rays = if self.extend_vanishing_rays {
            VanishingRays::ExtendBeyondVanishingPoint
        } else {
            VanishingRays::StopAtVanishingPoint
        };
        Ok(SceneSettings {
            depth_factor: self.depth,
            vanishing_rays,
        })
    }
}

pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Cli::parse();
    let settings = args.settings()?;
    let window_size = Size::new(args.width, args.height);
    info!("starting with {:?} in a {}x{} window", settings, args.width, args.height);

    iced::application(
        move || PerspectiveShadow::new(window_size, settings),
        PerspectiveShadow::update,
        PerspectiveShadow::view,
    )
    .theme(PerspectiveShadow::theme)
    .antialiasing(true)
    .centered()
    .window_size(window_size)
    .subscription(|_state| {
        keyboard::listen().filter_map(|event| {
            let keyboard::Event::KeyReleased {
                key,
                modifiers: _modifiers,
                ..
            } = event
            else {
                return None;
            };

            let keyboard::Key::Character(c) = key else {
                return None;
            };

            match c.as_str() {
                "r" => Some(Message::Reset),
                _ => None,
            }
        })
    })
    .run()?;
    Ok(())
}

#[derive(Debug, Clone)]
enum Message {
    ControlPointsChanged(ControlPoints),
    Reset,
}

struct PerspectiveShadow {
    control_points: ControlPoints,
    initial_control_points: ControlPoints,
    settings: SceneSettings,
}

impl PerspectiveShadow {
    fn new(window_size: Size, settings: SceneSettings) -> (Self, Task<Message>) {
        let control_points = ControlPoints::for_viewport(window_size.width, window_size.height);
        (
            Self {
                control_points,
                initial_control_points: control_points,
                settings,
            },
            Task::none(),
        )
    }

    fn update(&mut self, message: Message) {
        match message {
            Message::ControlPointsChanged(control_points) => {
                self.control_points = control_points;
            }
            Message::Reset => {
                debug!("reset control points");
                self.control_points = self.initial_control_points;
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        SceneCanvas::new(
            self.control_points,
            self.settings,
            Message::ControlPointsChanged,
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }
}
