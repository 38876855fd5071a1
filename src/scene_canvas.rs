use std::cell::RefCell;

use iced::{
    Element,
    Length::{self},
    Point, Rectangle, Size, Vector,
    advanced::{
        Clipboard, Layout, Shell, Widget,
        graphics::geometry::{self},
        layout, mouse,
        renderer::Style,
        widget::{
            Tree,
            tree::{self},
        },
    },
    event::Status,
    keyboard::{self, Key, key::Named},
    widget::canvas::{self, Event, Fill, Stroke},
};
use nalgebra::Point2;
use tracing::{trace, warn};

use crate::{
    config::{Config, SceneSettings},
    control_points::{ControlPointKind, ControlPoints},
    scene::{FillStyle, Painter, Scene, StrokeStyle, paint_control_points},
    utils::{fill_color, from_canvas, stroke_color, to_canvas},
};

struct FramePainter<'f, Renderer>
where
    Renderer: geometry::Renderer,
{
    frame: &'f mut geometry::Frame<Renderer>,
}

impl<Renderer> FramePainter<'_, Renderer>
where
    Renderer: geometry::Renderer,
{
    fn fill_path(&mut self, path: &canvas::Path, style: FillStyle) {
        self.frame.fill(
            path,
            Fill {
                style: canvas::Style::Solid(fill_color(style)),
                ..Fill::default()
            },
        );
    }

    fn stroke_path(&mut self, path: &canvas::Path, style: StrokeStyle, width: f32) {
        self.frame.stroke(
            path,
            Stroke {
                style: canvas::Style::Solid(stroke_color(style)),
                width,
                ..Stroke::default()
            },
        );
    }
}

impl<Renderer> Painter for FramePainter<'_, Renderer>
where
    Renderer: geometry::Renderer,
{
    fn clear(&mut self, width: f32, height: f32) {
        self.frame.fill_rectangle(
            Point::ORIGIN,
            Size::new(width, height),
            Fill {
                style: canvas::Style::Solid(fill_color(FillStyle::Background)),
                ..Fill::default()
            },
        );
    }

    fn stroke_line(&mut self, from: Point2<f32>, to: Point2<f32>, style: StrokeStyle, width: f32) {
        let mut builder = canvas::path::Builder::new();
        builder.move_to(to_canvas(&from));
        builder.line_to(to_canvas(&to));
        let path = builder.build();
        self.stroke_path(&path, style, width);
    }

    fn fill_polygon(&mut self, vertices: &[Point2<f32>], style: FillStyle) {
        let Some((first, rest)) = vertices.split_first() else {
            return;
        };
        let mut builder = canvas::path::Builder::new();
        builder.move_to(to_canvas(first));
        for vertex in rest {
            builder.line_to(to_canvas(vertex));
        }
        builder.close();
        let path = builder.build();
        self.fill_path(&path, style);
    }

    fn fill_circle(&mut self, center: Point2<f32>, radius: f32, style: FillStyle) {
        let mut builder = canvas::path::Builder::new();
        builder.circle(to_canvas(&center), radius);
        let path = builder.build();
        self.fill_path(&path, style);
    }

    fn stroke_circle(&mut self, center: Point2<f32>, radius: f32, style: StrokeStyle, width: f32) {
        let mut builder = canvas::path::Builder::new();
        builder.circle(to_canvas(&center), radius);
        let path = builder.build();
        self.stroke_path(&path, style, width);
    }
}

/// Interactive canvas for the box and its shadow. Every pointer event turns
/// the current [`ControlPoints`] into a new value that is published through
/// `on_change`.
pub struct SceneCanvas<'a, Message, Renderer = iced::Renderer>
where
    Renderer: geometry::Renderer,
{
    width: Length,
    height: Length,
    scene_cache: geometry::Cache<Renderer>,
    control_points_cache: geometry::Cache<Renderer>,

    control_points: ControlPoints,
    settings: SceneSettings,
    on_change: Box<dyn Fn(ControlPoints) -> Message + 'a>,
}
impl<'a, M, Renderer> SceneCanvas<'a, M, Renderer>
where
    Renderer: geometry::Renderer,
{
    const DEFAULT_SIZE: f32 = 100.0;
    pub fn new(
        control_points: ControlPoints,
        settings: SceneSettings,
        on_change: impl Fn(ControlPoints) -> M + 'a,
    ) -> Self {
        SceneCanvas {
            width: Length::Fixed(Self::DEFAULT_SIZE),
            height: Length::Fixed(Self::DEFAULT_SIZE),
            scene_cache: geometry::Cache::default(),
            control_points_cache: geometry::Cache::default(),
            control_points,
            settings,
            on_change: Box::new(on_change),
        }
    }
    pub fn width(mut self, width: impl Into<Length>) -> Self {
        self.width = width.into();
        self
    }

    /// Sets the height of the [`SceneCanvas`].
    pub fn height(mut self, height: impl Into<Length>) -> Self {
        self.height = height.into();
        self
    }

    fn update_inner(
        &self,
        state: &mut State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (Status, Option<ControlPoints>) {
        let grasped = self.control_points.selected().is_some();
        let point = cursor
            .position()
            .map(|position| from_canvas(position, bounds.position()));
        match (event, point) {
            // a release outside the window arrives with no cursor position
            (
                Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left))
                | Event::Keyboard(keyboard::Event::KeyPressed {
                    key: Key::Named(Named::Escape),
                    ..
                }),
                _,
            ) if grasped => (Status::Captured, Some(self.control_points.deselect())),

            (Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)), Some(point)) => {
                if !cursor.is_over(bounds) {
                    return (Status::Ignored, None);
                }
                let next = self.control_points.select(point);
                if next == self.control_points {
                    (Status::Ignored, None)
                } else {
                    (Status::Captured, Some(next))
                }
            }

            (Event::Mouse(mouse::Event::CursorMoved { position: _ }), Some(point)) => {
                let hovered = self.control_points.hit(&point).map(|item| item.kind());
                let hover_changed = hovered != state.hovered;
                state.hovered = hovered;
                if grasped {
                    (Status::Captured, Some(self.control_points.move_to(point)))
                } else if hover_changed {
                    (Status::Captured, None)
                } else {
                    (Status::Ignored, None)
                }
            }

            (Event::Mouse(mouse::Event::CursorLeft), _) if state.hovered.is_some() => {
                state.hovered = None;
                (Status::Captured, None)
            }

            _ => (Status::Ignored, None),
        }
    }

    fn draw_inner(
        &self,
        state: &State,
        renderer: &Renderer,
        bounds: Rectangle,
    ) -> Vec<Renderer::Geometry> {
        let config = Config::new(
            bounds.width,
            bounds.height,
            &self.control_points,
            &self.settings,
        );
        match Scene::compose(&config) {
            Ok(scene) => {
                state.last_scene.replace(Some(scene));
            }
            Err(error) => {
                warn!("keeping previous frame: {error}");
            }
        }

        let scene = self.scene_cache.draw(renderer, bounds.size(), |frame| {
            if let Some(scene) = state.last_scene.borrow().as_ref() {
                scene.paint(&mut FramePainter { frame });
            }
        });

        let control_points = self
            .control_points_cache
            .draw(renderer, bounds.size(), |frame| {
                paint_control_points(
                    &self.control_points,
                    state.hovered,
                    &mut FramePainter { frame },
                );
            });

        vec![scene, control_points]
    }
}

impl<Message, Theme, Renderer> Widget<Message, Theme, Renderer>
    for SceneCanvas<'_, Message, Renderer>
where
    Renderer: geometry::Renderer,
{
    fn tag(&self) -> tree::Tag {
        struct Tag<T>(T);
        tree::Tag::of::<Tag<State>>()
    }

    fn state(&self) -> tree::State {
        tree::State::new(State::default())
    }

    fn size(&self) -> Size<Length> {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    fn layout(
        &mut self,
        _tree: &mut Tree,
        _renderer: &Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        layout::atomic(limits, self.width, self.height)
    }

    fn update(
        &mut self,
        tree: &mut Tree,
        event: &Event,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        _renderer: &Renderer,
        _clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Message>,
        _viewport: &Rectangle,
    ) {
        let bounds = layout.bounds();

        let state = tree.state.downcast_mut::<State>();

        let (event_status, control_points) = self.update_inner(state, event, bounds, cursor);
        if let Some(control_points) = control_points {
            trace!("control points {:?}", control_points.selected());
            self.control_points = control_points;
            self.scene_cache.clear();
            shell.publish((self.on_change)(control_points));
        }
        if let Status::Captured = event_status {
            self.control_points_cache.clear();
            shell.capture_event();
            shell.request_redraw();
        }
    }

    fn mouse_interaction(
        &self,
        tree: &Tree,
        _layout: Layout<'_>,
        _cursor: mouse::Cursor,
        _viewport: &Rectangle,
        _renderer: &Renderer,
    ) -> mouse::Interaction {
        let state = tree.state.downcast_ref::<State>();
        if self.control_points.selected().is_some() {
            mouse::Interaction::Grabbing
        } else if state.hovered.is_some() {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::default()
        }
    }

    fn draw(
        &self,
        tree: &Tree,
        renderer: &mut Renderer,
        _theme: &Theme,
        _style: &Style,
        layout: Layout<'_>,
        _cursor: mouse::Cursor,
        _viewport: &Rectangle,
    ) {
        let bounds = layout.bounds();

        if bounds.width < 1.0 || bounds.height < 1.0 {
            return;
        }
        let state = tree.state.downcast_ref::<State>();

        renderer.with_translation(Vector::new(bounds.x, bounds.y), |renderer| {
            let layers = self.draw_inner(state, renderer, bounds);

            for layer in layers {
                renderer.draw_geometry(layer);
            }
        });
    }
}

#[derive(Default, Clone)]
pub struct State {
    pub hovered: Option<ControlPointKind>,
    /// Last scene that composed without error; drawn again when the current
    /// configuration is degenerate.
    pub last_scene: RefCell<Option<Scene>>,
}

impl<'a, Message, Theme, Renderer> From<SceneCanvas<'a, Message, Renderer>>
    for Element<'a, Message, Theme, Renderer>
where
    Message: 'a,
    Theme: 'a,
    Renderer: 'a + geometry::Renderer,
{
    fn from(
        scene_canvas: SceneCanvas<'a, Message, Renderer>,
    ) -> Element<'a, Message, Theme, Renderer> {
        Element::new(scene_canvas)
    }
}
