//! Step-by-step navigation over a planned route.
//!
//! Transitions are pure: `start` and `advance` return the instruction text
//! for the state they enter, and the caller decides what to do with it.
//! The `*_narrated` variants forward that text to a [`NarrationSink`],
//! exactly once per call, so the state machine stays testable without any
//! speech side effects.

use crate::geo;
use crate::model::{Coordinate, DirectionStep, Route};
use crate::traits::NarrationSink;

/// Fixed line narrated when the last step is passed.
pub const ARRIVAL_NARRATION: &str = "You have arrived at your destination!";

/// Navigation progress through a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    NotStarted,
    InProgress(usize),
    Completed,
}

/// Walks a route forward one step at a time.
///
/// Without external steps, the walk covers start, each stop, then the end,
/// with instructions derived from straight-line legs. When an external
/// directions provider supplied steps, the session walks that list instead
/// and strips any markup from the instruction text.
#[derive(Debug, Clone)]
pub struct NavigationSession {
    route: Route,
    external_steps: Option<Vec<DirectionStep>>,
    state: NavState,
    speed_mph: f64,
}

impl NavigationSession {
    pub fn new(route: Route) -> Self {
        Self {
            route,
            external_steps: None,
            state: NavState::NotStarted,
            speed_mph: geo::DEFAULT_SPEED_MPH,
        }
    }

    /// Walks an externally supplied step list instead of deriving
    /// instructions from the route's waypoints.
    pub fn with_external_steps(mut self, steps: Vec<DirectionStep>) -> Self {
        self.external_steps = Some(steps);
        self
    }

    /// Overrides the assumed travel speed used in derived leg labels.
    pub fn with_speed_mph(mut self, speed_mph: f64) -> Self {
        self.speed_mph = speed_mph;
        self
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Number of steps: the external list length when present, otherwise
    /// start + each stop + end.
    pub fn step_count(&self) -> usize {
        match &self.external_steps {
            Some(steps) => steps.len(),
            None => 2 + self.route.stops.len(),
        }
    }

    /// `NotStarted -> InProgress(0)`, returning the first instruction.
    /// A no-op in any other state.
    pub fn start(&mut self) -> Option<String> {
        match self.state {
            NavState::NotStarted => {
                self.state = NavState::InProgress(0);
                Some(self.instruction_at(0))
            }
            _ => None,
        }
    }

    /// `InProgress(i) -> InProgress(i+1)` while steps remain, returning the
    /// entered step's instruction; past the last step the session becomes
    /// `Completed` and returns the fixed arrival line. Total: a no-op in
    /// `NotStarted` and `Completed`.
    pub fn advance(&mut self) -> Option<String> {
        match self.state {
            NavState::InProgress(i) if i + 1 < self.step_count() => {
                self.state = NavState::InProgress(i + 1);
                Some(self.instruction_at(i + 1))
            }
            NavState::InProgress(_) => {
                self.state = NavState::Completed;
                Some(ARRIVAL_NARRATION.to_string())
            }
            _ => None,
        }
    }

    /// Returns to `NotStarted` from any state, keeping the route. Nothing
    /// remains scheduled against a later session.
    pub fn stop(&mut self) {
        self.state = NavState::NotStarted;
    }

    /// [`NavigationSession::start`], forwarding the instruction to `sink`.
    pub fn start_narrated<N: NarrationSink>(&mut self, sink: &mut N) -> Option<String> {
        let text = self.start()?;
        sink.speak(&text);
        Some(text)
    }

    /// [`NavigationSession::advance`], forwarding the instruction to `sink`.
    pub fn advance_narrated<N: NarrationSink>(&mut self, sink: &mut N) -> Option<String> {
        let text = self.advance()?;
        sink.speak(&text);
        Some(text)
    }

    /// Instruction for `index`. Total over any input: a missing step or
    /// waypoint degrades to an empty string rather than failing the
    /// session.
    fn instruction_at(&self, index: usize) -> String {
        if let Some(steps) = &self.external_steps {
            return steps
                .get(index)
                .map(|s| strip_markup(&s.instruction))
                .unwrap_or_default();
        }
        derive_instruction(&self.route, index, self.speed_mph)
    }
}

/// Name and coordinate of waypoint `index`: 0 is the start, the last is the
/// end, everything between is a stop.
fn waypoint(route: &Route, index: usize) -> Option<(&str, Coordinate)> {
    let last = route.stops.len() + 1;
    if index == 0 {
        Some((route.start.name.as_str(), route.start.location))
    } else if index == last {
        Some((route.end.name.as_str(), route.end.location))
    } else {
        route
            .stops
            .get(index - 1)
            .map(|s| (s.name.as_str(), s.location))
    }
}

fn derive_instruction(route: &Route, index: usize, speed_mph: f64) -> String {
    let last = route.stops.len() + 1;
    match index {
        0 => match waypoint(route, 1) {
            Some((name, to)) => {
                let eta = leg_label(route.start.location, to, speed_mph);
                if route.stops.is_empty() {
                    format!("Head toward your destination: {name} {eta}")
                } else {
                    format!("Head toward bathroom: {name} {eta}")
                }
            }
            None => String::new(),
        },
        i if i == last => match waypoint(route, i - 1) {
            Some((_, from)) => {
                let eta = leg_label(from, route.end.location, speed_mph);
                format!("Arrive at destination: {} {eta}", route.end.name)
            }
            None => String::new(),
        },
        i => match (waypoint(route, i - 1), waypoint(route, i)) {
            (Some((_, from)), Some((name, to))) => {
                let eta = leg_label(from, to, speed_mph);
                format!("Stop at bathroom: {name} {eta}")
            }
            _ => String::new(),
        },
    }
}

/// Leg label like `(0.66 mi, ETA: 1 min)`, or `(72.41 mi, ETA: 1h 19m)`
/// once the leg runs an hour or more.
fn leg_label(from: Coordinate, to: Coordinate, speed_mph: f64) -> String {
    let miles = geo::meters_to_miles(geo::haversine_meters(from, to));
    let minutes = geo::estimate_travel_minutes(miles, speed_mph);
    if minutes >= 60 {
        format!("({miles:.2} mi, ETA: {}h {}m)", minutes / 60, minutes % 60)
    } else {
        format!("({miles:.2} mi, ETA: {minutes} min)")
    }
}

/// Drops HTML tags, unescapes the entities directions providers emit, and
/// collapses whitespace, leaving plain narratable text.
pub fn strip_markup(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    text = text
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
