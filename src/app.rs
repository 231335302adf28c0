//! The controller: owns the workouts, the form and the map, and reacts to
//! map clicks, type changes and form submission.

use crate::alert::Notifier;
use crate::config::MapConfig;
use crate::dlog;
use crate::form::{Field, Form};
use crate::geolocation::{Geolocation, Position};
use crate::map::{MapView, google_maps_link};
use crate::types::{Activity, Coords, Workout, WorkoutType};
use crate::utils::format_number;
use crate::validate::{ValidationError, check_cycling, check_running};

pub const POSITION_ALERT: &str = "Could not get your position";
pub const POPUP_CONTENT: &str = "Workout";

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AppState {
    /// Waiting for a click on the map.
    #[default]
    Idle,
    /// Form shown for a workout at `click`.
    FormOpen { click: Coords },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Added(String),
    Rejected(ValidationError),
    /// Submitted with no map click pending.
    Ignored,
}

pub struct App<M: MapView, N: Notifier> {
    map: M,
    map_ready: bool,
    notifier: N,
    config: MapConfig,
    form: Form,
    state: AppState,
    workouts: Vec<Workout>,
}

impl<M: MapView, N: Notifier> App<M, N> {
    pub fn new(map: M, notifier: N, config: MapConfig) -> Self {
        Self {
            map,
            map_ready: false,
            notifier,
            config,
            form: Form::new(),
            state: AppState::Idle,
            workouts: Vec::new(),
        }
    }

    /// Ask for the current position once and load the map around it.
    ///
    /// `None` means no geolocation support at all, which is silently skipped.
    pub fn start(&mut self, geolocation: Option<&mut dyn Geolocation>) {
        let Some(geo) = geolocation else {
            dlog!("geolocation unsupported; map not loaded");
            return;
        };
        match geo.current_position() {
            Ok(position) => self.load_map(position),
            Err(e) => {
                dlog!("geolocation_failed err={e}");
                self.notifier.alert(POSITION_ALERT);
            }
        }
    }

    pub fn load_map(&mut self, position: Position) {
        let center = Coords::from(position);
        dlog!("{}", google_maps_link(center));

        self.map.create_map(center, self.config.zoom);
        self.map.add_tile_layer(&self.config.tiles);
        self.map_ready = true;
        tracing::info!(lat = center.lat, lng = center.lng, "map loaded");
    }

    /// Map click handler.
    pub fn show_form(&mut self, click: Coords) {
        if !self.map_ready {
            tracing::warn!(lat = click.lat, lng = click.lng, "click before map loaded; ignored");
            return;
        }
        self.state = AppState::FormOpen { click };
        self.form.show();
        dlog!("form_open lat={} lng={}", click.lat, click.lng);
    }

    /// Type select change handler.
    pub fn change_type(&mut self, kind: WorkoutType) {
        self.form.set_type(kind);
    }

    /// Form submit handler.
    ///
    /// Invalid input raises the alert and leaves everything as it was; the
    /// error never escapes as `Err`.
    pub fn new_workout(&mut self) -> SubmitOutcome {
        let AppState::FormOpen { click } = self.state else {
            tracing::warn!("submit without a map click; ignored");
            return SubmitOutcome::Ignored;
        };

        let distance = self.form.number(Field::Distance);
        let duration = self.form.number(Field::Duration);

        let built = match self.form.kind() {
            WorkoutType::Running => {
                let cadence = self.form.number(Field::Cadence);
                check_running(distance, duration, cadence)
                    .map(|()| Workout::running(click, duration, distance, cadence))
            }
            WorkoutType::Cycling => {
                let elevation = self.form.number(Field::Elevation);
                check_cycling(distance, duration, elevation)
                    .map(|()| Workout::cycling(click, duration, distance, elevation))
            }
        };

        let workout = match built {
            Ok(w) => w,
            Err(e) => {
                dlog!("invalid_input kind={} err={e:?}", self.form.kind());
                self.notifier.alert(&e.to_string());
                return SubmitOutcome::Rejected(e);
            }
        };

        let id = workout.id().to_string();
        tracing::info!(
            id = %id,
            kind = %workout.kind(),
            distance = workout.distance(),
            duration = workout.duration(),
            "workout added"
        );
        self.workouts.push(workout);

        self.form.clear_inputs();
        self.form.hide();
        self.state = AppState::Idle;

        self.render_workout_marker(click);

        SubmitOutcome::Added(id)
    }

    fn render_workout_marker(&mut self, at: Coords) {
        let marker = self.map.add_marker(at);
        self.map.bind_popup(marker, &self.config.popup, POPUP_CONTENT);
        self.map.open_popup(marker);
    }

    /// One line per workout, oldest first.
    pub fn render_workout_list(&self) -> Vec<String> {
        self.workouts.iter().map(render_workout_line).collect()
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub const fn state(&self) -> AppState {
        self.state
    }

    pub const fn form(&self) -> &Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    pub const fn map(&self) -> &M {
        &self.map
    }

    pub const fn is_map_ready(&self) -> bool {
        self.map_ready
    }

    pub const fn notifier(&self) -> &N {
        &self.notifier
    }
}

fn render_workout_line(w: &Workout) -> String {
    let head = format!(
        "{}\t{}\t{} km\t{} min",
        w.id(),
        w.description(),
        format_number(w.distance()),
        format_number(w.duration()),
    );
    match *w.activity() {
        Activity::Running { cadence, pace } => format!(
            "{head}\t{} min/km\t{} spm",
            format_number(pace),
            format_number(cadence)
        ),
        Activity::Cycling {
            elevation_gain,
            speed,
        } => format!(
            "{head}\t{} km/h\t{} m",
            format_number(speed),
            format_number(elevation_gain)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geolocation::{FixedPosition, GeolocationError};
    use crate::map::TerminalMap;

    #[derive(Default)]
    struct Alerts(Vec<String>);

    impl Notifier for Alerts {
        fn alert(&mut self, message: &str) {
            self.0.push(message.to_string());
        }
    }

    struct Denied;

    impl Geolocation for Denied {
        fn current_position(&mut self) -> Result<Position, GeolocationError> {
            Err(GeolocationError::Unavailable)
        }
    }

    fn loaded_app() -> App<TerminalMap, Alerts> {
        let mut app = App::new(TerminalMap::new(), Alerts::default(), MapConfig::default());
        let mut geo = FixedPosition::from_args(Some(38.72), Some(-9.14));
        app.start(Some(&mut geo));
        app
    }

    fn fill(app: &mut App<TerminalMap, Alerts>, values: &[(Field, &str)]) {
        for (field, value) in values {
            app.form_mut().set(*field, *value);
        }
    }

    #[test]
    fn start_loads_map_at_configured_zoom() {
        let app = loaded_app();
        assert!(app.is_map_ready());
        assert_eq!(app.map().view(), Some((Coords::new(38.72, -9.14), 15)));
        assert!(app.map().tiles().is_some());
        assert!(app.notifier().0.is_empty());
    }

    #[test]
    fn failed_geolocation_alerts_and_leaves_map_unloaded() {
        let mut app = App::new(TerminalMap::new(), Alerts::default(), MapConfig::default());
        app.start(Some(&mut Denied));
        assert!(!app.is_map_ready());
        assert_eq!(app.notifier().0, vec![POSITION_ALERT.to_string()]);
    }

    #[test]
    fn unsupported_geolocation_is_silent() {
        let mut app = App::new(TerminalMap::new(), Alerts::default(), MapConfig::default());
        app.start(None);
        assert!(!app.is_map_ready());
        assert!(app.notifier().0.is_empty());
    }

    #[test]
    fn click_opens_form() {
        let mut app = loaded_app();
        app.show_form(Coords::new(38.7, -9.1));
        assert_eq!(
            app.state(),
            AppState::FormOpen {
                click: Coords::new(38.7, -9.1)
            }
        );
        assert!(!app.form().is_hidden());
        assert_eq!(app.form().focused(), Some(Field::Distance));
    }

    #[test]
    fn type_changes_keep_rows_matching_the_type() {
        let mut app = loaded_app();
        app.show_form(Coords::new(38.7, -9.1));
        for kind in [
            WorkoutType::Cycling,
            WorkoutType::Cycling,
            WorkoutType::Running,
            WorkoutType::Running,
            WorkoutType::Cycling,
        ] {
            app.change_type(kind);
            let form = app.form();
            assert_eq!(form.kind(), kind);
            let running = kind == WorkoutType::Running;
            assert_eq!(form.is_row_hidden(Field::Cadence), !running);
            assert_eq!(form.is_row_hidden(Field::Elevation), running);
        }
    }

    #[test]
    fn empty_elevation_rejects_cycling() {
        let mut app = loaded_app();
        app.show_form(Coords::new(38.7, -9.1));
        app.change_type(WorkoutType::Cycling);
        fill(&mut app, &[(Field::Distance, "20"), (Field::Duration, "60")]);

        assert_eq!(
            app.new_workout(),
            SubmitOutcome::Rejected(ValidationError::NotFinite(WorkoutType::Cycling))
        );
        assert!(app.workouts().is_empty());
    }

    #[test]
    fn click_before_map_is_ignored() {
        let mut app = App::new(TerminalMap::new(), Alerts::default(), MapConfig::default());
        app.show_form(Coords::new(1.0, 1.0));
        assert_eq!(app.state(), AppState::Idle);
        assert!(app.form().is_hidden());
    }

    #[test]
    fn valid_running_submission_appends_and_renders() {
        let mut app = loaded_app();
        let click = Coords::new(38.71, -9.13);
        app.show_form(click);
        fill(
            &mut app,
            &[
                (Field::Distance, "2"),
                (Field::Duration, "10"),
                (Field::Cadence, "170"),
            ],
        );

        let outcome = app.new_workout();
        assert!(matches!(outcome, SubmitOutcome::Added(_)));
        assert_eq!(app.workouts().len(), 1);
        assert_eq!(app.workouts()[0].pace(), Some(5.0));
        assert_eq!(app.workouts()[0].coords(), click);

        assert_eq!(app.state(), AppState::Idle);
        assert!(app.form().is_hidden());
        assert_eq!(app.form().raw(Field::Distance), "");
        assert_eq!(app.form().raw(Field::Cadence), "");

        let marker = &app.map().markers()[0];
        assert_eq!(marker.at, click);
        assert!(marker.open);
        let (options, content) = marker.popup.as_ref().unwrap();
        assert_eq!(content, POPUP_CONTENT);
        assert_eq!(options.max_width, 250);
        assert_eq!(options.min_width, 100);
        assert!(!options.auto_close);
        assert!(!options.close_on_click);
    }

    #[test]
    fn valid_cycling_submission_is_appended_too() {
        let mut app = loaded_app();
        app.show_form(Coords::new(38.7, -9.1));
        app.change_type(WorkoutType::Cycling);
        fill(
            &mut app,
            &[
                (Field::Distance, "20"),
                (Field::Duration, "2"),
                (Field::Elevation, "0"),
            ],
        );

        assert!(matches!(app.new_workout(), SubmitOutcome::Added(_)));
        assert_eq!(app.workouts()[0].speed(), Some(10.0));
        assert_eq!(app.map().markers().len(), 1);
    }

    #[test]
    fn negative_distance_is_rejected_with_alert() {
        let mut app = loaded_app();
        app.show_form(Coords::new(38.7, -9.1));
        fill(
            &mut app,
            &[
                (Field::Distance, "-1"),
                (Field::Duration, "10"),
                (Field::Cadence, "170"),
            ],
        );

        let outcome = app.new_workout();
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected(ValidationError::NotPositive(WorkoutType::Running))
        );
        assert!(app.workouts().is_empty());
        assert!(app.map().markers().is_empty());
        assert_eq!(
            app.notifier().0,
            vec!["Inputs have to be positive numbers".to_string()]
        );
        // form stays open with the input intact
        assert!(matches!(app.state(), AppState::FormOpen { .. }));
        assert_eq!(app.form().raw(Field::Distance), "-1");
    }

    #[test]
    fn empty_duration_is_rejected() {
        let mut app = loaded_app();
        app.show_form(Coords::new(38.7, -9.1));
        app.change_type(WorkoutType::Cycling);
        fill(&mut app, &[(Field::Distance, "12"), (Field::Elevation, "50")]);

        assert_eq!(
            app.new_workout(),
            SubmitOutcome::Rejected(ValidationError::NotFinite(WorkoutType::Cycling))
        );
        assert!(app.workouts().is_empty());
        assert_eq!(app.notifier().0.len(), 1);
    }

    #[test]
    fn submit_without_click_is_ignored() {
        let mut app = loaded_app();
        fill(&mut app, &[(Field::Distance, "2"), (Field::Duration, "10")]);
        assert_eq!(app.new_workout(), SubmitOutcome::Ignored);
        assert!(app.notifier().0.is_empty());
    }

    #[test]
    fn workout_list_renders_metric_per_type() {
        let mut app = loaded_app();
        app.show_form(Coords::new(38.7, -9.1));
        fill(
            &mut app,
            &[
                (Field::Distance, "2"),
                (Field::Duration, "10"),
                (Field::Cadence, "170"),
            ],
        );
        app.new_workout();

        app.show_form(Coords::new(38.8, -9.2));
        app.change_type(WorkoutType::Cycling);
        fill(
            &mut app,
            &[
                (Field::Distance, "20"),
                (Field::Duration, "2"),
                (Field::Elevation, "300"),
            ],
        );
        app.new_workout();

        let lines = app.render_workout_list();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Running on "));
        assert!(lines[0].ends_with("5 min/km\t170 spm"));
        assert!(lines[1].contains("Cycling on "));
        assert!(lines[1].ends_with("10 km/h\t300 m"));
    }
}
