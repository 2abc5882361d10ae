use std::path::PathBuf;

use cuber_core::{Cube, DEFAULT_ORDER, GroupId};
use cuber_prefs::Preferences;
use cuber_view::{DragState, GestureResolver, PerspectiveCamera, PointerAction, PointerEvent};
use eyre::{Context, Result};
use itertools::Itertools;
use serde::Serialize;
use web_time::{Duration, Instant};

/// NxNxN twisty cube simulator
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    /// Preferences file to load on top of the defaults.
    #[arg(long, global = true)]
    pub prefs: Option<PathBuf>,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Print every twistable group with its notation as JSON.
    Groups {
        /// Number of layers along each axis.
        #[arg(short, long, default_value_t = DEFAULT_ORDER)]
        order: u16,
    },
    /// Print the group named by each notation token as JSON.
    Resolve {
        /// Number of layers along each axis.
        #[arg(short, long, default_value_t = DEFAULT_ORDER)]
        order: u16,
        /// Notation tokens (such as `R`, `2-3Rw`, or `x:1:2`).
        #[arg(required = true, allow_hyphen_values = true)]
        tokens: Vec<String>,
    },
    /// Apply a move sequence and print the resulting state as JSON.
    Play {
        /// Number of layers along each axis.
        #[arg(short, long, default_value_t = DEFAULT_ORDER)]
        order: u16,
        /// Move sequence (such as `R U R' U'`). `#` resets the cube.
        #[arg(required = true, allow_hyphen_values = true)]
        sequence: Vec<String>,
    },
    /// Simulate a pointer drag across the default view of the cube and print
    /// the resulting twist as JSON.
    Drag {
        /// Number of layers along each axis.
        #[arg(short, long, default_value_t = DEFAULT_ORDER)]
        order: u16,
        /// Width of the view in pixels.
        #[arg(long, default_value_t = 800)]
        width: u32,
        /// Height of the view in pixels.
        #[arg(long, default_value_t = 600)]
        height: u32,
        /// Duration of the drag in milliseconds.
        #[arg(long, default_value_t = 500)]
        millis: u64,

        /// X coordinate where the drag starts, in pixels from the left.
        x0: f32,
        /// Y coordinate where the drag starts, in pixels from the top.
        y0: f32,
        /// X coordinate where the drag ends.
        x1: f32,
        /// Y coordinate where the drag ends.
        y1: f32,
    },
    /// Print the effective preferences as YAML.
    Prefs {
        /// Also save them to a file.
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

pub(crate) fn exec(args: Args) -> Result<()> {
    let prefs = Preferences::load(args.prefs.as_deref());

    match args.subcommand {
        Subcommand::Groups { order } => {
            let cube = new_cube(order, &prefs)?;
            let groups = cube
                .groups()
                .iter()
                .map(|(id, _)| GroupInfo::new(&cube, id))
                .collect_vec();
            write_json_output(&groups)
        }

        Subcommand::Resolve { order, tokens } => {
            let cube = new_cube(order, &prefs)?;
            let resolved = tokens
                .into_iter()
                .map(|token| Resolution {
                    group: cube.get(&token).map(|id| GroupInfo::new(&cube, id)),
                    token,
                })
                .collect_vec();
            write_json_output(&resolved)
        }

        Subcommand::Play { order, sequence } => {
            let mut cube = new_cube(order, &prefs)?;
            cube.apply_sequence(&sequence.join(" "))?;
            write_json_output(&PlayReport::new(&cube))
        }

        Subcommand::Drag {
            order,
            width,
            height,
            millis,
            x0,
            y0,
            x1,
            y1,
        } => {
            let mut cube = new_cube(order, &prefs)?;
            let camera = PerspectiveCamera::new([width, height]);
            let mut resolver = GestureResolver::new(prefs.interaction.clone());
            let report = simulate_drag(
                &mut cube,
                &mut resolver,
                &camera,
                [x0, y0],
                [x1, y1],
                Duration::from_millis(millis),
            );
            write_json_output(&report)
        }

        Subcommand::Prefs { save } => {
            print!("{}", prefs.to_yaml()?);
            if let Some(path) = save {
                prefs
                    .save(&path)
                    .wrap_err_with(|| format!("error saving preferences to {}", path.display()))?;
            }
            Ok(())
        }
    }
}

fn new_cube(order: u16, prefs: &Preferences) -> Result<Cube> {
    let mut cube = Cube::new(order)?;
    cube.set_animation_prefs(prefs.animation.clone());
    Ok(cube)
}

#[derive(Serialize, Debug, Clone, PartialEq)]
struct GroupInfo {
    key: String,
    notation: String,
    slots: Vec<usize>,
}
impl GroupInfo {
    fn new(cube: &Cube, id: GroupId) -> Self {
        let group = cube.group(id);
        Self {
            key: group.key().to_string(),
            notation: group.action(cube.order(), false, 1).to_string(),
            slots: group.indices().to_vec(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
struct Resolution {
    token: String,
    group: Option<GroupInfo>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
struct PlayReport {
    log: String,
    twists: usize,
    solved: bool,
    /// Cubelet in each slot.
    slots: Vec<usize>,
}
impl PlayReport {
    fn new(cube: &Cube) -> Self {
        Self {
            log: cube.log().to_string(),
            twists: cube.log().len(),
            solved: cube.is_solved(),
            slots: (0..cube.cubelets().len())
                .filter_map(|i| Some(cube.slot(i)?.id().0))
                .collect(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
struct DragReport {
    group: Option<String>,
    action: Option<String>,
    solved: bool,
}

fn simulate_drag(
    cube: &mut Cube,
    resolver: &mut GestureResolver,
    camera: &PerspectiveCamera,
    [x0, y0]: [f32; 2],
    [x1, y1]: [f32; 2],
    duration: Duration,
) -> DragReport {
    let t0 = Instant::now();
    let events = [
        (PointerAction::MouseDown, x0, y0, t0),
        (PointerAction::MouseMove, x1, y1, t0 + duration),
    ];
    for (action, x, y, time) in events {
        resolver.touch_at(cube, camera, PointerEvent::new(action, x, y), time);
    }
    let group = match resolver.state() {
        Some(DragState::Rotating { group: Some(id) }) => Some(cube.group(id).key().to_string()),
        _ => None,
    };
    let up = PointerEvent::new(PointerAction::MouseUp, x1, y1);
    resolver.touch_at(cube, camera, up, t0 + duration);
    cube.finish();
    log::debug!("drag turned {group:?}");

    DragReport {
        group,
        action: cube.log().last().map(|action| action.to_string()),
        solved: cube.is_solved(),
    }
}

fn write_json_output<T: Serialize>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), value)
        .context("error serializing data and writing to stdout")?;
    println!();
    Ok(())
}
