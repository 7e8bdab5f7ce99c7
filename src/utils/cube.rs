//! The cube engine: 27 cubelets, slice selection, the single-flight turn
//! animator with its move queue, and the solved check.
//!
//! The engine is a plain value (`CubeSim`) owned by the app as a resource.
//! Entities only mirror it; all mutation happens here, once per tick.

use bevy::prelude::*;
use std::collections::VecDeque;
use std::f32::consts::FRAC_PI_2;

use crate::utils::constants::cube_constants::{
    CUBELET_COUNT, CUBELET_STEP, CUBE_DIMENSIONS, FACE_COLORS, TURN_ANGLE_EPSILON, TURN_STEP_RAD,
};
use crate::utils::moves::{Face, Move};

/// Sticker colors, one per face of the solved cube.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CubeColor {
    Orange,
    Red,
    White,
    Yellow,
    Blue,
    Green,
}

impl CubeColor {
    /// The color a solved cube shows on the given face.
    pub fn canonical(face: Face) -> CubeColor {
        match face {
            Face::Right => CubeColor::Orange,
            Face::Left => CubeColor::Red,
            Face::Up => CubeColor::White,
            Face::Down => CubeColor::Yellow,
            Face::Front => CubeColor::Blue,
            Face::Back => CubeColor::Green,
        }
    }

    /// Render color of this sticker.
    pub fn color(self) -> Color {
        FACE_COLORS[self as usize]
    }
}

/// One of the 27 small cubes. `facelets` is indexed by local direction in
/// the fixed slot order `+X, -X, +Y, -Y, +Z, -Z`; slots that never face
/// outward hold `None`. The array is fixed at creation; which world face a
/// facelet currently shows on is carried entirely by `rotation`.
#[derive(Clone, Debug, PartialEq)]
pub struct Cubelet {
    pub position: Vec3,
    pub rotation: Quat,
    pub facelets: [Option<CubeColor>; 6],
}

impl Cubelet {
    fn at_grid(i: usize, j: usize, k: usize) -> Cubelet {
        let offset = (CUBE_DIMENSIONS - 1) as f32 / 2.0;
        let position = Vec3::new(
            (i as f32 - offset) * CUBELET_STEP,
            (j as f32 - offset) * CUBELET_STEP,
            (k as f32 - offset) * CUBELET_STEP,
        );

        // Only outward-facing slots of the outer layer get a sticker.
        let max = CUBE_DIMENSIONS - 1;
        let mut facelets = [None; 6];
        for face in Face::ALL {
            let index = [i, j, k][face.axis()];
            let outward = if face.sign() > 0.0 { index == max } else { index == 0 };
            if outward {
                facelets[face.slot()] = Some(CubeColor::canonical(face));
            }
        }

        Cubelet {
            position,
            rotation: Quat::IDENTITY,
            facelets,
        }
    }

    /// Position on `axis` rounded to the nearest half lattice unit. Repeated
    /// snapped turns keep positions exact, but slice selection still rounds
    /// so that in-flight float noise can never misfile a cubelet.
    pub fn lattice_coord(&self, axis: usize) -> f32 {
        (self.position[axis] / CUBELET_STEP * 2.0).round() / 2.0
    }

    /// Position on `axis` rounded to the nearest whole lattice unit.
    pub fn grid_coord(&self, axis: usize) -> f32 {
        (self.position[axis] / CUBELET_STEP).round()
    }

    /// The sticker currently facing `world_dir`, resolved through the
    /// cubelet's orientation.
    pub fn facelet_toward(&self, world_dir: Vec3) -> Option<CubeColor> {
        let local = self.rotation.inverse() * world_dir;
        self.facelets[dominant_slot(local)]
    }
}

/// Facelet slot whose local direction is closest to `dir`.
fn dominant_slot(dir: Vec3) -> usize {
    let abs = dir.abs();
    let axis = if abs.x >= abs.y && abs.x >= abs.z {
        0
    } else if abs.y >= abs.z {
        1
    } else {
        2
    };
    axis * 2 + usize::from(dir[axis] < 0.0)
}

/// FIFO buffer of pending face turns. Insertion order is replay order;
/// duplicates are kept.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MoveQueue(VecDeque<Move>);

impl MoveQueue {
    pub fn enqueue(&mut self, mv: Move) {
        self.0.push_back(mv);
    }

    pub fn dequeue(&mut self) -> Option<Move> {
        self.0.pop_front()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// A face turn in flight: the slice members with their transforms as of the
/// turn's start, and how far the slice has swung so far. Member transforms
/// are recomputed from the snapshots every tick, so the rotation pivot is
/// implicit and nothing is re-parented.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveTurn {
    mv: Move,
    axis: Vec3,
    target_angle: f32,
    current_angle: f32,
    members: Vec<usize>,
    start: Vec<(Vec3, Quat)>,
}

/// Single-flight animator state: at most one turn exists at a time.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum TurnState {
    #[default]
    Idle,
    Rotating(ActiveTurn),
}

/// The cube engine façade. `rotate_face` and `tick` report the move they
/// committed (began executing), if any, so the game layer can react once
/// per move rather than once per frame.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct CubeSim {
    cubelets: Vec<Cubelet>,
    queue: MoveQueue,
    turn: TurnState,
}

impl Default for CubeSim {
    fn default() -> Self {
        CubeSim::new()
    }
}

impl CubeSim {
    /// A solved cube at rest.
    pub fn new() -> CubeSim {
        CubeSim {
            cubelets: solved_cubelets(),
            queue: MoveQueue::default(),
            turn: TurnState::Idle,
        }
    }

    /// Read-only view for rendering and inspection.
    pub fn cubelets(&self) -> &[Cubelet] {
        &self.cubelets
    }

    pub fn is_rotating(&self) -> bool {
        matches!(self.turn, TurnState::Rotating(_))
    }

    /// Idle with nothing pending: the next submitted move starts at once.
    pub fn is_settled(&self) -> bool {
        !self.is_rotating() && self.queue.is_empty()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// The move currently animating, if any.
    pub fn active_move(&self) -> Option<Move> {
        match &self.turn {
            TurnState::Idle => None,
            TurnState::Rotating(turn) => Some(turn.mv),
        }
    }

    /// Submits a face turn. Starts it immediately when idle, otherwise
    /// appends it to the queue. Returns the move iff it began executing now.
    pub fn rotate_face(&mut self, mv: Move) -> Option<Move> {
        if self.is_rotating() {
            self.queue.enqueue(mv);
            return None;
        }
        self.begin_turn(mv).then_some(mv)
    }

    /// Advances the active turn by one fixed angular step. On completion the
    /// slice is snapped and committed, and the next queued move (if any)
    /// starts within the same tick (no idle frame between chained moves).
    /// Returns the queued move that began executing, if one did.
    pub fn tick(&mut self) -> Option<Move> {
        let TurnState::Rotating(turn) = &mut self.turn else {
            return None;
        };

        let remaining = turn.target_angle - turn.current_angle;
        let step = if remaining.abs() < TURN_STEP_RAD {
            remaining
        } else {
            TURN_STEP_RAD.copysign(remaining)
        };
        turn.current_angle += step;

        let swing = Quat::from_axis_angle(turn.axis, turn.current_angle);
        for (slot, &index) in turn.members.iter().enumerate() {
            let (start_pos, start_rot) = turn.start[slot];
            self.cubelets[index].position = swing * start_pos;
            self.cubelets[index].rotation = swing * start_rot;
        }

        let done = (turn.current_angle - turn.target_angle).abs() < TURN_ANGLE_EPSILON;
        if done {
            self.finish_turn();
            while let Some(next) = self.queue.dequeue() {
                if self.begin_turn(next) {
                    return Some(next);
                }
            }
        }
        None
    }

    /// Uniform color check over all six faces. Read-only; a call while
    /// rotating is allowed but only meaningful once idle. Color-match only:
    /// it does not prove the permutation is reachable, which is all the
    /// game needs.
    pub fn is_solved(&self) -> bool {
        for face in Face::ALL {
            let normal = face.normal();
            let mut first = None;
            for cubelet in &self.cubelets {
                if cubelet.grid_coord(face.axis()) != face.sign() {
                    continue;
                }
                let Some(color) = cubelet.facelet_toward(normal) else {
                    return false;
                };
                match first {
                    None => first = Some(color),
                    Some(seen) if seen != color => return false,
                    Some(_) => {}
                }
            }
        }
        true
    }

    /// Tears the model down and recreates the solved configuration, clearing
    /// all pending moves. Rejected (returns false, touching nothing) while a
    /// turn is rotating, since aborting mid-turn would leave half-applied
    /// transforms behind.
    pub fn reset(&mut self) -> bool {
        if self.is_rotating() {
            return false;
        }
        self.cubelets = solved_cubelets();
        self.queue.clear();
        self.turn = TurnState::Idle;
        true
    }

    /// The slice owned by `face`: every cubelet whose rounded lattice
    /// position lies on the face's side. Empty only on a corrupted model;
    /// callers treat that as a no-op.
    pub fn slice_indices(&self, face: Face) -> Vec<usize> {
        let axis = face.axis();
        self.cubelets
            .iter()
            .enumerate()
            .filter(|(_, c)| {
                let coord = c.lattice_coord(axis);
                if face.sign() > 0.0 { coord > 0.5 } else { coord < -0.5 }
            })
            .map(|(index, _)| index)
            .collect()
    }

    fn begin_turn(&mut self, mv: Move) -> bool {
        let members = self.slice_indices(mv.face);
        if members.is_empty() {
            return false;
        }
        let start = members
            .iter()
            .map(|&i| (self.cubelets[i].position, self.cubelets[i].rotation))
            .collect();
        self.turn = TurnState::Rotating(ActiveTurn {
            mv,
            axis: mv.face.turn_axis(),
            target_angle: if mv.prime { -FRAC_PI_2 } else { FRAC_PI_2 },
            current_angle: 0.0,
            members,
            start,
        });
        true
    }

    /// Commits the finished turn: every member's transform is recomputed
    /// from the exact quarter-turn rotation and snapped back onto the
    /// lattice, so float error cannot accumulate across turns.
    fn finish_turn(&mut self) {
        let TurnState::Rotating(turn) = std::mem::take(&mut self.turn) else {
            return;
        };
        let exact = Quat::from_axis_angle(turn.axis, turn.target_angle);
        for (slot, &index) in turn.members.iter().enumerate() {
            let (start_pos, start_rot) = turn.start[slot];
            let cubelet = &mut self.cubelets[index];
            cubelet.position = snap_to_lattice(exact * start_pos);
            cubelet.rotation = snap_orientation(exact * start_rot);
        }
    }
}

fn solved_cubelets() -> Vec<Cubelet> {
    let mut cubelets = Vec::with_capacity(CUBELET_COUNT);
    for i in 0..CUBE_DIMENSIONS {
        for j in 0..CUBE_DIMENSIONS {
            for k in 0..CUBE_DIMENSIONS {
                cubelets.push(Cubelet::at_grid(i, j, k));
            }
        }
    }
    // Anything else is model corruption; the solved check would be
    // meaningless, so fail loudly.
    assert_eq!(cubelets.len(), CUBELET_COUNT);
    cubelets
}

/// Rounds every component to the nearest lattice point.
fn snap_to_lattice(position: Vec3) -> Vec3 {
    (position / CUBELET_STEP).round() * CUBELET_STEP
}

/// Rounds an almost-axis-aligned orientation to the nearest exact one, so
/// every resting rotation is a true multiple of 90 degrees.
fn snap_orientation(rotation: Quat) -> Quat {
    let m = Mat3::from_quat(rotation);
    let snapped = Mat3::from_cols(
        snap_axis(m.x_axis),
        snap_axis(m.y_axis),
        snap_axis(m.z_axis),
    );
    Quat::from_mat3(&snapped).normalize()
}

fn snap_axis(v: Vec3) -> Vec3 {
    let axis = dominant_slot(v) / 2;
    let mut out = Vec3::ZERO;
    out[axis] = 1.0_f32.copysign(v[axis]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    /// Ticks until the animator is idle and the queue is drained, returning
    /// every queued move that got committed along the way.
    fn run_to_idle(sim: &mut CubeSim) -> Vec<Move> {
        let mut committed = Vec::new();
        for _ in 0..100_000 {
            if let Some(mv) = sim.tick() {
                committed.push(mv);
            }
            if sim.is_settled() {
                return committed;
            }
        }
        panic!("cube never settled");
    }

    fn apply(sim: &mut CubeSim, symbols: &[&str]) -> Vec<Move> {
        let mut committed = Vec::new();
        for symbol in symbols {
            let mv = Move::parse(symbol).expect("legal symbol");
            committed.extend(sim.rotate_face(mv));
        }
        committed.extend(run_to_idle(sim));
        committed
    }

    #[test]
    fn fresh_cube_is_solved() {
        let sim = CubeSim::new();
        assert_eq!(sim.cubelets().len(), CUBELET_COUNT);
        assert!(sim.is_solved());
        assert!(sim.is_settled());
    }

    #[test]
    fn every_face_slice_has_nine_members() {
        let sim = CubeSim::new();
        for face in Face::ALL {
            assert_eq!(sim.slice_indices(face).len(), 9, "face {}", face.letter());
        }
    }

    #[test]
    fn solved_faces_show_canonical_colors() {
        let sim = CubeSim::new();
        for face in Face::ALL {
            for &index in &sim.slice_indices(face) {
                let cubelet = &sim.cubelets()[index];
                assert_eq!(
                    cubelet.facelet_toward(face.normal()),
                    Some(CubeColor::canonical(face))
                );
            }
        }
    }

    #[test]
    fn interior_facelets_are_never_colored() {
        let sim = CubeSim::new();
        let stickers: usize = sim
            .cubelets()
            .iter()
            .map(|c| c.facelets.iter().flatten().count())
            .sum();
        // 9 stickers per face, 6 faces.
        assert_eq!(stickers, 54);
    }

    #[test]
    fn move_then_inverse_restores_every_transform() {
        let pristine = CubeSim::new();
        for mv in Move::ALL {
            let mut sim = CubeSim::new();
            sim.rotate_face(mv);
            run_to_idle(&mut sim);
            sim.rotate_face(mv.inverse());
            run_to_idle(&mut sim);
            assert_eq!(sim.cubelets(), pristine.cubelets(), "move {mv}");
            assert!(sim.is_solved());
        }
    }

    #[test]
    fn four_quarter_turns_of_one_face_resolve() {
        for face in Face::ALL {
            let mut sim = CubeSim::new();
            let mv = Move { face, prime: false };
            for _ in 0..4 {
                sim.rotate_face(mv);
            }
            run_to_idle(&mut sim);
            assert!(sim.is_solved(), "face {}", face.letter());
            assert_eq!(sim.cubelets(), CubeSim::new().cubelets());
        }
    }

    #[test]
    fn any_single_move_unsolves() {
        for mv in Move::ALL {
            let mut sim = CubeSim::new();
            sim.rotate_face(mv);
            run_to_idle(&mut sim);
            assert!(!sim.is_solved(), "move {mv}");
        }
    }

    #[test]
    fn moves_submitted_while_rotating_run_in_order() {
        let mut sim = CubeSim::new();
        let first = Move::parse("R").unwrap();
        assert_eq!(sim.rotate_face(first), Some(first));
        assert!(sim.is_rotating());

        // Submitted in one burst mid-rotation, duplicate included.
        let queued = ["U", "F'", "U"].map(|s| Move::parse(s).unwrap());
        for mv in queued {
            assert_eq!(sim.rotate_face(mv), None);
        }
        assert_eq!(sim.queue_len(), 3);

        let committed = run_to_idle(&mut sim);
        assert_eq!(committed, queued.to_vec());
    }

    #[test]
    fn reset_is_rejected_while_rotating() {
        let mut sim = CubeSim::new();
        sim.rotate_face(Move::parse("R").unwrap());
        sim.tick();
        let before = sim.clone();

        assert!(!sim.reset());
        assert_eq!(sim, before);

        run_to_idle(&mut sim);
        assert!(sim.reset());
        assert!(sim.is_solved());
        assert_eq!(sim.queue_len(), 0);
    }

    #[test]
    fn solved_check_is_callable_mid_rotation() {
        let mut sim = CubeSim::new();
        sim.rotate_face(Move::parse("U").unwrap());
        sim.tick();
        // Result is only meaningful once idle; the call itself must be safe.
        let _ = sim.is_solved();
        assert!(sim.is_rotating());
    }

    #[test]
    fn slices_stay_at_nine_through_random_play() {
        let mut rng = ChaCha8Rng::seed_from_u64(0xCAFE);
        let mut sim = CubeSim::new();
        for _ in 0..100 {
            let mv = Move::ALL[rng.random_range(0..Move::ALL.len())];
            sim.rotate_face(mv);
            run_to_idle(&mut sim);
            for face in Face::ALL {
                assert_eq!(sim.slice_indices(face).len(), 9, "face {}", face.letter());
            }
        }
    }

    #[test]
    fn transforms_stay_exact_through_random_play() {
        let mut rng = ChaCha8Rng::seed_from_u64(0xBEEF);
        let mut sim = CubeSim::new();
        for _ in 0..200 {
            let mv = Move::ALL[rng.random_range(0..Move::ALL.len())];
            sim.rotate_face(mv);
        }
        run_to_idle(&mut sim);

        for cubelet in sim.cubelets() {
            // Positions snap to the lattice bit-exactly.
            for axis in 0..3 {
                let coord = cubelet.position[axis] / CUBELET_STEP;
                assert!(
                    coord == -1.0 || coord == 0.0 || coord == 1.0,
                    "drifted position {:?}",
                    cubelet.position
                );
            }
            // Orientations are the canonical representatives of exact 90°
            // multiples: snapping them again changes nothing, and the matrix
            // entries sit on ±1/0 up to quaternion round-off.
            assert_eq!(snap_orientation(cubelet.rotation), cubelet.rotation);
            let m = Mat3::from_quat(cubelet.rotation);
            for entry in m.to_cols_array() {
                let nearest = entry.round();
                assert!(
                    (nearest == -1.0 || nearest == 0.0 || nearest == 1.0)
                        && (entry - nearest).abs() < 1e-6,
                    "drifted orientation {m:?}"
                );
            }
        }
    }

    #[test]
    fn sexy_move_scenario() {
        let mut sim = CubeSim::new();

        // Enqueued back to back without waiting for completion.
        let committed = apply(&mut sim, &["U", "R", "U'", "R'"]);
        let expected: Vec<Move> = ["U", "R", "U'", "R'"]
            .iter()
            .map(|s| Move::parse(s).unwrap())
            .collect();
        assert_eq!(committed, expected);
        assert!(sim.is_settled());
        assert!(!sim.is_solved());

        apply(&mut sim, &["R", "U", "R'", "U'"]);
        assert!(sim.is_solved());
    }
}
