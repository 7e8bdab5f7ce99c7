//! Face-turn notation: the six faces and the twelve legal move symbols.

use bevy::prelude::*;
use std::fmt;

/// The six outward faces of the cube, in fixed facelet-slot order.
///
/// The slot order matches the local axis order `+X, -X, +Y, -Y, +Z, -Z`,
/// so `Face as usize` doubles as the facelet index on a cubelet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    Right,
    Left,
    Up,
    Down,
    Front,
    Back,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Right,
        Face::Left,
        Face::Up,
        Face::Down,
        Face::Front,
        Face::Back,
    ];

    /// Index of the coordinate axis this face lies on (x=0, y=1, z=2).
    pub fn axis(self) -> usize {
        match self {
            Face::Right | Face::Left => 0,
            Face::Up | Face::Down => 1,
            Face::Front | Face::Back => 2,
        }
    }

    /// Which side of the axis the face sits on.
    pub fn sign(self) -> f32 {
        match self {
            Face::Right | Face::Up | Face::Front => 1.0,
            Face::Left | Face::Down | Face::Back => -1.0,
        }
    }

    /// Outward unit normal of the face in world space.
    pub fn normal(self) -> Vec3 {
        let mut n = Vec3::ZERO;
        n[self.axis()] = self.sign();
        n
    }

    /// Positive unit vector of the face's axis, shared by both faces on it.
    /// Turns rotate about this axis regardless of the face's sign, matching
    /// the animation convention the renderer expects.
    pub fn turn_axis(self) -> Vec3 {
        let mut n = Vec3::ZERO;
        n[self.axis()] = 1.0;
        n
    }

    /// Facelet slot index on a cubelet (fixed order R, L, U, D, F, B).
    pub fn slot(self) -> usize {
        self as usize
    }

    pub fn letter(self) -> char {
        match self {
            Face::Right => 'R',
            Face::Left => 'L',
            Face::Up => 'U',
            Face::Down => 'D',
            Face::Front => 'F',
            Face::Back => 'B',
        }
    }

    fn from_letter(c: char) -> Option<Face> {
        match c {
            'R' => Some(Face::Right),
            'L' => Some(Face::Left),
            'U' => Some(Face::Up),
            'D' => Some(Face::Down),
            'F' => Some(Face::Front),
            'B' => Some(Face::Back),
            _ => None,
        }
    }
}

/// A single quarter turn of one face. `prime` means counter-clockwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub face: Face,
    pub prime: bool,
}

impl Move {
    /// All twelve legal moves, clockwise before counter-clockwise per face.
    pub const ALL: [Move; 12] = {
        let mut all = [Move { face: Face::Right, prime: false }; 12];
        let faces = Face::ALL;
        let mut i = 0;
        while i < 6 {
            all[i * 2] = Move { face: faces[i], prime: false };
            all[i * 2 + 1] = Move { face: faces[i], prime: true };
            i += 1;
        }
        all
    };

    /// Parses one of the twelve legal symbols (`"R"`, `"R'"`, ...).
    /// Anything else yields `None`; callers treat that as a no-op.
    pub fn parse(symbol: &str) -> Option<Move> {
        let mut chars = symbol.chars();
        let face = Face::from_letter(chars.next()?)?;
        match chars.next() {
            None => Some(Move { face, prime: false }),
            Some('\'') if chars.next().is_none() => Some(Move { face, prime: true }),
            _ => None,
        }
    }

    /// The move undoing this one: same face, opposite direction.
    pub fn inverse(self) -> Move {
        Move {
            face: self.face,
            prime: !self.prime,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.face.letter())?;
        if self.prime {
            write!(f, "'")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_all_legal_symbols() {
        for mv in Move::ALL {
            let symbol = mv.to_string();
            assert_eq!(Move::parse(&symbol), Some(mv), "symbol {symbol}");
        }
    }

    #[test]
    fn parse_rejects_garbage() {
        for bad in ["", "X", "r", "R''", "R2", "RU", "'", " R", "R "] {
            assert_eq!(Move::parse(bad), None, "accepted {bad:?}");
        }
    }

    #[test]
    fn twelve_distinct_moves() {
        for (i, a) in Move::ALL.iter().enumerate() {
            for b in &Move::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn inverse_flips_direction_only() {
        for mv in Move::ALL {
            let inv = mv.inverse();
            assert_eq!(inv.face, mv.face);
            assert_ne!(inv.prime, mv.prime);
            assert_eq!(inv.inverse(), mv);
        }
    }

    #[test]
    fn face_table_matches_axes() {
        assert_eq!(Face::Right.normal(), Vec3::X);
        assert_eq!(Face::Left.normal(), -Vec3::X);
        assert_eq!(Face::Up.normal(), Vec3::Y);
        assert_eq!(Face::Down.normal(), -Vec3::Y);
        assert_eq!(Face::Front.normal(), Vec3::Z);
        assert_eq!(Face::Back.normal(), -Vec3::Z);
    }

    #[test]
    fn slots_follow_fixed_face_order() {
        let slots: Vec<usize> = Face::ALL.iter().map(|f| f.slot()).collect();
        assert_eq!(slots, vec![0, 1, 2, 3, 4, 5]);
    }
}
