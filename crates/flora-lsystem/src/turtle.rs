//! 3-D turtle interpretation of expanded L-system strings.
//!
//! The turtle frame is stored as a unit quaternion. In its local frame the
//! turtle heads along +Z, its left is -Y and its up is +X, so an unrotated
//! turtle grows along the engine's vertical axis.

use glam::{Quat, Vec3};

use crate::error::InterpretationError;
use crate::token::Token;

/// Local heading axis.
pub const LOCAL_HEADING: Vec3 = Vec3::Z;
/// Local left axis.
pub const LOCAL_LEFT: Vec3 = Vec3::NEG_Y;
/// Local up axis.
pub const LOCAL_UP: Vec3 = Vec3::X;

/// Instructions understood by the turtle. Any other symbol is a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurtleCommand {
    /// `F`: move forward and record a branch segment.
    Draw,
    /// `f`: move forward without drawing.
    Move,
    /// `+`: yaw left around the up axis.
    YawLeft,
    /// `-`: yaw right around the up axis.
    YawRight,
    /// `&`: pitch down around the left axis.
    PitchDown,
    /// `^`: pitch up around the left axis.
    PitchUp,
    /// `\`: roll left around the heading.
    RollLeft,
    /// `/`: roll right around the heading.
    RollRight,
    /// `|`: yaw by 180 degrees.
    TurnAround,
    /// `[`: save the turtle state.
    Push,
    /// `]`: restore the last saved state.
    Pop,
    /// `*`: record a flower at the current position.
    Flower,
}

impl TurtleCommand {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        Some(match symbol {
            'F' => Self::Draw,
            'f' => Self::Move,
            '+' => Self::YawLeft,
            '-' => Self::YawRight,
            '&' => Self::PitchDown,
            '^' => Self::PitchUp,
            '\\' => Self::RollLeft,
            '/' => Self::RollRight,
            '|' => Self::TurnAround,
            '[' => Self::Push,
            ']' => Self::Pop,
            '*' => Self::Flower,
            _ => return None,
        })
    }

    pub fn symbol(self) -> char {
        match self {
            Self::Draw => 'F',
            Self::Move => 'f',
            Self::YawLeft => '+',
            Self::YawRight => '-',
            Self::PitchDown => '&',
            Self::PitchUp => '^',
            Self::RollLeft => '\\',
            Self::RollRight => '/',
            Self::TurnAround => '|',
            Self::Push => '[',
            Self::Pop => ']',
            Self::Flower => '*',
        }
    }
}

/// Position, orientation, and default step/angle of the turtle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Turtle {
    pub position: Vec3,
    pub orientation: Quat,
    /// Step length used when a move carries no argument.
    pub step: f32,
    /// Turn angle in degrees used when a rotation carries no argument.
    pub angle: f32,
}

impl Turtle {
    /// A turtle at the origin with the identity orientation.
    pub fn new(step: f32, angle: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            step,
            angle,
        }
    }

    pub fn heading(&self) -> Vec3 {
        self.orientation * LOCAL_HEADING
    }

    pub fn left(&self) -> Vec3 {
        self.orientation * LOCAL_LEFT
    }

    pub fn up(&self) -> Vec3 {
        self.orientation * LOCAL_UP
    }

    pub fn move_forward(&mut self, distance: f32) {
        self.position += self.heading() * distance;
    }

    /// Rotate around the up axis; positive turns toward the left.
    pub fn yaw(&mut self, degrees: f32) {
        self.rotate_local(LOCAL_UP, degrees);
    }

    /// Rotate around the left axis; positive pitches the heading down.
    pub fn pitch(&mut self, degrees: f32) {
        self.rotate_local(LOCAL_LEFT, degrees);
    }

    /// Rotate around the heading; positive rolls to the left.
    pub fn roll(&mut self, degrees: f32) {
        self.rotate_local(LOCAL_HEADING, degrees);
    }

    fn rotate_local(&mut self, axis: Vec3, degrees: f32) {
        let rotation = Quat::from_axis_angle(axis, degrees.to_radians());
        self.orientation = (self.orientation * rotation).normalize();
    }
}

/// A drawn branch, in engine space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BranchSegment {
    pub start: Vec3,
    pub end: Vec3,
}

impl BranchSegment {
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// A flower placement, in engine space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowerPoint {
    pub position: Vec3,
    pub orientation: Quat,
}

/// Geometry collected from one interpretation run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TurtleOutput {
    pub branches: Vec<BranchSegment>,
    pub flowers: Vec<FlowerPoint>,
}

/// Run a fresh turtle over `tokens`.
///
/// `step` and `angle` (degrees) apply to instructions without an argument.
/// States left on the stack at the end are discarded.
///
/// # Errors
///
/// Returns [`InterpretationError::StackUnderflow`] on `]` with an empty stack.
/// No geometry is returned in that case.
pub fn interpret(
    tokens: &[Token],
    step: f32,
    angle: f32,
) -> Result<TurtleOutput, InterpretationError> {
    let mut turtle = Turtle::new(step, angle);
    let mut stack: Vec<Turtle> = Vec::new();
    let mut output = TurtleOutput::default();

    for (index, token) in tokens.iter().enumerate() {
        let Some(command) = TurtleCommand::from_symbol(token.symbol) else {
            continue;
        };
        let distance = token.argument.unwrap_or(turtle.step);
        let degrees = token.argument.unwrap_or(turtle.angle);

        match command {
            TurtleCommand::Draw => {
                let start = turtle.position;
                turtle.move_forward(distance);
                output.branches.push(BranchSegment {
                    start,
                    end: turtle.position,
                });
            }
            TurtleCommand::Move => turtle.move_forward(distance),
            TurtleCommand::YawLeft => turtle.yaw(degrees),
            TurtleCommand::YawRight => turtle.yaw(-degrees),
            TurtleCommand::PitchDown => turtle.pitch(degrees),
            TurtleCommand::PitchUp => turtle.pitch(-degrees),
            TurtleCommand::RollLeft => turtle.roll(degrees),
            TurtleCommand::RollRight => turtle.roll(-degrees),
            TurtleCommand::TurnAround => turtle.yaw(180.0),
            TurtleCommand::Push => stack.push(turtle),
            TurtleCommand::Pop => {
                turtle = stack
                    .pop()
                    .ok_or(InterpretationError::StackUnderflow { index })?;
            }
            TurtleCommand::Flower => output.flowers.push(FlowerPoint {
                position: turtle.position,
                orientation: turtle.orientation,
            }),
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::tokenize;

    const EPS: f32 = 1e-5;

    fn assert_vec_eq(actual: Vec3, expected: Vec3) {
        assert!(
            actual.abs_diff_eq(expected, EPS),
            "expected {expected:?}, got {actual:?}"
        );
    }

    fn run(text: &str, step: f32, angle: f32) -> Result<TurtleOutput, InterpretationError> {
        interpret(&tokenize(text).unwrap(), step, angle)
    }

    #[test]
    fn test_command_symbols_roundtrip() {
        for symbol in "Ff+-&^\\/|[]*".chars() {
            let command = TurtleCommand::from_symbol(symbol).unwrap();
            assert_eq!(command.symbol(), symbol);
        }
        assert!(TurtleCommand::from_symbol('X').is_none());
    }

    #[test]
    fn test_initial_frame() {
        let turtle = Turtle::new(1.0, 90.0);
        assert_vec_eq(turtle.heading(), Vec3::Z);
        assert_vec_eq(turtle.left(), Vec3::NEG_Y);
        assert_vec_eq(turtle.up(), Vec3::X);
    }

    #[test]
    fn test_single_draw() {
        let out = run("F", 2.5, 22.5).unwrap();
        assert_eq!(out.branches.len(), 1);
        assert!((out.branches[0].length() - 2.5).abs() < EPS);
        assert_vec_eq(out.branches[0].end, Vec3::new(0.0, 0.0, 2.5));
    }

    #[test]
    fn test_move_without_drawing() {
        let out = run("fF", 1.0, 0.0).unwrap();
        assert_eq!(out.branches.len(), 1);
        assert_vec_eq(out.branches[0].start, Vec3::Z);
    }

    #[test]
    fn test_yaw_left_turns_toward_left() {
        let mut turtle = Turtle::new(1.0, 90.0);
        turtle.yaw(90.0);
        assert_vec_eq(turtle.heading(), Vec3::NEG_Y);
        assert_vec_eq(turtle.up(), Vec3::X);
    }

    #[test]
    fn test_pitch_down_turns_away_from_up() {
        let mut turtle = Turtle::new(1.0, 90.0);
        turtle.pitch(90.0);
        assert_vec_eq(turtle.heading(), Vec3::NEG_X);
        assert_vec_eq(turtle.left(), Vec3::NEG_Y);
    }

    #[test]
    fn test_roll_keeps_heading() {
        let mut turtle = Turtle::new(1.0, 90.0);
        turtle.roll(90.0);
        assert_vec_eq(turtle.heading(), Vec3::Z);
        assert_vec_eq(turtle.left(), Vec3::X);
    }

    #[test]
    fn test_turn_around() {
        let out = run("F|F", 1.0, 10.0).unwrap();
        assert_vec_eq(out.branches[1].end, Vec3::ZERO);
    }

    #[test]
    fn test_frame_stays_orthonormal() {
        let mut turtle = Turtle::new(1.0, 0.0);
        for i in 0..1000 {
            turtle.yaw(13.0 + i as f32);
            turtle.pitch(7.0);
            turtle.roll(-29.0);
        }
        let (h, l, u) = (turtle.heading(), turtle.left(), turtle.up());
        assert!((h.length() - 1.0).abs() < 1e-4);
        assert!(h.dot(l).abs() < 1e-4);
        assert_vec_eq(h.cross(l), u);
    }

    #[test]
    fn test_branch_restores_orientation() {
        let out = run("F[+F]F", 1.0, 90.0).unwrap();
        assert_eq!(out.branches.len(), 3);
        assert!(out.flowers.is_empty());
        assert_vec_eq(out.branches[0].start, Vec3::ZERO);
        assert_vec_eq(out.branches[0].end, Vec3::Z);
        assert_vec_eq(out.branches[1].start, Vec3::Z);
        assert_vec_eq(out.branches[1].end, Vec3::new(0.0, -1.0, 1.0));
        assert_vec_eq(out.branches[2].start, Vec3::Z);
        assert_vec_eq(out.branches[2].end, Vec3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn test_argument_overrides() {
        let out = run("F(3)+(90)F", 1.0, 45.0).unwrap();
        assert_vec_eq(out.branches[0].end, Vec3::new(0.0, 0.0, 3.0));
        assert_vec_eq(out.branches[1].end, Vec3::new(0.0, -1.0, 3.0));
    }

    #[test]
    fn test_flower_records_position() {
        let out = run("FF*", 1.0, 0.0).unwrap();
        assert_eq!(out.flowers.len(), 1);
        assert_vec_eq(out.flowers[0].position, Vec3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn test_unknown_symbols_are_noops() {
        let out = run("XFYZ", 1.0, 30.0).unwrap();
        assert_eq!(out.branches.len(), 1);
    }

    #[test]
    fn test_unmatched_pop() {
        assert_eq!(
            run("F]F", 1.0, 30.0),
            Err(InterpretationError::StackUnderflow { index: 1 })
        );
    }

    #[test]
    fn test_unclosed_push_is_fine() {
        let out = run("F[+F", 1.0, 30.0).unwrap();
        assert_eq!(out.branches.len(), 2);
    }
}
