//! Axis-aligned collision checks
//!
//! Everything on the field is a box: the ball sprite, both paddles and the
//! two wall strips. Contact is box overlap.

use glam::Vec2;

use super::state::{Field, Side, Wall};
use crate::consts::WALL_THICKNESS;

/// Axis-aligned rectangle (screen coordinates, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    /// Inclusive overlap test (touching edges count as contact)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() <= other.right()
            && other.left() <= self.right()
            && self.top() <= other.bottom()
            && other.top() <= self.bottom()
    }
}

/// Wall strip rectangle along the top or bottom edge
pub fn wall_rect(wall: Wall, field: &Field) -> Rect {
    match wall {
        Wall::Top => Rect::new(Vec2::ZERO, Vec2::new(field.width, WALL_THICKNESS)),
        Wall::Bottom => Rect::new(
            Vec2::new(0.0, field.height - WALL_THICKNESS),
            Vec2::new(field.width, WALL_THICKNESS),
        ),
    }
}

/// Ball touches the top strip (or has already left through it)
pub fn hits_top_wall(ball: &Rect, field: &Field) -> bool {
    ball.top() <= wall_rect(Wall::Top, field).bottom()
}

/// Ball touches the bottom strip (or has already left through it)
pub fn hits_bottom_wall(ball: &Rect, field: &Field) -> bool {
    ball.bottom() >= wall_rect(Wall::Bottom, field).top()
}

/// Which wall, if any, the ball is in contact with
pub fn wall_contact(ball: &Rect, field: &Field) -> Option<Wall> {
    if hits_top_wall(ball, field) {
        Some(Wall::Top)
    } else if hits_bottom_wall(ball, field) {
        Some(Wall::Bottom)
    } else {
        None
    }
}

pub fn hits_paddle(ball: &Rect, paddle: &Rect) -> bool {
    ball.overlaps(paddle)
}

/// Side that earns a point when the ball has crossed a horizontal bound.
///
/// Leaving on the left is a point for the computer, leaving on the right a
/// point for the player.
pub fn exit_side(ball: &Rect, field: &Field) -> Option<Side> {
    if ball.left() < 0.0 {
        Some(Side::Computer)
    } else if ball.left() > field.width {
        Some(Side::Player)
    } else {
        None
    }
}

/// Reflect one velocity component so it points away from a surface.
///
/// `away` is the sign of the direction leaving the surface. The result
/// points away even when the incoming component already did.
#[inline]
pub fn reflect_away(component: f32, away: f32) -> f32 {
    component.abs() * away.signum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn ball_at(x: f32, y: f32) -> Rect {
        Rect::new(Vec2::new(x, y), Vec2::splat(BALL_SIZE))
    }

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(Vec2::ZERO, Vec2::splat(10.0));
        let b = Rect::new(Vec2::new(5.0, 5.0), Vec2::splat(10.0));
        let c = Rect::new(Vec2::new(20.0, 0.0), Vec2::splat(10.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));

        // Touching edges count
        let d = Rect::new(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        assert!(a.overlaps(&d));
    }

    #[test]
    fn test_wall_contact() {
        let field = Field::default();
        assert_eq!(wall_contact(&ball_at(100.0, 4.0), &field), Some(Wall::Top));
        assert_eq!(wall_contact(&ball_at(100.0, -30.0), &field), Some(Wall::Top));
        assert_eq!(
            wall_contact(&ball_at(100.0, field.height - BALL_SIZE - 2.0), &field),
            Some(Wall::Bottom)
        );
        assert_eq!(wall_contact(&ball_at(100.0, 200.0), &field), None);
    }

    #[test]
    fn test_wall_rect_matches_contact_threshold() {
        let field = Field::default();
        let top = wall_rect(Wall::Top, &field);
        let bottom = wall_rect(Wall::Bottom, &field);
        assert!(ball_at(50.0, WALL_THICKNESS).overlaps(&top));
        assert!(hits_top_wall(&ball_at(50.0, WALL_THICKNESS), &field));
        assert!(!hits_top_wall(&ball_at(50.0, top.bottom() + 0.5), &field));
        assert_eq!(bottom.bottom(), field.height);
        assert!(hits_bottom_wall(&ball_at(50.0, bottom.top() - BALL_SIZE), &field));
        assert!(!hits_bottom_wall(&ball_at(50.0, bottom.top() - BALL_SIZE - 0.5), &field));
    }

    #[test]
    fn test_paddle_contact() {
        let paddle = Rect::new(
            Vec2::new(0.0, 150.0),
            Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
        );
        assert!(hits_paddle(&ball_at(5.0, 160.0), &paddle));
        // Ball overlapping only with its lower half still counts
        assert!(hits_paddle(&ball_at(5.0, 135.0), &paddle));
        assert!(!hits_paddle(&ball_at(5.0, 100.0), &paddle));
        assert!(!hits_paddle(&ball_at(40.0, 160.0), &paddle));
    }

    #[test]
    fn test_exit_side() {
        let field = Field::default();
        assert_eq!(exit_side(&ball_at(-0.5, 100.0), &field), Some(Side::Computer));
        assert_eq!(exit_side(&ball_at(field.width + 1.0, 100.0), &field), Some(Side::Player));
        assert_eq!(exit_side(&ball_at(0.0, 100.0), &field), None);
        assert_eq!(exit_side(&ball_at(field.width, 100.0), &field), None);
    }

    #[test]
    fn test_reflect_away() {
        assert_eq!(reflect_away(-3.0, 1.0), 3.0);
        assert_eq!(reflect_away(3.0, 1.0), 3.0);
        assert_eq!(reflect_away(3.0, -1.0), -3.0);
    }
}
